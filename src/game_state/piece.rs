//! Piece records placed on the board.
//!
//! A `Piece` is an immutable value apart from its has-moved bit, and even that
//! is changed copy-on-write: `moved()` returns a new value which the engine
//! writes back into the board. Promotion or transformation likewise means
//! placing a different `Piece`, never editing type or owner in place.

use std::fmt;
use std::sync::Arc;

use crate::game_state::chess_types::{same_type, Color, PieceTags, KING};
use crate::moves::move_rule::{MoveRule, RuleSet};

/// Type name of the stand-in victim used by attack probes. It has no rules.
pub const PROBE_VICTIM_TYPE: &str = "ProbeVictim";

#[derive(Clone)]
pub struct Piece {
    owner: Color,
    type_name: String,
    // `None` means the rules come from the resolver by type name.
    rules: Option<Arc<[Arc<dyn MoveRule>]>>,
    tags: PieceTags,
    has_moved: bool,
}

impl Piece {
    /// A piece whose rules are looked up by type name in the resolver.
    pub fn new(owner: impl Into<Color>, type_name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            type_name: type_name.into(),
            rules: None,
            tags: PieceTags::NONE,
            has_moved: false,
        }
    }

    /// A piece carrying its own ordered rule list; the resolver is not consulted.
    pub fn with_rules(
        owner: impl Into<Color>,
        type_name: impl Into<String>,
        rules: RuleSet,
    ) -> Self {
        Self {
            rules: Some(rules.into()),
            ..Self::new(owner, type_name)
        }
    }

    pub(crate) fn probe_victim(owner: Color) -> Self {
        Self::new(owner, PROBE_VICTIM_TYPE)
    }

    pub fn tagged(mut self, tags: PieceTags) -> Self {
        self.tags = self.tags.with(tags);
        self
    }

    #[inline]
    pub fn owner(&self) -> &Color {
        &self.owner
    }

    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[inline]
    pub fn rules(&self) -> Option<&[Arc<dyn MoveRule>]> {
        self.rules.as_deref()
    }

    #[inline]
    pub fn tags(&self) -> PieceTags {
        self.tags
    }

    #[inline]
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    #[inline]
    pub fn is_type(&self, type_name: &str) -> bool {
        same_type(&self.type_name, type_name)
    }

    /// Kings are royal by type; any other piece can be made royal by tag.
    #[inline]
    pub fn is_royal(&self) -> bool {
        self.tags.contains(PieceTags::ROYAL) || self.is_type(KING)
    }

    /// Copy of this piece with the has-moved bit set.
    pub fn moved(&self) -> Piece {
        Piece {
            has_moved: true,
            ..self.clone()
        }
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Piece")
            .field("owner", &self.owner)
            .field("type_name", &self.type_name)
            .field("embedded_rules", &self.rules.as_ref().map(|r| r.len()))
            .field("tags", &self.tags)
            .field("has_moved", &self.has_moved)
            .finish()
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        let same_rules = match (&self.rules, &other.rules) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        same_rules
            && self.owner == other.owner
            && self.type_name == other.type_name
            && self.tags == other.tags
            && self.has_moved == other.has_moved
    }
}
