//! The joker: moves as whatever type was effectively moved last.
//!
//! The copied ("base") type is the effective type of the previous move. With
//! no previous move, or when that type is the joker's own type, the configured
//! default is used instead so a joker can never copy itself. The base type's
//! rules come from the resolver and every move they produce is tagged with the
//! base type, which then becomes the effective type once the move is applied.

use crate::game_state::chess_types::{same_type, KING};
use crate::moves::move_rule::{no_moves, MoveIter, MoveRule, RuleContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimicRule {
    default_type: String,
}

impl MimicRule {
    pub fn new(default_type: impl Into<String>) -> Self {
        Self {
            default_type: default_type.into(),
        }
    }

    /// Type the piece on `ctx.origin` would currently move as.
    pub fn base_type<'a>(&'a self, ctx: &RuleContext<'a>) -> Option<&'a str> {
        let mover = ctx.mover()?;
        let base = match ctx.state.last_move_effective_type() {
            Some(last) if !same_type(last, mover.type_name()) => last,
            _ => self.default_type.as_str(),
        };
        (!same_type(base, mover.type_name())).then_some(base)
    }
}

impl Default for MimicRule {
    fn default() -> Self {
        Self::new(KING)
    }
}

impl MoveRule for MimicRule {
    fn generate<'a>(&'a self, ctx: RuleContext<'a>) -> MoveIter<'a> {
        // A copied type that itself mimics would recurse.
        if ctx.mimic_depth() > 0 {
            return no_moves();
        }
        let (Some(resolver), Some(base)) = (ctx.resolver, self.base_type(&ctx)) else {
            return no_moves();
        };
        let base = base.to_owned();
        let nested = ctx.nested_mimic();
        let rules = resolver.rules_for(&base);
        Box::new(
            rules
                .iter()
                .flat_map(move |rule| rule.generate(nested))
                .map(move |mv| mv.with_as_type(base.clone())),
        )
    }
}
