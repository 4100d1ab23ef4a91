//! The move-rule abstraction.
//!
//! A `MoveRule` turns a `RuleContext` into a lazy, finite sequence of
//! candidate moves for the piece on the context's origin cell. Rules hold only
//! configuration, never state between calls; calling `generate` again simply
//! recomputes from scratch.
//!
//! Every rule yields nothing for an empty origin and never yields a move onto
//! a cell held by a piece of the mover's own owner.

use std::fmt;
use std::iter;
use std::sync::Arc;

use crate::game_state::chess_types::Move;
use crate::game_state::coord::Coord;
use crate::game_state::game_state::GameState;
use crate::game_state::grid_geometry::GridGeometry;
use crate::game_state::piece::Piece;
use crate::move_generation::rules_resolver::RulesResolver;

pub type MoveIter<'a> = Box<dyn Iterator<Item = Move> + 'a>;

/// Ordered rule list of a piece type.
pub type RuleSet = Vec<Arc<dyn MoveRule>>;

pub trait MoveRule: fmt::Debug + Send + Sync {
    fn generate<'a>(&'a self, ctx: RuleContext<'a>) -> MoveIter<'a>;

    /// Identity used to deduplicate rule lists when fusing piece types.
    fn signature(&self) -> String {
        format!("{self:?}")
    }
}

#[inline]
pub(crate) fn no_moves<'a>() -> MoveIter<'a> {
    Box::new(iter::empty())
}

/// Which kinds of destination a rule may land on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaptureMode {
    #[default]
    MoveOrCapture,
    CaptureOnly,
    MoveOnly,
}

impl CaptureMode {
    #[inline]
    pub fn allows_quiet(self) -> bool {
        !matches!(self, CaptureMode::CaptureOnly)
    }

    #[inline]
    pub fn allows_capture(self) -> bool {
        !matches!(self, CaptureMode::MoveOnly)
    }
}

/// Per-call bundle handed to every rule. Cheap to copy, never stored.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    pub state: &'a GameState,
    pub origin: Coord,
    pub resolver: Option<&'a RulesResolver>,
    // Stand-in occupant for one cell, used by attack probes.
    probe: Option<(Coord, &'a Piece)>,
    mimic_depth: u8,
}

impl<'a> RuleContext<'a> {
    pub fn new(state: &'a GameState, origin: Coord) -> Self {
        Self {
            state,
            origin,
            resolver: None,
            probe: None,
            mimic_depth: 0,
        }
    }

    pub fn with_resolver(mut self, resolver: &'a RulesResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub(crate) fn with_resolver_opt(mut self, resolver: Option<&'a RulesResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub(crate) fn with_probe(mut self, cell: Coord, victim: &'a Piece) -> Self {
        self.probe = Some((cell, victim));
        self
    }

    /// Same settings, different origin cell.
    pub fn at(mut self, origin: Coord) -> Self {
        self.origin = origin;
        self
    }

    pub(crate) fn nested_mimic(mut self) -> Self {
        self.mimic_depth = self.mimic_depth.saturating_add(1);
        self
    }

    #[inline]
    pub(crate) fn mimic_depth(&self) -> u8 {
        self.mimic_depth
    }

    /// True while generating moves to answer "is this cell attacked?".
    #[inline]
    pub fn is_attack_probe(&self) -> bool {
        self.probe.is_some()
    }

    #[inline]
    pub fn geometry(&self) -> &'a GridGeometry {
        self.state.board().geometry()
    }

    /// Occupant of `cell` as rules must see it, including the probe stand-in.
    #[inline]
    pub fn piece_at(&self, cell: Coord) -> Option<&'a Piece> {
        match self.probe {
            Some((probe_cell, victim)) if probe_cell == cell => Some(victim),
            _ => self.state.board().get(cell),
        }
    }

    /// The piece on the origin cell.
    #[inline]
    pub fn mover(&self) -> Option<&'a Piece> {
        self.piece_at(self.origin)
    }
}

/// Outcome of looking at a single destination cell for `mover`.
#[inline]
pub(crate) fn landing(
    ctx: &RuleContext<'_>,
    mover: &Piece,
    cell: Coord,
    mode: CaptureMode,
) -> Option<Move> {
    if !ctx.geometry().contains(cell) {
        return None;
    }
    let allowed = match ctx.piece_at(cell) {
        None => mode.allows_quiet(),
        Some(occupant) => mode.allows_capture() && occupant.owner() != mover.owner(),
    };
    allowed.then(|| Move::new(ctx.origin, cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Color;

    #[test]
    fn capture_modes_are_exclusive() {
        assert!(CaptureMode::MoveOrCapture.allows_quiet());
        assert!(CaptureMode::MoveOrCapture.allows_capture());
        assert!(!CaptureMode::CaptureOnly.allows_quiet());
        assert!(!CaptureMode::MoveOnly.allows_capture());
    }

    #[test]
    fn probe_overrides_one_cell() {
        let mut state = GameState::new(GridGeometry::new(3, 3).expect("valid"));
        state
            .set(Coord::new(0, 0), Some(Piece::new("white", "Rook")))
            .expect("on board");
        let victim = Piece::probe_victim(Color::black());
        let ctx = RuleContext::new(&state, Coord::new(0, 0)).with_probe(Coord::new(2, 2), &victim);
        assert!(ctx.is_attack_probe());
        assert_eq!(ctx.piece_at(Coord::new(2, 2)).map(|p| p.owner().as_str()), Some("black"));
        assert!(ctx.piece_at(Coord::new(1, 1)).is_none());
        assert_eq!(ctx.mover().map(Piece::type_name), Some("Rook"));
        assert!(state.get(Coord::new(2, 2)).is_none());
    }

    #[test]
    fn landing_refuses_allies_and_off_board() {
        let mut state = GameState::new(GridGeometry::new(3, 3).expect("valid"));
        state
            .set(Coord::new(0, 0), Some(Piece::new("white", "Rook")))
            .expect("on board");
        state
            .set(Coord::new(1, 0), Some(Piece::new("white", "Pawn")))
            .expect("on board");
        state
            .set(Coord::new(0, 1), Some(Piece::new("black", "Pawn")))
            .expect("on board");
        let ctx = RuleContext::new(&state, Coord::new(0, 0));
        let mover = ctx.mover().expect("rook on origin");
        let mode = CaptureMode::MoveOrCapture;
        assert!(landing(&ctx, mover, Coord::new(1, 0), mode).is_none());
        assert!(landing(&ctx, mover, Coord::new(0, 1), mode).is_some());
        assert!(landing(&ctx, mover, Coord::new(-1, 0), mode).is_none());
        assert!(landing(&ctx, mover, Coord::new(1, 1), CaptureMode::CaptureOnly).is_none());
    }
}
