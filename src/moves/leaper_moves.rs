//! Fixed-offset leapers: knight, king step, and fairy leapers (camel, zebra,
//! ferz, wazir, alfil, dabbaba). Intervening cells are never inspected.

use crate::game_state::coord::{symmetric_offsets, Coord, KNIGHT_JUMPS};
use crate::moves::move_rule::{landing, no_moves, CaptureMode, MoveIter, MoveRule, RuleContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaperRule {
    offsets: Vec<Coord>,
    mode: CaptureMode,
}

impl LeaperRule {
    pub fn new(offsets: impl Into<Vec<Coord>>) -> Self {
        Self {
            offsets: offsets.into(),
            mode: CaptureMode::MoveOrCapture,
        }
    }

    /// All eight sign/swap variants of the `(a, b)` jump.
    pub fn symmetric(a: i32, b: i32) -> Self {
        Self::new(symmetric_offsets(a, b))
    }

    pub fn knight() -> Self {
        Self::new(KNIGHT_JUMPS)
    }

    pub fn king() -> Self {
        let mut offsets = symmetric_offsets(1, 0);
        offsets.extend(symmetric_offsets(1, 1));
        Self::new(offsets)
    }

    pub fn with_mode(mut self, mode: CaptureMode) -> Self {
        self.mode = mode;
        self
    }
}

impl MoveRule for LeaperRule {
    fn generate<'a>(&'a self, ctx: RuleContext<'a>) -> MoveIter<'a> {
        let Some(mover) = ctx.mover() else {
            return no_moves();
        };
        let mode = self.mode;
        Box::new(
            self.offsets
                .iter()
                .filter_map(move |&offset| landing(&ctx, mover, ctx.origin + offset, mode)),
        )
    }
}
