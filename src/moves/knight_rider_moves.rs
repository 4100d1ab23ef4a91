//! Nightrider: repeats one knight jump along a line until blocked.

use crate::game_state::coord::KNIGHT_JUMPS;
use crate::moves::move_rule::{no_moves, CaptureMode, MoveIter, MoveRule, RuleContext};
use crate::moves::slider_moves::ride;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnightRiderRule {
    max_steps: Option<u32>,
}

impl KnightRiderRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = Some(max_steps);
        self
    }
}

impl MoveRule for KnightRiderRule {
    fn generate<'a>(&'a self, ctx: RuleContext<'a>) -> MoveIter<'a> {
        let Some(mover) = ctx.mover() else {
            return no_moves();
        };
        let max_steps = self.max_steps;
        Box::new(KNIGHT_JUMPS.into_iter().flat_map(move |jump| {
            ride(ctx, mover, jump, max_steps, CaptureMode::MoveOrCapture)
        }))
    }
}
