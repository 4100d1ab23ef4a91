//! Ray sliders: rook, bishop, queen, and step-limited sliders such as the king.
//!
//! Each direction is walked one cell at a time. Empty cells are destinations;
//! the first occupied cell is a destination only if it holds an opponent, and
//! the walk in that direction ends there either way.

use crate::game_state::chess_types::Move;
use crate::game_state::coord::{Coord, DIAGONAL, ORTHOGONAL};
use crate::game_state::piece::Piece;
use crate::moves::move_rule::{no_moves, CaptureMode, MoveIter, MoveRule, RuleContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderRule {
    directions: Vec<Coord>,
    max_steps: Option<u32>,
    mode: CaptureMode,
}

impl SliderRule {
    pub fn new(directions: impl Into<Vec<Coord>>) -> Self {
        Self {
            directions: directions.into(),
            max_steps: None,
            mode: CaptureMode::MoveOrCapture,
        }
    }

    pub fn rook() -> Self {
        Self::new(ORTHOGONAL)
    }

    pub fn bishop() -> Self {
        Self::new(DIAGONAL)
    }

    pub fn queen() -> Self {
        Self::new([ORTHOGONAL, DIAGONAL].concat())
    }

    /// One step in any of the eight directions.
    pub fn king_step() -> Self {
        Self::queen().with_max_steps(1)
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_mode(mut self, mode: CaptureMode) -> Self {
        self.mode = mode;
        self
    }
}

impl MoveRule for SliderRule {
    fn generate<'a>(&'a self, ctx: RuleContext<'a>) -> MoveIter<'a> {
        let Some(mover) = ctx.mover() else {
            return no_moves();
        };
        let max_steps = self.max_steps;
        let mode = self.mode;
        Box::new(
            self.directions
                .iter()
                .flat_map(move |&dir| ride(ctx, mover, dir, max_steps, mode)),
        )
    }
}

/// Walk one direction from the context origin, stopping at the first occupant.
pub(crate) fn ride<'a>(
    ctx: RuleContext<'a>,
    mover: &'a Piece,
    dir: Coord,
    max_steps: Option<u32>,
    mode: CaptureMode,
) -> impl Iterator<Item = Move> + 'a {
    let origin = ctx.origin;
    let limit = max_steps.map_or(usize::MAX, |n| n as usize);
    let mut blocked = false;
    ctx.geometry()
        .ray(origin, dir)
        .take(limit)
        .map_while(move |cell| {
            if blocked {
                return None;
            }
            let emit = match ctx.piece_at(cell) {
                None => mode.allows_quiet(),
                Some(occupant) => {
                    blocked = true;
                    mode.allows_capture() && occupant.owner() != mover.owner()
                }
            };
            Some(emit.then(|| Move::new(origin, cell)))
        })
        .flatten()
}
