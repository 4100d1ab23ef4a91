//! Screen-capture cannon.
//!
//! Slides like a rook onto empty cells. The first occupied cell in a direction
//! is a screen that cannot be captured; the next occupied cell beyond it is
//! captured if it belongs to an opponent, and the direction ends there.

use crate::game_state::chess_types::Move;
use crate::game_state::coord::{Coord, ORTHOGONAL};
use crate::moves::move_rule::{no_moves, MoveIter, MoveRule, RuleContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Sliding,
    Screened,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CannonRule {
    directions: Vec<Coord>,
}

impl CannonRule {
    pub fn new(directions: impl Into<Vec<Coord>>) -> Self {
        Self {
            directions: directions.into(),
        }
    }
}

impl Default for CannonRule {
    fn default() -> Self {
        Self::new(ORTHOGONAL)
    }
}

impl MoveRule for CannonRule {
    fn generate<'a>(&'a self, ctx: RuleContext<'a>) -> MoveIter<'a> {
        let Some(mover) = ctx.mover() else {
            return no_moves();
        };
        let origin = ctx.origin;
        Box::new(self.directions.iter().flat_map(move |&dir| {
            let mut phase = Phase::Sliding;
            ctx.geometry()
                .ray(origin, dir)
                .map_while(move |cell| {
                    let occupant = ctx.piece_at(cell);
                    let emit = match (phase, occupant) {
                        (Phase::Done, _) => return None,
                        (Phase::Sliding, None) => true,
                        (Phase::Sliding, Some(_)) => {
                            phase = Phase::Screened;
                            false
                        }
                        (Phase::Screened, None) => false,
                        (Phase::Screened, Some(target)) => {
                            phase = Phase::Done;
                            target.owner() != mover.owner()
                        }
                    };
                    Some(emit.then(|| Move::new(origin, cell)))
                })
                .flatten()
        }))
    }
}
