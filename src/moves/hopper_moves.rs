//! Hurdle-jumping hoppers such as the grasshopper.
//!
//! In each direction the rule scans to the first occupied cell (the hurdle)
//! and makes exactly one landing attempt `hop_distance` cells beyond it. No
//! hurdle in a direction means no move in that direction.

use crate::game_state::chess_types::Move;
use crate::game_state::coord::{Coord, DIAGONAL, ORTHOGONAL};
use crate::moves::move_rule::{no_moves, MoveIter, MoveRule, RuleContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopperRule {
    directions: Vec<Coord>,
    hop_distance: i32,
    empty_landing: bool,
    capture_landing: bool,
    capture_after_jump_only: bool,
}

impl HopperRule {
    /// Lands on empty cells or captures at the landing cell.
    pub fn new(directions: impl Into<Vec<Coord>>, hop_distance: i32) -> Self {
        Self {
            directions: directions.into(),
            hop_distance: hop_distance.max(1),
            empty_landing: true,
            capture_landing: true,
            capture_after_jump_only: true,
        }
    }

    /// Classic grasshopper: any of eight lines, lands directly behind the hurdle.
    pub fn grasshopper() -> Self {
        Self::new([ORTHOGONAL, DIAGONAL].concat(), 1)
    }

    pub fn with_empty_landing(mut self, allowed: bool) -> Self {
        self.empty_landing = allowed;
        self
    }

    pub fn with_capture_landing(mut self, allowed: bool) -> Self {
        self.capture_landing = allowed;
        self
    }

    /// When disabled, an opponent hurdle may also be taken directly instead of
    /// only pieces found on the landing cell.
    pub fn with_capture_after_jump_only(mut self, only: bool) -> Self {
        self.capture_after_jump_only = only;
        self
    }
}

/// Landing cell `distance` steps past the hurdle; `None` when it overflows.
fn hop_target(hurdle: Coord, dir: Coord, distance: i32) -> Option<Coord> {
    let x = dir.x.checked_mul(distance)?.checked_add(hurdle.x)?;
    let y = dir.y.checked_mul(distance)?.checked_add(hurdle.y)?;
    Some(Coord::new(x, y))
}

impl MoveRule for HopperRule {
    fn generate<'a>(&'a self, ctx: RuleContext<'a>) -> MoveIter<'a> {
        let Some(mover) = ctx.mover() else {
            return no_moves();
        };
        let origin = ctx.origin;
        let geometry = ctx.geometry();
        Box::new(self.directions.iter().flat_map(move |&dir| {
            let mut out: [Option<Move>; 2] = [None, None];
            let Some(hurdle) = geometry.ray(origin, dir).find(|c| ctx.piece_at(*c).is_some()) else {
                return out.into_iter().flatten();
            };
            let hurdle_is_enemy = ctx
                .piece_at(hurdle)
                .is_some_and(|p| p.owner() != mover.owner());
            if !self.capture_after_jump_only && self.capture_landing && hurdle_is_enemy {
                out[0] = Some(Move::new(origin, hurdle));
            }

            let target = hop_target(hurdle, dir, self.hop_distance);
            if let Some(target) = target.filter(|&cell| geometry.contains(cell)) {
                out[1] = match ctx.piece_at(target) {
                    None if self.empty_landing => Some(Move::new(origin, target)),
                    Some(occupant) if self.capture_landing && occupant.owner() != mover.owner() => {
                        Some(Move::new(origin, target))
                    }
                    _ => None,
                };
            }
            out.into_iter().flatten()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::GameState;
    use crate::game_state::grid_geometry::GridGeometry;
    use crate::game_state::piece::Piece;

    fn setup(pieces: &[(i32, i32, &str)]) -> GameState {
        let mut state = GameState::new(GridGeometry::new(8, 8).expect("valid"));
        for &(x, y, owner) in pieces {
            state
                .set(Coord::new(x, y), Some(Piece::new(owner, "Pawn")))
                .expect("on board");
        }
        state
    }

    fn targets(rule: &HopperRule, state: &GameState, from: Coord) -> Vec<Coord> {
        let mut out: Vec<Coord> = rule
            .generate(RuleContext::new(state, from))
            .map(|m| m.to())
            .collect();
        out.sort();
        out
    }

    #[test]
    fn grasshopper_lands_directly_behind_hurdle() {
        let state = setup(&[(0, 0, "white"), (0, 4, "white")]);
        let rule = HopperRule::grasshopper();
        assert_eq!(targets(&rule, &state, Coord::new(0, 0)), vec![Coord::new(0, 5)]);
    }

    #[test]
    fn no_hurdle_means_no_move() {
        let state = setup(&[(3, 3, "white")]);
        assert!(targets(&HopperRule::grasshopper(), &state, Coord::new(3, 3)).is_empty());
    }

    #[test]
    fn landing_on_enemy_captures_and_on_ally_is_refused() {
        let state = setup(&[
            (0, 0, "white"),
            (1, 0, "black"),
            (2, 0, "black"),
            (0, 1, "black"),
            (0, 2, "white"),
        ]);
        let rule = HopperRule::new(ORTHOGONAL, 1);
        assert_eq!(targets(&rule, &state, Coord::new(0, 0)), vec![Coord::new(2, 0)]);
    }

    #[test]
    fn hop_distance_skips_further_cells() {
        let state = setup(&[(0, 0, "white"), (0, 1, "black")]);
        let rule = HopperRule::new(ORTHOGONAL, 3);
        assert_eq!(targets(&rule, &state, Coord::new(0, 0)), vec![Coord::new(0, 4)]);
    }

    #[test]
    fn capture_only_hopper_ignores_empty_landings() {
        let state = setup(&[(0, 0, "white"), (0, 1, "black")]);
        let rule = HopperRule::new(ORTHOGONAL, 1).with_empty_landing(false);
        assert!(targets(&rule, &state, Coord::new(0, 0)).is_empty());
    }

    #[test]
    fn direct_hurdle_capture_when_not_jump_gated() {
        let state = setup(&[(0, 0, "white"), (0, 3, "black")]);
        let rule = HopperRule::new(ORTHOGONAL, 1).with_capture_after_jump_only(false);
        assert_eq!(
            targets(&rule, &state, Coord::new(0, 0)),
            vec![Coord::new(0, 3), Coord::new(0, 4)]
        );
    }

    #[test]
    fn huge_hop_distance_lands_nowhere() {
        let state = setup(&[(0, 0, "white"), (0, 1, "black"), (1, 1, "black")]);
        let rule = HopperRule::new(DIAGONAL, i32::MAX);
        assert!(targets(&rule, &state, Coord::new(0, 0)).is_empty());
        let rule = HopperRule::new(ORTHOGONAL, i32::MAX);
        assert!(targets(&rule, &state, Coord::new(0, 0)).is_empty());
    }
}
