//! Pawn rules: single step and diagonal capture, the double step, and the
//! en passant destination.
//!
//! The forward direction comes from the owner (white advances towards higher
//! ranks, everyone else towards lower ranks), never from stored piece data.
//! En passant here only proposes the destination; removing the passed pawn
//! is done by the apply step.

use crate::game_state::chess_types::{same_type, Color, Move, PAWN};
use crate::game_state::coord::Coord;
use crate::game_state::grid_geometry::GridGeometry;
use crate::moves::move_rule::{landing, no_moves, CaptureMode, MoveIter, MoveRule, RuleContext};

/// Rank a pawn of `owner` starts on: the second rank from its own edge.
pub fn pawn_start_rank(owner: &Color, geometry: &GridGeometry) -> i32 {
    if owner.is_white() {
        1
    } else {
        geometry.height() - 2
    }
}

/// True if `mv` is a straight two-rank advance, the shape of a double step.
pub fn is_double_step_shape(mv: &Move) -> bool {
    let delta = mv.delta();
    delta.x == 0 && delta.y.abs() == 2
}

/// One step forward onto an empty cell, or one step diagonally forward onto an
/// opponent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PawnCoreRule;

impl MoveRule for PawnCoreRule {
    fn generate<'a>(&'a self, ctx: RuleContext<'a>) -> MoveIter<'a> {
        let Some(mover) = ctx.mover() else {
            return no_moves();
        };
        let forward = mover.owner().forward();
        let origin = ctx.origin;
        let candidates = [
            landing(&ctx, mover, origin + Coord::new(0, forward), CaptureMode::MoveOnly),
            landing(&ctx, mover, origin + Coord::new(-1, forward), CaptureMode::CaptureOnly),
            landing(&ctx, mover, origin + Coord::new(1, forward), CaptureMode::CaptureOnly),
        ];
        Box::new(candidates.into_iter().flatten())
    }
}

/// Two cells forward from the starting rank, for a pawn that has not moved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PawnDoubleStepRule;

impl MoveRule for PawnDoubleStepRule {
    fn generate<'a>(&'a self, ctx: RuleContext<'a>) -> MoveIter<'a> {
        let Some(mover) = ctx.mover() else {
            return no_moves();
        };
        let origin = ctx.origin;
        if mover.has_moved() || origin.y != pawn_start_rank(mover.owner(), ctx.geometry()) {
            return no_moves();
        }
        let forward = Coord::new(0, mover.owner().forward());
        let passed = origin + forward;
        let target = origin + forward * 2;
        let geometry = ctx.geometry();
        let open = |cell: Coord| geometry.contains(cell) && ctx.piece_at(cell).is_none();
        if open(passed) && open(target) {
            Box::new(std::iter::once(Move::new(origin, target)))
        } else {
            no_moves()
        }
    }
}

/// Diagonal step behind an opponent pawn that just double-stepped alongside.
/// Only a piece declared as a pawn may take en passant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnPassantRule;

impl MoveRule for EnPassantRule {
    fn generate<'a>(&'a self, ctx: RuleContext<'a>) -> MoveIter<'a> {
        let Some(mover) = ctx.mover().filter(|piece| piece.is_type(PAWN)) else {
            return no_moves();
        };
        let state = ctx.state;
        let (Some(last), Some(last_type)) = (state.last_move(), state.last_move_effective_type())
        else {
            return no_moves();
        };
        if !same_type(last_type, PAWN) || !is_double_step_shape(last) {
            return no_moves();
        }

        let origin = ctx.origin;
        let landed = last.to();
        if landed.y != origin.y || (landed.x - origin.x).abs() != 1 {
            return no_moves();
        }
        let Some(passed_pawn) = ctx.piece_at(landed) else {
            return no_moves();
        };
        if !passed_pawn.is_type(PAWN) || passed_pawn.owner() == mover.owner() {
            return no_moves();
        }

        let target = Coord::new(landed.x, origin.y + mover.owner().forward());
        if ctx.geometry().contains(target) && ctx.piece_at(target).is_none() {
            Box::new(std::iter::once(Move::new(origin, target)))
        } else {
            no_moves()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::GameState;
    use crate::game_state::piece::Piece;

    fn board() -> GameState {
        GameState::new(GridGeometry::new(8, 8).expect("valid"))
    }

    fn put(state: &mut GameState, x: i32, y: i32, piece: Piece) {
        state.set(Coord::new(x, y), Some(piece)).expect("on board");
    }

    fn targets(rule: &dyn MoveRule, state: &GameState, x: i32, y: i32) -> Vec<Coord> {
        let mut out: Vec<Coord> = rule
            .generate(RuleContext::new(state, Coord::new(x, y)))
            .map(|m| m.to())
            .collect();
        out.sort();
        out
    }

    #[test]
    fn white_pawn_steps_up_and_captures_diagonally() {
        let mut state = board();
        put(&mut state, 3, 3, Piece::new("white", PAWN));
        put(&mut state, 4, 4, Piece::new("black", PAWN));
        put(&mut state, 2, 4, Piece::new("white", PAWN));
        assert_eq!(
            targets(&PawnCoreRule, &state, 3, 3),
            vec![Coord::new(3, 4), Coord::new(4, 4)]
        );
    }

    #[test]
    fn black_pawn_moves_down_and_is_blocked_by_any_piece() {
        let mut state = board();
        put(&mut state, 3, 5, Piece::new("black", PAWN));
        put(&mut state, 3, 4, Piece::new("white", PAWN));
        assert!(targets(&PawnCoreRule, &state, 3, 5).is_empty());
    }

    #[test]
    fn double_step_only_from_start_rank_when_unmoved() {
        let mut state = board();
        put(&mut state, 0, 1, Piece::new("white", PAWN));
        put(&mut state, 1, 1, Piece::new("white", PAWN).moved());
        put(&mut state, 2, 2, Piece::new("white", PAWN));
        put(&mut state, 5, 6, Piece::new("black", PAWN));
        assert_eq!(targets(&PawnDoubleStepRule, &state, 0, 1), vec![Coord::new(0, 3)]);
        assert!(targets(&PawnDoubleStepRule, &state, 1, 1).is_empty());
        assert!(targets(&PawnDoubleStepRule, &state, 2, 2).is_empty());
        assert_eq!(targets(&PawnDoubleStepRule, &state, 5, 6), vec![Coord::new(5, 4)]);
    }

    #[test]
    fn double_step_needs_both_cells_empty() {
        let mut state = board();
        put(&mut state, 0, 1, Piece::new("white", PAWN));
        put(&mut state, 0, 3, Piece::new("black", PAWN));
        put(&mut state, 1, 1, Piece::new("white", PAWN));
        put(&mut state, 1, 2, Piece::new("black", PAWN));
        assert!(targets(&PawnDoubleStepRule, &state, 0, 1).is_empty());
        assert!(targets(&PawnDoubleStepRule, &state, 1, 1).is_empty());
    }

    #[test]
    fn en_passant_needs_a_recorded_double_step() {
        let mut state = board();
        put(&mut state, 3, 4, Piece::new("white", PAWN));
        put(&mut state, 4, 4, Piece::new("black", PAWN));
        assert!(targets(&EnPassantRule, &state, 3, 4).is_empty());
    }

    #[test]
    fn start_rank_depends_on_owner_and_height() {
        let geometry = GridGeometry::new(10, 10).expect("valid");
        assert_eq!(pawn_start_rank(&Color::white(), &geometry), 1);
        assert_eq!(pawn_start_rank(&Color::black(), &geometry), 8);
    }
}
