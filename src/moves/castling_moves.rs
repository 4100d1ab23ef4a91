//! Castling for a king on any board width.
//!
//! The king scans along its rank in both directions; the first occupied cell
//! decides the candidate rook. A side is castleable when that rook is an
//! unmoved rook of the same owner at least three cells away, the king has not
//! moved and is not attacked, and neither the one-step nor the two-step cell
//! towards the rook is attacked. The king's move is two cells towards the rook;
//! relocating the rook happens in the apply step.

use crate::game_state::chess_types::{same_type, Color, Move, KING, ROOK};
use crate::game_state::coord::Coord;
use crate::move_generation::legal_move_checks::is_square_attacked_with;
use crate::moves::move_rule::{no_moves, MoveIter, MoveRule, RuleContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastlingRule {
    rook_type: String,
}

impl CastlingRule {
    pub fn new(rook_type: impl Into<String>) -> Self {
        Self {
            rook_type: rook_type.into(),
        }
    }

    fn side_is_open(&self, ctx: &RuleContext<'_>, owner: &Color, dir: Coord) -> bool {
        let origin = ctx.origin;
        let Some(rook_cell) = ctx
            .geometry()
            .ray(origin, dir)
            .find(|cell| ctx.piece_at(*cell).is_some())
        else {
            return false;
        };
        let Some(rook) = ctx.piece_at(rook_cell) else {
            return false;
        };
        let usable = same_type(rook.type_name(), &self.rook_type)
            && rook.owner() == owner
            && !rook.has_moved();
        if !usable || (rook_cell - origin).chebyshev_norm() < 3 {
            return false;
        }

        let enemy = owner.opposite();
        [origin + dir, origin + dir * 2]
            .into_iter()
            .all(|cell| !is_square_attacked_with(ctx.state, cell, &enemy, ctx.resolver))
    }
}

impl Default for CastlingRule {
    fn default() -> Self {
        Self::new(ROOK)
    }
}

impl MoveRule for CastlingRule {
    fn generate<'a>(&'a self, ctx: RuleContext<'a>) -> MoveIter<'a> {
        // Castling never captures, so attack probes skip it.
        if ctx.is_attack_probe() {
            return no_moves();
        }
        let Some(king) = ctx.mover().filter(|piece| piece.is_type(KING)) else {
            return no_moves();
        };
        if king.has_moved() {
            return no_moves();
        }
        let owner = king.owner();
        if is_square_attacked_with(ctx.state, ctx.origin, &owner.opposite(), ctx.resolver) {
            return no_moves();
        }

        let origin = ctx.origin;
        let moves: Vec<Move> = [Coord::new(1, 0), Coord::new(-1, 0)]
            .into_iter()
            .filter(|&dir| self.side_is_open(&ctx, owner, dir))
            .map(|dir| Move::new(origin, origin + dir * 2))
            .collect();
        Box::new(moves.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::GameState;
    use crate::game_state::grid_geometry::GridGeometry;
    use crate::game_state::piece::Piece;
    use crate::move_generation::piece_catalog::standard_resolver;

    fn wide_board(width: i32, rook_x: i32) -> GameState {
        let mut state = GameState::new(GridGeometry::new(width, 8).expect("valid"));
        state
            .set(Coord::new(4, 0), Some(Piece::new("white", KING)))
            .expect("on board");
        state
            .set(Coord::new(rook_x, 0), Some(Piece::new("white", ROOK)))
            .expect("on board");
        state
    }

    fn castles(state: &GameState) -> Vec<Coord> {
        let resolver = standard_resolver();
        CastlingRule::default()
            .generate(RuleContext::new(state, Coord::new(4, 0)).with_resolver(&resolver))
            .map(|m| m.to())
            .collect()
    }

    #[test]
    fn works_on_wider_boards() {
        let state = wide_board(12, 11);
        assert_eq!(castles(&state), vec![Coord::new(6, 0)]);
    }

    #[test]
    fn rook_must_be_at_least_three_cells_away() {
        let state = wide_board(8, 6);
        assert!(castles(&state).is_empty());
    }

    #[test]
    fn only_a_king_castles() {
        let mut state = wide_board(8, 7);
        state
            .set(Coord::new(4, 0), Some(Piece::new("white", "Joker")))
            .expect("on board");
        assert!(castles(&state).is_empty());
    }

    #[test]
    fn attack_probes_never_castle() {
        let state = wide_board(8, 7);
        let victim = Piece::new("black", "Target");
        let ctx = RuleContext::new(&state, Coord::new(4, 0)).with_probe(Coord::new(6, 0), &victim);
        assert_eq!(CastlingRule::default().generate(ctx).count(), 0);
    }
}
