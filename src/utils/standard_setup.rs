//! Starting positions.

use crate::game_state::chess_errors::ChessError;
use crate::game_state::chess_types::{
    Color, PieceTags, BISHOP, KING, KNIGHT, PAWN, QUEEN, ROOK,
};
use crate::game_state::coord::Coord;
use crate::game_state::game_state::GameState;
use crate::game_state::grid_geometry::GridGeometry;
use crate::game_state::piece::Piece;
use crate::move_generation::piece_catalog::{CANNON, GRASSHOPPER, JOKER, NIGHTRIDER};
use crate::moves::pawn_moves::pawn_start_rank;

const ORTHODOX_BACK_RANK: [&str; 8] = [ROOK, KNIGHT, BISHOP, QUEEN, KING, BISHOP, KNIGHT, ROOK];

const VARIANT_BACK_RANK: [&str; 10] = [
    ROOK, GRASSHOPPER, BISHOP, QUEEN, KING, JOKER, BISHOP, NIGHTRIDER, KNIGHT, ROOK,
];

/// Cells cut out of the middle of the variant board.
const VARIANT_HOLES: [(i32, i32); 4] = [(4, 3), (5, 3), (4, 4), (5, 4)];

fn army_piece(owner: &Color, type_name: &str) -> Piece {
    let piece = Piece::new(owner.clone(), type_name);
    if piece.is_type(KING) {
        piece.tagged(PieceTags::ROYAL)
    } else {
        piece
    }
}

/// Mirror `back_rank` for both sides and fill each side's pawn rank with
/// `pawn_rank` (one type per file).
fn place_armies(
    state: &mut GameState,
    back_rank: &[&str],
    pawn_rank: &[&str],
) -> Result<(), ChessError> {
    let height = state.geometry().height();
    for owner in [Color::white(), Color::black()] {
        let home = if owner.is_white() { 0 } else { height - 1 };
        let pawns = pawn_start_rank(&owner, state.geometry());
        for (x, type_name) in (0..).zip(back_rank) {
            state.set(Coord::new(x, home), Some(army_piece(&owner, type_name)))?;
        }
        for (x, type_name) in (0..).zip(pawn_rank) {
            state.set(Coord::new(x, pawns), Some(army_piece(&owner, type_name)))?;
        }
    }
    Ok(())
}

/// The orthodox 8x8 opening position, white to move.
pub fn standard_setup() -> Result<GameState, ChessError> {
    let mut state = GameState::new(GridGeometry::new(8, 8)?);
    place_armies(&mut state, &ORTHODOX_BACK_RANK, &[PAWN; 8])?;
    Ok(state)
}

/// A 10x8 board with a four-cell hole in the centre, cannons on the pawn-rank
/// corners, and a grasshopper, joker and nightrider in the back rank.
pub fn variant_setup() -> Result<GameState, ChessError> {
    let (width, height) = (10, 8);
    let mask: Vec<bool> = (0..height)
        .flat_map(|y| (0..width).map(move |x| !VARIANT_HOLES.contains(&(x, y))))
        .collect();
    let mut state = GameState::new(GridGeometry::with_mask(width, height, mask)?);
    let mut pawn_rank = [PAWN; 10];
    pawn_rank[0] = CANNON;
    pawn_rank[9] = CANNON;
    place_armies(&mut state, &VARIANT_BACK_RANK, &pawn_rank)?;
    Ok(state)
}
