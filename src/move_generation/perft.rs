//! Pseudo-legal perft: counts the leaf nodes of the move tree to a fixed depth.
//!
//! Every ply plays all pseudo-legal moves of the side to move on a scratch
//! snapshot. Positions where a side has already lost its royal pieces are
//! still expanded; the counter knows nothing about game end.

use std::thread;

use crate::game_state::chess_errors::ApplyMoveError;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::AppliedMove;
use crate::move_generation::legal_move_generator::all_pseudo_legal_moves;
use crate::move_generation::rules_resolver::RulesResolver;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    /// Leaf moves played under a borrowed type.
    pub mimic_moves: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.mimic_moves += rhs.mimic_moves;
    }

    fn record_leaf(&mut self, applied: &AppliedMove) {
        self.nodes += 1;
        if applied.is_capture() {
            self.captures += 1;
        }
        if applied.captured.iter().any(|(cell, _)| *cell != applied.mv.to()) {
            self.en_passant += 1;
        }
        if applied.rook_relocation.is_some() {
            self.castles += 1;
        }
        if applied.mv.as_type().is_some() {
            self.mimic_moves += 1;
        }
    }
}

pub fn perft(
    game_state: &GameState,
    depth: u8,
    resolver: &RulesResolver,
) -> Result<PerftCounts, ApplyMoveError> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }
    let mut counts = PerftCounts::default();
    perft_recurse(game_state, depth, resolver, &mut counts)?;
    Ok(counts)
}

/// Same counts as `perft`, with one scoped worker thread per root move.
pub fn perft_multi_threaded(
    game_state: &GameState,
    depth: u8,
    resolver: &RulesResolver,
) -> Result<PerftCounts, ApplyMoveError> {
    if depth <= 1 {
        return perft(game_state, depth, resolver);
    }
    let mover = game_state.current_player().clone();
    let root_moves = all_pseudo_legal_moves(game_state, &mover, resolver);

    thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .iter()
            .map(|mv| {
                let mut child = game_state.snapshot();
                scope.spawn(move || {
                    child.apply_move(mv, resolver)?;
                    let mut local = PerftCounts::default();
                    perft_recurse(&child, depth - 1, resolver, &mut local)?;
                    Ok::<_, ApplyMoveError>(local)
                })
            })
            .collect();

        let mut total = PerftCounts::default();
        for handle in handles {
            match handle.join() {
                Ok(local) => total.merge(local?),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        Ok::<_, ApplyMoveError>(total)
    })
}

fn perft_recurse(
    game_state: &GameState,
    depth: u8,
    resolver: &RulesResolver,
    counts: &mut PerftCounts,
) -> Result<(), ApplyMoveError> {
    let mover = game_state.current_player().clone();
    for mv in all_pseudo_legal_moves(game_state, &mover, resolver) {
        let mut child = game_state.snapshot();
        let applied = child.apply_move(&mv, resolver)?;
        if depth == 1 {
            counts.record_leaf(&applied);
        } else {
            perft_recurse(&child, depth - 1, resolver, counts)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, Move, KING, PAWN, ROOK};
    use crate::game_state::coord::Coord;
    use crate::game_state::grid_geometry::GridGeometry;
    use crate::game_state::piece::Piece;
    use crate::move_generation::piece_catalog::standard_resolver;
    use crate::utils::standard_setup::standard_setup;

    #[test]
    fn standard_start_matches_known_shallow_counts() {
        let resolver = standard_resolver();
        let state = standard_setup().expect("fits");
        assert_eq!(perft(&state, 0, &resolver).expect("runs").nodes, 1);
        assert_eq!(perft(&state, 1, &resolver).expect("runs").nodes, 20);
        assert_eq!(perft(&state, 2, &resolver).expect("runs").nodes, 400);
        let three = perft(&state, 3, &resolver).expect("runs");
        assert_eq!(three.nodes, 8902);
        assert_eq!(three.captures, 34);
        assert_eq!(three.castles, 0);
    }

    #[test]
    fn threaded_counts_match_single_threaded() {
        let resolver = standard_resolver();
        let state = standard_setup().expect("fits");
        assert_eq!(
            perft_multi_threaded(&state, 3, &resolver).expect("runs"),
            perft(&state, 3, &resolver).expect("runs")
        );
    }

    #[test]
    fn leaf_counters_see_castling_and_en_passant() {
        let resolver = standard_resolver();
        let mut state = GameState::new(GridGeometry::new(8, 8).expect("valid"))
            .with_current_player(Color::black());
        for (x, y, owner, kind) in [
            (4, 0, "white", KING),
            (7, 0, "white", ROOK),
            (4, 6, "black", PAWN),
            (0, 7, "black", KING),
        ] {
            state
                .set(Coord::new(x, y), Some(Piece::new(owner, kind)))
                .expect("on board");
        }
        state
            .set(Coord::new(3, 4), Some(Piece::new("white", PAWN).moved()))
            .expect("on board");
        state
            .apply_move(&Move::new(Coord::new(4, 6), Coord::new(4, 4)), &resolver)
            .expect("double step");

        let counts = perft(&state, 1, &resolver).expect("runs");
        assert_eq!(counts.castles, 1);
        assert_eq!(counts.en_passant, 1);
        assert_eq!(counts.captures, 1);
    }
}
