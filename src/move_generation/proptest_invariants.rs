//! Property-based tests for move application and attack probing, driven by
//! seeded random playouts.

use proptest::prelude::*;
use rand::prelude::*;

use crate::game_state::chess_types::{Color, Move};
use crate::game_state::coord::Coord;
use crate::game_state::game_state::GameState;
use crate::game_state::piece::Piece;
use crate::move_generation::piece_catalog::standard_resolver;
use crate::move_generation::rules_resolver::RulesResolver;
use crate::utils::standard_setup::{standard_setup, variant_setup};

fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn ply_strategy() -> impl Strategy<Value = usize> {
    1..=24usize
}

fn start(variant: bool) -> GameState {
    if variant {
        variant_setup().expect("variant layout fits")
    } else {
        standard_setup().expect("standard layout fits")
    }
}

/// Play up to `plies` random pseudo-legal moves, stopping early when the side
/// to move has none.
fn random_playout(state: &mut GameState, resolver: &RulesResolver, rng: &mut StdRng, plies: usize) {
    for _ in 0..plies {
        let mover = state.current_player().clone();
        let moves = state.all_pseudo_legal_moves(&mover, resolver);
        let Some(mv) = moves.choose(rng) else {
            break;
        };
        state.apply_move(mv, resolver).expect("generated move applies");
    }
}

proptest! {
    /// A destination missing from a fresh generation is refused without mutation.
    #[test]
    fn prop_illegal_moves_change_nothing(
        seed in seed_strategy(),
        plies in ply_strategy(),
        variant in any::<bool>()
    ) {
        let resolver = standard_resolver();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = start(variant);
        random_playout(&mut state, &resolver, &mut rng, plies);

        let cells: Vec<Coord> = state.all_coords().collect();
        let mover = state.current_player().clone();
        let origins: Vec<Coord> = state.board().pieces_of(&mover).map(|(c, _)| c).collect();
        prop_assume!(!origins.is_empty());
        let from = *origins.choose(&mut rng).expect("non-empty");
        let legal: Vec<Coord> = state
            .generate_pseudo_legal_moves(from, &resolver)
            .iter()
            .map(Move::to)
            .collect();
        let illegal: Vec<Coord> = cells.into_iter().filter(|c| !legal.contains(c)).collect();
        let to = *illegal.choose(&mut rng).expect("origin itself is never legal");

        let board_before = state.board().clone();
        let history_before = state.move_history().len();
        prop_assert!(state.apply_move(&Move::new(from, to), &resolver).is_err());
        prop_assert_eq!(state.board(), &board_before);
        prop_assert_eq!(state.move_history().len(), history_before);
        prop_assert_eq!(state.current_player(), &mover);
    }

    /// Probing never writes the board and agrees with generation against a
    /// real occupant.
    #[test]
    fn prop_attack_probe_matches_occupied_generation(
        seed in seed_strategy(),
        plies in ply_strategy()
    ) {
        let resolver = standard_resolver();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = start(false);
        random_playout(&mut state, &resolver, &mut rng, plies);

        let empties: Vec<Coord> = state.all_coords().filter(|c| state.get(*c).is_none()).collect();
        let cell = *empties.choose(&mut rng).expect("opening boards have empty cells");
        let black = Color::black();
        let before = state.board().clone();
        let attacked = state.is_square_attacked(cell, &black, &resolver);
        prop_assert_eq!(state.board(), &before);

        let mut occupied = state.snapshot();
        occupied.set(cell, Some(Piece::new("white", "Target"))).expect("on board");
        let reaches = occupied
            .all_pseudo_legal_moves(&black, &resolver)
            .iter()
            .any(|mv| mv.to() == cell);
        prop_assert_eq!(attacked, reaches);
    }

    /// After a move the vacated origin is empty and produces nothing.
    #[test]
    fn prop_vacated_origin_is_silent(
        seed in seed_strategy(),
        plies in ply_strategy(),
        variant in any::<bool>()
    ) {
        let resolver = standard_resolver();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = start(variant);
        for _ in 0..plies {
            let mover = state.current_player().clone();
            let moves = state.all_pseudo_legal_moves(&mover, &resolver);
            let Some(mv) = moves.choose(&mut rng) else {
                break;
            };
            let applied = state.apply_move(mv, &resolver).expect("generated move applies");
            prop_assert!(state.get(mv.from()).is_none());
            prop_assert!(state.generate_pseudo_legal_moves(mv.from(), &resolver).is_empty());
            prop_assert!(state
                .all_pseudo_legal_moves(&mover, &resolver)
                .iter()
                .all(|m| m.from() != mv.from()));
            prop_assert_eq!(state.current_player(), &mover.opposite());
            prop_assert_eq!(state.get(mv.to()).map(|p| p.owner()), Some(&mover));
            prop_assert!(applied.captured.iter().all(|(_, p)| p.owner() != &mover));
        }
    }
}
