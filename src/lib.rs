//! Crate root module declarations for the variant chess rules engine.
//!
//! This file exposes the board model, the composable move rules, pseudo-legal
//! move generation and application, the reference move selectors, and the
//! utility helpers so tests, benches and external tooling can import stable
//! module paths.

pub mod game_state {
    pub mod board_state;
    pub mod chess_errors;
    pub mod chess_types;
    pub mod coord;
    pub mod game_events;
    pub mod game_state;
    pub mod grid_geometry;
    pub mod piece;
}

pub mod moves {
    pub mod cannon_moves;
    pub mod castling_moves;
    pub mod hopper_moves;
    pub mod knight_rider_moves;
    pub mod leaper_moves;
    pub mod mimic_moves;
    pub mod move_rule;
    pub mod pawn_moves;
    pub mod slider_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod perft;
    pub mod piece_catalog;
    #[cfg(test)]
    mod proptest_invariants;
    pub mod rules_resolver;
}

pub mod engines {
    pub mod engine_greedy;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod engine_match_harness;
    pub mod render_game_state;
    pub mod standard_setup;
}
