//! Head-to-head selector match harness for local testing.
//!
//! Runs two `Engine` implementations against each other from a starting
//! position, with an optional seeded random opening prefix. The harness is the
//! controller that decides the game is over: a side without royal pieces has
//! lost, and a side without any move ends the game in its opponent's favour.

use std::time::Instant;

use log::{debug, info};
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::Engine;
use crate::game_state::chess_errors::ChessError;
use crate::game_state::chess_types::{Color, Move};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::all_pseudo_legal_moves;
use crate::move_generation::rules_resolver::RulesResolver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The loser has no royal piece left.
    RoyalCaptured { winner: Color },
    /// The side to move had no pseudo-legal move, or its selector offered none.
    NoMoves { stuck: Color },
    DrawMaxPlies,
}

impl MatchOutcome {
    pub fn winner(&self) -> Option<Color> {
        match self {
            MatchOutcome::RoyalCaptured { winner } => Some(winner.clone()),
            MatchOutcome::NoMoves { stuck } => Some(stuck.opposite()),
            MatchOutcome::DrawMaxPlies => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    /// Uniformly random plies played before the selectors take over.
    pub opening_random_plies: u8,
    pub seed: u64,
    pub verbose: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 300,
            opening_random_plies: 0,
            seed: 0,
            verbose: false,
        }
    }
}

#[derive(Debug)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: GameState,
    pub opening_moves: Vec<Move>,
    pub played_moves: Vec<Move>,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

impl MatchResult {
    pub fn report(&self) -> String {
        format!(
            "outcome={:?} plies={} white_avg_ms={:.3} black_avg_ms={:.3}",
            self.outcome,
            self.opening_moves.len() + self.played_moves.len(),
            avg_ns_per_move_ms(self.white_total_time_ns, self.white_move_count),
            avg_ns_per_move_ms(self.black_total_time_ns, self.black_move_count)
        )
    }
}

/// Play one match from `start_state`. `engine_white` moves for white, and
/// `engine_black` for every other color.
pub fn play_engine_match(
    start_state: GameState,
    mut engine_white: Box<dyn Engine>,
    mut engine_black: Box<dyn Engine>,
    resolver: &RulesResolver,
    config: &MatchConfig,
) -> Result<MatchResult, ChessError> {
    let mut state = start_state;
    engine_white.new_game();
    engine_black.new_game();
    info!(
        "match start: {} (white) vs {} (black), seed {}",
        engine_white.name(),
        engine_black.name(),
        config.seed
    );

    let opening_moves = apply_seeded_random_opening(&mut state, resolver, config)?;
    let mut played_moves = Vec::new();
    let mut white_move_count = 0u32;
    let mut black_move_count = 0u32;
    let mut white_total_time_ns = 0u128;
    let mut black_total_time_ns = 0u128;

    let mut outcome = None;
    for _ in 0..config.max_plies {
        if let Some(winner) = state.winner() {
            outcome = Some(MatchOutcome::RoyalCaptured { winner });
            break;
        }
        let mover = state.current_player().clone();
        let moves = all_pseudo_legal_moves(&state, &mover, resolver);
        if moves.is_empty() {
            outcome = Some(MatchOutcome::NoMoves { stuck: mover });
            break;
        }

        let started = Instant::now();
        let out = if mover.is_white() {
            engine_white.choose_move(&state, &mover, resolver)
        } else {
            engine_black.choose_move(&state, &mover, resolver)
        };
        let elapsed_ns = started.elapsed().as_nanos();
        if mover.is_white() {
            white_move_count = white_move_count.saturating_add(1);
            white_total_time_ns = white_total_time_ns.saturating_add(elapsed_ns);
        } else {
            black_move_count = black_move_count.saturating_add(1);
            black_total_time_ns = black_total_time_ns.saturating_add(elapsed_ns);
        }

        let Some(chosen) = out.best_move else {
            debug!("{mover}: selector offered no move");
            outcome = Some(MatchOutcome::NoMoves { stuck: mover });
            break;
        };
        let applied = state.apply_move(&chosen, resolver)?;
        if config.verbose {
            info!("{mover}: {}", applied.mv);
        } else {
            debug!("{mover}: {}", applied.mv);
        }
        played_moves.push(applied.mv);
    }

    let outcome = outcome
        .or_else(|| state.winner().map(|winner| MatchOutcome::RoyalCaptured { winner }))
        .unwrap_or(MatchOutcome::DrawMaxPlies);
    let result = MatchResult {
        outcome,
        final_state: state,
        opening_moves,
        played_moves,
        white_move_count,
        black_move_count,
        white_total_time_ns,
        black_total_time_ns,
    };
    info!("match finished: {}", result.report());
    Ok(result)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

fn apply_seeded_random_opening(
    state: &mut GameState,
    resolver: &RulesResolver,
    config: &MatchConfig,
) -> Result<Vec<Move>, ChessError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut opening_moves = Vec::new();
    for _ in 0..config.opening_random_plies {
        if state.winner().is_some() {
            break;
        }
        let mover = state.current_player().clone();
        let moves = all_pseudo_legal_moves(state, &mover, resolver);
        let Some(chosen) = moves.choose(&mut rng) else {
            break;
        };
        let applied = state.apply_move(chosen, resolver)?;
        opening_moves.push(applied.mv);
    }
    Ok(opening_moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_greedy::GreedyEngine;
    use crate::engines::engine_trait::EngineOutput;
    use crate::engines::engine_random::RandomEngine;
    use crate::game_state::chess_types::{KING, QUEEN};
    use crate::game_state::coord::Coord;
    use crate::game_state::grid_geometry::GridGeometry;
    use crate::game_state::piece::Piece;
    use crate::move_generation::piece_catalog::standard_resolver;
    use crate::utils::standard_setup::{standard_setup, variant_setup};

    fn random_pair(seed: u64) -> (Box<dyn Engine>, Box<dyn Engine>) {
        (
            Box::new(RandomEngine::with_seed(seed)),
            Box::new(RandomEngine::with_seed(seed + 1)),
        )
    }

    #[test]
    fn greedy_takes_a_hanging_king() {
        let resolver = standard_resolver();
        let mut state = GameState::new(GridGeometry::new(8, 8).expect("valid"));
        for (x, y, owner, kind) in [
            (0, 0, "white", KING),
            (3, 3, "white", QUEEN),
            (3, 6, "black", KING),
        ] {
            state
                .set(Coord::new(x, y), Some(Piece::new(owner, kind)))
                .expect("on board");
        }
        let result = play_engine_match(
            state,
            Box::new(GreedyEngine::with_seed(1)),
            Box::new(RandomEngine::with_seed(2)),
            &resolver,
            &MatchConfig::default(),
        )
        .expect("match runs");
        assert_eq!(
            result.outcome,
            MatchOutcome::RoyalCaptured {
                winner: Color::white()
            }
        );
        assert_eq!(result.played_moves.len(), 1);
        assert_eq!(result.final_state.royal_count(&Color::black()), 0);
    }

    #[test]
    fn side_without_moves_loses() {
        let resolver = standard_resolver();
        let mut state = GameState::new(GridGeometry::new(3, 3).expect("valid"));
        state
            .set(Coord::new(0, 0), Some(Piece::new("white", "Statue")))
            .expect("on board");
        let (white, black) = random_pair(5);
        let result = play_engine_match(state, white, black, &resolver, &MatchConfig::default())
            .expect("match runs");
        assert_eq!(
            result.outcome,
            MatchOutcome::NoMoves {
                stuck: Color::white()
            }
        );
        assert_eq!(result.outcome.winner(), Some(Color::black()));
    }

    struct Resigner;

    impl Engine for Resigner {
        fn name(&self) -> &str {
            "resigner"
        }

        fn choose_move(
            &mut self,
            _game_state: &GameState,
            _color: &Color,
            _resolver: &RulesResolver,
        ) -> EngineOutput {
            EngineOutput::default()
        }
    }

    #[test]
    fn selector_offering_no_move_loses_instead_of_being_played_for() {
        let resolver = standard_resolver();
        let result = play_engine_match(
            standard_setup().expect("fits"),
            Box::new(Resigner),
            Box::new(RandomEngine::with_seed(9)),
            &resolver,
            &MatchConfig::default(),
        )
        .expect("match runs");
        assert_eq!(
            result.outcome,
            MatchOutcome::NoMoves {
                stuck: Color::white()
            }
        );
        assert!(result.played_moves.is_empty());
        assert_eq!(result.final_state.move_history().len(), 0);
        assert_eq!(result.white_move_count, 1);
    }

    #[test]
    fn random_games_respect_the_ply_cap() {
        let resolver = standard_resolver();
        let config = MatchConfig {
            max_plies: 30,
            opening_random_plies: 4,
            seed: 17,
            verbose: false,
        };
        let (white, black) = random_pair(17);
        let result = play_engine_match(
            standard_setup().expect("fits"),
            white,
            black,
            &resolver,
            &config,
        )
        .expect("match runs");
        assert!(result.played_moves.len() <= 30);
        assert!(result.opening_moves.len() <= 4);
        assert_eq!(
            result.final_state.move_history().len(),
            result.opening_moves.len() + result.played_moves.len()
        );
        assert_eq!(
            result.white_move_count + result.black_move_count,
            result.played_moves.len() as u32
        );
    }

    #[test]
    fn seeded_matches_replay_identically() {
        let resolver = standard_resolver();
        let config = MatchConfig {
            max_plies: 40,
            opening_random_plies: 2,
            seed: 3,
            verbose: false,
        };
        let run = || {
            let (white, black) = random_pair(3);
            play_engine_match(
                variant_setup().expect("fits"),
                white,
                black,
                &resolver,
                &config,
            )
            .expect("match runs")
        };
        let first = run();
        let second = run();
        assert_eq!(first.opening_moves, second.opening_moves);
        assert_eq!(first.played_moves, second.played_moves);
        assert_eq!(first.outcome, second.outcome);
    }
}
