//! Uniform-random move selector.
//!
//! Picks any pseudo-legal move of the requested side with equal probability.
//! Used for diagnostics, harness games, and the weakest opponents.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{parse_seed_option, Engine, EngineOutput};
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::all_pseudo_legal_moves;
use crate::move_generation::rules_resolver::RulesResolver;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Random"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        self.rng = StdRng::seed_from_u64(parse_seed_option(name, value)?);
        Ok(())
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        color: &Color,
        resolver: &RulesResolver,
    ) -> EngineOutput {
        let moves = all_pseudo_legal_moves(game_state, color, resolver);
        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("info string random_engine moves {}", moves.len()));
        out.best_move = moves.choose(&mut self.rng).cloned();
        out
    }
}
