//! Move-selector abstraction.
//!
//! A selector sees only the game state, the side it plays for, and the rules
//! resolver. It never mutates the state; the caller applies the chosen move.

use crate::game_state::chess_types::{Color, Move};
use crate::game_state::game_state::GameState;
use crate::move_generation::rules_resolver::RulesResolver;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineOutput {
    /// `None` when the side has no pseudo-legal move at all.
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, name: &str, _value: &str) -> Result<(), String> {
        Err(format!("unknown option {name}"))
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        color: &Color,
        resolver: &RulesResolver,
    ) -> EngineOutput;
}

/// Parse the `Seed` option shared by the randomised selectors.
pub(crate) fn parse_seed_option(name: &str, value: &str) -> Result<u64, String> {
    if !name.eq_ignore_ascii_case("seed") {
        return Err(format!("unknown option {name}"));
    }
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid seed {value:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_option_parses_case_insensitively() {
        assert_eq!(parse_seed_option("SEED", " 42 "), Ok(42));
        assert!(parse_seed_option("Seed", "forty-two").is_err());
        assert!(parse_seed_option("Depth", "3").is_err());
    }
}
