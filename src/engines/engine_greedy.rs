//! Greedy capture selector.
//!
//! Scores every pseudo-legal move by the value of the opposing piece on its
//! destination (zero for quiet moves) and picks uniformly among the best.

use std::collections::HashMap;

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{parse_seed_option, Engine, EngineOutput};
use crate::game_state::chess_types::{Color, Move, BISHOP, KING, KNIGHT, PAWN, QUEEN, ROOK};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::all_pseudo_legal_moves;
use crate::move_generation::piece_catalog::{CANNON, GRASSHOPPER, JOKER, NIGHTRIDER};
use crate::move_generation::rules_resolver::RulesResolver;

/// Value assumed for types missing from the table.
pub const FALLBACK_PIECE_VALUE: i32 = 100;

/// Case-insensitive material table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceValues {
    values: HashMap<String, i32>,
}

impl PieceValues {
    pub fn empty() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn with(mut self, type_name: &str, value: i32) -> Self {
        self.set(type_name, value);
        self
    }

    pub fn set(&mut self, type_name: &str, value: i32) {
        self.values.insert(type_name.to_ascii_lowercase(), value);
    }

    pub fn value_of(&self, type_name: &str) -> i32 {
        self.values
            .get(&type_name.to_ascii_lowercase())
            .copied()
            .unwrap_or(FALLBACK_PIECE_VALUE)
    }
}

impl Default for PieceValues {
    fn default() -> Self {
        Self::empty()
            .with(PAWN, 100)
            .with(KNIGHT, 320)
            .with(BISHOP, 330)
            .with(ROOK, 500)
            .with(QUEEN, 900)
            .with(KING, 20000)
            .with(CANNON, 450)
            .with(NIGHTRIDER, 600)
            .with(GRASSHOPPER, 250)
            .with(JOKER, 400)
    }
}

pub struct GreedyEngine {
    rng: StdRng,
    values: PieceValues,
}

impl GreedyEngine {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            values: PieceValues::default(),
        }
    }

    pub fn with_values(mut self, values: PieceValues) -> Self {
        self.values = values;
        self
    }

    pub fn values(&self) -> &PieceValues {
        &self.values
    }

    /// Material won by `mv`, or zero when it lands on an empty or own cell.
    fn capture_value(&self, game_state: &GameState, color: &Color, mv: &Move) -> i32 {
        match game_state.get(mv.to()) {
            Some(victim) if victim.owner() != color => self.values.value_of(victim.type_name()),
            _ => 0,
        }
    }
}

impl Default for GreedyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for GreedyEngine {
    fn name(&self) -> &str {
        "Greedy"
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
            .push(format!("info string greedy_engine moves {}", moves.len()));
        if moves.is_empty() {
            return out;
        }

        let mut best_value = i32::MIN;
        let mut best_moves = Vec::new();
        for mv in &moves {
            let value = self.capture_value(game_state, color, mv);
            if value > best_value {
                best_value = value;
                best_moves.clear();
                best_moves.push(mv);
            } else if value == best_value {
                best_moves.push(mv);
            }
        }

        out.info_lines.push(format!(
            "info string greedy_engine capture_score {best_value} ties {}",
            best_moves.len()
        ));
        out.best_move = best_moves.choose(&mut self.rng).map(|mv| (*mv).clone());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::coord::Coord;
    use crate::game_state::grid_geometry::GridGeometry;
    use crate::game_state::piece::Piece;
    use crate::move_generation::piece_catalog::standard_resolver;

    fn board() -> GameState {
        GameState::new(GridGeometry::new(8, 8).expect("valid"))
    }

    fn put(state: &mut GameState, x: i32, y: i32, owner: &str, kind: &str) {
        state
            .set(Coord::new(x, y), Some(Piece::new(owner, kind)))
            .expect("on board");
    }

    #[test]
    fn values_ignore_case_and_fall_back() {
        let values = PieceValues::default();
        assert_eq!(values.value_of("queen"), 900);
        assert_eq!(values.value_of("NIGHTRIDER"), 600);
        assert_eq!(values.value_of("Dragon"), FALLBACK_PIECE_VALUE);
    }

    #[test]
    fn takes_the_most_valuable_piece() {
        let resolver = standard_resolver();
        let mut state = board();
        put(&mut state, 3, 3, "white", QUEEN);
        put(&mut state, 3, 6, "black", ROOK);
        put(&mut state, 6, 6, "black", PAWN);
        put(&mut state, 0, 3, "black", KNIGHT);
        let mut engine = GreedyEngine::with_seed(3);
        for _ in 0..20 {
            let chosen = engine
                .choose_move(&state, &Color::white(), &resolver)
                .best_move
                .expect("has moves");
            assert_eq!(chosen.to(), Coord::new(3, 6));
        }
    }

    #[test]
    fn equal_captures_are_split_randomly() {
        let resolver = standard_resolver();
        let mut state = board();
        put(&mut state, 3, 3, "white", QUEEN);
        put(&mut state, 3, 6, "black", ROOK);
        put(&mut state, 6, 3, "black", ROOK);
        let mut engine = GreedyEngine::with_seed(11);
        let mut hits = [0usize; 2];
        for _ in 0..400 {
            let chosen = engine
                .choose_move(&state, &Color::white(), &resolver)
                .best_move
                .expect("has moves");
            match chosen.to() {
                c if c == Coord::new(3, 6) => hits[0] += 1,
                c if c == Coord::new(6, 3) => hits[1] += 1,
                other => panic!("non-capturing move to {other}"),
            }
        }
        assert!(hits[0] > 120 && hits[1] > 120, "skewed split {hits:?}");
    }

    #[test]
    fn custom_values_change_the_preference() {
        let resolver = standard_resolver();
        let mut state = board();
        put(&mut state, 3, 3, "white", QUEEN);
        put(&mut state, 3, 6, "black", ROOK);
        put(&mut state, 6, 3, "black", PAWN);
        let values = PieceValues::default().with(PAWN, 10_000);
        let mut engine = GreedyEngine::with_seed(5).with_values(values);
        let chosen = engine
            .choose_move(&state, &Color::white(), &resolver)
            .best_move
            .expect("has moves");
        assert_eq!(chosen.to(), Coord::new(6, 3));
    }

    #[test]
    fn quiet_position_still_moves() {
        let resolver = standard_resolver();
        let mut state = board();
        put(&mut state, 0, 0, "white", ROOK);
        let out = GreedyEngine::with_seed(1).choose_move(&state, &Color::white(), &resolver);
        assert!(out.best_move.is_some());
        assert!(out.info_lines.iter().any(|l| l.contains("capture_score 0")));
    }
}
