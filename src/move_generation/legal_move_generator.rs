//! Pseudo-legal move generation.
//!
//! Finds the rule list for the piece on a cell (its embedded rules, else the
//! resolver's rules for its type) and chains every rule's moves. Nothing is
//! filtered for leaving the mover's own royal piece capturable.

use std::collections::HashSet;
use std::sync::Arc;

use log::trace;

use crate::game_state::chess_types::{Color, Move};
use crate::game_state::coord::Coord;
use crate::game_state::game_state::GameState;
use crate::game_state::piece::Piece;
use crate::move_generation::rules_resolver::RulesResolver;
use crate::moves::move_rule::{no_moves, MoveIter, MoveRule, RuleContext};

/// Rules a piece moves by: embedded rules win over the resolver.
pub fn rules_for_piece<'a>(
    piece: &'a Piece,
    resolver: Option<&'a RulesResolver>,
) -> &'a [Arc<dyn MoveRule>] {
    match piece.rules() {
        Some(rules) => rules,
        None => resolver.map_or(&[][..], |r| r.rules_for(piece.type_name())),
    }
}

/// Lazily chain every rule of the piece on `ctx.origin`.
pub fn moves_in_context(ctx: RuleContext<'_>) -> MoveIter<'_> {
    let Some(mover) = ctx.mover() else {
        return no_moves();
    };
    let rules = rules_for_piece(mover, ctx.resolver);
    Box::new(rules.iter().flat_map(move |rule| rule.generate(ctx)))
}

/// Lazy pseudo-legal moves of the piece on `from`. May repeat a move when two
/// rules reach the same destination.
pub fn pseudo_legal_moves<'a>(
    game_state: &'a GameState,
    from: Coord,
    resolver: &'a RulesResolver,
) -> MoveIter<'a> {
    if !game_state.geometry().contains(from) {
        return no_moves();
    }
    moves_in_context(RuleContext::new(game_state, from).with_resolver(resolver))
}

/// Pseudo-legal moves of the piece on `from`, in rule order, without repeats.
pub fn generate_pseudo_legal_moves(
    game_state: &GameState,
    from: Coord,
    resolver: &RulesResolver,
) -> Vec<Move> {
    let mut seen = HashSet::new();
    let moves: Vec<Move> = pseudo_legal_moves(game_state, from, resolver)
        .filter(|mv| seen.insert(mv.clone()))
        .collect();
    trace!("{} pseudo-legal move(s) from {from}", moves.len());
    moves
}

/// Union of pseudo-legal moves over every cell `color` occupies, row-major.
pub fn all_pseudo_legal_moves(
    game_state: &GameState,
    color: &Color,
    resolver: &RulesResolver,
) -> Vec<Move> {
    game_state
        .board()
        .pieces_of(color)
        .flat_map(|(cell, _)| generate_pseudo_legal_moves(game_state, cell, resolver))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{KNIGHT, QUEEN};
    use crate::game_state::grid_geometry::GridGeometry;
    use crate::move_generation::piece_catalog::standard_resolver;
    use crate::moves::slider_moves::SliderRule;
    use crate::utils::standard_setup::standard_setup;

    #[test]
    fn standard_start_has_twenty_white_moves() {
        let resolver = standard_resolver();
        let state = standard_setup().expect("standard layout fits");
        assert_eq!(
            all_pseudo_legal_moves(&state, &Color::white(), &resolver).len(),
            20
        );
        assert_eq!(
            all_pseudo_legal_moves(&state, &Color::black(), &resolver).len(),
            20
        );
    }

    #[test]
    fn embedded_rules_override_the_resolver() {
        let resolver = standard_resolver();
        let mut state = GameState::new(GridGeometry::new(8, 8).expect("valid"));
        let from = Coord::new(0, 0);
        state
            .set(
                from,
                Some(Piece::with_rules(
                    "white",
                    KNIGHT,
                    vec![Arc::new(SliderRule::rook().with_max_steps(1))],
                )),
            )
            .expect("on board");
        let moves = generate_pseudo_legal_moves(&state, from, &resolver);
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn unknown_type_and_empty_cells_produce_nothing() {
        let resolver = standard_resolver();
        let mut state = GameState::new(GridGeometry::new(8, 8).expect("valid"));
        state
            .set(Coord::new(3, 3), Some(Piece::new("white", "Dragon")))
            .expect("on board");
        assert!(generate_pseudo_legal_moves(&state, Coord::new(3, 3), &resolver).is_empty());
        assert!(generate_pseudo_legal_moves(&state, Coord::new(4, 4), &resolver).is_empty());
        assert!(generate_pseudo_legal_moves(&state, Coord::new(40, 4), &resolver).is_empty());
    }

    #[test]
    fn duplicate_destinations_from_fused_rules_are_dropped() {
        let mut resolver = standard_resolver();
        resolver.register(
            "Doubled",
            vec![Arc::new(SliderRule::queen()), Arc::new(SliderRule::queen())],
        );
        let mut state = GameState::new(GridGeometry::new(8, 8).expect("valid"));
        state
            .set(Coord::new(3, 3), Some(Piece::new("white", "Doubled")))
            .expect("on board");
        state
            .set(Coord::new(6, 6), Some(Piece::new("white", QUEEN)))
            .expect("on board");
        let doubled = generate_pseudo_legal_moves(&state, Coord::new(3, 3), &resolver);
        let raw = pseudo_legal_moves(&state, Coord::new(3, 3), &resolver).count();
        assert_eq!(raw, doubled.len() * 2);
    }

    #[test]
    fn case_insensitive_type_names_resolve() {
        let resolver = standard_resolver();
        let mut state = GameState::new(GridGeometry::new(8, 8).expect("valid"));
        state
            .set(Coord::new(4, 0), Some(Piece::new("white", "king").moved()))
            .expect("on board");
        state
            .set(Coord::new(4, 1), Some(Piece::new("white", "PAWN")))
            .expect("on board");
        assert_eq!(
            generate_pseudo_legal_moves(&state, Coord::new(4, 0), &resolver).len(),
            4
        );
        assert_eq!(
            generate_pseudo_legal_moves(&state, Coord::new(4, 1), &resolver).len(),
            2
        );
    }
}
