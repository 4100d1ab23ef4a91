//! Square-attack detection.
//!
//! Pawn-style rules only capture onto occupied cells, so asking "could a piece
//! move onto this cell?" is not enough to decide whether an empty cell is
//! attacked. Instead a rule-less stand-in victim owned by the defending side is
//! placed on the target for the duration of the probe, and the attacker's
//! pseudo-legal moves are searched for one landing there. The stand-in lives in
//! the rule context, not on the board, so the board is never written.

use crate::game_state::chess_types::Color;
use crate::game_state::coord::Coord;
use crate::game_state::game_state::GameState;
use crate::game_state::piece::Piece;
use crate::move_generation::legal_move_generator::moves_in_context;
use crate::move_generation::rules_resolver::RulesResolver;
use crate::moves::move_rule::RuleContext;

/// True if some piece of `by` has a pseudo-legal move onto `cell`, treating the
/// cell as holding an opposing piece.
pub fn is_square_attacked(
    game_state: &GameState,
    cell: Coord,
    by: &Color,
    resolver: &RulesResolver,
) -> bool {
    is_square_attacked_with(game_state, cell, by, Some(resolver))
}

pub(crate) fn is_square_attacked_with(
    game_state: &GameState,
    cell: Coord,
    by: &Color,
    resolver: Option<&RulesResolver>,
) -> bool {
    !attackers_with(game_state, cell, by, resolver, true).is_empty()
}

/// Cells of every `by` piece attacking `cell`, row-major.
pub fn attackers_to_square(
    game_state: &GameState,
    cell: Coord,
    by: &Color,
    resolver: &RulesResolver,
) -> Vec<Coord> {
    attackers_with(game_state, cell, by, Some(resolver), false)
}

fn attackers_with(
    game_state: &GameState,
    cell: Coord,
    by: &Color,
    resolver: Option<&RulesResolver>,
    first_only: bool,
) -> Vec<Coord> {
    let mut attackers = Vec::new();
    if !game_state.geometry().contains(cell) {
        return attackers;
    }
    let victim = Piece::probe_victim(by.opposite());
    for (from, _) in game_state.board().pieces_of(by) {
        if from == cell {
            continue;
        }
        let ctx = RuleContext::new(game_state, from)
            .with_resolver_opt(resolver)
            .with_probe(cell, &victim);
        if moves_in_context(ctx).any(|mv| mv.to() == cell) {
            attackers.push(from);
            if first_only {
                break;
            }
        }
    }
    attackers
}

/// True if any royal piece of `color` is attacked by the opposite side.
pub fn is_in_check(game_state: &GameState, color: &Color, resolver: &RulesResolver) -> bool {
    let enemy = color.opposite();
    game_state
        .board()
        .pieces_of(color)
        .filter(|(_, piece)| piece.is_royal())
        .any(|(cell, _)| is_square_attacked(game_state, cell, &enemy, resolver))
}
