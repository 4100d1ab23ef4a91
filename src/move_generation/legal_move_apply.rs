//! Applying a move to a `GameState`.
//!
//! The requested move is validated against a fresh generation from its origin
//! before anything is written; a rejected move leaves the state untouched.
//! Side effects (capture, en passant removal, castling rook relocation) are
//! recognised from the move's geometry and the mover's declared type, never
//! from the as-type a joker tags its moves with.

use log::{debug, trace};

use crate::game_state::chess_errors::ApplyMoveError;
use crate::game_state::chess_types::{same_type, Move, KING, PAWN, ROOK};
use crate::game_state::coord::Coord;
use crate::game_state::game_events::GameEvent;
use crate::game_state::game_state::GameState;
use crate::game_state::piece::Piece;
use crate::move_generation::legal_move_generator::generate_pseudo_legal_moves;
use crate::move_generation::rules_resolver::RulesResolver;
use crate::moves::pawn_moves::is_double_step_shape;

/// What a successful `apply_move` did.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedMove {
    /// The move as generated, carrying its as-type if it had one.
    pub mv: Move,
    /// The moving piece as it was before the move.
    pub mover: Piece,
    /// Every removed piece with the cell it was removed from.
    pub captured: Vec<(Coord, Piece)>,
    /// Rook origin and destination when the move castled.
    pub rook_relocation: Option<(Coord, Coord)>,
    pub effective_type: String,
}

impl AppliedMove {
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

pub fn apply_move(
    game_state: &mut GameState,
    requested: &Move,
    resolver: &RulesResolver,
) -> Result<AppliedMove, ApplyMoveError> {
    let (mv, mover) = match validate(game_state, requested, resolver) {
        Ok(found) => found,
        Err(error) => {
            trace!("rejected {requested}: {error}");
            return Err(error);
        }
    };

    let from = mv.from();
    let to = mv.to();
    let effective_type = mv.as_type().unwrap_or(mover.type_name()).to_owned();
    let mut captured = Vec::new();

    let passed = en_passant_victim(game_state, &mv, &mover);
    let rook_relocation = castling_rook(game_state, &mv, &mover);

    if let Some(victim) = game_state.board.take(to)? {
        captured.push((to, victim));
    }

    if let Some(passed) = passed {
        if let Some(victim) = game_state.board.take(passed)? {
            captured.push((passed, victim));
        }
    }

    if let Some((rook_from, rook_to)) = rook_relocation {
        let rook = game_state.board.take(rook_from)?.map(|rook| rook.moved());
        game_state.board.set(rook_to, rook)?;
    }

    game_state.board.set(from, None)?;
    game_state.board.set(to, Some(mover.moved()))?;

    game_state.last_move = Some(mv.clone());
    game_state.last_move_effective_type = Some(effective_type.clone());
    game_state.move_history.push(mv.clone());
    game_state.current_player = game_state.current_player.opposite();

    debug!(
        "{} {} played {mv} ({} capture(s))",
        mover.owner(),
        mover.type_name(),
        captured.len()
    );
    for (cell, piece) in &captured {
        debug!("captured {} {} on {cell}", piece.owner(), piece.type_name());
        game_state.events.emit_with(|| GameEvent::Captured {
            cell: *cell,
            piece: piece.clone(),
        });
    }
    let player = game_state.current_player.clone();
    game_state
        .events
        .emit_with(move || GameEvent::TurnChanged { player });

    Ok(AppliedMove {
        mv,
        mover,
        captured,
        rook_relocation,
        effective_type,
    })
}

/// Regenerate from the origin and pick the move landing on the requested
/// destination, preferring one with the same as-type.
fn validate(
    game_state: &GameState,
    requested: &Move,
    resolver: &RulesResolver,
) -> Result<(Move, Piece), ApplyMoveError> {
    let (from, to) = (requested.from(), requested.to());
    if from == to {
        return Err(ApplyMoveError::NoOpMove(from));
    }
    let geometry = game_state.geometry();
    for cell in [from, to] {
        if !geometry.contains(cell) {
            return Err(ApplyMoveError::OutOfBounds(cell));
        }
    }
    let mover = game_state
        .get(from)
        .ok_or(ApplyMoveError::EmptyOrigin(from))?;
    if mover.owner() != game_state.current_player() {
        return Err(ApplyMoveError::NotYourTurn {
            owner: mover.owner().clone(),
            current: game_state.current_player().clone(),
        });
    }

    let candidates: Vec<Move> = generate_pseudo_legal_moves(game_state, from, resolver)
        .into_iter()
        .filter(|mv| mv.to() == to)
        .collect();
    let chosen = candidates
        .iter()
        .find(|mv| mv.as_type() == requested.as_type())
        .or_else(|| candidates.first())
        .cloned()
        .ok_or_else(|| ApplyMoveError::IllegalDestination(requested.clone()))?;
    Ok((chosen, mover.clone()))
}

/// Cell of the pawn taken en passant by `mv`, if the move is one. Must be
/// asked before the destination is cleared.
fn en_passant_victim(game_state: &GameState, mv: &Move, mover: &Piece) -> Option<Coord> {
    if !mover.is_type(PAWN) || game_state.get(mv.to()).is_some() {
        return None;
    }
    let last = game_state.last_move()?;
    if !same_type(game_state.last_move_effective_type()?, PAWN) || !is_double_step_shape(last) {
        return None;
    }
    let landed = last.to();
    if landed.y != mv.from().y || landed.x != mv.to().x {
        return None;
    }
    let passed = game_state.get(landed)?;
    (passed.is_type(PAWN) && passed.owner() != mover.owner()).then_some(landed)
}

/// Rook origin and destination when `mv` is a two-cell king move.
fn castling_rook(game_state: &GameState, mv: &Move, mover: &Piece) -> Option<(Coord, Coord)> {
    let delta = mv.delta();
    if !mover.is_type(KING) || mover.has_moved() || delta.y != 0 || delta.x.abs() != 2 {
        return None;
    }
    if game_state.get(mv.to()).is_some() {
        return None;
    }
    let dir = delta.signum();
    let rook_cell = game_state
        .geometry()
        .ray(mv.from(), dir)
        .find(|cell| game_state.get(*cell).is_some())?;
    let rook = game_state.get(rook_cell)?;
    let usable =
        same_type(rook.type_name(), ROOK) && rook.owner() == mover.owner() && !rook.has_moved();
    usable.then(|| (rook_cell, mv.to() - dir))
}
