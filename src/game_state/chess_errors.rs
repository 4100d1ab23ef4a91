//! Errors used throughout the rules engine.
//!
//! Each layer owns a small error enum so callers can match on exactly the
//! failures that layer can produce:
//! - `GeometryError` is returned when a board shape cannot be built.
//! - `BoardError` signals a write outside the playable cells. This is a caller
//!   bug, not a gameplay condition, and should not be swallowed to keep playing.
//! - `ApplyMoveError` covers every ordinary reason a move request is refused.
//!   A refused move never mutates the game.
//!
//! `ChessError` unifies the three for code that builds and plays whole games
//! (setups, the match harness) and only wants to propagate with `?`.

use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::{Color, Move};
use crate::game_state::coord::Coord;

/// Failure to construct a `GridGeometry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Width or height was zero or negative.
    InvalidDimensions { width: i32, height: i32 },
    /// The playability mask does not hold exactly one entry per cell.
    MaskSizeMismatch { expected: usize, found: usize },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidDimensions { width, height } => {
                write!(f, "board dimensions must be positive, got {width}x{height}")
            }
            GeometryError::MaskSizeMismatch { expected, found } => {
                write!(f, "cell mask must hold {expected} entries, found {found}")
            }
        }
    }
}

impl Error for GeometryError {}

/// Access to a cell that is not part of the board geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    OutOfRange(Coord),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfRange(cell) => write!(f, "cell {cell} is outside the board"),
        }
    }
}

impl Error for BoardError {}

/// Reasons `apply_move` refuses a move. The game is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyMoveError {
    /// Origin and destination are the same cell.
    NoOpMove(Coord),
    /// Origin or destination is not a playable cell.
    OutOfBounds(Coord),
    /// There is no piece on the origin cell.
    EmptyOrigin(Coord),
    /// The piece on the origin belongs to the player who is not on turn.
    NotYourTurn { owner: Color, current: Color },
    /// The destination is not among the freshly generated moves of the piece.
    IllegalDestination(Move),
    /// A board write failed after validation. Indicates an engine bug.
    Board(BoardError),
}

impl fmt::Display for ApplyMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyMoveError::NoOpMove(cell) => write!(f, "move from {cell} to itself"),
            ApplyMoveError::OutOfBounds(cell) => write!(f, "cell {cell} is outside the board"),
            ApplyMoveError::EmptyOrigin(cell) => write!(f, "no piece on {cell}"),
            ApplyMoveError::NotYourTurn { owner, current } => {
                write!(f, "piece belongs to {owner} but {current} is to move")
            }
            ApplyMoveError::IllegalDestination(mv) => write!(f, "illegal move {mv}"),
            ApplyMoveError::Board(err) => write!(f, "board write failed: {err}"),
        }
    }
}

impl Error for ApplyMoveError {}

impl From<BoardError> for ApplyMoveError {
    fn from(err: BoardError) -> Self {
        ApplyMoveError::Board(err)
    }
}

/// Unified error for building and driving complete games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    Geometry(GeometryError),
    Board(BoardError),
    Apply(ApplyMoveError),
}

impl fmt::Display for ChessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessError::Geometry(err) => write!(f, "{err}"),
            ChessError::Board(err) => write!(f, "{err}"),
            ChessError::Apply(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ChessError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ChessError::Geometry(err) => Some(err),
            ChessError::Board(err) => Some(err),
            ChessError::Apply(err) => Some(err),
        }
    }
}

impl From<GeometryError> for ChessError {
    fn from(err: GeometryError) -> Self {
        ChessError::Geometry(err)
    }
}

impl From<BoardError> for ChessError {
    fn from(err: BoardError) -> Self {
        ChessError::Board(err)
    }
}

impl From<ApplyMoveError> for ChessError {
    fn from(err: ApplyMoveError) -> Self {
        ChessError::Apply(err)
    }
}
