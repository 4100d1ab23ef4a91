//! The turn-based game model.
//!
//! `GameState` owns exactly one `BoardState` and tracks whose turn it is, the
//! last move and the type it was effectively played as, the append-only move
//! history, and the notification observers. The current player only changes
//! as a side effect of a successfully applied move.
//!
//! Move generation here is *pseudo-legal*: moves are never filtered for
//! leaving the mover's own royal piece capturable. Games built on this engine
//! are won by capturing the royal piece, not by checkmate.

use std::fmt;

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_errors::{ApplyMoveError, BoardError};
use crate::game_state::chess_types::{Color, Move};
use crate::game_state::coord::Coord;
use crate::game_state::game_events::{GameEvent, GameEvents};
use crate::game_state::grid_geometry::GridGeometry;
use crate::game_state::piece::Piece;
use crate::move_generation::legal_move_apply::{apply_move, AppliedMove};
use crate::move_generation::legal_move_checks::{is_in_check, is_square_attacked};
use crate::move_generation::legal_move_generator::{
    all_pseudo_legal_moves, generate_pseudo_legal_moves,
};
use crate::move_generation::rules_resolver::RulesResolver;

pub struct GameState {
    pub(crate) board: BoardState,
    pub(crate) current_player: Color,
    pub(crate) last_move: Option<Move>,
    pub(crate) last_move_effective_type: Option<String>,
    pub(crate) move_history: Vec<Move>,
    pub(crate) events: GameEvents,
}

impl GameState {
    /// An empty board over `geometry`, white to move.
    pub fn new(geometry: GridGeometry) -> Self {
        Self::from_board(BoardState::new(geometry))
    }

    /// Wrap an existing board (for example one built with a tag layer).
    pub fn from_board(board: BoardState) -> Self {
        Self {
            board,
            current_player: Color::white(),
            last_move: None,
            last_move_effective_type: None,
            move_history: Vec::new(),
            events: GameEvents::default(),
        }
    }

    /// Copy of the position and history without the observers, for search
    /// and counting code that plays moves on a scratch state.
    pub fn snapshot(&self) -> GameState {
        GameState {
            board: self.board.clone(),
            current_player: self.current_player.clone(),
            last_move: self.last_move.clone(),
            last_move_effective_type: self.last_move_effective_type.clone(),
            move_history: self.move_history.clone(),
            events: GameEvents::default(),
        }
    }

    /// Choose who moves first. Only meaningful while setting up a position.
    pub fn with_current_player(mut self, player: Color) -> Self {
        self.current_player = player;
        self
    }

    #[inline]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    #[inline]
    pub fn geometry(&self) -> &GridGeometry {
        self.board.geometry()
    }

    #[inline]
    pub fn get(&self, cell: Coord) -> Option<&Piece> {
        self.board.get(cell)
    }

    /// Place or clear a piece. Writing outside the geometry is a caller bug.
    pub fn set(&mut self, cell: Coord, piece: Option<Piece>) -> Result<(), BoardError> {
        self.board.set(cell, piece)
    }

    pub fn all_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.board.geometry().all_coords()
    }

    #[inline]
    pub fn current_player(&self) -> &Color {
        &self.current_player
    }

    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }

    /// Type the last moved piece acted as: its mimic tag, else its declared type.
    #[inline]
    pub fn last_move_effective_type(&self) -> Option<&str> {
        self.last_move_effective_type.as_deref()
    }

    #[inline]
    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    /// Observe every notification.
    pub fn subscribe(&mut self, observer: impl FnMut(&GameEvent) + Send + 'static) {
        self.events.subscribe(Box::new(observer));
    }

    /// Observe captures only.
    pub fn on_captured(&mut self, mut observer: impl FnMut(Coord, &Piece) + Send + 'static) {
        self.subscribe(move |event| {
            if let GameEvent::Captured { cell, piece } = event {
                observer(*cell, piece);
            }
        });
    }

    /// Observe turn changes only.
    pub fn on_turn_changed(&mut self, mut observer: impl FnMut(&Color) + Send + 'static) {
        self.subscribe(move |event| {
            if let GameEvent::TurnChanged { player } = event {
                observer(player);
            }
        });
    }

    pub fn generate_pseudo_legal_moves(&self, from: Coord, resolver: &RulesResolver) -> Vec<Move> {
        generate_pseudo_legal_moves(self, from, resolver)
    }

    pub fn all_pseudo_legal_moves(&self, color: &Color, resolver: &RulesResolver) -> Vec<Move> {
        all_pseudo_legal_moves(self, color, resolver)
    }

    pub fn is_square_attacked(&self, cell: Coord, by: &Color, resolver: &RulesResolver) -> bool {
        is_square_attacked(self, cell, by, resolver)
    }

    pub fn apply_move(
        &mut self,
        mv: &Move,
        resolver: &RulesResolver,
    ) -> Result<AppliedMove, ApplyMoveError> {
        apply_move(self, mv, resolver)
    }

    /// Royal pieces `color` still has on the board.
    pub fn royal_count(&self, color: &Color) -> usize {
        self.board
            .pieces_of(color)
            .filter(|(_, piece)| piece.is_royal())
            .count()
    }

    /// True if a royal piece of `color` is attacked by the other side.
    pub fn is_in_check(&self, color: &Color, resolver: &RulesResolver) -> bool {
        is_in_check(self, color, resolver)
    }

    /// The side still holding royal pieces once the other has lost all of
    /// theirs. `None` while both (or neither) have any.
    pub fn winner(&self) -> Option<Color> {
        let white = Color::white();
        let black = Color::black();
        match (self.royal_count(&white), self.royal_count(&black)) {
            (0, n) if n > 0 => Some(black),
            (n, 0) if n > 0 => Some(white),
            _ => None,
        }
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("board", &self.board)
            .field("current_player", &self.current_player)
            .field("last_move", &self.last_move)
            .field("last_move_effective_type", &self.last_move_effective_type)
            .field("moves_played", &self.move_history.len())
            .field("observers", &self.events.observer_count())
            .finish()
    }
}
