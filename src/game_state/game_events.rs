//! Observer registry for game notifications.
//!
//! Notifications are best-effort: they fire only when at least one observer
//! is attached, and the engine neither depends on nor waits for subscribers.

use crate::game_state::chess_types::Color;
use crate::game_state::coord::Coord;
use crate::game_state::piece::Piece;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// `piece` was removed from `cell` by a capture (including en passant).
    Captured { cell: Coord, piece: Piece },
    /// A move was applied and `player` is now on turn.
    TurnChanged { player: Color },
}

pub type GameObserver = Box<dyn FnMut(&GameEvent) + Send>;

#[derive(Default)]
pub struct GameEvents {
    observers: Vec<GameObserver>,
}

impl GameEvents {
    pub fn subscribe(&mut self, observer: GameObserver) {
        self.observers.push(observer);
    }

    #[inline]
    pub fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Deliver an event built lazily, so no clone happens without listeners.
    pub fn emit_with(&mut self, build: impl FnOnce() -> GameEvent) {
        if !self.has_observers() {
            return;
        }
        let event = build();
        for observer in &mut self.observers {
            observer(&event);
        }
    }
}
