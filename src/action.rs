//! First-class move type.
//!
//! A move is a domain event, not a side effect: it records a player's
//! intent and can be validated, logged, and replayed independently of
//! the board that applies it.

use crate::types::{Mark, Position};
use serde::{Deserialize, Serialize};

/// A single placement: a mark at a position.
///
/// Immutable once created. A move always carries a real mark; there is
/// no way to express "place nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    position: Position,
    mark: Mark,
}

impl Move {
    /// Creates a new move.
    pub fn new(position: Position, mark: Mark) -> Self {
        Self { position, mark }
    }

    /// The targeted position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The mark being placed.
    pub fn mark(&self) -> Mark {
        self.mark
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position)
    }
}
