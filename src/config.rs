//! Per-session game configuration.

use crate::types::BOARD_SIZE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Immutable configuration passed to `GameSession::new`.
///
/// There is no process-wide configuration state; every session carries
/// its own value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfiguration {
    board_size: usize,
    max_players: usize,
    allow_ai_players: bool,
    time_limit_per_move: Option<Duration>,
    enable_statistics: bool,
}

impl GameConfiguration {
    /// Configuration with standard defaults: 3x3 board, two players,
    /// AI allowed, no time limit, statistics enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Board side length. Fixed at [`BOARD_SIZE`] for this engine.
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Maximum number of players in a session.
    pub fn max_players(&self) -> usize {
        self.max_players
    }

    /// Whether automated players may join.
    pub fn allow_ai_players(&self) -> bool {
        self.allow_ai_players
    }

    /// Advisory per-move time limit for delivery layers to enforce.
    /// The engine itself never blocks on it.
    pub fn time_limit_per_move(&self) -> Option<Duration> {
        self.time_limit_per_move
    }

    /// Whether results are recorded into player statistics.
    pub fn enable_statistics(&self) -> bool {
        self.enable_statistics
    }

    /// Returns the configuration with AI players allowed or not.
    pub fn with_allow_ai_players(mut self, allow: bool) -> Self {
        self.allow_ai_players = allow;
        self
    }

    /// Returns the configuration with the advisory per-move time limit.
    pub fn with_time_limit_per_move(mut self, limit: Option<Duration>) -> Self {
        self.time_limit_per_move = limit;
        self
    }

    /// Returns the configuration with statistics recording toggled.
    pub fn with_statistics(mut self, enabled: bool) -> Self {
        self.enable_statistics = enabled;
        self
    }
}

impl Default for GameConfiguration {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            max_players: 2,
            allow_ai_players: true,
            time_limit_per_move: None,
            enable_statistics: true,
        }
    }
}
