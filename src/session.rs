//! Game session: the turn-based state machine coordinating board,
//! players, and rules.

use crate::action::Move;
use crate::config::GameConfiguration;
use crate::player::{MarkAlreadyAssigned, Player, PlayerId};
use crate::rules::VictoryConditions;
use crate::types::{Board, Mark, Position};
use chrono::{DateTime, Utc};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Lifecycle state of a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameState {
    /// Fewer than two players have joined.
    WaitingForPlayers,
    /// Both players present; moves are accepted.
    InProgress,
    /// Temporarily suspended; resumable.
    Paused,
    /// Terminal: a result has been recorded.
    Finished,
    /// Terminal: walked away from without a result.
    Abandoned,
}

/// Outcome of a finished game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameResult {
    /// X completed a line.
    XWins,
    /// O completed a line.
    OWins,
    /// Board filled with no winner.
    Draw,
    /// The game was abandoned before completion.
    Abandoned,
}

/// Errors raised by session operations.
///
/// Occupied cells and taken mark slots are *not* errors — those come
/// back as `Ok(false)` because they are routine outcomes a caller
/// handles every turn.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum SessionError {
    /// The operation is not allowed in the current state.
    #[display("operation not allowed while the session is {}", state)]
    InvalidTransition {
        /// State the session was in.
        state: GameState,
    },
    /// A move was attempted while the game is not running.
    #[display("no moves accepted while the session is {}", state)]
    NotInProgress {
        /// State the session was in.
        state: GameState,
    },
    /// A move was attempted by a player who does not hold the turn.
    #[display("not this player's turn; waiting for {}", expected)]
    WrongTurn {
        /// Mark whose turn it is.
        expected: Mark,
    },
    /// The moving player has no mark assigned.
    #[display("player '{}' has no mark assigned", player)]
    UnassignedPlayer {
        /// Name of the player.
        player: String,
    },
    /// Adding a player failed because it already holds a mark.
    #[from]
    MarkAlreadyAssigned(MarkAlreadyAssigned),
}

/// A complete game of tic-tac-toe: one board, up to two players, and
/// the turn-based lifecycle around them.
///
/// The session exclusively owns its board and players; external code
/// reads them through the accessors and mutates only through the
/// operations below. A session is single-threaded by design — wrap it
/// in a mutex if it must be shared.
#[derive(Debug, Clone)]
pub struct GameSession {
    configuration: GameConfiguration,
    board: Board,
    victory: VictoryConditions,
    player_x: Option<Player>,
    player_o: Option<Player>,
    current_mark: Mark,
    state: GameState,
    result: Option<GameResult>,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    move_count: u32,
}

impl GameSession {
    /// Creates a session waiting for players.
    #[instrument]
    pub fn new(configuration: GameConfiguration) -> Self {
        info!("creating game session");
        Self {
            configuration,
            board: Board::new(),
            victory: VictoryConditions::new(),
            player_x: None,
            player_o: None,
            current_mark: Mark::X,
            state: GameState::WaitingForPlayers,
            result: None,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
            move_count: 0,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Session configuration.
    pub fn configuration(&self) -> &GameConfiguration {
        &self.configuration
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Result, once the game has finished.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Mark holding the turn.
    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    /// Player holding the turn, if present.
    pub fn current_player(&self) -> Option<&Player> {
        self.player(self.current_mark)
    }

    /// Player owning the given mark slot.
    pub fn player(&self, mark: Mark) -> Option<&Player> {
        match mark {
            Mark::X => self.player_x.as_ref(),
            Mark::O => self.player_o.as_ref(),
        }
    }

    /// Player X, if joined.
    pub fn player_x(&self) -> Option<&Player> {
        self.player_x.as_ref()
    }

    /// Player O, if joined.
    pub fn player_o(&self) -> Option<&Player> {
        self.player_o.as_ref()
    }

    /// The joined players.
    pub fn players(&self) -> Vec<&Player> {
        self.player_x.iter().chain(self.player_o.iter()).collect()
    }

    /// Moves applied since the session started or was last reset.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// When the session was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the game started, once both players joined.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// When the game finished.
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Elapsed play time: start to finish, or start to now while
    /// running. `None` before the game starts.
    pub fn duration(&self) -> Option<chrono::Duration> {
        let started = self.started_at?;
        let end = self.finished_at.unwrap_or_else(Utc::now);
        Some(end - started)
    }

    /// The winning player, if the game finished with a winner.
    pub fn winner(&self) -> Option<&Player> {
        match self.result? {
            GameResult::XWins => self.player_x(),
            GameResult::OWins => self.player_o(),
            GameResult::Draw | GameResult::Abandoned => None,
        }
    }

    /// Returns true if the game ended in a draw.
    pub fn is_draw(&self) -> bool {
        self.result == Some(GameResult::Draw)
    }

    /// Returns true once the session reached its terminal state.
    pub fn is_finished(&self) -> bool {
        self.state == GameState::Finished
    }

    /// Positions still open for play, row-major.
    pub fn available_moves(&self) -> Vec<Position> {
        self.board.empty_positions()
    }

    // ─────────────────────────────────────────────────────────────
    //  Transitions
    // ─────────────────────────────────────────────────────────────

    /// Adds a player under the given mark slot.
    ///
    /// Allowed only while waiting for players. Returns `Ok(false)` if
    /// the slot is already taken. When the second slot fills, the game
    /// starts automatically.
    #[instrument(skip(self, player), fields(player = %player.name(), mark = %mark))]
    pub fn add_player(&mut self, mut player: Player, mark: Mark) -> Result<bool, SessionError> {
        if self.state != GameState::WaitingForPlayers {
            warn!(state = %self.state, "add_player rejected");
            return Err(SessionError::InvalidTransition { state: self.state });
        }
        if self.player(mark).is_some() {
            warn!("mark slot already taken");
            return Ok(false);
        }

        player.assign_mark(mark)?;
        match mark {
            Mark::X => self.player_x = Some(player),
            Mark::O => self.player_o = Some(player),
        }
        info!("player joined");

        if self.player_x.is_some() && self.player_o.is_some() {
            self.state = GameState::InProgress;
            self.started_at = Some(Utc::now());
            info!("both players present, game started");
        }
        Ok(true)
    }

    /// Applies a move by the identified player.
    ///
    /// Returns `Ok(false)` if the target cell is occupied — the normal
    /// illegal-move outcome, leaving turn and state untouched. On a
    /// successful placement the session re-evaluates victory and draw,
    /// and flips the turn only if the game is still running.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn make_move(&mut self, position: Position, player: PlayerId) -> Result<bool, SessionError> {
        if self.state != GameState::InProgress {
            warn!("move rejected, game not in progress");
            return Err(SessionError::NotInProgress { state: self.state });
        }

        let current = self
            .current_player()
            .filter(|p| p.id() == player)
            .ok_or_else(|| {
                warn!(%player, expected = %self.current_mark, "move out of turn");
                SessionError::WrongTurn {
                    expected: self.current_mark,
                }
            })?;

        let mark = current.mark().ok_or_else(|| SessionError::UnassignedPlayer {
            player: current.name().to_string(),
        })?;

        if !self.board.place(Move::new(position, mark)) {
            debug!(%position, "cell occupied");
            return Ok(false);
        }
        self.move_count += 1;

        if let Some(pattern) = self.victory.check_victory(&self.board) {
            let result = match pattern.winner() {
                Mark::X => GameResult::XWins,
                Mark::O => GameResult::OWins,
            };
            self.finish(result);
        } else if self.board.is_full() {
            self.finish(GameResult::Draw);
        }

        if self.state == GameState::InProgress {
            self.current_mark = self.current_mark.opponent();
        }
        Ok(true)
    }

    /// Suspends a running game. Ignored in any other state.
    #[instrument(skip(self))]
    pub fn pause(&mut self) {
        if self.state == GameState::InProgress {
            debug!("session paused");
            self.state = GameState::Paused;
        }
    }

    /// Resumes a paused game. Ignored in any other state.
    #[instrument(skip(self))]
    pub fn resume(&mut self) {
        if self.state == GameState::Paused {
            debug!("session resumed");
            self.state = GameState::InProgress;
        }
    }

    /// Ends a running or paused game without a winner. Ignored in any
    /// other state; records no statistics.
    #[instrument(skip(self))]
    pub fn abandon(&mut self) {
        if matches!(self.state, GameState::InProgress | GameState::Paused) {
            self.finish(GameResult::Abandoned);
        }
    }

    /// Starts a fresh game with the same players.
    ///
    /// Clears the board, result, move counter, and play timestamps, and
    /// hands the turn back to X. Player identities and statistics are
    /// untouched. With both players present the new game begins
    /// immediately; otherwise the session waits again.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.reset();
        self.current_mark = Mark::X;
        self.result = None;
        self.finished_at = None;
        self.move_count = 0;
        if self.player_x.is_some() && self.player_o.is_some() {
            self.state = GameState::InProgress;
            self.started_at = Some(Utc::now());
        } else {
            self.state = GameState::WaitingForPlayers;
            self.started_at = None;
        }
        info!(state = %self.state, "session reset");
    }

    fn finish(&mut self, result: GameResult) {
        self.state = GameState::Finished;
        self.result = Some(result);
        self.finished_at = Some(Utc::now());
        info!(%result, moves = self.move_count, "game finished");

        if self.configuration.enable_statistics() {
            self.record_statistics(result);
        }
    }

    /// Records the result into both players' statistics. Called exactly
    /// once, at the transition into `Finished`.
    fn record_statistics(&mut self, result: GameResult) {
        match result {
            GameResult::XWins => {
                if let Some(p) = self.player_x.as_mut() {
                    p.record_win();
                }
                if let Some(p) = self.player_o.as_mut() {
                    p.record_loss();
                }
            }
            GameResult::OWins => {
                if let Some(p) = self.player_o.as_mut() {
                    p.record_win();
                }
                if let Some(p) = self.player_x.as_mut() {
                    p.record_loss();
                }
            }
            GameResult::Draw => {
                if let Some(p) = self.player_x.as_mut() {
                    p.record_draw();
                }
                if let Some(p) = self.player_o.as_mut() {
                    p.record_draw();
                }
            }
            GameResult::Abandoned => {}
        }
    }
}
