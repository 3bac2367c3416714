//! Player identity, classification, and statistics.

use crate::types::Mark;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, instrument};

/// Longest accepted player name, in characters.
pub const MAX_NAME_LEN: usize = 50;

static NEXT_PLAYER_ID: AtomicU64 = AtomicU64::new(1);

/// Unique player identifier, assigned at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[display("player-{}", _0)]
pub struct PlayerId(u64);

/// Kind of participant controlling a mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlayerType {
    /// A person supplying moves through a delivery layer.
    Human,
    /// Automated opponent, easy difficulty.
    AiEasy,
    /// Automated opponent, medium difficulty.
    AiMedium,
    /// Automated opponent, hard difficulty.
    AiHard,
}

/// Immutable statistics snapshot.
///
/// Recording a result produces a fresh snapshot rather than mutating in
/// place, so snapshots previously handed to callers stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    games_played: u32,
    games_won: u32,
    games_lost: u32,
    games_drawn: u32,
}

impl PlayerStats {
    /// Total games recorded.
    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Games won.
    pub fn games_won(&self) -> u32 {
        self.games_won
    }

    /// Games lost.
    pub fn games_lost(&self) -> u32 {
        self.games_lost
    }

    /// Games drawn.
    pub fn games_drawn(&self) -> u32 {
        self.games_drawn
    }

    /// Percentage of games won, 0.0 when no games are recorded.
    pub fn win_rate(&self) -> f64 {
        self.rate(self.games_won)
    }

    /// Percentage of games lost.
    pub fn loss_rate(&self) -> f64 {
        self.rate(self.games_lost)
    }

    /// Percentage of games drawn.
    pub fn draw_rate(&self) -> f64 {
        self.rate(self.games_drawn)
    }

    fn rate(&self, count: u32) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        f64::from(count) / f64::from(self.games_played) * 100.0
    }

    fn after_win(self) -> Self {
        Self {
            games_played: self.games_played + 1,
            games_won: self.games_won + 1,
            ..self
        }
    }

    fn after_loss(self) -> Self {
        Self {
            games_played: self.games_played + 1,
            games_lost: self.games_lost + 1,
            ..self
        }
    }

    fn after_draw(self) -> Self {
        Self {
            games_played: self.games_played + 1,
            games_drawn: self.games_drawn + 1,
            ..self
        }
    }
}

/// Error for an unusable player name.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum InvalidName {
    /// Name was empty or whitespace-only.
    #[display("player name must not be empty")]
    Empty,
    /// Name exceeded [`MAX_NAME_LEN`] characters.
    #[display("player name of {} characters exceeds the limit of {}", len, MAX_NAME_LEN)]
    TooLong {
        /// Length of the rejected name.
        len: usize,
    },
}

/// Error for assigning a mark to a player that already has one.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("player '{}' already holds mark {}", player, mark)]
pub struct MarkAlreadyAssigned {
    /// Name of the player.
    pub player: String,
    /// The mark the player already holds.
    pub mark: Mark,
}

/// A participant in the game: identity, mark, and running statistics.
///
/// Equality and hashing go by id; two players with the same name are
/// still distinct participants.
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    player_type: PlayerType,
    mark: Option<Mark>,
    stats: PlayerStats,
}

impl Player {
    /// Creates a player with a fresh id and empty statistics.
    ///
    /// The name is trimmed and must be 1 to [`MAX_NAME_LEN`] characters.
    #[instrument]
    pub fn new(name: &str, player_type: PlayerType) -> Result<Self, InvalidName> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InvalidName::Empty);
        }
        let len = name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(InvalidName::TooLong { len });
        }
        Ok(Self {
            id: PlayerId(NEXT_PLAYER_ID.fetch_add(1, Ordering::Relaxed)),
            name: name.to_string(),
            player_type,
            mark: None,
            stats: PlayerStats::default(),
        })
    }

    /// Unique id.
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of participant.
    pub fn player_type(&self) -> PlayerType {
        self.player_type
    }

    /// Assigned mark, once a session has added this player.
    pub fn mark(&self) -> Option<Mark> {
        self.mark
    }

    /// Current statistics snapshot.
    pub fn stats(&self) -> PlayerStats {
        self.stats
    }

    /// Returns true for human players.
    pub fn is_human(&self) -> bool {
        self.player_type == PlayerType::Human
    }

    /// Returns true for automated players.
    pub fn is_ai(&self) -> bool {
        !self.is_human()
    }

    /// Assigns the mark this player will place. Set exactly once;
    /// re-assignment fails.
    #[instrument(skip(self), fields(player = %self.name))]
    pub fn assign_mark(&mut self, mark: Mark) -> Result<(), MarkAlreadyAssigned> {
        if let Some(held) = self.mark {
            return Err(MarkAlreadyAssigned {
                player: self.name.clone(),
                mark: held,
            });
        }
        debug!(%mark, "mark assigned");
        self.mark = Some(mark);
        Ok(())
    }

    /// Renames the player, subject to the same validation as [`new`](Self::new).
    pub fn rename(&mut self, new_name: &str) -> Result<(), InvalidName> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(InvalidName::Empty);
        }
        let len = new_name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(InvalidName::TooLong { len });
        }
        self.name = new_name.to_string();
        Ok(())
    }

    /// Records a won game in a fresh statistics snapshot.
    pub(crate) fn record_win(&mut self) {
        self.stats = self.stats.after_win();
    }

    /// Records a lost game in a fresh statistics snapshot.
    pub(crate) fn record_loss(&mut self) {
        self.stats = self.stats.after_loss();
    }

    /// Records a drawn game in a fresh statistics snapshot.
    pub(crate) fn record_draw(&mut self) {
        self.stats = self.stats.after_draw();
    }

    /// Clears the statistics back to zero.
    pub fn reset_stats(&mut self) {
        self.stats = PlayerStats::default();
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl std::hash::Hash for Player {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.mark {
            Some(mark) => write!(f, "{} ({})", self.name, mark),
            None => write!(f, "{} (unassigned)", self.name),
        }
    }
}
