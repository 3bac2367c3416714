//! AI move selection.
//!
//! Every automated opponent implements [`Strategy`]: given a read-only
//! board and the acting player, produce a position or `None` when the
//! board offers nothing. Strategies simulate on cloned boards only; the
//! caller's board is never mutated.

mod aggressive;
mod defensive;
mod minimax;
mod random;
mod strategic;

pub use aggressive::AggressiveStrategy;
pub use defensive::DefensiveStrategy;
pub use minimax::MinimaxStrategy;
pub use random::RandomStrategy;
pub use strategic::StrategicStrategy;

use crate::player::{Player, PlayerType};
use crate::rules::VictoryConditions;
use crate::types::{Board, Position};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A move-selection policy for an automated player.
pub trait Strategy: std::fmt::Debug {
    /// Selects the next position for `player` on `board`.
    ///
    /// Returns `None` when no empty positions remain, or when the
    /// player has no assigned mark to place.
    fn select_move(&mut self, board: &Board, player: &Player) -> Option<Position>;

    /// Short identifier for logs and display.
    fn name(&self) -> &'static str;
}

/// The closed set of available strategies.
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
pub enum StrategyKind {
    /// Uniform choice among empty positions.
    Random,
    /// Win, block, then positional preferences.
    Defensive,
    /// Win, fork, block, threaten, then positional preferences.
    Aggressive,
    /// Exhaustive search; never loses.
    Minimax,
    /// Weighted multi-heuristic scoring.
    Strategic,
}

impl StrategyKind {
    /// One-line description of the playing style.
    pub fn description(&self) -> &'static str {
        match self {
            StrategyKind::Random => "Picks uniformly among open cells. Beginner level.",
            StrategyKind::Defensive => {
                "Takes a win when offered, otherwise blocks and holds strong cells."
            }
            StrategyKind::Aggressive => "Hunts forks and new threats before defending.",
            StrategyKind::Minimax => "Full-depth search; optimal play that never loses.",
            StrategyKind::Strategic => "Weighs wins, blocks, forks, and board control per cell.",
        }
    }
}

/// Error for a strategy name outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("unknown strategy '{}'", requested)]
pub struct UnknownStrategy {
    /// The rejected name.
    pub requested: String,
}

/// Builds the strategy for the requested kind.
pub fn create(kind: StrategyKind, victory: VictoryConditions) -> Box<dyn Strategy> {
    match kind {
        StrategyKind::Random => Box::new(RandomStrategy::new()),
        StrategyKind::Defensive => Box::new(DefensiveStrategy::new(victory)),
        StrategyKind::Aggressive => Box::new(AggressiveStrategy::new(victory)),
        StrategyKind::Minimax => Box::new(MinimaxStrategy::new(victory)),
        StrategyKind::Strategic => Box::new(StrategicStrategy::new(victory)),
    }
}

/// Builds the strategy named by `name` (`"random"`, `"defensive"`,
/// `"aggressive"`, `"minimax"`, `"strategic"`).
pub fn create_by_name(
    name: &str,
    victory: VictoryConditions,
) -> Result<Box<dyn Strategy>, UnknownStrategy> {
    let kind = StrategyKind::from_str(name).map_err(|_| UnknownStrategy {
        requested: name.to_string(),
    })?;
    Ok(create(kind, victory))
}

/// Maps a player type to its difficulty-appropriate strategy:
/// easy plays random, medium defensive, hard minimax. Humans get no
/// strategy.
pub fn for_player_type(
    player_type: PlayerType,
    victory: VictoryConditions,
) -> Option<Box<dyn Strategy>> {
    let kind = match player_type {
        PlayerType::Human => return None,
        PlayerType::AiEasy => StrategyKind::Random,
        PlayerType::AiMedium => StrategyKind::Defensive,
        PlayerType::AiHard => StrategyKind::Minimax,
    };
    Some(create(kind, victory))
}
