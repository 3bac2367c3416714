//! Defense-first move selection.

use super::Strategy;
use crate::player::Player;
use crate::rules::VictoryConditions;
use crate::types::{Board, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::instrument;

/// Priority order: take an immediate win, block the opponent's, hold
/// the center, grab a corner, then anything.
#[derive(Debug)]
pub struct DefensiveStrategy {
    victory: VictoryConditions,
    rng: StdRng,
}

impl DefensiveStrategy {
    /// Creates the strategy.
    pub fn new(victory: VictoryConditions) -> Self {
        Self {
            victory,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates the strategy with a fixed seed, for reproducible play.
    pub fn seeded(victory: VictoryConditions, seed: u64) -> Self {
        Self {
            victory,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick(&mut self, candidates: &[Position]) -> Position {
        candidates[self.rng.random_range(0..candidates.len())]
    }
}

impl Strategy for DefensiveStrategy {
    #[instrument(skip(self, board, player), fields(player = %player.name()))]
    fn select_move(&mut self, board: &Board, player: &Player) -> Option<Position> {
        let mark = player.mark()?;
        let open = board.empty_positions();
        if open.is_empty() {
            return None;
        }

        // 1. Win now.
        if let Some(win) = self.victory.threats(board, mark).first() {
            return Some(*win);
        }
        // 2. Block the opponent's win.
        if let Some(block) = self.victory.threats(board, mark.opponent()).first() {
            return Some(*block);
        }
        // 3. Center.
        if board.is_empty(Position::CENTER) {
            return Some(Position::CENTER);
        }
        // 4. Any open corner.
        let corners: Vec<Position> = Position::CORNERS
            .into_iter()
            .filter(|corner| board.is_empty(*corner))
            .collect();
        if !corners.is_empty() {
            return Some(self.pick(&corners));
        }
        // 5. Anything left.
        Some(self.pick(&open))
    }

    fn name(&self) -> &'static str {
        "defensive"
    }
}
