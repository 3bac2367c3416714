//! Attack-first move selection.

use super::Strategy;
use crate::action::Move;
use crate::player::Player;
use crate::rules::VictoryConditions;
use crate::types::{Board, Mark, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::instrument;

/// Priority order: win, build a fork, block, create a threat, then the
/// defensive positional preferences.
#[derive(Debug)]
pub struct AggressiveStrategy {
    victory: VictoryConditions,
    rng: StdRng,
}

impl AggressiveStrategy {
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

    /// First open position whose placement leaves at least one threat,
    /// in row-major order. Simulates on clones only.
    fn threat_creating_move(&self, board: &Board, mark: Mark) -> Option<Position> {
        board.empty_positions().into_iter().find(|position| {
            let mut sim = board.clone();
            sim.place(Move::new(*position, mark)) && !self.victory.threats(&sim, mark).is_empty()
        })
    }

    fn pick(&mut self, candidates: &[Position]) -> Position {
        candidates[self.rng.random_range(0..candidates.len())]
    }
}

impl Strategy for AggressiveStrategy {
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
        // 2. Build a fork.
        if let Some(fork) = self.victory.fork_positions(board, mark).first() {
            return Some(*fork);
        }
        // 3. Block the opponent's win.
        if let Some(block) = self.victory.threats(board, mark.opponent()).first() {
            return Some(*block);
        }
        // 4. Force a response.
        if let Some(threat) = self.threat_creating_move(board, mark) {
            return Some(threat);
        }
        // 5. Center.
        if board.is_empty(Position::CENTER) {
            return Some(Position::CENTER);
        }
        // 6. Any open corner.
        let corners: Vec<Position> = Position::CORNERS
            .into_iter()
            .filter(|corner| board.is_empty(*corner))
            .collect();
        if !corners.is_empty() {
            return Some(self.pick(&corners));
        }
        // 7. Anything left.
        Some(self.pick(&open))
    }

    fn name(&self) -> &'static str {
        "aggressive"
    }
}
