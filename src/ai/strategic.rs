//! Weighted-heuristic move selection.

use super::Strategy;
use crate::action::Move;
use crate::player::Player;
use crate::rules::VictoryConditions;
use crate::types::{Board, Mark, Position};
use tracing::{debug, instrument};

// Decision weights, largest to smallest.
const CRITICAL: i32 = 1000;
const HIGH: i32 = 100;
const MEDIUM: i32 = 50;
const LOW: i32 = 10;
const MINIMAL: i32 = 1;

/// Scores every open cell with a weighted sum of heuristics and plays
/// the maximum.
///
/// Per cell: an immediate win and a required block each weigh CRITICAL,
/// a fork HIGH, every threat left open after the move MEDIUM, plus the
/// positional bonus (center over corner over edge), a MINIMAL bonus per
/// winning line through the cell, LOW for the first mark in an untouched
/// line, and the post-move control advantage scaled by LOW. Ties go to
/// the first cell found in row-major order — deterministic, not claimed
/// optimal.
#[derive(Debug)]
pub struct StrategicStrategy {
    victory: VictoryConditions,
}

impl StrategicStrategy {
    /// Creates the strategy.
    pub fn new(victory: VictoryConditions) -> Self {
        Self { victory }
    }

    fn evaluate_position(&self, board: &Board, position: Position, mark: Mark) -> i32 {
        let mut sim = board.clone();
        if !sim.place(Move::new(position, mark)) {
            return -CRITICAL;
        }

        let mut score = 0;

        // Winning move.
        if self.victory.winner(&sim) == Some(mark) {
            score += CRITICAL;
        }
        // Required block.
        if self.victory.threats(board, mark.opponent()).contains(&position) {
            score += CRITICAL;
        }
        // Fork opportunity.
        if self.victory.is_fork(board, position, mark) {
            score += HIGH;
        }
        // Threats left open after the move.
        score += self.victory.threats(&sim, mark).len() as i32 * MEDIUM;
        // Board geography.
        score += Self::positional_value(position);
        score += self.control_value(board, position);
        // Post-move line control.
        score += self.victory.board_control(&sim).control_advantage(mark) as i32 * LOW;

        score
    }

    fn positional_value(position: Position) -> i32 {
        if position.is_center() {
            MEDIUM
        } else if position.is_corner() {
            LOW
        } else {
            MINIMAL
        }
    }

    /// A small bonus per winning line through the cell, plus LOW when
    /// the cell would hold the first mark of an untouched line.
    fn control_value(&self, board: &Board, position: Position) -> i32 {
        let mut through = 0;
        let mut opens_fresh_line = false;
        for line in &VictoryConditions::LINES {
            if !line.cells.contains(&position) {
                continue;
            }
            through += 1;
            if line.cells.iter().all(|cell| board.is_empty(*cell)) {
                opens_fresh_line = true;
            }
        }

        let mut value = through * MINIMAL;
        if opens_fresh_line {
            value += LOW;
        }
        value
    }
}

impl Strategy for StrategicStrategy {
    #[instrument(skip(self, board, player), fields(player = %player.name()))]
    fn select_move(&mut self, board: &Board, player: &Player) -> Option<Position> {
        let mark = player.mark()?;
        let open = board.empty_positions();
        if open.is_empty() {
            return None;
        }

        let mut best_score = i32::MIN;
        let mut best_move = open[0];
        for position in open {
            let score = self.evaluate_position(board, position, mark);
            debug!(%position, score, "evaluated");
            if score > best_score {
                best_score = score;
                best_move = position;
            }
        }
        Some(best_move)
    }

    fn name(&self) -> &'static str {
        "strategic"
    }
}
