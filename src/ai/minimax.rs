//! Exhaustive minimax search.

use super::Strategy;
use crate::action::Move;
use crate::player::Player;
use crate::rules::VictoryConditions;
use crate::types::{Board, Mark, Position};
use tracing::instrument;

/// Optimal play by full-depth search.
///
/// Terminal scores are depth-adjusted — `10 - depth` for an own win,
/// `depth - 10` for an opponent win, `0` for a draw — so the search
/// prefers the fastest win and the slowest loss. On a 3x3 board the
/// whole tree is at most 9 plies; no pruning is needed.
#[derive(Debug)]
pub struct MinimaxStrategy {
    victory: VictoryConditions,
}

impl MinimaxStrategy {
    /// Creates the strategy.
    pub fn new(victory: VictoryConditions) -> Self {
        Self { victory }
    }

    fn minimax(&self, board: &Board, depth: i32, maximizing: bool, mark: Mark) -> i32 {
        if let Some(winner) = self.victory.winner(board) {
            return if winner == mark { 10 - depth } else { depth - 10 };
        }
        if board.is_full() {
            return 0;
        }

        let to_place = if maximizing { mark } else { mark.opponent() };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for position in board.empty_positions() {
            let mut sim = board.clone();
            sim.place(Move::new(position, to_place));
            let score = self.minimax(&sim, depth + 1, !maximizing, mark);
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }
}

impl Strategy for MinimaxStrategy {
    /// Ties between equally scored moves go to the first found in
    /// row-major order, for reproducibility.
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
            let mut sim = board.clone();
            sim.place(Move::new(position, mark));
            let score = self.minimax(&sim, 0, false, mark);
            if score > best_score {
                best_score = score;
                best_move = position;
            }
        }
        Some(best_move)
    }

    fn name(&self) -> &'static str {
        "minimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerType;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    fn board_with(marks: &[(usize, usize, Mark)]) -> Board {
        let mut board = Board::new();
        for (row, col, mark) in marks {
            assert!(board.place(Move::new(pos(*row, *col), *mark)));
        }
        board
    }

    fn ai_player(mark: Mark) -> Player {
        let mut player = Player::new("search", PlayerType::AiHard).unwrap();
        player.assign_mark(mark).unwrap();
        player
    }

    #[test]
    fn test_takes_immediate_win() {
        // X can win at (0,2) right now.
        let board = board_with(&[
            (0, 0, Mark::X),
            (0, 1, Mark::X),
            (1, 0, Mark::O),
            (1, 1, Mark::O),
        ]);
        let mut strategy = MinimaxStrategy::new(VictoryConditions::new());
        assert_eq!(
            strategy.select_move(&board, &ai_player(Mark::X)),
            Some(pos(0, 2))
        );
    }

    #[test]
    fn test_blocks_forced_loss() {
        // O must block X's open row at (0,2).
        let board = board_with(&[
            (0, 0, Mark::X),
            (1, 1, Mark::O),
            (0, 1, Mark::X),
        ]);
        let mut strategy = MinimaxStrategy::new(VictoryConditions::new());
        assert_eq!(
            strategy.select_move(&board, &ai_player(Mark::O)),
            Some(pos(0, 2))
        );
    }

    #[test]
    fn test_prefers_fastest_win() {
        // X to move, X already holds (0,0), (0,1), (2,0), (2,1):
        // (0,2) and (2,2) both win immediately; slower wins also exist.
        // The immediate win at depth 0 scores 10 and must be chosen,
        // first-found in row-major order: (0,2).
        let board = board_with(&[
            (0, 0, Mark::X),
            (0, 1, Mark::X),
            (2, 0, Mark::X),
            (2, 1, Mark::X),
            (1, 0, Mark::O),
            (1, 1, Mark::O),
        ]);
        let mut strategy = MinimaxStrategy::new(VictoryConditions::new());
        assert_eq!(
            strategy.select_move(&board, &ai_player(Mark::X)),
            Some(pos(0, 2))
        );
    }

    #[test]
    fn test_unassigned_player_gets_no_move() {
        let board = Board::new();
        let player = Player::new("idle", PlayerType::AiHard).unwrap();
        let mut strategy = MinimaxStrategy::new(VictoryConditions::new());
        assert_eq!(strategy.select_move(&board, &player), None);
    }
}
