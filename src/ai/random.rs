//! Uniform random move selection.

use super::Strategy;
use crate::player::Player;
use crate::types::{Board, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks uniformly among the empty positions.
#[derive(Debug)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    /// Creates the strategy with an OS-seeded generator.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates the strategy with a fixed seed, for reproducible play.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn select_move(&mut self, board: &Board, _player: &Player) -> Option<Position> {
        let open = board.empty_positions();
        if open.is_empty() {
            return None;
        }
        Some(open[self.rng.random_range(0..open.len())])
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Move;
    use crate::player::PlayerType;
    use crate::types::Mark;

    #[test]
    fn test_selects_only_legal_positions() {
        let mut board = Board::new();
        board.place(Move::new(Position::new(1, 1).unwrap(), Mark::X));
        let player = Player::new("rng", PlayerType::AiEasy).unwrap();

        let mut strategy = RandomStrategy::seeded(7);
        for _ in 0..50 {
            let position = strategy.select_move(&board, &player).unwrap();
            assert!(board.is_empty(position));
        }
    }

    #[test]
    fn test_full_board_yields_none() {
        let mut board = Board::new();
        let marks = [
            Mark::X, Mark::O, Mark::X,
            Mark::O, Mark::X, Mark::O,
            Mark::O, Mark::X, Mark::O,
        ];
        for (i, mark) in marks.into_iter().enumerate() {
            board.place(Move::new(Position::new(i / 3, i % 3).unwrap(), mark));
        }
        let player = Player::new("rng", PlayerType::AiEasy).unwrap();
        assert_eq!(RandomStrategy::seeded(1).select_move(&board, &player), None);
    }
}
