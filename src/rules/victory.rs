//! Victory detection and threat analysis.

use crate::action::Move;
use crate::types::{Board, Cell, Mark, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Orientation of a winning line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// A horizontal row.
    Row,
    /// A vertical column.
    Column,
    /// One of the two diagonals.
    Diagonal,
}

/// One of the eight fixed 3-cell sequences that can produce a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    /// Orientation of the line.
    pub kind: LineKind,
    /// The three cells, in scan order.
    pub cells: [Position; 3],
}

/// A detected win: the completed line and the mark that owns it.
///
/// Only produced by [`VictoryConditions::check_victory`]; the 3-cell
/// shape is guaranteed by the array type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VictoryPattern {
    kind: LineKind,
    cells: [Position; 3],
    winner: Mark,
}

impl VictoryPattern {
    /// Orientation of the winning line.
    pub fn kind(&self) -> LineKind {
        self.kind
    }

    /// The three winning positions.
    pub fn cells(&self) -> [Position; 3] {
        self.cells
    }

    /// The mark that completed the line.
    pub fn winner(&self) -> Mark {
        self.winner
    }
}

/// Per-side line counts summarizing who controls the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BoardControl {
    x_potential_lines: usize,
    o_potential_lines: usize,
    x_threats: usize,
    o_threats: usize,
}

impl BoardControl {
    /// Lines still winnable by the given mark.
    pub fn potential_lines(&self, mark: Mark) -> usize {
        match mark {
            Mark::X => self.x_potential_lines,
            Mark::O => self.o_potential_lines,
        }
    }

    /// Immediate winning moves open to the given mark.
    pub fn immediate_threats(&self, mark: Mark) -> usize {
        match mark {
            Mark::X => self.x_threats,
            Mark::O => self.o_threats,
        }
    }

    /// Potential-line advantage of the given mark over its opponent.
    pub fn control_advantage(&self, mark: Mark) -> i64 {
        self.potential_lines(mark) as i64 - self.potential_lines(mark.opponent()) as i64
    }

    /// Immediate-threat advantage of the given mark over its opponent.
    pub fn threat_advantage(&self, mark: Mark) -> i64 {
        self.immediate_threats(mark) as i64 - self.immediate_threats(mark.opponent()) as i64
    }
}

/// Stateless evaluator of the eight winning lines.
///
/// Every simulation method clones the board it inspects; the caller's
/// board is never mutated by evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct VictoryConditions;

impl VictoryConditions {
    /// The eight winning lines: rows top to bottom, columns left to
    /// right, main diagonal, anti-diagonal. Scan order is contractual —
    /// it decides which pattern is reported when several lines are
    /// complete at once.
    pub const LINES: [Line; 8] = [
        Line {
            kind: LineKind::Row,
            cells: [Position::at(0, 0), Position::at(0, 1), Position::at(0, 2)],
        },
        Line {
            kind: LineKind::Row,
            cells: [Position::at(1, 0), Position::at(1, 1), Position::at(1, 2)],
        },
        Line {
            kind: LineKind::Row,
            cells: [Position::at(2, 0), Position::at(2, 1), Position::at(2, 2)],
        },
        Line {
            kind: LineKind::Column,
            cells: [Position::at(0, 0), Position::at(1, 0), Position::at(2, 0)],
        },
        Line {
            kind: LineKind::Column,
            cells: [Position::at(0, 1), Position::at(1, 1), Position::at(2, 1)],
        },
        Line {
            kind: LineKind::Column,
            cells: [Position::at(0, 2), Position::at(1, 2), Position::at(2, 2)],
        },
        Line {
            kind: LineKind::Diagonal,
            cells: [Position::at(0, 0), Position::at(1, 1), Position::at(2, 2)],
        },
        Line {
            kind: LineKind::Diagonal,
            cells: [Position::at(0, 2), Position::at(1, 1), Position::at(2, 0)],
        },
    ];

    /// Creates the evaluator.
    pub fn new() -> Self {
        Self
    }

    /// Returns the first completed line in scan order, if any.
    #[instrument(skip(self, board))]
    pub fn check_victory(&self, board: &Board) -> Option<VictoryPattern> {
        for line in &Self::LINES {
            let [a, b, c] = line.cells.map(|p| board.cell_at(p));
            if let (Cell::Occupied(mark), true) = (a, a == b && b == c) {
                return Some(VictoryPattern {
                    kind: line.kind,
                    cells: line.cells,
                    winner: mark,
                });
            }
        }
        None
    }

    /// Returns true if any line is complete.
    pub fn has_winner(&self, board: &Board) -> bool {
        self.check_victory(board).is_some()
    }

    /// The winning mark, if any line is complete.
    pub fn winner(&self, board: &Board) -> Option<Mark> {
        self.check_victory(board).map(|p| p.winner())
    }

    /// The positions of the winning line, if any.
    pub fn winning_line(&self, board: &Board) -> Option<[Position; 3]> {
        self.check_victory(board).map(|p| p.cells())
    }

    /// Positions that win immediately for `mark`.
    ///
    /// A threat is the empty cell of a line already holding two of
    /// `mark` and nothing else.
    #[instrument(skip(self, board))]
    pub fn threats(&self, board: &Board, mark: Mark) -> Vec<Position> {
        let mut threats = Vec::new();
        for line in &Self::LINES {
            let cells = line.cells.map(|p| board.cell_at(p));
            let own = cells
                .iter()
                .filter(|c| **c == Cell::Occupied(mark))
                .count();
            let empty = cells.iter().filter(|c| c.is_empty()).count();
            if own == 2 && empty == 1 {
                for (cell, position) in cells.iter().zip(line.cells) {
                    if cell.is_empty() {
                        threats.push(position);
                        break;
                    }
                }
            }
        }
        threats
    }

    /// Positions where `opponent` would win next move; blocking them is
    /// mandatory.
    pub fn blocks_needed(&self, board: &Board, opponent: Mark) -> Vec<Position> {
        self.threats(board, opponent)
    }

    /// Returns true if placing `mark` at `position` leaves two or more
    /// open threats — a double attack a single block cannot answer.
    ///
    /// Simulates on a clone; the given board is untouched.
    #[instrument(skip(self, board))]
    pub fn is_fork(&self, board: &Board, position: Position, mark: Mark) -> bool {
        let mut sim = board.clone();
        if !sim.place(Move::new(position, mark)) {
            return false;
        }
        self.threats(&sim, mark).len() >= 2
    }

    /// All empty positions whose placement forks for `mark`.
    pub fn fork_positions(&self, board: &Board, mark: Mark) -> Vec<Position> {
        board
            .empty_positions()
            .into_iter()
            .filter(|position| self.is_fork(board, *position, mark))
            .collect()
    }

    /// Lines still winnable by `mark`: at least one own mark, no
    /// opponent mark.
    pub fn potential_wins(&self, board: &Board, mark: Mark) -> usize {
        Self::LINES
            .iter()
            .filter(|line| {
                let cells = line.cells.map(|p| board.cell_at(p));
                let own = cells.iter().any(|c| *c == Cell::Occupied(mark));
                let opponent = cells
                    .iter()
                    .any(|c| *c == Cell::Occupied(mark.opponent()));
                own && !opponent
            })
            .count()
    }

    /// Summarizes potential lines and immediate threats for both sides.
    pub fn board_control(&self, board: &Board) -> BoardControl {
        BoardControl {
            x_potential_lines: self.potential_wins(board, Mark::X),
            o_potential_lines: self.potential_wins(board, Mark::O),
            x_threats: self.threats(board, Mark::X).len(),
            o_threats: self.threats(board, Mark::O).len(),
        }
    }
}
