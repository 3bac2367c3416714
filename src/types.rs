//! Core domain types: marks, cells, positions, and the board.

use crate::action::Move;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Side length of the board. Three-in-a-row is played on a 3x3 grid.
pub const BOARD_SIZE: usize = 3;

/// A player's mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Mark X (moves first).
    X,
    /// Mark O (moves second).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Single-character symbol used by the grid projection.
    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns true if the cell holds no mark.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the occupying mark, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }

    /// Single-character symbol used by the grid projection.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Occupied(mark) => mark.symbol(),
        }
    }
}

/// Error for coordinates outside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("position ({}, {}) is outside the {}x{} board", row, col, BOARD_SIZE, BOARD_SIZE)]
pub struct InvalidPosition {
    /// Requested row.
    pub row: usize,
    /// Requested column.
    pub col: usize,
}

/// A cell coordinate on the board, 0-indexed.
///
/// Constructing a `Position` validates the coordinates, so every value of
/// this type refers to a real cell — deserialization included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct Position {
    row: usize,
    col: usize,
}

impl TryFrom<(usize, usize)> for Position {
    type Error = InvalidPosition;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        Self::new(row, col)
    }
}

impl From<Position> for (usize, usize) {
    fn from(position: Position) -> Self {
        (position.row, position.col)
    }
}

impl Position {
    /// The center cell.
    pub const CENTER: Position = Position::at(1, 1);

    /// The four corner cells, row-major.
    pub const CORNERS: [Position; 4] = [
        Position::at(0, 0),
        Position::at(0, 2),
        Position::at(2, 0),
        Position::at(2, 2),
    ];

    /// Creates a position, rejecting coordinates outside `[0, BOARD_SIZE)`.
    pub fn new(row: usize, col: usize) -> Result<Self, InvalidPosition> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(InvalidPosition { row, col });
        }
        Ok(Self { row, col })
    }

    /// Unchecked constructor for coordinates known to be in range.
    pub(crate) const fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row index.
    pub fn row(self) -> usize {
        self.row
    }

    /// Column index.
    pub fn col(self) -> usize {
        self.col
    }

    /// Returns true for the center cell.
    pub fn is_center(self) -> bool {
        self == Self::CENTER
    }

    /// Returns true for a corner cell.
    pub fn is_corner(self) -> bool {
        Self::CORNERS.contains(&self)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The 3x3 board: a grid of cells plus an append-only move log.
///
/// A cell transitions Empty -> Occupied exactly once; `place` refuses to
/// overwrite and the log never contains two moves at the same position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    grid: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    history: Vec<Move>,
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            grid: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
            history: Vec::new(),
        }
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Returns the cell at the given position.
    pub fn cell_at(&self, position: Position) -> Cell {
        self.grid[position.row()][position.col()]
    }

    /// Returns true if the cell at the given position is empty.
    pub fn is_empty(&self, position: Position) -> bool {
        self.cell_at(position).is_empty()
    }

    /// Places a move on the board.
    ///
    /// Returns `false` without mutating anything if the target cell is
    /// occupied. An occupied cell is a routine outcome every caller
    /// handles, not an error.
    pub fn place(&mut self, mv: Move) -> bool {
        if !self.is_empty(mv.position()) {
            tracing::debug!(position = %mv.position(), "cell occupied, move refused");
            return false;
        }
        self.grid[mv.position().row()][mv.position().col()] = Cell::Occupied(mv.mark());
        self.history.push(mv);
        true
    }

    /// All empty positions in row-major scan order.
    pub fn empty_positions(&self) -> Vec<Position> {
        let mut open = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let position = Position::at(row, col);
                if self.is_empty(position) {
                    open.push(position);
                }
            }
        }
        open
    }

    /// Checks for a completed line of three identical marks.
    ///
    /// Scan order is part of the contract: rows top to bottom, then
    /// columns left to right, then the main diagonal, then the
    /// anti-diagonal. The first complete line found decides the answer.
    pub fn winner(&self) -> Option<Mark> {
        for row in 0..BOARD_SIZE {
            if let Some(mark) = self.line_owner(|i| (row, i)) {
                return Some(mark);
            }
        }
        for col in 0..BOARD_SIZE {
            if let Some(mark) = self.line_owner(|i| (i, col)) {
                return Some(mark);
            }
        }
        if let Some(mark) = self.line_owner(|i| (i, i)) {
            return Some(mark);
        }
        self.line_owner(|i| (i, BOARD_SIZE - 1 - i))
    }

    fn line_owner(&self, cell: impl Fn(usize) -> (usize, usize)) -> Option<Mark> {
        let (row, col) = cell(0);
        let first = self.grid[row][col].mark()?;
        for i in 1..BOARD_SIZE {
            let (row, col) = cell(i);
            if self.grid[row][col] != Cell::Occupied(first) {
                return None;
            }
        }
        Some(first)
    }

    /// Returns true if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.grid
            .iter()
            .flatten()
            .all(|cell| !cell.is_empty())
    }

    /// Returns true once a winner exists or the board is full.
    pub fn is_game_over(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Clears the grid and the move log.
    pub fn reset(&mut self) {
        self.grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        self.history.clear();
    }

    /// The applied moves, in order.
    pub fn move_history(&self) -> &[Move] {
        &self.history
    }

    /// Number of moves applied since the last reset.
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Read-only projection of the grid as cell symbols (`' '`/`'X'`/`'O'`)
    /// for adapters to render or transmit.
    pub fn to_grid(&self) -> [[char; BOARD_SIZE]; BOARD_SIZE] {
        self.grid.map(|row| row.map(Cell::symbol))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.grid.iter().enumerate() {
            if i > 0 {
                writeln!(f, "\n-+-+-")?;
            }
            let symbols: Vec<String> = row.iter().map(|c| c.symbol().to_string()).collect();
            write!(f, "{}", symbols.join("|"))?;
        }
        Ok(())
    }
}
