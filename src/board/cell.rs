//! Board coordinates and the fixed cell tables.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Side length of the square board.
pub const BOARD_SIZE: u8 = 9;

/// A `(row, col)` coordinate on the 9x9 grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    /// The shared centre cell every path ends on.
    pub const GOAL: Cell = Cell::new(4, 4);

    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Whether captures are forbidden on this cell.
    #[must_use]
    pub fn is_safe(self) -> bool {
        SAFE_CELLS.contains(&self)
    }

    /// The seat whose home cell this is, if any.
    #[must_use]
    pub fn home_of(self) -> Option<PlayerId> {
        HOME_CELLS
            .iter()
            .position(|&home| home == self)
            .map(|i| PlayerId(i as u8))
    }

    /// Manhattan distance between two cells.
    #[must_use]
    pub fn manhattan(self, other: Cell) -> u8 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Whether the coordinate lies on the 9x9 grid.
    #[must_use]
    pub fn is_on_board(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cells marked with a cross. No capture may happen here.
pub const SAFE_CELLS: [Cell; 9] = [
    Cell::new(1, 4),
    Cell::new(2, 2),
    Cell::new(2, 6),
    Cell::new(4, 1),
    Cell::new(4, 4),
    Cell::new(4, 7),
    Cell::new(6, 2),
    Cell::new(6, 6),
    Cell::new(7, 4),
];

/// Home cells in seat order. Each is index 0 of its owner's path.
pub const HOME_CELLS: [Cell; 4] = [
    Cell::new(0, 4),
    Cell::new(4, 0),
    Cell::new(8, 4),
    Cell::new(4, 8),
];
