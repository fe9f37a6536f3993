//! Per-seat paths from home cell to the centre.
//!
//! Every seat walks the outer ring anticlockwise from its home cell, then
//! the inner ring clockwise, ending on [`Cell::GOAL`]. Paths of different
//! seats visit the same physical cells at different indices.

use super::cell::Cell;
use crate::core::PlayerId;

/// Number of cells on every path, home cell and goal included.
pub const PATH_LEN: usize = 50;

/// Index of the goal cell on every path.
pub const GOAL_INDEX: usize = PATH_LEN - 1;

/// An ordered, immutable sequence of cells for one seat.
#[derive(Debug, PartialEq, Eq)]
pub struct Path {
    cells: [Cell; PATH_LEN],
}

impl Path {
    /// All cells in traversal order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at `index`, if the index is on the path.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Position of `cell` on this path.
    #[must_use]
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        self.cells.iter().position(|&c| c == cell)
    }

    /// Whether `cell` lies on this path.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Home cell (index 0).
    #[must_use]
    pub fn start(&self) -> Cell {
        self.cells[0]
    }

    /// Goal cell (last index).
    #[must_use]
    pub fn goal(&self) -> Cell {
        self.cells[GOAL_INDEX]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        PATH_LEN
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Steps from `from` to `to` along this path.
    ///
    /// Negative when `to` lies behind `from`; `None` if either cell is off
    /// the path.
    #[must_use]
    pub fn distance(&self, from: Cell, to: Cell) -> Option<isize> {
        Some(self.index_of(to)? as isize - self.index_of(from)? as isize)
    }
}

/// The path walked by `player`'s pawns.
#[must_use]
pub fn path(player: PlayerId) -> &'static Path {
    &PATHS[player.index()]
}

const fn c(row: u8, col: u8) -> Cell {
    Cell::new(row, col)
}

const fn p(cells: [Cell; PATH_LEN]) -> Path {
    Path { cells }
}

static PATHS: [Path; 4] = [
    // Seat 0
    p([
        c(0, 4), c(1, 4), c(1, 3), c(1, 2), c(1, 1), c(2, 1), c(3, 1), c(4, 1), c(5, 1), c(6, 1),
        c(7, 1), c(7, 2), c(7, 3), c(7, 4), c(7, 5), c(7, 6), c(7, 7), c(6, 7), c(5, 7), c(4, 7),
        c(3, 7), c(2, 7), c(1, 7), c(1, 6), c(1, 5), c(2, 6), c(3, 6), c(4, 6), c(5, 6), c(6, 6),
        c(6, 5), c(6, 4), c(6, 3), c(6, 2), c(5, 2), c(4, 2), c(3, 2), c(2, 2), c(2, 3), c(2, 4),
        c(2, 5), c(3, 5), c(4, 5), c(5, 5), c(5, 4), c(5, 3), c(4, 3), c(3, 3), c(3, 4), c(4, 4),
    ]),
    // Seat 1
    p([
        c(4, 0), c(4, 1), c(5, 1), c(6, 1), c(7, 1), c(7, 2), c(7, 3), c(7, 4), c(7, 5), c(7, 6),
        c(7, 7), c(6, 7), c(5, 7), c(4, 7), c(3, 7), c(2, 7), c(1, 7), c(1, 6), c(1, 5), c(1, 4),
        c(1, 3), c(1, 2), c(1, 1), c(2, 1), c(3, 1), c(2, 2), c(2, 3), c(2, 4), c(2, 5), c(2, 6),
        c(3, 6), c(4, 6), c(5, 6), c(6, 6), c(6, 5), c(6, 4), c(6, 3), c(6, 2), c(5, 2), c(4, 2),
        c(3, 2), c(3, 3), c(3, 4), c(3, 5), c(4, 5), c(5, 5), c(5, 4), c(5, 3), c(4, 3), c(4, 4),
    ]),
    // Seat 2
    p([
        c(8, 4), c(7, 4), c(7, 5), c(7, 6), c(7, 7), c(6, 7), c(5, 7), c(4, 7), c(3, 7), c(2, 7),
        c(1, 7), c(1, 6), c(1, 5), c(1, 4), c(1, 3), c(1, 2), c(1, 1), c(2, 1), c(3, 1), c(4, 1),
        c(5, 1), c(6, 1), c(7, 1), c(7, 2), c(7, 3), c(6, 2), c(5, 2), c(4, 2), c(3, 2), c(2, 2),
        c(2, 3), c(2, 4), c(2, 5), c(2, 6), c(3, 6), c(4, 6), c(5, 6), c(6, 6), c(6, 5), c(6, 4),
        c(6, 3), c(5, 3), c(4, 3), c(3, 3), c(3, 4), c(3, 5), c(4, 5), c(5, 5), c(5, 4), c(4, 4),
    ]),
    // Seat 3
    p([
        c(4, 8), c(4, 7), c(3, 7), c(2, 7), c(1, 7), c(1, 6), c(1, 5), c(1, 4), c(1, 3), c(1, 2),
        c(1, 1), c(2, 1), c(3, 1), c(4, 1), c(5, 1), c(6, 1), c(7, 1), c(7, 2), c(7, 3), c(7, 4),
        c(7, 5), c(7, 6), c(7, 7), c(6, 7), c(5, 7), c(6, 6), c(6, 5), c(6, 4), c(6, 3), c(6, 2),
        c(5, 2), c(4, 2), c(3, 2), c(2, 2), c(2, 3), c(2, 4), c(2, 5), c(2, 6), c(3, 6), c(4, 6),
        c(5, 6), c(5, 5), c(5, 4), c(5, 3), c(4, 3), c(3, 3), c(3, 4), c(3, 5), c(4, 5), c(4, 4),
    ]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::cell::{HOME_CELLS, SAFE_CELLS};

    #[test]
    fn test_paths_start_home_and_end_at_goal() {
        for player in PlayerId::all() {
            let path = path(player);
            assert_eq!(path.start(), HOME_CELLS[player.index()]);
            assert_eq!(path.goal(), Cell::GOAL);
            assert_eq!(path.len(), PATH_LEN);
        }
    }

    #[test]
    fn test_paths_have_no_repeated_cells() {
        for player in PlayerId::all() {
            let cells = path(player).cells();
            for (i, cell) in cells.iter().enumerate() {
                assert_eq!(path(player).index_of(*cell), Some(i));
            }
        }
    }

    #[test]
    fn test_home_cells_are_private() {
        for player in PlayerId::all() {
            let home = path(player).start();
            for other in player.others() {
                assert!(!path(other).contains(home));
            }
        }
    }

    #[test]
    fn test_safe_cells_share_indices_across_paths() {
        for player in PlayerId::all() {
            let safe: Vec<usize> = path(player)
                .cells()
                .iter()
                .enumerate()
                .filter(|(_, c)| SAFE_CELLS.contains(c))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(safe, vec![1, 7, 13, 19, 25, 29, 33, 37, 49]);
        }
    }

    #[test]
    fn test_distance() {
        let p0 = path(PlayerId::new(0));
        assert_eq!(p0.distance(Cell::new(0, 4), Cell::new(1, 1)), Some(4));
        assert_eq!(p0.distance(Cell::new(1, 1), Cell::new(0, 4)), Some(-4));
        assert_eq!(p0.distance(Cell::new(0, 4), Cell::new(4, 0)), None);
    }

    #[test]
    fn test_shared_cell_sits_at_different_indices() {
        let cell = Cell::new(1, 1);
        assert_eq!(path(PlayerId::new(0)).index_of(cell), Some(4));
        assert_eq!(path(PlayerId::new(2)).index_of(cell), Some(16));
    }
}
