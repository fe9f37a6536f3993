//! Cell occupancy index.
//!
//! Pawns are stored as path indices per seat, but capture and blocking are
//! questions about physical cells shared between paths. `Occupancy` maps
//! each occupied cell to the pawns standing on it so those lookups do not
//! rescan every seat.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::board::{path, Cell};
use crate::core::{GameState, PlayerId};

/// Pawns on one cell. Home cells can hold a whole seat's pawns.
type Occupants = SmallVec<[(PlayerId, usize); 2]>;

/// Snapshot of which pawns stand on which cells.
#[derive(Clone, Debug, Default)]
pub struct Occupancy {
    cells: FxHashMap<Cell, Occupants>,
}

impl Occupancy {
    /// Index every active pawn in `state`.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let mut cells: FxHashMap<Cell, Occupants> = FxHashMap::default();
        for (player, seat) in state.players().iter() {
            let route = path(player);
            for (pawn, index) in seat.active_pawns() {
                if let Some(cell) = route.cell(index) {
                    cells.entry(cell).or_default().push((player, pawn));
                }
            }
        }
        Self { cells }
    }

    /// Pawns standing on `cell`.
    #[must_use]
    pub fn at(&self, cell: Cell) -> &[(PlayerId, usize)] {
        self.cells.get(&cell).map_or(&[][..], |occupants| occupants.as_slice())
    }

    /// Whether `player` has a pawn on `cell` other than `except`.
    #[must_use]
    pub fn has_own(&self, cell: Cell, player: PlayerId, except: usize) -> bool {
        self.at(cell)
            .iter()
            .any(|&(p, pawn)| p == player && pawn != except)
    }

    /// Pawns of other seats on `cell`.
    pub fn opponents_at(&self, cell: Cell, player: PlayerId) -> impl Iterator<Item = (PlayerId, usize)> + '_ {
        self.at(cell).iter().copied().filter(move |&(p, _)| p != player)
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_stacks_on_home_cells() {
        let state = GameState::new(4, 1);
        let occupancy = Occupancy::from_state(&state);

        assert_eq!(occupancy.len(), 4);
        for player in PlayerId::all() {
            let home = path(player).start();
            assert_eq!(occupancy.at(home).len(), 4);
            assert!(occupancy.has_own(home, player, 0));
            assert_eq!(occupancy.opponents_at(home, player).count(), 0);
        }
    }

    #[test]
    fn test_shared_cell_sees_both_seats() {
        let mut state = GameState::new(1, 1);
        let p0 = PlayerId::new(0);
        let p2 = PlayerId::new(2);
        state.set_pawn(p0, 0, Some(4));
        state.set_pawn(p2, 0, Some(16));

        let occupancy = Occupancy::from_state(&state);
        let cell = Cell::new(1, 1);
        assert_eq!(occupancy.at(cell).len(), 2);
        assert_eq!(occupancy.opponents_at(cell, p0).collect::<Vec<_>>(), vec![(p2, 0)]);
        assert!(!occupancy.has_own(cell, p0, 0));
    }

    #[test]
    fn test_home_pawns_are_not_indexed() {
        let mut state = GameState::new(1, 1);
        for player in PlayerId::all() {
            state.set_pawn(player, 0, None);
        }
        assert!(Occupancy::from_state(&state).is_empty());
    }
}
