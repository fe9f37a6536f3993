//! Static board geometry: cells, safe squares, and per-seat paths.
//!
//! Nothing here is mutable. Pawn positions live in `core::state` as path
//! indices and are resolved to cells through [`path`].

pub mod cell;
pub mod path;

pub use cell::{Cell, BOARD_SIZE, HOME_CELLS, SAFE_CELLS};
pub use path::{path, Path, GOAL_INDEX, PATH_LEN};
