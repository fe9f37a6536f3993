//! Observation snapshots and their encodings.
//!
//! ## Tensor layout
//!
//! `to_tensor` produces `TENSOR_LEN` floats. Seats are rotated so the
//! perspective seat comes first. Per seat, `FEATURES_PER_SEAT` values:
//!
//! - For each of `MAX_PAWNS` slots: progress along the path (`index / 49`,
//!   1.0 once home) and a home flag. Unused slots stay zero.
//! - Capture flag
//! - Score as a fraction of `MAX_PAWNS`
//! - Whether this seat is to move
//!
//! Followed by the last roll scaled by `MAX_FACE` and a terminal flag.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{path, Cell, BOARD_SIZE, GOAL_INDEX};
use crate::core::{PlayerId, PlayerMap, MAX_FACE, MAX_PAWNS, PLAYER_COUNT};
use crate::rules::{GameResult, Phase, RulesEngine, TurnController};

/// Floats per seat in the tensor encoding.
pub const FEATURES_PER_SEAT: usize = MAX_PAWNS * 2 + 3;

/// Length of [`Observation::to_tensor`].
pub const TENSOR_LEN: usize = PLAYER_COUNT * FEATURES_PER_SEAT + 2;

/// Coarse phase label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    AwaitingRoll,
    AwaitingMoveChoice,
    Terminal,
}

impl From<&Phase> for PhaseKind {
    fn from(phase: &Phase) -> Self {
        match phase {
            Phase::AwaitingRoll => PhaseKind::AwaitingRoll,
            Phase::AwaitingMoveChoice { .. } => PhaseKind::AwaitingMoveChoice,
            Phase::Terminal(_) => PhaseKind::Terminal,
        }
    }
}

/// Everything visible about a game at one moment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub current_player: PlayerId,
    pub phase: PhaseKind,
    pub last_roll: Option<u8>,
    /// Path index per pawn, `None` once home.
    pub positions: PlayerMap<SmallVec<[Option<usize>; 4]>>,
    /// Cell per pawn, `None` once home.
    pub cells: PlayerMap<SmallVec<[Option<Cell>; 4]>>,
    /// Whether each seat captured during the most recent ply.
    pub captured: PlayerMap<bool>,
    pub scores: PlayerMap<usize>,
    pub ply: u32,
    pub result: Option<GameResult>,
}

impl Observation {
    /// Snapshot a running game. Never mutates it.
    #[must_use]
    pub fn capture<E: RulesEngine>(game: &TurnController<E>) -> Self {
        let state = game.state();
        let players = state.players();
        Self {
            current_player: state.current,
            phase: PhaseKind::from(game.phase()),
            last_roll: state.last_roll,
            positions: players.map(|_, seat| SmallVec::from_slice(seat.pawns())),
            cells: players.map(|player, seat| {
                seat.pawns()
                    .iter()
                    .map(|pos| pos.and_then(|index| path(player).cell(index)))
                    .collect()
            }),
            captured: players.map(|_, seat| seat.captured),
            scores: players.map(|_, seat| seat.score()),
            ply: state.ply,
            result: game.result(),
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.result.is_some()
    }

    /// 9x9 grid holding `seat + 1` on occupied cells, 0 elsewhere.
    ///
    /// Where seats share a (safe) cell the higher seat wins. Cells off the
    /// board, which only a hand-edited snapshot can hold, are skipped.
    #[must_use]
    pub fn board_grid(&self) -> [[u8; BOARD_SIZE as usize]; BOARD_SIZE as usize] {
        let mut grid = [[0u8; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        for (player, cells) in self.cells.iter() {
            for cell in cells.iter().flatten().filter(|cell| cell.is_on_board()) {
                grid[cell.row as usize][cell.col as usize] = player.0 + 1;
            }
        }
        grid
    }

    /// Flat features from `perspective`'s point of view.
    #[must_use]
    pub fn to_tensor(&self, perspective: PlayerId) -> Vec<f32> {
        let mut tensor = vec![0.0f32; TENSOR_LEN];

        let seats = std::iter::once(perspective).chain(perspective.others());
        for (slot, player) in seats.enumerate() {
            let base = slot * FEATURES_PER_SEAT;

            for (pawn, pos) in self.positions[player].iter().take(MAX_PAWNS).enumerate() {
                let (progress, home) = match pos {
                    Some(index) => (*index as f32 / GOAL_INDEX as f32, 0.0),
                    None => (1.0, 1.0),
                };
                tensor[base + pawn * 2] = progress;
                tensor[base + pawn * 2 + 1] = home;
            }

            let tail = base + MAX_PAWNS * 2;
            tensor[tail] = if self.captured[player] { 1.0 } else { 0.0 };
            tensor[tail + 1] = self.scores[player] as f32 / MAX_PAWNS as f32;
            tensor[tail + 2] = if self.current_player == player { 1.0 } else { 0.0 };
        }

        let globals = PLAYER_COUNT * FEATURES_PER_SEAT;
        tensor[globals] = f32::from(self.last_roll.unwrap_or(0)) / f32::from(MAX_FACE);
        tensor[globals + 1] = if self.is_terminal() { 1.0 } else { 0.0 };
        tensor
    }
}
