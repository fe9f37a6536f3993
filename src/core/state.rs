//! Game state: pawn positions, scores, capture flags, and ply history.
//!
//! ## PlayerState
//!
//! Per-seat data. Each pawn is either on its owner's path, stored as a path
//! index, or home (`None`) after reaching the goal. Storing indices rather
//! than cells means an active pawn can never sit off its owner's path.
//!
//! ## GameState
//!
//! Complete mutable state of one game:
//! - Per-seat `PlayerState`
//! - Whose turn it is and the last roll
//! - Ply history (persistent vector, cheap to clone)
//! - Dice RNG
//!
//! Turn phases live in the turn controller, not here.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::moves::PlyRecord;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::board::{path, Cell, PATH_LEN};

/// Per-seat state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerState {
    /// Path index per pawn; `None` once the pawn reached the goal.
    pawns: SmallVec<[Option<usize>; 4]>,

    /// Set when this seat's most recent ply captured an opponent.
    pub captured: bool,

    /// Pawns brought home.
    score: usize,
}

impl PlayerState {
    /// All pawns on the home cell (path index 0), score zero.
    #[must_use]
    pub fn new(pawn_count: usize) -> Self {
        Self {
            pawns: SmallVec::from_elem(Some(0), pawn_count),
            captured: false,
            score: 0,
        }
    }

    /// Number of pawns this seat fields.
    #[must_use]
    pub fn pawn_count(&self) -> usize {
        self.pawns.len()
    }

    /// All pawn slots.
    #[must_use]
    pub fn pawns(&self) -> &[Option<usize>] {
        &self.pawns
    }

    /// Path index of `pawn`, `None` if it is home or does not exist.
    #[must_use]
    pub fn position(&self, pawn: usize) -> Option<usize> {
        self.pawns.get(pawn).copied().flatten()
    }

    /// Iterate over `(pawn, path_index)` for pawns still on the board.
    pub fn active_pawns(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pawns
            .iter()
            .enumerate()
            .filter_map(|(pawn, pos)| pos.map(|index| (pawn, index)))
    }

    /// Whether any pawn is still on the board.
    #[must_use]
    pub fn has_active_pawn(&self) -> bool {
        self.pawns.iter().any(Option::is_some)
    }

    /// Pawns brought home so far.
    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    pub(crate) fn move_pawn(&mut self, pawn: usize, index: usize) {
        self.pawns[pawn] = Some(index);
    }

    /// Take `pawn` off the board and count it home.
    pub(crate) fn bring_home(&mut self, pawn: usize) {
        debug_assert!(self.pawns[pawn].is_some(), "pawn already home");
        self.pawns[pawn] = None;
        self.score += 1;
    }
}

/// Full game state.
#[derive(Clone, Debug)]
pub struct GameState {
    players: PlayerMap<PlayerState>,

    /// Seat whose turn it is.
    pub current: PlayerId,

    /// Most recent roll, if any ply has been rolled.
    pub last_roll: Option<u8>,

    /// Completed plies.
    pub ply: u32,

    /// Every completed ply, oldest first.
    history: Vector<PlyRecord>,

    /// Dice stream.
    pub rng: GameRng,
}

impl GameState {
    /// Create the starting position: every pawn on its home cell, seat 0 to
    /// move.
    #[must_use]
    pub fn new(pawns_per_player: usize, seed: u64) -> Self {
        Self {
            players: PlayerMap::with_value(PlayerState::new(pawns_per_player)),
            current: PlayerId::new(0),
            last_roll: None,
            ply: 0,
            history: Vector::new(),
            rng: GameRng::new(seed).for_context("dice"),
        }
    }

    /// State of one seat.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    pub(crate) fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    /// All seats.
    #[must_use]
    pub fn players(&self) -> &PlayerMap<PlayerState> {
        &self.players
    }

    /// Cell of `pawn`, resolved through its owner's path.
    #[must_use]
    pub fn cell_of(&self, player: PlayerId, pawn: usize) -> Option<Cell> {
        self.players[player]
            .position(pawn)
            .and_then(|index| path(player).cell(index))
    }

    /// Place a pawn directly, bypassing the rules.
    ///
    /// Intended for setting up positions (puzzles, tests, replays from a
    /// mid-game snapshot). `None` takes the pawn off the board without
    /// scoring it.
    ///
    /// Panics if the pawn does not exist or the index is off the path.
    pub fn set_pawn(&mut self, player: PlayerId, pawn: usize, index: Option<usize>) {
        if let Some(index) = index {
            assert!(index < PATH_LEN, "path index {index} is off the path");
        }
        let state = &mut self.players[player];
        assert!(pawn < state.pawn_count(), "{player} has no pawn {pawn}");
        state.pawns[pawn] = index;
    }

    /// Clear every seat's capture flag at the start of a ply.
    pub(crate) fn clear_capture_flags(&mut self) {
        for (_, state) in self.players.iter_mut() {
            state.captured = false;
        }
    }

    /// Record a completed ply.
    pub(crate) fn record_ply(&mut self, record: PlyRecord) {
        self.ply += 1;
        self.history.push_back(record);
    }

    /// Every completed ply, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<PlyRecord> {
        &self.history
    }
}
