//! Rules engine trait for race-game implementations.
//!
//! Implementors define:
//! - How dice are rolled
//! - What pawn moves are legal for a roll
//! - How a move changes the state
//! - When the game is over
//!
//! The turn controller drives a game through this trait and never
//! interprets board geometry itself.

use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::moves::{Move, MoveList, MoveOutcome};
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// A seat brought enough pawns home.
    Winner(PlayerId),
    /// No seat has a pawn left to move and nobody reached the threshold.
    Stalemate,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// The winning seat, if any.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Stalemate => None,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `roll_dice` draws from the state's RNG so replays stay deterministic
/// - `legal_moves` returns an empty list when the roll gives no move
/// - `apply_move` must revalidate the move against the current state
/// - `is_terminal` returns `None` while the game continues
pub trait RulesEngine {
    /// Get the game configuration.
    fn config(&self) -> &GameConfig;

    /// Build the starting position.
    fn initial_state(&self, seed: u64) -> GameState;

    /// Draw one roll from the state's dice stream.
    fn roll_dice(&self, state: &mut GameState) -> u8;

    /// Check a single pawn against a roll.
    ///
    /// Returns the resolved move, or the reason the pawn cannot move.
    fn check_move(&self, state: &GameState, player: PlayerId, pawn: usize, roll: u8)
        -> Result<Move>;

    /// All legal moves for `player` with `roll`, in pawn order.
    fn legal_moves(&self, state: &GameState, player: PlayerId, roll: u8) -> MoveList;

    /// Apply a move, returning what changed.
    ///
    /// Leaves the state untouched on error.
    fn apply_move(&self, state: &mut GameState, player: PlayerId, mv: &Move)
        -> Result<MoveOutcome>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Whether `roll` can come up on this game's dice.
    fn is_valid_roll(&self, roll: u8) -> bool {
        roll > 0
    }

    /// Whether the roll should be thrown again instead of skipping the ply.
    ///
    /// `rerolls` counts rolls already discarded this ply. The default never
    /// rerolls.
    fn should_reroll(&self, _state: &GameState, _player: PlayerId, _roll: u8, _rerolls: u32) -> bool {
        false
    }

    /// Whether `player` can still take part in the rotation.
    fn is_eligible(&self, state: &GameState, player: PlayerId) -> bool {
        state.player(player).has_active_pawn()
    }

    /// Next seat after `after` that still has an active pawn.
    ///
    /// Seats are tried in rotation order, ending with `after` itself.
    /// Returns `None` when no seat can move at all.
    fn next_eligible(&self, state: &GameState, after: PlayerId) -> Option<PlayerId> {
        after
            .others()
            .chain(std::iter::once(after))
            .find(|&p| self.is_eligible(state, p))
    }
}
