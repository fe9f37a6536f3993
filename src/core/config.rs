//! Game configuration.
//!
//! The rule set is fixed except for the knobs that historically varied
//! between tables: pawn count, how many pawns must reach home to win, the
//! dice, and what happens when a roll would carry every pawn past the goal.

use serde::{Deserialize, Serialize};

use super::dice::{Dice, DiceKind};
use super::error::ConfigError;

/// Most pawns a seat can field.
pub const MAX_PAWNS: usize = 4;

/// What to do when a roll would carry a pawn past the goal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvershootPolicy {
    /// The overshooting pawn has no move this ply.
    #[default]
    Reject,
    /// Roll again while overshoot is the only thing blocking every pawn.
    Reroll,
}

/// Complete game configuration.
///
/// ```
/// use ashtachamma::core::{DiceKind, GameConfig, OvershootPolicy};
///
/// let config = GameConfig::default()
///     .with_pawns(2)
///     .with_win_threshold(2)
///     .with_dice(DiceKind::d6())
///     .with_overshoot(OvershootPolicy::Reroll);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pawns per seat (1-4).
    pub pawns_per_player: usize,

    /// Pawns a seat must bring home to win (1..=pawns_per_player).
    pub win_threshold: usize,

    /// Dice distribution.
    pub dice: DiceKind,

    /// Overshoot handling.
    pub overshoot: OvershootPolicy,

    /// Upper bound on consecutive rerolls under `OvershootPolicy::Reroll`.
    pub max_rerolls: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pawns_per_player: MAX_PAWNS,
            win_threshold: MAX_PAWNS,
            dice: DiceKind::Cowrie,
            overshoot: OvershootPolicy::Reject,
            max_rerolls: 8,
        }
    }
}

impl GameConfig {
    /// Create the default configuration (four pawns, all must reach home).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set pawns per seat.
    #[must_use]
    pub fn with_pawns(mut self, pawns: usize) -> Self {
        self.pawns_per_player = pawns;
        self
    }

    /// Set the number of pawns home needed to win.
    #[must_use]
    pub fn with_win_threshold(mut self, threshold: usize) -> Self {
        self.win_threshold = threshold;
        self
    }

    /// Set the dice distribution.
    #[must_use]
    pub fn with_dice(mut self, dice: DiceKind) -> Self {
        self.dice = dice;
        self
    }

    /// Set the overshoot policy.
    #[must_use]
    pub fn with_overshoot(mut self, policy: OvershootPolicy) -> Self {
        self.overshoot = policy;
        self
    }

    /// Set the reroll bound.
    #[must_use]
    pub fn with_max_rerolls(mut self, max: u32) -> Self {
        self.max_rerolls = max;
        self
    }

    /// Check every knob and build the dice once to validate the table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pawns_per_player == 0 || self.pawns_per_player > MAX_PAWNS {
            return Err(ConfigError::PawnCount {
                got: self.pawns_per_player,
                max: MAX_PAWNS,
            });
        }
        if self.win_threshold == 0 || self.win_threshold > self.pawns_per_player {
            return Err(ConfigError::WinThreshold {
                got: self.win_threshold,
                pawns: self.pawns_per_player,
            });
        }
        Dice::new(&self.dice)?;
        Ok(())
    }
}
