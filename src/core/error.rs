//! Error types for rule violations and configuration problems.

use thiserror::Error;

use super::player::PlayerId;

/// Why a pawn move was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidMoveReason {
    /// The pawn index is beyond the player's pawn count.
    OutOfRange,
    /// The pawn has already reached the goal.
    Inactive,
    /// The destination holds another pawn of the same player.
    SelfBlocked,
    /// The move does not match what the generator produces now.
    NotLegal,
}

impl std::fmt::Display for InvalidMoveReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            InvalidMoveReason::OutOfRange => "no such pawn",
            InvalidMoveReason::Inactive => "pawn is already home",
            InvalidMoveReason::SelfBlocked => "destination holds an own pawn",
            InvalidMoveReason::NotLegal => "move is not in the current legal set",
        };
        f.write_str(text)
    }
}

/// Errors raised by the rules and the turn controller.
///
/// None of these are fatal: the controller state is untouched when one is
/// returned, and callers recover by forfeiting the ply or choosing again.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("invalid move for {player} pawn {pawn}: {reason}")]
    InvalidMove {
        player: PlayerId,
        pawn: usize,
        reason: InvalidMoveReason,
    },

    #[error("choice {index} is out of range for {available} legal moves")]
    ChoiceOutOfRange { index: usize, available: usize },

    #[error("{player} is seated externally but no decision was supplied")]
    MissingDecision { player: PlayerId },

    #[error("{player} pawn {pawn} would overshoot the goal (target index {target})")]
    OverAdvance {
        player: PlayerId,
        pawn: usize,
        target: usize,
    },

    #[error("roll {0} is not a face of the configured dice")]
    InvalidRoll(u8),

    #[error("it is {current}'s turn, not {player}'s")]
    NotYourTurn { player: PlayerId, current: PlayerId },

    #[error("expected phase {expected}, found {found}")]
    WrongPhase {
        expected: &'static str,
        found: &'static str,
    },

    #[error("game is over")]
    GameOver,
}

impl RuleError {
    /// Whether this is a rejected decision (the `InvalidMove` family).
    ///
    /// Overshoot counts: a decision naming an overshooting pawn is as
    /// unusable as one naming a missing pawn.
    #[must_use]
    pub fn is_invalid_move(&self) -> bool {
        matches!(
            self,
            RuleError::InvalidMove { .. }
                | RuleError::ChoiceOutOfRange { .. }
                | RuleError::MissingDecision { .. }
                | RuleError::OverAdvance { .. }
        )
    }
}

/// Errors raised while validating a configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("pawns per player must be 1-{max}, got {got}")]
    PawnCount { got: usize, max: usize },

    #[error("win threshold must be 1-{pawns}, got {got}")]
    WinThreshold { got: usize, pawns: usize },

    #[error("dice must have at least one face")]
    NoFaces,

    #[error("dice face {0} is out of range (1-{max})", max = crate::core::dice::MAX_FACE)]
    FaceOutOfRange(u8),

    #[error("dice faces and weights differ in length ({faces} vs {weights})")]
    WeightCount { faces: usize, weights: usize },

    #[error("invalid dice weights: {0}")]
    Weights(String),
}

/// Convenience alias for rule operations.
pub type Result<T, E = RuleError> = std::result::Result<T, E>;
