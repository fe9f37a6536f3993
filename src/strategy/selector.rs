//! Move selection policies.
//!
//! Every seat is driven by one `Strategy`. Heuristic variants are pure
//! functions of the legal-move list (plus the strategy RNG for `Random`);
//! `External` defers to a decision supplied by the caller.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, InvalidMoveReason, Move, PlayerId, Result, RuleError};

/// How a seat picks its move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Uniform over the legal moves.
    #[default]
    Random,
    /// First capturing move, else the first legal move.
    Aggressive,
    /// First move landing on a safe cell, else the first legal move.
    Defensive,
    /// The caller names a pawn.
    External,
}

impl Strategy {
    /// Every variant, in declaration order.
    pub const ALL: [Strategy; 4] = [
        Strategy::Random,
        Strategy::Aggressive,
        Strategy::Defensive,
        Strategy::External,
    ];

    /// Whether moves for this seat come from outside the engine.
    #[must_use]
    pub fn is_external(self) -> bool {
        self == Strategy::External
    }

    /// Pick one of `moves` for `player`.
    ///
    /// Returns `Ok(None)` when `moves` is empty. For `External`, `pawn` must
    /// name a pawn with a move in the list; heuristic variants ignore it.
    /// A refused pawn is reported as `NotLegal` since only the move list is
    /// visible here. `TurnController::explain_refusal` gives the precise
    /// reason.
    pub fn select(
        self,
        player: PlayerId,
        moves: &[Move],
        pawn: Option<usize>,
        rng: &mut GameRng,
    ) -> Result<Option<Move>> {
        if moves.is_empty() {
            return Ok(None);
        }

        let chosen = match self {
            Strategy::Random => rng.choose(moves).copied(),
            Strategy::Aggressive => prefer(moves, |m| m.captures),
            Strategy::Defensive => prefer(moves, Move::lands_safe),
            Strategy::External => {
                let pawn = pawn.ok_or(RuleError::MissingDecision { player })?;
                let mv = moves
                    .iter()
                    .find(|m| m.pawn == pawn)
                    .copied()
                    .ok_or(RuleError::InvalidMove {
                        player,
                        pawn,
                        reason: InvalidMoveReason::NotLegal,
                    })?;
                Some(mv)
            }
        };
        Ok(chosen)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::Random => "random",
            Strategy::Aggressive => "aggressive",
            Strategy::Defensive => "defensive",
            Strategy::External => "external",
        };
        f.write_str(name)
    }
}

/// First move matching `wanted`, falling back to the first move.
fn prefer(moves: &[Move], wanted: impl Fn(&Move) -> bool) -> Option<Move> {
    moves.iter().find(|&m| wanted(m)).or_else(|| moves.first()).copied()
}
