//! Move representation and the per-ply history record.
//!
//! A `Move` is fully resolved: it names the pawn, both path indices, the
//! destination cell, the roll that produced it, and whether it captures.
//! The resolver recomputes all of it before applying, so a stale `Move`
//! held across plies is rejected rather than trusted.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::board::{Cell, GOAL_INDEX};

/// A legal pawn move produced by the move generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Index of the pawn within its owner's pawns.
    pub pawn: usize,

    /// Path index before the move.
    pub from: usize,

    /// Path index after the move.
    pub to: usize,

    /// Cell at `to` on the owner's path.
    pub destination: Cell,

    /// Distance rolled.
    pub roll: u8,

    /// Whether landing here sends an opponent pawn home.
    pub captures: bool,
}

impl Move {
    /// Whether this move brings the pawn onto the goal.
    #[must_use]
    pub fn reaches_goal(&self) -> bool {
        self.to == GOAL_INDEX
    }

    /// Whether the destination is a safe cell.
    #[must_use]
    pub fn lands_safe(&self) -> bool {
        self.destination.is_safe()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "pawn {} {}->{} to {} (roll {}{})",
            self.pawn,
            self.from,
            self.to,
            self.destination,
            self.roll,
            if self.captures { ", capture" } else { "" }
        )
    }
}

/// Legal moves for one ply. A seat has at most four pawns.
pub type MoveList = SmallVec<[Move; 4]>;

/// An opponent pawn sent back to its home cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capture {
    pub player: PlayerId,
    pub pawn: usize,
    /// Path index (on the captured pawn's path) it was taken from.
    pub from: usize,
}

/// Everything an applied move changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// The acting seat.
    pub player: PlayerId,

    /// The move as applied.
    pub mv: Move,

    /// Opponent pawns sent home.
    pub captured: SmallVec<[Capture; 1]>,

    /// Whether the pawn reached the goal and left the board.
    pub reached_goal: bool,

    /// Acting seat's score after the move.
    pub score: usize,

    /// Whether the move won the game.
    pub won: bool,
}

impl MoveOutcome {
    /// Whether any opponent pawn was captured.
    #[must_use]
    pub fn captured_any(&self) -> bool {
        !self.captured.is_empty()
    }
}

/// Why a ply passed without a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    /// The roll left no legal move.
    NoLegalMoves,
    /// The seat's decision was rejected and the ply was given up.
    Forfeit,
}

/// What happened during a ply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlyEvent {
    Moved(MoveOutcome),
    Skipped(SkipReason),
}

/// A recorded ply for history tracking.
///
/// Used for:
/// - Replays and debugging
/// - Reward attribution in the environment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlyRecord {
    /// Zero-based ply counter.
    pub ply: u32,

    /// The seat that held the turn.
    pub player: PlayerId,

    /// Final roll of the ply.
    pub roll: u8,

    /// Rolls discarded under the reroll policy.
    pub rerolls: u32,

    /// What happened.
    pub event: PlyEvent,
}

impl PlyRecord {
    /// The applied move outcome, if the ply moved a pawn.
    #[must_use]
    pub fn outcome(&self) -> Option<&MoveOutcome> {
        match &self.event {
            PlyEvent::Moved(outcome) => Some(outcome),
            PlyEvent::Skipped(_) => None,
        }
    }

    /// Whether the ply passed without a move.
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self.event, PlyEvent::Skipped(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_move(to: usize) -> Move {
        Move {
            pawn: 1,
            from: to - 2,
            to,
            destination: Cell::new(1, 4),
            roll: 2,
            captures: false,
        }
    }

    #[test]
    fn test_reaches_goal() {
        assert!(sample_move(GOAL_INDEX).reaches_goal());
        assert!(!sample_move(10).reaches_goal());
    }

    #[test]
    fn test_lands_safe() {
        assert!(sample_move(3).lands_safe());
    }

    #[test]
    fn test_display() {
        assert_eq!(sample_move(3).to_string(), "pawn 1 1->3 to (1, 4) (roll 2)");
    }

    #[test]
    fn test_record_accessors() {
        let skipped = PlyRecord {
            ply: 0,
            player: PlayerId::new(0),
            roll: 8,
            rerolls: 0,
            event: PlyEvent::Skipped(SkipReason::NoLegalMoves),
        };
        assert!(skipped.is_skip());
        assert!(skipped.outcome().is_none());
    }

    #[test]
    fn test_record_serialization() {
        let record = PlyRecord {
            ply: 4,
            player: PlayerId::new(2),
            roll: 2,
            rerolls: 1,
            event: PlyEvent::Moved(MoveOutcome {
                player: PlayerId::new(2),
                mv: sample_move(3),
                captured: SmallVec::new(),
                reached_goal: false,
                score: 0,
                won: false,
            }),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: PlyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
