//! Move generation.
//!
//! A pawn at path index `i` with roll `r` targets index `i + r` on its
//! owner's path. The target is refused when it lies past the goal or when
//! another pawn of the same seat already stands there. A target holding
//! opponents on an unsafe cell is a capture.

use crate::board::{path, GOAL_INDEX};
use crate::core::{InvalidMoveReason, Move, MoveList, PlayerId, Result, RuleError};
use crate::core::GameState;

use super::occupancy::Occupancy;

/// Resolve one pawn against a roll.
pub fn check_move(
    state: &GameState,
    occupancy: &Occupancy,
    player: PlayerId,
    pawn: usize,
    roll: u8,
) -> Result<Move> {
    let seat = state.player(player);
    let invalid = |reason| RuleError::InvalidMove { player, pawn, reason };

    if pawn >= seat.pawn_count() {
        return Err(invalid(InvalidMoveReason::OutOfRange));
    }
    let from = seat
        .position(pawn)
        .ok_or_else(|| invalid(InvalidMoveReason::Inactive))?;

    let to = from + usize::from(roll);
    let overshoot = RuleError::OverAdvance { player, pawn, target: to };
    if to > GOAL_INDEX {
        return Err(overshoot);
    }
    let destination = path(player).cell(to).ok_or(overshoot)?;

    if occupancy.has_own(destination, player, pawn) {
        return Err(invalid(InvalidMoveReason::SelfBlocked));
    }

    let captures =
        !destination.is_safe() && occupancy.opponents_at(destination, player).next().is_some();

    Ok(Move {
        pawn,
        from,
        to,
        destination,
        roll,
        captures,
    })
}

/// Every legal move for `player`, in pawn order.
#[must_use]
pub fn legal_moves(state: &GameState, player: PlayerId, roll: u8) -> MoveList {
    let occupancy = Occupancy::from_state(state);
    (0..state.player(player).pawn_count())
        .filter_map(|pawn| check_move(state, &occupancy, player, pawn, roll).ok())
        .collect()
}

/// Whether overshoot is the only reason `player` cannot move.
///
/// True when no pawn has a legal move and at least one active pawn was
/// refused for running past the goal. Self-blocked and inactive pawns do
/// not count.
#[must_use]
pub fn blocked_by_overshoot(state: &GameState, player: PlayerId, roll: u8) -> bool {
    let occupancy = Occupancy::from_state(state);
    let mut overshoot = false;
    for pawn in 0..state.player(player).pawn_count() {
        match check_move(state, &occupancy, player, pawn, roll) {
            Ok(_) => return false,
            Err(RuleError::OverAdvance { .. }) => overshoot = true,
            Err(_) => {}
        }
    }
    overshoot
}
