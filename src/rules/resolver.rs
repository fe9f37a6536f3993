//! Move resolution: captures, advancement, and scoring.
//!
//! ## Order of Effects
//!
//! 1. The move is regenerated from the current state and compared with the
//!    one submitted. Any difference is refused.
//! 2. On an unsafe destination every opponent pawn there returns to its
//!    home cell (path index 0).
//! 3. The pawn advances. On the goal it leaves the board and scores.
//! 4. The acting seat's capture flag is set if anything was captured.
//!
//! Nothing is written until step 1 succeeds.

use smallvec::SmallVec;
use tracing::{debug, info};

use crate::core::{
    Capture, GameConfig, GameState, InvalidMoveReason, Move, MoveOutcome, PlayerId, Result,
    RuleError,
};

use super::movegen;
use super::occupancy::Occupancy;

/// Apply `mv` for `player`.
pub fn apply_move(
    config: &GameConfig,
    state: &mut GameState,
    player: PlayerId,
    mv: &Move,
) -> Result<MoveOutcome> {
    let occupancy = Occupancy::from_state(state);
    let expected = movegen::check_move(state, &occupancy, player, mv.pawn, mv.roll)?;
    if expected != *mv {
        return Err(RuleError::InvalidMove {
            player,
            pawn: mv.pawn,
            reason: InvalidMoveReason::NotLegal,
        });
    }

    let mut captured: SmallVec<[Capture; 1]> = SmallVec::new();
    if expected.captures {
        let victims: SmallVec<[(PlayerId, usize); 2]> =
            occupancy.opponents_at(expected.destination, player).collect();
        for (victim, pawn) in victims {
            let from = state.player(victim).position(pawn).unwrap_or(0);
            state.player_mut(victim).move_pawn(pawn, 0);
            info!(%player, %victim, pawn, cell = %expected.destination, "captured pawn");
            captured.push(Capture { player: victim, pawn, from });
        }
    }

    let seat = state.player_mut(player);
    seat.captured = !captured.is_empty();
    seat.move_pawn(expected.pawn, expected.to);
    debug!(%player, mv = %expected, "moved pawn");

    let reached_goal = expected.reaches_goal();
    if reached_goal {
        seat.bring_home(expected.pawn);
        info!(%player, pawn = expected.pawn, score = seat.score(), "pawn reached home");
    }

    let score = seat.score();
    Ok(MoveOutcome {
        player,
        mv: expected,
        captured,
        reached_goal,
        score,
        won: score >= config.win_threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, GOAL_INDEX};

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    fn only_move(state: &GameState, player: PlayerId, roll: u8) -> Move {
        let moves = movegen::legal_moves(state, player, roll);
        assert_eq!(moves.len(), 1, "expected exactly one move, got {moves:?}");
        moves[0]
    }

    #[test]
    fn test_capture_sends_opponent_home() {
        let config = GameConfig::default().with_pawns(1).with_win_threshold(1);
        let mut state = GameState::new(1, 0);
        state.set_pawn(p(0), 0, Some(2));
        state.set_pawn(p(2), 0, Some(16));

        let mv = only_move(&state, p(0), 2);
        let outcome = apply_move(&config, &mut state, p(0), &mv).unwrap();

        assert!(outcome.captured_any());
        assert_eq!(outcome.captured[0], Capture { player: p(2), pawn: 0, from: 16 });
        assert_eq!(state.player(p(2)).position(0), Some(0));
        assert_eq!(state.cell_of(p(0), 0), Some(Cell::new(1, 1)));
        assert!(state.player(p(0)).captured);
    }

    #[test]
    fn test_capture_takes_every_opponent_on_the_cell() {
        let config = GameConfig::default();
        let mut state = GameState::new(4, 0);
        // (1,1): seat 0 index 4, seat 2 index 16, seat 3 index 10.
        state.set_pawn(p(0), 0, Some(3));
        state.set_pawn(p(2), 1, Some(16));
        state.set_pawn(p(3), 2, Some(10));

        let mv = movegen::legal_moves(&state, p(0), 1)
            .into_iter()
            .find(|m| m.pawn == 0)
            .unwrap();
        let outcome = apply_move(&config, &mut state, p(0), &mv).unwrap();

        assert_eq!(outcome.captured.len(), 2);
        assert_eq!(state.player(p(2)).position(1), Some(0));
        assert_eq!(state.player(p(3)).position(2), Some(0));
    }

    #[test]
    fn test_safe_cell_coexistence() {
        let config = GameConfig::default().with_pawns(1).with_win_threshold(1);
        let mut state = GameState::new(1, 0);
        state.set_pawn(p(1), 0, Some(9));
        state.set_pawn(p(3), 0, Some(1));

        let mv = only_move(&state, p(1), 4);
        let outcome = apply_move(&config, &mut state, p(1), &mv).unwrap();

        assert!(!outcome.captured_any());
        assert_eq!(state.cell_of(p(1), 0), Some(Cell::new(4, 7)));
        assert_eq!(state.cell_of(p(3), 0), Some(Cell::new(4, 7)));
        assert!(!state.player(p(1)).captured);
    }

    #[test]
    fn test_reaching_goal_scores_and_wins_at_threshold() {
        let config = GameConfig::default().with_pawns(2).with_win_threshold(1);
        let mut state = GameState::new(2, 0);
        state.set_pawn(p(0), 1, Some(GOAL_INDEX - 3));

        let mv = movegen::legal_moves(&state, p(0), 3)
            .into_iter()
            .find(|m| m.pawn == 1)
            .unwrap();
        let outcome = apply_move(&config, &mut state, p(0), &mv).unwrap();

        assert!(outcome.reached_goal);
        assert!(outcome.won);
        assert_eq!(outcome.score, 1);
        assert_eq!(state.player(p(0)).position(1), None);
    }

    #[test]
    fn test_stale_move_is_refused_without_changes() {
        let config = GameConfig::default();
        let mut state = GameState::new(4, 0);
        let mut mv = only_move(&GameState::new(1, 0), p(0), 2);
        mv.captures = true;

        let before = state.players().clone();
        let err = apply_move(&config, &mut state, p(0), &mv).unwrap_err();
        assert_eq!(
            err,
            RuleError::InvalidMove { player: p(0), pawn: 0, reason: InvalidMoveReason::NotLegal }
        );
        assert_eq!(state.players(), &before);
    }
}
