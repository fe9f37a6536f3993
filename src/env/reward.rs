//! Reward shaping for externally driven seats.
//!
//! Rewards are summed per ply:
//!
//! | Event                                  | Default |
//! |----------------------------------------|---------|
//! | Rejected or missing decision           | -1.0    |
//! | No legal move for the roll             | -0.1    |
//! | Pawn moved closer to the centre        | +1.5    |
//! | Pawn reached home                      | +5.0    |
//! | Landed on a safe cell                  | +1.0    |
//! | Captured an opponent                   | +2.0    |
//! | Won the game                           | +10.0   |
//! | Landed where an opponent can hit next  | -0.8    |

use serde::{Deserialize, Serialize};

use crate::board::{path, Cell};
use crate::core::{GameState, MoveOutcome, PlayerId};

/// Reward weights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub invalid_action: f32,
    pub no_move: f32,
    pub progress: f32,
    pub reached_home: f32,
    pub safe_landing: f32,
    pub capture: f32,
    pub win: f32,
    pub threatened: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            invalid_action: -1.0,
            no_move: -0.1,
            progress: 1.5,
            reached_home: 5.0,
            safe_landing: 1.0,
            capture: 2.0,
            win: 10.0,
            threatened: -0.8,
        }
    }
}

impl RewardConfig {
    /// All weights zero.
    #[must_use]
    pub fn sparse() -> Self {
        Self {
            invalid_action: 0.0,
            no_move: 0.0,
            progress: 0.0,
            reached_home: 0.0,
            safe_landing: 0.0,
            capture: 0.0,
            win: 0.0,
            threatened: 0.0,
        }
    }

    /// Set the win bonus.
    #[must_use]
    pub fn with_win(mut self, win: f32) -> Self {
        self.win = win;
        self
    }

    /// Set the penalty for a rejected decision.
    #[must_use]
    pub fn with_invalid_action(mut self, penalty: f32) -> Self {
        self.invalid_action = penalty;
        self
    }

    /// Reward for an applied move, evaluated on the state after the move.
    ///
    /// `faces` are the rolls opponents could make next.
    #[must_use]
    pub fn for_move(&self, outcome: &MoveOutcome, after: &GameState, faces: &[u8]) -> f32 {
        let mv = &outcome.mv;
        let mut reward = 0.0;

        if let Some(origin) = path(outcome.player).cell(mv.from) {
            if mv.destination.manhattan(Cell::GOAL) < origin.manhattan(Cell::GOAL) {
                reward += self.progress;
            }
        }
        if outcome.reached_goal {
            reward += self.reached_home;
        }
        if mv.lands_safe() {
            reward += self.safe_landing;
        }
        if outcome.captured_any() {
            reward += self.capture;
        }
        if outcome.won {
            reward += self.win;
        }
        if !outcome.reached_goal && is_threatened(after, outcome.player, mv.destination, faces) {
            reward += self.threatened;
        }
        reward
    }
}

/// Whether some opponent pawn could capture on `cell` with one roll.
#[must_use]
pub fn is_threatened(state: &GameState, player: PlayerId, cell: Cell, faces: &[u8]) -> bool {
    if cell.is_safe() {
        return false;
    }
    player.others().any(|opponent| {
        let route = path(opponent);
        state.player(opponent).active_pawns().any(|(_, index)| {
            faces
                .iter()
                .any(|&face| route.cell(index + usize::from(face)) == Some(cell))
        })
    })
}
