//! The Ashtachamma rule set.

use tracing::debug;

use crate::core::{
    ConfigError, Dice, GameConfig, GameState, Move, MoveList, MoveOutcome, OvershootPolicy,
    PlayerId, Result,
};

use super::engine::{GameResult, RulesEngine};
use super::movegen;
use super::occupancy::Occupancy;
use super::resolver;

/// Ashtachamma rules for a validated configuration.
///
/// ```
/// use ashtachamma::core::GameConfig;
/// use ashtachamma::rules::{Ashtachamma, RulesEngine};
///
/// let rules = Ashtachamma::new(GameConfig::default()).unwrap();
/// let state = rules.initial_state(7);
/// assert_eq!(rules.legal_moves(&state, state.current, 2).len(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct Ashtachamma {
    config: GameConfig,
    dice: Dice,
}

impl Ashtachamma {
    /// Validate `config` and prepare the dice.
    pub fn new(config: GameConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let dice = Dice::new(&config.dice)?;
        Ok(Self { config, dice })
    }

    /// The prepared dice.
    #[must_use]
    pub fn dice(&self) -> &Dice {
        &self.dice
    }
}

impl RulesEngine for Ashtachamma {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn initial_state(&self, seed: u64) -> GameState {
        GameState::new(self.config.pawns_per_player, seed)
    }

    fn roll_dice(&self, state: &mut GameState) -> u8 {
        let roll = self.dice.roll(&mut state.rng);
        debug!(player = %state.current, roll, "rolled");
        roll
    }

    fn check_move(&self, state: &GameState, player: PlayerId, pawn: usize, roll: u8) -> Result<Move> {
        let occupancy = Occupancy::from_state(state);
        movegen::check_move(state, &occupancy, player, pawn, roll)
    }

    fn legal_moves(&self, state: &GameState, player: PlayerId, roll: u8) -> MoveList {
        movegen::legal_moves(state, player, roll)
    }

    fn apply_move(&self, state: &mut GameState, player: PlayerId, mv: &Move) -> Result<MoveOutcome> {
        resolver::apply_move(&self.config, state, player, mv)
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state
            .players()
            .iter()
            .find(|(_, seat)| seat.score() >= self.config.win_threshold)
            .map(|(player, _)| GameResult::Winner(player))
    }

    fn is_valid_roll(&self, roll: u8) -> bool {
        self.dice.possible_faces().any(|face| face == roll)
    }

    fn should_reroll(&self, state: &GameState, player: PlayerId, roll: u8, rerolls: u32) -> bool {
        self.config.overshoot == OvershootPolicy::Reroll
            && rerolls < self.config.max_rerolls
            && movegen::blocked_by_overshoot(state, player, roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiceKind;

    #[test]
    fn test_rejects_invalid_config() {
        let err = Ashtachamma::new(GameConfig::default().with_win_threshold(0)).unwrap_err();
        assert_eq!(err, ConfigError::WinThreshold { got: 0, pawns: 4 });
    }

    #[test]
    fn test_initial_state_uses_pawn_count() {
        let rules = Ashtachamma::new(GameConfig::default().with_pawns(2).with_win_threshold(2)).unwrap();
        let state = rules.initial_state(1);
        for player in PlayerId::all() {
            assert_eq!(state.player(player).pawn_count(), 2);
        }
        assert_eq!(rules.is_terminal(&state), None);
    }

    #[test]
    fn test_rolls_come_from_the_configured_dice() {
        let rules = Ashtachamma::new(GameConfig::default().with_dice(DiceKind::Weighted {
            faces: vec![3],
            weights: vec![1],
        }))
        .unwrap();
        let mut state = rules.initial_state(9);
        assert!((0..20).all(|_| rules.roll_dice(&mut state) == 3));
        assert!(rules.is_valid_roll(3));
        assert!(!rules.is_valid_roll(2));
    }

    #[test]
    fn test_terminal_at_threshold() {
        let rules = Ashtachamma::new(GameConfig::default().with_pawns(2).with_win_threshold(1)).unwrap();
        let mut state = rules.initial_state(1);
        let p2 = PlayerId::new(2);
        state.player_mut(p2).move_pawn(0, 49);
        state.player_mut(p2).bring_home(0);
        assert_eq!(rules.is_terminal(&state), Some(GameResult::Winner(p2)));
    }

    #[test]
    fn test_reroll_only_when_overshoot_blocks() {
        let config = GameConfig::default()
            .with_pawns(1)
            .with_win_threshold(1)
            .with_overshoot(OvershootPolicy::Reroll)
            .with_max_rerolls(2);
        let rules = Ashtachamma::new(config).unwrap();
        let mut state = rules.initial_state(1);
        let p0 = PlayerId::new(0);
        state.set_pawn(p0, 0, Some(46));

        assert!(rules.should_reroll(&state, p0, 8, 0));
        assert!(!rules.should_reroll(&state, p0, 8, 2));
        assert!(!rules.should_reroll(&state, p0, 3, 0));

        let strict = Ashtachamma::new(GameConfig::default().with_pawns(1).with_win_threshold(1)).unwrap();
        assert!(!strict.should_reroll(&state, p0, 8, 0));
    }
}
