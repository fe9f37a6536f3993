//! Environment configuration.

use serde::{Deserialize, Serialize};

use crate::core::{ConfigError, GameConfig, PlayerId, PLAYER_COUNT};
use crate::strategy::Strategy;

use super::reward::RewardConfig;

/// Everything needed to build an [`Environment`](super::Environment).
///
/// ```
/// use ashtachamma::env::EnvConfig;
/// use ashtachamma::strategy::Strategy;
///
/// let config: EnvConfig = serde_json::from_str(
///     r#"{"seats": ["external", "aggressive", "aggressive", "defensive"], "max_plies": 500}"#,
/// ).unwrap();
/// assert_eq!(config.seats[1], Strategy::Aggressive);
/// assert_eq!(config.game.win_threshold, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Rules.
    pub game: GameConfig,

    /// Strategy per seat.
    pub seats: [Strategy; PLAYER_COUNT],

    /// Reward weights for external seats.
    pub rewards: RewardConfig,

    /// Plies after which an episode is truncated.
    pub max_plies: u32,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            seats: [
                Strategy::External,
                Strategy::Random,
                Strategy::Aggressive,
                Strategy::Defensive,
            ],
            rewards: RewardConfig::default(),
            max_plies: 2000,
        }
    }
}

impl EnvConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    #[must_use]
    pub fn with_seats(mut self, seats: [Strategy; PLAYER_COUNT]) -> Self {
        self.seats = seats;
        self
    }

    /// Replace the strategy of one seat.
    #[must_use]
    pub fn with_seat(mut self, player: PlayerId, strategy: Strategy) -> Self {
        self.seats[player.index()] = strategy;
        self
    }

    #[must_use]
    pub fn with_rewards(mut self, rewards: RewardConfig) -> Self {
        self.rewards = rewards;
        self
    }

    #[must_use]
    pub fn with_max_plies(mut self, max_plies: u32) -> Self {
        self.max_plies = max_plies;
        self
    }

    /// Strategy of `player`.
    #[must_use]
    pub fn seat(&self, player: PlayerId) -> Strategy {
        self.seats[player.index()]
    }

    /// Validate the game rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seating() {
        let config = EnvConfig::default();
        assert_eq!(config.seat(PlayerId::new(0)), Strategy::External);
        assert_eq!(config.seat(PlayerId::new(3)), Strategy::Defensive);
        assert_eq!(config.max_plies, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_seat() {
        let config = EnvConfig::new().with_seat(PlayerId::new(0), Strategy::Random);
        assert!(config.seats.iter().all(|s| !s.is_external()));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EnvConfig::default().with_max_plies(10);
        let json = serde_json::to_string(&config).unwrap();
        let back: EnvConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
