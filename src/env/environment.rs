//! Episode driver with a reset/observe/step surface.
//!
//! One `step` is one ply for whichever seat is to move. Heuristic seats
//! pick their own move and ignore the action; an `External` seat's action
//! is the index of the pawn to move. A missing or unusable action forfeits
//! the ply instead of failing the episode.
//!
//! ```
//! use ashtachamma::env::{EnvConfig, Environment};
//!
//! let mut env = Environment::new(EnvConfig::default(), 7).unwrap();
//! let obs = env.reset(Some(11));
//! assert_eq!(obs.ply, 0);
//!
//! let step = env.step(Some(0)).unwrap();
//! assert_eq!(step.player.index(), 0);
//! assert!(!step.terminated);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{info, warn};

use crate::core::{
    ConfigError, GameRng, Move, PlayerId, PlayerMap, PlyEvent, Result, RuleError, SkipReason,
};
use crate::rules::{Ashtachamma, GameResult, Ply, RulesEngine, TurnController, TurnStart};
use crate::strategy::Strategy;

use super::config::EnvConfig;
use super::observation::Observation;

/// What one `step` produced.
#[derive(Clone, Debug)]
pub struct StepResult {
    /// State after the ply.
    pub observation: Observation,
    /// Reward for the seat that acted; zero for heuristic seats.
    pub reward: f32,
    /// The game ended with a result.
    pub terminated: bool,
    /// The ply limit was hit before a result.
    pub truncated: bool,
    /// Seat that held the ply.
    pub player: PlayerId,
    /// The finished ply.
    pub ply: Ply,
    /// Why an external decision was refused, if it was.
    pub error: Option<RuleError>,
}

impl StepResult {
    /// Whether the episode is over either way.
    #[must_use]
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.ply.result.and_then(|result| result.winner())
    }
}

/// Summary of a finished episode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub seed: u64,
    pub result: Option<GameResult>,
    pub plies: u32,
    pub truncated: bool,
    pub scores: PlayerMap<usize>,
}

/// A game plus seat strategies, rewards, and episode bookkeeping.
#[derive(Clone, Debug)]
pub struct Environment {
    config: EnvConfig,
    game: TurnController<Ashtachamma>,
    faces: SmallVec<[u8; 8]>,
    seeds: GameRng,
    strategy_rng: GameRng,
    episode_seed: u64,
}

impl Environment {
    /// Build an environment. `seed` drives the stream of episode seeds.
    pub fn new(config: EnvConfig, seed: u64) -> std::result::Result<Self, ConfigError> {
        let rules = Ashtachamma::new(config.game.clone())?;
        let faces = rules.dice().possible_faces().collect();
        let mut seeds = GameRng::new(seed).for_context("episodes");
        let episode_seed = seeds.next_seed();
        Ok(Self {
            config,
            game: TurnController::new(rules, episode_seed),
            faces,
            seeds,
            strategy_rng: GameRng::new(episode_seed).for_context("strategy"),
            episode_seed,
        })
    }

    /// Start a new episode.
    ///
    /// `None` takes the next seed from the environment's seed stream.
    pub fn reset(&mut self, seed: Option<u64>) -> Observation {
        let seed = seed.unwrap_or_else(|| self.seeds.next_seed());
        self.episode_seed = seed;
        self.game.reset(seed);
        self.strategy_rng = GameRng::new(seed).for_context("strategy");
        info!(seed, "episode reset");
        self.observe()
    }

    /// Snapshot of the current game.
    #[must_use]
    pub fn observe(&self) -> Observation {
        Observation::capture(&self.game)
    }

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// The underlying turn controller.
    #[must_use]
    pub fn game(&self) -> &TurnController<Ashtachamma> {
        &self.game
    }

    /// Seed of the running episode.
    #[must_use]
    pub fn episode_seed(&self) -> u64 {
        self.episode_seed
    }

    /// Strategy of the seat to move.
    #[must_use]
    pub fn current_seat(&self) -> Strategy {
        self.config.seat(self.game.current_player())
    }

    /// Whether the ply limit was reached without a result.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        !self.game.is_terminal() && self.game.state().ply >= self.config.max_plies
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.game.is_terminal() || self.is_truncated()
    }

    /// Which pawns of the seat to move would have a legal move for `roll`.
    #[must_use]
    pub fn action_mask(&self, roll: u8) -> SmallVec<[bool; 4]> {
        let state = self.game.state();
        let player = state.current;
        let moves = self.game.rules().legal_moves(state, player, roll);
        (0..state.player(player).pawn_count())
            .map(|pawn| moves.iter().any(|m| m.pawn == pawn))
            .collect()
    }

    /// Play one ply for the seat to move.
    ///
    /// Fails with [`RuleError::GameOver`] once the episode is done.
    pub fn step(&mut self, action: Option<usize>) -> Result<StepResult> {
        self.advance(action, false)
    }

    /// Step heuristic seats until an external seat is to move or the
    /// episode ends. Returns the plies played.
    pub fn step_until_external(&mut self) -> Result<Vec<StepResult>> {
        let mut steps = Vec::new();
        while !self.is_done() && !self.current_seat().is_external() {
            steps.push(self.advance(None, false)?);
        }
        Ok(steps)
    }

    /// Run the episode to the end. External seats play randomly.
    pub fn play_out(&mut self) -> Result<EpisodeSummary> {
        while !self.is_done() {
            self.advance(None, true)?;
        }
        Ok(self.summary())
    }

    /// Summary of the current episode so far.
    #[must_use]
    pub fn summary(&self) -> EpisodeSummary {
        let state = self.game.state();
        EpisodeSummary {
            seed: self.episode_seed,
            result: self.game.result(),
            plies: state.ply,
            truncated: self.is_truncated(),
            scores: state.players().map(|_, seat| seat.score()),
        }
    }

    fn advance(&mut self, action: Option<usize>, autoplay: bool) -> Result<StepResult> {
        if self.is_done() {
            return Err(RuleError::GameOver);
        }

        let player = self.game.current_player();
        let mut seat = self.config.seat(player);
        if autoplay && seat.is_external() {
            seat = Strategy::Random;
        }

        let (ply, error) = match self.game.roll()? {
            TurnStart::Skipped(ply) => (ply, None),
            TurnStart::Choose { moves, .. } => self.decide(player, seat, &moves, action)?,
        };

        let reward = if seat.is_external() {
            self.reward_for(&ply)
        } else {
            0.0
        };

        Ok(StepResult {
            observation: self.observe(),
            reward,
            terminated: ply.result.is_some(),
            truncated: self.is_truncated(),
            player,
            ply,
            error,
        })
    }

    fn decide(
        &mut self,
        player: PlayerId,
        seat: Strategy,
        moves: &[Move],
        action: Option<usize>,
    ) -> Result<(Ply, Option<RuleError>)> {
        let played = match seat.select(player, moves, action, &mut self.strategy_rng) {
            Ok(Some(mv)) => self.game.play(&mv),
            Ok(None) => self.game.forfeit(),
            // The strategy only sees the move list; the rules say why.
            Err(RuleError::InvalidMove { pawn, .. }) => Err(self.game.explain_refusal(pawn)),
            Err(err) => Err(err),
        };

        match played {
            Ok(ply) => Ok((ply, None)),
            Err(err) if err.is_invalid_move() => {
                warn!(%player, error = %err, "decision rejected, forfeiting ply");
                let ply = self.game.forfeit()?;
                Ok((ply, Some(err)))
            }
            Err(err) => Err(err),
        }
    }

    fn reward_for(&self, ply: &Ply) -> f32 {
        let rewards = &self.config.rewards;
        match &ply.record.event {
            PlyEvent::Skipped(SkipReason::NoLegalMoves) => rewards.no_move,
            PlyEvent::Skipped(SkipReason::Forfeit) => rewards.invalid_action,
            PlyEvent::Moved(outcome) => rewards.for_move(outcome, self.game.state(), &self.faces),
        }
    }
}
