//! # ashtachamma
//!
//! Rules engine and turn state machine for Ashtachamma, the four-player
//! cross-and-circle race game played on a 9x9 board with cowrie shells.
//!
//! ## Design Principles
//!
//! 1. **Plain data in, plain data out**: The engine exposes positions, legal
//!    moves, and results, and accepts chosen moves. Rendering and learning
//!    libraries stay outside.
//!
//! 2. **One rule set, explicit knobs**: Pawn count, win threshold, dice, and
//!    overshoot handling are configuration, not code paths.
//!
//! 3. **Reproducible**: Every random draw comes from a seeded ChaCha8
//!    stream, so a seed plus a decision sequence replays exactly.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, dice, configuration, moves, state, errors
//! - `board`: Cells, safe and home cells, per-seat paths
//! - `rules`: RulesEngine trait, move generation and resolution, turn controller
//! - `strategy`: Seat move-selection policies
//! - `env`: Reset/observe/step environment with shaped rewards

pub mod core;
pub mod board;
pub mod rules;
pub mod strategy;
pub mod env;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap,
    GameRng, GameRngState,
    Dice, DiceKind, GameConfig, OvershootPolicy,
    Move, MoveList, MoveOutcome, PlyEvent, PlyRecord, SkipReason,
    GameState, PlayerState,
    ConfigError, InvalidMoveReason, RuleError,
};

pub use crate::board::{path, Cell, Path, GOAL_INDEX, PATH_LEN};

pub use crate::rules::{Ashtachamma, GameResult, Phase, Ply, RulesEngine, TurnController, TurnStart};

pub use crate::strategy::Strategy;

pub use crate::env::{EnvConfig, Environment, Observation, RewardConfig, StepResult};
