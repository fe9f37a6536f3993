//! Core engine types: players, RNG, dice, configuration, moves, state, errors.
//!
//! Everything in here is plain data plus the small amount of behaviour that
//! keeps it consistent. Rules that move pawns live in `rules`.

pub mod player;
pub mod rng;
pub mod dice;
pub mod config;
pub mod moves;
pub mod state;
pub mod error;

pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use dice::{Dice, DiceKind, MAX_FACE};
pub use config::{GameConfig, OvershootPolicy, MAX_PAWNS};
pub use moves::{Capture, Move, MoveList, MoveOutcome, PlyEvent, PlyRecord, SkipReason};
pub use state::{GameState, PlayerState};
pub use error::{ConfigError, InvalidMoveReason, Result, RuleError};
