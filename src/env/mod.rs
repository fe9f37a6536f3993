//! Episode environment for agents and simulations.
//!
//! Wraps a `TurnController` with seat strategies, shaped rewards, a ply
//! limit, and reproducible episode seeding. Rendering and learning-library
//! adapters consume `Observation` and stay outside this crate.

pub mod config;
pub mod environment;
pub mod observation;
pub mod reward;

pub use config::EnvConfig;
pub use environment::{Environment, EpisodeSummary, StepResult};
pub use observation::{Observation, PhaseKind, FEATURES_PER_SEAT, TENSOR_LEN};
pub use reward::{is_threatened, RewardConfig};
