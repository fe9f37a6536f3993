//! Game rules and the turn state machine.
//!
//! `RulesEngine` defines:
//! - How dice are rolled
//! - Legal pawn moves for a roll
//! - How moves change the state (captures, scoring)
//! - Win conditions
//!
//! `Ashtachamma` is the implementation; `TurnController` drives any
//! `RulesEngine` ply by ply.

pub mod ashtachamma;
pub mod engine;
pub mod movegen;
pub mod occupancy;
pub mod resolver;
pub mod turn;

pub use ashtachamma::Ashtachamma;
pub use engine::{GameResult, RulesEngine};
pub use occupancy::Occupancy;
pub use turn::{Phase, Ply, TurnController, TurnStart};
