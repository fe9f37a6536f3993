//! Seat strategies.
//!
//! A closed set of move-selection policies: uniform random, two simple
//! heuristics, and an external decision supplied by the caller.

pub mod selector;

pub use selector::Strategy;
