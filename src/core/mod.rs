//! Core types: RNG, card labels, configuration.
//!
//! Nothing in here knows about the round state machine or the view; these
//! are the building blocks the rest of the crate is configured with.

pub mod rng;
pub mod label;
pub mod config;

pub use rng::GameRng;
pub use label::{CardLabel, DEFAULT_LABELS};
pub use config::{GameConfig, DEFAULT_SESSION_KEY, DEFAULT_SHARED_PLAYER_KEY, MAX_LABELS};
