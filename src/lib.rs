//! # cyber-memory
//!
//! A memory-matching card game used as the warm-up to a cybersecurity
//! training module. The player turns over two cards at a time; a matching
//! pair stays up and scores, a mismatch flips back after a short delay.
//! Clearing the board stores the score in a local key-value store and sends
//! the player on to the training flow.
//!
//! ## Architecture
//!
//! - **Pure rules**: `RoundState::step` is a state machine over
//!   `Idle -> OneSelected -> (Idle | Resolving -> Idle)` that returns
//!   effects instead of performing them. It can be tested without a screen.
//!
//! - **One owner**: `GameController` owns the board, the round state, the
//!   RNG, the store, the view and the scheduler. There is no global state.
//!
//! - **Seams as traits**: `View`, `KeyValueStore` and `Scheduler` are the
//!   only ways the game touches the outside world.
//!
//! ## Modules
//!
//! - `core`: RNG, card labels, configuration
//! - `cards`: cards and the board
//! - `rules`: the round state machine
//! - `store`: key-value stores and the versioned player record
//! - `view`: view trait, headless and terminal views
//! - `controller`: `GameController`, events and timers
//!
//! ## Example
//!
//! ```
//! use cyber_memory::{GameConfig, HeadlessController, Outcome, UiEvent};
//!
//! let mut game = HeadlessController::headless(GameConfig::default(), 42).unwrap();
//! let labels = game.config().labels.clone();
//!
//! let mut outcome = Outcome::Applied;
//! for label in &labels {
//!     let ids = game.board().positions_of(label);
//!     game.dispatch(UiEvent::CardClicked(ids[0]));
//!     outcome = game.dispatch(UiEvent::CardClicked(ids[1]));
//! }
//!
//! assert!(matches!(outcome, Outcome::Won(summary) if summary.points == 60));
//! ```

pub mod core;
pub mod cards;
pub mod rules;
pub mod store;
pub mod view;
pub mod controller;
pub mod error;

// Re-export commonly used types
pub use crate::core::{CardLabel, GameConfig, GameRng};

pub use crate::cards::{Board, Card, CardFace, CardId};

pub use crate::rules::{Effect, IgnoreReason, Input, Phase, RoundState, Step};

pub use crate::store::{FileStore, KeyValueStore, MemoryStore, PlayerRecord};

pub use crate::view::{CardView, HeadlessView, TerminalView, View};

pub use crate::controller::{
    GameController, HeadlessController, ManualScheduler, Outcome, Scheduler, TimerEvent,
    UiEvent, WinSummary,
};

pub use crate::error::{ConfigError, StoreError};
