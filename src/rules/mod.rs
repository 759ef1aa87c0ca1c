//! Round rules as a pure state machine.
//!
//! `RoundState::step` decides what a click or timer does; it never touches
//! a view, a store or a clock. The controller feeds it inputs and carries
//! out the returned effects.

pub mod machine;

pub use machine::{apply_effects, Effect, Effects, IgnoreReason, Input, Phase, RoundState, Step};
