//! Session driver: owns round state and wires it to a view, a store and
//! a scheduler.

pub mod game;
pub mod scheduler;

pub use game::{GameController, HeadlessController, Outcome, UiEvent, WinSummary};
pub use scheduler::{ManualScheduler, Scheduler, TimerEvent};
