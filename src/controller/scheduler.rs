//! Deferred callbacks.
//!
//! The game needs exactly two kinds of timer: the mismatch unflip and the
//! post-win prompt. Both are requested through `Scheduler` and delivered
//! back to the controller as `UiEvent::Timer`. Timers cannot be cancelled;
//! each carries the round generation it was scheduled in so the controller
//! can drop the ones that outlived their round.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A timer firing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Flip a mismatched pair back.
    Unflip { generation: u64 },
    /// Ask the winner whether to return to the training module.
    WinPrompt { generation: u64 },
}

impl TimerEvent {
    /// Round generation this timer was scheduled in.
    #[must_use]
    pub fn generation(self) -> u64 {
        match self {
            TimerEvent::Unflip { generation } | TimerEvent::WinPrompt { generation } => generation,
        }
    }
}

/// Something that can deliver a `TimerEvent` after a delay.
pub trait Scheduler {
    /// Request `event` to be delivered after `delay`.
    fn schedule(&mut self, delay: Duration, event: TimerEvent);
}

#[derive(Clone, Debug)]
struct Pending {
    due: Duration,
    seq: u64,
    event: TimerEvent,
}

/// Scheduler driven by a virtual clock.
///
/// Nothing fires on its own: the owner calls `advance` to move the clock
/// and collects the events that became due, earliest first.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_seq: u64,
    pending: Vec<Pending>,
}

impl ManualScheduler {
    /// Create a scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers that have not fired yet.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Time until the next timer fires, if any are pending.
    #[must_use]
    pub fn until_next(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|p| p.due.saturating_sub(self.now))
            .min()
    }

    /// Move the clock forward and return the events that became due.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TimerEvent> {
        self.now += elapsed;
        let now = self.now;

        let (mut due, rest): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.pending).into_iter().partition(|p| p.due <= now);
        self.pending = rest;

        due.sort_by_key(|p| (p.due, p.seq));
        due.into_iter().map(|p| p.event).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, event: TimerEvent) {
        self.pending.push(Pending {
            due: self.now + delay,
            seq: self.next_seq,
            event,
        });
        self.next_seq += 1;
    }
}
