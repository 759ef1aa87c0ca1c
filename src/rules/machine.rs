//! The round state machine.
//!
//! A round moves between three phases:
//!
//! ```text
//!            Select(a)                 Select(b), labels differ
//!   Idle ─────────────▶ OneSelected ───────────────────────────▶ Resolving
//!    ▲                      │                                       │
//!    │  Select(b), match    │                         UnflipElapsed │
//!    └──────────────────────┘◀──────────────────────────────────────┘
//! ```
//!
//! `RoundState::step` is a pure function of the current state, the board
//! and one input. It returns the next state plus the `Effect`s the caller
//! must carry out (update card faces, refresh the counter, schedule the
//! unflip timer, run win handling). `RoundState::advance` is the
//! convenience that also applies the card-face effects to the board.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::cards::{Board, CardFace, CardId};

/// Where the round is between inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No card selected.
    #[default]
    Idle,
    /// One card face-up, waiting for the second selection.
    OneSelected { first: CardId },
    /// A mismatched pair is face-up; input is locked until the unflip timer.
    Resolving { first: CardId, second: CardId },
}

/// Input to the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Input {
    /// The player clicked a card.
    Select(CardId),
    /// The mismatch delay elapsed.
    UnflipElapsed,
}

/// Work the caller must carry out after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Turn a card face-up.
    Reveal(CardId),
    /// Both cards are now matched and no longer interactive.
    Matched { first: CardId, second: CardId },
    /// The matched-pair counter changed.
    CounterChanged(u32),
    /// Start the mismatch timer; deliver `Input::UnflipElapsed` when it fires.
    ScheduleUnflip { first: CardId, second: CardId },
    /// Turn both cards face-down again.
    Conceal { first: CardId, second: CardId },
    /// Every pair is matched. Emitted once per round.
    Won { pairs: u32 },
}

/// Effects of one transition. Never more than four.
pub type Effects = SmallVec<[Effect; 4]>;

/// Why an input had no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// A mismatched pair is still being resolved.
    Locked,
    /// The card is already matched.
    AlreadyMatched,
    /// The card is already the first selection.
    AlreadySelected,
    /// No such card on the board.
    UnknownCard,
    /// All pairs are matched.
    RoundOver,
    /// An unflip arrived with no mismatched pair pending.
    NothingPending,
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            IgnoreReason::Locked => "input locked",
            IgnoreReason::AlreadyMatched => "card already matched",
            IgnoreReason::AlreadySelected => "card already selected",
            IgnoreReason::UnknownCard => "no such card",
            IgnoreReason::RoundOver => "round over",
            IgnoreReason::NothingPending => "nothing to unflip",
        };
        f.write_str(text)
    }
}

/// Outcome of `RoundState::step`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// The input was a no-op.
    Ignored(IgnoreReason),
    /// The round moved to `next`.
    Advanced { next: RoundState, effects: Effects },
}

/// State of one round, independent of any view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundState {
    phase: Phase,
    matched_pairs: u32,
    total_pairs: u32,
    won: bool,
}

impl RoundState {
    /// Fresh round with `total_pairs` pairs to find.
    #[must_use]
    pub fn new(total_pairs: u32) -> Self {
        Self {
            phase: Phase::Idle,
            matched_pairs: 0,
            total_pairs,
            won: false,
        }
    }

    /// Fresh round sized for `board`.
    #[must_use]
    pub fn for_board(board: &Board) -> Self {
        Self::new(board.pair_count())
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// First selected card, if any.
    #[must_use]
    pub fn first_selected(&self) -> Option<CardId> {
        match self.phase {
            Phase::Idle => None,
            Phase::OneSelected { first } | Phase::Resolving { first, .. } => Some(first),
        }
    }

    /// Second selected card, only set while a mismatch is resolving.
    #[must_use]
    pub fn second_selected(&self) -> Option<CardId> {
        match self.phase {
            Phase::Resolving { second, .. } => Some(second),
            _ => None,
        }
    }

    /// Is input locked?
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self.phase, Phase::Resolving { .. })
    }

    /// Pairs matched so far.
    #[must_use]
    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    /// Pairs on the board.
    #[must_use]
    pub fn total_pairs(&self) -> u32 {
        self.total_pairs
    }

    /// Have all pairs been matched?
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Compute the transition for `input` without mutating anything.
    #[must_use]
    pub fn step(&self, board: &Board, input: Input) -> Step {
        match input {
            Input::Select(card) => self.select(board, card),
            Input::UnflipElapsed => self.unflip(),
        }
    }

    /// Step and apply card-face effects to `board`.
    ///
    /// On success `self` becomes the next state and the full effect list is
    /// returned so the caller can mirror it elsewhere.
    pub fn advance(&mut self, board: &mut Board, input: Input) -> Result<Effects, IgnoreReason> {
        match self.step(board, input) {
            Step::Ignored(reason) => Err(reason),
            Step::Advanced { next, effects } => {
                apply_effects(board, &effects);
                *self = next;
                Ok(effects)
            }
        }
    }

    fn select(&self, board: &Board, id: CardId) -> Step {
        if self.won {
            return Step::Ignored(IgnoreReason::RoundOver);
        }
        if self.is_locked() {
            return Step::Ignored(IgnoreReason::Locked);
        }

        let Some(card) = board.get(id) else {
            return Step::Ignored(IgnoreReason::UnknownCard);
        };
        if card.is_matched() {
            return Step::Ignored(IgnoreReason::AlreadyMatched);
        }

        let first = match self.phase {
            Phase::Idle => {
                return Step::Advanced {
                    next: Self {
                        phase: Phase::OneSelected { first: id },
                        ..*self
                    },
                    effects: smallvec![Effect::Reveal(id)],
                };
            }
            Phase::OneSelected { first } if first == id => {
                return Step::Ignored(IgnoreReason::AlreadySelected);
            }
            Phase::OneSelected { first } => first,
            Phase::Resolving { .. } => return Step::Ignored(IgnoreReason::Locked),
        };

        let is_match = board.get(first).is_some_and(|f| f.pairs_with(card));

        if is_match {
            let matched_pairs = self.matched_pairs + 1;
            let won = matched_pairs >= self.total_pairs;
            let mut effects: Effects = smallvec![
                Effect::Reveal(id),
                Effect::Matched { first, second: id },
                Effect::CounterChanged(matched_pairs),
            ];
            if won {
                effects.push(Effect::Won { pairs: matched_pairs });
            }
            Step::Advanced {
                next: Self {
                    phase: Phase::Idle,
                    matched_pairs,
                    won,
                    ..*self
                },
                effects,
            }
        } else {
            Step::Advanced {
                next: Self {
                    phase: Phase::Resolving { first, second: id },
                    ..*self
                },
                effects: smallvec![
                    Effect::Reveal(id),
                    Effect::ScheduleUnflip { first, second: id },
                ],
            }
        }
    }

    fn unflip(&self) -> Step {
        match self.phase {
            Phase::Resolving { first, second } => Step::Advanced {
                next: Self {
                    phase: Phase::Idle,
                    ..*self
                },
                effects: smallvec![Effect::Conceal { first, second }],
            },
            _ => Step::Ignored(IgnoreReason::NothingPending),
        }
    }
}

/// Apply the card-face part of `effects` to `board`.
pub fn apply_effects(board: &mut Board, effects: &[Effect]) {
    for effect in effects {
        match *effect {
            Effect::Reveal(id) => {
                board.set_face(id, CardFace::FaceUp);
            }
            Effect::Matched { first, second } => {
                board.set_face(first, CardFace::Matched);
                board.set_face(second, CardFace::Matched);
            }
            Effect::Conceal { first, second } => {
                board.set_face(first, CardFace::FaceDown);
                board.set_face(second, CardFace::FaceDown);
            }
            Effect::CounterChanged(_) | Effect::ScheduleUnflip { .. } | Effect::Won { .. } => {}
        }
    }
}
