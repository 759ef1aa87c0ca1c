//! The game controller.
//!
//! `GameController` owns everything a round needs: configuration, RNG,
//! board, round state, the key-value store, the view and the scheduler.
//! Callers feed it `UiEvent`s one at a time; it runs them through
//! `RoundState` and carries out the resulting effects.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::scheduler::{ManualScheduler, Scheduler, TimerEvent};
use crate::cards::{Board, CardFace, CardId};
use crate::core::{GameConfig, GameRng};
use crate::error::ConfigError;
use crate::rules::{Effect, IgnoreReason, Input, RoundState};
use crate::store::{KeyValueStore, MemoryStore, PlayerRecord};
use crate::view::{card_views, HeadlessView, View};

/// An input from the player or a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiEvent {
    /// A card was clicked.
    CardClicked(CardId),
    /// The reset control was clicked.
    ResetClicked,
    /// A scheduled timer fired.
    Timer(TimerEvent),
}

/// Result of a won round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WinSummary {
    /// Pairs matched.
    pub pairs: u32,
    /// Points awarded.
    pub points: i64,
}

/// What handling one event did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The round advanced.
    Applied,
    /// The round advanced and was won.
    Won(WinSummary),
    /// The event was a no-op.
    Ignored(IgnoreReason),
    /// A new board was dealt.
    Dealt,
    /// The win prompt was shown.
    Prompted { accepted: bool },
    /// A timer from an earlier round fired and was dropped.
    Stale,
}

/// Controller with in-memory store, recording view and virtual clock.
pub type HeadlessController = GameController<MemoryStore, HeadlessView, ManualScheduler>;

/// Owns and drives one game session.
#[derive(Debug)]
pub struct GameController<S, V, T> {
    config: GameConfig,
    rng: GameRng,
    board: Board,
    round: RoundState,
    generation: u64,
    last_win: Option<WinSummary>,
    store: S,
    view: V,
    scheduler: T,
}

impl<S: KeyValueStore, V: View, T: Scheduler> GameController<S, V, T> {
    /// Create a controller and deal the first board.
    pub fn new(
        config: GameConfig,
        rng: GameRng,
        store: S,
        view: V,
        scheduler: T,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut controller = Self {
            round: RoundState::new(config.total_pairs()),
            config,
            rng,
            board: Board::default(),
            generation: 0,
            last_win: None,
            store,
            view,
            scheduler,
        };
        controller.reset();
        Ok(controller)
    }

    /// Handle one event and let the view draw.
    pub fn dispatch(&mut self, event: UiEvent) -> Outcome {
        let outcome = match event {
            UiEvent::CardClicked(id) => self.select(id),
            UiEvent::ResetClicked => {
                self.reset();
                Outcome::Dealt
            }
            UiEvent::Timer(timer) => self.fire(timer),
        };
        self.view.present();
        outcome
    }

    /// Deal a fresh board and clear all round state.
    ///
    /// Timers scheduled before the reset still fire but are dropped.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.board = Board::deal(&self.config.labels, &mut self.rng);
        self.round = RoundState::for_board(&self.board);
        self.last_win = None;

        self.view.render_board(&card_views(&self.board, &self.config));
        self.view.set_counter(0);
        if self.view.has_win_indicator() {
            self.view.set_win_visible(false);
        }
        debug!(generation = self.generation, pairs = self.round.total_pairs(), "round started");
    }

    /// Handle a click on `id`.
    pub fn select(&mut self, id: CardId) -> Outcome {
        self.run(Input::Select(id))
    }

    /// Handle a fired timer.
    pub fn fire(&mut self, timer: TimerEvent) -> Outcome {
        if timer.generation() != self.generation {
            debug!(?timer, current = self.generation, "dropping timer from an earlier round");
            return Outcome::Stale;
        }
        match timer {
            TimerEvent::Unflip { .. } => self.run(Input::UnflipElapsed),
            TimerEvent::WinPrompt { .. } => {
                let accepted = self.view.confirm(&self.config.win_prompt);
                if accepted {
                    self.view.navigate(&self.config.entry_page);
                }
                Outcome::Prompted { accepted }
            }
        }
    }

    fn run(&mut self, input: Input) -> Outcome {
        let effects = match self.round.advance(&mut self.board, input) {
            Ok(effects) => effects,
            Err(reason) => {
                debug!(?input, %reason, "input ignored");
                return Outcome::Ignored(reason);
            }
        };

        let mut outcome = Outcome::Applied;
        for effect in effects {
            match effect {
                Effect::Reveal(id) => self.view.set_card_face(id, CardFace::FaceUp),
                Effect::Matched { first, second } => {
                    debug!(%first, %second, "pair matched");
                    self.view.set_card_face(first, CardFace::Matched);
                    self.view.set_card_face(second, CardFace::Matched);
                }
                Effect::CounterChanged(n) => self.view.set_counter(n),
                Effect::ScheduleUnflip { first, second } => {
                    debug!(%first, %second, "pair mismatched");
                    self.scheduler.schedule(
                        self.config.mismatch_delay(),
                        TimerEvent::Unflip { generation: self.generation },
                    );
                }
                Effect::Conceal { first, second } => {
                    self.view.set_card_face(first, CardFace::FaceDown);
                    self.view.set_card_face(second, CardFace::FaceDown);
                }
                Effect::Won { pairs } => outcome = Outcome::Won(self.handle_win(pairs)),
            }
        }
        outcome
    }

    fn handle_win(&mut self, pairs: u32) -> WinSummary {
        let points = self.config.award_for(pairs);

        let mut record = PlayerRecord::load(&self.store, &self.config.session_key);
        record.award(points);
        if let Err(err) = record.save(&mut self.store, &self.config.session_key) {
            warn!(key = %self.config.session_key, error = %err, "failed to save score");
        }

        if self.view.has_win_indicator() {
            self.view.set_win_visible(true);
        }

        if let Some(shared) = &self.config.shared_player_key {
            if let Err(err) = PlayerRecord::fresh_start().save(&mut self.store, shared) {
                warn!(key = %shared, error = %err, "failed to reset shared player record");
            }
            self.scheduler.schedule(
                self.config.win_prompt_delay(),
                TimerEvent::WinPrompt { generation: self.generation },
            );
        }

        let summary = WinSummary { pairs, points };
        info!(pairs, points, "round won");
        self.last_win = Some(summary);
        summary
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current round state.
    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// Number of boards dealt so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Result of the current round, once won.
    #[must_use]
    pub fn last_win(&self) -> Option<WinSummary> {
        self.last_win
    }

    /// Seed of the session RNG.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// The key-value store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the key-value store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// The view.
    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// The scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }
}

impl<S: KeyValueStore, V: View> GameController<S, V, ManualScheduler> {
    /// Move the virtual clock forward and deliver every timer that fired.
    pub fn advance_time(&mut self, elapsed: Duration) -> Vec<Outcome> {
        let fired = self.scheduler.advance(elapsed);
        fired
            .into_iter()
            .map(|timer| self.dispatch(UiEvent::Timer(timer)))
            .collect()
    }

    /// Deliver pending timers until none are left.
    pub fn run_timers(&mut self) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        while let Some(wait) = self.scheduler.until_next() {
            outcomes.extend(self.advance_time(wait));
        }
        outcomes
    }
}

impl HeadlessController {
    /// Default-configured controller with in-memory store and recording view.
    pub fn headless(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(
            config,
            GameRng::new(seed),
            MemoryStore::new(),
            HeadlessView::new(),
            ManualScheduler::new(),
        )
    }
}
