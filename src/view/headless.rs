//! A view that only records what it was told to show.

use super::{CardView, View};
use crate::cards::{CardFace, CardId};

/// In-memory view for tests and embedding.
#[derive(Clone, Debug)]
pub struct HeadlessView {
    cards: Vec<CardView>,
    counter: Option<u32>,
    win_indicator: bool,
    win_visible: bool,
    confirm_answer: bool,
    prompts: Vec<String>,
    navigations: Vec<String>,
    renders: usize,
}

impl Default for HeadlessView {
    fn default() -> Self {
        Self {
            cards: Vec::new(),
            counter: None,
            win_indicator: true,
            win_visible: false,
            confirm_answer: true,
            prompts: Vec::new(),
            navigations: Vec::new(),
            renders: 0,
        }
    }
}

impl HeadlessView {
    /// View with a win indicator that accepts every prompt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the win indicator element.
    #[must_use]
    pub fn without_win_indicator(mut self) -> Self {
        self.win_indicator = false;
        self
    }

    /// Answer to give to confirmation prompts.
    #[must_use]
    pub fn answering(mut self, answer: bool) -> Self {
        self.confirm_answer = answer;
        self
    }

    /// Cards as currently shown.
    #[must_use]
    pub fn cards(&self) -> &[CardView] {
        &self.cards
    }

    /// Face shown for a card.
    #[must_use]
    pub fn face(&self, id: CardId) -> Option<CardFace> {
        self.cards.get(id.index()).map(|c| c.face)
    }

    /// Counter as currently shown; `None` before the first update.
    #[must_use]
    pub fn counter(&self) -> Option<u32> {
        self.counter
    }

    /// Is the win indicator showing?
    #[must_use]
    pub fn win_visible(&self) -> bool {
        self.win_visible
    }

    /// Prompts shown so far.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Pages navigated to so far.
    #[must_use]
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Number of full board renders.
    #[must_use]
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl View for HeadlessView {
    fn render_board(&mut self, cards: &[CardView]) {
        self.cards = cards.to_vec();
        self.renders += 1;
    }

    fn set_card_face(&mut self, id: CardId, face: CardFace) {
        if let Some(card) = self.cards.get_mut(id.index()) {
            card.set_face(face);
        }
    }

    fn set_counter(&mut self, matched_pairs: u32) {
        self.counter = Some(matched_pairs);
    }

    fn has_win_indicator(&self) -> bool {
        self.win_indicator
    }

    fn set_win_visible(&mut self, visible: bool) {
        if self.win_indicator {
            self.win_visible = visible;
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        self.confirm_answer
    }

    fn navigate(&mut self, page: &str) {
        self.navigations.push(page.to_string());
    }
}
