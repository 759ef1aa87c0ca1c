//! The board: an ordered row of cards dealt for one round.
//!
//! Backed by an `im::Vector` so views and callers can hold a snapshot of
//! the board for the cost of an O(1) clone.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::card::{Card, CardFace, CardId};
use crate::core::{CardLabel, GameRng};

/// Cards of a round in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cards: Vector<Card>,
}

impl Board {
    /// Deal a shuffled board holding every label exactly twice.
    #[must_use]
    pub fn deal(labels: &[CardLabel], rng: &mut GameRng) -> Self {
        let mut deck: Vec<CardLabel> = labels.iter().chain(labels.iter()).cloned().collect();
        rng.shuffle(&mut deck);
        debug!(cards = deck.len(), seed = rng.seed(), "dealt board");
        Self::from_layout(deck)
    }

    /// Build a board with labels in exactly the given order.
    ///
    /// Useful for replaying a known layout. The caller is responsible for
    /// supplying each label twice.
    /// Cards past `u16::MAX` have no id and are dropped.
    #[must_use]
    pub fn from_layout<I, L>(layout: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<CardLabel>,
    {
        let cards = layout
            .into_iter()
            .enumerate()
            .map_while(|(i, label)| {
                u16::try_from(i)
                    .ok()
                    .map(|id| Card::new(CardId::new(id), label.into()))
            })
            .collect();
        Self { cards }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the board empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs on the board.
    #[must_use]
    pub fn pair_count(&self) -> u32 {
        (self.cards.len() / 2) as u32
    }

    /// Get a card.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Face state of a card, if it exists.
    #[must_use]
    pub fn face(&self, id: CardId) -> Option<CardFace> {
        self.get(id).map(|c| c.face)
    }

    /// Set a card's face. Returns false if the card does not exist.
    pub fn set_face(&mut self, id: CardId, face: CardFace) -> bool {
        match self.cards.get_mut(id.index()) {
            Some(card) => {
                card.face = face;
                true
            }
            None => false,
        }
    }

    /// Iterate over cards in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Labels in board order.
    pub fn labels(&self) -> impl Iterator<Item = &CardLabel> {
        self.cards.iter().map(|c| &c.label)
    }

    /// Cards carrying `label`.
    #[must_use]
    pub fn positions_of(&self, label: &CardLabel) -> Vec<CardId> {
        self.cards
            .iter()
            .filter(|c| &c.label == label)
            .map(|c| c.id)
            .collect()
    }

    /// How many cards carry each label.
    #[must_use]
    pub fn label_counts(&self) -> FxHashMap<&CardLabel, usize> {
        let mut counts = FxHashMap::default();
        for card in &self.cards {
            *counts.entry(&card.label).or_insert(0) += 1;
        }
        counts
    }

    /// Does every label appear exactly twice?
    #[must_use]
    pub fn is_well_paired(&self) -> bool {
        self.label_counts().values().all(|&n| n == 2)
    }

    /// Number of matched cards.
    #[must_use]
    pub fn matched_cards(&self) -> usize {
        self.cards.iter().filter(|c| c.is_matched()).count()
    }

    /// Are all cards face-down?
    #[must_use]
    pub fn all_face_down(&self) -> bool {
        self.cards.iter().all(|c| c.face == CardFace::FaceDown)
    }
}
