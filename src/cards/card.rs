//! Cards on the board.
//!
//! A card has a fixed identity for the round (its board position and
//! label) and a face state that the round state machine moves through
//! `FaceDown -> FaceUp -> Matched | FaceDown`.

use serde::{Deserialize, Serialize};

use crate::core::CardLabel;

/// Card identifier: the card's position on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u16);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Board index of this card.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Visible state of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardFace {
    /// Back showing. The only state a card can be selected from.
    #[default]
    FaceDown,
    /// Front showing while part of the current selection.
    FaceUp,
    /// Front showing permanently; never interactive again.
    Matched,
}

impl CardFace {
    /// Is the front of the card visible?
    #[must_use]
    pub fn is_revealed(self) -> bool {
        !matches!(self, CardFace::FaceDown)
    }
}

/// A card dealt onto the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Position on the board.
    pub id: CardId,

    /// Symbol on the front.
    pub label: CardLabel,

    /// Current face state.
    pub face: CardFace,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(id: CardId, label: CardLabel) -> Self {
        Self {
            id,
            label,
            face: CardFace::FaceDown,
        }
    }

    /// Is this card matched?
    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.face == CardFace::Matched
    }

    /// Do the two cards form a pair?
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.label == other.label
    }
}
