//! Presentation layer.
//!
//! The controller talks to the screen only through the `View` trait. A
//! view receives a `CardView` per card when a board is dealt and then
//! incremental updates (one card face, the counter, the win indicator).
//!
//! Optional elements are optional methods: a view without a win indicator
//! reports `has_win_indicator() == false` and the controller skips it.

pub mod headless;
pub mod terminal;

pub use headless::HeadlessView;
pub use terminal::TerminalView;

use serde::{Deserialize, Serialize};

use crate::cards::{Board, CardFace, CardId};
use crate::core::{CardLabel, GameConfig};

/// Everything a view needs to draw one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub label: CardLabel,
    pub face: CardFace,
    /// Path of the front image.
    pub image: String,
    /// Alt text for the front image.
    pub alt: String,
    /// Does the card still react to clicks?
    pub clickable: bool,
}

impl CardView {
    /// Apply a face change, dropping the click affordance once matched.
    pub fn set_face(&mut self, face: CardFace) {
        self.face = face;
        self.clickable = face != CardFace::Matched;
    }
}

/// Build the card views for `board`.
#[must_use]
pub fn card_views(board: &Board, config: &GameConfig) -> Vec<CardView> {
    board
        .iter()
        .map(|card| CardView {
            id: card.id,
            label: card.label.clone(),
            face: card.face,
            image: card.label.asset_path(&config.asset_dir, &config.asset_ext),
            alt: card.label.display_name(),
            clickable: !card.is_matched(),
        })
        .collect()
}

/// A screen the game draws on.
pub trait View {
    /// Replace whatever is on screen with a freshly dealt board.
    fn render_board(&mut self, cards: &[CardView]);

    /// Show a card's new face.
    fn set_card_face(&mut self, id: CardId, face: CardFace);

    /// Show the matched-pair counter.
    fn set_counter(&mut self, matched_pairs: u32);

    /// Does this view have a win indicator?
    fn has_win_indicator(&self) -> bool {
        false
    }

    /// Show or hide the win indicator.
    fn set_win_visible(&mut self, _visible: bool) {}

    /// Ask the player a yes/no question.
    fn confirm(&mut self, _message: &str) -> bool {
        false
    }

    /// Leave the game for another page.
    fn navigate(&mut self, _page: &str) {}

    /// Called once after each handled event; views that batch output draw here.
    fn present(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_views() {
        let mut board = Board::from_layout(["tandang_sora", "rizal", "rizal", "tandang_sora"]);
        board.set_face(CardId::new(1), CardFace::Matched);

        let views = card_views(&board, &GameConfig::default());

        assert_eq!(views.len(), 4);
        assert_eq!(views[0].image, "images/tandang_sora.png");
        assert_eq!(views[0].alt, "Tandang sora");
        assert!(views[0].clickable);
        assert_eq!(views[1].face, CardFace::Matched);
        assert!(!views[1].clickable);
    }

    #[test]
    fn test_card_view_set_face() {
        let board = Board::from_layout(["a", "a"]);
        let mut view = card_views(&board, &GameConfig::default()).remove(0);

        view.set_face(CardFace::FaceUp);
        assert!(view.clickable);

        view.set_face(CardFace::Matched);
        assert!(!view.clickable);
    }
}
