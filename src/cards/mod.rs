//! Cards and the board they are dealt onto.
//!
//! - `Card`: identity (position + label) and face state
//! - `Board`: the shuffled row of cards for one round

pub mod card;
pub mod board;

pub use card::{Card, CardFace, CardId};
pub use board::Board;
