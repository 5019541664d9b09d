//! Card system: the card model, the deck, and point values.
//!
//! ## Key Types
//!
//! - `Suit` / `Rank`: the 4x10 Italian deck; rank order is trick strength
//! - `Card`: immutable (suit, rank) value with a packed wire code
//! - `Deck`: bounded ordered pile, used as stock and as capture pile
//! - `ScoringVariant`: classic or "perdere" point values, in thirds

pub mod card;
pub mod deck;
pub mod points;

pub use card::{Card, Rank, Suit};
pub use deck::{Deck, DECK_SIZE};
pub use points::{ScoringVariant, Thirds, DECK_THIRDS_CLASSIC, DECK_THIRDS_PERDERE};
