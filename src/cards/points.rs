//! Card point values under the two scoring variants.
//!
//! Tressette counts in thirds of a point:
//! - scartine (Quattro through Sette) are worth nothing;
//! - figures and Due/Tre are worth one third each;
//! - an Asso is worth a full point (three thirds).
//!
//! The whole deck is worth 33 thirds = 11 points. The "perdere" house
//! variant inflates the Asso di Bastoni by a further 30 thirds (10 points),
//! bringing its deck total to 63 thirds.
//!
//! The variant is chosen once, when a game is constructed, and never
//! changes mid-game.

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};

/// Point values, expressed as multiples of one third of a point.
pub type Thirds = u16;

/// Deck total under [`ScoringVariant::Classic`]: 33 thirds = 11 points.
pub const DECK_THIRDS_CLASSIC: Thirds = 33;

/// Deck total under [`ScoringVariant::Perdere`]: 63 thirds = 21 points.
pub const DECK_THIRDS_PERDERE: Thirds = 63;

/// The point-calculation strategy, fixed at game construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringVariant {
    /// Standard values: scartine 0, figures and Due/Tre 1/3, aces 1.
    #[default]
    Classic,
    /// House variant where the Asso di Bastoni alone is worth 11 points.
    Perdere,
}

impl ScoringVariant {
    /// Point value of a card in thirds.
    #[must_use]
    pub fn thirds(self, card: Card) -> Thirds {
        let base = match card.rank() {
            Rank::Quattro | Rank::Cinque | Rank::Sei | Rank::Sette => 0,
            Rank::Fante | Rank::Cavallo | Rank::Re | Rank::Due | Rank::Tre => 1,
            Rank::Asso => 3,
        };
        if self == ScoringVariant::Perdere && card == Card::new(Suit::Bastoni, Rank::Asso) {
            base + 30
        } else {
            base
        }
    }
}
