//! An ordered, bounded sequence of cards.
//!
//! `Deck` backs both uses the game has for a card pile:
//! - the undealt stock, which shrinks from the top via [`Deck::draw`];
//! - each player's capture pile, which grows trick by trick via
//!   [`Deck::push`].
//!
//! Order is preserved but only the stock's order is meaningful.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{Card, Rank, Suit};
use super::points::{ScoringVariant, Thirds};
use crate::core::rng::EntropySource;

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 40;

/// An ordered pile of up to 40 unique cards. Stored inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: SmallVec<[Card; DECK_SIZE]>,
}

impl Deck {
    /// An empty pile (capture-pile use).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The full 40-card deck in canonical order: suit-major, rank-minor.
    #[must_use]
    pub fn canonical() -> Self {
        let mut cards = SmallVec::new();
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(suit, rank));
            }
        }
        Self { cards }
    }

    /// Number of cards currently in the pile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the pile empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The cards, bottom to top.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Does the pile contain `card`?
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Append a card on top.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove every card.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Pop the top card, or `None` once the pile is exhausted.
    ///
    /// Callers must check for `None` before treating the result as a card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Shuffle by `rounds` pairwise swaps.
    ///
    /// Each round consumes one 32-bit word from the entropy source and
    /// derives both swap positions from it (`w % 1600`, split into `/ 40`
    /// and `% 40`), so the two positions within a round are correlated
    /// rather than independent draws.
    pub fn scramble(&mut self, rounds: usize, source: &mut impl EntropySource) {
        for _ in 0..rounds {
            self.random_swap(source);
        }
    }

    fn random_swap(&mut self, source: &mut impl EntropySource) {
        let r = (source.next_word() % (DECK_SIZE * DECK_SIZE) as u32) as usize;
        self.cards.swap(r / DECK_SIZE, r % DECK_SIZE);
    }

    /// Total point value of the pile in thirds, under `variant`.
    #[must_use]
    pub fn thirds(&self, variant: ScoringVariant) -> Thirds {
        self.cards.iter().map(|&c| variant.thirds(c)).sum()
    }

    /// Total point value of the pile in whole points (thirds / 3,
    /// truncating - partial thirds don't count).
    #[must_use]
    pub fn points(&self, variant: ScoringVariant) -> u16 {
        self.thirds(variant) / 3
    }
}

impl Extend<Card> for Deck {
    fn extend<I: IntoIterator<Item = Card>>(&mut self, iter: I) {
        self.cards.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::GameRng;
    use std::collections::HashSet;

    #[test]
    fn test_canonical_is_full_and_unique() {
        let deck = Deck::canonical();
        assert_eq!(deck.len(), DECK_SIZE);

        let unique: HashSet<_> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }

    #[test]
    fn test_canonical_order() {
        let deck = Deck::canonical();
        assert_eq!(deck.cards()[0], Card::new(Suit::Bastoni, Rank::Quattro));
        assert_eq!(deck.cards()[9], Card::new(Suit::Bastoni, Rank::Tre));
        assert_eq!(deck.cards()[10], Card::new(Suit::Denari, Rank::Quattro));
        assert_eq!(deck.cards()[39], Card::new(Suit::Coppe, Rank::Tre));
    }

    #[test]
    fn test_draw_from_top() {
        let mut deck = Deck::canonical();
        assert_eq!(deck.draw(), Some(Card::new(Suit::Coppe, Rank::Tre)));
        assert_eq!(deck.len(), DECK_SIZE - 1);
    }

    #[test]
    fn test_draw_exhaustion() {
        let mut deck = Deck::canonical();
        for _ in 0..DECK_SIZE {
            assert!(deck.draw().is_some());
        }
        assert_eq!(deck.draw(), None);
        assert_eq!(deck.draw(), None);
    }

    #[test]
    fn test_scramble_is_a_permutation() {
        let mut deck = Deck::canonical();
        let mut rng = GameRng::new(42);
        deck.scramble(1000, &mut rng);

        assert_eq!(deck.len(), DECK_SIZE);
        let unique: HashSet<_> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
        // 1000 swaps leaving the deck untouched would be astonishing.
        assert_ne!(deck, Deck::canonical());
    }

    #[test]
    fn test_scramble_is_deterministic() {
        let mut a = Deck::canonical();
        let mut b = Deck::canonical();
        a.scramble(1000, &mut GameRng::new(7));
        b.scramble(1000, &mut GameRng::new(7));
        assert_eq!(a, b);

        let mut c = Deck::canonical();
        c.scramble(1000, &mut GameRng::new(8));
        assert_ne!(a, c);
    }

    #[test]
    fn test_capture_pile_use() {
        let mut pile = Deck::empty();
        assert!(pile.is_empty());

        pile.push(Card::new(Suit::Spade, Rank::Asso));
        pile.push(Card::new(Suit::Spade, Rank::Re));
        assert_eq!(pile.len(), 2);
        assert!(pile.contains(Card::new(Suit::Spade, Rank::Asso)));
        assert_eq!(pile.thirds(ScoringVariant::Classic), 4);
        assert_eq!(pile.points(ScoringVariant::Classic), 1);
    }

    #[test]
    fn test_four_aces_score_four_points() {
        let mut pile = Deck::empty();
        for suit in Suit::ALL {
            pile.push(Card::new(suit, Rank::Asso));
        }
        assert_eq!(pile.points(ScoringVariant::Classic), 4);
        // Perdere adds 30 thirds = 10 points for the Asso di Bastoni.
        assert_eq!(pile.points(ScoringVariant::Perdere), 14);
    }

    #[test]
    fn test_serialization() {
        let deck = Deck::canonical();
        let json = serde_json::to_string(&deck).unwrap();
        let deserialized: Deck = serde_json::from_str(&json).unwrap();
        assert_eq!(deck, deserialized);
    }
}
