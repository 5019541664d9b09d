//! The table: cards played during the current trick.
//!
//! Slot `i` holds the card played by seat `(leader + i) % players_len`,
//! where the leader is the seat that played slot 0. The table is emptied
//! into the winner's capture pile the moment a trick completes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::seat::MAX_PLAYERS;
use crate::cards::{Card, Suit};

/// The in-progress trick, at most one card per active player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    cards: SmallVec<[Card; MAX_PLAYERS]>,
}

impl Table {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards played so far, in play order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards played so far this trick.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the trick still unopened?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The suit led this trick, once someone has played.
    #[must_use]
    pub fn led_suit(&self) -> Option<Suit> {
        self.cards.first().map(|c| c.suit())
    }

    /// Put a card on the table.
    pub fn play(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Index of the winning card: a left-to-right scan where a card takes
    /// over the running best only if it beats it (same suit, equal or
    /// higher rank). Off-suit cards never challenge, which is why the
    /// scan needs no separate record of the led suit.
    #[must_use]
    pub fn winning_index(&self) -> usize {
        let mut best = 0;
        for (i, &card) in self.cards.iter().enumerate().skip(1) {
            if card.beats(self.cards[best]) {
                best = i;
            }
        }
        best
    }

    /// Drain the trick, leaving the table empty.
    pub fn take(&mut self) -> SmallVec<[Card; MAX_PLAYERS]> {
        std::mem::take(&mut self.cards)
    }
}
