//! Per-seat state: hand, capture pile, and special-call bookkeeping.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::BussoCall;
use crate::cards::{Card, Deck, Suit, Thirds};

/// Largest hand any table size deals (13, in the 3-player game).
pub const MAX_HAND: usize = 13;

/// One-time declaration bookkeeping, one bit per category.
///
/// Bit layout: bits 0-3 Napoli per suit, bit 4 "declarations disabled for
/// this player", bits 5-7 Bongioco per counting rank, bit 8 Stella.
/// Stella is a single unscoped bit: one call per player, whatever rank it
/// names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declarations(u16);

impl Declarations {
    const DISABLED: u16 = 1 << 4;

    fn bit(call: BussoCall) -> u16 {
        match call {
            BussoCall::Napoli(suit) => 1 << suit.index(),
            BussoCall::Bongioco(rank) => 1 << (5 + rank.index()),
            BussoCall::Stella(_) => 1 << 8,
        }
    }

    /// Are all declarations switched off for this player?
    #[must_use]
    pub const fn is_disabled(self) -> bool {
        self.0 & Self::DISABLED != 0
    }

    /// Switch off every declaration for this player.
    pub fn disable(&mut self) {
        self.0 |= Self::DISABLED;
    }

    /// Has this category already been declared?
    #[must_use]
    pub fn is_declared(self, call: BussoCall) -> bool {
        self.0 & Self::bit(call) != 0
    }

    /// Mark a category as used.
    pub fn record(&mut self, call: BussoCall) {
        self.0 |= Self::bit(call);
    }

    /// Raw bits, for snapshots.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }
}

/// A seated player.
///
/// The hand is an unordered set (removal swaps with the last card); the
/// capture pile grows by whole tricks and keeps their order, though that
/// order carries no meaning. Bonus points from declarations accumulate
/// separately from trick points.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    hand: SmallVec<[Card; MAX_HAND]>,
    captured: Deck,
    declarations: Declarations,
    bonus_thirds: Thirds,
}

impl Player {
    /// A fresh player with nothing in hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cards currently held.
    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Number of cards in hand.
    #[must_use]
    pub fn hand_len(&self) -> usize {
        self.hand.len()
    }

    /// Does the hand contain `card`?
    #[must_use]
    pub fn has_card(&self, card: Card) -> bool {
        self.hand.contains(&card)
    }

    /// Does the hand contain any card of `suit`?
    #[must_use]
    pub fn has_suit(&self, suit: Suit) -> bool {
        self.hand.iter().any(|c| c.suit() == suit)
    }

    /// Count cards in hand matching a predicate.
    #[must_use]
    pub fn count_in_hand(&self, pred: impl Fn(Card) -> bool) -> usize {
        self.hand.iter().filter(|&&c| pred(c)).count()
    }

    /// Deal a card into the hand.
    pub fn add_to_hand(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Remove the first matching card from the hand (swap-with-last, so
    /// hand order is not preserved). Returns false, touching nothing, if
    /// the card is absent - check [`Player::has_card`] first when absence
    /// is an error.
    pub fn remove_card(&mut self, card: Card) -> bool {
        if let Some(pos) = self.hand.iter().position(|&c| c == card) {
            self.hand.swap_remove(pos);
            true
        } else {
            false
        }
    }

    /// Append a won trick to the capture pile, in table order.
    pub fn capture(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.captured.extend(cards);
    }

    /// The capture pile.
    #[must_use]
    pub fn captured(&self) -> &Deck {
        &self.captured
    }

    /// This player's declaration bookkeeping.
    #[must_use]
    pub fn declarations(&self) -> Declarations {
        self.declarations
    }

    /// Record an accepted declaration and its bonus.
    pub fn record_declaration(&mut self, call: BussoCall, bonus: Thirds) {
        self.declarations.record(call);
        self.bonus_thirds += bonus;
    }

    /// Switch off declarations for this player.
    pub fn disable_declarations(&mut self) {
        self.declarations.disable();
    }

    /// Accumulated declaration bonus, in thirds of a point.
    #[must_use]
    pub fn bonus_thirds(&self) -> Thirds {
        self.bonus_thirds
    }
}
