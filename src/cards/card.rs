//! Card model: suits, ranks, and the trick-strength comparison.
//!
//! A Tressette deck has 40 cards: 4 suits x 10 ranks, no jokers.
//! `Rank` declaration order IS trick strength: `Quattro` is the weakest
//! card of a suit and `Tre` the strongest.
//!
//! Cards cross the wire as a single packed byte, `(suit << 4) | rank`.
//! Inside the crate a card is always a typed `Card`; the packed form only
//! exists at the codec boundary and decoding is fallible.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four Italian suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Bastoni,
    Denari,
    Spade,
    Coppe,
}

impl Suit {
    /// All suits, in wire-code order.
    pub const ALL: [Suit; 4] = [Suit::Bastoni, Suit::Denari, Suit::Spade, Suit::Coppe];

    /// Wire index of this suit (0-3).
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Decode a wire index back into a suit.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Suit> {
        match index {
            0 => Some(Suit::Bastoni),
            1 => Some(Suit::Denari),
            2 => Some(Suit::Spade),
            3 => Some(Suit::Coppe),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Suit::Bastoni => "bastoni",
            Suit::Denari => "denari",
            Suit::Spade => "spade",
            Suit::Coppe => "coppe",
        };
        write!(f, "{repr}")
    }
}

/// Card ranks in trick-strength order, weakest first.
///
/// The derived `Ord` is the strength order used for trick resolution:
/// `Tre > Due > Asso > Re > Cavallo > Fante > Sette > ... > Quattro`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Quattro,
    Cinque,
    Sei,
    Sette,
    Fante,
    Cavallo,
    Re,
    Asso,
    Due,
    Tre,
}

impl Rank {
    /// All ranks, weakest first (also wire-code order).
    pub const ALL: [Rank; 10] = [
        Rank::Quattro,
        Rank::Cinque,
        Rank::Sei,
        Rank::Sette,
        Rank::Fante,
        Rank::Cavallo,
        Rank::Re,
        Rank::Asso,
        Rank::Due,
        Rank::Tre,
    ];

    /// Wire index of this rank (0-9).
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Decode a wire index back into a rank.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Rank> {
        match index {
            0 => Some(Rank::Quattro),
            1 => Some(Rank::Cinque),
            2 => Some(Rank::Sei),
            3 => Some(Rank::Sette),
            4 => Some(Rank::Fante),
            5 => Some(Rank::Cavallo),
            6 => Some(Rank::Re),
            7 => Some(Rank::Asso),
            8 => Some(Rank::Due),
            9 => Some(Rank::Tre),
            _ => None,
        }
    }

    /// Is this one of the three face cards (Fante, Cavallo, Re)?
    #[must_use]
    pub const fn is_figure(self) -> bool {
        matches!(self, Rank::Fante | Rank::Cavallo | Rank::Re)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Rank::Quattro => "quattro",
            Rank::Cinque => "cinque",
            Rank::Sei => "sei",
            Rank::Sette => "sette",
            Rank::Fante => "fante",
            Rank::Cavallo => "cavallo",
            Rank::Re => "re",
            Rank::Asso => "asso",
            Rank::Due => "due",
            Rank::Tre => "tre",
        };
        write!(f, "{repr}")
    }
}

/// An immutable playing card. 40 distinct values exist.
///
/// ## Example
///
/// ```
/// use tressette::cards::{Card, Rank, Suit};
///
/// let asso = Card::new(Suit::Spade, Rank::Asso);
/// let re = Card::new(Suit::Spade, Rank::Re);
/// let tre = Card::new(Suit::Bastoni, Rank::Tre);
///
/// assert!(asso.beats(re));
/// // Off-suit cards never beat, whatever their rank.
/// assert!(!tre.beats(asso));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    suit: Suit,
    rank: Rank,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// This card's suit.
    #[must_use]
    pub const fn suit(self) -> Suit {
        self.suit
    }

    /// This card's rank.
    #[must_use]
    pub const fn rank(self) -> Rank {
        self.rank
    }

    /// Packed wire code: `(suit << 4) | rank`.
    ///
    /// Fits in 6 bits since suit indices never exceed 3.
    #[must_use]
    pub const fn code(self) -> u8 {
        (self.suit.index() << 4) | self.rank.index()
    }

    /// Decode a packed wire code. Rejects rank nibbles 10-15.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Card> {
        let suit = Suit::from_index(code >> 4);
        let rank = Rank::from_index(code & 0x0F);
        match (suit, rank) {
            (Some(suit), Some(rank)) => Some(Card::new(suit, rank)),
            _ => None,
        }
    }

    /// Trick comparison: does this card beat `current_best`?
    ///
    /// True only for a card of the same suit with equal or higher rank.
    /// The suit gate is what lets trick resolution scan the table without
    /// tracking the led suit separately: an off-suit challenger can never
    /// take the running best away.
    #[must_use]
    pub fn beats(self, current_best: Card) -> bool {
        self.suit == current_best.suit && self.rank >= current_best.rank
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} di {}", self.rank, self.suit)
    }
}
