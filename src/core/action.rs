//! Player actions and their one-byte wire encoding.
//!
//! A transport hands the engine one byte per command. The top two bits
//! select the action kind, the low six carry the payload:
//!
//! | kind    | tag  | payload                                       |
//! |---------|------|-----------------------------------------------|
//! | `Play`  | `00` | packed card code `(suit << 4) \| rank`        |
//! | `Busso` | `01` | call kind (2) \| suit scope (2) \| rank scope (2) |
//! | `Monte` | `10` | claim selector in bit 0                       |
//! | -       | `11` | reserved, never decodes                       |
//!
//! Inside the crate actions are always the typed [`Action`]; the packed
//! byte exists only at this boundary. Decoding is strict: reserved tags,
//! out-of-range fields, and nonzero unused bits all yield `None`, which
//! dispatch surfaces as `UnknownCommand`.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};

const KIND_MASK: u8 = 0xC0;
const PAYLOAD_MASK: u8 = 0x3F;

const KIND_PLAY: u8 = 0b00 << 6;
const KIND_BUSSO: u8 = 0b01 << 6;
const KIND_MONTE: u8 = 0b10 << 6;

const BUSSO_KIND_MASK: u8 = 0x30;
const BUSSO_SUIT_MASK: u8 = 0x0C;
const BUSSO_RANK_MASK: u8 = 0x03;

const BUSSO_NAPOLI: u8 = 0x10;
const BUSSO_BONGIOCO: u8 = 0x20;
const BUSSO_STELLA: u8 = 0x30;

/// The ranks a declaration may be scoped to: the counting cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallRank {
    Asso,
    Due,
    Tre,
}

impl CallRank {
    /// All call ranks, in wire order.
    pub const ALL: [CallRank; 3] = [CallRank::Asso, CallRank::Due, CallRank::Tre];

    /// The card rank this scope refers to.
    #[must_use]
    pub const fn rank(self) -> Rank {
        match self {
            CallRank::Asso => Rank::Asso,
            CallRank::Due => Rank::Due,
            CallRank::Tre => Rank::Tre,
        }
    }

    /// Wire field value, `rank - Asso` (0-2).
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Decode a wire field value.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<CallRank> {
        match index {
            0 => Some(CallRank::Asso),
            1 => Some(CallRank::Due),
            2 => Some(CallRank::Tre),
            _ => None,
        }
    }
}

/// A one-time special declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BussoCall {
    /// The three highest cards (Asso, Due, Tre) of one suit.
    Napoli(Suit),
    /// At least three cards of one counting rank, across suits.
    Bongioco(CallRank),
    /// All four cards of one counting rank - the rarest call.
    Stella(CallRank),
}

/// A claim that ends the hand early.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonteClaim {
    /// At least three Tre in hand.
    TreSette,
    /// Exactly one Asso and one figure, nothing else of value.
    PuntoFigura,
}

/// A complete player command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Put a card on the table.
    Play(Card),
    /// Declare a one-time special call.
    Busso(BussoCall),
    /// Declare the hand over.
    Monte(MonteClaim),
}

impl Action {
    /// Pack this action into its wire byte.
    #[must_use]
    pub fn encode(self) -> u8 {
        match self {
            Action::Play(card) => KIND_PLAY | card.code(),
            Action::Busso(call) => {
                let payload = match call {
                    BussoCall::Napoli(suit) => BUSSO_NAPOLI | (suit.index() << 2),
                    BussoCall::Bongioco(rank) => BUSSO_BONGIOCO | rank.index(),
                    BussoCall::Stella(rank) => BUSSO_STELLA | rank.index(),
                };
                KIND_BUSSO | payload
            }
            Action::Monte(claim) => {
                let payload = match claim {
                    MonteClaim::TreSette => 0,
                    MonteClaim::PuntoFigura => 1,
                };
                KIND_MONTE | payload
            }
        }
    }

    /// Decode a wire byte, or `None` for anything malformed.
    #[must_use]
    pub fn decode(byte: u8) -> Option<Action> {
        let payload = byte & PAYLOAD_MASK;
        match byte & KIND_MASK {
            KIND_PLAY => Card::from_code(payload).map(Action::Play),
            KIND_BUSSO => Self::decode_busso(payload).map(Action::Busso),
            KIND_MONTE => match payload {
                0 => Some(Action::Monte(MonteClaim::TreSette)),
                1 => Some(Action::Monte(MonteClaim::PuntoFigura)),
                _ => None,
            },
            _ => None, // reserved tag 11
        }
    }

    fn decode_busso(payload: u8) -> Option<BussoCall> {
        let suit_bits = (payload & BUSSO_SUIT_MASK) >> 2;
        let rank_bits = payload & BUSSO_RANK_MASK;
        match payload & BUSSO_KIND_MASK {
            BUSSO_NAPOLI if rank_bits == 0 => Suit::from_index(suit_bits).map(BussoCall::Napoli),
            BUSSO_BONGIOCO if suit_bits == 0 => {
                CallRank::from_index(rank_bits).map(BussoCall::Bongioco)
            }
            BUSSO_STELLA if suit_bits == 0 => {
                CallRank::from_index(rank_bits).map(BussoCall::Stella)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_encoding() {
        let action = Action::Play(Card::new(Suit::Bastoni, Rank::Quattro));
        assert_eq!(action.encode(), 0x00);

        let action = Action::Play(Card::new(Suit::Coppe, Rank::Tre));
        assert_eq!(action.encode(), 0x39);
    }

    #[test]
    fn test_busso_encoding() {
        assert_eq!(Action::Busso(BussoCall::Napoli(Suit::Bastoni)).encode(), 0x50);
        assert_eq!(Action::Busso(BussoCall::Napoli(Suit::Coppe)).encode(), 0x5C);
        assert_eq!(Action::Busso(BussoCall::Bongioco(CallRank::Asso)).encode(), 0x60);
        assert_eq!(Action::Busso(BussoCall::Stella(CallRank::Tre)).encode(), 0x72);
    }

    #[test]
    fn test_monte_encoding() {
        assert_eq!(Action::Monte(MonteClaim::TreSette).encode(), 0x80);
        assert_eq!(Action::Monte(MonteClaim::PuntoFigura).encode(), 0x81);
    }

    #[test]
    fn test_round_trip_all_plays() {
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                let action = Action::Play(Card::new(suit, rank));
                assert_eq!(Action::decode(action.encode()), Some(action));
            }
        }
    }

    #[test]
    fn test_round_trip_all_calls() {
        for suit in Suit::ALL {
            let action = Action::Busso(BussoCall::Napoli(suit));
            assert_eq!(Action::decode(action.encode()), Some(action));
        }
        for rank in CallRank::ALL {
            for action in [
                Action::Busso(BussoCall::Bongioco(rank)),
                Action::Busso(BussoCall::Stella(rank)),
            ] {
                assert_eq!(Action::decode(action.encode()), Some(action));
            }
        }
        for claim in [MonteClaim::TreSette, MonteClaim::PuntoFigura] {
            let action = Action::Monte(claim);
            assert_eq!(Action::decode(action.encode()), Some(action));
        }
    }

    #[test]
    fn test_reserved_tag_rejected() {
        for payload in 0u8..=PAYLOAD_MASK {
            assert_eq!(Action::decode(0xC0 | payload), None);
        }
    }

    #[test]
    fn test_malformed_payloads_rejected() {
        // Play with rank nibble out of range.
        assert_eq!(Action::decode(0x0A), None);
        assert_eq!(Action::decode(0x3F), None);
        // Busso with call kind 00.
        assert_eq!(Action::decode(0x40), None);
        assert_eq!(Action::decode(0x4F), None);
        // Napoli with nonzero rank scope.
        assert_eq!(Action::decode(0x51), None);
        // Bongioco with nonzero suit scope.
        assert_eq!(Action::decode(0x64), None);
        // Bongioco/Stella rank field 3.
        assert_eq!(Action::decode(0x63), None);
        assert_eq!(Action::decode(0x73), None);
        // Monte with stray payload bits.
        assert_eq!(Action::decode(0x82), None);
        assert_eq!(Action::decode(0xBF), None);
    }

    #[test]
    fn test_serialization() {
        let action = Action::Busso(BussoCall::Napoli(Suit::Denari));
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, deserialized);
    }
}
