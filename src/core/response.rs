//! Engine responses and their one-byte wire encoding.
//!
//! Every dispatched action gets exactly one response: an outcome bit plus
//! a reason code. Rule violations and protocol errors are reported this
//! way and never unwind.
//!
//! Wire form: top bit = outcome (1 accepted, 0 rejected), low seven bits =
//! the reason code. Codes are stable; new reasons extend the enumeration
//! without renumbering.

use serde::{Deserialize, Serialize};
use std::fmt;

const OUTCOME_BIT: u8 = 0x80;
const REASON_MASK: u8 = 0x7F;

/// Why an action was accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accepted {
    /// First card of the trick; it establishes the led suit.
    FirstOfTrick,
    /// Player is void in the led suit and may play anything.
    Piombo,
    /// Card follows the led suit.
    FollowedSuit,
    /// Special declaration recorded.
    Declared,
    /// Monte claim validated; the hand is over.
    MonteCalled,
}

impl Accepted {
    const fn code(self) -> u8 {
        self as u8
    }

    const fn from_code(code: u8) -> Option<Accepted> {
        match code {
            0 => Some(Accepted::FirstOfTrick),
            1 => Some(Accepted::Piombo),
            2 => Some(Accepted::FollowedSuit),
            3 => Some(Accepted::Declared),
            4 => Some(Accepted::MonteCalled),
            _ => None,
        }
    }
}

/// Why an action was rejected. Nothing was mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejected {
    /// Player holds the led suit and must follow it.
    IllegalPlay,
    /// The played card is not in the acting player's hand.
    NoSuchCard,
    /// The game is not currently accepting turns.
    NotPlaying,
    /// The claimed seat does not own the turn.
    AuthMismatch,
    /// Unrecognized or malformed action byte.
    UnknownCommand,
    /// This declaration category was already used by this player.
    AlreadyDeclared,
    /// Declarations are switched off, globally or for this player.
    DeclarationsDisabled,
    /// The declared holding is not actually in the player's hand.
    ClaimNotHeld,
}

impl Rejected {
    const fn code(self) -> u8 {
        self as u8
    }

    const fn from_code(code: u8) -> Option<Rejected> {
        match code {
            0 => Some(Rejected::IllegalPlay),
            1 => Some(Rejected::NoSuchCard),
            2 => Some(Rejected::NotPlaying),
            3 => Some(Rejected::AuthMismatch),
            4 => Some(Rejected::UnknownCommand),
            5 => Some(Rejected::AlreadyDeclared),
            6 => Some(Rejected::DeclarationsDisabled),
            7 => Some(Rejected::ClaimNotHeld),
            _ => None,
        }
    }
}

/// The engine's answer to one dispatched action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Response {
    Accepted(Accepted),
    Rejected(Rejected),
}

impl Response {
    /// Did the action go through?
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Response::Accepted(_))
    }

    /// Pack into the wire byte.
    #[must_use]
    pub const fn encode(self) -> u8 {
        match self {
            Response::Accepted(reason) => OUTCOME_BIT | reason.code(),
            Response::Rejected(reason) => reason.code(),
        }
    }

    /// Decode a wire byte, or `None` for an unassigned reason code.
    #[must_use]
    pub const fn decode(byte: u8) -> Option<Response> {
        let code = byte & REASON_MASK;
        if byte & OUTCOME_BIT != 0 {
            match Accepted::from_code(code) {
                Some(reason) => Some(Response::Accepted(reason)),
                None => None,
            }
        } else {
            match Rejected::from_code(code) {
                Some(reason) => Some(Response::Rejected(reason)),
                None => None,
            }
        }
    }
}

impl From<Accepted> for Response {
    fn from(reason: Accepted) -> Self {
        Response::Accepted(reason)
    }
}

impl From<Rejected> for Response {
    fn from(reason: Rejected) -> Self {
        Response::Rejected(reason)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Accepted(reason) => write!(f, "ok: {reason:?}"),
            Response::Rejected(reason) => write!(f, "rejected: {reason:?}"),
        }
    }
}
