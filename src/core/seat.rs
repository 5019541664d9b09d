//! Seat identification.
//!
//! A seat is a stable integer assigned at join time; join order is turn
//! order and seats are never vacated. Binding a transport session to a
//! seat is the transport's job, not the engine's.

use serde::{Deserialize, Serialize};

/// Maximum number of seated players.
pub const MAX_PLAYERS: usize = 8;

/// A player's seat index (0-based, assigned in join order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seat(pub u8);

impl Seat {
    /// Create a seat from a raw index.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// The raw 0-based index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat after this one, round-robin over `players_len` seats.
    #[must_use]
    pub const fn next(self, players_len: usize) -> Seat {
        Seat(((self.0 as usize + 1) % players_len) as u8)
    }

    /// Iterate over every seat of a `players_len`-player game.
    pub fn all(players_len: usize) -> impl Iterator<Item = Seat> {
        (0..players_len as u8).map(Seat)
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "seat {}", self.0)
    }
}
