//! # tressette
//!
//! The authoritative rules engine for Tressette, the Italian trick-taking
//! card game, for 2-8 players.
//!
//! The engine owns all game truth: card custody, turn order, play
//! legality, trick resolution, scoring, and the one-byte action/response
//! protocol that external transports drive. Everything else - randomness
//! quality, network framing, session-to-seat binding, persistence,
//! rendering - belongs to collaborators outside this crate.
//!
//! ## Design Principles
//!
//! 1. **Typed inside, packed at the boundary**: actions, responses, cards
//!    and settings are tagged Rust values; their bitmask encodings exist
//!    only at the wire/configuration boundary.
//!
//! 2. **Injected entropy**: the engine consumes 32-bit words from an
//!    [`core::EntropySource`] chosen by the caller and never seeds
//!    itself, so every shuffle is reproducible under a fixed seed.
//!
//! 3. **Bounded everything**: at most 8 players, 40 cards, 13-card
//!    hands; all storage is inline and fixed-capacity.
//!
//! 4. **Errors are answers**: rule violations and protocol misuse come
//!    back as [`core::Response`] reason codes, never panics; only
//!    configuration mistakes are `Result` errors, and those are fatal to
//!    the instance.
//!
//! ## Example
//!
//! ```
//! use tressette::core::{Action, GameRng, Seat};
//! use tressette::game::{Game, GameSettings};
//!
//! let mut rng = GameRng::new(42);
//! let mut game = Game::new(GameSettings::new(), &mut rng);
//!
//! for _ in 0..4 {
//!     game.add_player().unwrap();
//! }
//! game.start().unwrap();
//!
//! // Seat 0 leads the first trick.
//! let card = game.player(Seat::new(0)).hand()[0];
//! let response = game.dispatch_authenticated(Seat::new(0), Action::Play(card));
//! assert!(response.is_accepted());
//! ```
//!
//! ## Modules
//!
//! - `cards`: suits, ranks, the deck, and point values
//! - `core`: seats, players, the table, actions, responses, entropy
//! - `game`: settings and the state machine itself

pub mod cards;
pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::cards::{Card, Deck, Rank, ScoringVariant, Suit, Thirds, DECK_SIZE};

pub use crate::core::{
    Accepted, Action, BussoCall, CallRank, Declarations, EntropySource, GameRng, GameRngState,
    MonteClaim, Player, Rejected, Response, Seat, Table, MAX_HAND, MAX_PLAYERS,
};

pub use crate::game::{Game, GameError, GameSettings, GameState};
