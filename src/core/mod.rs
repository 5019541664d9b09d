//! Core engine types: seats, players, the table, actions, responses, RNG.
//!
//! These are the building blocks the game state machine composes. None of
//! them knows about turn order or legality; that logic lives in
//! [`crate::game`].

pub mod action;
pub mod player;
pub mod response;
pub mod rng;
pub mod seat;
pub mod table;

pub use action::{Action, BussoCall, CallRank, MonteClaim};
pub use player::{Declarations, Player, MAX_HAND};
pub use response::{Accepted, Rejected, Response};
pub use rng::{EntropySource, GameRng, GameRngState};
pub use seat::{Seat, MAX_PLAYERS};
pub use table::Table;
