//! Configuration and lifecycle errors.
//!
//! These are the fatal conditions: rule violations during play are never
//! errors in this sense, they come back as [`crate::core::Response`]
//! reason codes. When `start` returns one of these the game has moved to
//! its terminal `Error` state and accepts nothing further.

use thiserror::Error;

/// Fatal game-instance errors.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("table is full")]
    TableFull,
    #[error("players can only join before the deal")]
    JoinClosed,
    #[error("can't start with no players")]
    NoPlayers,
    #[error("no hand size defined for {0} players")]
    UnsupportedPlayerCount(usize),
    #[error("game already started")]
    AlreadyStarted,
    #[error("stock ran out while dealing")]
    StockExhausted,
}
