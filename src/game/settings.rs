//! Game settings, fixed at construction.
//!
//! The configuration surface is a 4-bit mask chosen before the first
//! deal; there is no runtime reconfiguration. Internally the flags are
//! plain fields - the packed byte exists only for the configuration
//! boundary, like the action bytes do for the wire.

use serde::{Deserialize, Serialize};

use crate::cards::ScoringVariant;

const BUSSO_ENABLED: u8 = 1 << 0;
const TEAMS_ENABLED: u8 = 1 << 1;
const PERDERE_ENABLED: u8 = 1 << 2;
const MONTE_ENABLED: u8 = 1 << 3;

/// Construction-time game configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Accept busso declarations.
    pub busso_enabled: bool,
    /// Partnership play (alternating seats form two teams).
    pub teams_enabled: bool,
    /// Accept monte declarations.
    pub monte_enabled: bool,
    /// Point-calculation strategy; never changes mid-game.
    pub scoring: ScoringVariant,
}

impl GameSettings {
    /// Everything off, classic scoring.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable busso declarations.
    #[must_use]
    pub fn with_busso(mut self) -> Self {
        self.busso_enabled = true;
        self
    }

    /// Enable partnership play.
    #[must_use]
    pub fn with_teams(mut self) -> Self {
        self.teams_enabled = true;
        self
    }

    /// Enable monte declarations.
    #[must_use]
    pub fn with_monte(mut self) -> Self {
        self.monte_enabled = true;
        self
    }

    /// Use the "perdere" scoring variant.
    #[must_use]
    pub fn with_perdere(mut self) -> Self {
        self.scoring = ScoringVariant::Perdere;
        self
    }

    /// Decode the packed configuration byte. High bits are ignored.
    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        Self {
            busso_enabled: bits & BUSSO_ENABLED != 0,
            teams_enabled: bits & TEAMS_ENABLED != 0,
            monte_enabled: bits & MONTE_ENABLED != 0,
            scoring: if bits & PERDERE_ENABLED != 0 {
                ScoringVariant::Perdere
            } else {
                ScoringVariant::Classic
            },
        }
    }

    /// The packed configuration byte.
    #[must_use]
    pub fn bits(self) -> u8 {
        let mut bits = 0;
        if self.busso_enabled {
            bits |= BUSSO_ENABLED;
        }
        if self.teams_enabled {
            bits |= TEAMS_ENABLED;
        }
        if self.scoring == ScoringVariant::Perdere {
            bits |= PERDERE_ENABLED;
        }
        if self.monte_enabled {
            bits |= MONTE_ENABLED;
        }
        bits
    }
}
