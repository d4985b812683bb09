//! Fixed fleet data: the vessels, their engines, and the trip kinds on offer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A vessel in the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vessel {
    Mahina,
    Temu,
    MissKat,
    Tearii,
}

impl Vessel {
    pub const ALL: [Self; 4] = [Self::Mahina, Self::Temu, Self::MissKat, Self::Tearii];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Mahina => "Mahina",
            Self::Temu => "Temu",
            Self::MissKat => "Miss Kat",
            Self::Tearii => "Teari'i",
        }
    }

    /// The engines fitted to this vessel, in hull order.
    ///
    /// Engine-hour readings are entered and stored in this order.
    #[must_use]
    pub fn engines(self) -> &'static [&'static str] {
        match self {
            Self::Mahina => &["Honda BF350 (Port)", "Honda BF350 (Starboard)"],
            Self::Temu => &["Honda 150"],
            Self::MissKat => &["Honda 100"],
            Self::Tearii => &["Yamaha 200"],
        }
    }
}

impl fmt::Display for Vessel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The kind of trip, which sets the default planned duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripKind {
    FishingCharter,
    WhaleWatch,
    LagoonCruise,
}

impl TripKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FishingCharter => "Fishing Charter",
            Self::WhaleWatch => "Whale Watch",
            Self::LagoonCruise => "Lagoon Cruise",
        }
    }

    /// Planned duration in hours when none is given explicitly.
    #[must_use]
    pub fn default_hours(self) -> u32 {
        match self {
            Self::FishingCharter => 5,
            Self::WhaleWatch => 2,
            Self::LagoonCruise => 3,
        }
    }
}

impl fmt::Display for TripKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
