use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::Category;

/// Recommendation profile sent to the service as `mode=`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Budget,
    #[default]
    #[serde(alias = "mid-range", alias = "mid")]
    Midrange,
    Flagship,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Budget, Mode::Midrange, Mode::Flagship];

    /// Query-parameter value
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Budget => "budget",
            Mode::Midrange => "midrange",
            Mode::Flagship => "flagship",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Mode::Budget => "Budget",
            Mode::Midrange => "Mid-Range",
            Mode::Flagship => "Flagship",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            Mode::Budget => "Best value for money",
            Mode::Midrange => "Balanced specs and value",
            Mode::Flagship => "Top-tier features",
        }
    }

    pub fn next(self) -> Mode {
        match self {
            Mode::Budget => Mode::Midrange,
            Mode::Midrange => Mode::Flagship,
            Mode::Flagship => Mode::Budget,
        }
    }

    /// Parse a mode name, falling back to midrange for anything unrecognised
    pub fn parse_lenient(s: &str) -> Mode {
        s.parse().unwrap_or_default()
    }

    /// What a phone in this mode should aim for, per breakdown category
    pub fn target(self, category: Category) -> &'static str {
        use Category::*;
        match (self, category) {
            (Mode::Budget, Soc) => "Mid 6+ tier",
            (Mode::Budget, Ram) => "≥ 8GB",
            (Mode::Budget, Storage) => "≥ 128GB",
            (Mode::Budget, Display) => "OLED • 90-120Hz • ≥390ppi",
            (Mode::Budget, Camera) => "Score ≥ 5.5 + OIS",
            (Mode::Budget, Battery) => "≥ 4500 mAh",
            (Mode::Budget, Charging) => "≥ 30W",
            (Mode::Budget, Durability) => "Gorilla 5 / Ceramic",
            (Mode::Budget, Protection) => "IP53+",

            (Mode::Midrange, Soc) => "7-8 tier",
            (Mode::Midrange, Ram) => "≥ 12GB",
            (Mode::Midrange, Storage) => "≥ 256GB",
            (Mode::Midrange, Display) => "OLED • 120Hz • ≥390ppi",
            (Mode::Midrange, Camera) => "Score ≥ 6.5 + OIS + UW",
            (Mode::Midrange, Battery) => "≥ 5000 mAh",
            (Mode::Midrange, Charging) => "≥ 45W",
            (Mode::Midrange, Durability) => "Victus / Ceramic Shield",
            (Mode::Midrange, Protection) => "IP67/68",

            (Mode::Flagship, Soc) => "8-9+ tier",
            (Mode::Flagship, Ram) => "≥ 12-16GB",
            (Mode::Flagship, Storage) => "≥ 256-512GB",
            (Mode::Flagship, Display) => "OLED • 120Hz+ • ≥450ppi",
            (Mode::Flagship, Camera) => "Score ≥ 7.0 + OIS + UW",
            (Mode::Flagship, Battery) => "≥ 5000 mAh",
            (Mode::Flagship, Charging) => "≥ 60W / wireless",
            (Mode::Flagship, Durability) => "Victus 2 / Ceramic",
            (Mode::Flagship, Protection) => "IP68",

            (_, Extras) => "5G • NFC • Stereo",
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "budget" => Ok(Mode::Budget),
            "midrange" | "mid-range" | "mid" => Ok(Mode::Midrange),
            "flagship" => Ok(Mode::Flagship),
            other => Err(format!(
                "unknown mode '{}' (expected budget, midrange or flagship)",
                other
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
