use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProcessingError;
use crate::utils::constants::{AUTUMN_MONTHS, SPRING_MONTHS, SUMMER_MONTHS};

/// Four-way month partition. Variant order is the presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    /// Total over any month number; anything outside spring/summer/autumn is winter.
    pub fn from_month(month: u32) -> Self {
        if SPRING_MONTHS.contains(&month) {
            Season::Spring
        } else if SUMMER_MONTHS.contains(&month) {
            Season::Summer
        } else if AUTUMN_MONTHS.contains(&month) {
            Season::Autumn
        } else {
            Season::Winter
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "autumn" => Ok(Season::Autumn),
            "winter" => Ok(Season::Winter),
            other => Err(ProcessingError::InvalidFormat(format!(
                "Unknown season: '{}'",
                other
            ))),
        }
    }
}
