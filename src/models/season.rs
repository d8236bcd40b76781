use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;

/// Indian cropping season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Monsoon crop, sown June to September.
    Kharif,
    /// Winter crop, October to February.
    Rabi,
    /// Short summer crop between rabi harvest and the monsoon.
    Zaid,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Kharif, Season::Rabi, Season::Zaid];

    /// Classify a zero-based calendar month (0 = January).
    ///
    /// Kharif covers months 5..=8, rabi 9..=11 and 0..=1, everything else
    /// (including out-of-range values) is zaid. Challenge tables are keyed on
    /// this exact banding.
    pub fn from_month0(month0: u32) -> Self {
        match month0 {
            5..=8 => Season::Kharif,
            9..=11 | 0..=1 => Season::Rabi,
            _ => Season::Zaid,
        }
    }

    /// Season for any chrono date.
    pub fn from_date(date: &impl Datelike) -> Self {
        Self::from_month0(date.month0())
    }

    /// Season for the current local calendar month.
    pub fn current() -> Self {
        Self::from_date(&chrono::Local::now())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Kharif => "kharif",
            Season::Rabi => "rabi",
            Season::Zaid => "zaid",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Season {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kharif" => Ok(Season::Kharif),
            "rabi" => Ok(Season::Rabi),
            "zaid" | "zayed" => Ok(Season::Zaid),
            _ => Err(AdvisorError::ParseError(format!("Unknown season: '{s}'"))),
        }
    }
}
