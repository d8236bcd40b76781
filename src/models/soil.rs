use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;

/// Predominant soil order of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Alluvial,
    Black,
    Red,
    Laterite,
    Loam,
    Usar,
    Calcareous,
}

impl SoilType {
    pub const ALL: [SoilType; 7] = [
        SoilType::Alluvial,
        SoilType::Black,
        SoilType::Red,
        SoilType::Laterite,
        SoilType::Loam,
        SoilType::Usar,
        SoilType::Calcareous,
    ];

    /// Keyword priority for free-text descriptions. Soil multipliers are
    /// keyed off the same order, so "black alluvial" is black everywhere.
    pub const DETECTION_ORDER: [SoilType; 7] = [
        SoilType::Black,
        SoilType::Red,
        SoilType::Alluvial,
        SoilType::Usar,
        SoilType::Calcareous,
        SoilType::Laterite,
        SoilType::Loam,
    ];

    /// Best-effort detection from a free-text description such as "deep black soil".
    /// First keyword in [`SoilType::DETECTION_ORDER`] wins.
    pub fn from_description(description: &str) -> Option<SoilType> {
        let lower = description.trim().to_lowercase();
        SoilType::DETECTION_ORDER
            .into_iter()
            .find(|t| lower.contains(t.as_str()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Alluvial => "alluvial",
            SoilType::Black => "black",
            SoilType::Red => "red",
            SoilType::Laterite => "laterite",
            SoilType::Loam => "loam",
            SoilType::Usar => "usar",
            SoilType::Calcareous => "calcareous",
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SoilType {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        SoilType::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| AdvisorError::ParseError(format!("Unknown soil type: '{s}'")))
    }
}

/// A soil test result for a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilSample {
    pub predominant_type: SoilType,
    /// pH, instrument range 3-10
    pub ph: f64,
    /// Available nitrogen in kg/ha
    pub nitrogen: u32,
    /// Available phosphorus in kg/ha
    pub phosphorus: u32,
    /// Available potassium in kg/ha
    pub potassium: u32,
    /// Organic carbon percentage
    pub organic_matter: f64,
    pub texture: String,
}

/// Region whose profile is used when a region has no sample of its own.
pub const DEFAULT_SOIL_REGION: &str = "West Bengal";

struct SoilProfile {
    region: &'static str,
    soil: SoilType,
    ph: f64,
    nitrogen: u32,
    phosphorus: u32,
    potassium: u32,
    organic_matter: f64,
    texture: &'static str,
}

// First entry is the fallback profile.
const SOIL_PROFILES: &[SoilProfile] = &[
    SoilProfile {
        region: "West Bengal",
        soil: SoilType::Alluvial,
        ph: 6.5,
        nitrogen: 280,
        phosphorus: 22,
        potassium: 240,
        organic_matter: 0.65,
        texture: "Clay loam",
    },
    SoilProfile {
        region: "Punjab",
        soil: SoilType::Alluvial,
        ph: 7.8,
        nitrogen: 320,
        phosphorus: 18,
        potassium: 260,
        organic_matter: 0.45,
        texture: "Sandy loam",
    },
    SoilProfile {
        region: "Uttar Pradesh",
        soil: SoilType::Alluvial,
        ph: 7.2,
        nitrogen: 300,
        phosphorus: 16,
        potassium: 230,
        organic_matter: 0.5,
        texture: "Silty loam",
    },
    SoilProfile {
        region: "Maharashtra",
        soil: SoilType::Black,
        ph: 7.9,
        nitrogen: 240,
        phosphorus: 14,
        potassium: 320,
        organic_matter: 0.6,
        texture: "Clay",
    },
    SoilProfile {
        region: "Karnataka",
        soil: SoilType::Red,
        ph: 6.2,
        nitrogen: 260,
        phosphorus: 12,
        potassium: 190,
        organic_matter: 0.55,
        texture: "Sandy clay loam",
    },
    SoilProfile {
        region: "Kerala",
        soil: SoilType::Laterite,
        ph: 5.4,
        nitrogen: 230,
        phosphorus: 10,
        potassium: 150,
        organic_matter: 1.1,
        texture: "Gravelly loam",
    },
    SoilProfile {
        region: "Rajasthan",
        soil: SoilType::Calcareous,
        ph: 8.3,
        nitrogen: 180,
        phosphorus: 11,
        potassium: 210,
        organic_matter: 0.3,
        texture: "Sandy",
    },
];

impl SoilProfile {
    fn to_sample(&self) -> SoilSample {
        SoilSample {
            predominant_type: self.soil,
            ph: self.ph,
            nitrogen: self.nitrogen,
            phosphorus: self.phosphorus,
            potassium: self.potassium,
            organic_matter: self.organic_matter,
            texture: self.texture.to_string(),
        }
    }
}

/// Typical soil sample for a region. Unmapped regions get the West Bengal profile.
pub fn default_soil_profile(region: &str) -> SoilSample {
    let key = region.trim();
    match SOIL_PROFILES.iter().find(|p| p.region.eq_ignore_ascii_case(key)) {
        Some(profile) => profile.to_sample(),
        None => {
            tracing::debug!(region, "no soil profile for region, using {DEFAULT_SOIL_REGION}");
            SOIL_PROFILES[0].to_sample()
        }
    }
}

/// Regions with a mapped soil profile.
pub fn profiled_regions() -> Vec<&'static str> {
    SOIL_PROFILES.iter().map(|p| p.region).collect()
}
