use serde::{Deserialize, Serialize};

use crate::models::SoilSample;

/// Classification band for one soil parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoilStatus {
    Low,
    Medium,
    High,
    Acidic,
    Alkaline,
    Optimal,
    /// Part of the reporting vocabulary; the band classifier never emits it.
    Neutral,
}

impl std::fmt::Display for SoilStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SoilStatus::Low => "Low",
            SoilStatus::Medium => "Medium",
            SoilStatus::High => "High",
            SoilStatus::Acidic => "Acidic",
            SoilStatus::Alkaline => "Alkaline",
            SoilStatus::Optimal => "Optimal",
            SoilStatus::Neutral => "Neutral",
        };
        write!(f, "{s}")
    }
}

/// Classified value of a single soil parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterReading {
    pub value: f64,
    pub status: SoilStatus,
    pub recommendation: String,
}

/// Per-parameter soil health diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilHealthReport {
    pub ph: ParameterReading,
    pub nitrogen: ParameterReading,
    pub phosphorus: ParameterReading,
    pub potassium: ParameterReading,
}

impl SoilHealthReport {
    /// Parameters in display order with their names.
    pub fn parameters(&self) -> [(&'static str, &ParameterReading); 4] {
        [
            ("pH", &self.ph),
            ("Nitrogen", &self.nitrogen),
            ("Phosphorus", &self.phosphorus),
            ("Potassium", &self.potassium),
        ]
    }

    /// Look up a parameter by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&ParameterReading> {
        self.parameters()
            .into_iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, r)| r)
    }

    /// Parameters that fall outside their target band.
    pub fn deficiencies(&self) -> Vec<&'static str> {
        self.parameters()
            .into_iter()
            .filter(|(_, r)| !matches!(r.status, SoilStatus::Optimal | SoilStatus::Medium))
            .map(|(n, _)| n)
            .collect()
    }
}

// Band limits. Values equal to a limit fall in the middle band.
const PH_ACIDIC_BELOW: f64 = 5.5;
const PH_ALKALINE_ABOVE: f64 = 7.5;
const NITROGEN_LOW_BELOW: f64 = 250.0;
const NITROGEN_HIGH_ABOVE: f64 = 450.0;
const PHOSPHORUS_LOW_BELOW: f64 = 12.0;
const PHOSPHORUS_HIGH_ABOVE: f64 = 25.0;
const POTASSIUM_LOW_BELOW: f64 = 150.0;
const POTASSIUM_HIGH_ABOVE: f64 = 280.0;

fn reading(value: f64, status: SoilStatus, recommendation: &str) -> ParameterReading {
    ParameterReading {
        value,
        status,
        recommendation: recommendation.to_string(),
    }
}

fn classify_ph(ph: f64) -> ParameterReading {
    if ph < PH_ACIDIC_BELOW {
        reading(ph, SoilStatus::Acidic, "Apply agricultural lime to raise soil pH")
    } else if ph > PH_ALKALINE_ABOVE {
        reading(ph, SoilStatus::Alkaline, "Apply gypsum or elemental sulphur to lower soil pH")
    } else {
        reading(ph, SoilStatus::Optimal, "Soil pH is suitable for most crops")
    }
}

fn classify_nutrient(
    value: f64,
    low_below: f64,
    high_above: f64,
    advice: [&str; 3],
) -> ParameterReading {
    let [low, medium, high] = advice;
    if value < low_below {
        reading(value, SoilStatus::Low, low)
    } else if value > high_above {
        reading(value, SoilStatus::High, high)
    } else {
        reading(value, SoilStatus::Medium, medium)
    }
}

/// Classify pH and available N, P, K against fixed bands.
///
/// Inputs are accepted as given: no range validation or clamping.
pub fn analyze_soil_health(
    ph: f64,
    nitrogen: f64,
    phosphorus: f64,
    potassium: f64,
) -> SoilHealthReport {
    SoilHealthReport {
        ph: classify_ph(ph),
        nitrogen: classify_nutrient(
            nitrogen,
            NITROGEN_LOW_BELOW,
            NITROGEN_HIGH_ABOVE,
            [
                "Apply nitrogen-rich fertilizers such as urea or well-rotted manure",
                "Maintain nitrogen with split applications during crop growth",
                "Reduce nitrogen fertilizer to avoid lodging and leaching",
            ],
        ),
        phosphorus: classify_nutrient(
            phosphorus,
            PHOSPHORUS_LOW_BELOW,
            PHOSPHORUS_HIGH_ABOVE,
            [
                "Apply DAP or single super phosphate at sowing",
                "Maintain phosphorus with a basal dose at sowing",
                "Skip phosphatic fertilizers this season",
            ],
        ),
        potassium: classify_nutrient(
            potassium,
            POTASSIUM_LOW_BELOW,
            POTASSIUM_HIGH_ABOVE,
            [
                "Apply muriate of potash (MOP) before sowing",
                "Maintain potassium with a moderate MOP dose",
                "Potassium is sufficient; no potash needed",
            ],
        ),
    }
}

/// Convenience wrapper for a full soil sample.
pub fn analyze_sample(sample: &SoilSample) -> SoilHealthReport {
    analyze_soil_health(
        sample.ph,
        sample.nitrogen as f64,
        sample.phosphorus as f64,
        sample.potassium as f64,
    )
}
