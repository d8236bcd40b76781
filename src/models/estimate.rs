use serde::{Deserialize, Serialize};

use super::soil::SoilSample;

/// Inputs to a single yield prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldRequest {
    pub crop: String,
    pub variety: String,
    pub area_hectares: f64,
    /// Free-text soil description, e.g. "alluvial" or "Deep black cotton soil"
    pub soil_type: String,
    pub region: String,
    pub ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
}

impl YieldRequest {
    /// Build a request from a soil sample.
    pub fn from_sample(
        crop: impl Into<String>,
        variety: impl Into<String>,
        area_hectares: f64,
        region: impl Into<String>,
        sample: &SoilSample,
    ) -> Self {
        Self {
            crop: crop.into(),
            variety: variety.into(),
            area_hectares,
            soil_type: sample.predominant_type.to_string(),
            region: region.into(),
            ph: sample.ph,
            nitrogen: sample.nitrogen as f64,
            phosphorus: sample.phosphorus as f64,
            potassium: sample.potassium as f64,
        }
    }
}

/// Direction of a factor's effect on yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
    AdjustmentNeeded,
    Medium,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::Positive => write!(f, "Positive"),
            Impact::Negative => write!(f, "Negative"),
            Impact::Neutral => write!(f, "Neutral"),
            Impact::AdjustmentNeeded => write!(f, "Adjustment Needed"),
            Impact::Medium => write!(f, "Medium"),
        }
    }
}

/// One explained contribution to a yield estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldFactor {
    pub name: String,
    pub impact: Impact,
    pub recommendation: String,
}

/// Result of a yield prediction. Quantities are in quintals for the whole area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldEstimate {
    pub expected_yield: f64,
    pub yield_range_min: f64,
    pub yield_range_max: f64,
    /// Either 81 or 94
    pub confidence_percent: u8,
    pub factors: Vec<YieldFactor>,
}

impl YieldEstimate {
    /// Expected yield per hectare for the given area.
    pub fn per_hectare(&self, area_hectares: f64) -> f64 {
        if area_hectares > 0.0 {
            self.expected_yield / area_hectares
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::soil::default_soil_profile;

    #[test]
    fn test_request_from_sample() {
        let sample = default_soil_profile("Maharashtra");
        let req = YieldRequest::from_sample("cotton", "RCH-2 Bt", 2.0, "Maharashtra", &sample);
        assert_eq!(req.soil_type, "black");
        assert_eq!(req.nitrogen, 240.0);
        assert_eq!(req.region, "Maharashtra");
    }

    #[test]
    fn test_impact_display() {
        assert_eq!(Impact::AdjustmentNeeded.to_string(), "Adjustment Needed");
        assert_eq!(Impact::Positive.to_string(), "Positive");
    }

    #[test]
    fn test_per_hectare() {
        let est = YieldEstimate {
            expected_yield: 100.0,
            yield_range_min: 92.0,
            yield_range_max: 108.0,
            confidence_percent: 94,
            factors: vec![],
        };
        assert!((est.per_hectare(4.0) - 25.0).abs() < 1e-9);
        assert_eq!(est.per_hectare(0.0), 0.0);
    }
}
