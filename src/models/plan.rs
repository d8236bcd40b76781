use serde::{Deserialize, Serialize};

use super::estimate::{YieldEstimate, YieldRequest};
use super::soil::default_soil_profile;

/// One row of a batch planning file.
///
/// Soil columns may be left empty; they are then taken from the region's
/// default soil profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldPlan {
    pub field_id: String,
    pub crop: String,
    #[serde(default)]
    pub variety: String,
    pub area_hectares: f64,
    #[serde(default)]
    pub soil_type: Option<String>,
    pub region: String,
    #[serde(default)]
    pub ph: Option<f64>,
    #[serde(default)]
    pub nitrogen: Option<f64>,
    #[serde(default)]
    pub phosphorus: Option<f64>,
    #[serde(default)]
    pub potassium: Option<f64>,
}

impl FieldPlan {
    /// Resolve missing soil values and build a prediction request.
    pub fn to_request(&self) -> YieldRequest {
        let profile = default_soil_profile(&self.region);
        YieldRequest {
            crop: self.crop.clone(),
            variety: self.variety.clone(),
            area_hectares: self.area_hectares,
            soil_type: self
                .soil_type
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| profile.predominant_type.to_string()),
            region: self.region.clone(),
            ph: self.ph.unwrap_or(profile.ph),
            nitrogen: self.nitrogen.unwrap_or(profile.nitrogen as f64),
            phosphorus: self.phosphorus.unwrap_or(profile.phosphorus as f64),
            potassium: self.potassium.unwrap_or(profile.potassium as f64),
        }
    }
}

/// Outcome for one field plan. Exactly one of the estimate columns or
/// `error` is filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub field_id: String,
    pub crop: String,
    pub variety: String,
    pub expected_yield: Option<f64>,
    pub yield_range_min: Option<f64>,
    pub yield_range_max: Option<f64>,
    pub confidence_percent: Option<u8>,
    pub error: Option<String>,
}

impl BatchResult {
    pub fn success(plan: &FieldPlan, estimate: &YieldEstimate) -> Self {
        Self {
            field_id: plan.field_id.clone(),
            crop: plan.crop.clone(),
            variety: plan.variety.clone(),
            expected_yield: Some(estimate.expected_yield),
            yield_range_min: Some(estimate.yield_range_min),
            yield_range_max: Some(estimate.yield_range_max),
            confidence_percent: Some(estimate.confidence_percent),
            error: None,
        }
    }

    pub fn failure(plan: &FieldPlan, error: impl ToString) -> Self {
        Self {
            field_id: plan.field_id.clone(),
            crop: plan.crop.clone(),
            variety: plan.variety.clone(),
            expected_yield: None,
            yield_range_min: None,
            yield_range_max: None,
            confidence_percent: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
