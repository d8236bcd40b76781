use serde::{Deserialize, Serialize};

use crate::analysis::{
    analyze_soil_health, get_crop_challenges, predict_yield, recommend_crops, CropRecommendations,
    SoilHealthReport, Variability,
};
use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::models::{BatchResult, FieldPlan, Season, YieldEstimate, YieldRequest};

/// A yield estimate merged with the seasonal challenges and soil diagnosis
/// for the same field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldAssessment {
    pub request: YieldRequest,
    pub season: Season,
    pub estimate: YieldEstimate,
    pub challenges: Vec<String>,
    pub soil_health: SoilHealthReport,
}

/// Unified API over all calculators, owning the variability source.
pub struct Advisor {
    variability: Box<dyn Variability + Send>,
    primary_count: usize,
}

impl Advisor {
    /// Create an advisor with an explicit variability source.
    pub fn new(variability: Box<dyn Variability + Send>, primary_count: usize) -> Self {
        Self {
            variability,
            primary_count: primary_count.max(1),
        }
    }

    /// Create an advisor from validated configuration.
    pub fn from_config(config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        config.validate()?;
        Ok(Self::new(
            config.variability.build()?,
            config.recommendations.primary_count,
        ))
    }

    pub fn primary_count(&self) -> usize {
        self.primary_count
    }

    /// Predict yield for a field.
    pub fn predict(&mut self, request: &YieldRequest) -> Result<YieldEstimate, AdvisorError> {
        predict_yield(request, &mut self.variability)
    }

    /// Predict yield and attach seasonal challenges and soil health.
    pub fn assess(
        &mut self,
        request: &YieldRequest,
        season: Season,
    ) -> Result<YieldAssessment, AdvisorError> {
        let estimate = self.predict(request)?;
        Ok(YieldAssessment {
            request: request.clone(),
            season,
            estimate,
            challenges: get_crop_challenges(&request.crop, &request.region, season),
            soil_health: analyze_soil_health(
                request.ph,
                request.nitrogen,
                request.phosphorus,
                request.potassium,
            ),
        })
    }

    pub fn soil_health(
        &self,
        ph: f64,
        nitrogen: f64,
        phosphorus: f64,
        potassium: f64,
    ) -> SoilHealthReport {
        analyze_soil_health(ph, nitrogen, phosphorus, potassium)
    }

    pub fn challenges(&self, crop: &str, region: &str, season: Season) -> Vec<String> {
        get_crop_challenges(crop, region, season)
    }

    /// Ranked crop recommendations using the configured primary tier size.
    pub fn recommend(&self, region: &str, soil_type: &str, season: Season) -> CropRecommendations {
        recommend_crops(region, soil_type, season, self.primary_count)
    }

    /// Predict every plan independently. A failing row becomes an error
    /// result; the rest of the batch still runs.
    pub fn predict_batch(&mut self, plans: &[FieldPlan]) -> Vec<BatchResult> {
        tracing::info!(count = plans.len(), "batch prediction started");
        let results: Vec<BatchResult> = plans
            .iter()
            .map(|plan| match self.predict(&plan.to_request()) {
                Ok(estimate) => BatchResult::success(plan, &estimate),
                Err(e) => {
                    tracing::warn!(field_id = %plan.field_id, error = %e, "skipping field plan");
                    BatchResult::failure(plan, e)
                }
            })
            .collect();
        let failed = results.iter().filter(|r| !r.is_ok()).count();
        tracing::info!(count = results.len(), failed, "batch prediction finished");
        results
    }
}

impl Default for Advisor {
    /// ±3% entropy-seeded variability and the default primary tier size.
    fn default() -> Self {
        Self::new(
            Box::new(crate::analysis::UniformVariability::standard()),
            crate::analysis::DEFAULT_PRIMARY_COUNT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FixedVariability;
    use crate::config::VariabilityConfig;

    fn deterministic() -> Advisor {
        Advisor::new(Box::new(FixedVariability::neutral()), 3)
    }

    fn rice_request() -> YieldRequest {
        YieldRequest {
            crop: "rice".to_string(),
            variety: "IR36".to_string(),
            area_hectares: 1.0,
            soil_type: "alluvial".to_string(),
            region: "Punjab".to_string(),
            ph: 6.5,
            nitrogen: 340.0,
            phosphorus: 18.0,
            potassium: 210.0,
        }
    }

    #[test]
    fn test_predict_matches_standalone() {
        let mut advisor = deterministic();
        let from_advisor = advisor.predict(&rice_request()).unwrap();
        let standalone = predict_yield(&rice_request(), &mut FixedVariability::neutral()).unwrap();
        assert_eq!(from_advisor, standalone);
    }

    #[test]
    fn test_assess_merges_challenges_and_soil_health() {
        let mut advisor = deterministic();
        let assessment = advisor.assess(&rice_request(), Season::Kharif).unwrap();
        assert_eq!(
            assessment.challenges,
            vec![
                "Potential bacterial leaf blight due to high humidity",
                "Monitor for stem borers"
            ]
        );
        assert_eq!(assessment.soil_health, analyze_soil_health(6.5, 340.0, 18.0, 210.0));
        assert_eq!(assessment.season, Season::Kharif);
    }

    #[test]
    fn test_assess_propagates_invalid_area() {
        let mut advisor = deterministic();
        let mut req = rice_request();
        req.area_hectares = 0.0;
        assert!(matches!(
            advisor.assess(&req, Season::Kharif),
            Err(AdvisorError::InvalidArea(_))
        ));
    }

    #[test]
    fn test_recommend_uses_primary_count() {
        let advisor = Advisor::new(Box::new(FixedVariability::neutral()), 1);
        let recs = advisor.recommend("Punjab", "alluvial", Season::Kharif);
        assert_eq!(recs.primary.len(), 1);
    }

    fn plan(field_id: &str, area_hectares: f64) -> FieldPlan {
        FieldPlan {
            field_id: field_id.to_string(),
            crop: "rice".to_string(),
            variety: "IR36".to_string(),
            area_hectares,
            soil_type: Some("alluvial".to_string()),
            region: "Punjab".to_string(),
            ph: Some(6.5),
            nitrogen: Some(340.0),
            phosphorus: Some(18.0),
            potassium: Some(210.0),
        }
    }

    #[test]
    fn test_batch_keeps_going_after_error() {
        let mut advisor = deterministic();
        let results = advisor.predict_batch(&[plan("A", 1.0), plan("B", -3.0), plan("C", 2.0)]);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(!results[1].is_ok());
        assert!(results[1].error.as_deref().unwrap().contains("Invalid area"));
        assert!(results[2].is_ok());
        assert_approx_eq::assert_approx_eq!(
            results[2].expected_yield.unwrap(),
            2.0 * results[0].expected_yield.unwrap(),
            1e-9
        );
    }

    #[test]
    fn test_seeded_advisors_agree() {
        let mut config = AdvisorConfig::default();
        config.variability = VariabilityConfig {
            seed: Some(99),
            ..VariabilityConfig::default()
        };
        let mut a = Advisor::from_config(&config).unwrap();
        let mut b = Advisor::from_config(&config).unwrap();
        for _ in 0..5 {
            assert_eq!(
                a.predict(&rice_request()).unwrap(),
                b.predict(&rice_request()).unwrap()
            );
        }
    }

    #[test]
    fn test_default_advisor_stays_in_band() {
        let mut advisor = Advisor::default();
        let baseline = deterministic().predict(&rice_request()).unwrap().expected_yield;
        for _ in 0..50 {
            let y = advisor.predict(&rice_request()).unwrap().expected_yield;
            assert!(y >= baseline * 0.97 - 1e-9 && y <= baseline * 1.03 + 1e-9);
        }
    }
}
