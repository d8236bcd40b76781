mod advisor;
mod challenges;
mod recommender;
mod soil_health;
mod soil_impact;
mod variability;
mod yield_predictor;

pub use advisor::{Advisor, YieldAssessment};
pub use challenges::{crops_with_challenges, get_crop_challenges, GENERIC_CHALLENGES};
pub use recommender::{
    recommend_crops, CropRecommendation, CropRecommendations, DEFAULT_PRIMARY_COUNT,
};
pub use soil_health::{
    analyze_sample, analyze_soil_health, ParameterReading, SoilHealthReport, SoilStatus,
};
pub use soil_impact::{
    compute_soil_impact, nitrogen_in_bonus_band, nitrogen_multiplier, ph_in_optimal_range,
    ph_multiplier, phosphorus_multiplier, potassium_multiplier, soil_type_multiplier,
};
pub use variability::{
    variability_from_band, FixedVariability, UniformVariability, Variability,
    DEFAULT_VARIABILITY_MAX, DEFAULT_VARIABILITY_MIN,
};
pub use yield_predictor::{confidence_percent, describe_factors, predict_yield};
