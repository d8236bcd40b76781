mod charts;
mod tables;

pub use charts::{format_suitability_chart, print_suitability_chart};
pub use tables::{
    format_assessment, format_batch_results, format_challenges, format_recommendations,
    format_soil_health, format_soil_profile, format_yield_estimate, print_assessment,
    print_batch_results, print_challenges, print_recommendations, print_soil_health,
    print_soil_profile, print_yield_estimate,
};
