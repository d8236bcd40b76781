//! Yield estimate example: predict a rice crop in Punjab and show the full assessment.
//!
//! Run from the project root:
//!   cargo run --example yield_estimate

use crop_yield_advisor::analysis::{Advisor, FixedVariability};
use crop_yield_advisor::models::{default_soil_profile, Season, YieldRequest};
use crop_yield_advisor::visualization::print_assessment;

fn main() {
    // Neutral variability so the numbers are reproducible.
    let mut advisor = Advisor::new(Box::new(FixedVariability::neutral()), 3);

    let request = YieldRequest {
        crop: "rice".to_string(),
        variety: "IR36".to_string(),
        area_hectares: 2.5,
        soil_type: "alluvial".to_string(),
        region: "Punjab".to_string(),
        ph: 6.5,
        nitrogen: 340.0,
        phosphorus: 18.0,
        potassium: 210.0,
    };

    match advisor.assess(&request, Season::Kharif) {
        Ok(assessment) => print_assessment(&assessment),
        Err(e) => eprintln!("Prediction failed: {e}"),
    }

    // Same crop on Kerala's typical laterite soil.
    let sample = default_soil_profile("Kerala");
    let request = YieldRequest::from_sample("rice", "Swarna", 2.5, "Kerala", &sample);
    match advisor.predict(&request) {
        Ok(estimate) => println!(
            "\nKerala, Swarna on {}: {:.1} quintals ({}% confidence)",
            sample.predominant_type, estimate.expected_yield, estimate.confidence_percent
        ),
        Err(e) => eprintln!("Prediction failed: {e}"),
    }
}
