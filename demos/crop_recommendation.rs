//! Crop recommendation example: rank crops for each season in Maharashtra.
//!
//! Run from the project root:
//!   cargo run --example crop_recommendation

use crop_yield_advisor::analysis::recommend_crops;
use crop_yield_advisor::models::{default_soil_profile, Season};
use crop_yield_advisor::visualization::{print_recommendations, print_suitability_chart};

fn main() {
    let region = "Maharashtra";
    let soil = default_soil_profile(region).predominant_type.to_string();

    for season in Season::ALL {
        println!("\n== {region}, {soil} soil, {season} ==");
        let recs = recommend_crops(region, &soil, season, 3);
        print_recommendations(&recs);
        print_suitability_chart(&recs);
    }
}
