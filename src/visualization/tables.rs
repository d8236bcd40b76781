use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::analysis::{CropRecommendation, CropRecommendations, SoilHealthReport, SoilStatus, YieldAssessment};
use crate::models::{BatchResult, Impact, SoilSample, YieldEstimate};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn heading(output: &mut String, title: &str) {
    output.push_str(&format!("\n{}\n", title.bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));
}

fn impact_cell(impact: Impact) -> Cell {
    let cell = Cell::new(impact.to_string());
    match impact {
        Impact::Positive => cell.fg(Color::Green),
        Impact::Negative => cell.fg(Color::Red),
        Impact::AdjustmentNeeded | Impact::Medium => cell.fg(Color::Yellow),
        Impact::Neutral => cell,
    }
}

fn status_cell(status: SoilStatus) -> Cell {
    let cell = Cell::new(status.to_string());
    match status {
        SoilStatus::Optimal | SoilStatus::Medium => cell.fg(Color::Green),
        SoilStatus::Low | SoilStatus::Acidic => cell.fg(Color::Red),
        SoilStatus::High | SoilStatus::Alkaline => cell.fg(Color::Yellow),
        SoilStatus::Neutral => cell,
    }
}

/// Format a yield estimate with its range, confidence and factors.
pub fn format_yield_estimate(estimate: &YieldEstimate, area_hectares: f64) -> String {
    let mut output = String::new();
    heading(&mut output, "Yield Estimate");

    let mut table = new_table(vec!["Metric", "Value", "Unit"]);
    table.add_row(vec![
        Cell::new("Expected Yield"),
        Cell::new(format!("{:.2}", estimate.expected_yield)),
        Cell::new("quintals"),
    ]);
    table.add_row(vec![
        Cell::new("Range"),
        Cell::new(format!(
            "{:.2} - {:.2}",
            estimate.yield_range_min, estimate.yield_range_max
        )),
        Cell::new("quintals"),
    ]);
    table.add_row(vec![
        Cell::new("Per Hectare"),
        Cell::new(format!("{:.2}", estimate.per_hectare(area_hectares))),
        Cell::new("q/ha"),
    ]);
    table.add_row(vec![
        Cell::new("Confidence"),
        Cell::new(format!("{}%", estimate.confidence_percent)),
        Cell::new(""),
    ]);
    output.push_str(&format!("{table}\n"));

    let mut factors = new_table(vec!["Factor", "Impact", "Recommendation"]);
    for factor in &estimate.factors {
        factors.add_row(vec![
            Cell::new(&factor.name),
            impact_cell(factor.impact),
            Cell::new(&factor.recommendation),
        ]);
    }
    output.push_str(&format!("{factors}"));
    output
}

/// Print a formatted yield estimate.
pub fn print_yield_estimate(estimate: &YieldEstimate, area_hectares: f64) {
    print!("{}", format_yield_estimate(estimate, area_hectares));
}

/// Format a full assessment: estimate, soil health and challenges.
pub fn format_assessment(assessment: &YieldAssessment) -> String {
    let mut output = format!(
        "\n{} {} ({}) in {}, {} season, {} ha\n",
        "Assessment:".bold(),
        assessment.request.crop,
        assessment.request.variety,
        assessment.request.region,
        assessment.season,
        assessment.request.area_hectares
    );
    output.push_str(&format_yield_estimate(
        &assessment.estimate,
        assessment.request.area_hectares,
    ));
    output.push('\n');
    output.push_str(&format_soil_health(&assessment.soil_health));
    output.push('\n');
    output.push_str(&format_challenges(&assessment.challenges));
    output
}

pub fn print_assessment(assessment: &YieldAssessment) {
    print!("{}", format_assessment(assessment));
}

/// Format a soil health report as a table.
pub fn format_soil_health(report: &SoilHealthReport) -> String {
    let mut output = String::new();
    heading(&mut output, "Soil Health");

    let mut table = new_table(vec!["Parameter", "Value", "Status", "Recommendation"]);
    for (name, reading) in report.parameters() {
        let value = if name == "pH" {
            format!("{:.1}", reading.value)
        } else {
            format!("{:.0} kg/ha", reading.value)
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(value),
            status_cell(reading.status),
            Cell::new(&reading.recommendation),
        ]);
    }
    output.push_str(&format!("{table}"));
    output
}

pub fn print_soil_health(report: &SoilHealthReport) {
    print!("{}", format_soil_health(report));
}

/// Format a region's default soil sample.
pub fn format_soil_profile(region: &str, sample: &SoilSample) -> String {
    let mut output = String::new();
    heading(&mut output, &format!("Soil Profile: {region}"));

    let mut table = new_table(vec!["Property", "Value"]);
    table.add_row(vec!["Soil Type".to_string(), sample.predominant_type.to_string()]);
    table.add_row(vec!["Texture".to_string(), sample.texture.clone()]);
    table.add_row(vec!["pH".to_string(), format!("{:.1}", sample.ph)]);
    table.add_row(vec!["Nitrogen".to_string(), format!("{} kg/ha", sample.nitrogen)]);
    table.add_row(vec!["Phosphorus".to_string(), format!("{} kg/ha", sample.phosphorus)]);
    table.add_row(vec!["Potassium".to_string(), format!("{} kg/ha", sample.potassium)]);
    table.add_row(vec![
        "Organic Matter".to_string(),
        format!("{:.2}%", sample.organic_matter),
    ]);
    output.push_str(&format!("{table}"));
    output
}

pub fn print_soil_profile(region: &str, sample: &SoilSample) {
    print!("{}", format_soil_profile(region, sample));
}

/// Format a bulleted list of seasonal challenges.
pub fn format_challenges(challenges: &[String]) -> String {
    let mut output = String::new();
    heading(&mut output, "Seasonal Challenges");
    for challenge in challenges {
        output.push_str(&format!("  {} {}\n", "\u{2022}".yellow(), challenge));
    }
    output
}

pub fn print_challenges(challenges: &[String]) {
    print!("{}", format_challenges(challenges));
}

fn recommendation_table(recs: &[CropRecommendation]) -> Table {
    let mut table = new_table(vec![
        "Crop",
        "Variety",
        "Suitability",
        "Yield (q/ha)",
        "Period",
        "Water",
        "Fertilizers",
    ]);
    for rec in recs {
        table.add_row(vec![
            Cell::new(&rec.crop),
            Cell::new(&rec.variety),
            Cell::new(format!("{}%", rec.suitability_percent)),
            Cell::new(format!("{:.1}", rec.yield_estimate)),
            Cell::new(&rec.growing_period),
            Cell::new(&rec.water_requirement),
            Cell::new(&rec.fertilizers),
        ]);
    }
    table
}

/// Format primary and alternative recommendations.
pub fn format_recommendations(recs: &CropRecommendations) -> String {
    let mut output = String::new();
    heading(&mut output, "Recommended Crops");
    if recs.is_empty() {
        output.push_str("  No suitable crops found.\n");
        return output;
    }
    output.push_str(&format!("{}\n", recommendation_table(&recs.primary)));

    if !recs.alternatives.is_empty() {
        heading(&mut output, "Alternatives");
        output.push_str(&format!("{}\n", recommendation_table(&recs.alternatives)));
    }
    output
}

pub fn print_recommendations(recs: &CropRecommendations) {
    print!("{}", format_recommendations(recs));
}

/// Format batch results; failed rows show their error message.
pub fn format_batch_results(results: &[BatchResult]) -> String {
    let mut output = String::new();
    heading(&mut output, "Batch Results");

    let mut table = new_table(vec!["Field", "Crop", "Variety", "Expected", "Range", "Confidence"]);
    for r in results {
        let (expected, range, confidence) = match (r.expected_yield, &r.error) {
            (Some(y), None) => (
                Cell::new(format!("{y:.2}")),
                Cell::new(format!(
                    "{:.2} - {:.2}",
                    r.yield_range_min.unwrap_or_default(),
                    r.yield_range_max.unwrap_or_default()
                )),
                Cell::new(format!("{}%", r.confidence_percent.unwrap_or_default())),
            ),
            (_, err) => (
                Cell::new("error").fg(Color::Red),
                Cell::new(err.as_deref().unwrap_or("unknown error")),
                Cell::new(""),
            ),
        };
        table.add_row(vec![
            Cell::new(&r.field_id),
            Cell::new(&r.crop),
            Cell::new(&r.variety),
            expected,
            range,
            confidence,
        ]);
    }
    output.push_str(&format!("{table}\n"));

    let failed = results.iter().filter(|r| !r.is_ok()).count();
    let summary = format!("{} fields, {} failed", results.len(), failed);
    if failed > 0 {
        output.push_str(&format!("{}\n", summary.yellow()));
    } else {
        output.push_str(&format!("{}\n", summary.dimmed()));
    }
    output
}

pub fn print_batch_results(results: &[BatchResult]) {
    print!("{}", format_batch_results(results));
}
