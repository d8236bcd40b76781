use colored::Colorize;

use crate::analysis::CropRecommendations;

const BAR_WIDTH: usize = 40;

/// Format a text bar chart of suitability scores, primary tier first.
pub fn format_suitability_chart(recs: &CropRecommendations) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Crop Suitability".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if recs.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let label_width = recs
        .iter()
        .map(|r| r.crop.len() + r.variety.len() + 3)
        .max()
        .unwrap_or(0);

    for (rank, rec) in recs.iter().enumerate() {
        let bar_len =
            ((rec.suitability_percent as f64 / 100.0) * BAR_WIDTH as f64).round() as usize;
        let bar = "\u{2588}".repeat(bar_len);
        let bar = if rank < recs.primary.len() {
            bar.green()
        } else {
            bar.dimmed()
        };
        let label = format!("{} ({})", rec.crop, rec.variety);
        output.push_str(&format!(
            "  {:<width$}  {:>3}%  {}\n",
            label,
            rec.suitability_percent,
            bar,
            width = label_width
        ));
    }

    output.push('\n');
    output
}

/// Print a text bar chart of suitability scores.
pub fn print_suitability_chart(recs: &CropRecommendations) {
    print!("{}", format_suitability_chart(recs));
}
