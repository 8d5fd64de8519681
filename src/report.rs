use std::fmt::Write;

use crate::models::StudentProfile;
use crate::scoring::RecommendOutcome;

/// Chance band for a safety margin, matching the thresholds shown to
/// students in the interactive front end.
pub fn margin_band(safety_margin: f64) -> &'static str {
    if safety_margin >= 0.15 {
        "Very high chance (very safe margin)"
    } else if safety_margin >= 0.05 {
        "Good chance (safe margin)"
    } else if safety_margin > 0.0 {
        "Moderate chance (moderate margin)"
    } else {
        "Close to cutoff (zero margin)"
    }
}

pub fn build_report(
    profile: &StudentProfile,
    cutoff_entries: usize,
    outcome: &RecommendOutcome,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Course Recommendation Report");
    let _ = writeln!(
        output,
        "Generated for z-score {:.4}, district {}, stream {} ({} averaged cutoff entries)",
        profile.z_score,
        profile.district,
        profile.stream.name(),
        cutoff_entries
    );
    if !profile.primary_field.is_empty() || !profile.secondary_field.is_empty() {
        let _ = writeln!(
            output,
            "Preferences: primary '{}', secondary '{}'",
            profile.primary_field, profile.secondary_field
        );
    }
    let _ = writeln!(output);

    let records = match outcome {
        RecommendOutcome::Ranked(records) => records,
        RecommendOutcome::Empty(reason) => {
            let _ = writeln!(output, "No recommendations: {}.", reason);
            return output;
        }
    };

    if let Some(top) = records.first() {
        let _ = writeln!(output, "## Top Recommendation");
        let _ = writeln!(
            output,
            "{} at {} — {} (margin {:.4} over the {:.4} average cutoff)",
            top.course,
            top.university,
            margin_band(top.safety_margin),
            top.safety_margin,
            top.cutoff
        );
        let _ = writeln!(output);
    }

    let _ = writeln!(output, "## Recommended Courses");
    let _ = writeln!(
        output,
        "| # | Course | University | Avg. Cutoff | Safety Margin | Compatibility |"
    );
    let _ = writeln!(output, "|---|--------|------------|-------------|---------------|---------------|");
    for (rank, rec) in records.iter().enumerate() {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {:.4} | {:.4} | {:.3} |",
            rank + 1,
            rec.course,
            rec.university,
            rec.cutoff,
            rec.safety_margin,
            rec.compatibility
        );
    }

    output
}
