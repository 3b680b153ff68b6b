// Output formatting — terminal display of similarity and debiasing results.

pub mod terminal;

/// Similarities with an absolute value below this are shown as neutral.
pub const NEUTRAL_BAND: f64 = 0.05;

/// Format a similarity with an explicit sign and fixed precision, e.g. `+0.312`.
pub fn format_similarity(value: f64) -> String {
    // Avoid printing "-0.000" for tiny negative residue after neutralization.
    if value.abs() < 0.0005 {
        return "+0.000".to_string();
    }
    format!("{value:+.3}")
}
