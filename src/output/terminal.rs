// Colored terminal output for axis reports and before/after comparisons.
//
// Similarities are colored by which pole of the axis a word leans toward:
// magenta for the positive word, cyan for the negative one, green when the
// word sits inside the neutral band.

use colored::{ColoredString, Colorize};

use crate::analysis::{AxisScore, ScoredWord};
use crate::debias::{BiasAxis, EqualizedPair};
use crate::pipeline::apply::ApplyOutcome;

use super::{format_similarity, NEUTRAL_BAND};

/// Display each word's similarity with the axis, most biased first.
pub fn display_axis_report(axis: &BiasAxis, scores: &[AxisScore]) {
    println!(
        "\n{}",
        format!("=== Similarity with {} ===", axis.label()).bold()
    );
    println!();

    let mut measured: Vec<(&str, f64)> = scores
        .iter()
        .filter_map(|s| s.similarity.as_ref().ok().map(|v| (s.word.as_str(), *v)))
        .collect();
    measured.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));

    for (word, sim) in &measured {
        println!("  {:<24} {}", word, colorize_similarity(*sim));
    }

    let misses: Vec<&AxisScore> = scores.iter().filter(|s| s.similarity.is_err()).collect();
    if !misses.is_empty() {
        println!();
        for miss in misses {
            if let Err(e) = &miss.similarity {
                println!("  {} {:<22} {}", "?".yellow(), miss.word, e.to_string().dimmed());
            }
        }
    }
}

/// Display a neutralized word's similarity before and after.
pub fn display_neutralized(word: &str, before: f64, after: f64) {
    println!(
        "  {:<24} {} -> {}",
        word,
        colorize_similarity(before),
        colorize_similarity(after)
    );
}

/// Display an equalized pair's similarities before and after.
pub fn display_equalized(
    axis: &BiasAxis,
    pair: (&str, &str),
    before: (f64, f64),
    after: (f64, f64),
    result: &EqualizedPair,
) {
    println!(
        "\n{}",
        format!("=== Equalized {} / {} along {} ===", pair.0, pair.1, axis.label()).bold()
    );
    println!(
        "  {:<24} {} -> {}",
        pair.0,
        colorize_similarity(before.0),
        colorize_similarity(after.0)
    );
    println!(
        "  {:<24} {} -> {}",
        pair.1,
        colorize_similarity(before.1),
        colorize_similarity(after.1)
    );
    println!("  Scale factor: {:.4}", result.scale);
    if result.scale_reflected {
        println!(
            "  {} shared component exceeded unit norm; scale was reflected",
            "Warning:".yellow()
        );
    }
}

/// Display analogy candidates for `a : b :: c : ?`.
pub fn display_analogy(a: &str, b: &str, c: &str, candidates: &[ScoredWord]) {
    println!("\n{}", format!("=== {a} : {b} :: {c} : ? ===").bold());
    if candidates.is_empty() {
        println!("  No candidates in the table.");
        return;
    }
    for (i, cand) in candidates.iter().enumerate() {
        println!("  {:>2}. {:<24} {:.3}", i + 1, cand.word, cand.score);
    }
}

/// Display the result of applying a debias plan.
pub fn display_apply_summary(outcome: &ApplyOutcome) {
    println!("\n{}", "=== Debias Plan Applied ===".bold());
    println!("  Neutralized: {}", outcome.neutralized.len());
    println!("  Equalized pairs: {}", outcome.equalized.len());

    if !outcome.reflected.is_empty() {
        println!(
            "  {} {} pairs used a reflected scale",
            "~".yellow(),
            outcome.reflected.len()
        );
    }

    if !outcome.failures.is_empty() {
        println!(
            "\n  {} {} items failed:",
            "!".bright_red(),
            outcome.failures.len()
        );
        for failure in &outcome.failures {
            println!("    {:<24} {}", failure.item, failure.error.to_string().dimmed());
        }
    }
}

/// Color a similarity by the pole it leans toward.
pub fn colorize_similarity(value: f64) -> ColoredString {
    let text = format_similarity(value);
    if value.abs() < NEUTRAL_BAND {
        text.green()
    } else if value > 0.0 {
        text.bright_magenta()
    } else {
        text.bright_cyan()
    }
}
