// Plan application: debias a whole vocabulary and produce a new table.
//
// Every neutral word is neutralized and every pair equalized against the
// ORIGINAL table, so results never depend on item order. Items that fail are
// collected with their error and the rest of the plan carries on. Items that
// touch a word the plan names more than once fail as a group, since keeping
// either version would be arbitrary.

use std::collections::{HashMap, HashSet};

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, warn};

use crate::debias::batch::repeated_word_error;
use crate::debias::{equalize, neutralize, BiasAxis, DebiasPlan, EqualizeOptions};
use crate::error::{DebiasError, Result};
use crate::vectors::VectorTable;

/// A plan item that could not be debiased.
#[derive(Debug)]
pub struct ItemFailure {
    /// The word, or `a/b` for a pair.
    pub item: String,
    pub error: DebiasError,
}

/// Everything produced by applying a plan.
#[derive(Debug)]
pub struct ApplyOutcome {
    /// The full table with debiased vectors swapped in.
    pub table: VectorTable,
    pub neutralized: Vec<String>,
    pub equalized: Vec<(String, String)>,
    /// Pairs whose scale was computed with the reflect policy.
    pub reflected: Vec<(String, String)>,
    pub failures: Vec<ItemFailure>,
}

/// Serializable summary of an apply run (for `--json` output).
#[derive(Debug, Serialize)]
pub struct ApplySummary {
    pub axis: String,
    pub neutralized: usize,
    pub equalized: usize,
    pub reflected: Vec<String>,
    pub failures: Vec<FailureSummary>,
    pub output: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FailureSummary {
    pub item: String,
    pub error: String,
}

impl ApplyOutcome {
    pub fn summary(&self, axis: &BiasAxis, output: Option<String>) -> ApplySummary {
        ApplySummary {
            axis: axis.label().to_string(),
            neutralized: self.neutralized.len(),
            equalized: self.equalized.len(),
            reflected: self
                .reflected
                .iter()
                .map(|(a, b)| pair_label(a, b))
                .collect(),
            failures: self
                .failures
                .iter()
                .map(|f| FailureSummary {
                    item: f.item.clone(),
                    error: f.error.to_string(),
                })
                .collect(),
            output,
        }
    }
}

fn pair_label(a: &str, b: &str) -> String {
    format!("{a}/{b}")
}

/// Apply `plan` to `table` about `axis`.
///
/// Returns an error only if assembling the final table fails; per-item
/// problems land in `ApplyOutcome::failures`.
pub fn run(
    table: &VectorTable,
    axis: &BiasAxis,
    plan: &DebiasPlan,
    options: &EqualizeOptions,
    show_progress: bool,
) -> Result<ApplyOutcome> {
    let repeated: HashSet<String> = plan.repeated_words().into_iter().collect();

    let pb = if show_progress {
        ProgressBar::new(plan.item_count() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Debiasing [{bar:30}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut replacements: HashMap<String, Vec<f64>> = HashMap::new();
    let mut outcome = ApplyOutcome {
        table: VectorTable::default(),
        neutralized: Vec::new(),
        equalized: Vec::new(),
        reflected: Vec::new(),
        failures: Vec::new(),
    };

    for word in &plan.neutral {
        let result = if repeated.contains(word) {
            Err(repeated_word_error(word))
        } else {
            neutralize(table, word, axis)
        };

        match result {
            Ok(vector) => {
                replacements.insert(word.clone(), vector);
                outcome.neutralized.push(word.clone());
            }
            Err(e) => {
                warn!(word = %word, error = %e, "Neutralization failed");
                outcome.failures.push(ItemFailure {
                    item: word.clone(),
                    error: e,
                });
            }
        }
        pb.inc(1);
    }

    for (a, b) in &plan.pairs {
        let result = match [a, b].into_iter().find(|w| repeated.contains(*w)) {
            Some(w) => Err(repeated_word_error(w)),
            None => equalize(table, (a.as_str(), b.as_str()), axis, options),
        };

        match result {
            Ok(pair) => {
                if pair.scale_reflected {
                    outcome.reflected.push((a.clone(), b.clone()));
                }
                replacements.insert(a.clone(), pair.first);
                replacements.insert(b.clone(), pair.second);
                outcome.equalized.push((a.clone(), b.clone()));
            }
            Err(e) => {
                warn!(pair = %pair_label(a, b), error = %e, "Equalization failed");
                outcome.failures.push(ItemFailure {
                    item: pair_label(a, b),
                    error: e,
                });
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    outcome.table = table.overlay(&replacements)?;

    info!(
        neutralized = outcome.neutralized.len(),
        equalized = outcome.equalized.len(),
        failures = outcome.failures.len(),
        "Applied debias plan"
    );

    Ok(outcome)
}
