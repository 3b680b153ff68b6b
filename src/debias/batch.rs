// Batch debiasing and the curated plan that drives it.
//
// A plan classifies words into ones to neutralize and pairs to equalize.
// Every item is processed independently against the original table and gets
// its own Result, so one missing word never stops the rest of the batch.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DebiasError, Result};
use crate::vectors::VectorTable;

use super::axis::BiasAxis;
use super::equalize::{equalize, EqualizeOptions, EqualizedPair};
use super::neutralize::neutralize;

/// Caller-supplied classification of the vocabulary.
///
/// ```json
/// { "neutral": ["receptionist", "technology"], "pairs": [["actor", "actress"]] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebiasPlan {
    /// Words whose meaning should carry no bias component.
    #[serde(default)]
    pub neutral: Vec<String>,
    /// Pairs that should differ only along the bias axis.
    #[serde(default)]
    pub pairs: Vec<(String, String)>,
}

impl DebiasPlan {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a plan from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Total number of items (neutral words plus pairs).
    pub fn item_count(&self) -> usize {
        self.neutral.len() + self.pairs.len()
    }

    /// Words that the plan touches more than once, in first-repeat order.
    ///
    /// Debiasing the same word twice would make the persisted vector depend on
    /// processing order, so these items are reported as failures instead.
    pub fn repeated_words(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut repeated = Vec::new();
        let all = self
            .neutral
            .iter()
            .chain(self.pairs.iter().flat_map(|(a, b)| [a, b]));
        for word in all {
            if !seen.insert(word.as_str()) && !repeated.contains(word) {
                repeated.push(word.clone());
            }
        }
        repeated
    }
}

/// One processed batch item.
#[derive(Debug)]
pub struct ItemResult<K, T> {
    pub item: K,
    pub result: Result<T>,
}

/// Neutralize every word in `words`, one result per word.
pub fn neutralize_batch<S: AsRef<str>>(
    table: &VectorTable,
    words: &[S],
    axis: &BiasAxis,
) -> Vec<ItemResult<String, Vec<f64>>> {
    words
        .iter()
        .map(|w| ItemResult {
            item: w.as_ref().to_string(),
            result: neutralize(table, w.as_ref(), axis),
        })
        .collect()
}

/// Equalize every pair in `pairs`, one result per pair.
pub fn equalize_batch(
    table: &VectorTable,
    pairs: &[(String, String)],
    axis: &BiasAxis,
    options: &EqualizeOptions,
) -> Vec<ItemResult<(String, String), EqualizedPair>> {
    pairs
        .iter()
        .map(|(a, b)| ItemResult {
            item: (a.clone(), b.clone()),
            result: equalize(table, (a.as_str(), b.as_str()), axis, options),
        })
        .collect()
}

/// Look up every word in `words`, one result per word.
pub fn lookup_batch<S: AsRef<str>>(
    table: &VectorTable,
    words: &[S],
) -> Vec<ItemResult<String, Vec<f64>>> {
    words
        .iter()
        .map(|w| ItemResult {
            item: w.as_ref().to_string(),
            result: table.lookup(w.as_ref()).map(<[f64]>::to_vec),
        })
        .collect()
}

/// Error for an item that names a word the plan already debiases elsewhere.
pub(crate) fn repeated_word_error(word: &str) -> DebiasError {
    DebiasError::RepeatedInPlan(word.to_string())
}
