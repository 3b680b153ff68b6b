// Bias diagnostics built on cosine similarity.
//
// These are the measurements used before and after debiasing: how strongly
// words lean along the axis, whether two word relations point the same way
// (mother - woman vs father - man), and analogy completion over the table.

use std::cmp::Ordering;

use tracing::debug;

use crate::debias::BiasAxis;
use crate::error::{DebiasError, Result};
use crate::similarity::cosine_similarity;
use crate::vectors::math::{squared_norm, sub};
use crate::vectors::VectorTable;

/// A word's similarity with the bias axis, or why it couldn't be measured.
#[derive(Debug)]
pub struct AxisScore {
    pub word: String,
    pub similarity: Result<f64>,
}

/// A candidate word and its score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredWord {
    pub word: String,
    pub score: f64,
}

/// Similarity of each word with `axis`. Misses are reported per word.
pub fn axis_report<S: AsRef<str>>(
    table: &VectorTable,
    axis: &BiasAxis,
    words: &[S],
) -> Vec<AxisScore> {
    words
        .iter()
        .map(|w| {
            let word = w.as_ref();
            AxisScore {
                word: word.to_string(),
                similarity: table.lookup(word).and_then(|v| axis.similarity(v)),
            }
        })
        .collect()
}

/// Cosine similarity between the relations `b - a` and `d - c`.
///
/// `relation_similarity(t, ("woman", "mother"), ("man", "father"))` is high
/// when the table encodes parenthood the same way for both genders.
pub fn relation_similarity(
    table: &VectorTable,
    first: (&str, &str),
    second: (&str, &str),
) -> Result<f64> {
    let r1 = sub(table.lookup(first.1)?, table.lookup(first.0)?)?;
    let r2 = sub(table.lookup(second.1)?, table.lookup(second.0)?)?;
    cosine_similarity(&r1, &r2)
}

/// Complete the analogy `a : b :: c : ?`.
///
/// Ranks every word `d` outside `{a, b, c}` by `cos(b - a, d - c)` and returns
/// the best `top_n`. Candidates whose vector equals `c` are skipped. Fails with
/// `DegenerateVector` when `a` and `b` share a vector.
pub fn complete_analogy(
    table: &VectorTable,
    a: &str,
    b: &str,
    c: &str,
    top_n: usize,
) -> Result<Vec<ScoredWord>> {
    let target = sub(table.lookup(b)?, table.lookup(a)?)?;
    let c_vec = table.lookup(c)?;

    if squared_norm(&target) == 0.0 {
        return Err(DebiasError::DegenerateVector);
    }

    let mut scored = Vec::new();
    for (word, vector) in table.iter() {
        if word == a || word == b || word == c {
            continue;
        }
        let offset = sub(vector, c_vec)?;
        if squared_norm(&offset) == 0.0 {
            continue;
        }
        scored.push(ScoredWord {
            word: word.to_string(),
            score: cosine_similarity(&target, &offset)?,
        });
    }

    scored.sort_by(|x, y| y.score.partial_cmp(&x.score).unwrap_or(Ordering::Equal));
    scored.truncate(top_n);

    debug!(a, b, c, candidates = scored.len(), "Completed analogy");
    Ok(scored)
}
