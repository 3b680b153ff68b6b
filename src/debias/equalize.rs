// Equalization — reposition a word pair so it differs only along the bias axis.
//
// Given a pair that should legitimately differ along the axis (actor/actress),
// both outputs get the identical orthogonal component (the pair mean with its
// axis part removed) and bias components of equal magnitude and opposite sign:
//
//   mu       = (e1 + e2) / 2
//   mu_b     = proj(mu, axis)            mu_orth = mu - mu_b
//   s        = sqrt(1 - ||mu_orth||^2)
//   result_i = s * (proj(e_i, axis) - mu_b) / ||e_i - mu_orth - mu_b|| + mu_orth
//
// The `1 -` target assumes roughly unit-norm embeddings. When ||mu_orth||^2
// exceeds 1 the square root is undefined; `ScalePolicy` decides whether that
// is an error or the literature's `|1 - x|` is used instead.

use tracing::warn;

use crate::error::{DebiasError, Result};
use crate::vectors::math::{add, norm, normalized, project_onto, scale, squared_norm, sub};
use crate::vectors::VectorTable;

use super::axis::BiasAxis;

/// Slack allowed above the unit target before a scale is considered out of range.
/// Absorbs rounding when the pair is already unit-normalized.
const SCALE_TOLERANCE: f64 = 1e-9;

/// What to do when the shared orthogonal component is longer than unit norm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScalePolicy {
    /// Fail with `ScaleOutOfRange`.
    #[default]
    Strict,
    /// Use `sqrt(|1 - x|)` and flag the result as reflected.
    Reflect,
}

/// Tuning for `equalize`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EqualizeOptions {
    pub scale_policy: ScalePolicy,
    /// L2-normalize both pair vectors first. This keeps ||mu_orth||^2 <= 1,
    /// so the scale is always defined.
    pub normalize: bool,
}

/// The two equalized vectors plus the quantities that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualizedPair {
    pub first: Vec<f64>,
    pub second: Vec<f64>,
    /// `mu_orth`, carried identically by both outputs.
    pub shared: Vec<f64>,
    /// The scale factor `s`.
    pub scale: f64,
    /// True when `||mu_orth||^2 > 1` and the reflect policy was applied.
    pub scale_reflected: bool,
}

/// Equalize two raw vectors. `pair` names the words for error messages.
pub fn equalize_vectors(
    pair: (&str, &str),
    e1: &[f64],
    e2: &[f64],
    axis: &[f64],
    options: &EqualizeOptions,
) -> Result<EqualizedPair> {
    let (e1, e2) = if options.normalize {
        (normalized(e1)?, normalized(e2)?)
    } else {
        (e1.to_vec(), e2.to_vec())
    };

    let mu = scale(&add(&e1, &e2)?, 0.5);
    let mu_b = project_onto(&mu, axis)?;
    let mu_orth = sub(&mu, &mu_b)?;

    let e1_b = project_onto(&e1, axis)?;
    let e2_b = project_onto(&e2, axis)?;

    let orth_sq = squared_norm(&mu_orth);
    let (s, scale_reflected) = if orth_sq <= 1.0 + SCALE_TOLERANCE {
        ((1.0 - orth_sq).max(0.0).sqrt(), false)
    } else {
        match options.scale_policy {
            ScalePolicy::Strict => {
                return Err(DebiasError::ScaleOutOfRange {
                    squared_norm: orth_sq,
                })
            }
            ScalePolicy::Reflect => {
                warn!(
                    first = pair.0,
                    second = pair.1,
                    squared_norm = orth_sq,
                    "Equalization scale reflected: shared component exceeds unit norm"
                );
                ((orth_sq - 1.0).sqrt(), true)
            }
        }
    };

    // e_i - mu_orth - mu_b is e_i - mu; computing it directly keeps an
    // identical pair at exactly zero instead of rounding residue.
    let first = corrected(pair.0, &e1, &e1_b, &mu, &mu_b, &mu_orth, s)?;
    let second = corrected(pair.1, &e2, &e2_b, &mu, &mu_b, &mu_orth, s)?;

    Ok(EqualizedPair {
        first,
        second,
        shared: mu_orth,
        scale: s,
        scale_reflected,
    })
}

fn corrected(
    word: &str,
    e: &[f64],
    e_b: &[f64],
    mu: &[f64],
    mu_b: &[f64],
    mu_orth: &[f64],
    s: f64,
) -> Result<Vec<f64>> {
    let denom = norm(&sub(e, mu)?);
    if denom == 0.0 {
        return Err(DebiasError::DivisionByZero {
            word: word.to_string(),
        });
    }
    let bias = scale(&sub(e_b, mu_b)?, s / denom);
    add(&bias, mu_orth)
}

/// Look up both words of `pair` and equalize them about `axis`.
///
/// The table is not modified; the caller decides whether to persist the result.
pub fn equalize(
    table: &VectorTable,
    pair: (&str, &str),
    axis: &BiasAxis,
    options: &EqualizeOptions,
) -> Result<EqualizedPair> {
    let e1 = table.lookup(pair.0)?;
    let e2 = table.lookup(pair.1)?;
    equalize_vectors(pair, e1, e2, axis.as_slice(), options)
}
