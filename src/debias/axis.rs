// BiasAxis — a semantic direction derived from a contrastive word pair.
//
// The axis is `vector(positive) - vector(negative)`, so a word whose cosine
// similarity with the axis is positive leans toward the positive word's
// concept. A zero axis cannot be projected onto, so construction rejects it.

use std::fmt;

use crate::error::{DebiasError, Result};
use crate::similarity::cosine_similarity;
use crate::vectors::math::{squared_norm, sub};
use crate::vectors::VectorTable;

/// A nonzero direction in embedding space.
#[derive(Debug, Clone, PartialEq)]
pub struct BiasAxis {
    direction: Vec<f64>,
    label: String,
}

impl BiasAxis {
    /// Wrap a raw direction vector. Fails with `DegenerateAxis` if it has zero norm.
    pub fn from_vector(direction: Vec<f64>, label: impl Into<String>) -> Result<Self> {
        if squared_norm(&direction) == 0.0 {
            return Err(DebiasError::DegenerateAxis);
        }
        Ok(Self {
            direction,
            label: label.into(),
        })
    }

    /// Build the axis `positive - negative` from two table entries.
    pub fn build(table: &VectorTable, positive: &str, negative: &str) -> Result<Self> {
        let pos = table.lookup(positive)?;
        let neg = table.lookup(negative)?;
        Self::from_vector(sub(pos, neg)?, format!("{positive} - {negative}"))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.direction
    }

    pub fn dim(&self) -> usize {
        self.direction.len()
    }

    /// Human-readable description, e.g. `woman - man`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Cosine similarity of `v` with this axis.
    pub fn similarity(&self, v: &[f64]) -> Result<f64> {
        cosine_similarity(v, &self.direction)
    }
}

impl AsRef<[f64]> for BiasAxis {
    fn as_ref(&self) -> &[f64] {
        &self.direction
    }
}

impl fmt::Display for BiasAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}-d)", self.label, self.dim())
    }
}

/// Build the bias axis `positive - negative` from `table`.
pub fn build_axis(table: &VectorTable, positive: &str, negative: &str) -> Result<BiasAxis> {
    BiasAxis::build(table, positive, negative)
}
