// Error taxonomy for the debiasing library.
//
// Every failure is surfaced to the caller. Nothing here is retried or
// recovered from: the computations are deterministic, so the same inputs
// always fail the same way. Batch callers get one of these per item.

/// Errors produced while loading vectors or transforming them.
#[derive(Debug, thiserror::Error)]
pub enum DebiasError {
    /// A resource line could not be split into a word plus numeric components.
    #[error("parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// A resource line had a different number of components than the first one.
    #[error("dimension mismatch on line {line}: expected {expected} components, found {found}")]
    DimensionMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The same word appeared twice while building a table.
    #[error("duplicate word {word:?} on line {line}")]
    DuplicateWord { line: usize, word: String },

    /// Lookup miss.
    #[error("unknown word: {0:?}")]
    UnknownWord(String),

    /// Two vectors that must have equal length did not.
    #[error("vector length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// A zero-norm vector was passed where an angle is needed.
    #[error("degenerate vector: cosine similarity is undefined for a zero-norm vector")]
    DegenerateVector,

    /// The bias axis has zero norm, so nothing can be projected onto it.
    #[error("degenerate bias axis: squared norm is zero")]
    DegenerateAxis,

    /// An equalization denominator collapsed to zero (the pair words share one vector).
    #[error("division by zero while equalizing {word:?}: vector coincides with the pair mean")]
    DivisionByZero { word: String },

    /// The shared orthogonal component is longer than the unit target norm.
    #[error(
        "equalization scale undefined: squared norm of the shared component is {squared_norm:.4} (> 1); \
         normalize the pair or use the reflect scale policy"
    )]
    ScaleOutOfRange { squared_norm: f64 },

    /// A debias plan names the same word in more than one item.
    #[error("word {0:?} appears more than once in the debias plan")]
    RepeatedInPlan(String),

    /// A debias plan file could not be read.
    #[error("invalid debias plan: {0}")]
    Plan(#[from] serde_json::Error),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for debiasing operations.
pub type Result<T> = std::result::Result<T, DebiasError>;
