// Cosine similarity — the primitive every diagnostic is built on.
//
// Unlike a best-effort score, a zero-norm operand is an error here: the
// angle is undefined, and returning 0.0 would read as "unrelated".

use crate::error::{DebiasError, Result};
use crate::vectors::math::{dot, norm};

/// Cosine similarity between two equal-length vectors.
///
/// Returns `dot(u, v) / (||u|| * ||v||)`, clamped to [-1, 1] to absorb
/// floating-point overshoot. Fails with `DegenerateVector` when either norm
/// is exactly zero and `LengthMismatch` when the lengths differ.
pub fn cosine_similarity(u: &[f64], v: &[f64]) -> Result<f64> {
    let d = dot(u, v)?;
    let norm_u = norm(u);
    let norm_v = norm(v);

    if norm_u == 0.0 || norm_v == 0.0 {
        return Err(DebiasError::DegenerateVector);
    }

    Ok((d / (norm_u * norm_v)).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let a = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&a, &a).unwrap();
        assert!((sim - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(sim.abs() < 1e-12);
    }

    #[test]
    fn test_cosine_opposite_is_negative_one() {
        let a = vec![0.3, -1.2, 4.0];
        let neg: Vec<f64> = a.iter().map(|x| -x).collect();
        let sim = cosine_similarity(&a, &neg).unwrap();
        assert!((sim + 1.0).abs() < 1e-10, "got {sim}");
    }

    #[test]
    fn test_cosine_proportional() {
        // Same direction, different magnitudes — should be 1.0
        let sim = cosine_similarity(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((sim - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_zero_vector_is_error() {
        let err = cosine_similarity(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, DebiasError::DegenerateVector));
        let err = cosine_similarity(&[1.0, 2.0], &[0.0, 0.0]).unwrap_err();
        assert!(matches!(err, DebiasError::DegenerateVector));
    }

    #[test]
    fn test_cosine_mismatched_dimensions() {
        let err = cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, DebiasError::LengthMismatch { .. }));
    }

    #[test]
    fn test_cosine_is_symmetric() {
        let a = vec![1.0, 3.0, -2.0, 0.5];
        let b = vec![2.0, -1.0, 4.0, 0.0];
        let sim_ab = cosine_similarity(&a, &b).unwrap();
        let sim_ba = cosine_similarity(&b, &a).unwrap();
        assert!((sim_ab - sim_ba).abs() < 1e-12, "Cosine should be symmetric");
    }

    #[test]
    fn test_cosine_stays_in_range_for_near_parallel_vectors() {
        let a = vec![1e-3, 1e-3, 1e-3];
        let b = vec![1e-3 + 1e-17, 1e-3, 1e-3];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((-1.0..=1.0).contains(&sim));
    }
}
