// Elementwise vector arithmetic shared by similarity and debiasing.
//
// Vectors are plain `&[f64]` slices. Functions that combine two vectors
// check lengths and return `LengthMismatch` instead of silently truncating
// the way `zip` would.

use crate::error::{DebiasError, Result};

fn check_lengths(a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(DebiasError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

/// Dot product of two equal-length vectors.
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Sum of squared components.
pub fn squared_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum()
}

/// Euclidean (L2) norm.
pub fn norm(v: &[f64]) -> f64 {
    squared_norm(v).sqrt()
}

/// `a + b`
pub fn add(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

/// `a - b`
pub fn sub(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}

/// `factor * v`
pub fn scale(v: &[f64], factor: f64) -> Vec<f64> {
    v.iter().map(|x| x * factor).collect()
}

/// Unit vector in the direction of `v`. Fails on a zero vector.
pub fn normalized(v: &[f64]) -> Result<Vec<f64>> {
    let n = norm(v);
    if n == 0.0 {
        return Err(DebiasError::DegenerateVector);
    }
    Ok(scale(v, 1.0 / n))
}

/// Orthogonal projection of `v` onto the line spanned by `axis`:
///
///   `(dot(v, axis) / squared_norm(axis)) * axis`
///
/// Fails with `DegenerateAxis` when the axis has zero norm.
pub fn project_onto(v: &[f64], axis: &[f64]) -> Result<Vec<f64>> {
    let denom = squared_norm(axis);
    if denom == 0.0 {
        return Err(DebiasError::DegenerateAxis);
    }
    let coeff = dot(v, axis)? / denom;
    Ok(scale(axis, coeff))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_and_norms() {
        let a = [3.0, 4.0];
        assert!((dot(&a, &a).unwrap() - 25.0).abs() < 1e-12);
        assert!((squared_norm(&a) - 25.0).abs() < 1e-12);
        assert!((norm(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_length_mismatch_is_reported() {
        let err = sub(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            DebiasError::LengthMismatch { left: 2, right: 1 }
        ));
        assert!(dot(&[1.0], &[]).is_err());
        assert!(add(&[], &[1.0]).is_err());
    }

    #[test]
    fn test_add_sub_scale() {
        let a = [1.0, 2.0];
        let b = [0.5, -1.0];
        assert_eq!(add(&a, &b).unwrap(), vec![1.5, 1.0]);
        assert_eq!(sub(&a, &b).unwrap(), vec![0.5, 3.0]);
        assert_eq!(scale(&a, -2.0), vec![-2.0, -4.0]);
    }

    #[test]
    fn test_normalized_has_unit_length() {
        let v = normalized(&[0.0, 3.0, 4.0]).unwrap();
        assert!((norm(&v) - 1.0).abs() < 1e-12);
        assert!(matches!(
            normalized(&[0.0, 0.0]),
            Err(DebiasError::DegenerateVector)
        ));
    }

    #[test]
    fn test_project_onto_axis() {
        // [1, 0] onto [-1, 1] is (-1 / 2) * [-1, 1]
        let p = project_onto(&[1.0, 0.0], &[-1.0, 1.0]).unwrap();
        assert!((p[0] - 0.5).abs() < 1e-12);
        assert!((p[1] + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_project_onto_zero_axis_fails() {
        let err = project_onto(&[1.0, 2.0], &[0.0, 0.0]).unwrap_err();
        assert!(matches!(err, DebiasError::DegenerateAxis));
    }
}
