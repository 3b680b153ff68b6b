// Neutralization — remove a word's component along the bias axis.
//
// The result is the orthogonal complement of the word's projection onto the
// axis, so its cosine similarity with the axis is zero. Only words whose
// meaning is not intrinsically tied to the axis should be neutralized; that
// classification comes from the caller's plan, not from this module.

use crate::error::Result;
use crate::vectors::math::{project_onto, sub};
use crate::vectors::VectorTable;

use super::axis::BiasAxis;

/// Neutralize a raw vector against a raw axis direction.
///
/// `e - (dot(e, axis) / squared_norm(axis)) * axis`
///
/// Fails with `DegenerateAxis` if the axis has zero norm.
pub fn neutralize_vector(e: &[f64], axis: &[f64]) -> Result<Vec<f64>> {
    let bias_component = project_onto(e, axis)?;
    sub(e, &bias_component)
}

/// Look up `word` and return its neutralized vector. The table is not modified.
pub fn neutralize(table: &VectorTable, word: &str, axis: &BiasAxis) -> Result<Vec<f64>> {
    let e = table.lookup(word)?;
    neutralize_vector(e, axis.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DebiasError;
    use crate::vectors::math::dot;

    fn table() -> VectorTable {
        VectorTable::from_entries(vec![
            ("man".to_string(), vec![1.0, 0.0, 0.2]),
            ("woman".to_string(), vec![0.0, 1.0, 0.2]),
            ("receptionist".to_string(), vec![0.1, 0.6, 0.9]),
        ])
        .unwrap()
    }

    #[test]
    fn test_neutralized_vector_is_orthogonal_to_axis() {
        let t = table();
        let axis = BiasAxis::build(&t, "woman", "man").unwrap();
        let before = axis.similarity(t.lookup("receptionist").unwrap()).unwrap();
        assert!(before.abs() > 0.1, "fixture should start biased, got {before}");

        let debiased = neutralize(&t, "receptionist", &axis).unwrap();
        assert!(dot(&debiased, axis.as_slice()).unwrap().abs() < 1e-12);
        assert!(axis.similarity(&debiased).unwrap().abs() < 1e-10);
    }

    #[test]
    fn test_neutralize_is_idempotent() {
        let t = table();
        let axis = BiasAxis::build(&t, "woman", "man").unwrap();
        let once = neutralize(&t, "receptionist", &axis).unwrap();
        let twice = neutralize_vector(&once, axis.as_slice()).unwrap();
        for (a, b) in once.iter().zip(&twice) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_orthogonal_content_preserved() {
        // The component along [0, 0, 1] is orthogonal to the axis and must survive.
        let t = table();
        let axis = BiasAxis::build(&t, "woman", "man").unwrap();
        let debiased = neutralize(&t, "receptionist", &axis).unwrap();
        assert!((debiased[2] - 0.9).abs() < 1e-12);
        // [0.1, 0.6] loses its [-1, 1] component and keeps the [1, 1] one.
        assert!((debiased[0] - 0.35).abs() < 1e-12);
        assert!((debiased[1] - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_table_untouched() {
        let t = table();
        let axis = BiasAxis::build(&t, "woman", "man").unwrap();
        let _ = neutralize(&t, "receptionist", &axis).unwrap();
        assert_eq!(t.lookup("receptionist").unwrap(), &[0.1, 0.6, 0.9]);
    }

    #[test]
    fn test_unknown_word() {
        let t = table();
        let axis = BiasAxis::build(&t, "woman", "man").unwrap();
        let err = neutralize(&t, "zzz_nonexistent", &axis).unwrap_err();
        assert!(matches!(err, DebiasError::UnknownWord(_)));
    }

    #[test]
    fn test_zero_axis_is_degenerate() {
        let err = neutralize_vector(&[1.0, 2.0], &[0.0, 0.0]).unwrap_err();
        assert!(matches!(err, DebiasError::DegenerateAxis));
    }

    #[test]
    fn test_axis_length_must_match() {
        let err = neutralize_vector(&[1.0, 2.0, 3.0], &[1.0, 0.0]).unwrap_err();
        assert!(matches!(err, DebiasError::LengthMismatch { .. }));
    }
}
