//! Accuracy Evaluator
//!
//! Compares approximate outputs to reference outputs element by element.
//! Relative error is computed in `f32` and widened to `f64`; a sample counts
//! only when that error is finite and the reference is a normal float.
//! Approximate outputs that are infinite or subnormal where the reference is
//! normal are counted separately as failures of the approximation.

use crate::error::BenchError;
use approxbench_stats::{ErrorSummary, compute_error_summary};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Relative error above which a sample is logged
pub const HIGH_ERROR_THRESHOLD: f64 = 0.9;

/// Accuracy of one function over its processed samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// Error distribution over valid samples
    pub summary: ErrorSummary,
    /// Samples compared (valid or not)
    pub total_experiments: usize,
    /// Approximate outputs that were infinite or NaN for a normal reference
    pub unexpected_infinity_count: usize,
    /// Approximate outputs that were subnormal or zero for a normal reference
    pub unexpected_subnormal_count: usize,
    /// Valid samples with error above [`HIGH_ERROR_THRESHOLD`]
    pub high_error_count: usize,
}

impl AccuracyReport {
    /// Samples that contributed to the error summary
    pub fn valid_experiments(&self) -> usize {
        self.summary.count
    }
}

/// Evaluate `approximate` against `reference`
///
/// `inputs` is only used in diagnostics and may be longer than the outputs
/// when a vector kernel dropped a tail.
pub fn evaluate_accuracy(
    inputs: &[f32],
    reference: &[f32],
    approximate: &[f32],
) -> Result<AccuracyReport, BenchError> {
    if reference.len() != approximate.len() {
        return Err(BenchError::SizeMismatch {
            reference: reference.len(),
            approximate: approximate.len(),
        });
    }

    let mut errors = Vec::with_capacity(reference.len());
    let mut unexpected_infinity_count = 0;
    let mut unexpected_subnormal_count = 0;
    let mut high_error_count = 0;

    for (i, (&target, &actual)) in reference.iter().zip(approximate).enumerate() {
        let error = f64::from(((target - actual) / target).abs());

        if !target.is_normal() {
            continue;
        }

        if !actual.is_finite() {
            unexpected_infinity_count += 1;
        } else if !actual.is_normal() {
            unexpected_subnormal_count += 1;
        }

        if !error.is_finite() {
            continue;
        }

        if error > HIGH_ERROR_THRESHOLD {
            high_error_count += 1;
            warn!(
                input = inputs.get(i).copied().unwrap_or(f32::NAN),
                reference = target,
                approximate = actual,
                error,
                "high relative error"
            );
        }

        errors.push(error);
    }

    info!(
        total = reference.len(),
        valid = errors.len(),
        "experiments handled"
    );

    let summary = compute_error_summary(&mut errors)?;

    Ok(AccuracyReport {
        summary,
        total_experiments: reference.len(),
        unexpected_infinity_count,
        unexpected_subnormal_count,
        high_error_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_outputs() {
        let values: Vec<f32> = (1..=100).map(|v| v as f32 * 0.37).collect();
        let report = evaluate_accuracy(&values, &values, &values).unwrap();

        assert_eq!(report.summary.mean, 0.0);
        assert_eq!(report.summary.median, 0.0);
        assert_eq!(report.summary.max, 0.0);
        assert_eq!(report.unexpected_infinity_count, 0);
        assert_eq!(report.unexpected_subnormal_count, 0);
        assert_eq!(report.valid_experiments(), 100);
        assert_eq!(report.total_experiments, 100);
    }

    #[test]
    fn test_all_zero_reference_is_empty() {
        let zeros = vec![0.0f32; 16];
        let ones = vec![1.0f32; 16];
        assert!(matches!(
            evaluate_accuracy(&ones, &zeros, &ones),
            Err(BenchError::EmptyResult { .. })
        ));
    }

    #[test]
    fn test_size_mismatch() {
        let err = evaluate_accuracy(&[1.0; 3], &[1.0; 3], &[1.0; 2]).unwrap_err();
        assert_eq!(
            err,
            BenchError::SizeMismatch {
                reference: 3,
                approximate: 2
            }
        );
    }

    #[test]
    fn test_classifies_failures() {
        let reference = [1.0f32, 2.0, 4.0, 8.0, 16.0];
        let approximate = [f32::INFINITY, 1.0e-40, 0.0, 8.0, f32::NAN];
        let report = evaluate_accuracy(&reference, &reference, &approximate).unwrap();

        assert_eq!(report.unexpected_infinity_count, 2);
        assert_eq!(report.unexpected_subnormal_count, 2);
        // inf and NaN produce non-finite errors and are excluded
        assert_eq!(report.valid_experiments(), 3);
        assert_eq!(report.total_experiments, 5);
        assert_eq!(report.summary.max, 1.0);
        assert_eq!(report.high_error_count, 2);
    }

    #[test]
    fn test_subnormal_reference_ignored() {
        let reference = [1.0e-40f32, 1.0];
        let approximate = [f32::INFINITY, 1.5];
        let report = evaluate_accuracy(&reference, &reference, &approximate).unwrap();

        assert_eq!(report.unexpected_infinity_count, 0);
        assert_eq!(report.valid_experiments(), 1);
        assert!((report.summary.mean - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_error_computed_in_single_precision() {
        let reference = [3.0f32];
        let approximate = [3.1f32];
        let report = evaluate_accuracy(&reference, &reference, &approximate).unwrap();

        let expected = f64::from(((3.0f32 - 3.1f32) / 3.0f32).abs());
        assert_eq!(report.summary.mean, expected);
    }

    #[test]
    fn test_inputs_may_be_longer() {
        let inputs = [1.0f32; 13];
        let outputs = [2.0f32; 8];
        let report = evaluate_accuracy(&inputs, &outputs, &outputs).unwrap();
        assert_eq!(report.total_experiments, 8);
    }
}
