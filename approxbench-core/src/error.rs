//! Harness Errors
//!
//! Every variant is fatal for the run: the pipeline stops at the first error
//! and the driver exits non-zero. High-error samples are not errors; they are
//! logged by the accuracy evaluator and the run continues.

use approxbench_stats::StatsError;

/// Fatal harness error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BenchError {
    /// Sample range bound is non-positive, non-finite, or inverted
    #[error("Invalid sample range [{min}, {max}]: bounds must be finite with 0 < min <= max")]
    InvalidRange {
        /// Requested lower magnitude
        min: f32,
        /// Requested upper magnitude
        max: f32,
    },

    /// Vectorized input not aligned to the lane width
    #[error("Invalid data alignment: buffer at {address:#x} is not {required}-byte aligned")]
    Alignment {
        /// Address of the first input element
        address: usize,
        /// Required alignment in bytes
        required: usize,
    },

    /// Reference and approximate outputs differ in length
    #[error(
        "Size of reference output ({reference}) does not match size of approximate output ({approximate})"
    )]
    SizeMismatch {
        /// Reference output length
        reference: usize,
        /// Approximate output length
        approximate: usize,
    },

    /// Too few repetitions or samples to aggregate
    #[error("Not enough samples: got {got}, need at least {min}")]
    InsufficientSamples {
        /// Count supplied
        got: usize,
        /// Minimum count required
        min: usize,
    },

    /// No valid comparisons survived filtering
    #[error("No valid experiments for \"{function}\": the input range yields no normal reference values")]
    EmptyResult {
        /// Function under test
        function: String,
    },
}

impl BenchError {
    /// Attach a function name to an `EmptyResult` raised without one
    pub fn for_function(self, name: &str) -> Self {
        match self {
            BenchError::EmptyResult { function } if function.is_empty() => {
                BenchError::EmptyResult {
                    function: name.to_string(),
                }
            }
            other => other,
        }
    }
}

impl From<StatsError> for BenchError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::InsufficientSamples { got, min } => {
                BenchError::InsufficientSamples { got, min }
            }
            StatsError::Empty => BenchError::EmptyResult {
                function: String::new(),
            },
        }
    }
}
