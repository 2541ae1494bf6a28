#![warn(missing_docs)]
//! approxbench statistical engine
//!
//! Statistics used by the approximation harness:
//! - Trimmed-mean latency aggregation (drop the lowest and highest deciles)
//! - Nearest-rank median and 95th percentile over sorted relative errors
//! - Relative-error distribution summary (mean, median, p95, max)

mod percentiles;
mod summary;
mod trimmed;

pub use percentiles::{compute_percentile, median_and_percentile};
pub use summary::{ErrorSummary, compute_error_summary};
pub use trimmed::{TrimmedAnalysis, min_samples_for_trim, trim_samples, trimmed_mean};

/// Fraction of samples discarded from each end of a latency distribution
pub const DEFAULT_TRIM_FRACTION: f64 = 0.1;

/// Percentile reported for the relative-error distribution
pub const ERROR_PERCENTILE: f64 = 95.0;

/// Errors raised by the statistics engine
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    /// Not enough samples survive trimming to compute a mean
    #[error("Not enough samples: got {got}, need at least {min}")]
    InsufficientSamples {
        /// Number of samples supplied
        got: usize,
        /// Minimum number required
        min: usize,
    },

    /// The sample set is empty
    #[error("Cannot summarize an empty sample set")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!((DEFAULT_TRIM_FRACTION - 0.1).abs() < f64::EPSILON);
        assert!((ERROR_PERCENTILE - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_error_messages() {
        let err = StatsError::InsufficientSamples { got: 1, min: 2 };
        assert_eq!(err.to_string(), "Not enough samples: got 1, need at least 2");
        assert!(StatsError::Empty.to_string().contains("empty"));
    }
}
