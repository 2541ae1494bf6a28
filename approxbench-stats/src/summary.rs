//! Relative-Error Summary
//!
//! Summarizes a set of per-sample relative errors. Callers filter invalid
//! comparisons first; every value passed in here counts toward the statistics.

use crate::StatsError;
use crate::percentiles::median_and_percentile;
use serde::{Deserialize, Serialize};

/// Distribution of relative errors for one function
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorSummary {
    /// Arithmetic mean
    pub mean: f64,
    /// Median
    pub median: f64,
    /// Nearest-rank 95th percentile
    pub p95: f64,
    /// Largest error
    pub max: f64,
    /// Number of errors summarized
    pub count: usize,
}

/// Sort `errors` in place and compute the summary
pub fn compute_error_summary(errors: &mut [f64]) -> Result<ErrorSummary, StatsError> {
    if errors.is_empty() {
        return Err(StatsError::Empty);
    }

    errors.sort_by(f64::total_cmp);

    let sum: f64 = errors.iter().sum();
    let mean = sum / errors.len() as f64;
    let (median, p95) = median_and_percentile(errors)?;
    let max = errors[errors.len() - 1];

    Ok(ErrorSummary {
        mean,
        median,
        p95,
        max,
        count: errors.len(),
    })
}
