//! Percentile Computation
//!
//! Nearest-rank percentiles over an already sorted sample. The index for
//! percentile `p` is `floor(p / 100 * n) - 1`, with no interpolation between
//! ranks.

use crate::{ERROR_PERCENTILE, StatsError};

/// Nearest-rank percentile of an ascending slice
///
/// When `floor(p / 100 * n)` is zero the first element is returned.
///
/// # Examples
///
/// ```ignore
/// # use approxbench_stats::compute_percentile;
/// let sorted = vec![0.1, 0.2, 0.3, 0.4];
/// assert_eq!(compute_percentile(&sorted, 95.0).unwrap(), 0.3);
/// ```
pub fn compute_percentile(sorted: &[f64], percentile: f64) -> Result<f64, StatsError> {
    if sorted.is_empty() {
        return Err(StatsError::Empty);
    }

    let rank = (percentile / 100.0 * sorted.len() as f64) as usize;
    let index = rank.saturating_sub(1).min(sorted.len() - 1);
    Ok(sorted[index])
}

/// Median (mean of the middle pair for even lengths) and 95th percentile
pub fn median_and_percentile(sorted: &[f64]) -> Result<(f64, f64), StatsError> {
    if sorted.is_empty() {
        return Err(StatsError::Empty);
    }

    let n = sorted.len();
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    let p95 = compute_percentile(sorted, ERROR_PERCENTILE)?;
    Ok((median, p95))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_length() {
        let sorted = vec![0.1, 0.2, 0.3, 0.4];
        let (median, p95) = median_and_percentile(&sorted).unwrap();

        assert!((median - 0.25).abs() < 1e-12);
        // floor(0.95 * 4) - 1 = 2
        assert_eq!(p95, 0.3);
    }

    #[test]
    fn test_odd_length() {
        let sorted = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let (median, p95) = median_and_percentile(&sorted).unwrap();

        assert_eq!(median, 3.0);
        // floor(0.95 * 5) - 1 = 3
        assert_eq!(p95, 4.0);
    }

    #[test]
    fn test_hundred_samples() {
        let sorted: Vec<f64> = (1..=100).map(|x| x as f64).collect();
        let p95 = compute_percentile(&sorted, 95.0).unwrap();
        assert_eq!(p95, 95.0);
    }

    #[test]
    fn test_single_sample() {
        let (median, p95) = median_and_percentile(&[42.0]).unwrap();
        assert_eq!(median, 42.0);
        assert_eq!(p95, 42.0);
    }

    #[test]
    fn test_empty_samples() {
        assert_eq!(median_and_percentile(&[]), Err(StatsError::Empty));
        assert_eq!(compute_percentile(&[], 50.0), Err(StatsError::Empty));
    }
}
