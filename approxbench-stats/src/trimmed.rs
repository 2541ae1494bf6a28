//! Trimmed Latency Aggregation
//!
//! Sorts repeated pass durations and discards a fixed fraction from each end
//! before averaging. Scheduler hiccups and cold-cache passes land in the tails,
//! so the trimmed mean tracks steady-state throughput without a full model.
//!
//! Trim bounds are counts truncated toward zero: with `n` samples and fraction
//! `f`, the kept slice is `sorted[floor(f * n) .. floor((1 - f) * n)]`.

use crate::{DEFAULT_TRIM_FRACTION, StatsError};

/// Result of trimming a duration distribution
#[derive(Debug, Clone)]
pub struct TrimmedAnalysis {
    /// All samples, sorted ascending
    pub sorted_samples: Vec<f64>,
    /// Samples kept after trimming (sorted)
    pub kept_samples: Vec<f64>,
    /// Number of samples dropped from the low end
    pub low_trimmed: usize,
    /// Number of samples dropped from the high end
    pub high_trimmed: usize,
    /// Mean of the kept samples
    pub mean: f64,
    /// Fraction used for trimming
    pub fraction: f64,
}

impl TrimmedAnalysis {
    /// Percentage of samples discarded from both ends
    pub fn trimmed_percentage(&self) -> f64 {
        if self.sorted_samples.is_empty() {
            return 0.0;
        }
        ((self.low_trimmed + self.high_trimmed) as f64 / self.sorted_samples.len() as f64) * 100.0
    }

    /// Spread of the kept slice relative to its mean (0.0 when the mean is zero)
    pub fn kept_spread(&self) -> f64 {
        match (self.kept_samples.first(), self.kept_samples.last()) {
            (Some(lo), Some(hi)) if self.mean > 0.0 => (hi - lo) / self.mean,
            _ => 0.0,
        }
    }
}

fn trim_bounds(n: usize, fraction: f64) -> (usize, usize) {
    let lower = (fraction * n as f64) as usize;
    let upper = ((1.0 - fraction) * n as f64) as usize;
    (lower, upper.min(n))
}

/// Smallest sample count whose trimmed slice is non-empty for `fraction`
pub fn min_samples_for_trim(fraction: f64) -> usize {
    (1..=10_000)
        .find(|&n| {
            let (lower, upper) = trim_bounds(n, fraction);
            upper > lower
        })
        .unwrap_or(usize::MAX)
}

/// Sort `samples`, drop `fraction` of them from each end, and average the rest
///
/// # Examples
///
/// ```ignore
/// # use approxbench_stats::trim_samples;
/// let durations = vec![120.0, 100.0, 101.0, 99.0, 100.0, 98.0, 102.0, 100.0, 97.0, 400.0];
/// let analysis = trim_samples(&durations, 0.1).unwrap();
/// assert_eq!(analysis.kept_samples.len(), 8);
/// ```
pub fn trim_samples(samples: &[f64], fraction: f64) -> Result<TrimmedAnalysis, StatsError> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let (lower, upper) = trim_bounds(n, fraction);
    if upper <= lower {
        return Err(StatsError::InsufficientSamples {
            got: n,
            min: min_samples_for_trim(fraction),
        });
    }

    let kept = sorted[lower..upper].to_vec();
    let mean = kept.iter().sum::<f64>() / kept.len() as f64;

    Ok(TrimmedAnalysis {
        low_trimmed: lower,
        high_trimmed: n - upper,
        sorted_samples: sorted,
        kept_samples: kept,
        mean,
        fraction,
    })
}

/// Trimmed mean with the default decile trim
pub fn trimmed_mean(samples: &[f64]) -> Result<f64, StatsError> {
    trim_samples(samples, DEFAULT_TRIM_FRACTION).map(|analysis| analysis.mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;

    #[test]
    fn test_drops_one_from_each_end_of_ten() {
        let samples = vec![1000.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 1.0];
        let analysis = trim_samples(&samples, 0.1).unwrap();

        assert_eq!(analysis.low_trimmed, 1);
        assert_eq!(analysis.high_trimmed, 1);
        assert_eq!(analysis.kept_samples.len(), 8);
        assert!((analysis.mean - 10.0).abs() < f64::EPSILON);
        assert!((analysis.trimmed_percentage() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_truncated_bounds() {
        // 0.1 * 15 = 1.5 -> 1, 0.9 * 15 = 13.5 -> 13
        let samples: Vec<f64> = (1..=15).map(|x| x as f64).collect();
        let analysis = trim_samples(&samples, 0.1).unwrap();

        assert_eq!(analysis.low_trimmed, 1);
        assert_eq!(analysis.high_trimmed, 2);
        assert_eq!(analysis.kept_samples.first(), Some(&2.0));
        assert_eq!(analysis.kept_samples.last(), Some(&13.0));
    }

    #[test]
    fn test_order_independent() {
        let samples: Vec<f64> = (0..50).map(|x| 100.0 + ((x * 37) % 17) as f64).collect();
        let expected = trimmed_mean(&samples).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let mut shuffled = samples.clone();
            shuffled.shuffle(&mut rng);
            assert_eq!(trimmed_mean(&shuffled).unwrap(), expected);
        }
    }

    #[test]
    fn test_single_sample_is_insufficient() {
        let err = trimmed_mean(&[42.0]).unwrap_err();
        assert_eq!(err, StatsError::InsufficientSamples { got: 1, min: 2 });
    }

    #[test]
    fn test_empty_is_insufficient() {
        assert!(matches!(
            trimmed_mean(&[]),
            Err(StatsError::InsufficientSamples { got: 0, .. })
        ));
    }

    #[test]
    fn test_two_samples_keep_lower() {
        // 0.1 * 2 = 0.2 -> 0, 0.9 * 2 = 1.8 -> 1
        let mean = trimmed_mean(&[5.0, 3.0]).unwrap();
        assert!((mean - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_min_samples_for_trim() {
        assert_eq!(min_samples_for_trim(0.1), 2);
        assert_eq!(min_samples_for_trim(0.0), 1);
    }

    #[test]
    fn test_half_fraction_keeps_nothing() {
        assert!(matches!(
            trim_samples(&[1.0, 2.0, 3.0], 0.5),
            Err(StatsError::InsufficientSamples { got: 3, .. })
        ));
    }
}
