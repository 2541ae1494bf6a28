//! Log-Scale Sample Generator
//!
//! Draws `f32` inputs whose magnitudes are uniform in log space, so a range
//! like `[1e-38, 3e38]` gets as many samples per decade near the bottom as near
//! the top. Sign is randomized independently when negatives are enabled.

use crate::error::BenchError;
use crate::function::InputRange;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seedable log-uniform sample stream
///
/// The stream never ends; [`LogScaleRng::restart`] rewinds it to the first
/// sample of its seed.
#[derive(Debug, Clone)]
pub struct LogScaleRng {
    rng: StdRng,
    seed: u64,
    log_dist: Uniform<f64>,
    range_min: f32,
    range_max: f32,
    allow_negatives: bool,
}

impl LogScaleRng {
    /// Generator seeded from the thread RNG
    pub fn new(range_min: f32, range_max: f32, allow_negatives: bool) -> Result<Self, BenchError> {
        Self::with_seed(range_min, range_max, allow_negatives, rand::random())
    }

    /// Generator with a fixed seed
    pub fn with_seed(
        range_min: f32,
        range_max: f32,
        allow_negatives: bool,
        seed: u64,
    ) -> Result<Self, BenchError> {
        InputRange::new(range_min, range_max)?;

        let log_min = f64::from(range_min).ln();
        let log_max = f64::from(range_max).ln();

        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            log_dist: Uniform::new_inclusive(log_min, log_max),
            range_min,
            range_max,
            allow_negatives,
        })
    }

    /// Draw the next sample
    pub fn next_sample(&mut self) -> f32 {
        loop {
            let magnitude = (self.log_dist.sample(&mut self.rng).exp() as f32)
                .clamp(self.range_min, self.range_max);

            let number = if self.allow_negatives && self.rng.gen_bool(0.5) {
                -magnitude
            } else {
                magnitude
            };

            if number.is_finite() {
                return number;
            }
        }
    }

    /// Rewind the stream to the start of its seed
    pub fn restart(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    /// Seed this stream was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Lower magnitude bound
    pub fn range_min(&self) -> f32 {
        self.range_min
    }

    /// Upper magnitude bound
    pub fn range_max(&self) -> f32 {
        self.range_max
    }

    /// Whether negative samples are produced
    pub fn allows_negatives(&self) -> bool {
        self.allow_negatives
    }

    /// Human-readable input domain, e.g. `[-100..-1] and [1..100]`
    pub fn range_description(&self) -> String {
        let min = format_bound(self.range_min);
        let max = format_bound(self.range_max);

        if self.allow_negatives {
            format!("[-{max}..-{min}] and [{min}..{max}]")
        } else {
            format!("[{min}..{max}]")
        }
    }
}

impl Iterator for LogScaleRng {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        Some(self.next_sample())
    }
}

fn format_bound(value: f32) -> String {
    if (1.0e-3..1.0e6).contains(&value) {
        format!("{value}")
    } else {
        format!("{value:e}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_within_range() {
        let rng = LogScaleRng::with_seed(1.0, 100.0, true, 11).unwrap();

        for value in rng.take(10_000) {
            assert!(value.is_finite());
            assert!((1.0..=100.0).contains(&value.abs()), "{value} out of range");
        }
    }

    #[test]
    fn test_full_float_range() {
        let rng = LogScaleRng::with_seed(f32::MIN_POSITIVE, f32::MAX, false, 3).unwrap();

        for value in rng.take(10_000) {
            assert!(value.is_finite());
            assert!(value >= f32::MIN_POSITIVE);
        }
    }

    #[test]
    fn test_no_negatives_when_disabled() {
        let rng = LogScaleRng::with_seed(1.0e-10, 70.0, false, 5).unwrap();
        assert!(rng.take(10_000).all(|v| v >= 0.0));
    }

    #[test]
    fn test_both_signs_when_enabled() {
        let samples: Vec<f32> = LogScaleRng::with_seed(1.0, 2.0, true, 5)
            .unwrap()
            .take(1_000)
            .collect();

        assert!(samples.iter().any(|v| *v < 0.0));
        assert!(samples.iter().any(|v| *v > 0.0));
    }

    #[test]
    fn test_log_uniform_spread() {
        // Half the draws should fall below the geometric midpoint (10).
        let below = LogScaleRng::with_seed(1.0, 100.0, false, 17)
            .unwrap()
            .take(20_000)
            .filter(|v| *v < 10.0)
            .count();

        assert!((9_000..11_000).contains(&below), "below = {below}");
    }

    #[test]
    fn test_restart_replays_stream() {
        let mut rng = LogScaleRng::with_seed(1.0, 100.0, true, 99).unwrap();
        let first: Vec<f32> = rng.by_ref().take(16).collect();
        rng.restart();
        let second: Vec<f32> = rng.take(16).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_ranges() {
        for (min, max) in [
            (0.0, 1.0),
            (-1.0, 1.0),
            (2.0, 1.0),
            (1.0, f32::INFINITY),
            (f32::NAN, 1.0),
        ] {
            assert!(
                matches!(
                    LogScaleRng::with_seed(min, max, false, 0),
                    Err(BenchError::InvalidRange { .. })
                ),
                "[{min}, {max}] should be rejected"
            );
        }
    }

    #[test]
    fn test_range_description() {
        let positive = LogScaleRng::with_seed(1.0, 100.0, false, 0).unwrap();
        assert_eq!(positive.range_description(), "[1..100]");

        let signed = LogScaleRng::with_seed(1.0, 100.0, true, 0).unwrap();
        assert_eq!(signed.range_description(), "[-100..-1] and [1..100]");

        let wide = LogScaleRng::with_seed(1.0e-10, 70.0, false, 0).unwrap();
        assert_eq!(wide.range_description(), "[1e-10..70]");
    }
}
