//! Per-function result record

use crate::accuracy::AccuracyReport;
use serde::{Deserialize, Serialize};

/// Final accuracy and throughput figures for one function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Function name
    pub function_name: String,
    /// Mean relative error
    pub mean_relative_error: f64,
    /// Median relative error
    pub median_relative_error: f64,
    /// Nearest-rank 95th percentile of relative error
    pub p95_relative_error: f64,
    /// Largest relative error
    pub max_relative_error: f64,
    /// Reference throughput (operations per µs)
    pub reference_ops_per_us: f64,
    /// Approximate throughput (operations per µs)
    pub approximate_ops_per_us: f64,
    /// Outputs compared
    pub total_experiments: usize,
    /// Outputs that contributed to the error statistics
    pub valid_experiments: usize,
    /// Infinite or NaN approximations of a normal reference
    pub unexpected_infinity_count: usize,
    /// Subnormal or zero approximations of a normal reference
    pub unexpected_subnormal_count: usize,
    /// Valid outputs with relative error above 0.9
    pub high_error_count: usize,
    /// Input domain, e.g. `[-100..-1] and [1..100]`
    pub input_range: String,
    /// Trimmed mean duration of one reference pass (µs)
    pub reference_latency_us: f64,
    /// Trimmed mean duration of one approximate pass (µs)
    pub approximate_latency_us: f64,
}

impl TestResult {
    /// Assemble a record from the evaluator output and trimmed latencies
    pub fn new(
        function_name: impl Into<String>,
        input_range: String,
        accuracy: &AccuracyReport,
        reference_latency_us: f64,
        approximate_latency_us: f64,
    ) -> Self {
        let processed = accuracy.total_experiments as f64;

        Self {
            function_name: function_name.into(),
            mean_relative_error: accuracy.summary.mean,
            median_relative_error: accuracy.summary.median,
            p95_relative_error: accuracy.summary.p95,
            max_relative_error: accuracy.summary.max,
            reference_ops_per_us: throughput(processed, reference_latency_us),
            approximate_ops_per_us: throughput(processed, approximate_latency_us),
            total_experiments: accuracy.total_experiments,
            valid_experiments: accuracy.valid_experiments(),
            unexpected_infinity_count: accuracy.unexpected_infinity_count,
            unexpected_subnormal_count: accuracy.unexpected_subnormal_count,
            high_error_count: accuracy.high_error_count,
            input_range,
            reference_latency_us,
            approximate_latency_us,
        }
    }

    /// Approximate throughput over reference throughput
    pub fn speedup(&self) -> f64 {
        if self.reference_ops_per_us > 0.0 {
            self.approximate_ops_per_us / self.reference_ops_per_us
        } else {
            0.0
        }
    }

    /// Whether the approximation produced any infinities or subnormals
    pub fn has_unexpected_outputs(&self) -> bool {
        self.unexpected_infinity_count > 0 || self.unexpected_subnormal_count > 0
    }
}

fn throughput(processed: f64, latency_us: f64) -> f64 {
    if latency_us > 0.0 {
        processed / latency_us
    } else {
        0.0
    }
}
