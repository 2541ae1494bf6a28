#![warn(missing_docs)]
//! # approxbench
//!
//! Accuracy and throughput harness for bit-level floating-point approximations.
//!
//! approxbench measures fast approximations against their standard-library references:
//! - **Log-Uniform Inputs**: samples spread evenly across decades, with optional sign flips
//! - **Scalar and SIMD Kernels**: plain `fn(f32) -> f32` or 8-lane `fn(f32x8) -> f32x8`
//! - **Relative Error Statistics**: mean, median, nearest-rank p95 and max over valid samples
//! - **Failure Classification**: approximations that overflow to infinity or fall to subnormal
//! - **Trimmed Throughput**: repeated timed passes with the outer deciles discarded
//!
//! ## Quick Start
//!
//! ```ignore
//! use approxbench::prelude::*;
//!
//! struct Halve;
//!
//! impl ScalarKernel for Halve {
//!     fn reference(x: f32) -> f32 {
//!         x / 2.0
//!     }
//!     fn approximate(x: f32) -> f32 {
//!         f32::from_bits(x.to_bits() - (1 << 23))
//!     }
//! }
//!
//! let config = SuiteConfig { sample_count: 100_000, repeat_count: 10, seed: Some(1) };
//! let results = BenchmarkSuite::new(config)
//!     .with_functions([FunctionUnderTest::scalar::<Halve>("Halve", true)])
//!     .run()?;
//! println!("{}", results[0].mean_relative_error);
//! ```

// Re-export core types
pub use approxbench_core::{
    AccuracyReport, BenchError, BenchmarkSuite, FunctionUnderTest, InputRange, Kernel,
    LogScaleRng, PassOutputs, SampleSet, ScalarKernel, ScalarPass, Stage, SuiteConfig, SuiteEvent,
    TestResult, VectorKernel, VectorPass, evaluate_accuracy, f32x8, kernels, run_function,
    run_timed_passes,
};

// Re-export stats
pub use approxbench_stats::{
    ErrorSummary, StatsError, compute_error_summary, median_and_percentile, trimmed_mean,
};

// Re-export reporting
pub use approxbench_report::{
    OutputFormat, Report, ReportMeta, ReportSummary, format_human_output, generate_csv_report,
    generate_json_report,
};

// Re-export the driver
pub use approxbench_cli::{ApproxConfig, Cli, build_report_meta, run, run_with_cli};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BenchError, BenchmarkSuite, FunctionUnderTest, ScalarKernel, SuiteConfig, TestResult,
        VectorKernel, f32x8,
    };
}
