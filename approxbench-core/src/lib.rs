#![warn(missing_docs)]
//! approxbench Core - Measurement Pipeline
//!
//! This crate runs approximate-vs-reference function pairs:
//! - Log-uniform sample generation into 32-byte aligned buffers
//! - Scalar and 8-lane vector kernels behind one `FunctionUnderTest` model
//! - Timed passes with trimmed-mean latency aggregation
//! - Relative-error evaluation with infinity/subnormal classification
//! - A typestate pipeline that turns each function into a `TestResult`

mod accuracy;
mod error;
mod executor;
mod function;
pub mod kernels;
mod measure;
mod result;
mod rng;
mod samples;
mod suite;

pub use accuracy::{AccuracyReport, HIGH_ERROR_THRESHOLD, evaluate_accuracy};
pub use error::BenchError;
pub use executor::{PassOutputs, run_timed_passes};
pub use function::{
    FunctionUnderTest, InputRange, Kernel, ScalarKernel, ScalarPass, VectorKernel, VectorPass,
};
pub use measure::{Timer, pin_to_cpu};
pub use result::TestResult;
pub use rng::LogScaleRng;
pub use samples::{SAMPLE_ALIGNMENT, SampleSet};
pub use suite::{
    BenchmarkSuite, Computed, Configured, DEFAULT_REPEAT_COUNT, DEFAULT_SAMPLE_COUNT, Evaluated,
    Reported, SamplesGenerated, Stage, SuiteConfig, SuiteEvent, run_function,
};

/// Re-export of the 8-lane float type used by vector kernels
pub use wide::f32x8;
