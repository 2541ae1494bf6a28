//! Benchmark Orchestrator
//!
//! Each function under test moves through a fixed pipeline:
//!
//! ```text
//! Configured -> SamplesGenerated -> Computed -> Evaluated -> Reported
//! ```
//!
//! Every stage is its own type and each transition consumes the previous one,
//! so a stage can never be revisited. Functions run one at a time, in the order
//! they were added, and each owns its buffers until its result is produced.

use crate::accuracy::{AccuracyReport, evaluate_accuracy};
use crate::error::BenchError;
use crate::executor::{PassOutputs, run_timed_passes};
use crate::function::FunctionUnderTest;
use crate::result::TestResult;
use crate::rng::LogScaleRng;
use crate::samples::SampleSet;
use approxbench_stats::{DEFAULT_TRIM_FRACTION, min_samples_for_trim, trim_samples};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Default number of inputs per function
pub const DEFAULT_SAMPLE_COUNT: usize = 10_000_000;

/// Default number of timed passes per transform
pub const DEFAULT_REPEAT_COUNT: usize = 10;

/// Run parameters shared by every function in a suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Inputs generated per function
    pub sample_count: usize,
    /// Timed passes per transform
    pub repeat_count: usize,
    /// Base seed; function `i` uses `seed + i`. Random when absent.
    pub seed: Option<u64>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            repeat_count: DEFAULT_REPEAT_COUNT,
            seed: None,
        }
    }
}

impl SuiteConfig {
    /// Reject configurations that cannot produce a result
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.sample_count == 0 {
            return Err(BenchError::InsufficientSamples { got: 0, min: 1 });
        }

        let min_repeats = min_samples_for_trim(DEFAULT_TRIM_FRACTION);
        if self.repeat_count < min_repeats {
            return Err(BenchError::InsufficientSamples {
                got: self.repeat_count,
                min: min_repeats,
            });
        }

        Ok(())
    }
}

/// Pipeline stage, for logging and progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Function and parameters known
    Configured,
    /// Inputs drawn
    SamplesGenerated,
    /// Both transforms run and timed
    Computed,
    /// Errors summarized
    Evaluated,
    /// Result record built
    Reported,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Configured => "configured",
            Stage::SamplesGenerated => "samples generated",
            Stage::Computed => "computed",
            Stage::Evaluated => "evaluated",
            Stage::Reported => "reported",
        };
        f.write_str(name)
    }
}

/// First stage: a function with its run parameters
#[derive(Debug)]
pub struct Configured<'a> {
    function: &'a FunctionUnderTest,
    config: SuiteConfig,
    seed: Option<u64>,
}

/// Inputs drawn for the function
#[derive(Debug)]
pub struct SamplesGenerated<'a> {
    function: &'a FunctionUnderTest,
    config: SuiteConfig,
    samples: SampleSet,
    input_range: String,
}

/// Outputs and durations of all passes
#[derive(Debug)]
pub struct Computed<'a> {
    function: &'a FunctionUnderTest,
    samples: SampleSet,
    input_range: String,
    outputs: PassOutputs,
}

/// Error statistics computed
#[derive(Debug)]
pub struct Evaluated<'a> {
    function: &'a FunctionUnderTest,
    input_range: String,
    accuracy: AccuracyReport,
    reference_durations_us: Vec<f64>,
    approximate_durations_us: Vec<f64>,
}

/// Final stage: the result record
#[derive(Debug)]
pub struct Reported {
    result: TestResult,
}

impl<'a> Configured<'a> {
    /// Start the pipeline for `function`
    pub fn new(function: &'a FunctionUnderTest, config: SuiteConfig, seed: Option<u64>) -> Self {
        debug!(function = %function.name, stage = %Stage::Configured, "stage");
        Self {
            function,
            config,
            seed,
        }
    }

    /// Draw the input samples
    pub fn generate_samples(self) -> Result<SamplesGenerated<'a>, BenchError> {
        let range = self.function.range;
        let allow_negatives = self.function.allows_negatives;
        let mut rng = match self.seed {
            Some(seed) => LogScaleRng::with_seed(range.min, range.max, allow_negatives, seed)?,
            None => LogScaleRng::new(range.min, range.max, allow_negatives)?,
        };

        let samples = SampleSet::generate(&mut rng, self.config.sample_count);
        let input_range = rng.range_description();

        info!(
            function = %self.function.name,
            count = samples.len(),
            range = %input_range,
            "samples generated"
        );
        debug!(function = %self.function.name, stage = %Stage::SamplesGenerated, "stage");

        Ok(SamplesGenerated {
            function: self.function,
            config: self.config,
            samples,
            input_range,
        })
    }
}

impl<'a> SamplesGenerated<'a> {
    /// Run and time both transforms
    pub fn compute(self) -> Result<Computed<'a>, BenchError> {
        let outputs = run_timed_passes(
            self.function,
            self.samples.as_slice(),
            self.config.repeat_count,
        )?;
        debug!(
            function = %self.function.name,
            stage = %Stage::Computed,
            processed = outputs.processed(),
            "stage"
        );

        Ok(Computed {
            function: self.function,
            samples: self.samples,
            input_range: self.input_range,
            outputs,
        })
    }

    /// Generated inputs
    pub fn samples(&self) -> &SampleSet {
        &self.samples
    }
}

impl<'a> Computed<'a> {
    /// Compare approximate outputs against the reference
    pub fn evaluate(self) -> Result<Evaluated<'a>, BenchError> {
        let accuracy = evaluate_accuracy(
            self.samples.as_slice(),
            &self.outputs.targets,
            &self.outputs.actuals,
        )
        .map_err(|e| e.for_function(&self.function.name))?;
        debug!(function = %self.function.name, stage = %Stage::Evaluated, "stage");

        Ok(Evaluated {
            function: self.function,
            input_range: self.input_range,
            accuracy,
            reference_durations_us: self.outputs.reference_durations_us,
            approximate_durations_us: self.outputs.approximate_durations_us,
        })
    }
}

impl Evaluated<'_> {
    /// Aggregate latencies and build the result record
    pub fn report(self) -> Result<Reported, BenchError> {
        let reference = trim_samples(&self.reference_durations_us, DEFAULT_TRIM_FRACTION)?;
        let approximate = trim_samples(&self.approximate_durations_us, DEFAULT_TRIM_FRACTION)?;
        debug!(
            function = %self.function.name,
            reference_us = reference.mean,
            approximate_us = approximate.mean,
            dropped = reference.low_trimmed + reference.high_trimmed,
            "trimmed latencies"
        );

        let result = TestResult::new(
            self.function.name.clone(),
            self.input_range,
            &self.accuracy,
            reference.mean,
            approximate.mean,
        );
        debug!(function = %self.function.name, stage = %Stage::Reported, "stage");

        Ok(Reported { result })
    }

    /// Accuracy figures
    pub fn accuracy(&self) -> &AccuracyReport {
        &self.accuracy
    }
}

impl Reported {
    /// Take the result record
    pub fn into_result(self) -> TestResult {
        self.result
    }
}

/// Run the whole pipeline for one function
pub fn run_function(
    function: &FunctionUnderTest,
    config: SuiteConfig,
    seed: Option<u64>,
) -> Result<TestResult, BenchError> {
    Ok(Configured::new(function, config, seed)
        .generate_samples()?
        .compute()?
        .evaluate()?
        .report()?
        .into_result())
}

/// Progress notification from [`BenchmarkSuite::run_with_progress`]
#[derive(Debug)]
pub enum SuiteEvent<'a> {
    /// A function is about to run
    Started {
        /// Position in the suite
        index: usize,
        /// Number of functions in the suite
        total: usize,
        /// Function name
        name: &'a str,
    },
    /// A function finished
    Finished {
        /// Position in the suite
        index: usize,
        /// Its result
        result: &'a TestResult,
    },
}

/// Ordered list of functions run with shared parameters
#[derive(Debug, Clone, Default)]
pub struct BenchmarkSuite {
    config: SuiteConfig,
    functions: Vec<FunctionUnderTest>,
}

impl BenchmarkSuite {
    /// Empty suite
    pub fn new(config: SuiteConfig) -> Self {
        Self {
            config,
            functions: Vec::new(),
        }
    }

    /// Append a function; results follow insertion order
    pub fn add(&mut self, function: FunctionUnderTest) -> &mut Self {
        self.functions.push(function);
        self
    }

    /// Append several functions
    pub fn with_functions(mut self, functions: impl IntoIterator<Item = FunctionUnderTest>) -> Self {
        self.functions.extend(functions);
        self
    }

    /// Functions in run order
    pub fn functions(&self) -> &[FunctionUnderTest] {
        &self.functions
    }

    /// Run parameters
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Run every function
    pub fn run(&self) -> Result<Vec<TestResult>, BenchError> {
        self.run_with_progress(|_| {})
    }

    /// Run every function, reporting progress to `observer`
    ///
    /// Stops at the first error; results of earlier functions are discarded.
    pub fn run_with_progress<F>(&self, mut observer: F) -> Result<Vec<TestResult>, BenchError>
    where
        F: FnMut(SuiteEvent<'_>),
    {
        self.config.validate()?;

        let total = self.functions.len();
        let mut results = Vec::with_capacity(total);

        for (index, function) in self.functions.iter().enumerate() {
            observer(SuiteEvent::Started {
                index,
                total,
                name: &function.name,
            });

            let seed = self.config.seed.map(|base| base.wrapping_add(index as u64));
            let result = run_function(function, self.config, seed)?;

            observer(SuiteEvent::Finished {
                index,
                result: &result,
            });
            results.push(result);
        }

        Ok(results)
    }
}
