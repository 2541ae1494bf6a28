//! Timed Batch Executor
//!
//! Runs the reference transform over every input `repeat_count` times, then
//! the approximate transform likewise, recording one duration per pass.
//! Vector kernels consume whole 8-lane batches; a tail shorter than a batch is
//! dropped from both timing and accuracy.
//!
//! Each pass is a single call into a monomorphized loop. Only the input slice
//! and the output buffer go through `black_box`, so the kernel itself stays
//! inlined and free to vectorize.

use crate::error::BenchError;
use crate::function::{FunctionUnderTest, Kernel, ScalarPass, VectorPass};
use crate::measure::Timer;
use crate::samples::SAMPLE_ALIGNMENT;
use std::hint::black_box;
use tracing::debug;
use wide::f32x8;

/// Outputs and timings of all passes for one function
#[derive(Debug, Clone, Default)]
pub struct PassOutputs {
    /// Reference outputs, one per processed input
    pub targets: Vec<f32>,
    /// Approximate outputs, one per processed input
    pub actuals: Vec<f32>,
    /// Reference pass durations (µs)
    pub reference_durations_us: Vec<f64>,
    /// Approximate pass durations (µs)
    pub approximate_durations_us: Vec<f64>,
}

impl PassOutputs {
    /// Number of inputs that went through both transforms
    pub fn processed(&self) -> usize {
        self.targets.len()
    }
}

/// Run both transforms of `function` over `input`, `repeat_count` times each
pub fn run_timed_passes(
    function: &FunctionUnderTest,
    input: &[f32],
    repeat_count: usize,
) -> Result<PassOutputs, BenchError> {
    if repeat_count == 0 {
        return Err(BenchError::InsufficientSamples { got: 0, min: 1 });
    }

    match function.kernel {
        Kernel::Scalar {
            reference,
            approximate,
        } => Ok(run_scalar(input, reference, approximate, repeat_count)),
        Kernel::Vector {
            reference,
            approximate,
        } => run_vector(input, reference, approximate, repeat_count),
    }
}

fn run_scalar(
    input: &[f32],
    reference: ScalarPass,
    approximate: ScalarPass,
    repeat_count: usize,
) -> PassOutputs {
    let mut targets = vec![0.0f32; input.len()];
    let mut actuals = vec![0.0f32; input.len()];

    let reference_durations_us = timed_scalar_passes(input, &mut targets, reference, repeat_count);
    let approximate_durations_us =
        timed_scalar_passes(input, &mut actuals, approximate, repeat_count);

    PassOutputs {
        targets,
        actuals,
        reference_durations_us,
        approximate_durations_us,
    }
}

fn timed_scalar_passes(
    input: &[f32],
    output: &mut [f32],
    pass: ScalarPass,
    repeat_count: usize,
) -> Vec<f64> {
    let mut durations = Vec::with_capacity(repeat_count);

    for _ in 0..repeat_count {
        let timer = Timer::start();
        pass(black_box(input), &mut *output);
        let _ = black_box(&mut *output);
        let elapsed = timer.stop_us();

        debug!(elapsed_us = elapsed, "scalar pass");
        durations.push(elapsed);
    }

    durations
}

fn run_vector(
    input: &[f32],
    reference: VectorPass,
    approximate: VectorPass,
    repeat_count: usize,
) -> Result<PassOutputs, BenchError> {
    let address = input.as_ptr() as usize;
    if address % SAMPLE_ALIGNMENT != 0 {
        return Err(BenchError::Alignment {
            address,
            required: SAMPLE_ALIGNMENT,
        });
    }

    let usable = input.len() - input.len() % 8;
    if usable < input.len() {
        debug!(
            dropped = input.len() - usable,
            "input length is not a multiple of 8, tail ignored"
        );
    }

    let lanes: &[f32x8] =
        bytemuck::try_cast_slice(&input[..usable]).map_err(|_| BenchError::Alignment {
            address,
            required: SAMPLE_ALIGNMENT,
        })?;

    let mut targets = vec![f32x8::splat(0.0); lanes.len()];
    let mut actuals = vec![f32x8::splat(0.0); lanes.len()];

    let reference_durations_us = timed_vector_passes(lanes, &mut targets, reference, repeat_count);
    let approximate_durations_us =
        timed_vector_passes(lanes, &mut actuals, approximate, repeat_count);

    Ok(PassOutputs {
        targets: bytemuck::cast_slice(&targets).to_vec(),
        actuals: bytemuck::cast_slice(&actuals).to_vec(),
        reference_durations_us,
        approximate_durations_us,
    })
}

fn timed_vector_passes(
    input: &[f32x8],
    output: &mut [f32x8],
    pass: VectorPass,
    repeat_count: usize,
) -> Vec<f64> {
    let mut durations = Vec::with_capacity(repeat_count);

    for _ in 0..repeat_count {
        let timer = Timer::start();
        pass(black_box(input), &mut *output);
        let _ = black_box(&mut *output);
        let elapsed = timer.stop_us();

        debug!(elapsed_us = elapsed, "vector pass");
        durations.push(elapsed);
    }

    durations
}
