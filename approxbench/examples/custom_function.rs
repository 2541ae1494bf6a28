//! Custom Function Example
//!
//! Measures two user-defined approximations alongside the built-in square
//! root kernels and prints the human-readable report.
//!
//! Run with:
//!   cargo run --example custom_function

use approxbench::prelude::*;
use approxbench::{Report, build_report_meta, format_human_output, kernels};

/// Cube root by dividing the biased exponent by three
struct CubeRoot;

impl ScalarKernel for CubeRoot {
    fn reference(x: f32) -> f32 {
        x.cbrt()
    }

    fn approximate(x: f32) -> f32 {
        let bits = x.to_bits();
        let sign = bits & 0x8000_0000;
        let magnitude = bits & 0x7FFF_FFFF;
        f32::from_bits(sign | (magnitude / 3 + 709_921_077))
    }
}

/// Halve every lane by decrementing its exponent
struct Halve;

impl VectorKernel for Halve {
    fn reference(x: f32x8) -> f32x8 {
        x * f32x8::splat(0.5)
    }

    fn approximate(x: f32x8) -> f32x8 {
        f32x8::from(
            x.to_array()
                .map(|v| f32::from_bits(v.to_bits().wrapping_sub(1 << 23))),
        )
    }
}

fn main() -> anyhow::Result<()> {
    let config = SuiteConfig {
        sample_count: 1_000_000,
        repeat_count: 10,
        seed: Some(2024),
    };

    let mut suite = BenchmarkSuite::new(config);
    suite
        .add(
            FunctionUnderTest::scalar::<CubeRoot>("Cube root", true)
                .with_range(1.0e-30, 1.0e30)?,
        )
        .add(FunctionUnderTest::vector::<Halve>("Halve (SIMD)", true));
    for function in kernels::builtin_functions()
        .into_iter()
        .filter(|f| f.name.starts_with("Square root"))
    {
        suite.add(function);
    }

    let start = std::time::Instant::now();
    let results = suite.run()?;
    let meta = build_report_meta(&config, None);
    let report = Report::new(meta, results, start.elapsed().as_secs_f64() * 1000.0);

    print!("{}", format_human_output(&report));
    Ok(())
}
