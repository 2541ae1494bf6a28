//! Human-Readable Output
//!
//! Terminal tables for a finished run:
//! - Accuracy: error statistics, valid/total counts, failure counts, input range
//! - Performance: throughput of both transforms and the speedup

use crate::report::Report;

/// Format a report for terminal display
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("approxbench Results\n");
    output.push_str(&"=".repeat(60));
    output.push('\n');

    let config = &report.meta.config;
    let seed = config
        .seed
        .map(|s| s.to_string())
        .unwrap_or_else(|| "random".to_string());
    output.push_str(&format!(
        "samples: {}  repeats: {}  seed: {}\n",
        config.sample_count, config.repeat_count, seed
    ));
    let system = &report.meta.system;
    output.push_str(&format!(
        "cpu: {} ({} cores, {}/{})\n\n",
        system.cpu, system.cpu_cores, system.os, system.arch
    ));

    if report.results.is_empty() {
        output.push_str("No functions matched.\n");
        return output;
    }

    let name_width = report
        .results
        .iter()
        .map(|r| r.function_name.len())
        .max()
        .unwrap_or(20)
        .max("Function".len());

    output.push_str("Accuracy\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  {:<width$}  {:>10}  {:>10}  {:>10}  {:>10}  {:>19}  {:>6}  {:>6}  {}\n",
        "Function",
        "mean",
        "median",
        "p95",
        "max",
        "valid/total",
        "inf",
        "subn",
        "range",
        width = name_width
    ));

    for r in &report.results {
        output.push_str(&format!(
            "  {:<width$}  {:>10.3e}  {:>10.3e}  {:>10.3e}  {:>10.3e}  {:>19}  {:>6}  {:>6}  {}\n",
            r.function_name,
            r.mean_relative_error,
            r.median_relative_error,
            r.p95_relative_error,
            r.max_relative_error,
            format!("{}/{}", r.valid_experiments, r.total_experiments),
            r.unexpected_infinity_count,
            r.unexpected_subnormal_count,
            r.input_range,
            width = name_width
        ));
    }

    output.push('\n');
    output.push_str("Performance\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  {:<width$}  {:>16}  {:>16}  {:>8}\n",
        "Function",
        "reference ops/us",
        "approx ops/us",
        "speedup",
        width = name_width
    ));

    for r in &report.results {
        output.push_str(&format!(
            "  {:<width$}  {:>16.2}  {:>16.2}  {:>7.2}x\n",
            r.function_name,
            r.reference_ops_per_us,
            r.approximate_ops_per_us,
            r.speedup(),
            width = name_width
        ));
    }

    let summary = &report.summary;
    output.push('\n');
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "{} functions, {}/{} valid experiments, {:.0} ms\n",
        summary.total_functions,
        summary.valid_experiments,
        summary.total_experiments,
        summary.total_duration_ms
    ));
    if summary.functions_with_infinities > 0 || summary.functions_with_subnormals > 0 {
        output.push_str(&format!(
            "unexpected outputs: {} with infinities, {} with subnormals\n",
            summary.functions_with_infinities, summary.functions_with_subnormals
        ));
    }
    if summary.high_error_samples > 0 {
        output.push_str(&format!(
            "{} samples above the high-error threshold\n",
            summary.high_error_samples
        ));
    }

    output
}
