//! CSV Output
//!
//! One row per function, columns in `TestResult` field order.

use crate::report::Report;

const HEADER: &str = "function,mean_error,median_error,p95_error,max_error,\
reference_ops_per_us,approximate_ops_per_us,speedup,total_experiments,valid_experiments,\
unexpected_infinities,unexpected_subnormals,high_errors,input_range,\
reference_latency_us,approximate_latency_us";

/// Generate a CSV report
pub fn generate_csv_report(report: &Report) -> String {
    let mut output = String::from(HEADER);
    output.push('\n');

    for r in &report.results {
        output.push_str(&format!(
            "{},{:e},{:e},{:e},{:e},{:.4},{:.4},{:.3},{},{},{},{},{},{},{:.3},{:.3}\n",
            escape(&r.function_name),
            r.mean_relative_error,
            r.median_relative_error,
            r.p95_relative_error,
            r.max_relative_error,
            r.reference_ops_per_us,
            r.approximate_ops_per_us,
            r.speedup(),
            r.total_experiments,
            r.valid_experiments,
            r.unexpected_infinity_count,
            r.unexpected_subnormal_count,
            r.high_error_count,
            escape(&r.input_range),
            r.reference_latency_us,
            r.approximate_latency_us,
        ));
    }

    output
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
