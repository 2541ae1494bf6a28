#![warn(missing_docs)]
//! approxbench Report - Result Rendering
//!
//! Generates various output formats:
//! - JSON (machine-readable)
//! - CSV (spreadsheet-compatible)
//! - Human-readable accuracy and performance tables

mod csv;
mod human;
mod json;
mod report;

pub use csv::generate_csv_report;
pub use human::format_human_output;
pub use json::generate_json_report;
pub use report::{Report, ReportConfig, ReportMeta, ReportSummary, SystemInfo};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON with full schema
    Json,
    /// CSV for spreadsheets
    Csv,
    /// Human-readable terminal output
    #[default]
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Render `report` in `format`
pub fn render(report: &Report, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => generate_json_report(report),
        OutputFormat::Csv => Ok(generate_csv_report(report)),
        OutputFormat::Human => Ok(format_human_output(report)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approxbench_core::TestResult;
    use chrono::Utc;

    fn result(name: &str, infinities: usize) -> TestResult {
        TestResult {
            function_name: name.to_string(),
            mean_relative_error: 0.02,
            median_relative_error: 0.015,
            p95_relative_error: 0.05,
            max_relative_error: 0.06,
            reference_ops_per_us: 100.0,
            approximate_ops_per_us: 400.0,
            total_experiments: 1000,
            valid_experiments: 998,
            unexpected_infinity_count: infinities,
            unexpected_subnormal_count: 0,
            high_error_count: 1,
            input_range: "[1.1754944e-38..3.4028235e38]".to_string(),
            reference_latency_us: 10.0,
            approximate_latency_us: 2.5,
        }
    }

    fn report() -> Report {
        let meta = ReportMeta {
            version: "0.1.0".to_string(),
            timestamp: Utc::now(),
            system: SystemInfo {
                os: "linux".to_string(),
                arch: "x86_64".to_string(),
                cpu: "Test CPU".to_string(),
                cpu_cores: 4,
            },
            config: ReportConfig {
                sample_count: 1000,
                repeat_count: 10,
                seed: Some(1),
                pinned_cpu: None,
            },
        };
        Report::new(
            meta,
            vec![result("Square root", 0), result("Number inversion (ver. A)", 3)],
            12.5,
        )
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("CSV".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_summary() {
        let summary = report().summary;
        assert_eq!(summary.total_functions, 2);
        assert_eq!(summary.total_experiments, 2000);
        assert_eq!(summary.valid_experiments, 1996);
        assert_eq!(summary.functions_with_infinities, 1);
        assert_eq!(summary.functions_with_subnormals, 0);
        assert_eq!(summary.high_error_samples, 2);
    }

    #[test]
    fn test_json_roundtrips_results() {
        let report = report();
        let json = generate_json_report(&report).unwrap();
        let parsed: Report = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.results, report.results);
        assert_eq!(parsed.meta.config, report.meta.config);
    }

    #[test]
    fn test_csv_rows() {
        let csv = generate_csv_report(&report());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("function,mean_error"));
        assert!(lines[1].starts_with("Square root,"));
        assert!(lines[2].starts_with("Number inversion (ver. A),"));
        assert_eq!(lines[1].split(',').count(), 16);
    }

    #[test]
    fn test_human_output() {
        let text = format_human_output(&report());

        assert!(text.contains("Accuracy"));
        assert!(text.contains("Performance"));
        assert!(text.contains("Square root"));
        assert!(text.contains("998/1000"));
        assert!(text.contains("4.00x"));
        assert!(text.contains("1 with infinities"));
    }

    #[test]
    fn test_human_output_without_results() {
        let mut report = report();
        report.results.clear();
        assert!(format_human_output(&report).contains("No functions matched."));
    }

    #[test]
    fn test_render_dispatch() {
        let report = report();
        assert!(render(&report, OutputFormat::Json).unwrap().starts_with('{'));
        assert!(render(&report, OutputFormat::Csv).unwrap().starts_with("function,"));
    }
}
