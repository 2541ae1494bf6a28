//! Report Data Structures

use approxbench_core::TestResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Complete run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Where and how the run happened
    pub meta: ReportMeta,
    /// One record per function, in run order
    pub results: Vec<TestResult>,
    /// Aggregate counts
    pub summary: ReportSummary,
}

impl Report {
    /// Build a report and its summary from finished results
    pub fn new(meta: ReportMeta, results: Vec<TestResult>, total_duration_ms: f64) -> Self {
        let summary = ReportSummary::from_results(&results, total_duration_ms);
        Self {
            meta,
            results,
            summary,
        }
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Harness version
    pub version: String,
    /// UTC time the report was generated
    pub timestamp: DateTime<Utc>,
    /// Host description
    pub system: SystemInfo,
    /// Run parameters
    pub config: ReportConfig,
}

/// Run parameters captured in report metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Inputs generated per function
    pub sample_count: usize,
    /// Timed passes per transform
    pub repeat_count: usize,
    /// Base seed, if fixed
    pub seed: Option<u64>,
    /// Core the process was pinned to
    pub pinned_cpu: Option<usize>,
}

/// Host information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system
    pub os: String,
    /// CPU architecture
    pub arch: String,
    /// CPU model name
    pub cpu: String,
    /// Logical cores available
    pub cpu_cores: u32,
}

/// Report summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Functions measured
    pub total_functions: usize,
    /// Outputs compared across all functions
    pub total_experiments: usize,
    /// Outputs that contributed to error statistics
    pub valid_experiments: usize,
    /// Functions with at least one unexpected infinity
    pub functions_with_infinities: usize,
    /// Functions with at least one unexpected subnormal
    pub functions_with_subnormals: usize,
    /// Samples above the high-error threshold
    pub high_error_samples: usize,
    /// Wall time of the whole run
    pub total_duration_ms: f64,
}

impl ReportSummary {
    /// Tally results
    pub fn from_results(results: &[TestResult], total_duration_ms: f64) -> Self {
        Self {
            total_functions: results.len(),
            total_experiments: results.iter().map(|r| r.total_experiments).sum(),
            valid_experiments: results.iter().map(|r| r.valid_experiments).sum(),
            functions_with_infinities: results
                .iter()
                .filter(|r| r.unexpected_infinity_count > 0)
                .count(),
            functions_with_subnormals: results
                .iter()
                .filter(|r| r.unexpected_subnormal_count > 0)
                .count(),
            high_error_samples: results.iter().map(|r| r.high_error_count).sum(),
            total_duration_ms,
        }
    }
}
