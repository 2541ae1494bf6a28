//! System Metadata Collection
//!
//! Collects host information for report metadata.
//!
//! ## Collected Data
//!
//! - **OS**: Operating system name and architecture
//! - **CPU**: Model name and logical core count
//! - **Timestamp**: UTC time of report generation
//! - **Run**: sample count, repeat count, seed, pinned core
//!
//! The CPU model is read from `/proc/cpuinfo` and reported as "Unknown"
//! on other platforms.

use approxbench_core::SuiteConfig;
use approxbench_report::{ReportConfig, ReportMeta, SystemInfo};
use chrono::Utc;

/// Build report metadata for a run
pub fn build_report_meta(config: &SuiteConfig, pinned_cpu: Option<usize>) -> ReportMeta {
    let system = SystemInfo {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        cpu: get_cpu_model().unwrap_or_else(|| "Unknown".to_string()),
        cpu_cores: num_cpus(),
    };

    ReportMeta {
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        system,
        config: ReportConfig {
            sample_count: config.sample_count,
            repeat_count: config.repeat_count,
            seed: config.seed,
            pinned_cpu,
        },
    }
}

/// Get CPU model name from /proc/cpuinfo (Linux only)
fn get_cpu_model() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/cpuinfo")
            .ok()
            .and_then(|content| parse_cpu_model(&content))
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_cpu_model(cpuinfo: &str) -> Option<String> {
    cpuinfo
        .lines()
        .find(|l| l.starts_with("model name"))
        .and_then(|l| l.split(':').nth(1))
        .map(|s| s.trim().to_string())
}

/// Get number of available CPU cores
fn num_cpus() -> u32 {
    std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(1)
}
