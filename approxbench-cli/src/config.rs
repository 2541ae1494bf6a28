//! Configuration loading from approx.toml
//!
//! Run parameters can be specified in an `approx.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use anyhow::Context;
use approxbench_core::{DEFAULT_REPEAT_COUNT, DEFAULT_SAMPLE_COUNT, FunctionUnderTest, SuiteConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// File name searched for by [`ApproxConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "approx.toml";

/// approxbench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ApproxConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Input range overrides keyed by function name
    #[serde(default)]
    pub ranges: BTreeMap<String, RangeConfig>,
}

/// Runner configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunnerConfig {
    /// Inputs generated per function
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Timed passes per transform
    #[serde(default = "default_repeats")]
    pub repeats: usize,
    /// Fixed base seed (random when absent)
    #[serde(default)]
    pub seed: Option<u64>,
    /// Pin the process to this core before running
    #[serde(default)]
    pub pin_cpu: Option<usize>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            repeats: default_repeats(),
            seed: None,
            pin_cpu: None,
        }
    }
}

fn default_samples() -> usize {
    DEFAULT_SAMPLE_COUNT
}
fn default_repeats() -> usize {
    DEFAULT_REPEAT_COUNT
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "csv"
    #[serde(default = "default_format")]
    pub format: String,
    /// Write the report here instead of stdout
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            path: None,
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

/// Magnitude range override for one function
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RangeConfig {
    /// Smallest magnitude
    pub min: f32,
    /// Largest magnitude
    pub max: f32,
}

impl ApproxConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Find `approx.toml` by walking up from `start`
    pub fn find_from(start: impl Into<PathBuf>) -> Option<PathBuf> {
        let mut dir = start.into();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Discover and load configuration by walking up from the current directory
    ///
    /// Returns `Ok(None)` when no file exists; a file that fails to parse is an error.
    pub fn discover() -> anyhow::Result<Option<Self>> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Self::find_from(cwd).map(Self::load).transpose()
    }

    /// Suite parameters from the `[runner]` section
    pub fn suite_config(&self) -> SuiteConfig {
        SuiteConfig {
            sample_count: self.runner.samples,
            repeat_count: self.runner.repeats,
            seed: self.runner.seed,
        }
    }

    /// Apply `[ranges]` overrides to matching functions
    pub fn apply_ranges(
        &self,
        functions: Vec<FunctionUnderTest>,
    ) -> anyhow::Result<Vec<FunctionUnderTest>> {
        for name in self.ranges.keys() {
            if !functions.iter().any(|f| &f.name == name) {
                warn!(function = %name, "range override for unknown function ignored");
            }
        }

        functions
            .into_iter()
            .map(|function| match self.ranges.get(&function.name) {
                Some(range) => {
                    let name = function.name.clone();
                    function
                        .with_range(range.min, range.max)
                        .with_context(|| format!("Invalid range override for \"{name}\""))
                }
                None => Ok(function),
            })
            .collect()
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# approxbench Configuration

[runner]
# Inputs generated per function
samples = 10000000
# Timed passes per transform (the fastest and slowest 10% are discarded)
repeats = 10
# Fixed base seed for reproducible inputs (uncomment to enable)
# seed = 42
# Pin the process to one core before running (uncomment to enable, Linux only)
# pin_cpu = 0

[output]
# Default output format: human, json, csv
format = "human"
# Write the report to a file instead of stdout (uncomment to enable)
# path = "approx-report.json"

# Per-function input range overrides
# [ranges."Exponent"]
# min = 1e-10
# max = 70.0
"#
        .to_string()
    }
}
