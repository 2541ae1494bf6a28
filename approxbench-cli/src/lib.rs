#![warn(missing_docs)]
//! approxbench CLI Library
//!
//! This module provides the command-line driver: it layers CLI flags over
//! `approx.toml`, selects functions from the built-in catalogue, runs the
//! suite with a progress bar, and renders the report.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     approxbench_cli::run()
//! }
//! ```

mod config;
mod metadata;
mod planner;

pub use config::*;
pub use metadata::build_report_meta;
pub use planner::{ExecutionPlan, build_plan};

use anyhow::Context;
use approxbench_core::kernels::builtin_functions;
use approxbench_core::{BenchmarkSuite, FunctionUnderTest, SuiteConfig, SuiteEvent, pin_to_cpu};
use approxbench_report::{OutputFormat, Report, render};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// approxbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "approxbench")]
#[command(
    author,
    version,
    about = "approxbench - accuracy and throughput of bit-level float approximations"
)]
pub struct Cli {
    /// Optional subcommand (List, Run, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter functions by regex pattern on their name
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Output format: human, json, csv (overrides approx.toml)
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Inputs generated per function
    #[arg(long, short = 'n')]
    pub samples: Option<usize>,

    /// Timed passes per transform
    #[arg(long, short = 'r')]
    pub repeats: Option<usize>,

    /// Base seed for reproducible inputs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pin the process to this CPU core
    #[arg(long)]
    pub pin_cpu: Option<usize>,

    /// Configuration file (default: discover approx.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Dry run - list functions without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// List the functions that would run
    List,
    /// Run the suite (default)
    Run,
    /// Print a commented approx.toml template
    Init,
}

/// Run the approxbench CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the approxbench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    if cli.command == Some(Commands::Init) {
        print!("{}", ApproxConfig::default_toml());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => ApproxConfig::load(path)?,
        None => ApproxConfig::discover()?.unwrap_or_default(),
    };

    let plan = plan_functions(&cli, &config)?;

    match cli.command {
        Some(Commands::List) => print!("{}", plan.describe()),
        _ if cli.dry_run => print!("{}", plan.describe()),
        _ => run_suite(&cli, &config, plan)?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Select functions from the catalogue after range overrides and filtering
fn plan_functions(cli: &Cli, config: &ApproxConfig) -> anyhow::Result<ExecutionPlan> {
    let filter = Regex::new(&cli.filter)
        .with_context(|| format!("Invalid filter pattern: {}", cli.filter))?;
    let functions = config.apply_ranges(builtin_functions())?;
    Ok(build_plan(functions, Some(&filter)))
}

/// Build the suite configuration by layering: approx.toml defaults → CLI overrides.
pub fn resolve_suite_config(cli: &Cli, config: &ApproxConfig) -> SuiteConfig {
    let base = config.suite_config();
    SuiteConfig {
        sample_count: cli.samples.unwrap_or(base.sample_count),
        repeat_count: cli.repeats.unwrap_or(base.repeat_count),
        seed: cli.seed.or(base.seed),
    }
}

/// Output format: CLI wins, then approx.toml
pub fn resolve_format(cli: &Cli, config: &ApproxConfig) -> anyhow::Result<OutputFormat> {
    let raw = cli.format.as_deref().unwrap_or(&config.output.format);
    raw.parse::<OutputFormat>().map_err(anyhow::Error::msg)
}

fn run_suite(cli: &Cli, config: &ApproxConfig, plan: ExecutionPlan) -> anyhow::Result<()> {
    let suite_config = resolve_suite_config(cli, config);
    let format = resolve_format(cli, config)?;
    let output_path = cli.output.clone().or_else(|| config.output.path.clone());

    if plan.functions.is_empty() {
        println!("No functions matched.");
        return Ok(());
    }

    let pinned_cpu = cli.pin_cpu.or(config.runner.pin_cpu);
    if let Some(cpu) = pinned_cpu {
        pin_to_cpu(cpu).with_context(|| format!("Failed to pin to CPU {cpu}"))?;
        info!(cpu, "pinned to core");
    }

    info!(
        functions = plan.functions.len(),
        samples = suite_config.sample_count,
        repeats = suite_config.repeat_count,
        "starting run"
    );

    let start_time = Instant::now();
    let results = run_with_progress_bar(suite_config, plan.functions, cli.verbose)?;
    let total_duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    let meta = build_report_meta(&suite_config, pinned_cpu);
    let report = Report::new(meta, results, total_duration_ms);
    let output = render(&report, format).context("Failed to render report")?;

    if let Some(path) = output_path {
        let mut file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(output.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }

    Ok(())
}

fn run_with_progress_bar(
    config: SuiteConfig,
    functions: Vec<FunctionUnderTest>,
    verbose: bool,
) -> anyhow::Result<Vec<approxbench_core::TestResult>> {
    let pb = if verbose {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(functions.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let suite = BenchmarkSuite::new(config).with_functions(functions);
    let results = suite.run_with_progress(|event| match event {
        SuiteEvent::Started { name, .. } => pb.set_message(name.to_string()),
        SuiteEvent::Finished { .. } => pb.inc(1),
    });

    match results {
        Ok(results) => {
            pb.finish_with_message("Complete");
            Ok(results)
        }
        Err(e) => {
            pb.abandon();
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("approxbench").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.filter, ".*");
        assert!(cli.command.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&["-n", "500", "--seed", "9", "--format", "json", "Exponent"]);
        let mut config = ApproxConfig::default();
        config.runner.repeats = 20;
        config.runner.seed = Some(1);
        config.output.format = "csv".to_string();

        let suite = resolve_suite_config(&cli, &config);
        assert_eq!(suite.sample_count, 500);
        assert_eq!(suite.repeat_count, 20);
        assert_eq!(suite.seed, Some(9));
        assert_eq!(resolve_format(&cli, &config).unwrap(), OutputFormat::Json);
        assert_eq!(cli.filter, "Exponent");
    }

    #[test]
    fn test_config_format_used_without_flag() {
        let cli = parse(&[]);
        let mut config = ApproxConfig::default();
        config.output.format = "csv".to_string();
        assert_eq!(resolve_format(&cli, &config).unwrap(), OutputFormat::Csv);
    }

    #[test]
    fn test_unknown_format_is_error() {
        let cli = parse(&["--format", "html"]);
        assert!(resolve_format(&cli, &ApproxConfig::default()).is_err());
    }

    #[test]
    fn test_subcommands() {
        assert_eq!(parse(&["list"]).command, Some(Commands::List));
        assert_eq!(parse(&["init"]).command, Some(Commands::Init));
        assert_eq!(parse(&["-r", "5", "run"]).repeats, Some(5));
    }

    #[test]
    fn test_invalid_filter() {
        let cli = parse(&["(unclosed"]);
        assert!(plan_functions(&cli, &ApproxConfig::default()).is_err());
    }

    #[test]
    fn test_plan_respects_filter() {
        let cli = parse(&["root"]);
        let plan = plan_functions(&cli, &ApproxConfig::default()).unwrap();
        let names: Vec<&str> = plan.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Square root (SIMD)",
                "Inverse square root (SIMD)",
                "Square root",
                "Inverse square root"
            ]
        );
    }

    #[test]
    fn test_run_writes_report_file() {
        let path = std::env::temp_dir().join(format!("approxbench-cli-{}.json", std::process::id()));
        let cli = parse(&[
            "-n",
            "256",
            "--seed",
            "1",
            "--format",
            "json",
            "--output",
            path.to_str().unwrap(),
            "^Square root$",
        ]);
        let config = ApproxConfig::default();
        let plan = plan_functions(&cli, &config).unwrap();
        run_suite(&cli, &config, plan).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let report: Report = serde_json::from_str(&written).unwrap();
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].function_name, "Square root");
        assert_eq!(report.results[0].total_experiments, 256);
        assert_eq!(report.meta.config.seed, Some(1));

        std::fs::remove_file(&path).unwrap();
    }
}
