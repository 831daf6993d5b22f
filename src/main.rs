//! dsa - command-line entry point
//!
//! Looks a solution up by id or slug, loads its test cases and runs the
//! requested phase. Reports go to stdout, logs to stderr.

use std::alloc::System;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dsa_practice::{
    Config, Solution, SolutionHarness,
    benchmark::allocator::TrackingAllocator,
    harness::{Session, session::FAREWELL},
    report, solutions,
};

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator::new(System);

#[derive(Debug, Parser)]
#[command(name = "dsa", version, about = "Test, analyze and benchmark practice solutions")]
struct Cli {
    /// Test-case file to use instead of the test-case directory
    #[arg(long, global = true)]
    cases: Option<PathBuf>,

    /// Print the structured result as JSON (non-interactive commands)
    #[arg(long, global = true)]
    json: bool,

    /// Default per-test timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<f64>,

    /// Abandon calls at their deadline instead of waiting for them
    #[arg(long, global = true)]
    hard_deadline: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct Target {
    /// Problem id (`1`, `0042`) or slug (`two_sum`)
    solution: String,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the available solutions
    List,
    /// Run the test cases
    Test(Target),
    /// Compare solve against solve_optimized
    Bench(Target),
    /// Estimate complexity and profile
    Analyze(Target),
    /// Run the test cases under each configured time limit
    Timeouts(Target),
    /// Tests, analysis and benchmark, then an interactive session
    Run(Target),
    /// Interactive session only
    Interactive(Target),
}

fn init_tracing(config: &Config, verbose: u8, json: bool) {
    let fallback = match verbose {
        0 => config.log_filter.clone(),
        1 => "dsa_practice=info,dsa=info".to_string(),
        2 => "dsa_practice=debug,dsa=debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(io::stderr)))
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env().context("Failed to load configuration")?;

    if let Some(secs) = cli.timeout {
        config.runner.default_timeout = Duration::try_from_secs_f64(secs)
            .ok()
            .filter(|d| !d.is_zero())
            .with_context(|| format!("Invalid timeout: {}", secs))?;
    }
    if cli.hard_deadline {
        config.runner.hard_deadline = true;
    }

    Ok(config)
}

fn build_harness(
    cli: &Cli,
    config: &Config,
    target: &Target,
    out: Box<dyn Write>,
) -> Result<SolutionHarness<Box<dyn Write>>> {
    let solution = solutions::find(&target.solution)?;
    let mut harness = SolutionHarness::with_writer(solution, config, out);

    let count = match &cli.cases {
        Some(path) => harness.load_test_cases(path),
        None => harness.load_from_dir(&config.storage.test_cases_path),
    };
    tracing::info!(solution = %target.solution, count, "Test cases ready");

    Ok(harness)
}

fn emit<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

async fn interactive(harness: &mut SolutionHarness<Box<dyn Write>>) -> Result<()> {
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n{}", FAREWELL);
            std::process::exit(130);
        }
    });

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    Session::new(harness, stdin).run().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config, cli.verbose, cli.log_json);

    tracing::debug!(?config, "Configuration loaded");

    let report_out = || -> Box<dyn Write> {
        if cli.json {
            Box::new(io::sink())
        } else {
            Box::new(io::stdout())
        }
    };

    match &cli.command {
        Commands::List => {
            let registry = solutions::registry();
            if cli.json {
                let infos: Vec<_> = registry.iter().map(|s| s.info()).collect();
                emit(&infos)?;
            } else {
                report::write_solution_list(&mut io::stdout(), &registry)?;
            }
        }
        Commands::Test(target) => {
            let mut harness = build_harness(&cli, &config, target, report_out())?;
            harness.print_header()?;
            let summary = harness.run_tests().await?;
            if cli.json {
                emit(&serde_json::json!({
                    "summary": summary,
                    "results": harness.results(),
                }))?;
            }
            if summary.is_some_and(|s| !s.all_passed()) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Bench(target) => {
            let mut harness = build_harness(&cli, &config, target, report_out())?;
            harness.print_header()?;
            let comparison = harness.run_benchmark().await?;
            if cli.json {
                emit(&comparison)?;
            }
        }
        Commands::Analyze(target) => {
            let mut harness = build_harness(&cli, &config, target, report_out())?;
            harness.print_header()?;
            let metrics = harness.run_performance_analysis().await?;
            if cli.json {
                emit(&metrics)?;
            }
        }
        Commands::Timeouts(target) => {
            let mut harness = build_harness(&cli, &config, target, report_out())?;
            harness.print_header()?;
            let outcomes = harness.run_time_limit_sweep().await?;
            if cli.json {
                emit(&outcomes)?;
            }
        }
        Commands::Run(target) => {
            let mut harness = build_harness(&cli, &config, target, Box::new(io::stdout()))?;
            harness.run_all().await?;
            writeln!(harness.writer())?;
            interactive(&mut harness).await?;
        }
        Commands::Interactive(target) => {
            let mut harness = build_harness(&cli, &config, target, Box::new(io::stdout()))?;
            interactive(&mut harness).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
