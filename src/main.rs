//! Command-line entry point.

use clap::Parser;
use colored::Colorize;
use querybench::scenario::{run_all, ConsoleProgress};
use querybench::{scenarios, HarnessResult, SampleData};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Scenarios whose name contains this substring run; the rest are skipped.
const FILTER_ENV: &str = "QUERYBENCH_FILTER";

#[derive(Parser, Debug)]
#[command(name = "querybench", version, about = "Compare collection-processing pipelines")]
struct Cli {
    /// Dataset size, also the loop bound for the integer scenarios.
    #[arg(default_value_t = 100)]
    size: usize,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli.size) {
        Ok(()) => {
            println!("\nDone!");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(size: usize) -> HarnessResult<()> {
    let data = Arc::new(SampleData::generate(size)?);
    tracing::info!(
        size,
        categories = data.categories.len(),
        orders = data.orders.len(),
        "dataset ready"
    );
    let filter = std::env::var(FILTER_ENV).ok();
    run_all(
        scenarios::all(&data, size),
        filter.as_deref(),
        &mut ConsoleProgress,
    )
}
