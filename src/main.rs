// CLI entry point — load targets, run the warm-up, print the report.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cdn_warmup::config::{WarmupConfig, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};
use cdn_warmup::engine::orchestrator::WarmupEngine;
use cdn_warmup::input::load_targets;
use cdn_warmup::report;

/// Asynchronous CDN cache warmer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CSV file with an IMAGE_LINK column of URLs to warm
    #[arg(short, long)]
    file: PathBuf,

    /// Maximum number of concurrent requests
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Write the result set to a CSV file named after the input
    #[arg(short, long)]
    output: bool,

    /// Only print failed requests and 4xx/5xx responses
    #[arg(short, long)]
    quiet: bool,

    /// Also read cache headers on non-200 responses
    #[arg(long)]
    inspect_non_success_headers: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

fn export_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "warmup".to_string());
    PathBuf::from(format!("{}.csv", stem))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = WarmupConfig {
        concurrency: args.concurrency,
        timeout_secs: args.timeout,
        quiet: args.quiet,
        output: args.output,
        inspect_non_success_headers: args.inspect_non_success_headers,
    };

    println!(
        "Setting concurrency limit to {} Quiet: {} Output: {}\n",
        config.concurrency, config.quiet, config.output
    );

    let targets = load_targets(&args.file)?;
    if targets.is_empty() {
        println!("No targets to warm.");
        return Ok(());
    }

    let engine = WarmupEngine::new(config.clone()).context("build warm-up engine")?;
    let run = engine.run(&targets).await?;

    for outcome in &run.outcomes {
        if report::should_print(outcome, config.quiet) {
            println!("{}", report::format_outcome_line(outcome));
        }
    }
    println!();
    println!("{}", report::render_summary(&run.summary));

    if config.output {
        let path = export_path(&args.file);
        report::write_csv(&path, &run.outcomes)?;
        println!("Results written to {}", path.display());
    }

    Ok(())
}
