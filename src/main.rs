//! Prime sieve benchmark entry point
//!
//! Usage: cargo run --release -- [--limit N] [--duration SECS]

use std::process::ExitCode;

use clap::Parser;
use prime_sieve_bench::{BenchConfig, Cli};
use tracing::error;

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the report
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    let config = match BenchConfig::try_from(Cli::parse()) {
        Ok(config) => config,
        Err(err) => {
            error!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    match prime_sieve_bench::run(&config, &mut std::io::stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
