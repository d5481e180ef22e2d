//! Bit-packed Sieve of Eratosthenes with a fixed-budget throughput benchmark.
//!
//! [`PrimeSieve`] holds one flag per odd number up to a limit and validates
//! its own count against [`known_counts`]. [`bench::run_benchmark`] repeats
//! construct-and-run passes until a wall-clock budget is spent, and
//! [`report`] renders the result lines.

pub mod bench;
pub mod config;
pub mod cross_check;
pub mod error;
pub mod known_counts;
pub mod report;
pub mod sieve;

use std::io::Write;

pub use bench::{run_benchmark, BenchOutcome};
pub use config::{BenchConfig, Cli};
pub use error::{ConfigError, CrossCheckError, Error, SieveError};
pub use sieve::{PrimeSieve, SieveState};

/// Runs the benchmark described by `config` and writes the report to `out`.
///
/// With `cross_check` set, the last pass is compared against the reference
/// crates before anything is written.
pub fn run<W: Write>(config: &BenchConfig, out: &mut W) -> Result<BenchOutcome, Error> {
    let outcome = run_benchmark(config.limit, config.duration)?;

    if config.cross_check {
        cross_check::check_all(&outcome.sieve)?;
    }

    let report = report::Report {
        outcome: &outcome,
        label: &config.label,
        show_primes: config.show_primes,
    };
    write!(out, "{report}")?;
    out.flush()?;

    Ok(outcome)
}
