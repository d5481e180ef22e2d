//! Fixed-budget throughput harness.
//!
//! Each pass builds a fresh [`PrimeSieve`], runs it and drops it. The clock
//! is checked between passes only; a running sieve is never interrupted.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::SieveError;
use crate::sieve::PrimeSieve;

/// Result of [`run_benchmark`]: pass count, wall time and the last sieve.
#[derive(Debug, Clone)]
pub struct BenchOutcome {
    pub passes: u64,
    pub elapsed: Duration,
    pub sieve: PrimeSieve,
}

impl BenchOutcome {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Mean seconds per pass.
    pub fn average_secs(&self) -> f64 {
        self.elapsed_secs() / self.passes as f64
    }

    pub fn passes_per_sec(&self) -> f64 {
        self.passes as f64 / self.elapsed_secs()
    }
}

/// Sieves `limit` repeatedly until `budget` has elapsed.
///
/// At least one pass always completes, so the outcome carries a sieved
/// sieve even for a budget shorter than a single pass.
pub fn run_benchmark(limit: usize, budget: Duration) -> Result<BenchOutcome, SieveError> {
    debug!(limit, budget_secs = budget.as_secs_f64(), "starting benchmark");

    let start = Instant::now();
    let mut passes = 0u64;

    let sieve = loop {
        let mut sieve = PrimeSieve::try_new(limit)?;
        sieve.run();
        passes += 1;
        // Prevent optimiser from eliding the computation
        std::hint::black_box(&sieve);

        if start.elapsed() >= budget {
            break sieve;
        }
    };
    let elapsed = start.elapsed();

    let outcome = BenchOutcome {
        passes,
        elapsed,
        sieve,
    };
    info!(
        limit,
        passes,
        elapsed_secs = outcome.elapsed_secs(),
        passes_per_sec = outcome.passes_per_sec(),
        sieve_bytes = outcome.sieve.footprint_bytes(),
        "benchmark complete"
    );
    Ok(outcome)
}
