//! Command-line surface and validated benchmark settings.

use std::time::Duration;

use clap::Parser;

use crate::error::ConfigError;
use crate::report::DEFAULT_LABEL;

pub const DEFAULT_LIMIT: usize = 1_000_000;
pub const DEFAULT_DURATION_SECS: f64 = 5.0;

/// Bit-packed Sieve of Eratosthenes, run repeatedly for a fixed time budget.
#[derive(Debug, Parser)]
#[command(name = "prime-sieve-bench", version)]
pub struct Cli {
    /// Sieve all odd numbers up to this limit
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Wall-clock budget in seconds
    #[arg(short, long, default_value_t = DEFAULT_DURATION_SECS)]
    pub duration: f64,

    /// Print every prime found by the last pass
    #[arg(long)]
    pub show_primes: bool,

    /// First field of the machine-readable result line
    #[arg(long, default_value = DEFAULT_LABEL)]
    pub label: String,

    /// Compare the last pass against the `primal` and `primes` crates
    #[arg(long)]
    pub cross_check: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub limit: usize,
    pub duration: Duration,
    pub show_primes: bool,
    pub label: String,
    pub cross_check: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            duration: Duration::from_secs_f64(DEFAULT_DURATION_SECS),
            show_primes: false,
            label: DEFAULT_LABEL.to_string(),
            cross_check: false,
        }
    }
}

impl TryFrom<Cli> for BenchConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        if cli.limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }

        let duration = match Duration::try_from_secs_f64(cli.duration) {
            Ok(d) if !d.is_zero() => d,
            _ => return Err(ConfigError::InvalidDuration(cli.duration)),
        };

        if cli.label.is_empty() || cli.label.contains([';', '\n', '\r']) {
            return Err(ConfigError::InvalidLabel(cli.label));
        }

        Ok(Self {
            limit: cli.limit,
            duration,
            show_primes: cli.show_primes,
            label: cli.label,
            cross_check: cli.cross_check,
        })
    }
}
