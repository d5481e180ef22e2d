//! Error types for sieve construction, configuration and cross-checking.

use thiserror::Error;

/// Refused sieve construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SieveError {
    #[error("sieve limit must be positive")]
    ZeroLimit,
}

/// Rejected benchmark configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("limit must be positive")]
    ZeroLimit,
    /// Duration was zero, negative, NaN or too large to represent.
    #[error("duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f64),
    /// The label is the first field of a `;`-separated line.
    #[error("label must be non-empty and must not contain ';' or newlines, got {0:?}")]
    InvalidLabel(String),
}

/// The sieve disagrees with a reference implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CrossCheckError {
    #[error(
        "{reference} disagrees below {limit}: expected {expected} primes, sieve found {found} \
         (first difference at position {position})"
    )]
    Mismatch {
        reference: &'static str,
        limit: usize,
        expected: usize,
        found: usize,
        position: usize,
    },
}

/// Top-level error for a benchmark run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Sieve(#[from] SieveError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    CrossCheck(#[from] CrossCheckError),
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
