//! Compares a sieve's primes against the `primal` and `primes` crates.
//!
//! The comparison covers `[2, limit)`: marking stops short of the limit, so
//! an odd composite limit keeps its own flag and is left out here.

use tracing::debug;

use crate::error::CrossCheckError;
use crate::sieve::PrimeSieve;

/// Third-party prime generators used as references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    /// `primal::Sieve::new`
    Primal,
    /// `primes::Sieve` iterator
    PrimesCrate,
}

impl Reference {
    pub const ALL: [Reference; 2] = [Reference::Primal, Reference::PrimesCrate];

    pub fn name(self) -> &'static str {
        match self {
            Reference::Primal => "primal",
            Reference::PrimesCrate => "primes",
        }
    }

    /// All primes `p < limit`.
    pub fn primes_below(self, limit: usize) -> Vec<usize> {
        match self {
            Reference::Primal => primal_primes_below(limit),
            Reference::PrimesCrate => primes_crate_primes_below(limit),
        }
    }
}

fn primal_primes_below(limit: usize) -> Vec<usize> {
    let sieve = primal::Sieve::new(limit);
    sieve.primes_from(0).take_while(|&p| p < limit).collect()
}

fn primes_crate_primes_below(limit: usize) -> Vec<usize> {
    use primes::{PrimeSet, Sieve};
    let mut sieve = Sieve::new();
    sieve
        .iter()
        .take_while(|&p| p < limit as u64)
        .map(|p| p as usize)
        .collect()
}

/// Checks `sieve` against `reference`.
pub fn check_against(sieve: &PrimeSieve, reference: Reference) -> Result<(), CrossCheckError> {
    let limit = sieve.limit();
    let found: Vec<usize> = sieve.primes().take_while(|&p| p < limit).collect();
    let expected = reference.primes_below(limit);

    if found == expected {
        debug!(reference = reference.name(), limit, count = found.len(), "cross-check passed");
        return Ok(());
    }

    let position = found
        .iter()
        .zip(&expected)
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| found.len().min(expected.len()));

    Err(CrossCheckError::Mismatch {
        reference: reference.name(),
        limit,
        expected: expected.len(),
        found: found.len(),
        position,
    })
}

/// Checks `sieve` against every [`Reference`], stopping at the first mismatch.
pub fn check_all(sieve: &PrimeSieve) -> Result<(), CrossCheckError> {
    Reference::ALL
        .into_iter()
        .try_for_each(|reference| check_against(sieve, reference))
}
