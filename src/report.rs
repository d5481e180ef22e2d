//! Text rendering of a benchmark outcome.

use std::fmt;

use crate::bench::BenchOutcome;
use crate::sieve::PrimeSieve;

pub const DEFAULT_LABEL: &str = "pro7onmatrix";

/// Tags appended to the machine-readable line.
const SOLUTION_TAGS: &str = "algorithm=base,faithful=yes,bits=1";

/// Full report: optional prime listing, summary line, blank line,
/// machine-readable line.
pub struct Report<'a> {
    pub outcome: &'a BenchOutcome,
    pub label: &'a str,
    pub show_primes: bool,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.show_primes {
            writeln!(f, "{}", PrimeListing(&self.outcome.sieve))?;
        }
        writeln!(f, "{}", Summary(self.outcome))?;
        writeln!(f)?;
        writeln!(f, "{}", MachineLine { outcome: self.outcome, label: self.label })
    }
}

/// `Passes: P, Time: T, Avg: A, Limit: L, Count: C, Valid: V`
pub struct Summary<'a>(pub &'a BenchOutcome);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.0;
        write!(
            f,
            "Passes: {}, Time: {:.6}, Avg: {:.9}, Limit: {}, Count: {}, Valid: {}",
            outcome.passes,
            outcome.elapsed_secs(),
            outcome.average_secs(),
            outcome.sieve.limit(),
            outcome.sieve.count_primes(),
            outcome.sieve.validate(),
        )
    }
}

/// `LABEL;P;T;1;algorithm=base,faithful=yes,bits=1`
pub struct MachineLine<'a> {
    pub outcome: &'a BenchOutcome,
    pub label: &'a str,
}

impl fmt::Display for MachineLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Third field is the thread count.
        write!(
            f,
            "{};{};{:.6};1;{}",
            self.label,
            self.outcome.passes,
            self.outcome.elapsed_secs(),
            SOLUTION_TAGS
        )
    }
}

/// Comma-separated primes, 2 first.
pub struct PrimeListing<'a>(pub &'a PrimeSieve);

impl fmt::Display for PrimeListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.0.primes().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}
