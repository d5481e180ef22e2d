//! Reference prime counts π(n) used to self-validate a sieve.

/// `(limit, number of primes <= limit)`.
pub const PRIME_COUNTS: [(usize, usize); 8] = [
    (10, 4),
    (100, 25),
    (1_000, 168),
    (10_000, 1_229),
    (100_000, 9_592),
    (1_000_000, 78_498),
    (10_000_000, 664_579),
    (100_000_000, 5_761_455),
];

/// π(limit) if `limit` is one of the tabulated values.
pub fn known_count(limit: usize) -> Option<usize> {
    PRIME_COUNTS
        .iter()
        .find(|&&(l, _)| l == limit)
        .map(|&(_, count)| count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(known_count(10), Some(4));
        assert_eq!(known_count(1_000_000), Some(78_498));
        assert_eq!(known_count(100_000_000), Some(5_761_455));
    }

    #[test]
    fn test_unknown_limit() {
        assert_eq!(known_count(0), None);
        assert_eq!(known_count(1), None);
        assert_eq!(known_count(500_000), None);
    }
}
