//! Bit-packed Sieve of Eratosthenes over the odd numbers.
//!
//! - 1 bit per odd number, 64 per `u64` word (flag `i` stands for `2*i + 1`)
//! - 2 is never stored; [`PrimeSieve::primes`] supplies it
//! - the next-factor search skips whole zero words via `trailing_zeros`
//! - integer square root, so large limits never hit f64 rounding

use crate::error::SieveError;
use crate::known_counts::known_count;

const WORD_BITS: usize = 64;

/// Integer square root, exact for every `u64`.
/// Newton-corrected from an f64 seed.
#[inline]
pub(crate) fn isqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut x = (n as f64).sqrt() as u64;
    while x > 0 && x.checked_mul(x).map_or(true, |sq| sq > n) {
        x -= 1;
    }
    while (x + 1).checked_mul(x + 1).map_or(false, |sq| sq <= n) {
        x += 1;
    }
    x
}

/// Offsets of the set bits of `word`, lowest first (Brian Kernighan).
#[inline]
fn set_bits(mut word: u64) -> impl Iterator<Item = usize> {
    std::iter::from_fn(move || {
        if word == 0 {
            return None;
        }
        let tz = word.trailing_zeros() as usize;
        word &= word - 1;
        Some(tz)
    })
}

/// Whether [`PrimeSieve::run`] has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SieveState {
    Unsieved,
    Sieved,
}

/// Primality flags for every odd integer in `[1, limit]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeSieve {
    limit: usize,
    /// Number of flags, `(limit + 1) / 2`.
    len: usize,
    /// Packed flags. Bits past `len` in the last word stay zero.
    words: Vec<u64>,
    state: SieveState,
}

impl PrimeSieve {
    /// Builds an unsieved sieve with every flag set.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is zero. Use [`PrimeSieve::try_new`] to get an error
    /// instead.
    pub fn new(limit: usize) -> Self {
        assert!(limit > 0, "sieve limit must be positive");

        let len = (limit + 1) / 2;
        let mut words = vec![!0u64; len.div_ceil(WORD_BITS)];
        let tail = len % WORD_BITS;
        if tail != 0 {
            if let Some(last) = words.last_mut() {
                *last = (1u64 << tail) - 1;
            }
        }

        Self {
            limit,
            len,
            words,
            state: SieveState::Unsieved,
        }
    }

    /// Like [`PrimeSieve::new`], but refuses a zero limit with an error.
    pub fn try_new(limit: usize) -> Result<Self, SieveError> {
        if limit == 0 {
            return Err(SieveError::ZeroLimit);
        }
        Ok(Self::new(limit))
    }

    /// Clears the flag of every odd composite below `limit`.
    ///
    /// Multiples are marked from `factor²` up to but excluding `limit`, so
    /// the flag of `limit` itself is never cleared. A second call is a no-op.
    pub fn run(&mut self) {
        if self.state == SieveState::Sieved {
            return;
        }

        let max_factor = isqrt(self.limit as u64) as usize;
        let mut factor = 3;

        while factor <= max_factor {
            // `factor` may already be crossed out; land on the next survivor.
            factor = match self.next_set_index(factor / 2) {
                Some(index) => 2 * index + 1,
                None => break,
            };

            for multiple in (factor * factor..self.limit).step_by(factor * 2) {
                self.clear_bit(multiple);
            }

            factor += 2;
        }

        self.state = SieveState::Sieved;
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn state(&self) -> SieveState {
        self.state
    }

    /// Bytes held by the flag words.
    pub fn footprint_bytes(&self) -> usize {
        self.words.len() * std::mem::size_of::<u64>()
    }

    /// True iff `n` is an odd number in `3..=limit` whose flag is still set.
    ///
    /// 1 is excluded even though its flag is never cleared. 2 is even and
    /// therefore reported as `false`; use [`PrimeSieve::primes`] when the
    /// full list is wanted.
    pub fn is_prime(&self, n: usize) -> bool {
        n % 2 == 1 && n > 1 && n <= self.limit && self.flag(n / 2)
    }

    /// Number of set flags, index 0 included.
    ///
    /// Index 0 stands for 1 and is never cleared; it takes the place of the
    /// unrepresented prime 2, which is what makes the count equal π(limit).
    pub fn count_primes(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// True iff `limit` has a known prime count and it matches.
    pub fn validate(&self) -> bool {
        known_count(self.limit) == Some(self.count_primes())
    }

    /// 2 (when `limit >= 2`) followed by the value of every surviving flag.
    pub fn primes(&self) -> impl Iterator<Item = usize> + '_ {
        let two = (self.limit >= 2).then_some(2);
        let odd = self.words.iter().enumerate().flat_map(|(wi, &word)| {
            set_bits(word).map(move |tz| (wi * WORD_BITS + tz) * 2 + 1)
        });
        two.into_iter().chain(odd.filter(|&p| p > 1))
    }

    /// Raw flags in index order.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.flag(i))
    }

    #[inline]
    fn flag(&self, index: usize) -> bool {
        (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 == 1
    }

    #[inline]
    fn clear_bit(&mut self, value: usize) {
        debug_assert!(value % 2 == 1, "attempted to clear even value {value}");
        let index = value / 2;
        self.words[index / WORD_BITS] &= !(1u64 << (index % WORD_BITS));
    }

    /// First set flag at or after `from`.
    fn next_set_index(&self, from: usize) -> Option<usize> {
        if from >= self.len {
            return None;
        }
        let mut wi = from / WORD_BITS;
        let mut word = self.words[wi] & (!0u64 << (from % WORD_BITS));
        loop {
            if word != 0 {
                return Some(wi * WORD_BITS + word.trailing_zeros() as usize);
            }
            wi += 1;
            word = *self.words.get(wi)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sieved(limit: usize) -> PrimeSieve {
        let mut sieve = PrimeSieve::new(limit);
        sieve.run();
        sieve
    }

    #[test]
    fn test_small_primes() {
        assert_eq!(sieved(10).primes().collect::<Vec<_>>(), vec![2, 3, 5, 7]);
        assert_eq!(
            sieved(20).primes().collect::<Vec<_>>(),
            vec![2, 3, 5, 7, 11, 13, 17, 19]
        );
    }

    #[test]
    fn test_primes_up_to_30() {
        let sieve = sieved(30);
        let mut found: Vec<usize> = (0..=30).filter(|&n| sieve.is_prime(n)).collect();
        found.insert(0, 2);
        assert_eq!(found, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert_eq!(sieve.primes().collect::<Vec<_>>(), found);
    }

    #[test]
    fn test_known_counts() {
        for limit in [10, 100, 1_000, 10_000, 100_000, 1_000_000] {
            let sieve = sieved(limit);
            assert_eq!(Some(sieve.count_primes()), known_count(limit), "limit={limit}");
            assert!(sieve.validate(), "limit={limit}");
        }
    }

    #[test]
    fn test_edge_cases() {
        let one = sieved(1);
        assert_eq!(one.count_primes(), 1);
        assert!(!one.validate());
        assert_eq!(one.primes().count(), 0);
        assert!(!one.is_prime(1));
        assert_eq!(one.bits().collect::<Vec<_>>(), vec![true]);

        assert_eq!(sieved(2).primes().collect::<Vec<_>>(), vec![2]);
        assert_eq!(sieved(3).primes().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_limit_nine_sieves_with_three_only() {
        let sieve = sieved(9);
        assert_eq!(sieve.bits().count(), 5);
        assert!(sieve.is_prime(3));
        assert!(sieve.is_prime(5));
        assert!(sieve.is_prime(7));
        // Marking stops short of the limit, so 9 itself keeps its flag.
        assert!(sieve.is_prime(9));
        assert_eq!(sieve.count_primes(), 5);
    }

    #[test]
    fn test_multiples_of_three_cleared_from_nine() {
        let sieve = sieved(30);
        for n in [9, 15, 21, 27] {
            assert!(!sieve.is_prime(n), "{n} should be composite");
        }
    }

    #[test]
    fn test_even_values_never_prime() {
        let sieve = sieved(100);
        assert!((0..=100).step_by(2).all(|n| !sieve.is_prime(n)));
    }

    #[test]
    fn test_out_of_range_query() {
        let sieve = sieved(100);
        assert!(sieve.is_prime(97));
        assert!(!sieve.is_prime(101));
        assert!(!sieve.is_prime(usize::MAX));
    }

    #[test]
    fn test_unsieved_reports_all_candidates() {
        let sieve = PrimeSieve::new(100);
        assert_eq!(sieve.state(), SieveState::Unsieved);
        assert_eq!(sieve.count_primes(), 50);
        assert!(sieve.is_prime(9));
        assert!(!sieve.validate());
    }

    #[test]
    fn test_rerun_is_noop() {
        let mut sieve = sieved(1_000);
        let before = sieve.clone();
        sieve.run();
        assert_eq!(sieve, before);
        assert_eq!(sieve.state(), SieveState::Sieved);
    }

    #[test]
    fn test_queries_do_not_mutate() {
        let sieve = sieved(10_000);
        let counts: Vec<usize> = (0..3).map(|_| sieve.count_primes()).collect();
        assert!(counts.iter().all(|&c| c == 1_229));
        assert!((0..3).all(|_| sieve.validate()));
    }

    #[test]
    fn test_tail_bits_stay_clear() {
        // 64 flags exactly, then one past a word boundary.
        for limit in [127, 128, 129, 130] {
            let sieve = PrimeSieve::new(limit);
            assert_eq!(sieve.count_primes(), (limit + 1) / 2, "limit={limit}");
            assert_eq!(sieve.footprint_bytes(), ((limit + 1) / 2).div_ceil(64) * 8);
        }
    }

    #[test]
    fn test_next_set_index_crosses_words() {
        let mut sieve = PrimeSieve::new(1_000);
        for i in 1..200 {
            sieve.words[i / WORD_BITS] &= !(1u64 << (i % WORD_BITS));
        }
        assert_eq!(sieve.next_set_index(1), Some(200));
        assert_eq!(sieve.next_set_index(0), Some(0));
        assert_eq!(sieve.next_set_index(500), None);
    }

    #[test]
    fn test_try_new_rejects_zero() {
        assert_eq!(PrimeSieve::try_new(0), Err(SieveError::ZeroLimit));
        assert!(PrimeSieve::try_new(1).is_ok());
    }

    #[test]
    #[should_panic(expected = "sieve limit must be positive")]
    fn test_new_panics_on_zero() {
        let _ = PrimeSieve::new(0);
    }

    #[test]
    fn test_isqrt_safety() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(8), 2);
        assert_eq!(isqrt(9), 3);
        assert_eq!(isqrt(u64::MAX), 4_294_967_295);
        assert_eq!(isqrt(1 << 52), 1 << 26);
    }
}
