//! Trial-division primality testing.
//!
//! Two rules are offered.  `Exact` is a correct 6k±1 trial division.
//! `Legacy` reproduces, quirk for quirk, the rule the first Ulam
//! renderings were made with, so those pictures can be regenerated:
//!
//! * 2 and 3 are reported composite;
//! * the second candidate of each pair is tested as `n % d + 2 == 0`,
//!   which can never hold for a non-negative remainder, so factors of
//!   the form 6k+1 (7, 13, 19, ...) are never found;
//! * candidates stop strictly below ⌊√n⌋, so 25 and 121 slip through.

use crate::error::{FractalError, Result};

/// Which primality rule to apply.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Primality {
    /// True iff `n` is prime.
    Exact,
    /// The historical rule, defects included.
    Legacy,
}

impl Default for Primality {
    fn default() -> Self {
        Primality::Exact
    }
}

impl Primality {
    /// Apply the rule.  Negative input is an argument error under both
    /// rules.
    pub fn is_prime(self, n: i64) -> Result<bool> {
        if n < 0 {
            return Err(FractalError::invalid(format!(
                "primality is only defined here for non-negative integers, got {}",
                n
            )));
        }
        Ok(match self {
            Primality::Exact => exact(n),
            Primality::Legacy => legacy(n),
        })
    }
}

/// `Primality::Exact` applied to `n`.
pub fn is_prime(n: i64) -> Result<bool> {
    Primality::Exact.is_prime(n)
}

fn exact(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut d = 5;
    while d <= n / d {
        if n % d == 0 || n % (d + 2) == 0 {
            return false;
        }
        d += 6;
    }
    true
}

fn legacy(n: i64) -> bool {
    if n < 3 {
        return false;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let upper_bound = (n as f64).sqrt() as i64;
    let mut d = 5;
    while d < upper_bound {
        if n % d == 0 || n % d + 2 == 0 {
            return false;
        }
        d += 6;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sieve of Eratosthenes over 0..=limit.
    fn sieve(limit: usize) -> Vec<bool> {
        let mut prime = vec![true; limit + 1];
        prime[0] = false;
        if limit >= 1 {
            prime[1] = false;
        }
        let mut i = 2;
        while i * i <= limit {
            if prime[i] {
                let mut j = i * i;
                while j <= limit {
                    prime[j] = false;
                    j += i;
                }
            }
            i += 1;
        }
        prime
    }

    #[test]
    fn exact_matches_sieve() {
        let reference = sieve(10_000);
        for n in 0..=10_000 {
            assert_eq!(is_prime(n as i64).unwrap(), reference[n], "n = {}", n);
        }
    }

    #[test]
    fn exact_reaches_the_top_of_the_range() {
        // 2^63 - 25, the largest prime an i64 holds.
        assert_eq!(is_prime(9_223_372_036_854_775_783), Ok(true));
        // 2^63 - 1 = 7^2 * 73 * 127 * 337 * 92737 * 649657
        assert_eq!(is_prime(i64::max_value()), Ok(false));
        assert_eq!(is_prime(i64::max_value() - 1), Ok(false));
    }

    #[test]
    fn negatives_are_rejected() {
        assert!(is_prime(-7).is_err());
        assert!(Primality::Legacy.is_prime(-1).is_err());
    }

    #[test]
    fn zero_and_one_are_not_prime() {
        for rule in &[Primality::Exact, Primality::Legacy] {
            assert_eq!(rule.is_prime(0), Ok(false));
            assert_eq!(rule.is_prime(1), Ok(false));
        }
    }

    #[test]
    fn legacy_rejects_two_and_three() {
        assert_eq!(Primality::Legacy.is_prime(2), Ok(false));
        assert_eq!(Primality::Legacy.is_prime(3), Ok(false));
        assert_eq!(Primality::Exact.is_prime(2), Ok(true));
        assert_eq!(Primality::Exact.is_prime(3), Ok(true));
    }

    #[test]
    fn legacy_misses_six_k_plus_one_factors() {
        // 91 = 7 * 13 and 247 = 13 * 19: neither has a 6k-1 factor.
        // The `n % d + 2 == 0` test was meant to catch d + 2.
        for &n in &[49, 91, 247] {
            assert_eq!(Primality::Legacy.is_prime(n), Ok(true), "n = {}", n);
            assert_eq!(Primality::Exact.is_prime(n), Ok(false), "n = {}", n);
        }
    }

    #[test]
    fn legacy_bound_is_strict() {
        // ⌊√25⌋ = 5 so the candidate 5 is never tried.
        assert_eq!(Primality::Legacy.is_prime(25), Ok(true));
        assert_eq!(Primality::Legacy.is_prime(121), Ok(true));
        // 55 = 5 * 11 still falls to the candidate 5.
        assert_eq!(Primality::Legacy.is_prime(55), Ok(false));
    }

    #[test]
    fn legacy_disagrees_only_where_documented() {
        let reference = sieve(10_000);
        for n in 4..=10_000usize {
            let legacy = Primality::Legacy.is_prime(n as i64).unwrap();
            if legacy != reference[n] {
                // Every disagreement is a composite reported prime.
                assert!(legacy && !reference[n], "n = {}", n);
            }
        }
    }
}
