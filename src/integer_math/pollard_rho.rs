// src/integer_math/pollard_rho.rs
//
// Pollard's rho with Brent's cycle acceleration. One attempt per additive
// constant c; the factorization driver restarts with fresh constants and a
// doubled stride bound until its retry budget runs out.

use log::debug;
use num::{BigInt, Integer, One};

use crate::integer_math::gcd::GCD;

/// Hard ceiling on the stride length of a single attempt.
pub const RHO_MAX_STRIDE: u64 = 1_000_000;

/// Restart constants are drawn from c ∈ [1, 100).
pub const RHO_MAX_RESTARTS: u32 = 99;

/// A single Brent-accelerated rho attempt with additive constant `c`.
///
/// Returns a nontrivial factor of `n`, or `None` when the sequence
/// collapsed or the stride budget ran out. `n` must be odd and composite;
/// the caller has already stripped small primes and passed Miller–Rabin.
pub fn pollard_rho_brent(n: &BigInt, c: u32, max_stride: u64) -> Option<BigInt> {
    if n <= &BigInt::from(3) {
        return None;
    }
    if n.is_even() {
        return Some(BigInt::from(2));
    }

    let c = BigInt::from(c);
    let step = |x: &BigInt| (x * x + &c) % n;

    let mut y = BigInt::from(2);
    let mut stride: u64 = 1;
    let mut q = BigInt::one();

    while stride <= max_stride {
        let x = y.clone();
        for _ in 0..stride {
            y = step(&y);
        }

        let mut taken: u64 = 0;
        while taken < stride {
            let ys = y.clone();
            let batch = (stride - taken).min(128);
            for _ in 0..batch {
                y = step(&y);
                let diff = if x > y { &x - &y } else { &y - &x };
                q = (&q * &diff) % n;
            }
            taken += batch;

            let d = GCD::find_gcd_pair(&q, n);
            if !d.is_one() {
                if &d == n {
                    // The whole batch collapsed; replay one step at a time.
                    return backtrack(n, &x, &ys, &c);
                }
                debug!("rho(c={}): factor {} after stride {}", c, d, stride);
                return Some(d);
            }
        }

        stride *= 2;
    }

    debug!("rho(c={}): stride budget {} exhausted", c, max_stride);
    None
}

fn backtrack(n: &BigInt, x: &BigInt, ys: &BigInt, c: &BigInt) -> Option<BigInt> {
    let mut y = ys.clone();
    loop {
        y = (&y * &y + c) % n;
        let diff = if x > &y { x - &y } else { &y - x };
        let d = GCD::find_gcd_pair(&diff, n);
        if !d.is_one() {
            if &d == n {
                return None;
            }
            return Some(d);
        }
        if &y == x {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::Zero;

    fn find_factor(n: &BigInt) -> Option<BigInt> {
        (1..100).find_map(|c| pollard_rho_brent(n, c, RHO_MAX_STRIDE))
    }

    #[test]
    fn test_rho_small_semiprime() {
        let n = BigInt::from(8051); // 83 × 97
        let d = find_factor(&n).unwrap();
        assert!(d == BigInt::from(83) || d == BigInt::from(97));
    }

    #[test]
    fn test_rho_larger_semiprime() {
        let n = BigInt::from(1000730021u64); // 31193 × 32069
        let d = find_factor(&n).unwrap();
        assert!((&n % &d).is_zero());
        assert!(d > BigInt::one() && d < n);
    }

    #[test]
    fn test_rho_square() {
        let n = BigInt::from(10403u64 * 10403u64);
        let d = find_factor(&n).unwrap();
        assert!((&n % &d).is_zero());
        assert!(d > BigInt::one() && d < n);
    }
}
