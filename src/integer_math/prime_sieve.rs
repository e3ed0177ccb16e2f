// src/integer_math/prime_sieve.rs

use bitvec::prelude::*;
use lazy_static::lazy_static;

/// Trial division covers every prime below this bound before the
/// probabilistic machinery takes over.
pub const TRIAL_DIVISION_BOUND: u64 = 100_000;

lazy_static! {
    /// All primes below `TRIAL_DIVISION_BOUND`, computed once on first use.
    pub static ref SMALL_PRIMES: Vec<u64> = SmallPrimeSieve::primes_below(TRIAL_DIVISION_BOUND);
}

pub struct SmallPrimeSieve;

impl SmallPrimeSieve {
    /// Sieve of Eratosthenes over a bit mask.
    pub fn primes_below(bound: u64) -> Vec<u64> {
        let bound = bound as usize;
        if bound < 3 {
            return Vec::new();
        }

        let mut composite = bitvec![u64, Lsb0; 0; bound];
        let mut primes = Vec::new();

        for candidate in 2..bound {
            if composite[candidate] {
                continue;
            }
            primes.push(candidate as u64);
            let mut multiple = candidate * candidate;
            while multiple < bound {
                composite.set(multiple, true);
                multiple += candidate;
            }
        }

        primes
    }

    pub fn is_small_prime(value: u64) -> bool {
        value < TRIAL_DIVISION_BOUND && SMALL_PRIMES.binary_search(&value).is_ok()
    }
}
