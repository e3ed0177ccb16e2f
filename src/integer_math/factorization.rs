// src/integer_math/factorization.rs

use log::{debug, warn};
use num::{BigInt, One, Signed, Zero};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::LimitsConfig;
use crate::integer_math::pollard_rho::pollard_rho_brent;
use crate::integer_math::primality::is_probable_prime;
use crate::integer_math::prime_sieve::SMALL_PRIMES;

/// Prime-power decomposition of an integer.
///
/// `certified` is false when the Pollard-rho retry budget ran out and an
/// unsplit composite was folded in as if it were prime. The entries still
/// multiply back to the input, but callers relying on true primality of
/// every key (squarefree-kernel extraction in particular) must check the
/// flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factorization {
    factors: BTreeMap<BigInt, u32>,
    certified: bool,
}

impl Factorization {
    pub fn new() -> Self {
        Factorization { factors: BTreeMap::new(), certified: true }
    }

    pub fn add_factor(&mut self, prime: BigInt, exponent: u32) {
        if exponent == 0 {
            return;
        }
        *self.factors.entry(prime).or_insert(0) += exponent;
    }

    pub fn combine(&mut self, other: &Factorization) {
        for (p, e) in &other.factors {
            self.add_factor(p.clone(), *e);
        }
        self.certified &= other.certified;
    }

    pub fn exponent_of(&self, prime: &BigInt) -> u32 {
        self.factors.get(prime).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BigInt, u32)> {
        self.factors.iter().map(|(p, e)| (p, *e))
    }

    pub fn primes(&self) -> impl Iterator<Item = &BigInt> {
        self.factors.keys()
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn is_certified(&self) -> bool {
        self.certified
    }

    fn mark_uncertified(&mut self) {
        self.certified = false;
    }

    /// Product of p^e over all entries.
    pub fn product(&self) -> BigInt {
        self.factors
            .iter()
            .fold(BigInt::one(), |acc, (p, e)| acc * p.pow(*e))
    }

    /// Splits the factored value as m² · d with d squarefree.
    /// Returns (d, m); both positive.
    pub fn squarefree_kernel(&self) -> (BigInt, BigInt) {
        let mut d = BigInt::one();
        let mut m = BigInt::one();
        for (p, e) in &self.factors {
            if e % 2 == 1 {
                d *= p;
            }
            m *= p.pow(e / 2);
        }
        (d, m)
    }

    pub fn format_as_product(&self) -> String {
        let parts: Vec<String> = self
            .factors
            .iter()
            .map(|(p, e)| if *e == 1 { p.to_string() } else { format!("{}^{}", p, e) })
            .collect();
        parts.join(" * ")
    }
}

impl Default for Factorization {
    fn default() -> Self {
        Self::new()
    }
}

/// Factors |n| into prime powers. Empty for n ∈ {0, 1, −1}.
///
/// Pipeline: trial division over the sieved small primes, a deterministic
/// Miller–Rabin check on the cofactor, then Brent-accelerated Pollard rho
/// splitting composites through an explicit work stack. When the rho
/// restart budget is exhausted the remaining composite is recorded as if
/// prime and the result is marked uncertified.
pub fn factor_integer(n: &BigInt) -> Factorization {
    factor_integer_with_limits(n, &LimitsConfig::default())
}

pub fn factor_integer_with_limits(n: &BigInt, limits: &LimitsConfig) -> Factorization {
    let mut result = Factorization::new();
    let mut remaining = n.abs();
    if remaining <= BigInt::one() {
        return result;
    }

    for &p in SMALL_PRIMES.iter() {
        if p > limits.trial_division_bound {
            break;
        }
        let p = BigInt::from(p);
        if &p * &p > remaining {
            break;
        }
        let mut e = 0u32;
        while (&remaining % &p).is_zero() {
            remaining /= &p;
            e += 1;
        }
        result.add_factor(p, e);
        if remaining.is_one() {
            return result;
        }
    }

    if remaining.is_one() {
        return result;
    }

    // Cofactor splitting through an explicit work stack; no recursion.
    let mut stack = vec![remaining];
    let mut restarts_used = 0u32;

    while let Some(m) = stack.pop() {
        if is_probable_prime(&m) {
            result.add_factor(m, 1);
            continue;
        }

        let mut split = None;
        while restarts_used < limits.rho_max_restarts {
            let c = restarts_used + 1;
            restarts_used += 1;
            if let Some(d) = pollard_rho_brent(&m, c, limits.rho_max_stride) {
                split = Some(d);
                break;
            }
        }

        match split {
            Some(d) => {
                debug!("split {} = {} * {}", m, d, &m / &d);
                stack.push(&m / &d);
                stack.push(d);
            }
            None => {
                warn!("rho budget exhausted; recording composite {} as prime", m);
                result.add_factor(m, 1);
                result.mark_uncertified();
            }
        }
    }

    result
}

/// All positive divisors of |n| in ascending order, by trial division
/// up to √n. Used by the rational-root search.
pub fn divisors(n: &BigInt) -> Vec<BigInt> {
    let n = n.abs();
    if n.is_zero() {
        return Vec::new();
    }

    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = BigInt::one();
    while &d * &d <= n {
        if (&n % &d).is_zero() {
            let q = &n / &d;
            if q != d {
                large.push(q);
            }
            small.push(d.clone());
        }
        d += 1;
    }
    large.reverse();
    small.extend(large);
    small
}
