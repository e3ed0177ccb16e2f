// src/integer_math/irreducibility.rs

use log::debug;
use num::{BigInt, Zero};

use crate::integer_math::factorization::divisors;
use crate::polynomial::factor_finite::is_irreducible_over_fp;
use crate::polynomial::finite_field::GfPoly;
use crate::polynomial::polynomial::RationalPoly;
use crate::rational::Rational;

/// Primes probed when the rational-root test is inconclusive for
/// degree ≥ 4.
pub const IRREDUCIBILITY_PROBE_PRIMES: [i64; 6] = [2, 3, 5, 7, 11, 13];

/// Outcome of the irreducibility test. `proven` is false on the
/// degree ≥ 4 fallback that found neither a rational root nor a
/// finite-field certificate: such polynomials are reported irreducible
/// without proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrreducibilityResult {
    pub irreducible: bool,
    pub proven: bool,
}

impl IrreducibilityResult {
    fn proven(irreducible: bool) -> Self {
        IrreducibilityResult { irreducible, proven: true }
    }

    fn assumed() -> Self {
        IrreducibilityResult { irreducible: true, proven: false }
    }
}

/// Irreducibility over Q by the rational-root theorem, backed by
/// finite-field probes for degree ≥ 4.
///
/// Degree ≤ 3 without a rational root is genuinely irreducible. For
/// higher degrees a degree-preserving reduction that is irreducible over
/// some probed F_p certifies the result; when every probe fails, the
/// polynomial is reported irreducible anyway with `proven = false`.
pub fn is_irreducible_over_q(poly: &RationalPoly) -> IrreducibilityResult {
    let degree = match poly.degree() {
        None | Some(0) => return IrreducibilityResult::proven(false),
        Some(d) => d,
    };
    if degree == 1 {
        return IrreducibilityResult::proven(true);
    }

    let (coeffs, _) = poly.clear_denominators();

    if has_rational_root(&coeffs) {
        return IrreducibilityResult::proven(false);
    }
    if degree <= 3 {
        // Any factorization of degree 2 or 3 would include a linear factor.
        return IrreducibilityResult::proven(true);
    }

    for &p in &IRREDUCIBILITY_PROBE_PRIMES {
        let p = BigInt::from(p);
        let reduced = GfPoly::from_integer_coeffs(&p, &coeffs);
        if reduced.degree() != Some(degree) {
            continue;
        }
        if is_irreducible_over_fp(&reduced) {
            debug!("irreducibility certified mod {}", p);
            return IrreducibilityResult::proven(true);
        }
    }

    debug!("no finite-field certificate for degree {}; assuming irreducible", degree);
    IrreducibilityResult::assumed()
}

/// Rational-root theorem over primitive integer coefficients: every
/// rational root is ±p/q with p | constant term and q | leading term.
fn has_rational_root(coeffs: &[BigInt]) -> bool {
    let constant = &coeffs[0];
    let leading = coeffs.last().unwrap();

    if constant.is_zero() {
        return true; // x divides
    }

    let poly = RationalPoly::new(
        coeffs.iter().map(|c| Rational::from_integer(c.clone())).collect(),
    );

    for p in divisors(constant) {
        for q in divisors(leading) {
            for candidate in [
                Rational::new(p.clone(), q.clone()),
                Rational::new(-&p, q.clone()),
            ] {
                let candidate = candidate.expect("divisors are nonzero");
                if poly.evaluate(&candidate).is_zero() {
                    return true;
                }
            }
        }
    }
    false
}
