// src/polynomial/factor_finite.rs
//
// Factorization over F_p: squarefree decomposition, then distinct-degree
// splitting, then Cantor–Zassenhaus equal-degree splitting. Work lists are
// explicit vectors throughout; the only randomness is the seeded generator
// driving the equal-degree probes.

use log::trace;
use num::{BigInt, One, ToPrimitive};
use rand::RngCore;
use rand_chacha::ChaCha8Rng;

use crate::error::{EngineError, EngineResult};
use crate::polynomial::finite_field::GfPoly;

/// Factors a nonzero polynomial over F_p into monic irreducible factors
/// with multiplicities. The product of g^e over the result equals the
/// monic normalization of the input.
pub fn factor_over_fp(f: &GfPoly, rng: &mut ChaCha8Rng) -> EngineResult<Vec<(GfPoly, u32)>> {
    let degree = f
        .degree()
        .ok_or_else(|| EngineError::InvalidPolynomial("cannot factor the zero polynomial".into()))?;
    let monic = f.make_monic();

    if degree == 0 {
        return Ok(Vec::new());
    }
    if degree == 1 {
        return Ok(vec![(monic, 1)]);
    }

    let mut factors: Vec<(GfPoly, u32)> = Vec::new();
    for (squarefree, multiplicity) in squarefree_parts(&monic)? {
        for (product, d) in distinct_degree_parts(&squarefree)? {
            if product.degree() == Some(d) {
                factors.push((product, multiplicity));
            } else {
                for irreducible in equal_degree_split(&product, d, rng)? {
                    factors.push((irreducible, multiplicity));
                }
            }
        }
    }

    factors.sort_by(|a, b| {
        (a.0.degree(), a.0.coeffs()).cmp(&(b.0.degree(), b.0.coeffs()))
    });
    Ok(factors)
}

pub fn is_irreducible_over_fp(f: &GfPoly) -> bool {
    match f.degree() {
        None | Some(0) => false,
        Some(1) => true,
        Some(n) => {
            let mut rng = deterministic_rng();
            match factor_over_fp(f, &mut rng) {
                Ok(factors) => {
                    factors.len() == 1 && factors[0].1 == 1 && factors[0].0.degree() == Some(n)
                }
                Err(_) => false,
            }
        }
    }
}

/// A fixed-seed generator so repeated runs factor identically.
pub fn deterministic_rng() -> ChaCha8Rng {
    use rand::SeedableRng;
    ChaCha8Rng::seed_from_u64(0x6e66_6965_6c64)
}

/// Decomposes a monic polynomial into squarefree factors with their
/// multiplicities. The characteristic-p branch (f' = 0 means f = g(x)^p)
/// is handled with an explicit work list rather than recursion.
fn squarefree_parts(f: &GfPoly) -> EngineResult<Vec<(GfPoly, u32)>> {
    let p = f.modulus().clone();
    let mut results = Vec::new();
    let mut work: Vec<(GfPoly, u32)> = vec![(f.clone(), 1)];

    while let Some((f, outer)) = work.pop() {
        if f.degree().map_or(true, |d| d == 0) {
            continue;
        }

        let df = f.derivative();
        if df.is_zero() {
            // f = g(x^p); in F_p the coefficients are their own pth roots.
            let p_usize = p.to_usize().expect("p <= deg f in the char-p branch");
            work.push((pth_root(&f, p_usize), outer * p_usize as u32));
            continue;
        }

        let mut c = f.gcd(&df);
        let (mut w, _) = exact_div(&f, &c)?;
        let mut i: u32 = 1;

        while !w.is_one() {
            let y = w.gcd(&c);
            let (z, _) = exact_div(&w, &y)?;
            if z.degree().map_or(false, |d| d > 0) {
                results.push((z, outer * i));
            }
            i += 1;
            w = y;
            let (c_next, _) = exact_div(&c, &w)?;
            c = c_next;
        }

        if !c.is_one() {
            let p_usize = p.to_usize().expect("p <= deg f in the char-p branch");
            work.push((pth_root(&c, p_usize), outer * p_usize as u32));
        }
    }

    Ok(results)
}

fn pth_root(f: &GfPoly, p: usize) -> GfPoly {
    let coeffs: Vec<BigInt> = f
        .coeffs()
        .iter()
        .step_by(p)
        .cloned()
        .collect();
    GfPoly::from_integer_coeffs(f.modulus(), &coeffs)
}

fn exact_div(f: &GfPoly, g: &GfPoly) -> EngineResult<(GfPoly, GfPoly)> {
    f.divmod(g)
}

/// Splits a monic squarefree polynomial into products of irreducibles
/// grouped by degree: returns (product, d) pairs.
fn distinct_degree_parts(f: &GfPoly) -> EngineResult<Vec<(GfPoly, usize)>> {
    let p = f.modulus().clone();
    let x = GfPoly::x(p.clone());

    let mut remaining = f.clone();
    let mut frobenius = x.divmod(&remaining).map(|(_, r)| r)?;
    let mut result = Vec::new();
    let mut d = 0usize;

    while remaining.degree().map_or(false, |deg| deg >= 2 * (d + 1)) {
        d += 1;
        frobenius = frobenius.pow_mod(&p, &remaining)?;
        let g = frobenius.sub(&x).gcd(&remaining);
        if !g.is_one() {
            trace!("distinct-degree: degree-{} part {}", d, g);
            let (quotient, _) = remaining.divmod(&g)?;
            remaining = quotient;
            frobenius = frobenius.divmod(&remaining).map(|(_, r)| r)?;
            result.push((g, d));
        }
    }

    if remaining.degree().map_or(false, |deg| deg > 0) {
        let deg = remaining.degree().unwrap();
        result.push((remaining, deg));
    }

    Ok(result)
}

/// Cantor–Zassenhaus: splits a product of distinct irreducibles, all of
/// degree d, into the individual factors. Odd p uses the
/// r^((p^d − 1)/2) − 1 trick; p = 2 uses the trace map.
fn equal_degree_split(f: &GfPoly, d: usize, rng: &mut ChaCha8Rng) -> EngineResult<Vec<GfPoly>> {
    let p = f.modulus().clone();
    let two = BigInt::from(2);

    let mut out = Vec::new();
    let mut work = vec![f.make_monic()];

    while let Some(h) = work.pop() {
        let h_deg = h.degree().expect("equal-degree inputs are nonconstant");
        if h_deg == d {
            out.push(h);
            continue;
        }

        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let r = random_poly(&p, h_deg, rng);

            // A shared factor with the probe already splits h.
            let shared = r.gcd(&h);
            let candidate = if shared.degree().map_or(false, |deg| deg > 0 && deg < h_deg) {
                shared
            } else if p == two {
                trace_map(&r, d, &h)?.gcd(&h)
            } else {
                let exponent = (p.pow(d as u32) - BigInt::one()) / &two;
                let s = r.pow_mod(&exponent, &h)?;
                s.sub(&GfPoly::one(p.clone())).gcd(&h)
            };

            if let Some(deg) = candidate.degree() {
                if deg > 0 && deg < h_deg {
                    trace!("equal-degree: split after {} probes", attempts);
                    let (quotient, _) = h.divmod(&candidate)?;
                    work.push(candidate);
                    work.push(quotient);
                    break;
                }
            }
        }
    }

    Ok(out)
}

/// T(r) = r + r² + r⁴ + … + r^(2^(d−1)) mod h, used over F_2.
fn trace_map(r: &GfPoly, d: usize, h: &GfPoly) -> EngineResult<GfPoly> {
    let two = BigInt::from(2);
    let mut acc = r.divmod(h).map(|(_, rem)| rem)?;
    let mut sum = acc.clone();
    for _ in 1..d {
        acc = acc.pow_mod(&two, h)?;
        sum = sum.add(&acc);
    }
    Ok(sum)
}

fn random_poly(p: &BigInt, below_degree: usize, rng: &mut ChaCha8Rng) -> GfPoly {
    let coeffs: Vec<BigInt> = (0..below_degree)
        .map(|_| BigInt::from(rng.next_u64()) % p)
        .collect();
    GfPoly::from_integer_coeffs(p, &coeffs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(p: i64, coeffs: &[i64]) -> GfPoly {
        GfPoly::new(BigInt::from(p), coeffs.iter().map(|&c| BigInt::from(c)).collect())
    }

    fn reassemble(p: i64, factors: &[(GfPoly, u32)]) -> GfPoly {
        factors.iter().fold(GfPoly::one(BigInt::from(p)), |acc, (g, e)| {
            let mut acc = acc;
            for _ in 0..*e {
                acc = acc.mul(g);
            }
            acc
        })
    }

    #[test]
    fn test_split_x2_plus_1_mod_5() {
        // x² + 1 ≡ (x + 2)(x + 3) over F_5
        let f = poly(5, &[1, 0, 1]);
        let mut rng = deterministic_rng();
        let factors = factor_over_fp(&f, &mut rng).unwrap();
        assert_eq!(factors.len(), 2);
        assert!(factors.iter().all(|(g, e)| g.degree() == Some(1) && *e == 1));
        assert_eq!(reassemble(5, &factors), f);
    }

    #[test]
    fn test_inert_x2_plus_1_mod_3() {
        let f = poly(3, &[1, 0, 1]);
        let mut rng = deterministic_rng();
        let factors = factor_over_fp(&f, &mut rng).unwrap();
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0], (f, 1));
    }

    #[test]
    fn test_ramified_x2_plus_1_mod_2() {
        // x² + 1 ≡ (x + 1)² over F_2
        let f = poly(2, &[1, 0, 1]);
        let mut rng = deterministic_rng();
        let factors = factor_over_fp(&f, &mut rng).unwrap();
        assert_eq!(factors, vec![(poly(2, &[1, 1]), 2)]);
    }

    #[test]
    fn test_mixed_degrees_mod_2() {
        // x³ + x + 1 is irreducible over F_2; multiply by (x + 1)
        let cubic = poly(2, &[1, 1, 0, 1]);
        let f = cubic.mul(&poly(2, &[1, 1]));
        let mut rng = deterministic_rng();
        let factors = factor_over_fp(&f, &mut rng).unwrap();
        assert_eq!(factors.len(), 2);
        assert_eq!(reassemble(2, &factors), f);
    }

    #[test]
    fn test_equal_degree_pair_mod_7() {
        // Two distinct irreducible quadratics over F_7
        let a = poly(7, &[1, 0, 1]); // x² + 1
        let b = poly(7, &[3, 1, 1]); // x² + x + 3
        assert!(is_irreducible_over_fp(&a));
        assert!(is_irreducible_over_fp(&b));
        let f = a.mul(&b);
        let mut rng = deterministic_rng();
        let factors = factor_over_fp(&f, &mut rng).unwrap();
        assert_eq!(factors.len(), 2);
        assert!(factors.iter().all(|(g, _)| g.degree() == Some(2)));
        assert_eq!(reassemble(7, &factors), f);
    }

    #[test]
    fn test_high_multiplicity() {
        // (x + 1)³ (x + 2) over F_5
        let f = poly(5, &[1, 1]).mul(&poly(5, &[1, 1])).mul(&poly(5, &[1, 1])).mul(&poly(5, &[2, 1]));
        let mut rng = deterministic_rng();
        let factors = factor_over_fp(&f, &mut rng).unwrap();
        assert_eq!(reassemble(5, &factors), f);
        let cubed = factors.iter().find(|(g, _)| *g == poly(5, &[1, 1])).unwrap();
        assert_eq!(cubed.1, 3);
    }

    #[test]
    fn test_char_p_power() {
        // x^10 + ... = (x² + 1)^5 over F_5: derivative vanishes on the outer power
        let base = poly(5, &[1, 0, 1]);
        let mut f = GfPoly::one(BigInt::from(5));
        for _ in 0..5 {
            f = f.mul(&base);
        }
        let mut rng = deterministic_rng();
        let factors = factor_over_fp(&f, &mut rng).unwrap();
        assert_eq!(reassemble(5, &factors), f);
        // x² + 1 splits over F_5, so each linear factor carries multiplicity 5
        assert!(factors.iter().all(|(g, e)| g.degree() == Some(1) && *e == 5));
    }
}
