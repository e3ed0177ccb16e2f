// src/polynomial/polynomial.rs

use num::complex::Complex;
use num::{BigInt, One};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::error::{EngineError, EngineResult};
use crate::integer_math::gcd::GCD;
use crate::rational::rational::denominator_lcm;
use crate::rational::Rational;

/// A univariate polynomial over Q, stored as an ascending-degree
/// coefficient list with trailing zeros trimmed. The zero polynomial is
/// the empty list and has no degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RationalPoly {
    coeffs: Vec<Rational>,
}

impl RationalPoly {
    pub fn new(mut coeffs: Vec<Rational>) -> Self {
        while coeffs.last().map_or(false, |c| c.is_zero()) {
            coeffs.pop();
        }
        RationalPoly { coeffs }
    }

    pub fn zero() -> Self {
        RationalPoly { coeffs: Vec::new() }
    }

    pub fn one() -> Self {
        RationalPoly { coeffs: vec![Rational::one()] }
    }

    pub fn constant(value: Rational) -> Self {
        Self::new(vec![value])
    }

    pub fn monomial(coeff: Rational, degree: usize) -> Self {
        let mut coeffs = vec![Rational::zero(); degree + 1];
        coeffs[degree] = coeff;
        Self::new(coeffs)
    }

    pub fn from_integers(values: &[i64]) -> Self {
        Self::new(values.iter().map(|&v| Rational::from_i64(v)).collect())
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        if self.coeffs.is_empty() {
            None
        } else {
            Some(self.coeffs.len() - 1)
        }
    }

    pub fn leading_coeff(&self) -> Option<&Rational> {
        self.coeffs.last()
    }

    /// Coefficient of x^i, zero beyond the stored length.
    pub fn coeff(&self, i: usize) -> Rational {
        self.coeffs.get(i).cloned().unwrap_or_else(Rational::zero)
    }

    pub fn coeffs(&self) -> &[Rational] {
        &self.coeffs
    }

    pub fn is_monic(&self) -> bool {
        self.leading_coeff().map_or(false, |c| c.is_one())
    }

    pub fn add(&self, other: &RationalPoly) -> RationalPoly {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len).map(|i| &self.coeff(i) + &other.coeff(i)).collect();
        RationalPoly::new(coeffs)
    }

    pub fn sub(&self, other: &RationalPoly) -> RationalPoly {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len).map(|i| &self.coeff(i) - &other.coeff(i)).collect();
        RationalPoly::new(coeffs)
    }

    pub fn neg(&self) -> RationalPoly {
        RationalPoly::new(self.coeffs.iter().map(|c| -c).collect())
    }

    pub fn scale(&self, factor: &Rational) -> RationalPoly {
        RationalPoly::new(self.coeffs.iter().map(|c| c * factor).collect())
    }

    pub fn mul(&self, other: &RationalPoly) -> RationalPoly {
        if self.is_zero() || other.is_zero() {
            return RationalPoly::zero();
        }
        let mut coeffs = vec![Rational::zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] = &coeffs[i + j] + &(a * b);
            }
        }
        RationalPoly::new(coeffs)
    }

    /// Euclidean division: self = q · divisor + r with deg r < deg divisor.
    pub fn divmod(&self, divisor: &RationalPoly) -> EngineResult<(RationalPoly, RationalPoly)> {
        let d_deg = divisor.degree().ok_or(EngineError::DivisionByZero)?;
        let lc_inv = divisor.leading_coeff().unwrap().inv()?;

        let mut remainder = self.coeffs.clone();
        if remainder.len() <= d_deg {
            return Ok((RationalPoly::zero(), self.clone()));
        }

        let q_len = remainder.len() - d_deg;
        let mut quotient = vec![Rational::zero(); q_len];

        for k in (0..q_len).rev() {
            let factor = &remainder[k + d_deg] * &lc_inv;
            if factor.is_zero() {
                continue;
            }
            for (i, dc) in divisor.coeffs.iter().enumerate() {
                remainder[k + i] = &remainder[k + i] - &(&factor * dc);
            }
            quotient[k] = factor;
        }

        Ok((RationalPoly::new(quotient), RationalPoly::new(remainder)))
    }

    pub fn evaluate(&self, x: &Rational) -> Rational {
        let mut acc = Rational::zero();
        for c in self.coeffs.iter().rev() {
            acc = &(&acc * x) + c;
        }
        acc
    }

    pub fn evaluate_complex(&self, z: Complex<f64>) -> Complex<f64> {
        let mut acc = Complex::new(0.0, 0.0);
        for c in self.coeffs.iter().rev() {
            acc = acc * z + Complex::new(c.to_f64(), 0.0);
        }
        acc
    }

    pub fn derivative(&self) -> RationalPoly {
        if self.coeffs.len() <= 1 {
            return RationalPoly::zero();
        }
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c * &Rational::from_i64(i as i64))
            .collect();
        RationalPoly::new(coeffs)
    }

    pub fn make_monic(&self) -> EngineResult<RationalPoly> {
        let lc = self.leading_coeff().ok_or(EngineError::DivisionByZero)?;
        if lc.is_one() {
            return Ok(self.clone());
        }
        Ok(self.scale(&lc.inv()?))
    }

    /// Monic gcd by the Euclidean algorithm.
    pub fn gcd(&self, other: &RationalPoly) -> RationalPoly {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let (_, r) = a.divmod(&b).expect("divisor is nonzero");
            a = b;
            b = r;
        }
        if a.is_zero() {
            a
        } else {
            a.make_monic().expect("gcd of nonzero inputs is nonzero")
        }
    }

    /// Primitive integer coefficients of this polynomial and the
    /// denominator-clearing multiplier that produced them.
    pub fn clear_denominators(&self) -> (Vec<BigInt>, BigInt) {
        if self.is_zero() {
            return (Vec::new(), BigInt::one());
        }
        let lcm = denominator_lcm(&self.coeffs);
        let scaled: Vec<BigInt> = self
            .coeffs
            .iter()
            .map(|c| c.numer() * (&lcm / c.denom()))
            .collect();
        let content = GCD::find_gcd(&scaled);
        let coeffs = scaled.iter().map(|c| c / &content).collect();
        (coeffs, lcm)
    }
}

/// Resultant of f and g by the Euclidean remainder chain.
pub fn resultant(f: &RationalPoly, g: &RationalPoly) -> Rational {
    if f.is_zero() || g.is_zero() {
        return Rational::zero();
    }

    let mut a = f.clone();
    let mut b = g.clone();
    let mut res = Rational::one();

    loop {
        let da = a.degree().unwrap();
        let db = b.degree().unwrap();

        if db == 0 {
            let c = b.leading_coeff().unwrap();
            return &res * &c.pow(da as i64).expect("nonzero constant");
        }

        if da < db {
            if da * db % 2 == 1 {
                res = -&res;
            }
            std::mem::swap(&mut a, &mut b);
            continue;
        }

        let (_, r) = a.divmod(&b).expect("divisor is nonzero");
        if r.is_zero() {
            // Common factor of positive degree.
            return Rational::zero();
        }

        let dr = r.degree().unwrap();
        if da * db % 2 == 1 {
            res = -&res;
        }
        let lc = b.leading_coeff().unwrap();
        res = &res * &lc.pow((da - dr) as i64).expect("leading coefficient is nonzero");

        a = b;
        b = r;
    }
}

/// disc(f) = (−1)^{n(n−1)/2} · res(f, f′) / lc(f) for deg f = n ≥ 1.
pub fn discriminant(f: &RationalPoly) -> EngineResult<Rational> {
    let n = f
        .degree()
        .filter(|&n| n >= 1)
        .ok_or_else(|| EngineError::InvalidPolynomial("discriminant needs degree >= 1".into()))?;

    if n == 1 {
        return Ok(Rational::one());
    }

    let res = resultant(f, &f.derivative());
    let lc = f.leading_coeff().unwrap();
    let mut disc = res.checked_div(lc)?;
    if (n * (n - 1) / 2) % 2 == 1 {
        disc = -&disc;
    }
    Ok(disc)
}

impl Display for RationalPoly {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (i, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            let negative = c.is_negative();
            let magnitude = c.abs();
            if first {
                if negative {
                    write!(f, "-")?;
                }
                first = false;
            } else if negative {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            if i == 0 || !magnitude.is_one() {
                write!(f, "{}", magnitude)?;
            }
            match i {
                0 => {}
                1 => write!(f, "x")?,
                _ => write!(f, "x^{}", i)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_zeros_trimmed() {
        let p = RationalPoly::from_integers(&[1, 2, 0, 0]);
        assert_eq!(p.degree(), Some(1));
    }

    #[test]
    fn test_divmod() {
        // x^3 - 2x + 5 = (x + 1)(x^2 - x - 1) + 6
        let f = RationalPoly::from_integers(&[5, -2, 0, 1]);
        let g = RationalPoly::from_integers(&[1, 1]);
        let (q, r) = f.divmod(&g).unwrap();
        assert_eq!(f, g.mul(&q).add(&r));
        assert_eq!(r.degree(), Some(0));
    }

    #[test]
    fn test_divmod_by_zero() {
        let f = RationalPoly::from_integers(&[1, 1]);
        assert_eq!(f.divmod(&RationalPoly::zero()), Err(EngineError::DivisionByZero));
    }

    #[test]
    fn test_gcd() {
        // gcd((x-1)(x-2), (x-1)(x-3)) = x - 1
        let a = RationalPoly::from_integers(&[2, -3, 1]);
        let b = RationalPoly::from_integers(&[3, -4, 1]);
        assert_eq!(a.gcd(&b), RationalPoly::from_integers(&[-1, 1]));
    }

    #[test]
    fn test_resultant_shares_root() {
        // Both divisible by x - 2
        let a = RationalPoly::from_integers(&[-2, 1]);
        let b = RationalPoly::from_integers(&[-4, 0, 1]);
        assert!(resultant(&a, &b).is_zero());
    }

    #[test]
    fn test_discriminant_quadratics() {
        // x² - 2 → 8, x² - x - 1 → 5, x² + 1 → -4
        assert_eq!(discriminant(&RationalPoly::from_integers(&[-2, 0, 1])).unwrap(), Rational::from_i64(8));
        assert_eq!(discriminant(&RationalPoly::from_integers(&[-1, -1, 1])).unwrap(), Rational::from_i64(5));
        assert_eq!(discriminant(&RationalPoly::from_integers(&[1, 0, 1])).unwrap(), Rational::from_i64(-4));
    }

    #[test]
    fn test_discriminant_cubic() {
        // disc(x³ - x - 1) = -23
        let f = RationalPoly::from_integers(&[-1, -1, 0, 1]);
        assert_eq!(discriminant(&f).unwrap(), Rational::from_i64(-23));
    }

    #[test]
    fn test_discriminant_degenerate() {
        // (x - 1)² has a repeated root
        let f = RationalPoly::from_integers(&[1, -2, 1]);
        assert!(discriminant(&f).unwrap().is_zero());
    }

    #[test]
    fn test_clear_denominators() {
        let f = RationalPoly::new(vec![
            Rational::from_i64_pair(1, 2),
            Rational::from_i64_pair(1, 3),
            Rational::from_i64(1),
        ]);
        let (coeffs, multiplier) = f.clear_denominators();
        assert_eq!(multiplier, BigInt::from(6));
        assert_eq!(coeffs, vec![BigInt::from(3), BigInt::from(2), BigInt::from(6)]);
    }

    #[test]
    fn test_display() {
        let f = RationalPoly::from_integers(&[-1, -1, 0, 1]);
        assert_eq!(f.to_string(), "x^3 - x - 1");
    }

    #[test]
    fn test_evaluate() {
        let f = RationalPoly::from_integers(&[-2, 0, 1]);
        assert_eq!(f.evaluate(&Rational::from_i64(3)), Rational::from_i64(7));
    }
}
