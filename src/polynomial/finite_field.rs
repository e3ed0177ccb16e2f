// src/polynomial/finite_field.rs

use num::{BigInt, Integer, One, Zero};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::error::{EngineError, EngineResult};
use crate::polynomial::polynomial::RationalPoly;

/// A polynomial over F_p, carrying its prime modulus. Coefficients are
/// ascending-degree, reduced into [0, p), trailing zeros trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GfPoly {
    modulus: BigInt,
    coeffs: Vec<BigInt>,
}

impl GfPoly {
    pub fn new(modulus: BigInt, coeffs: Vec<BigInt>) -> Self {
        let mut coeffs: Vec<BigInt> = coeffs.into_iter().map(|c| c.mod_floor(&modulus)).collect();
        while coeffs.last().map_or(false, |c| c.is_zero()) {
            coeffs.pop();
        }
        GfPoly { modulus, coeffs }
    }

    pub fn zero(modulus: BigInt) -> Self {
        GfPoly { modulus, coeffs: Vec::new() }
    }

    pub fn one(modulus: BigInt) -> Self {
        Self::new(modulus, vec![BigInt::one()])
    }

    /// The monomial x.
    pub fn x(modulus: BigInt) -> Self {
        Self::new(modulus, vec![BigInt::zero(), BigInt::one()])
    }

    pub fn from_integer_coeffs(modulus: &BigInt, coeffs: &[BigInt]) -> Self {
        Self::new(modulus.clone(), coeffs.to_vec())
    }

    /// Reduction of a rational polynomial mod p. Fails when a coefficient
    /// denominator is divisible by p.
    pub fn from_rational_poly(poly: &RationalPoly, modulus: &BigInt) -> EngineResult<Self> {
        let mut coeffs = Vec::with_capacity(poly.coeffs().len());
        for c in poly.coeffs() {
            let den = c.denom().mod_floor(modulus);
            if den.is_zero() {
                return Err(EngineError::NotMonicReducible { prime: modulus.clone() });
            }
            let den_inv = mod_inverse(&den, modulus);
            coeffs.push(c.numer().mod_floor(modulus) * den_inv);
        }
        Ok(Self::new(modulus.clone(), coeffs))
    }

    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    pub fn coeffs(&self) -> &[BigInt] {
        &self.coeffs
    }

    pub fn coeff(&self, i: usize) -> BigInt {
        self.coeffs.get(i).cloned().unwrap_or_else(BigInt::zero)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_one()
    }

    pub fn degree(&self) -> Option<usize> {
        if self.coeffs.is_empty() {
            None
        } else {
            Some(self.coeffs.len() - 1)
        }
    }

    pub fn leading_coeff(&self) -> Option<&BigInt> {
        self.coeffs.last()
    }

    pub fn is_monic(&self) -> bool {
        self.leading_coeff().map_or(false, |c| c.is_one())
    }

    pub fn add(&self, other: &GfPoly) -> GfPoly {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len).map(|i| self.coeff(i) + other.coeff(i)).collect();
        GfPoly::new(self.modulus.clone(), coeffs)
    }

    pub fn sub(&self, other: &GfPoly) -> GfPoly {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len).map(|i| self.coeff(i) - other.coeff(i)).collect();
        GfPoly::new(self.modulus.clone(), coeffs)
    }

    pub fn mul(&self, other: &GfPoly) -> GfPoly {
        if self.is_zero() || other.is_zero() {
            return GfPoly::zero(self.modulus.clone());
        }
        let mut coeffs = vec![BigInt::zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        GfPoly::new(self.modulus.clone(), coeffs)
    }

    pub fn scale(&self, factor: &BigInt) -> GfPoly {
        GfPoly::new(self.modulus.clone(), self.coeffs.iter().map(|c| c * factor).collect())
    }

    /// Euclidean division over F_p.
    pub fn divmod(&self, divisor: &GfPoly) -> EngineResult<(GfPoly, GfPoly)> {
        let d_deg = divisor.degree().ok_or(EngineError::DivisionByZero)?;
        let lc_inv = mod_inverse(divisor.leading_coeff().unwrap(), &self.modulus);

        let mut remainder: Vec<BigInt> = self.coeffs.clone();
        if remainder.len() <= d_deg {
            return Ok((GfPoly::zero(self.modulus.clone()), self.clone()));
        }

        let q_len = remainder.len() - d_deg;
        let mut quotient = vec![BigInt::zero(); q_len];

        for k in (0..q_len).rev() {
            let factor = (&remainder[k + d_deg] * &lc_inv).mod_floor(&self.modulus);
            if factor.is_zero() {
                continue;
            }
            for (i, dc) in divisor.coeffs.iter().enumerate() {
                remainder[k + i] = (&remainder[k + i] - &factor * dc).mod_floor(&self.modulus);
            }
            quotient[k] = factor;
        }

        Ok((
            GfPoly::new(self.modulus.clone(), quotient),
            GfPoly::new(self.modulus.clone(), remainder),
        ))
    }

    pub fn make_monic(&self) -> GfPoly {
        match self.leading_coeff() {
            None => self.clone(),
            Some(lc) if lc.is_one() => self.clone(),
            Some(lc) => self.scale(&mod_inverse(lc, &self.modulus)),
        }
    }

    /// Monic gcd over F_p.
    pub fn gcd(&self, other: &GfPoly) -> GfPoly {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let (_, r) = a.divmod(&b).expect("divisor is nonzero");
            a = b;
            b = r;
        }
        a.make_monic()
    }

    /// self^exponent mod reducer, by square and multiply.
    pub fn pow_mod(&self, exponent: &BigInt, reducer: &GfPoly) -> EngineResult<GfPoly> {
        let mut result = GfPoly::one(self.modulus.clone());
        let (_, mut base) = self.divmod(reducer)?;
        let mut e = exponent.clone();
        let two = BigInt::from(2);
        while e > BigInt::zero() {
            if (&e % &two).is_one() {
                let (_, r) = result.mul(&base).divmod(reducer)?;
                result = r;
            }
            e /= &two;
            if e > BigInt::zero() {
                let (_, r) = base.mul(&base).divmod(reducer)?;
                base = r;
            }
        }
        Ok(result)
    }

    pub fn evaluate(&self, x: &BigInt) -> BigInt {
        let mut acc = BigInt::zero();
        for c in self.coeffs.iter().rev() {
            acc = (acc * x + c).mod_floor(&self.modulus);
        }
        acc
    }

    pub fn derivative(&self) -> GfPoly {
        if self.coeffs.len() <= 1 {
            return GfPoly::zero(self.modulus.clone());
        }
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c * BigInt::from(i))
            .collect();
        GfPoly::new(self.modulus.clone(), coeffs)
    }
}

/// a⁻¹ mod p for prime p, via Fermat.
pub fn mod_inverse(a: &BigInt, p: &BigInt) -> BigInt {
    a.modpow(&(p - 2), p)
}

impl Display for GfPoly {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (i, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            if i == 0 || !c.is_one() {
                write!(f, "{}", c)?;
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
