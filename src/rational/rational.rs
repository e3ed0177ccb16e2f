// src/rational/rational.rs

use num::bigint::BigInt;
use num::rational::BigRational;
use num::{One, Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{EngineError, EngineResult};
use crate::integer_math::gcd::GCD;

/// An exact reduced fraction over arbitrary-precision integers.
///
/// The backing `BigRational` keeps the invariants: the denominator is
/// always positive and gcd(|numerator|, denominator) = 1. Every arithmetic
/// operation produces a new value; nothing is mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rational(BigRational);

impl Rational {
    pub fn new(numerator: BigInt, denominator: BigInt) -> EngineResult<Self> {
        if denominator.is_zero() {
            return Err(EngineError::DivisionByZero);
        }
        Ok(Rational(BigRational::new(numerator, denominator)))
    }

    pub fn from_integer(value: BigInt) -> Self {
        Rational(BigRational::from_integer(value))
    }

    pub fn from_i64(value: i64) -> Self {
        Self::from_integer(BigInt::from(value))
    }

    /// Shorthand for small literal fractions; panics on a zero denominator,
    /// so it is only for constants known at the call site.
    pub fn from_i64_pair(numerator: i64, denominator: i64) -> Self {
        assert!(denominator != 0, "literal fraction with zero denominator");
        Rational(BigRational::new(BigInt::from(numerator), BigInt::from(denominator)))
    }

    pub fn zero() -> Self {
        Rational(BigRational::zero())
    }

    pub fn one() -> Self {
        Rational(BigRational::one())
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub fn abs(&self) -> Self {
        Rational(self.0.abs())
    }

    pub fn checked_div(&self, other: &Rational) -> EngineResult<Rational> {
        if other.is_zero() {
            return Err(EngineError::DivisionByZero);
        }
        Ok(Rational(&self.0 / &other.0))
    }

    pub fn inv(&self) -> EngineResult<Rational> {
        if self.is_zero() {
            return Err(EngineError::DivisionByZero);
        }
        Ok(Rational(self.0.recip()))
    }

    /// Integer power, including negative exponents (which invert first).
    pub fn pow(&self, exponent: i64) -> EngineResult<Rational> {
        if exponent == 0 {
            return Ok(Rational::one());
        }
        let base = if exponent < 0 { self.inv()? } else { self.clone() };
        let mut result = BigRational::one();
        let mut acc = base.0;
        let mut e = exponent.unsigned_abs();
        while e > 0 {
            if e & 1 == 1 {
                result = &result * &acc;
            }
            e >>= 1;
            if e > 0 {
                acc = &acc * &acc;
            }
        }
        Ok(Rational(result))
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_else(|| {
            // Fall back on separate conversions when the ratio overflows.
            let n = self.0.numer().to_f64().unwrap_or(f64::INFINITY);
            let d = self.0.denom().to_f64().unwrap_or(f64::INFINITY);
            n / d
        })
    }

}

/// Lcm of the denominators of a coordinate vector, used to clear
/// denominators before integer-only algorithms.
pub fn denominator_lcm(values: &[Rational]) -> BigInt {
    let denominators: Vec<BigInt> = values.iter().map(|v| v.denom().clone()).collect();
    GCD::find_lcm(&denominators)
}

impl Add for &Rational {
    type Output = Rational;
    fn add(self, rhs: &Rational) -> Rational {
        Rational(&self.0 + &rhs.0)
    }
}

impl Sub for &Rational {
    type Output = Rational;
    fn sub(self, rhs: &Rational) -> Rational {
        Rational(&self.0 - &rhs.0)
    }
}

impl Mul for &Rational {
    type Output = Rational;
    fn mul(self, rhs: &Rational) -> Rational {
        Rational(&self.0 * &rhs.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;
    fn neg(self) -> Rational {
        Rational(-&self.0)
    }
}

impl Add for Rational {
    type Output = Rational;
    fn add(self, rhs: Rational) -> Rational {
        &self + &rhs
    }
}

impl Sub for Rational {
    type Output = Rational;
    fn sub(self, rhs: Rational) -> Rational {
        &self - &rhs
    }
}

impl Mul for Rational {
    type Output = Rational;
    fn mul(self, rhs: Rational) -> Rational {
        &self * &rhs
    }
}

impl Neg for Rational {
    type Output = Rational;
    fn neg(self) -> Rational {
        -&self
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0.is_integer() {
            write!(f, "{}", self.0.numer())
        } else {
            write!(f, "{}/{}", self.0.numer(), self.0.denom())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_reduces() {
        let a = Rational::new(BigInt::from(6), BigInt::from(-4)).unwrap();
        assert_eq!(a.numer(), &BigInt::from(-3));
        assert_eq!(a.denom(), &BigInt::from(2));
    }

    #[test]
    fn test_scaling_invariance() {
        // simplify(n, d) == simplify(k·n, k·d) for nonzero k
        let a = Rational::new(BigInt::from(3), BigInt::from(7)).unwrap();
        let b = Rational::new(BigInt::from(3 * -5), BigInt::from(7 * -5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_denominator_rejected() {
        let err = Rational::new(BigInt::from(1), BigInt::zero());
        assert_eq!(err, Err(EngineError::DivisionByZero));
    }

    #[test]
    fn test_division_by_zero() {
        let a = Rational::from_i64(5);
        assert_eq!(a.checked_div(&Rational::zero()), Err(EngineError::DivisionByZero));
        assert_eq!(Rational::zero().inv(), Err(EngineError::DivisionByZero));
    }

    #[test]
    fn test_negative_pow() {
        let a = Rational::from_i64_pair(2, 3);
        let b = a.pow(-2).unwrap();
        assert_eq!(b, Rational::from_i64_pair(9, 4));
        assert_eq!(a.pow(0).unwrap(), Rational::one());
    }

    #[test]
    fn test_is_integer() {
        assert!(Rational::from_i64_pair(8, 4).is_integer());
        assert!(!Rational::from_i64_pair(1, 2).is_integer());
    }

    #[test]
    fn test_denominator_lcm() {
        let values = vec![
            Rational::from_i64_pair(1, 2),
            Rational::from_i64_pair(1, 3),
            Rational::from_i64_pair(5, 6),
        ];
        assert_eq!(denominator_lcm(&values), BigInt::from(6));
    }
}
