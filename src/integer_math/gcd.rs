// src/integer_math/gcd.rs

use num::BigInt;
use num::Integer;
use num::Signed;
use num::Zero;

pub struct GCD;

impl GCD {
    pub fn find_gcd_pair(left: &BigInt, right: &BigInt) -> BigInt {
        left.gcd(right)
    }

    pub fn find_gcd(numbers: &[BigInt]) -> BigInt {
        numbers.iter().fold(BigInt::zero(), |acc, x| acc.gcd(x))
    }

    pub fn find_lcm_pair(left: &BigInt, right: &BigInt) -> BigInt {
        if left.is_zero() || right.is_zero() {
            return BigInt::zero();
        }
        let a = left.abs();
        let b = right.abs();
        &a / a.gcd(&b) * &b
    }

    pub fn find_lcm(numbers: &[BigInt]) -> BigInt {
        numbers.iter().fold(BigInt::from(1), |acc, x| Self::find_lcm_pair(&acc, x))
    }

    pub fn are_coprime(left: &BigInt, right: &BigInt) -> bool {
        Self::find_gcd_pair(left, right) == BigInt::from(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lcm_of_denominators() {
        let values = [BigInt::from(4), BigInt::from(6), BigInt::from(10)];
        assert_eq!(GCD::find_lcm(&values), BigInt::from(60));
    }

    #[test]
    fn test_gcd_with_negatives() {
        assert_eq!(GCD::find_gcd_pair(&BigInt::from(-12), &BigInt::from(18)), BigInt::from(6));
    }

    #[test]
    fn test_coprime() {
        assert!(GCD::are_coprime(&BigInt::from(9), &BigInt::from(28)));
        assert!(!GCD::are_coprime(&BigInt::from(9), &BigInt::from(27)));
    }
}
