// src/field/element.rs

use serde::{Deserialize, Serialize};

use crate::polynomial::RationalPoly;
use crate::rational::Rational;

/// An element of a number field, stored as the coordinate vector of
/// 1, α, …, α^(n−1). Immutable; every operation on the owning
/// `NumberField` produces a fresh element. Elements are meaningful only
/// relative to the field whose degree they were built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldElement {
    coeffs: Vec<Rational>,
}

impl FieldElement {
    pub(crate) fn new(coeffs: Vec<Rational>) -> Self {
        FieldElement { coeffs }
    }

    pub fn coeff(&self, i: usize) -> Rational {
        self.coeffs.get(i).cloned().unwrap_or_else(Rational::zero)
    }

    pub fn coeffs(&self) -> &[Rational] {
        &self.coeffs
    }

    pub fn dimension(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_zero())
    }

    /// True when the element lies in Q, i.e. all higher coordinates vanish.
    pub fn is_rational(&self) -> bool {
        self.coeffs.iter().skip(1).all(|c| c.is_zero())
    }

    pub fn to_poly(&self) -> RationalPoly {
        RationalPoly::new(self.coeffs.clone())
    }

    /// Renders the element in terms of the generator, e.g. "1/2 + 3θ^2".
    pub fn format_with(&self, generator: &str) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let mut parts = Vec::new();
        for (i, c) in self.coeffs.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            let coeff = if i > 0 && c.abs().is_one() {
                if c.is_negative() { "-".to_string() } else { String::new() }
            } else {
                c.to_string()
            };
            let term = match i {
                0 => coeff,
                1 => format!("{}{}", coeff, generator),
                _ => format!("{}{}^{}", coeff, generator, i),
            };
            parts.push(term);
        }
        parts.join(" + ").replace("+ -", "- ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with() {
        let e = FieldElement::new(vec![
            Rational::from_i64_pair(1, 2),
            Rational::from_i64(-1),
            Rational::from_i64(3),
        ]);
        assert_eq!(e.format_with("θ"), "1/2 - θ + 3θ^2");
    }

    #[test]
    fn test_is_rational() {
        let e = FieldElement::new(vec![Rational::from_i64(7), Rational::zero()]);
        assert!(e.is_rational());
        let g = FieldElement::new(vec![Rational::zero(), Rational::one()]);
        assert!(!g.is_rational());
    }
}
