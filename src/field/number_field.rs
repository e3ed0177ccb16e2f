// src/field/number_field.rs

use num::complex::Complex;
use std::cell::OnceCell;
use std::fmt::{Display, Formatter};

use crate::error::{EngineError, EngineResult};
use crate::field::element::FieldElement;
use crate::field::embeddings;
use crate::matrix::RationalMatrix;
use crate::polynomial::polynomial::resultant;
use crate::polynomial::RationalPoly;
use crate::rational::Rational;

/// The number field K = Q(α) for a root α of a monic minimal polynomial
/// of degree n. The field owns all element arithmetic; elements are bare
/// coordinate vectors in the power basis 1, α, …, α^(n−1).
///
/// Numeric roots and the signature are computed on first use and memoized;
/// the caches never invalidate because the polynomial is fixed at
/// construction.
#[derive(Debug)]
pub struct NumberField {
    min_poly: RationalPoly,
    degree: usize,
    generator_name: String,
    roots: OnceCell<Vec<Complex<f64>>>,
    signature: OnceCell<(usize, usize)>,
}

impl NumberField {
    /// Builds the field from a minimal polynomial, normalizing it to
    /// monic form. Degree must be at least 1.
    pub fn new(min_poly: RationalPoly) -> EngineResult<Self> {
        Self::with_generator_name(min_poly, "θ")
    }

    pub fn with_generator_name(min_poly: RationalPoly, generator_name: &str) -> EngineResult<Self> {
        let degree = min_poly
            .degree()
            .filter(|&d| d >= 1)
            .ok_or_else(|| EngineError::InvalidPolynomial("minimal polynomial must have degree >= 1".into()))?;
        let min_poly = min_poly.make_monic()?;

        Ok(NumberField {
            min_poly,
            degree,
            generator_name: generator_name.to_string(),
            roots: OnceCell::new(),
            signature: OnceCell::new(),
        })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn min_poly(&self) -> &RationalPoly {
        &self.min_poly
    }

    pub fn generator_name(&self) -> &str {
        &self.generator_name
    }

    // ---- element construction ----

    pub fn zero(&self) -> FieldElement {
        FieldElement::new(vec![Rational::zero(); self.degree])
    }

    pub fn one(&self) -> FieldElement {
        self.from_rational(Rational::one())
    }

    pub fn generator(&self) -> FieldElement {
        if self.degree == 1 {
            // α is rational: x + c = 0 means α = -c.
            return self.from_rational(-&self.min_poly.coeff(0));
        }
        let mut coeffs = vec![Rational::zero(); self.degree];
        coeffs[1] = Rational::one();
        FieldElement::new(coeffs)
    }

    pub fn from_rational(&self, value: Rational) -> FieldElement {
        let mut coeffs = vec![Rational::zero(); self.degree];
        coeffs[0] = value;
        FieldElement::new(coeffs)
    }

    /// Builds an element from raw power-basis coordinates. Longer inputs
    /// are reduced modulo the minimal polynomial.
    pub fn from_coeffs(&self, coeffs: Vec<Rational>) -> FieldElement {
        self.reduce(&RationalPoly::new(coeffs))
    }

    pub fn from_integers(&self, coeffs: &[i64]) -> FieldElement {
        self.from_coeffs(coeffs.iter().map(|&c| Rational::from_i64(c)).collect())
    }

    // ---- arithmetic ----

    pub fn add(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        let coeffs = (0..self.degree).map(|i| &a.coeff(i) + &b.coeff(i)).collect();
        FieldElement::new(coeffs)
    }

    pub fn sub(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        let coeffs = (0..self.degree).map(|i| &a.coeff(i) - &b.coeff(i)).collect();
        FieldElement::new(coeffs)
    }

    pub fn neg(&self, a: &FieldElement) -> FieldElement {
        FieldElement::new((0..self.degree).map(|i| -&a.coeff(i)).collect())
    }

    pub fn scale(&self, a: &FieldElement, factor: &Rational) -> FieldElement {
        FieldElement::new((0..self.degree).map(|i| &a.coeff(i) * factor).collect())
    }

    /// Product in K: plain polynomial multiplication followed by
    /// power-basis reduction modulo the minimal polynomial.
    pub fn mul(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        self.reduce(&a.to_poly().mul(&b.to_poly()))
    }

    /// Inverse by the extended Euclidean algorithm on (element, minimal
    /// polynomial); the gcd is a nonzero constant because the minimal
    /// polynomial is irreducible.
    pub fn inv(&self, a: &FieldElement) -> EngineResult<FieldElement> {
        let g = a.to_poly();
        if g.is_zero() {
            return Err(EngineError::DivisionByZero);
        }

        let mut old_r = g;
        let mut r = self.min_poly.clone();
        let mut old_s = RationalPoly::one();
        let mut s = RationalPoly::zero();

        while !r.is_zero() {
            let (q, rem) = old_r.divmod(&r)?;
            let next_s = old_s.sub(&q.mul(&s));
            old_r = r;
            r = rem;
            old_s = s;
            s = next_s;
        }

        if old_r.degree() != Some(0) {
            // Shared factor of positive degree: the minimal polynomial was
            // not irreducible after all.
            return Err(EngineError::InvalidPolynomial(
                "element is a zero divisor modulo the minimal polynomial".into(),
            ));
        }

        let scale = old_r.leading_coeff().unwrap().inv()?;
        Ok(self.reduce(&old_s.scale(&scale)))
    }

    pub fn div(&self, a: &FieldElement, b: &FieldElement) -> EngineResult<FieldElement> {
        Ok(self.mul(a, &self.inv(b)?))
    }

    pub fn pow(&self, a: &FieldElement, exponent: i64) -> EngineResult<FieldElement> {
        let base = if exponent < 0 { self.inv(a)? } else { a.clone() };
        let mut result = self.one();
        let mut acc = base;
        let mut e = exponent.unsigned_abs();
        while e > 0 {
            if e & 1 == 1 {
                result = self.mul(&result, &acc);
            }
            e >>= 1;
            if e > 0 {
                acc = self.mul(&acc, &acc);
            }
        }
        Ok(result)
    }

    /// Reduces an arbitrary polynomial in α into power-basis coordinates
    /// by substituting the top coefficient through the minimal polynomial.
    fn reduce(&self, poly: &RationalPoly) -> FieldElement {
        let n = self.degree;
        let mut coeffs: Vec<Rational> = poly.coeffs().to_vec();

        while coeffs.len() > n {
            let top = coeffs.pop().unwrap();
            if top.is_zero() {
                continue;
            }
            let shift = coeffs.len() - n;
            for i in 0..n {
                let sub = &top * &self.min_poly.coeff(i);
                coeffs[shift + i] = &coeffs[shift + i] - &sub;
            }
        }

        coeffs.resize(n, Rational::zero());
        FieldElement::new(coeffs)
    }

    // ---- invariants of an element ----

    /// N(a) = ∏ g(α_i) over the roots of the minimal polynomial, computed
    /// exactly as a resultant. A rational element degenerates to c^n.
    pub fn norm(&self, a: &FieldElement) -> Rational {
        if a.is_rational() {
            return a
                .coeff(0)
                .pow(self.degree as i64)
                .expect("nonnegative exponent");
        }
        resultant(&self.min_poly, &a.to_poly())
    }

    /// Multiplication-by-a matrix: column j holds the coordinates of
    /// a · α^j.
    pub fn mul_matrix(&self, a: &FieldElement) -> RationalMatrix {
        let n = self.degree;
        let mut matrix = RationalMatrix::zero(n);
        let mut column = a.clone();

        for j in 0..n {
            for i in 0..n {
                matrix.set_entry(i, j, column.coeff(i));
            }
            if j + 1 < n {
                column = self.shift_by_generator(&column);
            }
        }
        matrix
    }

    /// Multiplies by α: shift coordinates up one and fold the overflow
    /// back through the minimal polynomial.
    fn shift_by_generator(&self, a: &FieldElement) -> FieldElement {
        let n = self.degree;
        let top = a.coeff(n - 1);
        let mut coeffs = Vec::with_capacity(n);
        for i in 0..n {
            let carried = if i == 0 { Rational::zero() } else { a.coeff(i - 1) };
            let sub = &top * &self.min_poly.coeff(i);
            coeffs.push(&carried - &sub);
        }
        FieldElement::new(coeffs)
    }

    pub fn trace(&self, a: &FieldElement) -> Rational {
        self.mul_matrix(a).trace()
    }

    /// Characteristic polynomial of the element via the Faddeev–LeVerrier
    /// recurrence on its multiplication matrix: n matrix products yield
    /// all n + 1 coefficients.
    pub fn char_poly(&self, a: &FieldElement) -> RationalPoly {
        let n = self.degree;
        let m = self.mul_matrix(a);

        let mut coeffs = vec![Rational::zero(); n + 1];
        coeffs[n] = Rational::one();

        let mut aux = RationalMatrix::identity(n);
        for k in 1..=n {
            let product = m.multiply(&aux);
            let c = &(-&product.trace())
                * &Rational::from_i64(k as i64).inv().expect("k >= 1");
            coeffs[n - k] = c.clone();
            aux = product.add(&RationalMatrix::identity(n).scale(&c));
        }

        RationalPoly::new(coeffs)
    }

    /// An element is integral over Z exactly when its characteristic
    /// polynomial has integer coefficients.
    pub fn is_integral(&self, a: &FieldElement) -> bool {
        self.char_poly(a).coeffs().iter().all(|c| c.is_integer())
    }

    // ---- embeddings ----

    pub fn numeric_roots(&self) -> &[Complex<f64>] {
        self.roots
            .get_or_init(|| embeddings::numeric_roots(&self.min_poly))
    }

    /// (r, s): real embeddings and conjugate pairs, r + 2s = n.
    pub fn signature(&self) -> (usize, usize) {
        *self
            .signature
            .get_or_init(|| embeddings::signature(self.numeric_roots()))
    }
}

impl PartialEq for NumberField {
    fn eq(&self, other: &Self) -> bool {
        self.min_poly == other.min_poly
    }
}

impl Display for NumberField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Q({}) with {} = root of {}", self.generator_name, self.generator_name, self.min_poly)
    }
}
