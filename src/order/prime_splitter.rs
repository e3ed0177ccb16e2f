// src/order/prime_splitter.rs
//
// Kummer–Dedekind: the factorization of a rational prime p in O_K mirrors
// the factorization of the minimal polynomial mod p. Correct only when
// p does not divide the index [O_K : Z[α]]; that precondition is not
// enforced here — callers holding an IntegralBasis can consult
// `prime_divides_index` before trusting the result.

use log::{error, warn};
use num::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::error::{EngineError, EngineResult};
use crate::integer_math::primality::is_probable_prime;
use crate::polynomial::factor_finite::{deterministic_rng, factor_over_fp};
use crate::polynomial::finite_field::GfPoly;
use crate::polynomial::RationalPoly;

/// One prime ideal above p: its defining irreducible factor mod p, the
/// ramification index e and the residue degree f.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimeFactorEntry {
    pub factor: GfPoly,
    pub ramification: u32,
    pub residue_degree: usize,
}

impl PrimeFactorEntry {
    pub fn local_degree(&self) -> usize {
        self.ramification as usize * self.residue_degree
    }
}

/// The splitting of (p) in O_K. Invariant: Σ e·f over the entries equals
/// the field degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimeSplitting {
    pub prime: BigInt,
    pub entries: Vec<PrimeFactorEntry>,
}

/// Shape of a splitting relative to the field degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplittingKind {
    SplitCompletely,
    Inert,
    TotallyRamified,
    General,
}

impl Display for SplittingKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SplittingKind::SplitCompletely => "split completely",
            SplittingKind::Inert => "inert",
            SplittingKind::TotallyRamified => "totally ramified",
            SplittingKind::General => "general",
        };
        write!(f, "{}", label)
    }
}

impl PrimeSplitting {
    pub fn local_degree_sum(&self) -> usize {
        self.entries.iter().map(|e| e.local_degree()).sum()
    }

    pub fn splitting_kind(&self, degree: usize) -> SplittingKind {
        let count = self.entries.len();
        if count == degree
            && self
                .entries
                .iter()
                .all(|e| e.ramification == 1 && e.residue_degree == 1)
        {
            return SplittingKind::SplitCompletely;
        }
        if count == 1 {
            let entry = &self.entries[0];
            if entry.ramification == 1 && entry.residue_degree == degree {
                return SplittingKind::Inert;
            }
            if entry.ramification as usize == degree && entry.residue_degree == 1 {
                return SplittingKind::TotallyRamified;
            }
        }
        SplittingKind::General
    }
}

/// Factors (p) in the order Z[α] defined by the minimal polynomial:
/// clear denominators, reduce mod p, factor over F_p, and read off each
/// factor's multiplicity by repeated exact division.
pub fn factor_prime_in_field(p: &BigInt, min_poly: &RationalPoly) -> EngineResult<PrimeSplitting> {
    if !is_probable_prime(p) {
        warn!("{} is not prime; the splitting is meaningless", p);
    }

    let degree = min_poly
        .degree()
        .ok_or_else(|| EngineError::InvalidPolynomial("cannot split a prime in the zero polynomial".into()))?;

    let (int_coeffs, _) = min_poly.clear_denominators();
    let reduced = GfPoly::from_integer_coeffs(p, &int_coeffs);
    if reduced.degree() != Some(degree) {
        return Err(EngineError::NotMonicReducible { prime: p.clone() });
    }
    let reduced = reduced.make_monic();

    let mut rng = deterministic_rng();
    let factors = factor_over_fp(&reduced, &mut rng)?;

    let mut entries = Vec::with_capacity(factors.len());
    for (factor, _) in &factors {
        let residue_degree = factor.degree().expect("irreducible factors are nonconstant");

        // Multiplicity by repeated exact division of the monic reduction.
        let mut ramification = 0u32;
        let mut current = reduced.clone();
        loop {
            let (quotient, remainder) = current.divmod(factor)?;
            if !remainder.is_zero() {
                break;
            }
            ramification += 1;
            current = quotient;
        }

        entries.push(PrimeFactorEntry {
            factor: factor.clone(),
            ramification,
            residue_degree,
        });
    }

    let splitting = PrimeSplitting { prime: p.clone(), entries };
    if splitting.local_degree_sum() != degree {
        error!(
            "Σ e·f = {} does not match the degree {} at p = {}",
            splitting.local_degree_sum(),
            degree,
            p
        );
    }
    Ok(splitting)
}
