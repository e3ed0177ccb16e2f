// src/order/local_data.rs

use log::warn;
use num::BigInt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use crate::error::EngineResult;
use crate::field::NumberField;
use crate::order::integral_basis::IntegralBasis;
use crate::order::prime_splitter::{factor_prime_in_field, PrimeSplitting};

/// One place of the field: a real or complex embedding, or a prime ideal
/// above a rational prime. Archimedean places are always unbounded; a
/// non-archimedean place is unbounded exactly when its prime was inverted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Place {
    Archimedean {
        index: usize,
        is_real: bool,
        root: (f64, f64),
    },
    NonArchimedean {
        prime: BigInt,
        ramification: u32,
        residue_degree: usize,
        local_degree: usize,
        unbounded: bool,
    },
}

impl Place {
    pub fn is_unbounded(&self) -> bool {
        match self {
            Place::Archimedean { .. } => true,
            Place::NonArchimedean { unbounded, .. } => *unbounded,
        }
    }

    pub fn is_archimedean(&self) -> bool {
        matches!(self, Place::Archimedean { .. })
    }

    /// The completion at this place: ℝ, ℂ, or an extension of Q_p.
    pub fn completion_label(&self) -> String {
        match self {
            Place::Archimedean { is_real: true, .. } => "ℝ".to_string(),
            Place::Archimedean { is_real: false, .. } => "ℂ".to_string(),
            Place::NonArchimedean { prime, local_degree, .. } => {
                if *local_degree == 1 {
                    format!("Q_{}", prime)
                } else {
                    format!("Q_{}^({})", prime, local_degree)
                }
            }
        }
    }
}

impl Display for Place {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Place::Archimedean { index, is_real, root } => {
                let kind = if *is_real { "real" } else { "complex" };
                write!(f, "archimedean place #{} ({}, root ≈ {:.6}{:+.6}i)", index, kind, root.0, root.1)
            }
            Place::NonArchimedean { prime, ramification, residue_degree, unbounded, .. } => {
                let status = if *unbounded { "unbounded" } else { "bounded" };
                write!(f, "place above {} (e = {}, f = {}, {})", prime, ramification, residue_degree, status)
            }
        }
    }
}

/// The place inventory of a field for a chosen finite set S of inverted
/// primes: all archimedean places plus one non-archimedean place per
/// prime ideal above each p ∈ S, all marked unbounded. Places at primes
/// outside S are described only in aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalFieldData {
    degree: usize,
    inverted_primes: Vec<BigInt>,
    places: Vec<Place>,
    splittings: Vec<PrimeSplitting>,
}

impl LocalFieldData {
    pub fn compute(
        field: &NumberField,
        basis: &IntegralBasis,
        inverted_primes: &[BigInt],
    ) -> EngineResult<LocalFieldData> {
        let mut places = Vec::new();

        // Archimedean places from the signature: one per real root, one
        // per conjugate pair (represented by the root with Im > 0).
        let mut index = 0;
        for root in field.numeric_roots() {
            if root.im == 0.0 {
                places.push(Place::Archimedean { index, is_real: true, root: (root.re, 0.0) });
                index += 1;
            } else if root.im > 0.0 {
                places.push(Place::Archimedean { index, is_real: false, root: (root.re, root.im) });
                index += 1;
            }
        }

        let primes: BTreeSet<BigInt> = inverted_primes.iter().cloned().collect();
        let mut splittings = Vec::new();

        for p in &primes {
            if basis.prime_divides_index(p) {
                warn!("{} divides the index [O_K : Z[α]]; its splitting data may be wrong", p);
            }
            let splitting = factor_prime_in_field(p, field.min_poly())?;
            for entry in &splitting.entries {
                places.push(Place::NonArchimedean {
                    prime: p.clone(),
                    ramification: entry.ramification,
                    residue_degree: entry.residue_degree,
                    local_degree: entry.local_degree(),
                    unbounded: true,
                });
            }
            splittings.push(splitting);
        }

        Ok(LocalFieldData {
            degree: field.degree(),
            inverted_primes: primes.into_iter().collect(),
            places,
            splittings,
        })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn inverted_primes(&self) -> &[BigInt] {
        &self.inverted_primes
    }

    pub fn splittings(&self) -> &[PrimeSplitting] {
        &self.splittings
    }

    pub fn archimedean_places(&self) -> impl Iterator<Item = &Place> {
        self.places.iter().filter(|p| p.is_archimedean())
    }

    pub fn unbounded_count(&self) -> usize {
        self.places.iter().filter(|p| p.is_unbounded()).count()
    }

    /// The product of completions at the unbounded places, e.g. "ℝ × ℝ"
    /// or "ℝ × ℂ × Q_2".
    pub fn completion_product(&self) -> String {
        let labels: Vec<String> = self
            .places
            .iter()
            .filter(|p| p.is_unbounded())
            .map(|p| p.completion_label())
            .collect();
        labels.join(" × ")
    }

    /// Textual description of the complementary bounded places.
    pub fn bounded_description(&self) -> String {
        if self.inverted_primes.is_empty() {
            "all non-archimedean places".to_string()
        } else {
            let primes: Vec<String> = self.inverted_primes.iter().map(|p| p.to_string()).collect();
            format!("all non-archimedean places at primes outside {{{}}}", primes.join(", "))
        }
    }
}
