// src/polynomial/mod.rs

pub mod factor_finite;
pub mod finite_field;
pub mod polynomial;

pub use factor_finite::{factor_over_fp, is_irreducible_over_fp};
pub use finite_field::GfPoly;
pub use polynomial::RationalPoly;
