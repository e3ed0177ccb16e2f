// src/order/mod.rs

pub mod integral_basis;
pub mod local_data;
pub mod prime_splitter;

pub use integral_basis::{IntegralBasis, ROUND2_MAX_PASSES};
pub use local_data::{LocalFieldData, Place};
pub use prime_splitter::{factor_prime_in_field, PrimeFactorEntry, PrimeSplitting, SplittingKind};
