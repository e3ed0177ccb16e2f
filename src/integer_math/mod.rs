// src/integer_math/mod.rs

pub mod factorization;
pub mod gcd;
pub mod irreducibility;
pub mod pollard_rho;
pub mod primality;
pub mod prime_sieve;

pub use factorization::{divisors, factor_integer, factor_integer_with_limits, Factorization};
pub use irreducibility::{is_irreducible_over_q, IrreducibilityResult};
