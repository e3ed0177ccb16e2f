// src/error.rs

use num::BigInt;
use thiserror::Error;

/// Error kinds raised by the engine.
///
/// Only invalid-input arithmetic is fatal. Algorithmic incompleteness
/// (an exhausted factoring budget, an unproven irreducibility claim)
/// is reported through data flags on the result types instead, so
/// callers can surface those as warnings rather than crashes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid polynomial: {0}")]
    InvalidPolynomial(String),

    #[error("leading coefficient vanishes modulo {prime}")]
    NotMonicReducible { prime: BigInt },

    #[error("minimal polynomial is not squarefree")]
    DegenerateField,
}

pub type EngineResult<T> = Result<T, EngineError>;
