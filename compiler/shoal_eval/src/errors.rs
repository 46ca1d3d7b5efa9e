//! Evaluation errors and their constructors.
//!
//! Two disjoint classes share the enum but never the meaning:
//!
//! - Runtime errors (`DivisionByZero`, `IndexOutOfRange`, …) can be hit by a
//!   correct program on bad data. They are ordinary results for the caller.
//! - [`EvalError::Internal`] marks a binder/lowerer defect: an unlowered
//!   statement, an unbound operator/type combination, a symbol with no
//!   storage. Evaluation aborts immediately and the message carries the
//!   `internal error:` prefix so logs can't confuse it with a user error.
//!
//! All user/source errors (unknown names, type mismatches, wrong arity) are
//! binder-time diagnostics and never appear here.

use shoal_ir::TypeSymbol;
use thiserror::Error;

/// Result alias for evaluation paths.
pub type EvalResult<T = shoal_ir::Value> = Result<T, EvalError>;

/// Anything that stops an evaluation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("index {index} is out of range for {target} with {len} elements")]
    IndexOutOfRange {
        target: String,
        index: i64,
        len: usize,
    },

    #[error("cannot convert '{value}' to {target}")]
    InvalidConversion { value: String, target: TypeSymbol },

    #[error("length is not defined for a value of type {ty}")]
    UnsupportedLength { ty: TypeSymbol },

    #[error("call depth exceeded the limit of {limit}")]
    CallDepthExceeded { limit: usize },

    #[error("input failed: {0}")]
    Input(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl EvalError {
    /// Whether this is an internal-consistency failure rather than a
    /// runtime error a user program can cause on its own.
    pub fn is_internal(&self) -> bool {
        matches!(self, EvalError::Internal(_))
    }
}

pub(crate) fn division_by_zero() -> EvalError {
    EvalError::DivisionByZero
}

pub(crate) fn index_out_of_range(target: impl Into<String>, index: i64, len: usize) -> EvalError {
    EvalError::IndexOutOfRange {
        target: target.into(),
        index,
        len,
    }
}

pub(crate) fn invalid_conversion(value: &shoal_ir::Value, target: TypeSymbol) -> EvalError {
    EvalError::InvalidConversion {
        value: value.to_string(),
        target,
    }
}

pub(crate) fn unsupported_length(ty: TypeSymbol) -> EvalError {
    EvalError::UnsupportedLength { ty }
}

pub(crate) fn call_depth_exceeded(limit: usize) -> EvalError {
    EvalError::CallDepthExceeded { limit }
}

pub(crate) fn input_failed(error: &std::io::Error) -> EvalError {
    EvalError::Input(error.to_string())
}

pub(crate) fn internal(message: impl Into<String>) -> EvalError {
    EvalError::Internal(message.into())
}
