//! Static-type-directed extraction of runtime payloads.
//!
//! The binder guarantees what shape a value has at every use site, so a
//! mismatch here is never a user error — it means the binder or lowerer
//! produced an inconsistent tree, and the extraction fails with an internal
//! error naming both sides.

use shoal_ir::Value;

use crate::errors::{internal, EvalResult};

pub(crate) fn as_bool(value: Value) -> EvalResult<bool> {
    match value {
        Value::Bool(b) => Ok(b),
        other => Err(internal(format!(
            "expected a bool, found {} '{}'",
            other.type_symbol(),
            other
        ))),
    }
}

pub(crate) fn as_int(value: Value) -> EvalResult<i64> {
    match value {
        Value::Int(i) => Ok(i),
        other => Err(internal(format!(
            "expected an integer, found {} '{}'",
            other.type_symbol(),
            other
        ))),
    }
}

/// Accepts either numeric representation: a static `float64` operand may
/// still hold an `Int` payload (e.g. the literal `1` in `1.0 + 1`).
pub(crate) fn as_float(value: Value) -> EvalResult<f64> {
    match value {
        Value::Float(x) => Ok(x),
        #[allow(clippy::cast_precision_loss)]
        Value::Int(i) => Ok(i as f64),
        other => Err(internal(format!(
            "expected a number, found {} '{}'",
            other.type_symbol(),
            other
        ))),
    }
}

pub(crate) fn as_str(value: Value) -> EvalResult<std::sync::Arc<str>> {
    match value {
        Value::Str(s) => Ok(s),
        other => Err(internal(format!(
            "expected a string, found {} '{}'",
            other.type_symbol(),
            other
        ))),
    }
}
