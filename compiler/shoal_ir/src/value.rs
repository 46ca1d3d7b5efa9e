//! Runtime scalar values and literal payloads.
//!
//! All integer types evaluate over `i64`; `float64` evaluates over `f64`.
//! Arrays and lists are not values — they live in the evaluator's stores and
//! only their rendered textual form ever appears as a `Value`.

use std::fmt;
use std::sync::Arc;

use crate::types::TypeSymbol;

/// A scalar runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
}

impl Value {
    /// Convenience constructor for string values.
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// The dynamic type of this value, for internal-error messages.
    pub fn type_symbol(&self) -> TypeSymbol {
        match self {
            Value::Null => TypeSymbol::Null,
            Value::Bool(_) => TypeSymbol::Bool,
            Value::Int(_) => TypeSymbol::Int,
            Value::Float(_) => TypeSymbol::Float64,
            Value::Str(_) => TypeSymbol::String,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.into())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}
