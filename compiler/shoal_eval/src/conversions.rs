//! Explicit conversion expressions.
//!
//! The language converts among `any`, `bool`, `float64`, the integer family,
//! and `string` by direct value conversion. A conversion the binder should
//! never have produced (target `void`, `null`, or the abstract `Number`) is
//! an internal error; a conversion that fails on the actual data — parsing
//! `"abc"` as an integer — is a runtime error.

use shoal_ir::{TypeSymbol, Value};

use crate::errors::{internal, invalid_conversion, EvalResult};

/// Convert `value` to the target type.
pub(crate) fn convert(value: Value, target: TypeSymbol) -> EvalResult {
    match target {
        TypeSymbol::Any => Ok(value),
        TypeSymbol::Bool => to_bool(value),
        TypeSymbol::Byte
        | TypeSymbol::Int8
        | TypeSymbol::Int16
        | TypeSymbol::Int32
        | TypeSymbol::Int
        | TypeSymbol::Int64 => to_int(value),
        TypeSymbol::Float64 => to_float(value),
        TypeSymbol::String => Ok(Value::string(value.to_string())),
        TypeSymbol::Null | TypeSymbol::Void | TypeSymbol::Number => Err(internal(format!(
            "no conversion to type {target}"
        ))),
    }
}

fn to_bool(value: Value) -> EvalResult {
    match value {
        Value::Bool(_) => Ok(value),
        Value::Int(i) => Ok(Value::Bool(i != 0)),
        Value::Float(x) => Ok(Value::Bool(x != 0.0)),
        Value::Str(ref s) => {
            let trimmed = s.trim();
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(invalid_conversion(&value, TypeSymbol::Bool))
            }
        }
        Value::Null => Err(invalid_conversion(&value, TypeSymbol::Bool)),
    }
}

fn to_int(value: Value) -> EvalResult {
    match value {
        Value::Int(_) => Ok(value),
        // Truncates toward zero; round/floor/ceil are the rounding API.
        #[allow(clippy::cast_possible_truncation)]
        Value::Float(x) => Ok(Value::Int(x as i64)),
        Value::Bool(b) => Ok(Value::Int(i64::from(b))),
        Value::Str(ref s) => match s.trim().parse::<i64>() {
            Ok(i) => Ok(Value::Int(i)),
            Err(_) => Err(invalid_conversion(&value, TypeSymbol::Int)),
        },
        Value::Null => Err(invalid_conversion(&value, TypeSymbol::Int)),
    }
}

fn to_float(value: Value) -> EvalResult {
    match value {
        Value::Float(_) => Ok(value),
        #[allow(clippy::cast_precision_loss)]
        Value::Int(i) => Ok(Value::Float(i as f64)),
        Value::Bool(b) => Ok(Value::Float(if b { 1.0 } else { 0.0 })),
        Value::Str(ref s) => match s.trim().parse::<f64>() {
            Ok(x) => Ok(Value::Float(x)),
            Err(_) => Err(invalid_conversion(&value, TypeSymbol::Float64)),
        },
        Value::Null => Err(invalid_conversion(&value, TypeSymbol::Float64)),
    }
}
