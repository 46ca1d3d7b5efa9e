//! Binary operator evaluation.
//!
//! Dispatch is decided by the bound operator kind plus the *static* operand
//! types recorded at bind time; runtime value tags are only consulted to
//! extract payloads. Numeric operators run in `f64` when either static side
//! is `float64` and in `i64` otherwise. Integer arithmetic wraps, matching
//! the unchecked 64-bit arithmetic of the language's reference runtime.
//!
//! The short-circuiting `&&`/`||` never reach this module — the evaluator
//! decides whether to evaluate the right operand at all — so meeting one
//! here is an internal error. The eager `&`/`|`/`^` on bools do land here,
//! carrying `Bitwise*` kinds with a `bool` result type.

use shoal_ir::{BinaryOpKind, BoundBinaryOp, TypeSymbol, Value};

use crate::cast::{as_bool, as_float, as_int, as_str};
use crate::errors::{division_by_zero, index_out_of_range, internal, EvalResult};

/// Apply a binary operator to already-evaluated operands.
pub(crate) fn evaluate_binary(op: &BoundBinaryOp, left: Value, right: Value) -> EvalResult {
    use shoal_ir::BinaryOpKind as K;

    match op.kind {
        K::Addition => {
            if op.result_ty == TypeSymbol::String {
                let (a, b) = (as_str(left)?, as_str(right)?);
                Ok(Value::string(format!("{a}{b}")))
            } else {
                numeric(op, left, right, i64::wrapping_add, |a, b| a + b)
            }
        }
        K::Subtraction => numeric(op, left, right, i64::wrapping_sub, |a, b| a - b),
        K::Multiplication => numeric(op, left, right, i64::wrapping_mul, |a, b| a * b),
        K::Division => {
            if !op.result_ty.is_numeric() {
                index_string(left, right)
            } else if op.is_float_op() {
                Ok(Value::Float(as_float(left)? / as_float(right)?))
            } else {
                let (a, b) = (as_int(left)?, as_int(right)?);
                if b == 0 {
                    Err(division_by_zero())
                } else {
                    Ok(Value::Int(a.wrapping_div(b)))
                }
            }
        }
        K::Exponentiation => {
            let base = as_float(left)?;
            let exponent = as_float(right)?;
            let raised = base.powf(exponent);
            if op.is_float_op() {
                Ok(Value::Float(raised))
            } else {
                // Truncates when both sides are integral.
                #[allow(clippy::cast_possible_truncation)]
                let truncated = raised as i64;
                Ok(Value::Int(truncated))
            }
        }
        K::BitwiseAnd => bitwise(op, left, right, |a, b| a & b, |a, b| a & b),
        K::BitwiseOr => bitwise(op, left, right, |a, b| a | b, |a, b| a | b),
        K::BitwiseXor => bitwise(op, left, right, |a, b| a ^ b, |a, b| a ^ b),
        K::LogicalAnd | K::LogicalOr => Err(internal(
            "short-circuit operator reached eager evaluation",
        )),
        K::LeftShift => {
            let (a, b) = (as_int(left)?, as_int(right)?);
            Ok(Value::Int(a.wrapping_shl((b & 0x3F) as u32)))
        }
        K::RightShift => {
            let (a, b) = (as_int(left)?, as_int(right)?);
            Ok(Value::Int(a.wrapping_shr((b & 0x3F) as u32)))
        }
        K::Equals => Ok(Value::Bool(values_equal(op, left, right)?)),
        K::NotEquals => Ok(Value::Bool(!values_equal(op, left, right)?)),
        K::Less | K::LessOrEquals | K::Greater | K::GreaterOrEquals => compare(op, left, right),
    }
}

/// Numeric arithmetic with type-directed representation selection.
fn numeric(
    op: &BoundBinaryOp,
    left: Value,
    right: Value,
    int_op: fn(i64, i64) -> i64,
    float_op: fn(f64, f64) -> f64,
) -> EvalResult {
    if op.is_float_op() {
        Ok(Value::Float(float_op(as_float(left)?, as_float(right)?)))
    } else {
        Ok(Value::Int(int_op(as_int(left)?, as_int(right)?)))
    }
}

/// `&`/`|`/`^`: boolean eager forms when the result type is `bool`,
/// integer bitwise forms otherwise.
fn bitwise(
    op: &BoundBinaryOp,
    left: Value,
    right: Value,
    bool_op: fn(bool, bool) -> bool,
    int_op: fn(i64, i64) -> i64,
) -> EvalResult {
    if op.result_ty == TypeSymbol::Bool {
        Ok(Value::Bool(bool_op(as_bool(left)?, as_bool(right)?)))
    } else {
        Ok(Value::Int(int_op(as_int(left)?, as_int(right)?)))
    }
}

/// The `/` overload with a non-numeric result: select one character of the
/// left string by the right integer.
fn index_string(left: Value, right: Value) -> EvalResult {
    let s = as_str(left)?;
    let index = as_int(right)?;
    let len = s.chars().count();
    usize::try_from(index)
        .ok()
        .and_then(|i| s.chars().nth(i))
        .map(|c| Value::string(c.to_string()))
        .ok_or_else(|| index_out_of_range(format!("string \"{s}\""), index, len))
}

fn values_equal(op: &BoundBinaryOp, left: Value, right: Value) -> EvalResult<bool> {
    if op.is_float_op() && op.left_ty.is_numeric() && op.right_ty.is_numeric() {
        Ok(as_float(left)? == as_float(right)?)
    } else {
        Ok(left == right)
    }
}

fn compare(op: &BoundBinaryOp, left: Value, right: Value) -> EvalResult {
    use std::cmp::Ordering;

    let ordering = if op.is_float_op() {
        // NaN compares false against everything.
        as_float(left)?.partial_cmp(&as_float(right)?)
    } else {
        Some(as_int(left)?.cmp(&as_int(right)?))
    };

    let result = match (op.kind, ordering) {
        (_, None) => false,
        (BinaryOpKind::Less, Some(o)) => o == Ordering::Less,
        (BinaryOpKind::LessOrEquals, Some(o)) => o != Ordering::Greater,
        (BinaryOpKind::Greater, Some(o)) => o == Ordering::Greater,
        (BinaryOpKind::GreaterOrEquals, Some(o)) => o != Ordering::Less,
        (kind, _) => {
            return Err(internal(format!(
                "operator kind {kind:?} is not a comparison"
            )))
        }
    };
    Ok(Value::Bool(result))
}
