//! Unary operator evaluation.

use shoal_ir::{BoundUnaryOp, TypeSymbol, UnaryOpKind, Value};

use crate::cast::{as_bool, as_float, as_int};
use crate::errors::EvalResult;

/// Apply a unary operator to an already-evaluated operand.
pub(crate) fn evaluate_unary(op: &BoundUnaryOp, operand: Value) -> EvalResult {
    let floating = op.result_ty == TypeSymbol::Float64;
    match op.kind {
        UnaryOpKind::Identity => {
            if floating {
                Ok(Value::Float(as_float(operand)?))
            } else {
                Ok(Value::Int(as_int(operand)?))
            }
        }
        UnaryOpKind::Negation => {
            if floating {
                Ok(Value::Float(-as_float(operand)?))
            } else {
                Ok(Value::Int(as_int(operand)?.wrapping_neg()))
            }
        }
        UnaryOpKind::LogicalNegation => Ok(Value::Bool(!as_bool(operand)?)),
        UnaryOpKind::BitwiseNegation => Ok(Value::Int(!as_int(operand)?)),
    }
}
