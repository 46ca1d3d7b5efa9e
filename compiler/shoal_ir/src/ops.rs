//! Operator kinds and the bind tables that resolve them.
//!
//! The binder hands this module a surface operator plus the static operand
//! types; it gets back a fully resolved [`BoundUnaryOp`]/[`BoundBinaryOp`]
//! carrying the operator kind and result type, or `None` when the
//! combination does not type-check (a binder diagnostic, not an evaluator
//! concern). Evaluation dispatches on the bound kind and the *static* types
//! recorded here — never on runtime value tags.

use crate::types::TypeSymbol;

/// Surface unary operator tokens, as delivered by the parser.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SyntaxUnaryOp {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `!`
    Bang,
    /// `~`
    Tilde,
}

/// Surface binary operator tokens, as delivered by the parser.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SyntaxBinaryOp {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/` — numeric division, and the string-indexing overload.
    Slash,
    /// `**`
    StarStar,
    /// `&`
    Ampersand,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `&&`
    AmpersandAmpersand,
    /// `||`
    PipePipe,
    /// `<<`
    LessLess,
    /// `>>`
    GreaterGreater,
    /// `==`
    EqualsEquals,
    /// `!=`
    BangEquals,
    /// `<`
    Less,
    /// `<=`
    LessOrEquals,
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEquals,
}

/// Resolved unary operator kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOpKind {
    Identity,
    Negation,
    LogicalNegation,
    BitwiseNegation,
}

/// Resolved binary operator kinds.
///
/// The eager logical forms (`&`, `|`, `^` on bools) share the `Bitwise*`
/// kinds with their integer counterparts and are told apart by result type;
/// `LogicalAnd`/`LogicalOr` are the short-circuiting `&&`/`||` only.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOpKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Exponentiation,
    LogicalAnd,
    LogicalOr,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LeftShift,
    RightShift,
    Equals,
    NotEquals,
    Less,
    LessOrEquals,
    Greater,
    GreaterOrEquals,
}

/// A unary operator resolved against its operand type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct BoundUnaryOp {
    pub kind: UnaryOpKind,
    pub operand_ty: TypeSymbol,
    pub result_ty: TypeSymbol,
}

impl BoundUnaryOp {
    /// Resolve a surface operator against a static operand type.
    pub fn bind(op: SyntaxUnaryOp, operand: TypeSymbol) -> Option<BoundUnaryOp> {
        let (kind, result_ty) = match op {
            SyntaxUnaryOp::Plus if operand.is_numeric() => {
                (UnaryOpKind::Identity, numeric_result(operand, operand))
            }
            SyntaxUnaryOp::Minus if operand.is_numeric() => {
                (UnaryOpKind::Negation, numeric_result(operand, operand))
            }
            SyntaxUnaryOp::Bang if operand == TypeSymbol::Bool => {
                (UnaryOpKind::LogicalNegation, TypeSymbol::Bool)
            }
            SyntaxUnaryOp::Tilde if operand.is_integer() => {
                (UnaryOpKind::BitwiseNegation, TypeSymbol::Int)
            }
            _ => return None,
        };
        Some(BoundUnaryOp {
            kind,
            operand_ty: operand,
            result_ty,
        })
    }
}

/// A binary operator resolved against its static operand types.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct BoundBinaryOp {
    pub kind: BinaryOpKind,
    pub left_ty: TypeSymbol,
    pub right_ty: TypeSymbol,
    pub result_ty: TypeSymbol,
}

impl BoundBinaryOp {
    /// Resolve a surface operator against static operand types.
    pub fn bind(op: SyntaxBinaryOp, left: TypeSymbol, right: TypeSymbol) -> Option<BoundBinaryOp> {
        use self::{BinaryOpKind as K, SyntaxBinaryOp as S};

        let both_numeric = left.is_numeric() && right.is_numeric();
        let both_integer = left.is_integer() && right.is_integer();
        let both_bool = left == TypeSymbol::Bool && right == TypeSymbol::Bool;

        let (kind, result_ty) = match op {
            S::Plus if both_numeric => (K::Addition, numeric_result(left, right)),
            S::Plus if left == TypeSymbol::String && right == TypeSymbol::String => {
                (K::Addition, TypeSymbol::String)
            }
            S::Minus if both_numeric => (K::Subtraction, numeric_result(left, right)),
            S::Star if both_numeric => (K::Multiplication, numeric_result(left, right)),
            S::Slash if both_numeric => (K::Division, numeric_result(left, right)),
            // The string-indexing overload: `s / i` selects character i.
            S::Slash if left == TypeSymbol::String && right.is_integer() => {
                (K::Division, TypeSymbol::String)
            }
            S::StarStar if both_numeric => (K::Exponentiation, numeric_result(left, right)),
            S::Ampersand if both_bool => (K::BitwiseAnd, TypeSymbol::Bool),
            S::Ampersand if both_integer => (K::BitwiseAnd, TypeSymbol::Int),
            S::Pipe if both_bool => (K::BitwiseOr, TypeSymbol::Bool),
            S::Pipe if both_integer => (K::BitwiseOr, TypeSymbol::Int),
            S::Caret if both_bool => (K::BitwiseXor, TypeSymbol::Bool),
            S::Caret if both_integer => (K::BitwiseXor, TypeSymbol::Int),
            S::AmpersandAmpersand if both_bool => (K::LogicalAnd, TypeSymbol::Bool),
            S::PipePipe if both_bool => (K::LogicalOr, TypeSymbol::Bool),
            S::LessLess if both_integer => (K::LeftShift, TypeSymbol::Int),
            S::GreaterGreater if both_integer => (K::RightShift, TypeSymbol::Int),
            S::EqualsEquals if comparable(left, right) => (K::Equals, TypeSymbol::Bool),
            S::BangEquals if comparable(left, right) => (K::NotEquals, TypeSymbol::Bool),
            S::Less if both_numeric => (K::Less, TypeSymbol::Bool),
            S::LessOrEquals if both_numeric => (K::LessOrEquals, TypeSymbol::Bool),
            S::Greater if both_numeric => (K::Greater, TypeSymbol::Bool),
            S::GreaterOrEquals if both_numeric => (K::GreaterOrEquals, TypeSymbol::Bool),
            _ => return None,
        };
        Some(BoundBinaryOp {
            kind,
            left_ty: left,
            right_ty: right,
            result_ty,
        })
    }

    /// Whether either static operand side is the floating type.
    pub fn is_float_op(&self) -> bool {
        self.left_ty == TypeSymbol::Float64 || self.right_ty == TypeSymbol::Float64
    }
}

/// Numeric result selection: float if either side floats, else `int`.
fn numeric_result(left: TypeSymbol, right: TypeSymbol) -> TypeSymbol {
    if left == TypeSymbol::Float64 || right == TypeSymbol::Float64 {
        TypeSymbol::Float64
    } else {
        TypeSymbol::Int
    }
}

/// Equality is defined for any compatible pair of static types.
fn comparable(left: TypeSymbol, right: TypeSymbol) -> bool {
    left == right
        || (left.is_numeric() && right.is_numeric())
        || TypeSymbol::check_type(left, right)
        || TypeSymbol::check_type(right, left)
}
