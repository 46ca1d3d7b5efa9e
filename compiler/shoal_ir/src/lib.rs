//! Shoal IR - symbol, type, and bound-tree types.
//!
//! This crate holds the data model shared by the lowerer and evaluator:
//! - Type identities with the one-level `Number` hierarchy
//! - Symbols (variables, functions) compared by declaration identity
//! - Scalar runtime values
//! - The closed bound-tree node set, fully resolved by the binder
//! - Operator bind tables mapping (surface operator, static types) to
//!   resolved operator kinds and result types
//! - The built-in function table
//! - `BoundProgram`, the unit handed to lowering and evaluation
//!
//! Everything here is inert data: construction and inspection only, no
//! execution. The lowerer (`shoal_lower`) rewrites these trees and the
//! evaluator (`shoal_eval`) walks them.

pub mod bound;
mod builtins;
mod ops;
pub mod pretty;
mod program;
mod symbol;
mod types;
mod value;
pub mod visitor;

pub use bound::{BoundBlock, BoundExpr, BoundLabel, BoundStmt};
pub use builtins::{builtin_functions, lookup_builtin, Builtin};
pub use ops::{
    BinaryOpKind, BoundBinaryOp, BoundUnaryOp, SyntaxBinaryOp, SyntaxUnaryOp, UnaryOpKind,
};
pub use program::BoundProgram;
pub use symbol::{FunctionSymbol, SymbolId, SymbolKind, VariableSymbol};
pub use types::TypeSymbol;
pub use value::Value;

// Diagnostics travel inside `BoundProgram`; re-export the types so
// downstream crates don't need a separate shoal_diagnostic dependency
// just to inspect them.
pub use shoal_diagnostic::{Diagnostic, DiagnosticBag, Severity, Span};
