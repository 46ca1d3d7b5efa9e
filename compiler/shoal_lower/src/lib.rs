//! Shoal Lower - structured control flow to flat goto programs.
//!
//! This crate eliminates `if`, `while`, and `for` from bound statement
//! trees, producing a single flat block whose only statement kinds are
//! declarations, expression statements, `Goto`/`ConditionalGoto`/`Label`,
//! and `Return` — the shape the evaluator's instruction-pointer loop
//! executes.
//!
//! # Pipeline Position
//!
//! ```text
//! Binder → **Lower** → Evaluator
//! ```
//!
//! Two phases per [`lower`] call:
//! 1. **Rewrite**: each structured statement becomes an equivalent block of
//!    jumps and labels; every rewrite re-runs through the rewriter so nested
//!    control flow is fully eliminated.
//! 2. **Flatten**: an iterative, work-stack unnesting inlines nested blocks
//!    in original order. The output contains no `Block` statements.
//!
//! Labels are generated from a counter owned by the pass (`Label1`,
//! `Label2`, …); a fresh pass starts every call, so REPL sessions never leak
//! numbering between submissions.

mod lower;


use shoal_ir::{BoundBlock, BoundStmt};

use crate::lower::Lowerer;

/// Lower one statement tree to a flat block.
///
/// Already-flat input passes through unchanged, so lowering is idempotent.
#[tracing::instrument(level = "debug", skip_all)]
pub fn lower(statement: BoundStmt) -> BoundBlock {
    let mut lowerer = Lowerer::new();
    let rewritten = lowerer.rewrite_stmt(statement);
    let flat = Lowerer::flatten(rewritten);
    tracing::debug!(
        statements = flat.len(),
        labels = lowerer.label_count(),
        "lowered block"
    );
    flat
}
