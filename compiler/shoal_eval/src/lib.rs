//! Shoal Eval - tree-walking evaluator for lowered programs.
//!
//! Executes a [`BoundProgram`] whose bodies have been flattened by
//! `shoal_lower`: an instruction pointer walks each body, jumps resolve
//! through a per-body label map, and function calls re-enter the machine
//! with a fresh local frame.
//!
//! # Architecture
//!
//! - [`VariableStores`]: scalar/array/list storage, one instance for the
//!   global scope plus one per call frame
//! - [`Evaluator`]: the state machine (instruction pointer, call stack,
//!   last-value register, call-depth ceiling)
//! - `evaluate_binary` / `evaluate_unary`: enum-dispatch operator evaluation
//!   selected by bound kind + static operand types
//! - [`PrintHandler`] / [`InputSource`]: the only I/O seams
//!
//! # Error classes
//!
//! User/source errors never reach this crate — they are binder diagnostics,
//! and [`evaluate_program`] refuses to run a program that carries any.
//! [`EvalError`] covers what remains: runtime conditions a correct program
//! can hit (division by zero, bad conversion input, exhausted call depth)
//! and `Internal` defects that indicate a broken binder or lowerer.
//!
//! # Concurrency
//!
//! Strictly single-threaded: one evaluator owns all stores for one run. A
//! REPL carries state across submissions by passing the same
//! [`VariableStores`] back in — explicitly, never by sharing internals.

mod cast;
mod conversions;
mod environment;
mod errors;
mod evaluator;
mod handlers;
mod operators;
mod unary_operators;

#[cfg(test)]
mod tests;

pub use environment::VariableStores;
pub use errors::{EvalError, EvalResult};
pub use evaluator::{Evaluator, MAX_CALL_DEPTH};
pub use handlers::{InputSource, PrintHandler};

// The values a program computes are IR types; re-export for callers that
// only link the evaluator.
pub use shoal_ir::{BoundProgram, Value};

use shoal_diagnostic::Diagnostic;

/// What one evaluation produced.
#[derive(Debug)]
pub struct EvaluationResult {
    /// The program's diagnostics, returned untouched for the front end.
    pub diagnostics: Vec<Diagnostic>,
    /// The returned/last value, or `None` when nothing was executable.
    pub value: Option<Value>,
}

impl EvaluationResult {
    /// Whether evaluation was skipped because of binder errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Evaluate a program against an existing global store.
///
/// If any diagnostic is an error, evaluation is skipped entirely and the
/// diagnostics come back with `value: None`. The global store is the
/// caller's: a REPL passes the same one for every submission to carry
/// globals across runs.
pub fn evaluate_program(
    program: &BoundProgram,
    globals: &mut VariableStores,
    print: &mut PrintHandler,
    input: &mut InputSource,
) -> Result<EvaluationResult, EvalError> {
    if program.has_errors() {
        return Ok(EvaluationResult {
            diagnostics: program.diagnostics.clone(),
            value: None,
        });
    }

    let mut evaluator = Evaluator::new(program, globals, print, input);
    let value = evaluator.evaluate()?;
    Ok(EvaluationResult {
        diagnostics: program.diagnostics.clone(),
        value,
    })
}
