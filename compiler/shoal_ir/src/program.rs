//! The bound program: what the binder hands to lowering and evaluation.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use shoal_diagnostic::Diagnostic;

use crate::bound::BoundBlock;
use crate::symbol::FunctionSymbol;

/// A fully bound submission: function bodies plus entry points.
///
/// REPL sessions chain submissions through `previous`; a later submission
/// may call functions declared earlier, so body lookup walks the chain.
#[derive(Clone, Debug, Default)]
pub struct BoundProgram {
    pub previous: Option<Arc<BoundProgram>>,
    pub functions: FxHashMap<FunctionSymbol, BoundBlock>,
    pub main_function: Option<FunctionSymbol>,
    pub script_function: Option<FunctionSymbol>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BoundProgram {
    /// A program with no previous submission.
    pub fn new(
        functions: FxHashMap<FunctionSymbol, BoundBlock>,
        main_function: Option<FunctionSymbol>,
        script_function: Option<FunctionSymbol>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        BoundProgram {
            previous: None,
            functions,
            main_function,
            script_function,
            diagnostics,
        }
    }

    /// Chain this submission onto an earlier one.
    pub fn with_previous(mut self, previous: Arc<BoundProgram>) -> Self {
        self.previous = Some(previous);
        self
    }

    /// Find a function body, searching earlier submissions if needed.
    pub fn function_body(&self, function: &FunctionSymbol) -> Option<&BoundBlock> {
        let mut program = self;
        loop {
            if let Some(body) = program.functions.get(function) {
                return Some(body);
            }
            program = program.previous.as_deref()?;
        }
    }

    /// The function to execute: `main` when declared, else the script body.
    pub fn entry_function(&self) -> Option<&FunctionSymbol> {
        self.main_function
            .as_ref()
            .or(self.script_function.as_ref())
    }

    /// Whether any diagnostic blocks evaluation.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}
