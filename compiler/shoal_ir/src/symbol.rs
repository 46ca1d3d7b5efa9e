//! Symbols: the named identities produced by binding.
//!
//! A symbol's identity is its declaration site, not its name. Every symbol
//! gets a process-unique [`SymbolId`] at construction, and equality/hashing
//! go through that id alone — two locals named `x` in different scopes are
//! different map keys, and shadowing cannot corrupt storage lookup.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::builtins::Builtin;
use crate::types::TypeSymbol;

/// Stable identity for a symbol declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct SymbolId(u32);

impl SymbolId {
    fn next() -> Self {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        SymbolId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Discriminates what a name resolved to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SymbolKind {
    GlobalVariable,
    LocalVariable,
    Parameter,
    Type,
    Function,
}

/// A resolved variable, parameter, or global.
#[derive(Clone)]
pub struct VariableSymbol {
    id: SymbolId,
    name: Arc<str>,
    kind: SymbolKind,
    ty: TypeSymbol,
    read_only: bool,
}

impl VariableSymbol {
    /// Create a variable symbol with a fresh identity.
    ///
    /// `kind` must be one of the variable kinds; the binder never constructs
    /// a variable with `Type` or `Function` kind.
    pub fn new(name: impl Into<Arc<str>>, kind: SymbolKind, ty: TypeSymbol, read_only: bool) -> Self {
        debug_assert!(matches!(
            kind,
            SymbolKind::GlobalVariable | SymbolKind::LocalVariable | SymbolKind::Parameter
        ));
        VariableSymbol {
            id: SymbolId::next(),
            name: name.into(),
            kind,
            ty,
            read_only,
        }
    }

    /// Shorthand for a global variable.
    pub fn global(name: impl Into<Arc<str>>, ty: TypeSymbol, read_only: bool) -> Self {
        VariableSymbol::new(name, SymbolKind::GlobalVariable, ty, read_only)
    }

    /// Shorthand for a local variable.
    pub fn local(name: impl Into<Arc<str>>, ty: TypeSymbol, read_only: bool) -> Self {
        VariableSymbol::new(name, SymbolKind::LocalVariable, ty, read_only)
    }

    /// Shorthand for a parameter (always read-only).
    pub fn parameter(name: impl Into<Arc<str>>, ty: TypeSymbol) -> Self {
        VariableSymbol::new(name, SymbolKind::Parameter, ty, true)
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn ty(&self) -> TypeSymbol {
        self.ty
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Whether storage for this symbol lives in the global store.
    pub fn is_global(&self) -> bool {
        self.kind == SymbolKind::GlobalVariable
    }
}

impl PartialEq for VariableSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for VariableSymbol {}

impl Hash for VariableSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for VariableSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({}: {})", self.kind, self.name, self.ty)
    }
}

impl fmt::Display for VariableSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A resolved function: ordered parameters plus a declared return type.
#[derive(Clone)]
pub struct FunctionSymbol {
    id: SymbolId,
    name: Arc<str>,
    parameters: Vec<VariableSymbol>,
    return_type: TypeSymbol,
    builtin: Option<Builtin>,
}

impl FunctionSymbol {
    /// Create a user-function symbol with a fresh identity.
    pub fn new(
        name: impl Into<Arc<str>>,
        parameters: Vec<VariableSymbol>,
        return_type: TypeSymbol,
    ) -> Self {
        FunctionSymbol {
            id: SymbolId::next(),
            name: name.into(),
            parameters,
            return_type,
            builtin: None,
        }
    }

    /// Create a built-in function symbol. Only the built-in table calls this.
    pub(crate) fn new_builtin(
        name: impl Into<Arc<str>>,
        parameters: Vec<VariableSymbol>,
        return_type: TypeSymbol,
        builtin: Builtin,
    ) -> Self {
        FunctionSymbol {
            id: SymbolId::next(),
            name: name.into(),
            parameters,
            return_type,
            builtin: Some(builtin),
        }
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SymbolKind {
        SymbolKind::Function
    }

    pub fn parameters(&self) -> &[VariableSymbol] {
        &self.parameters
    }

    pub fn return_type(&self) -> TypeSymbol {
        self.return_type
    }

    /// `Some` when the evaluator implements this function itself.
    pub fn builtin(&self) -> Option<Builtin> {
        self.builtin
    }
}

impl PartialEq for FunctionSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FunctionSymbol {}

impl Hash for FunctionSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for FunctionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({}", self.name)?;
        for p in &self.parameters {
            write!(f, " {}: {},", p.name(), p.ty())?;
        }
        write!(f, " -> {})", self.return_type)
    }
}

impl fmt::Display for FunctionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
