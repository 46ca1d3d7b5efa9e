//! The built-in function table.
//!
//! Built-ins are implemented by the evaluator itself; the binder resolves
//! calls against the symbols here, and the evaluator dispatches on the
//! [`Builtin`] tag rather than looking up a body.

use std::sync::OnceLock;

use crate::symbol::{FunctionSymbol, VariableSymbol};
use crate::types::TypeSymbol;

/// Functions the evaluator implements directly.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Builtin {
    Print,
    Input,
    Round,
    Floor,
    Ceil,
    Length,
}

impl Builtin {
    /// Every built-in, in table order.
    pub const ALL: [Builtin; 6] = [
        Builtin::Print,
        Builtin::Input,
        Builtin::Round,
        Builtin::Floor,
        Builtin::Ceil,
        Builtin::Length,
    ];

    /// The source-level name.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Print => "print",
            Builtin::Input => "input",
            Builtin::Round => "round",
            Builtin::Floor => "floor",
            Builtin::Ceil => "ceil",
            Builtin::Length => "length",
        }
    }

    /// The function symbol for this built-in.
    pub fn symbol(self) -> &'static FunctionSymbol {
        let idx = match self {
            Builtin::Print => 0,
            Builtin::Input => 1,
            Builtin::Round => 2,
            Builtin::Floor => 3,
            Builtin::Ceil => 4,
            Builtin::Length => 5,
        };
        &builtin_functions()[idx]
    }
}

fn make_symbol(builtin: Builtin) -> FunctionSymbol {
    let (params, return_type) = match builtin {
        Builtin::Print => (
            vec![VariableSymbol::parameter("value", TypeSymbol::Any)],
            TypeSymbol::Void,
        ),
        Builtin::Input => (vec![], TypeSymbol::String),
        Builtin::Round | Builtin::Floor | Builtin::Ceil => (
            vec![VariableSymbol::parameter("value", TypeSymbol::Float64)],
            TypeSymbol::Int,
        ),
        Builtin::Length => (
            vec![VariableSymbol::parameter("value", TypeSymbol::Any)],
            TypeSymbol::Int,
        ),
    };
    FunctionSymbol::new_builtin(builtin.name(), params, return_type, builtin)
}

/// All built-in function symbols, in [`Builtin::ALL`] order.
///
/// Built once per process; the symbols keep stable identities so repeated
/// binder passes resolve calls to the same functions.
pub fn builtin_functions() -> &'static [FunctionSymbol] {
    static TABLE: OnceLock<Vec<FunctionSymbol>> = OnceLock::new();
    TABLE.get_or_init(|| Builtin::ALL.into_iter().map(make_symbol).collect())
}

/// Look a built-in up by source name.
pub fn lookup_builtin(name: &str) -> Option<&'static FunctionSymbol> {
    builtin_functions().iter().find(|f| f.name() == name)
}
