//! Variable storage.
//!
//! Three parallel stores — scalars, fixed-size arrays, ordered-key lists —
//! keyed by symbol identity. One [`VariableStores`] instance backs the
//! global scope (lifetime: the program, or a whole REPL session when carried
//! across submissions) and one backs each function activation frame.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use shoal_ir::{Value, VariableSymbol};

/// Scalar, array, and list storage for one scope.
#[derive(Clone, Debug, Default)]
pub struct VariableStores {
    scalars: FxHashMap<VariableSymbol, Value>,
    arrays: FxHashMap<VariableSymbol, Vec<Value>>,
    lists: FxHashMap<VariableSymbol, BTreeMap<i64, Value>>,
}

impl VariableStores {
    pub fn new() -> Self {
        VariableStores::default()
    }

    pub fn scalar(&self, variable: &VariableSymbol) -> Option<&Value> {
        self.scalars.get(variable)
    }

    pub fn set_scalar(&mut self, variable: VariableSymbol, value: Value) {
        self.scalars.insert(variable, value);
    }

    pub fn array(&self, variable: &VariableSymbol) -> Option<&[Value]> {
        self.arrays.get(variable).map(Vec::as_slice)
    }

    pub fn set_array(&mut self, variable: VariableSymbol, elements: Vec<Value>) {
        self.arrays.insert(variable, elements);
    }

    pub fn list(&self, variable: &VariableSymbol) -> Option<&BTreeMap<i64, Value>> {
        self.lists.get(variable)
    }

    pub fn set_list(&mut self, variable: VariableSymbol, elements: BTreeMap<i64, Value>) {
        self.lists.insert(variable, elements);
    }

    /// Element count of the array or list stored under `variable`, queried
    /// without rendering the aggregate.
    pub fn aggregate_len(&self, variable: &VariableSymbol) -> Option<usize> {
        if let Some(array) = self.arrays.get(variable) {
            return Some(array.len());
        }
        self.lists.get(variable).map(BTreeMap::len)
    }

    /// The display form of the array or list stored under `variable`:
    /// elements comma-joined in brackets, lists in key order.
    pub fn render_aggregate(&self, variable: &VariableSymbol) -> Option<String> {
        if let Some(array) = self.arrays.get(variable) {
            return Some(render(array.iter()));
        }
        self.lists.get(variable).map(|list| render(list.values()))
    }

    /// Whether any store holds this symbol.
    pub fn contains(&self, variable: &VariableSymbol) -> bool {
        self.scalars.contains_key(variable)
            || self.arrays.contains_key(variable)
            || self.lists.contains_key(variable)
    }
}

fn render<'a>(values: impl Iterator<Item = &'a Value>) -> String {
    let joined = values
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}
