//! Jump-target labels.

use std::fmt;
use std::sync::Arc;

/// A zero-width jump target identified by a unique generated name.
///
/// Labels are produced either by the binder (loop break/continue targets) or
/// by the lowerer (`Label1`, `Label2`, …). Equality is by name; a lowering
/// pass never reuses a name, so within one flattened body names are unique.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct BoundLabel {
    name: Arc<str>,
}

impl BoundLabel {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        BoundLabel { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for BoundLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoundLabel({})", self.name)
    }
}

impl fmt::Display for BoundLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
