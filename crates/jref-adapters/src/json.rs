//! Adapter over [`serde_json::Value`].

use jref_core::{DocumentAdapter, NodeKind};
use serde_json::Value;

/// Borrowing view of a `serde_json` node.
#[derive(Debug, Clone, Copy)]
pub struct JsonAdapter<'a> {
    value: &'a Value,
}

impl<'a> JsonAdapter<'a> {
    /// Wrap a borrowed node.
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// The underlying node, with the document's lifetime.
    pub fn value(&self) -> &'a Value {
        self.value
    }
}

impl<'a> From<&'a Value> for JsonAdapter<'a> {
    fn from(value: &'a Value) -> Self {
        Self::new(value)
    }
}

impl DocumentAdapter for JsonAdapter<'_> {
    fn kind(&self) -> NodeKind {
        match self.value {
            Value::Null => NodeKind::Null,
            Value::Bool(_) => NodeKind::Bool,
            Value::Number(_) => NodeKind::Number,
            Value::String(_) => NodeKind::String,
            Value::Array(_) => NodeKind::Array,
            Value::Object(_) => NodeKind::Object,
        }
    }

    fn member(&self, key: &str) -> Option<Self> {
        self.value.as_object()?.get(key).map(Self::new)
    }

    fn array_len(&self) -> Option<usize> {
        self.value.as_array().map(Vec::len)
    }

    fn element(&self, index: usize) -> Option<Self> {
        self.value.as_array()?.get(index).map(Self::new)
    }

    fn structurally_eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
