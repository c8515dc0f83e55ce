//! Adapter over [`serde_yaml::Value`].
//!
//! YAML is richer than JSON. Two differences matter for pointers:
//!
//! - Tags are transparent. A `!tag value` node is classified and navigated
//!   as `value`.
//! - Mapping keys that are not strings are unreachable, since every pointer
//!   token is a string. `{1: a}` has no member `"1"`.

use jref_core::{DocumentAdapter, NodeKind};
use serde_yaml::Value;

/// Borrowing view of a `serde_yaml` node.
#[derive(Debug, Clone, Copy)]
pub struct YamlAdapter<'a> {
    value: &'a Value,
}

impl<'a> YamlAdapter<'a> {
    /// Wrap a borrowed node, looking through any tags.
    pub fn new(value: &'a Value) -> Self {
        Self {
            value: untag(value),
        }
    }

    /// The underlying (untagged) node, with the document's lifetime.
    pub fn value(&self) -> &'a Value {
        self.value
    }
}

impl<'a> From<&'a Value> for YamlAdapter<'a> {
    fn from(value: &'a Value) -> Self {
        Self::new(value)
    }
}

fn untag(mut value: &Value) -> &Value {
    while let Value::Tagged(tagged) = value {
        value = &tagged.value;
    }
    value
}

impl DocumentAdapter for YamlAdapter<'_> {
    fn kind(&self) -> NodeKind {
        match self.value {
            Value::Null => NodeKind::Null,
            Value::Bool(_) => NodeKind::Bool,
            Value::Number(_) => NodeKind::Number,
            Value::String(_) => NodeKind::String,
            Value::Sequence(_) => NodeKind::Array,
            Value::Mapping(_) => NodeKind::Object,
            // `new` strips tags.
            Value::Tagged(tagged) => YamlAdapter::new(&tagged.value).kind(),
        }
    }

    fn member(&self, key: &str) -> Option<Self> {
        self.value.as_mapping()?.get(key).map(Self::new)
    }

    fn array_len(&self) -> Option<usize> {
        self.value.as_sequence().map(Vec::len)
    }

    fn element(&self, index: usize) -> Option<Self> {
        self.value.as_sequence()?.get(index).map(Self::new)
    }

    fn structurally_eq(&self, other: &Self) -> bool {
        yaml_eq(self.value, other.value)
    }
}

/// Equality that looks through tags at every level.
fn yaml_eq(a: &Value, b: &Value) -> bool {
    match (untag(a), untag(b)) {
        (Value::Sequence(xs), Value::Sequence(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| yaml_eq(x, y))
        }
        (Value::Mapping(xs), Value::Mapping(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| yaml_eq(x, y)))
        }
        (x, y) => x == y,
    }
}
