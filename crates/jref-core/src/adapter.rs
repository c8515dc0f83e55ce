//! # Document Adapter Contract
//!
//! The resolver never touches a concrete JSON representation. It sees a
//! document only through [`DocumentAdapter`], a read-only capability set:
//! classification, object member lookup, array size and element access, and
//! structural equality.
//!
//! Adapters are thin borrowing views. They own nothing, are `Copy`, and are
//! valid only as long as the document they borrow. Concrete adapters for
//! specific JSON libraries live outside this crate.

use std::fmt;

/// The six kinds of JSON node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl NodeKind {
    /// True for arrays and objects, the only kinds a pointer can descend into.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

/// Read-only view over one node of a JSON-like document.
///
/// Implementations must be cheap to copy: the resolver replaces its current
/// view with a child view at every step.
pub trait DocumentAdapter: Copy {
    /// Classify this node.
    fn kind(&self) -> NodeKind;

    /// Look up an object member by exact key.
    ///
    /// Returns `None` when the key is absent or when this node is not an object.
    fn member(&self, key: &str) -> Option<Self>;

    /// Number of elements if this node is an array.
    fn array_len(&self) -> Option<usize>;

    /// Element at a zero-based index.
    ///
    /// Returns `None` when the index is out of range or this node is not an array.
    fn element(&self, index: usize) -> Option<Self>;

    /// Structural equality with another node of the same representation.
    fn structurally_eq(&self, other: &Self) -> bool;
}
