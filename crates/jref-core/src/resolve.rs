//! # Pointer Resolver
//!
//! Walks a document one decoded token at a time through a
//! [`DocumentAdapter`].
//!
//! ## Navigation Rules
//!
//! - **Object:** the token is an exact member key. Absent → `MissingMember`.
//! - **Array:** the token must be one or more ASCII decimal digits. Anything
//!   else, including `-`, → `InvalidArrayIndexToken`. A well-formed index at
//!   or beyond the array length → `ArrayIndexOutOfRange`.
//! - **Scalar:** null, boolean, number and string (even `""`) admit no
//!   descent → `NonContainerNavigation`, whatever the token.
//!
//! An empty token sequence returns the root without classifying it, so a
//! separator-only pointer succeeds even against a scalar document.
//!
//! Resolution never mutates the document. The result is a view into the
//! original document, not a copy.

use crate::adapter::{DocumentAdapter, NodeKind};
use crate::error::{ResolveError, ResolveErrorKind};
use crate::pointer::JsonPointer;

/// Resolve a pointer string against `root`.
///
/// # Errors
///
/// Returns [`ResolveError`] naming the pointer, the failing token, and the
/// reason navigation stopped.
pub fn resolve<A: DocumentAdapter>(root: A, pointer: &str) -> Result<A, ResolveError> {
    resolve_pointer(root, &JsonPointer::parse(pointer))
}

/// Resolve an already parsed pointer against `root`.
///
/// # Errors
///
/// See [`resolve`].
pub fn resolve_pointer<A: DocumentAdapter>(
    root: A,
    pointer: &JsonPointer,
) -> Result<A, ResolveError> {
    let mut current = root;
    for (index, token) in pointer.tokens().iter().enumerate() {
        current = step(current, token).map_err(|reason| ResolveError {
            pointer: pointer.as_str().to_string(),
            token_index: index,
            token: token.clone(),
            reason,
        })?;
    }
    Ok(current)
}

/// Apply a single decoded token to `node`.
fn step<A: DocumentAdapter>(node: A, token: &str) -> Result<A, ResolveErrorKind> {
    match node.kind() {
        NodeKind::Object => node.member(token).ok_or(ResolveErrorKind::MissingMember),
        NodeKind::Array => {
            let index = parse_array_index(token)?;
            node.element(index).ok_or(ResolveErrorKind::ArrayIndexOutOfRange)
        }
        NodeKind::Null | NodeKind::Bool | NodeKind::Number | NodeKind::String => {
            Err(ResolveErrorKind::NonContainerNavigation)
        }
    }
}

/// Parse an array index token.
///
/// Only a non-empty run of ASCII digits is accepted. A digit run too large
/// for `usize` is well-formed but cannot be inside any array, so it reports
/// `ArrayIndexOutOfRange` rather than a shape error.
fn parse_array_index(token: &str) -> Result<usize, ResolveErrorKind> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ResolveErrorKind::InvalidArrayIndexToken);
    }
    token
        .parse::<usize>()
        .map_err(|_| ResolveErrorKind::ArrayIndexOutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    /// Minimal adapter over `serde_json::Value` for exercising the resolver.
    #[derive(Debug, Clone, Copy)]
    struct Node<'a>(&'a Value);

    impl DocumentAdapter for Node<'_> {
        fn kind(&self) -> NodeKind {
            match self.0 {
                Value::Null => NodeKind::Null,
                Value::Bool(_) => NodeKind::Bool,
                Value::Number(_) => NodeKind::Number,
                Value::String(_) => NodeKind::String,
                Value::Array(_) => NodeKind::Array,
                Value::Object(_) => NodeKind::Object,
            }
        }

        fn member(&self, key: &str) -> Option<Self> {
            self.0.as_object()?.get(key).map(Node)
        }

        fn array_len(&self) -> Option<usize> {
            self.0.as_array().map(Vec::len)
        }

        fn element(&self, index: usize) -> Option<Self> {
            self.0.as_array()?.get(index).map(Node)
        }

        fn structurally_eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }

    fn kind_of(doc: &Value, pointer: &str) -> ResolveErrorKind {
        resolve(Node(doc), pointer).unwrap_err().reason
    }

    #[test]
    fn empty_pointers_return_scalar_root() {
        let doc = Value::Null;
        for p in ["", "/", "//"] {
            let found = resolve(Node(&doc), p).unwrap();
            assert!(std::ptr::eq(found.0, &doc));
        }
    }

    #[test]
    fn result_borrows_from_document() {
        let doc = json!({"a": {"b": [1, 2]}});
        let found = resolve(Node(&doc), "/a/b/1").unwrap();
        assert!(std::ptr::eq(found.0, &doc["a"]["b"][1]));
    }

    #[test]
    fn hash_is_not_a_fragment_marker() {
        assert_eq!(kind_of(&Value::Null, "#"), ResolveErrorKind::NonContainerNavigation);
    }

    #[test]
    fn array_token_shapes() {
        let doc = json!([10, 20]);
        for bad in ["-", "+1", "-1", "1a", " 1", "0x1", "1.0"] {
            assert_eq!(kind_of(&doc, &format!("/{bad}")), ResolveErrorKind::InvalidArrayIndexToken);
        }
        assert_eq!(resolve(Node(&doc), "/01").unwrap().0, &json!(20));
        assert_eq!(kind_of(&doc, "/2"), ResolveErrorKind::ArrayIndexOutOfRange);
        assert_eq!(
            kind_of(&doc, "/99999999999999999999999999"),
            ResolveErrorKind::ArrayIndexOutOfRange
        );
    }

    #[test]
    fn object_keys_are_not_index_checked() {
        let doc = json!({"-": 1, "0": 2});
        assert_eq!(resolve(Node(&doc), "/-").unwrap().0, &json!(1));
        assert_eq!(resolve(Node(&doc), "/0").unwrap().0, &json!(2));
    }

    #[test]
    fn every_scalar_rejects_descent() {
        for scalar in [json!(null), json!(true), json!(1.5), json!(""), json!("s")] {
            let doc = json!({ "v": scalar });
            assert_eq!(kind_of(&doc, "/v/x"), ResolveErrorKind::NonContainerNavigation);
        }
    }

    #[test]
    fn failure_reports_index_and_decoded_token() {
        let doc = json!({"a": {"b": 1}});
        let err = resolve(Node(&doc), "//a/c~1d").unwrap_err();
        assert_eq!(err.pointer, "//a/c~1d");
        assert_eq!(err.token_index, 1);
        assert_eq!(err.token, "c/d");
        assert_eq!(err.reason, ResolveErrorKind::MissingMember);
    }

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-z]{0,8}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,3}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        /// Resolving twice against an unmodified document gives equal results.
        #[test]
        fn resolution_is_idempotent(doc in json_value(), pointer in "(/[a-z0-3]{1,3}){0,3}") {
            let first = resolve(Node(&doc), &pointer);
            let second = resolve(Node(&doc), &pointer);
            match (first, second) {
                (Ok(a), Ok(b)) => prop_assert!(a.structurally_eq(&b)),
                (Err(a), Err(b)) => prop_assert_eq!(a, b),
                _ => prop_assert!(false, "outcomes diverged"),
            }
        }

        /// Separator-only pointers always yield the root.
        #[test]
        fn separators_yield_root(doc in json_value(), n in 0usize..5) {
            let pointer = "/".repeat(n);
            let found = resolve(Node(&doc), &pointer).unwrap();
            prop_assert!(std::ptr::eq(found.0, &doc));
        }

        /// Any failure points at a token that exists.
        #[test]
        fn failing_index_is_in_bounds(doc in json_value(), pointer in "(/[a-z0-3-]{1,3}){1,4}") {
            if let Err(e) = resolve(Node(&doc), &pointer) {
                prop_assert!(e.token_index < JsonPointer::parse(&pointer).len());
            }
        }
    }
}
