//! # Reference Identifiers
//!
//! A `$ref` value is a URI reference, optionally with a fragment holding a
//! JSON pointer. [`RefId`] is its normalized form: the absolute document URI
//! (fragment removed) plus the parsed, percent-decoded pointer.
//!
//! Normalization makes cycle detection insensitive to spelling. `#/a/`,
//! `#/a` and `doc.json#//a` seen from inside `doc.json` are one identifier.

use std::borrow::Cow;
use std::fmt;

use jref_core::JsonPointer;
use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::ComposeError;

/// Normalized `$ref` target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefId {
    document: Url,
    pointer: JsonPointer,
}

impl RefId {
    /// Resolve `reference` against `base` and split off the fragment pointer.
    ///
    /// # Errors
    ///
    /// - [`ComposeError::InvalidUri`] if the reference cannot be joined to the
    ///   base or its fragment is not valid UTF-8 once decoded.
    /// - [`ComposeError::UnsupportedFragment`] if the fragment is non-empty and
    ///   does not start with `/` (plain-name anchors are not supported).
    pub fn parse(reference: &str, base: &Url) -> Result<Self, ComposeError> {
        let mut document = base.join(reference).map_err(|e| ComposeError::InvalidUri {
            reference: reference.to_string(),
            reason: e.to_string(),
        })?;

        let fragment = match document.fragment() {
            Some(raw) => percent_decode_str(raw)
                .decode_utf8()
                .map(Cow::into_owned)
                .map_err(|e| ComposeError::InvalidUri {
                    reference: reference.to_string(),
                    reason: format!("fragment is not UTF-8: {e}"),
                })?,
            None => String::new(),
        };
        document.set_fragment(None);

        if !fragment.is_empty() && !fragment.starts_with('/') {
            return Err(ComposeError::UnsupportedFragment {
                reference: reference.to_string(),
                fragment,
            });
        }

        Ok(Self {
            document,
            pointer: JsonPointer::parse(&fragment),
        })
    }

    /// Identifier for an already parsed pointer into `document`. Any fragment
    /// on `document` is dropped; the pointer is taken as is, with no
    /// percent-decoding.
    pub fn new(mut document: Url, pointer: JsonPointer) -> Self {
        document.set_fragment(None);
        Self { document, pointer }
    }

    /// Identifier for the root of a document.
    pub fn document_root(document: Url) -> Self {
        Self::new(document, JsonPointer::root())
    }

    /// Absolute document URI, without fragment.
    pub fn document(&self) -> &Url {
        &self.document
    }

    /// Pointer into the document.
    pub fn pointer(&self) -> &JsonPointer {
        &self.pointer
    }
}

impl fmt::Display for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.document, self.pointer)
    }
}
