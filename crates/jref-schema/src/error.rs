//! # Composition Errors
//!
//! Every failure carries the reference (as written or normalized) that was
//! being processed, so an operator can locate the offending `$ref` without
//! re-running composition.

use jref_core::{CircularReference, ResolveError};
use thiserror::Error;

/// Error while loading schemas or composing references.
#[derive(Error, Debug)]
pub enum ComposeError {
    /// The reference names a document that is not in the registry.
    #[error("unknown document '{document}' for reference '{reference}'")]
    UnknownDocument {
        /// Normalized reference identifier.
        reference: String,
        /// Document URI without fragment.
        document: String,
    },

    /// The document exists but its fragment pointer does not resolve.
    #[error("reference '{reference}' does not resolve: {source}")]
    Resolve {
        /// Normalized reference identifier.
        reference: String,
        /// Pointer failure with the failing token.
        #[source]
        source: ResolveError,
    },

    /// A reference re-entered an expansion already in progress.
    #[error(transparent)]
    Circular(#[from] CircularReference),

    /// Too many nested expansions along one path.
    #[error("reference '{reference}' exceeds the maximum expansion depth of {max_depth}")]
    DepthExceeded {
        /// Reference that would have exceeded the limit.
        reference: String,
        /// Configured limit.
        max_depth: usize,
    },

    /// The reference is not a valid URI reference.
    #[error("invalid reference URI '{reference}': {reason}")]
    InvalidUri {
        /// Reference as written.
        reference: String,
        /// Parser message.
        reason: String,
    },

    /// The fragment is not a JSON pointer (e.g. a plain-name anchor).
    #[error("unsupported fragment '#{fragment}' in reference '{reference}'")]
    UnsupportedFragment {
        /// Reference as written.
        reference: String,
        /// Decoded fragment.
        fragment: String,
    },

    /// A schema or configuration file could not be parsed.
    #[error("load error for '{path}': {reason}")]
    Load {
        /// File that failed to load.
        path: String,
        /// Reason the file could not be loaded.
        reason: String,
    },

    /// IO error reading a schema directory or file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ComposeError {
    /// True for failures caused by a reference target that cannot be found.
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::UnknownDocument { .. } | Self::Resolve { .. })
    }
}
