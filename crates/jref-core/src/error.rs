//! # Error Types — Resolution and Cycle Failures
//!
//! Defines the failures raised by the pointer resolver and the reference
//! cycle guard. All errors use `thiserror` for derive-based `Display` and
//! `Error` implementations.
//!
//! ## Design
//!
//! - Resolution failures carry the original pointer text, the zero-based
//!   index of the token where navigation diverged, the decoded token itself,
//!   and a reason code.
//! - Circular reference failures carry the full identifier chain from the
//!   first occurrence to the repeat, so the cycle can be reproduced from the
//!   error alone.
//! - Every failure is terminal for the call that raised it. Nothing in this
//!   crate retries or swallows an error.

use std::fmt;

use thiserror::Error;

/// Top-level error type for the pointer core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JrefError {
    /// Pointer navigation failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A reference expansion re-entered itself.
    #[error(transparent)]
    Circular(#[from] CircularReference),
}

/// Why navigation stopped at a particular token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveErrorKind {
    /// The current node is an object without a member named by the token.
    MissingMember,
    /// The current node is a scalar (null, boolean, number or string).
    NonContainerNavigation,
    /// The current node is an array and the token is not a run of decimal digits.
    InvalidArrayIndexToken,
    /// The token is a well-formed index at or past the end of the array.
    ArrayIndexOutOfRange,
}

impl ResolveErrorKind {
    /// Stable reason code used in diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingMember => "missing_member",
            Self::NonContainerNavigation => "non_container_navigation",
            Self::InvalidArrayIndexToken => "invalid_array_index_token",
            Self::ArrayIndexOutOfRange => "array_index_out_of_range",
        }
    }
}

impl fmt::Display for ResolveErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MissingMember => "object has no such member",
            Self::NonContainerNavigation => "cannot descend into a scalar value",
            Self::InvalidArrayIndexToken => "token is not a valid array index",
            Self::ArrayIndexOutOfRange => "array index out of range",
        };
        f.write_str(text)
    }
}

/// Pointer resolution failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot resolve JSON pointer '{pointer}' at token {token_index} ('{token}'): {reason}")]
pub struct ResolveError {
    /// The pointer as originally written.
    pub pointer: String,
    /// Zero-based index of the failing token in the decoded sequence.
    pub token_index: usize,
    /// The decoded token at `token_index`.
    pub token: String,
    /// Reason code.
    pub reason: ResolveErrorKind,
}

/// A reference expansion that is already in progress was requested again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("circular reference: {}", .chain.join(" -> "))]
pub struct CircularReference {
    /// Identifiers from the first occurrence of the repeated reference
    /// through the repeat itself, e.g. `[A, B, A]`.
    pub chain: Vec<String>,
}

impl CircularReference {
    /// The identifier that closed the cycle.
    pub fn repeated(&self) -> Option<&str> {
        self.chain.last().map(String::as_str)
    }
}
