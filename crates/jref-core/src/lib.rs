//! # jref-core — JSON Pointer Resolution Core
//!
//! Read-only structural navigation of JSON-like documents by pointer, and
//! the cycle guard that keeps `$ref` composition from recursing forever.
//!
//! ## Components
//!
//! - [`adapter`] — the [`DocumentAdapter`] capability contract. The core
//!   reaches documents only through it.
//! - [`pointer`] — the lenient tokenizer. Empty segments are dropped at any
//!   position and escapes decode `~1` before `~0`.
//! - [`resolve`] — walks a document token by token and returns a view into
//!   it, or a [`ResolveError`] naming the pointer and the failing token.
//! - [`guard`] — [`CycleGuard`], a push/pop set of in-progress reference
//!   identifiers that turns a cyclic `$ref` chain into a
//!   [`CircularReference`] error.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jref-*` crates (this is the leaf of the DAG).
//! - No concrete document representation. Adapters live in `jref-adapters`.
//! - No I/O, no logging, no global state.
//! - No `unsafe` code. No `panic!()` or `.unwrap()` outside tests.
//! - Failures are returned as `Result` values and never swallowed.

pub mod adapter;
pub mod error;
pub mod guard;
pub mod pointer;
pub mod resolve;

// Re-export primary types for ergonomic imports.
pub use adapter::{DocumentAdapter, NodeKind};
pub use error::{CircularReference, JrefError, ResolveError, ResolveErrorKind};
pub use guard::CycleGuard;
pub use pointer::{decode_token, tokenize, JsonPointer};
pub use resolve::{resolve, resolve_pointer};
