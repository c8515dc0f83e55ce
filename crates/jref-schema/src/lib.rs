//! # jref-schema — Cycle-Safe `$ref` Composition
//!
//! Builds self-contained schemas by inlining `$ref` targets, using the
//! pointer resolver and cycle guard from `jref-core`.
//!
//! ## Modules
//!
//! - [`ref_id`] — [`RefId`], the normalized form of a reference: absolute
//!   document URI plus decoded fragment pointer.
//! - [`registry`] — [`SchemaRegistry`], the local URI → document map. Loads
//!   JSON and YAML schema directories. Never fetches remote documents.
//! - [`compose`] — [`SchemaComposer`], which walks a schema and replaces
//!   every string `$ref` with its composed target. Cyclic chains fail with
//!   the full identifier chain; diamond reuse succeeds.
//! - [`config`] — [`ComposerConfig`]: expansion depth limit and handling of
//!   unresolved references.
//!
//! ## Crate Policy
//!
//! - Depends only on `jref-core` and `jref-adapters` internally.
//! - One [`jref_core::CycleGuard`] per top-level composition call. Guards
//!   are never shared between calls.
//! - Unresolved references abort composition unless configured otherwise.
//!   Circular references always abort.

pub mod compose;
pub mod config;
pub mod error;
pub mod ref_id;
pub mod registry;

pub use compose::{SchemaComposer, DATA_KEYWORDS, REF_KEYWORD};
pub use config::{ComposerConfig, UnresolvedPolicy, DEFAULT_MAX_DEPTH};
pub use error::ComposeError;
pub use ref_id::RefId;
pub use registry::{
    document_format, file_uri, load_document, yaml_to_json_value, DocumentFormat, SchemaRegistry,
};
