//! # jref-adapters — Concrete Document Adapters
//!
//! Binds the [`jref_core::DocumentAdapter`] contract to the JSON
//! representations used across the workspace:
//!
//! - [`JsonAdapter`] over `serde_json::Value`.
//! - [`YamlAdapter`] over `serde_yaml::Value`.
//!
//! Both are `Copy` views holding a single reference. They are `Send + Sync`
//! because the values they borrow are, so independent resolutions against
//! one immutable document may run on separate threads.
//!
//! ## Crate Policy
//!
//! - Depends only on `jref-core` internally.
//! - Adapters never allocate or clone document content.

pub mod json;
pub mod yaml;

pub use json::JsonAdapter;
pub use yaml::YamlAdapter;
