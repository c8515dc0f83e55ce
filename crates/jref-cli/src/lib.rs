//! # jref-cli — Command-Line Interface
//!
//! Thin clap front end over the `jref` crates.
//!
//! ## Subcommands
//!
//! - `tokens` — show the decoded tokens of a pointer
//! - `resolve` — resolve a pointer against a JSON or YAML document
//! - `compose` — inline every `$ref` of a schema
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handlers delegate to `jref-core`, `jref-adapters` and `jref-schema`.
//! - Handlers return a process exit code: `0` on success, `2` when a pointer
//!   or reference does not resolve. Operational failures (unreadable files,
//!   malformed documents) are errors and exit with `1`.

pub mod compose;
pub mod pointer;
