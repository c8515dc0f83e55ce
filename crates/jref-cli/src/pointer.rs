//! # Pointer Subcommands
//!
//! `jref tokens` prints how a pointer tokenizes. `jref resolve` resolves a
//! pointer against a JSON or YAML document on disk and prints the node as
//! pretty JSON.
//!
//! ## Usage
//!
//! ```bash
//! # Show decoded tokens:
//! jref tokens '/definitions/a~1b//'
//!
//! # Resolve against a document:
//! jref resolve config.yaml /servers/0/host
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use jref_adapters::{JsonAdapter, YamlAdapter};
use jref_core::{resolve_pointer, JsonPointer, ResolveError};
use jref_schema::{document_format, yaml_to_json_value, DocumentFormat};

/// Exit code for a pointer that does not resolve.
pub const EXIT_UNRESOLVED: u8 = 2;

/// Arguments for `jref tokens`.
#[derive(Args, Debug)]
pub struct TokensArgs {
    /// Pointer to tokenize.
    #[arg(allow_hyphen_values = true)]
    pub pointer: String,
}

/// Arguments for `jref resolve`.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// JSON or YAML document (format chosen by extension).
    pub document: PathBuf,

    /// Pointer to resolve. An empty pointer names the document root.
    #[arg(default_value = "", allow_hyphen_values = true)]
    pub pointer: String,

    /// Treat the document as YAML regardless of its extension.
    #[arg(long)]
    pub yaml: bool,
}

/// Execute `jref tokens`.
pub fn run_tokens(args: &TokensArgs) -> Result<u8> {
    let pointer = JsonPointer::parse(&args.pointer);
    println!("{}", serde_json::to_string(pointer.tokens())?);
    Ok(0)
}

/// Execute `jref resolve`.
pub fn run_resolve(args: &ResolveArgs) -> Result<u8> {
    let pointer = JsonPointer::parse(&args.pointer);
    let as_yaml = args.yaml || document_format(&args.document) == Some(DocumentFormat::Yaml);

    let outcome = if as_yaml {
        resolve_yaml(&args.document, &pointer)?
    } else {
        resolve_json(&args.document, &pointer)?
    };

    match outcome {
        Ok(rendered) => {
            println!("{rendered}");
            Ok(0)
        }
        Err(e) => {
            tracing::error!(
                pointer = %e.pointer,
                token_index = e.token_index,
                token = %e.token,
                reason = e.reason.code(),
                "{e}"
            );
            Ok(EXIT_UNRESOLVED)
        }
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

fn resolve_json(path: &Path, pointer: &JsonPointer) -> Result<Result<String, ResolveError>> {
    let document: serde_json::Value = serde_json::from_str(&read(path)?)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;
    tracing::debug!(document = %path.display(), pointer = %pointer, "resolving against JSON");
    match resolve_pointer(JsonAdapter::new(&document), pointer) {
        Ok(node) => Ok(Ok(serde_json::to_string_pretty(node.value())?)),
        Err(e) => Ok(Err(e)),
    }
}

fn resolve_yaml(path: &Path, pointer: &JsonPointer) -> Result<Result<String, ResolveError>> {
    let document: serde_yaml::Value = serde_yaml::from_str(&read(path)?)
        .with_context(|| format!("invalid YAML in {}", path.display()))?;
    tracing::debug!(document = %path.display(), pointer = %pointer, "resolving against YAML");
    match resolve_pointer(YamlAdapter::new(&document), pointer) {
        Ok(node) => {
            let json = yaml_to_json_value(node.value())
                .map_err(|reason| anyhow::anyhow!("cannot render node as JSON: {reason}"))?;
            Ok(Ok(serde_json::to_string_pretty(&json)?))
        }
        Err(e) => Ok(Err(e)),
    }
}
