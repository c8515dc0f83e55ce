//! # Compose Subcommand
//!
//! Inlines every `$ref` of a schema and prints the self-contained result.
//!
//! ## Usage
//!
//! ```bash
//! # Compose a schema, resolving references among its sibling files:
//! jref compose schemas/zone.schema.json
//!
//! # Use a different schema directory and keep unresolved references:
//! jref compose zone.json --schema-dir vendor/schemas --preserve-unresolved
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use jref_core::JsonPointer;
use jref_schema::{
    file_uri, ComposeError, ComposerConfig, RefId, SchemaComposer, SchemaRegistry,
    UnresolvedPolicy,
};

/// Exit code for a schema whose references cannot be composed.
pub const EXIT_COMPOSE_FAILED: u8 = 2;

/// Arguments for `jref compose`.
#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Schema file to compose (JSON or YAML).
    pub schema: PathBuf,

    /// Directory of schemas available to `$ref`. Defaults to the schema's directory.
    #[arg(long)]
    pub schema_dir: Option<PathBuf>,

    /// Optional pointer into the schema to compose instead of its root.
    #[arg(long, allow_hyphen_values = true)]
    pub pointer: Option<String>,

    /// Maximum nested `$ref` expansions along one path.
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Keep references whose target cannot be found instead of failing.
    #[arg(long)]
    pub preserve_unresolved: bool,
}

/// Build the effective configuration: file (if any), then flag overrides.
pub fn effective_config(args: &ComposeArgs, config_file: Option<&PathBuf>) -> Result<ComposerConfig> {
    let mut config = match config_file {
        Some(path) => ComposerConfig::from_yaml_file(path)?,
        None => ComposerConfig::default(),
    };
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }
    if args.preserve_unresolved {
        config.unresolved = UnresolvedPolicy::Preserve;
    }
    Ok(config)
}

/// Execute `jref compose`.
pub fn run_compose(args: &ComposeArgs, config_file: Option<&PathBuf>) -> Result<u8> {
    let config = effective_config(args, config_file)?;
    tracing::debug!(?config, "composer configuration");

    let schema_dir = match &args.schema_dir {
        Some(dir) => dir.clone(),
        None => args
            .schema
            .parent()
            .map(|p| if p.as_os_str().is_empty() { PathBuf::from(".") } else { p.to_path_buf() })
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    let mut registry = SchemaRegistry::new();
    registry
        .load_dir(&schema_dir)
        .with_context(|| format!("cannot load schemas from {}", schema_dir.display()))?;

    let uri = file_uri(&args.schema)
        .with_context(|| format!("cannot locate schema {}", args.schema.display()))?;
    if !registry.contains(&uri) {
        let document = jref_schema::load_document(&args.schema)?;
        registry.insert(uri.as_str(), document)?;
    }
    let id = match &args.pointer {
        Some(pointer) => RefId::new(uri, JsonPointer::parse(pointer)),
        None => RefId::document_root(uri),
    };

    let composer = SchemaComposer::new(&registry, config);
    match composer.compose_id(&id) {
        Ok(composed) => {
            println!("{}", serde_json::to_string_pretty(&composed)?);
            Ok(0)
        }
        Err(e @ (ComposeError::Circular(_)
        | ComposeError::Resolve { .. }
        | ComposeError::UnknownDocument { .. }
        | ComposeError::DepthExceeded { .. }
        | ComposeError::UnsupportedFragment { .. }
        | ComposeError::InvalidUri { .. })) => {
            tracing::error!(schema = %args.schema.display(), "{e}");
            Ok(EXIT_COMPOSE_FAILED)
        }
        Err(e) => Err(e.into()),
    }
}
