//! # Composer Configuration
//!
//! Settings for [`SchemaComposer`](crate::SchemaComposer). Every field has a
//! default, so an empty YAML document is a valid configuration.
//!
//! ```yaml
//! max_depth: 32
//! unresolved: preserve
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ComposeError;

/// Default limit on nested `$ref` expansions along one path.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// What to do with a `$ref` whose target cannot be found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPolicy {
    /// Abort composition with the resolution error.
    #[default]
    Fail,
    /// Keep the `$ref` object unexpanded and log a warning.
    Preserve,
}

/// Composer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposerConfig {
    /// Maximum number of nested expansions along one descent path.
    pub max_depth: usize,
    /// Handling of references to missing documents or unresolvable pointers.
    pub unresolved: UnresolvedPolicy,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            unresolved: UnresolvedPolicy::Fail,
        }
    }
}

impl ComposerConfig {
    /// Parse a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Load`] for malformed YAML or unknown fields.
    pub fn from_yaml_str(source: &str) -> Result<Self, ComposeError> {
        // An empty document deserializes as null, not as an empty mapping.
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).map_err(|e| ComposeError::Load {
            path: "<inline>".to_string(),
            reason: format!("invalid composer config: {e}"),
        })
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Load`] if the file cannot be read or parsed.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ComposeError> {
        let content = std::fs::read_to_string(path).map_err(|e| ComposeError::Load {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        })?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            ComposeError::Load { reason, .. } => ComposeError::Load {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }
}
