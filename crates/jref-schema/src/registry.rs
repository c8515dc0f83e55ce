//! # Schema Registry
//!
//! In-memory map from absolute document URI to parsed schema document. The
//! composer looks up every `$ref` target here. Nothing is ever fetched over
//! the network: a reference to an unregistered document is an error.
//!
//! ## Registration
//!
//! A document is registered under the URI it was inserted with and, when it
//! declares one, under its top-level `$id` (or draft-4 `id`). A relative
//! `$id` is resolved against the insertion URI.
//!
//! [`SchemaRegistry::load_dir`] registers every `*.json`, `*.yaml` and
//! `*.yml` file of a directory under its `file://` URI. YAML documents are
//! converted to JSON values on load.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use url::Url;

use crate::error::ComposeError;

/// Keywords that declare a schema's own URI.
pub(crate) const ID_KEYWORDS: [&str; 2] = ["$id", "id"];

/// Registered schema documents keyed by document URI.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    documents: HashMap<Url, Value>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `document` under the absolute URI `uri`.
    ///
    /// Any fragment on `uri` is dropped. Returns the URI the document was
    /// registered under.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::InvalidUri`] if `uri` is not absolute, or if the
    /// document's own `$id` cannot be resolved against it.
    pub fn insert(&mut self, uri: &str, document: Value) -> Result<Url, ComposeError> {
        let mut url = Url::parse(uri).map_err(|e| ComposeError::InvalidUri {
            reference: uri.to_string(),
            reason: e.to_string(),
        })?;
        url.set_fragment(None);
        self.insert_url(url.clone(), document)?;
        Ok(url)
    }

    fn insert_url(&mut self, url: Url, document: Value) -> Result<(), ComposeError> {
        if let Some(id) = declared_id(&document) {
            let mut alias = url.join(id).map_err(|e| ComposeError::InvalidUri {
                reference: id.to_string(),
                reason: e.to_string(),
            })?;
            alias.set_fragment(None);
            if alias != url {
                tracing::debug!(uri = %url, alias = %alias, "registering schema alias");
                self.documents.insert(alias, document.clone());
            }
        }
        self.documents.insert(url, document);
        Ok(())
    }

    /// Load every JSON/YAML file in `dir` (non-recursive).
    ///
    /// Returns the file URIs registered, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Load`] if a file cannot be parsed, and
    /// [`ComposeError::Io`] if the directory cannot be read.
    pub fn load_dir(&mut self, dir: &Path) -> Result<Vec<Url>, ComposeError> {
        let entries = std::fs::read_dir(dir).map_err(|e| ComposeError::Load {
            path: dir.display().to_string(),
            reason: format!("cannot read schema directory: {e}"),
        })?;

        let mut loaded = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || document_format(&path).is_none() {
                continue;
            }
            let url = file_uri(&path)?;
            let document = load_document(&path)?;
            self.insert_url(url.clone(), document)?;
            loaded.push(url);
        }
        loaded.sort();
        tracing::info!(dir = %dir.display(), count = loaded.len(), "loaded schema directory");
        Ok(loaded)
    }

    /// Look up a document by URI (fragment ignored).
    pub fn get(&self, uri: &Url) -> Option<&Value> {
        if uri.fragment().is_some() {
            let mut bare = uri.clone();
            bare.set_fragment(None);
            return self.documents.get(&bare);
        }
        self.documents.get(uri)
    }

    /// Returns true if a document is registered under `uri`.
    pub fn contains(&self, uri: &Url) -> bool {
        self.get(uri).is_some()
    }

    /// Number of registered URIs, aliases included.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// All registered URIs, sorted.
    pub fn uris(&self) -> Vec<&Url> {
        let mut uris: Vec<&Url> = self.documents.keys().collect();
        uris.sort();
        uris
    }
}

/// The document's own `$id`/`id`, if it declares one as a string.
pub(crate) fn declared_id(document: &Value) -> Option<&str> {
    let object = document.as_object()?;
    ID_KEYWORDS
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
}

/// Supported on-disk schema formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

/// Format implied by a file extension, if supported.
pub fn document_format(path: &Path) -> Option<DocumentFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Some(DocumentFormat::Json),
        Some("yaml" | "yml") => Some(DocumentFormat::Yaml),
        _ => None,
    }
}

/// Absolute `file://` URI for a path on disk.
///
/// # Errors
///
/// Returns [`ComposeError::Io`] if the path cannot be canonicalized and
/// [`ComposeError::InvalidUri`] if it has no URI form.
pub fn file_uri(path: &Path) -> Result<Url, ComposeError> {
    let canonical = path.canonicalize()?;
    Url::from_file_path(&canonical).map_err(|()| ComposeError::InvalidUri {
        reference: canonical.display().to_string(),
        reason: "path has no file URI form".to_string(),
    })
}

/// Read and parse a JSON or YAML document, choosing the format by extension.
/// Unknown extensions are parsed as JSON.
///
/// # Errors
///
/// Returns [`ComposeError::Load`] if the file cannot be read or parsed.
pub fn load_document(path: &Path) -> Result<Value, ComposeError> {
    let load_err = |reason: String| ComposeError::Load {
        path: path.display().to_string(),
        reason,
    };
    let content =
        std::fs::read_to_string(path).map_err(|e| load_err(format!("cannot read file: {e}")))?;

    match document_format(path) {
        Some(DocumentFormat::Yaml) => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
                .map_err(|e| load_err(format!("invalid YAML: {e}")))?;
            yaml_to_json_value(&yaml)
                .map_err(|e| load_err(format!("YAML-to-JSON conversion failed: {e}")))
        }
        Some(DocumentFormat::Json) | None => {
            serde_json::from_str(&content).map_err(|e| load_err(format!("invalid JSON: {e}")))
        }
    }
}

/// Convert a `serde_yaml::Value` into the equivalent `serde_json::Value`.
///
/// Tags are dropped. Scalar mapping keys are rendered as strings; any other
/// key, or a float JSON cannot hold, is an error.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::Number(n) => Value::Number(json_number(n)?),
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Sequence(items) => Value::Array(
            items
                .iter()
                .map(yaml_to_json_value)
                .collect::<Result<Vec<_>, String>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = serde_json::Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                object.insert(mapping_key(key)?, yaml_to_json_value(value)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json_value(&tagged.value)?,
    })
}

fn json_number(n: &serde_yaml::Number) -> Result<serde_json::Number, String> {
    if let Some(i) = n.as_i64() {
        return Ok(i.into());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.into());
    }
    n.as_f64()
        .and_then(serde_json::Number::from_f64)
        .ok_or_else(|| format!("YAML number {n} has no JSON form"))
}

fn mapping_key(key: &serde_yaml::Value) -> Result<String, String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Tagged(tagged) => mapping_key(&tagged.value),
        other => Err(format!("mapping key {other:?} has no JSON form")),
    }
}
