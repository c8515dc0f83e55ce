//! # `$ref` Composition
//!
//! Produces a self-contained schema by replacing every `{"$ref": "..."}`
//! object with the composition of its target.
//!
//! ## Rules
//!
//! - A `$ref` is any object member named `$ref` whose value is a string.
//!   Other members of that object are ignored (draft-7 semantics).
//! - References are resolved against the current base URI. The base starts
//!   as the URI of the document being composed and is rebased by any nested
//!   string `$id`/`id`.
//! - Values of data keywords (`enum`, `const`, `default`, `examples`) are
//!   instances, not schemas, and are copied verbatim. Members of name maps
//!   (`properties`, `definitions`, ...) are schemas whatever their name.
//! - Targets are located with the pointer resolver over a [`JsonAdapter`].
//! - Every expansion runs inside one [`CycleGuard`] owned by the top-level
//!   [`SchemaComposer::compose`] call. A reference that re-enters an
//!   expansion in progress fails with the whole chain. The same target
//!   reached through independent branches is expanded in each branch.

use jref_adapters::JsonAdapter;
use jref_core::{resolve_pointer, CycleGuard};
use serde_json::{Map, Value};
use url::Url;

use crate::config::{ComposerConfig, UnresolvedPolicy};
use crate::error::ComposeError;
use crate::ref_id::RefId;
use crate::registry::{SchemaRegistry, ID_KEYWORDS};

/// Keyword that triggers reference expansion.
pub const REF_KEYWORD: &str = "$ref";

/// Keywords whose values are instance data, never searched for `$ref`.
pub const DATA_KEYWORDS: [&str; 4] = ["enum", "const", "default", "examples"];

/// Keywords whose values map arbitrary names to subschemas.
const NAME_MAP_KEYWORDS: [&str; 5] = [
    "properties",
    "patternProperties",
    "definitions",
    "$defs",
    "dependencies",
];

/// Inlines `$ref` targets from a [`SchemaRegistry`].
#[derive(Debug, Clone)]
pub struct SchemaComposer<'r> {
    registry: &'r SchemaRegistry,
    config: ComposerConfig,
}

impl<'r> SchemaComposer<'r> {
    /// Create a composer over `registry`.
    pub fn new(registry: &'r SchemaRegistry, config: ComposerConfig) -> Self {
        Self { registry, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Compose the schema named by an absolute URI, optionally with a
    /// pointer fragment (`https://example.org/s.json#/definitions/a`).
    ///
    /// # Errors
    ///
    /// Any [`ComposeError`]; see the module documentation.
    pub fn compose(&self, uri: &str) -> Result<Value, ComposeError> {
        let base = Url::parse(uri).map_err(|e| ComposeError::InvalidUri {
            reference: uri.to_string(),
            reason: e.to_string(),
        })?;
        let id = RefId::parse(uri, &base)?;
        self.compose_id(&id)
    }

    /// Compose the target of an already normalized identifier.
    ///
    /// # Errors
    ///
    /// Any [`ComposeError`]; see the module documentation.
    pub fn compose_id(&self, id: &RefId) -> Result<Value, ComposeError> {
        let mut guard = CycleGuard::new();
        let composed = self.expand(id, &mut guard)?;
        tracing::debug!(schema = %id, "composition complete");
        Ok(composed)
    }

    /// Compose a schema value that is not itself registered, resolving its
    /// references against `base`.
    ///
    /// # Errors
    ///
    /// Any [`ComposeError`]; see the module documentation.
    pub fn compose_value(&self, schema: &Value, base: &Url) -> Result<Value, ComposeError> {
        let mut guard = CycleGuard::new();
        self.compose_node(schema, base, &mut guard)
    }

    fn expand(&self, id: &RefId, guard: &mut CycleGuard<RefId>) -> Result<Value, ComposeError> {
        if guard.depth() >= self.config.max_depth {
            return Err(ComposeError::DepthExceeded {
                reference: id.to_string(),
                max_depth: self.config.max_depth,
            });
        }

        guard.expand(id.clone(), |guard| {
            tracing::trace!(reference = %id, depth = guard.depth(), "expanding reference");
            let document =
                self.registry
                    .get(id.document())
                    .ok_or_else(|| ComposeError::UnknownDocument {
                        reference: id.to_string(),
                        document: id.document().to_string(),
                    })?;
            let target = resolve_pointer(JsonAdapter::new(document), id.pointer()).map_err(
                |source| ComposeError::Resolve {
                    reference: id.to_string(),
                    source,
                },
            )?;
            self.compose_node(target.value(), id.document(), guard)
        })
    }

    fn compose_node(
        &self,
        node: &Value,
        base: &Url,
        guard: &mut CycleGuard<RefId>,
    ) -> Result<Value, ComposeError> {
        match node {
            Value::Object(members) => {
                if let Some(Value::String(reference)) = members.get(REF_KEYWORD) {
                    return self.compose_ref(node, reference, base, guard);
                }
                let rebased = rebase(members, base)?;
                let base = rebased.as_ref().unwrap_or(base);
                let mut composed = Map::with_capacity(members.len());
                for (key, value) in members {
                    let value = match (key.as_str(), value) {
                        (k, _) if DATA_KEYWORDS.contains(&k) => value.clone(),
                        (k, Value::Object(named)) if NAME_MAP_KEYWORDS.contains(&k) => {
                            Value::Object(self.compose_named(named, base, guard)?)
                        }
                        _ => self.compose_node(value, base, guard)?,
                    };
                    composed.insert(key.clone(), value);
                }
                Ok(Value::Object(composed))
            }
            Value::Array(items) => items
                .iter()
                .map(|item| self.compose_node(item, base, guard))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            scalar => Ok(scalar.clone()),
        }
    }

    fn compose_named(
        &self,
        named: &Map<String, Value>,
        base: &Url,
        guard: &mut CycleGuard<RefId>,
    ) -> Result<Map<String, Value>, ComposeError> {
        let mut composed = Map::with_capacity(named.len());
        for (name, schema) in named {
            composed.insert(name.clone(), self.compose_node(schema, base, guard)?);
        }
        Ok(composed)
    }

    fn compose_ref(
        &self,
        node: &Value,
        reference: &str,
        base: &Url,
        guard: &mut CycleGuard<RefId>,
    ) -> Result<Value, ComposeError> {
        let ignored = node.as_object().map_or(0, |m| m.len() - 1);
        if ignored > 0 {
            tracing::debug!(reference, ignored, "ignoring keywords alongside $ref");
        }

        let id = RefId::parse(reference, base)?;
        match self.expand(&id, guard) {
            Err(e) if e.is_unresolved() && self.config.unresolved == UnresolvedPolicy::Preserve => {
                tracing::warn!(reference = %id, error = %e, "keeping unresolved reference");
                Ok(node.clone())
            }
            other => other,
        }
    }
}

/// New base URI if this schema object declares a string `$id`/`id`.
fn rebase(members: &Map<String, Value>, base: &Url) -> Result<Option<Url>, ComposeError> {
    let Some(id) = ID_KEYWORDS
        .iter()
        .find_map(|key| members.get(*key).and_then(Value::as_str))
    else {
        return Ok(None);
    };
    let mut rebased = base.join(id).map_err(|e| ComposeError::InvalidUri {
        reference: id.to_string(),
        reason: e.to_string(),
    })?;
    rebased.set_fragment(None);
    Ok(Some(rebased))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ROOT: &str = "https://example.org/root.json";

    fn registry(documents: &[(&str, Value)]) -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        for (uri, document) in documents {
            registry.insert(uri, document.clone()).unwrap();
        }
        registry
    }

    fn compose(registry: &SchemaRegistry, uri: &str) -> Result<Value, ComposeError> {
        SchemaComposer::new(registry, ComposerConfig::default()).compose(uri)
    }

    #[test]
    fn schema_without_refs_is_unchanged() {
        let schema = json!({"type": "object", "properties": {"a": {"type": "string"}}});
        let reg = registry(&[(ROOT, schema.clone())]);
        assert_eq!(compose(&reg, ROOT).unwrap(), schema);
    }

    #[test]
    fn local_definition_is_inlined() {
        let reg = registry(&[(
            ROOT,
            json!({
                "definitions": {"name": {"type": "string"}},
                "properties": {"first": {"$ref": "#/definitions/name"}}
            }),
        )]);
        let composed = compose(&reg, ROOT).unwrap();
        assert_eq!(composed["properties"]["first"], json!({"type": "string"}));
    }

    #[test]
    fn fragment_on_compose_uri_selects_subschema() {
        let reg = registry(&[(ROOT, json!({"definitions": {"x": {"const": 1}}}))]);
        let composed = compose(&reg, "https://example.org/root.json#/definitions/x").unwrap();
        assert_eq!(composed, json!({"const": 1}));
    }

    #[test]
    fn cross_document_reference_uses_target_base() {
        let reg = registry(&[
            (ROOT, json!({"items": {"$ref": "types.json#/int"}})),
            (
                "https://example.org/types.json",
                json!({"int": {"$ref": "#/base"}, "base": {"type": "integer"}}),
            ),
        ]);
        let composed = compose(&reg, ROOT).unwrap();
        assert_eq!(composed["items"], json!({"type": "integer"}));
    }

    #[test]
    fn nested_id_rebases_relative_refs() {
        let reg = registry(&[
            (
                ROOT,
                json!({
                    "properties": {
                        "nested": {
                            "$id": "sub/",
                            "properties": {"leaf": {"$ref": "leaf.json"}}
                        }
                    }
                }),
            ),
            ("https://example.org/sub/leaf.json", json!({"type": "boolean"})),
        ]);
        let composed = compose(&reg, ROOT).unwrap();
        assert_eq!(
            composed["properties"]["nested"]["properties"]["leaf"],
            json!({"type": "boolean"})
        );
    }

    #[test]
    fn sibling_keywords_are_dropped() {
        let reg = registry(&[(
            ROOT,
            json!({"a": {"$ref": "#/b", "description": "ignored"}, "b": {"type": "null"}}),
        )]);
        assert_eq!(compose(&reg, ROOT).unwrap()["a"], json!({"type": "null"}));
    }

    #[test]
    fn non_string_ref_is_ordinary_member() {
        let schema = json!({"properties": {"$ref": {"type": "string"}}});
        let reg = registry(&[(ROOT, schema.clone())]);
        assert_eq!(compose(&reg, ROOT).unwrap(), schema);
    }

    #[test]
    fn data_keywords_are_copied_verbatim() {
        let schema = json!({
            "enum": [{"$ref": "#/x"}],
            "const": {"$ref": "not-a-schema"},
            "default": {"$ref": "#"},
            "examples": [{"$ref": "missing.json"}],
            "x": 5
        });
        let reg = registry(&[(ROOT, schema.clone())]);
        assert_eq!(compose(&reg, ROOT).unwrap(), schema);
    }

    #[test]
    fn properties_named_like_data_keywords_are_schemas() {
        let reg = registry(&[(
            ROOT,
            json!({
                "properties": {"default": {"$ref": "#/definitions/flag"}},
                "definitions": {"flag": {"type": "boolean"}}
            }),
        )]);
        let composed = compose(&reg, ROOT).unwrap();
        assert_eq!(composed["properties"]["default"], json!({"type": "boolean"}));
    }

    #[test]
    fn self_reference_is_circular() {
        let reg = registry(&[(ROOT, json!({"items": {"$ref": "#"}}))]);
        let err = compose(&reg, ROOT).unwrap_err();
        let ComposeError::Circular(cycle) = err else { panic!("expected cycle") };
        assert_eq!(cycle.chain, [format!("{ROOT}#"), format!("{ROOT}#")]);
    }

    #[test]
    fn missing_pointer_target_reports_token() {
        let reg = registry(&[(ROOT, json!({"a": {"$ref": "#/definitions/nope"}, "definitions": {}}))]);
        let err = compose(&reg, ROOT).unwrap_err();
        match err {
            ComposeError::Resolve { source, .. } => {
                assert_eq!(source.token_index, 1);
                assert_eq!(source.token, "nope");
            }
            other => panic!("expected Resolve, got {other}"),
        }
    }

    #[test]
    fn unknown_document_fails_by_default() {
        let reg = registry(&[(ROOT, json!({"$ref": "missing.json"}))]);
        let err = compose(&reg, ROOT).unwrap_err();
        assert!(matches!(err, ComposeError::UnknownDocument { .. }), "{err}");
    }

    #[test]
    fn unresolved_reference_preserved_when_configured() {
        let reg = registry(&[(ROOT, json!({"a": {"$ref": "missing.json"}, "b": {"$ref": "#/c"}, "c": 1}))]);
        let config = ComposerConfig {
            unresolved: UnresolvedPolicy::Preserve,
            ..ComposerConfig::default()
        };
        let composed = SchemaComposer::new(&reg, config).compose(ROOT).unwrap();
        assert_eq!(composed["a"], json!({"$ref": "missing.json"}));
        assert_eq!(composed["b"], json!(1));
    }

    #[test]
    fn cycles_fail_even_when_preserving() {
        let reg = registry(&[(ROOT, json!({"a": {"$ref": "#"}}))]);
        let config = ComposerConfig {
            unresolved: UnresolvedPolicy::Preserve,
            ..ComposerConfig::default()
        };
        let err = SchemaComposer::new(&reg, config).compose(ROOT).unwrap_err();
        assert!(matches!(err, ComposeError::Circular(_)));
    }

    #[test]
    fn depth_limit_stops_long_chains() {
        let reg = registry(&[(
            ROOT,
            json!({"a": {"$ref": "#/b"}, "b": {"$ref": "#/c"}, "c": {"$ref": "#/d"}, "d": true}),
        )]);
        let config = ComposerConfig {
            max_depth: 3,
            ..ComposerConfig::default()
        };
        let err = SchemaComposer::new(&reg, config)
            .compose("https://example.org/root.json#/a")
            .unwrap_err();
        assert!(matches!(err, ComposeError::DepthExceeded { max_depth: 3, .. }), "{err}");

        let config = ComposerConfig {
            max_depth: 4,
            ..ComposerConfig::default()
        };
        let composed = SchemaComposer::new(&reg, config)
            .compose("https://example.org/root.json#/a")
            .unwrap();
        assert_eq!(composed, json!(true));
    }

    #[test]
    fn compose_value_resolves_against_base() {
        let reg = registry(&[("https://example.org/t.json", json!({"type": "string"}))]);
        let composer = SchemaComposer::new(&reg, ComposerConfig::default());
        let base = Url::parse(ROOT).unwrap();
        let composed = composer
            .compose_value(&json!({"items": [{"$ref": "t.json"}]}), &base)
            .unwrap();
        assert_eq!(composed, json!({"items": [{"type": "string"}]}));
    }
}
