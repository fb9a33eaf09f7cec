//! The type registry: vocabulary type name → entity kind.
//!
//! A [`Registry`] is assembled once through [`RegistryBuilder`] and is
//! read-only afterwards, so it can be shared by reference (or in an `Arc`)
//! across any number of decode calls without locking.
//!
//! Besides entity kinds, a registry carries the [`ScalarAdapter`] used for
//! each primitive kind. The built-in adapters in [`crate::scalar`] apply
//! unless the builder was given an override.

use std::collections::HashMap;

use serde_json::Value as Json;
use tracing::{debug, warn};

use crate::codec::{type_names, TYPE_KEY};
use crate::entity::Entity;
use crate::error::DecodeError;
use crate::scalar::{self, ScalarAdapter};
use crate::schema::{Category, EntityKind, Kind};
use crate::vocab;

/// Lookup tables for object-category and link-category entity kinds, and
/// for scalar adapter overrides.
///
/// `Registry::default()` is empty and uses the built-in adapters.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    objects: HashMap<&'static str, &'static EntityKind>,
    links: HashMap<&'static str, &'static EntityKind>,
    adapters: HashMap<Kind, &'static dyn ScalarAdapter>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// A registry holding every ActivityStreams core type.
    pub fn activity_streams() -> Self {
        Self::builder().register_all(vocab::ALL).build()
    }

    /// The object-category kind registered under `name`.
    pub fn resolve_object_kind(&self, name: &str) -> Option<&'static EntityKind> {
        self.objects.get(name).copied()
    }

    /// The link-category kind registered under `name`.
    pub fn resolve_link_kind(&self, name: &str) -> Option<&'static EntityKind> {
        self.links.get(name).copied()
    }

    /// A fresh, empty object-category entity for `name`.
    pub fn instantiate_object(&self, name: &str) -> Option<Entity> {
        self.resolve_object_kind(name).map(Entity::new)
    }

    /// A fresh, empty link-category entity for `name`.
    pub fn instantiate_link(&self, name: &str) -> Option<Entity> {
        self.resolve_link_kind(name).map(Entity::new)
    }

    /// The adapter for a primitive kind: the registered override if there
    /// is one, otherwise the built-in.
    pub fn adapter(&self, kind: Kind) -> Option<&'static dyn ScalarAdapter> {
        self.adapters
            .get(&kind)
            .copied()
            .or_else(|| scalar::builtin(kind))
    }

    /// Number of registered kinds across both categories.
    pub fn len(&self) -> usize {
        self.objects.len() + self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.links.is_empty()
    }

    /// Decode a top-level document, choosing its kind from its own `type`.
    ///
    /// Each type name is tried against the object kinds first, then
    /// against the link kinds; the first hit wins.
    ///
    /// # Errors
    ///
    /// [`DecodeError::NotAnObject`], [`DecodeError::MissingType`],
    /// [`DecodeError::InvalidTypeField`] and
    /// [`DecodeError::UnregisteredType`] for documents that cannot be
    /// resolved to a kind, plus any error from [`Entity::decode`].
    pub fn decode(&self, doc: &Json) -> Result<Entity, DecodeError> {
        let map = doc.as_object().ok_or(DecodeError::NotAnObject)?;
        let declared = map.get(TYPE_KEY).ok_or(DecodeError::MissingType)?;
        let names =
            type_names(declared).ok_or_else(|| DecodeError::InvalidTypeField(declared.clone()))?;

        let kind = names
            .iter()
            .find_map(|n| self.resolve_object_kind(n))
            .or_else(|| names.iter().find_map(|n| self.resolve_link_kind(n)))
            .ok_or_else(|| DecodeError::UnregisteredType(names.clone()))?;

        debug!(kind = kind.name, "decoding document");
        Entity::decode(kind, map, self)
    }

    /// Parse `json` and decode it with [`Registry::decode`].
    pub fn decode_str(&self, json: &str) -> Result<Entity, DecodeError> {
        let doc: Json = serde_json::from_str(json).map_err(|e| DecodeError::Json(e.to_string()))?;
        self.decode(&doc)
    }
}

/// Collects entity kinds before the registry is frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    /// Register `kind` under its canonical name in its category's table.
    /// A later registration under the same name replaces the earlier one.
    pub fn register(mut self, kind: &'static EntityKind) -> Self {
        let table = match kind.category {
            Category::Object => &mut self.registry.objects,
            Category::Link => &mut self.registry.links,
        };
        table.insert(kind.name, kind);
        self
    }

    pub fn register_all(self, kinds: &[&'static EntityKind]) -> Self {
        kinds.iter().fold(self, |b, k| b.register(*k))
    }

    /// Use `adapter` for its [`ScalarAdapter::kind`] instead of the
    /// built-in. Entity kinds and `Unknown` have no adapter and are ignored.
    pub fn adapter(mut self, adapter: &'static dyn ScalarAdapter) -> Self {
        let kind = adapter.kind();
        if kind.is_entity() || kind == Kind::Unknown {
            warn!(%kind, "ignoring scalar adapter for a non-scalar kind");
            return self;
        }
        self.registry.adapters.insert(kind, adapter);
        self
    }

    pub fn build(self) -> Registry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn categories_are_separate() {
        let r = Registry::activity_streams();
        assert!(r.resolve_object_kind("Note").is_some());
        assert!(r.resolve_link_kind("Note").is_none());
        assert!(r.resolve_link_kind("Mention").is_some());
        assert!(r.resolve_object_kind("Mention").is_none());
        assert!(r.resolve_object_kind("x:Widget").is_none());
    }

    #[test]
    fn instantiate_returns_empty_entities() {
        let r = Registry::activity_streams();
        let c = r.instantiate_object("OrderedCollection").unwrap();
        assert_eq!(c.kind().name, "OrderedCollection");
        assert_eq!(c.populated_slots().count(), 0);
        assert!(r.instantiate_link("Link").is_some());
    }

    #[test]
    fn builder_composes_subsets() {
        let r = Registry::builder().register(&vocab::NOTE).build();
        assert_eq!(r.len(), 1);
        let raw = json!({"type": "Collection", "items": {"type": "Note"}});
        assert_eq!(r.decode(&raw), Err(DecodeError::UnregisteredType(vec!["Collection".into()])));
    }

    #[test]
    fn nested_kinds_use_the_same_registry() {
        // Without Note registered, the nested document stays raw.
        let r = Registry::builder().register(&vocab::COLLECTION).build();
        let raw = json!({"type": "Collection", "items": {"type": "Note", "content": "hi"}});
        let e = r.decode(&raw).unwrap();
        let items = e.non_functional("items").unwrap();
        assert!(items.union_box(0).unwrap().unknown().is_some());
    }

    #[test]
    fn top_level_shape_errors() {
        let r = Registry::activity_streams();
        assert_eq!(r.decode(&json!([1])), Err(DecodeError::NotAnObject));
        assert_eq!(r.decode(&json!({"id": "x"})), Err(DecodeError::MissingType));
        assert!(matches!(r.decode_str("{"), Err(DecodeError::Json(_))));
    }

    /// Reads `duration` as a number of seconds, as some servers send it.
    struct SecondsDuration;

    impl ScalarAdapter for SecondsDuration {
        fn kind(&self) -> Kind {
            Kind::Duration
        }

        fn decode(&self, raw: &Json) -> Result<crate::Value, scalar::AdapterError> {
            let seconds = raw.as_u64().ok_or(scalar::AdapterError::Mismatch)?;
            Ok(crate::Value::Duration(crate::IsoDuration {
                seconds: seconds as f64,
                ..Default::default()
            }))
        }

        fn encode(
            &self,
            _: &'static crate::PropertyDef,
            value: &crate::Value,
        ) -> Result<Json, crate::EncodeError> {
            Ok(value
                .as_duration()
                .and_then(|d| d.to_time_delta())
                .map_or(Json::Null, |t| Json::from(t.num_seconds())))
        }
    }

    #[test]
    fn adapter_override_replaces_builtin() {
        let doc = json!({"type": "Video", "duration": 90});

        let plain = Registry::activity_streams();
        let video = plain.decode(&doc).unwrap();
        assert!(video.functional("duration").unwrap().has_unknown());

        let r = Registry::builder()
            .register_all(vocab::ALL)
            .adapter(&SecondsDuration)
            .build();
        let video = r.decode(&doc).unwrap();
        let duration = video.functional("duration").unwrap();
        assert_eq!(
            duration.get(Kind::Duration).and_then(|v| v.as_duration()).map(|d| d.seconds),
            Some(90.0)
        );
        assert_eq!(video.to_json_with(&r).unwrap(), doc);
        // The built-in adapter writes the ISO form.
        assert_eq!(video.to_json().unwrap()["duration"], json!("PT90S"));
    }

    #[test]
    fn non_scalar_adapter_is_ignored() {
        struct Bogus;
        impl ScalarAdapter for Bogus {
            fn kind(&self) -> Kind {
                Kind::Object
            }
            fn decode(&self, _: &Json) -> Result<crate::Value, scalar::AdapterError> {
                Err(scalar::AdapterError::Mismatch)
            }
            fn encode(
                &self,
                _: &'static crate::PropertyDef,
                _: &crate::Value,
            ) -> Result<Json, crate::EncodeError> {
                Ok(Json::Null)
            }
        }
        let r = Registry::builder().adapter(&Bogus).build();
        assert!(r.adapter(Kind::Object).is_none());
        assert_eq!(r.adapter(Kind::Iri).unwrap().kind(), Kind::Iri);
    }

    #[test]
    fn link_kind_decodes_at_top_level() {
        let r = Registry::activity_streams();
        let e = r.decode(&json!({"type": "Mention", "href": "https://example.com/@a"})).unwrap();
        assert_eq!(e.kind().name, "Mention");
    }
}
