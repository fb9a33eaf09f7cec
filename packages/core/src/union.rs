//! The union box: one property occurrence resolved against the property's
//! declared alternatives.
//!
//! Decoding is precedence-ordered trial matching, because the wire format
//! is untyped JSON:
//!
//! 1. A JSON object with a `type` field is matched against the declared
//!    `Object` alternatives first and the `Link` alternatives second, using
//!    the [`Registry`] to turn type names into entity kinds.
//! 2. A JSON object without `type` is kept verbatim.
//! 3. Anything else is offered to each declared scalar kind's adapter, in
//!    order, as supplied by the registry.
//!
//! Whatever matches nothing becomes [`UnionBox::Unknown`].

use serde_json::Value as Json;
use tracing::{debug, trace};

use crate::codec::{type_names, TYPE_KEY};
use crate::entity::Entity;
use crate::error::{DecodeError, EncodeError};
use crate::registry::Registry;
use crate::scalar::AdapterError;
use crate::schema::{Category, Kind, PropertyDef};
use crate::value::Value;

/// One populated alternative of a property, or the raw value that matched
/// none of them.
#[derive(Debug, Clone, PartialEq)]
pub enum UnionBox {
    Known(Value),
    Unknown(Json),
}

impl UnionBox {
    pub fn kind(&self) -> Kind {
        match self {
            UnionBox::Known(v) => v.kind(),
            UnionBox::Unknown(_) => Kind::Unknown,
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            UnionBox::Known(v) => Some(v),
            UnionBox::Unknown(_) => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut Value> {
        match self {
            UnionBox::Known(v) => Some(v),
            UnionBox::Unknown(_) => None,
        }
    }

    pub fn unknown(&self) -> Option<&Json> {
        match self {
            UnionBox::Unknown(raw) => Some(raw),
            UnionBox::Known(_) => None,
        }
    }

    /// Whether this box holds a value of `kind`.
    pub fn is(&self, kind: Kind) -> bool {
        self.kind() == kind
    }
}

/// Resolve one raw wire value against `property`'s alternatives.
pub(crate) fn decode(
    property: &'static PropertyDef,
    raw: &Json,
    registry: &Registry,
) -> Result<UnionBox, DecodeError> {
    match raw {
        Json::Object(doc) => {
            let Some(declared) = doc.get(TYPE_KEY) else {
                debug!(property = property.name, "untyped object kept as unknown");
                return Ok(UnionBox::Unknown(raw.clone()));
            };
            let Some(names) = type_names(declared) else {
                debug!(property = property.name, "unreadable type field kept as unknown");
                return Ok(UnionBox::Unknown(raw.clone()));
            };
            for category in [Category::Object, Category::Link] {
                if let Some(entity) = decode_entity(property, category, &names, doc, registry)? {
                    return Ok(UnionBox::Known(Value::from(entity)));
                }
            }
            debug!(property = property.name, types = ?names, "no declared entity kind matched");
            Ok(UnionBox::Unknown(raw.clone()))
        }
        _ => {
            for kind in property.scalar_kinds() {
                let Some(adapter) = registry.adapter(kind) else {
                    continue;
                };
                match adapter.decode(raw) {
                    Ok(value) => return Ok(UnionBox::Known(value)),
                    Err(AdapterError::Mismatch) => {
                        trace!(property = property.name, %kind, "kind mismatch");
                    }
                    Err(AdapterError::Malformed(message)) => {
                        return Err(DecodeError::Malformed {
                            property: property.name,
                            kind,
                            message,
                        });
                    }
                }
            }
            debug!(property = property.name, "no declared scalar kind matched");
            Ok(UnionBox::Unknown(raw.clone()))
        }
    }
}

/// Try every declared alternative of one category, in declared order,
/// against the document's type names.
fn decode_entity(
    property: &'static PropertyDef,
    category: Category,
    names: &[String],
    doc: &serde_json::Map<String, Json>,
    registry: &Registry,
) -> Result<Option<Entity>, DecodeError> {
    for alternative in property.entity_alternatives(category.kind()) {
        for name in names {
            let resolved = match category {
                Category::Object => registry.resolve_object_kind(name),
                Category::Link => registry.resolve_link_kind(name),
            };
            let Some(kind) = resolved else {
                continue;
            };
            if !alternative.admits(kind.name) {
                trace!(property = property.name, type_name = %name, "type not admitted");
                continue;
            }
            let entity = Entity::decode(kind, doc, registry).map_err(|e| DecodeError::Nested {
                property: property.name,
                source: Box::new(e),
            })?;
            return Ok(Some(entity));
        }
    }
    Ok(None)
}

/// Write a populated box back to its single wire representation.
pub(crate) fn encode(
    property: &'static PropertyDef,
    boxed: &UnionBox,
    registry: &Registry,
) -> Result<Json, EncodeError> {
    match boxed {
        UnionBox::Unknown(raw) => Ok(raw.clone()),
        UnionBox::Known(Value::Object(entity) | Value::Link(entity)) => {
            entity.to_json_with(registry).map_err(|e| EncodeError::Nested {
                property: property.name,
                source: Box::new(e),
            })
        }
        UnionBox::Known(value) => match registry.adapter(value.kind()) {
            Some(adapter) => adapter.encode(property, value),
            None => Ok(Json::Null),
        },
    }
}
