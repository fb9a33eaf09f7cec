//! Whole-entity encode and decode.
//!
//! Encoding starts from the unknown bag, then writes every populated slot
//! and language map over it, and finally the type list (which always
//! carries the entity's canonical name). Decoding routes each document key
//! to exactly one place: a slot, a slot's language map, the type list, or
//! the unknown bag. `@context` is dropped.

use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::{Map, Value as Json};
use tracing::{debug, trace};

use crate::entity::Entity;
use crate::error::{DecodeError, EncodeError};
use crate::language::LanguageMap;
use crate::registry::Registry;
use crate::schema::EntityKind;
use crate::slot::{NonFunctionalSlot, Slot};
use crate::union::{self, UnionBox};

/// The key carrying an entity's vocabulary type name(s).
pub const TYPE_KEY: &str = "type";

/// The JSON-LD context key. Accepted on decode, never stored or emitted.
pub const CONTEXT_KEY: &str = "@context";

/// Read a `type` field: a string or an array of strings. Anything else
/// yields `None`.
pub(crate) fn type_names(raw: &Json) -> Option<Vec<String>> {
    match raw {
        Json::String(s) => Some(vec![s.clone()]),
        Json::Array(items) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => None,
    }
}

/// Write a list of encoded elements, collapsing a single element to the
/// bare value.
///
/// A lone element that is itself an array or `null` is kept wrapped, since
/// its bare form would decode as a list or as the slot-level sentinel.
fn collapse(mut items: Vec<Json>, keep_list: bool) -> Json {
    if items.len() == 1 && !keep_list && !matches!(items[0], Json::Array(_) | Json::Null) {
        items.remove(0)
    } else {
        Json::Array(items)
    }
}

impl Entity {
    /// Decode `doc` as an entity of `kind`.
    ///
    /// The kind is taken as given; use [`Registry::decode`] to pick it from
    /// the document's own `type`.
    ///
    /// # Errors
    ///
    /// Fails on a malformed scalar (see [`crate::scalar::AdapterError`]), a
    /// failing nested entity, or a `type` field that is neither a string
    /// nor a list of strings. Values that merely match no declared kind are
    /// kept as unknowns instead.
    pub fn decode(
        kind: &'static EntityKind,
        doc: &Map<String, Json>,
        registry: &Registry,
    ) -> Result<Entity, DecodeError> {
        let mut entity = Entity::new(kind);

        for (key, raw) in doc {
            if key == CONTEXT_KEY {
                continue;
            }
            if key == TYPE_KEY {
                entity.types =
                    type_names(raw).ok_or_else(|| DecodeError::InvalidTypeField(raw.clone()))?;
                continue;
            }
            if let Some(index) = entity.slot_index(key) {
                decode_slot(&mut entity.slots[index], raw, registry)?;
                continue;
            }
            if decode_language_map(&mut entity, key, raw) {
                continue;
            }
            trace!(entity = kind.name, key = %key, "key routed to unknown bag");
            entity.unknown.insert(key.clone(), raw.clone());
        }

        Ok(entity)
    }

    /// Encode this entity as a JSON object with the built-in scalar
    /// adapters.
    pub fn to_json(&self) -> Result<Json, EncodeError> {
        self.to_json_with(&Registry::default())
    }

    /// Encode this entity as a JSON object, using `registry`'s scalar
    /// adapters.
    pub fn to_json_with(&self, registry: &Registry) -> Result<Json, EncodeError> {
        self.to_map_with(registry).map(Json::Object)
    }

    /// Encode this entity as a JSON object map with the built-in scalar
    /// adapters.
    pub fn to_map(&self) -> Result<Map<String, Json>, EncodeError> {
        self.to_map_with(&Registry::default())
    }

    pub fn to_map_with(&self, registry: &Registry) -> Result<Map<String, Json>, EncodeError> {
        let mut doc = self.unknown.clone();

        for slot in &self.slots {
            let def = slot.def();
            let encoded = match slot {
                Slot::Functional(s) => s
                    .union_box()
                    .map(|b| union::encode(def, b, registry))
                    .transpose()?,
                Slot::NonFunctional(s) => encode_sequence(s, registry)?,
            };
            if let Some(value) = encoded {
                doc.insert(def.name.to_string(), value);
            }
            if let Some(map) = slot.language_map().filter(|m| !m.is_empty()) {
                doc.insert(def.map_key(), map.to_json());
            }
        }

        let mut types = self.types.clone();
        if !types.iter().any(|t| t == self.kind().name) {
            types.push(self.kind().name.to_string());
        }
        let types = types.into_iter().map(Json::String).collect();
        doc.insert(TYPE_KEY.to_string(), collapse(types, false));

        Ok(doc)
    }
}

fn decode_slot(slot: &mut Slot, raw: &Json, registry: &Registry) -> Result<(), DecodeError> {
    let def = slot.def();
    match slot {
        Slot::Functional(s) => s.set_box(union::decode(def, raw, registry)?),
        Slot::NonFunctional(s) => match raw {
            Json::Null => s.set_unknown(Json::Null),
            Json::Array(items) if items.is_empty() => s.set_unknown(raw.clone()),
            Json::Array(items) => {
                for item in items {
                    s.push_box(union::decode(def, item, registry)?);
                }
                s.from_list = true;
            }
            single => s.push_box(union::decode(def, single, registry)?),
        },
    }
    Ok(())
}

/// Route `<name>Map` keys to the matching slot's language map. Returns
/// `false` if the key is not a language map this entity declares, or the
/// value is not a map of strings (it then goes to the unknown bag).
fn decode_language_map(entity: &mut Entity, key: &str, raw: &Json) -> bool {
    let Some(base) = key.strip_suffix("Map") else {
        return false;
    };
    let Some(index) = entity.slot_index(base) else {
        return false;
    };
    let Some(target) = entity.slots[index].language_map_mut() else {
        return false;
    };
    match LanguageMap::from_json(raw) {
        Some(parsed) => {
            *target = parsed;
            true
        }
        None => {
            debug!(key = %key, "language map is not an object of strings");
            false
        }
    }
}

fn encode_sequence(
    slot: &NonFunctionalSlot,
    registry: &Registry,
) -> Result<Option<Json>, EncodeError> {
    if slot.len() == 0 {
        return Ok(slot.unknown().cloned());
    }
    let items = slot
        .iter()
        .map(|b: &UnionBox| union::encode(slot.def(), b, registry))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(collapse(items, slot.from_list)))
}

/// Serializes through [`Entity::to_map`] (built-in adapters); encode errors
/// surface as the serializer's custom error.
impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}
