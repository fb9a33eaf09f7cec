//! The entity record: one vocabulary object with its declared slots, its
//! type names, and the unknown-extension bag.

use serde_json::{Map, Value as Json};

use crate::error::SchemaError;
use crate::language::LanguageMap;
use crate::schema::EntityKind;
use crate::slot::{FunctionalSlot, NonFunctionalSlot, Slot};

/// An in-memory vocabulary object (a `Collection`, a `Note`, a `Link`, ...).
///
/// The set of slots is fixed by the entity's [`EntityKind`]. Document keys
/// that match no slot are kept in [`Entity::unknown`] and written back
/// unchanged.
///
/// # Example
///
/// ```rust,ignore
/// use activityweft::{vocab, Entity, Value};
///
/// let mut collection = Entity::new(&vocab::COLLECTION);
/// collection.functional_mut("totalItems")?.set(Value::Integer(5))?;
/// let doc = collection.to_json()?;
/// assert_eq!(doc["type"], "Collection");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    kind: &'static EntityKind,
    pub(crate) types: Vec<String>,
    pub(crate) slots: Vec<Slot>,
    pub(crate) unknown: Map<String, Json>,
}

impl Entity {
    /// Create an empty entity of `kind`. Its type list starts out as the
    /// kind's canonical name.
    pub fn new(kind: &'static EntityKind) -> Self {
        Self {
            kind,
            types: vec![kind.name.to_string()],
            slots: kind.property_defs().map(Slot::new).collect(),
            unknown: Map::new(),
        }
    }

    pub fn kind(&self) -> &'static EntityKind {
        self.kind
    }

    /// Declared type names, in document order. A decoded entity lists
    /// exactly what its `type` field held.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Add a type name unless already present.
    pub fn add_type(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.types.contains(&name) {
            self.types.push(name);
        }
    }

    /// Whether `name` is one of this entity's types, counting the
    /// canonical name even when a decoded list omits it.
    pub fn has_type(&self, name: &str) -> bool {
        self.kind.name == name || self.types.iter().any(|t| t == name)
    }

    /// Document keys with no matching slot, kept verbatim.
    pub fn unknown(&self) -> &Map<String, Json> {
        &self.unknown
    }

    pub fn unknown_mut(&mut self) -> &mut Map<String, Json> {
        &mut self.unknown
    }

    /// All slots in schema order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Slots holding a value or a non-empty language map.
    pub fn populated_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|s| {
            !s.is_empty() || s.language_map().is_some_and(|m| !m.is_empty())
        })
    }

    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.name() == name)
    }

    pub fn slot_mut(&mut self, name: &str) -> Result<&mut Slot, SchemaError> {
        let entity = self.kind.name;
        self.slots
            .iter_mut()
            .find(|s| s.name() == name)
            .ok_or_else(|| SchemaError::UnknownProperty {
                entity,
                property: name.to_string(),
            })
    }

    pub(crate) fn slot_index(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|s| s.name() == name)
    }

    pub fn functional(&self, name: &str) -> Option<&FunctionalSlot> {
        self.slot(name).and_then(Slot::as_functional)
    }

    pub fn non_functional(&self, name: &str) -> Option<&NonFunctionalSlot> {
        self.slot(name).and_then(Slot::as_non_functional)
    }

    /// The functional slot `name`, for modification.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnknownProperty`] if the kind has no such property,
    /// [`SchemaError::WrongCardinality`] if it is non-functional.
    pub fn functional_mut(&mut self, name: &str) -> Result<&mut FunctionalSlot, SchemaError> {
        match self.slot_mut(name)? {
            Slot::Functional(s) => Ok(s),
            other => Err(SchemaError::WrongCardinality {
                property: other.name(),
                expected: "functional",
                actual: other.cardinality_label(),
            }),
        }
    }

    pub fn non_functional_mut(&mut self, name: &str) -> Result<&mut NonFunctionalSlot, SchemaError> {
        match self.slot_mut(name)? {
            Slot::NonFunctional(s) => Ok(s),
            other => Err(SchemaError::WrongCardinality {
                property: other.name(),
                expected: "non-functional",
                actual: other.cardinality_label(),
            }),
        }
    }

    pub fn language_map(&self, name: &str) -> Option<&LanguageMap> {
        self.slot(name).and_then(Slot::language_map)
    }

    pub fn language_map_mut(&mut self, name: &str) -> Result<&mut LanguageMap, SchemaError> {
        let slot = self.slot_mut(name)?;
        let property = slot.name();
        slot.language_map_mut()
            .ok_or(SchemaError::NoLanguageMap(property))
    }

    /// The `id` of this entity, if it is set to an IRI.
    pub fn id(&self) -> Option<&crate::value::Iri> {
        self.functional("id")
            .and_then(|s| s.value())
            .and_then(|v| v.as_iri())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Kind;
    use crate::value::Value;
    use crate::vocab;

    #[test]
    fn new_entity_has_every_declared_slot() {
        let e = Entity::new(&vocab::COLLECTION);
        assert_eq!(e.slots().count(), vocab::COLLECTION.property_defs().count());
        assert_eq!(e.populated_slots().count(), 0);
        assert_eq!(e.types(), ["Collection"]);
        assert!(e.has_type("Collection"));
    }

    #[test]
    fn add_type_appends_once() {
        let mut e = Entity::new(&vocab::COLLECTION);
        e.add_type("x:Archive");
        e.add_type("Collection");
        e.add_type("x:Archive");
        assert_eq!(e.types(), ["Collection", "x:Archive"]);
    }

    #[test]
    fn built_entity_survives_a_round_trip() {
        let registry = crate::registry::Registry::activity_streams();
        let mut e = Entity::new(&vocab::COLLECTION);
        e.functional_mut("totalItems")
            .unwrap()
            .set(Value::Integer(3))
            .unwrap();
        let back = registry.decode(&e.to_json().unwrap()).unwrap();
        assert_eq!(back, e);
        assert_eq!(back.types(), ["Collection"]);
    }

    #[test]
    fn cardinality_is_enforced_by_accessors() {
        let mut e = Entity::new(&vocab::COLLECTION);
        assert!(e.functional_mut("totalItems").is_ok());
        assert!(matches!(
            e.functional_mut("items"),
            Err(SchemaError::WrongCardinality { property: "items", .. })
        ));
        assert!(matches!(
            e.non_functional_mut("nope"),
            Err(SchemaError::UnknownProperty { .. })
        ));
    }

    #[test]
    fn language_map_requires_declaration() {
        let mut e = Entity::new(&vocab::COLLECTION);
        e.language_map_mut("name").unwrap().set("en", "Hello");
        assert_eq!(e.language_map("name").unwrap().get("en"), "Hello");
        assert_eq!(
            e.language_map_mut("totalItems").unwrap_err(),
            SchemaError::NoLanguageMap("totalItems")
        );
    }

    #[test]
    fn id_reads_the_iri() {
        let mut e = Entity::new(&vocab::NOTE);
        e.functional_mut("id")
            .unwrap()
            .set(Value::iri("https://example.com/notes/1").unwrap())
            .unwrap();
        assert_eq!(e.id().unwrap().as_str(), "https://example.com/notes/1");
        assert!(e.functional("id").unwrap().is_set(Kind::Iri));
    }
}
