//! Property slots: multiplicity on top of union boxes.
//!
//! A [`FunctionalSlot`] holds at most one [`UnionBox`]; a
//! [`NonFunctionalSlot`] holds an ordered sequence of them. Either may also
//! own a [`LanguageMap`] when its property declares one.

use std::fmt;

use serde_json::Value as Json;

use crate::error::SchemaError;
use crate::language::LanguageMap;
use crate::schema::{Cardinality, Kind, PropertyDef};
use crate::union::UnionBox;
use crate::value::Value;

/// Reject values whose kind (or, for entities, type) the property does not
/// declare.
fn check(def: &'static PropertyDef, value: &Value) -> Result<(), SchemaError> {
    let accepted = match value.as_entity() {
        Some(entity) => def
            .entity_alternatives(value.kind())
            .any(|a| a.admits(entity.kind().name)),
        None => def.declares(value.kind()),
    };
    if accepted {
        Ok(())
    } else {
        Err(SchemaError::UndeclaredKind {
            property: def.name,
            kind: value.describe(),
        })
    }
}

/// A single-valued property.
#[derive(Clone, PartialEq)]
pub struct FunctionalSlot {
    def: &'static PropertyDef,
    value: Option<UnionBox>,
    language_map: LanguageMap,
}

impl FunctionalSlot {
    pub(crate) fn new(def: &'static PropertyDef) -> Self {
        Self {
            def,
            value: None,
            language_map: LanguageMap::new(),
        }
    }

    pub fn def(&self) -> &'static PropertyDef {
        self.def
    }

    pub fn name(&self) -> &'static str {
        self.def.name
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Whether the slot currently holds a value of `kind`.
    pub fn is_set(&self, kind: Kind) -> bool {
        self.value.as_ref().is_some_and(|b| b.is(kind))
    }

    /// The value, only if it is of `kind`.
    pub fn get(&self, kind: Kind) -> Option<&Value> {
        self.value.as_ref().filter(|b| b.is(kind)).and_then(UnionBox::value)
    }

    /// The value regardless of kind, if it is a known one.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref().and_then(UnionBox::value)
    }

    pub fn value_mut(&mut self) -> Option<&mut Value> {
        self.value.as_mut().and_then(UnionBox::value_mut)
    }

    pub fn union_box(&self) -> Option<&UnionBox> {
        self.value.as_ref()
    }

    /// Replace whatever the slot holds with `value`.
    pub fn set(&mut self, value: Value) -> Result<(), SchemaError> {
        check(self.def, &value)?;
        self.value = Some(UnionBox::Known(value));
        Ok(())
    }

    /// Replace whatever the slot holds with a raw, unresolved value.
    pub fn set_unknown(&mut self, raw: Json) {
        self.value = Some(UnionBox::Unknown(raw));
    }

    pub fn unknown(&self) -> Option<&Json> {
        self.value.as_ref().and_then(UnionBox::unknown)
    }

    pub fn has_unknown(&self) -> bool {
        self.is_set(Kind::Unknown)
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    pub(crate) fn set_box(&mut self, boxed: UnionBox) {
        self.value = Some(boxed);
    }
}

/// A multi-valued property: an ordered sequence of union boxes, duplicates
/// allowed.
///
/// A slot-level sentinel unknown stands in for a raw wire value that is not
/// a sequence of elements at all (`null`, `[]`). It and the element list
/// exclude each other: setting the sentinel drops the elements, adding an
/// element drops the sentinel.
#[derive(Clone)]
pub struct NonFunctionalSlot {
    def: &'static PropertyDef,
    items: Vec<UnionBox>,
    unknown: Option<Json>,
    language_map: LanguageMap,
    /// Decoded from a JSON array; a single element is then re-encoded as a
    /// one-element array instead of collapsing to a bare value.
    pub(crate) from_list: bool,
}

impl NonFunctionalSlot {
    pub(crate) fn new(def: &'static PropertyDef) -> Self {
        Self {
            def,
            items: Vec::new(),
            unknown: None,
            language_map: LanguageMap::new(),
            from_list: false,
        }
    }

    pub fn def(&self) -> &'static PropertyDef {
        self.def
    }

    pub fn name(&self) -> &'static str {
        self.def.name
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// No elements and no sentinel unknown.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.unknown.is_none()
    }

    /// Whether element `index` exists and holds a value of `kind`.
    pub fn is_set(&self, index: usize, kind: Kind) -> bool {
        self.items.get(index).is_some_and(|b| b.is(kind))
    }

    /// Element `index`, only if it holds a value of `kind`.
    pub fn get(&self, index: usize, kind: Kind) -> Option<&Value> {
        self.items
            .get(index)
            .filter(|b| b.is(kind))
            .and_then(UnionBox::value)
    }

    pub fn union_box(&self, index: usize) -> Option<&UnionBox> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnionBox> {
        self.items.iter()
    }

    /// Iterate the known values, skipping per-element unknowns.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.items.iter().filter_map(UnionBox::value)
    }

    pub fn append(&mut self, value: Value) -> Result<(), SchemaError> {
        check(self.def, &value)?;
        self.touch();
        self.items.push(UnionBox::Known(value));
        Ok(())
    }

    pub fn prepend(&mut self, value: Value) -> Result<(), SchemaError> {
        check(self.def, &value)?;
        self.touch();
        self.items.insert(0, UnionBox::Known(value));
        Ok(())
    }

    /// Append a raw, unresolved element.
    pub fn append_unknown(&mut self, raw: Json) {
        self.touch();
        self.items.push(UnionBox::Unknown(raw));
    }

    /// Remove element `index`, keeping the order of the rest.
    pub fn remove_at(&mut self, index: usize) -> Option<UnionBox> {
        if index >= self.items.len() {
            return None;
        }
        self.from_list = false;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.unknown = None;
        self.from_list = false;
    }

    /// Set the slot-level sentinel unknown, dropping all elements.
    pub fn set_unknown(&mut self, raw: Json) {
        self.items.clear();
        self.from_list = false;
        self.unknown = Some(raw);
    }

    pub fn unknown(&self) -> Option<&Json> {
        self.unknown.as_ref()
    }

    pub fn has_unknown(&self) -> bool {
        self.unknown.is_some()
    }

    /// An edited slot no longer mirrors its wire shape: drop the sentinel
    /// and let a single element collapse again.
    fn touch(&mut self) {
        self.unknown = None;
        self.from_list = false;
    }

    pub(crate) fn push_box(&mut self, boxed: UnionBox) {
        self.items.push(boxed);
    }
}

/// Prints the property name and contents, not the property's schema.
impl fmt::Debug for FunctionalSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("FunctionalSlot");
        d.field("name", &self.def.name).field("value", &self.value);
        if !self.language_map.is_empty() {
            d.field("language_map", &self.language_map);
        }
        d.finish()
    }
}

impl fmt::Debug for NonFunctionalSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("NonFunctionalSlot");
        d.field("name", &self.def.name).field("items", &self.items);
        if let Some(raw) = &self.unknown {
            d.field("unknown", raw);
        }
        if !self.language_map.is_empty() {
            d.field("language_map", &self.language_map);
        }
        d.finish()
    }
}

/// Wire shape (`from_list`) is not part of a slot's observable state.
impl PartialEq for NonFunctionalSlot {
    fn eq(&self, other: &Self) -> bool {
        self.def == other.def
            && self.items == other.items
            && self.unknown == other.unknown
            && self.language_map == other.language_map
    }
}

/// A declared property of an entity, of either cardinality.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Functional(FunctionalSlot),
    NonFunctional(NonFunctionalSlot),
}

impl Slot {
    pub(crate) fn new(def: &'static PropertyDef) -> Self {
        match def.cardinality {
            Cardinality::Functional => Slot::Functional(FunctionalSlot::new(def)),
            Cardinality::NonFunctional => Slot::NonFunctional(NonFunctionalSlot::new(def)),
        }
    }

    pub fn def(&self) -> &'static PropertyDef {
        match self {
            Slot::Functional(s) => s.def,
            Slot::NonFunctional(s) => s.def,
        }
    }

    pub fn name(&self) -> &'static str {
        self.def().name
    }

    /// Whether the primary value(s) are empty. The language map is not
    /// considered.
    pub fn is_empty(&self) -> bool {
        match self {
            Slot::Functional(s) => s.is_empty(),
            Slot::NonFunctional(s) => s.is_empty(),
        }
    }

    /// The language map, if the property declares one.
    pub fn language_map(&self) -> Option<&LanguageMap> {
        let map = match self {
            Slot::Functional(s) => &s.language_map,
            Slot::NonFunctional(s) => &s.language_map,
        };
        self.def().language_map.then_some(map)
    }

    pub fn language_map_mut(&mut self) -> Option<&mut LanguageMap> {
        let declared = self.def().language_map;
        let map = match self {
            Slot::Functional(s) => &mut s.language_map,
            Slot::NonFunctional(s) => &mut s.language_map,
        };
        declared.then_some(map)
    }

    pub fn as_functional(&self) -> Option<&FunctionalSlot> {
        match self {
            Slot::Functional(s) => Some(s),
            Slot::NonFunctional(_) => None,
        }
    }

    pub fn as_non_functional(&self) -> Option<&NonFunctionalSlot> {
        match self {
            Slot::NonFunctional(s) => Some(s),
            Slot::Functional(_) => None,
        }
    }

    pub(crate) fn cardinality_label(&self) -> &'static str {
        match self {
            Slot::Functional(_) => "functional",
            Slot::NonFunctional(_) => "non-functional",
        }
    }
}
