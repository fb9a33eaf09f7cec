//! Schema declarations: what a property may hold and which properties an
//! entity kind has.
//!
//! Schemas are plain `static` data. A property lists its legal
//! [`Alternative`]s in precedence order; the codec in [`crate::union`]
//! consults that order on both decode and encode. The ActivityStreams
//! tables live in [`crate::vocab`].

use std::fmt;

/// One shape a property value can take on the wire.
///
/// `Unknown` is never declared by a property: it is what a value becomes
/// when none of the declared alternatives match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// An embedded object-category entity (Note, Collection, Person, ...).
    Object,
    /// An embedded link-category entity (Link, Mention).
    Link,
    /// A bare IRI reference.
    Iri,
    PlainString,
    LangString,
    /// A non-negative integer.
    Integer,
    Float,
    Boolean,
    /// An RFC 3339 date-time.
    Timestamp,
    /// An ISO 8601 duration.
    Duration,
    MimeType,
    Unknown,
}

impl Kind {
    /// Whether values of this kind are embedded entities rather than
    /// scalars.
    pub fn is_entity(self) -> bool {
        matches!(self, Kind::Object | Kind::Link)
    }
}

/// Formats the kind as a short lowercase label (e.g. `"iri"`, `"lang-string"`).
impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Kind::Object => "object",
            Kind::Link => "link",
            Kind::Iri => "iri",
            Kind::PlainString => "string",
            Kind::LangString => "lang-string",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Boolean => "boolean",
            Kind::Timestamp => "timestamp",
            Kind::Duration => "duration",
            Kind::MimeType => "mime-type",
            Kind::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Which registry table an entity kind is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Object,
    Link,
}

impl Category {
    /// The [`Kind`] a value of this category is tagged with.
    pub fn kind(self) -> Kind {
        match self {
            Category::Object => Kind::Object,
            Category::Link => Kind::Link,
        }
    }
}

/// One declared alternative of a property.
///
/// For [`Kind::Object`] and [`Kind::Link`], `types` restricts which
/// vocabulary type names are admitted; an empty list admits every
/// registered type of that category. For scalar kinds `types` is unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alternative {
    pub kind: Kind,
    pub types: &'static [&'static str],
}

impl Alternative {
    /// Any registered object-category type.
    pub const fn any_object() -> Self {
        Self { kind: Kind::Object, types: &[] }
    }

    /// Only the listed object-category types.
    pub const fn objects(types: &'static [&'static str]) -> Self {
        Self { kind: Kind::Object, types }
    }

    /// Any registered link-category type.
    pub const fn any_link() -> Self {
        Self { kind: Kind::Link, types: &[] }
    }

    pub const fn scalar(kind: Kind) -> Self {
        Self { kind, types: &[] }
    }

    /// Whether an entity whose kind is named `type_name` satisfies this
    /// alternative.
    pub fn admits(&self, type_name: &str) -> bool {
        self.types.is_empty() || self.types.contains(&type_name)
    }
}

/// Property multiplicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Zero or one value. Never written as a list.
    Functional,
    /// Zero or more ordered values.
    NonFunctional,
}

/// Formats the cardinality as `"functional"` or `"non-functional"`.
impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Functional => f.write_str("functional"),
            Cardinality::NonFunctional => f.write_str("non-functional"),
        }
    }
}

/// Declaration of a single named property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyDef {
    /// Wire name, e.g. `"totalItems"`.
    pub name: &'static str,
    pub cardinality: Cardinality,
    /// Legal alternatives in precedence order.
    pub alternatives: &'static [Alternative],
    /// Whether a sibling `<name>Map` language map is carried.
    pub language_map: bool,
}

impl PropertyDef {
    /// The declared scalar alternatives, in declared order.
    pub fn scalar_kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        self.alternatives
            .iter()
            .map(|a| a.kind)
            .filter(|k| !k.is_entity())
    }

    /// The declared alternatives of one entity kind, in declared order.
    pub fn entity_alternatives(&self, kind: Kind) -> impl Iterator<Item = &Alternative> + '_ {
        self.alternatives.iter().filter(move |a| a.kind == kind)
    }

    /// Whether any declared alternative has the given kind.
    pub fn declares(&self, kind: Kind) -> bool {
        self.alternatives.iter().any(|a| a.kind == kind)
    }

    /// Wire name of the sibling language map, e.g. `"nameMap"`.
    pub fn map_key(&self) -> String {
        format!("{}Map", self.name)
    }
}

/// A vocabulary entity kind: its canonical type name, registry category,
/// and the property groups it is made of.
///
/// Properties are grouped so that shared sets (the `Object` properties,
/// for instance) are declared once and referenced by every subtype.
pub struct EntityKind {
    pub name: &'static str,
    pub category: Category,
    pub properties: &'static [&'static [PropertyDef]],
}

impl EntityKind {
    /// All declared properties, group by group, in declaration order.
    pub fn property_defs(&self) -> impl Iterator<Item = &'static PropertyDef> {
        let groups: &'static [&'static [PropertyDef]] = self.properties;
        groups.iter().copied().flatten()
    }

    /// Look up a property declaration by wire name.
    pub fn property(&self, name: &str) -> Option<&'static PropertyDef> {
        self.property_defs().find(|p| p.name == name)
    }
}

/// Prints only the kind's name; the full property table is noise in
/// debug output of every entity.
impl fmt::Debug for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityKind")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// Kinds are identified by name and category.
impl PartialEq for EntityKind {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.category == other.category
    }
}
