//! ActivityStreams 2.0 core vocabulary declared as schema data.
//!
//! Each entity kind is a `static` [`EntityKind`] assembled from shared
//! property groups. Alternative order within a property is significant:
//! it is the trial order on decode (see [`crate::union`]).
//!
//! Property ranges follow the ActivityStreams vocabulary
//! (<https://www.w3.org/TR/activitystreams-vocabulary/>); `sensitive` is
//! the widely deployed `as:sensitive` extension.

use crate::schema::{Alternative, Cardinality, Category, EntityKind, Kind, PropertyDef};

// --- alternative lists -------------------------------------------------------

const COLLECTIONS: &[&str] = &[
    "Collection",
    "OrderedCollection",
    "CollectionPage",
    "OrderedCollectionPage",
];
const PAGES: &[&str] = &["CollectionPage", "OrderedCollectionPage"];
const ORDERED: &[&str] = &["OrderedCollection", "OrderedCollectionPage"];

/// Embedded object, embedded link, or bare IRI.
const REFERENCE: &[Alternative] = &[
    Alternative::any_object(),
    Alternative::any_link(),
    Alternative::scalar(Kind::Iri),
];

/// Natural-language text, or an IRI pointing at it.
const TEXT: &[Alternative] = &[
    Alternative::scalar(Kind::PlainString),
    Alternative::scalar(Kind::LangString),
    Alternative::scalar(Kind::Iri),
];

const IMAGE_REFERENCE: &[Alternative] = &[
    Alternative::objects(&["Image"]),
    Alternative::any_link(),
    Alternative::scalar(Kind::Iri),
];

const COLLECTION_REFERENCE: &[Alternative] = &[
    Alternative::objects(COLLECTIONS),
    Alternative::scalar(Kind::Iri),
];

const ORDERED_REFERENCE: &[Alternative] = &[
    Alternative::objects(ORDERED),
    Alternative::scalar(Kind::Iri),
];

const PAGE_REFERENCE: &[Alternative] = &[
    Alternative::objects(PAGES),
    Alternative::any_link(),
    Alternative::scalar(Kind::Iri),
];

const PART_OF: &[Alternative] = &[
    Alternative::objects(COLLECTIONS),
    Alternative::any_link(),
    Alternative::scalar(Kind::Iri),
];

const OBJECT_OR_IRI: &[Alternative] = &[Alternative::any_object(), Alternative::scalar(Kind::Iri)];
const LINK_OR_IRI: &[Alternative] = &[Alternative::any_link(), Alternative::scalar(Kind::Iri)];

const IRI: &[Alternative] = &[Alternative::scalar(Kind::Iri)];
const PLAIN: &[Alternative] = &[Alternative::scalar(Kind::PlainString)];
const NAME: &[Alternative] = &[
    Alternative::scalar(Kind::PlainString),
    Alternative::scalar(Kind::LangString),
];
const INTEGER: &[Alternative] = &[Alternative::scalar(Kind::Integer)];
const FLOAT: &[Alternative] = &[Alternative::scalar(Kind::Float)];
const BOOLEAN: &[Alternative] = &[Alternative::scalar(Kind::Boolean)];
const TIMESTAMP: &[Alternative] = &[Alternative::scalar(Kind::Timestamp)];
const DURATION: &[Alternative] = &[Alternative::scalar(Kind::Duration)];
const MIME_TYPE: &[Alternative] = &[Alternative::scalar(Kind::MimeType)];

const UNITS: &[Alternative] = &[
    Alternative::scalar(Kind::Iri),
    Alternative::scalar(Kind::PlainString),
];

const CLOSED: &[Alternative] = &[
    Alternative::any_object(),
    Alternative::any_link(),
    Alternative::scalar(Kind::Timestamp),
    Alternative::scalar(Kind::Boolean),
    Alternative::scalar(Kind::Iri),
];

const FORMER_TYPE: &[Alternative] = &[
    Alternative::any_object(),
    Alternative::scalar(Kind::PlainString),
];

// --- property constructors ---------------------------------------------------

const fn one(name: &'static str, alternatives: &'static [Alternative]) -> PropertyDef {
    PropertyDef {
        name,
        cardinality: Cardinality::Functional,
        alternatives,
        language_map: false,
    }
}

const fn many(name: &'static str, alternatives: &'static [Alternative]) -> PropertyDef {
    PropertyDef {
        name,
        cardinality: Cardinality::NonFunctional,
        alternatives,
        language_map: false,
    }
}

/// A property with a sibling `<name>Map`.
const fn mapped(def: PropertyDef) -> PropertyDef {
    PropertyDef {
        language_map: true,
        ..def
    }
}

// --- property groups ---------------------------------------------------------

const OBJECT_PROPERTIES: &[PropertyDef] = &[
    one("id", IRI),
    one("altitude", FLOAT),
    many("attachment", REFERENCE),
    many("attributedTo", REFERENCE),
    many("audience", REFERENCE),
    many("bcc", REFERENCE),
    many("bto", REFERENCE),
    many("cc", REFERENCE),
    mapped(many("content", TEXT)),
    many("context", REFERENCE),
    one("duration", DURATION),
    one("endTime", TIMESTAMP),
    many("generator", REFERENCE),
    many("icon", IMAGE_REFERENCE),
    many("image", IMAGE_REFERENCE),
    many("inReplyTo", REFERENCE),
    one("likes", COLLECTION_REFERENCE),
    many("location", REFERENCE),
    one("mediaType", MIME_TYPE),
    mapped(many("name", TEXT)),
    many("preview", REFERENCE),
    one("published", TIMESTAMP),
    one("replies", COLLECTION_REFERENCE),
    one("sensitive", BOOLEAN),
    one("shares", COLLECTION_REFERENCE),
    one("source", OBJECT_OR_IRI),
    one("startTime", TIMESTAMP),
    mapped(many("summary", TEXT)),
    many("tag", REFERENCE),
    many("to", REFERENCE),
    one("updated", TIMESTAMP),
    many("url", LINK_OR_IRI),
];

const COLLECTION_PROPERTIES: &[PropertyDef] = &[
    one("totalItems", INTEGER),
    one("current", PAGE_REFERENCE),
    one("first", PAGE_REFERENCE),
    one("last", PAGE_REFERENCE),
    many("items", REFERENCE),
];

const ORDERED_COLLECTION_PROPERTIES: &[PropertyDef] = &[
    one("totalItems", INTEGER),
    one("current", PAGE_REFERENCE),
    one("first", PAGE_REFERENCE),
    one("last", PAGE_REFERENCE),
    many("orderedItems", REFERENCE),
];

const PAGE_PROPERTIES: &[PropertyDef] = &[
    one("partOf", PART_OF),
    one("next", PAGE_REFERENCE),
    one("prev", PAGE_REFERENCE),
];

const ORDERED_PAGE_PROPERTIES: &[PropertyDef] = &[one("startIndex", INTEGER)];

const ACTIVITY_PROPERTIES: &[PropertyDef] = &[
    many("actor", REFERENCE),
    many("target", REFERENCE),
    many("result", REFERENCE),
    many("origin", REFERENCE),
    many("instrument", REFERENCE),
];

const TRANSITIVE_PROPERTIES: &[PropertyDef] = &[many("object", REFERENCE)];

const QUESTION_PROPERTIES: &[PropertyDef] = &[
    many("oneOf", REFERENCE),
    many("anyOf", REFERENCE),
    many("closed", CLOSED),
];

const ACTOR_PROPERTIES: &[PropertyDef] = &[
    one("inbox", ORDERED_REFERENCE),
    one("outbox", ORDERED_REFERENCE),
    one("following", COLLECTION_REFERENCE),
    one("followers", COLLECTION_REFERENCE),
    one("liked", COLLECTION_REFERENCE),
    many("streams", COLLECTION_REFERENCE),
    mapped(one("preferredUsername", NAME)),
    one("endpoints", OBJECT_OR_IRI),
];

const PLACE_PROPERTIES: &[PropertyDef] = &[
    one("accuracy", FLOAT),
    one("latitude", FLOAT),
    one("longitude", FLOAT),
    one("radius", FLOAT),
    one("units", UNITS),
];

const PROFILE_PROPERTIES: &[PropertyDef] = &[one("describes", OBJECT_OR_IRI)];

const RELATIONSHIP_PROPERTIES: &[PropertyDef] = &[
    one("subject", REFERENCE),
    many("object", REFERENCE),
    many("relationship", OBJECT_OR_IRI),
];

const TOMBSTONE_PROPERTIES: &[PropertyDef] = &[
    many("formerType", FORMER_TYPE),
    one("deleted", TIMESTAMP),
];

const LINK_PROPERTIES: &[PropertyDef] = &[
    one("id", IRI),
    many("attributedTo", REFERENCE),
    one("height", INTEGER),
    one("href", IRI),
    one("hreflang", PLAIN),
    one("mediaType", MIME_TYPE),
    mapped(many("name", TEXT)),
    many("preview", REFERENCE),
    many("rel", PLAIN),
    one("width", INTEGER),
];

// --- entity kinds ------------------------------------------------------------

const fn object(name: &'static str, properties: &'static [&'static [PropertyDef]]) -> EntityKind {
    EntityKind {
        name,
        category: Category::Object,
        properties,
    }
}

const OBJECT_GROUPS: &[&[PropertyDef]] = &[OBJECT_PROPERTIES];
const ACTOR_GROUPS: &[&[PropertyDef]] = &[OBJECT_PROPERTIES, ACTOR_PROPERTIES];
const ACTIVITY_GROUPS: &[&[PropertyDef]] = &[OBJECT_PROPERTIES, ACTIVITY_PROPERTIES, TRANSITIVE_PROPERTIES];
const INTRANSITIVE_GROUPS: &[&[PropertyDef]] = &[OBJECT_PROPERTIES, ACTIVITY_PROPERTIES];

pub static OBJECT: EntityKind = object("Object", OBJECT_GROUPS);
pub static ARTICLE: EntityKind = object("Article", OBJECT_GROUPS);
pub static AUDIO: EntityKind = object("Audio", OBJECT_GROUPS);
pub static DOCUMENT: EntityKind = object("Document", OBJECT_GROUPS);
pub static EVENT: EntityKind = object("Event", OBJECT_GROUPS);
pub static IMAGE: EntityKind = object("Image", OBJECT_GROUPS);
pub static NOTE: EntityKind = object("Note", OBJECT_GROUPS);
pub static PAGE: EntityKind = object("Page", OBJECT_GROUPS);
pub static VIDEO: EntityKind = object("Video", OBJECT_GROUPS);
pub static PLACE: EntityKind = object("Place", &[OBJECT_PROPERTIES, PLACE_PROPERTIES]);
pub static PROFILE: EntityKind = object("Profile", &[OBJECT_PROPERTIES, PROFILE_PROPERTIES]);
pub static RELATIONSHIP: EntityKind =
    object("Relationship", &[OBJECT_PROPERTIES, RELATIONSHIP_PROPERTIES]);
pub static TOMBSTONE: EntityKind = object("Tombstone", &[OBJECT_PROPERTIES, TOMBSTONE_PROPERTIES]);

pub static APPLICATION: EntityKind = object("Application", ACTOR_GROUPS);
pub static GROUP: EntityKind = object("Group", ACTOR_GROUPS);
pub static ORGANIZATION: EntityKind = object("Organization", ACTOR_GROUPS);
pub static PERSON: EntityKind = object("Person", ACTOR_GROUPS);
pub static SERVICE: EntityKind = object("Service", ACTOR_GROUPS);

pub static ACTIVITY: EntityKind = object("Activity", ACTIVITY_GROUPS);
pub static INTRANSITIVE_ACTIVITY: EntityKind = object("IntransitiveActivity", INTRANSITIVE_GROUPS);
pub static ACCEPT: EntityKind = object("Accept", ACTIVITY_GROUPS);
pub static ADD: EntityKind = object("Add", ACTIVITY_GROUPS);
pub static ANNOUNCE: EntityKind = object("Announce", ACTIVITY_GROUPS);
pub static CREATE: EntityKind = object("Create", ACTIVITY_GROUPS);
pub static DELETE: EntityKind = object("Delete", ACTIVITY_GROUPS);
pub static FOLLOW: EntityKind = object("Follow", ACTIVITY_GROUPS);
pub static LIKE: EntityKind = object("Like", ACTIVITY_GROUPS);
pub static REJECT: EntityKind = object("Reject", ACTIVITY_GROUPS);
pub static REMOVE: EntityKind = object("Remove", ACTIVITY_GROUPS);
pub static UNDO: EntityKind = object("Undo", ACTIVITY_GROUPS);
pub static UPDATE: EntityKind = object("Update", ACTIVITY_GROUPS);
pub static QUESTION: EntityKind =
    object("Question", &[OBJECT_PROPERTIES, ACTIVITY_PROPERTIES, QUESTION_PROPERTIES]);

pub static COLLECTION: EntityKind =
    object("Collection", &[OBJECT_PROPERTIES, COLLECTION_PROPERTIES]);
pub static ORDERED_COLLECTION: EntityKind =
    object("OrderedCollection", &[OBJECT_PROPERTIES, ORDERED_COLLECTION_PROPERTIES]);
pub static COLLECTION_PAGE: EntityKind = object(
    "CollectionPage",
    &[OBJECT_PROPERTIES, COLLECTION_PROPERTIES, PAGE_PROPERTIES],
);
pub static ORDERED_COLLECTION_PAGE: EntityKind = object(
    "OrderedCollectionPage",
    &[
        OBJECT_PROPERTIES,
        ORDERED_COLLECTION_PROPERTIES,
        PAGE_PROPERTIES,
        ORDERED_PAGE_PROPERTIES,
    ],
);

pub static LINK: EntityKind = EntityKind {
    name: "Link",
    category: Category::Link,
    properties: &[LINK_PROPERTIES],
};
pub static MENTION: EntityKind = EntityKind {
    name: "Mention",
    category: Category::Link,
    properties: &[LINK_PROPERTIES],
};

/// Every kind in this module, for [`Registry::activity_streams`](crate::Registry::activity_streams).
pub static ALL: &[&EntityKind] = &[
    &OBJECT,
    &ARTICLE,
    &AUDIO,
    &DOCUMENT,
    &EVENT,
    &IMAGE,
    &NOTE,
    &PAGE,
    &VIDEO,
    &PLACE,
    &PROFILE,
    &RELATIONSHIP,
    &TOMBSTONE,
    &APPLICATION,
    &GROUP,
    &ORGANIZATION,
    &PERSON,
    &SERVICE,
    &ACTIVITY,
    &INTRANSITIVE_ACTIVITY,
    &ACCEPT,
    &ADD,
    &ANNOUNCE,
    &CREATE,
    &DELETE,
    &FOLLOW,
    &LIKE,
    &REJECT,
    &REMOVE,
    &UNDO,
    &UPDATE,
    &QUESTION,
    &COLLECTION,
    &ORDERED_COLLECTION,
    &COLLECTION_PAGE,
    &ORDERED_COLLECTION_PAGE,
    &LINK,
    &MENTION,
];
