//! Error types for decoding, encoding and the typed setter API.
//!
//! Kind mismatches are not errors: they are recovered inside the codec by
//! trying the next declared alternative or falling back to the unknown
//! path. Everything here is a hard failure surfaced to the caller with no
//! partial result.

use thiserror::Error;

use crate::schema::Kind;

/// Errors returned when a JSON document cannot be turned into an [`Entity`](crate::Entity).
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("document must be a JSON object")]
    NotAnObject,

    #[error("document has no \"type\" field")]
    MissingType,

    #[error("\"type\" must be a string or an array of strings, got: {0}")]
    InvalidTypeField(serde_json::Value),

    #[error("none of the declared types {0:?} is registered")]
    UnregisteredType(Vec<String>),

    #[error("property {property:?}: malformed {kind} value: {message}")]
    Malformed {
        property: &'static str,
        kind: Kind,
        message: String,
    },

    #[error("property {property:?}: {source}")]
    Nested {
        property: &'static str,
        #[source]
        source: Box<DecodeError>,
    },

    #[error("invalid JSON: {0}")]
    Json(String),
}

/// Errors returned when an [`Entity`](crate::Entity) cannot be written as JSON.
#[derive(Debug, Error, PartialEq)]
pub enum EncodeError {
    #[error("property {property:?}: {value} cannot be represented as a JSON number")]
    NonFiniteFloat { property: &'static str, value: f64 },

    #[error("property {property:?}: {source}")]
    Nested {
        property: &'static str,
        #[source]
        source: Box<EncodeError>,
    },
}

/// Errors returned by the setter API when a caller asks a slot for
/// something its schema does not declare.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("{entity} has no property {property:?}")]
    UnknownProperty {
        entity: &'static str,
        property: String,
    },

    #[error("property {property:?} is {actual}, not {expected}")]
    WrongCardinality {
        property: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("property {0:?} does not carry a language map")]
    NoLanguageMap(&'static str),

    #[error("property {property:?} does not accept a {kind} value")]
    UndeclaredKind { property: &'static str, kind: String },
}
