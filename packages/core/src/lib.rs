//! ActivityStreams data model and polymorphic JSON-LD property codec.
//!
//! An ActivityStreams property may legally hold several shapes of value: an
//! embedded object, a link, a bare IRI, a string, a number, and so on. This
//! crate declares those alternatives per property as schema data and
//! resolves each incoming JSON value against them, falling back to keeping
//! the raw value verbatim when nothing matches. Encoding writes the one
//! populated alternative back out, so documents round-trip without losing
//! extension data.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`schema`] | [`Kind`], [`Alternative`], [`PropertyDef`], [`EntityKind`] |
//! | [`vocab`] | The ActivityStreams core types as schema tables |
//! | [`registry`] | [`Registry`]: type name → entity kind lookup, top-level decode |
//! | [`scalar`] | [`ScalarAdapter`] and the built-in adapters for IRIs, strings, numbers, timestamps, ... |
//! | [`value`] | [`Value`], [`Iri`], [`IsoDuration`] |
//! | [`union`] | [`UnionBox`]: one property occurrence resolved against its alternatives |
//! | [`slot`] | Functional and non-functional property slots |
//! | [`language`] | [`LanguageMap`] for `nameMap`, `contentMap`, `summaryMap` |
//! | [`entity`] | [`Entity`]: slots, type names, unknown bag |
//! | [`codec`] | Whole-entity encode and decode |
//! | [`render`] | Human-readable outline of an entity |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use activityweft::{Kind, Registry};
//!
//! let registry = Registry::activity_streams();
//! let collection = registry.decode_str(
//!     r#"{"type":"Collection","totalItems":5,"items":[{"type":"Note","content":"hi"}]}"#,
//! )?;
//!
//! let total = collection.functional("totalItems").unwrap();
//! assert_eq!(total.get(Kind::Integer).and_then(|v| v.as_integer()), Some(5));
//!
//! let json = collection.to_json()?;
//! ```

pub mod codec;
pub mod entity;
pub mod error;
pub mod language;
pub mod registry;
pub mod render;
pub mod scalar;
pub mod schema;
pub mod slot;
pub mod union;
pub mod value;
pub mod vocab;

pub use entity::Entity;
pub use error::{DecodeError, EncodeError, SchemaError};
pub use language::LanguageMap;
pub use registry::{Registry, RegistryBuilder};
pub use scalar::{AdapterError, ScalarAdapter};
pub use schema::{Alternative, Cardinality, Category, EntityKind, Kind, PropertyDef};
pub use slot::{FunctionalSlot, NonFunctionalSlot, Slot};
pub use union::UnionBox;
pub use value::{Iri, IriError, IsoDuration, Value};
