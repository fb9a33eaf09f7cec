//! Scalar codec adapters.
//!
//! Each primitive [`Kind`] has one [`ScalarAdapter`] converting between a
//! raw JSON scalar and a typed [`Value`]. An adapter distinguishes two ways
//! of not producing a value:
//!
//! - [`AdapterError::Mismatch`]: the raw value is not this kind; the codec
//!   tries the next declared alternative.
//! - [`AdapterError::Malformed`]: the raw value is unambiguously shaped for
//!   this kind but internally invalid; decoding aborts.
//!
//! [`builtin`] returns the adapters shipped here. A [`Registry`] consults
//! its own overrides first, see
//! [`RegistryBuilder::adapter`](crate::RegistryBuilder::adapter).
//!
//! [`Registry`]: crate::Registry

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat};
use regex::Regex;
use serde_json::Value as Json;
use thiserror::Error;

use crate::error::EncodeError;
use crate::schema::{Kind, PropertyDef};
use crate::value::{Iri, IriError, IsoDuration, Value};

/// Why an adapter did not produce a value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdapterError {
    #[error("value is not of this kind")]
    Mismatch,
    #[error("{0}")]
    Malformed(String),
}

/// Converts one primitive kind to and from its JSON representation.
///
/// Implementations must only produce values of [`ScalarAdapter::kind`].
pub trait ScalarAdapter: Send + Sync {
    /// The kind this adapter produces.
    fn kind(&self) -> Kind;

    fn decode(&self, raw: &Json) -> Result<Value, AdapterError>;

    /// Encode a value of this adapter's kind. `property` names the slot for
    /// error reporting.
    fn encode(&self, property: &'static PropertyDef, value: &Value) -> Result<Json, EncodeError>;
}

impl fmt::Debug for dyn ScalarAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScalarAdapter({})", self.kind())
    }
}

/// The built-in adapter for `kind`, or `None` for entity kinds and `Unknown`.
pub fn builtin(kind: Kind) -> Option<&'static dyn ScalarAdapter> {
    let adapter: &'static dyn ScalarAdapter = match kind {
        Kind::Iri => &IriAdapter,
        Kind::PlainString => &StringAdapter(Kind::PlainString),
        Kind::LangString => &StringAdapter(Kind::LangString),
        Kind::Integer => &IntegerAdapter,
        Kind::Float => &FloatAdapter,
        Kind::Boolean => &BooleanAdapter,
        Kind::Timestamp => &TimestampAdapter,
        Kind::Duration => &DurationAdapter,
        Kind::MimeType => &MimeTypeAdapter,
        Kind::Object | Kind::Link | Kind::Unknown => return None,
    };
    Some(adapter)
}

// --- adapters ----------------------------------------------------------------

/// `xsd:anyURI`. Strings without a scheme are a mismatch; strings with a
/// scheme that fail to parse are malformed.
pub struct IriAdapter;

impl ScalarAdapter for IriAdapter {
    fn kind(&self) -> Kind {
        Kind::Iri
    }

    fn decode(&self, raw: &Json) -> Result<Value, AdapterError> {
        let s = raw.as_str().ok_or(AdapterError::Mismatch)?;
        match Iri::parse(s) {
            Ok(iri) => Ok(Value::Iri(iri)),
            Err(IriError::NoScheme(_)) => Err(AdapterError::Mismatch),
            Err(e @ IriError::Invalid { .. }) => Err(AdapterError::Malformed(e.to_string())),
        }
    }

    fn encode(&self, _: &'static PropertyDef, value: &Value) -> Result<Json, EncodeError> {
        Ok(value.as_iri().map_or(Json::Null, |i| Json::String(i.as_str().to_string())))
    }
}

/// `xsd:string` and `rdf:langString`; both accept any JSON string, so the
/// property's declared order decides between them.
pub struct StringAdapter(Kind);

impl ScalarAdapter for StringAdapter {
    fn kind(&self) -> Kind {
        self.0
    }

    fn decode(&self, raw: &Json) -> Result<Value, AdapterError> {
        let s = raw.as_str().ok_or(AdapterError::Mismatch)?.to_string();
        Ok(match self.0 {
            Kind::LangString => Value::LangString(s),
            _ => Value::PlainString(s),
        })
    }

    fn encode(&self, _: &'static PropertyDef, value: &Value) -> Result<Json, EncodeError> {
        Ok(value.as_str().map_or(Json::Null, |s| Json::String(s.to_string())))
    }
}

/// `xsd:nonNegativeInteger`.
pub struct IntegerAdapter;

impl ScalarAdapter for IntegerAdapter {
    fn kind(&self) -> Kind {
        Kind::Integer
    }

    fn decode(&self, raw: &Json) -> Result<Value, AdapterError> {
        raw.as_u64().map(Value::Integer).ok_or(AdapterError::Mismatch)
    }

    fn encode(&self, _: &'static PropertyDef, value: &Value) -> Result<Json, EncodeError> {
        Ok(value.as_integer().map_or(Json::Null, Json::from))
    }
}

/// Largest magnitude below which every integer is exactly an `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// `xsd:float`. Any JSON number is accepted. Whole numbers are written
/// without a fraction, so `52` stays `52`.
pub struct FloatAdapter;

impl ScalarAdapter for FloatAdapter {
    fn kind(&self) -> Kind {
        Kind::Float
    }

    fn decode(&self, raw: &Json) -> Result<Value, AdapterError> {
        raw.as_f64().map(Value::Float).ok_or(AdapterError::Mismatch)
    }

    fn encode(&self, property: &'static PropertyDef, value: &Value) -> Result<Json, EncodeError> {
        let Some(n) = value.as_float() else {
            return Ok(Json::Null);
        };
        if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER {
            return Ok(Json::from(n as i64));
        }
        serde_json::Number::from_f64(n)
            .map(Json::Number)
            .ok_or(EncodeError::NonFiniteFloat {
                property: property.name,
                value: n,
            })
    }
}

/// `xsd:boolean`.
pub struct BooleanAdapter;

impl ScalarAdapter for BooleanAdapter {
    fn kind(&self) -> Kind {
        Kind::Boolean
    }

    fn decode(&self, raw: &Json) -> Result<Value, AdapterError> {
        raw.as_bool().map(Value::Boolean).ok_or(AdapterError::Mismatch)
    }

    fn encode(&self, _: &'static PropertyDef, value: &Value) -> Result<Json, EncodeError> {
        Ok(value.as_bool().map_or(Json::Null, Json::Bool))
    }
}

/// `xsd:dateTime` as RFC 3339. Encoding writes a zero offset as `Z` and
/// only as many fractional digits as the instant needs.
pub struct TimestampAdapter;

impl ScalarAdapter for TimestampAdapter {
    fn kind(&self) -> Kind {
        Kind::Timestamp
    }

    fn decode(&self, raw: &Json) -> Result<Value, AdapterError> {
        let s = raw.as_str().ok_or(AdapterError::Mismatch)?;
        DateTime::parse_from_rfc3339(s)
            .map(Value::Timestamp)
            .map_err(|_| AdapterError::Mismatch)
    }

    fn encode(&self, _: &'static PropertyDef, value: &Value) -> Result<Json, EncodeError> {
        Ok(value.as_timestamp().map_or(Json::Null, |t| {
            Json::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }))
    }
}

/// `xsd:duration`.
pub struct DurationAdapter;

impl ScalarAdapter for DurationAdapter {
    fn kind(&self) -> Kind {
        Kind::Duration
    }

    fn decode(&self, raw: &Json) -> Result<Value, AdapterError> {
        let s = raw.as_str().ok_or(AdapterError::Mismatch)?;
        IsoDuration::parse(s)
            .map(Value::Duration)
            .map_err(|_| AdapterError::Mismatch)
    }

    fn encode(&self, _: &'static PropertyDef, value: &Value) -> Result<Json, EncodeError> {
        Ok(value.as_duration().map_or(Json::Null, |d| Json::String(d.to_string())))
    }
}

/// `type/subtype` with optional parameters (RFC 6838 names).
static MIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9!#$&^_.+\-]*/[A-Za-z0-9][A-Za-z0-9!#$&^_.+\-]*(\s*;.*)?$")
        .expect("invalid mime regex")
});

/// MIME media type strings.
pub struct MimeTypeAdapter;

impl ScalarAdapter for MimeTypeAdapter {
    fn kind(&self) -> Kind {
        Kind::MimeType
    }

    fn decode(&self, raw: &Json) -> Result<Value, AdapterError> {
        let s = raw.as_str().ok_or(AdapterError::Mismatch)?;
        if MIME_RE.is_match(s) {
            Ok(Value::MimeType(s.to_string()))
        } else {
            Err(AdapterError::Mismatch)
        }
    }

    fn encode(&self, _: &'static PropertyDef, value: &Value) -> Result<Json, EncodeError> {
        Ok(value.as_str().map_or(Json::Null, |s| Json::String(s.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Alternative, Cardinality};
    use serde_json::json;

    static ALTITUDE: PropertyDef = PropertyDef {
        name: "altitude",
        cardinality: Cardinality::Functional,
        alternatives: &[Alternative::scalar(Kind::Float)],
        language_map: false,
    };

    fn decode(kind: Kind, raw: Json) -> Result<Value, AdapterError> {
        builtin(kind).unwrap().decode(&raw)
    }

    #[test]
    fn entity_kinds_have_no_adapter() {
        assert!(builtin(Kind::Object).is_none());
        assert!(builtin(Kind::Link).is_none());
        assert!(builtin(Kind::Unknown).is_none());
        assert_eq!(format!("{:?}", builtin(Kind::Iri).unwrap()), "ScalarAdapter(iri)");
    }

    #[test]
    fn integer_rejects_negative_and_fractional() {
        assert_eq!(decode(Kind::Integer, json!(5)), Ok(Value::Integer(5)));
        assert_eq!(decode(Kind::Integer, json!(-1)), Err(AdapterError::Mismatch));
        assert_eq!(decode(Kind::Integer, json!(1.5)), Err(AdapterError::Mismatch));
        assert_eq!(decode(Kind::Integer, json!("5")), Err(AdapterError::Mismatch));
    }

    #[test]
    fn iri_mismatch_vs_malformed() {
        assert!(matches!(decode(Kind::Iri, json!("https://example.com/x")), Ok(Value::Iri(_))));
        assert_eq!(decode(Kind::Iri, json!("plain text")), Err(AdapterError::Mismatch));
        assert!(matches!(
            decode(Kind::Iri, json!("https://exa mple.com")),
            Err(AdapterError::Malformed(_))
        ));
        assert_eq!(decode(Kind::Iri, json!(42)), Err(AdapterError::Mismatch));
    }

    #[test]
    fn strings_decode_to_their_own_kind() {
        assert_eq!(decode(Kind::PlainString, json!("hi")), Ok(Value::string("hi")));
        assert_eq!(
            decode(Kind::LangString, json!("hi")),
            Ok(Value::LangString("hi".into()))
        );
    }

    #[test]
    fn timestamp_round_trips_utc() {
        let v = decode(Kind::Timestamp, json!("2026-02-18T12:00:00Z")).unwrap();
        let out = TimestampAdapter.encode(&ALTITUDE, &v).unwrap();
        assert_eq!(out, json!("2026-02-18T12:00:00Z"));
        assert_eq!(decode(Kind::Timestamp, json!("yesterday")), Err(AdapterError::Mismatch));
    }

    #[test]
    fn timestamp_encoding_is_normalized() {
        let encode = |raw: &str| {
            let v = decode(Kind::Timestamp, json!(raw)).unwrap();
            TimestampAdapter.encode(&ALTITUDE, &v).unwrap()
        };
        assert_eq!(encode("2026-02-18T12:00:00+00:00"), json!("2026-02-18T12:00:00Z"));
        assert_eq!(encode("2026-02-18T12:00:00.50Z"), json!("2026-02-18T12:00:00.500Z"));
        assert_eq!(encode("2026-02-18T13:00:00+01:00"), json!("2026-02-18T13:00:00+01:00"));
    }

    #[test]
    fn whole_floats_keep_integer_form() {
        let encode = |raw: Json| {
            let v = decode(Kind::Float, raw).unwrap();
            FloatAdapter.encode(&ALTITUDE, &v).unwrap()
        };
        assert_eq!(encode(json!(52)), json!(52));
        assert_eq!(encode(json!(-13)), json!(-13));
        assert_eq!(encode(json!(52.5)), json!(52.5));
        assert_eq!(encode(json!(1e300)), json!(1e300));
    }

    #[test]
    fn mime_type_shape() {
        assert!(decode(Kind::MimeType, json!("text/html")).is_ok());
        assert!(decode(Kind::MimeType, json!("text/plain; charset=utf-8")).is_ok());
        assert_eq!(decode(Kind::MimeType, json!("html")), Err(AdapterError::Mismatch));
    }

    #[test]
    fn non_finite_float_fails_to_encode() {
        let err = FloatAdapter
            .encode(&ALTITUDE, &Value::Float(f64::NAN))
            .unwrap_err();
        assert!(matches!(err, EncodeError::NonFiniteFloat { property: "altitude", .. }));
    }
}
