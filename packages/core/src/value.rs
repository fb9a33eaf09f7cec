//! Typed property values.
//!
//! [`Value`] is the populated alternative of a union box. Scalar variants
//! carry already-validated domain types ([`Iri`], [`IsoDuration`],
//! `chrono` timestamps); entity variants own a nested [`Entity`].

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use thiserror::Error;

use crate::entity::Entity;
use crate::schema::Kind;

/// A value that populates one alternative of a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Object(Box<Entity>),
    Link(Box<Entity>),
    Iri(Iri),
    PlainString(String),
    LangString(String),
    Integer(u64),
    Float(f64),
    Boolean(bool),
    Timestamp(DateTime<FixedOffset>),
    Duration(IsoDuration),
    MimeType(String),
}

impl Value {
    /// The kind tag of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Object(_) => Kind::Object,
            Value::Link(_) => Kind::Link,
            Value::Iri(_) => Kind::Iri,
            Value::PlainString(_) => Kind::PlainString,
            Value::LangString(_) => Kind::LangString,
            Value::Integer(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::Boolean(_) => Kind::Boolean,
            Value::Timestamp(_) => Kind::Timestamp,
            Value::Duration(_) => Kind::Duration,
            Value::MimeType(_) => Kind::MimeType,
        }
    }

    /// Parse `s` as an IRI value.
    pub fn iri(s: &str) -> Result<Self, IriError> {
        Iri::parse(s).map(Value::Iri)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::PlainString(s.into())
    }

    /// The nested entity of an `Object` or `Link` value.
    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Value::Object(e) | Value::Link(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_entity_mut(&mut self) -> Option<&mut Entity> {
        match self {
            Value::Object(e) | Value::Link(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Value::Iri(i) => Some(i),
            _ => None,
        }
    }

    /// Text of a plain string, language string or MIME type value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::PlainString(s) | Value::LangString(s) | Value::MimeType(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Value::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<&IsoDuration> {
        match self {
            Value::Duration(d) => Some(d),
            _ => None,
        }
    }

    /// Short description used in error messages, e.g. `"Note object"`.
    pub(crate) fn describe(&self) -> String {
        match self {
            Value::Object(e) | Value::Link(e) => format!("{} {}", e.kind().name, self.kind()),
            other => other.kind().to_string(),
        }
    }
}

impl From<Entity> for Value {
    /// Wraps the entity as `Object` or `Link` according to its kind's category.
    fn from(entity: Entity) -> Self {
        match entity.kind().category {
            crate::schema::Category::Object => Value::Object(Box::new(entity)),
            crate::schema::Category::Link => Value::Link(Box::new(entity)),
        }
    }
}

impl From<Iri> for Value {
    fn from(iri: Iri) -> Self {
        Value::Iri(iri)
    }
}

// --- IRI ---------------------------------------------------------------------

/// Errors returned by [`Iri::parse`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IriError {
    /// The text does not start with a URI scheme, so it is not an IRI at all.
    #[error("missing scheme in {0:?}")]
    NoScheme(String),

    /// The text starts with a scheme but is not a valid IRI.
    #[error("invalid IRI {iri:?}: {reason}")]
    Invalid { iri: String, reason: String },
}

/// An absolute IRI reference.
///
/// The original text is kept as-is so it re-encodes byte for byte; the
/// parsed form is available through [`Iri::url`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Iri {
    text: String,
    url: url::Url,
}

/// `^[A-Za-z][A-Za-z0-9+.-]*:`
static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("invalid scheme regex"));

impl Iri {
    pub fn parse(s: &str) -> Result<Self, IriError> {
        if !SCHEME_RE.is_match(s) {
            return Err(IriError::NoScheme(s.to_string()));
        }
        let url = url::Url::parse(s).map_err(|e| IriError::Invalid {
            iri: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            text: s.to_string(),
            url,
        })
    }

    /// The text exactly as it was parsed.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The parsed, normalized form.
    pub fn url(&self) -> &url::Url {
        &self.url
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Iri {
    type Err = IriError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Iri::parse(s)
    }
}

// --- duration ----------------------------------------------------------------

/// Errors returned when parsing an [`IsoDuration`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("not an ISO 8601 duration: {0:?}")]
pub struct DurationError(pub String);

/// An ISO 8601 duration (`xsd:duration`), e.g. `PT5M` or `P1DT12H`.
///
/// Calendar components (years, months) are kept separately from the fixed
/// ones because they have no fixed length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IsoDuration {
    pub negative: bool,
    pub years: u64,
    pub months: u64,
    pub weeks: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: f64,
}

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(-)?P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)W)?(?:(\d+)D)?(T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+(?:\.\d+)?)S)?)?$",
    )
    .expect("invalid duration regex")
});

impl IsoDuration {
    pub fn parse(s: &str) -> Result<Self, DurationError> {
        let err = || DurationError(s.to_string());
        let caps = DURATION_RE.captures(s).ok_or_else(err)?;

        // "P" and "PT" alone are not durations.
        let has_date = (2..=5).any(|i| caps.get(i).is_some());
        let has_time = (7..=9).any(|i| caps.get(i).is_some());
        if !has_date && !has_time {
            return Err(err());
        }
        if caps.get(6).is_some() && !has_time {
            return Err(err());
        }

        let int = |i: usize| -> Result<u64, DurationError> {
            caps.get(i)
                .map_or(Ok(0), |m| m.as_str().parse::<u64>().map_err(|_| err()))
        };
        let seconds = caps
            .get(9)
            .map_or(Ok(0.0), |m| m.as_str().parse::<f64>().map_err(|_| err()))?;

        Ok(Self {
            negative: caps.get(1).is_some(),
            years: int(2)?,
            months: int(3)?,
            weeks: int(4)?,
            days: int(5)?,
            hours: int(7)?,
            minutes: int(8)?,
            seconds,
        })
    }

    /// The duration as a fixed time span, or `None` if it has calendar
    /// components (years or months) or overflows.
    pub fn to_time_delta(&self) -> Option<chrono::TimeDelta> {
        if self.years != 0 || self.months != 0 {
            return None;
        }
        let whole_secs = self
            .weeks
            .checked_mul(7 * 86_400)?
            .checked_add(self.days.checked_mul(86_400)?)?
            .checked_add(self.hours.checked_mul(3_600)?)?
            .checked_add(self.minutes.checked_mul(60)?)?;
        let millis = i64::try_from(whole_secs)
            .ok()?
            .checked_mul(1_000)?
            .checked_add((self.seconds * 1_000.0).round() as i64)?;
        let delta = chrono::TimeDelta::try_milliseconds(millis)?;
        Some(if self.negative { -delta } else { delta })
    }
}

/// Formats in canonical ISO 8601 form, omitting zero components.
impl fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str("P")?;
        for (n, unit) in [(self.years, 'Y'), (self.months, 'M'), (self.weeks, 'W'), (self.days, 'D')] {
            if n != 0 {
                write!(f, "{n}{unit}")?;
            }
        }
        let has_time = self.hours != 0 || self.minutes != 0 || self.seconds != 0.0;
        let has_date = self.years != 0 || self.months != 0 || self.weeks != 0 || self.days != 0;
        if has_time || !has_date {
            f.write_str("T")?;
            if self.hours != 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes != 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds != 0.0 || !has_date && self.hours == 0 && self.minutes == 0 {
                write!(f, "{}S", self.seconds)?;
            }
        }
        Ok(())
    }
}

impl FromStr for IsoDuration {
    type Err = DurationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IsoDuration::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iri_keeps_original_text() {
        let iri = Iri::parse("https://example.com").unwrap();
        assert_eq!(iri.as_str(), "https://example.com");
        assert_eq!(iri.url().as_str(), "https://example.com/");
    }

    #[test]
    fn iri_without_scheme_is_not_an_iri() {
        assert!(matches!(Iri::parse("hello world"), Err(IriError::NoScheme(_))));
        assert!(matches!(Iri::parse("/relative/path"), Err(IriError::NoScheme(_))));
    }

    #[test]
    fn iri_with_scheme_but_bad_host_is_invalid() {
        assert!(matches!(
            Iri::parse("https://exa mple.com/"),
            Err(IriError::Invalid { .. })
        ));
    }

    #[test]
    fn duration_parses_components() {
        let d = IsoDuration::parse("P1DT12H30M").unwrap();
        assert_eq!(d.days, 1);
        assert_eq!(d.hours, 12);
        assert_eq!(d.minutes, 30);
        assert_eq!(d.to_string(), "P1DT12H30M");
    }

    #[test]
    fn duration_fractional_seconds() {
        let d = IsoDuration::parse("PT1.5S").unwrap();
        assert_eq!(d.seconds, 1.5);
        assert_eq!(d.to_string(), "PT1.5S");
        assert_eq!(d.to_time_delta(), chrono::TimeDelta::try_milliseconds(1_500));
    }

    #[test]
    fn duration_rejects_empty_forms() {
        assert!(IsoDuration::parse("P").is_err());
        assert!(IsoDuration::parse("PT").is_err());
        assert!(IsoDuration::parse("P1DT").is_err());
        assert!(IsoDuration::parse("5 minutes").is_err());
    }

    #[test]
    fn duration_with_months_has_no_fixed_length() {
        let d = IsoDuration::parse("P1M").unwrap();
        assert_eq!(d.to_time_delta(), None);
        assert_eq!(d.to_string(), "P1M");
    }

    #[test]
    fn negative_duration() {
        let d = IsoDuration::parse("-PT5M").unwrap();
        assert!(d.negative);
        assert_eq!(d.to_string(), "-PT5M");
        assert_eq!(d.to_time_delta(), chrono::TimeDelta::try_minutes(-5));
    }
}
