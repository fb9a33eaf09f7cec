//! Natural-language maps (`nameMap`, `contentMap`, `summaryMap`, ...).

use std::collections::BTreeMap;

use serde_json::{Map, Value as Json};

/// BCP 47 language tag → text, carried alongside a property's primary
/// value and serialized under `<name>Map`.
///
/// Tags are stored as given; no case folding or validation is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageMap {
    entries: BTreeMap<String, String>,
}

impl LanguageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// All language tags present, in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The text for `tag`, or the empty string if there is none.
    pub fn get(&self, tag: &str) -> &str {
        self.entries.get(tag).map_or("", String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Set the text for `tag`, replacing any previous text.
    pub fn set(&mut self, tag: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(tag.into(), text.into());
    }

    pub fn remove(&mut self, tag: &str) -> Option<String> {
        self.entries.remove(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a wire language map. Returns `None` unless `raw` is an object
    /// whose values are all strings.
    pub(crate) fn from_json(raw: &Json) -> Option<Self> {
        let obj = raw.as_object()?;
        let mut entries = BTreeMap::new();
        for (tag, text) in obj {
            entries.insert(tag.clone(), text.as_str()?.to_string());
        }
        Some(Self { entries })
    }

    pub(crate) fn to_json(&self) -> Json {
        let map: Map<String, Json> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), Json::String(v.clone())))
            .collect();
        Json::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_tag_reads_as_empty() {
        let mut m = LanguageMap::new();
        m.set("en", "Hello");
        assert_eq!(m.get("en"), "Hello");
        assert_eq!(m.get("fr"), "");
        assert!(!m.contains("fr"));
    }

    #[test]
    fn parses_string_valued_objects_only() {
        let m = LanguageMap::from_json(&json!({"en": "Hello", "fr": "Bonjour"})).unwrap();
        assert_eq!(m.languages().collect::<Vec<_>>(), vec!["en", "fr"]);
        assert!(LanguageMap::from_json(&json!({"en": 1})).is_none());
        assert!(LanguageMap::from_json(&json!("Hello")).is_none());
    }

    #[test]
    fn to_json_mirrors_entries() {
        let mut m = LanguageMap::new();
        m.set("de", "Hallo");
        assert_eq!(m.to_json(), json!({"de": "Hallo"}));
    }
}
