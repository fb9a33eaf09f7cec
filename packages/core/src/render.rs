//! Human-readable outline rendering of [`Entity`] values.
//!
//! The output is stable plain text for terminals and logs. It is not a
//! canonical format; only the JSON wire format is normative.

use crate::entity::Entity;
use crate::slot::Slot;
use crate::union::UnionBox;
use crate::value::Value;

/// Render an entity as an indented outline.
///
/// ```text
/// [Collection] https://example.com/c/1
///   totalItems: 5 (integer)
///   items:
///     - [Note]
///         content: "hi" (string)
///   nameMap:
///     en: "Hello"
///
/// Unknown:
///   x-org.example.mood: {"level":3}
/// ```
pub fn render_entity(entity: &Entity) -> String {
    let mut out = String::new();
    write_entity(&mut out, entity, 0);

    if !entity.unknown().is_empty() {
        out.push('\n');
        out.push_str("Unknown:\n");
        for (key, raw) in entity.unknown() {
            out.push_str(&format!("  {}: {}\n", key, truncate(&raw.to_string(), 72)));
        }
    }

    out
}

fn write_entity(out: &mut String, entity: &Entity, depth: usize) {
    out.push_str(&header(entity));
    out.push('\n');

    let pad = "  ".repeat(depth + 1);
    for slot in entity.populated_slots() {
        // `id` is already in the header.
        if slot.name() == "id" {
            continue;
        }
        write_slot(out, slot, depth + 1, &pad);
        if let Some(map) = slot.language_map().filter(|m| !m.is_empty()) {
            out.push_str(&format!("{}{}:\n", pad, slot.def().map_key()));
            for (tag, text) in map.iter() {
                out.push_str(&format!("{}  {}: \"{}\"\n", pad, tag, truncate(text, 72)));
            }
        }
    }
}

fn write_slot(out: &mut String, slot: &Slot, depth: usize, pad: &str) {
    match slot {
        Slot::Functional(s) => {
            if let Some(boxed) = s.union_box() {
                out.push_str(&format!("{}{}: ", pad, slot.name()));
                write_box(out, boxed, depth);
            }
        }
        Slot::NonFunctional(s) => {
            if let Some(raw) = s.unknown() {
                out.push_str(&format!("{}{}: {} (unknown)\n", pad, slot.name(), raw));
                return;
            }
            if s.len() == 1 {
                out.push_str(&format!("{}{}: ", pad, slot.name()));
                if let Some(boxed) = s.union_box(0) {
                    write_box(out, boxed, depth);
                }
                return;
            }
            out.push_str(&format!("{}{}:\n", pad, slot.name()));
            for boxed in s.iter() {
                out.push_str(&format!("{}  - ", pad));
                write_box(out, boxed, depth + 2);
            }
        }
    }
}

fn write_box(out: &mut String, boxed: &UnionBox, depth: usize) {
    match boxed {
        UnionBox::Unknown(raw) => {
            out.push_str(&format!("{} (unknown)\n", truncate(&raw.to_string(), 72)));
        }
        UnionBox::Known(Value::Object(e) | Value::Link(e)) => write_entity(out, e, depth + 1),
        UnionBox::Known(value) => {
            out.push_str(&format!("{} ({})\n", scalar_text(value), value.kind()));
        }
    }
}

fn header(entity: &Entity) -> String {
    let mut types: Vec<&str> = entity.types().iter().map(String::as_str).collect();
    if !types.contains(&entity.kind().name) {
        types.push(entity.kind().name);
    }
    match entity.id() {
        Some(id) => format!("[{}] {}", types.join(", "), id),
        None => format!("[{}]", types.join(", ")),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::PlainString(s) | Value::LangString(s) => format!("\"{}\"", truncate(s, 72)),
        Value::MimeType(s) => s.clone(),
        Value::Iri(iri) => iri.to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Timestamp(t) => t.to_rfc3339(),
        Value::Duration(d) => d.to_string(),
        Value::Object(e) | Value::Link(e) => header(e),
    }
}

// --- helpers -----------------------------------------------------------------

fn truncate(s: &str, max: usize) -> String {
    let s = s.trim();
    if s.len() <= max {
        s.to_string()
    } else {
        // truncate at a character boundary
        let boundary = s
            .char_indices()
            .take_while(|(i, _)| *i < max - 1)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(max);
        format!("{}…", &s[..boundary])
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use serde_json::json;

    fn sample() -> Entity {
        Registry::activity_streams()
            .decode(&json!({
                "type": "Collection",
                "id": "https://example.com/c/1",
                "totalItems": 2,
                "items": [
                    {"type": "Note", "content": "hi"},
                    "https://example.com/notes/2"
                ],
                "nameMap": {"en": "Hello", "fr": "Bonjour"},
                "x-org.example.mood": {"level": 3}
            }))
            .unwrap()
    }

    #[test]
    fn render_contains_key_fields() {
        let rendered = render_entity(&sample());
        assert!(rendered.starts_with("[Collection] https://example.com/c/1\n"));
        assert!(rendered.contains("totalItems: 2 (integer)"));
        assert!(rendered.contains("- [Note]"));
        assert!(rendered.contains("content: \"hi\" (string)"));
        assert!(rendered.contains("- https://example.com/notes/2 (iri)"));
        assert!(rendered.contains("nameMap:"));
        assert!(rendered.contains("fr: \"Bonjour\""));
    }

    #[test]
    fn render_lists_unknown_keys() {
        let rendered = render_entity(&sample());
        assert!(rendered.contains("Unknown:\n  x-org.example.mood: {\"level\":3}"));
    }

    #[test]
    fn truncate_long_text() {
        let long = "a".repeat(100);
        let t = truncate(&long, 10);
        assert!(t.ends_with('…'));
        assert!(t.chars().count() <= 10);
    }
}
