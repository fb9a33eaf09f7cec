//! Wire-format conformance tests for the ActivityWeft codec.
//!
//! Each test decodes real-shaped ActivityStreams JSON through
//! [`Registry::activity_streams`](activityweft::Registry::activity_streams)
//! and checks the resulting entity and its re-encoding.
//!
//! # Coverage
//!
//! | Test | Property |
//! |------|----------|
//! | `collection_with_embedded_note` | nested object resolution, integer scalar |
//! | `bare_string_current_is_iri` | scalar resolution on reference properties |
//! | `name_map_without_name` | language map independent of the primary value |
//! | `unexpected_total_items_shape_is_unknown` | unknown preservation |
//! | `unknown_keys_round_trip` | unknown bag |
//! | `singleton_collapse_law` | bare value for one element |
//! | `precedence_is_deterministic` | declared order decides ambiguous scalars |
//! | `type_name_defaulting` | append-if-absent type list |
//! | `every_fixture_round_trips` | round-trip of all fixtures |
//! | `api_built_entity_round_trips` | decode(encode(E)) == E |
//! | `bare_built_entity_round_trips` | decode(encode(E)) == E for a fresh entity |
//! | `whole_number_float_keeps_its_form` | float re-encoding |
//! | `edited_list_collapses_to_a_bare_value` | collapse after edits |
//! | `malformed_iri_aborts_decode` | structural errors propagate |
//! | `hashtag_link_is_kept_raw` | unregistered nested type |

use activityweft::{vocab, Entity, Kind, UnionBox, Value};
use activityweft_conformance::{assert_round_trip, decode, fixtures, registry};
use serde_json::json;

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn collection_with_embedded_note() {
    let doc = json!({"type": "Collection", "totalItems": 5, "items": [{"type": "Note", "content": "hi"}]});
    let collection = assert_round_trip(&doc);

    let total = collection.functional("totalItems").unwrap();
    assert!(total.is_set(Kind::Integer));
    assert_eq!(total.get(Kind::Integer), Some(&Value::Integer(5)));

    let items = collection.non_functional("items").unwrap();
    assert_eq!(items.len(), 1);
    assert!(items.is_set(0, Kind::Object));
    let note = items.get(0, Kind::Object).and_then(Value::as_entity).unwrap();
    assert_eq!(note.kind().name, "Note");
    let content = note.non_functional("content").unwrap();
    assert_eq!(content.get(0, Kind::PlainString), Some(&Value::string("hi")));
}

#[test]
fn bare_string_current_is_iri() {
    let doc = json!({"type": "Collection", "current": "https://example.com/x"});
    let collection = assert_round_trip(&doc);
    let current = collection.functional("current").unwrap();
    assert!(current.is_set(Kind::Iri));
    assert!(!current.is_set(Kind::Object));
    assert!(!current.is_set(Kind::Link));
    assert_eq!(
        current.get(Kind::Iri).and_then(Value::as_iri).unwrap().as_str(),
        "https://example.com/x"
    );
}

#[test]
fn name_map_without_name() {
    let doc = json!({"type": "Collection", "nameMap": {"en": "Hello", "fr": "Bonjour"}});
    let collection = assert_round_trip(&doc);
    assert!(collection.non_functional("name").unwrap().is_empty());
    let map = collection.language_map("name").unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("en"), "Hello");
    assert_eq!(map.get("fr"), "Bonjour");
    assert_eq!(map.get("de"), "");

    let encoded = collection.to_json().unwrap();
    assert!(encoded.get("name").is_none());
}

#[test]
fn unexpected_total_items_shape_is_unknown() {
    let doc = json!({"type": "Collection", "totalItems": {"unexpected": "shape"}});
    let collection = assert_round_trip(&doc);
    let total = collection.functional("totalItems").unwrap();
    assert!(total.has_unknown());
    assert_eq!(total.unknown(), Some(&json!({"unexpected": "shape"})));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn unknown_keys_round_trip() {
    let doc = json!({
        "type": "Note",
        "content": "hi",
        "x-org.example.rating": {"stars": 4, "by": ["a", "b"]},
        "conversation": "tag:social.example,2026:objectId=1"
    });
    let note = assert_round_trip(&doc);
    assert_eq!(note.unknown().len(), 2);
    assert_eq!(
        note.unknown().get("x-org.example.rating"),
        Some(&json!({"stars": 4, "by": ["a", "b"]}))
    );
}

#[test]
fn singleton_collapse_law() {
    let mut note = Entity::new(&vocab::NOTE);
    note.non_functional_mut("to")
        .unwrap()
        .append(Value::iri("https://www.w3.org/ns/activitystreams#Public").unwrap())
        .unwrap();
    let encoded = note.to_json().unwrap();
    assert_eq!(encoded["to"], json!("https://www.w3.org/ns/activitystreams#Public"));

    let back = decode(&encoded);
    let to = back.non_functional("to").unwrap();
    assert_eq!(to.len(), 1);
    assert!(to.is_set(0, Kind::Iri));
}

#[test]
fn precedence_is_deterministic() {
    // Any string satisfies both the plain and the language string adapter;
    // `summary` declares plain first.
    let doc = json!({"type": "Note", "summary": "hello"});
    for _ in 0..3 {
        let note = decode(&doc);
        let summary = note.non_functional("summary").unwrap();
        assert!(summary.is_set(0, Kind::PlainString));
        assert!(!summary.is_set(0, Kind::LangString));
    }

    // `units` declares IRI before plain string.
    let place = decode(&json!({"type": "Place", "units": "https://example.com/units/m"}));
    assert!(place.functional("units").unwrap().is_set(Kind::Iri));
    let place = decode(&json!({"type": "Place", "units": "km"}));
    assert!(place.functional("units").unwrap().is_set(Kind::PlainString));
}

#[test]
fn type_name_defaulting() {
    let empty = Entity::new(&vocab::COLLECTION);
    assert_eq!(empty.to_json().unwrap()["type"], json!("Collection"));

    let extra = decode(&json!({"type": ["x:Archive", "Collection"]}));
    assert_eq!(extra.types(), ["x:Archive", "Collection"]);
    assert_eq!(
        extra.to_json().unwrap()["type"],
        json!(["x:Archive", "Collection"])
    );

    // Built entities start with the canonical name; extras follow it.
    let mut other = Entity::new(&vocab::COLLECTION);
    other.add_type("x:Archive");
    assert_eq!(
        other.to_json().unwrap()["type"],
        json!(["Collection", "x:Archive"])
    );
}

#[test]
fn every_fixture_round_trips() {
    for (name, doc) in fixtures() {
        let entity = assert_round_trip(&doc);
        assert!(
            entity.types().iter().any(|t| entity.has_type(t)),
            "fixture {name} lost its type"
        );
    }
}

#[test]
fn api_built_entity_round_trips() {
    let r = registry();

    let mut page = r.instantiate_object("CollectionPage").unwrap();
    page.functional_mut("partOf")
        .unwrap()
        .set(Value::iri("https://example.com/c").unwrap())
        .unwrap();

    let mut mention = r.instantiate_link("Mention").unwrap();
    mention
        .functional_mut("href")
        .unwrap()
        .set(Value::iri("https://example.com/@bob").unwrap())
        .unwrap();

    let mut collection = r.instantiate_object("Collection").unwrap();
    collection
        .functional_mut("totalItems")
        .unwrap()
        .set(Value::Integer(2))
        .unwrap();
    collection.functional_mut("first").unwrap().set(Value::from(page)).unwrap();
    let items = collection.non_functional_mut("items").unwrap();
    items.append(Value::from(mention)).unwrap();
    items.append_unknown(json!(42));
    collection
        .language_map_mut("summary")
        .unwrap()
        .set("en", "Two things");
    collection
        .unknown_mut()
        .insert("x-org.example.flag".into(), json!(true));

    let encoded = collection.to_json().unwrap();
    let back = r.decode(&encoded).unwrap();
    assert_eq!(back, collection);

    let items = back.non_functional("items").unwrap();
    assert!(items.is_set(0, Kind::Link));
    assert_eq!(items.union_box(1), Some(&UnionBox::Unknown(json!(42))));
}

#[test]
fn whole_number_float_keeps_its_form() {
    let doc = json!({"type": "Place", "latitude": 52, "longitude": 13.25});
    let place = assert_round_trip(&doc);
    let latitude = place.functional("latitude").unwrap();
    assert_eq!(latitude.get(Kind::Float).and_then(Value::as_float), Some(52.0));
}

#[test]
fn edited_list_collapses_to_a_bare_value() {
    let mut collection = decode(&json!({
        "type": "Collection",
        "items": ["https://a.example/1", "https://a.example/2"]
    }));
    collection.non_functional_mut("items").unwrap().remove_at(0).unwrap();
    assert_eq!(
        collection.to_json().unwrap()["items"],
        json!("https://a.example/2")
    );
}

#[test]
fn bare_built_entity_round_trips() {
    let collection = Entity::new(&vocab::COLLECTION);
    let back = decode(&collection.to_json().unwrap());
    assert_eq!(back, collection);
}

#[test]
fn malformed_iri_aborts_decode() {
    let doc = json!({
        "type": "Collection",
        "items": [{"type": "Note", "id": "https://exa mple.com/notes/1"}]
    });
    let err = registry().decode(&doc).unwrap_err();
    assert!(err.to_string().contains("items"), "unexpected error: {err}");
}

#[test]
fn hashtag_link_is_kept_raw() {
    let doc = json!({
        "type": "Note",
        "tag": {"type": "Hashtag", "href": "https://social.example/tags/weft", "name": "#weft"}
    });
    let note = assert_round_trip(&doc);
    let tag = note.non_functional("tag").unwrap();
    assert!(tag.is_set(0, Kind::Unknown));
}
