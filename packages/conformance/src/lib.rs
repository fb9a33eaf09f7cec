//! Shared helpers for the ActivityWeft conformance test suite.
//!
//! Provides [`registry`], a set of named wire [`fixtures`], and
//! [`assert_round_trip`], which checks both directions of the codec for a
//! document: the re-encoded JSON equals the input, and the re-decoded
//! entity equals the first decode.

use activityweft::{Entity, Registry};
use serde_json::{json, Value};

/// The registry every conformance test decodes with.
pub fn registry() -> Registry {
    Registry::activity_streams()
}

/// Decode `doc`, panicking with the decode error on failure.
///
/// # Panics
///
/// Panics if the document does not decode.
pub fn decode(doc: &Value) -> Entity {
    registry()
        .decode(doc)
        .unwrap_or_else(|e| panic!("failed to decode {doc}: {e}"))
}

/// Decode `doc`, re-encode it, and require the output to equal `doc`
/// (without `@context`) and to decode to the same entity again.
///
/// Returns the first decoded entity for further inspection.
///
/// # Panics
///
/// Panics if any step fails or either comparison differs.
pub fn assert_round_trip(doc: &Value) -> Entity {
    let first = decode(doc);
    let encoded = first.to_json().expect("encode decoded entity");

    let mut expected = doc.clone();
    if let Some(map) = expected.as_object_mut() {
        map.remove("@context");
    }
    assert_eq!(encoded, expected, "re-encoded document differs");

    let second = decode(&encoded);
    assert_eq!(second, first, "re-decoded entity differs");
    first
}

/// Named documents exercising the codec end to end. Each one round-trips
/// unchanged apart from `@context`.
pub fn fixtures() -> Vec<(&'static str, Value)> {
    vec![
        (
            "collection-with-note",
            json!({"type": "Collection", "totalItems": 5, "items": [{"type": "Note", "content": "hi"}]}),
        ),
        (
            "outbox-page",
            json!({
                "@context": "https://www.w3.org/ns/activitystreams",
                "type": "OrderedCollectionPage",
                "id": "https://social.example/users/alice/outbox?page=1",
                "partOf": "https://social.example/users/alice/outbox",
                "next": "https://social.example/users/alice/outbox?page=2",
                "startIndex": 0,
                "orderedItems": [
                    {
                        "type": "Create",
                        "id": "https://social.example/activities/1",
                        "actor": "https://social.example/users/alice",
                        "published": "2026-02-18T12:00:00Z",
                        "to": ["https://www.w3.org/ns/activitystreams#Public"],
                        "object": {
                            "type": "Note",
                            "id": "https://social.example/notes/1",
                            "content": "<p>Hello</p>",
                            "contentMap": {"en": "<p>Hello</p>", "fr": "<p>Bonjour</p>"},
                            "tag": [
                                {"type": "Mention", "href": "https://other.example/users/bob", "name": "@bob"},
                                {"type": "Hashtag", "href": "https://social.example/tags/weft", "name": "#weft"}
                            ],
                            "sensitive": false
                        }
                    },
                    "https://social.example/activities/0"
                ]
            }),
        ),
        (
            "person-with-extensions",
            json!({
                "type": "Person",
                "id": "https://social.example/users/alice",
                "preferredUsername": "alice",
                "inbox": "https://social.example/users/alice/inbox",
                "outbox": {"type": "OrderedCollection", "id": "https://social.example/users/alice/outbox", "totalItems": 12},
                "icon": {"type": "Image", "url": "https://social.example/media/alice.png", "mediaType": "image/png"},
                "publicKey": {
                    "id": "https://social.example/users/alice#main-key",
                    "owner": "https://social.example/users/alice",
                    "publicKeyPem": "-----BEGIN PUBLIC KEY-----..."
                },
                "discoverable": true
            }),
        ),
        (
            "event-with-scalars",
            json!({
                "type": "Event",
                "name": "Weft meetup",
                "startTime": "2026-03-01T18:00:00+01:00",
                "duration": "PT2H30M",
                "location": {"type": "Place", "name": "Hall", "latitude": 52.5, "longitude": 13.25, "units": "m"}
            }),
        ),
        (
            "place-with-whole-coordinates",
            json!({"type": "Place", "name": "Origin", "latitude": 52, "longitude": -13, "altitude": 0}),
        ),
        (
            "question",
            json!({
                "type": "Question",
                "name": "Tea or coffee?",
                "oneOf": [
                    {"type": "Note", "name": "Tea"},
                    {"type": "Note", "name": "Coffee"}
                ],
                "closed": "2026-03-02T00:00:00Z"
            }),
        ),
        (
            "tombstone",
            json!({
                "type": "Tombstone",
                "id": "https://social.example/notes/9",
                "formerType": "Note",
                "deleted": "2026-02-20T08:15:00Z"
            }),
        ),
    ]
}
