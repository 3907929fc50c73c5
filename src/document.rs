//! Path-based lookups over a parsed JSON document.
//!
//! Host code uses this to pull values out of a document when it builds event
//! payloads. The machine itself never inspects payloads.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A parsed JSON document.
///
/// Paths are dot-separated keys. A segment that parses as an integer indexes
/// into an array; the empty path is the document root.
///
/// # Example
///
/// ```rust
/// use statewire::JsonDocument;
///
/// let doc = JsonDocument::parse(r#"{"route": {"stops": [{"name": "Main St"}]}}"#).unwrap();
///
/// assert_eq!(doc.string("route.stops.0.name"), Some("Main St"));
/// assert!(doc.query("route.stops.1").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonDocument {
    root: Value,
}

impl JsonDocument {
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        Ok(Self {
            root: serde_json::from_str(text)?,
        })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    /// The value at `path`, if every segment resolves.
    pub fn query(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(&self.root);
        }
        path.split('.').try_fold(&self.root, step)
    }

    pub fn string(&self, path: &str) -> Option<&str> {
        self.query(path)?.as_str()
    }

    pub fn number(&self, path: &str) -> Option<f64> {
        self.query(path)?.as_f64()
    }

    pub fn integer(&self, path: &str) -> Option<i64> {
        self.query(path)?.as_i64()
    }

    pub fn array(&self, path: &str) -> Option<&Vec<Value>> {
        self.query(path)?.as_array()
    }

    pub fn object(&self, path: &str) -> Option<&Map<String, Value>> {
        self.query(path)?.as_object()
    }

    /// The first object, depth-first in document order, whose `property`
    /// equals `value`. The root itself is a candidate.
    pub fn first_matching(&self, property: &str, value: &Value) -> Option<&Value> {
        find_matching(&self.root, property, value)
    }
}

impl From<Value> for JsonDocument {
    fn from(root: Value) -> Self {
        Self { root }
    }
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn find_matching<'a>(node: &'a Value, property: &str, value: &Value) -> Option<&'a Value> {
    match node {
        Value::Object(map) => {
            if map.get(property) == Some(value) {
                return Some(node);
            }
            map.values()
                .find_map(|child| find_matching(child, property, value))
        }
        Value::Array(items) => items
            .iter()
            .find_map(|child| find_matching(child, property, value)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn route() -> JsonDocument {
        JsonDocument::from(json!({
            "id": "r-1",
            "distance": 1250.5,
            "stops": [
                { "kind": "stop", "name": "Main St", "order": 1 },
                { "kind": "junction", "name": "Oak Ave", "order": 2,
                  "exits": [{ "kind": "stop", "name": "Oak North" }] },
                { "kind": "stop", "name": "Elm St", "order": 3 }
            ],
            "meta": { "source": "osm" }
        }))
    }

    #[test]
    fn empty_path_is_root() {
        let doc = route();
        assert_eq!(doc.query(""), Some(doc.root()));
    }

    #[test]
    fn typed_lookups() {
        let doc = route();

        assert_eq!(doc.string("id"), Some("r-1"));
        assert_eq!(doc.number("distance"), Some(1250.5));
        assert_eq!(doc.integer("stops.2.order"), Some(3));
        assert_eq!(doc.array("stops").map(Vec::len), Some(3));
        assert!(doc.object("meta").is_some());
    }

    #[test]
    fn type_mismatch_is_none() {
        let doc = route();

        assert_eq!(doc.string("distance"), None);
        assert_eq!(doc.integer("id"), None);
        assert!(doc.array("meta").is_none());
    }

    #[test]
    fn missing_or_bad_segments_are_none() {
        let doc = route();

        assert!(doc.query("stops.9").is_none());
        assert!(doc.query("stops.first").is_none());
        assert!(doc.query("id.length").is_none());
        assert!(doc.query("nope").is_none());
    }

    #[test]
    fn first_matching_finds_nested_objects() {
        let doc = route();

        let junction = doc.first_matching("kind", &json!("junction")).unwrap();
        assert_eq!(junction["name"], "Oak Ave");

        let north = doc.first_matching("name", &json!("Oak North")).unwrap();
        assert_eq!(north["kind"], "stop");

        assert!(doc.first_matching("kind", &json!("tunnel")).is_none());
    }

    #[test]
    fn nested_match_wins_over_later_sibling() {
        let doc = JsonDocument::from(json!([
            { "child": { "tag": 1, "id": "deep" } },
            { "tag": 1, "id": "shallow" }
        ]));

        let found = doc.first_matching("tag", &json!(1)).unwrap();
        assert_eq!(found["id"], "deep");
    }

    #[test]
    fn first_matching_considers_root() {
        let doc = route();
        let found = doc.first_matching("id", &json!("r-1")).unwrap();
        assert_eq!(found, doc.root());
    }

    #[test]
    fn parse_rejects_invalid_json() {
        assert!(matches!(
            JsonDocument::parse("{not json"),
            Err(DocumentError::Parse(_))
        ));
    }
}
