//! Flattening of nested documents
//!
//! Nested objects are expanded into one field per leaf, with the path joined
//! by a separator:
//! - `{"user": {"age": 30}}` → `{"user.age": 30}`
//! - `{"a": {"b": {"c": 1}}}` → `{"a.b.c": 1}`
//!
//! Arrays and empty objects are leaves and are kept as they are.

use crate::adapters::store::Document;
use serde_json::Value;

/// Flatten a document using the given path separator
///
/// When a flattened path collides with an existing top-level field, the
/// value that comes later in document order wins.
///
/// # Examples
///
/// ```
/// use harvest::core::transform::flatten::flatten_document;
/// use serde_json::json;
///
/// let doc = json!({"id": 1, "user": {"name": "ada", "address": {"city": "London"}}});
/// let flat = flatten_document(doc.as_object().unwrap().clone(), ".");
///
/// assert_eq!(flat["user.name"], "ada");
/// assert_eq!(flat["user.address.city"], "London");
/// ```
pub fn flatten_document(document: Document, separator: &str) -> Document {
    let mut flat = Document::new();
    for (key, value) in document {
        flatten_into(&mut flat, key, value, separator);
    }
    flat
}

fn flatten_into(out: &mut Document, path: String, value: Value, separator: &str) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, nested) in map {
                flatten_into(out, join_path(&path, &key, separator), nested, separator);
            }
        }
        leaf => {
            out.insert(path, leaf);
        }
    }
}

fn join_path(prefix: &str, key: &str, separator: &str) -> String {
    let mut joined = String::with_capacity(prefix.len() + separator.len() + key.len());
    joined.push_str(prefix);
    joined.push_str(separator);
    joined.push_str(key);
    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("user", "age", "."), "user.age");
        assert_eq!(join_path("user", "age", "__"), "user__age");
    }

    #[test]
    fn test_flatten_nested_objects() {
        let flat = flatten_document(
            doc(json!({
                "title": "great",
                "meta": {"stars": 5, "source": {"site": "web", "lang": "en"}}
            })),
            ".",
        );

        assert_eq!(flat.len(), 4);
        assert_eq!(flat["title"], "great");
        assert_eq!(flat["meta.stars"], 5);
        assert_eq!(flat["meta.source.site"], "web");
        assert_eq!(flat["meta.source.lang"], "en");
    }

    #[test]
    fn test_flatten_keeps_arrays_and_empty_objects() {
        let flat = flatten_document(doc(json!({"tags": ["a", "b"], "extra": {}})), "_");

        assert_eq!(flat["tags"], json!(["a", "b"]));
        assert_eq!(flat["extra"], json!({}));
    }

    #[test]
    fn test_flatten_preserves_field_order() {
        let flat = flatten_document(doc(json!({"z": 1, "a": {"y": 2, "b": 3}, "m": 4})), ".");
        let keys: Vec<&str> = flat.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a.y", "a.b", "m"]);
    }

    #[test]
    fn test_flatten_flat_document_is_unchanged() {
        let original = doc(json!({"a": 1, "b": "two", "c": null}));
        assert_eq!(flatten_document(original.clone(), "."), original);
    }
}
