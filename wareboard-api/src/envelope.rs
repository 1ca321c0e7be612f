//! Defensive extraction of list payloads from loosely-shaped responses.
//!
//! The warehouse backend is not consistent about its response envelope:
//! depending on the endpoint (and its age), a list may arrive as
//! `{ "items": [...] }`, `{ "data": { "items": [...] } }`,
//! `{ "result": { "items": [...] } }`, or a bare array. An ordered list of
//! extractors is tried in sequence; the first match wins, and no match
//! degrades to an empty page rather than an error.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::query::Page;

/// A single envelope extractor. Returns the items array if this shape matches.
type Extractor = fn(&Value) -> Option<&Vec<Value>>;

fn items(value: &Value) -> Option<&Vec<Value>> {
    value.get("items")?.as_array()
}

fn data_items(value: &Value) -> Option<&Vec<Value>> {
    value.get("data")?.get("items")?.as_array()
}

fn result_items(value: &Value) -> Option<&Vec<Value>> {
    value.get("result")?.get("items")?.as_array()
}

fn bare_array(value: &Value) -> Option<&Vec<Value>> {
    value.as_array()
}

/// Known envelope shapes, in probe order.
const EXTRACTORS: &[Extractor] = &[items, data_items, result_items, bare_array];

/// Paths probed for a total record count, matching the envelope shapes above.
const TOTAL_KEYS: &[&[&str]] = &[
    &["total_count"],
    &["totalCount"],
    &["total"],
    &["data", "total_count"],
    &["data", "total"],
    &["result", "total_count"],
    &["result", "total"],
];

/// Extracts the raw item array from a response, trying each known envelope.
///
/// Returns `None` when no shape matches.
pub fn extract_items(value: &Value) -> Option<&Vec<Value>> {
    EXTRACTORS.iter().find_map(|extract| extract(value))
}

/// Extracts the total record count, if the response reports one.
pub fn extract_total_count(value: &Value) -> Option<usize> {
    TOTAL_KEYS.iter().find_map(|path| {
        let mut current = value;
        for key in *path {
            current = current.get(key)?;
        }
        current.as_u64().map(|n| n as usize)
    })
}

/// Extracts a typed page from a loosely-shaped list response.
///
/// Items that fail to deserialize are skipped rather than failing the whole
/// page; a response matching no known envelope yields an empty page.
pub fn extract_page<T: DeserializeOwned>(value: &Value, page: usize, page_size: usize) -> Page<T> {
    let rows = match extract_items(value) {
        Some(raw) => raw
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        None => Vec::new(),
    };

    let mut result = Page::new(rows, page, page_size);
    if let Some(total) = extract_total_count(value) {
        result = result.with_total_count(total);
    }
    result
}

/// Extracts a detail object, unwrapping the `data` / `result` envelopes.
///
/// Detail endpoints wrap single objects the same inconsistent way list
/// endpoints wrap arrays. Falls back to the value itself.
pub fn extract_object(value: &Value) -> &Value {
    for key in ["data", "result"] {
        if let Some(inner) = value.get(key)
            && inner.is_object()
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::model::Warehouse;

    #[test]
    fn test_items_envelope() {
        let value = json!({ "items": [1, 2, 3] });
        assert_eq!(extract_items(&value).map(|v| v.len()), Some(3));
    }

    #[test]
    fn test_nested_envelopes() {
        let data = json!({ "data": { "items": [1] } });
        let result = json!({ "result": { "items": [1, 2] } });
        assert_eq!(extract_items(&data).map(|v| v.len()), Some(1));
        assert_eq!(extract_items(&result).map(|v| v.len()), Some(2));
    }

    #[test]
    fn test_bare_array() {
        let value = json!([1, 2, 3, 4]);
        assert_eq!(extract_items(&value).map(|v| v.len()), Some(4));
    }

    #[test]
    fn test_unknown_shape_yields_empty_page() {
        let value = json!({ "rows": [1, 2] });
        assert!(extract_items(&value).is_none());
        let page = extract_page::<Warehouse>(&value, 1, 25);
        assert!(page.is_empty());
        assert!(!page.has_more());
    }

    #[test]
    fn test_total_count_variants() {
        assert_eq!(extract_total_count(&json!({ "total_count": 42 })), Some(42));
        assert_eq!(extract_total_count(&json!({ "totalCount": 7 })), Some(7));
        assert_eq!(extract_total_count(&json!({ "total": 9 })), Some(9));
        assert_eq!(
            extract_total_count(&json!({ "data": { "total_count": 5 } })),
            Some(5)
        );
        assert_eq!(
            extract_total_count(&json!({ "result": { "total": 3 } })),
            Some(3)
        );
        assert_eq!(extract_total_count(&json!({ "items": [] })), None);
    }

    #[test]
    fn test_malformed_items_are_skipped() {
        let value = json!({
            "items": [
                { "id": "w1", "code": "A", "name": "Central" },
                { "id": 12 },
                { "id": "w2", "code": "B", "name": "East" }
            ],
            "total_count": 3
        });
        let page = extract_page::<Warehouse>(&value, 1, 25);
        assert_eq!(page.len(), 2);
        assert_eq!(page.total_count(), Some(3));
    }

    #[test]
    fn test_extract_object_unwraps() {
        let wrapped = json!({ "data": { "id": "o1" } });
        assert_eq!(extract_object(&wrapped), &json!({ "id": "o1" }));

        let plain = json!({ "id": "o2" });
        assert_eq!(extract_object(&plain), &plain);

        // A non-object `data` field is not an envelope.
        let data_field = json!({ "data": [1, 2], "id": "o3" });
        assert_eq!(extract_object(&data_field), &data_field);
    }
}
