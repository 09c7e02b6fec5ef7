//! Response Envelopes
//!
//! The backend answers with either a bare value or `{ "data": ... }`.
//! Lists unwrap defensively: anything unexpected becomes an empty list.

use serde_json::Value;

use crate::domain::{Entity, SyncError, SyncResult};

/// `data` array if present, else the body if it is an array, else empty
pub fn unwrap_list(body: Value) -> Vec<Value> {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

/// `data` object if present, else the body itself
pub fn unwrap_record(body: Value) -> Value {
    match body {
        Value::Object(mut map) if matches!(map.get("data"), Some(Value::Object(_))) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Decode every list element; elements that do not fit `T` are skipped
pub fn decode_list<T: Entity>(body: Value) -> Vec<T> {
    let items = unwrap_list(body);
    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Skipping malformed {} record: {}", T::KIND.singular(), e);
                None
            }
        })
        .collect();
    if records.len() != total {
        log::warn!("Loaded {} of {} {}", records.len(), total, T::KIND.plural());
    }
    records
}

pub fn decode_record<T: Entity>(body: Value, fallback: String) -> SyncResult<T> {
    serde_json::from_value(unwrap_record(body)).map_err(|e| {
        log::warn!("Unexpected {} response: {}", T::KIND.singular(), e);
        SyncError::RequestFailed(fallback)
    })
}

/// Server-provided `message` (or `error`) from an error body
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key))
        .find_map(|v| v.as_str().map(str::trim).filter(|s| !s.is_empty()).map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Audit;
    use serde_json::json;

    #[test]
    fn test_unwrap_list_shapes() {
        assert_eq!(unwrap_list(json!({"data": [1, 2]})).len(), 2);
        assert_eq!(unwrap_list(json!([1, 2, 3])).len(), 3);
        assert!(unwrap_list(json!({"data": {"id": 1}})).is_empty());
        assert!(unwrap_list(json!({"items": [1]})).is_empty());
        assert!(unwrap_list(json!("oops")).is_empty());
        assert!(unwrap_list(Value::Null).is_empty());
    }

    #[test]
    fn test_unwrap_record_shapes() {
        assert_eq!(unwrap_record(json!({"data": {"id": 1}})), json!({"id": 1}));
        assert_eq!(unwrap_record(json!({"id": 1, "data": "x"})), json!({"id": 1, "data": "x"}));
    }

    #[test]
    fn test_decode_list_skips_bad_rows() {
        let records: Vec<Audit> = decode_list(json!({"data": [
            {"id": "AUD0001", "status": "Scheduled"},
            {"id": "AUD0002"},
            {"id": "AUD0003", "status": "Completed"}
        ]}));
        let ids: Vec<String> = records.iter().map(|a| a.id.to_string()).collect();
        assert_eq!(ids, vec!["AUD0001", "AUD0003"]);
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(r#"{"message": "Audit not found"}"#).as_deref(), Some("Audit not found"));
        assert_eq!(error_message(r#"{"error": "bad"}"#).as_deref(), Some("bad"));
        assert_eq!(error_message(r#"{"message": "  "}"#), None);
        assert_eq!(error_message("<html>502</html>"), None);
    }
}
