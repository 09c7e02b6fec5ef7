//! Column Sort
//!
//! Sorts by any serialized field. Independent of store order: the store keeps
//! newest-first after live creates, the table shows whatever column is active.

use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub descending: bool,
}

impl SortSpec {
    pub fn asc(field: &str) -> Self {
        Self { field: field.to_string(), descending: false }
    }

    pub fn desc(field: &str) -> Self {
        Self { field: field.to_string(), descending: true }
    }
}

/// Stable sort; missing and null values always go last
pub fn sort_records<T: Serialize>(records: &mut Vec<&T>, spec: &SortSpec) {
    let mut keyed: Vec<(Value, &T)> = records
        .drain(..)
        .map(|r| (field_value(r, &spec.field), r))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = compare_values(a, b);
            if spec.descending {
                ord.reverse()
            } else {
                ord
            }
        }
    });

    records.extend(keyed.into_iter().map(|(_, r)| r));
}

fn field_value<T: Serialize>(record: &T, field: &str) -> Value {
    match serde_json::to_value(record) {
        Ok(Value::Object(mut map)) => map.remove(field).unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(_), _) => Ordering::Less,
        (_, Value::Number(_)) => Ordering::Greater,
        _ => a.to_string().cmp(&b.to_string()),
    }
}
