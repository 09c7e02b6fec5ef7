//! Form State
//!
//! Raw string inputs keyed by field name, and their coercion into a request
//! payload once validation passes.

use serde::Serialize;
use serde_json::{Number, Value};
use std::collections::BTreeMap;

use super::rules::{FieldKind, FieldRule};
use crate::client::Payload;
use crate::domain::{FieldErrors, SyncError, SyncResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: BTreeMap<String, String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill from an existing record (edit modal)
    pub fn from_record<T: Serialize>(record: &T) -> Self {
        let mut form = Self::new();
        if let Ok(Value::Object(fields)) = serde_json::to_value(record) {
            for (name, value) in fields {
                let text = match value {
                    Value::Null => String::new(),
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                form.values.insert(name, text);
            }
        }
        form
    }

    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build the request body.
    ///
    /// Numeric fields become numbers. Empty optional fields become `null`
    /// (never `0`); an empty `id` is left out so the server assigns one.
    pub fn to_payload(&self, rules: &[FieldRule]) -> SyncResult<Payload> {
        let mut payload = Payload::new();
        let mut errors = FieldErrors::new();

        for (name, raw) in &self.values {
            let rule = rules.iter().find(|r| r.name == name.as_str());
            let trimmed = raw.trim();

            if name == "id" && trimmed.is_empty() {
                continue;
            }

            if trimmed.is_empty() {
                match rule {
                    // Unknown fields fall back to the record's serde defaults
                    None => continue,
                    Some(r) if !r.required => {
                        payload.insert(name.clone(), Value::Null);
                        continue;
                    }
                    Some(_) => {}
                }
            }

            let value = match rule.map(|r| r.kind) {
                Some(FieldKind::Number { .. }) => match trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
                    Some(n) => Value::Number(n),
                    None => {
                        errors.set(name, Some(format!("{} must be a number", label_of(rule, name))));
                        continue;
                    }
                },
                Some(FieldKind::Integer { .. }) => match trimmed.parse::<i64>() {
                    Ok(n) => Value::Number(n.into()),
                    Err(_) => {
                        errors.set(name, Some(format!("{} must be a whole number", label_of(rule, name))));
                        continue;
                    }
                },
                Some(_) => Value::String(trimmed.to_string()),
                None => Value::String(raw.clone()),
            };
            payload.insert(name.clone(), value);
        }

        if errors.is_blocking() {
            return Err(SyncError::ValidationFailed(errors));
        }
        Ok(payload)
    }
}

fn label_of<'a>(rule: Option<&'a FieldRule>, name: &'a str) -> &'a str {
    rule.map_or(name, |r| r.label)
}
