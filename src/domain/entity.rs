//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all dashboard records.
//! Every record has a server-assigned ID and belongs to one `EntityKind`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Core trait for all dashboard records
pub trait Entity: Sized + Send + Sync + Clone + Serialize + DeserializeOwned + 'static {
    /// Which of the dashboard collections this record lives in
    const KIND: EntityKind;

    /// Returns the record's unique identifier
    fn id(&self) -> &RecordId;

    /// Raw persisted status, for kinds that carry one
    fn status(&self) -> Option<&str> {
        None
    }
}

/// Server-assigned identity: numeric or textual depending on the collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Read an id out of a JSON record (`id`, falling back to `_id`)
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let raw = value.get("id").or_else(|| value.get("_id"))?;
        match raw {
            serde_json::Value::Number(n) => n.as_i64().map(RecordId::Number),
            serde_json::Value::String(s) if !s.is_empty() => Some(RecordId::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

/// The eleven record collections served by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Audit,
    Bill,
    Certification,
    ComplianceRecord,
    Document,
    Employee,
    Fleet,
    MilkEntry,
    QualityTest,
    CustomerReview,
    GroupMessage,
}

impl EntityKind {
    pub const ALL: [EntityKind; 11] = [
        EntityKind::Audit,
        EntityKind::Bill,
        EntityKind::Certification,
        EntityKind::ComplianceRecord,
        EntityKind::Document,
        EntityKind::Employee,
        EntityKind::Fleet,
        EntityKind::MilkEntry,
        EntityKind::QualityTest,
        EntityKind::CustomerReview,
        EntityKind::GroupMessage,
    ];

    /// REST collection path segment (`GET /{collection}`)
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Audit => "audits",
            EntityKind::Bill => "bills",
            EntityKind::Certification => "certifications",
            EntityKind::ComplianceRecord => "compliance",
            EntityKind::Document => "documents",
            EntityKind::Employee => "employees",
            EntityKind::Fleet => "fleet",
            EntityKind::MilkEntry => "milk-entries",
            EntityKind::QualityTest => "quality-tests",
            EntityKind::CustomerReview => "reviews",
            EntityKind::GroupMessage => "group-messages",
        }
    }

    /// Live event prefix (`{prefix}:created` etc.)
    pub fn event_prefix(&self) -> &'static str {
        match self {
            EntityKind::Audit => "audit",
            EntityKind::Bill => "bill",
            EntityKind::Certification => "certification",
            EntityKind::ComplianceRecord => "compliance",
            EntityKind::Document => "document",
            EntityKind::Employee => "employee",
            EntityKind::Fleet => "fleet",
            EntityKind::MilkEntry => "milkEntry",
            EntityKind::QualityTest => "qualityTest",
            EntityKind::CustomerReview => "review",
            EntityKind::GroupMessage => "groupMessage",
        }
    }

    /// Human-readable singular name, used in fallback error messages
    pub fn singular(&self) -> &'static str {
        match self {
            EntityKind::Audit => "audit",
            EntityKind::Bill => "bill",
            EntityKind::Certification => "certification",
            EntityKind::ComplianceRecord => "compliance record",
            EntityKind::Document => "document",
            EntityKind::Employee => "employee",
            EntityKind::Fleet => "vehicle",
            EntityKind::MilkEntry => "milk entry",
            EntityKind::QualityTest => "quality test",
            EntityKind::CustomerReview => "review",
            EntityKind::GroupMessage => "message",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Audit => "audits",
            EntityKind::Bill => "bills",
            EntityKind::Certification => "certifications",
            EntityKind::ComplianceRecord => "compliance records",
            EntityKind::Document => "documents",
            EntityKind::Employee => "employees",
            EntityKind::Fleet => "fleet vehicles",
            EntityKind::MilkEntry => "milk entries",
            EntityKind::QualityTest => "quality tests",
            EntityKind::CustomerReview => "reviews",
            EntityKind::GroupMessage => "messages",
        }
    }

    pub fn from_event_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.event_prefix() == prefix)
    }

    /// Accepts either the collection path or the event prefix
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.collection() == name || k.event_prefix().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

/// Field name -> user-facing message. Empty messages mean "no error".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the error for a field
    pub fn set(&mut self, field: &str, message: Option<String>) {
        match message {
            Some(msg) if !msg.is_empty() => {
                self.0.insert(field.to_string(), msg);
            }
            _ => {
                self.0.remove(field);
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str).filter(|m| !m.is_empty())
    }

    /// True while any field holds an error; submit stays disabled
    pub fn is_blocking(&self) -> bool {
        self.0.values().any(|m| !m.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Common result type for client-side operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Client-side errors. None of these are fatal to the screen.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncError {
    /// Network or HTTP layer failure, including timeouts
    RequestFailed(String),
    /// Field-level validation; never sent to the server
    ValidationFailed(FieldErrors),
    /// The record is gone on the server
    NotFound(String),
}

impl SyncError {
    /// Message suitable for an error banner
    pub fn user_message(&self) -> String {
        match self {
            SyncError::RequestFailed(msg) | SyncError::NotFound(msg) => msg.clone(),
            SyncError::ValidationFailed(errors) => {
                let fields: Vec<&str> = errors.iter().map(|(k, _)| k).collect();
                format!("Please fix: {}", fields.join(", "))
            }
        }
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            SyncError::ValidationFailed(errors) => {
                write!(f, "Validation failed on {} field(s)", errors.len())
            }
            SyncError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for SyncError {}
