//! Audit Entity
//!
//! A scheduled farm or plant audit with an optional score.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::opt_date;
use super::entity::{Entity, EntityKind, RecordId};
use super::status::AuditStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audit {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub audit_type: String,
    #[serde(default)]
    pub auditor: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, with = "opt_date")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default, with = "opt_date")]
    pub completed_date: Option<NaiveDate>,
    pub status: AuditStatus,
    /// 0-100
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub findings: Option<String>,
}

impl Audit {
    pub fn new(id: impl Into<RecordId>, audit_type: &str, scheduled_date: Option<NaiveDate>, status: AuditStatus) -> Self {
        Self {
            id: id.into(),
            audit_type: audit_type.to_string(),
            auditor: String::new(),
            department: None,
            scheduled_date,
            completed_date: None,
            status,
            score: None,
            findings: None,
        }
    }
}

impl Entity for Audit {
    const KIND: EntityKind = EntityKind::Audit;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}
