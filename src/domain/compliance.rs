//! Compliance Record Entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::opt_date;
use super::entity::{Entity, EntityKind, RecordId};
use super::status::ComplianceStatus;

/// One regulatory requirement and its inspection/due dates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRecord {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub regulation: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub responsible_person: String,
    #[serde(default, with = "opt_date")]
    pub inspection_date: Option<NaiveDate>,
    #[serde(default, with = "opt_date")]
    pub due_date: Option<NaiveDate>,
    pub status: ComplianceStatus,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl Entity for ComplianceRecord {
    const KIND: EntityKind = EntityKind::ComplianceRecord;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}
