//! Document Entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::opt_date;
use super::entity::{Entity, EntityKind, RecordId};
use super::status::DocumentStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default, with = "opt_date")]
    pub issue_date: Option<NaiveDate>,
    /// Documents without an expiry never expire
    #[serde(default, with = "opt_date")]
    pub expiry_date: Option<NaiveDate>,
    pub status: DocumentStatus,
    #[serde(default)]
    pub file_url: Option<String>,
}

impl Entity for Document {
    const KIND: EntityKind = EntityKind::Document;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}
