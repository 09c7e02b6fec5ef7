//! Certification Entity
//!
//! Licences and quality certificates held by the business (FSSAI, ISO, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::opt_date;
use super::entity::{Entity, EntityKind, RecordId};
use super::status::CertificationStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub certificate_number: String,
    #[serde(default)]
    pub issuing_authority: String,
    #[serde(default, with = "opt_date")]
    pub issue_date: Option<NaiveDate>,
    #[serde(default, with = "opt_date")]
    pub expiry_date: Option<NaiveDate>,
    pub status: CertificationStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Entity for Certification {
    const KIND: EntityKind = EntityKind::Certification;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}
