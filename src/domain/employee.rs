//! Employee Entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::opt_date;
use super::entity::{Entity, EntityKind, RecordId};
use super::status::EmployeeStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// 10 digits, no separators
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub position: String,
    #[serde(default, with = "opt_date")]
    pub join_date: Option<NaiveDate>,
    #[serde(default)]
    pub salary: Option<f64>,
    pub status: EmployeeStatus,
}

impl Entity for Employee {
    const KIND: EntityKind = EntityKind::Employee;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}
