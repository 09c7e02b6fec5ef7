//! Fleet Entity
//!
//! Collection and delivery vehicles (tankers, vans).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::opt_date;
use super::entity::{Entity, EntityKind, RecordId};
use super::status::FleetStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fleet {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub vehicle_number: String,
    #[serde(default)]
    pub vehicle_type: String,
    #[serde(default)]
    pub driver_name: String,
    #[serde(default)]
    pub capacity_liters: Option<f64>,
    #[serde(default, with = "opt_date")]
    pub last_service_date: Option<NaiveDate>,
    #[serde(default, with = "opt_date")]
    pub next_service_date: Option<NaiveDate>,
    #[serde(default, with = "opt_date")]
    pub insurance_expiry: Option<NaiveDate>,
    pub status: FleetStatus,
}

impl Entity for Fleet {
    const KIND: EntityKind = EntityKind::Fleet;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}
