//! Bill Entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::opt_date;
use super::entity::{Entity, EntityKind, RecordId};
use super::status::BillStatus;

/// A customer bill for milk or product deliveries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default, with = "opt_date")]
    pub bill_date: Option<NaiveDate>,
    #[serde(default, with = "opt_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub paid_amount: Option<f64>,
    pub status: BillStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Bill {
    /// Amount still owed (never negative)
    pub fn outstanding(&self) -> f64 {
        match self.status {
            BillStatus::Paid | BillStatus::Cancelled => 0.0,
            _ => (self.amount - self.paid_amount.unwrap_or(0.0)).max(0.0),
        }
    }
}

impl Entity for Bill {
    const KIND: EntityKind = EntityKind::Bill;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}
