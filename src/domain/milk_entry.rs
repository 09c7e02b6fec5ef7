//! Milk Entry Entity
//!
//! One collection from one farmer in one shift.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::opt_date;
use super::entity::{Entity, EntityKind, RecordId};
use super::status::Shift;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilkEntry {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub farmer_id: String,
    #[serde(default)]
    pub farmer_name: String,
    #[serde(default, with = "opt_date")]
    pub date: Option<NaiveDate>,
    pub shift: Shift,
    /// Litres
    #[serde(default)]
    pub quantity: f64,
    /// Fat percentage, 0-10
    #[serde(default)]
    pub fat_content: Option<f64>,
    /// Solids-not-fat percentage
    #[serde(default)]
    pub snf: Option<f64>,
    /// Price per litre
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub amount: Option<f64>,
}

impl MilkEntry {
    /// Stored amount, or quantity * rate when the backend left it blank
    pub fn effective_amount(&self) -> f64 {
        self.amount
            .or_else(|| self.rate.map(|r| r * self.quantity))
            .unwrap_or(0.0)
    }
}

impl Entity for MilkEntry {
    const KIND: EntityKind = EntityKind::MilkEntry;

    fn id(&self) -> &RecordId {
        &self.id
    }
}
