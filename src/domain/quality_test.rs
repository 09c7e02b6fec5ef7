//! Quality Test Entity
//!
//! Lab results for a milk sample.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::opt_date;
use super::entity::{Entity, EntityKind, RecordId};
use super::status::TestResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityTest {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub sample_id: String,
    #[serde(default)]
    pub batch_number: Option<String>,
    #[serde(default, with = "opt_date")]
    pub test_date: Option<NaiveDate>,
    /// 6-8
    #[serde(default)]
    pub ph: Option<f64>,
    #[serde(default)]
    pub fat_content: Option<f64>,
    #[serde(default)]
    pub snf: Option<f64>,
    /// CFU/ml
    #[serde(default)]
    pub bacteria_count: Option<i64>,
    #[serde(default)]
    pub tested_by: String,
    pub result: TestResult,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl Entity for QualityTest {
    const KIND: EntityKind = EntityKind::QualityTest;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.result.as_str())
    }
}
