//! Customer Review Entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::opt_date;
use super::entity::{Entity, EntityKind, RecordId};
use super::status::ReviewStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerReview {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub product: String,
    /// 1-5 stars
    #[serde(default)]
    pub rating: i64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, with = "opt_date")]
    pub review_date: Option<NaiveDate>,
    pub status: ReviewStatus,
}

impl Entity for CustomerReview {
    const KIND: EntityKind = EntityKind::CustomerReview;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}
