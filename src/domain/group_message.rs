//! Group Message Entity
//!
//! Broadcast messages to farmer groups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, RecordId};
use super::status::MessagePriority;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMessage {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub content: String,
    pub priority: MessagePriority,
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
}

impl Entity for GroupMessage {
    const KIND: EntityKind = EntityKind::GroupMessage;

    fn id(&self) -> &RecordId {
        &self.id
    }
}
