//! Live Event Payloads
//!
//! Event names are `{prefix}:created|updated|deleted`; payloads are
//! `{ "data": Record }`. A bare record is accepted too.

use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

use crate::domain::{Entity, EntityKind, RecordId, SyncError, SyncResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiveAction {
    Created,
    Updated,
    Deleted,
}

impl LiveAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiveAction::Created => "created",
            LiveAction::Updated => "updated",
            LiveAction::Deleted => "deleted",
        }
    }
}

impl FromStr for LiveAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(LiveAction::Created),
            "updated" => Ok(LiveAction::Updated),
            "deleted" => Ok(LiveAction::Deleted),
            other => Err(format!("Unknown live action '{}'", other)),
        }
    }
}

impl fmt::Display for LiveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn event_name(kind: EntityKind, action: LiveAction) -> String {
    format!("{}:{}", kind.event_prefix(), action.as_str())
}

/// Split `audit:created` into its kind and action
pub fn parse_event_name(name: &str) -> Option<(EntityKind, LiveAction)> {
    let (prefix, action) = name.split_once(':')?;
    Some((EntityKind::from_event_prefix(prefix)?, action.parse::<LiveAction>().ok()?))
}

/// A decoded notification for one record type
#[derive(Debug, Clone, PartialEq)]
pub enum LiveEvent<T> {
    Created(T),
    Updated(T),
    Deleted(RecordId),
}

impl<T: Entity> LiveEvent<T> {
    pub fn decode(action: LiveAction, payload: &Value) -> SyncResult<Self> {
        let record = match payload.get("data") {
            Some(data) if data.is_object() => data,
            _ => payload,
        };
        let invalid = |detail: String| {
            SyncError::RequestFailed(format!(
                "Malformed {} event for {}: {}",
                action,
                T::KIND.singular(),
                detail
            ))
        };

        match action {
            LiveAction::Deleted => RecordId::from_json(record)
                .map(LiveEvent::Deleted)
                .ok_or_else(|| invalid("missing id".to_string())),
            LiveAction::Created | LiveAction::Updated => {
                let parsed: T = serde_json::from_value(record.clone()).map_err(|e| invalid(e.to_string()))?;
                Ok(if action == LiveAction::Created {
                    LiveEvent::Created(parsed)
                } else {
                    LiveEvent::Updated(parsed)
                })
            }
        }
    }

    pub fn action(&self) -> LiveAction {
        match self {
            LiveEvent::Created(_) => LiveAction::Created,
            LiveEvent::Updated(_) => LiveAction::Updated,
            LiveEvent::Deleted(_) => LiveAction::Deleted,
        }
    }

    pub fn id(&self) -> &RecordId {
        match self {
            LiveEvent::Created(r) | LiveEvent::Updated(r) => r.id(),
            LiveEvent::Deleted(id) => id,
        }
    }

    /// Wire payload, as the socket server would send it
    pub fn to_payload(&self) -> Value {
        match self {
            LiveEvent::Created(r) | LiveEvent::Updated(r) => {
                json!({ "data": serde_json::to_value(r).unwrap_or(Value::Null) })
            }
            LiveEvent::Deleted(id) => json!({ "data": { "id": id } }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Audit, AuditStatus};

    #[test]
    fn test_parse_event_name() {
        assert_eq!(
            parse_event_name("audit:deleted"),
            Some((EntityKind::Audit, LiveAction::Deleted))
        );
        assert_eq!(
            parse_event_name("qualityTest:updated"),
            Some((EntityKind::QualityTest, LiveAction::Updated))
        );
        assert_eq!(parse_event_name("audit:archived"), None);
        assert_eq!(parse_event_name("nothing"), None);
        assert_eq!(event_name(EntityKind::MilkEntry, LiveAction::Created), "milkEntry:created");
    }

    #[test]
    fn test_action_parses_from_its_display_form() {
        for action in [LiveAction::Created, LiveAction::Updated, LiveAction::Deleted] {
            assert_eq!(action.to_string().parse::<LiveAction>(), Ok(action));
        }
        assert_eq!("Created".parse::<LiveAction>(), Err("Unknown live action 'Created'".to_string()));
    }

    #[test]
    fn test_decode_enveloped_and_bare() {
        let record = json!({"id": "AUD0001", "status": "Scheduled", "audit_type": "Hygiene"});
        let wrapped = LiveEvent::<Audit>::decode(LiveAction::Created, &json!({"data": record.clone()})).unwrap();
        let bare = LiveEvent::<Audit>::decode(LiveAction::Created, &record).unwrap();
        assert_eq!(wrapped, bare);
        match wrapped {
            LiveEvent::Created(a) => assert_eq!(a.status, AuditStatus::Scheduled),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_decode_delete_reads_id_from_record() {
        let event = LiveEvent::<Audit>::decode(
            LiveAction::Deleted,
            &json!({"data": {"_id": "AUD0002", "status": "Completed"}}),
        )
        .unwrap();
        assert_eq!(event, LiveEvent::Deleted("AUD0002".into()));
        assert!(LiveEvent::<Audit>::decode(LiveAction::Deleted, &json!({"data": {}})).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = LiveEvent::<Audit>::decode(LiveAction::Updated, &json!({"data": {"id": 1}})).unwrap_err();
        assert!(matches!(err, SyncError::RequestFailed(_)));
    }
}
