//! Entity List Store
//!
//! In-memory ordered copy of one collection. Every write is a full-record
//! replace keyed by id; nothing is merged field by field.

use serde_json::Value;

use crate::client::EntityClient;
use crate::domain::{Entity, RecordId, SyncResult};
use crate::live::LiveEvent;

#[derive(Debug, Clone)]
pub struct EntityListStore<T> {
    records: Vec<T>,
}

impl<T> Default for EntityListStore<T> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<T: Entity> EntityListStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<T>) -> Self {
        Self { records }
    }

    /// Records in store order
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.get(id).is_some()
    }

    fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    /// Replace everything with the server's current list.
    ///
    /// On failure the list is emptied and the error returned.
    pub async fn load<C>(&mut self, client: &C) -> SyncResult<usize>
    where
        C: EntityClient<T> + ?Sized,
    {
        match client.list().await {
            Ok(records) => {
                self.replace_all(records);
                log::info!("Loaded {} {}", self.records.len(), T::KIND.plural());
                Ok(self.records.len())
            }
            Err(e) => {
                self.records.clear();
                log::error!("Loading {} failed: {}", T::KIND.plural(), e);
                Err(e)
            }
        }
    }

    /// Full replace, no merge with prior state
    pub fn replace_all(&mut self, records: Vec<T>) {
        self.records = records;
    }

    /// Prepend a new record; an existing id is replaced in place instead
    pub fn apply_created(&mut self, record: T) {
        match self.position(record.id()) {
            Some(index) => self.records[index] = record,
            None => self.records.insert(0, record),
        }
    }

    /// Replace the record with the same id; unknown ids are appended
    pub fn apply_updated(&mut self, record: T) {
        match self.position(record.id()) {
            Some(index) => self.records[index] = record,
            None => self.records.push(record),
        }
    }

    /// Remove by id. Returns whether anything was removed.
    pub fn apply_deleted(&mut self, id: &RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        self.records.len() != before
    }

    pub fn apply(&mut self, event: LiveEvent<T>) {
        log::debug!("Applying {} {} {}", T::KIND.singular(), event.action(), event.id());
        match event {
            LiveEvent::Created(record) => self.apply_created(record),
            LiveEvent::Updated(record) => self.apply_updated(record),
            LiveEvent::Deleted(id) => {
                self.apply_deleted(&id);
            }
        }
    }

    /// Case-insensitive substring search over every field value.
    ///
    /// Blank search text returns the whole list in store order. Null fields
    /// never match.
    pub fn filtered(&self, search: &str) -> Vec<&T> {
        let needle = search.trim().to_lowercase();
        if needle.is_empty() {
            return self.records.iter().collect();
        }
        self.records
            .iter()
            .filter(|record| record_matches(*record, &needle))
            .collect()
    }
}

fn record_matches<T: Entity>(record: &T, needle: &str) -> bool {
    match serde_json::to_value(record) {
        Ok(Value::Object(fields)) => fields.values().any(|v| value_matches(v, needle)),
        Ok(other) => value_matches(&other, needle),
        Err(_) => false,
    }
}

fn value_matches(value: &Value, needle: &str) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => s.to_lowercase().contains(needle),
        Value::Number(n) => number_text(n).contains(needle),
        Value::Bool(b) => b.to_string().contains(needle),
        Value::Array(items) => items.iter().any(|v| value_matches(v, needle)),
        Value::Object(map) => map.values().any(|v| value_matches(v, needle)),
    }
}

/// Numbers as the table shows them: `95.0` reads `95`
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryClient;
    use crate::domain::{Audit, AuditStatus, SyncError};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn audit(id: &str, audit_type: &str, status: AuditStatus) -> Audit {
        Audit::new(id, audit_type, NaiveDate::from_ymd_opt(2024, 1, 10), status)
    }

    fn ids(records: &[&Audit]) -> Vec<String> {
        records.iter().map(|a| a.id.to_string()).collect()
    }

    #[test]
    fn test_created_prepends_and_dedupes() {
        let mut store = EntityListStore::from_records(vec![audit("AUD0001", "Hygiene", AuditStatus::Scheduled)]);
        store.apply_created(audit("AUD0002", "Safety", AuditStatus::Scheduled));
        assert_eq!(ids(&store.filtered("")), vec!["AUD0002", "AUD0001"]);

        store.apply_created(audit("AUD0001", "Hygiene v2", AuditStatus::InProgress));
        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[1].audit_type, "Hygiene v2");
    }

    #[test]
    fn test_updated_replaces_or_appends() {
        let mut store = EntityListStore::from_records(vec![
            audit("AUD0001", "Hygiene", AuditStatus::Scheduled),
            audit("AUD0002", "Safety", AuditStatus::Scheduled),
        ]);
        let mut changed = audit("AUD0001", "Hygiene", AuditStatus::Completed);
        changed.score = Some(95.0);
        store.apply_updated(changed.clone());
        assert_eq!(store.records()[0], changed);

        store.apply_updated(audit("AUD0003", "Water", AuditStatus::Scheduled));
        assert_eq!(ids(&store.filtered("")), vec!["AUD0001", "AUD0002", "AUD0003"]);
    }

    #[test]
    fn test_deleted_is_idempotent() {
        let mut store = EntityListStore::from_records(vec![audit("AUD0001", "Hygiene", AuditStatus::Scheduled)]);
        assert!(store.apply_deleted(&"AUD0001".into()));
        assert!(!store.apply_deleted(&"AUD0001".into()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_filtered_is_case_insensitive_and_skips_nulls() {
        let mut with_findings = audit("AUD0001", "Hygiene", AuditStatus::Scheduled);
        with_findings.findings = Some("Drainage OVERDUE-TERM cleaning".into());
        let store = EntityListStore::from_records(vec![
            with_findings,
            audit("AUD0002", "Safety", AuditStatus::Completed),
        ]);

        assert_eq!(ids(&store.filtered("overdue-term")), vec!["AUD0001"]);
        assert_eq!(ids(&store.filtered("  COMPLETED ")), vec!["AUD0002"]);
        assert_eq!(ids(&store.filtered("2024-01-10")), vec!["AUD0001", "AUD0002"]);
        assert!(store.filtered("null").is_empty());
        assert_eq!(store.filtered("   ").len(), 2);
    }

    #[test]
    fn test_filtered_matches_whole_scores_as_displayed() {
        let mut graded = audit("AUD0001", "Hygiene", AuditStatus::Completed);
        graded.score = Some(95.0);
        let mut partial = audit("AUD0002", "Safety", AuditStatus::Completed);
        partial.score = Some(87.5);
        let store = EntityListStore::from_records(vec![graded, partial]);

        assert_eq!(ids(&store.filtered("95")), vec!["AUD0001"]);
        assert!(store.filtered("95.0").is_empty());
        assert_eq!(ids(&store.filtered("87.5")), vec!["AUD0002"]);
    }

    #[tokio::test]
    async fn test_load_replaces_and_clears_on_failure() {
        let client = InMemoryClient::new(vec![
            audit("AUD0001", "Hygiene", AuditStatus::Scheduled),
            audit("AUD0002", "Safety", AuditStatus::Scheduled),
        ]);
        let mut store = EntityListStore::new();
        store.apply_created(audit("AUD0099", "Local only", AuditStatus::Scheduled));

        assert_eq!(store.load(&client).await.unwrap(), 2);
        assert!(!store.contains(&"AUD0099".into()));

        client.fail_next("Network Error").await;
        let err = store.load(&client).await.unwrap_err();
        assert_eq!(err, SyncError::RequestFailed("Network Error".into()));
        assert!(store.is_empty());
    }

    fn arb_audit() -> impl Strategy<Value = Audit> {
        (0u8..20, "[a-z]{0,8}", prop::sample::select(AuditStatus::ALLOWED.to_vec()))
            .prop_map(|(n, kind, status)| audit(&format!("AUD{:04}", n), &kind, AuditStatus::from(status)))
    }

    proptest! {
        #[test]
        fn prop_create_then_delete_removes(seed in prop::collection::vec(arb_audit(), 0..10), r in arb_audit()) {
            let mut store = EntityListStore::from_records(seed);
            store.apply_created(r.clone());
            store.apply_deleted(r.id());
            prop_assert!(!store.contains(r.id()));
        }

        #[test]
        fn prop_update_after_create_leaves_one_copy(r1 in arb_audit(), kind in "[a-z]{1,8}") {
            let mut r2 = r1.clone();
            r2.audit_type = kind;
            let mut store = EntityListStore::new();
            store.apply_created(r1.clone());
            store.apply_updated(r2.clone());
            let matching: Vec<&Audit> = store.records().iter().filter(|a| a.id == r1.id).collect();
            prop_assert_eq!(matching, vec![&r2]);
        }

        #[test]
        fn prop_blank_filter_is_identity(records in prop::collection::vec(arb_audit(), 0..10), blank in "[ \t]{0,3}") {
            let store = EntityListStore::from_records(records.clone());
            let view: Vec<Audit> = store.filtered(&blank).into_iter().cloned().collect();
            prop_assert_eq!(view, records);
        }

        #[test]
        fn prop_filter_only_returns_matches(records in prop::collection::vec(arb_audit(), 0..10), needle in "[a-z]{1,3}") {
            let store = EntityListStore::from_records(records);
            for record in store.filtered(&needle) {
                let json = serde_json::to_value(record).unwrap();
                let hit = json.as_object().unwrap().values().any(|v| match v {
                    Value::String(s) => s.to_lowercase().contains(&needle),
                    Value::Number(n) => n.to_string().contains(&needle),
                    _ => false,
                });
                prop_assert!(hit);
            }
        }

        #[test]
        fn prop_double_delete_equals_single(records in prop::collection::vec(arb_audit(), 0..10), n in 0u8..20) {
            let id: RecordId = format!("AUD{:04}", n).into();
            let mut once = EntityListStore::from_records(records);
            once.apply_deleted(&id);
            let mut twice = once.clone();
            prop_assert!(!twice.apply_deleted(&id));
            prop_assert_eq!(once.records(), twice.records());
        }
    }
}
