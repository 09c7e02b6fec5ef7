//! Table Screen Scenarios
//!
//! Full screen lifecycle against InMemoryClient wired to an EventHub, the
//! way a socket server echoes every mutation back as a live event.

#[cfg(test)]
mod tests {
    use crate::client::InMemoryClient;
    use crate::domain::{Audit, AuditStatus, EntityKind, RecordId, SyncError};
    use crate::live::EventHub;
    use crate::screen::{ModalState, Phase, TableScreen};
    use crate::view::{stats::find, StatValue};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    type AuditScreen = TableScreen<Audit, InMemoryClient<Audit>>;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn seed() -> Vec<Audit> {
        let mut drainage = Audit::new("AUD0001", "Hygiene", date(2024, 1, 10), AuditStatus::Scheduled);
        drainage.auditor = "R. Mehta".into();
        drainage.findings = Some("Drainage flagged as overdue-term item".into());

        let mut safety = Audit::new("AUD0002", "Safety", date(2024, 2, 20), AuditStatus::Completed);
        safety.auditor = "S. Rao".into();
        safety.score = Some(92.0);

        let mut water = Audit::new("AUD0003", "Water", date(2024, 4, 15), AuditStatus::Scheduled);
        water.auditor = "K. Iyer".into();

        vec![drainage, safety, water]
    }

    async fn mounted(hub: &EventHub) -> AuditScreen {
        let client = InMemoryClient::new(seed()).with_hub(hub.clone());
        let mut screen = TableScreen::new(client);
        screen.mount(hub).await;
        screen
    }

    fn ids(screen: &AuditScreen) -> Vec<String> {
        screen
            .visible_rows(today())
            .iter()
            .map(|row| row.record.id.to_string())
            .collect()
    }

    fn edit_session(screen: &AuditScreen) -> &crate::screen::EditSession<Audit> {
        match screen.modal() {
            Some(ModalState::Edit(session)) => session,
            other => panic!("expected edit modal, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_then_live_delete_then_search() {
        let hub = EventHub::new();
        let mut screen = mounted(&hub).await;
        assert_eq!(screen.phase(), &Phase::Ready(ModalState::Idle));
        assert_eq!(screen.banner(), None);
        assert_eq!(screen.store().len(), 3);

        hub.dispatch_frame("audit:deleted", &json!({ "data": { "id": "AUD0002" } }));
        assert_eq!(screen.pump_events(), 1);
        assert_eq!(ids(&screen), vec!["AUD0001", "AUD0003"]);

        screen.set_search("overdue-term");
        assert_eq!(ids(&screen), vec!["AUD0001"]);
        screen.set_search("");
        assert_eq!(screen.visible_rows(today()).len(), 2);
    }

    #[tokio::test]
    async fn test_failed_load_still_reaches_ready() {
        let hub = EventHub::new();
        let client = InMemoryClient::new(seed());
        client.fail_next("Network Error").await;
        let mut screen = TableScreen::new(client);
        screen.mount(&hub).await;

        assert_eq!(screen.phase(), &Phase::Ready(ModalState::Idle));
        assert_eq!(screen.banner(), Some("Network Error"));
        assert!(screen.visible_rows(today()).is_empty());

        screen.refresh().await;
        assert_eq!(screen.banner(), None);
        assert_eq!(screen.store().len(), 3);
        assert_eq!(screen.client().list_calls(), 2);
    }

    #[tokio::test]
    async fn test_rows_carry_derived_status_and_default_sort() {
        let hub = EventHub::new();
        let mut screen = mounted(&hub).await;
        let rows = screen.visible_rows(today());

        // default sort is scheduled_date ascending
        let labels: Vec<(&str, &str)> = rows
            .iter()
            .map(|row| (row.record.audit_type.as_str(), row.status.label.as_str()))
            .collect();
        assert_eq!(labels, vec![("Hygiene", "Overdue"), ("Safety", "Completed"), ("Water", "Scheduled")]);
        assert!(rows[0].status.overridden);
        assert!(rows[0].flags.overdue);

        // stats ignore the search box
        screen.set_search("water");
        let stats = screen.stats(today());
        assert_eq!(find(&stats, "Total audits"), Some(&StatValue::Count(3)));
        assert_eq!(find(&stats, "Overdue"), Some(&StatValue::Count(1)));
    }

    #[tokio::test]
    async fn test_open_modal_is_a_snapshot() {
        let hub = EventHub::new();
        let mut screen = mounted(&hub).await;
        screen.open_view(&"AUD0003".into()).unwrap();

        let mut renamed = seed().remove(2);
        renamed.audit_type = "Water (re-test)".into();
        hub.dispatch_frame("audit:updated", &json!({ "data": renamed }));
        screen.pump_events();

        match screen.modal() {
            Some(ModalState::View(audit)) => assert_eq!(audit.audit_type, "Water"),
            other => panic!("expected view modal, got {:?}", other),
        }
        assert_eq!(screen.store().get(&"AUD0003".into()).unwrap().audit_type, "Water (re-test)");
    }

    #[tokio::test]
    async fn test_create_blocked_until_required_field_filled() {
        let hub = EventHub::new();
        let mut screen = mounted(&hub).await;
        screen.open_create();
        screen.edit_field("audit_type", "Fire safety");
        screen.edit_field("scheduled_date", "2024-05-02");
        screen.edit_field("status", "Scheduled");

        let err = screen.confirm_edit().await.unwrap_err();
        assert!(matches!(err, SyncError::ValidationFailed(_)));
        assert_eq!(edit_session(&screen).errors.get("auditor"), Some("Auditor is required"));
        assert!(!screen.can_submit());
        assert_eq!(edit_session(&screen).form.get("audit_type"), "Fire safety");

        screen.edit_field("auditor", "P. Nair");
        assert!(screen.can_submit());
        screen.confirm_edit().await.unwrap();

        assert_eq!(screen.modal(), Some(&ModalState::Idle));
        assert_eq!(screen.store().len(), 4);
        // mount + post-create reload
        assert_eq!(screen.client().list_calls(), 2);

        // the echoed created event was folded in before the reload
        assert_eq!(screen.pump_events(), 0);
        assert_eq!(screen.store().len(), 4);
        assert!(screen.store().contains(&RecordId::Number(4)));
    }

    #[tokio::test]
    async fn test_edit_updates_and_reloads() {
        let hub = EventHub::new();
        let mut screen = mounted(&hub).await;
        screen.open_edit(&"AUD0001".into()).unwrap();
        assert_eq!(edit_session(&screen).form.get("auditor"), "R. Mehta");

        screen.edit_field("status", "Completed");
        screen.edit_field("completed_date", "2024-01-12");
        screen.edit_field("score", "88");
        screen.confirm_edit().await.unwrap();

        let saved = screen.store().get(&"AUD0001".into()).unwrap();
        assert_eq!(saved.status, AuditStatus::Completed);
        assert_eq!(saved.score, Some(88.0));
        assert_eq!(saved.completed_date, date(2024, 1, 12));
        assert_eq!(screen.store().len(), 3);
        assert_eq!(screen.modal(), Some(&ModalState::Idle));
    }

    #[tokio::test]
    async fn test_edit_date_order_error_on_later_field() {
        let hub = EventHub::new();
        let mut screen = mounted(&hub).await;
        screen.open_edit(&"AUD0001".into()).unwrap();
        screen.edit_field("completed_date", "2024-01-01");

        assert_eq!(
            edit_session(&screen).errors.get("completed_date"),
            Some("Completed date cannot be before Scheduled date")
        );
        assert_eq!(edit_session(&screen).errors.get("scheduled_date"), None);
        assert!(!screen.can_submit());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_modal_and_form() {
        let hub = EventHub::new();
        let mut screen = mounted(&hub).await;
        screen.open_edit(&"AUD0001".into()).unwrap();
        screen.edit_field("score", "75");
        screen.client().fail_next("Server exploded").await;

        let err = screen.confirm_edit().await.unwrap_err();
        assert_eq!(err, SyncError::RequestFailed("Server exploded".into()));
        let session = edit_session(&screen);
        assert_eq!(session.error.as_deref(), Some("Server exploded"));
        assert_eq!(session.form.get("score"), "75");
        assert_eq!(screen.client().list_calls(), 1);
    }

    #[tokio::test]
    async fn test_edit_of_vanished_record_reloads_and_stays_open() {
        let hub = EventHub::new();
        let mut screen = mounted(&hub).await;
        screen.open_edit(&"AUD0001".into()).unwrap();
        screen.client().set_records(seed().split_off(1)).await;

        let err = screen.confirm_edit().await.unwrap_err();
        assert!(matches!(err, SyncError::NotFound(_)));
        assert!(!screen.store().contains(&"AUD0001".into()));
        assert!(edit_session(&screen).error.is_some());
    }

    #[tokio::test]
    async fn test_delete_reloads_and_treats_missing_as_done() {
        let hub = EventHub::new();
        let mut screen = mounted(&hub).await;

        screen.open_delete(&"AUD0003".into()).unwrap();
        screen.confirm_delete().await.unwrap();
        assert_eq!(screen.store().len(), 2);
        assert_eq!(screen.modal(), Some(&ModalState::Idle));

        // already removed on the server by someone else
        screen.open_delete(&"AUD0002".into()).unwrap();
        screen.client().set_records(seed().into_iter().take(1).collect()).await;
        screen.confirm_delete().await.unwrap();
        assert_eq!(screen.store().len(), 1);
        assert_eq!(screen.modal(), Some(&ModalState::Idle));
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_dialog() {
        let hub = EventHub::new();
        let mut screen = mounted(&hub).await;
        screen.open_delete(&"AUD0001".into()).unwrap();
        screen.client().fail_next("Failed to delete audit").await;

        assert!(screen.confirm_delete().await.is_err());
        match screen.modal() {
            Some(ModalState::Delete(session)) => {
                assert_eq!(session.error.as_deref(), Some("Failed to delete audit"))
            }
            other => panic!("expected delete dialog, got {:?}", other),
        }
        assert_eq!(screen.store().len(), 3);
    }

    #[tokio::test]
    async fn test_unmount_removes_only_own_handler() {
        let hub = EventHub::new();
        let mut first = mounted(&hub).await;
        let second = mounted(&hub).await;
        assert_eq!(hub.handler_count(EntityKind::Audit), 2);

        first.unmount();
        assert!(!first.is_subscribed());
        assert_eq!(hub.handler_count(EntityKind::Audit), 1);

        assert_eq!(hub.dispatch_frame("audit:deleted", &json!({ "data": { "id": "AUD0001" } })), 1);
        assert_eq!(first.pump_events(), 0);
        assert_eq!(first.store().len(), 3);

        drop(second);
        assert_eq!(hub.handler_count(EntityKind::Audit), 0);
    }

    #[tokio::test]
    async fn test_reload_and_event_paths_converge() {
        let hub = EventHub::new();
        let mut screen = mounted(&hub).await;
        screen.open_edit(&"AUD0003".into()).unwrap();
        screen.edit_field("auditor", "M. Das");
        screen.confirm_edit().await.unwrap();

        let after_reload = screen.store().records().to_vec();
        assert_eq!(screen.pump_events(), 0);
        assert_eq!(screen.store().records(), after_reload.as_slice());
        assert_eq!(screen.store().get(&"AUD0003".into()).unwrap().auditor, "M. Das");

        // an echo arriving after the reload still converges
        let echoed = screen.store().get(&"AUD0003".into()).unwrap().clone();
        hub.dispatch_frame("audit:updated", &json!({ "data": echoed }));
        assert_eq!(screen.pump_events(), 1);
        assert_eq!(screen.store().records(), after_reload.as_slice());
    }

    #[tokio::test]
    async fn test_reload_supersedes_queued_events() {
        let hub = EventHub::new();
        let client = InMemoryClient::new(seed().into_iter().take(1).collect());
        let mut screen = TableScreen::new(client);
        screen.mount(&hub).await;
        assert_eq!(ids(&screen), vec!["AUD0001"]);

        // created on the server, then removed with the delete notice lost
        let ghost = Audit::new("AUD0009", "Feed", date(2024, 3, 5), AuditStatus::Scheduled);
        assert_eq!(hub.dispatch_frame("audit:created", &json!({ "data": ghost })), 1);

        screen.refresh().await;
        assert_eq!(screen.pump_events(), 0);
        assert_eq!(ids(&screen), vec!["AUD0001"]);
        assert_eq!(screen.client().list_calls(), 2);
    }
}
