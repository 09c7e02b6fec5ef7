//! Table Screen State Machine
//!
//! Composes store, derived view, validator and modals for one record kind.

use chrono::NaiveDate;
use serde_json::Value;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use super::state::{DeleteSession, EditSession, ModalState, Phase};
use crate::client::{EntityClient, Payload};
use crate::domain::{RecordId, SyncError, SyncResult};
use crate::live::{subscribe_typed, LiveEvent, LiveEventChannel, Subscription};
use crate::store::EntityListStore;
use crate::validation::{FormValidator, Schema};
use crate::view::{rows, sort_records, Derive, RowView, SortSpec, Stat};

/// One entity list screen.
///
/// Owns its store exclusively. Live events are queued by the subscription
/// handler and applied in arrival order by `pump_events`.
pub struct TableScreen<T, C> {
    client: C,
    store: EntityListStore<T>,
    validator: FormValidator,
    phase: Phase<T>,
    banner: Option<String>,
    search: String,
    sort: Option<SortSpec>,
    events: Option<UnboundedReceiver<LiveEvent<T>>>,
    subscription: Option<Subscription>,
}

impl<T, C> TableScreen<T, C>
where
    T: Derive + Schema,
    C: EntityClient<T>,
{
    pub fn new(client: C) -> Self {
        Self {
            client,
            store: EntityListStore::new(),
            validator: FormValidator::for_entity::<T>(),
            phase: Phase::Loading,
            banner: None,
            search: String::new(),
            sort: T::default_sort(),
            events: None,
            subscription: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn phase(&self) -> &Phase<T> {
        &self.phase
    }

    pub fn modal(&self) -> Option<&ModalState<T>> {
        self.phase.modal()
    }

    /// Persistent load-failure message
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn store(&self) -> &EntityListStore<T> {
        &self.store
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn validator(&self) -> &FormValidator {
        &self.validator
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Subscribe to this kind's live events, then load.
    ///
    /// Always ends in `Ready`, with the banner set if the load failed.
    pub async fn mount(&mut self, channel: &dyn LiveEventChannel) {
        self.phase = Phase::Loading;
        if self.subscription.is_none() {
            let (tx, rx) = mpsc::unbounded_channel();
            let subscription = subscribe_typed::<T, _>(channel, move |event: LiveEvent<T>| {
                // Receiver gone means the screen is unmounting
                let _ = tx.send(event);
            });
            self.events = Some(rx);
            self.subscription = Some(subscription);
        }
        self.reload().await;
        self.phase = Phase::Ready(ModalState::Idle);
    }

    /// Remove exactly the handler registered by `mount`. Queued events are
    /// discarded.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        self.events = None;
        log::debug!("{} screen unmounted", T::KIND);
    }

    /// Manual retry after a failed load. An open modal stays open.
    pub async fn refresh(&mut self) {
        let modal = match std::mem::replace(&mut self.phase, Phase::Loading) {
            Phase::Ready(modal) => modal,
            Phase::Loading => ModalState::Idle,
        };
        self.reload().await;
        self.phase = Phase::Ready(modal);
    }

    /// Full reload. Events queued before it are applied first so the
    /// fresh list supersedes them.
    async fn reload(&mut self) {
        let stale = self.pump_events();
        if stale > 0 {
            log::debug!("{} {} events superseded by reload", stale, T::KIND);
        }
        self.banner = match self.store.load(&self.client).await {
            Ok(_) => None,
            Err(e) => Some(e.user_message()),
        };
    }

    /// Apply queued live events in arrival order. Returns how many applied.
    pub fn pump_events(&mut self) -> usize {
        let Some(rx) = self.events.as_mut() else {
            return 0;
        };
        let mut applied = 0;
        while let Ok(event) = rx.try_recv() {
            self.store.apply(event);
            applied += 1;
        }
        applied
    }

    // ========================================================================
    // Search, sort, derived view
    // ========================================================================

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
    }

    /// Filtered, sorted rows with derived status
    pub fn visible_rows(&self, today: NaiveDate) -> Vec<RowView<'_, T>> {
        let mut records = self.store.filtered(&self.search);
        if let Some(sort) = &self.sort {
            sort_records(&mut records, sort);
        }
        rows(&records, today)
    }

    /// Summary cards; always over the full list, never the search result
    pub fn stats(&self, today: NaiveDate) -> Vec<Stat> {
        T::stats(self.store.records(), today)
    }

    // ========================================================================
    // Modals
    // ========================================================================

    fn find(&self, id: &RecordId) -> SyncResult<T> {
        self.store
            .get(id)
            .cloned()
            .ok_or_else(|| SyncError::NotFound(format!("{} {} not found", T::KIND.singular(), id)))
    }

    fn open(&mut self, modal: ModalState<T>) {
        self.phase = Phase::Ready(modal);
    }

    pub fn open_view(&mut self, id: &RecordId) -> SyncResult<()> {
        let record = self.find(id)?;
        self.open(ModalState::View(record));
        Ok(())
    }

    pub fn open_edit(&mut self, id: &RecordId) -> SyncResult<()> {
        let record = self.find(id)?;
        self.open(ModalState::Edit(EditSession::edit(record)));
        Ok(())
    }

    pub fn open_create(&mut self) {
        self.open(ModalState::Edit(EditSession::create()));
    }

    pub fn open_delete(&mut self, id: &RecordId) -> SyncResult<()> {
        let record = self.find(id)?;
        self.open(ModalState::Delete(DeleteSession { record, error: None }));
        Ok(())
    }

    pub fn close_modal(&mut self) {
        if let Phase::Ready(modal) = &mut self.phase {
            *modal = ModalState::Idle;
        }
    }

    fn edit_session_mut(&mut self) -> Option<&mut EditSession<T>> {
        match &mut self.phase {
            Phase::Ready(ModalState::Edit(session)) => Some(session),
            _ => None,
        }
    }

    fn delete_session_mut(&mut self) -> Option<&mut DeleteSession<T>> {
        match &mut self.phase {
            Phase::Ready(ModalState::Delete(session)) => Some(session),
            _ => None,
        }
    }

    /// Change one form field and re-validate it (plus dependent dates)
    pub fn edit_field(&mut self, name: &str, value: impl Into<String>) {
        let validator = &self.validator;
        let session = match &mut self.phase {
            Phase::Ready(ModalState::Edit(session)) => session,
            _ => return,
        };
        session.form.set(name, value);
        validator.on_change(&session.form, &mut session.errors, name);
        // An existing record keeps the id it was loaded with
        if !session.is_create() {
            session.errors.set("id", None);
        }
    }

    /// Submit is enabled while the edit modal holds no field error
    pub fn can_submit(&self) -> bool {
        match &self.phase {
            Phase::Ready(ModalState::Edit(session)) => !session.errors.is_blocking(),
            _ => false,
        }
    }

    /// Validate, create or update, reload the whole list, close.
    ///
    /// Any failure keeps the modal open with its form intact.
    pub async fn confirm_edit(&mut self) -> SyncResult<()> {
        let (form, original_id) = match self.edit_session_mut() {
            Some(session) => (session.form.clone(), session.original_id().cloned()),
            None => return Ok(()),
        };

        let mut errors = self.validator.validate_all(&form);
        if original_id.is_some() {
            errors.set("id", None);
        }
        let prepared = if errors.is_blocking() {
            Err(SyncError::ValidationFailed(errors))
        } else {
            form.to_payload(self.validator.rules())
        };
        let mut payload = match prepared {
            Ok(payload) => payload,
            Err(e) => return Err(self.fail_edit(e)),
        };

        // Update when the id already exists, create otherwise
        let target = original_id.or_else(|| {
            RecordId::from_json(&Value::Object(payload.clone())).filter(|id| self.store.contains(id))
        });
        let result = match &target {
            Some(id) => {
                pin_id(&mut payload, id);
                self.client.update(id, &payload).await
            }
            None => self.client.create(&payload).await,
        };

        match result {
            Ok(saved) => {
                log::info!("Saved {} {}", T::KIND.singular(), saved.id());
                self.reload().await;
                self.close_modal();
                Ok(())
            }
            Err(e @ SyncError::NotFound(_)) => {
                log::warn!("{} vanished while editing: {}", T::KIND.singular(), e);
                self.reload().await;
                Err(self.fail_edit(e))
            }
            Err(e) => {
                log::error!("Saving {} failed: {}", T::KIND.singular(), e);
                Err(self.fail_edit(e))
            }
        }
    }

    fn fail_edit(&mut self, error: SyncError) -> SyncError {
        if let Some(session) = self.edit_session_mut() {
            if let SyncError::ValidationFailed(errors) = &error {
                session.errors = errors.clone();
            }
            session.error = Some(error.user_message());
        }
        error
    }

    /// Delete, reload the whole list, close. A record that is already gone
    /// counts as deleted.
    pub async fn confirm_delete(&mut self) -> SyncResult<()> {
        let id = match self.delete_session_mut() {
            Some(session) => session.record.id().clone(),
            None => return Ok(()),
        };

        match self.client.delete(&id).await {
            Ok(()) => log::info!("Deleted {} {}", T::KIND.singular(), id),
            Err(SyncError::NotFound(msg)) => log::info!("{} already gone: {}", T::KIND.singular(), msg),
            Err(e) => {
                log::error!("Deleting {} {} failed: {}", T::KIND.singular(), id, e);
                if let Some(session) = self.delete_session_mut() {
                    session.error = Some(e.user_message());
                }
                return Err(e);
            }
        }

        self.reload().await;
        self.close_modal();
        Ok(())
    }
}

/// The path id wins over whatever the form carried
fn pin_id(payload: &mut Payload, id: &RecordId) {
    if let Ok(value) = serde_json::to_value(id) {
        payload.insert("id".to_string(), value);
    }
}
