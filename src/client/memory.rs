//! In-Memory Entity Client
//!
//! Behaves like the REST backend without a network: assigns ids, answers
//! 404 as `NotFound`, and can broadcast live events the way the socket
//! server does after each mutation. Used by tests and offline demos.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use tokio::sync::Mutex;

use super::traits::{EntityClient, Operation, Payload};
use crate::domain::{Entity, RecordId, SyncError, SyncResult};
use crate::live::{EventHub, LiveEvent};

pub struct InMemoryClient<T> {
    records: Mutex<Vec<T>>,
    next_id: AtomicI64,
    fail_next: Mutex<Option<String>>,
    list_calls: AtomicUsize,
    hub: Option<EventHub>,
}

impl<T: Entity> InMemoryClient<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            next_id: AtomicI64::new(records.len() as i64 + 1),
            records: Mutex::new(records),
            fail_next: Mutex::new(None),
            list_calls: AtomicUsize::new(0),
            hub: None,
        }
    }

    /// Broadcast `created`/`updated`/`deleted` on `hub` after each mutation
    pub fn with_hub(mut self, hub: EventHub) -> Self {
        self.hub = Some(hub);
        self
    }

    /// Make the next call fail with `message`
    pub async fn fail_next(&self, message: &str) {
        *self.fail_next.lock().await = Some(message.to_string());
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> Vec<T> {
        self.records.lock().await.clone()
    }

    /// Replace server-side state without notifying anyone
    pub async fn set_records(&self, records: Vec<T>) {
        *self.records.lock().await = records;
    }

    async fn check_failure(&self) -> SyncResult<()> {
        match self.fail_next.lock().await.take() {
            Some(message) => Err(SyncError::RequestFailed(message)),
            None => Ok(()),
        }
    }

    fn broadcast(&self, event: LiveEvent<T>) {
        if let Some(hub) = &self.hub {
            hub.dispatch(T::KIND, event.action(), &event.to_payload());
        }
    }

    fn materialize(&self, id: RecordId, payload: &Payload, op: Operation) -> SyncResult<T> {
        let mut body = payload.clone();
        body.insert("id".to_string(), serde_json::to_value(&id).unwrap_or(Value::Null));
        serde_json::from_value(Value::Object(body)).map_err(|e| {
            log::warn!("Rejected {} payload: {}", T::KIND.singular(), e);
            SyncError::RequestFailed(op.fallback_message::<T>())
        })
    }

    fn not_found(id: &RecordId) -> SyncError {
        SyncError::NotFound(format!("{} {} not found", T::KIND.singular(), id))
    }
}

#[async_trait]
impl<T: Entity> EntityClient<T> for InMemoryClient<T> {
    async fn list(&self) -> SyncResult<Vec<T>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure().await?;
        Ok(self.records.lock().await.clone())
    }

    async fn get(&self, id: &RecordId) -> SyncResult<T> {
        self.check_failure().await?;
        let records = self.records.lock().await;
        records
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, payload: &Payload) -> SyncResult<T> {
        self.check_failure().await?;
        let id = match RecordId::from_json(&Value::Object(payload.clone())) {
            Some(id) => id,
            None => RecordId::Number(self.next_id.fetch_add(1, Ordering::SeqCst)),
        };
        let record = self.materialize(id, payload, Operation::Create)?;
        {
            let mut records = self.records.lock().await;
            if records.iter().any(|r| r.id() == record.id()) {
                return Err(SyncError::RequestFailed(format!(
                    "{} {} already exists",
                    T::KIND.singular(),
                    record.id()
                )));
            }
            records.push(record.clone());
        }
        self.broadcast(LiveEvent::Created(record.clone()));
        Ok(record)
    }

    async fn update(&self, id: &RecordId, payload: &Payload) -> SyncResult<T> {
        self.check_failure().await?;
        let record = self.materialize(id.clone(), payload, Operation::Update)?;
        {
            let mut records = self.records.lock().await;
            let slot = records
                .iter_mut()
                .find(|r| r.id() == id)
                .ok_or_else(|| Self::not_found(id))?;
            *slot = record.clone();
        }
        self.broadcast(LiveEvent::Updated(record.clone()));
        Ok(record)
    }

    async fn delete(&self, id: &RecordId) -> SyncResult<()> {
        self.check_failure().await?;
        {
            let mut records = self.records.lock().await;
            let before = records.len();
            records.retain(|r| r.id() != id);
            if records.len() == before {
                return Err(Self::not_found(id));
            }
        }
        self.broadcast(LiveEvent::Deleted(id.clone()));
        Ok(())
    }
}
