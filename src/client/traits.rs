//! Entity Client - Core Trait
//!
//! Defines the abstract interface to the REST backend.
//! Implementations can use HTTP, in-memory, etc.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Entity, RecordId, SyncResult};

/// Request body for create/update: a flat JSON object
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Core client trait for CRUD operations
///
/// Generic over any Entity type. One backend call per invocation, no retries.
#[async_trait]
pub trait EntityClient<T: Entity>: Send + Sync {
    /// `GET /{collection}`
    async fn list(&self) -> SyncResult<Vec<T>>;

    /// `GET /{collection}/{id}`
    async fn get(&self, id: &RecordId) -> SyncResult<T>;

    /// `POST /{collection}`
    async fn create(&self, payload: &Payload) -> SyncResult<T>;

    /// `PUT /{collection}/{id}`
    async fn update(&self, id: &RecordId, payload: &Payload) -> SyncResult<T>;

    /// `DELETE /{collection}/{id}`
    async fn delete(&self, id: &RecordId) -> SyncResult<()>;
}

#[async_trait]
impl<T: Entity, C: EntityClient<T> + ?Sized> EntityClient<T> for Arc<C> {
    async fn list(&self) -> SyncResult<Vec<T>> {
        (**self).list().await
    }

    async fn get(&self, id: &RecordId) -> SyncResult<T> {
        (**self).get(id).await
    }

    async fn create(&self, payload: &Payload) -> SyncResult<T> {
        (**self).create(payload).await
    }

    async fn update(&self, id: &RecordId, payload: &Payload) -> SyncResult<T> {
        (**self).update(id, payload).await
    }

    async fn delete(&self, id: &RecordId) -> SyncResult<()> {
        (**self).delete(id).await
    }
}

/// The five client operations, used for fallback messages and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Generic message used when the server gives none
    pub fn fallback_message<T: Entity>(&self) -> String {
        let kind = T::KIND;
        match self {
            Operation::List => format!("Failed to fetch {}", kind.plural()),
            Operation::Get => format!("Failed to fetch {}", kind.singular()),
            Operation::Create => format!("Failed to create {}", kind.singular()),
            Operation::Update => format!("Failed to update {}", kind.singular()),
            Operation::Delete => format!("Failed to delete {}", kind.singular()),
        }
    }

    /// Whether the call addresses a single existing record
    pub fn targets_record(&self) -> bool {
        matches!(self, Operation::Get | Operation::Update | Operation::Delete)
    }
}
