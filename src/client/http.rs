//! HTTP Entity Client
//!
//! reqwest-backed implementation of `EntityClient<T>` against the REST
//! backend. A fixed client-side timeout aborts slow calls.

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;
use std::marker::PhantomData;
use std::time::Duration;

use super::envelope;
use super::traits::{EntityClient, Operation, Payload};
use crate::config::ApiConfig;
use crate::domain::{Entity, RecordId, SyncError, SyncResult};

pub struct HttpEntityClient<T> {
    http: reqwest::Client,
    base_url: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for HttpEntityClient<T> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> HttpEntityClient<T> {
    pub fn new(config: &ApiConfig) -> SyncResult<Self> {
        Self::with_timeout(&config.base_url, config.timeout())
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> SyncResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(http, base_url))
    }

    /// Share one connection pool across entity kinds
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            _entity: PhantomData,
        }
    }

    pub fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, T::KIND.collection())
    }

    pub fn record_url(&self, id: &RecordId) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    /// Send the request and return the parsed body (`Null` when empty or not JSON)
    async fn execute(&self, request: RequestBuilder, op: Operation) -> SyncResult<Value> {
        let fallback = op.fallback_message::<T>();

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                log::warn!("{:?} {} timed out: {}", op, T::KIND, e);
            } else {
                log::warn!("{:?} {} failed: {}", op, T::KIND, e);
            }
            SyncError::RequestFailed(fallback.clone())
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            log::warn!("{:?} {}: could not read body: {}", op, T::KIND, e);
            SyncError::RequestFailed(fallback.clone())
        })?;

        if !status.is_success() {
            let message = envelope::error_message(&body).unwrap_or(fallback);
            log::warn!("{:?} {} -> HTTP {}: {}", op, T::KIND, status.as_u16(), message);
            if status == StatusCode::NOT_FOUND && op.targets_record() {
                return Err(SyncError::NotFound(message));
            }
            return Err(SyncError::RequestFailed(message));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
            log::warn!("{:?} {}: response is not JSON: {}", op, T::KIND, e);
            Value::Null
        }))
    }
}

#[async_trait]
impl<T: Entity> EntityClient<T> for HttpEntityClient<T> {
    async fn list(&self) -> SyncResult<Vec<T>> {
        let body = self
            .execute(self.http.get(self.collection_url()), Operation::List)
            .await?;
        let records = envelope::decode_list(body);
        log::debug!("Fetched {} {}", records.len(), T::KIND.plural());
        Ok(records)
    }

    async fn get(&self, id: &RecordId) -> SyncResult<T> {
        let body = self.execute(self.http.get(self.record_url(id)), Operation::Get).await?;
        envelope::decode_record(body, Operation::Get.fallback_message::<T>())
    }

    async fn create(&self, payload: &Payload) -> SyncResult<T> {
        let request = self.http.post(self.collection_url()).json(payload);
        let body = self.execute(request, Operation::Create).await?;
        let created: T = envelope::decode_record(body, Operation::Create.fallback_message::<T>())?;
        log::info!("Created {} {}", T::KIND.singular(), created.id());
        Ok(created)
    }

    async fn update(&self, id: &RecordId, payload: &Payload) -> SyncResult<T> {
        let request = self.http.put(self.record_url(id)).json(payload);
        let body = self.execute(request, Operation::Update).await?;
        let updated = envelope::decode_record(body, Operation::Update.fallback_message::<T>())?;
        log::info!("Updated {} {}", T::KIND.singular(), id);
        Ok(updated)
    }

    async fn delete(&self, id: &RecordId) -> SyncResult<()> {
        self.execute(self.http.delete(self.record_url(id)), Operation::Delete)
            .await?;
        log::info!("Deleted {} {}", T::KIND.singular(), id);
        Ok(())
    }
}
