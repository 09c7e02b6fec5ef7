//! Dairy Admin
//!
//! Client-side list synchronization for the dairy management dashboard: one
//! generic implementation of fetch, local cache, mutation with reload, live
//! patching and derived view state, instantiated for all eleven record kinds.

pub mod client;
pub mod config;
pub mod domain;
pub mod live;
pub mod screen;
pub mod store;
pub mod validation;
pub mod view;

pub use client::{EntityClient, HttpEntityClient, InMemoryClient};
pub use config::ApiConfig;
pub use domain::{Entity, EntityKind, RecordId, SyncError, SyncResult};
pub use live::{EventHub, LiveEvent, LiveEventChannel, Subscription};
pub use screen::TableScreen;
pub use store::EntityListStore;
