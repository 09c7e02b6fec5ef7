//! Live Event Channel
//!
//! Typed, scoped subscriptions to `{entity}:created|updated|deleted`.

mod event;
mod hub;

pub use event::{event_name, parse_event_name, LiveAction, LiveEvent};
pub use hub::{subscribe_typed, EventHub, LiveEventChannel, RawHandler, Subscription};
