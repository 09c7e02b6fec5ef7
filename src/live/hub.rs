//! Live Event Channel
//!
//! Subscriptions are scoped: dropping a `Subscription` removes exactly the
//! handler it registered, for exactly its entity kind.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

use super::event::{parse_event_name, LiveAction, LiveEvent};
use crate::domain::{Entity, EntityKind};

/// Untyped handler, called with the action and the raw JSON payload
pub type RawHandler = Arc<dyn Fn(LiveAction, &Value) + Send + Sync>;

/// Push-notification source for create/update/delete events
pub trait LiveEventChannel: Send + Sync {
    /// Register `handler` for one entity kind.
    ///
    /// Handlers run on the dispatching thread and must not subscribe or
    /// unsubscribe from inside the callback.
    fn subscribe(&self, kind: EntityKind, handler: RawHandler) -> Subscription;
}

/// Subscribe with a typed handler; malformed payloads are logged and dropped
pub fn subscribe_typed<T, F>(channel: &dyn LiveEventChannel, handler: F) -> Subscription
where
    T: Entity,
    F: Fn(LiveEvent<T>) + Send + Sync + 'static,
{
    let raw: RawHandler = Arc::new(move |action: LiveAction, payload: &Value| match LiveEvent::<T>::decode(action, payload) {
        Ok(event) => handler(event),
        Err(e) => log::warn!("Dropping live event: {}", e),
    });
    channel.subscribe(T::KIND, raw)
}

/// Handle for one registered handler. Unsubscribes on drop.
pub struct Subscription {
    kind: EntityKind,
    teardown: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(kind: EntityKind, teardown: impl FnOnce() + Send + 'static) -> Self {
        Self {
            kind,
            teardown: Some(Box::new(teardown)),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Remove the handler now. Once this returns the handler will not be
    /// invoked again.
    pub fn unsubscribe(mut self) {
        self.teardown_now();
    }

    fn teardown_now(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
            log::debug!("Unsubscribed from {} events", self.kind);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.teardown_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("kind", &self.kind)
            .field("active", &self.teardown.is_some())
            .finish()
    }
}

#[derive(Default)]
struct HubInner {
    handlers: RwLock<HashMap<EntityKind, Vec<(u64, RawHandler)>>>,
    next_id: AtomicU64,
}

impl HubInner {
    fn remove(&self, kind: EntityKind, handler_id: u64) {
        let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());
        if let Some(list) = handlers.get_mut(&kind) {
            list.retain(|(id, _)| *id != handler_id);
            if list.is_empty() {
                handlers.remove(&kind);
            }
        }
    }
}

/// In-process event channel.
///
/// A socket transport feeds raw frames into `dispatch_frame`; tests and the
/// in-memory client call `dispatch` directly.
#[derive(Clone, Default)]
pub struct EventHub {
    inner: Arc<HubInner>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one event to every handler of `kind`. Returns how many ran.
    pub fn dispatch(&self, kind: EntityKind, action: LiveAction, payload: &Value) -> usize {
        // Read lock is held while handlers run so teardown waits for them.
        let handlers = self.inner.handlers.read().unwrap_or_else(|e| e.into_inner());
        let Some(list) = handlers.get(&kind) else {
            return 0;
        };
        for (_, handler) in list {
            handler(action, payload);
        }
        list.len()
    }

    /// Deliver a raw `{prefix}:{action}` frame. Unknown names are dropped.
    pub fn dispatch_frame(&self, name: &str, payload: &Value) -> usize {
        match parse_event_name(name) {
            Some((kind, action)) => self.dispatch(kind, action, payload),
            None => {
                log::debug!("Ignoring unknown live event {}", name);
                0
            }
        }
    }

    /// Deliver a frame whose payload is still JSON text
    pub fn dispatch_text(&self, name: &str, payload: &str) -> usize {
        match serde_json::from_str::<Value>(payload) {
            Ok(value) => self.dispatch_frame(name, &value),
            Err(e) => {
                log::warn!("Dropping live event {} with invalid JSON: {}", name, e);
                0
            }
        }
    }

    pub fn handler_count(&self, kind: EntityKind) -> usize {
        let handlers = self.inner.handlers.read().unwrap_or_else(|e| e.into_inner());
        handlers.get(&kind).map_or(0, Vec::len)
    }
}

impl LiveEventChannel for EventHub {
    fn subscribe(&self, kind: EntityKind, handler: RawHandler) -> Subscription {
        let handler_id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        {
            let mut handlers = self.inner.handlers.write().unwrap_or_else(|e| e.into_inner());
            handlers.entry(kind).or_default().push((handler_id, handler));
        }
        log::debug!("Subscribed to {} events (handler {})", kind, handler_id);

        let weak: Weak<HubInner> = Arc::downgrade(&self.inner);
        Subscription::new(kind, move || {
            if let Some(inner) = weak.upgrade() {
                inner.remove(kind, handler_id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Audit;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    fn counting_handler(counter: &Arc<AtomicUsize>) -> RawHandler {
        let counter = counter.clone();
        Arc::new(move |_: LiveAction, _: &Value| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_dispatch_reaches_only_matching_kind() {
        let hub = EventHub::new();
        let audits = Arc::new(AtomicUsize::new(0));
        let bills = Arc::new(AtomicUsize::new(0));
        let _a = hub.subscribe(EntityKind::Audit, counting_handler(&audits));
        let _b = hub.subscribe(EntityKind::Bill, counting_handler(&bills));

        hub.dispatch_frame("audit:updated", &json!({}));
        assert_eq!(audits.load(Ordering::SeqCst), 1);
        assert_eq!(bills.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_drop_removes_only_own_handler() {
        let hub = EventHub::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let sub1 = hub.subscribe(EntityKind::Audit, counting_handler(&first));
        let _sub2 = hub.subscribe(EntityKind::Audit, counting_handler(&second));
        assert_eq!(hub.handler_count(EntityKind::Audit), 2);

        drop(sub1);
        assert_eq!(hub.handler_count(EntityKind::Audit), 1);

        hub.dispatch(EntityKind::Audit, LiveAction::Created, &json!({}));
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_explicit_unsubscribe_stops_delivery() {
        let hub = EventHub::new();
        let count = Arc::new(AtomicUsize::new(0));
        let sub = hub.subscribe(EntityKind::Fleet, counting_handler(&count));
        sub.unsubscribe();
        assert_eq!(hub.dispatch_frame("fleet:deleted", &json!({"data": {"id": 1}})), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_subscription_outliving_hub_is_harmless() {
        let hub = EventHub::new();
        let sub = hub.subscribe(EntityKind::Bill, Arc::new(|_: LiveAction, _: &Value| {}));
        drop(hub);
        drop(sub);
    }

    #[test]
    fn test_typed_subscription_decodes_and_drops_malformed() {
        let hub = EventHub::new();
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = subscribe_typed::<Audit, _>(&hub, move |event| {
            sink.lock().unwrap().push(event.id().clone());
        });

        hub.dispatch_text("audit:created", r#"{"data": {"id": "AUD0001", "status": "Scheduled"}}"#);
        hub.dispatch_text("audit:created", r#"{"data": {"id": "AUD0002"}}"#);
        hub.dispatch_text("audit:deleted", "not json");
        hub.dispatch_text("audit:deleted", r#"{"data": {"id": "AUD0003"}}"#);

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec!["AUD0001".into(), "AUD0003".into()]);
    }
}
