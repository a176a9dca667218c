// events/bus/event_bus.rs
//
// Typed, synchronous publish/subscribe.
//
// RULES:
// - Subscribers for one event type run in the order they subscribed
// - No lock is held while a subscriber runs, so subscribers may emit or subscribe
// - A panicking subscriber is logged and skipped

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::events::types::DomainEvent;

/// Type-erased subscriber; downcasts to its concrete event inside
type Subscriber = Arc<dyn Fn(&dyn Any) + Send + Sync>;

type SubscriberTable = HashMap<TypeId, Vec<Subscriber>>;

/// One emission, as recorded by a bus with its emission log enabled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedEvent {
    pub event_type: &'static str,
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub subscriber_count: usize,
}

/// Shared event bus; clones publish to and subscribe on the same table
#[derive(Clone)]
pub struct EventBus {
    subscribers: Arc<RwLock<SubscriberTable>>,
    emitted: Arc<Mutex<Vec<EmittedEvent>>>,
    record_emissions: bool,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_emission_log(true)
    }

    pub fn with_emission_log(record_emissions: bool) -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(HashMap::new())),
            emitted: Arc::new(Mutex::new(Vec::new())),
            record_emissions,
        }
    }

    /// Register `handler` for every future `E`
    ///
    /// ```ignore
    /// bus.subscribe::<SeatsBooked, _>(|event| {
    ///     log::info!("{} seats left", event.capacity - event.booked_total);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let subscriber: Subscriber = Arc::new(move |payload: &dyn Any| {
            match payload.downcast_ref::<E>() {
                Some(event) => handler(event),
                None => log::error!("Subscriber for {} got a foreign payload", type_name::<E>()),
            }
        });

        self.subscribers
            .write()
            .entry(TypeId::of::<E>())
            .or_default()
            .push(subscriber);
    }

    /// Deliver `event` to the subscribers registered when the call starts
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let subscribers = self.snapshot(TypeId::of::<E>());

        log::debug!(
            "[EVENT] {} (id: {}) -> {} subscriber(s)",
            event.event_type(),
            event.event_id(),
            subscribers.len()
        );
        if self.record_emissions {
            self.emitted.lock().push(EmittedEvent {
                event_type: event.event_type(),
                event_id: event.event_id(),
                occurred_at: event.occurred_at(),
                subscriber_count: subscribers.len(),
            });
        }

        for (position, subscriber) in subscribers.iter().enumerate() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| subscriber(&event as &dyn Any)));
            if let Err(payload) = outcome {
                log::error!(
                    "Subscriber #{} for {} panicked: {}",
                    position,
                    event.event_type(),
                    panic_message(payload.as_ref())
                );
            }
        }
    }

    /// Emissions recorded so far, oldest first
    pub fn emitted(&self) -> Vec<EmittedEvent> {
        self.emitted.lock().clone()
    }

    pub fn clear_emitted(&self) {
        self.emitted.lock().clear();
    }

    pub fn subscriber_count<E: 'static>(&self) -> usize {
        self.subscribers
            .read()
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }

    /// Copy of the subscriber list; the read guard is released on return
    fn snapshot(&self, type_id: TypeId) -> Vec<Subscriber> {
        self.subscribers
            .read()
            .get(&type_id)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "<non-string panic payload>"
    }
}
