// events/bus/event_bus.rs
//
// In-process, synchronous publish/subscribe.
//
// DESIGN PRINCIPLES:
// 1. Handlers run on the emitting thread, in subscription order
// 2. A panicking handler is isolated; the others still run
// 3. Every emission lands in a bounded in-memory log
// 4. Subscriptions are typed; dispatch is by TypeId

use chrono::{DateTime, Utc};
use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::events::types::DomainEvent;

/// Emissions kept in the log before the oldest are dropped
pub const EVENT_LOG_CAPACITY: usize = 1024;

type ErasedHandler = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// Handle returned by `subscribe`, used to detach the handler again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    handler: ErasedHandler,
}

/// One emission as recorded in the log
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: &'static str,
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    /// Handlers that ran to completion
    pub delivered: usize,
    /// Handlers that panicked
    pub failed: usize,
}

/// The journal's event bus
///
/// Lets services announce what happened without knowing who listens
/// (a presentation layer refreshing its views, a statistics cache, ...).
/// Handlers may run while the emitter still holds the journal lock, so a
/// handler must never call back into the journal.
///
/// Clones share subscribers and log.
#[derive(Clone)]
pub struct EventBus {
    subscribers: Arc<RwLock<HashMap<TypeId, Vec<Subscriber>>>>,
    log: Arc<RwLock<VecDeque<EventLogEntry>>>,
    next_id: Arc<AtomicU64>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(HashMap::new())),
            log: Arc::new(RwLock::new(VecDeque::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Register a handler for one event type
    ///
    /// ```ignore
    /// bus.subscribe::<EntriesFinalized, _>(|event| {
    ///     log::info!("{} entries finalized", event.finalized);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F) -> SubscriptionId
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));

        let handler: ErasedHandler = Arc::new(move |any: &dyn Any| match any.downcast_ref::<E>() {
            Some(event) => handler(event),
            None => log::error!("Event handler for {} got a foreign event", std::any::type_name::<E>()),
        });

        write(&self.subscribers)
            .entry(TypeId::of::<E>())
            .or_default()
            .push(Subscriber { id, handler });

        id
    }

    /// Detach a handler; returns false when it was not registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = write(&self.subscribers);
        for list in subscribers.values_mut() {
            if let Some(pos) = list.iter().position(|s| s.id == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    /// Deliver an event to every handler registered for its type
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        // Snapshot the handlers so one of them may subscribe without deadlocking
        let handlers: Vec<ErasedHandler> = read(&self.subscribers)
            .get(&TypeId::of::<E>())
            .map(|list| list.iter().map(|s| Arc::clone(&s.handler)).collect())
            .unwrap_or_default();

        let mut failed = 0;
        for handler in &handlers {
            if catch_unwind(AssertUnwindSafe(|| handler(&event as &dyn Any))).is_err() {
                log::error!("A handler for {} panicked", event.event_type());
                failed += 1;
            }
        }

        let entry = EventLogEntry {
            event_type: event.event_type(),
            event_id: event.event_id(),
            occurred_at: event.occurred_at(),
            delivered: handlers.len() - failed,
            failed,
        };
        log::debug!(
            "[EVENT] {} {} -> {} delivered, {} failed",
            entry.event_type,
            entry.event_id,
            entry.delivered,
            entry.failed
        );

        let mut log = write(&self.log);
        if log.len() == EVENT_LOG_CAPACITY {
            log.pop_front();
        }
        log.push_back(entry);
    }

    /// Recent emissions, oldest first
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        read(&self.log).iter().cloned().collect()
    }

    pub fn clear_event_log(&self) {
        write(&self.log).clear();
    }

    pub fn subscriber_count<E: 'static>(&self) -> usize {
        read(&self.subscribers)
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
