// src/events/mod.rs
//
// In-process notifications. Services emit after a change is persisted;
// subscribers only observe and never feed back into the emitting service.

pub mod bus;
pub mod types;

pub use types::DomainEvent;

pub use types::{
    // Entry collection
    DraftsInserted,
    EntriesDeleted,
    EntriesFinalized,
    EntriesUpdated,
    JournalSaveFailed,
    // Import
    PhotosImported,
    // Saved locations
    SavedLocationCreated,
    SavedLocationDeleted,
};

pub use bus::{EventBus, EventLogEntry, SubscriptionId};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
