// events/types.rs
//
// Facts the journal announces after they happened.
//
// RULES:
// - Past tense, immutable, no behavior
// - Carry ids and counts, never whole entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub trait DomainEvent: std::fmt::Debug + Clone {
    fn event_id(&self) -> Uuid;
    fn occurred_at(&self) -> DateTime<Utc>;
    fn event_type(&self) -> &'static str;
}

/// Declares an event struct with the common envelope (`event_id`,
/// `occurred_at`), a `new` taking the payload fields in order, and its
/// `DomainEvent` impl.
macro_rules! domain_event {
    ($(#[$meta:meta])* $name:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub struct $name {
            pub event_id: Uuid,
            pub occurred_at: DateTime<Utc>,
            $(pub $field: $ty,)*
        }

        impl $name {
            pub fn new($($field: $ty),*) -> Self {
                Self {
                    event_id: Uuid::new_v4(),
                    occurred_at: Utc::now(),
                    $($field,)*
                }
            }
        }

        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid {
                self.event_id
            }

            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }

            fn event_type(&self) -> &'static str {
                stringify!($name)
            }
        }
    };
}

// ============================================================================
// ENTRY COLLECTION
// ============================================================================

domain_event!(
    /// Drafts entered the collection, newest first
    DraftsInserted { entry_ids: Vec<Uuid> }
);

domain_event!(
    /// Entries were changed in place
    EntriesUpdated { entry_ids: Vec<Uuid> }
);

domain_event!(
    /// Entries left the collection; `photos_removed` counts deleted local files
    EntriesDeleted { entry_ids: Vec<Uuid>, photos_removed: usize }
);

domain_event!(
    /// Outcome of one finalize request
    EntriesFinalized { finalized: usize, skipped: usize }
);

domain_event!(
    /// Writing the collection back failed. Memory still holds the truth;
    /// the next mutation writes everything again.
    JournalSaveFailed { reason: String }
);

// ============================================================================
// IMPORT
// ============================================================================

domain_event!(
    PhotosImported { imported: usize, failed: usize }
);

// ============================================================================
// SAVED LOCATIONS
// ============================================================================

domain_event!(
    SavedLocationCreated { location_id: Uuid, name: String }
);

domain_event!(
    SavedLocationDeleted { location_id: Uuid }
);
