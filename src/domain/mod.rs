// src/domain/mod.rs
//
// Journal domain: what an entry is, when it may be finalized, where it was,
// and the numbers derived from finalized entries.
//
// Nothing in here touches storage, files or locks.

pub mod entry;
pub mod saved_location;
pub mod statistics;

pub use entry::{
    normalize_tags, parse_tags, validate_entry, Coordinate, DraftFilter, PhotoReference, TagMode,
    TrailEntry,
};
pub use saved_location::{
    find_near_duplicate, location_label, validate_saved_location, SavedLocation,
    NEAR_DUPLICATE_RADIUS_METERS,
};
pub use statistics::{
    HourHistogram, JournalSummary, PeriodCount, Sighting, SpeciesCount, TrendGranularity,
};

use thiserror::Error;

/// A rule of the journal was broken
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
