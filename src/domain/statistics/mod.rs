//! Critical Statistics Invariants:
//!
//! 1. Statistics are ALWAYS derived, NEVER primary
//! 2. Statistics are computed from finalized entries only
//! 3. Statistics NEVER alter entries
//! 4. Nothing here is persisted

pub mod entity;
pub use entity::{
    HourHistogram, JournalSummary, PeriodCount, Sighting, SpeciesCount, TrendGranularity,
};
