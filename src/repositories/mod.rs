// src/repositories/mod.rs
//
// Persistence behind traits. Implementations map rows to records and back;
// they never validate, emit events or call each other.

pub mod entry_repository;
pub mod saved_location_repository;

pub use entry_repository::{EntryRepository, SqliteEntryRepository};
pub use saved_location_repository::{SavedLocationRepository, SqliteSavedLocationRepository};
