// src/lib.rs
// TrailJournal - Local-first wildlife trail-camera journal
//
// Layout:
// - domain: entries, saved locations, derived statistics
// - one JournalService owns the entry collection; nothing else writes it
// - services announce finished changes on the event bus
// - storage is a SQLite file plus a photo folder under the user's data dir

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod app;
pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    // Entry
    location_label,
    normalize_tags,
    parse_tags,
    validate_entry,
    validate_saved_location,
    Coordinate,
    DomainError,
    DraftFilter,
    // Statistics
    HourHistogram,
    JournalSummary,
    PeriodCount,
    PhotoReference,
    // Saved Location
    SavedLocation,
    Sighting,
    SpeciesCount,
    TagMode,
    TrailEntry,
    TrendGranularity,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    DomainEvent,
    DraftsInserted,
    EntriesDeleted,
    EntriesFinalized,
    EntriesUpdated,
    EventBus,
    EventLogEntry,
    JournalSaveFailed,
    PhotosImported,
    SavedLocationCreated,
    SavedLocationDeleted,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    EntryRepository,
    SavedLocationRepository,
    SqliteEntryRepository,
    SqliteSavedLocationRepository,
};

// ============================================================================
// PUBLIC API - Infrastructure
// ============================================================================

pub use infrastructure::{LocalPhotoStore, PhotoStore};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    DirectoryImportProvider,
    FinalizeSummary,
    ImportService,
    ImportSummary,
    ImportedPhoto,
    JournalService,
    LocationEdit,
    PhotoImportProvider,
    PhotoStream,
    ReviewSession,
    SaveLocationOutcome,
    SavedLocationService,
    StatisticsService,
    UpdateEntryRequest,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use app::{init_app_state, JournalConfig};
pub use application::AppState;

pub use application::commands;
pub use application::dto;
