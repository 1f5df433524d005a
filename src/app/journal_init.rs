// src/app/journal_init.rs
//
// Journal Initialization
//
// Wires the database, repositories, photo store, event bus and services
// into one AppState.
//
// CRITICAL RULES:
// - The schema is applied before any repository is built
// - The journal is loaded exactly once, here
// - A load failure aborts startup; an empty journal would overwrite the file

use std::sync::{Arc, Mutex};

use crate::app::config::JournalConfig;
use crate::application::AppState;
use crate::db::{create_connection_pool, initialize_database, verify_database_integrity};
use crate::error::AppResult;
use crate::events::{create_event_bus, EventBus, JournalSaveFailed};
use crate::infrastructure::{LocalPhotoStore, PhotoStore};
use crate::repositories::{
    EntryRepository, SavedLocationRepository, SqliteEntryRepository,
    SqliteSavedLocationRepository,
};
use crate::services::{
    ImportService, JournalService, ReviewSession, SavedLocationService, StatisticsService,
};

/// Build the full application state from a configuration
pub fn init_app_state(config: &JournalConfig) -> AppResult<AppState> {
    log::info!("Opening journal in {}", config.data_dir.display());

    // 1. INFRASTRUCTURE
    let event_bus = Arc::new(create_event_bus());
    let pool = Arc::new(create_connection_pool(&config.database_file)?);
    {
        let conn = pool.get()?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;
    }
    let photo_store: Arc<dyn PhotoStore> =
        Arc::new(LocalPhotoStore::new(config.photos_dir.clone())?);

    // 2. REPOSITORIES
    let entry_repo: Arc<dyn EntryRepository> = Arc::new(SqliteEntryRepository::new(pool.clone()));
    let location_repo: Arc<dyn SavedLocationRepository> =
        Arc::new(SqliteSavedLocationRepository::new(pool.clone()));

    // 3. SERVICES
    let journal = JournalService::load(entry_repo, photo_store.clone(), event_bus.clone())?;
    let import_service = Arc::new(ImportService::new(photo_store, event_bus.clone()));
    let saved_location_service = Arc::new(SavedLocationService::new(location_repo, event_bus.clone()));
    let statistics_service = Arc::new(StatisticsService::new());

    // 4. EVENT HANDLER REGISTRATION
    register_journal_handlers(&event_bus);

    log::info!(
        "Journal ready: {} entries ({} drafts)",
        journal.len(),
        journal.draft_count()
    );

    Ok(AppState {
        pool,
        event_bus,
        journal: Arc::new(Mutex::new(journal)),
        review: Arc::new(Mutex::new(ReviewSession::new())),
        import_service,
        saved_location_service,
        statistics_service,
    })
}

/// Handlers every running journal carries
pub fn register_journal_handlers(event_bus: &EventBus) {
    event_bus.subscribe::<JournalSaveFailed, _>(|event| {
        log::warn!(
            "Journal changes are only in memory until the next successful save ({})",
            event.reason
        );
    });
}
