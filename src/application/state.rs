// src/application/state.rs

use std::sync::{Arc, Mutex, MutexGuard};

use crate::db::{get_connection, ConnectionPool, PooledConn};
use crate::error::AppResult;
use crate::events::EventBus;
use crate::services::{
    ImportService, JournalService, ReviewSession, SavedLocationService, StatisticsService,
};

/// Application state shared by every command
///
/// The journal is guarded by a single mutex: one writer at a time over the
/// whole collection. When a command needs both locks it takes the journal
/// first, then the review session.
pub struct AppState {
    pub pool: Arc<ConnectionPool>,
    pub event_bus: Arc<EventBus>,
    pub journal: Arc<Mutex<JournalService>>,
    pub review: Arc<Mutex<ReviewSession>>,
    pub import_service: Arc<ImportService>,
    pub saved_location_service: Arc<SavedLocationService>,
    pub statistics_service: Arc<StatisticsService>,
}

impl AppState {
    pub fn journal(&self) -> AppResult<MutexGuard<'_, JournalService>> {
        Ok(self.journal.lock()?)
    }

    pub fn connection(&self) -> AppResult<PooledConn> {
        get_connection(&self.pool)
    }

    pub fn review(&self) -> AppResult<MutexGuard<'_, ReviewSession>> {
        Ok(self.review.lock()?)
    }
}
