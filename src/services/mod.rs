// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod import_service;
pub mod journal_service;
pub mod review_service;
pub mod saved_location_service;
pub mod statistics_service;

#[cfg(test)]
mod review_service_tests;

// Re-export all services and their types
pub use journal_service::{
    FinalizeSummary,
    JournalService,
    UpdateEntryRequest,
};

pub use review_service::{
    LocationEdit,
    ReviewSession,
};

pub use import_service::{
    DirectoryImportProvider,
    ImportService,
    ImportSummary,
    ImportedPhoto,
    PhotoImportProvider,
    PhotoStream,
};

pub use saved_location_service::{
    SaveLocationOutcome,
    SavedLocationService,
};

pub use statistics_service::StatisticsService;
