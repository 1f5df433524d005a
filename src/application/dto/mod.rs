// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs carry derived values (can_finalize, labels) but never store them back
// - DTOs are simple, serializable structs
// - Ids and timestamps travel as strings

use serde::{Deserialize, Serialize};

use crate::db::DatabaseStats;
use crate::domain::entry::{DraftFilter, PhotoReference, TrailEntry};
use crate::domain::saved_location::{location_label, SavedLocation};
use crate::domain::statistics::{HourHistogram, JournalSummary, SpeciesCount};
use crate::services::{FinalizeSummary, ImportSummary, SaveLocationOutcome};

// ============================================================================
// ENTRY DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDto {
    pub id: String,
    pub date: String,
    pub species: Option<String>,
    pub camera: Option<String>,
    pub notes: String,
    pub tags: Vec<String>,
    pub photo: Option<PhotoReference>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_unknown: bool,
    pub location_label: String,
    pub is_draft: bool,
    pub can_finalize: bool,
    pub original_filename: Option<String>,
    pub external_asset_id: Option<String>,
}

impl EntryDto {
    pub fn from_entry(entry: &TrailEntry, saved: &[SavedLocation]) -> Self {
        Self {
            id: entry.id().to_string(),
            date: entry.date.to_rfc3339(),
            species: entry.species.clone(),
            camera: entry.camera.clone(),
            notes: entry.notes.clone(),
            tags: entry.tags.clone(),
            photo: entry.photo().cloned(),
            latitude: entry.latitude(),
            longitude: entry.longitude(),
            location_unknown: entry.location_unknown,
            location_label: location_label(entry, saved),
            is_draft: entry.is_draft,
            can_finalize: entry.can_finalize(),
            original_filename: entry.original_filename().map(str::to_string),
            external_asset_id: entry.external_asset_id().map(str::to_string),
        }
    }
}

/// Detail-screen edit
///
/// Absent fields are left alone. An empty species string clears the species;
/// `clear_coordinate` drops the coordinate without declaring it unknown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEntryDto {
    pub entry_id: String,
    pub date: Option<String>,
    pub species: Option<String>,
    pub camera: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub clear_coordinate: bool,
    pub location_unknown: Option<bool>,
    pub is_draft: Option<bool>,
}

// ============================================================================
// REVIEW DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOptionDto {
    pub filter: DraftFilter,
    pub label: String,
    pub count: usize,
}

/// Everything the review screen renders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDto {
    pub filter: DraftFilter,
    pub filters: Vec<FilterOptionDto>,
    pub drafts: Vec<EntryDto>,
    pub selected: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizeSummaryDto {
    pub finalized: usize,
    pub skipped: usize,
    pub message: String,
}

impl From<FinalizeSummary> for FinalizeSummaryDto {
    fn from(summary: FinalizeSummary) -> Self {
        Self {
            finalized: summary.finalized,
            skipped: summary.skipped,
            message: summary.message(),
        }
    }
}

// ============================================================================
// IMPORT DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummaryDto {
    pub imported: usize,
    pub failed: usize,
}

impl From<ImportSummary> for ImportSummaryDto {
    fn from(summary: ImportSummary) -> Self {
        Self {
            imported: summary.imported,
            failed: summary.failed,
        }
    }
}

// ============================================================================
// SAVED LOCATION DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedLocationDto {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: String,
}

impl From<SavedLocation> for SavedLocationDto {
    fn from(location: SavedLocation) -> Self {
        Self {
            id: location.id.to_string(),
            name: location.name,
            latitude: location.coordinate.latitude,
            longitude: location.coordinate.longitude,
            created_at: location.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveLocationResultDto {
    /// False when an existing pin was too close; `location` is that pin
    pub saved: bool,
    pub location: SavedLocationDto,
}

impl From<SaveLocationOutcome> for SaveLocationResultDto {
    fn from(outcome: SaveLocationOutcome) -> Self {
        match outcome {
            SaveLocationOutcome::Saved(location) => Self {
                saved: true,
                location: location.into(),
            },
            SaveLocationOutcome::NearDuplicate(location) => Self {
                saved: false,
                location: location.into(),
            },
        }
    }
}

// ============================================================================
// STATISTICS DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsDto {
    pub summary: JournalSummary,
    pub top_species: Vec<SpeciesCount>,
    pub hours: HourHistogram,
    pub peak_hour: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageStatsDto {
    pub size_bytes: i64,
    pub entry_count: i64,
    pub draft_count: i64,
    pub saved_location_count: i64,
}

impl From<DatabaseStats> for StorageStatsDto {
    fn from(stats: DatabaseStats) -> Self {
        Self {
            size_bytes: stats.size_bytes,
            entry_count: stats.entry_count,
            draft_count: stats.draft_count,
            saved_location_count: stats.saved_location_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SightingDto {
    pub entry_id: String,
    pub species: String,
    pub latitude: f64,
    pub longitude: f64,
    pub date: String,
}

impl From<crate::domain::Sighting> for SightingDto {
    fn from(sighting: crate::domain::Sighting) -> Self {
        Self {
            entry_id: sighting.entry_id.to_string(),
            species: sighting.species,
            latitude: sighting.coordinate.latitude,
            longitude: sighting.coordinate.longitude,
            date: sighting.date.to_rfc3339(),
        }
    }
}
