// src/services/import_service.rs
//
// Import Service - turns photos from a provider into drafts
//
// RULES:
// - Every imported photo becomes exactly one fresh draft, or one failure
// - Photos are read one at a time; bytes are dropped once stored
// - Annotations start empty; only date, coordinate and provenance are filled
// - A coordinate is kept only when both halves are present and in range
// - Library photos are referenced, never copied

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entry::{validate_entry, Coordinate, PhotoReference, TrailEntry};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, PhotosImported};
use crate::infrastructure::PhotoStore;
use crate::services::journal_service::JournalService;

/// Extensions picked up by the directory provider (compared lowercase)
pub const IMPORTABLE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "heic", "heif"];

/// One photo handed over by a provider
#[derive(Debug, Clone, Default)]
pub struct ImportedPhoto {
    pub bytes: Vec<u8>,
    pub captured_at: Option<DateTime<Utc>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub source_filename: Option<String>,
    /// Id in an external photo library; when set the bytes are not stored
    pub external_asset_id: Option<String>,
}

/// Photos yielded one by one; an `Err` item is a photo that could not be read
pub type PhotoStream<'a> = Box<dyn Iterator<Item = AppResult<ImportedPhoto>> + 'a>;

/// Source of photos for an import run
pub trait PhotoImportProvider {
    /// Fails only when the source as a whole is unusable
    fn photos(&self) -> AppResult<PhotoStream<'_>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: usize,
}

// ============================================================================
// DIRECTORY PROVIDER
// ============================================================================

/// Reads image files from a folder tree
///
/// Capture time is the file's modification time and no GPS is read.
pub struct DirectoryImportProvider {
    root: PathBuf,
}

impl DirectoryImportProvider {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn is_importable(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| IMPORTABLE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false)
    }

    fn read_photo(path: &Path) -> AppResult<ImportedPhoto> {
        let bytes = std::fs::read(path)?;
        let captured_at = std::fs::metadata(path)?
            .modified()
            .ok()
            .map(DateTime::<Utc>::from);

        Ok(ImportedPhoto {
            bytes,
            captured_at,
            source_filename: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            ..Default::default()
        })
    }
}

impl PhotoImportProvider for DirectoryImportProvider {
    fn photos(&self) -> AppResult<PhotoStream<'_>> {
        if !self.root.is_dir() {
            return Err(AppError::Validation(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }

        let walk = walkdir::WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable path under the import folder: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && Self::is_importable(entry.path()))
            .map(|entry| {
                let photo = Self::read_photo(entry.path());
                if let Err(e) = &photo {
                    log::warn!("Could not read {}: {}", entry.path().display(), e);
                }
                photo
            });

        Ok(Box::new(walk))
    }
}

// ============================================================================
// IMPORT SERVICE
// ============================================================================

pub struct ImportService {
    photo_store: Arc<dyn PhotoStore>,
    event_bus: Arc<EventBus>,
}

impl ImportService {
    pub fn new(photo_store: Arc<dyn PhotoStore>, event_bus: Arc<EventBus>) -> Self {
        Self {
            photo_store,
            event_bus,
        }
    }

    /// Wrap every photo from the provider into a draft and insert the batch
    pub fn import(
        &self,
        journal: &mut JournalService,
        provider: &dyn PhotoImportProvider,
    ) -> AppResult<ImportSummary> {
        let photos = provider.photos()?;
        let now = Utc::now();

        let mut drafts = Vec::new();
        let mut failed = 0;

        for photo in photos {
            match photo.and_then(|photo| self.wrap(photo, now)) {
                Ok(draft) => drafts.push(draft),
                Err(e) => {
                    log::warn!("Import failed for one photo: {}", e);
                    failed += 1;
                }
            }
        }

        let summary = ImportSummary {
            imported: drafts.len(),
            failed,
        };

        journal.insert_drafts(drafts);

        log::info!(
            "Imported {} photos ({} failed)",
            summary.imported,
            summary.failed
        );
        self.event_bus
            .emit(PhotosImported::new(summary.imported, summary.failed));

        Ok(summary)
    }

    /// Build the draft for one photo
    pub fn wrap(&self, photo: ImportedPhoto, now: DateTime<Utc>) -> AppResult<TrailEntry> {
        let coordinate = Coordinate::from_parts(photo.latitude, photo.longitude);
        if coordinate.is_none() && (photo.latitude.is_some() || photo.longitude.is_some()) {
            log::debug!(
                "Dropping incomplete or out-of-range GPS ({:?}, {:?})",
                photo.latitude,
                photo.longitude
            );
        }

        let photo_ref = match &photo.external_asset_id {
            Some(asset_id) => Some(PhotoReference::Library {
                asset_id: asset_id.clone(),
            }),
            None if !photo.bytes.is_empty() => {
                let extension = photo
                    .source_filename
                    .as_deref()
                    .and_then(|name| Path::new(name).extension())
                    .and_then(|ext| ext.to_str())
                    .unwrap_or("jpg");
                let filename = self.photo_store.store(&photo.bytes, extension)?;
                Some(PhotoReference::Local { filename })
            }
            None => None,
        };

        let mut draft = TrailEntry::new_draft(photo.captured_at.unwrap_or(now)).with_provenance(
            photo_ref,
            photo.source_filename,
            photo.external_asset_id,
        );
        draft.coordinate = coordinate;

        validate_entry(&draft)?;
        Ok(draft)
    }
}
