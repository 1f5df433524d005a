// src/services/journal_service.rs
//
// Entry Collection Manager
//
// RULES:
// - Sole owner of the in-memory, newest-first entry list
// - Every mutation that changes the list ends in a full save
// - A failed save is logged and announced, never returned
// - Unknown ids are silent no-ops, never errors
// - No validation of caller input here; the workflows above validate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entry::{validate_entry, Coordinate, TrailEntry};
use crate::domain::DomainError;
use crate::error::{AppError, AppResult};
use crate::events::{
    DraftsInserted, EntriesDeleted, EntriesFinalized, EntriesUpdated, EventBus, JournalSaveFailed,
};
use crate::infrastructure::PhotoStore;
use crate::repositories::EntryRepository;

/// Outcome of a finalize request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeSummary {
    pub finalized: usize,
    pub skipped: usize,
}

impl FinalizeSummary {
    /// User-facing sentence, e.g. "Finalized 3. Skipped 2 because required fields are missing."
    pub fn message(&self) -> String {
        if self.skipped == 0 {
            format!("Finalized {}.", self.finalized)
        } else {
            format!(
                "Finalized {}. Skipped {} because required fields are missing.",
                self.finalized, self.skipped
            )
        }
    }
}

/// Field-wise edit of one entry, as a detail screen submits it
///
/// `None` leaves a field alone; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct UpdateEntryRequest {
    pub entry_id: Uuid,
    pub date: Option<DateTime<Utc>>,
    pub species: Option<Option<String>>,
    pub camera: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub coordinate: Option<Option<Coordinate>>,
    pub location_unknown: Option<bool>,
    pub is_draft: Option<bool>,
}

pub struct JournalService {
    entries: Vec<TrailEntry>,
    entry_repo: Arc<dyn EntryRepository>,
    photo_store: Arc<dyn PhotoStore>,
    event_bus: Arc<EventBus>,
}

impl JournalService {
    /// Load the collection once from the repository
    ///
    /// A load failure is returned: starting empty would let the next save
    /// overwrite the stored journal.
    pub fn load(
        entry_repo: Arc<dyn EntryRepository>,
        photo_store: Arc<dyn PhotoStore>,
        event_bus: Arc<EventBus>,
    ) -> AppResult<Self> {
        let entries = entry_repo.load_all()?;
        log::info!("Loaded {} journal entries", entries.len());

        Ok(Self {
            entries,
            entry_repo,
            photo_store,
            event_bus,
        })
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn entries(&self) -> &[TrailEntry] {
        &self.entries
    }

    /// First entry carrying the id
    pub fn get(&self, id: Uuid) -> Option<&TrailEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    pub fn drafts(&self) -> impl Iterator<Item = &TrailEntry> {
        self.entries.iter().filter(|e| e.is_draft)
    }

    pub fn finalized(&self) -> impl Iterator<Item = &TrailEntry> {
        self.entries.iter().filter(|e| !e.is_draft)
    }

    pub fn draft_count(&self) -> usize {
        self.drafts().count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ------------------------------------------------------------------
    // Inserts
    // ------------------------------------------------------------------

    /// Insert one draft at the front (newest first)
    pub fn insert_draft(&mut self, entry: TrailEntry) {
        self.insert_drafts(vec![entry]);
    }

    /// Insert a batch of drafts at the front, keeping the batch order
    pub fn insert_drafts(&mut self, drafts: Vec<TrailEntry>) {
        if drafts.is_empty() {
            return;
        }
        debug_assert!(drafts.iter().all(|e| e.is_draft), "only drafts are inserted");

        let ids: Vec<Uuid> = drafts.iter().map(TrailEntry::id).collect();
        self.entries.splice(0..0, drafts);
        self.persist();

        self.event_bus.emit(DraftsInserted::new(ids));
    }

    // ------------------------------------------------------------------
    // Updates
    // ------------------------------------------------------------------

    /// Apply a mutation to the entry with this id
    ///
    /// Returns false (and saves nothing) when the id is not in the collection.
    pub fn update<F>(&mut self, id: Uuid, mutation: F) -> bool
    where
        F: FnOnce(&mut TrailEntry),
    {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id() == id) else {
            return false;
        };

        mutation(entry);
        self.persist();

        self.event_bus.emit(EntriesUpdated::new(vec![id]));
        true
    }

    /// Apply the same mutation to every entry whose id is in the set
    ///
    /// Ids that are not present are skipped. One save for the whole batch;
    /// none when nothing matched. Returns the number of entries touched.
    pub fn update_many<F>(&mut self, ids: &HashSet<Uuid>, mut mutation: F) -> usize
    where
        F: FnMut(&mut TrailEntry),
    {
        if ids.is_empty() {
            return 0;
        }

        let mut touched = Vec::new();
        for entry in self.entries.iter_mut().filter(|e| ids.contains(&e.id())) {
            mutation(entry);
            touched.push(entry.id());
        }

        if touched.is_empty() {
            return 0;
        }

        self.persist();
        let count = touched.len();
        self.event_bus.emit(EntriesUpdated::new(touched));
        count
    }

    /// Detail-screen edit, validated before anything is committed
    ///
    /// Returns Ok(false) for an unknown id. Leaving draft state here obeys
    /// the same eligibility rule as `finalize`.
    pub fn edit_entry(&mut self, request: UpdateEntryRequest) -> AppResult<bool> {
        let Some(current) = self.get(request.entry_id) else {
            return Ok(false);
        };

        let mut edited = current.clone();
        apply_edit(&mut edited, &request);

        validate_entry(&edited)?;
        if request.is_draft == Some(false) && !edited.can_finalize() {
            return Err(AppError::Domain(DomainError::InvalidStateTransition(
                "An entry needs a species and a location answer before it is final".to_string(),
            )));
        }

        Ok(self.update(request.entry_id, move |entry| *entry = edited))
    }

    // ------------------------------------------------------------------
    // Finalize
    // ------------------------------------------------------------------

    /// Move every eligible selected entry out of draft state
    ///
    /// Present and eligible: finalized. Present and not eligible: skipped,
    /// left untouched. Not present: not counted.
    pub fn finalize(&mut self, ids: &HashSet<Uuid>) -> FinalizeSummary {
        let mut summary = FinalizeSummary::default();
        if ids.is_empty() {
            return summary;
        }

        let mut finalized_ids = Vec::new();
        for entry in self.entries.iter_mut().filter(|e| ids.contains(&e.id())) {
            if entry.finalize() {
                summary.finalized += 1;
                finalized_ids.push(entry.id());
            } else {
                summary.skipped += 1;
            }
        }

        if !finalized_ids.is_empty() {
            self.persist();
            self.event_bus.emit(EntriesUpdated::new(finalized_ids));
        }

        log::info!("{}", summary.message());
        self.event_bus
            .emit(EntriesFinalized::new(summary.finalized, summary.skipped));
        summary
    }

    // ------------------------------------------------------------------
    // Deletes
    // ------------------------------------------------------------------

    /// Remove the entry with this id, if any
    pub fn delete_entry(&mut self, id: Uuid) -> usize {
        self.remove_where(|e| e.id() == id)
    }

    /// Remove every entry whose id is in the set
    pub fn delete_entries(&mut self, ids: &HashSet<Uuid>) -> usize {
        if ids.is_empty() {
            return 0;
        }
        self.remove_where(|e| ids.contains(&e.id()))
    }

    /// Remove every draft; finalized entries stay
    pub fn delete_all_drafts(&mut self) -> usize {
        self.remove_where(|e| e.is_draft)
    }

    pub fn delete_all_entries(&mut self) -> usize {
        self.remove_where(|_| true)
    }

    fn remove_where<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(&TrailEntry) -> bool,
    {
        let (removed, kept): (Vec<TrailEntry>, Vec<TrailEntry>) =
            std::mem::take(&mut self.entries)
                .into_iter()
                .partition(|e| predicate(e));
        self.entries = kept;

        if removed.is_empty() {
            return 0;
        }

        let photos_removed = removed
            .iter()
            .filter_map(TrailEntry::local_photo_filename)
            .filter(|filename| self.remove_photo(filename))
            .count();

        self.persist();

        let ids: Vec<Uuid> = removed.iter().map(TrailEntry::id).collect();
        let count = ids.len();
        self.event_bus.emit(EntriesDeleted::new(ids, photos_removed));
        count
    }

    /// Best-effort photo cleanup
    fn remove_photo(&self, filename: &str) -> bool {
        match self.photo_store.remove(filename) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Could not remove photo {}: {}", filename, e);
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Write the whole collection back; failures are logged and announced
    fn persist(&self) {
        if let Err(e) = self.entry_repo.save_all(&self.entries) {
            log::error!("Failed to save journal ({} entries): {}", self.entries.len(), e);
            self.event_bus.emit(JournalSaveFailed::new(e.to_string()));
        }
    }
}

fn apply_edit(entry: &mut TrailEntry, request: &UpdateEntryRequest) {
    if let Some(date) = request.date {
        entry.date = date;
    }
    if let Some(species) = &request.species {
        let species = species
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        entry.set_species(species);
    }
    if let Some(camera) = &request.camera {
        entry.set_camera(camera);
    }
    if let Some(notes) = &request.notes {
        entry.notes = notes.clone();
    }
    if let Some(tags) = &request.tags {
        entry.replace_tags(tags);
    }
    match (request.coordinate, request.location_unknown) {
        (_, Some(true)) => entry.mark_location_unknown(),
        (Some(Some(coordinate)), _) => entry.set_coordinate(coordinate),
        (Some(None), _) | (None, Some(false)) => entry.clear_location(),
        (None, None) => {}
    }
    match request.is_draft {
        Some(true) => entry.mark_as_draft(),
        Some(false) => entry.is_draft = false,
        None => {}
    }
}
