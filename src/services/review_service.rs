// src/services/review_service.rs
//
// Review Workflow
//
// Filtered view over the drafts plus the set of drafts the user picked for
// a batch action.
//
// RULES:
// - The selection holds ids, never entry copies
// - Only visible drafts can be selected
// - The selection is pruned to the visible drafts before and after every
//   batch action, and after every filter change
// - Batch input is validated before the first entry is touched
// - An empty selection makes every batch action a no-op

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::domain::entry::{parse_tags, Coordinate, DraftFilter, TagMode, TrailEntry};
use crate::domain::saved_location::SavedLocation;
use crate::error::{AppError, AppResult};
use crate::services::journal_service::{FinalizeSummary, JournalService};

/// Location answer applied to every selected draft
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LocationEdit {
    /// "I don't know where this was"
    MarkUnknown,
    Coordinate(Coordinate),
    /// Neither a coordinate nor an unknown answer
    Clear,
}

#[derive(Debug, Default)]
pub struct ReviewSession {
    selection: HashSet<Uuid>,
    filter: DraftFilter,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // FILTERING
    // ========================================================================

    pub fn filter(&self) -> DraftFilter {
        self.filter
    }

    /// Drafts passing the active filter, in collection order
    pub fn visible_drafts<'a>(&self, journal: &'a JournalService) -> Vec<&'a TrailEntry> {
        journal
            .entries()
            .iter()
            .filter(|e| self.filter.matches(e))
            .collect()
    }

    pub fn set_filter(&mut self, filter: DraftFilter, journal: &JournalService) {
        self.filter = filter;
        self.prune(journal);
    }

    /// Drop every selected id that is not currently visible
    pub fn prune(&mut self, journal: &JournalService) {
        let visible: HashSet<Uuid> = self
            .visible_drafts(journal)
            .into_iter()
            .map(TrailEntry::id)
            .collect();
        let before = self.selection.len();
        self.selection.retain(|id| visible.contains(id));

        let dropped = before - self.selection.len();
        if dropped > 0 {
            log::debug!("Pruned {} ids from the review selection", dropped);
        }
    }

    // ========================================================================
    // SELECTION
    // ========================================================================

    /// Selects a visible draft; any other id is ignored and `false` returned
    pub fn select(&mut self, id: Uuid, journal: &JournalService) -> bool {
        if !self.is_visible(id, journal) {
            log::debug!("Ignoring selection of {}: not a visible draft", id);
            return false;
        }
        self.selection.insert(id);
        true
    }

    pub fn deselect(&mut self, id: Uuid) {
        self.selection.remove(&id);
    }

    /// Flip membership; returns whether the id is selected afterwards
    pub fn toggle(&mut self, id: Uuid, journal: &JournalService) -> bool {
        if self.selection.remove(&id) {
            false
        } else {
            self.select(id, journal)
        }
    }

    pub fn select_all_visible(&mut self, journal: &JournalService) {
        let visible = self.visible_drafts(journal);
        self.selection.extend(visible.into_iter().map(TrailEntry::id));
    }

    fn is_visible(&self, id: Uuid, journal: &JournalService) -> bool {
        journal
            .entries()
            .iter()
            .any(|e| e.id() == id && self.filter.matches(e))
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected(&self) -> &HashSet<Uuid> {
        &self.selection
    }

    pub fn is_selected(&self, id: Uuid) -> bool {
        self.selection.contains(&id)
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    // ========================================================================
    // BATCH EDITS
    // ========================================================================

    /// Same species for every selected draft
    pub fn set_species(&mut self, journal: &mut JournalService, species: &str) -> AppResult<usize> {
        let species = species.trim();
        if species.is_empty() {
            return Err(AppError::Validation("Species cannot be empty".to_string()));
        }

        let species = species.to_string();
        Ok(self.apply(journal, |e| e.set_species(Some(species.clone()))))
    }

    pub fn set_location(
        &mut self,
        journal: &mut JournalService,
        edit: LocationEdit,
    ) -> AppResult<usize> {
        let changed = match edit {
            LocationEdit::MarkUnknown => self.apply(journal, TrailEntry::mark_location_unknown),
            LocationEdit::Coordinate(coordinate) => {
                coordinate.validate()?;
                self.apply(journal, |e| e.set_coordinate(coordinate))
            }
            LocationEdit::Clear => self.apply(journal, TrailEntry::clear_location),
        };
        Ok(changed)
    }

    /// Pin every selected draft to a saved location
    pub fn apply_saved_location(
        &mut self,
        journal: &mut JournalService,
        location: &SavedLocation,
    ) -> AppResult<usize> {
        self.set_location(journal, LocationEdit::Coordinate(location.coordinate))
    }

    /// Blank input clears the camera
    pub fn set_camera(&mut self, journal: &mut JournalService, camera: &str) -> usize {
        self.apply(journal, |e| e.set_camera(camera))
    }

    /// Comma-separated tags, merged into or replacing each draft's set
    pub fn set_tags(&mut self, journal: &mut JournalService, input: &str, mode: TagMode) -> usize {
        let tags = parse_tags(input);
        match mode {
            TagMode::Add => self.apply(journal, |e| e.add_tags(&tags)),
            TagMode::Replace => self.apply(journal, |e| e.replace_tags(&tags)),
        }
    }

    pub fn finalize_selected(&mut self, journal: &mut JournalService) -> FinalizeSummary {
        self.prune(journal);
        let summary = journal.finalize(&self.selection);
        self.prune(journal);
        summary
    }

    pub fn delete_selected(&mut self, journal: &mut JournalService) -> usize {
        self.prune(journal);
        let removed = journal.delete_entries(&self.selection);
        self.prune(journal);
        removed
    }

    fn apply<F>(&mut self, journal: &mut JournalService, mutation: F) -> usize
    where
        F: FnMut(&mut TrailEntry),
    {
        // The journal may have changed since the ids were picked
        self.prune(journal);
        if self.selection.is_empty() {
            return 0;
        }
        let changed = journal.update_many(&self.selection, mutation);
        self.prune(journal);
        changed
    }
}
