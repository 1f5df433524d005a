// src/services/saved_location_service.rs
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entry::{Coordinate, TrailEntry};
use crate::domain::saved_location::{
    find_near_duplicate, location_label, validate_saved_location, SavedLocation,
};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, SavedLocationCreated, SavedLocationDeleted};
use crate::repositories::SavedLocationRepository;

/// Result of asking to pin a coordinate
#[derive(Debug, Clone)]
pub enum SaveLocationOutcome {
    Saved(SavedLocation),
    /// An existing pin lies within the near-duplicate radius; nothing saved
    NearDuplicate(SavedLocation),
}

pub struct SavedLocationService {
    location_repo: Arc<dyn SavedLocationRepository>,
    event_bus: Arc<EventBus>,
}

impl SavedLocationService {
    pub fn new(location_repo: Arc<dyn SavedLocationRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            location_repo,
            event_bus,
        }
    }

    /// All pins, ordered by name
    pub fn list(&self) -> AppResult<Vec<SavedLocation>> {
        self.location_repo.list_all()
    }

    pub fn save_location(&self, name: &str, coordinate: Coordinate) -> AppResult<SaveLocationOutcome> {
        let location = SavedLocation::new(name.trim().to_string(), coordinate);
        validate_saved_location(&location)?;

        let existing = self.location_repo.list_all()?;
        if let Some(near) = find_near_duplicate(&existing, &coordinate) {
            log::info!("Not saving {:?}: {:?} is within range", location.name, near.name);
            return Ok(SaveLocationOutcome::NearDuplicate(near.clone()));
        }

        self.location_repo.save(&location)?;
        self.event_bus
            .emit(SavedLocationCreated::new(location.id, location.name.clone()));

        Ok(SaveLocationOutcome::Saved(location))
    }

    pub fn rename(&self, id: Uuid, name: &str) -> AppResult<SavedLocation> {
        let mut location = self.location_repo.get_by_id(id)?.ok_or(AppError::NotFound)?;

        location.rename(name.trim().to_string());
        validate_saved_location(&location)?;

        self.location_repo.save(&location)?;
        Ok(location)
    }

    /// Remove a pin; entries keep their coordinates
    pub fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.location_repo.get_by_id(id)?.is_none() {
            return Ok(());
        }

        self.location_repo.delete(id)?;
        self.event_bus.emit(SavedLocationDeleted::new(id));
        Ok(())
    }

    pub fn label_for(&self, entry: &TrailEntry) -> AppResult<String> {
        let saved = self.location_repo.list_all()?;
        Ok(location_label(entry, &saved))
    }
}
