// src/application/commands/entry_commands.rs

use chrono::{DateTime, Utc};

use super::parse_id;
use crate::application::{dto::*, state::AppState};
use crate::domain::entry::{Coordinate, TrailEntry};
use crate::services::UpdateEntryRequest;

/// Whole journal, newest first
pub fn list_entries(state: &AppState) -> Result<Vec<EntryDto>, String> {
    let saved = state
        .saved_location_service
        .list()
        .map_err(|e| e.to_string())?;
    let journal = state.journal().map_err(|e| e.to_string())?;

    Ok(journal
        .entries()
        .iter()
        .map(|entry| EntryDto::from_entry(entry, &saved))
        .collect())
}

/// Finalized entries only
pub fn list_journal(state: &AppState) -> Result<Vec<EntryDto>, String> {
    let saved = state
        .saved_location_service
        .list()
        .map_err(|e| e.to_string())?;
    let journal = state.journal().map_err(|e| e.to_string())?;

    Ok(journal
        .finalized()
        .map(|entry| EntryDto::from_entry(entry, &saved))
        .collect())
}

pub fn get_entry(state: &AppState, entry_id: &str) -> Result<Option<EntryDto>, String> {
    let id = parse_id(entry_id)?;
    let saved = state
        .saved_location_service
        .list()
        .map_err(|e| e.to_string())?;
    let journal = state.journal().map_err(|e| e.to_string())?;

    Ok(journal.get(id).map(|entry| EntryDto::from_entry(entry, &saved)))
}

/// Apply a detail-screen edit; false when the entry no longer exists
pub fn update_entry(state: &AppState, dto: UpdateEntryDto) -> Result<bool, String> {
    let request = to_request(dto)?;
    let mut journal = state.journal().map_err(|e| e.to_string())?;
    journal.edit_entry(request).map_err(|e| e.to_string())
}

pub fn delete_entry(state: &AppState, entry_id: &str) -> Result<usize, String> {
    let id = parse_id(entry_id)?;
    let mut journal = state.journal().map_err(|e| e.to_string())?;
    Ok(journal.delete_entry(id))
}

pub fn delete_all_drafts(state: &AppState) -> Result<usize, String> {
    let mut journal = state.journal().map_err(|e| e.to_string())?;
    Ok(journal.delete_all_drafts())
}

pub fn delete_all_entries(state: &AppState) -> Result<usize, String> {
    let mut journal = state.journal().map_err(|e| e.to_string())?;
    Ok(journal.delete_all_entries())
}

/// Create an empty draft by hand (no photo)
pub fn create_draft(state: &AppState) -> Result<String, String> {
    let draft = TrailEntry::new_draft(Utc::now());
    let id = draft.id();
    let mut journal = state.journal().map_err(|e| e.to_string())?;
    journal.insert_draft(draft);
    Ok(id.to_string())
}

fn to_request(dto: UpdateEntryDto) -> Result<UpdateEntryRequest, String> {
    let entry_id = parse_id(&dto.entry_id)?;

    let date = dto
        .date
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|d| d.with_timezone(&Utc))
                .map_err(|e| format!("Invalid date: {}", e))
        })
        .transpose()?;

    let coordinate = match (dto.latitude, dto.longitude) {
        (Some(latitude), Some(longitude)) => Some(Some(Coordinate {
            latitude,
            longitude,
        })),
        (None, None) if dto.clear_coordinate => Some(None),
        (None, None) => None,
        _ => return Err("Latitude and longitude must be given together".to_string()),
    };

    let species = dto
        .species
        .map(|s| if s.trim().is_empty() { None } else { Some(s) });

    Ok(UpdateEntryRequest {
        entry_id,
        date,
        species,
        camera: dto.camera,
        notes: dto.notes,
        tags: dto.tags,
        coordinate,
        location_unknown: dto.location_unknown,
        is_draft: dto.is_draft,
    })
}
