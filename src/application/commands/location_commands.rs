// src/application/commands/location_commands.rs

use super::parse_id;
use crate::application::{dto::*, state::AppState};
use crate::domain::entry::Coordinate;

pub fn list_saved_locations(state: &AppState) -> Result<Vec<SavedLocationDto>, String> {
    let locations = state
        .saved_location_service
        .list()
        .map_err(|e| e.to_string())?;

    Ok(locations.into_iter().map(SavedLocationDto::from).collect())
}

/// Pin a coordinate; an existing pin within 25 m is returned instead
pub fn save_location(
    state: &AppState,
    name: &str,
    latitude: f64,
    longitude: f64,
) -> Result<SaveLocationResultDto, String> {
    let coordinate = Coordinate::new(latitude, longitude).map_err(|e| e.to_string())?;

    let outcome = state
        .saved_location_service
        .save_location(name, coordinate)
        .map_err(|e| e.to_string())?;

    Ok(outcome.into())
}

pub fn rename_saved_location(
    state: &AppState,
    location_id: &str,
    name: &str,
) -> Result<SavedLocationDto, String> {
    let id = parse_id(location_id)?;
    let location = state
        .saved_location_service
        .rename(id, name)
        .map_err(|e| e.to_string())?;

    Ok(location.into())
}

pub fn delete_saved_location(state: &AppState, location_id: &str) -> Result<(), String> {
    let id = parse_id(location_id)?;
    state
        .saved_location_service
        .delete(id)
        .map_err(|e| e.to_string())
}
