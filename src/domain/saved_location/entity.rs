use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entry::{Coordinate, TrailEntry};

/// Radius under which two pins count as the same place when saving
pub const NEAR_DUPLICATE_RADIUS_METERS: f64 = 25.0;

/// A named coordinate the user pinned for reuse
/// Lifecycle is independent of any entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedLocation {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Pinned coordinate
    pub coordinate: Coordinate,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl SavedLocation {
    pub fn new(name: String, coordinate: Coordinate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            coordinate,
            created_at: Utc::now(),
        }
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
    }

    /// Same place for display purposes: equal after rounding to 4 decimals
    pub fn matches(&self, coordinate: &Coordinate) -> bool {
        self.coordinate.rounded_key() == coordinate.rounded_key()
    }

    /// Too close to save as a separate pin
    pub fn is_near(&self, coordinate: &Coordinate) -> bool {
        self.coordinate.distance_meters(coordinate) < NEAR_DUPLICATE_RADIUS_METERS
    }
}

impl std::fmt::Display for SavedLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Human-readable location for an entry
pub fn location_label(entry: &TrailEntry, saved: &[SavedLocation]) -> String {
    if entry.location_unknown {
        return "Unknown location".to_string();
    }
    match &entry.coordinate {
        Some(coordinate) => saved
            .iter()
            .find(|location| location.matches(coordinate))
            .map(|location| location.name.clone())
            .unwrap_or_else(|| coordinate.to_string()),
        None => "No location".to_string(),
    }
}

/// First saved location within the near-duplicate radius
pub fn find_near_duplicate<'a>(
    saved: &'a [SavedLocation],
    coordinate: &Coordinate,
) -> Option<&'a SavedLocation> {
    saved.iter().find(|location| location.is_near(coordinate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin(name: &str, lat: f64, lon: f64) -> SavedLocation {
        SavedLocation::new(name.to_string(), Coordinate::new(lat, lon).unwrap())
    }

    #[test]
    fn test_matches_rounds_to_four_decimals() {
        let location = pin("Saltlick", 59.91391, 10.75224);
        assert!(location.matches(&Coordinate::new(59.91389, 10.75221).unwrap()));
        assert!(!location.matches(&Coordinate::new(59.9141, 10.7522).unwrap()));
    }

    #[test]
    fn test_near_duplicate_radius() {
        let saved = vec![pin("Feeder", 60.0, 10.0)];
        // ~11 m north
        let close = Coordinate::new(60.0001, 10.0).unwrap();
        // ~55 m north
        let far = Coordinate::new(60.0005, 10.0).unwrap();

        assert!(find_near_duplicate(&saved, &close).is_some());
        assert!(find_near_duplicate(&saved, &far).is_none());
    }

    #[test]
    fn test_location_label() {
        let saved = vec![pin("Beaver dam", 61.1234, 9.5678)];

        let mut entry = TrailEntry::new_draft(Utc::now());
        assert_eq!(location_label(&entry, &saved), "No location");

        entry.set_coordinate(Coordinate::new(61.12341, 9.56779).unwrap());
        assert_eq!(location_label(&entry, &saved), "Beaver dam");

        entry.set_coordinate(Coordinate::new(62.0, 9.0).unwrap());
        assert_eq!(location_label(&entry, &saved), "62.0000, 9.0000");

        entry.mark_location_unknown();
        assert_eq!(location_label(&entry, &saved), "Unknown location");
    }
}
