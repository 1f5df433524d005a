//! Saved Location Invariants:
//!
//! 1. Saved locations are independent of entries
//! 2. Deleting a saved location never touches an entry's coordinate
//! 3. Name cannot be empty
//! 4. Coordinate is in range
//! 5. Two pins closer than 25 m are not saved twice

pub mod entity;

pub use entity::{find_near_duplicate, location_label, SavedLocation, NEAR_DUPLICATE_RADIUS_METERS};

use crate::domain::{DomainError, DomainResult};

/// Validates SavedLocation invariants
pub fn validate_saved_location(location: &SavedLocation) -> DomainResult<()> {
    if location.name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Saved location name cannot be empty".to_string(),
        ));
    }
    location.coordinate.validate()
}
