use super::entity::TrailEntry;
use crate::domain::{DomainError, DomainResult};

/// Validates all TrailEntry invariants
///
/// Run at workflow boundaries (imports, detail edits). The collection
/// manager itself trusts its callers.
pub fn validate_entry(entry: &TrailEntry) -> DomainResult<()> {
    validate_location(entry)?;
    validate_tags(&entry.tags)?;
    validate_species(entry.species.as_deref())?;
    Ok(())
}

/// Coordinate in range, and never together with the unknown flag
fn validate_location(entry: &TrailEntry) -> DomainResult<()> {
    if let Some(coordinate) = &entry.coordinate {
        coordinate.validate()?;
        if entry.location_unknown {
            return Err(DomainError::InvariantViolation(
                "Location cannot be both unknown and set".to_string(),
            ));
        }
    }
    Ok(())
}

/// Tags are stored sorted, unique and non-blank
fn validate_tags(tags: &[String]) -> DomainResult<()> {
    if tags.iter().any(|t| t.trim().is_empty()) {
        return Err(DomainError::InvariantViolation(
            "Tags cannot be blank".to_string(),
        ));
    }
    if tags.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(DomainError::InvariantViolation(
            "Tags must be sorted and unique".to_string(),
        ));
    }
    Ok(())
}

/// A present species must name something
fn validate_species(species: Option<&str>) -> DomainResult<()> {
    if let Some(s) = species {
        if s.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "Species cannot be blank; leave it unset instead".to_string(),
            ));
        }
    }
    Ok(())
}

/// Invariants that must hold true for TrailEntry:
///
/// 1. Identity (UUID) is immutable and alone decides equality
/// 2. Latitude and longitude are both present or both absent
/// 3. Unknown location and a coordinate never coexist
/// 4. Notes are never null
/// 5. Tags behave as a set
/// 6. can_finalize is derived, never stored

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::Coordinate;
    use chrono::Utc;

    #[test]
    fn test_fresh_draft_is_valid() {
        let entry = TrailEntry::new_draft(Utc::now());
        assert!(validate_entry(&entry).is_ok());
    }

    #[test]
    fn test_unknown_with_coordinate_fails() {
        let mut entry = TrailEntry::new_draft(Utc::now());
        entry.coordinate = Some(Coordinate::new(1.0, 2.0).unwrap());
        entry.location_unknown = true;

        let result = validate_entry(&entry);
        if let Err(DomainError::InvariantViolation(msg)) = result {
            assert!(msg.contains("both unknown and set"));
        } else {
            panic!("Expected InvariantViolation error");
        }
    }

    #[test]
    fn test_unsorted_tags_fail() {
        let mut entry = TrailEntry::new_draft(Utc::now());
        entry.tags = vec!["snow".to_string(), "night".to_string()];
        assert!(validate_entry(&entry).is_err());

        entry.replace_tags(&["snow".to_string(), "night".to_string()]);
        assert!(validate_entry(&entry).is_ok());
    }

    #[test]
    fn test_blank_species_fails() {
        let mut entry = TrailEntry::new_draft(Utc::now());
        entry.species = Some("  ".to_string());
        assert!(validate_entry(&entry).is_err());
    }

    #[test]
    fn test_out_of_range_coordinate_fails() {
        let mut entry = TrailEntry::new_draft(Utc::now());
        entry.coordinate = Some(Coordinate {
            latitude: 123.0,
            longitude: 0.0,
        });
        assert!(validate_entry(&entry).is_err());
    }
}
