use serde::{Deserialize, Serialize};

use super::entity::TrailEntry;

/// Partition of the draft list shown in the review screen
///
/// Pure predicates, evaluated fresh on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftFilter {
    #[default]
    All,
    MissingSpecies,
    MissingLocation,
    HasGps,
    NoGps,
}

impl DraftFilter {
    pub const ALL: [DraftFilter; 5] = [
        DraftFilter::All,
        DraftFilter::MissingSpecies,
        DraftFilter::MissingLocation,
        DraftFilter::HasGps,
        DraftFilter::NoGps,
    ];

    /// Whether a draft passes this filter (finalized entries never do)
    pub fn matches(&self, entry: &TrailEntry) -> bool {
        if !entry.is_draft {
            return false;
        }
        match self {
            DraftFilter::All => true,
            DraftFilter::MissingSpecies => !entry.has_species(),
            DraftFilter::MissingLocation => !entry.has_location_answer(),
            DraftFilter::HasGps => entry.has_coordinate(),
            DraftFilter::NoGps => !entry.has_coordinate(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DraftFilter::All => "All",
            DraftFilter::MissingSpecies => "Missing species",
            DraftFilter::MissingLocation => "Missing location",
            DraftFilter::HasGps => "Has GPS",
            DraftFilter::NoGps => "No GPS",
        }
    }
}

impl std::fmt::Display for DraftFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::Coordinate;
    use chrono::Utc;

    #[test]
    fn test_filters_partition_drafts() {
        let bare = TrailEntry::new_draft(Utc::now());

        let mut unknown = TrailEntry::new_draft(Utc::now());
        unknown.species = Some("Rev".to_string());
        unknown.mark_location_unknown();

        let mut gps = TrailEntry::new_draft(Utc::now());
        gps.set_coordinate(Coordinate::new(61.0, 9.5).unwrap());

        assert!(DraftFilter::MissingSpecies.matches(&bare));
        assert!(DraftFilter::MissingLocation.matches(&bare));
        assert!(DraftFilter::NoGps.matches(&bare));
        assert!(!DraftFilter::HasGps.matches(&bare));

        assert!(!DraftFilter::MissingSpecies.matches(&unknown));
        assert!(!DraftFilter::MissingLocation.matches(&unknown));
        assert!(DraftFilter::NoGps.matches(&unknown));

        assert!(DraftFilter::HasGps.matches(&gps));
        assert!(!DraftFilter::MissingLocation.matches(&gps));
    }

    #[test]
    fn test_finalized_entries_never_match() {
        let mut e = TrailEntry::new_draft(Utc::now());
        e.species = Some("Elg".to_string());
        e.mark_location_unknown();
        assert!(e.finalize());

        for filter in DraftFilter::ALL {
            assert!(!filter.matches(&e), "{} matched a finalized entry", filter);
        }
    }
}
