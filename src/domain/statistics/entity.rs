use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entry::Coordinate;

/// Headline numbers for the journal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalSummary {
    pub total_entries: u32,
    pub drafts: u32,
    pub finalized: u32,
    pub distinct_species: u32,
}

/// One row of the species ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesCount {
    pub species: String,
    pub count: u32,
}

/// Bucket size for sighting trends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendGranularity {
    Day,
    /// Weeks start on Monday
    Week,
    Month,
}

/// Sightings counted in one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodCount {
    /// First day of the period, in the requested time zone
    pub period_start: NaiveDate,
    pub count: u32,
}

/// Sightings per hour of day, index 0 is midnight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourHistogram {
    pub buckets: [u32; 24],
}

impl HourHistogram {
    pub fn total(&self) -> u32 {
        self.buckets.iter().sum()
    }

    /// Busiest hour; the earliest wins a tie, none when empty
    pub fn peak_hour(&self) -> Option<u32> {
        let max = *self.buckets.iter().max()?;
        if max == 0 {
            return None;
        }
        self.buckets.iter().position(|&c| c == max).map(|h| h as u32)
    }
}

/// A finalized, located entry as a map point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sighting {
    pub entry_id: Uuid,
    pub species: String,
    pub coordinate: Coordinate,
    pub date: DateTime<Utc>,
}
