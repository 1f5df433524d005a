// src/services/statistics_service.rs
//
// Statistics are read-only projections of the finalized entries.
// Drafts count toward the summary totals and nothing else.

use chrono::{Datelike, NaiveDate, TimeZone, Timelike};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::domain::entry::TrailEntry;
use crate::domain::statistics::{
    HourHistogram, JournalSummary, PeriodCount, Sighting, SpeciesCount, TrendGranularity,
};
use crate::services::journal_service::JournalService;

#[derive(Debug, Default, Clone, Copy)]
pub struct StatisticsService;

impl StatisticsService {
    pub fn new() -> Self {
        Self
    }

    pub fn summary(&self, journal: &JournalService) -> JournalSummary {
        let drafts = journal.draft_count() as u32;
        let total_entries = journal.len() as u32;

        let distinct_species = journal
            .finalized()
            .filter_map(species_of)
            .collect::<BTreeSet<_>>()
            .len() as u32;

        JournalSummary {
            total_entries,
            drafts,
            finalized: total_entries - drafts,
            distinct_species,
        }
    }

    /// Most-seen species first, ties broken by name
    pub fn species_ranking(&self, journal: &JournalService, limit: usize) -> Vec<SpeciesCount> {
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for species in journal.finalized().filter_map(species_of) {
            *counts.entry(species).or_insert(0) += 1;
        }

        let mut ranking: Vec<SpeciesCount> = counts
            .into_iter()
            .map(|(species, count)| SpeciesCount {
                species: species.to_string(),
                count,
            })
            .collect();
        ranking.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.species.cmp(&b.species)));
        ranking.truncate(limit);
        ranking
    }

    /// Sightings per period, oldest first; empty periods are omitted
    pub fn trend<Tz: TimeZone>(
        &self,
        journal: &JournalService,
        granularity: TrendGranularity,
        tz: &Tz,
    ) -> Vec<PeriodCount> {
        let mut buckets: BTreeMap<NaiveDate, u32> = BTreeMap::new();
        for entry in journal.finalized() {
            let day = entry.date.with_timezone(tz).date_naive();
            *buckets.entry(period_start(day, granularity)).or_insert(0) += 1;
        }

        buckets
            .into_iter()
            .map(|(period_start, count)| PeriodCount {
                period_start,
                count,
            })
            .collect()
    }

    /// Sightings by local hour of day
    pub fn hour_histogram<Tz: TimeZone>(&self, journal: &JournalService, tz: &Tz) -> HourHistogram {
        let mut buckets = [0u32; 24];
        for entry in journal.finalized() {
            let hour = entry.date.with_timezone(tz).hour() as usize;
            buckets[hour] += 1;
        }
        HourHistogram { buckets }
    }

    /// Finalized entries with a coordinate, as map points
    pub fn sightings(&self, journal: &JournalService) -> Vec<Sighting> {
        journal
            .finalized()
            .filter_map(|entry| {
                Some(Sighting {
                    entry_id: entry.id(),
                    species: species_of(entry)?.to_string(),
                    coordinate: entry.coordinate?,
                    date: entry.date,
                })
            })
            .collect()
    }
}

fn species_of(entry: &TrailEntry) -> Option<&str> {
    entry
        .species
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn period_start(day: NaiveDate, granularity: TrendGranularity) -> NaiveDate {
    match granularity {
        TrendGranularity::Day => day,
        TrendGranularity::Week => {
            day - chrono::Duration::days(day.weekday().num_days_from_monday() as i64)
        }
        TrendGranularity::Month => day.with_day(1).unwrap_or(day),
    }
}
