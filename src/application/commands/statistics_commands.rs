// src/application/commands/statistics_commands.rs
//
// Time-of-day and calendar buckets use the machine's local time zone.

use chrono::Local;

use crate::application::{dto::*, state::AppState};
use crate::db::get_database_stats;
use crate::domain::statistics::{PeriodCount, TrendGranularity};

pub fn get_statistics(state: &AppState, top_species: usize) -> Result<StatisticsDto, String> {
    let journal = state.journal().map_err(|e| e.to_string())?;
    let stats = &state.statistics_service;

    let hours = stats.hour_histogram(&journal, &Local);
    Ok(StatisticsDto {
        summary: stats.summary(&journal),
        top_species: stats.species_ranking(&journal, top_species),
        peak_hour: hours.peak_hour(),
        hours,
    })
}

pub fn get_trend(
    state: &AppState,
    granularity: TrendGranularity,
) -> Result<Vec<PeriodCount>, String> {
    let journal = state.journal().map_err(|e| e.to_string())?;
    Ok(state.statistics_service.trend(&journal, granularity, &Local))
}

/// Size and row counts of the journal database, over the shared pool
pub fn get_storage_stats(state: &AppState) -> Result<StorageStatsDto, String> {
    let conn = state.connection().map_err(|e| e.to_string())?;
    get_database_stats(&conn)
        .map(StorageStatsDto::from)
        .map_err(|e| e.to_string())
}

/// Map points for every finalized, located entry
pub fn get_sightings(state: &AppState) -> Result<Vec<SightingDto>, String> {
    let journal = state.journal().map_err(|e| e.to_string())?;
    Ok(state
        .statistics_service
        .sightings(&journal)
        .into_iter()
        .map(SightingDto::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::entry_commands::{create_draft, update_entry};
    use crate::application::commands::test_support::state;

    #[test]
    fn test_statistics_follow_finalized_entries() {
        let (state, _dir) = state();
        let id = create_draft(&state).unwrap();
        create_draft(&state).unwrap();

        update_entry(
            &state,
            UpdateEntryDto {
                entry_id: id.clone(),
                species: Some("Gaupe".to_string()),
                latitude: Some(60.0),
                longitude: Some(11.0),
                is_draft: Some(false),
                ..Default::default()
            },
        )
        .unwrap();

        let stats = get_statistics(&state, 5).unwrap();
        assert_eq!(stats.summary.total_entries, 2);
        assert_eq!(stats.summary.finalized, 1);
        assert_eq!(stats.top_species.len(), 1);
        assert_eq!(stats.hours.total(), 1);
        assert!(stats.peak_hour.is_some());

        assert_eq!(get_trend(&state, TrendGranularity::Month).unwrap().len(), 1);

        let sightings = get_sightings(&state).unwrap();
        assert_eq!(sightings.len(), 1);
        assert_eq!(sightings[0].entry_id, id);
    }

    #[test]
    fn test_storage_stats_read_through_the_shared_pool() {
        let (state, _dir) = state();
        create_draft(&state).unwrap();
        create_draft(&state).unwrap();

        let stats = get_storage_stats(&state).unwrap();
        assert_eq!(stats.entry_count, 2);
        assert_eq!(stats.draft_count, 2);
        assert_eq!(stats.saved_location_count, 0);
        assert!(stats.size_bytes > 0);
    }
}
