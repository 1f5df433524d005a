// src/repositories/entry_repository.rs

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::entry::{Coordinate, PhotoReference, TrailEntry};
use crate::error::AppResult;

/// Durable home of the whole entry collection
///
/// The journal loads everything once and writes everything back after each
/// mutation, so the contract is whole-list in, whole-list out.
pub trait EntryRepository: Send + Sync {
    fn load_all(&self) -> AppResult<Vec<TrailEntry>>;
    fn save_all(&self, entries: &[TrailEntry]) -> AppResult<()>;
}

pub struct SqliteEntryRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteEntryRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_entry(row: &Row) -> Result<TrailEntry, rusqlite::Error> {
        let id = Uuid::parse_str(&row.get::<_, String>("id")?)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let date = DateTime::parse_from_rfc3339(&row.get::<_, String>("date")?)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?
            .with_timezone(&Utc);

        let photo_kind: Option<String> = row.get("photo_kind")?;
        let photo_value: Option<String> = row.get("photo_value")?;
        let photo = match (photo_kind.as_deref(), photo_value) {
            (Some("local"), Some(filename)) => Some(PhotoReference::Local { filename }),
            (Some("library"), Some(asset_id)) => Some(PhotoReference::Library { asset_id }),
            _ => None,
        };

        let tags: Vec<String> = serde_json::from_str(&row.get::<_, String>("tags_json")?)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let latitude: Option<f64> = row.get("latitude")?;
        let longitude: Option<f64> = row.get("longitude")?;

        let mut entry = TrailEntry::restore(
            id,
            date,
            photo,
            row.get("original_filename")?,
            row.get("external_asset_id")?,
        );
        entry.species = row.get("species")?;
        entry.camera = row.get("camera")?;
        entry.notes = row.get("notes")?;
        entry.tags = tags;
        entry.coordinate = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate {
                latitude,
                longitude,
            }),
            _ => None,
        };
        entry.location_unknown = row.get("location_unknown")?;
        entry.is_draft = row.get("is_draft")?;

        Ok(entry)
    }
}

impl EntryRepository for SqliteEntryRepository {
    fn load_all(&self) -> AppResult<Vec<TrailEntry>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT * FROM entries ORDER BY position")?;

        let entries: Vec<TrailEntry> = stmt
            .query_map([], Self::row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    fn save_all(&self, entries: &[TrailEntry]) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM entries", [])?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO entries (
                    position, id, date, species, camera, notes, tags_json,
                    photo_kind, photo_value, latitude, longitude,
                    location_unknown, is_draft, original_filename, external_asset_id
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            )?;

            for (position, entry) in entries.iter().enumerate() {
                let (photo_kind, photo_value) = match entry.photo() {
                    Some(PhotoReference::Local { filename }) => (Some("local"), Some(filename.as_str())),
                    Some(PhotoReference::Library { asset_id }) => {
                        (Some("library"), Some(asset_id.as_str()))
                    }
                    None => (None, None),
                };

                stmt.execute(params![
                    position as i64,
                    entry.id().to_string(),
                    entry.date.to_rfc3339(),
                    entry.species,
                    entry.camera,
                    entry.notes,
                    serde_json::to_string(&entry.tags)?,
                    photo_kind,
                    photo_value,
                    entry.latitude(),
                    entry.longitude(),
                    entry.location_unknown,
                    entry.is_draft,
                    entry.original_filename(),
                    entry.external_asset_id(),
                ])?;
            }
        }

        tx.commit()?;
        log::debug!("Saved {} journal entries", entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, initialize_database};
    use chrono::TimeZone;

    fn repository() -> SqliteEntryRepository {
        let pool = create_memory_pool().unwrap();
        initialize_database(&pool.get().unwrap()).unwrap();
        SqliteEntryRepository::new(Arc::new(pool))
    }

    fn same_fields(a: &TrailEntry, b: &TrailEntry) -> bool {
        serde_json::to_value(a).unwrap() == serde_json::to_value(b).unwrap()
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let repo = repository();

        let draft = TrailEntry::restore(
            Uuid::new_v4(),
            Utc.with_ymd_and_hms(2024, 10, 3, 21, 14, 5).unwrap(),
            Some(PhotoReference::Local {
                filename: "a1b2.jpg".to_string(),
            }),
            Some("IMG_0042.JPG".to_string()),
            None,
        );

        let mut finalized = TrailEntry::restore(
            Uuid::new_v4(),
            Utc.with_ymd_and_hms(2024, 9, 28, 5, 2, 0).unwrap(),
            Some(PhotoReference::Library {
                asset_id: "ph://ABC-123".to_string(),
            }),
            None,
            Some("ph://ABC-123".to_string()),
        );
        finalized.species = Some("Elg".to_string());
        finalized.camera = Some("Browning".to_string());
        finalized.notes = "Bull with calf".to_string();
        finalized.replace_tags(&["night".to_string(), "snow".to_string()]);
        finalized.set_coordinate(Coordinate::new(61.123456, 9.654321).unwrap());
        assert!(finalized.finalize());

        let mut unknown = TrailEntry::new_draft(Utc::now());
        unknown.mark_location_unknown();

        let original = vec![draft, finalized, unknown];
        repo.save_all(&original).unwrap();
        let loaded = repo.load_all().unwrap();

        assert_eq!(loaded.len(), original.len());
        for (a, b) in original.iter().zip(loaded.iter()) {
            assert!(same_fields(a, b), "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_save_all_replaces_previous_contents() {
        let repo = repository();

        let first = vec![
            TrailEntry::new_draft(Utc::now()),
            TrailEntry::new_draft(Utc::now()),
        ];
        repo.save_all(&first).unwrap();

        let second = vec![TrailEntry::new_draft(Utc::now())];
        repo.save_all(&second).unwrap();

        let loaded = repo.load_all().unwrap();
        assert_eq!(loaded, second);
    }

    #[test]
    fn test_duplicate_ids_round_trip() {
        let repo = repository();
        let id = Uuid::new_v4();
        let now = Utc::now();

        let entries = vec![
            TrailEntry::restore(id, now, None, None, None),
            TrailEntry::restore(id, now, None, None, None),
        ];
        repo.save_all(&entries).unwrap();

        assert_eq!(repo.load_all().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_database_loads_empty() {
        let repo = repository();
        assert!(repo.load_all().unwrap().is_empty());
    }
}
