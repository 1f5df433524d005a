// src/repositories/saved_location_repository.rs

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::entry::Coordinate;
use crate::domain::saved_location::SavedLocation;
use crate::error::{AppError, AppResult};

pub trait SavedLocationRepository: Send + Sync {
    fn save(&self, location: &SavedLocation) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<SavedLocation>>;
    fn list_all(&self) -> AppResult<Vec<SavedLocation>>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct SqliteSavedLocationRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteSavedLocationRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_location(row: &Row) -> Result<SavedLocation, rusqlite::Error> {
        let id = Uuid::parse_str(&row.get::<_, String>("id")?)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let created_at = DateTime::parse_from_rfc3339(&row.get::<_, String>("created_at")?)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?
            .with_timezone(&Utc);

        Ok(SavedLocation {
            id,
            name: row.get("name")?,
            coordinate: Coordinate {
                latitude: row.get("latitude")?,
                longitude: row.get("longitude")?,
            },
            created_at,
        })
    }
}

impl SavedLocationRepository for SqliteSavedLocationRepository {
    fn save(&self, location: &SavedLocation) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR REPLACE INTO saved_locations (id, name, latitude, longitude, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                location.id.to_string(),
                location.name,
                location.coordinate.latitude,
                location.coordinate.longitude,
                location.created_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<SavedLocation>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT * FROM saved_locations WHERE id = ?1")?;

        match stmt.query_row(params![id.to_string()], Self::row_to_location) {
            Ok(location) => Ok(Some(location)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<SavedLocation>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT * FROM saved_locations ORDER BY name COLLATE NOCASE")?;

        let locations: Vec<SavedLocation> = stmt
            .query_map([], Self::row_to_location)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(locations)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "DELETE FROM saved_locations WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, initialize_database};

    fn repository() -> SqliteSavedLocationRepository {
        let pool = create_memory_pool().unwrap();
        initialize_database(&pool.get().unwrap()).unwrap();
        SqliteSavedLocationRepository::new(Arc::new(pool))
    }

    #[test]
    fn test_save_and_get() {
        let repo = repository();
        let location = SavedLocation::new(
            "Saltlick".to_string(),
            Coordinate::new(60.5, 10.25).unwrap(),
        );

        repo.save(&location).unwrap();

        let loaded = repo.get_by_id(location.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Saltlick");
        assert_eq!(loaded.coordinate, location.coordinate);
        assert_eq!(loaded.created_at, location.created_at);
    }

    #[test]
    fn test_list_sorted_by_name_and_delete() {
        let repo = repository();
        let b = SavedLocation::new("bog".to_string(), Coordinate::new(1.0, 1.0).unwrap());
        let a = SavedLocation::new("Alder grove".to_string(), Coordinate::new(2.0, 2.0).unwrap());
        repo.save(&b).unwrap();
        repo.save(&a).unwrap();

        let names: Vec<String> = repo.list_all().unwrap().into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["Alder grove", "bog"]);

        repo.delete(a.id).unwrap();
        assert!(repo.get_by_id(a.id).unwrap().is_none());
        assert_eq!(repo.list_all().unwrap().len(), 1);
    }
}
