use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

use super::tags::normalize_tags;
use crate::domain::{DomainError, DomainResult};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A single trail-camera observation
///
/// Identity is the id alone: two entries are equal iff their ids are equal,
/// whatever their other fields hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailEntry {
    /// Internal immutable identifier
    id: Uuid,

    /// Capture timestamp (import time when the photo carried none)
    pub date: DateTime<Utc>,

    /// Species display name, missing until assigned
    pub species: Option<String>,

    /// Camera display name
    pub camera: Option<String>,

    /// Free text, never null
    pub notes: String,

    /// Sorted, deduplicated tag set
    pub tags: Vec<String>,

    /// Where the photo lives, if anywhere
    photo: Option<PhotoReference>,

    /// Latitude/longitude pair, both or neither
    pub coordinate: Option<Coordinate>,

    /// The user explicitly declined to supply a location
    pub location_unknown: bool,

    /// Lifecycle flag: true until finalized
    pub is_draft: bool,

    /// Import provenance (write-once)
    original_filename: Option<String>,

    /// Import provenance (write-once)
    external_asset_id: Option<String>,
}

/// Reference to the photo behind an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhotoReference {
    /// File kept in the journal's own photo directory
    Local { filename: String },

    /// Asset owned by an external photo library
    Library { asset_id: String },
}

/// A WGS84 coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting values outside the WGS84 ranges
    pub fn new(latitude: f64, longitude: f64) -> DomainResult<Self> {
        let coordinate = Self { latitude, longitude };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Pair two optional halves; anything but both-present yields None
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self::new(lat, lon).ok(),
            _ => None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(DomainError::InvariantViolation(format!(
                "Latitude {} is outside [-90, 90]",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(DomainError::InvariantViolation(format!(
                "Longitude {} is outside [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }

    /// Both halves rounded to 4 decimal places (~11 m)
    pub fn rounded_key(&self) -> (i64, i64) {
        (
            (self.latitude * 10_000.0).round() as i64,
            (self.longitude * 10_000.0).round() as i64,
        )
    }

    /// Haversine great-circle distance in meters
    pub fn distance_meters(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_METERS * c
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl TrailEntry {
    /// Create a new draft with empty annotations
    pub fn new_draft(date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            species: None,
            camera: None,
            notes: String::new(),
            tags: Vec::new(),
            photo: None,
            coordinate: None,
            location_unknown: false,
            is_draft: true,
            original_filename: None,
            external_asset_id: None,
        }
    }

    /// Rebuild a stored entry around its immutable parts
    ///
    /// Annotation fields start empty; the caller fills the public ones.
    pub fn restore(
        id: Uuid,
        date: DateTime<Utc>,
        photo: Option<PhotoReference>,
        original_filename: Option<String>,
        external_asset_id: Option<String>,
    ) -> Self {
        Self {
            id,
            ..Self::new_draft(date)
        }
        .with_provenance(photo, original_filename, external_asset_id)
    }

    /// Attach import provenance to a freshly created draft
    pub fn with_provenance(
        mut self,
        photo: Option<PhotoReference>,
        original_filename: Option<String>,
        external_asset_id: Option<String>,
    ) -> Self {
        self.photo = photo;
        self.original_filename = original_filename;
        self.external_asset_id = external_asset_id;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn photo(&self) -> Option<&PhotoReference> {
        self.photo.as_ref()
    }

    /// Filename of the locally stored photo, if the entry owns one
    pub fn local_photo_filename(&self) -> Option<&str> {
        match &self.photo {
            Some(PhotoReference::Local { filename }) => Some(filename),
            _ => None,
        }
    }

    pub fn original_filename(&self) -> Option<&str> {
        self.original_filename.as_deref()
    }

    pub fn external_asset_id(&self) -> Option<&str> {
        self.external_asset_id.as_deref()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinate.map(|c| c.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinate.map(|c| c.longitude)
    }

    pub fn has_species(&self) -> bool {
        self.species
            .as_deref()
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn has_coordinate(&self) -> bool {
        self.coordinate.is_some()
    }

    /// True when the location requirement is met, either way
    pub fn has_location_answer(&self) -> bool {
        self.location_unknown || self.coordinate.is_some()
    }

    /// Whether the entry may leave draft state
    ///
    /// Always derived from the current fields; never stored.
    pub fn can_finalize(&self) -> bool {
        self.has_species() && self.has_location_answer()
    }

    pub fn set_species(&mut self, species: Option<String>) {
        self.species = species;
    }

    /// Trimmed camera name, or none when nothing is left
    pub fn set_camera(&mut self, camera: &str) {
        let trimmed = camera.trim();
        self.camera = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    pub fn mark_location_unknown(&mut self) {
        self.location_unknown = true;
        self.coordinate = None;
    }

    pub fn set_coordinate(&mut self, coordinate: Coordinate) {
        self.location_unknown = false;
        self.coordinate = Some(coordinate);
    }

    /// No coordinate, but not declared unknown either
    pub fn clear_location(&mut self) {
        self.location_unknown = false;
        self.coordinate = None;
    }

    pub fn add_tags(&mut self, tags: &[String]) {
        let merged = self.tags.iter().chain(tags.iter()).cloned();
        self.tags = normalize_tags(merged);
    }

    pub fn replace_tags(&mut self, tags: &[String]) {
        self.tags = normalize_tags(tags.iter().cloned());
    }

    /// Draft -> final when eligible
    ///
    /// Returns whether the eligibility rule held. An already-final entry that
    /// is still eligible stays final and reports true.
    pub fn finalize(&mut self) -> bool {
        if self.can_finalize() {
            self.is_draft = false;
            true
        } else {
            false
        }
    }

    /// Manual re-draft; no system rule calls this
    pub fn mark_as_draft(&mut self) {
        self.is_draft = true;
    }
}

impl PartialEq for TrailEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TrailEntry {}

impl Hash for TrailEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for TrailEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.species.as_deref() {
            Some(species) if !species.trim().is_empty() => {
                write!(f, "{} ({})", species, self.date.format("%Y-%m-%d %H:%M"))
            }
            _ => write!(f, "Unidentified ({})", self.date.format("%Y-%m-%d %H:%M")),
        }
    }
}
