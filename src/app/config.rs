// src/app/config.rs
//
// Where the journal keeps its files.
//
// Resolution order for the data directory:
// 1. TRAILJOURNAL_DATA_DIR, when set and non-empty
// 2. <platform data dir>/trailjournal
// 3. ./trailjournal-data

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "TRAILJOURNAL_DATA_DIR";

const APP_DIR_NAME: &str = "trailjournal";
const DATABASE_FILE_NAME: &str = "journal.db";
const PHOTOS_DIR_NAME: &str = "photos";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalConfig {
    pub data_dir: PathBuf,
    /// SQLite file holding entries and saved locations
    pub database_file: PathBuf,
    /// Directory the local photo store writes into
    pub photos_dir: PathBuf,
}

impl JournalConfig {
    /// Standard layout under one data directory
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            database_file: data_dir.join(DATABASE_FILE_NAME),
            photos_dir: data_dir.join(PHOTOS_DIR_NAME),
            data_dir,
        }
    }

    /// Layout under the data directory resolved from the environment
    pub fn from_env() -> Self {
        Self::with_data_dir(resolve_data_dir(std::env::var_os(DATA_DIR_ENV)))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn resolve_data_dir(env_override: Option<OsString>) -> PathBuf {
    if let Some(dir) = env_override.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }

    dirs::data_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("trailjournal-data"))
}
