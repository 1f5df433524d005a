// src/infrastructure/photo_store.rs
//
// Local Photo Storage
//
// CRITICAL RULES:
// - Files live flat inside one directory owned by the journal
// - Entries refer to files by bare filename, never by path
// - Removal is best-effort for callers; errors are reported, not hidden here

use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Where imported photo bytes are kept
pub trait PhotoStore: Send + Sync {
    /// Write the bytes under a fresh filename and return that filename
    fn store(&self, bytes: &[u8], extension: &str) -> AppResult<String>;

    /// Delete a stored file
    fn remove(&self, filename: &str) -> AppResult<()>;

    /// Absolute path of a stored file
    fn path_for(&self, filename: &str) -> PathBuf;
}

/// Photo directory on the local disk
#[derive(Debug, Clone)]
pub struct LocalPhotoStore {
    root: PathBuf,
}

impl LocalPhotoStore {
    /// Open (and create if needed) the photo directory
    pub fn new(root: PathBuf) -> AppResult<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn checked_path(&self, filename: &str) -> AppResult<PathBuf> {
        let is_bare = !filename.is_empty()
            && Path::new(filename).file_name().map(|n| n == filename).unwrap_or(false);
        if !is_bare {
            return Err(AppError::Validation(format!(
                "Photo filename must be a bare file name: {:?}",
                filename
            )));
        }
        Ok(self.root.join(filename))
    }
}

impl PhotoStore for LocalPhotoStore {
    fn store(&self, bytes: &[u8], extension: &str) -> AppResult<String> {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        let filename = if extension.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            format!("{}.{}", Uuid::new_v4(), extension)
        };

        fs::write(self.root.join(&filename), bytes)?;
        Ok(filename)
    }

    fn remove(&self, filename: &str) -> AppResult<()> {
        let path = self.checked_path(filename)?;
        fs::remove_file(path)?;
        Ok(())
    }

    fn path_for(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }
}
