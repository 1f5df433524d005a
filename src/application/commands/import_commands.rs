// src/application/commands/import_commands.rs

use std::path::PathBuf;

use crate::application::{dto::*, state::AppState};
use crate::services::DirectoryImportProvider;

/// Import every image under a folder as a new draft
pub fn import_directory(state: &AppState, directory_path: &str) -> Result<ImportSummaryDto, String> {
    let provider = DirectoryImportProvider::new(PathBuf::from(directory_path));
    let mut journal = state.journal().map_err(|e| e.to_string())?;

    let summary = state
        .import_service
        .import(&mut journal, &provider)
        .map_err(|e| e.to_string())?;

    Ok(summary.into())
}
