// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between a presentation layer and Services
// - Commands accept DTOs or plain values, return DTOs
// - Commands convert every error to its display string
// - Commands NEVER contain business logic

pub mod entry_commands;
pub mod import_commands;
pub mod location_commands;
pub mod review_commands;
pub mod statistics_commands;

pub use entry_commands::*;
pub use import_commands::*;
pub use location_commands::*;
pub use review_commands::*;
pub use statistics_commands::*;

use uuid::Uuid;

pub(crate) fn parse_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw).map_err(|e| format!("Invalid UUID: {}", e))
}
