// src/application/mod.rs
//
// What a front end talks to. Commands lock the shared state, call the
// services and hand back DTOs with errors flattened to strings.

pub mod commands;
pub mod dto;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use state::AppState;
