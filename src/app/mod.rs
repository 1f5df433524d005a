// src/app/mod.rs
//
// Application bootstrap: configuration and wiring

pub mod config;
pub mod journal_init;

pub use config::{JournalConfig, DATA_DIR_ENV};
pub use journal_init::{init_app_state, register_journal_handlers};
