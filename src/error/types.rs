// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Crate-wide error
///
/// A lookup that finds nothing is usually not an error in the journal;
/// `NotFound` is reserved for operations that cannot proceed without the
/// record (renaming a saved location, for one).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("Journal lock poisoned by a panicked writer")]
    LockPoisoned,

    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Stable category name for a presentation layer
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Database(_) | AppError::Pool(_) => "database",
            AppError::Domain(_) | AppError::Validation(_) => "validation",
            AppError::Serialization(_) => "serialization",
            AppError::Io(_) => "file_system",
            AppError::NotFound => "not_found",
            AppError::LockPoisoned | AppError::Other(_) => "internal",
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for AppError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        AppError::LockPoisoned
    }
}

pub type AppResult<T> = Result<T, AppError>;
