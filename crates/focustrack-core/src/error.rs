//! Core error types for focustrack-core.
//!
//! This module defines the error hierarchy using thiserror. The three
//! caller-facing kinds are `NotFound`, `Conflict` and `Validation`; the
//! remaining variants wrap infrastructure failures.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focustrack-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A referenced task or focus interval is absent.
    #[error("{0}")]
    NotFound(String),

    /// State that must be unique already exists (duplicate title,
    /// interval already active).
    #[error("{0}")]
    Conflict(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// IO errors while reading or writing the config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Title outside the accepted length range
    #[error("Invalid value for 'title': length must be between {min} and {max} characters, got {len}")]
    TitleLength { min: usize, max: usize, len: usize },

    /// Description longer than accepted
    #[error("Invalid value for 'description': length must be at most {max} characters, got {len}")]
    DescriptionLength { max: usize, len: usize },

    /// Focus interval duration must be at least one minute
    #[error("Invalid value for 'duration': must be a positive number of minutes")]
    NonPositiveDuration,

    /// Unrecognized task status name
    #[error("Invalid value for 'status': expected PENDING, IN_PROGRESS or DONE, got '{0}'")]
    UnknownStatus(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(DatabaseError::from(err))
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
