//! Error types for the mood-journal library.
//!
//! This module provides custom error types using `thiserror` for better error handling
//! and more specific error messages throughout the application.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in the mood-journal application.
#[derive(Error, Debug)]
pub enum JournalError {
    /// Embedded key-value store errors
    #[error("Storage error: {0}")]
    Storage(#[from] sled::Error),

    /// Storage backend failure outside of sled (poisoned locks, bad bytes)
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV export errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// YAML rendering errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration sources could not be read or merged
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Rejected user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The sentiment scorer could not score the text
    #[error("Sentiment scoring failed: {0}")]
    Scoring(String),

    /// No entry matched the given key
    #[error("Journal entry not found: {0}")]
    EntryNotFound(String),

    /// An entry already exists for this calendar day
    #[error("An entry already exists for {0}")]
    DuplicateDay(NaiveDate),

    /// Entries can only be edited on the day they were created
    #[error("Entry from {0} can no longer be edited")]
    NotEditable(NaiveDate),

    /// General error with context
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Result with `JournalError`
pub type Result<T> = std::result::Result<T, JournalError>;

impl From<tokio::task::JoinError> for JournalError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Backend(err.to_string())
    }
}
