//! Mood Journal - Sentiment-scored daily journaling
//!
//! A Rust library for keeping a daily journal whose entries are scored for
//! sentiment, classified into moods, stored locally and summarised by week
//! and month.
//!
//! # Features
//!
//! - Lexicon-based sentiment scoring and mood classification
//! - Local key-value persistence of the entry collection
//! - Weekly and monthly mood statistics, week-over-week change
//! - Weekly bar chart and month calendar data
//! - Export to TXT, CSV and JSON

/// Mood aggregation over date windows
pub mod aggregate;
/// Mood classification
pub mod classifier;
/// Configuration management
pub mod config;
/// Error types
pub mod error;
/// Entry export
pub mod export;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Persisted display preferences
pub mod preferences;
/// First-run example entries
pub mod seed;
/// Sentiment scoring
pub mod sentiment;
/// Journal write and read flows
pub mod service;
/// Key-value blob storage
pub mod storage;
/// Journal entry store
pub mod store;
/// Calendar helpers
pub mod utils;
/// Input validation and sanitization
pub mod validation;

// Re-export key components for easier access
pub use classifier::MoodClassifier;
pub use error::{JournalError, Result};
pub use models::{EntryKey, JournalEntry, Mood};
pub use sentiment::{LexiconScorer, SentimentScorer};
pub use service::JournalService;
pub use store::JournalStore;
