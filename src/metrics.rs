use metrics::{counter, gauge, histogram};
use std::time::Duration;

use crate::error::{JournalError, Result};
use crate::models::Mood;

/// Metrics collection and management
#[derive(Debug, Clone)]
pub struct MetricsCollector {
    /// Entries written
    pub entries_created_total: &'static str,
    /// Entries rescored after an edit
    pub entries_updated_total: &'static str,
    /// Entries removed
    pub entries_deleted_total: &'static str,
    /// Size of the stored collection
    pub entries_stored: &'static str,

    /// Classifications by mood
    pub classifications_total: &'static str,
    /// Compound score distribution
    pub sentiment_compound: &'static str,
    /// Entry text length distribution
    pub text_length_chars: &'static str,

    /// Collection writes
    pub storage_writes_total: &'static str,
    /// Collection write latency
    pub storage_write_duration: &'static str,

    /// Errors by kind
    pub errors_total: &'static str,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self {
            entries_created_total: "mood_journal_entries_created_total",
            entries_updated_total: "mood_journal_entries_updated_total",
            entries_deleted_total: "mood_journal_entries_deleted_total",
            entries_stored: "mood_journal_entries_stored",

            classifications_total: "mood_journal_classifications_total",
            sentiment_compound: "mood_journal_sentiment_compound",
            text_length_chars: "mood_journal_text_length_chars",

            storage_writes_total: "mood_journal_storage_writes_total",
            storage_write_duration: "mood_journal_storage_write_duration_seconds",

            errors_total: "mood_journal_errors_total",
        }
    }
}

impl MetricsCollector {
    /// Install a no-op global recorder
    ///
    /// Fails if a recorder is already installed.
    pub fn init() -> Result<()> {
        metrics::set_global_recorder(metrics::NoopRecorder)
            .map_err(|_| JournalError::Other("Failed to initialize metrics recorder: already installed".to_string()))
    }

    /// Record a newly created entry
    pub fn record_entry_created(&self, mood: Mood) {
        counter!(self.entries_created_total, "mood" => mood.as_str()).increment(1);
    }

    /// Record a rescored entry
    pub fn record_entry_updated(&self, mood: Mood) {
        counter!(self.entries_updated_total, "mood" => mood.as_str()).increment(1);
    }

    /// Record deleted entries
    pub fn record_entries_deleted(&self, count: usize) {
        counter!(self.entries_deleted_total).increment(count as u64);
    }

    /// Record the size of the persisted collection
    #[allow(clippy::cast_precision_loss)]
    pub fn record_collection_size(&self, size: usize) {
        gauge!(self.entries_stored).set(size as f64);
    }

    /// Record a classification result
    #[allow(clippy::cast_precision_loss)]
    pub fn record_classification(&self, mood: Mood, compound: f64, text_length: usize) {
        counter!(self.classifications_total, "mood" => mood.as_str()).increment(1);
        histogram!(self.sentiment_compound).record(compound);
        histogram!(self.text_length_chars).record(text_length as f64);
    }

    /// Record a write of the entry collection
    pub fn record_storage_write(&self, duration: Duration, success: bool) {
        let status = if success { "success" } else { "error" };
        counter!(self.storage_writes_total, "status" => status).increment(1);
        histogram!(self.storage_write_duration, "status" => status).record(duration.as_secs_f64());

        if !success {
            self.record_error("storage", "write");
        }
    }

    /// Record error metrics
    pub fn record_error(&self, error_type: &'static str, operation: &'static str) {
        counter!(self.errors_total, "type" => error_type, "operation" => operation).increment(1);
    }
}
