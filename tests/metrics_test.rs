//! Comprehensive unit tests for metrics.rs module

use std::time::Duration;

use mood_journal::logging::OperationTimer;
use mood_journal::metrics::MetricsCollector;
use mood_journal::models::Mood;

#[test]
fn test_metric_names_are_prefixed() {
    let collector = MetricsCollector::default();
    assert_eq!(collector.entries_created_total, "mood_journal_entries_created_total");
    assert_eq!(collector.errors_total, "mood_journal_errors_total");
}

#[test]
fn test_metrics_initialization() {
    assert!(MetricsCollector::init().is_ok());
    // A second recorder cannot be installed.
    assert!(MetricsCollector::init().is_err());
}

#[test]
fn test_record_entry_lifecycle() {
    let collector = MetricsCollector::default();
    for mood in Mood::ALL {
        collector.record_entry_created(mood);
        collector.record_entry_updated(mood);
    }
    collector.record_entries_deleted(3);
    collector.record_collection_size(12);
}

#[test]
fn test_record_classification() {
    let collector = MetricsCollector::default();
    collector.record_classification(Mood::Positive, 0.62, 48);
    collector.record_classification(Mood::Negative, -0.9, 0);
}

#[test]
fn test_record_storage_writes() {
    let collector = MetricsCollector::default();
    collector.record_storage_write(Duration::from_millis(3), true);
    collector.record_storage_write(Duration::from_millis(40), false);
    collector.record_error("scoring", "classify");
}

#[test]
fn test_operation_timer() {
    let timer = OperationTimer::new("test_operation");
    std::thread::sleep(Duration::from_millis(5));
    assert!(timer.finish() >= Duration::from_millis(5));
}

#[test]
fn test_collector_clone() {
    let collector = MetricsCollector::default();
    let cloned = collector.clone();
    assert_eq!(collector.storage_writes_total, cloned.storage_writes_total);
}
