//! Comprehensive unit tests for validation.rs module

use std::path::Path;

use mood_journal::error::JournalError;
use mood_journal::validation::{InputValidator, MAX_WEEK_OFFSET};

#[test]
fn test_sanitize_text_trims() {
    assert_eq!(InputValidator::sanitize_text("  hello  "), "hello");
}

#[test]
fn test_sanitize_text_strips_control_characters() {
    assert_eq!(InputValidator::sanitize_text("good\0 day\u{7}"), "good day");
}

#[test]
fn test_sanitize_text_keeps_line_breaks() {
    assert_eq!(InputValidator::sanitize_text("first\nsecond\tthird"), "first\nsecond\tthird");
}

#[test]
fn test_sanitize_blank_text_is_empty() {
    assert!(InputValidator::sanitize_text(" \n\t ").is_empty());
}

#[test]
fn test_validate_entry_text_limit() {
    assert!(InputValidator::validate_entry_text("short", 10).is_ok());
    assert!(InputValidator::validate_entry_text(&"a".repeat(10), 10).is_ok());
    assert!(matches!(
        InputValidator::validate_entry_text(&"a".repeat(11), 10),
        Err(JournalError::InvalidInput(_))
    ));
}

#[test]
fn test_validate_entry_text_counts_characters() {
    // Five emoji are five characters, not twenty bytes.
    assert!(InputValidator::validate_entry_text("😊😊😊😊😊", 5).is_ok());
}

#[test]
fn test_parse_month_valid() {
    assert_eq!(InputValidator::parse_month("2025-04").expect("month"), (2025, 4));
    assert_eq!(InputValidator::parse_month(" 2024-12 ").expect("month"), (2024, 12));
}

#[test]
fn test_parse_month_invalid() {
    assert!(InputValidator::parse_month("2025-13").is_err());
    assert!(InputValidator::parse_month("2025").is_err());
    assert!(InputValidator::parse_month("April").is_err());
    assert!(matches!(
        InputValidator::parse_month("2025-xx"),
        Err(JournalError::InvalidDate(_))
    ));
}

#[test]
fn test_parse_date() {
    let date = InputValidator::parse_date("2025-04-27").expect("date");
    assert_eq!(date.to_string(), "2025-04-27");
    assert!(InputValidator::parse_date("2025-02-30").is_err());
    assert!(InputValidator::parse_date("27/04/2025").is_err());
}

#[test]
fn test_validate_week_offset() {
    assert!(InputValidator::validate_week_offset(0).is_ok());
    assert!(InputValidator::validate_week_offset(-MAX_WEEK_OFFSET).is_ok());
    assert!(InputValidator::validate_week_offset(MAX_WEEK_OFFSET + 1).is_err());
    assert!(InputValidator::validate_week_offset(-MAX_WEEK_OFFSET - 1).is_err());
    assert!(InputValidator::validate_week_offset(i64::MIN).is_err());
    assert!(InputValidator::validate_week_offset(i64::MAX).is_err());
}

#[test]
fn test_validate_output_dir_valid() {
    assert!(InputValidator::validate_output_dir(Path::new("./output")).is_ok());
}

#[test]
fn test_validate_output_dir_empty() {
    assert!(InputValidator::validate_output_dir(Path::new("")).is_err());
}

#[test]
fn test_validate_output_dir_traversal() {
    assert!(InputValidator::validate_output_dir(Path::new("../outside")).is_err());
    assert!(InputValidator::validate_output_dir(Path::new("output/../../etc")).is_err());
}

#[test]
fn test_validate_output_dir_is_file() {
    let file = tempfile::NamedTempFile::new().expect("temp file");
    assert!(InputValidator::validate_output_dir(file.path()).is_err());
}
