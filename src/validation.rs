use chrono::NaiveDate;
use std::path::Path;

use crate::error::{JournalError, Result};

/// Largest week offset accepted when paging through history (ten years)
pub const MAX_WEEK_OFFSET: i64 = 520;

fn invalid(message: impl Into<String>) -> JournalError {
    JournalError::InvalidInput(message.into())
}

/// Validation utilities for input sanitization and edge case handling
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Sanitize text input
    ///
    /// Drops control characters other than newlines and tabs, then trims.
    #[must_use]
    pub fn sanitize_text(text: &str) -> String {
        text.chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t' || *c == '\r')
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Validate sanitized entry text against the configured limit
    ///
    /// Blank text is not an error here; callers refuse it silently.
    pub fn validate_entry_text(text: &str, max_length: usize) -> Result<()> {
        let length = text.chars().count();
        if length > max_length {
            return Err(invalid(format!(
                "Entry text too long ({length} characters, max {max_length})"
            )));
        }
        Ok(())
    }

    /// Parse a `YYYY-MM` month argument
    pub fn parse_month(raw: &str) -> Result<(i32, u32)> {
        let trimmed = raw.trim();
        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| JournalError::InvalidDate(format!("Expected YYYY-MM, got {trimmed}")))?;

        let year: i32 = year
            .parse()
            .map_err(|_| JournalError::InvalidDate(format!("Invalid year in {trimmed}")))?;
        let month: u32 = month
            .parse()
            .map_err(|_| JournalError::InvalidDate(format!("Invalid month in {trimmed}")))?;

        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(JournalError::InvalidDate(format!("No such month: {trimmed}")));
        }

        Ok((year, month))
    }

    /// Parse a `YYYY-MM-DD` date argument
    pub fn parse_date(raw: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|e| JournalError::InvalidDate(format!("{raw}: {e}")))
    }

    /// Validate a week offset used to page through history
    pub fn validate_week_offset(offset: i64) -> Result<()> {
        if offset.unsigned_abs() > MAX_WEEK_OFFSET.unsigned_abs() {
            return Err(invalid(format!(
                "Week offset {offset} out of range (max {MAX_WEEK_OFFSET} weeks either way)"
            )));
        }
        Ok(())
    }

    /// Validate an export output directory
    pub fn validate_output_dir(path: &Path) -> Result<()> {
        if path.to_string_lossy().is_empty() {
            return Err(invalid("Output directory cannot be empty"));
        }

        // Check for path traversal attempts
        if path.components().any(|c| matches!(c, std::path::Component::ParentDir)) {
            return Err(invalid("Output directory cannot contain '..'"));
        }

        if path.is_file() {
            return Err(invalid(format!("Output path is a file: {}", path.display())));
        }

        Ok(())
    }
}
