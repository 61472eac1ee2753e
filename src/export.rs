//! File export of journal entries.
//!
//! Writes the entry collection as plain text, CSV or JSON.

use crate::error::{JournalError, Result};
use crate::models::JournalEntry;
use csv::Writer;
use std::fmt;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output format for exported entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format
    Csv,
    /// Plain text format
    Txt,
    /// JSON format, same shape as the persisted collection
    Json,
}

impl ExportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Txt => "txt",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "txt" => Ok(Self::Txt),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(JournalError::InvalidInput(format!("Unknown export format: {other}"))),
        }
    }
}

/// Write entries to `output_dir/journal_<timestamp>.<ext>`.
///
/// # Arguments
///
/// * `entries` - Entries to write, in the order given
/// * `format` - Output format (TXT, CSV, or JSON)
/// * `output_dir` - Directory to write into, created if missing
/// * `timestamp` - Timestamp string for the file name (e.g., "2025-01-15_14-30-00")
///
/// # Returns
///
/// Path of the created file
pub fn export_entries(
    entries: &[JournalEntry],
    format: ExportFormat,
    output_dir: &Path,
    timestamp: &str,
) -> Result<PathBuf> {
    create_dir_all(output_dir)?;
    let file_path = output_dir.join(format!("journal_{timestamp}.{}", format.extension()));
    write_entries_to_file(entries, format, &file_path)?;
    Ok(file_path)
}

/// Write entries to a file in the specified format.
pub fn write_entries_to_file(entries: &[JournalEntry], format: ExportFormat, file_path: &Path) -> Result<()> {
    match format {
        ExportFormat::Txt => write_txt_file(entries, file_path),
        ExportFormat::Csv => write_csv_file(entries, file_path),
        ExportFormat::Json => write_json_file(entries, file_path),
    }
}

/// Format: `Sunday, Apr 27, 2025 8:00 PM - Positive 😊`, the text, then a blank line
fn write_txt_file(entries: &[JournalEntry], file_path: &Path) -> Result<()> {
    let file = File::create(file_path)?;
    let mut writer = BufWriter::new(file);

    for entry in entries {
        writeln!(
            writer,
            "{}, {} - {} {}",
            entry.day,
            entry.date.format("%b %d, %Y %-I:%M %p"),
            entry.mood,
            entry.emoji
        )?;
        writeln!(writer, "{}", entry.text)?;
        writeln!(writer)?; // Add blank line between entries
    }

    writer.flush()?;
    Ok(())
}

/// Includes header row: `ID, Date, Day, Mood, Emoji, Text`
fn write_csv_file(entries: &[JournalEntry], file_path: &Path) -> Result<()> {
    let file = File::create(file_path)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(["ID", "Date", "Day", "Mood", "Emoji", "Text"])?;

    for entry in entries {
        let date = entry.date.to_rfc3339();
        writer.write_record([
            entry.id.as_str(),
            date.as_str(),
            entry.day.as_str(),
            entry.mood.as_str(),
            entry.emoji.as_str(),
            entry.text.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn write_json_file(entries: &[JournalEntry], file_path: &Path) -> Result<()> {
    let file = File::create(file_path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, entries)?;
    Ok(())
}
