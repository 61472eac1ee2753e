//! Data models for journal entries
//!
//! This module contains the data structures persisted by the entry store and
//! passed around by the classifier, the aggregator and the service.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{JournalError, Result};
use crate::utils::weekday_name;

/// Display colour for positive entries
pub const POSITIVE_COLOR: &str = "#71ABE0";
/// Display colour for neutral entries
pub const NEUTRAL_COLOR: &str = "#C2C2C6";
/// Display colour for negative entries
pub const NEGATIVE_COLOR: &str = "#E07171";
/// Display colour for a calendar day with no entry
pub const NO_ENTRY_COLOR: &str = "#E1E1E2";

/// Discrete mood derived from a compound sentiment score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    /// Compound score at or above the positive threshold
    Positive,
    /// Compound score strictly between the thresholds
    Neutral,
    /// Compound score at or below the negative threshold
    Negative,
}

impl Mood {
    /// All moods in display order
    pub const ALL: [Self; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    /// Stored name of the mood
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }

    /// Canonical emoji for the mood
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Positive => "😊",
            Self::Neutral => "😐",
            Self::Negative => "😢",
        }
    }

    /// Chart and calendar colour for the mood
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Positive => POSITIVE_COLOR,
            Self::Neutral => NEUTRAL_COLOR,
            Self::Negative => NEGATIVE_COLOR,
        }
    }

    /// Classify a compound score with the default +/-0.05 thresholds
    #[must_use]
    pub fn from_compound(compound: f64) -> Self {
        crate::classifier::Thresholds::default().mood_for(compound)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            other => Err(JournalError::InvalidInput(format!("Unknown mood: {other}"))),
        }
    }
}

impl Serialize for Mood {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Anything that is not Positive or Negative counts as Neutral.
impl<'de> Deserialize<'de> for Mood {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "Positive" => Self::Positive,
            "Negative" => Self::Negative,
            _ => Self::Neutral,
        })
    }
}

/// A single day's journal entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Opaque unique identifier, fixed at creation
    pub id: String,
    /// Creation timestamp, fixed at creation
    #[serde(with = "entry_date")]
    pub date: DateTime<Local>,
    /// Weekday name derived from `date` at creation
    pub day: String,
    /// Mood of the last scored text
    pub mood: Mood,
    /// Emoji shown alongside the mood
    pub emoji: String,
    /// Entry text
    pub text: String,
}

impl JournalEntry {
    /// Create a new entry with a fresh identifier
    #[must_use]
    pub fn new(date: DateTime<Local>, text: impl Into<String>, mood: Mood, emoji: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            day: weekday_name(date.weekday()).to_string(),
            date,
            mood,
            emoji: emoji.into(),
            text: text.into(),
        }
    }

    /// Local calendar date of the entry
    #[must_use]
    pub fn local_date(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// Whether the entry may still be edited on `today`
    #[must_use]
    pub fn is_editable_on(&self, today: NaiveDate) -> bool {
        self.local_date() == today
    }

    /// Merge a patch into this entry
    pub fn apply(&mut self, patch: &EntryPatch) {
        if let Some(text) = &patch.text {
            self.text.clone_from(text);
        }
        if let Some(mood) = patch.mood {
            self.mood = mood;
        }
        if let Some(emoji) = &patch.emoji {
            self.emoji.clone_from(emoji);
        }
    }
}

/// Partial update for an entry; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    /// Replacement text
    pub text: Option<String>,
    /// Replacement mood
    pub mood: Option<Mood>,
    /// Replacement emoji
    pub emoji: Option<String>,
}

/// Key used to address entries for update and delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKey {
    /// Match by entry id
    Id(String),
    /// Match every entry with exactly this timestamp
    Date(DateTime<Local>),
}

impl EntryKey {
    /// Whether `entry` is addressed by this key
    #[must_use]
    pub fn matches(&self, entry: &JournalEntry) -> bool {
        match self {
            Self::Id(id) => entry.id == *id,
            Self::Date(date) => entry.date == *date,
        }
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id}"),
            Self::Date(date) => write!(f, "date {}", date.to_rfc3339()),
        }
    }
}

impl FromStr for EntryKey {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(JournalError::InvalidInput("Entry key cannot be empty".to_string()));
        }
        Ok(entry_date::parse(trimmed).map_or_else(|_| Self::Id(trimmed.to_string()), Self::Date))
    }
}

/// Serde adapter for entry timestamps.
///
/// Writes RFC 3339. Reads RFC 3339, a bare `YYYY-MM-DD` (local midnight) or a
/// naive `YYYY-MM-DDTHH:MM:SS[.fff]` (local time).
pub mod entry_date {
    use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat};
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::error::{JournalError, Result};
    use crate::utils::{local_from_naive, start_of_day};

    /// Parse an entry timestamp in any of the accepted shapes
    pub fn parse(raw: &str) -> Result<DateTime<Local>> {
        if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
            return Ok(date_time.with_timezone(&Local));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return local_from_naive(naive);
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return local_from_naive(start_of_day(date));
        }
        Err(JournalError::InvalidDate(raw.to_string()))
    }

    /// Serialize as RFC 3339 with full sub-second precision
    pub fn serialize<S: Serializer>(date: &DateTime<Local>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::AutoSi, false))
    }

    /// Deserialize any accepted timestamp shape
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<DateTime<Local>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}
