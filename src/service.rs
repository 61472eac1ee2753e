//! Journal flows on top of the entry store.
//!
//! Writing scores the text and persists the entry; reading builds the week,
//! month and recent-day views from the stored collection.

use chrono::{DateTime, Local, NaiveDate};
use tracing::{debug, info};

use crate::aggregate::{
    week_bars, DateWindow, DayBar, MonthCalendar, MoodSummary, Period, RecentEntries, WeekComparison,
};
use crate::classifier::{MoodClassifier, Thresholds};
use crate::config::{AppConfig, JournalConfig};
use crate::error::{JournalError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{EntryKey, EntryPatch, JournalEntry};
use crate::seed::example_week;
use crate::sentiment::SentimentScorer;
use crate::storage::BlobStore;
use crate::store::JournalStore;
use crate::validation::InputValidator;

/// Write and read flows of the journal
pub struct JournalService<B, S> {
    store: JournalStore<B>,
    classifier: MoodClassifier<S>,
    settings: JournalConfig,
    max_text_length: usize,
    metrics: MetricsCollector,
}

impl<B: BlobStore, S: SentimentScorer> JournalService<B, S> {
    /// Assemble a service from an opened store and a classifier
    pub fn new(
        store: JournalStore<B>,
        classifier: MoodClassifier<S>,
        settings: JournalConfig,
        max_text_length: usize,
    ) -> Self {
        Self {
            store,
            classifier,
            settings,
            max_text_length,
            metrics: MetricsCollector::default(),
        }
    }

    /// Open the store on `backend` and wire the classifier from `config`
    ///
    /// A fresh install is seeded with the example week before `today` when
    /// `journal.seed_on_first_run` is set.
    pub async fn open(backend: B, scorer: S, config: &AppConfig, today: NaiveDate) -> Result<Self> {
        let seed = if config.journal.seed_on_first_run {
            Some(example_week(today)?)
        } else {
            None
        };
        let store = JournalStore::open(backend, seed).await?;
        let classifier = MoodClassifier::with_thresholds(scorer, Thresholds::from(&config.sentiment));

        Ok(Self::new(
            store,
            classifier,
            config.journal.clone(),
            config.sentiment.max_text_length,
        ))
    }

    /// Underlying entry store
    pub const fn store(&self) -> &JournalStore<B> {
        &self.store
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[JournalEntry] {
        self.store.entries()
    }

    /// First entry addressed by `key`
    pub fn get(&self, key: &EntryKey) -> Option<&JournalEntry> {
        self.store.get(key)
    }

    /// Score and store today's entry.
    ///
    /// Blank text is refused silently (`Ok(None)`).
    pub async fn submit(&mut self, text: &str, now: DateTime<Local>) -> Result<Option<JournalEntry>> {
        let text = InputValidator::sanitize_text(text);
        if text.is_empty() {
            debug!("Ignoring blank entry");
            return Ok(None);
        }
        InputValidator::validate_entry_text(&text, self.max_text_length)?;

        let today = now.date_naive();
        if self.settings.one_entry_per_day && self.store.find_by_day(today).is_some() {
            return Err(JournalError::DuplicateDay(today));
        }

        let classification = self.classify(&text)?;
        let entry = JournalEntry::new(now, text, classification.mood, classification.emoji);
        self.store.add_entry(entry.clone()).await?;

        self.metrics.record_entry_created(entry.mood);
        info!(id = %entry.id, mood = entry.mood.as_str(), "Added journal entry");
        Ok(Some(entry))
    }

    /// Replace an entry's text and rescore it.
    ///
    /// Blank text is refused silently (`Ok(None)`).
    pub async fn edit(&mut self, key: &EntryKey, text: &str, now: DateTime<Local>) -> Result<Option<JournalEntry>> {
        let existing = self
            .store
            .get(key)
            .ok_or_else(|| JournalError::EntryNotFound(key.to_string()))?;
        let written_on = existing.local_date();
        if self.settings.same_day_edits_only && !existing.is_editable_on(now.date_naive()) {
            return Err(JournalError::NotEditable(written_on));
        }

        let text = InputValidator::sanitize_text(text);
        if text.is_empty() {
            debug!(%key, "Ignoring blank edit");
            return Ok(None);
        }
        InputValidator::validate_entry_text(&text, self.max_text_length)?;

        let classification = self.classify(&text)?;
        let patch = EntryPatch {
            text: Some(text),
            mood: Some(classification.mood),
            emoji: Some(classification.emoji.to_string()),
        };
        let updated = self.store.update_entry(key, &patch).await?;

        self.metrics.record_entry_updated(classification.mood);
        info!(%key, mood = classification.mood.as_str(), "Updated journal entry");
        Ok(updated.into_iter().next())
    }

    /// Delete the entries addressed by `key`
    pub async fn delete(&mut self, key: &EntryKey) -> Result<usize> {
        let removed = self.store.delete_entry(key).await?;
        self.metrics.record_entries_deleted(removed);
        info!(%key, removed, "Deleted journal entry");
        Ok(removed)
    }

    fn classify(&self, text: &str) -> Result<crate::classifier::Classification> {
        let classification = self.classifier.classify(text).map_err(|e| {
            self.metrics.record_error("scoring", "classify");
            e
        })?;
        self.metrics
            .record_classification(classification.mood, classification.compound, text.chars().count());
        Ok(classification)
    }

    /// Entries of the week `offset` weeks away from the one holding `today`
    pub fn week_entries(&self, offset: i64, today: NaiveDate) -> Result<Vec<&JournalEntry>> {
        Ok(Self::week_window(offset, today)?.filter(self.store.entries()))
    }

    /// Entries written on `date`
    pub fn day_entries(&self, date: NaiveDate) -> Vec<&JournalEntry> {
        DateWindow::day(date).filter(self.store.entries())
    }

    /// Heading for a week page
    pub fn week_label(&self, offset: i64, today: NaiveDate) -> Result<String> {
        let window = Self::week_window(offset, today)?;
        if offset == 0 {
            Ok("This week".to_string())
        } else {
            Ok(window.label())
        }
    }

    /// Counts and percentages over `period`
    pub fn summary(&self, period: Period, today: NaiveDate) -> Result<MoodSummary> {
        MoodSummary::compute(self.store.entries(), period, today)
    }

    /// The week holding `today` against the week before
    pub fn week_comparison(&self, today: NaiveDate) -> Result<WeekComparison> {
        WeekComparison::compute(self.store.entries(), today)
    }

    /// One bar per weekday of the week `offset` weeks away
    pub fn week_bars(&self, offset: i64, today: NaiveDate) -> Result<Vec<DayBar>> {
        Ok(week_bars(self.store.entries(), &Self::week_window(offset, today)?))
    }

    fn week_window(offset: i64, today: NaiveDate) -> Result<DateWindow> {
        InputValidator::validate_week_offset(offset)?;
        DateWindow::week_with_offset(today, offset)
    }

    /// Month grid for `year`-`month`
    pub fn calendar(&self, year: i32, month: u32) -> Result<MonthCalendar> {
        MonthCalendar::build(year, month, self.store.entries())
    }

    /// Entries of today, yesterday and the day before
    pub fn recent(&self, today: NaiveDate) -> RecentEntries<'_> {
        RecentEntries::lookup(self.store.entries(), today)
    }
}
