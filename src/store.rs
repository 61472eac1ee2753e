//! Journal entry store.
//!
//! Entries live in memory in insertion order and are persisted as one JSON
//! array under [`ENTRIES_KEY`]. Every mutation rewrites the whole array.
//! The next collection is written first and only becomes the in-memory state
//! once the write succeeded, so a failed write leaves memory and storage in
//! agreement.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::{JournalError, Result};
use crate::logging::OperationTimer;
use crate::metrics::MetricsCollector;
use crate::models::{EntryKey, EntryPatch, JournalEntry};
use crate::storage::BlobStore;

/// Storage key of the serialized entry collection
pub const ENTRIES_KEY: &str = "journalEntries";

/// Serialize an entry collection to its persisted form
pub fn encode_entries(entries: &[JournalEntry]) -> Result<String> {
    Ok(serde_json::to_string(entries)?)
}

/// Parse a persisted entry collection
pub fn decode_entries(raw: &str) -> Result<Vec<JournalEntry>> {
    Ok(serde_json::from_str(raw)?)
}

/// Ordered collection of journal entries backed by a blob store
pub struct JournalStore<B> {
    backend: B,
    entries: Vec<JournalEntry>,
    metrics: MetricsCollector,
}

impl<B: BlobStore> JournalStore<B> {
    /// Load the persisted collection.
    ///
    /// When nothing was ever persisted and `seed` is given, the seed is
    /// written and used. Because the written record is found on every later
    /// open, seeding happens once per install.
    pub async fn open(backend: B, seed: Option<Vec<JournalEntry>>) -> Result<Self> {
        let mut store = Self {
            backend,
            entries: Vec::new(),
            metrics: MetricsCollector::default(),
        };

        match store.backend.get_item(ENTRIES_KEY).await? {
            Some(raw) => {
                store.entries = decode_entries(&raw)?;
                debug!(count = store.entries.len(), "Loaded journal entries");
            }
            None => {
                if let Some(seed) = seed {
                    info!(count = seed.len(), "Seeding journal with example entries");
                    store.commit(seed).await?;
                }
            }
        }

        Ok(store)
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry addressed by `key`
    pub fn get(&self, key: &EntryKey) -> Option<&JournalEntry> {
        self.entries.iter().find(|entry| key.matches(entry))
    }

    /// First entry written on the local calendar day `date`
    pub fn find_by_day(&self, date: NaiveDate) -> Option<&JournalEntry> {
        self.entries.iter().find(|entry| entry.local_date() == date)
    }

    /// Backend the store persists to
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Append an entry
    pub async fn add_entry(&mut self, entry: JournalEntry) -> Result<()> {
        let mut next = self.entries.clone();
        next.push(entry);
        self.commit(next).await
    }

    /// Merge `patch` into every entry addressed by `key`, returning the
    /// updated entries
    pub async fn update_entry(&mut self, key: &EntryKey, patch: &EntryPatch) -> Result<Vec<JournalEntry>> {
        let mut next = self.entries.clone();
        let mut updated = Vec::new();
        for entry in next.iter_mut().filter(|entry| key.matches(entry)) {
            entry.apply(patch);
            updated.push(entry.clone());
        }

        if updated.is_empty() {
            return Err(JournalError::EntryNotFound(key.to_string()));
        }
        if updated.len() > 1 {
            warn!(%key, matched = updated.len(), "Update matched more than one entry");
        }

        self.commit(next).await?;
        Ok(updated)
    }

    /// Remove every entry addressed by `key`, returning how many were removed
    pub async fn delete_entry(&mut self, key: &EntryKey) -> Result<usize> {
        let next: Vec<JournalEntry> = self.entries.iter().filter(|entry| !key.matches(entry)).cloned().collect();
        let removed = self.entries.len() - next.len();

        if removed == 0 {
            return Err(JournalError::EntryNotFound(key.to_string()));
        }
        if removed > 1 {
            warn!(%key, removed, "Delete matched more than one entry");
        }

        self.commit(next).await?;
        Ok(removed)
    }

    /// Replace the in-memory collection with what is persisted
    pub async fn reload(&mut self) -> Result<()> {
        self.entries = match self.backend.get_item(ENTRIES_KEY).await? {
            Some(raw) => decode_entries(&raw)?,
            None => Vec::new(),
        };
        Ok(())
    }

    async fn commit(&mut self, next: Vec<JournalEntry>) -> Result<()> {
        let payload = encode_entries(&next)?;

        let timer = OperationTimer::new("persist_entries");
        let written = self.backend.set_item(ENTRIES_KEY, &payload).await;
        self.metrics.record_storage_write(timer.finish(), written.is_ok());
        written?;

        self.entries = next;
        self.metrics.record_collection_size(self.entries.len());
        Ok(())
    }
}
