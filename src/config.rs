use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{JournalError, Result};

/// Application configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where entries are persisted
    pub storage: StorageConfig,
    /// Log level, format and optional file
    pub logging: LoggingConfig,
    /// Mood thresholds and input limits
    pub sentiment: SentimentConfig,
    /// Entry rules
    pub journal: JournalConfig,
    /// Export defaults
    pub export: ExportConfig,
}

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory of the embedded key-value store
    pub path: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is unset
    pub level: String,
    /// Daily-rolled log file, stdout only when absent
    pub file_path: Option<String>,
    /// "json" or "text"
    pub format: String,
}

/// Classifier settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// Compound score at or above which an entry is positive
    pub positive_threshold: f64,
    /// Compound score at or below which an entry is negative
    pub negative_threshold: f64,
    /// Longest entry text accepted, in characters
    pub max_text_length: usize,
}

/// Journal rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Seed the example week when no entries were ever persisted
    pub seed_on_first_run: bool,
    /// Refuse a second entry on the same calendar day
    pub one_entry_per_day: bool,
    /// Only allow edits on the day the entry was written
    pub same_day_edits_only: bool,
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Format used when none is given (txt, csv or json)
    pub default_format: String,
    /// Directory export files are written to
    pub output_directory: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                path: "data/journal".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                format: "text".to_string(),
            },
            sentiment: SentimentConfig {
                positive_threshold: crate::classifier::POSITIVE_THRESHOLD,
                negative_threshold: crate::classifier::NEGATIVE_THRESHOLD,
                max_text_length: 10000,
            },
            journal: JournalConfig {
                seed_on_first_run: true,
                one_entry_per_day: true,
                same_day_edits_only: true,
            },
            export: ExportConfig {
                default_format: "json".to_string(),
                output_directory: "./output".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from multiple sources with precedence
    ///
    /// Defaults, then `config/default.*`, `config/local.*`, then `explicit`
    /// if given, then `MOOD_JOURNAL__SECTION__KEY` environment variables.
    pub fn load_from(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            // Start with default values
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(Environment::with_prefix("MOOD_JOURNAL").separator("__").try_parsing(true))
            .build()?;

        let app_config: Self = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.storage.path.trim().is_empty() {
            return Err(invalid("storage.path cannot be empty"));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(invalid(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level, valid_levels
            )));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(invalid(format!(
                "Invalid log format: {}. Must be one of: {:?}",
                self.logging.format, valid_formats
            )));
        }

        let sentiment = &self.sentiment;
        if !(-1.0..=1.0).contains(&sentiment.positive_threshold) || !(-1.0..=1.0).contains(&sentiment.negative_threshold) {
            return Err(invalid("sentiment thresholds must lie within [-1, 1]"));
        }
        if sentiment.negative_threshold >= sentiment.positive_threshold {
            return Err(invalid("negative_threshold must be below positive_threshold"));
        }
        if sentiment.max_text_length == 0 {
            return Err(invalid("max_text_length must be greater than 0"));
        }

        let valid_exports = ["txt", "csv", "json"];
        if !valid_exports.contains(&self.export.default_format.as_str()) {
            return Err(invalid(format!(
                "Invalid export format: {}. Must be one of: {:?}",
                self.export.default_format, valid_exports
            )));
        }
        if self.export.output_directory.trim().is_empty() {
            return Err(invalid("export.output_directory cannot be empty"));
        }

        Ok(())
    }

    /// Storage directory, overridable with `MOOD_JOURNAL_DATA_DIR`
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        std::env::var("MOOD_JOURNAL_DATA_DIR").map_or_else(|_| PathBuf::from(&self.storage.path), PathBuf::from)
    }

    /// Get log level from environment or config
    #[must_use]
    pub fn get_log_level(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.logging.level.clone())
    }

    /// Render the effective configuration as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn invalid(message: impl Into<String>) -> JournalError {
    JournalError::InvalidConfig(message.into())
}
