//! Mood classification on top of a sentiment scorer.

use tracing::debug;

use crate::config::SentimentConfig;
use crate::error::Result;
use crate::models::Mood;
use crate::sentiment::SentimentScorer;

/// Default lower bound of the positive band (inclusive)
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Default upper bound of the negative band (inclusive)
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Band edges for mapping a compound score to a mood
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// `compound >= positive` is Positive
    pub positive: f64,
    /// `compound <= negative` is Negative
    pub negative: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            positive: POSITIVE_THRESHOLD,
            negative: NEGATIVE_THRESHOLD,
        }
    }
}

impl From<&SentimentConfig> for Thresholds {
    fn from(config: &SentimentConfig) -> Self {
        Self {
            positive: config.positive_threshold,
            negative: config.negative_threshold,
        }
    }
}

impl Thresholds {
    /// Map a compound score to its mood band
    #[must_use]
    pub fn mood_for(&self, compound: f64) -> Mood {
        if compound >= self.positive {
            Mood::Positive
        } else if compound > self.negative {
            Mood::Neutral
        } else {
            Mood::Negative
        }
    }
}

/// Result of classifying a piece of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Mood band of the text
    pub mood: Mood,
    /// Emoji for the mood
    pub emoji: &'static str,
    /// Compound score the mood was derived from
    pub compound: f64,
}

/// Scores text and maps the compound score to a mood
pub struct MoodClassifier<S> {
    scorer: S,
    thresholds: Thresholds,
}

impl<S: SentimentScorer> MoodClassifier<S> {
    /// Classifier with the default thresholds
    pub fn new(scorer: S) -> Self {
        Self::with_thresholds(scorer, Thresholds::default())
    }

    /// Classifier with custom thresholds
    pub const fn with_thresholds(scorer: S, thresholds: Thresholds) -> Self {
        Self { scorer, thresholds }
    }

    /// Thresholds in use
    pub const fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Classify `text`; scorer errors propagate unchanged
    pub fn classify(&self, text: &str) -> Result<Classification> {
        let scores = self.scorer.score(text)?;
        let mood = self.thresholds.mood_for(scores.compound);
        debug!(compound = scores.compound, mood = mood.as_str(), "Classified text");
        Ok(Classification {
            mood,
            emoji: mood.emoji(),
            compound: scores.compound,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_belong_to_outer_bands() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.mood_for(0.05), Mood::Positive);
        assert_eq!(thresholds.mood_for(0.049_999), Mood::Neutral);
        assert_eq!(thresholds.mood_for(-0.049_999), Mood::Neutral);
        assert_eq!(thresholds.mood_for(-0.05), Mood::Negative);
    }
}
