use std::collections::HashMap;

use regex::Regex;
use tracing::trace;
use unicode_normalization::UnicodeNormalization;

use crate::error::{JournalError, Result};

/// Normalisation constant for the compound score, `x / sqrt(x^2 + ALPHA)`
const ALPHA: f64 = 15.0;
/// Valence shift added by a booster word
const BOOST_INCREMENT: f64 = 0.293;
/// Valence shift removed by a dampener word
const DAMPEN_DECREMENT: f64 = -0.293;
/// Scale applied to a negated term
const NEGATION_SCALAR: f64 = -0.74;
/// Extra valence for an ALL-CAPS term in otherwise mixed-case text
const CAPS_INCREMENT: f64 = 0.733;
/// Extra valence per exclamation mark, capped at four marks
const EXCLAMATION_INCREMENT: f64 = 0.292;
/// How many preceding tokens are checked for boosters and negations
const LOOKBACK: usize = 3;

/// Scores produced for a piece of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScores {
    /// Overall polarity in [-1, 1]
    pub compound: f64,
}

/// Polarity scoring for free text
pub trait SentimentScorer {
    /// Score `text`, returning a compound polarity in [-1, 1]
    fn score(&self, text: &str) -> Result<SentimentScores>;
}

impl<T: SentimentScorer + ?Sized> SentimentScorer for &T {
    fn score(&self, text: &str) -> Result<SentimentScores> {
        (**self).score(text)
    }
}

impl<T: SentimentScorer + ?Sized> SentimentScorer for Box<T> {
    fn score(&self, text: &str) -> Result<SentimentScores> {
        (**self).score(text)
    }
}

/// Rule-based lexicon scorer
///
/// Sums per-term valences, adjusts them for boosters, negation, a "but"
/// contrast, ALL-CAPS emphasis and exclamation marks, then squashes the sum
/// into [-1, 1].
pub struct LexiconScorer {
    url_regex: Regex,
    token_regex: Regex,
    lexicon: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
}

impl LexiconScorer {
    /// Create a scorer with the built-in English lexicon
    pub fn new() -> Result<Self> {
        let url_regex = Regex::new(r"https?://\S+|www\.\S+")
            .map_err(|e| JournalError::Other(format!("Failed to compile URL regex: {e}")))?;
        let token_regex = Regex::new(r"[\p{L}\p{N}']+|\p{Extended_Pictographic}")
            .map_err(|e| JournalError::Other(format!("Failed to compile token regex: {e}")))?;

        Ok(Self {
            url_regex,
            token_regex,
            lexicon: LEXICON.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
        })
    }

    /// Normalise unicode, drop URLs and collapse whitespace
    #[must_use]
    pub fn clean_text(&self, text: &str) -> String {
        let normalized = text.nfc().collect::<String>();
        let no_urls = self.url_regex.replace_all(&normalized, " ");
        no_urls.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Split cleaned text into scoreable tokens, keeping their original case
    #[must_use]
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.token_regex.find_iter(text).map(|m| m.as_str()).collect()
    }

    fn booster_shift(&self, token: &str, valence: f64, distance: usize) -> f64 {
        let Some(&shift) = self.boosters.get(token) else {
            return 0.0;
        };
        let directed = if valence < 0.0 { -shift } else { shift };
        // Boosters further away count for a little less.
        match distance {
            1 => directed,
            2 => directed * 0.95,
            _ => directed * 0.9,
        }
    }

    fn term_valence(&self, tokens: &[&str], lowered: &[String], index: usize, caps_differential: bool) -> Option<f64> {
        let mut valence = *self.lexicon.get(lowered[index].as_str())?;

        if caps_differential && is_shouting(tokens[index]) {
            valence += CAPS_INCREMENT.copysign(valence);
        }

        let start = index.saturating_sub(LOOKBACK);
        let mut negated = false;
        for prior in start..index {
            let distance = index - prior;
            valence += self.booster_shift(lowered[prior].as_str(), valence, distance);
            negated |= is_negation(&lowered[prior]);
        }

        if negated {
            valence *= NEGATION_SCALAR;
        }
        Some(valence)
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<SentimentScores> {
        let cleaned = self.clean_text(text);
        if cleaned.is_empty() {
            return Err(JournalError::Scoring("cannot score empty text".to_string()));
        }

        let tokens = self.tokenize(&cleaned);
        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let caps_differential = has_caps_differential(&tokens);

        let mut valences: Vec<Option<f64>> = (0..tokens.len())
            .map(|i| self.term_valence(&tokens, &lowered, i, caps_differential))
            .collect();

        // "X but Y": the clause after "but" dominates.
        if let Some(but_index) = lowered.iter().position(|t| t == "but") {
            for (i, valence) in valences.iter_mut().enumerate() {
                if let Some(v) = valence {
                    *v *= if i < but_index { 0.5 } else { 1.5 };
                }
            }
        }

        let mut sum: f64 = valences.iter().flatten().sum();
        if sum != 0.0 {
            let marks = cleaned.matches('!').count().min(4);
            #[allow(clippy::cast_precision_loss)]
            let emphasis = marks as f64 * EXCLAMATION_INCREMENT;
            sum += emphasis.copysign(sum);
        }

        let compound = (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0);
        trace!(tokens = tokens.len(), sum, compound, "Scored text");
        Ok(SentimentScores { compound })
    }
}

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.ends_with("n't")
}

fn is_shouting(token: &str) -> bool {
    token.chars().filter(|c| c.is_alphabetic()).count() > 1 && token.chars().all(|c| !c.is_lowercase())
}

fn has_caps_differential(tokens: &[&str]) -> bool {
    let words: Vec<&&str> = tokens.iter().filter(|t| t.chars().any(char::is_alphabetic)).collect();
    let shouting = words.iter().filter(|t| is_shouting(t)).count();
    shouting > 0 && shouting < words.len()
}

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "nobody", "nowhere", "neither", "nor", "cannot", "without", "hardly",
];

const BOOSTERS: &[(&str, f64)] = &[
    ("very", BOOST_INCREMENT),
    ("extremely", BOOST_INCREMENT),
    ("incredibly", BOOST_INCREMENT),
    ("absolutely", BOOST_INCREMENT),
    ("completely", BOOST_INCREMENT),
    ("totally", BOOST_INCREMENT),
    ("really", BOOST_INCREMENT),
    ("so", BOOST_INCREMENT),
    ("super", BOOST_INCREMENT),
    ("truly", BOOST_INCREMENT),
    ("quite", BOOST_INCREMENT),
    ("most", BOOST_INCREMENT),
    ("somewhat", DAMPEN_DECREMENT),
    ("slightly", DAMPEN_DECREMENT),
    ("barely", DAMPEN_DECREMENT),
    ("kinda", DAMPEN_DECREMENT),
    ("sort", DAMPEN_DECREMENT),
    ("bit", DAMPEN_DECREMENT),
    ("little", DAMPEN_DECREMENT),
];

const LEXICON: &[(&str, f64)] = &[
    // positive
    ("good", 1.9),
    ("great", 3.1),
    ("excellent", 2.7),
    ("amazing", 2.8),
    ("wonderful", 2.7),
    ("fantastic", 2.6),
    ("happy", 2.7),
    ("happier", 2.4),
    ("joy", 2.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("like", 1.5),
    ("liked", 1.8),
    ("best", 3.2),
    ("better", 1.9),
    ("awesome", 3.1),
    ("perfect", 2.7),
    ("brilliant", 2.8),
    ("outstanding", 3.0),
    ("delightful", 2.8),
    ("pleased", 1.9),
    ("satisfied", 1.8),
    ("excited", 2.2),
    ("thrilled", 2.5),
    ("grateful", 2.0),
    ("thankful", 2.0),
    ("blessed", 2.1),
    ("lucky", 1.8),
    ("successful", 2.7),
    ("success", 2.7),
    ("win", 2.8),
    ("won", 2.7),
    ("achievement", 2.2),
    ("proud", 2.1),
    ("nice", 1.8),
    ("fun", 2.3),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("relaxing", 2.2),
    ("relaxed", 2.2),
    ("calm", 1.3),
    ("peaceful", 2.2),
    ("productive", 1.8),
    ("laugh", 2.6),
    ("laughs", 2.2),
    ("laughed", 2.0),
    ("smile", 1.5),
    ("smiled", 1.5),
    ("beautiful", 2.9),
    ("lovely", 2.8),
    ("glad", 2.0),
    ("hope", 1.9),
    ("hopeful", 1.6),
    ("resolved", 1.2),
    ("energized", 1.9),
    ("rested", 1.4),
    ("cheerful", 2.5),
    ("friendly", 2.2),
    ("kind", 2.4),
    ("yay", 2.4),
    ("okay", 0.9),
    ("ok", 1.2),
    ("fine", 0.8),
    ("treat", 1.3),
    ("treated", 1.1),
    ("celebrate", 2.7),
    ("celebrated", 2.7),
    ("motivated", 1.8),
    ("inspired", 2.2),
    ("comfortable", 1.5),
    ("safe", 1.9),
    ("free", 2.3),
    ("😊", 2.2),
    ("😄", 2.4),
    ("😁", 2.1),
    ("😌", 1.6),
    ("❤", 2.6),
    // negative
    ("bad", -2.5),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("horrible", -2.5),
    ("worst", -3.1),
    ("worse", -2.1),
    ("hate", -2.7),
    ("hated", -3.2),
    ("dislike", -1.6),
    ("poor", -2.1),
    ("disappointing", -2.2),
    ("disappointed", -1.9),
    ("sad", -2.1),
    ("sadness", -1.9),
    ("angry", -2.3),
    ("upset", -1.6),
    ("frustrated", -2.4),
    ("frustrating", -1.9),
    ("annoyed", -1.6),
    ("annoying", -1.7),
    ("irritated", -1.8),
    ("furious", -2.7),
    ("devastated", -3.1),
    ("depressed", -2.3),
    ("miserable", -2.2),
    ("hopeless", -2.0),
    ("worried", -1.2),
    ("worry", -1.9),
    ("anxious", -1.0),
    ("anxiety", -0.7),
    ("scared", -1.9),
    ("afraid", -2.0),
    ("stressed", -1.4),
    ("stress", -1.8),
    ("stressful", -2.2),
    ("tired", -1.9),
    ("exhausted", -1.5),
    ("overwhelmed", -1.5),
    ("lonely", -1.5),
    ("alone", -1.0),
    ("bored", -1.1),
    ("boring", -1.3),
    ("sick", -1.7),
    ("ill", -1.8),
    ("pain", -2.3),
    ("hurt", -2.4),
    ("cry", -2.1),
    ("cried", -1.6),
    ("crying", -2.1),
    ("fight", -1.6),
    ("argument", -1.5),
    ("disagreement", -1.5),
    ("disagreements", -1.5),
    ("failed", -2.3),
    ("fail", -2.5),
    ("failure", -2.3),
    ("lost", -1.3),
    ("problem", -1.7),
    ("problems", -1.7),
    ("mess", -1.5),
    ("ugly", -2.3),
    ("useless", -1.8),
    ("worthless", -1.9),
    ("pathetic", -2.1),
    ("guilty", -1.8),
    ("ashamed", -2.1),
    ("☹", -2.1),
    ("😢", -2.0),
    ("😭", -2.3),
    ("😔", -1.6),
    ("😡", -2.6),
    ("😕", -1.2),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> LexiconScorer {
        LexiconScorer::new().expect("Failed to create lexicon scorer")
    }

    #[test]
    fn test_clean_text() {
        let scorer = scorer();

        let cleaned = scorer.clean_text("Check out https://example.com for more info");
        assert!(!cleaned.contains("https://"));

        let cleaned = scorer.clean_text("  Too   many    spaces   ");
        assert_eq!(cleaned, "Too many spaces");
    }

    #[test]
    fn test_tokenize_keeps_contractions_and_emoji() {
        let scorer = scorer();
        let tokens = scorer.tokenize("I didn't sleep 😢, sadly.");
        assert_eq!(tokens, vec!["I", "didn't", "sleep", "😢", "sadly"]);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let scorer = scorer();
        let plain = scorer.score("the day was good").expect("score").compound;
        let negated = scorer.score("the day was not good").expect("score").compound;
        assert!(plain > 0.05);
        assert!(negated < 0.0);
    }

    #[test]
    fn test_booster_strengthens() {
        let scorer = scorer();
        let plain = scorer.score("a good day").expect("score").compound;
        let boosted = scorer.score("a very good day").expect("score").compound;
        assert!(boosted > plain);
    }

    #[test]
    fn test_but_clause_dominates() {
        let scorer = scorer();
        let score = scorer
            .score("Had some disagreements at work, but resolved them by evening.")
            .expect("score")
            .compound;
        assert!(score > 0.0);
    }

    #[test]
    fn test_empty_text_is_an_error() {
        let scorer = scorer();
        assert!(matches!(scorer.score("   "), Err(JournalError::Scoring(_))));
    }
}
