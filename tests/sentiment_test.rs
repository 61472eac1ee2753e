//! Tests for the lexicon sentiment scorer

use proptest::prelude::*;

use mood_journal::classifier::MoodClassifier;
use mood_journal::error::JournalError;
use mood_journal::models::Mood;
use mood_journal::sentiment::{LexiconScorer, SentimentScorer};

fn scorer() -> LexiconScorer {
    LexiconScorer::new().expect("Failed to create lexicon scorer")
}

fn compound(text: &str) -> f64 {
    scorer().score(text).expect("score").compound
}

#[test]
fn test_clearly_positive_text() {
    assert!(compound("I love this wonderful day!") >= 0.05);
}

#[test]
fn test_clearly_negative_text() {
    assert!(compound("I hate this, it was awful") <= -0.05);
}

#[test]
fn test_text_without_opinion_is_neutral() {
    assert!(compound("I went to the store").abs() < f64::EPSILON);
    let classifier = MoodClassifier::new(scorer());
    assert_eq!(classifier.classify("I went to the store").expect("classify").mood, Mood::Neutral);
}

#[test]
fn test_exclamation_adds_emphasis() {
    assert!(compound("a good day!!!") > compound("a good day"));
}

#[test]
fn test_caps_add_emphasis() {
    assert!(compound("what a GREAT day") > compound("what a great day"));
}

#[test]
fn test_contraction_negates() {
    assert!(compound("I didn't enjoy it") < 0.0);
}

#[test]
fn test_dampener_weakens() {
    assert!(compound("a slightly good day") < compound("a good day"));
}

#[test]
fn test_urls_are_ignored() {
    let with_url = compound("a good day https://example.com/bad/awful");
    assert!((with_url - compound("a good day")).abs() < f64::EPSILON);
}

#[test]
fn test_blank_text_cannot_be_scored() {
    assert!(matches!(scorer().score(""), Err(JournalError::Scoring(_))));
    assert!(matches!(scorer().score("https://example.com"), Err(JournalError::Scoring(_))));
}

#[test]
fn test_scorer_usable_through_box() {
    let boxed: Box<dyn SentimentScorer> = Box::new(scorer());
    assert!(boxed.score("great").expect("score").compound > 0.0);
}

proptest! {
    #[test]
    fn prop_compound_is_bounded(text in "[a-zA-Z!' ]{1,80}") {
        if let Ok(scores) = scorer().score(&text) {
            prop_assert!((-1.0..=1.0).contains(&scores.compound));
        }
    }
}
