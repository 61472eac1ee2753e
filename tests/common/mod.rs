//! Shared fixtures for integration tests

#![allow(dead_code)]

use chrono::{DateTime, Local, NaiveDate};
use mood_journal::models::{JournalEntry, Mood};
use mood_journal::utils::local_from_naive;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Local> {
    let naive = date(year, month, day).and_hms_opt(hour, minute, second).expect("valid time");
    local_from_naive(naive).expect("representable local time")
}

pub fn entry(when: DateTime<Local>, mood: Mood) -> JournalEntry {
    JournalEntry::new(when, format!("{mood} day"), mood, mood.emoji())
}
