//! Time-windowed mood aggregation.
//!
//! Everything here is a pure computation over a slice of entries. Windows
//! are compared on local wall-clock time.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, Weekday};

use crate::error::{JournalError, Result};
use crate::models::{JournalEntry, Mood, NO_ENTRY_COLOR};
use crate::utils::{days_in_month, end_of_day, start_of_day, start_of_week};

/// Inclusive local-time range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First instant in the window
    pub start: NaiveDateTime,
    /// Last instant in the window
    pub end: NaiveDateTime,
}

impl DateWindow {
    /// Sunday 00:00:00.000 through Saturday 23:59:59.999 of the week holding `date`
    #[must_use]
    pub fn week_containing(date: NaiveDate) -> Self {
        let sunday = start_of_week(date);
        let saturday = sunday.checked_add_days(Days::new(6)).unwrap_or(sunday);
        Self {
            start: start_of_day(sunday),
            end: end_of_day(saturday),
        }
    }

    /// The week holding `today`, shifted by `offset` whole weeks
    pub fn week_with_offset(today: NaiveDate, offset: i64) -> Result<Self> {
        Self::week_containing(today).shift_weeks(offset)
    }

    /// A single calendar day
    #[must_use]
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: start_of_day(date),
            end: end_of_day(date),
        }
    }

    /// First through last day of a calendar month
    pub fn month(year: i32, month: u32) -> Result<Self> {
        let invalid = || JournalError::InvalidDate(format!("{year}-{month:02}"));
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let length = days_in_month(year, month).ok_or_else(invalid)?;
        let last = first.with_day(length).ok_or_else(invalid)?;
        Ok(Self {
            start: start_of_day(first),
            end: end_of_day(last),
        })
    }

    /// Move the window by whole weeks
    ///
    /// Fails when the shifted window falls outside the representable range.
    pub fn shift_weeks(self, weeks: i64) -> Result<Self> {
        let out_of_range = || JournalError::InvalidDate(format!("Cannot shift week window by {weeks} weeks"));
        let delta = chrono::Duration::try_weeks(weeks).ok_or_else(out_of_range)?;
        Ok(Self {
            start: self.start.checked_add_signed(delta).ok_or_else(out_of_range)?,
            end: self.end.checked_add_signed(delta).ok_or_else(out_of_range)?,
        })
    }

    /// Whether `instant` falls inside the window
    #[must_use]
    pub fn contains(&self, instant: &DateTime<Local>) -> bool {
        let local = instant.naive_local();
        self.start <= local && local <= self.end
    }

    /// Entries inside the window, in insertion order
    #[must_use]
    pub fn filter<'a>(&self, entries: &'a [JournalEntry]) -> Vec<&'a JournalEntry> {
        entries.iter().filter(|entry| self.contains(&entry.date)).collect()
    }

    /// Human-readable range, e.g. `Apr 27 – May 3, 2025`
    #[must_use]
    pub fn label(&self) -> String {
        let start = self.start.date();
        let end = self.end.date();
        if start.year() == end.year() {
            format!("{} – {}, {}", start.format("%b %-d"), end.format("%b %-d"), end.year())
        } else {
            format!("{} – {}", start.format("%b %-d, %Y"), end.format("%b %-d, %Y"))
        }
    }
}

/// Number of entries per mood
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoodCounts {
    /// Positive entries
    pub positive: usize,
    /// Neutral entries
    pub neutral: usize,
    /// Negative entries
    pub negative: usize,
}

impl MoodCounts {
    /// Count moods over any sequence of entries
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a JournalEntry>,
    {
        entries.into_iter().fold(Self::default(), |mut counts, entry| {
            counts.add(entry.mood);
            counts
        })
    }

    /// Count one more entry of `mood`
    pub fn add(&mut self, mood: Mood) {
        match mood {
            Mood::Positive => self.positive += 1,
            Mood::Neutral => self.neutral += 1,
            Mood::Negative => self.negative += 1,
        }
    }

    /// Count for a single mood
    #[must_use]
    pub const fn get(&self, mood: Mood) -> usize {
        match mood {
            Mood::Positive => self.positive,
            Mood::Neutral => self.neutral,
            Mood::Negative => self.negative,
        }
    }

    /// Total number of entries counted
    #[must_use]
    pub const fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Rounded share of each mood
    #[must_use]
    pub fn percentages(&self) -> MoodPercentages {
        let total = self.total();
        MoodPercentages {
            positive: percentage(self.positive, total),
            neutral: percentage(self.neutral, total),
            negative: percentage(self.negative, total),
        }
    }
}

/// Rounded percentage of each mood
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoodPercentages {
    /// Share of positive entries
    pub positive: u32,
    /// Share of neutral entries
    pub neutral: u32,
    /// Share of negative entries
    pub negative: u32,
}

impl MoodPercentages {
    /// Percentage for a single mood
    #[must_use]
    pub const fn get(&self, mood: Mood) -> u32 {
        match mood {
            Mood::Positive => self.positive,
            Mood::Neutral => self.neutral,
            Mood::Negative => self.negative,
        }
    }
}

/// `round(count / max(total, 1) * 100)`; an empty total yields 0
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percentage(count: usize, total: usize) -> u32 {
    let divisor = total.max(1) as f64;
    ((count as f64 / divisor) * 100.0).round() as u32
}

/// Mood counts for the entries inside `window`
#[must_use]
pub fn window_counts(entries: &[JournalEntry], window: &DateWindow) -> MoodCounts {
    MoodCounts::from_entries(entries.iter().filter(|entry| window.contains(&entry.date)))
}

/// Range a stats summary covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// The week holding today
    Week,
    /// The calendar month holding today
    Month,
    /// Every stored entry
    All,
}

impl std::str::FromStr for Period {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "all" => Ok(Self::All),
            other => Err(JournalError::InvalidInput(format!("Unknown period: {other}"))),
        }
    }
}

/// Counts and percentages for a period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodSummary {
    /// Period summarised
    pub period: Period,
    /// Entries per mood
    pub counts: MoodCounts,
    /// Rounded shares
    pub percentages: MoodPercentages,
}

impl MoodSummary {
    /// Summarise `entries` over `period` relative to `today`
    pub fn compute(entries: &[JournalEntry], period: Period, today: NaiveDate) -> Result<Self> {
        let counts = match period {
            Period::Week => window_counts(entries, &DateWindow::week_containing(today)),
            Period::Month => window_counts(entries, &DateWindow::month(today.year(), today.month())?),
            Period::All => MoodCounts::from_entries(entries),
        };
        Ok(Self {
            period,
            counts,
            percentages: counts.percentages(),
        })
    }
}

/// This week against last week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekComparison {
    /// Counts for the week holding today
    pub current: MoodCounts,
    /// Counts for the week before
    pub previous: MoodCounts,
    /// Change in rounded positive percentage, in points
    pub delta: i64,
}

impl WeekComparison {
    /// Compare the week holding `today` with the one before it
    pub fn compute(entries: &[JournalEntry], today: NaiveDate) -> Result<Self> {
        let this_week = DateWindow::week_containing(today);
        let current = window_counts(entries, &this_week);
        let previous = window_counts(entries, &this_week.shift_weeks(-1)?);
        let delta = i64::from(current.percentages().positive) - i64::from(previous.percentages().positive);
        Ok(Self {
            current,
            previous,
            delta,
        })
    }

    /// Sentence describing the change
    #[must_use]
    pub fn summary(&self) -> String {
        match self.delta.cmp(&0) {
            std::cmp::Ordering::Greater => format!("{}% happier this week", self.delta),
            std::cmp::Ordering::Less => format!("{}% less happy this week", self.delta.abs()),
            std::cmp::Ordering::Equal => "No change in happiness this week".to_string(),
        }
    }

    /// Emoji for the direction of the change
    #[must_use]
    pub const fn trend_emoji(&self) -> &'static str {
        if self.delta > 0 {
            "😊"
        } else if self.delta < 0 {
            "☹️"
        } else {
            "😐"
        }
    }
}

/// One bar of the weekly chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBar {
    /// Day of the week
    pub weekday: Weekday,
    /// Single-letter label (S, M, T, W, T, F, S)
    pub label: char,
    /// Mood written that day, `None` if there is no entry
    pub mood: Option<Mood>,
}

impl DayBar {
    /// Bar colour; a missing day uses the "no entry" colour
    #[must_use]
    pub fn color(&self) -> &'static str {
        self.mood.map_or(NO_ENTRY_COLOR, Mood::color)
    }
}

const WEEK_ORDER: [(Weekday, char); 7] = [
    (Weekday::Sun, 'S'),
    (Weekday::Mon, 'M'),
    (Weekday::Tue, 'T'),
    (Weekday::Wed, 'W'),
    (Weekday::Thu, 'T'),
    (Weekday::Fri, 'F'),
    (Weekday::Sat, 'S'),
];

/// Seven bars, Sunday first; the last entry on a weekday wins
#[must_use]
pub fn week_bars(entries: &[JournalEntry], window: &DateWindow) -> Vec<DayBar> {
    let mut by_weekday: HashMap<Weekday, Mood> = HashMap::new();
    for entry in window.filter(entries) {
        by_weekday.insert(entry.date.weekday(), entry.mood);
    }

    WEEK_ORDER
        .iter()
        .map(|&(weekday, label)| DayBar {
            weekday,
            label,
            mood: by_weekday.get(&weekday).copied(),
        })
        .collect()
}

/// A cell of the month calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    /// Padding before the first or after the last day
    Empty,
    /// A day of the month
    Day {
        /// Calendar date
        date: NaiveDate,
        /// Mood written that day, if any
        mood: Option<Mood>,
    },
}

impl CalendarCell {
    /// Cell colour; padding has none
    #[must_use]
    pub fn color(&self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::Day { mood, .. } => Some(mood.map_or(NO_ENTRY_COLOR, Mood::color)),
        }
    }
}

/// Seven-column month grid starting on Sunday
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCalendar {
    /// Calendar year
    pub year: i32,
    /// Calendar month (1-12)
    pub month: u32,
    /// Cells row by row; the length is a multiple of seven
    pub cells: Vec<CalendarCell>,
}

impl MonthCalendar {
    /// Lay out `year`-`month` and colour each day by the mood written on it
    pub fn build(year: i32, month: u32, entries: &[JournalEntry]) -> Result<Self> {
        let invalid = || JournalError::InvalidDate(format!("{year}-{month:02}"));
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let length = days_in_month(year, month).ok_or_else(invalid)?;

        // Keyed by calendar date; later entries overwrite earlier ones.
        let mut by_date: HashMap<NaiveDate, Mood> = HashMap::new();
        for entry in entries {
            by_date.insert(entry.local_date(), entry.mood);
        }

        let leading = first.weekday().num_days_from_sunday() as usize;
        let mut cells = vec![CalendarCell::Empty; leading];
        for day in 1..=length {
            let date = first.with_day(day).ok_or_else(invalid)?;
            cells.push(CalendarCell::Day {
                date,
                mood: by_date.get(&date).copied(),
            });
        }
        let trailing = (7 - cells.len() % 7) % 7;
        cells.extend(std::iter::repeat(CalendarCell::Empty).take(trailing));

        Ok(Self { year, month, cells })
    }

    /// Rows of seven cells
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }

    /// Month heading, e.g. `April 2025`
    #[must_use]
    pub fn title(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map_or_else(|| format!("{}-{:02}", self.year, self.month), |d| d.format("%B %Y").to_string())
    }
}

/// Entries for today and the two days before
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentEntries<'a> {
    /// Entry written today
    pub today: Option<&'a JournalEntry>,
    /// Entry written yesterday
    pub yesterday: Option<&'a JournalEntry>,
    /// Entry written two days ago
    pub two_days_ago: Option<&'a JournalEntry>,
}

impl<'a> RecentEntries<'a> {
    /// Look up the three most recent calendar days
    #[must_use]
    pub fn lookup(entries: &'a [JournalEntry], today: NaiveDate) -> Self {
        let on = |days_back: u64| {
            let date = today.checked_sub_days(Days::new(days_back))?;
            entries.iter().find(|entry| entry.local_date() == date)
        };
        Self {
            today: on(0),
            yesterday: on(1),
            two_days_ago: on(2),
        }
    }

    /// Whether any of the three days has an entry
    #[must_use]
    pub const fn any(&self) -> bool {
        self.today.is_some() || self.yesterday.is_some() || self.two_days_ago.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_week_label_spans_months() {
        let window = DateWindow::week_containing(NaiveDate::from_ymd_opt(2025, 4, 30).expect("valid date"));
        assert_eq!(window.label(), "Apr 27 – May 3, 2025");
    }

    #[test]
    fn test_summary_wording() {
        let mut comparison = WeekComparison {
            current: MoodCounts::default(),
            previous: MoodCounts::default(),
            delta: 25,
        };
        assert_eq!(comparison.summary(), "25% happier this week");
        comparison.delta = -10;
        assert_eq!(comparison.summary(), "10% less happy this week");
        comparison.delta = 0;
        assert_eq!(comparison.summary(), "No change in happiness this week");
    }
}
