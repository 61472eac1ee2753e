//! Tests for week and month aggregation

mod common;

use common::{at, date, entry};
use mood_journal::aggregate::{
    percentage, week_bars, window_counts, CalendarCell, DateWindow, MonthCalendar, MoodCounts, MoodSummary, Period,
    RecentEntries, WeekComparison,
};
use mood_journal::error::JournalError;
use mood_journal::models::{Mood, NEGATIVE_COLOR, NO_ENTRY_COLOR, POSITIVE_COLOR};
use mood_journal::utils::local_from_naive;

#[test]
fn test_week_starts_sunday_midnight() {
    let window = DateWindow::week_containing(date(2025, 4, 30));
    assert_eq!(window.start, date(2025, 4, 27).and_hms_opt(0, 0, 0).expect("valid time"));
    assert_eq!(
        window.end,
        date(2025, 5, 3).and_hms_milli_opt(23, 59, 59, 999).expect("valid time")
    );
}

#[test]
fn test_week_boundaries_inclusive() {
    let window = DateWindow::week_containing(date(2025, 4, 30));

    let sunday_midnight = at(2025, 4, 27, 0, 0, 0);
    let saturday_last_ms = local_from_naive(
        date(2025, 4, 26)
            .and_hms_milli_opt(23, 59, 59, 999)
            .expect("valid time"),
    )
    .expect("local time");
    let next_saturday_night = local_from_naive(
        date(2025, 5, 3)
            .and_hms_milli_opt(23, 59, 59, 999)
            .expect("valid time"),
    )
    .expect("local time");

    assert!(window.contains(&sunday_midnight));
    assert!(!window.contains(&saturday_last_ms));
    assert!(window.contains(&next_saturday_night));
    assert!(!window.contains(&at(2025, 5, 4, 0, 0, 0)));
}

#[test]
fn test_week_counts_and_percentages() {
    let entries = vec![
        entry(at(2025, 4, 27, 0, 0, 0), Mood::Positive),
        entry(at(2025, 4, 28, 21, 30, 0), Mood::Negative),
        entry(at(2025, 4, 26, 23, 59, 59), Mood::Positive),
    ];

    let counts = window_counts(&entries, &DateWindow::week_containing(date(2025, 4, 30)));
    assert_eq!(counts.get(Mood::Positive), 1);
    assert_eq!(counts.get(Mood::Neutral), 0);
    assert_eq!(counts.get(Mood::Negative), 1);
    assert_eq!(counts.total(), 2);

    let shares = counts.percentages();
    assert_eq!(shares.get(Mood::Positive), 50);
    assert_eq!(shares.get(Mood::Neutral), 0);
    assert_eq!(shares.get(Mood::Negative), 50);
}

#[test]
fn test_empty_window_reports_zero_percent() {
    let counts = window_counts(&[], &DateWindow::week_containing(date(2025, 4, 30)));
    assert_eq!(counts.total(), 0);
    for mood in Mood::ALL {
        assert_eq!(counts.percentages().get(mood), 0);
    }
}

#[test]
fn test_percentage_rounds_half_up() {
    assert_eq!(percentage(0, 0), 0);
    assert_eq!(percentage(1, 3), 33);
    assert_eq!(percentage(2, 3), 67);
    assert_eq!(percentage(1, 8), 13);
    assert_eq!(percentage(7, 7), 100);
}

#[test]
fn test_week_offset_pages_back() {
    let today = date(2025, 4, 30);
    let previous = DateWindow::week_with_offset(today, -1).expect("window");
    assert_eq!(previous.start.date(), date(2025, 4, 20));
    assert_eq!(previous.end.date(), date(2025, 4, 26));
}

#[test]
fn test_week_offset_out_of_range_is_error() {
    let today = date(2025, 4, 30);
    assert!(matches!(
        DateWindow::week_with_offset(today, 100_000_000),
        Err(JournalError::InvalidDate(_))
    ));
    assert!(matches!(
        DateWindow::week_containing(today).shift_weeks(i64::MAX),
        Err(JournalError::InvalidDate(_))
    ));
    assert!(matches!(
        DateWindow::week_containing(today).shift_weeks(i64::MIN),
        Err(JournalError::InvalidDate(_))
    ));
}

#[test]
fn test_week_label() {
    assert_eq!(DateWindow::week_containing(date(2025, 4, 30)).label(), "Apr 27 – May 3, 2025");
    assert_eq!(
        DateWindow::week_containing(date(2025, 12, 30)).label(),
        "Dec 28, 2025 – Jan 3, 2026"
    );
}

#[test]
fn test_month_window() {
    let window = DateWindow::month(2024, 2).expect("valid month");
    assert_eq!(window.start.date(), date(2024, 2, 1));
    assert_eq!(window.end.date(), date(2024, 2, 29));
    assert!(DateWindow::month(2024, 13).is_err());
}

#[test]
fn test_summary_periods() {
    let today = date(2025, 4, 30);
    let entries = vec![
        entry(at(2025, 4, 2, 20, 0, 0), Mood::Neutral),
        entry(at(2025, 4, 28, 20, 0, 0), Mood::Positive),
        entry(at(2025, 3, 15, 20, 0, 0), Mood::Negative),
    ];

    let week = MoodSummary::compute(&entries, Period::Week, today).expect("summary");
    assert_eq!(week.counts.total(), 1);
    assert_eq!(week.percentages.get(Mood::Positive), 100);

    let month = MoodSummary::compute(&entries, Period::Month, today).expect("summary");
    assert_eq!(month.counts.total(), 2);
    assert_eq!(month.percentages.get(Mood::Neutral), 50);

    let all = MoodSummary::compute(&entries, Period::All, today).expect("summary");
    assert_eq!(all.counts, MoodCounts::from_entries(&entries));
    assert_eq!(all.counts.total(), 3);
}

#[test]
fn test_period_parsing() {
    assert_eq!("Week".parse::<Period>().expect("period"), Period::Week);
    assert_eq!("month".parse::<Period>().expect("period"), Period::Month);
    assert_eq!("all".parse::<Period>().expect("period"), Period::All);
    assert!("year".parse::<Period>().is_err());
}

#[test]
fn test_week_comparison_less_happy() {
    let today = date(2025, 4, 30);
    let entries = vec![
        entry(at(2025, 4, 22, 20, 0, 0), Mood::Positive),
        entry(at(2025, 4, 27, 20, 0, 0), Mood::Positive),
        entry(at(2025, 4, 28, 20, 0, 0), Mood::Negative),
    ];

    let comparison = WeekComparison::compute(&entries, today).expect("comparison");
    assert_eq!(comparison.delta, -50);
    assert_eq!(comparison.summary(), "50% less happy this week");
    assert_eq!(comparison.trend_emoji(), "☹️");
}

#[test]
fn test_week_comparison_happier_and_unchanged() {
    let today = date(2025, 4, 30);
    let happier = vec![entry(at(2025, 4, 29, 20, 0, 0), Mood::Positive)];
    let comparison = WeekComparison::compute(&happier, today).expect("comparison");
    assert_eq!(comparison.delta, 100);
    assert_eq!(comparison.summary(), "100% happier this week");
    assert_eq!(comparison.trend_emoji(), "😊");

    let unchanged = WeekComparison::compute(&[], today).expect("comparison");
    assert_eq!(unchanged.delta, 0);
    assert_eq!(unchanged.summary(), "No change in happiness this week");
    assert_eq!(unchanged.trend_emoji(), "😐");
}

#[test]
fn test_week_bars_sunday_first() {
    let window = DateWindow::week_containing(date(2025, 4, 30));
    let entries = vec![
        entry(at(2025, 4, 27, 9, 0, 0), Mood::Positive),
        entry(at(2025, 4, 29, 9, 0, 0), Mood::Negative),
    ];

    let bars = week_bars(&entries, &window);
    let labels: String = bars.iter().map(|bar| bar.label).collect();
    assert_eq!(labels, "SMTWTFS");
    assert_eq!(bars[0].mood, Some(Mood::Positive));
    assert_eq!(bars[0].color(), POSITIVE_COLOR);
    assert_eq!(bars[1].mood, None);
    assert_eq!(bars[1].color(), NO_ENTRY_COLOR);
    assert_eq!(bars[2].color(), NEGATIVE_COLOR);
}

#[test]
fn test_month_calendar_padding() {
    // April 2025 starts on a Tuesday and has 30 days.
    let entries = vec![entry(at(2025, 4, 10, 20, 0, 0), Mood::Positive)];
    let calendar = MonthCalendar::build(2025, 4, &entries).expect("calendar");

    assert_eq!(calendar.cells.len(), 35);
    assert_eq!(calendar.weeks().count(), 5);
    assert_eq!(calendar.cells[0], CalendarCell::Empty);
    assert_eq!(calendar.cells[1], CalendarCell::Empty);
    assert_eq!(
        calendar.cells[2],
        CalendarCell::Day {
            date: date(2025, 4, 1),
            mood: None
        }
    );
    assert_eq!(calendar.cells[11].color(), Some(POSITIVE_COLOR));
    assert_eq!(calendar.cells[2].color(), Some(NO_ENTRY_COLOR));
    assert_eq!(calendar.cells[34], CalendarCell::Empty);
    assert_eq!(calendar.cells[34].color(), None);
    assert_eq!(calendar.title(), "April 2025");
}

#[test]
fn test_month_calendar_without_padding() {
    // February 2026 starts on a Sunday and fills exactly four rows.
    let calendar = MonthCalendar::build(2026, 2, &[]).expect("calendar");
    assert_eq!(calendar.cells.len(), 28);
    assert!(calendar.cells.iter().all(|cell| *cell != CalendarCell::Empty));
}

#[test]
fn test_month_calendar_rejects_bad_month() {
    assert!(MonthCalendar::build(2025, 0, &[]).is_err());
}

#[test]
fn test_recent_entries() {
    let today = date(2025, 4, 30);
    let entries = vec![
        entry(at(2025, 4, 28, 20, 0, 0), Mood::Neutral),
        entry(at(2025, 4, 30, 8, 0, 0), Mood::Positive),
    ];

    let recent = RecentEntries::lookup(&entries, today);
    assert!(recent.any());
    assert_eq!(recent.today.map(|e| e.mood), Some(Mood::Positive));
    assert!(recent.yesterday.is_none());
    assert_eq!(recent.two_days_ago.map(|e| e.mood), Some(Mood::Neutral));

    assert!(!RecentEntries::lookup(&[], today).any());
}

#[test]
fn test_day_window() {
    let window = DateWindow::day(date(2025, 4, 28));
    let entries = vec![
        entry(at(2025, 4, 28, 0, 0, 0), Mood::Neutral),
        entry(at(2025, 4, 28, 23, 59, 59), Mood::Positive),
        entry(at(2025, 4, 29, 0, 0, 0), Mood::Negative),
    ];

    let inside = window.filter(&entries);
    assert_eq!(inside.len(), 2);
    assert_eq!(inside[1].mood, Mood::Positive);
}
