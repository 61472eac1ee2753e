//! Example entries written on the very first run.

use chrono::{Days, NaiveDate, NaiveTime};

use crate::error::Result;
use crate::models::{JournalEntry, Mood};
use crate::utils::{local_from_naive, start_of_week};

const EXAMPLE_WEEK: [(Mood, &str, &str); 7] = [
    (Mood::Positive, "😄", "Had a relaxing day with family and enjoyed a nice walk in the park."),
    (Mood::Negative, "😔", "Felt a bit overwhelmed with work, but managed to get through it."),
    (Mood::Positive, "😊", "Productive day! Finished a project and treated myself to coffee."),
    (Mood::Negative, "😕", "Had some disagreements at work, but resolved them by evening."),
    (Mood::Positive, "😁", "Went out with friends and had a lot of laughs. Much needed!"),
    (Mood::Positive, "😌", "Wrapped up the week on a good note and watched a movie at home."),
    (Mood::Negative, "😴", "Felt tired most of the day, but took time to rest and recharge."),
];

/// One example entry per day, Sunday through Saturday, of the week before
/// the one containing `today`, each written at 20:00 local time.
pub fn example_week(today: NaiveDate) -> Result<Vec<JournalEntry>> {
    let this_sunday = start_of_week(today);
    let last_sunday = this_sunday.checked_sub_days(Days::new(7)).unwrap_or(this_sunday);
    let evening = NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN);

    EXAMPLE_WEEK
        .iter()
        .zip(0_u64..)
        .map(|(&(mood, emoji, text), offset)| {
            let day = last_sunday.checked_add_days(Days::new(offset)).unwrap_or(last_sunday);
            let date = local_from_naive(day.and_time(evening))?;
            Ok(JournalEntry::new(date, text, mood, emoji))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};

    #[test]
    fn test_example_week_covers_previous_week() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 1).expect("valid date");
        let entries = example_week(today).expect("seed entries");

        assert_eq!(entries.len(), 7);
        assert_eq!(entries[0].local_date(), NaiveDate::from_ymd_opt(2025, 4, 20).expect("valid date"));
        assert_eq!(entries[0].date.weekday(), Weekday::Sun);
        assert_eq!(entries[6].day, "Saturday");
        assert!(entries.iter().all(|e| e.local_date() < NaiveDate::from_ymd_opt(2025, 4, 27).expect("valid date")));
    }
}
