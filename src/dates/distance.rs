// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Signed day distances between a reference day and a date.

use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;

/// How the distance between today and a date is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceMode {
    /// Every calendar day counts.
    #[default]
    Calendar,
    /// Saturdays and Sundays are skipped.
    Business,
}

impl DistanceMode {
    /// Returns the signed distance from `today` to `date`.
    ///
    /// Zero means the same day, negative means `date` is in the past.
    pub fn distance(self, today: NaiveDate, date: NaiveDate) -> i64 {
        match self {
            DistanceMode::Calendar => calendar_days_between(today, date),
            DistanceMode::Business => business_days_between(today, date),
        }
    }
}

/// Returns the local date, with the time of day dropped.
///
/// Callers read this once per update; it is never cached, as a document may
/// stay open across midnight.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Number of calendar days from `today` to `date`.
pub fn calendar_days_between(today: NaiveDate, date: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}

/// Number of weekdays from `today` to `date`, excluding the earlier day itself
/// and including the later one.
///
/// Friday to the following Monday is 1; Monday back to the previous Friday is -1.
pub fn business_days_between(today: NaiveDate, date: NaiveDate) -> i64 {
    let (earlier, later, sign) = if date >= today { (today, date, 1) } else { (date, today, -1) };
    let span = later.signed_duration_since(earlier).num_days();

    // Every run of seven consecutive days holds exactly five weekdays.
    let full_weeks = span / 7;
    let first = i64::from(earlier.weekday().num_days_from_monday());
    let remainder = (1..=span % 7).filter(|offset| (first + offset) % 7 < 5).count() as i64;

    sign * (full_weeks * 5 + remainder)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Day-by-day reference count.
    fn slow_business_days(today: NaiveDate, date: NaiveDate) -> i64 {
        let (earlier, later, sign) = if date >= today { (today, date, 1) } else { (date, today, -1) };
        let count = earlier
            .iter_days()
            .skip(1)
            .take_while(|d| *d <= later)
            .filter(|d| d.weekday().num_days_from_monday() < 5)
            .count() as i64;
        sign * count
    }

    #[test]
    fn test_calendar_distance() {
        let today = ymd(2024, 6, 15);
        assert_eq!(calendar_days_between(today, today), 0);
        assert_eq!(calendar_days_between(today, ymd(2024, 6, 16)), 1);
        assert_eq!(calendar_days_between(today, ymd(2024, 6, 14)), -1);
        assert_eq!(calendar_days_between(today, ymd(2024, 8, 3)), 49);
        assert_eq!(calendar_days_between(ymd(2024, 2, 28), ymd(2024, 3, 1)), 2);
        assert_eq!(calendar_days_between(ymd(2023, 12, 31), ymd(2025, 1, 1)), 367);
    }

    #[test]
    fn test_business_distance_over_weekend() {
        let friday = ymd(2024, 6, 14);
        let saturday = ymd(2024, 6, 15);
        let sunday = ymd(2024, 6, 16);
        let monday = ymd(2024, 6, 17);

        assert_eq!(business_days_between(friday, monday), 1);
        assert_eq!(business_days_between(monday, friday), -1);
        assert_eq!(business_days_between(friday, saturday), 0);
        assert_eq!(business_days_between(friday, sunday), 0);
        assert_eq!(business_days_between(saturday, monday), 1);
        assert_eq!(business_days_between(monday, monday), 0);
    }

    #[test]
    fn test_business_distance_full_weeks() {
        let monday = ymd(2024, 6, 17);
        assert_eq!(business_days_between(monday, ymd(2024, 6, 24)), 5);
        assert_eq!(business_days_between(monday, ymd(2024, 7, 1)), 10);
        assert_eq!(business_days_between(ymd(2024, 7, 1), monday), -10);
    }

    #[test]
    fn test_business_distance_matches_day_count() {
        let start = ymd(2024, 1, 1);
        for offset in 0..40 {
            let today = start + chrono::Duration::days(offset % 7);
            let date = start + chrono::Duration::days(offset);
            assert_eq!(
                business_days_between(today, date),
                slow_business_days(today, date),
                "{today} -> {date}"
            );
            assert_eq!(
                business_days_between(date, today),
                slow_business_days(date, today),
                "{date} -> {today}"
            );
        }
    }

    #[test]
    fn test_distance_mode() {
        let friday = ymd(2024, 6, 14);
        let monday = ymd(2024, 6, 17);
        assert_eq!(DistanceMode::Calendar.distance(friday, monday), 3);
        assert_eq!(DistanceMode::Business.distance(friday, monday), 1);
        assert_eq!(DistanceMode::default(), DistanceMode::Calendar);
    }

    #[test]
    fn test_local_today_has_no_time() {
        let today = local_today();
        assert_eq!(calendar_days_between(today, today), 0);
    }
}
