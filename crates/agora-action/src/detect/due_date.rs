//! Lightweight calendar-phrase resolution.
//!
//! Turns phrases like "by March 15" or "next friday" into concrete
//! timestamps. Resolution is relative to a caller-supplied date so the
//! same text always resolves the same way for a given day.

use std::sync::OnceLock;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;

use agora_core::types::Timestamp;

fn month_day_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:by|due|deadline)\s+([a-zA-Z]+)\s+(\d{1,2})\b")
            .expect("Invalid month-day regex")
    })
}

fn relative_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:next|this)\s+(week|month|monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
        )
        .expect("Invalid relative-date regex")
    })
}

fn parse_month(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let months = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    months
        .iter()
        .position(|m| lower == **m || (lower.len() == 3 && m.starts_with(&lower)))
        .map(|i| i as u32 + 1)
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    match name.to_lowercase().as_str() {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Resolve the first due-date phrase in `text` against `today`.
///
/// Month-day phrases resolve to the current year, or the next year when
/// the date has already passed. Relative phrases: a week is seven days
/// out, a month thirty, and a weekday the next occurrence of that day.
pub fn resolve(text: &str, today: NaiveDate) -> Option<Timestamp> {
    if let Some(caps) = month_day_re().captures(text) {
        let month = parse_month(&caps[1]);
        let day: Option<u32> = caps[2].parse().ok();
        if let (Some(month), Some(day)) = (month, day) {
            let this_year = NaiveDate::from_ymd_opt(today.year(), month, day);
            if let Some(date) = this_year {
                let date = if date < today {
                    NaiveDate::from_ymd_opt(today.year() + 1, month, day)?
                } else {
                    date
                };
                return Some(Timestamp::from_date(date));
            }
        }
    }

    if let Some(caps) = relative_re().captures(text) {
        let word = caps[1].to_lowercase();
        let date = match word.as_str() {
            "week" => today + Duration::days(7),
            "month" => today + Duration::days(30),
            _ => {
                let target = parse_weekday(&word)?;
                let mut ahead = (target.num_days_from_monday() as i64
                    - today.weekday().num_days_from_monday() as i64)
                    .rem_euclid(7);
                if ahead == 0 {
                    ahead = 7;
                }
                today + Duration::days(ahead)
            }
        };
        return Some(Timestamp::from_date(date));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_by_month_day_this_year() {
        let today = day(2025, 3, 1);
        let ts = resolve("finish the mural by March 15", today).unwrap();
        assert_eq!(ts.to_datetime().date_naive(), day(2025, 3, 15));
    }

    #[test]
    fn test_past_month_day_rolls_to_next_year() {
        let today = day(2025, 6, 1);
        let ts = resolve("report is due January 10", today).unwrap();
        assert_eq!(ts.to_datetime().date_naive(), day(2026, 1, 10));
    }

    #[test]
    fn test_three_letter_month_abbreviation() {
        let today = day(2025, 3, 1);
        let ts = resolve("deadline Sep 3 for grant applications", today).unwrap();
        assert_eq!(ts.to_datetime().date_naive(), day(2025, 9, 3));
    }

    #[test]
    fn test_today_is_not_rolled_over() {
        let today = day(2025, 3, 15);
        let ts = resolve("submit by March 15", today).unwrap();
        assert_eq!(ts.to_datetime().date_naive(), day(2025, 3, 15));
    }

    #[test]
    fn test_next_week() {
        let today = day(2025, 3, 1);
        let ts = resolve("let's wrap this up next week", today).unwrap();
        assert_eq!(ts.to_datetime().date_naive(), day(2025, 3, 8));
    }

    #[test]
    fn test_this_month() {
        let today = day(2025, 3, 1);
        let ts = resolve("should be done this month", today).unwrap();
        assert_eq!(ts.to_datetime().date_naive(), day(2025, 3, 31));
    }

    #[test]
    fn test_next_friday_from_monday() {
        // 2025-03-03 is a Monday
        let today = day(2025, 3, 3);
        let ts = resolve("bring the signs next friday", today).unwrap();
        assert_eq!(ts.to_datetime().date_naive(), day(2025, 3, 7));
    }

    #[test]
    fn test_next_monday_from_monday_is_a_week_out() {
        let today = day(2025, 3, 3);
        let ts = resolve("see you next monday", today).unwrap();
        assert_eq!(ts.to_datetime().date_naive(), day(2025, 3, 10));
    }

    #[test]
    fn test_month_day_wins_over_relative_phrase() {
        let today = day(2025, 3, 1);
        let ts = resolve("due April 2, or next week at the latest", today).unwrap();
        assert_eq!(ts.to_datetime().date_naive(), day(2025, 4, 2));
    }

    #[test]
    fn test_invalid_day_is_ignored() {
        let today = day(2025, 3, 1);
        // February 31 does not exist and no relative phrase follows
        assert!(resolve("due February 31", today).is_none());
    }

    #[test]
    fn test_no_date_phrase() {
        let today = day(2025, 3, 1);
        assert!(resolve("we should paint the fence", today).is_none());
    }

    #[test]
    fn test_unknown_month_word() {
        let today = day(2025, 3, 1);
        assert!(resolve("due tomorrow 5", today).is_none());
    }
}
