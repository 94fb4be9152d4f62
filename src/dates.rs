//! Calendar helpers shared by the strategy and assembler nodes.
//!
//! Weekday indices follow the 0 = Sunday .. 6 = Saturday convention used by
//! the plan documents.

use chrono::{Datelike, Duration, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Weekday of `date` on the 0=Sunday..6=Saturday scale.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Picks the first calendar date the plan starts on.
///
/// With `today` being the weekday of the current date and `minDay`/`maxDay`
/// the extremes of the scheduled weekdays:
/// - all training days already passed this week -> first training day of
///   next week;
/// - today is a training day -> today;
/// - the week's first training day is still ahead -> that day;
/// - otherwise -> the next scheduled day after today.
///
/// `training_days` must be non-empty (guaranteed by plan validation).
pub fn compute_start_date(today: NaiveDate, training_days: &[u8]) -> NaiveDate {
    let today_idx = weekday_index(today);
    let min_day = *training_days.iter().min().expect("non-empty training days");
    let max_day = *training_days.iter().max().expect("non-empty training days");

    if today_idx > max_day {
        let offset = (7 - today_idx + min_day) % 7;
        return today + Duration::days(offset as i64);
    }
    if training_days.contains(&today_idx) {
        return today;
    }
    if today_idx < min_day {
        return today + Duration::days((min_day - today_idx) as i64);
    }
    let next_day = training_days
        .iter()
        .copied()
        .filter(|d| *d > today_idx)
        .min()
        .expect("a later training day exists when today <= maxDay");
    today + Duration::days((next_day - today_idx) as i64)
}

/// Date of the session scheduled on weekday `target_day`, counted forward
/// from `start_date`. Always lands inside `[start_date, start_date + 6]`.
pub fn session_date(start_date: NaiveDate, target_day: u8) -> NaiveDate {
    let delta = (7 + target_day - weekday_index(start_date)) % 7;
    start_date + Duration::days(delta as i64)
}
