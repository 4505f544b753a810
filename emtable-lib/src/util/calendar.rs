//! Day-level comparison and date conversions.

use std::cmp::Ordering;

use chrono::Datelike;
use chrono::NaiveDate;
use chrono::NaiveDateTime;

use crate::model::DateOffset;
use crate::model::Day;

/// Compares two optional days by `(year, month, day)`; a missing day sorts
/// first.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use emtable_lib::model::Day;
/// use emtable_lib::util::calendar::compare_day;
///
/// let day = Day::new(2024, 5, 1);
/// assert_eq!(compare_day(None, Some(&day)), Ordering::Less);
/// assert_eq!(compare_day(Some(&day), Some(&Day::new(2024, 4, 30))), Ordering::Greater);
/// ```
pub fn compare_day(a: Option<&Day>, b: Option<&Day>) -> Ordering {
    a.cmp(&b)
}

/// The calendar day of a date-time; the time of day is dropped.
pub fn date_to_day(date: &NaiveDateTime) -> Day {
    Day::new(date.year(), date.month(), date.day())
}

/// Midnight at the start of a day, `None` if the day does not exist.
pub fn day_to_date(day: &Day) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(day.year, day.month, day.day).and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// The wall-clock calendar day of a date offset; time and offset are ignored.
pub fn date_offset_to_day(offset: &DateOffset) -> Day {
    Day::new(offset.year(), offset.month(), offset.day())
}
