//! Date-time with an explicit UTC offset

use std::cmp::Ordering;
use std::sync::LazyLock;

use chrono::DateTime;
use chrono::Datelike;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::TimeDelta;
use chrono::Timelike;
use chrono::Utc;
use regex::Regex;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::error::DateOffsetError;

const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;
const MIN_DAY: u32 = 1;
const MIN_MONTH: u32 = 1;
const MONTHS_IN_YEAR: u32 = 12;
const MINUTES_IN_HOUR: i32 = 60;
const MS_IN_SECOND: i64 = 1000;
const MS_IN_MINUTE: i64 = 60 * MS_IN_SECOND;
const MS_IN_HOUR: i64 = 60 * MS_IN_MINUTE;

/// Milliseconds in one day, the largest shift [`DateOffset::add`] accepts.
pub const MS_IN_DAY: i64 = 24 * MS_IN_HOUR;

static ISO_DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-([01]\d)-([0-3]\d)T([0-2]\d):([0-5]\d):([0-5]\d)(?:([+-])([0-2]\d):([0-5]\d)|Z)$")
        .expect("ISO date-time pattern is valid")
});

/// A moment stored as wall-clock calendar fields plus the UTC offset they
/// were recorded in.
///
/// Rows often carry the offset of the system that produced them and must be
/// displayed in that offset's wall-clock time rather than the viewer's, so
/// the fields are kept denormalized instead of collapsing to an instant.
/// Use [`DateOffset::to_instant`] whenever values with different offsets must
/// be ordered against each other.
///
/// An offset of `None` means the value was written with the `Z` designator;
/// it is treated as UTC.
///
/// Values are immutable apart from [`add`](DateOffset::add) and
/// [`set_to_instant`](DateOffset::set_to_instant), which shift the fields in
/// place.
///
/// # Example
///
/// ```
/// use emtable_lib::model::DateOffset;
///
/// let value = DateOffset::parse("2024-03-10T23:30:00+02:00").unwrap();
/// assert_eq!(value.hours(), 23);
/// assert_eq!(value.to_instant().to_rfc3339(), "2024-03-10T21:30:00+00:00");
/// assert_eq!(value.to_string(), "2024-03-10T23:30:00+02:00");
///
/// assert!(DateOffset::parse("10/03/2024").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateOffset {
    year: i32,
    month: u32,
    day: u32,
    hours: u32,
    minutes: u32,
    seconds: u32,
    offset_minutes: Option<i32>,
}

impl DateOffset {
    /// Creates a date offset from its fields.
    ///
    /// Returns `None` when the fields do not describe a real calendar date and
    /// time of day, when the year is outside 0000-9999, or when the offset is
    /// a day or more.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hours: u32,
        minutes: u32,
        seconds: u32,
        offset_minutes: Option<i32>,
    ) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hours, minutes, seconds)?;
        if offset_minutes.is_some_and(|offset| offset.abs() >= 24 * MINUTES_IN_HOUR) {
            return None;
        }
        Some(Self {
            year,
            month,
            day,
            hours,
            minutes,
            seconds,
            offset_minutes,
        })
    }

    /// Creates a date offset from a wall-clock date-time. Sub-second
    /// precision is dropped.
    ///
    /// Returns `None` under the same conditions as [`new`](Self::new).
    pub fn from_local(local: NaiveDateTime, offset_minutes: Option<i32>) -> Option<Self> {
        Self::new(
            local.year(),
            local.month(),
            local.day(),
            local.hour(),
            local.minute(),
            local.second(),
            offset_minutes,
        )
    }

    /// Creates a date offset for the current instant, expressed in the
    /// wall-clock time of the given offset.
    pub fn now(offset_minutes: i32) -> Self {
        let local = Utc::now().naive_utc() + TimeDelta::minutes(i64::from(offset_minutes));
        Self {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hours: local.hour(),
            minutes: local.minute(),
            seconds: local.second(),
            offset_minutes: Some(offset_minutes),
        }
    }

    /// Parses `YYYY-MM-DDTHH:MM:SS` followed by `Z` or `±HH:MM`.
    ///
    /// Unparseable input yields `None`; callers treat it as absent data.
    pub fn parse(value: &str) -> Option<Self> {
        let caps = ISO_DATE_TIME.captures(value.trim())?;
        let num = |idx: usize| caps.get(idx).and_then(|m| m.as_str().parse::<u32>().ok());

        let offset_minutes = match caps.get(7) {
            Some(sign) => {
                let hours = num(8)? as i32;
                let minutes = num(9)? as i32;
                let magnitude = hours * MINUTES_IN_HOUR + minutes;
                Some(if sign.as_str() == "-" { -magnitude } else { magnitude })
            }
            None => None,
        };

        let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
        Self::new(year, num(2)?, num(3)?, num(4)?, num(5)?, num(6)?, offset_minutes)
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month of the year, 1-12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Day of the month.
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Hour of the day, 0-23.
    pub fn hours(&self) -> u32 {
        self.hours
    }

    /// Minute of the hour.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Second of the minute.
    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Offset from UTC in minutes, `None` for the `Z` designator.
    pub fn offset_minutes(&self) -> Option<i32> {
        self.offset_minutes
    }

    /// Wall-clock date-time, ignoring the offset.
    pub fn local(&self) -> NaiveDateTime {
        // fields are validated on construction and only moved by add()
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|date| date.and_hms_opt(self.hours, self.minutes, self.seconds))
            .unwrap_or_default()
    }

    /// The absolute instant this value represents.
    pub fn to_instant(&self) -> DateTime<Utc> {
        let offset = TimeDelta::minutes(i64::from(self.offset_minutes.unwrap_or(0)));
        (self.local() - offset).and_utc()
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp_millis(&self) -> i64 {
        self.to_instant().timestamp_millis()
    }

    /// Orders two values by the instant they represent, regardless of offset.
    pub fn cmp_instant(&self, other: &DateOffset) -> Ordering {
        self.to_instant().cmp(&other.to_instant())
    }

    /// Moves the fields so the value represents `instant`, keeping the offset.
    ///
    /// Shares the ±1 day limit of [`add`](Self::add).
    pub fn set_to_instant(&mut self, instant: DateTime<Utc>) -> Result<(), DateOffsetError> {
        self.add(instant.timestamp_millis() - self.timestamp_millis())
    }

    /// Shifts the wall-clock fields by `delta_ms`, in place.
    ///
    /// A small incrementer: it fails for any shift larger
    /// than one day either way, ignores sub-second precision and does not
    /// account for offset transitions such as DST. A shift of exactly one day
    /// is accepted. A shift that would leave years 0000-9999 fails and
    /// leaves the value unchanged.
    pub fn add(&mut self, delta_ms: i64) -> Result<(), DateOffsetError> {
        if !(-MS_IN_DAY..=MS_IN_DAY).contains(&delta_ms) {
            return Err(DateOffsetError::out_of_range(delta_ms));
        }

        let delta = (delta_ms / MS_IN_SECOND) * MS_IN_SECOND;
        if delta == 0 {
            return Ok(());
        }

        let current = i64::from(self.seconds) * MS_IN_SECOND
            + i64::from(self.minutes) * MS_IN_MINUTE
            + i64::from(self.hours) * MS_IN_HOUR;
        let mut time = current + delta;
        let mut next = *self;

        if time < 0 {
            time += MS_IN_DAY;
            next.decrement_day();
        } else if time >= MS_IN_DAY {
            time -= MS_IN_DAY;
            next.increment_day();
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&next.year) {
            return Err(DateOffsetError::year_out_of_range(next.year));
        }

        next.seconds = ((time / MS_IN_SECOND) % 60) as u32;
        next.minutes = ((time / MS_IN_MINUTE) % 60) as u32;
        next.hours = ((time / MS_IN_HOUR) % 24) as u32;
        *self = next;
        Ok(())
    }

    fn decrement_day(&mut self) {
        if self.day > MIN_DAY {
            self.day -= 1;
            return;
        }
        if self.month > MIN_MONTH {
            self.month -= 1;
        } else {
            self.year -= 1;
            self.month = MONTHS_IN_YEAR;
        }
        self.day = self.days_in_month();
    }

    fn increment_day(&mut self) {
        self.day += 1;
        if self.day > self.days_in_month() {
            self.month += 1;
            if self.month > MONTHS_IN_YEAR {
                self.year += 1;
                self.month = MIN_MONTH;
            }
            self.day = MIN_DAY;
        }
    }

    /// Whether the value falls in a leap year (4/100/400 rule).
    pub fn is_leap_year(&self) -> bool {
        if self.year & 3 != 0 {
            return false;
        }
        self.year % 100 != 0 || self.year % 400 == 0
    }

    /// Number of days in the value's year.
    pub fn days_in_year(&self) -> u32 {
        if self.is_leap_year() { 366 } else { 365 }
    }

    /// Number of days in the value's month.
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// The time portion as `HH:MM:SS`.
    pub fn to_time_string(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Number of days in a month, taken from the proleptic Gregorian calendar.
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= MONTHS_IN_YEAR {
        (year + 1, MIN_MONTH)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, MIN_DAY)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

impl std::fmt::Display for DateOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hours, self.minutes, self.seconds
        )?;
        match self.offset_minutes {
            Some(offset) => {
                let sign = if offset < 0 { '-' } else { '+' };
                let magnitude = offset.abs();
                write!(
                    f,
                    "{sign}{:02}:{:02}",
                    magnitude / MINUTES_IN_HOUR,
                    magnitude % MINUTES_IN_HOUR
                )
            }
            None => write!(f, "Z"),
        }
    }
}

impl std::str::FromStr for DateOffset {
    type Err = DateOffsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateOffset::parse(s).ok_or_else(|| DateOffsetError::malformed(s))
    }
}

impl Serialize for DateOffset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateOffset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateOffset::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid ISO date-time with offset: {raw}")))
    }
}
