//! Calendar day without a time component

use serde::Deserialize;
use serde::Serialize;

/// A pure calendar date, used as the editing representation of date and
/// date-range filters.
///
/// Ordering is lexicographic by `(year, month, day)`.
///
/// # Example
///
/// ```
/// use emtable_lib::model::Day;
///
/// let a = Day::new(2024, 2, 29);
/// let b = Day::new(2024, 3, 1);
/// assert!(a < b);
/// assert_eq!(a.to_string(), "2/29/2024");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Day {
    /// Calendar year.
    pub year: i32,
    /// Month of the year, 1-12.
    pub month: u32,
    /// Day of the month, 1-31.
    pub day: u32,
}

impl Day {
    /// Creates a new day.
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.month, self.day, self.year)
    }
}
