//! DateOffset arithmetic errors

/// Error type for [`DateOffset`](crate::model::DateOffset) arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateOffsetError {
    /// `add` only supports shifting by up to one day in either direction.
    #[error("DateOffset add only supports up to +/- 1 day, got {delta_ms}ms")]
    OutOfRange { delta_ms: i64 },

    /// The shift would move the date outside years 0000-9999.
    #[error("DateOffset year {year} is outside 0000-9999")]
    YearOutOfRange { year: i32 },

    /// The text is not an ISO date-time with a `Z` or `+HH:MM` suffix.
    #[error("Malformed ISO date-time with offset: '{input}'")]
    Malformed { input: String },
}

impl DateOffsetError {
    /// Creates a new out-of-range error.
    pub fn out_of_range(delta_ms: i64) -> Self {
        Self::OutOfRange { delta_ms }
    }

    /// Creates a new year out-of-range error.
    pub fn year_out_of_range(year: i32) -> Self {
        Self::YearOutOfRange { year }
    }

    /// Creates a new malformed input error.
    pub fn malformed(input: impl Into<String>) -> Self {
        Self::Malformed { input: input.into() }
    }
}
