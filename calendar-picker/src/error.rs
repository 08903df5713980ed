//! Error types.
use std::num::ParseIntError;

use thiserror::Error;

/// Errors produced when parsing a [`CalendarDate`](crate::CalendarDate) from
/// text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDateError {
    /// The input was empty or only whitespace.
    #[error("date input is empty")]
    Empty,
    /// The input is not shaped like `YYYY-MM-DD` or `YYYY/MM/DD`.
    #[error("expected a date like YYYY-MM-DD, got {0:?}")]
    Format(String),
    /// One of the components is not a number.
    #[error("invalid number in date: {0}")]
    Number(#[from] ParseIntError),
    /// The year is outside the supported range.
    #[error("year {0} is outside -9999..=9999")]
    Year(i32),
    /// The month is outside 1-12.
    #[error("month {0} is outside 1-12")]
    Month(u8),
    /// The day does not exist in the given month.
    #[error("day {day} does not exist in {year}-{month:02}")]
    Day {
        /// Parsed year.
        year: i32,
        /// Parsed month (1-12).
        month: u8,
        /// Parsed day.
        day: u8,
    },
}
