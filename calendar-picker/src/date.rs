//! Calendar date primitives used by the picker.
//!
//! All arithmetic is proleptic Gregorian and works on plain calendar dates;
//! there is no time-of-day or timezone component anywhere in this module.
use std::{fmt, str::FromStr};

use tracing::debug;

use crate::error::ParseDateError;

/// Days of the week in Monday-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl Weekday {
    const MONDAY_FIRST: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Position in a Monday-first week (Monday = 0).
    pub fn index_from_monday(self) -> u8 {
        self as u8
    }

    /// Position in a Sunday-first week (Sunday = 0).
    pub fn index_from_sunday(self) -> u8 {
        (self as u8 + 1) % 7
    }

    /// Weekday `days` after a Monday; negative values count backwards.
    pub fn from_monday_index(days: i64) -> Self {
        Self::MONDAY_FIRST[days.rem_euclid(7) as usize]
    }
}

/// Earliest year a [`CalendarDate`] can hold.
pub const MIN_YEAR: i32 = -9999;
/// Latest year a [`CalendarDate`] can hold.
pub const MAX_YEAR: i32 = 9999;

/// Clamps `year` into `MIN_YEAR..=MAX_YEAR`.
pub fn clamp_year(year: i32) -> i32 {
    year.clamp(MIN_YEAR, MAX_YEAR)
}

/// A calendar date expressed as year, month, and day.
///
/// Equality is calendar-date equality: two values are equal exactly when
/// their year, month and day-of-month match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// 1970-01-01, used when no better date is available.
    pub const UNIX_EPOCH: CalendarDate = CalendarDate {
        year: 1970,
        month: 1,
        day: 1,
    };

    /// Creates a calendar date if the values are valid.
    ///
    /// `month` is 1-based here, matching how dates are written. Years outside
    /// [`MIN_YEAR`]..=[`MAX_YEAR`] are rejected.
    pub fn new(year: i32, month: u8, day: u8) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        let max_day = days_in_month(year, month);
        if day == 0 || day > max_day {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// Resolves `day` of the 0-based `month0` of `year`, letting out-of-range
    /// months and days roll into neighbouring months and years.
    ///
    /// Day `0` is the last day of the previous month, day `-1` the one before
    /// it, and a day past the end of the month continues into the next.
    pub fn from_overflowing(year: i32, month0: i32, day: i64) -> Self {
        let month = YearMonth::new_unchecked(year, 1).add_months(month0);
        let days = days_from_civil(month.year(), month.month(), 1) + day - 1;
        let (year, month, day) = civil_from_days(days);
        Self { year, month, day }
    }

    /// Builds a date in the given month, clamping `day` to the month's length.
    pub fn clamped(year: i32, month0: u8, day: u8) -> Self {
        let month = month0.min(11) + 1;
        let day = day.clamp(1, days_in_month(year, month));
        Self { year, month, day }
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Returns the month (0-11).
    pub fn month0(&self) -> u8 {
        self.month - 1
    }

    /// Returns the day of the month (1-31).
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Returns the year/month this date belongs to.
    pub fn year_month(&self) -> YearMonth {
        YearMonth::new_unchecked(self.year, self.month)
    }

    /// Returns the day of the week.
    pub fn weekday(&self) -> Weekday {
        let days = days_from_civil(self.year, self.month, self.day);
        // 1970-01-01 was a Thursday.
        Weekday::from_monday_index(days + 3)
    }

    /// Moves this date's day-of-month into another month, clamping it to the
    /// length of that month.
    pub fn with_year_month_clamped(&self, year: i32, month0: u8) -> Self {
        Self::clamped(year, month0, self.day)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year >= 0 {
            write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
        } else {
            write!(f, "{:05}-{:02}-{:02}", self.year, self.month, self.day)
        }
    }
}

impl FromStr for CalendarDate {
    type Err = ParseDateError;

    /// Parses `YYYY-MM-DD` or `YYYY/MM/DD`, with an optional leading `-` for
    /// years before 1 BC. Anything after a `T` or a space is treated as a time
    /// of day and ignored.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseDateError::Empty);
        }
        let date_part = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);
        let (negative, unsigned) = match date_part.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, date_part),
        };
        let separator = if unsigned.contains('/') { '/' } else { '-' };
        let mut parts = unsigned.split(separator);
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(ParseDateError::Format(trimmed.to_string()));
        };

        let year = year.parse::<i32>()?;
        let year = if negative { -year } else { year };
        let month = month.parse::<u8>()?;
        let day = day.parse::<u8>()?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ParseDateError::Year(year));
        }
        if !(1..=12).contains(&month) {
            return Err(ParseDateError::Month(month));
        }
        CalendarDate::new(year, month, day).ok_or(ParseDateError::Day { year, month, day })
    }
}

/// A date as handed over by the host, before validation.
///
/// Text input that cannot be parsed resolves to a fallback date instead of
/// producing an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// An already valid date.
    Date(CalendarDate),
    /// Unvalidated text such as `"2024-07-15"`.
    Text(String),
}

impl DateInput {
    /// Returns the date this input denotes, or `fallback` when it is text
    /// that does not parse.
    pub fn resolve(&self, fallback: CalendarDate) -> CalendarDate {
        match self {
            DateInput::Date(date) => *date,
            DateInput::Text(text) => match text.parse::<CalendarDate>() {
                Ok(date) => date,
                Err(err) => {
                    debug!("Ignoring unparsable date {text:?}: {err}; using {fallback}");
                    fallback
                }
            },
        }
    }
}

impl From<CalendarDate> for DateInput {
    fn from(date: CalendarDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

/// A month of a specific year, the unit the day grid and month navigation
/// work in. Ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl YearMonth {
    /// January of [`MIN_YEAR`].
    pub const MIN: YearMonth = YearMonth {
        year: MIN_YEAR,
        month: 1,
    };
    /// December of [`MAX_YEAR`].
    pub const MAX: YearMonth = YearMonth {
        year: MAX_YEAR,
        month: 12,
    };

    /// Creates a year/month pair if the month is 1-12 and the year is within
    /// [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub fn new(year: i32, month: u8) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// Creates a year/month pair from a 0-based month (0-11).
    pub fn from_month0(year: i32, month0: u8) -> Option<Self> {
        Self::new(year, month0.checked_add(1)?)
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Returns the month (0-11).
    pub fn month0(&self) -> u8 {
        self.month - 1
    }

    /// Returns the number of days in this month.
    pub fn days(&self) -> u8 {
        days_in_month(self.year, self.month)
    }

    /// Returns the first day of this month.
    pub fn first_day(&self) -> CalendarDate {
        CalendarDate {
            year: self.year,
            month: self.month,
            day: 1,
        }
    }

    /// Moves `delta` months forwards or backwards, carrying into the year.
    ///
    /// The result is not limited to [`MIN_YEAR`]..=[`MAX_YEAR`]; use
    /// [`clamp_to_range`](Self::clamp_to_range) where that matters.
    pub fn add_months(&self, delta: i32) -> Self {
        let months = i64::from(self.year) * 12 + i64::from(self.month0()) + i64::from(delta);
        let year = months
            .div_euclid(12)
            .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        Self {
            year,
            month: months.rem_euclid(12) as u8 + 1,
        }
    }

    /// Clamps this month into [`YearMonth::MIN`]..=[`YearMonth::MAX`].
    pub fn clamp_to_range(self) -> Self {
        self.clamp(Self::MIN, Self::MAX)
    }

    fn new_unchecked(year: i32, month: u8) -> Self {
        Self { year, month }
    }
}

/// Returns the number of days in `month` (1-12) of `year`.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

/// Returns true for Gregorian leap years.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Rounds `year` down to the first year of its decade (2019 -> 2010,
/// -1 -> -10).
pub fn decade_start_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let mut y = year as i64;
    let m = month as i64;
    let d = day as i64;
    y -= if m <= 2 { 1 } else { 0 };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = m + if m > 2 { -3 } else { 9 };
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = mp + if mp < 10 { 3 } else { -9 };
    let year = y + if month <= 2 { 1 } else { 0 };
    (year as i32, month as u8, day as u8)
}
