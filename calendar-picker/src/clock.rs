//! Source of "today" for the picker.
//!
//! ## Usage
//!
//! Use [`SystemClock`] in applications and [`FixedClock`] wherever the
//! current date has to be deterministic.
use chrono::Datelike as _;
use parking_lot::RwLock;

use crate::date::CalendarDate;

/// Supplies the current calendar date.
pub trait Clock: Send + Sync {
    /// Returns today's date.
    fn today(&self) -> CalendarDate;
}

/// Reads today's date from the system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        let now = chrono::Local::now().date_naive();
        CalendarDate::new(now.year(), now.month() as u8, now.day() as u8)
            .unwrap_or(CalendarDate::UNIX_EPOCH)
    }
}

/// A clock that always reports the date it was last set to.
#[derive(Debug)]
pub struct FixedClock {
    today: RwLock<CalendarDate>,
}

impl FixedClock {
    /// Creates a clock stuck at `today`.
    pub fn new(today: CalendarDate) -> Self {
        Self {
            today: RwLock::new(today),
        }
    }

    /// Moves the clock to another date.
    pub fn set(&self, today: CalendarDate) {
        *self.today.write() = today;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        *self.today.read()
    }
}
