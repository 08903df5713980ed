//! The 6x7 day grid shown in day mode.
//!
//! [`build_month_grid`] is a pure function of its arguments: it owns no state
//! and never touches the clock, so "today" is passed in by the caller.
use crate::{
    callback::Callback,
    date::{CalendarDate, YearMonth},
};

/// Number of columns (days per week) in the grid.
pub const GRID_COLUMNS: usize = 7;
/// Number of rows (weeks) in the grid.
pub const GRID_ROWS: usize = 6;
/// Total number of cells in every grid.
pub const GRID_CELLS: usize = GRID_COLUMNS * GRID_ROWS;

/// Policy deciding which dates cannot be selected.
pub type DisabledDate = Callback<CalendarDate, bool>;

/// Optional override for the content rendered inside a day cell.
pub type DayCellRenderer = Callback<(CalendarDate, DayCell), String>;

/// One cell of the day grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    /// The date shown in the cell.
    pub date: CalendarDate,
    /// Whether the date belongs to the displayed month.
    pub is_current_month: bool,
    /// Whether the date is today.
    pub is_today: bool,
    /// Whether the date is the current selection.
    pub is_selected: bool,
    /// Whether the disabled-date policy rejects the date.
    pub is_disabled: bool,
}

impl DayCell {
    /// Returns the content to display for this cell: the renderer's output
    /// when one is configured, otherwise the day of the month.
    pub fn content(&self, renderer: Option<&DayCellRenderer>) -> String {
        match renderer {
            Some(renderer) => renderer.call((self.date, *self)),
            None => self.date.day().to_string(),
        }
    }
}

/// Returns how many cells of the previous month precede day 1 of `month`.
///
/// The grid is Monday-first, so this is the Sunday-based weekday index of the
/// first day shifted by six.
pub fn leading_offset(month: YearMonth) -> usize {
    let native = month.first_day().weekday().index_from_sunday() as usize;
    (native + 6) % GRID_COLUMNS
}

/// Builds the 42-cell, Monday-first grid for the 0-based `month0` of `year`.
///
/// Cells before day 1 belong to the previous month and cells after the last
/// day to the following month. `disabled` is called exactly once per cell.
///
/// Returns a grid for December when `month0` is greater than 11.
pub fn build_month_grid(
    year: i32,
    month0: u8,
    selected: CalendarDate,
    today: CalendarDate,
    disabled: Option<&DisabledDate>,
) -> [DayCell; GRID_CELLS] {
    let month =
        YearMonth::from_month0(year, month0.min(11)).unwrap_or_else(|| today.year_month());
    let offset = leading_offset(month) as i64;
    let days = month.days() as i64;

    // Leading, current and trailing runs all use the same day number; calendar
    // overflow moves the outer runs into the neighbouring months.
    std::array::from_fn(|index| {
        let day = index as i64 - offset + 1;
        let date = CalendarDate::from_overflowing(month.year(), month.month0() as i32, day);
        DayCell {
            date,
            is_current_month: (1..=days).contains(&day),
            is_today: date == today,
            is_selected: date == selected,
            is_disabled: disabled.is_some_and(|disabled| disabled.call(date)),
        }
    })
}
