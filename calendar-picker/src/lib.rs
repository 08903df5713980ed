//! calendar-picker is the state machine behind an embeddable date picker.
//!
//! It derives the 42-cell month grid, moves between the day, month and year
//! grids, reconciles host-owned (controlled) and picker-owned (uncontrolled)
//! selections, and applies a disabled-date policy in every mode. Drawing is
//! left to the host: [`DatePicker::view`] returns everything a renderer
//! needs.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use calendar_picker::{
//!     CalendarDate, DatePicker, DatePickerArgs, FixedClock, LocalQueue, PickerMode,
//! };
//!
//! let queue = Arc::new(LocalQueue::new());
//! let today = CalendarDate::new(2024, 3, 15).unwrap();
//! let picker = DatePicker::with_clock(
//!     DatePickerArgs::default()
//!         .default_value("2024-01-31")
//!         .on_change(|date| println!("picked {date}")),
//!     Arc::new(FixedClock::new(today)),
//!     queue.clone(),
//! );
//!
//! picker.enter_month_mode();
//! picker.pick_month(1);
//! assert_eq!(picker.selection(), CalendarDate::new(2024, 2, 29).unwrap());
//!
//! // Picking a year outside the decade window defers the switch to month
//! // mode until the host drains its queue.
//! picker.enter_year_mode();
//! picker.pick_year(2019);
//! assert_eq!(picker.mode(), PickerMode::Year);
//! queue.run_pending();
//! assert_eq!(picker.mode(), PickerMode::Month);
//! ```
//!
//! # Deferred work
//!
//! The picker never spawns threads or timers. The one piece of deferred work,
//! the month-mode transition after a decade shift, is handed to the
//! [`Scheduler`] given at construction. Any later gesture cancels it, and it
//! is silently dropped if the picker is gone by the time it runs.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod callback;
pub mod clock;
pub mod date;
pub mod error;
pub mod grid;
pub mod labels;
pub mod picker;
pub mod scheduler;
pub mod view;

pub use crate::{
    callback::Callback,
    clock::{Clock, FixedClock, SystemClock},
    date::{
        CalendarDate, DateInput, MAX_YEAR, MIN_YEAR, Weekday, YearMonth, days_in_month,
        is_leap_year,
    },
    error::ParseDateError,
    grid::{DayCell, DayCellRenderer, DisabledDate, GRID_CELLS, build_month_grid},
    picker::{DatePicker, DatePickerArgs, NavigationState, PickerMode, Selection},
    scheduler::{LocalQueue, Scheduler, Task, TaskHandle},
    view::{DayCellView, FooterView, HeaderTitle, HeaderView, PickerBody, PickerView, YearCellView},
};
