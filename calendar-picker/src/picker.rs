//! Date picker controller: navigation modes, selection ownership and the
//! disabled-date policy.
//!
//! ## Usage
//!
//! Build a [`DatePicker`] from [`DatePickerArgs`], forward the user's gestures
//! to its transition methods, and read back the grid, the labels, or a
//! [`PickerView`](crate::view::PickerView) for rendering.
use std::sync::{Arc, Weak};

use derive_setters::Setters;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::{
    callback::Callback,
    clock::{Clock, SystemClock},
    date::{CalendarDate, DateInput, MAX_YEAR, MIN_YEAR, YearMonth, clamp_year, decade_start_of},
    grid::{DayCell, DayCellRenderer, DisabledDate, GRID_CELLS, build_month_grid},
    labels::{self, DECADE_GRID_LEN},
    scheduler::{Scheduler, TaskHandle},
};

/// Which grid the picker is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerMode {
    /// The 42-cell day grid.
    #[default]
    Day,
    /// The twelve months of the displayed year.
    Month,
    /// The padded decade of years.
    Year,
}

/// Where the picker is looking, independent of what is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    /// The year whose month (or months) are displayed.
    pub displayed_year: i32,
    /// The displayed month, 0-11.
    pub displayed_month: u8,
    /// The active grid.
    pub mode: PickerMode,
    /// First year of the decade shown in year mode.
    ///
    /// Only recomputed when entering year mode, so it may lag behind
    /// `displayed_year` in the other modes.
    pub decade_start: i32,
}

impl NavigationState {
    fn new(displayed: YearMonth) -> Self {
        Self {
            displayed_year: displayed.year(),
            displayed_month: displayed.month0(),
            mode: PickerMode::Day,
            decade_start: decade_start_of(displayed.year()),
        }
    }

    /// Returns the displayed year and month as a pair.
    pub fn displayed(&self) -> YearMonth {
        CalendarDate::clamped(self.displayed_year, self.displayed_month, 1).year_month()
    }

    fn set_displayed(&mut self, month: YearMonth) {
        self.displayed_year = month.year();
        self.displayed_month = month.month0();
    }
}

/// Who owns the selected date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The host owns the value; this is a mirror of the last value it passed.
    Controlled(CalendarDate),
    /// The picker owns the value.
    Uncontrolled(CalendarDate),
}

impl Selection {
    /// Returns the effective selected date.
    pub fn date(&self) -> CalendarDate {
        match self {
            Selection::Controlled(date) | Selection::Uncontrolled(date) => *date,
        }
    }

    /// Returns true when the host owns the value.
    pub fn is_controlled(&self) -> bool {
        matches!(self, Selection::Controlled(_))
    }

    // A controlled mirror only changes when the host feeds the value back.
    fn commit(&mut self, date: CalendarDate) {
        if let Selection::Uncontrolled(current) = self {
            *current = date;
        }
    }
}

/// Configuration options for [`DatePicker`].
///
/// `value` and `default_value` seed the picker at construction; later changes
/// to the host-owned value go through [`DatePicker::set_value`].
#[derive(Clone, Setters)]
pub struct DatePickerArgs {
    /// Host-owned selection. When set, the picker runs controlled.
    #[setters(strip_option, into)]
    pub value: Option<DateInput>,
    /// Initial selection when uncontrolled. Defaults to today.
    #[setters(strip_option, into)]
    pub default_value: Option<DateInput>,
    /// Called with the new date on every commit.
    #[setters(skip)]
    pub on_change: Option<Callback<CalendarDate>>,
    /// Whether the "today" footer is rendered.
    pub show_today_button: bool,
    /// Dates for which this returns true cannot be selected. This is the
    /// initial policy; [`DatePicker::set_disabled_date`] replaces it later.
    #[setters(skip)]
    pub disabled_date: Option<DisabledDate>,
    /// Optional override for the content of each day cell.
    #[setters(skip)]
    pub render_day_cell: Option<DayCellRenderer>,
}

impl Default for DatePickerArgs {
    fn default() -> Self {
        Self {
            value: None,
            default_value: None,
            on_change: None,
            show_today_button: true,
            disabled_date: None,
            render_day_cell: None,
        }
    }
}

impl DatePickerArgs {
    /// Sets the change callback.
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(CalendarDate) + Send + Sync + 'static,
    {
        self.on_change = Some(Callback::new(on_change));
        self
    }

    /// Sets the disabled-date policy.
    pub fn disabled_date<F>(mut self, disabled_date: F) -> Self
    where
        F: Fn(CalendarDate) -> bool + Send + Sync + 'static,
    {
        self.disabled_date = Some(DisabledDate::new(disabled_date));
        self
    }

    /// Sets the day cell content override.
    pub fn render_day_cell<F>(mut self, render_day_cell: F) -> Self
    where
        F: Fn((CalendarDate, DayCell)) -> String + Send + Sync + 'static,
    {
        self.render_day_cell = Some(DayCellRenderer::new(render_day_cell));
        self
    }
}

struct PendingTransition {
    id: u64,
    handle: TaskHandle,
}

struct PickerState {
    navigation: NavigationState,
    selection: Selection,
    disabled_date: Option<DisabledDate>,
    pending: Option<PendingTransition>,
    next_task_id: u64,
}

impl PickerState {
    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            trace!(id = pending.id, "Cancelling deferred month-mode transition");
            pending.handle.cancel();
        }
    }
}

/// The date-selection state machine.
///
/// Every gesture method cancels a month-mode transition still pending from a
/// previous [`pick_year`](Self::pick_year) before doing anything else.
pub struct DatePicker {
    state: Arc<RwLock<PickerState>>,
    args: DatePickerArgs,
    clock: Arc<dyn Clock>,
    scheduler: Arc<dyn Scheduler>,
}

impl DatePicker {
    /// Creates a picker that reads today's date from the system clock.
    pub fn new(args: impl Into<DatePickerArgs>, scheduler: Arc<dyn Scheduler>) -> Self {
        Self::with_clock(args, Arc::new(SystemClock), scheduler)
    }

    /// Creates a picker with an explicit clock.
    pub fn with_clock(
        args: impl Into<DatePickerArgs>,
        clock: Arc<dyn Clock>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        let args = args.into();
        let today = clock.today();
        let selection = match &args.value {
            Some(value) => Selection::Controlled(value.resolve(today)),
            None => Selection::Uncontrolled(
                args.default_value
                    .as_ref()
                    .map_or(today, |value| value.resolve(today)),
            ),
        };
        debug!(
            selection = %selection.date(),
            controlled = selection.is_controlled(),
            "Created date picker"
        );

        Self {
            state: Arc::new(RwLock::new(PickerState {
                navigation: NavigationState::new(selection.date().year_month()),
                selection,
                disabled_date: args.disabled_date.clone(),
                pending: None,
                next_task_id: 0,
            })),
            args,
            clock,
            scheduler,
        }
    }

    /// Returns the configuration the picker was built with.
    pub fn args(&self) -> &DatePickerArgs {
        &self.args
    }

    /// Returns a copy of the navigation state.
    pub fn navigation(&self) -> NavigationState {
        self.state.read().navigation
    }

    /// Returns the active mode.
    pub fn mode(&self) -> PickerMode {
        self.state.read().navigation.mode
    }

    /// Returns the displayed year.
    pub fn displayed_year(&self) -> i32 {
        self.state.read().navigation.displayed_year
    }

    /// Returns the displayed month (0-11).
    pub fn displayed_month(&self) -> u8 {
        self.state.read().navigation.displayed_month
    }

    /// Returns the first year of the decade window.
    pub fn decade_start(&self) -> i32 {
        self.state.read().navigation.decade_start
    }

    /// Returns the effective selected date.
    pub fn selection(&self) -> CalendarDate {
        self.state.read().selection.date()
    }

    /// Returns the selection together with its ownership.
    pub fn selection_state(&self) -> Selection {
        self.state.read().selection
    }

    /// Returns true when the host owns the selected value.
    pub fn is_controlled(&self) -> bool {
        self.state.read().selection.is_controlled()
    }

    /// Returns the 0-based month of the selection when it falls in the
    /// displayed year.
    pub fn selected_month_index(&self) -> Option<usize> {
        let state = self.state.read();
        let selected = state.selection.date();
        (selected.year() == state.navigation.displayed_year).then_some(selected.month0() as usize)
    }

    /// Returns true while a deferred month-mode transition is waiting to run.
    pub fn has_pending_transition(&self) -> bool {
        self.state
            .read()
            .pending
            .as_ref()
            .is_some_and(|pending| !pending.handle.is_cancelled())
    }

    /// Returns today's date according to the picker's clock.
    pub fn today(&self) -> CalendarDate {
        self.clock.today()
    }

    /// Returns the active disabled-date policy.
    pub fn disabled_date(&self) -> Option<DisabledDate> {
        self.state.read().disabled_date.clone()
    }

    /// Returns true when the disabled-date policy rejects `date`.
    pub fn is_disabled(&self, date: CalendarDate) -> bool {
        // The policy is host code; it runs after the lock is released.
        self.disabled_date().is_some_and(|disabled| disabled.call(date))
    }

    /// Replaces the disabled-date policy. The current selection is kept even
    /// if the new policy rejects it.
    pub fn set_disabled_date(&self, disabled_date: Option<DisabledDate>) {
        trace!(enabled = disabled_date.is_some(), "Replacing disabled-date policy");
        self.state.write().disabled_date = disabled_date;
    }

    /// Feeds a new host-owned value into the picker.
    ///
    /// A value different from the current mirror replaces it and moves the
    /// displayed month to it; the mode is left alone. `None` hands ownership
    /// back to the picker, which keeps the last mirrored date.
    pub fn set_value(&self, value: Option<DateInput>) {
        let today = self.clock.today();
        let mut state = self.state.write();
        match value.map(|value| value.resolve(today)) {
            Some(date) => {
                if state.selection == Selection::Controlled(date) {
                    return;
                }
                trace!(%date, "Synchronizing controlled value");
                state.selection = Selection::Controlled(date);
                state.navigation.set_displayed(date.year_month());
            }
            None => {
                if let Selection::Controlled(date) = state.selection {
                    trace!(%date, "Value released, picker now owns the selection");
                    state.selection = Selection::Uncontrolled(date);
                }
            }
        }
    }

    /// Moves the displayed month by `delta`, wrapping into adjacent years.
    pub fn navigate_month(&self, delta: i32) {
        let mut state = self.state.write();
        state.cancel_pending();
        let displayed = state
            .navigation
            .displayed()
            .add_months(delta)
            .clamp_to_range();
        state.navigation.set_displayed(displayed);
        trace!(year = displayed.year(), month0 = displayed.month0(), "Navigated month");
    }

    /// Moves the displayed year by `delta`, stopping at the supported range.
    /// Ignored in year mode.
    pub fn navigate_year(&self, delta: i32) {
        let mut state = self.state.write();
        state.cancel_pending();
        if state.navigation.mode == PickerMode::Year {
            trace!(delta, "Ignoring year navigation in year mode");
            return;
        }
        state.navigation.displayed_year =
            clamp_year(state.navigation.displayed_year.saturating_add(delta));
        trace!(year = state.navigation.displayed_year, "Navigated year");
    }

    /// Moves the decade window by `delta` decades. Only active in year mode.
    pub fn navigate_decade(&self, delta: i32) {
        let mut state = self.state.write();
        state.cancel_pending();
        if state.navigation.mode != PickerMode::Year {
            trace!(delta, "Ignoring decade navigation outside year mode");
            return;
        }
        state.navigation.decade_start = state
            .navigation
            .decade_start
            .saturating_add(delta.saturating_mul(10))
            .clamp(decade_start_of(MIN_YEAR), decade_start_of(MAX_YEAR));
        trace!(decade_start = state.navigation.decade_start, "Navigated decade");
    }

    /// Handles the outer header arrows: decades in year mode, years otherwise.
    pub fn outer_arrow(&self, delta: i32) {
        if self.mode() == PickerMode::Year {
            self.navigate_decade(delta);
        } else {
            self.navigate_year(delta);
        }
    }

    /// Switches to the month grid.
    pub fn enter_month_mode(&self) {
        let mut state = self.state.write();
        state.cancel_pending();
        state.navigation.mode = PickerMode::Month;
        trace!("Entered month mode");
    }

    /// Switches to the year grid, re-centering the decade on the displayed
    /// year.
    pub fn enter_year_mode(&self) {
        let mut state = self.state.write();
        state.cancel_pending();
        let navigation = &mut state.navigation;
        navigation.mode = PickerMode::Year;
        navigation.decade_start = decade_start_of(navigation.displayed_year);
        trace!(decade_start = navigation.decade_start, "Entered year mode");
    }

    /// Selects `date` and displays its month. Disabled dates are ignored.
    pub fn pick_day(&self, date: CalendarDate) {
        self.state.write().cancel_pending();
        if self.is_disabled(date) {
            trace!(%date, "Ignoring pick of disabled day");
            return;
        }
        {
            let mut state = self.state.write();
            state.selection.commit(date);
            state.navigation.set_displayed(date.year_month());
        }
        self.notify(date);
    }

    /// Displays `month0` (0-11) of the displayed year in day mode and moves
    /// the selection into it, clamping the day to the month's length.
    pub fn pick_month(&self, month0: u8) {
        let target = {
            let mut state = self.state.write();
            state.cancel_pending();
            let Some(month) = YearMonth::from_month0(state.navigation.displayed_year, month0)
            else {
                debug!(month0, "Ignoring pick of out-of-range month");
                return;
            };
            state.navigation.set_displayed(month);
            state.navigation.mode = PickerMode::Day;
            state
                .selection
                .date()
                .with_year_month_clamped(month.year(), month.month0())
        };
        self.commit_if_allowed(target);
    }

    /// Displays `year` and moves the selection into it.
    ///
    /// Inside the decade window this enters month mode at once. Outside it
    /// the window shifts to the decade containing `year` and month mode is
    /// entered by a deferred task, so the shifted window can be shown first.
    /// The selection is committed before this returns in both cases. Years
    /// outside the supported range are clamped into it.
    pub fn pick_year(&self, year: i32) {
        let year = clamp_year(year);
        let (target, shifted) = {
            let mut state = self.state.write();
            state.cancel_pending();
            let navigation = &mut state.navigation;
            let start = navigation.decade_start;
            let shifted = !(start..=start + 9).contains(&year);
            navigation.displayed_year = year;
            if shifted {
                navigation.decade_start = decade_start_of(year);
                trace!(year, decade_start = navigation.decade_start, "Shifted decade");
            } else {
                navigation.mode = PickerMode::Month;
                trace!(year, "Entered month mode");
            }
            let target = state
                .selection
                .date()
                .with_year_month_clamped(year, state.navigation.displayed_month);
            (target, shifted)
        };
        if shifted {
            self.schedule_month_mode();
        }
        self.commit_if_allowed(target);
    }

    /// Selects and displays today in day mode, unless today is disabled.
    pub fn go_to_today(&self) {
        self.state.write().cancel_pending();
        let today = self.clock.today();
        if self.is_disabled(today) {
            trace!(%today, "Ignoring jump to disabled today");
            return;
        }
        {
            let mut state = self.state.write();
            state.selection.commit(today);
            state.navigation.set_displayed(today.year_month());
            state.navigation.mode = PickerMode::Day;
        }
        self.notify(today);
    }

    /// Builds the day grid for the displayed month.
    pub fn current_grid(&self) -> [DayCell; GRID_CELLS] {
        let (navigation, selected, disabled) = {
            let state = self.state.read();
            (
                state.navigation,
                state.selection.date(),
                state.disabled_date.clone(),
            )
        };
        build_month_grid(
            navigation.displayed_year,
            navigation.displayed_month,
            selected,
            self.clock.today(),
            disabled.as_ref(),
        )
    }

    /// Returns the weekday header labels, Monday first.
    pub fn weekday_labels(&self) -> [&'static str; 7] {
        labels::WEEKDAY_LABELS
    }

    /// Returns the twelve month labels.
    pub fn month_labels(&self) -> [&'static str; 12] {
        labels::MONTH_LABELS
    }

    /// Returns the twelve years of the padded decade window.
    pub fn decade_years(&self) -> [i32; DECADE_GRID_LEN] {
        labels::decade_years(self.decade_start())
    }

    fn commit_if_allowed(&self, date: CalendarDate) {
        if self.is_disabled(date) {
            trace!(%date, "Skipping commit of disabled date");
            return;
        }
        self.state.write().selection.commit(date);
        self.notify(date);
    }

    fn notify(&self, date: CalendarDate) {
        debug!(%date, "Committed selection");
        if let Some(on_change) = &self.args.on_change {
            on_change.call(date);
        }
    }

    fn schedule_month_mode(&self) {
        let id = {
            let mut state = self.state.write();
            let id = state.next_task_id;
            state.next_task_id += 1;
            id
        };
        let weak = Arc::downgrade(&self.state);
        let handle = self
            .scheduler
            .schedule(Box::new(move || apply_deferred_month_mode(&weak, id)));
        self.state.write().pending = Some(PendingTransition { id, handle });
    }
}

impl Drop for DatePicker {
    fn drop(&mut self) {
        self.state.write().cancel_pending();
    }
}

fn apply_deferred_month_mode(state: &Weak<RwLock<PickerState>>, id: u64) {
    let Some(state) = state.upgrade() else {
        trace!(id, "Picker dropped before deferred transition ran");
        return;
    };
    let mut state = state.write();
    let current = state
        .pending
        .as_ref()
        .is_some_and(|pending| pending.id == id && !pending.handle.is_cancelled());
    if !current {
        trace!(id, "Dropping stale deferred transition");
        return;
    }
    state.pending = None;
    state.navigation.mode = PickerMode::Month;
    trace!(id, "Entered month mode after decade shift");
}
