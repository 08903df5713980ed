//! Render-ready snapshot of a [`DatePicker`].
//!
//! ## Usage
//!
//! Call [`DatePicker::view`] once per frame and draw the result. The snapshot
//! owns its data, so the picker can keep changing while it is being drawn.
use crate::{
    grid::DayCell,
    labels::{self, TODAY_LABEL},
    picker::{DatePicker, PickerMode},
};

/// Title shown between the header arrows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderTitle {
    /// Day mode: clickable year and month.
    YearMonth {
        /// Opens year mode when clicked.
        year: String,
        /// Opens month mode when clicked.
        month: String,
    },
    /// Month mode: clickable year only.
    Year {
        /// Opens year mode when clicked.
        year: String,
    },
    /// Year mode: the decade range.
    Decade(String),
}

/// Header above the grid.
///
/// The outer arrows are always present and map to
/// [`DatePicker::outer_arrow`]; the inner month arrows only exist in day mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    /// Title between the arrows.
    pub title: HeaderTitle,
    /// Whether the previous/next month arrows are shown.
    pub show_month_arrows: bool,
}

/// A day cell paired with the content to draw in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCellView {
    /// Flags of the cell.
    pub cell: DayCell,
    /// Content from the render override, or the day number.
    pub content: String,
}

/// One entry of the year grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCellView {
    /// The year.
    pub year: i32,
    /// True for the padding years either side of the decade. They stay
    /// clickable and shift the window when picked.
    pub is_out_of_decade: bool,
    /// Whether this is the selected date's year.
    pub is_selected: bool,
}

/// The grid for the active mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerBody {
    /// Day mode.
    Days {
        /// Weekday header labels, Monday first.
        weekdays: [&'static str; 7],
        /// The 42 cells in row-major order.
        cells: Vec<DayCellView>,
    },
    /// Month mode.
    Months {
        /// Month labels, January first.
        labels: [&'static str; 12],
        /// Index of the selected month, if the selection is in the displayed
        /// year.
        selected: Option<usize>,
    },
    /// Year mode.
    Years {
        /// Twelve consecutive years starting one before the decade.
        years: Vec<YearCellView>,
        /// Decade title such as `2020年-2029年`.
        title: String,
    },
}

/// The "today" footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterView {
    /// Button label.
    pub label: &'static str,
    /// True when the disabled-date policy rejects today, in which case the
    /// button does nothing.
    pub is_today_disabled: bool,
}

/// Everything a renderer needs to draw the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerView {
    /// Active mode.
    pub mode: PickerMode,
    /// Header with title and arrows.
    pub header: HeaderView,
    /// Grid for the active mode.
    pub body: PickerBody,
    /// Present when the today button is enabled in the configuration.
    pub footer: Option<FooterView>,
}

impl DatePicker {
    /// Returns the header for the active mode.
    pub fn header(&self) -> HeaderView {
        let navigation = self.navigation();
        let title = match navigation.mode {
            PickerMode::Day => HeaderTitle::YearMonth {
                year: labels::year_title(navigation.displayed_year),
                month: labels::month_title(navigation.displayed_month),
            },
            PickerMode::Month => HeaderTitle::Year {
                year: labels::year_title(navigation.displayed_year),
            },
            PickerMode::Year => HeaderTitle::Decade(labels::decade_title(navigation.decade_start)),
        };
        HeaderView {
            title,
            show_month_arrows: navigation.mode == PickerMode::Day,
        }
    }

    /// Builds the snapshot for the active mode.
    pub fn view(&self) -> PickerView {
        let navigation = self.navigation();
        let body = match navigation.mode {
            PickerMode::Day => {
                let renderer = self.args().render_day_cell.as_ref();
                PickerBody::Days {
                    weekdays: self.weekday_labels(),
                    cells: self
                        .current_grid()
                        .into_iter()
                        .map(|cell| DayCellView {
                            cell,
                            content: cell.content(renderer),
                        })
                        .collect(),
                }
            }
            PickerMode::Month => PickerBody::Months {
                labels: self.month_labels(),
                selected: self.selected_month_index(),
            },
            PickerMode::Year => {
                let selected_year = self.selection().year();
                PickerBody::Years {
                    years: labels::decade_years(navigation.decade_start)
                        .into_iter()
                        .enumerate()
                        .map(|(index, year)| YearCellView {
                            year,
                            is_out_of_decade: labels::is_out_of_decade(index),
                            is_selected: year == selected_year,
                        })
                        .collect(),
                    title: labels::decade_title(navigation.decade_start),
                }
            }
        };
        let footer = self.args().show_today_button.then(|| FooterView {
            label: TODAY_LABEL,
            is_today_disabled: self.is_disabled(self.today()),
        });

        PickerView {
            mode: navigation.mode,
            header: self.header(),
            body,
            footer,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{DatePickerArgs, clock::FixedClock, date::CalendarDate, scheduler::LocalQueue};

    fn date(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    fn picker(args: DatePickerArgs) -> DatePicker {
        DatePicker::with_clock(
            args,
            Arc::new(FixedClock::new(date(2024, 7, 4))),
            Arc::new(LocalQueue::new()),
        )
    }

    #[test]
    fn day_mode_view() {
        let picker = picker(
            DatePickerArgs::default()
                .default_value(date(2024, 7, 15))
                .render_day_cell(|(date, cell): (CalendarDate, DayCell)| {
                    if cell.is_selected {
                        format!("*{}", date.day())
                    } else {
                        date.day().to_string()
                    }
                }),
        );
        let view = picker.view();
        assert_eq!(view.mode, PickerMode::Day);
        assert_eq!(
            view.header,
            HeaderView {
                title: HeaderTitle::YearMonth {
                    year: "2024年".to_string(),
                    month: "7月".to_string(),
                },
                show_month_arrows: true,
            }
        );
        let PickerBody::Days { weekdays, cells } = view.body else {
            panic!("expected day grid");
        };
        assert_eq!(weekdays, labels::WEEKDAY_LABELS);
        assert_eq!(cells.len(), 42);
        assert_eq!(cells[14].content, "*15");
        assert_eq!(cells[3].content, "4");
        assert!(cells[3].cell.is_today);
        assert_eq!(
            view.footer,
            Some(FooterView {
                label: "今天",
                is_today_disabled: false,
            })
        );
    }

    #[test]
    fn month_mode_view() {
        let picker = picker(DatePickerArgs::default().default_value(date(2024, 3, 9)));
        picker.enter_month_mode();
        let view = picker.view();
        assert_eq!(
            view.header.title,
            HeaderTitle::Year {
                year: "2024年".to_string()
            }
        );
        assert!(!view.header.show_month_arrows);
        assert_eq!(
            view.body,
            PickerBody::Months {
                labels: labels::MONTH_LABELS,
                selected: Some(2),
            }
        );
    }

    #[test]
    fn year_mode_view() {
        let picker = picker(DatePickerArgs::default().default_value(date(2024, 3, 9)));
        picker.enter_year_mode();
        let view = picker.view();
        assert_eq!(
            view.header.title,
            HeaderTitle::Decade("2020年-2029年".to_string())
        );
        let PickerBody::Years { years, title } = view.body else {
            panic!("expected year grid");
        };
        assert_eq!(title, "2020年-2029年");
        assert_eq!(years.len(), 12);
        assert_eq!(years[0].year, 2019);
        assert!(years[0].is_out_of_decade);
        assert!(years[11].is_out_of_decade);
        assert!(!years[1].is_out_of_decade);
        let selected: Vec<_> = years
            .iter()
            .filter(|cell| cell.is_selected)
            .map(|cell| cell.year)
            .collect();
        assert_eq!(selected, vec![2024]);
    }

    #[test]
    fn footer_follows_configuration_and_policy() {
        let hidden = picker(DatePickerArgs::default().show_today_button(false));
        assert!(hidden.view().footer.is_none());

        let disabled = picker(DatePickerArgs::default().disabled_date(|date| date.day() == 4));
        assert_eq!(
            disabled.view().footer.map(|footer| footer.is_today_disabled),
            Some(true)
        );
    }
}
