//! Fixed labels and the year enumeration shown by the picker.

/// Weekday header labels, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["一", "二", "三", "四", "五", "六", "日"];

/// Month labels, January first.
pub const MONTH_LABELS: [&str; 12] = [
    "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
];

/// Label of the "jump to today" button.
pub const TODAY_LABEL: &str = "今天";

/// Number of entries in the year grid: the decade plus one padding year on
/// each side.
pub const DECADE_GRID_LEN: usize = 12;

/// Header title for a year.
pub fn year_title(year: i32) -> String {
    format!("{year}年")
}

/// Header title for a 0-based month.
pub fn month_title(month0: u8) -> String {
    format!("{}月", month0 as u32 + 1)
}

/// Header title for the decade starting at `decade_start`.
pub fn decade_title(decade_start: i32) -> String {
    format!("{}年-{}年", decade_start, decade_start.saturating_add(9))
}

/// Returns the twelve years shown in year mode, starting one year before the
/// decade.
pub fn decade_years(decade_start: i32) -> [i32; DECADE_GRID_LEN] {
    std::array::from_fn(|index| decade_start.saturating_add(index as i32 - 1))
}

/// Returns true for the padding entries at either end of the year grid.
pub fn is_out_of_decade(index: usize) -> bool {
    index == 0 || index == DECADE_GRID_LEN - 1
}
