use chrono::{Datelike, Months, NaiveDate, Weekday};

use super::event::{Event, EventColor};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Week starts on Monday
pub const WEEKDAY_LABELS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day: u32,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_weekend: bool,
    /// One marker per event on this day, in insertion order
    pub markers: Vec<EventColor>,
}

impl DayCell {
    pub fn has_events(&self) -> bool {
        !self.markers.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridCell {
    /// Padding before the first day of the month
    Blank,
    Day(DayCell),
}

impl GridCell {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            GridCell::Day(cell) => Some(cell),
            GridCell::Blank => None,
        }
    }
}

/// A rendered month: a Monday-first 7 column grid and the selected day's events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub selected: NaiveDate,
    pub cells: Vec<GridCell>,
    pub day_events: Vec<Event>,
}

impl MonthGrid {
    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month as usize - 1], self.year)
    }

    pub fn weekday_labels(&self) -> [&'static str; 7] {
        WEEKDAY_LABELS
    }

    /// Number of leading blank cells
    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|cell| matches!(cell, GridCell::Blank))
            .count()
    }

    /// Cells split into weeks. The last row may be shorter than 7.
    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(7)
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(GridCell::as_day)
    }
}

/// Column of a weekday when weeks start on Monday (Mon=0 ... Sun=6)
pub fn weekday_offset(weekday: Weekday) -> usize {
    weekday.num_days_from_monday() as usize
}

/// First day of the month containing `date`
pub fn first_of_month(date: &NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(*date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    match first.checked_add_months(Months::new(1)) {
        Some(next) => next.signed_duration_since(first).num_days() as u32,
        // Only reachable at the end of chrono's supported range
        None => 31,
    }
}

/// Shifts a first-of-month date by `delta` months, rolling over years.
/// Out of range results leave the month unchanged.
pub fn shift_month(first: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        first.checked_add_months(months)
    } else {
        first.checked_sub_months(months)
    };
    shifted.unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn shift_rolls_over_years() {
        let dec = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        assert_eq!(shift_month(dec, 1), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let jan = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(shift_month(jan, -1), NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        assert_eq!(shift_month(jan, -13), NaiveDate::from_ymd_opt(2022, 12, 1).unwrap());
    }

    #[test]
    fn monday_first_offsets() {
        assert_eq!(weekday_offset(Weekday::Mon), 0);
        assert_eq!(weekday_offset(Weekday::Wed), 2);
        assert_eq!(weekday_offset(Weekday::Sun), 6);
    }
}
