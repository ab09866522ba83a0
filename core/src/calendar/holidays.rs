use chrono::NaiveDate;

use super::event::{Event, EventColor};

/// Shared marker color of every holiday
pub const HOLIDAY_COLOR: EventColor = EventColor::Red;

/// (month, day, title) of the fixed national holidays
pub const HOLIDAYS: [(u32, u32, &str); 8] = [
    (1, 1, "New Year's Day"),
    (1, 7, "Orthodox Christmas"),
    (2, 23, "Defender of the Fatherland Day"),
    (3, 8, "International Women's Day"),
    (5, 1, "Spring and Labour Day"),
    (5, 9, "Victory Day"),
    (6, 12, "Russia Day"),
    (11, 4, "Unity Day"),
];

/// Holiday events for `year`, in calendar order.
pub fn holidays_for_year(year: i32) -> Vec<Event> {
    HOLIDAYS
        .iter()
        .filter_map(|&(month, day, title)| {
            NaiveDate::from_ymd_opt(year, month, day)
                .map(|date| Event::new(date, title).with_color(HOLIDAY_COLOR))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_dates_in_year() {
        let holidays = holidays_for_year(2025);
        assert_eq!(holidays.len(), 8);
        assert!(holidays.iter().all(|h| h.date_key().starts_with("2025-")));
        assert!(holidays.iter().all(|h| h.color == HOLIDAY_COLOR));
        assert_eq!(holidays[3].date_key(), "2025-03-08");
    }
}
