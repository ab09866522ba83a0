use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Weekday};

use super::DTL;

/// Start of working hours, inclusive
pub const WORK_START_HOUR: u32 = 9;
/// End of working hours, exclusive
pub const WORK_END_HOUR: u32 = 18;

/// Formatting state of the live clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Clock {
    pub hour12: bool,
    pub show_seconds: bool,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            hour12: false,
            show_seconds: true,
        }
    }
}

impl Clock {
    pub fn new(hour12: bool, show_seconds: bool) -> Self {
        Self {
            hour12,
            show_seconds,
        }
    }

    /// Switches between 12 and 24 hour display, returns the new `hour12` value
    pub fn toggle_format(&mut self) -> bool {
        self.hour12 = !self.hour12;
        self.hour12
    }

    pub fn set_show_seconds(&mut self, show: bool) {
        self.show_seconds = show;
    }

    pub fn format_name(&self) -> &'static str {
        if self.hour12 {
            "12-hour"
        } else {
            "24-hour"
        }
    }

    pub fn format_time(&self, time: &NaiveTime) -> String {
        if self.hour12 {
            let (pm, hour) = time.hour12();
            let suffix = if pm { "PM" } else { "AM" };
            if self.show_seconds {
                format!("{:02}:{:02}:{:02} {}", hour, time.minute(), time.second(), suffix)
            } else {
                format!("{:02}:{:02} {}", hour, time.minute(), suffix)
            }
        } else {
            format_time(time, self.show_seconds)
        }
    }

    /// `Monday, 18.03.2024 | 14:05:09`
    pub fn display(&self, now: &DTL) -> String {
        format!(
            "{} | {}",
            format_date(&now.date_naive()),
            self.format_time(&now.time())
        )
    }
}

/// 24 hour `HH:MM[:SS]`
pub fn format_time(time: &NaiveTime, include_seconds: bool) -> String {
    if include_seconds {
        time.format("%H:%M:%S").to_string()
    } else {
        time.format("%H:%M").to_string()
    }
}

/// Long date with weekday, `Monday, 18.03.2024`
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%A, %d.%m.%Y").to_string()
}

/// Split of the span between two instants.
///
/// Component fields are remainders (`hours < 24` etc.), `total_*` fields are
/// the whole span in that unit. Negative spans yield negative values.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeDifference {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub total_seconds: i64,
    pub total_minutes: i64,
    pub total_hours: i64,
    pub total_days: i64,
}

impl TimeDifference {
    pub fn between(start: &NaiveDateTime, end: &NaiveDateTime) -> Self {
        Self::from_delta(end.signed_duration_since(*start))
    }

    pub fn from_delta(delta: TimeDelta) -> Self {
        let total_seconds = delta.num_seconds();
        let total_minutes = total_seconds.div_euclid(60);
        let total_hours = total_minutes.div_euclid(60);
        let total_days = total_hours.div_euclid(24);
        Self {
            days: total_days,
            hours: total_hours.rem_euclid(24),
            minutes: total_minutes.rem_euclid(60),
            seconds: total_seconds.rem_euclid(60),
            total_seconds,
            total_minutes,
            total_hours,
            total_days,
        }
    }

    /// `1 d. 2 h. 5 min.`; seconds are only shown when nothing larger is
    pub fn format_duration(&self) -> String {
        let mut parts = Vec::new();
        if self.days > 0 {
            parts.push(format!("{} d.", self.days));
        }
        if self.hours > 0 {
            parts.push(format!("{} h.", self.hours));
        }
        if self.minutes > 0 {
            parts.push(format!("{} min.", self.minutes));
        }
        if self.seconds > 0 && parts.is_empty() {
            parts.push(format!("{} sec.", self.seconds));
        }

        if parts.is_empty() {
            "0 sec.".to_string()
        } else {
            parts.join(" ")
        }
    }
}

pub fn is_working_time(time: &NaiveTime) -> bool {
    (WORK_START_HOUR..WORK_END_HOUR).contains(&time.hour())
}

pub fn is_weekend(date: &NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn add_days(date: &NaiveDateTime, days: i64) -> NaiveDateTime {
    *date + TimeDelta::days(days)
}

pub fn start_of_day(date: &NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last millisecond of the day
pub fn end_of_day(date: &NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN))
}
