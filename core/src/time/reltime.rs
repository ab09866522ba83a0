use std::str::FromStr;

use chrono::{DateTime, TimeZone};

/// How a timestamp should be shown
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TimeFormat {
    /// `just now`, `5 min. ago`, ... falling back to the date after a week
    #[default]
    Relative,
    DateTime,
    Date,
    Time,
}

impl FromStr for TimeFormat {
    type Err = std::convert::Infallible;

    /// Unknown names fall back to [TimeFormat::DateTime]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "relative" => TimeFormat::Relative,
            "date" => TimeFormat::Date,
            "time" => TimeFormat::Time,
            _ => TimeFormat::DateTime,
        })
    }
}

pub const DATE_FMT: &str = "%d.%m.%Y";
pub const TIME_FMT: &str = "%H:%M";
pub const DATETIME_FMT: &str = "%d.%m.%Y, %H:%M:%S";

/// Formats `then` as seen from `now`.
pub fn format_time<Tz: TimeZone>(then: &DateTime<Tz>, now: &DateTime<Tz>, format: TimeFormat) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match format {
        TimeFormat::Relative => {
            let diff = now.clone().signed_duration_since(then.clone());
            let minutes = diff.num_minutes();
            let hours = diff.num_hours();
            let days = diff.num_days();

            if minutes < 1 {
                "just now".to_string()
            } else if minutes < 60 {
                format!("{minutes} min. ago")
            } else if hours < 24 {
                format!("{hours} h. ago")
            } else if days < 7 {
                format!("{days} d. ago")
            } else {
                then.format(DATE_FMT).to_string()
            }
        }
        TimeFormat::DateTime => then.format(DATETIME_FMT).to_string(),
        TimeFormat::Date => then.format(DATE_FMT).to_string(),
        TimeFormat::Time => then.format(TIME_FMT).to_string(),
    }
}
