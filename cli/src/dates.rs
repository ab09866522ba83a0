use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate};
use parse_datetime::{parse_datetime, ParseDateTimeError};

use crate::errors::AppError;
use crate::AppResult;

/// Wrapper for parse_datetime that also allows parses months.
/// A bare month name resolves to its first day in the current year.
pub fn parse_datetime_extended(input: &str) -> Result<DateTime<FixedOffset>, ParseDateTimeError> {
    let now = Local::now();
    let extended_result = match input.to_lowercase().as_str() {
        "jan" | "january" => format!("{}-01-01", now.year()),
        "feb" | "february" => format!("{}-02-01", now.year()),
        "mar" | "march" => format!("{}-03-01", now.year()),
        "apr" | "april" => format!("{}-04-01", now.year()),
        "may" => format!("{}-05-01", now.year()),
        "jun" | "june" => format!("{}-06-01", now.year()),
        "jul" | "july" => format!("{}-07-01", now.year()),
        "aug" | "august" => format!("{}-08-01", now.year()),
        "sep" | "september" => format!("{}-09-01", now.year()),
        "oct" | "october" => format!("{}-10-01", now.year()),
        "nov" | "november" => format!("{}-11-01", now.year()),
        "dec" | "december" => format!("{}-12-01", now.year()),
        _ => input.to_string(),
    };

    parse_datetime(&extended_result)
}

/// Parses a calendar day. Strict `YYYY-MM-DD` first, then anything
/// [parse_datetime_extended] understands ("today", "next friday", "march", ...).
pub fn parse_date(input: &str) -> AppResult<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_datetime_extended(input)
        .map(|dt| dt.date_naive())
        .map_err(|_| AppError::MalformedDate(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_iso_dates() {
        assert_eq!(
            parse_date("2024-03-08").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()
        );
    }

    #[test]
    fn month_names_resolve_to_first_day() {
        let date = parse_date("March").unwrap();
        assert_eq!((date.month(), date.day()), (3, 1));
        assert_eq!(date.year(), Local::now().year());
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            parse_date("the day after never"),
            Err(AppError::MalformedDate(_))
        ));
    }
}
