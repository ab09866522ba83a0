use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::Parser;

/// Command line arguments of the TUI
#[derive(Parser, Debug)]
#[command(version, about = "TUI for Kalendar")]
pub struct Args {
    /// Use the .kalendar store under this directory
    #[arg(short, long)]
    pub(crate) local: Option<PathBuf>,

    /// Use the store in the home directory
    #[arg(short, long)]
    pub(crate) global: bool,

    /// Configuration file to use instead of ~/.kalconf.toml
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Day to select on startup
    pub(crate) date: Option<String>,
}

impl Args {
    /// Parses the optional start date: `YYYY-MM-DD` or anything parse_datetime accepts
    pub fn start_date(&self) -> Result<Option<NaiveDate>> {
        let Some(input) = &self.date else {
            return Ok(None);
        };
        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            return Ok(Some(date));
        }
        parse_datetime::parse_datetime(input)
            .map(|dt| Some(dt.date_naive()))
            .map_err(|_| anyhow!("Malformed date: {input}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_start_date() {
        let args = Args::parse_from(["kaltui", "--global", "2024-03-08"]);
        assert!(args.global);
        assert_eq!(
            args.start_date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 8)
        );

        let none = Args::parse_from(["kaltui"]);
        assert_eq!(none.start_date().unwrap(), None);

        let bad = Args::parse_from(["kaltui", "not a date at all"]);
        assert!(bad.start_date().is_err());
    }
}
