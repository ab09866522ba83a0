use std::fs::OpenOptions;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::calendar::{CalendarOptions, DEFAULT_PROMPT_DELAY};
use crate::time::clock::Clock;

/// The default config file name
pub const DEFAULT_FILENAME: &str = ".kalconf.toml";

pub const DEFAULT_HOUR12: bool = false;
pub const DEFAULT_SHOW_SECONDS: bool = true;
pub const DEFAULT_HOLIDAYS: bool = true;

const KEY_CALENDAR: &str = "calendar";
const KEY_PROMPT_DELAY_MS: &str = "prompt_delay_ms";
const KEY_HOLIDAYS: &str = "holidays";
const KEY_CLOCK: &str = "clock";
const KEY_HOUR12: &str = "hour12";
const KEY_SHOW_SECONDS: &str = "show_seconds";

/// Returns the default config file located at the user's home directory
/// If the file does not exist then it returns `None`
pub fn get_home_default() -> Option<PathBuf> {
    home::home_dir()
        .map(|mut pathbuf| {
            pathbuf.push(DEFAULT_FILENAME);
            pathbuf
        })
        .filter(|pb| pb.exists() && pb.is_file())
}

/// Parses a file at path into a toml table
pub fn read_file(path: &Path) -> Result<toml::Table, ReadError> {
    if !path.exists() {
        return Err(ReadError::NonexistantFile(path.to_path_buf()));
    }

    let mut file = OpenOptions::new().read(true).open(path)?;

    let mut string = String::new();
    file.read_to_string(&mut string)?;

    Ok(string.parse::<toml::Table>()?)
}

/// Represents an error during reading a config file
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("File does not exist: {0}")]
    NonexistantFile(PathBuf),

    #[error("I/O error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("TOML Deserialization error: {0}")]
    TOMLDeserializeErr(#[from] toml::de::Error),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Parses core configurations from a toml table
/// Missing values are replaced with defaults, values of the wrong type are errors.
pub fn parse_config(toml: &toml::Table) -> Result<CoreConfig, ReadError> {
    let mut conf = CoreConfig::new();

    if let Some(calendar) = toml.get(KEY_CALENDAR) {
        if let Some(val) = calendar.get(KEY_PROMPT_DELAY_MS) {
            let ms = val
                .as_integer()
                .filter(|ms| *ms >= 0)
                .ok_or_else(|| invalid(KEY_CALENDAR, KEY_PROMPT_DELAY_MS, val))?;
            conf.calendar.prompt_delay = Duration::from_millis(ms as u64);
        }
        if let Some(val) = calendar.get(KEY_HOLIDAYS) {
            conf.calendar.holidays = val
                .as_bool()
                .ok_or_else(|| invalid(KEY_CALENDAR, KEY_HOLIDAYS, val))?;
        }
    }

    if let Some(clock) = toml.get(KEY_CLOCK) {
        if let Some(val) = clock.get(KEY_HOUR12) {
            conf.clock.hour12 = val
                .as_bool()
                .ok_or_else(|| invalid(KEY_CLOCK, KEY_HOUR12, val))?;
        }
        if let Some(val) = clock.get(KEY_SHOW_SECONDS) {
            conf.clock.show_seconds = val
                .as_bool()
                .ok_or_else(|| invalid(KEY_CLOCK, KEY_SHOW_SECONDS, val))?;
        }
    }

    Ok(conf)
}

fn invalid(section: &str, key: &str, val: &toml::Value) -> ReadError {
    ReadError::InvalidValue(format!("{section}.{key}"), val.to_string())
}

/// Loads `path` if given, otherwise the home default, otherwise built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<CoreConfig, ReadError> {
    match path.map(Path::to_path_buf).or_else(get_home_default) {
        Some(path) => parse_config(&read_file(&path)?),
        None => Ok(CoreConfig::default()),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    pub calendar: CalendarOptions,
    pub clock: Clock,
}

impl CoreConfig {
    pub fn new() -> Self {
        Self {
            calendar: CalendarOptions {
                prompt_delay: DEFAULT_PROMPT_DELAY,
                holidays: DEFAULT_HOLIDAYS,
            },
            clock: Clock::new(DEFAULT_HOUR12, DEFAULT_SHOW_SECONDS),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_gives_defaults() {
        let conf = parse_config(&toml::Table::new()).unwrap();
        assert_eq!(conf, CoreConfig::default());
    }

    #[test]
    fn reads_sections() {
        let table: toml::Table = r#"
            [calendar]
            prompt_delay_ms = 0
            holidays = false

            [clock]
            hour12 = true
        "#
        .parse()
        .unwrap();
        let conf = parse_config(&table).unwrap();
        assert_eq!(conf.calendar.prompt_delay, Duration::ZERO);
        assert!(!conf.calendar.holidays);
        assert!(conf.clock.hour12);
        assert!(conf.clock.show_seconds);
    }

    #[test]
    fn wrong_type_is_error() {
        let table: toml::Table = "[clock]\nhour12 = \"yes\"".parse().unwrap();
        assert!(matches!(parse_config(&table), Err(ReadError::InvalidValue(..))));
    }

    #[test]
    fn missing_explicit_file() {
        let result = load_config(Some(Path::new("/nonexistent/kalconf.toml")));
        assert!(matches!(result, Err(ReadError::NonexistantFile(_))));
    }
}
