mod defaults;

pub use defaults::*;

use std::path::Path;
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use kalcore::config::{self as core_config, CoreConfig, ReadError};
use thiserror::Error;

use crate::display::Color;
use crate::AppResult;

pub type ConfigParseResult<T> = Result<T, ConfigReadError>;

/// Represents an error during reading a config file
#[derive(Debug, Error)]
pub enum ConfigReadError {
    #[error("{0}")]
    Core(#[from] ReadError),

    #[error("Color parse error: {0}")]
    ColorParseErr(String),

    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

pub struct ColorsConfig {
    pub(crate) header: Color,
    pub(crate) today: Color,
    pub(crate) selected: Color,
    pub(crate) weekend: Color,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            header: DEFAULT_COLOR_HEADER,
            today: DEFAULT_COLOR_TODAY,
            selected: DEFAULT_COLOR_SELECTED,
            weekend: DEFAULT_COLOR_WEEKEND,
        }
    }
}

pub struct DisplayConfig {
    pub(crate) date_fmt: String,
    pub(crate) marker: String,
    pub(crate) max_markers: usize,
    pub(crate) colors: ColorsConfig,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_fmt: DEFAULT_DATE_FORMAT.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            max_markers: DEFAULT_MAX_MARKERS,
            colors: ColorsConfig::default(),
        }
    }
}

#[derive(Default)]
pub struct CliConfig {
    pub(crate) core: CoreConfig,
    pub(crate) display: DisplayConfig,
}

impl CliConfig {
    pub fn new() -> Self {
        Self {
            ..Default::default()
        }
    }
}

const KEY_DISPLAY: &str = "display";
const KEY_DATE_FMT: &str = "date_fmt";
const KEY_MARKER: &str = "marker";
const KEY_MAX_MARKERS: &str = "max_markers";
const KEY_COLORS: &str = "colors";
const KEY_COLOR_HEADER: &str = "header";
const KEY_COLOR_TODAY: &str = "today";
const KEY_COLOR_SELECTED: &str = "selected";
const KEY_COLOR_WEEKEND: &str = "weekend";

fn parse_color(colors: &toml::Value, key: &str, target: &mut Color) -> ConfigParseResult<()> {
    if let Some(val) = colors.get(key).and_then(toml::Value::as_str) {
        *target = Color::from_str(val).map_err(|_| {
            ConfigReadError::ColorParseErr(format!(
                "Invalid color for {KEY_DISPLAY}.{KEY_COLORS}.{key}: {val}"
            ))
        })?;
    }
    Ok(())
}

fn parse_string<'v>(val: &'v toml::Value, key: &str) -> ConfigParseResult<&'v str> {
    val.as_str()
        .ok_or_else(|| ConfigReadError::InvalidValue(format!("{KEY_DISPLAY}.{key}: {val}")))
}

/// Parses CLI configurations from a toml table.
/// The `[calendar]` and `[clock]` sections are handled by the core parser.
pub fn parse_config(toml: &toml::Table) -> ConfigParseResult<CliConfig> {
    let mut conf = CliConfig::new();
    conf.core = core_config::parse_config(toml)?;

    if let Some(display_cfg) = toml.get(KEY_DISPLAY) {
        if let Some(val) = display_cfg.get(KEY_DATE_FMT) {
            let fmt = parse_string(val, KEY_DATE_FMT)?;
            if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
                return Err(ConfigReadError::InvalidValue(format!(
                    "{KEY_DISPLAY}.{KEY_DATE_FMT}: {val}"
                )));
            }
            conf.display.date_fmt = fmt.to_string();
        }

        if let Some(val) = display_cfg.get(KEY_MARKER) {
            conf.display.marker = parse_string(val, KEY_MARKER)?.to_string();
        }

        if let Some(val) = display_cfg.get(KEY_MAX_MARKERS) {
            conf.display.max_markers = val
                .as_integer()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    ConfigReadError::InvalidValue(format!("{KEY_DISPLAY}.{KEY_MAX_MARKERS}: {val}"))
                })? as usize;
        }

        if let Some(colors) = display_cfg.get(KEY_COLORS) {
            parse_color(colors, KEY_COLOR_HEADER, &mut conf.display.colors.header)?;
            parse_color(colors, KEY_COLOR_TODAY, &mut conf.display.colors.today)?;
            parse_color(colors, KEY_COLOR_SELECTED, &mut conf.display.colors.selected)?;
            parse_color(colors, KEY_COLOR_WEEKEND, &mut conf.display.colors.weekend)?;
        }
    }

    Ok(conf)
}

/// Reads the config at `config_path`, falling back to `~/.kalconf.toml`, then to defaults.
pub fn get_config(config_path: Option<&Path>) -> AppResult<CliConfig> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => core_config::get_home_default(),
    };

    let conf = match path {
        Some(path) => parse_config(&core_config::read_file(&path).map_err(ConfigReadError::from)?)?,
        None => CliConfig::default(),
    };
    Ok(conf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_parses_to_defaults() {
        let table: toml::Table = DEFAULT_CONFIG.parse().unwrap();
        let conf = parse_config(&table).unwrap();
        assert_eq!(conf.core, CoreConfig::default());
        assert_eq!(conf.display.date_fmt, DEFAULT_DATE_FORMAT);
        assert_eq!(conf.display.marker, DEFAULT_MARKER);
        assert_eq!(conf.display.max_markers, DEFAULT_MAX_MARKERS);
        assert_eq!(conf.display.colors.today, DEFAULT_COLOR_TODAY);
        assert_eq!(conf.display.colors.weekend, DEFAULT_COLOR_WEEKEND);
    }

    #[test]
    fn bad_color_is_rejected() {
        let table: toml::Table = "[display.colors]\ntoday = \"orange-ish\"".parse().unwrap();
        assert!(matches!(
            parse_config(&table),
            Err(ConfigReadError::ColorParseErr(_))
        ));
    }

    #[test]
    fn bad_date_format_is_rejected() {
        let table: toml::Table = "[display]\ndate_fmt = \"%Q\"".parse().unwrap();
        assert!(matches!(
            parse_config(&table),
            Err(ConfigReadError::InvalidValue(_))
        ));

        let table: toml::Table = "[display]\ndate_fmt = \"%Y/%m/%d\"".parse().unwrap();
        let conf = parse_config(&table).unwrap();
        let displayer = crate::display::Displayer::new(&conf);
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
        assert_eq!(displayer.format_date(&date), "2024/03/08");
    }

    #[test]
    fn wrong_string_types_are_rejected() {
        let table: toml::Table = "[display]\nmarker = 3".parse().unwrap();
        assert!(matches!(
            parse_config(&table),
            Err(ConfigReadError::InvalidValue(_))
        ));

        let table: toml::Table = "[display]\ndate_fmt = true".parse().unwrap();
        assert!(matches!(
            parse_config(&table),
            Err(ConfigReadError::InvalidValue(_))
        ));
    }

    #[test]
    fn zero_markers_is_rejected() {
        let table: toml::Table = "[display]\nmax_markers = 0".parse().unwrap();
        assert!(matches!(
            parse_config(&table),
            Err(ConfigReadError::InvalidValue(_))
        ));
    }
}
