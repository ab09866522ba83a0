//! Baked-in defaults for the kalcli's configuration.

use crate::display::Color;

// Display section
pub const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y";
pub const DEFAULT_MARKER: &str = "•";
pub const DEFAULT_MAX_MARKERS: usize = 4;

pub const DEFAULT_COLOR_HEADER: Color = Color::new(90, 126, 222); // #5A7EDE
pub const DEFAULT_COLOR_TODAY: Color = Color::new(254, 97, 0); // #FE6100
pub const DEFAULT_COLOR_SELECTED: Color = Color::new(120, 94, 240); // #785EF0
pub const DEFAULT_COLOR_WEEKEND: Color = Color::new(220, 53, 69); // #DC3545

pub const DEFAULT_CONFIG: &str = include_str!("default_cfg.toml");
