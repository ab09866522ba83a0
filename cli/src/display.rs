use std::str::FromStr;

use chrono::{Local, NaiveDate};
use colored::{ColoredString, Colorize};
use kalcore::calendar::event::{Event, EventColor};
use kalcore::calendar::grid::{DayCell, GridCell, MonthGrid};
use kalcore::time::clock::{Clock, TimeDifference};
use kalcore::time::reltime::{self, TimeFormat};
use kalcore::time::DTL;

use crate::config::{CliConfig, DEFAULT_CONFIG};

/// Width of a single day column, including spacing
const CELL_WIDTH: usize = 6;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = ();

    /// Parses `#RRGGBB`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').ok_or(())?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ());
        Ok(Color::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl From<EventColor> for Color {
    fn from(value: EventColor) -> Self {
        let (r, g, b) = value.rgb();
        Color::new(r, g, b)
    }
}

trait Paint {
    fn paint(self, color: Color) -> ColoredString;
}

impl Paint for &str {
    fn paint(self, color: Color) -> ColoredString {
        self.truecolor(color.r, color.g, color.b)
    }
}

/// Writes calendar output to stdout according to the display config.
pub struct Displayer<'a> {
    config: &'a CliConfig,
}

impl<'a> Displayer<'a> {
    pub fn new(config: &'a CliConfig) -> Self {
        Self { config }
    }

    pub fn format_date(&self, date: &NaiveDate) -> String {
        date.format(&self.config.display.date_fmt).to_string()
    }

    fn day_label(&self, cell: &DayCell) -> ColoredString {
        let colors = &self.config.display.colors;
        let text = format!("{:>2}", cell.day);
        let mut label = if cell.is_today {
            text.as_str().paint(colors.today).bold()
        } else if cell.is_weekend {
            text.as_str().paint(colors.weekend)
        } else {
            text.as_str().normal()
        };
        if cell.is_selected {
            label = label.on_truecolor(colors.selected.r, colors.selected.g, colors.selected.b);
        }
        label
    }

    /// Marker line of a cell, padded to [CELL_WIDTH]
    fn day_markers(&self, cell: &DayCell) -> String {
        let max = self.config.display.max_markers.min(CELL_WIDTH - 1);
        let shown = if cell.markers.len() > max { max - 1 } else { cell.markers.len() };

        let mut line = String::new();
        for color in cell.markers.iter().take(shown) {
            line.push_str(&self.config.display.marker.as_str().paint((*color).into()).to_string());
        }
        let mut width = shown;
        if cell.markers.len() > shown {
            line.push('+');
            width += 1;
        }
        line.push_str(&" ".repeat(CELL_WIDTH.saturating_sub(width)));
        line
    }

    pub fn print_calendar(&self, grid: &MonthGrid) {
        let title = grid.title();
        let width = CELL_WIDTH * 7;
        let pad = width.saturating_sub(title.len()) / 2;
        println!(
            "{}{}",
            " ".repeat(pad),
            title.as_str().paint(self.config.display.colors.header).bold()
        );

        let header: String = grid
            .weekday_labels()
            .iter()
            .map(|label| format!("{:<width$}", label, width = CELL_WIDTH))
            .collect();
        println!("{}", header.as_str().paint(self.config.display.colors.header));

        for row in grid.rows() {
            let mut days = String::new();
            let mut markers = String::new();
            for cell in row {
                match cell {
                    GridCell::Blank => {
                        days.push_str(&" ".repeat(CELL_WIDTH));
                        markers.push_str(&" ".repeat(CELL_WIDTH));
                    }
                    GridCell::Day(day) => {
                        days.push_str(&self.day_label(day).to_string());
                        days.push_str(&" ".repeat(CELL_WIDTH - 2));
                        markers.push_str(&self.day_markers(day));
                    }
                }
            }
            println!("{}", days.trim_end());
            println!("{}", markers.trim_end());
        }

        println!();
        println!("{}", self.day_events_title(&grid.selected));
        self.print_events(&grid.day_events);
    }

    pub fn day_events_title(&self, date: &NaiveDate) -> ColoredString {
        format!("Events on {}:", self.format_date(date)).bold()
    }

    pub fn print_events<'e, I>(&self, events: I)
    where
        I: IntoIterator<Item = &'e Event>,
    {
        let mut any = false;
        for event in events {
            any = true;
            println!(" {}", event);
        }
        if !any {
            println!(" {}", "No events".dimmed());
        }
    }

    pub fn print_added(&self, event: &Event) {
        println!("{} {}", "Added".green().bold(), event);
    }

    /// Hint shown after selecting a day, since the CLI has no interactive prompt
    pub fn print_add_hint(&self, date_key: &str) {
        println!(
            "{}",
            format!("Add an event with: kalcli add {date_key} <title>").dimmed()
        );
    }

    pub fn print_clock(&self, clock: &Clock, now: &DTL) {
        println!("{}", clock.display(now));
    }

    pub fn print_since(&self, then: &DTL, now: &DTL) {
        let diff = TimeDifference::between(&then.naive_local(), &now.naive_local());
        println!(
            "{} ({})",
            diff.format_duration(),
            reltime::format_time(then, now, TimeFormat::Relative)
        );
    }

    pub fn print_last_saved(&self, saved: Option<DTL>) {
        if let Some(saved) = saved {
            let text = reltime::format_time(&saved, &Local::now(), TimeFormat::DateTime);
            println!("{}", format!("Saved at {text}").dimmed());
        }
    }

    pub fn template_cfg(&self) -> &'static str {
        DEFAULT_CONFIG
    }
}
