use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Display palette for event markers. Carries no meaning beyond rendering.
#[derive(Copy, Clone, Default, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, ValueEnum)]
pub enum EventColor {
    #[default]
    #[serde(rename = "#007bff")]
    Blue,
    #[serde(rename = "#28a745")]
    Green,
    #[serde(rename = "#dc3545")]
    Red,
    #[serde(rename = "#ffc107")]
    Yellow,
    #[serde(rename = "#6f42c1")]
    Purple,
}

impl EventColor {
    pub const ALL: [EventColor; 5] = [
        EventColor::Blue,
        EventColor::Green,
        EventColor::Red,
        EventColor::Yellow,
        EventColor::Purple,
    ];

    /// Returns the swatch as an RGB triple
    pub const fn rgb(&self) -> (u8, u8, u8) {
        match self {
            EventColor::Blue => (0x00, 0x7b, 0xff),
            EventColor::Green => (0x28, 0xa7, 0x45),
            EventColor::Red => (0xdc, 0x35, 0x45),
            EventColor::Yellow => (0xff, 0xc1, 0x07),
            EventColor::Purple => (0x6f, 0x42, 0xc1),
        }
    }

    pub const fn hex(&self) -> &'static str {
        match self {
            EventColor::Blue => "#007bff",
            EventColor::Green => "#28a745",
            EventColor::Red => "#dc3545",
            EventColor::Yellow => "#ffc107",
            EventColor::Purple => "#6f42c1",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            EventColor::Blue => "blue",
            EventColor::Green => "green",
            EventColor::Red => "red",
            EventColor::Yellow => "yellow",
            EventColor::Purple => "purple",
        }
    }

    /// Next swatch in palette order, wrapping around.
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl FromStr for EventColor {
    type Err = String;

    /// Accepts either the swatch name or its hex code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.label() == lower || c.hex() == lower)
            .ok_or_else(|| format!("unknown color '{s}'"))
    }
}

impl fmt::Display for EventColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub date: NaiveDate,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub color: EventColor,
}

impl Event {
    pub fn new(date: NaiveDate, title: impl Into<String>) -> Self {
        Self {
            date,
            title: title.into(),
            time: None,
            description: None,
            color: EventColor::default(),
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: EventColor) -> Self {
        self.color = color;
        self
    }

    /// The storage form of the date, `YYYY-MM-DD`
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// All textual fields joined, used for free-text filtering
    pub fn row_text(&self) -> String {
        let mut text = self.date_key();
        if let Some(ref time) = self.time {
            text.push(' ');
            text.push_str(time);
        }
        text.push(' ');
        text.push_str(&self.title);
        if let Some(ref description) = self.description {
            text.push(' ');
            text.push_str(description);
        }
        text
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.color.rgb();
        let marker = "●".truecolor(r, g, b);
        let when = match self.time {
            Some(ref time) => format!("{} {}", self.date_key(), time),
            None => self.date_key(),
        }
        .bright_blue();
        write!(f, "{} {} {}", marker, when, self.title)?;
        if let Some(ref description) = self.description {
            write!(f, " - {}", description.dimmed())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_storage_layout() {
        let event = Event::new(NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(), "A")
            .with_color(EventColor::Red);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r##"{"date":"2024-03-08","title":"A","color":"#dc3545"}"##);
    }

    #[test]
    fn deserializes_optional_fields() {
        let json = r##"{"date":"2024-03-08","title":"Meeting","time":"10:30","description":"Room 4","color":"#6f42c1"}"##;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.time.as_deref(), Some("10:30"));
        assert_eq!(event.description.as_deref(), Some("Room 4"));
        assert_eq!(event.color, EventColor::Purple);

        let bare: Event = serde_json::from_str(r#"{"date":"2024-03-08","title":"B"}"#).unwrap();
        assert_eq!(bare.color, EventColor::Blue);
        assert!(bare.time.is_none());
    }

    #[test]
    fn rejects_unknown_color() {
        let json = r##"{"date":"2024-03-08","title":"A","color":"#000000"}"##;
        assert!(serde_json::from_str::<Event>(json).is_err());
    }

    #[test]
    fn color_from_name_or_hex() {
        assert_eq!("Green".parse::<EventColor>(), Ok(EventColor::Green));
        assert_eq!("#ffc107".parse::<EventColor>(), Ok(EventColor::Yellow));
        assert!("teal".parse::<EventColor>().is_err());
        assert_eq!(EventColor::Purple.next(), EventColor::Blue);
    }
}
