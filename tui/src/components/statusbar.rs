use chrono::Local;
use kalcore::time::clock::Clock;
use kalcore::time::reltime::{self, TimeFormat};
use kalcore::time::DTL;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const CLOCK_STYLE: Style = Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD);
const SAVED_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Live clock on the left, time of the last save on the right.
/// Holds a snapshot that is refreshed on every tick.
pub struct StatusBarComponent {
    clock: Clock,
    now: DTL,
    last_saved: Option<DTL>,
}

impl StatusBarComponent {
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            now: Local::now(),
            last_saved: None,
        }
    }

    pub fn update(&mut self, now: DTL, last_saved: Option<DTL>) {
        self.now = now;
        self.last_saved = last_saved;
    }

    /// Switches 12/24-hour format and returns the name of the new one
    pub fn toggle_format(&mut self) -> &'static str {
        self.clock.toggle_format();
        self.clock.format_name()
    }

    fn saved_text(&self) -> String {
        match self.last_saved {
            Some(saved) => format!(
                "saved {}",
                reltime::format_time(&saved, &self.now, TimeFormat::Relative)
            ),
            None => "not saved yet".to_string(),
        }
    }
}

impl Widget for &StatusBarComponent {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::TOP);
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(Line::from(Span::styled(self.clock.display(&self.now), CLOCK_STYLE)))
            .render(inner, buf);
        Paragraph::new(Line::from(Span::styled(self.saved_text(), SAVED_STYLE)))
            .alignment(Alignment::Right)
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn saved_text_is_relative() {
        let now = Local.with_ymd_and_hms(2024, 3, 8, 12, 0, 0).unwrap();
        let mut bar = StatusBarComponent::new(Clock::default());
        bar.update(now, None);
        assert_eq!(bar.saved_text(), "not saved yet");
        bar.update(now, Some(now - Duration::minutes(5)));
        assert_eq!(bar.saved_text(), "saved 5 min. ago");
    }

    #[test]
    fn toggles_clock_format() {
        let mut bar = StatusBarComponent::new(Clock::default());
        let first = bar.toggle_format();
        let second = bar.toggle_format();
        assert_ne!(first, second);
    }
}
