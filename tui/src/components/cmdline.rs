use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

const PROMPT_STYLE: Style = Style::new().fg(Color::Blue);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Yellow);

/// Bottom line: agenda filter input, or the last message.
#[derive(Default)]
pub struct CmdlineComponent {
    input: String,
    focused: bool,
    message: Option<String>,
}

impl CmdlineComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Starts editing, keeping the current filter text
    pub fn focus(&mut self) {
        self.focused = true;
        self.message = None;
    }

    pub fn unfocus(&mut self) {
        self.focused = false;
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop(&mut self) {
        self.input.pop();
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Cursor position at the end of the filter input
    pub fn get_cursor_pos(&self, area: Rect) -> Position {
        let offset = 1 + self.input.chars().count() as u16;
        Position::new(area.x + offset.min(area.width.saturating_sub(1)), area.y)
    }
}

impl Widget for &CmdlineComponent {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = if self.focused {
            Line::from(vec![Span::styled("/", PROMPT_STYLE), Span::raw(self.input.as_str())])
        } else if let Some(message) = &self.message {
            Line::from(Span::styled(message.as_str(), MESSAGE_STYLE))
        } else if !self.input.is_empty() {
            Line::from(vec![Span::styled("filter: ", PROMPT_STYLE), Span::raw(self.input.as_str())])
        } else {
            Line::default()
        };
        line.render(area, buf);
    }
}
