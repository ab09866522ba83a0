use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Tabs, Widget},
};

use crate::events::TabDirection;

const TAB_TITLES: [&str; 2] = ["Calendar", "Agenda"];
const HIGHLIGHT_STYLE: Style = Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TabView {
    #[default]
    Calendar,
    Agenda,
}

impl TabView {
    fn index(&self) -> usize {
        match self {
            TabView::Calendar => 0,
            TabView::Agenda => 1,
        }
    }
}

#[derive(Default)]
pub struct TabComponent {
    current_view: TabView,
}

impl TabComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn curr_view(&self) -> &TabView {
        &self.current_view
    }

    /// Two views, so either direction flips between them.
    pub fn switch_view(&mut self, direction: TabDirection) {
        self.current_view = match (self.current_view, direction) {
            (TabView::Calendar, _) => TabView::Agenda,
            (TabView::Agenda, _) => TabView::Calendar,
        };
    }
}

impl Widget for &TabComponent {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Tabs::new(TAB_TITLES)
            .select(self.current_view.index())
            .highlight_style(HIGHLIGHT_STYLE)
            .divider("|")
            .render(area, buf);
    }
}
