use kalcore::calendar::event::{Event, EventColor};
use kalcore::filter;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{palette::tailwind::SLATE, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget},
};

use super::calendar_view::{event_line, swatch};

const SELECTED_STYLE: Style = Style::new().bg(SLATE.c800).add_modifier(Modifier::BOLD);

/// Every stored event in date order, narrowed by a text query and a color.
#[derive(Default)]
pub struct AgendaComponent {
    color: Option<EventColor>,
    list_state: ListState,
}

impl AgendaComponent {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select_first();
        Self {
            color: None,
            list_state,
        }
    }

    pub fn color(&self) -> Option<EventColor> {
        self.color
    }

    /// None, then every swatch in palette order, then None again
    pub fn cycle_color(&mut self) -> Option<EventColor> {
        self.color = match self.color {
            None => Some(EventColor::ALL[0]),
            Some(color) if color.next() == EventColor::ALL[0] => None,
            Some(color) => Some(color.next()),
        };
        self.list_state.select_first();
        self.color
    }

    pub fn select_next(&mut self) {
        self.list_state.select_next();
    }

    pub fn select_previous(&mut self) {
        self.list_state.select_previous();
    }

    pub fn reset_selection(&mut self) {
        self.list_state.select_first();
    }

    pub fn render(&mut self, events: &[Event], query: &str, area: Rect, buf: &mut Buffer) {
        let rows = filter::agenda(events, query, self.color);

        let mut title = vec![Span::raw(format!(" Agenda ({}) ", rows.len()))];
        if let Some(color) = self.color {
            title.push(Span::styled(format!("[{color}] "), Style::new().fg(swatch(color))));
        }
        let block = Block::default().borders(Borders::ALL).title(Line::from(title));

        let items: Vec<ListItem> = rows
            .into_iter()
            .map(|event| ListItem::new(event_line(event, true)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(SELECTED_STYLE)
            .highlight_symbol("> ");
        StatefulWidget::render(list, area, buf, &mut self.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_filter_cycles_back_to_none() {
        let mut agenda = AgendaComponent::new();
        let mut seen = Vec::new();
        for _ in 0..=EventColor::ALL.len() {
            seen.push(agenda.cycle_color());
        }
        assert_eq!(seen[0], Some(EventColor::Blue));
        assert_eq!(seen[4], Some(EventColor::Purple));
        assert_eq!(seen[5], None);
    }
}
