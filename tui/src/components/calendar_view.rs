use chrono::NaiveDate;
use kalcore::calendar::event::{Event, EventColor};
use kalcore::calendar::grid::{DayCell, GridCell, MonthGrid};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

/// Columns taken by one day, spacing included
const CELL_WIDTH: u16 = 6;
/// Day number on the first line, markers on the second
const CELL_HEIGHT: u16 = 2;
const MAX_MARKERS: usize = 4;
const MARKER: &str = "•";

const HEADER_STYLE: Style = Style::new().fg(Color::Rgb(0x5A, 0x7E, 0xDE)).add_modifier(Modifier::BOLD);
const TODAY_STYLE: Style = Style::new().fg(Color::Rgb(0xFE, 0x61, 0x00)).add_modifier(Modifier::BOLD);
const SELECTED_STYLE: Style = Style::new().bg(Color::Rgb(0x78, 0x5E, 0xF0)).add_modifier(Modifier::BOLD);
const WEEKEND_STYLE: Style = Style::new().fg(Color::Rgb(0xDC, 0x35, 0x45));
const DETAIL_STYLE: Style = Style::new().fg(Color::DarkGray);

pub(crate) fn swatch(color: EventColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

/// One agenda or day-panel row: marker, date or time, title and description.
pub(crate) fn event_line(event: &Event, with_date: bool) -> Line<'static> {
    let mut spans = vec![Span::styled(format!("{MARKER} "), Style::new().fg(swatch(event.color)))];
    if with_date {
        spans.push(Span::styled(format!("{} ", event.date_key()), HEADER_STYLE));
    }
    if let Some(time) = &event.time {
        spans.push(Span::styled(format!("{time} "), HEADER_STYLE));
    }
    spans.push(Span::raw(event.title.clone()));
    if let Some(description) = &event.description {
        spans.push(Span::styled(format!(" - {description}"), DETAIL_STYLE));
    }
    Line::from(spans)
}

fn day_style(cell: &DayCell) -> Style {
    let style = if cell.is_today {
        TODAY_STYLE
    } else if cell.is_weekend {
        WEEKEND_STYLE
    } else {
        Style::new()
    };
    if cell.is_selected {
        style.patch(SELECTED_STYLE)
    } else {
        style
    }
}

fn marker_line(cell: &DayCell) -> Line<'static> {
    let shown = if cell.markers.len() > MAX_MARKERS {
        MAX_MARKERS - 1
    } else {
        cell.markers.len()
    };
    let mut spans: Vec<Span> = cell
        .markers
        .iter()
        .take(shown)
        .map(|color| Span::styled(MARKER, Style::new().fg(swatch(*color))))
        .collect();
    if cell.markers.len() > shown {
        spans.push(Span::raw("+"));
    }
    Line::from(spans)
}

/// Month grid plus the event list of the selected day.
///
/// Remembers where every day was drawn so mouse clicks can be mapped back to dates.
#[derive(Default)]
pub struct CalendarViewComponent {
    cell_rects: Vec<(Rect, NaiveDate)>,
}

impl CalendarViewComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Date drawn under a terminal position in the last frame
    pub fn date_at(&self, column: u16, row: u16) -> Option<NaiveDate> {
        let position = Position::new(column, row);
        self.cell_rects
            .iter()
            .find(|(rect, _)| rect.contains(position))
            .map(|(_, date)| *date)
    }

    pub fn render(&mut self, grid: &MonthGrid, date_fmt: &str, area: Rect, buf: &mut Buffer) {
        let [grid_area, events_area] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(CELL_WIDTH * 7 + 2), Constraint::Fill(1)])
            .areas(area);

        self.render_grid(grid, grid_area, buf);
        render_day_events(grid, date_fmt, events_area, buf);
    }

    fn render_grid(&mut self, grid: &MonthGrid, area: Rect, buf: &mut Buffer) {
        self.cell_rects.clear();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(Line::from(Span::styled(format!(" {} ", grid.title()), HEADER_STYLE)).centered());
        let inner = block.inner(area);
        block.render(area, buf);

        let header: Vec<Span> = grid
            .weekday_labels()
            .iter()
            .map(|label| Span::styled(format!("{:<width$}", label, width = CELL_WIDTH as usize), HEADER_STYLE))
            .collect();
        Line::from(header).render(inner, buf);

        for (row_idx, row) in grid.rows().enumerate() {
            let y = inner.y + 1 + row_idx as u16 * CELL_HEIGHT;
            if y + CELL_HEIGHT > inner.bottom() {
                break;
            }
            for (col_idx, cell) in row.iter().enumerate() {
                let GridCell::Day(day) = cell else {
                    continue;
                };
                let x = inner.x + col_idx as u16 * CELL_WIDTH;
                let rect = Rect::new(x, y, CELL_WIDTH, CELL_HEIGHT).intersection(inner);
                self.cell_rects.push((rect, day.date));

                let label = Line::from(Span::styled(format!("{:>2}", day.day), day_style(day)));
                label.render(Rect { height: 1, ..rect }, buf);
                marker_line(day).render(Rect { y: rect.y + 1, height: 1, ..rect }, buf);
            }
        }
    }
}

fn render_day_events(grid: &MonthGrid, date_fmt: &str, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Events on {} ", grid.selected.format(date_fmt)));

    if grid.day_events.is_empty() {
        Paragraph::new(Line::from(Span::styled("No events", DETAIL_STYLE)))
            .block(block)
            .render(area, buf);
        return;
    }

    let items: Vec<ListItem> = grid
        .day_events
        .iter()
        .map(|event| ListItem::new(event_line(event, false)))
        .collect();
    Widget::render(List::new(items).block(block), area, buf);
}

#[cfg(test)]
mod tests {
    use kalcore::calendar::{Calendar, CalendarOptions};
    use kalcore::storage::MemoryStorage;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn march_grid() -> MonthGrid {
        let options = CalendarOptions {
            holidays: false,
            ..Default::default()
        };
        let calendar = Calendar::open_at(Box::new(MemoryStorage::new()), options, date(2024, 3, 8)).unwrap();
        calendar.render()
    }

    #[test]
    fn clicks_map_to_drawn_days() {
        let mut view = CalendarViewComponent::new();
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        view.render(&march_grid(), "%d.%m.%Y", area, &mut buf);

        // March 2024 starts on a Friday: block border, header line, then column 4
        let x = 1 + 4 * CELL_WIDTH;
        assert_eq!(view.date_at(x, 2), Some(date(2024, 3, 1)));
        assert_eq!(view.date_at(x + 1, 3), Some(date(2024, 3, 1)));
        assert_eq!(view.date_at(1, 2), None);
        assert_eq!(view.date_at(1, 4), Some(date(2024, 3, 4)));
        assert_eq!(view.date_at(70, 5), None);
    }

    #[test]
    fn marker_overflow() {
        let cell = DayCell {
            date: date(2024, 3, 8),
            day: 8,
            is_today: false,
            is_selected: false,
            is_weekend: false,
            markers: vec![EventColor::Green; 6],
        };
        let text: String = marker_line(&cell).spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "•••+");
    }
}
