pub mod agenda;
pub mod calendar_view;
pub mod cmdline;
pub mod prompt;
pub mod statusbar;
pub mod tabs;

use agenda::AgendaComponent;
use calendar_view::CalendarViewComponent;
use cmdline::CmdlineComponent;
use kalcore::calendar::Calendar;
use kalcore::time::clock::Clock;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Widget,
};
use statusbar::StatusBarComponent;
use tabs::{TabComponent, TabView};

/// Render areas for the app
pub struct AppLayout {
    pub tabs_view: Rect,
    pub main_view: Rect,
    pub status_bar: Rect,
    pub cmdline: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let rects = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(2),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            tabs_view: rects[0],
            main_view: rects[1],
            status_bar: rects[2],
            cmdline: rects[3],
        }
    }
}

/// UI Components for the app
pub struct AppUIComponent {
    pub(crate) tabs: TabComponent,
    pub(crate) calendar_view: CalendarViewComponent,
    pub(crate) agenda: AgendaComponent,
    pub(crate) status_bar: StatusBarComponent,
    pub(crate) cmdline: CmdlineComponent,
    date_fmt: String,
}

impl AppUIComponent {
    pub fn new(clock: Clock, date_fmt: impl Into<String>) -> Self {
        Self {
            tabs: TabComponent::new(),
            calendar_view: CalendarViewComponent::new(),
            agenda: AgendaComponent::new(),
            status_bar: StatusBarComponent::new(clock),
            cmdline: CmdlineComponent::new(),
            date_fmt: date_fmt.into(),
        }
    }

    pub fn render(&mut self, calendar: &Calendar, area: Rect, buf: &mut Buffer) {
        let layout = AppLayout::new(area);
        self.tabs.render(layout.tabs_view, buf);

        match self.tabs.curr_view() {
            TabView::Calendar => {
                self.calendar_view
                    .render(&calendar.render(), &self.date_fmt, layout.main_view, buf)
            }
            TabView::Agenda => {
                self.agenda
                    .render(calendar.events(), self.cmdline.input(), layout.main_view, buf)
            }
        }

        self.status_bar.render(layout.status_bar, buf);
        self.cmdline.render(layout.cmdline, buf);
    }
}
