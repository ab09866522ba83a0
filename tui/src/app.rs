use std::time::{Duration, Instant};

use chrono::{Days, Local, NaiveDate};
use kalcore::calendar::Calendar;
use kalcore::prompt::{AddEventForm, AddEventRequest, FormField};
use kalcore::time::clock::Clock;
use kalcore::time::reltime::DATE_FMT;
use log::{debug, error};
use ratatui::Frame;

use crate::{
    components::{self, prompt::PromptWidget, tabs::TabView, AppLayout},
    events::{AgendaOperation, AppEvent, FilterInput, NavDirection, PromptInput},
};

/// A prompt waiting for its delay to pass
struct PendingPrompt {
    request: AddEventRequest,
    since: Instant,
}

impl PendingPrompt {
    fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.since) >= self.request.delay
    }
}

struct PromptState {
    form: AddEventForm,
    active: FormField,
}

#[derive(Default)]
pub struct AppState {
    should_exit: bool,
    pending: Option<PendingPrompt>,
    prompt: Option<PromptState>,
    last_tick: Option<Instant>,
}

/// App state
pub struct App {
    pub(crate) calendar: Calendar,
    pub(crate) components: components::AppUIComponent,
    pub(crate) state: AppState,
}

impl App {
    pub fn new(calendar: Calendar, clock: Clock) -> Self {
        App {
            calendar,
            components: components::AppUIComponent::new(clock, DATE_FMT),
            state: AppState::default(),
        }
    }

    pub fn should_exit(&self) -> bool {
        self.state.should_exit
    }

    pub fn current_view(&self) -> &TabView {
        self.components.tabs.curr_view()
    }

    pub fn selected(&self) -> NaiveDate {
        self.calendar.selected()
    }

    pub fn prompt_open(&self) -> bool {
        self.state.prompt.is_some()
    }

    pub fn prompt_on_color(&self) -> bool {
        self.state
            .prompt
            .as_ref()
            .is_some_and(|p| p.active == FormField::Color)
    }

    pub fn filter_focused(&self) -> bool {
        self.components.cmdline.is_focused()
    }

    pub fn date_at(&self, column: u16, row: u16) -> Option<NaiveDate> {
        self.components.calendar_view.date_at(column, row)
    }

    /// How long the main loop may wait for input before the next tick or pending prompt
    pub fn next_timeout(&self, tick: Duration) -> Duration {
        let until_tick = match self.state.last_tick {
            Some(last) => tick.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        };
        match &self.state.pending {
            Some(pending) => pending
                .request
                .delay
                .saturating_sub(pending.since.elapsed())
                .min(until_tick),
            None => until_tick,
        }
    }

    /// Whether a tick is due at `now`; records it as the last tick when it is.
    pub fn tick_due(&mut self, now: Instant, tick: Duration) -> bool {
        match self.state.last_tick {
            Some(last) if now.saturating_duration_since(last) < tick => false,
            _ => {
                self.state.last_tick = Some(now);
                true
            }
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.components
            .render(&self.calendar, area, frame.buffer_mut());

        if let Some(prompt) = &self.state.prompt {
            let widget = PromptWidget {
                form: &prompt.form,
                active: prompt.active,
            };
            let cursor = widget.cursor(area);
            frame.render_widget(widget, area);
            if let Some(cursor) = cursor {
                frame.set_cursor_position(cursor);
            }
        } else if self.components.cmdline.is_focused() {
            let cmdline_rect = AppLayout::new(area).cmdline;
            frame.set_cursor_position(self.components.cmdline.get_cursor_pos(cmdline_rect));
        }
    }

    /// Opens the pending prompt once its delay has passed. Returns whether it opened.
    pub fn poll_pending(&mut self, now: Instant) -> bool {
        match &self.state.pending {
            Some(pending) if pending.is_due(now) => {
                let request = pending.request;
                self.state.pending = None;
                self.open_prompt(&request);
                true
            }
            _ => false,
        }
    }

    fn open_prompt(&mut self, request: &AddEventRequest) {
        debug!("opening prompt for {}", request.date_key());
        self.state.prompt = Some(PromptState {
            form: AddEventForm::for_request(request),
            active: FormField::default(),
        });
    }

    fn refresh(&mut self) {
        let now = Local::now();
        if now.date_naive() != self.calendar.today() {
            self.calendar.set_today(now.date_naive());
        }
        self.components
            .status_bar
            .update(now, self.calendar.last_saved());
    }

    fn move_selection(&mut self, date: Option<NaiveDate>) {
        if let Some(date) = date {
            self.calendar.select(date);
            self.calendar.show_month_of(&date);
        }
    }

    fn navigate(&mut self, direction: &NavDirection) {
        let selected = self.calendar.selected();
        match direction {
            NavDirection::Left => self.move_selection(selected.checked_sub_days(Days::new(1))),
            NavDirection::Right => self.move_selection(selected.checked_add_days(Days::new(1))),
            NavDirection::Up => self.move_selection(selected.checked_sub_days(Days::new(7))),
            NavDirection::Down => self.move_selection(selected.checked_add_days(Days::new(7))),
            NavDirection::PrevMonth => self.calendar.prev_month(),
            NavDirection::NextMonth => self.calendar.next_month(),
            NavDirection::Today => self.move_selection(Some(self.calendar.today())),
        }
    }

    fn process_prompt(&mut self, input: &PromptInput) -> Option<AppEvent> {
        let prompt = self.state.prompt.as_mut()?;
        match input {
            PromptInput::Char(c) => {
                if let Some(text) = prompt.form.text_mut(prompt.active) {
                    text.push(*c);
                }
            }
            PromptInput::Backspace => {
                if let Some(text) = prompt.form.text_mut(prompt.active) {
                    text.pop();
                }
            }
            PromptInput::NextField => prompt.active = prompt.active.next(),
            PromptInput::PreviousField => prompt.active = prompt.active.previous(),
            PromptInput::CycleColor => prompt.form.color = prompt.form.color.next(),
            PromptInput::Cancel => {
                self.state.prompt = None;
                return Some(AppEvent::Notify("Cancelled".to_string()));
            }
            PromptInput::Submit => {
                let event = match prompt.form.clone().into_event() {
                    Ok(event) => event,
                    Err(e) => return Some(AppEvent::Notify(e.to_string())),
                };
                self.state.prompt = None;
                let message = format!("Added '{}' on {}", event.title, event.date_key());
                return match self.calendar.add_event(event) {
                    Ok(()) => {
                        self.refresh();
                        Some(AppEvent::Notify(message))
                    }
                    Err(e) => {
                        error!("saving events failed: {e}");
                        Some(AppEvent::Notify(format!("Saving failed: {e}")))
                    }
                };
            }
        }
        None
    }

    fn process_filter(&mut self, input: &FilterInput) {
        let cmdline = &mut self.components.cmdline;
        match input {
            FilterInput::Char(c) => cmdline.push(*c),
            FilterInput::Backspace => cmdline.pop(),
            FilterInput::Submit => cmdline.unfocus(),
            FilterInput::Cancel => {
                cmdline.clear();
                cmdline.unfocus();
            }
        }
        self.components.agenda.reset_selection();
    }

    /// Process an event, which in turn may emit another event.
    pub fn process_event(&mut self, event: &AppEvent) -> Option<AppEvent> {
        match event {
            AppEvent::Tick => {
                self.poll_pending(Instant::now());
                self.refresh();
            }
            AppEvent::Quit => self.state.should_exit = true,
            AppEvent::TabChange(direction) => {
                self.components.cmdline.unfocus();
                self.components.tabs.switch_view(*direction);
            }
            AppEvent::Navigate(direction) => self.navigate(direction),
            AppEvent::SelectDate(date) => {
                let request = self.calendar.select(*date);
                self.state.pending = Some(PendingPrompt {
                    request,
                    since: Instant::now(),
                });
                self.poll_pending(Instant::now());
            }
            AppEvent::OpenPrompt(date) => {
                self.state.pending = None;
                self.open_prompt(&AddEventRequest::immediate(*date));
            }
            AppEvent::Prompt(input) => return self.process_prompt(input),
            AppEvent::Agenda(operation) => match operation {
                AgendaOperation::Next => self.components.agenda.select_next(),
                AgendaOperation::Previous => self.components.agenda.select_previous(),
                AgendaOperation::Focus => self.components.cmdline.focus(),
                AgendaOperation::CycleColor => {
                    let message = match self.components.agenda.cycle_color() {
                        Some(color) => format!("Showing {color} events"),
                        None => "Showing all colors".to_string(),
                    };
                    return Some(AppEvent::Notify(message));
                }
            },
            AppEvent::Filter(input) => self.process_filter(input),
            AppEvent::ToggleClockFormat => {
                let name = self.components.status_bar.toggle_format();
                return Some(AppEvent::Notify(format!("Clock: {name}")));
            }
            AppEvent::Notify(message) => self.components.cmdline.notify(message.clone()),
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use kalcore::calendar::CalendarOptions;
    use kalcore::storage::MemoryStorage;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn app(delay: Duration) -> App {
        let options = CalendarOptions {
            prompt_delay: delay,
            holidays: false,
        };
        let calendar =
            Calendar::open_at(Box::new(MemoryStorage::new()), options, date(2024, 3, 8)).unwrap();
        App::new(calendar, Clock::default())
    }

    fn dispatch(app: &mut App, event: AppEvent) {
        let mut event = Some(event);
        while let Some(e) = event {
            event = app.process_event(&e);
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            dispatch(app, AppEvent::Prompt(PromptInput::Char(c)));
        }
    }

    #[test]
    fn select_opens_prompt_and_submit_saves() {
        let mut app = app(Duration::ZERO);
        dispatch(&mut app, AppEvent::SelectDate(date(2024, 3, 12)));
        assert_eq!(app.selected(), date(2024, 3, 12));
        assert!(app.prompt_open());

        type_text(&mut app, "Dentist");
        dispatch(&mut app, AppEvent::Prompt(PromptInput::Submit));
        assert!(!app.prompt_open());

        let titles: Vec<_> = app
            .calendar
            .events_for_date(&date(2024, 3, 12))
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, ["Dentist"]);
        assert!(app.calendar.last_saved().is_some());
    }

    #[test]
    fn empty_title_keeps_prompt_open() {
        let mut app = app(Duration::ZERO);
        dispatch(&mut app, AppEvent::OpenPrompt(date(2024, 3, 12)));
        dispatch(&mut app, AppEvent::Prompt(PromptInput::Submit));
        assert!(app.prompt_open());
        assert_eq!(app.calendar.events().len(), 1);

        dispatch(&mut app, AppEvent::Prompt(PromptInput::Cancel));
        assert!(!app.prompt_open());
        assert_eq!(app.calendar.events().len(), 1);
    }

    #[test]
    fn prompt_waits_for_delay() {
        let mut app = app(Duration::from_secs(60));
        dispatch(&mut app, AppEvent::SelectDate(date(2024, 3, 12)));
        assert_eq!(app.selected(), date(2024, 3, 12));
        assert!(!app.prompt_open());
        assert!(app.next_timeout(Duration::from_secs(1)) <= Duration::from_secs(1));

        assert!(!app.poll_pending(Instant::now()));
        assert!(app.poll_pending(Instant::now() + Duration::from_secs(61)));
        assert!(app.prompt_open());
    }

    #[test]
    fn ticks_follow_the_clock_not_input() {
        let mut app = app(Duration::ZERO);
        let tick = Duration::from_secs(1);
        let start = Instant::now();
        assert_eq!(app.next_timeout(tick), Duration::ZERO);
        assert!(app.tick_due(start, tick));
        assert!(app.next_timeout(tick) <= tick);

        // Input arriving every 100 ms must not hold back the next tick
        let mut fired = Vec::new();
        for step in 1..=12 {
            let now = start + Duration::from_millis(100 * step);
            if app.tick_due(now, tick) {
                fired.push(step);
            }
        }
        assert_eq!(fired, [10]);
    }

    #[test]
    fn open_prompt_keeps_selection() {
        let mut app = app(Duration::ZERO);
        dispatch(&mut app, AppEvent::OpenPrompt(date(2024, 3, 20)));
        assert_eq!(app.selected(), date(2024, 3, 8));
        assert!(app.prompt_open());
    }

    #[test]
    fn color_field_and_tab_order() {
        let mut app = app(Duration::ZERO);
        dispatch(&mut app, AppEvent::OpenPrompt(date(2024, 3, 20)));
        type_text(&mut app, "Gym");
        for _ in 0..3 {
            dispatch(&mut app, AppEvent::Prompt(PromptInput::NextField));
        }
        assert!(app.prompt_on_color());
        dispatch(&mut app, AppEvent::Prompt(PromptInput::CycleColor));
        dispatch(&mut app, AppEvent::Prompt(PromptInput::Submit));

        let event = app.calendar.events_for_date(&date(2024, 3, 20)).next().unwrap();
        assert_eq!(event.color, kalcore::calendar::event::EventColor::Green);
    }

    #[test]
    fn keyboard_navigation_follows_month() {
        let mut app = app(Duration::ZERO);
        for _ in 0..4 {
            dispatch(&mut app, AppEvent::Navigate(NavDirection::Down));
        }
        assert_eq!(app.selected(), date(2024, 4, 5));
        assert_eq!(app.calendar.current_month(), date(2024, 4, 1));

        dispatch(&mut app, AppEvent::Navigate(NavDirection::PrevMonth));
        assert_eq!(app.calendar.current_month(), date(2024, 3, 1));
        assert_eq!(app.selected(), date(2024, 4, 5));
        assert!(!app.prompt_open());
    }
}
