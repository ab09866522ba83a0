use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::{app::App, components::tabs::TabView};

/// Possible Tab Change Directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TabDirection {
    Next,     // ] or Tab
    Previous, // [ or BackTab
}

/// Cursor movement over the month grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavDirection {
    Left,      // h
    Right,     // l
    Up,        // k
    Down,      // j
    PrevMonth, // p, <
    NextMonth, // n, >
    Today,     // t
}

/// Keystrokes routed to the add-event prompt while it is open.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PromptInput {
    Char(char),
    Backspace,
    NextField,     // Tab, Down
    PreviousField, // BackTab, Up
    CycleColor,    // Left/Right on the color field
    Submit,        // Enter
    Cancel,        // Esc
}

/// Keystrokes routed to the agenda filter line while it is focused.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FilterInput {
    Char(char),
    Backspace,
    Submit, // Enter
    Cancel, // Esc, clears the filter
}

/// Operations on the agenda list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AgendaOperation {
    Next,       // j
    Previous,   // k
    CycleColor, // c
    Focus,      // /
}

/// App Events
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    /// Periodic refresh of the clock and pending prompts
    Tick,
    Quit, // q
    TabChange(TabDirection),
    Navigate(NavDirection),
    /// Select a day, then offer the prompt once the delay passed
    SelectDate(NaiveDate),
    /// Offer the prompt right away without moving the selection
    OpenPrompt(NaiveDate),
    Prompt(PromptInput),
    Agenda(AgendaOperation),
    Filter(FilterInput),
    ToggleClockFormat, // f
    /// Message for the command line
    Notify(String),
}

/// Process key inputs based on context and emit the appropriate event.
pub fn process_key(app: &App, key_event: KeyEvent) -> Option<AppEvent> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    if app.prompt_open() {
        return process_prompt_key(app, key_event);
    }
    if app.filter_focused() {
        return match key_event.code {
            KeyCode::Char(c) => Some(AppEvent::Filter(FilterInput::Char(c))),
            KeyCode::Backspace => Some(AppEvent::Filter(FilterInput::Backspace)),
            KeyCode::Enter => Some(AppEvent::Filter(FilterInput::Submit)),
            KeyCode::Esc => Some(AppEvent::Filter(FilterInput::Cancel)),
            _ => None,
        };
    }

    match key_event.code {
        KeyCode::Char(']') | KeyCode::Tab => return Some(AppEvent::TabChange(TabDirection::Next)),
        KeyCode::Char('[') | KeyCode::BackTab => {
            return Some(AppEvent::TabChange(TabDirection::Previous))
        }
        KeyCode::Char('q') => return Some(AppEvent::Quit),
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(AppEvent::Quit)
        }
        KeyCode::Char('f') => return Some(AppEvent::ToggleClockFormat),
        _ => (),
    }

    // Specific to current view
    match app.current_view() {
        TabView::Calendar => match key_event.code {
            KeyCode::Char('h') | KeyCode::Left => Some(AppEvent::Navigate(NavDirection::Left)),
            KeyCode::Char('l') | KeyCode::Right => Some(AppEvent::Navigate(NavDirection::Right)),
            KeyCode::Char('k') | KeyCode::Up => Some(AppEvent::Navigate(NavDirection::Up)),
            KeyCode::Char('j') | KeyCode::Down => Some(AppEvent::Navigate(NavDirection::Down)),
            KeyCode::Char('p') | KeyCode::Char('<') | KeyCode::PageUp => {
                Some(AppEvent::Navigate(NavDirection::PrevMonth))
            }
            KeyCode::Char('n') | KeyCode::Char('>') | KeyCode::PageDown => {
                Some(AppEvent::Navigate(NavDirection::NextMonth))
            }
            KeyCode::Char('t') => Some(AppEvent::Navigate(NavDirection::Today)),
            KeyCode::Enter | KeyCode::Char(' ') => Some(AppEvent::SelectDate(app.selected())),
            KeyCode::Char('a') => Some(AppEvent::OpenPrompt(app.selected())),
            _ => None,
        },
        TabView::Agenda => match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => Some(AppEvent::Agenda(AgendaOperation::Next)),
            KeyCode::Char('k') | KeyCode::Up => Some(AppEvent::Agenda(AgendaOperation::Previous)),
            KeyCode::Char('c') => Some(AppEvent::Agenda(AgendaOperation::CycleColor)),
            KeyCode::Char('/') => Some(AppEvent::Agenda(AgendaOperation::Focus)),
            _ => None,
        },
    }
}

fn process_prompt_key(app: &App, key_event: KeyEvent) -> Option<AppEvent> {
    let on_color = app.prompt_on_color();
    let input = match key_event.code {
        KeyCode::Esc => PromptInput::Cancel,
        KeyCode::Enter => PromptInput::Submit,
        KeyCode::Tab | KeyCode::Down => PromptInput::NextField,
        KeyCode::BackTab | KeyCode::Up => PromptInput::PreviousField,
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if on_color => PromptInput::CycleColor,
        KeyCode::Backspace => PromptInput::Backspace,
        KeyCode::Char(c) if !on_color => PromptInput::Char(c),
        _ => return None,
    };
    Some(AppEvent::Prompt(input))
}

/// Process mouse input. Only the month grid reacts to clicks.
pub fn process_mouse(app: &App, mouse_event: MouseEvent) -> Option<AppEvent> {
    if app.prompt_open() || app.current_view() != &TabView::Calendar {
        return None;
    }

    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => app
            .date_at(mouse_event.column, mouse_event.row)
            .map(AppEvent::SelectDate),
        MouseEventKind::Down(MouseButton::Right) => app
            .date_at(mouse_event.column, mouse_event.row)
            .map(AppEvent::OpenPrompt),
        MouseEventKind::ScrollUp => Some(AppEvent::Navigate(NavDirection::PrevMonth)),
        MouseEventKind::ScrollDown => Some(AppEvent::Navigate(NavDirection::NextMonth)),
        _ => None,
    }
}
