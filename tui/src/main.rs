use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use app::App;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use events::{process_key, process_mouse, AppEvent};
use kalcore::calendar::Calendar;
use kalcore::config::load_config;
use kalcore::storage;
use log::info;
use ratatui::crossterm::execute;
use ratatui::prelude::{Backend, CrosstermBackend};
use ratatui::Terminal;

pub mod app;
pub mod cli;
pub mod components;
pub mod events;

/// Environment variable enabling the log file and holding its filter
const LOG_ENV: &str = "KALENDAR_LOG";
const LOG_FILENAME: &str = "kaltui.log";
/// Refresh interval of the clock and status bar
const TICK: Duration = Duration::from_secs(1);

/// Logs go to a file next to the event store, since stderr belongs to the terminal.
fn setup_logging(dir: &Path) -> Result<()> {
    if std::env::var_os(LOG_ENV).is_none() {
        return Ok(());
    }
    fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILENAME))?;
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn app_init(stderr: &mut io::Stderr) -> Result<()> {
    enable_raw_mode()?;
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(())
}

fn app_restore<B>(terminal: &mut Terminal<B>) -> Result<()>
where
    B: Backend + io::Write,
{
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn dispatch(app: &mut App, event: Option<AppEvent>) {
    let mut event = event;
    while let Some(e) = event {
        event = app.process_event(&e);
    }
}

fn app_loop<B>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()>
where
    B: Backend,
{
    while !app.should_exit() {
        // Ticks are due on schedule even while input keeps arriving
        if app.tick_due(Instant::now(), TICK) {
            dispatch(app, Some(AppEvent::Tick));
        }
        terminal.draw(|f| app.draw(f))?;

        if event::poll(app.next_timeout(TICK))? {
            let event = match event::read()? {
                event::Event::Key(key_event) => process_key(app, key_event),
                event::Event::Mouse(mouse_event) => process_mouse(app, mouse_event),
                _ => None,
            };
            dispatch(app, event);
        }
        app.poll_pending(Instant::now());
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = cli::Args::parse();
    let start_date = args.start_date()?;

    let config = load_config(args.config.as_deref())?;
    let storage = storage::resolve(args.local.clone(), args.global)?;
    setup_logging(storage.root())?;
    info!("using storage at {}", storage.root().display());

    let mut calendar = Calendar::open(Box::new(storage), config.calendar)?;
    if let Some(date) = start_date {
        calendar.select(date);
        calendar.show_month_of(&date);
    }
    let mut app = App::new(calendar, config.clock);

    let mut stderr = io::stderr();
    app_init(&mut stderr)?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    let result = app_loop(&mut terminal, &mut app);
    app_restore(&mut terminal)?;

    Ok(result?)
}
