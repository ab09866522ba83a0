mod config;
mod dates;
mod display;
mod errors;

use std::path::PathBuf;

use chrono::{Datelike, Local, TimeZone};
use clap::{arg, value_parser, ArgMatches, Command};
use log::debug;

use config::{get_config, CliConfig};
use dates::{parse_date, parse_datetime_extended};
use display::Displayer;
use errors::AppError;
use kalcore::calendar::event::EventColor;
use kalcore::calendar::holidays::holidays_for_year;
use kalcore::calendar::Calendar;
use kalcore::filter;
use kalcore::prompt::{AddEventForm, AddEventRequest};
use kalcore::storage;

type AppResult<T> = Result<T, AppError>;

/// Environment variable holding the log filter
const LOG_ENV: &str = "KALENDAR_LOG";

fn handle_command(
    matches: &ArgMatches,
    calendar: &mut Calendar,
    config: &CliConfig,
    displayer: &Displayer,
) -> AppResult<()> {
    match matches.subcommand() {
        Some(("cal", sub_matches)) => {
            if let Some(when) = sub_matches.get_one::<String>("date") {
                let date = parse_date(when)?;
                calendar.show_month_of(&date);
                let request = calendar.select(date);
                displayer.print_calendar(&calendar.render());
                displayer.print_add_hint(&request.date_key());
            } else {
                displayer.print_calendar(&calendar.render());
            }
        }
        Some(("add", sub_matches)) => {
            let date = parse_date(
                sub_matches
                    .get_one::<String>("date")
                    .ok_or(AppError::InvalidArg("date required".to_string()))?,
            )?;
            let mut form = AddEventForm::for_request(&AddEventRequest::immediate(date));
            form.title = sub_matches
                .get_one::<String>("title")
                .cloned()
                .unwrap_or_default();
            if let Some(time) = sub_matches.get_one::<String>("time") {
                form.time = time.clone();
            }
            if let Some(description) = sub_matches.get_one::<String>("description") {
                form.description = description.clone();
            }
            if let Some(color) = sub_matches.get_one::<EventColor>("color") {
                form.color = *color;
            }

            let event = form.into_event()?;
            calendar.add_event(event.clone())?;
            displayer.print_added(&event);
            displayer.print_last_saved(calendar.last_saved());
        }
        Some(("ls", sub_matches)) => {
            let date = match sub_matches.get_one::<String>("date") {
                Some(when) => parse_date(when)?,
                None => calendar.today(),
            };
            println!("{}", displayer.day_events_title(&date));
            displayer.print_events(calendar.events_for_date(&date));
        }
        Some(("agenda", sub_matches)) => {
            let empty = String::new();
            let query = sub_matches.get_one::<String>("filter").unwrap_or(&empty);
            let color = sub_matches.get_one::<EventColor>("color").copied();
            displayer.print_events(filter::agenda(calendar.events(), query, color));
        }
        Some(("holidays", sub_matches)) => {
            let year = sub_matches
                .get_one::<i32>("year")
                .copied()
                .unwrap_or_else(|| calendar.today().year());
            displayer.print_events(&holidays_for_year(year));
        }
        Some(("clock", sub_matches)) => {
            let mut clock = config.core.clock;
            if sub_matches.get_flag("12h") {
                clock.hour12 = true;
            }
            if sub_matches.get_flag("no-seconds") {
                clock.set_show_seconds(false);
            }
            let now = Local::now();
            displayer.print_clock(&clock, &now);

            if let Some(since) = sub_matches.get_one::<String>("since") {
                let then = parse_datetime_extended(since)
                    .map_err(|_| AppError::MalformedDate(since.to_string()))?;
                displayer.print_since(&Local.from_utc_datetime(&then.naive_utc()), &now);
            }
        }
        Some(("new-cfg", _)) => {
            println!("{}", displayer.template_cfg());
        }
        _ => return Err(AppError::InvalidSubcommand),
    };

    Ok(())
}

fn cli() -> Command {
    Command::new("kal")
        .about("Kalendar CLI, month calendar with local events")
        .subcommand_required(false)
        .arg_required_else_help(true)
        .arg(arg!(-V --version "Displays build and version information"))
        .arg(arg!(-l --local <path> "Use the .kalendar store under this directory")
            .value_parser(value_parser!(PathBuf))
            .required(false))
        .arg(arg!(-g --global "Use the store in the home directory").required(false))
        .arg(arg!(--config <path> "Configuration file to use instead of ~/.kalconf.toml")
            .value_parser(value_parser!(PathBuf))
            .required(false))
        .subcommand(Command::new("cal")
            .about("Prints a month with event markers")
            .arg(arg!(date: [date] "Day to select (its month is shown)")
                .value_parser(value_parser!(String)))
        )
        .subcommand(Command::new("add")
            .about("Adds an event")
            .arg(arg!(<date> "Day of the event"))
            .arg(arg!(<title> "Event title"))
            .arg(arg!(-t --time <time> "Time of day, free text").required(false))
            .arg(arg!(-d --description <description> "Longer description").required(false))
            .arg(arg!(-c --color <color> "Marker color")
                .value_parser(value_parser!(EventColor))
                .required(false))
        )
        .subcommand(Command::new("ls")
            .about("Lists the events of a day")
            .arg(arg!(date: [date] "Which day (defaults to today)"))
        )
        .subcommand(Command::new("agenda")
            .about("Lists every event, sorted by date")
            .arg(arg!(-f --filter <text> "Only rows containing this text (case-insensitive)").required(false))
            .arg(arg!(-c --color <color> "Only events with this marker color")
                .value_parser(value_parser!(EventColor))
                .required(false))
        )
        .subcommand(Command::new("holidays")
            .about("Lists the fixed holidays of a year")
            .arg(arg!(year: [year] "Which year (defaults to the current one)")
                .value_parser(value_parser!(i32)))
        )
        .subcommand(Command::new("clock")
            .about("Prints the current date and time")
            .arg(arg!(--"12h" "Use 12-hour format"))
            .arg(arg!(--"no-seconds" "Hide seconds"))
            .arg(arg!(--since <datetime> "Also print the time elapsed since this moment").required(false))
        )
        .subcommand(Command::new("new-cfg")
            .about("Dump a default configuration file. Recommended: run then redirect and save to ~/.kalconf.toml")
        )
}

fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "warn")).init();
}

fn main() -> AppResult<()> {
    let matches = cli().get_matches();

    if matches.get_flag("version") {
        println!("Kalendar CLI");
        println!("Version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    setup_logging();

    let config = get_config(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

    let storage = storage::resolve(
        matches.get_one::<PathBuf>("local").cloned(),
        matches.get_flag("global"),
    )?;
    debug!("using storage at {}", storage.root().display());

    let mut calendar = Calendar::open(Box::new(storage), config.core.calendar.clone())?;
    let displayer = Displayer::new(&config);

    handle_command(&matches, &mut calendar, &config, &displayer)
}
