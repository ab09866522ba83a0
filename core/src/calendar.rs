pub mod errors;
pub mod event;
pub mod grid;
pub mod holidays;

use std::time::Duration;

use chrono::{DateTime, Datelike, Local, NaiveDate};
use log::{debug, info};

use crate::prompt::AddEventRequest;
use crate::storage::Storage;
use crate::time::clock::is_weekend;

use errors::ErrorType;
use event::{Event, EventColor};
use grid::{days_in_month, first_of_month, weekday_offset, DayCell, GridCell, MonthGrid};

/// Result of calendar operation.
pub type CalResult<T> = Result<T, ErrorType>;

/// Storage key holding the JSON array of events
pub const EVENTS_KEY: &str = "calendarEvents";

/// Delay between selecting a day and offering the add-event prompt
pub const DEFAULT_PROMPT_DELAY: Duration = Duration::from_millis(300);

/// Behaviour knobs for a [Calendar], usually filled from the config file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarOptions {
    pub prompt_delay: Duration,
    pub holidays: bool,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            prompt_delay: DEFAULT_PROMPT_DELAY,
            holidays: true,
        }
    }
}

/// Calendar-day equality, ignoring any time of day.
pub fn is_same_day<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.day() == b.day() && a.month() == b.month() && a.year() == b.year()
}

/// Month view state and the event set backing it.
///
/// The event set is loaded once on [open][Self::open] and is the single source of
/// truth afterwards. Every mutation writes the whole set back to storage.
pub struct Calendar {
    current_month: NaiveDate,
    selected: NaiveDate,
    today: NaiveDate,
    events: Vec<Event>,
    storage: Box<dyn Storage>,
    last_saved: Option<DateTime<Local>>,
    options: CalendarOptions,
}

impl Calendar {
    /// Opens a calendar on the current month of the local clock
    pub fn open(storage: Box<dyn Storage>, options: CalendarOptions) -> CalResult<Self> {
        Self::open_at(storage, options, Local::now().date_naive())
    }

    /// Opens a calendar as if `today` were the current date.
    ///
    /// Loads the persisted events (seeding a default one when storage is empty),
    /// then injects the holidays of `today`'s year.
    pub fn open_at(
        storage: Box<dyn Storage>,
        options: CalendarOptions,
        today: NaiveDate,
    ) -> CalResult<Self> {
        let mut calendar = Self {
            current_month: first_of_month(&today),
            selected: today,
            today,
            events: Vec::new(),
            storage,
            last_saved: None,
            options,
        };
        calendar.load_events()?;
        if calendar.options.holidays {
            calendar.load_holidays();
        }
        Ok(calendar)
    }

    pub fn current_month(&self) -> NaiveDate {
        self.current_month
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Moves the "today" marker, e.g. after the clock passed midnight
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn last_saved(&self) -> Option<DateTime<Local>> {
        self.last_saved
    }

    /// Builds the grid for the displayed month.
    pub fn render(&self) -> MonthGrid {
        let year = self.current_month.year();
        let month = self.current_month.month();
        let first = self.current_month;

        let mut cells: Vec<GridCell> = (0..weekday_offset(first.weekday()))
            .map(|_| GridCell::Blank)
            .collect();

        let days = (1..=days_in_month(year, month)).filter_map(|day| first.with_day(day));
        for date in days {
            cells.push(GridCell::Day(DayCell {
                date,
                day: date.day(),
                is_today: is_same_day(&date, &self.today),
                is_selected: is_same_day(&date, &self.selected),
                is_weekend: is_weekend(&date),
                markers: self.events_for_date(&date).map(|e| e.color).collect(),
            }));
        }

        MonthGrid {
            year,
            month,
            selected: self.selected,
            cells,
            day_events: self.events_for_date(&self.selected).cloned().collect(),
        }
    }

    pub fn prev_month(&mut self) {
        self.current_month = grid::shift_month(self.current_month, -1);
    }

    pub fn next_month(&mut self) {
        self.current_month = grid::shift_month(self.current_month, 1);
    }

    /// Selects a day (`month` is 1-based) and returns the add-event prompt to show
    /// for it once [AddEventRequest::delay] has elapsed.
    pub fn select_date(&mut self, year: i32, month: u32, day: u32) -> CalResult<AddEventRequest> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| ErrorType::InvalidDate(format!("{year}-{month:02}-{day:02}")))?;
        Ok(self.select(date))
    }

    /// Same as [select_date][Self::select_date] with an already valid date
    pub fn select(&mut self, date: NaiveDate) -> AddEventRequest {
        self.selected = date;
        AddEventRequest::new(date, self.options.prompt_delay)
    }

    /// Jumps the displayed month to the one containing `date`, without selecting it
    pub fn show_month_of(&mut self, date: &NaiveDate) {
        self.current_month = first_of_month(date);
    }

    pub fn has_events<D: Datelike>(&self, date: &D) -> bool {
        self.events.iter().any(|e| is_same_day(&e.date, date))
    }

    pub fn events_for_date<D: Datelike>(&self, date: &D) -> impl Iterator<Item = &Event> {
        let day = NaiveDate::from_ymd_opt(date.year(), date.month(), date.day());
        self.events
            .iter()
            .filter(move |e| day.is_some_and(|day| is_same_day(&e.date, &day)))
    }

    /// Appends an event and persists the whole set.
    ///
    /// The event is trusted as given; title validation belongs to the prompt.
    pub fn add_event(&mut self, event: Event) -> CalResult<()> {
        debug!("adding event '{}' on {}", event.title, event.date_key());
        self.events.push(event);
        self.save_events()
    }

    /// Replaces the in-memory set with the persisted one.
    /// Empty storage yields a single example event dated today.
    pub fn load_events(&mut self) -> CalResult<()> {
        self.events = match self.storage.get_item(EVENTS_KEY)? {
            Some(json) => {
                let events: Vec<Event> = serde_json::from_str(&json)?;
                info!("loaded {} events", events.len());
                events
            }
            None => {
                info!("no stored events, seeding default");
                vec![Event::new(self.today, "Today")
                    .with_description("Current day")
                    .with_color(EventColor::Blue)]
            }
        };
        Ok(())
    }

    /// Writes every event back to storage.
    pub fn save_events(&mut self) -> CalResult<()> {
        let json = serde_json::to_string(&self.events)?;
        self.storage.set_item(EVENTS_KEY, &json)?;
        self.last_saved = Some(Local::now());
        debug!("saved {} events", self.events.len());
        Ok(())
    }

    /// Appends the fixed holidays of the displayed year, skipping dates already present.
    ///
    /// Only called when the calendar opens; navigating into another year does not
    /// add that year's holidays.
    pub fn load_holidays(&mut self) {
        let year = self.current_month.year();
        let mut added = 0;
        for holiday in holidays::holidays_for_year(year) {
            if !self.events.iter().any(|e| e.date == holiday.date) {
                self.events.push(holiday);
                added += 1;
            }
        }
        debug!("injected {added} holidays for {year}");
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::storage::MemoryStorage;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn no_holidays() -> CalendarOptions {
        CalendarOptions {
            holidays: false,
            ..Default::default()
        }
    }

    fn storage_with(events: &[Event]) -> Box<MemoryStorage> {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(EVENTS_KEY, &serde_json::to_string(events).unwrap())
            .unwrap();
        Box::new(storage)
    }

    #[test]
    fn same_day_ignores_time() {
        let morning = NaiveDateTime::parse_from_str("2024-03-08 06:15:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let night = NaiveDateTime::parse_from_str("2024-03-08 23:59:59", "%Y-%m-%d %H:%M:%S").unwrap();
        assert!(is_same_day(&morning, &night));
        assert!(is_same_day(&morning, &date(2024, 3, 8)));
        assert!(!is_same_day(&morning, &date(2024, 3, 9)));
    }

    #[test]
    fn events_for_date_scenario() {
        let storage = storage_with(&[Event::new(date(2024, 3, 8), "A")]);
        let calendar = Calendar::open_at(storage, no_holidays(), date(2024, 3, 1)).unwrap();

        let found: Vec<_> = calendar.events_for_date(&date(2024, 3, 8)).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "A");
        assert_eq!(calendar.events_for_date(&date(2024, 3, 9)).count(), 0);
        assert!(calendar.has_events(&date(2024, 3, 8)));
        assert!(!calendar.has_events(&date(2024, 3, 9)));
    }

    #[test]
    fn events_for_date_ignores_time_of_day() {
        let storage = storage_with(&[Event::new(date(2024, 3, 8), "A")]);
        let calendar = Calendar::open_at(storage, no_holidays(), date(2024, 3, 1)).unwrap();
        let evening = NaiveDateTime::parse_from_str("2024-03-08 21:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(calendar.events_for_date(&evening).count(), 1);
        assert!(calendar.has_events(&evening));
    }

    #[test]
    fn grid_has_every_day_of_month() {
        let calendar = Calendar::open_at(storage_with(&[]), no_holidays(), date(2024, 2, 10)).unwrap();
        let grid = calendar.render();
        let days: Vec<u32> = grid.days().map(|d| d.day).collect();
        assert_eq!(days.len() as u32, days_in_month(2024, 2));
        assert_eq!(days.first(), Some(&1));
        assert_eq!(days.last(), Some(&29));
        // Feb 1 2024 is a Thursday
        assert_eq!(grid.leading_blanks(), 3);
    }

    #[test]
    fn events_for_date_keeps_insertion_order() {
        let storage = storage_with(&[
            Event::new(date(2024, 3, 8), "first"),
            Event::new(date(2024, 3, 9), "other"),
            Event::new(date(2024, 3, 8), "second"),
            Event::new(date(2024, 3, 8), "first"),
        ]);
        let calendar = Calendar::open_at(storage, no_holidays(), date(2024, 3, 1)).unwrap();
        let titles: Vec<_> = calendar
            .events_for_date(&date(2024, 3, 8))
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, ["first", "second", "first"]);
    }

    #[test]
    fn empty_storage_seeds_today() {
        let today = date(2024, 7, 15);
        let calendar = Calendar::open_at(Box::new(MemoryStorage::new()), no_holidays(), today).unwrap();
        assert_eq!(calendar.events().len(), 1);
        assert_eq!(calendar.events()[0].date, today);
        assert_eq!(calendar.events()[0].color, EventColor::Blue);
    }

    #[test]
    fn malformed_storage_is_fatal() {
        let mut storage = MemoryStorage::new();
        storage.set_item(EVENTS_KEY, "not json").unwrap();
        let result = Calendar::open_at(Box::new(storage), no_holidays(), date(2024, 1, 1));
        assert!(matches!(result, Err(ErrorType::Json(_))));
    }

    #[test]
    fn add_event_grows_by_one_and_persists() {
        let mut calendar =
            Calendar::open_at(storage_with(&[]), no_holidays(), date(2024, 3, 1)).unwrap();
        assert!(calendar.last_saved().is_none());
        let before = calendar.events().len();

        calendar
            .add_event(Event::new(date(2024, 3, 20), "Dentist").with_time("14:00"))
            .unwrap();
        assert_eq!(calendar.events().len(), before + 1);
        assert!(calendar.last_saved().is_some());

        let json = calendar.storage.get_item(EVENTS_KEY).unwrap().unwrap();
        let stored: Vec<Event> = serde_json::from_str(&json).unwrap();
        assert_eq!(stored, calendar.events());
    }

    #[test]
    fn holidays_seed_once() {
        let mut calendar =
            Calendar::open_at(storage_with(&[]), no_holidays(), date(2025, 5, 20)).unwrap();
        calendar.load_holidays();
        assert_eq!(calendar.events().len(), 8);
        assert!(calendar.events().iter().all(|e| e.date.year() == 2025));

        calendar.load_holidays();
        assert_eq!(calendar.events().len(), 8);
    }

    #[test]
    fn holidays_skip_taken_dates() {
        let storage = storage_with(&[Event::new(date(2025, 3, 8), "Flowers")]);
        let calendar = Calendar::open_at(storage, CalendarOptions::default(), date(2025, 3, 1)).unwrap();
        assert_eq!(calendar.events().len(), 8);
        let on_march_8: Vec<_> = calendar.events_for_date(&date(2025, 3, 8)).collect();
        assert_eq!(on_march_8.len(), 1);
        assert_eq!(on_march_8[0].title, "Flowers");
    }

    #[test]
    fn navigation_does_not_reseed_holidays() {
        let mut calendar =
            Calendar::open_at(storage_with(&[]), CalendarOptions::default(), date(2024, 12, 5)).unwrap();
        calendar.next_month();
        assert_eq!(calendar.current_month(), date(2025, 1, 1));
        assert!(!calendar.has_events(&date(2025, 1, 1)));
        assert!(calendar.has_events(&date(2024, 1, 1)));
    }

    #[test]
    fn month_navigation_rolls_years() {
        let mut calendar =
            Calendar::open_at(storage_with(&[]), no_holidays(), date(2024, 12, 31)).unwrap();
        calendar.next_month();
        assert_eq!(calendar.current_month(), date(2025, 1, 1));

        let mut calendar =
            Calendar::open_at(storage_with(&[]), no_holidays(), date(2024, 1, 31)).unwrap();
        calendar.prev_month();
        assert_eq!(calendar.current_month(), date(2023, 12, 1));
    }

    #[test]
    fn grid_pads_to_first_weekday() {
        // May 2024 starts on a Wednesday
        let calendar =
            Calendar::open_at(storage_with(&[]), no_holidays(), date(2024, 5, 10)).unwrap();
        let grid = calendar.render();
        assert_eq!(grid.leading_blanks(), 2);
        assert_eq!(grid.cells.len(), 2 + 31);
        assert_eq!(grid.days().next().map(|d| d.day), Some(1));
        assert_eq!(grid.title(), "May 2024");
    }

    #[test]
    fn grid_marks_cells() {
        let storage = storage_with(&[
            Event::new(date(2024, 5, 4), "a").with_color(EventColor::Green),
            Event::new(date(2024, 5, 4), "b").with_color(EventColor::Purple),
        ]);
        let mut calendar = Calendar::open_at(storage, no_holidays(), date(2024, 5, 10)).unwrap();
        calendar.select(date(2024, 5, 4));
        let grid = calendar.render();

        let saturday = grid.days().find(|d| d.day == 4).unwrap();
        assert!(saturday.is_weekend);
        assert!(saturday.is_selected);
        assert!(!saturday.is_today);
        assert_eq!(saturday.markers, [EventColor::Green, EventColor::Purple]);

        let today = grid.days().find(|d| d.day == 10).unwrap();
        assert!(today.is_today);
        assert!(!today.is_weekend);
        assert!(!today.has_events());

        assert_eq!(grid.day_events.len(), 2);
    }

    #[test]
    fn select_date_returns_prompt() {
        let mut calendar =
            Calendar::open_at(storage_with(&[]), no_holidays(), date(2024, 5, 10)).unwrap();
        let request = calendar.select_date(2024, 5, 21).unwrap();
        assert_eq!(calendar.selected(), date(2024, 5, 21));
        assert_eq!(request.date_key(), "2024-05-21");
        assert_eq!(request.delay, DEFAULT_PROMPT_DELAY);

        assert!(matches!(
            calendar.select_date(2024, 2, 30),
            Err(ErrorType::InvalidDate(_))
        ));
        assert_eq!(calendar.selected(), date(2024, 5, 21));
    }
}
