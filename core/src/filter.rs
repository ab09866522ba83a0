use crate::calendar::event::{Event, EventColor};

/// Keeps events whose full row text contains `query`, ignoring case.
/// An empty query keeps everything.
pub fn text_filter<'a, I>(events: I, query: &str) -> impl Iterator<Item = &'a Event>
where
    I: IntoIterator<Item = &'a Event>,
    I::IntoIter: 'a,
{
    let query = query.to_lowercase();
    events
        .into_iter()
        .filter(move |e| e.row_text().to_lowercase().contains(&query))
}

/// Keeps events of exactly `color`; `None` keeps everything.
pub fn color_filter<'a, I>(events: I, color: Option<EventColor>) -> impl Iterator<Item = &'a Event>
where
    I: IntoIterator<Item = &'a Event>,
    I::IntoIter: 'a,
{
    events
        .into_iter()
        .filter(move |e| color.map_or(true, |c| e.color == c))
}

/// Agenda rows: both filters applied, sorted by date then time, stable otherwise.
pub fn agenda<'a>(events: &'a [Event], query: &str, color: Option<EventColor>) -> Vec<&'a Event> {
    let mut rows: Vec<&Event> = color_filter(text_filter(events, query), color).collect();
    rows.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));
    rows
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn events() -> Vec<Event> {
        let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        vec![
            Event::new(day(9), "Standup").with_time("09:30"),
            Event::new(day(8), "Lunch").with_description("Pasta place").with_color(EventColor::Green),
            Event::new(day(8), "Call").with_time("08:00").with_color(EventColor::Green),
        ]
    }

    #[test]
    fn text_is_case_insensitive_over_all_fields() {
        let events = events();
        let titles: Vec<_> = text_filter(&events, "PASTA").map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Lunch"]);
        assert_eq!(text_filter(&events, "2024-03-08").count(), 2);
        assert_eq!(text_filter(&events, "").count(), 3);
    }

    #[test]
    fn color_exact_match() {
        let events = events();
        assert_eq!(color_filter(&events, Some(EventColor::Green)).count(), 2);
        assert_eq!(color_filter(&events, Some(EventColor::Red)).count(), 0);
        assert_eq!(color_filter(&events, None).count(), 3);
    }

    #[test]
    fn agenda_sorted() {
        let events = events();
        let titles: Vec<_> = agenda(&events, "", None).iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Lunch", "Call", "Standup"]);
        let green: Vec<_> = agenda(&events, "call", Some(EventColor::Green))
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(green, ["Call"]);
    }
}
