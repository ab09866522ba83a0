//! Contract between the calendar and whatever collects new events from the user.
//!
//! Selecting a day yields an [AddEventRequest]. A front-end turns it into an
//! [AddEventForm] once the delay passed, lets the user fill it, and on confirmation
//! hands [AddEventForm::into_event] to [Calendar::add_event][crate::calendar::Calendar::add_event].
//! Cancelling simply drops the form.

use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

use crate::calendar::event::{Event, EventColor};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AddEventRequest {
    pub date: NaiveDate,
    pub delay: Duration,
}

impl AddEventRequest {
    pub fn new(date: NaiveDate, delay: Duration) -> Self {
        Self { date, delay }
    }

    /// Request that should be shown right away
    pub fn immediate(date: NaiveDate) -> Self {
        Self::new(date, Duration::ZERO)
    }

    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Field '{0}' is required")]
    Required(&'static str),
}

/// Editable fields of the form, in tab order
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Title,
    Time,
    Description,
    Color,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Title => FormField::Time,
            FormField::Time => FormField::Description,
            FormField::Description => FormField::Color,
            FormField::Color => FormField::Title,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            FormField::Title => FormField::Color,
            FormField::Time => FormField::Title,
            FormField::Description => FormField::Time,
            FormField::Color => FormField::Description,
        }
    }
}

/// Input state of the add-event prompt. The date is fixed by the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddEventForm {
    pub date: NaiveDate,
    pub title: String,
    pub time: String,
    pub description: String,
    pub color: EventColor,
}

impl AddEventForm {
    pub fn for_request(request: &AddEventRequest) -> Self {
        Self {
            date: request.date,
            title: String::new(),
            time: String::new(),
            description: String::new(),
            color: EventColor::Blue,
        }
    }

    /// Mutable text of a field, `None` for the color selector
    pub fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Title => Some(&mut self.title),
            FormField::Time => Some(&mut self.time),
            FormField::Description => Some(&mut self.description),
            FormField::Color => None,
        }
    }

    /// Checks required fields
    pub fn validate(&self) -> Result<(), FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::Required("title"));
        }
        Ok(())
    }

    /// Validates then converts to an event. Blank optional fields become `None`.
    pub fn into_event(self) -> Result<Event, FormError> {
        self.validate()?;
        let mut event = Event::new(self.date, self.title.trim()).with_color(self.color);
        if !self.time.trim().is_empty() {
            event.time = Some(self.time.trim().to_string());
        }
        if !self.description.trim().is_empty() {
            event.description = Some(self.description.trim().to_string());
        }
        Ok(event)
    }
}
