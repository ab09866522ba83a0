use kalcore::prompt::{AddEventForm, FormField};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::calendar_view::swatch;

const ACTIVE_STYLE: Style = Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD);
const HINT_STYLE: Style = Style::new().fg(Color::DarkGray);
const LABEL_WIDTH: u16 = 13;

const FIELDS: [(FormField, &str); 4] = [
    (FormField::Title, "Title*"),
    (FormField::Time, "Time"),
    (FormField::Description, "Description"),
    (FormField::Color, "Color"),
];

/// Modal add-event dialog drawn over the current view.
pub struct PromptWidget<'a> {
    pub form: &'a AddEventForm,
    pub active: FormField,
}

impl PromptWidget<'_> {
    /// Centered dialog area inside `area`
    pub fn area(area: Rect) -> Rect {
        let [vertical] = Layout::vertical([Constraint::Length(FIELDS.len() as u16 + 4)])
            .flex(Flex::Center)
            .areas(area);
        let [dialog] = Layout::horizontal([Constraint::Max(60)])
            .flex(Flex::Center)
            .areas(vertical);
        dialog
    }

    /// Terminal cursor at the end of the active text field, if any
    pub fn cursor(&self, area: Rect) -> Option<Position> {
        let dialog = Self::area(area);
        let row = FIELDS.iter().position(|(field, _)| *field == self.active)? as u16;
        let text = match self.active {
            FormField::Title => &self.form.title,
            FormField::Time => &self.form.time,
            FormField::Description => &self.form.description,
            FormField::Color => return None,
        };
        let x = dialog.x + 1 + LABEL_WIDTH + text.chars().count() as u16;
        Some(Position::new(x.min(dialog.right().saturating_sub(2)), dialog.y + 1 + row))
    }
}

impl Widget for PromptWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog = Self::area(area);
        Clear.render(dialog, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" New event on {} ", self.form.date.format("%Y-%m-%d")));

        let mut lines: Vec<Line> = FIELDS
            .iter()
            .map(|(field, label)| {
                let label_style = if *field == self.active { ACTIVE_STYLE } else { Style::new() };
                let label = Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH as usize), label_style);
                let value = match field {
                    FormField::Title => Span::raw(self.form.title.clone()),
                    FormField::Time => Span::raw(self.form.time.clone()),
                    FormField::Description => Span::raw(self.form.description.clone()),
                    FormField::Color => Span::styled(
                        format!("● {} ◂▸", self.form.color),
                        Style::new().fg(swatch(self.form.color)),
                    ),
                };
                Line::from(vec![label, value])
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Enter save · Esc cancel · Tab next field",
            HINT_STYLE,
        )));

        Paragraph::new(lines).block(block).render(dialog, buf);
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use kalcore::prompt::AddEventRequest;

    use super::*;

    #[test]
    fn cursor_tracks_active_field() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
        let mut form = AddEventForm::for_request(&AddEventRequest::immediate(date));
        form.title.push_str("Lunch");
        let area = Rect::new(0, 0, 80, 24);

        let widget = PromptWidget { form: &form, active: FormField::Title };
        let dialog = PromptWidget::area(area);
        assert_eq!(
            widget.cursor(area),
            Some(Position::new(dialog.x + 1 + LABEL_WIDTH + 5, dialog.y + 1))
        );

        let color = PromptWidget { form: &form, active: FormField::Color };
        assert_eq!(color.cursor(area), None);
    }
}
