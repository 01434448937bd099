use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use tasktty_core::Item;

use super::text::{shorten, shorten_front};

/// Two rows under the item list: the selected task on top, then the
/// buffer, or the pending error in its place.
pub struct CommandBar<'a> {
    buffer: &'a str,
    error: Option<&'a str>,
    selected: Option<&'a Item>,
}

impl<'a> CommandBar<'a> {
    pub fn new(buffer: &'a str, error: Option<&'a str>, selected: Option<&'a Item>) -> Self {
        Self {
            buffer,
            error,
            selected,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let cols = (area.width as usize).saturating_sub(2);

        let label = match self.selected {
            Some(item) => Line::from(Span::styled(
                format!(" {}", shorten(&format!("selected: {}", item.content), cols)),
                Style::default().add_modifier(Modifier::DIM),
            )),
            None => Line::default(),
        };
        let input = match self.error {
            Some(error) => Line::from(Span::styled(
                format!(" {}", shorten(error, cols)),
                Style::default().fg(Color::Red),
            )),
            None => Line::from(format!(" {}", shorten_front(self.buffer, cols))),
        };

        frame.render_widget(Paragraph::new(vec![label, input]), area);
    }
}
