use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::command::Action;

/// Bottom-right box naming the action Enter would run.
pub struct ActionIndicator {
    active: Option<Action>,
}

impl ActionIndicator {
    pub fn new(active: Option<Action>) -> Self {
        Self { active }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let line = match self.active {
            Some(action) => Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    action.name(),
                    Style::default().add_modifier(Modifier::REVERSED),
                ),
            ]),
            None => Line::default(),
        };
        frame.render_widget(Paragraph::new(vec![Line::default(), line]), area);
    }
}
