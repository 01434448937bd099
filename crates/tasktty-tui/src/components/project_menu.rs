use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};
use tasktty_core::Project;

use super::text::shorten;

/// Left column: every project in service order, nested by indent, with
/// the ones picked by the buffer's `#` tokens reversed.
pub struct ProjectMenu<'a> {
    projects: &'a [Project],
    selected: &'a [String],
}

impl<'a> ProjectMenu<'a> {
    pub fn new(projects: &'a [Project], selected: &'a [String]) -> Self {
        Self { projects, selected }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .padding(Padding::new(1, 0, 1, 0));
        let inner = block.inner(area);
        let rows = inner.height as usize;
        let width = inner.width as usize;

        let overflow = self.projects.len() > rows;
        let shown = if overflow {
            rows.saturating_sub(1)
        } else {
            self.projects.len()
        };

        let mut lines: Vec<Line> = self.projects[..shown]
            .iter()
            .map(|project| {
                let offset = project.display_offset();
                let name = shorten(&project.name, width.saturating_sub(offset + 1));
                let style = if self.selected.contains(&project.id) {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::raw(" ".repeat(offset)),
                    Span::styled(name, style),
                ])
            })
            .collect();
        if overflow && rows > 0 {
            lines.push(Line::from("..."));
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
