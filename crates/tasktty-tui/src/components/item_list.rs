use ratatui::prelude::*;
use ratatui::widgets::{Block, Padding, Paragraph};
use tasktty_core::Item;
use unicode_width::UnicodeWidthStr;

use super::text::shorten;

/// Main area: the tasks the buffer matches. A lone match is reversed, the
/// selected task is bold, due dates sit dimmed at the right edge.
pub struct ItemList<'a> {
    items: &'a [Item],
    selected: Option<&'a Item>,
}

impl<'a> ItemList<'a> {
    pub fn new(items: &'a [Item], selected: Option<&'a Item>) -> Self {
        Self { items, selected }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().padding(Padding::top(1));
        let inner = block.inner(area);
        let width = inner.width as usize;
        let single = self.items.len() == 1;

        let lines: Vec<Line> = self
            .items
            .iter()
            .take(inner.height as usize)
            .map(|item| self.line(item, width, single))
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn line(&self, item: &Item, width: usize, single: bool) -> Line<'static> {
        let offset = item.display_offset();
        let date = item
            .due
            .map(|due| format!("  {}", due.display()))
            .unwrap_or_default();
        let content = shorten(
            &item.content,
            width.saturating_sub(offset + date.width()),
        );
        let gap = width.saturating_sub(offset + content.width() + date.width());

        let mut style = Style::default();
        if single {
            style = style.add_modifier(Modifier::REVERSED);
        }
        if self.selected.is_some_and(|s| s.id == item.id) {
            style = style.add_modifier(Modifier::BOLD);
        }

        Line::from(vec![
            Span::raw(" ".repeat(offset)),
            Span::styled(content, style),
            Span::raw(" ".repeat(gap)),
            Span::styled(date, Style::default().add_modifier(Modifier::DIM)),
        ])
    }
}
