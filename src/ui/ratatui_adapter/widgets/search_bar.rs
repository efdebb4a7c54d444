//! Search bar widget for query input

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search box with a text cursor and a placeholder for empty input
pub struct SearchBar<'a> {
    query: &'a str,
    /// Byte offset of the cursor in `query`
    cursor: usize,
    placeholder: &'a str,
    theme: &'a Theme,
    /// Show a busy marker in the title
    loading: bool,
}

impl<'a> SearchBar<'a> {
    /// Create a new search bar widget
    #[must_use]
    pub const fn new(query: &'a str, cursor: usize, placeholder: &'a str, theme: &'a Theme) -> Self {
        Self {
            query,
            cursor,
            placeholder,
            theme,
            loading: false,
        }
    }

    /// Set the busy marker
    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.loading { " Search … " } else { " Search " };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.accent_style())
            .title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        let caret = Span::styled("│", Style::default().add_modifier(Modifier::SLOW_BLINK));
        let spans = if self.query.is_empty() {
            vec![caret, Span::styled(self.placeholder, self.theme.muted_style())]
        } else {
            let split = self.cursor.min(self.query.len());
            let (before, after) = self.query.split_at(split);
            vec![Span::raw(before), caret, Span::raw(after)]
        };

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_placeholder_when_empty() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        SearchBar::new("", 0, "Search for GIFs", &theme).render(area, &mut buf);
        assert!(row(&buf, 1).contains("Search for GIFs"));
    }

    #[test]
    fn test_query_with_cursor() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        SearchBar::new("cats", 2, "Search for GIFs", &theme).render(area, &mut buf);

        let line = row(&buf, 1);
        assert!(line.contains("ca│ts"));
        assert!(!line.contains("Search for GIFs"));
    }
}
