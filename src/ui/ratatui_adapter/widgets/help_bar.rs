//! Bottom row listing the search box's keys

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Key and action, most important first
const KEYS: &[(&str, &str)] = &[
    ("Enter", "pick"),
    ("ESC", "quit"),
    ("↑/↓/TAB", "move"),
    ("ctrl+r", "retry"),
    ("ctrl+s", "search now"),
    ("PgUp/PgDn", "scroll"),
];

const SEPARATOR: &str = "  ";

pub struct HelpBar<'a> {
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// Number of leading entries of [`KEYS`] that fit in `width` cells
    fn fitting(width: u16) -> usize {
        let mut used = 0;
        KEYS.iter()
            .take_while(|(key, action)| {
                let sep = if used == 0 { 0 } else { SEPARATOR.chars().count() };
                used += sep + key.chars().count() + 1 + action.chars().count();
                used <= usize::from(width)
            })
            .count()
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let muted = self.theme.muted_style();
        let accent = self.theme.accent_style();

        let spans: Vec<Span> = KEYS[..Self::fitting(area.width)]
            .iter()
            .enumerate()
            .flat_map(|(i, (key, action))| {
                let sep = if i == 0 { "" } else { SEPARATOR };
                [
                    Span::styled(sep, muted),
                    Span::styled(*key, accent),
                    Span::styled(":", muted),
                    Span::raw(*action),
                ]
            })
            .collect();

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(width: u16) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        HelpBar::new(&theme).render(area, &mut buf);
        (0..width).map(|x| buf[(x, 0)].symbol()).collect()
    }

    #[test]
    fn test_wide_row_shows_every_key() {
        let text = row(120);
        assert!(text.starts_with("Enter:pick  ESC:quit"));
        assert!(text.contains("PgUp/PgDn:scroll"));
    }

    #[test]
    fn test_narrow_row_drops_trailing_keys() {
        assert_eq!(HelpBar::fitting(10), 1);
        assert_eq!(HelpBar::fitting(4), 0);
        let text = row(22);
        assert!(text.contains("ESC:quit"));
        assert!(!text.contains("move"));
    }
}
