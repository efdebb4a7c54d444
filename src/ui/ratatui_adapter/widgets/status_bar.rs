//! Status bar widget for alerts, spinner text and messages

use crate::ui::output::MessageLevel;
use crate::ui::ratatui_adapter::state::StatusMessage;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Status bar widget
///
/// The left side shows the widget's own status (error alert, spinner,
/// "no matches") and falls back to the most recent transient message. The
/// right side shows a result summary.
pub struct StatusBar<'a> {
    status: Option<(MessageLevel, &'a str)>,
    messages: &'a [&'a StatusMessage],
    summary: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar widget
    #[must_use]
    pub const fn new(messages: &'a [&'a StatusMessage], theme: &'a Theme) -> Self {
        Self {
            status: None,
            messages,
            summary: "",
            theme,
        }
    }

    /// Set the widget status line
    #[must_use]
    pub const fn with_status(mut self, status: Option<(MessageLevel, &'a str)>) -> Self {
        self.status = status;
        self
    }

    /// Set the right-hand summary
    #[must_use]
    pub const fn with_summary(mut self, summary: &'a str) -> Self {
        self.summary = summary;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.frame_style())
            .title(" Status ");

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(inner);

        let shown = self
            .status
            .or_else(|| self.messages.last().map(|m| (m.level, m.text.as_str())));
        if let Some((level, text)) = shown {
            let style = self.theme.level_style(level);
            let marker = level.marker();
            let line = if marker.is_empty() {
                Line::styled(text, style)
            } else {
                Line::from(vec![
                    Span::styled(marker, style),
                    Span::raw(" "),
                    Span::styled(text, style),
                ])
            };
            Paragraph::new(line).render(chunks[0], buf);
        }

        Paragraph::new(Line::styled(self.summary, self.theme.muted_style()))
            .alignment(Alignment::Right)
            .render(chunks[1], buf);
    }
}
