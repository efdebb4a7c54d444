//! Colors and styles for the terminal frontend

use crate::ui::output::MessageLevel;
use ratatui::style::{Color, Modifier, Style};

/// Palette for the search box, the grid and the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Highlighted tile
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    /// Text caret, key hints and the highlighted tile's frame
    pub accent: Color,
    /// Frames of everything else
    pub frame: Color,
    /// Secondary text such as ids and placeholders
    pub muted: Color,
    pub media_url: Color,
    /// Status line colors, indexed like [`MessageLevel`]
    pub ok: Color,
    pub alert: Color,
    pub notice: Color,
    pub busy: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Palette for dark terminals (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            highlight_bg: Color::Blue,
            highlight_fg: Color::White,
            accent: Color::Cyan,
            frame: Color::DarkGray,
            muted: Color::DarkGray,
            media_url: Color::Magenta,
            ok: Color::Green,
            alert: Color::Red,
            notice: Color::Yellow,
            busy: Color::Cyan,
        }
    }

    /// Palette for light terminals
    #[must_use]
    pub const fn light() -> Self {
        Self {
            highlight_bg: Color::LightBlue,
            highlight_fg: Color::Black,
            accent: Color::Blue,
            frame: Color::Gray,
            muted: Color::Gray,
            media_url: Color::Magenta,
            ok: Color::Green,
            alert: Color::Red,
            notice: Color::Rgb(160, 110, 0),
            busy: Color::Blue,
        }
    }

    /// Frame and text style of a result tile
    #[must_use]
    pub fn tile(&self, highlighted: bool) -> (Style, Style) {
        if highlighted {
            (
                self.accent_style(),
                Style::default()
                    .bg(self.highlight_bg)
                    .fg(self.highlight_fg)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (self.frame_style(), Style::default())
        }
    }

    #[must_use]
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn frame_style(&self) -> Style {
        Style::default().fg(self.frame)
    }

    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Media links are underlined
    #[must_use]
    pub fn media_url_style(&self) -> Style {
        Style::default()
            .fg(self.media_url)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Style of a status line entry
    #[must_use]
    pub fn level_style(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Success => Style::default().fg(self.ok),
            MessageLevel::Error => Style::default().fg(self.alert).add_modifier(Modifier::BOLD),
            MessageLevel::Warning => Style::default().fg(self.notice),
            MessageLevel::Info => Style::default().fg(self.busy),
            MessageLevel::Normal => Style::default(),
        }
    }
}
