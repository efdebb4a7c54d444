//! Application state for the ratatui TUI
//!
//! Holds what the terminal host owns on top of the widget: the text being
//! edited, the highlighted tile, the scroll position of the results grid
//! and transient status messages.

use crate::layout::Placement;
use crate::scroll::ScrollMetrics;
use crate::ui::output::MessageLevel;
use std::time::{Duration, Instant};

/// A status message with timestamp for TTL-based expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub level: MessageLevel,
    pub text: String,
    pub created_at: Instant,
}

impl StatusMessage {
    /// Create a new status message
    #[must_use]
    pub fn new(level: MessageLevel, text: String) -> Self {
        Self {
            level,
            text,
            created_at: Instant::now(),
        }
    }

    /// Check if the message has expired based on TTL
    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Application state for the terminal host
#[derive(Debug)]
pub struct AppState {
    /// Search box contents
    pub query: String,
    /// Byte offset of the text cursor within `query`
    pub query_cursor: usize,
    /// Index of the highlighted item
    pub cursor: usize,
    /// Scroll position of the grid in pixels
    pub scroll_px: u32,
    /// Visible grid height in pixels, updated on every draw
    pub grid_height_px: u32,
    /// Status messages
    pub messages: Vec<StatusMessage>,
    pub message_ttl: Duration,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create an empty state
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: String::new(),
            query_cursor: 0,
            cursor: 0,
            scroll_px: 0,
            grid_height_px: 0,
            messages: Vec::new(),
            message_ttl: Duration::from_secs(4),
        }
    }

    /// Add a character to the query
    pub fn query_push(&mut self, c: char) {
        self.query.insert(self.query_cursor, c);
        self.query_cursor += c.len_utf8();
    }

    /// Remove the character before the text cursor
    pub fn query_backspace(&mut self) {
        if self.query_cursor > 0 {
            let prev = self.prev_boundary();
            self.query.remove(prev);
            self.query_cursor = prev;
        }
    }

    /// Delete the character under the text cursor
    pub fn query_delete(&mut self) {
        if self.query_cursor < self.query.len() {
            self.query.remove(self.query_cursor);
        }
    }

    /// Move the text cursor left
    pub fn query_cursor_left(&mut self) {
        self.query_cursor = self.prev_boundary();
    }

    /// Move the text cursor right
    pub fn query_cursor_right(&mut self) {
        if let Some(c) = self.query[self.query_cursor..].chars().next() {
            self.query_cursor += c.len_utf8();
        }
    }

    /// Clear the query
    pub fn query_clear(&mut self) {
        self.query.clear();
        self.query_cursor = 0;
    }

    fn prev_boundary(&self) -> usize {
        self.query[..self.query_cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    /// Move the highlight one item back
    pub const fn cursor_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the highlight one item forward
    pub const fn cursor_next(&mut self, item_count: usize) {
        if self.cursor + 1 < item_count {
            self.cursor += 1;
        }
    }

    /// Move the highlight one row up
    pub const fn cursor_up(&mut self, columns: usize) {
        self.cursor = self.cursor.saturating_sub(columns);
    }

    /// Move the highlight one row down
    pub const fn cursor_down(&mut self, columns: usize, item_count: usize) {
        if self.cursor + columns < item_count {
            self.cursor += columns;
        }
    }

    /// Keep the highlight inside the list after it shrank
    pub const fn clamp_cursor(&mut self, item_count: usize) {
        if self.cursor >= item_count {
            self.cursor = item_count.saturating_sub(1);
        }
    }

    /// Back to the top, e.g. for a new query
    pub const fn reset_view(&mut self) {
        self.cursor = 0;
        self.scroll_px = 0;
    }

    /// Scroll up one page
    pub const fn page_up(&mut self) {
        self.scroll_px = self.scroll_px.saturating_sub(self.grid_height_px);
    }

    /// Scroll down one page, stopping at the end of the content
    pub fn page_down(&mut self, content_height: u32) {
        let max = content_height.saturating_sub(self.grid_height_px);
        self.scroll_px = (self.scroll_px + self.grid_height_px).min(max);
    }

    /// Scroll so that `placement` is fully visible
    pub const fn ensure_visible(&mut self, placement: &Placement) {
        if placement.y < self.scroll_px {
            self.scroll_px = placement.y;
        } else if placement.bottom() > self.scroll_px + self.grid_height_px {
            self.scroll_px = placement.bottom().saturating_sub(self.grid_height_px);
        }
    }

    /// Scroll metrics of the grid for the pagination trigger
    #[must_use]
    pub const fn scroll_metrics(&self, content_height: u32) -> ScrollMetrics {
        ScrollMetrics::new(self.scroll_px, self.grid_height_px, content_height)
    }

    /// Add a status message
    pub fn add_message(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.messages.push(StatusMessage::new(level, text.into()));
    }

    /// Get non-expired messages
    #[must_use]
    pub fn active_messages(&self) -> Vec<&StatusMessage> {
        self.messages
            .iter()
            .filter(|m| !m.is_expired(self.message_ttl))
            .collect()
    }

    /// Clean up expired messages
    pub fn cleanup_messages(&mut self) {
        self.messages.retain(|m| !m.is_expired(self.message_ttl));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new()
    }

    #[test]
    fn test_query_editing() {
        let mut state = state();
        for c in "caté".chars() {
            state.query_push(c);
        }
        assert_eq!(state.query, "caté");

        state.query_backspace();
        assert_eq!(state.query, "cat");
        assert_eq!(state.query_cursor, 3);

        state.query_cursor_left();
        state.query_cursor_left();
        state.query_delete();
        assert_eq!(state.query, "ct");

        state.query_cursor_right();
        state.query_push('s');
        assert_eq!(state.query, "cts");

        state.query_clear();
        assert!(state.query.is_empty());
        assert_eq!(state.query_cursor, 0);
    }

    #[test]
    fn test_grid_navigation() {
        let mut state = state();
        state.cursor_down(3, 10);
        assert_eq!(state.cursor, 3);
        state.cursor_next(10);
        assert_eq!(state.cursor, 4);
        state.cursor_down(3, 10);
        state.cursor_down(3, 10);
        assert_eq!(state.cursor, 7);
        state.cursor_up(3);
        assert_eq!(state.cursor, 4);
        state.cursor_prev();
        assert_eq!(state.cursor, 3);

        state.clamp_cursor(2);
        assert_eq!(state.cursor, 1);
        state.clamp_cursor(0);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_paging_stops_at_content_end() {
        let mut state = state();
        state.grid_height_px = 300;

        state.page_down(700);
        assert_eq!(state.scroll_px, 300);
        state.page_down(700);
        assert_eq!(state.scroll_px, 400);
        state.page_up();
        assert_eq!(state.scroll_px, 100);
        state.page_up();
        assert_eq!(state.scroll_px, 0);
    }

    #[test]
    fn test_ensure_visible() {
        let mut state = state();
        state.grid_height_px = 200;
        let below = Placement {
            column: 0,
            x: 0,
            y: 250,
            width: 120,
            height: 60,
        };
        state.ensure_visible(&below);
        assert_eq!(state.scroll_px, 110);

        let above = Placement { y: 20, ..below };
        state.ensure_visible(&above);
        assert_eq!(state.scroll_px, 20);
    }

    #[test]
    fn test_scroll_metrics() {
        let mut state = state();
        state.grid_height_px = 320;
        state.scroll_px = 80;
        let metrics = state.scroll_metrics(1000);
        assert_eq!(metrics.remaining(), 600);
    }

    #[test]
    fn test_message_expiry() {
        let mut state = state();
        state.message_ttl = Duration::from_millis(20);
        state.add_message(MessageLevel::Info, "retrying");
        assert_eq!(state.active_messages().len(), 1);

        std::thread::sleep(Duration::from_millis(40));
        assert!(state.active_messages().is_empty());
        state.cleanup_messages();
        assert!(state.messages.is_empty());
    }
}
