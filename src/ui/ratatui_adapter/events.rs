//! Event handling for the ratatui TUI
//!
//! Maps key presses to edits of [`AppState`] and to the widget events the
//! host has to forward.

use super::state::AppState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running the event loop
    Continue,
    /// Search box contents changed
    InputChanged,
    /// Search form submitted
    Submit,
    /// Highlighted item picked
    Select,
    /// Retry the failed request
    Retry,
    /// Terminal resized to the given size in cells
    Resized(u16, u16),
    /// Exit without a selection
    Abort,
    /// No action taken
    Ignored,
}

/// Grid geometry needed to move the highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub columns: usize,
    pub item_count: usize,
    pub content_height: u32,
    /// Typed input has not been searched yet, so the grid shows older results
    pub query_pending: bool,
}

/// Handle a key press
pub fn handle_key(state: &mut AppState, key: KeyEvent, grid: GridShape) -> EventResult {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => EventResult::Abort,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => EventResult::Retry,
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => EventResult::Submit,
        (KeyCode::Enter, _) => {
            if grid.query_pending || grid.item_count == 0 {
                EventResult::Submit
            } else {
                EventResult::Select
            }
        }

        // Grid navigation
        (KeyCode::Up, _) => {
            state.cursor_up(grid.columns);
            EventResult::Continue
        }
        (KeyCode::Down, _) => {
            state.cursor_down(grid.columns, grid.item_count);
            EventResult::Continue
        }
        (KeyCode::Tab, _) => {
            state.cursor_next(grid.item_count);
            EventResult::Continue
        }
        (KeyCode::BackTab, _) => {
            state.cursor_prev();
            EventResult::Continue
        }
        (KeyCode::PageUp, _) => {
            state.page_up();
            EventResult::Continue
        }
        (KeyCode::PageDown, _) => {
            state.page_down(grid.content_height);
            EventResult::Continue
        }

        // Search box editing
        (KeyCode::Left, _) => {
            state.query_cursor_left();
            EventResult::Continue
        }
        (KeyCode::Right, _) => {
            state.query_cursor_right();
            EventResult::Continue
        }
        (KeyCode::Backspace, _) => {
            state.query_backspace();
            EventResult::InputChanged
        }
        (KeyCode::Delete, _) => {
            state.query_delete();
            EventResult::InputChanged
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
            state.query_clear();
            EventResult::InputChanged
        }
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            state.query_push(c);
            EventResult::InputChanged
        }
        _ => EventResult::Ignored,
    }
}

/// Poll for an event and handle it
///
/// # Errors
///
/// Returns an I/O error if the terminal cannot be read.
pub fn poll_and_handle(
    state: &mut AppState,
    grid: GridShape,
    timeout: Duration,
) -> std::io::Result<EventResult> {
    if !event::poll(timeout)? {
        return Ok(EventResult::Continue);
    }

    let result = match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(state, key, grid),
        Event::Resize(cols, rows) => EventResult::Resized(cols, rows),
        _ => EventResult::Ignored,
    };

    Ok(result)
}
