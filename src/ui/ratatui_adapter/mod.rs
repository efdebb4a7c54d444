//! Ratatui terminal frontend
//!
//! Hosts a [`Widget`](crate::widget::Widget) in the terminal: a search box
//! on top, the masonry grid of results below it, then a status line and
//! key hints.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           RatatuiFrontend                   │
//! │  (implements Frontend trait)                │
//! └────────────────────┬────────────────────────┘
//!                      │
//!        ┌─────────────┼─────────────┐
//!        ▼             ▼             ▼
//! ┌────────────┐ ┌───────────┐ ┌───────────┐
//! │   Widget   │ │  Ratatui  │ │ Crossterm │
//! │  (state)   │ │ (widgets) │ │  (events) │
//! └────────────┘ └───────────┘ └───────────┘
//! ```
//!
//! Layout rules are expressed in pixels. The frontend converts terminal
//! cells to pixels with [`CellSize`](widgets::CellSize), so breakpoints
//! react to the terminal width.

mod events;
mod frontend;
mod state;
mod theme;
pub mod widgets;

pub use events::{EventResult, GridShape};
pub use frontend::RatatuiFrontend;
pub use state::{AppState, StatusMessage};
pub use theme::Theme;
