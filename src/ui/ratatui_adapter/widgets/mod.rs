//! Ratatui widgets for the search box TUI
//!
//! Custom widgets for rendering the widget's render state.

mod help_bar;
mod result_grid;
mod search_bar;
mod status_bar;

pub use help_bar::HelpBar;
pub use result_grid::{CellSize, ResultGrid};
pub use search_bar::SearchBar;
pub use status_bar::StatusBar;
