//! Gifbox - an embeddable GIF and sticker search box
//!
//! This library provides the headless core of a GIPHY search widget
//! (debounced queries, responsive masonry layout, paginated fetching with
//! stale-response protection and infinite scroll) plus a terminal frontend
//! that hosts it.

use thiserror::Error;

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod fetch;
pub mod layout;
pub mod logging;
pub mod scroll;
pub mod ui;
pub mod widget;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum GifboxError {
    /// Invalid layout rules
    #[error("Layout error: {0}")]
    Config(#[from] layout::ConfigError),
    /// Represents a configuration file error
    #[error("Configuration error: {0}")]
    Settings(#[from] ::config::ConfigError),
    /// Request could not be built or sent
    #[error("Fetch error: {0}")]
    Fetch(#[from] api::FetchError),
    /// A search did not complete
    #[error("Search failed: {0}")]
    Search(String),
    /// Terminal frontend error
    #[error("UI error: {0}")]
    Ui(#[from] ui::UiError),
    /// Results could not be encoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
