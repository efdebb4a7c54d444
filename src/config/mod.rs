//! Configuration module for gifbox
//!
//! Holds the options a host passes to the widget and the terminal-specific
//! settings of the bundled frontend. Configuration is read from
//! `config.toml` in the user's config directory, overlaid with `GIFBOX_*`
//! environment variables (e.g. `GIFBOX_WIDGET__API_KEY`).
//!
//! ```toml
//! [widget]
//! library = "stickers"
//! gif_per_page = 30
//!
//! [[widget.masonry_config]]
//! columns = 2
//! image_width = 110
//! gutter = 5
//!
//! [[widget.masonry_config]]
//! mq = "700px"
//! columns = 3
//! image_width = 200
//! gutter = 5
//! ```

use crate::GifboxError;
use crate::api::{DEFAULT_API_BASE, Library, RenditionFileType};
use crate::debounce::DEFAULT_QUIET_PERIOD;
use crate::layout::{self, LayoutConfig};
use crate::scroll::DEFAULT_THRESHOLD;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Options accepted by [`Widget`](crate::widget::Widget)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    /// Credential forwarded to the search API
    pub api_key: String,
    /// API namespace
    pub library: Library,
    /// Page size
    pub gif_per_page: u32,
    /// Content rating filter
    pub rating: String,
    /// Layout rules, see [`LayoutConfig`]
    pub masonry_config: Vec<LayoutConfig>,
    pub search_placeholder: String,
    pub message_error: String,
    pub message_loading: String,
    pub message_no_matches: String,
    /// Rendition displayed for each result
    pub image_rendition_name: String,
    pub image_rendition_file_type: RenditionFileType,
    /// Quiet period before a typed query is searched
    pub debounce_ms: u64,
    /// Distance from the end of the list that loads the next page, in pixels
    pub scroll_threshold: u32,
    /// API root, overridable for proxies
    pub api_base: String,
    /// Height of the results area in pixels
    pub list_height: u32,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            library: Library::Gifs,
            gif_per_page: 20,
            rating: "g".to_string(),
            masonry_config: vec![LayoutConfig::default()],
            search_placeholder: "Search for GIFs".to_string(),
            message_error: "Oops! Something went wrong. Please, try again.".to_string(),
            message_loading: "Loading...".to_string(),
            message_no_matches: "No matches found.".to_string(),
            image_rendition_name: "fixed_width_downsampled".to_string(),
            image_rendition_file_type: RenditionFileType::Gif,
            debounce_ms: u64::try_from(DEFAULT_QUIET_PERIOD.as_millis()).unwrap_or(500),
            scroll_threshold: DEFAULT_THRESHOLD,
            api_base: DEFAULT_API_BASE.to_string(),
            list_height: 300,
        }
    }
}

impl WidgetOptions {
    /// Builder method to set the API key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Builder method to set the library
    #[must_use]
    pub const fn with_library(mut self, library: Library) -> Self {
        self.library = library;
        self
    }

    /// Builder method to set the layout rules
    #[must_use]
    pub fn with_masonry_config(mut self, masonry_config: Vec<LayoutConfig>) -> Self {
        self.masonry_config = masonry_config;
        self
    }

    /// Builder method to set the page size
    #[must_use]
    pub const fn with_page_size(mut self, gif_per_page: u32) -> Self {
        self.gif_per_page = gif_per_page;
        self
    }

    /// Debounce quiet period
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Check the options before a widget is built from them
    ///
    /// # Errors
    ///
    /// Returns [`GifboxError::InvalidInput`] for a zero page size and
    /// [`GifboxError::Config`] for invalid layout rules.
    pub fn validate(&self) -> Result<(), GifboxError> {
        if self.gif_per_page == 0 {
            return Err(GifboxError::InvalidInput(
                "gif_per_page must be at least 1".to_string(),
            ));
        }
        layout::validate(&self.masonry_config)?;
        Ok(())
    }
}

/// Settings of the terminal frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalOptions {
    /// Pixels represented by one terminal column
    pub cell_width_px: u32,
    /// Pixels represented by one terminal row
    pub cell_height_px: u32,
    /// Use the palette for light backgrounds
    pub light: bool,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            cell_width_px: 8,
            cell_height_px: 16,
            light: false,
        }
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GifboxConfig {
    /// Widget options
    #[serde(default)]
    pub widget: WidgetOptions,

    /// Terminal frontend settings
    #[serde(default)]
    pub terminal: TerminalOptions,

    /// Log file used by the interactive frontend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl GifboxConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("gifbox").join("config.toml"))
    }

    /// Default log file location, under the platform data directory
    #[must_use]
    pub fn default_log_file() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("gifbox").join("gifbox.log"))
    }

    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults; nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, overlaid with the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("GIFBOX")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(loaded)
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Render the configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }
}
