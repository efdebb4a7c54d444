//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - *(none)*: open the interactive search box
//! - **search**: run one query without a terminal UI and print the results
//! - **config**: show the config file location or the effective settings
//!
//! Global flags override values from the config file.
//!
//! # Examples
//!
//! ```
//! use gifbox::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["gifbox", "search", "cats", "--pages", "2"]);
//! assert!(matches!(cli.command, Some(Commands::Search { pages: 2, .. })));
//! ```

use crate::api::{Library, RenditionFileType};
use crate::config::WidgetOptions;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "gifbox")]
#[command(about = "Search GIPHY from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// GIPHY API key (overrides config)
    #[arg(long = "api-key", env = "GIPHY_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Search stickers or GIFs (overrides config)
    #[arg(short = 'l', long = "library", value_enum, global = true)]
    pub library: Option<Library>,

    /// Content rating filter, e.g. g or pg-13 (overrides config)
    #[arg(long = "rating", global = true)]
    pub rating: Option<String>,

    /// Results per page (overrides config)
    #[arg(long = "page-size", value_name = "N", global = true)]
    pub page_size: Option<u32>,

    /// Rendition file to show (overrides config)
    #[arg(long = "file-type", value_enum, global = true)]
    pub file_type: Option<RenditionFileType>,

    /// Read configuration from this file instead of the default location
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run one search and print the results
    #[command(visible_alias = "s")]
    Search {
        /// Search terms; trending results when omitted
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Number of pages to load
        #[arg(short = 'p', long = "pages", default_value_t = 1,
              value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,

        /// Print results as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the config file path
    Path,

    /// Print the effective configuration as TOML
    Show,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Apply flag overrides on top of file settings
    pub fn apply_overrides(&self, options: &mut WidgetOptions) {
        if let Some(api_key) = &self.api_key {
            options.api_key.clone_from(api_key);
        }
        if let Some(library) = self.library {
            options.library = library;
        }
        if let Some(rating) = &self.rating {
            options.rating.clone_from(rating);
        }
        if let Some(page_size) = self.page_size {
            options.gif_per_page = page_size;
        }
        if let Some(file_type) = self.file_type {
            options.image_rendition_file_type = file_type;
        }
    }

    /// Whether the interactive search box should run
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.command.is_none()
    }
}
