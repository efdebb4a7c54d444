//! Gifbox CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Open the interactive search box (trending results until you type)
//! gifbox --api-key KEY
//!
//! # Print one page of results
//! gifbox search "funny cats"
//!
//! # Three pages of stickers as JSON
//! gifbox --library stickers search cats --pages 3 --json
//!
//! # Where settings are read from
//! gifbox config path
//! ```
//!
//! # Configuration
//!
//! Settings are read from the user's config directory
//! (`~/.config/gifbox/config.toml` on Linux) and from `GIFBOX_*`
//! environment variables. Flags override both. The API key may also be
//! given as `GIPHY_API_KEY`.

use gifbox::{
    GifboxError,
    api::GiphyClient,
    cli::{Cli, Commands},
    commands,
    config::{GifboxConfig, WidgetOptions},
    logging::{self, LogTarget},
    ui::{Frontend, FrontendOutcome, RatatuiFrontend, StdoutWriter},
    widget::Widget,
};
use std::sync::Arc;

type Result<T> = std::result::Result<T, GifboxError>;

/// Viewport width used when the terminal size is unknown
const FALLBACK_VIEWPORT_WIDTH: u32 = 800;

/// Build a widget talking to the live API
///
/// # Errors
///
/// Returns `GifboxError::InvalidInput` when no API key is configured, or
/// an error if the options are invalid.
fn build_widget(options: &WidgetOptions, viewport_width: u32) -> Result<Widget> {
    if options.api_key.trim().is_empty() {
        return Err(GifboxError::InvalidInput(
            "No API key set. Use --api-key, set GIPHY_API_KEY, or add api_key under [widget] in the config file.".into(),
        ));
    }

    let client = GiphyClient::with_base(options.api_base.clone(), options.api_key.clone())?;
    let widget = Widget::new(options.clone(), Arc::new(client), viewport_width)?
        .with_on_search(|query| tracing::info!(query = %query, "search started"))
        .with_on_select(|item| tracing::info!(id = %item.id, "item selected"));
    Ok(widget)
}

/// Run the interactive search box and print the picked item
fn handle_interactive(config: &GifboxConfig, verbose: bool) -> Result<()> {
    // Logs must not reach the terminal while the frontend owns it
    if let Some(path) = config.log_file.clone().or_else(GifboxConfig::default_log_file) {
        logging::init(verbose, &LogTarget::File(path))?;
    }

    let frontend = RatatuiFrontend::new().with_terminal_options(&config.terminal);
    let viewport_width = crossterm::terminal::size()
        .map_or(FALLBACK_VIEWPORT_WIDTH, |(cols, _)| frontend.viewport_width(cols));
    let mut widget = build_widget(&config.widget, viewport_width)?;

    match frontend.run(&mut widget)? {
        FrontendOutcome::Selected(item) => {
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        FrontendOutcome::Aborted => tracing::debug!("aborted without a selection"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => GifboxConfig::config_path()?,
    };
    let mut config = GifboxConfig::load_from(&config_path)?;
    cli.apply_overrides(&mut config.widget);

    let output = StdoutWriter::new();
    match &cli.command {
        None => handle_interactive(&config, cli.verbose)?,
        Some(Commands::Search { query, pages, json }) => {
            logging::init(cli.verbose, &LogTarget::Stderr)?;
            let mut widget = build_widget(&config.widget, FALLBACK_VIEWPORT_WIDTH)?;
            commands::search(
                &mut widget,
                query.as_deref().unwrap_or_default(),
                *pages,
                *json,
                &output,
            )?;
        }
        Some(Commands::Config { command }) => {
            logging::init(cli.verbose, &LogTarget::Stderr)?;
            commands::config(&config, &config_path, *command, &output)?;
        }
    }

    Ok(())
}
