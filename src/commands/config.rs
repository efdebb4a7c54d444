//! Config command - show where settings live and what is in effect

use crate::{GifboxError, cli::ConfigCommands, config::GifboxConfig, ui::OutputWriter};
use std::path::Path;

type Result<T> = std::result::Result<T, GifboxError>;

/// Execute a config subcommand
///
/// `path` is the config file in use. `show` prints `config` with the API
/// key masked.
///
/// # Errors
///
/// Returns an error if the settings cannot be serialized.
pub fn execute(
    config: &GifboxConfig,
    path: &Path,
    command: ConfigCommands,
    output: &dyn OutputWriter,
) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            output.write(&path.display().to_string());
            if !path.exists() {
                output.info("(file does not exist, defaults are in effect)");
            }
        }
        ConfigCommands::Show => {
            let mut shown = config.clone();
            shown.widget.api_key = mask(&shown.widget.api_key);
            output.write(shown.to_toml()?.trim_end());
        }
    }
    Ok(())
}

/// Keep the last four characters of a secret
fn mask(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{tail}", "*".repeat(count - 4))
}
