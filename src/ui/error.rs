//! Terminal frontend errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UiError {
    /// Raw mode, the alternate screen or drawing failed
    #[error("Terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),

    /// Not enough room for the search bar, one row of tiles and the status line
    #[error("Terminal is {cols}x{rows}, need at least {min_cols}x{min_rows}")]
    TooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },
}

pub type Result<T> = std::result::Result<T, UiError>;
