//! Layout configuration errors

use thiserror::Error;

/// Errors raised while validating a layout configuration
///
/// These are fatal at initialization: a widget cannot render meaningfully
/// without a valid set of layout rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No layout entries were supplied
    #[error("empty layout configuration")]
    EmptyLayout,

    /// More than one entry lacks a breakpoint
    #[error("layout configuration has {0} base entries, at most one entry may omit its breakpoint")]
    MultipleBaseEntries(usize),

    /// Two entries declare the same breakpoint
    #[error("layout configuration declares breakpoint {0}px more than once")]
    DuplicateBreakpoint(u32),

    /// A layout entry has zero columns
    #[error("layout entry must have at least one column")]
    ZeroColumns,

    /// A breakpoint string could not be parsed
    #[error("invalid breakpoint '{0}', expected a pixel width such as \"700px\"")]
    InvalidBreakpoint(String),

    /// Columns, item width and gutter do not fit in a pixel width
    #[error("layout entry of {columns} columns at {item_width}px plus {gutter}px gutter is too wide")]
    Oversized {
        columns: u32,
        item_width: u32,
        gutter: u32,
    },
}
