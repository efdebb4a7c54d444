//! Output abstraction layer
//!
//! Commands report through an [`OutputWriter`] so the same code can print
//! to a terminal or be captured in tests.

use colored::Colorize;
use std::sync::{Arc, Mutex, PoisonError};

/// How important a message is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Normal,
    Error,
    Success,
    Warning,
    /// Progress and secondary information
    Info,
}

impl MessageLevel {
    /// Symbol printed in front of a message, empty for [`MessageLevel::Normal`]
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Error => "✗",
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
        }
    }
}

/// Sink for command output
///
/// Implementors only provide [`OutputWriter::emit`].
///
/// # Examples
///
/// ```no_run
/// use gifbox::ui::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new();
/// output.write("cats-0  Funny Cat");
/// output.success("Loaded 25 results");
/// output.error("Request failed with status 429");
/// ```
pub trait OutputWriter: Send + Sync {
    fn emit(&self, level: MessageLevel, message: &str);

    fn write(&self, message: &str) {
        self.emit(MessageLevel::Normal, message);
    }

    fn error(&self, message: &str) {
        self.emit(MessageLevel::Error, message);
    }

    fn success(&self, message: &str) {
        self.emit(MessageLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.emit(MessageLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.emit(MessageLevel::Info, message);
    }
}

/// Colored output; errors go to stderr, everything else to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutWriter;

impl StdoutWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl OutputWriter for StdoutWriter {
    fn emit(&self, level: MessageLevel, message: &str) {
        let marker = level.marker();
        match level {
            MessageLevel::Normal => println!("{message}"),
            MessageLevel::Error => eprintln!("{} {message}", marker.red().bold()),
            MessageLevel::Success => println!("{} {message}", marker.green()),
            MessageLevel::Warning => println!("{} {message}", marker.yellow()),
            MessageLevel::Info => println!("{}", message.dimmed()),
        }
    }
}

/// Writer that keeps every message in memory
///
/// Clones share the same buffer.
///
/// # Examples
///
/// ```
/// use gifbox::ui::output::{BufferWriter, MessageLevel, OutputWriter};
///
/// let writer = BufferWriter::new();
/// writer.success("Loaded 25 results");
///
/// assert_eq!(
///     writer.messages(),
///     vec![(MessageLevel::Success, "Loaded 25 results".to_string())]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct BufferWriter {
    messages: Arc<Mutex<Vec<(MessageLevel, String)>>>,
}

impl BufferWriter {
    /// Create an empty buffer writer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages written so far, oldest first
    #[must_use]
    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages of one level, oldest first
    #[must_use]
    pub fn lines(&self, level: MessageLevel) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, text)| text)
            .collect()
    }
}

impl OutputWriter for BufferWriter {
    fn emit(&self, level: MessageLevel, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message.to_string()));
    }
}
