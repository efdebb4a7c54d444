//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and reports through an [`OutputWriter`](crate::ui::OutputWriter).

pub mod config;
pub mod search;

pub use config::execute as config;
pub use search::execute as search;
