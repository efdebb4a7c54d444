//! Core traits for UI abstraction layer

use super::error::Result;
use super::types::FrontendOutcome;
use crate::widget::Widget;

/// An interactive host for a [`Widget`]
///
/// A frontend owns the event loop: it mounts the widget, forwards input,
/// scroll, resize and selection events to it, and draws its render state
/// until the user picks an item or leaves.
pub trait Frontend {
    /// Run the frontend until the session ends
    ///
    /// # Errors
    ///
    /// Returns an error if the frontend cannot be initialized or if
    /// drawing fails.
    fn run(&self, widget: &mut Widget) -> Result<FrontendOutcome>;
}
