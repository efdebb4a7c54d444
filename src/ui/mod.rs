//! UI abstraction layer
//!
//! A [`Frontend`] hosts a [`Widget`](crate::widget::Widget): it owns the
//! event loop, forwards user events to the widget and draws the widget's
//! render state. Commands report plain-text results through an
//! [`OutputWriter`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      Widget                             │
//! │  (debounce, layout, fetch, scroll)      │
//! └────────────────┬────────────────────────┘
//!                  │ driven by
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │      Frontend trait                     │
//! └────────────────┬────────────────────────┘
//!                  │ implemented by
//!         ┌────────┴────────┐
//!         ▼                 ▼
//! ┌───────────────┐  ┌───────────────────┐
//! │ MockFrontend  │  │ RatatuiFrontend   │
//! │ (tests)       │  │ (terminal)        │
//! └───────────────┘  └───────────────────┘
//! ```
//!
//! ## Implementing a Custom Frontend
//!
//! ```no_run
//! use gifbox::ui::{Frontend, FrontendOutcome, Result};
//! use gifbox::widget::Widget;
//! use std::time::Duration;
//!
//! struct FirstHit;
//!
//! impl Frontend for FirstHit {
//!     fn run(&self, widget: &mut Widget) -> Result<FrontendOutcome> {
//!         widget.mount();
//!         widget.settle(Duration::from_secs(10));
//!         Ok(match widget.select(0) {
//!             Some(item) => FrontendOutcome::Selected(item.clone()),
//!             None => FrontendOutcome::Aborted,
//!         })
//!     }
//! }
//! ```

mod error;
mod traits;
mod types;

pub mod output;
pub mod ratatui_adapter;

#[cfg(test)]
pub mod mock;

pub use error::{Result, UiError};
pub use output::{BufferWriter, MessageLevel, OutputWriter, StdoutWriter};
pub use ratatui_adapter::RatatuiFrontend;
pub use traits::Frontend;
pub use types::FrontendOutcome;
