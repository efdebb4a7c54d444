//! Render-ready view of the widget

use crate::api::ResultItem;
use crate::fetch::{FetchState, FetchStatus};
use crate::layout::LayoutConfig;

/// Presentational flags derived from the fetch state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderFlags {
    /// A page request is in flight
    pub show_spinner: bool,
    /// The query finished with no results
    pub show_no_matches_alert: bool,
    /// The last request failed
    pub show_error_alert: bool,
}

impl RenderFlags {
    /// Derive the flags for `state`
    ///
    /// "No matches" stays hidden during the first lifecycle so an empty
    /// list is never flashed before the first page arrives.
    #[must_use]
    pub fn derive(state: &FetchState, first_run: bool) -> Self {
        let loading = state.status == FetchStatus::Loading;
        let error = state.status == FetchStatus::Error;
        Self {
            show_spinner: loading,
            show_no_matches_alert: state.items.is_empty() && !loading && !error && !first_run,
            show_error_alert: error,
        }
    }
}

/// Everything a frontend needs to draw the widget
#[derive(Debug, Clone, Copy)]
pub struct RenderState<'a> {
    /// Results in display order
    pub items: &'a [ResultItem],
    /// Active layout rule
    pub layout: LayoutConfig,
    /// Width of the results container
    pub component_width: u32,
    /// See [`RenderFlags::show_spinner`]
    pub show_spinner: bool,
    /// See [`RenderFlags::show_no_matches_alert`]
    pub show_no_matches_alert: bool,
    /// See [`RenderFlags::show_error_alert`]
    pub show_error_alert: bool,
    /// No further pages exist
    pub is_last_page: bool,
    /// Total reported by the API
    pub total_count: Option<u64>,
    /// Query the items belong to
    pub query: &'a str,
    /// Current contents of the search box
    pub input: &'a str,
    /// Message for the active alert, if any
    pub alert: Option<&'a str>,
    /// Message shown next to the spinner
    pub loading_message: &'a str,
    /// Placeholder for an empty search box
    pub placeholder: &'a str,
}

impl RenderState<'_> {
    /// Whether the list has anything to show
    #[must_use]
    pub const fn has_items(&self) -> bool {
        !self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::items;

    fn state(status: FetchStatus, count: usize) -> FetchState {
        FetchState {
            items: items("cats", count),
            status,
            ..FetchState::default()
        }
    }

    #[test]
    fn test_loading_shows_spinner_only() {
        let flags = RenderFlags::derive(&state(FetchStatus::Loading, 0), false);
        assert_eq!(
            flags,
            RenderFlags {
                show_spinner: true,
                show_no_matches_alert: false,
                show_error_alert: false,
            }
        );
    }

    #[test]
    fn test_empty_loaded_shows_no_matches() {
        let flags = RenderFlags::derive(&state(FetchStatus::Loaded, 0), false);
        assert!(flags.show_no_matches_alert);
        assert!(!flags.show_spinner);
    }

    #[test]
    fn test_first_run_suppresses_no_matches() {
        let flags = RenderFlags::derive(&state(FetchStatus::Idle, 0), true);
        assert!(!flags.show_no_matches_alert);
    }

    #[test]
    fn test_error_hides_no_matches() {
        let flags = RenderFlags::derive(&state(FetchStatus::Error, 0), false);
        assert!(flags.show_error_alert);
        assert!(!flags.show_no_matches_alert);
    }

    #[test]
    fn test_items_hide_no_matches() {
        let flags = RenderFlags::derive(&state(FetchStatus::Loaded, 3), false);
        assert_eq!(flags, RenderFlags::default());
    }
}
