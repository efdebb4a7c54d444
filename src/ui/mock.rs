//! Scripted frontend for testing

use super::error::Result;
use super::traits::Frontend;
use super::types::FrontendOutcome;
use crate::widget::Widget;
use std::time::{Duration, Instant};

/// One scripted user action
#[derive(Debug, Clone)]
pub enum MockAction {
    /// Replace the input value
    Type(String),
    /// Let the debounce quiet period pass
    Wait,
    /// Press the submit key
    Submit,
    /// Wait for the in-flight request to finish
    Settle,
    /// Scroll to the bottom of the grid
    ScrollEnd,
    /// Press the retry key
    Retry,
    /// Pick the item at this index
    Select(usize),
}

/// Frontend that replays a fixed list of actions
///
/// Useful for testing without requiring user interaction. A script that
/// runs out without picking an item ends as aborted.
#[derive(Debug, Clone, Default)]
pub struct MockFrontend {
    pub actions: Vec<MockAction>,
}

impl MockFrontend {
    /// Create a new mock frontend with the given script
    #[must_use]
    pub const fn new(actions: Vec<MockAction>) -> Self {
        Self { actions }
    }

    /// Create a mock frontend that simulates user abort
    #[must_use]
    pub const fn aborted() -> Self {
        Self::new(Vec::new())
    }
}

impl Frontend for MockFrontend {
    fn run(&self, widget: &mut Widget) -> Result<FrontendOutcome> {
        let settle = Duration::from_secs(5);
        let quiet = widget.options().debounce();
        let mut now = Instant::now();

        widget.mount();
        for action in &self.actions {
            match action {
                MockAction::Type(value) => widget.input(value.as_str(), now),
                MockAction::Wait => {
                    now += quiet;
                    widget.tick(now);
                }
                MockAction::Submit => widget.submit(),
                MockAction::Settle => {
                    widget.settle(settle);
                }
                MockAction::ScrollEnd => {
                    widget.reach_scroll_end();
                }
                MockAction::Retry => {
                    widget.retry();
                }
                MockAction::Select(index) => {
                    if let Some(item) = widget.select(*index) {
                        return Ok(FrontendOutcome::Selected(item.clone()));
                    }
                }
            }
        }
        widget.unmount();
        Ok(FrontendOutcome::Aborted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WidgetOptions;
    use crate::testing::StubSource;
    use std::sync::Arc;

    fn widget(source: StubSource) -> Widget {
        Widget::new(WidgetOptions::default(), Arc::new(source), 800).unwrap()
    }

    #[test]
    fn test_mock_frontend_picks_trending() {
        let mut widget = widget(StubSource::new().page("", 0, 20));
        let frontend = MockFrontend::new(vec![MockAction::Settle, MockAction::Select(3)]);

        let outcome = frontend.run(&mut widget).unwrap();
        assert_eq!(outcome.selected().map(|item| item.id.as_str()), Some("-0-3"));
    }

    #[test]
    fn test_mock_frontend_searches_after_quiet_period() {
        let source = StubSource::new().page("", 0, 20).page("dogs", 0, 5);
        let mut widget = widget(source);
        let frontend = MockFrontend::new(vec![
            MockAction::Settle,
            MockAction::Type("dogs".to_string()),
            MockAction::Wait,
            MockAction::Settle,
            MockAction::Select(0),
        ]);

        let outcome = frontend.run(&mut widget).unwrap();
        assert_eq!(outcome.selected().unwrap().id, "dogs-0-0");
        assert_eq!(widget.query(), "dogs");
    }

    #[test]
    fn test_mock_frontend_aborted() {
        let mut widget = widget(StubSource::new().page("", 0, 20));
        let outcome = MockFrontend::aborted().run(&mut widget).unwrap();

        assert!(outcome.is_aborted());
        assert!(!widget.is_mounted());
    }

    #[test]
    fn test_select_out_of_range_keeps_going() {
        let mut widget = widget(StubSource::new().page("", 0, 2));
        let frontend = MockFrontend::new(vec![MockAction::Settle, MockAction::Select(9)]);

        assert!(frontend.run(&mut widget).unwrap().is_aborted());
    }
}
