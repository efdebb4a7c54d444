//! Query debouncing
//!
//! Keystrokes arrive far faster than a search backend should be queried.
//! `QueryDebouncer` holds the most recent input value and only releases it
//! once no newer value has arrived for a full quiet period.
//!
//! The debouncer does not own a timer. The caller feeds it values with
//! [`QueryDebouncer::push`] and polls it with [`QueryDebouncer::poll`] from
//! its event loop, passing the current [`Instant`] each time. This keeps the
//! filter deterministic under test and lets the event loop size its poll
//! timeout from [`QueryDebouncer::next_deadline`].
//!
//! # Guarantees
//!
//! - The last value of a burst is emitted exactly once, as soon as the loop
//!   polls at or after its deadline.
//! - Intermediate values of a burst are never emitted.
//! - After [`QueryDebouncer::cancel`] nothing pending is ever emitted.

use std::time::{Duration, Instant};

/// Quiet period used by the widget unless configured otherwise
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// A value waiting for its quiet period to elapse
#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    value: String,
    deadline: Instant,
}

/// Temporal filter that suppresses intermediate query values
#[derive(Debug, Clone)]
pub struct QueryDebouncer {
    quiet_period: Duration,
    pending: Option<Pending>,
}

impl QueryDebouncer {
    /// Create a debouncer with the given quiet period
    #[must_use]
    pub const fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    /// The configured quiet period
    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Record a new input value, restarting the quiet window
    pub fn push(&mut self, value: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            value: value.into(),
            deadline: now + self.quiet_period,
        });
    }

    /// Emit the pending value if its quiet period has elapsed
    ///
    /// Returns `None` while the window is still open or when nothing is
    /// pending. A value is handed out at most once.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending.take().map(|pending| pending.value)
            }
            _ => None,
        }
    }

    /// Emit the pending value immediately, skipping the rest of the window
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|pending| pending.value)
    }

    /// Drop the pending value without emitting it
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a value is waiting to be emitted
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due, if any
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }
}

impl Default for QueryDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_burst_emits_only_last_value_once() {
        let start = Instant::now();
        let mut debouncer = QueryDebouncer::default();

        debouncer.push("c", start);
        debouncer.push("ca", start + ms(100));
        debouncer.push("cat", start + ms(250));
        debouncer.push("cats", start + ms(400));

        // 500ms after the first keystroke, but the window restarted
        assert_eq!(debouncer.poll(start + ms(500)), None);
        assert_eq!(debouncer.poll(start + ms(899)), None);
        assert_eq!(debouncer.poll(start + ms(900)), Some("cats".to_string()));
        assert_eq!(debouncer.poll(start + ms(2000)), None);
    }

    #[test]
    fn test_value_due_exactly_at_deadline() {
        let start = Instant::now();
        let mut debouncer = QueryDebouncer::new(ms(200));
        debouncer.push("dogs", start);

        assert_eq!(debouncer.next_deadline(), Some(start + ms(200)));
        assert_eq!(debouncer.poll(start + ms(200)), Some("dogs".to_string()));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_separate_bursts_each_emit() {
        let start = Instant::now();
        let mut debouncer = QueryDebouncer::new(ms(100));

        debouncer.push("a", start);
        assert_eq!(debouncer.poll(start + ms(150)), Some("a".to_string()));

        debouncer.push("ab", start + ms(300));
        assert_eq!(debouncer.poll(start + ms(350)), None);
        assert_eq!(debouncer.poll(start + ms(400)), Some("ab".to_string()));
    }

    #[test]
    fn test_cancel_suppresses_pending_value() {
        let start = Instant::now();
        let mut debouncer = QueryDebouncer::default();
        debouncer.push("never", start);
        debouncer.cancel();

        assert_eq!(debouncer.poll(start + ms(10_000)), None);
        assert_eq!(debouncer.next_deadline(), None);
    }

    #[test]
    fn test_flush_emits_immediately_and_clears() {
        let start = Instant::now();
        let mut debouncer = QueryDebouncer::default();
        debouncer.push("now", start);

        assert_eq!(debouncer.flush(), Some("now".to_string()));
        assert_eq!(debouncer.poll(start + ms(1000)), None);
        assert_eq!(debouncer.flush(), None);
    }

    #[test]
    fn test_empty_string_is_a_real_value() {
        let start = Instant::now();
        let mut debouncer = QueryDebouncer::new(ms(50));
        debouncer.push("", start);
        assert_eq!(debouncer.poll(start + ms(50)), Some(String::new()));
    }
}
