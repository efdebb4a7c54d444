//! Scroll-driven pagination
//!
//! Turns raw scroll and resize signals from the results container into
//! "load the next page" decisions. A request is raised when the distance
//! left to scroll drops below a threshold, and only when the fetch engine
//! reports it is ready for another page.
//!
//! The trigger is edge based. Once it fires it stays disarmed until the
//! content grows (a page arrived) or the user scrolls back out of the
//! threshold zone, so a burst of scroll events near the end produces a
//! single request. After a failed page it stays disarmed as well, which
//! keeps a broken connection from turning every scroll tick into a retry.

/// Default distance from the end, in pixels, that triggers loading
pub const DEFAULT_THRESHOLD: u32 = 250;

/// Geometry of the scroll container at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top
    pub offset: u32,
    /// Height of the visible area
    pub viewport_height: u32,
    /// Height of all rendered content
    pub content_height: u32,
}

impl ScrollMetrics {
    /// Create metrics from raw values
    #[must_use]
    pub const fn new(offset: u32, viewport_height: u32, content_height: u32) -> Self {
        Self {
            offset,
            viewport_height,
            content_height,
        }
    }

    /// Unscrolled distance below the visible area
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.content_height
            .saturating_sub(self.offset.saturating_add(self.viewport_height))
    }
}

/// Decides when scrolling should load another page
#[derive(Debug, Clone)]
pub struct ScrollCoordinator {
    threshold: u32,
    armed: bool,
    last_content_height: u32,
}

impl ScrollCoordinator {
    /// Create a coordinator with the given threshold in pixels
    #[must_use]
    pub const fn new(threshold: u32) -> Self {
        Self {
            threshold,
            armed: true,
            last_content_height: 0,
        }
    }

    /// Configured threshold
    #[must_use]
    pub const fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Feed one scroll or resize observation
    ///
    /// `ready` is the engine's readiness (`status != loading` and not on the
    /// last page). Returns `true` when the caller should request the next
    /// page now.
    pub fn observe(&mut self, metrics: ScrollMetrics, ready: bool) -> bool {
        if metrics.content_height > self.last_content_height {
            self.armed = true;
        }
        self.last_content_height = metrics.content_height;

        if metrics.remaining() >= self.threshold {
            self.armed = true;
            return false;
        }

        if self.armed && ready {
            self.armed = false;
            tracing::trace!(remaining = metrics.remaining(), "scroll reached threshold");
            return true;
        }
        false
    }

    /// Forget previous observations, e.g. after the query changed
    pub const fn reset(&mut self) {
        self.armed = true;
        self.last_content_height = 0;
    }
}

impl Default for ScrollCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
