//! Widget orchestrator
//!
//! [`Widget`] wires the debouncer, the layout resolver, the fetch engine
//! and the scroll coordinator together behind the events a frontend can
//! produce: typed input, submit, scroll, resize, selection and clock ticks.
//! Page requests run on a [`FetchWorker`] thread; their results are applied
//! on the owning thread whenever [`Widget::tick`] or [`Widget::settle`] is
//! called.
//!
//! # Examples
//!
//! ```no_run
//! use gifbox::api::GiphyClient;
//! use gifbox::config::WidgetOptions;
//! use gifbox::widget::Widget;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let options = WidgetOptions::default().with_api_key("KEY");
//! let client = Arc::new(GiphyClient::new(options.api_key.clone())?);
//! let mut widget = Widget::new(options, client, 800)?
//!     .with_on_select(|item| println!("picked {}", item.id));
//!
//! widget.mount();
//! widget.settle(Duration::from_secs(10));
//! println!("{} trending results", widget.view().items.len());
//! # Ok::<(), gifbox::GifboxError>(())
//! ```

mod state;

pub use state::{RenderFlags, RenderState};

use crate::GifboxError;
use crate::api::{FetchError, PageSource, ResultItem};
use crate::config::WidgetOptions;
use crate::debounce::QueryDebouncer;
use crate::fetch::{
    Completion, DiscardReason, FetchEngine, FetchState, FetchStatus, FetchWorker, PageRequest,
    PageResponse,
};
use crate::layout::{LayoutConfig, LayoutResolver, MasonryPlan};
use crate::scroll::{ScrollCoordinator, ScrollMetrics};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Called with each query that starts a new search
pub type SearchCallback = Box<dyn FnMut(&str)>;

/// Called with the item the user picked
pub type SelectCallback = Box<dyn FnMut(&ResultItem)>;

/// Headless image-search widget
pub struct Widget {
    options: WidgetOptions,
    debouncer: QueryDebouncer,
    layout: LayoutResolver,
    engine: FetchEngine,
    scroll: ScrollCoordinator,
    source: Arc<dyn PageSource>,
    worker: FetchWorker,
    input: String,
    first_run: bool,
    mounted: bool,
    on_search: Option<SearchCallback>,
    on_select: Option<SelectCallback>,
}

impl Widget {
    /// Build a widget for a viewport `viewport_width` pixels wide
    ///
    /// The widget is inert until [`Widget::mount`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`GifboxError::Config`] if the layout rules are invalid and
    /// [`GifboxError::InvalidInput`] for a zero page size.
    pub fn new(
        options: WidgetOptions,
        source: Arc<dyn PageSource>,
        viewport_width: u32,
    ) -> Result<Self, GifboxError> {
        options.validate()?;
        let layout = LayoutResolver::new(options.masonry_config.clone(), viewport_width)?;
        let engine = FetchEngine::new(options.library, options.rating.clone(), options.gif_per_page);
        let worker = FetchWorker::spawn(Arc::clone(&source), engine.generation_handle());

        Ok(Self {
            debouncer: QueryDebouncer::new(options.debounce()),
            scroll: ScrollCoordinator::new(options.scroll_threshold),
            options,
            layout,
            engine,
            source,
            worker,
            input: String::new(),
            first_run: true,
            mounted: false,
            on_search: None,
            on_select: None,
        })
    }

    /// Builder method to set the search callback
    #[must_use]
    pub fn with_on_search(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_search = Some(Box::new(callback));
        self
    }

    /// Builder method to set the selection callback
    #[must_use]
    pub fn with_on_select(mut self, callback: impl FnMut(&ResultItem) + 'static) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    /// Start the widget: loads trending results for the empty query
    ///
    /// A widget can be mounted again after [`Widget::unmount`]; it gets a
    /// fresh fetch worker.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        if !self.worker.is_running() {
            self.worker =
                FetchWorker::spawn(Arc::clone(&self.source), self.engine.generation_handle());
        }
        self.mounted = true;
        tracing::debug!("widget mounted");
        self.start_search(String::new());
    }

    /// Tear the widget down
    ///
    /// Pending debounce emissions are dropped and responses still in
    /// flight will be ignored. Safe to call more than once.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.debouncer.cancel();
        self.engine.invalidate();
        self.worker.shutdown();
        tracing::debug!("widget unmounted");
    }

    /// Whether the widget is mounted
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// The search box changed
    pub fn input(&mut self, value: impl Into<String>, now: Instant) {
        self.input = value.into();
        if self.mounted {
            self.debouncer.push(self.input.clone(), now);
        }
    }

    /// The search form was submitted
    ///
    /// Searches for the pending input right away. When that starts no new
    /// search, a failed request is retried instead.
    pub fn submit(&mut self) {
        if !self.mounted {
            return;
        }
        let started = self
            .debouncer
            .flush()
            .is_some_and(|query| self.on_query(query));
        if !started {
            self.retry();
        }
    }

    /// Advance timers and apply finished requests
    ///
    /// Returns `true` if anything visible may have changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.mounted {
            return false;
        }
        let mut changed = false;
        if let Some(query) = self.debouncer.poll(now) {
            changed |= self.on_query(query);
        }
        while let Some(response) = self.worker.try_recv() {
            changed |= !matches!(self.apply(response), Completion::Discarded(_));
        }
        changed
    }

    /// Block until the in-flight request is applied or `timeout` passes
    ///
    /// Superseded responses that arrive meanwhile are discarded and the
    /// wait continues. Returns the completion that ended the wait.
    pub fn settle(&mut self, timeout: Duration) -> Option<Completion> {
        let deadline = Instant::now() + timeout;
        while self.mounted && self.engine.state().status == FetchStatus::Loading {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                tracing::debug!("settle timed out");
                return None;
            }
            let response = self.worker.recv_timeout(remaining)?;
            let completion = self.apply(response);
            if !matches!(completion, Completion::Discarded(_)) {
                return Some(completion);
            }
        }
        None
    }

    /// The results container scrolled or resized
    ///
    /// Returns `true` if a page request was issued.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
        if !self.mounted {
            return false;
        }
        let ready = self.engine.can_load_more();
        if self.scroll.observe(metrics, ready) {
            return self.reach_scroll_end();
        }
        false
    }

    /// Request the next page if the engine is ready for one
    ///
    /// Safe to call speculatively; returns `true` if a request was issued.
    pub fn reach_scroll_end(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        match self.engine.load_next_page() {
            Some(request) => {
                self.dispatch(request);
                true
            }
            None => false,
        }
    }

    /// Retry after a failed request
    ///
    /// Resumes from the offset that failed. Returns `false` when the last
    /// request did not fail.
    pub fn retry(&mut self) -> bool {
        if self.engine.state().status != FetchStatus::Error {
            return false;
        }
        tracing::debug!(offset = self.engine.state().next_offset, "retrying");
        self.reach_scroll_end()
    }

    /// The viewport width changed
    ///
    /// Returns `true` if a different layout rule applies now.
    pub fn on_resize(&mut self, viewport_width: u32) -> bool {
        self.layout.on_resize(viewport_width)
    }

    /// The user picked the item at `index`
    ///
    /// Calls `on_select` exactly once and returns the item, or `None` if
    /// the index is out of range.
    pub fn select(&mut self, index: usize) -> Option<&ResultItem> {
        let item = self.engine.state().items.get(index)?;
        tracing::debug!(id = %item.id, "item selected");
        if let Some(callback) = self.on_select.as_mut() {
            callback(item);
        }
        Some(item)
    }

    /// Snapshot for rendering
    #[must_use]
    pub fn view(&self) -> RenderState<'_> {
        let state = self.engine.state();
        let flags = RenderFlags::derive(state, self.first_run);
        let alert = if flags.show_error_alert {
            Some(self.options.message_error.as_str())
        } else if flags.show_no_matches_alert {
            Some(self.options.message_no_matches.as_str())
        } else {
            None
        };

        RenderState {
            items: &state.items,
            layout: *self.layout.active(),
            component_width: self.layout.component_width(),
            show_spinner: flags.show_spinner,
            show_no_matches_alert: flags.show_no_matches_alert,
            show_error_alert: flags.show_error_alert,
            is_last_page: state.is_last_page,
            total_count: state.total_count,
            query: &state.current_query,
            input: &self.input,
            alert,
            loading_message: &self.options.message_loading,
            placeholder: &self.options.search_placeholder,
        }
    }

    /// Masonry placement of the loaded items under the active layout
    ///
    /// Items without the configured rendition are laid out square.
    #[must_use]
    pub fn masonry(&self) -> MasonryPlan {
        let layout = self.layout.active();
        let heights = self.engine.state().items.iter().map(|item| {
            item.rendition(
                &self.options.image_rendition_name,
                self.options.image_rendition_file_type,
            )
            .and_then(|rendition| rendition.scaled_height(layout.item_width))
            .unwrap_or(layout.item_width)
        });
        MasonryPlan::place(layout, heights)
    }

    /// Query the displayed items belong to
    #[must_use]
    pub fn query(&self) -> &str {
        &self.engine.state().current_query
    }

    /// Current contents of the search box
    #[must_use]
    pub fn input_value(&self) -> &str {
        &self.input
    }

    /// Fetch state
    #[must_use]
    pub const fn state(&self) -> &FetchState {
        self.engine.state()
    }

    /// Active layout rule
    #[must_use]
    pub const fn layout(&self) -> &LayoutConfig {
        self.layout.active()
    }

    /// Options the widget was built with
    #[must_use]
    pub const fn options(&self) -> &WidgetOptions {
        &self.options
    }

    /// When the pending debounce emission is due
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }

    fn on_query(&mut self, query: String) -> bool {
        // Same value as the running search: nothing changed downstream
        if query == self.engine.state().current_query {
            tracing::trace!(query = %query, "query unchanged");
            return false;
        }
        self.start_search(query);
        true
    }

    fn start_search(&mut self, query: String) {
        let request = self.engine.reset(query);
        self.scroll.reset();
        self.dispatch(request);

        if let Some(callback) = self.on_search.as_mut() {
            callback(&self.engine.state().current_query);
        }
    }

    fn dispatch(&mut self, request: PageRequest) {
        if self.worker.submit(request.clone()) {
            return;
        }
        tracing::warn!("fetch worker unavailable");
        let failure = Err(FetchError::Transport(
            "fetch worker is not running".to_string(),
        ));
        self.apply(PageResponse::for_request(&request, failure));
    }

    fn apply(&mut self, response: PageResponse) -> Completion {
        let completion = self.engine.complete(response);
        match completion {
            Completion::Discarded(DiscardReason::Superseded) => {}
            Completion::Discarded(reason) => {
                tracing::debug!(?reason, "response ignored");
            }
            Completion::Applied { .. } | Completion::Failed => self.first_run = false,
        }
        completion
    }
}

impl Drop for Widget {
    fn drop(&mut self) {
        self.unmount();
    }
}
