//! Paginated fetch state machine
//!
//! `FetchEngine` owns the accumulated results for exactly one query and the
//! lifecycle of the requests that produce them. It performs no I/O: `reset`
//! and `load_next_page` hand back a [`PageRequest`] for the caller to
//! execute, and the caller feeds the outcome back through
//! [`FetchEngine::complete`].
//!
//! # States
//!
//! ```text
//!            reset()                 page ok
//!   Idle ───────────────▶ Loading ─────────────▶ Loaded
//!                           ▲  │                   │
//!                           │  │ page failed       │ load_next_page()
//!                           │  ▼                   │ (unless last page)
//!                           └─ Error ◀─────────────┘
//!                 load_next_page() / reset()
//! ```
//!
//! `reset` is accepted from every state and always wins.
//!
//! # Stale responses
//!
//! Every `reset` advances a generation counter. Requests carry the
//! generation they were issued under, and `complete` compares it against
//! the current value before touching any state. A response from a
//! superseded generation is discarded whole, whatever order responses
//! arrive in. The counter is shared with the fetch worker so it can skip
//! requests that were superseded before they were sent.

use crate::api::{FetchError, Library, Page, PageQuery, ResultItem};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Request lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// No request has been issued yet
    #[default]
    Idle,
    /// A page request is in flight
    Loading,
    /// The last request succeeded
    Loaded,
    /// The last request failed
    Error,
}

/// Identifies the fetch lifecycle a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Generation(pub(crate) u64);

/// A page request issued by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub(crate) generation: Generation,
    /// What to fetch
    pub query: PageQuery,
}

/// The outcome of executing a [`PageRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    pub(crate) generation: Generation,
    /// Offset the request was issued for
    pub offset: u32,
    /// Page or failure
    pub result: Result<Page, FetchError>,
}

impl PageResponse {
    /// Pair a result with the request it answers
    #[must_use]
    pub fn for_request(request: &PageRequest, result: Result<Page, FetchError>) -> Self {
        Self {
            generation: request.generation,
            offset: request.query.offset,
            result,
        }
    }
}

/// Why a response was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// A newer `reset` happened after the request was issued
    Superseded,
    /// The engine was not waiting for a page
    NotLoading,
    /// The response does not continue the loaded results
    OffsetMismatch,
}

/// What [`FetchEngine::complete`] did with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Items were appended
    Applied {
        /// Number of items appended
        appended: usize,
        /// Whether this was the final page
        last_page: bool,
    },
    /// The request failed; items and offset are unchanged
    Failed,
    /// The response was ignored
    Discarded(DiscardReason),
}

/// Accumulated results for the current query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchState {
    /// Results in display order, append-only within a query
    pub items: Vec<ResultItem>,
    /// Lifecycle status
    pub status: FetchStatus,
    /// Whether the final page has been received
    pub is_last_page: bool,
    /// The query these items belong to
    pub current_query: String,
    /// Offset of the next page to request
    pub next_offset: u32,
    /// Total reported by the API for this query
    pub total_count: Option<u64>,
    /// Message of the most recent failure, cleared on success
    pub last_error: Option<String>,
}

/// Paginated fetch engine for a single widget
#[derive(Debug)]
pub struct FetchEngine {
    state: FetchState,
    generation: Arc<AtomicU64>,
    library: Library,
    rating: String,
    page_size: u32,
}

impl FetchEngine {
    /// Create an idle engine
    #[must_use]
    pub fn new(library: Library, rating: impl Into<String>, page_size: u32) -> Self {
        Self {
            state: FetchState::default(),
            generation: Arc::new(AtomicU64::new(0)),
            library,
            rating: rating.into(),
            page_size,
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &FetchState {
        &self.state
    }

    /// Configured page size
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Whether a further page may be requested right now
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        matches!(self.state.status, FetchStatus::Loaded | FetchStatus::Error)
            && !self.state.is_last_page
    }

    /// Start a new fetch lifecycle for `query`
    ///
    /// Clears the accumulated items before anything is requested, so no page
    /// from an earlier query can extend the new results.
    pub fn reset(&mut self, query: impl Into<String>) -> PageRequest {
        let generation = self.advance_generation();
        self.state = FetchState {
            current_query: query.into(),
            status: FetchStatus::Loading,
            ..FetchState::default()
        };

        tracing::debug!(
            generation = generation.0,
            query = %self.state.current_query,
            "fetch lifecycle reset"
        );
        self.request(generation)
    }

    /// Request the page at `next_offset`
    ///
    /// Returns `None`, changing nothing, while a request is in flight, after
    /// the last page, or before the first `reset`. Scroll handlers may call
    /// this speculatively.
    pub fn load_next_page(&mut self) -> Option<PageRequest> {
        if !self.can_load_more() {
            tracing::trace!(status = ?self.state.status, "next page not requested");
            return None;
        }

        self.state.status = FetchStatus::Loading;
        let generation = self.current_generation();
        tracing::debug!(
            generation = generation.0,
            offset = self.state.next_offset,
            "requesting next page"
        );
        Some(self.request(generation))
    }

    /// Apply the outcome of a request
    pub fn complete(&mut self, response: PageResponse) -> Completion {
        if response.generation != self.current_generation() {
            tracing::trace!(
                generation = response.generation.0,
                "discarding superseded response"
            );
            return Completion::Discarded(DiscardReason::Superseded);
        }
        if self.state.status != FetchStatus::Loading {
            return Completion::Discarded(DiscardReason::NotLoading);
        }
        if response.offset != self.state.next_offset {
            return Completion::Discarded(DiscardReason::OffsetMismatch);
        }

        match response.result {
            Ok(page) => {
                let appended = page.items.len();
                let last_page = appended < self.page_size as usize;

                self.state.items.extend(page.items);
                self.state.next_offset += self.page_size;
                self.state.is_last_page = last_page;
                self.state.status = FetchStatus::Loaded;
                self.state.last_error = None;
                if page.total_count.is_some() {
                    self.state.total_count = page.total_count;
                }

                tracing::debug!(
                    appended,
                    total = self.state.items.len(),
                    last_page,
                    "page applied"
                );
                Completion::Applied {
                    appended,
                    last_page,
                }
            }
            Err(err) => {
                tracing::warn!(offset = response.offset, "page request failed: {err}");
                self.state.status = FetchStatus::Error;
                self.state.last_error = Some(err.to_string());
                Completion::Failed
            }
        }
    }

    /// Make every outstanding request stale
    ///
    /// Used on teardown: responses still in flight will be discarded when
    /// they arrive.
    pub fn invalidate(&mut self) {
        self.advance_generation();
        if self.state.status == FetchStatus::Loading {
            self.state.status = FetchStatus::Idle;
        }
    }

    /// Handle shared with the fetch worker
    pub(crate) fn generation_handle(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.generation)
    }

    fn current_generation(&self) -> Generation {
        Generation(self.generation.load(Ordering::Acquire))
    }

    fn advance_generation(&self) -> Generation {
        Generation(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    fn request(&self, generation: Generation) -> PageRequest {
        PageRequest {
            generation,
            query: PageQuery {
                library: self.library,
                query: self.state.current_query.clone(),
                offset: self.state.next_offset,
                limit: self.page_size,
                rating: self.rating.clone(),
            },
        }
    }
}
