//! Paginated fetching
//!
//! [`FetchEngine`] is the state machine, [`FetchWorker`] executes the
//! requests it issues on a background thread.

mod engine;
mod worker;

pub use engine::{
    Completion, DiscardReason, FetchEngine, FetchState, FetchStatus, PageRequest, PageResponse,
};
pub use worker::FetchWorker;
