//! Background fetch worker
//!
//! Page requests are executed on a dedicated thread so the thread that owns
//! the widget never blocks on the network. Requests go in over one channel
//! and responses come back over another; the owner drains responses from
//! its event loop and applies them to the engine, so all state mutation
//! stays on one thread.
//!
//! The worker shares the engine's generation counter. A request whose
//! generation is already stale when the worker picks it up is dropped
//! without touching the network.

use super::engine::{PageRequest, PageResponse};
use crate::api::PageSource;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

/// Messages accepted by the worker thread
#[derive(Debug)]
enum FetchCommand {
    Fetch(PageRequest),
    Shutdown,
}

/// Handle to the background fetch thread
#[derive(Debug)]
pub struct FetchWorker {
    commands: Sender<FetchCommand>,
    responses: Receiver<PageResponse>,
    running: bool,
}

impl FetchWorker {
    /// Launch the worker thread
    #[must_use]
    pub fn spawn(source: Arc<dyn PageSource>, latest_generation: Arc<AtomicU64>) -> Self {
        let (command_tx, command_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();

        let spawned = thread::Builder::new()
            .name("gifbox-fetch".to_string())
            .spawn(move || {
                worker_loop(source.as_ref(), &command_rx, &response_tx, &latest_generation);
            });
        if let Err(err) = &spawned {
            tracing::error!("failed to spawn fetch worker: {err}");
        }

        Self {
            commands: command_tx,
            responses: response_rx,
            running: spawned.is_ok(),
        }
    }

    /// Queue a request for execution
    ///
    /// Returns `false` if the worker is gone.
    pub fn submit(&self, request: PageRequest) -> bool {
        if !self.running {
            return false;
        }
        self.commands.send(FetchCommand::Fetch(request)).is_ok()
    }

    /// Take a finished response without waiting
    pub fn try_recv(&self) -> Option<PageResponse> {
        self.responses.try_recv().ok()
    }

    /// Wait up to `timeout` for a finished response
    pub fn recv_timeout(&self, timeout: Duration) -> Option<PageResponse> {
        match self.responses.recv_timeout(timeout) {
            Ok(response) => Some(response),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Ask the worker thread to stop after its current request
    ///
    /// The thread is not joined: a request already on the wire is allowed
    /// to finish and its response is simply never read.
    pub fn shutdown(&mut self) {
        if self.running {
            let _ = self.commands.send(FetchCommand::Shutdown);
            self.running = false;
        }
    }

    /// Whether the worker accepts requests
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }
}

impl Drop for FetchWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(
    source: &dyn PageSource,
    commands: &Receiver<FetchCommand>,
    responses: &Sender<PageResponse>,
    latest_generation: &AtomicU64,
) {
    while let Ok(command) = commands.recv() {
        match command {
            FetchCommand::Fetch(request) => {
                if latest_generation.load(Ordering::Acquire) != request.generation.0 {
                    tracing::trace!(
                        generation = request.generation.0,
                        "skipping superseded request"
                    );
                    continue;
                }

                let result = source.fetch_page(&request.query);
                if responses
                    .send(PageResponse::for_request(&request, result))
                    .is_err()
                {
                    break;
                }
            }
            FetchCommand::Shutdown => break,
        }
    }
    tracing::debug!("fetch worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Library;
    use crate::fetch::FetchEngine;
    use crate::testing::StubSource;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_round_trip() {
        let source = Arc::new(StubSource::new().page("cats", 0, 20));
        let mut engine = FetchEngine::new(Library::Gifs, "g", 20);
        let worker = FetchWorker::spawn(source, engine.generation_handle());

        assert!(worker.submit(engine.reset("cats")));
        let response = worker.recv_timeout(WAIT).unwrap();
        assert_eq!(response.offset, 0);
        assert_eq!(response.result.as_ref().unwrap().items.len(), 20);
    }

    #[test]
    fn test_superseded_request_is_skipped() {
        let source = Arc::new(StubSource::new().page("dogs", 0, 20).page("cats", 0, 20));
        let mut engine = FetchEngine::new(Library::Gifs, "g", 20);
        let stale = engine.reset("dogs");
        let fresh = engine.reset("cats");

        let worker = FetchWorker::spawn(source.clone(), engine.generation_handle());
        worker.submit(stale);
        worker.submit(fresh);

        let response = worker.recv_timeout(WAIT).unwrap();
        assert_eq!(response.result.unwrap().items[0].id, "cats-0-0");
        assert_eq!(source.calls().len(), 1);
    }

    #[test]
    fn test_submit_after_shutdown_is_rejected() {
        let source = Arc::new(StubSource::new());
        let mut engine = FetchEngine::new(Library::Gifs, "g", 20);
        let mut worker = FetchWorker::spawn(source, engine.generation_handle());

        worker.shutdown();
        assert!(!worker.is_running());
        assert!(!worker.submit(engine.reset("cats")));
    }

    #[test]
    fn test_try_recv_without_response() {
        let source = Arc::new(StubSource::new());
        let engine = FetchEngine::new(Library::Gifs, "g", 20);
        let worker = FetchWorker::spawn(source, engine.generation_handle());
        assert!(worker.try_recv().is_none());
    }
}
