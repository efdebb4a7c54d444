//! Testing utilities for gifbox
//!
//! Fixture builders for result items and a scriptable [`PageSource`] that
//! records every request it receives.
//!
//! Only available when compiled with `cfg(test)`.

use crate::api::{FetchError, Page, PageQuery, PageSource, Rendition, ResultItem};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

/// Build `count` items with ids `"{prefix}-{i}"`
///
/// Every item carries a 200x100 `fixed_width_downsampled` rendition.
pub fn items(prefix: &str, count: usize) -> Vec<ResultItem> {
    (0..count)
        .map(|i| {
            let id = format!("{prefix}-{i}");
            let rendition = Rendition {
                url: Some(format!("https://media.test/{id}.gif")),
                webp: Some(format!("https://media.test/{id}.webp")),
                width: 200,
                height: 100,
            };
            ResultItem {
                title: format!("item {id}"),
                url: format!("https://giphy.test/{id}"),
                images: BTreeMap::from([("fixed_width_downsampled".to_string(), rendition)]),
                id,
            }
        })
        .collect()
}

/// Scripted page source
///
/// Pages are registered per `(query, offset)`. Unregistered requests
/// return an empty page.
#[derive(Default)]
pub struct StubSource {
    pages: HashMap<(String, u32), usize>,
    failures: Mutex<HashMap<(String, u32), FetchError>>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<PageQuery>>,
}

impl StubSource {
    /// Create a source with nothing scripted
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `(query, offset)` with `count` items prefixed `"{query}-{offset}"`
    #[must_use]
    pub fn page(mut self, query: &str, offset: u32, count: usize) -> Self {
        self.pages.insert((query.to_string(), offset), count);
        self
    }

    /// Fail the first request for `(query, offset)` with `error`
    #[must_use]
    pub fn fail_once(self, query: &str, offset: u32, error: FetchError) -> Self {
        if let Ok(mut failures) = self.failures.lock() {
            failures.insert((query.to_string(), offset), error);
        }
        self
    }

    /// Sleep before answering any request for `query`
    #[must_use]
    pub fn delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    /// Requests received so far, in order
    pub fn calls(&self) -> Vec<PageQuery> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl PageSource for StubSource {
    fn fetch_page(&self, query: &PageQuery) -> Result<Page, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(query.clone());
        }
        if let Some(delay) = self.delays.get(&query.query) {
            thread::sleep(*delay);
        }

        let key = (query.query.clone(), query.offset);
        if let Some(error) = self.failures.lock().ok().and_then(|mut f| f.remove(&key)) {
            return Err(error);
        }

        let count = self.pages.get(&key).copied().unwrap_or(0);
        let prefix = format!("{}-{}", query.query, query.offset);
        Ok(Page::new(items(&prefix, count)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Library, RenditionFileType};

    fn query(text: &str, offset: u32) -> PageQuery {
        PageQuery {
            library: Library::Gifs,
            query: text.to_string(),
            offset,
            limit: 20,
            rating: "g".to_string(),
        }
    }

    #[test]
    fn test_items_have_rendition() {
        let items = items("cats", 3);
        assert_eq!(items.len(), 3);
        assert_eq!(items[2].id, "cats-2");
        assert!(
            items[0]
                .rendition("fixed_width_downsampled", RenditionFileType::Gif)
                .is_some()
        );
    }

    #[test]
    fn test_stub_scripted_and_unscripted() {
        let source = StubSource::new().page("cats", 0, 20);
        assert_eq!(source.fetch_page(&query("cats", 0)).unwrap().items.len(), 20);
        assert!(source.fetch_page(&query("cats", 20)).unwrap().items.is_empty());
        assert_eq!(source.calls().len(), 2);
    }

    #[test]
    fn test_stub_fails_once() {
        let source = StubSource::new()
            .page("cats", 0, 5)
            .fail_once("cats", 0, FetchError::Status(503));

        assert_eq!(
            source.fetch_page(&query("cats", 0)),
            Err(FetchError::Status(503))
        );
        assert_eq!(source.fetch_page(&query("cats", 0)).unwrap().items.len(), 5);
    }
}
