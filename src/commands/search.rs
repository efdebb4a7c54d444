//! Search command - run one query without the terminal UI

use crate::{
    GifboxError,
    api::ResultItem,
    fetch::FetchStatus,
    ui::OutputWriter,
    widget::Widget,
};
use std::time::{Duration, Instant};

type Result<T> = std::result::Result<T, GifboxError>;

/// How long to wait for one page
pub const PAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Execute the search command
///
/// An empty `query` lists trending results. Prints one line per item, or
/// a JSON array with `json`.
///
/// # Errors
///
/// Returns [`GifboxError::Search`] if a page fails or times out.
pub fn execute(
    widget: &mut Widget,
    query: &str,
    pages: u32,
    json: bool,
    output: &dyn OutputWriter,
) -> Result<()> {
    let items = collect(widget, query, pages, PAGE_TIMEOUT)?;

    if json {
        output.write(&serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        output.warning(&widget.options().message_no_matches);
        return Ok(());
    }

    let options = widget.options();
    for item in &items {
        let link = item
            .rendition(&options.image_rendition_name, options.image_rendition_file_type)
            .map_or(item.url.as_str(), |rendition| rendition.url);
        output.write(&format!("{}\t{}\t{}", item.id, item.label(), link));
    }

    let state = widget.state();
    match state.total_count {
        Some(total) => output.info(&format!("{} of {total} results", items.len())),
        None => output.info(&format!("{} results", items.len())),
    }
    Ok(())
}

/// Load up to `pages` pages for `query` and return the items
///
/// Stops early once the last page has arrived. The widget is unmounted
/// afterwards.
///
/// # Errors
///
/// Returns [`GifboxError::Search`] if a page fails or does not arrive
/// within `timeout`.
pub fn collect(
    widget: &mut Widget,
    query: &str,
    pages: u32,
    timeout: Duration,
) -> Result<Vec<ResultItem>> {
    widget.mount();
    if !query.is_empty() {
        // The trending request from mount is superseded here
        widget.input(query, Instant::now());
        widget.submit();
    }

    let result = load_pages(widget, pages, timeout);
    widget.unmount();
    result?;

    Ok(widget.state().items.clone())
}

fn load_pages(widget: &mut Widget, pages: u32, timeout: Duration) -> Result<()> {
    settle_page(widget, timeout)?;
    for _ in 1..pages {
        if !widget.reach_scroll_end() {
            break;
        }
        settle_page(widget, timeout)?;
    }
    Ok(())
}

fn settle_page(widget: &mut Widget, timeout: Duration) -> Result<()> {
    widget.settle(timeout);

    let state = widget.state();
    match state.status {
        FetchStatus::Loading => Err(GifboxError::Search(format!(
            "no response within {}s",
            timeout.as_secs()
        ))),
        FetchStatus::Error => Err(GifboxError::Search(
            state
                .last_error
                .clone()
                .unwrap_or_else(|| "request failed".to_string()),
        )),
        FetchStatus::Idle | FetchStatus::Loaded => {
            tracing::debug!(items = state.items.len(), "page settled");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchError;
    use crate::config::WidgetOptions;
    use crate::testing::StubSource;
    use crate::ui::{BufferWriter, MessageLevel};
    use std::sync::Arc;

    fn widget(source: StubSource) -> Widget {
        let options = WidgetOptions::default().with_page_size(5);
        Widget::new(options, Arc::new(source), 800).unwrap()
    }

    #[test]
    fn test_trending_for_empty_query() {
        let mut widget = widget(StubSource::new().page("", 0, 5));
        let items = collect(&mut widget, "", 1, PAGE_TIMEOUT).unwrap();

        assert_eq!(items.len(), 5);
        assert_eq!(items[0].id, "-0-0");
        assert!(!widget.is_mounted());
    }

    #[test]
    fn test_query_supersedes_trending() {
        let source = StubSource::new().page("", 0, 5).page("cats", 0, 5);
        let mut widget = widget(source);
        let items = collect(&mut widget, "cats", 1, PAGE_TIMEOUT).unwrap();

        assert!(items.iter().all(|item| item.id.starts_with("cats-")));
    }

    #[test]
    fn test_multiple_pages_stop_at_last_page() {
        let source = StubSource::new()
            .page("cats", 0, 5)
            .page("cats", 5, 5)
            .page("cats", 10, 2);
        let mut widget = widget(source);
        let items = collect(&mut widget, "cats", 10, PAGE_TIMEOUT).unwrap();

        assert_eq!(items.len(), 12);
        assert_eq!(items[5].id, "cats-5-0");
        assert_eq!(items[11].id, "cats-10-1");
    }

    #[test]
    fn test_failure_is_reported() {
        let source = StubSource::new().fail_once("cats", 0, FetchError::Status(429));
        let mut widget = widget(source);

        let err = collect(&mut widget, "cats", 1, PAGE_TIMEOUT).unwrap_err();
        assert!(matches!(err, GifboxError::Search(_)));
    }

    #[test]
    fn test_execute_prints_lines() {
        let mut widget = widget(StubSource::new().page("cats", 0, 2));
        let output = BufferWriter::new();

        execute(&mut widget, "cats", 1, false, &output).unwrap();

        let lines = output.lines(MessageLevel::Normal);
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "cats-0-0\titem cats-0-0\thttps://media.test/cats-0-0.gif"
        );
        assert_eq!(output.lines(MessageLevel::Info), vec!["2 results"]);
    }

    #[test]
    fn test_execute_json() {
        let mut widget = widget(StubSource::new().page("cats", 0, 2));
        let output = BufferWriter::new();

        execute(&mut widget, "cats", 1, true, &output).unwrap();

        let printed = output.lines(MessageLevel::Normal).join("\n");
        let items: Vec<ResultItem> = serde_json::from_str(&printed).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, "cats-0-1");
    }

    #[test]
    fn test_execute_no_matches() {
        let mut widget = widget(StubSource::new());
        let output = BufferWriter::new();

        execute(&mut widget, "zzzz", 1, false, &output).unwrap();

        assert_eq!(
            output.lines(MessageLevel::Warning),
            vec![WidgetOptions::default().message_no_matches]
        );
    }
}
