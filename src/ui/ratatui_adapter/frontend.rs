//! Terminal frontend
//!
//! Implements the [`Frontend`] trait with ratatui for drawing and crossterm
//! for input. Terminal cells are mapped to layout pixels with a fixed cell
//! size so the widget's breakpoints and masonry plan apply unchanged.

use super::events::{EventResult, GridShape, poll_and_handle};
use super::state::AppState;
use super::theme::Theme;
use super::widgets::{CellSize, HelpBar, ResultGrid, SearchBar, StatusBar};
use crate::config::TerminalOptions;
use crate::layout::MasonryPlan;
use crate::ui::error::{Result, UiError};
use crate::ui::output::MessageLevel;
use crate::ui::traits::Frontend;
use crate::ui::types::FrontendOutcome;
use crate::widget::{RenderState, Widget};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

/// Upper bound for one poll, so spinner and messages keep updating
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Search bar, a five row grid, status line and help bar
const MIN_ROWS: u16 = 12;
const MIN_COLS: u16 = 20;

/// Ratatui-based frontend
pub struct RatatuiFrontend {
    theme: Theme,
    cell: CellSize,
}

impl RatatuiFrontend {
    /// Create a new ratatui frontend
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            cell: CellSize::default(),
        }
    }

    /// Set custom theme
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Take the cell size and palette from the terminal settings
    #[must_use]
    pub fn with_terminal_options(mut self, options: &TerminalOptions) -> Self {
        self.cell = CellSize::new(options.cell_width_px, options.cell_height_px);
        if options.light {
            self.theme = Theme::light();
        }
        self
    }

    /// Width in pixels of the results grid for a terminal `cols` wide
    #[must_use]
    pub fn viewport_width(&self, cols: u16) -> u32 {
        // The grid is framed by a one-cell border on each side
        u32::from(cols.saturating_sub(2)) * self.cell.width_px
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    /// Cleanup terminal after TUI
    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        Ok(())
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame, state: &mut AppState, widget: &Widget, plan: &MasonryPlan) {
        let view = widget.view();
        let options = widget.options();

        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Min(5),    // Results grid
                Constraint::Length(3), // Status bar
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let search_bar = SearchBar::new(&state.query, state.query_cursor, view.placeholder, &self.theme)
            .loading(view.show_spinner);
        frame.render_widget(search_bar, main_layout[0]);

        let grid_area = main_layout[1];
        state.grid_height_px = u32::from(grid_area.height.saturating_sub(2)) * self.cell.height_px;
        let grid = ResultGrid::new(view.items, plan, &self.theme)
            .cursor(state.cursor)
            .scroll(state.scroll_px)
            .cell_size(self.cell)
            .rendition(&options.image_rendition_name, options.image_rendition_file_type)
            .title(grid_title(&view));
        frame.render_widget(grid, grid_area);

        let messages = state.active_messages();
        let summary = summary(&view);
        let status_bar = StatusBar::new(&messages, &self.theme)
            .with_status(status_line(&view))
            .with_summary(&summary);
        frame.render_widget(status_bar, main_layout[2]);

        let help_bar = HelpBar::new(&self.theme);
        frame.render_widget(help_bar, main_layout[3]);
    }

    /// Run the frontend event loop
    fn run_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        widget: &mut Widget,
    ) -> Result<FrontendOutcome> {
        let mut state = AppState::new();
        let (cols, _) = crossterm::terminal::size()?;
        widget.on_resize(self.viewport_width(cols));
        widget.mount();

        let mut shown_query = widget.query().to_string();
        let mut shown_cursor = state.cursor;

        loop {
            widget.tick(Instant::now());
            state.cleanup_messages();

            // New result set: back to the top
            if widget.query() != shown_query {
                shown_query = widget.query().to_string();
                state.reset_view();
            }

            let plan = widget.masonry();
            let item_count = widget.state().items.len();
            state.clamp_cursor(item_count);
            if state.cursor != shown_cursor {
                shown_cursor = state.cursor;
                if let Some(placement) = plan.placements.get(state.cursor) {
                    state.ensure_visible(placement);
                }
            }

            terminal.draw(|frame| self.render(frame, &mut state, widget, &plan))?;

            if widget.on_scroll(state.scroll_metrics(plan.content_height)) {
                tracing::trace!(scroll_px = state.scroll_px, "scroll reached the end");
            }

            let grid = GridShape {
                columns: widget.layout().columns as usize,
                item_count,
                content_height: plan.content_height,
                query_pending: widget.next_deadline().is_some(),
            };
            let timeout = widget.next_deadline().map_or(POLL_INTERVAL, |deadline| {
                deadline
                    .saturating_duration_since(Instant::now())
                    .min(POLL_INTERVAL)
            });

            match poll_and_handle(&mut state, grid, timeout)? {
                EventResult::InputChanged => widget.input(state.query.as_str(), Instant::now()),
                EventResult::Submit => widget.submit(),
                EventResult::Retry => {
                    if widget.retry() {
                        state.add_message(MessageLevel::Info, "Retrying…");
                    } else {
                        state.add_message(MessageLevel::Warning, "Nothing to retry");
                    }
                }
                EventResult::Select => {
                    if let Some(item) = widget.select(state.cursor) {
                        return Ok(FrontendOutcome::Selected(item.clone()));
                    }
                }
                EventResult::Resized(cols, _) => {
                    if widget.on_resize(self.viewport_width(cols)) {
                        let columns = widget.layout().columns;
                        state.add_message(MessageLevel::Info, format!("{columns} columns"));
                    }
                }
                EventResult::Abort => return Ok(FrontendOutcome::Aborted),
                EventResult::Continue | EventResult::Ignored => {}
            }
        }
    }
}

impl Default for RatatuiFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontend for RatatuiFrontend {
    fn run(&self, widget: &mut Widget) -> Result<FrontendOutcome> {
        let (cols, rows) = crossterm::terminal::size()?;
        check_size(cols, rows)?;
        let mut terminal = Self::setup_terminal()?;

        let result = self.run_loop(&mut terminal, widget);
        widget.unmount();

        // Cleanup terminal (always, even on error)
        if let Err(e) = Self::cleanup_terminal() {
            tracing::warn!(error = %e, "terminal cleanup failed");
        }

        result
    }
}

fn check_size(cols: u16, rows: u16) -> Result<()> {
    if cols < MIN_COLS || rows < MIN_ROWS {
        return Err(UiError::TooSmall {
            cols,
            rows,
            min_cols: MIN_COLS,
            min_rows: MIN_ROWS,
        });
    }
    Ok(())
}

fn grid_title(view: &RenderState<'_>) -> String {
    if view.query.is_empty() {
        " Trending ".to_string()
    } else {
        format!(" Results for \"{}\" ", view.query)
    }
}

/// Widget status for the status bar: alerts first, then the spinner
fn status_line<'a>(view: &RenderState<'a>) -> Option<(MessageLevel, &'a str)> {
    if let Some(alert) = view.alert {
        let level = if view.show_error_alert {
            MessageLevel::Error
        } else {
            MessageLevel::Warning
        };
        return Some((level, alert));
    }
    view.show_spinner
        .then_some((MessageLevel::Info, view.loading_message))
}

fn summary(view: &RenderState<'_>) -> String {
    let shown = view.items.len();
    match view.total_count {
        Some(total) if view.is_last_page => format!("{shown} of {total} · end"),
        Some(total) => format!("{shown} of {total}"),
        None => format!("{shown} results"),
    }
}
