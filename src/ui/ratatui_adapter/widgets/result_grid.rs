//! Masonry grid of result tiles
//!
//! Tiles are positioned in pixels by [`MasonryPlan`] and projected onto
//! terminal cells with a fixed cell size. Tiles scrolled partly out of view
//! are clipped to the grid area.

use crate::api::{RenditionFileType, ResultItem};
use crate::layout::{MasonryPlan, Placement};
use crate::ui::output::MessageLevel;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Pixel size of one terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width_px: u32,
    pub height_px: u32,
}

impl CellSize {
    /// Create a cell size, treating zero as one pixel
    #[must_use]
    pub const fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px: if width_px == 0 { 1 } else { width_px },
            height_px: if height_px == 0 { 1 } else { height_px },
        }
    }

    /// Project a placement onto the cells of `area`, scrolled by `scroll_px`
    ///
    /// Returns `None` when no part of the tile is visible.
    #[must_use]
    pub fn project(&self, placement: &Placement, area: Rect, scroll_px: u32) -> Option<Rect> {
        let top = i64::from(placement.y) - i64::from(scroll_px);
        let bottom = i64::from(placement.bottom()) - i64::from(scroll_px);
        let cell_w = i64::from(self.width_px);
        let cell_h = i64::from(self.height_px);

        let x = i64::from(area.x) + i64::from(placement.x) / cell_w;
        let width = (i64::from(placement.width) / cell_w).max(1);
        let y = i64::from(area.y) + top.div_euclid(cell_h);
        let height = (bottom.div_euclid(cell_h) - top.div_euclid(cell_h)).max(1);

        let tile = Rect::new(
            clamp_u16(x),
            clamp_u16(y.max(0)),
            clamp_u16(width),
            clamp_u16(height - (i64::from(area.y) - y).max(0)),
        );
        let visible = tile.intersection(area);
        (!visible.is_empty() && y + height > i64::from(area.y)).then_some(visible)
    }
}

impl Default for CellSize {
    fn default() -> Self {
        Self::new(8, 16)
    }
}

fn clamp_u16(value: i64) -> u16 {
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}

/// Grid of result tiles with one highlighted
pub struct ResultGrid<'a> {
    items: &'a [ResultItem],
    plan: &'a MasonryPlan,
    cursor: usize,
    scroll_px: u32,
    cell: CellSize,
    rendition_name: &'a str,
    file_type: RenditionFileType,
    title: String,
    theme: &'a Theme,
}

impl<'a> ResultGrid<'a> {
    /// Create a grid for `items` laid out by `plan`
    #[must_use]
    pub fn new(items: &'a [ResultItem], plan: &'a MasonryPlan, theme: &'a Theme) -> Self {
        Self {
            items,
            plan,
            cursor: 0,
            scroll_px: 0,
            cell: CellSize::default(),
            rendition_name: "fixed_width_downsampled",
            file_type: RenditionFileType::Gif,
            title: format!(" Results ({}) ", items.len()),
            theme,
        }
    }

    /// Set the highlighted item
    #[must_use]
    pub const fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    /// Set the scroll position in pixels
    #[must_use]
    pub const fn scroll(mut self, scroll_px: u32) -> Self {
        self.scroll_px = scroll_px;
        self
    }

    /// Set the cell size
    #[must_use]
    pub const fn cell_size(mut self, cell: CellSize) -> Self {
        self.cell = cell;
        self
    }

    /// Set the rendition shown on each tile
    #[must_use]
    pub const fn rendition(mut self, name: &'a str, file_type: RenditionFileType) -> Self {
        self.rendition_name = name;
        self.file_type = file_type;
        self
    }

    /// Set custom title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn render_tile(&self, item: &ResultItem, highlighted: bool, area: Rect, buf: &mut Buffer) {
        let (border, text) = self.theme.tile(highlighted);

        if area.height < 3 {
            Paragraph::new(Line::styled(item.label(), text)).render(area, buf);
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(item.label(), text));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::styled(item.id.as_str(), self.theme.muted_style())];
        match item.rendition(self.rendition_name, self.file_type) {
            Some(rendition) => {
                lines.push(Line::raw(format!("{}×{}", rendition.width, rendition.height)));
                lines.push(Line::styled(rendition.url, self.theme.media_url_style()));
            }
            None => {
                let style = self.theme.level_style(MessageLevel::Warning);
                lines.push(Line::styled("no preview", style));
            }
        }
        Paragraph::new(lines).render(inner, buf);
    }
}

impl Widget for ResultGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.frame_style())
            .title(self.title.as_str());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        for (index, (item, placement)) in self.items.iter().zip(&self.plan.placements).enumerate() {
            if let Some(tile) = self.cell.project(placement, inner, self.scroll_px) {
                self.render_tile(item, index == self.cursor, tile, buf);
            }
        }
    }
}
