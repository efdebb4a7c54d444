//! Masonry placement
//!
//! Items are placed one at a time into whichever column is currently the
//! shortest (leftmost on ties), so columns of uneven item heights stay
//! roughly balanced while insertion order is preserved top to bottom.

use super::LayoutConfig;

/// Position of one item inside the results container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Column index
    pub column: u32,
    /// Left edge in pixels
    pub x: u32,
    /// Top edge in pixels
    pub y: u32,
    /// Item width in pixels
    pub width: u32,
    /// Item height in pixels
    pub height: u32,
}

impl Placement {
    /// Bottom edge in pixels
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }
}

/// The result of placing a sequence of items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasonryPlan {
    /// One placement per item, in input order
    pub placements: Vec<Placement>,
    /// Height of the tallest column, including trailing gutter
    pub content_height: u32,
}

impl MasonryPlan {
    /// Place items of the given heights using `layout`
    #[must_use]
    pub fn place<I>(layout: &LayoutConfig, heights: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let columns = layout.columns.max(1) as usize;
        let mut column_heights = vec![0u32; columns];
        let stride = layout.item_width.saturating_add(layout.gutter);

        let placements = heights
            .into_iter()
            .map(|height| {
                let (column, top) = column_heights
                    .iter()
                    .copied()
                    .enumerate()
                    .min_by_key(|&(index, top)| (top, index))
                    .unwrap_or((0, 0));

                column_heights[column] = top.saturating_add(height).saturating_add(layout.gutter);

                #[allow(clippy::cast_possible_truncation)]
                let column = column as u32;
                Placement {
                    column,
                    x: column.saturating_mul(stride),
                    y: top,
                    width: layout.item_width,
                    height,
                }
            })
            .collect();

        Self {
            placements,
            content_height: column_heights.into_iter().max().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_shortest_column_first() {
        let layout = LayoutConfig::base(2, 100, 10);
        let plan = MasonryPlan::place(&layout, [200, 50, 50, 50]);

        let columns: Vec<u32> = plan.placements.iter().map(|p| p.column).collect();
        // 200 goes left, then the right column takes items until it catches up
        assert_eq!(columns, vec![0, 1, 1, 1]);
        assert_eq!(plan.placements[1].y, 0);
        assert_eq!(plan.placements[2].y, 60);
        assert_eq!(plan.placements[3].y, 120);
        assert_eq!(plan.placements[3].x, 110);
        assert_eq!(plan.content_height, 210);
    }

    #[test]
    fn test_ties_go_to_leftmost_column() {
        let layout = LayoutConfig::base(3, 50, 0);
        let plan = MasonryPlan::place(&layout, [10, 10, 10, 10]);
        let columns: Vec<u32> = plan.placements.iter().map(|p| p.column).collect();
        assert_eq!(columns, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_huge_items_saturate() {
        let layout = LayoutConfig::base(1, 100, 10);
        let plan = MasonryPlan::place(&layout, [u32::MAX - 5, 50]);

        assert_eq!(plan.placements[1].y, u32::MAX);
        assert_eq!(plan.placements[1].bottom(), u32::MAX);
        assert_eq!(plan.content_height, u32::MAX);
    }

    #[test]
    fn test_empty_plan() {
        let plan = MasonryPlan::place(&LayoutConfig::default(), std::iter::empty());
        assert!(plan.placements.is_empty());
        assert_eq!(plan.content_height, 0);
    }
}
