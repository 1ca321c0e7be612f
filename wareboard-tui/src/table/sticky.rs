//! Pinned-column layout.
//!
//! Columns can be pinned to the left or right edge so they stay visible
//! while the body scrolls horizontally. Offsets are cumulative widths in
//! source order; the first pinned column on each side carries a divider so
//! the boundary between frozen and scrolling cells reads clearly.

use super::Column;
use super::PinSide;

/// Width of the selection checkbox column in terminal cells.
pub const CHECKBOX_COLUMN_WIDTH: u16 = 4;

/// Placement of one pinned column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinnedOffset {
    /// Distance in cells from the pinned edge.
    pub offset: u16,
    /// Draw a divider on the inner edge of this column.
    pub divider: bool,
}

/// Resolved pinned-column placements for one column set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StickyLayout {
    /// Left-pinned columns as `(column index, placement)`, in source order.
    pub left: Vec<(usize, PinnedOffset)>,
    /// Right-pinned columns as `(column index, placement)`, in source order.
    pub right: Vec<(usize, PinnedOffset)>,
    /// Width reserved at the left edge for the checkbox column, zero when
    /// selection mode is off.
    pub checkbox_width: u16,
}

impl StickyLayout {
    /// Returns `true` when no column is pinned.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    /// Placement for a column index, if pinned.
    pub fn placement(&self, index: usize) -> Option<(PinSide, PinnedOffset)> {
        if let Some(&(_, p)) = self.left.iter().find(|(i, _)| *i == index) {
            return Some((PinSide::Left, p));
        }
        if let Some(&(_, p)) = self.right.iter().find(|(i, _)| *i == index) {
            return Some((PinSide::Right, p));
        }
        None
    }

    /// Total width of the left frozen region, checkbox included.
    pub fn left_width(&self, columns: &[Column]) -> u16 {
        let cols: u16 = self
            .left
            .iter()
            .filter_map(|&(i, _)| columns.get(i))
            .map(|c| c.width)
            .sum();
        self.checkbox_width + cols
    }

    /// Total width of the right frozen region.
    pub fn right_width(&self, columns: &[Column]) -> u16 {
        self.right
            .iter()
            .filter_map(|&(i, _)| columns.get(i))
            .map(|c| c.width)
            .sum()
    }
}

/// Computes pinned placements for a column set.
///
/// Left offsets accumulate from the left edge and start after the checkbox
/// column when selection mode shows it; right offsets accumulate from the
/// right edge. Unpinned columns do not appear. The first left-pinned and
/// first right-pinned column (in source order) get the divider flag.
pub fn compute_sticky_layout(columns: &[Column], checkbox_visible: bool) -> StickyLayout {
    let checkbox_width = if checkbox_visible {
        CHECKBOX_COLUMN_WIDTH
    } else {
        0
    };

    let mut left = Vec::new();
    let mut offset = checkbox_width;
    for (index, column) in columns.iter().enumerate() {
        if column.pin == Some(PinSide::Left) {
            left.push((index, PinnedOffset { offset, divider: false }));
            offset += column.width;
        }
    }

    let mut right = Vec::new();
    let mut offset = 0;
    for (index, column) in columns.iter().enumerate().rev() {
        if column.pin == Some(PinSide::Right) {
            right.push((index, PinnedOffset { offset, divider: false }));
            offset += column.width;
        }
    }
    right.reverse();

    if let Some((_, p)) = left.first_mut() {
        p.divider = true;
    }
    if let Some((_, p)) = right.first_mut() {
        p.divider = true;
    }

    StickyLayout {
        left,
        right,
        checkbox_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("a", "A", 10).pinned(PinSide::Left),
            Column::new("b", "B", 20),
            Column::new("c", "C", 8).pinned(PinSide::Left),
            Column::new("d", "D", 15),
            Column::new("e", "E", 12).pinned(PinSide::Right),
        ]
    }

    #[test]
    fn test_no_pins_yields_empty_layout() {
        let cols = vec![Column::new("a", "A", 10), Column::new("b", "B", 10)];
        let layout = compute_sticky_layout(&cols, false);
        assert!(layout.is_empty());
        assert_eq!(layout.checkbox_width, 0);
    }

    #[test]
    fn test_first_left_offset_is_zero_without_checkbox() {
        let layout = compute_sticky_layout(&columns(), false);
        assert_eq!(layout.left[0], (0, PinnedOffset { offset: 0, divider: true }));
    }

    #[test]
    fn test_checkbox_shifts_left_offsets() {
        let layout = compute_sticky_layout(&columns(), true);
        assert_eq!(layout.checkbox_width, CHECKBOX_COLUMN_WIDTH);
        assert_eq!(layout.left[0].1.offset, CHECKBOX_COLUMN_WIDTH);
        // Second pinned-left column starts after the first's width.
        assert_eq!(layout.left[1].1.offset, CHECKBOX_COLUMN_WIDTH + 10);
    }

    #[test]
    fn test_offsets_skip_unpinned_columns() {
        let layout = compute_sticky_layout(&columns(), false);
        // Column "c" is the second pinned-left column even though "b" sits
        // between them in source order.
        assert_eq!(layout.left[1], (2, PinnedOffset { offset: 10, divider: false }));
        assert_eq!(layout.left.len(), 2);
    }

    #[test]
    fn test_right_offsets_accumulate_from_right_edge() {
        let cols = vec![
            Column::new("a", "A", 10),
            Column::new("b", "B", 6).pinned(PinSide::Right),
            Column::new("c", "C", 12).pinned(PinSide::Right),
        ];
        let layout = compute_sticky_layout(&cols, false);
        assert_eq!(layout.right[0], (1, PinnedOffset { offset: 12, divider: true }));
        assert_eq!(layout.right[1], (2, PinnedOffset { offset: 0, divider: false }));
    }

    #[test]
    fn test_one_divider_per_side() {
        let layout = compute_sticky_layout(&columns(), false);
        assert_eq!(layout.left.iter().filter(|(_, p)| p.divider).count(), 1);
        assert_eq!(layout.right.iter().filter(|(_, p)| p.divider).count(), 1);
    }

    #[test]
    fn test_region_widths() {
        let cols = columns();
        let layout = compute_sticky_layout(&cols, true);
        assert_eq!(layout.left_width(&cols), CHECKBOX_COLUMN_WIDTH + 10 + 8);
        assert_eq!(layout.right_width(&cols), 12);
    }
}
