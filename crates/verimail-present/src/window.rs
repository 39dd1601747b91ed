//! Fixed-row-height virtual scrolling.

use std::ops::Range;

/// The half-open range of rows to materialize for a viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VirtualWindow {
    pub start: usize,
    pub end: usize,
}

impl VirtualWindow {
    /// Rows intersecting `[scroll_offset, scroll_offset + viewport_height)`,
    /// widened by `overscan` rows on each side and clamped to `row_count`.
    ///
    /// Offsets and heights share one unit (pixels, terminal lines).
    pub fn compute(
        scroll_offset: usize,
        viewport_height: usize,
        row_height: usize,
        row_count: usize,
        overscan: usize,
    ) -> Self {
        if row_height == 0 || viewport_height == 0 || row_count == 0 {
            return Self::default();
        }
        let first = (scroll_offset / row_height).min(row_count);
        let last = (scroll_offset + viewport_height)
            .div_ceil(row_height)
            .min(row_count);
        Self {
            start: first.saturating_sub(overscan),
            end: (last + overscan).min(row_count),
        }
    }

    /// Largest offset that still fills the viewport.
    pub fn max_scroll_offset(viewport_height: usize, row_height: usize, row_count: usize) -> usize {
        (row_count * row_height).saturating_sub(viewport_height)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Borrows the rows inside the window.
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let end = self.end.min(rows.len());
        let start = self.start.min(end);
        &rows[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_of_list() {
        let window = VirtualWindow::compute(0, 500, 50, 1000, 0);
        assert_eq!(window.range(), 0..10);
    }

    #[test]
    fn test_partial_rows_are_included() {
        // Offset 75 shows the bottom half of row 1 through the top half of row 11.
        let window = VirtualWindow::compute(75, 500, 50, 1000, 0);
        assert_eq!(window.range(), 1..12);
    }

    #[test]
    fn test_overscan_is_clamped() {
        assert_eq!(VirtualWindow::compute(0, 100, 50, 1000, 3).range(), 0..5);
        assert_eq!(VirtualWindow::compute(49_900, 100, 50, 1000, 3).range(), 995..1000);
    }

    #[test]
    fn test_short_list() {
        let window = VirtualWindow::compute(0, 500, 50, 3, 2);
        assert_eq!(window.range(), 0..3);
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(VirtualWindow::compute(0, 500, 0, 10, 1).is_empty());
        assert!(VirtualWindow::compute(0, 0, 50, 10, 1).is_empty());
        assert!(VirtualWindow::compute(0, 500, 50, 0, 1).is_empty());
        assert!(VirtualWindow::compute(10_000, 500, 50, 10, 0).is_empty());
    }

    #[test]
    fn test_max_scroll_offset_and_slice() {
        assert_eq!(VirtualWindow::max_scroll_offset(500, 50, 100), 4500);
        assert_eq!(VirtualWindow::max_scroll_offset(500, 50, 3), 0);

        let rows = [10, 11, 12, 13];
        let window = VirtualWindow { start: 2, end: 9 };
        assert_eq!(window.slice(&rows), [12, 13]);
    }
}
