//! Scroll state and the visible-range computation.
//!
//! The range is a pure function of [`ScrollState`] plus the buffer size:
//!
//! ```text
//! raw_start   = floor(scroll_offset / row_height)
//! raw_end     = raw_start + ceil(viewport_height / row_height) + 1
//! start_index = max(0, raw_start - buffer)        (then clamped to item_count)
//! end_index   = min(item_count, raw_end + buffer) (then clamped to >= start_index)
//! start_offset = raw_start * row_height
//! ```
//!
//! Buffering is applied before clamping, so near either end of the list the
//! buffer is simply cut off rather than shifted to the other side.

use std::ops::Range;

/// Mutable scroll state of one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    /// Pixels from the top of the scrollable region, stored as reported.
    pub scroll_offset: i64,
    /// Height of each row in pixels. Always positive once validated.
    pub row_height: i64,
    /// Viewport height in pixels as last reported.
    pub viewport_height: i64,
    /// Number of rows in the host's list.
    pub item_count: usize,
}

impl ScrollState {
    /// Viewport height used for range math; `<= 0` means one row.
    #[must_use]
    pub fn effective_viewport_height(&self) -> i64 {
        if self.viewport_height <= 0 {
            self.row_height.max(1)
        } else {
            self.viewport_height
        }
    }

    /// Height of the full-list spacer.
    #[must_use]
    pub fn total_height(&self) -> i64 {
        count_to_i64(self.item_count).saturating_mul(self.row_height)
    }

    /// Largest offset that still shows a full viewport (0 for short lists).
    #[must_use]
    pub fn max_scroll_offset(&self) -> i64 {
        self.total_height()
            .saturating_sub(self.effective_viewport_height())
            .max(0)
    }
}

/// Half-open row range to render, plus the unbuffered window it was built
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    /// First row to render (inclusive, buffered).
    pub start_index: usize,
    /// One past the last row to render (exclusive, buffered).
    pub end_index: usize,
    /// Pixel offset of `raw_start`, the unbuffered anchor for scrollbar math.
    pub start_offset: i64,
    /// Unbuffered first visible row, before clamping.
    pub raw_start: i64,
    /// Unbuffered end row, before clamping.
    pub raw_end: i64,
}

impl VisibleRange {
    /// Number of rows to render.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn as_range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.as_range().contains(&index)
    }

    /// Pixel top of row `index` inside the spacer, for rows of `row_height`.
    #[must_use]
    pub fn top_of(&self, index: usize, row_height: i64) -> i64 {
        count_to_i64(index).saturating_mul(row_height)
    }

    /// The unbuffered window clamped into `0..=item_count`.
    #[must_use]
    pub fn unbuffered(&self, item_count: usize) -> Range<usize> {
        let clamp = |v: i64| usize::try_from(v.max(0)).unwrap_or(usize::MAX).min(item_count);
        let start = clamp(self.raw_start);
        start..clamp(self.raw_end).max(start)
    }
}

/// Compute the buffered visible range for `state`.
#[must_use]
pub fn compute_visible_range(state: &ScrollState, buffer_size: usize) -> VisibleRange {
    let row_height = state.row_height.max(1);
    let rows_in_view = ceil_div(state.effective_viewport_height(), row_height);

    let raw_start = state.scroll_offset.div_euclid(row_height);
    let raw_end = raw_start.saturating_add(rows_in_view).saturating_add(1);

    let buffer = count_to_i64(buffer_size);
    let count = count_to_i64(state.item_count);
    let start = raw_start.saturating_sub(buffer).max(0).min(count);
    let end = raw_end.saturating_add(buffer).min(count).max(start);

    VisibleRange {
        // Both bounds lie in 0..=item_count here.
        start_index: start as usize,
        end_index: end as usize,
        start_offset: raw_start.saturating_mul(row_height),
        raw_start,
        raw_end,
    }
}

/// Ceiling division for a positive divisor and non-negative dividend.
fn ceil_div(value: i64, divisor: i64) -> i64 {
    value / divisor + i64::from(value % divisor != 0)
}

pub(crate) fn count_to_i64(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
