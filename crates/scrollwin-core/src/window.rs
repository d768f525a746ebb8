#![forbid(unsafe_code)]

//! The scroll window: state, range queries, materialization, and navigation.
//!
//! # Usage
//!
//! The host drives the window with notifications and reads the result once
//! per render:
//!
//! 1. [`ScrollWindow::set_item_count`] whenever the list length changes.
//! 2. [`ScrollWindow::set_viewport_height`] on resize.
//! 3. [`ScrollWindow::report_scroll`] on every native scroll event.
//! 4. [`ScrollWindow::materialize_visible`] to get the rows to mount, each
//!    with its absolute `top` inside a spacer of [`ScrollWindow::total_height`].
//!
//! Navigation ([`ScrollWindow::scroll_to_index`], [`ScrollWindow::scroll_to_end`],
//! paging) updates the stored offset and pushes it to the injected
//! [`ScrollHost`] so the native container follows.

use std::iter::FusedIterator;

use crate::config::WindowConfig;
use crate::error::{Result, WindowError};
use crate::host::{Detached, ScrollHost};
use crate::range::{ScrollState, VisibleRange, compute_visible_range, count_to_i64};

/// Row placement used by [`ScrollWindow::scroll_to_index_aligned`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Align {
    /// Row's top edge at the top of the viewport.
    #[default]
    Start,
    /// Row centred in the viewport.
    Center,
    /// Row's bottom edge at the bottom of the viewport.
    End,
}

/// Virtual scroll window over a list of fixed-height rows.
#[derive(Debug, Clone)]
pub struct ScrollWindow<H = Detached> {
    state: ScrollState,
    buffer_size: usize,
    follow_tail: bool,
    host: H,
}

impl ScrollWindow<Detached> {
    /// Create a window with no host attached.
    pub fn new(config: WindowConfig) -> Result<Self> {
        Self::with_host(config, Detached)
    }
}

impl<H: ScrollHost> ScrollWindow<H> {
    /// Create a window that pushes navigation offsets to `host`.
    ///
    /// Fails with [`WindowError::DegenerateConfiguration`] if the row height
    /// is not positive.
    pub fn with_host(config: WindowConfig, host: H) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            state: ScrollState {
                scroll_offset: 0,
                row_height: config.row_height,
                viewport_height: config.viewport_height,
                item_count: 0,
            },
            buffer_size: config.buffer_size,
            follow_tail: config.follow_tail,
            host,
        })
    }

    // -- Notifications --

    /// Record the native container's scroll offset.
    ///
    /// Stored as-is, even when negative or past the end; range computation
    /// clamps indices on its own.
    pub fn report_scroll(&mut self, offset: i64) {
        self.state.scroll_offset = offset;
    }

    /// Record a viewport resize.
    pub fn set_viewport_height(&mut self, height: i64) {
        self.state.viewport_height = height;
    }

    /// Record the list's new length.
    ///
    /// With follow-tail on, growth while the bottom is showing snaps the
    /// window to the new end.
    pub fn set_item_count(&mut self, count: usize) {
        let previous = self.state.item_count;
        let was_at_bottom = self.is_at_bottom();
        self.state.item_count = count;

        if self.follow_tail && was_at_bottom && count > previous {
            #[cfg(feature = "tracing")]
            tracing::debug!(previous, count, "follow tail: snapping to end");
            self.scroll_to_end();
        }
    }

    pub fn set_follow_tail(&mut self, follow_tail: bool) {
        self.follow_tail = follow_tail;
    }

    // -- Queries --

    /// Recompute the visible range from the current state.
    #[must_use]
    pub fn compute_visible_range(&self) -> VisibleRange {
        let range = compute_visible_range(&self.state, self.buffer_size);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            scroll_offset = self.state.scroll_offset,
            start = range.start_index,
            end = range.end_index,
            "visible range"
        );
        range
    }

    /// Slice `rows` down to the visible range, annotating each row with its
    /// absolute index and pixel top.
    ///
    /// `rows` must hold exactly [`item_count`](Self::item_count) rows.
    pub fn materialize_visible<'a, T>(&self, rows: &'a [T]) -> Result<MaterializedRows<'a, T>> {
        if rows.len() != self.state.item_count {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                expected = self.state.item_count,
                actual = rows.len(),
                "row slice length disagrees with item count"
            );
            return Err(WindowError::ContractViolation {
                expected: self.state.item_count,
                actual: rows.len(),
            });
        }

        let range = self.compute_visible_range();
        Ok(MaterializedRows {
            rows: rows[range.as_range()].iter(),
            next_index: range.start_index,
            row_height: self.state.row_height,
        })
    }

    #[must_use]
    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    #[must_use]
    pub fn scroll_offset(&self) -> i64 {
        self.state.scroll_offset
    }

    #[must_use]
    pub fn row_height(&self) -> i64 {
        self.state.row_height
    }

    #[must_use]
    pub fn viewport_height(&self) -> i64 {
        self.state.viewport_height
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.state.item_count
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    #[must_use]
    pub fn follow_tail(&self) -> bool {
        self.follow_tail
    }

    /// Height of the spacer that stands in for the whole list.
    #[must_use]
    pub fn total_height(&self) -> i64 {
        self.state.total_height()
    }

    #[must_use]
    pub fn max_scroll_offset(&self) -> i64 {
        self.state.max_scroll_offset()
    }

    /// Whether the last row's bottom edge is inside the viewport.
    #[must_use]
    pub fn is_at_bottom(&self) -> bool {
        self.state.scroll_offset >= self.state.max_scroll_offset()
    }

    /// Pixel top of row `index`.
    #[must_use]
    pub fn row_top(&self, index: usize) -> i64 {
        count_to_i64(index).saturating_mul(self.state.row_height)
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    // -- Navigation --

    /// Scroll so row `index` sits at the top of the viewport.
    ///
    /// `index` is clamped to `0..item_count`; returns the clamped index, or
    /// `None` without touching anything when the list is empty.
    pub fn scroll_to_index(&mut self, index: i64) -> Option<usize> {
        self.scroll_to_index_aligned(index, Align::Start)
    }

    /// Scroll row `index` into view with the given alignment.
    ///
    /// Centre and end alignment never produce a negative offset.
    pub fn scroll_to_index_aligned(&mut self, index: i64, align: Align) -> Option<usize> {
        let clamped = self.clamp_index(index)?;
        let top = self.row_top(clamped);
        let row_height = self.state.row_height;
        let viewport = self.state.effective_viewport_height();

        let offset = match align {
            Align::Start => top,
            Align::Center => top
                .saturating_add(row_height / 2)
                .saturating_sub(viewport / 2)
                .max(0),
            Align::End => top.saturating_add(row_height).saturating_sub(viewport).max(0),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(index, clamped, ?align, offset, "scroll to index");
        self.issue(offset);
        Some(clamped)
    }

    /// Snap to the newest row, bottom-anchored.
    ///
    /// Same end state as `scroll_to_index(item_count - 1)` followed by moving
    /// the container to `total_height - viewport_height`; only the final
    /// offset reaches the host. An empty list resets to offset 0.
    pub fn scroll_to_end(&mut self) {
        let offset = self.state.max_scroll_offset();
        #[cfg(feature = "tracing")]
        tracing::debug!(offset, item_count = self.state.item_count, "scroll to end");
        self.issue(offset);
    }

    /// Scroll by whole rows; positive moves toward the end.
    pub fn scroll_by_rows(&mut self, delta: i64) {
        let target = self
            .state
            .scroll_offset
            .saturating_add(delta.saturating_mul(self.state.row_height));
        self.issue(target.clamp(0, self.state.max_scroll_offset()));
    }

    pub fn page_up(&mut self) {
        self.scroll_by_rows(-self.rows_per_page());
    }

    pub fn page_down(&mut self) {
        self.scroll_by_rows(self.rows_per_page());
    }

    /// Whole rows that fit in the viewport, at least one.
    #[must_use]
    pub fn rows_per_page(&self) -> i64 {
        (self.state.effective_viewport_height() / self.state.row_height).max(1)
    }

    fn clamp_index(&self, index: i64) -> Option<usize> {
        let last = self.state.item_count.checked_sub(1)?;
        let clamped = index.clamp(0, count_to_i64(last));
        usize::try_from(clamped).ok()
    }

    fn issue(&mut self, offset: i64) {
        self.state.scroll_offset = offset;
        self.host.set_scroll_offset(offset);
    }
}

/// A row selected for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterializedRow<'a, T> {
    /// The host's record.
    pub row: &'a T,
    /// Absolute index in the full list.
    pub index: usize,
    /// Pixel top inside the spacer (`index * row_height`).
    pub top: i64,
}

/// Single-pass iterator over the rows of a [`VisibleRange`], in list order.
#[derive(Debug)]
pub struct MaterializedRows<'a, T> {
    rows: std::slice::Iter<'a, T>,
    next_index: usize,
    row_height: i64,
}

impl<'a, T> Iterator for MaterializedRows<'a, T> {
    type Item = MaterializedRow<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        let index = self.next_index;
        self.next_index += 1;
        Some(MaterializedRow {
            row,
            index,
            top: count_to_i64(index).saturating_mul(self.row_height),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl<T> ExactSizeIterator for MaterializedRows<'_, T> {}

impl<T> FusedIterator for MaterializedRows<'_, T> {}
