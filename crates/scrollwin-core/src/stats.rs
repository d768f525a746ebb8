//! Per-frame window metrics for JSONL event logs.

use crate::host::ScrollHost;
use crate::window::ScrollWindow;

/// Snapshot of one render pass, suitable for structured logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowFrameStats {
    /// Frame sequence number assigned by the caller.
    pub frame: u64,
    /// Scroll offset the range was computed from.
    pub scroll_offset: i64,
    /// Rows in the list.
    pub item_count: usize,
    /// Viewport height as reported.
    pub viewport_height: i64,
    /// Buffered render range start.
    pub start_index: usize,
    /// Buffered render range end (exclusive).
    pub end_index: usize,
    /// Unbuffered anchor offset.
    pub start_offset: i64,
    /// Spacer height.
    pub total_height: i64,
    /// Whether the bottom of the list is showing.
    pub at_bottom: bool,
}

impl WindowFrameStats {
    /// Capture the window's current range and state.
    #[must_use]
    pub fn from_window<H: ScrollHost>(frame: u64, window: &ScrollWindow<H>) -> Self {
        let range = window.compute_visible_range();
        Self {
            frame,
            scroll_offset: window.scroll_offset(),
            item_count: window.item_count(),
            viewport_height: window.viewport_height(),
            start_index: range.start_index,
            end_index: range.end_index,
            start_offset: range.start_offset,
            total_height: window.total_height(),
            at_bottom: window.is_at_bottom(),
        }
    }

    /// Rows mounted this frame.
    #[must_use]
    pub fn rendered_rows(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }
}
