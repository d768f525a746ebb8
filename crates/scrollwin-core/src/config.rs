//! Window configuration.

use crate::error::{Result, WindowError};

/// Default pixel height of one row.
pub const DEFAULT_ROW_HEIGHT: i64 = 80;

/// Default number of buffer rows rendered on each side of the viewport.
pub const DEFAULT_BUFFER_SIZE: usize = 2;

/// Tuning knobs for a [`ScrollWindow`](crate::ScrollWindow).
///
/// All pixel quantities are signed so that hosts can forward raw values from
/// the rendering surface; [`WindowConfig::validate`] rejects the only value
/// the engine cannot work with, a non-positive row height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindowConfig {
    /// Height of every row in pixels. Constant for the window's lifetime.
    pub row_height: i64,

    /// Initial viewport height in pixels. A value `<= 0` is treated as one
    /// row's worth of viewport.
    pub viewport_height: i64,

    /// Extra rows rendered before and after the visible rows to avoid blank
    /// flashes during fast scrolling.
    pub buffer_size: usize,

    /// Snap to the newest row when the list grows while the window is
    /// already showing the bottom.
    pub follow_tail: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            viewport_height: 0,
            buffer_size: DEFAULT_BUFFER_SIZE,
            follow_tail: false,
        }
    }
}

impl WindowConfig {
    /// Config with the given row height and defaults elsewhere.
    #[must_use]
    pub fn new(row_height: i64) -> Self {
        Self {
            row_height,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_row_height(mut self, row_height: i64) -> Self {
        self.row_height = row_height;
        self
    }

    #[must_use]
    pub fn with_viewport_height(mut self, viewport_height: i64) -> Self {
        self.viewport_height = viewport_height;
        self
    }

    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    #[must_use]
    pub fn with_follow_tail(mut self, follow_tail: bool) -> Self {
        self.follow_tail = follow_tail;
        self
    }

    /// Reject configurations the range arithmetic cannot handle.
    pub fn validate(&self) -> Result<()> {
        if self.row_height <= 0 {
            return Err(WindowError::DegenerateConfiguration {
                row_height: self.row_height,
            });
        }
        Ok(())
    }
}
