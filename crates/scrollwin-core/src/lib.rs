#![forbid(unsafe_code)]

//! Virtual scroll window for long lists of fixed-height rows.
//!
//! # Role
//! `scrollwin-core` decides which rows of an arbitrarily long, append-mostly
//! list a host view has to mount, and where each of them goes. The host keeps
//! the rows, the rendering, and the native scroll container; the window keeps
//! only the scroll state and turns it into a [`VisibleRange`].
//!
//! # Primary pieces
//! - **[`ScrollWindow`]**: scroll state, range queries, materialization, and
//!   navigation (`scroll_to_index`, `scroll_to_end`, paging).
//! - **[`VisibleRange`]**: half-open buffered row range plus the unbuffered
//!   window and anchor offset it came from.
//! - **[`ScrollHost`]**: injected capability the window uses to move the
//!   native scroll container.
//! - **[`WindowFrameStats`]**: per-frame metrics for structured logs.
//!
//! # Example
//!
//! ```
//! use scrollwin_core::{ScrollWindow, WindowConfig};
//!
//! let messages: Vec<String> = (0..1000).map(|i| format!("message {i}")).collect();
//! let mut window = ScrollWindow::new(WindowConfig::new(80).with_viewport_height(400))?;
//! window.set_item_count(messages.len());
//! window.report_scroll(8000);
//!
//! let range = window.compute_visible_range();
//! assert_eq!(range.as_range(), 98..108);
//!
//! for visible in window.materialize_visible(&messages)? {
//!     assert_eq!(visible.top, visible.index as i64 * 80);
//! }
//! # Ok::<(), scrollwin_core::WindowError>(())
//! ```
//!
//! # Features
//! - `tracing`: emit `tracing` events for navigation and contract failures.
//! - `serde`: derive `Serialize`/`Deserialize` for config, ranges, and stats.

pub mod config;
pub mod error;
pub mod host;
pub mod range;
pub mod stats;
pub mod window;

pub use config::{DEFAULT_BUFFER_SIZE, DEFAULT_ROW_HEIGHT, WindowConfig};
pub use error::{Result, WindowError};
pub use host::{Detached, FnHost, RecordingHost, ScrollHost};
pub use range::{ScrollState, VisibleRange, compute_visible_range};
pub use stats::WindowFrameStats;
pub use window::{Align, MaterializedRow, MaterializedRows, ScrollWindow};
