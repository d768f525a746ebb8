//! Host-event trace format.
//!
//! A trace is JSONL: one [`TraceRecord`] per line, tagged by `event`. The
//! first record configures the window; the rest replay what a host view
//! would report to it. Blank lines and lines starting with `#` are ignored.
//!
//! ```text
//! {"event":"config","row_height":80,"viewport_height":400,"follow_tail":true}
//! {"event":"items","count":1000}
//! {"event":"scroll","offset":8000}
//! {"event":"frame"}
//! {"event":"append","count":1}
//! {"event":"scroll_to_end"}
//! {"event":"frame"}
//! ```

use std::io::{BufRead, Write};

use scrollwin_core::{Align, WindowConfig};
use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};

/// Current trace schema name, written as a comment header by [`write_trace`].
pub const TRACE_SCHEMA_VERSION: &str = "scrollwin-trace-v1";

/// One host event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceRecord {
    /// Window configuration. Must be the first record.
    Config(WindowConfig),
    /// Native scroll notification.
    Scroll { offset: i64 },
    /// Viewport resize.
    Resize { viewport_height: i64 },
    /// List replaced by one of `count` rows.
    Items { count: usize },
    /// Rows appended to the list.
    Append {
        #[serde(default = "one")]
        count: usize,
    },
    /// Programmatic scroll to a row.
    ScrollToIndex {
        index: i64,
        #[serde(default)]
        align: Align,
    },
    /// Snap to the newest row.
    ScrollToEnd,
    /// Relative scroll by whole rows.
    ScrollRows { delta: i64 },
    PageUp,
    PageDown,
    /// Render pass: compute, materialize, emit stats.
    Frame,
    /// Named checkpoint; no effect on the window.
    Marker { name: String },
}

fn one() -> usize {
    1
}

/// A record together with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLine {
    pub line: usize,
    pub record: TraceRecord,
}

/// Parse a JSONL trace.
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<TraceLine>> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let record = serde_json::from_str(trimmed).map_err(|source| HarnessError::Parse {
            line: idx + 1,
            source,
        })?;
        records.push(TraceLine {
            line: idx + 1,
            record,
        });
    }
    Ok(records)
}

/// Write records as JSONL, preceded by a schema comment.
pub fn write_trace<W: Write>(out: &mut W, records: &[TraceRecord]) -> Result<()> {
    writeln!(out, "# {TRACE_SCHEMA_VERSION}")?;
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Parameters for [`chat_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionShape {
    pub items: usize,
    pub row_height: i64,
    pub viewport_height: i64,
    pub appends: usize,
}

impl Default for SessionShape {
    fn default() -> Self {
        Self {
            items: 1000,
            row_height: 80,
            viewport_height: 400,
            appends: 5,
        }
    }
}

/// A deterministic chat-history session: open at the bottom, read back
/// through the history, jump around, then receive new messages.
#[must_use]
pub fn chat_session(shape: SessionShape) -> Vec<TraceRecord> {
    let config = WindowConfig::new(shape.row_height)
        .with_viewport_height(shape.viewport_height)
        .with_follow_tail(true);
    let total = i64::try_from(shape.items)
        .unwrap_or(i64::MAX)
        .saturating_mul(shape.row_height);

    let mut records = vec![
        TraceRecord::Config(config),
        TraceRecord::Items { count: shape.items },
        TraceRecord::Frame,
        TraceRecord::Marker {
            name: "read back".into(),
        },
    ];

    // Scroll upward in uneven steps, rendering after each notification.
    let step = (shape.viewport_height.max(1) * 3) / 2 + 7;
    let mut offset = (total - shape.viewport_height).max(0);
    while offset > 0 {
        offset = (offset - step).max(0);
        records.push(TraceRecord::Scroll { offset });
        records.push(TraceRecord::Frame);
    }

    records.extend([
        TraceRecord::Marker {
            name: "jump".into(),
        },
        TraceRecord::ScrollToIndex {
            index: i64::try_from(shape.items / 2).unwrap_or(i64::MAX),
            align: Align::Center,
        },
        TraceRecord::Frame,
        TraceRecord::ScrollToIndex {
            index: -5,
            align: Align::Start,
        },
        TraceRecord::Frame,
        TraceRecord::PageDown,
        TraceRecord::Frame,
        TraceRecord::Resize {
            viewport_height: shape.viewport_height * 2,
        },
        TraceRecord::Frame,
        TraceRecord::ScrollToEnd,
        TraceRecord::Frame,
        TraceRecord::Marker {
            name: "new messages".into(),
        },
    ]);

    for _ in 0..shape.appends {
        records.push(TraceRecord::Append { count: 1 });
        records.push(TraceRecord::Frame);
    }
    records
}
