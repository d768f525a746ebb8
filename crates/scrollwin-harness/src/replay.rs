#![forbid(unsafe_code)]

//! Trace replay.
//!
//! Replays a host-event trace through a [`ScrollWindow`], playing both the
//! host list (synthetic row ids) and the native scroll container (a
//! [`RecordingHost`]). Each `frame` record materializes the visible rows and
//! writes one JSONL [`FrameRecord`]. With invariant checking on, every frame
//! and every navigation is verified and the first failure aborts the replay.
//!
//! Deterministic and non-interactive, so it can run in CI.

use std::io::{BufRead, Write};

use scrollwin_core::{RecordingHost, ScrollWindow, VisibleRange, WindowFrameStats};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{HarnessError, Result};
use crate::trace::{TraceLine, TraceRecord, read_trace};

/// Most rows a trace may put in the synthetic list.
pub const MAX_TRACE_ITEMS: usize = 10_000_000;

/// Replay settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayOptions {
    /// Verify window invariants on every frame and navigation.
    pub check_invariants: bool,
}

/// One output line per rendered frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameRecord {
    #[serde(flatten)]
    pub stats: WindowFrameStats,
    /// Offsets pushed to the scroll container since the previous frame.
    pub host_commands: Vec<i64>,
    /// Last marker seen before this frame, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

/// Totals for a finished replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub frames: u64,
    pub host_commands: usize,
    pub final_item_count: usize,
    pub final_offset: i64,
}

/// Replay a JSONL trace from `input`, writing frame records to `output`.
pub fn replay<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    options: ReplayOptions,
) -> Result<ReplaySummary> {
    let lines = read_trace(input)?;
    replay_records(&lines, output, options)
}

/// Replay already-parsed records.
pub fn replay_records<W: Write>(
    lines: &[TraceLine],
    output: &mut W,
    options: ReplayOptions,
) -> Result<ReplaySummary> {
    let Some((first, rest)) = lines.split_first() else {
        return Err(HarnessError::MissingConfig { line: 1 });
    };
    let TraceRecord::Config(config) = &first.record else {
        return Err(HarnessError::MissingConfig { line: first.line });
    };

    let window = ScrollWindow::with_host(*config, RecordingHost::new())?;
    info!(
        row_height = config.row_height,
        viewport_height = config.viewport_height,
        buffer_size = config.buffer_size,
        "replay started"
    );

    let mut replayer = Replayer {
        window,
        rows: Vec::new(),
        frame: 0,
        marker: None,
        host_commands: 0,
        options,
    };
    for line in rest {
        replayer.apply(line, output)?;
    }
    output.flush()?;

    let summary = ReplaySummary {
        events: lines.len(),
        frames: replayer.frame,
        host_commands: replayer.host_commands + replayer.window.host().commands().len(),
        final_item_count: replayer.window.item_count(),
        final_offset: replayer.window.scroll_offset(),
    };
    info!(
        events = summary.events,
        frames = summary.frames,
        host_commands = summary.host_commands,
        "replay finished"
    );
    Ok(summary)
}

struct Replayer {
    window: ScrollWindow<RecordingHost>,
    rows: Vec<u64>,
    frame: u64,
    marker: Option<String>,
    host_commands: usize,
    options: ReplayOptions,
}

impl Replayer {
    fn apply<W: Write>(&mut self, line: &TraceLine, output: &mut W) -> Result<()> {
        debug!(line = line.line, record = ?line.record, "apply");
        match &line.record {
            TraceRecord::Config(_) => {
                return Err(HarnessError::DuplicateConfig { line: line.line });
            }
            TraceRecord::Scroll { offset } => self.window.report_scroll(*offset),
            TraceRecord::Resize { viewport_height } => {
                self.window.set_viewport_height(*viewport_height);
            }
            TraceRecord::Items { count } => {
                let total = checked_total(line, 0, *count)?;
                self.rows = (0..total as u64).collect();
                self.window.set_item_count(self.rows.len());
            }
            TraceRecord::Append { count } => {
                let next = self.rows.len();
                let total = checked_total(line, next, *count)?;
                self.rows.extend(next as u64..total as u64);
                self.window.set_item_count(self.rows.len());
            }
            TraceRecord::ScrollToIndex { index, align } => {
                let target = self.window.scroll_to_index_aligned(*index, *align);
                if let Some(target) = target {
                    self.check(line, || {
                        let range = self.window.compute_visible_range();
                        if range.contains(target) {
                            Ok(())
                        } else {
                            Err(format!(
                                "scroll_to_index({index}) range {:?} misses row {target}",
                                range.as_range()
                            ))
                        }
                    })?;
                }
            }
            TraceRecord::ScrollToEnd => {
                self.window.scroll_to_end();
                self.check(line, || {
                    let range = self.window.compute_visible_range();
                    let count = self.window.item_count();
                    if count == 0 || range.end_index == count {
                        Ok(())
                    } else {
                        Err(format!(
                            "scroll_to_end left end at {} of {count}",
                            range.end_index
                        ))
                    }
                })?;
            }
            TraceRecord::ScrollRows { delta } => self.window.scroll_by_rows(*delta),
            TraceRecord::PageUp => self.window.page_up(),
            TraceRecord::PageDown => self.window.page_down(),
            TraceRecord::Frame => self.render(line, output)?,
            TraceRecord::Marker { name } => self.marker = Some(name.clone()),
        }
        Ok(())
    }

    fn render<W: Write>(&mut self, line: &TraceLine, output: &mut W) -> Result<()> {
        let stats = WindowFrameStats::from_window(self.frame, &self.window);
        let range = self.window.compute_visible_range();
        let placed: Vec<(usize, i64, u64)> = self
            .window
            .materialize_visible(&self.rows)?
            .map(|r| (r.index, r.top, *r.row))
            .collect();

        self.check(line, || check_frame(&self.window, &range, &placed))?;

        let host_commands = self.window.host_mut().drain();
        self.host_commands += host_commands.len();
        let record = FrameRecord {
            stats,
            host_commands,
            marker: self.marker.take(),
        };
        serde_json::to_writer(&mut *output, &record)?;
        writeln!(output)?;
        self.frame += 1;
        Ok(())
    }

    fn check(
        &self,
        line: &TraceLine,
        verify: impl FnOnce() -> std::result::Result<(), String>,
    ) -> Result<()> {
        if !self.options.check_invariants {
            return Ok(());
        }
        verify().map_err(|message| HarnessError::violation(self.frame, line.line, message))
    }
}

/// List length after adding `added` rows, bounded by [`MAX_TRACE_ITEMS`].
fn checked_total(line: &TraceLine, current: usize, added: usize) -> Result<usize> {
    current
        .checked_add(added)
        .filter(|&total| total <= MAX_TRACE_ITEMS)
        .ok_or(HarnessError::ItemLimit {
            line: line.line,
            current,
            added,
            limit: MAX_TRACE_ITEMS,
        })
}

/// Verify the range and materialized rows of one frame.
fn check_frame(
    window: &ScrollWindow<RecordingHost>,
    range: &VisibleRange,
    placed: &[(usize, i64, u64)],
) -> std::result::Result<(), String> {
    let count = window.item_count();
    let row_height = window.row_height();

    if range.start_index > range.end_index || range.end_index > count {
        return Err(format!(
            "range {:?} out of bounds for {count} rows",
            range.as_range()
        ));
    }

    let viewport = window.state().effective_viewport_height();
    let rows_in_view = usize::try_from((viewport + row_height - 1) / row_height).unwrap_or(0);
    let bound = rows_in_view + 1 + 2 * window.buffer_size();
    if range.len() > bound {
        return Err(format!("range holds {} rows, bound is {bound}", range.len()));
    }

    let offset = window.scroll_offset();
    if (0..=window.max_scroll_offset()).contains(&offset) {
        let raw = range.unbuffered(count);
        if raw.start < range.start_index || raw.end > range.end_index {
            return Err(format!(
                "unbuffered rows {raw:?} escape range {:?}",
                range.as_range()
            ));
        }
    }

    if window.total_height() != count as i64 * row_height {
        return Err(format!("spacer height {} is wrong", window.total_height()));
    }

    if placed.len() != range.len() {
        return Err(format!(
            "materialized {} rows for a range of {}",
            placed.len(),
            range.len()
        ));
    }
    for (expected, &(index, top, id)) in range.as_range().zip(placed) {
        if index != expected || id != expected as u64 || top != expected as i64 * row_height {
            return Err(format!(
                "row {expected} materialized as index {index} id {id} top {top}"
            ));
        }
    }
    Ok(())
}
