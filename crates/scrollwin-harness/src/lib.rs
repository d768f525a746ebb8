#![forbid(unsafe_code)]

//! Trace-replay harness for `scrollwin-core`.
//!
//! Replays recorded (or synthetic) host-event traces through a
//! [`ScrollWindow`](scrollwin_core::ScrollWindow), emits one JSONL frame
//! record per render pass, and optionally checks the window's range
//! invariants on every frame.
//!
//! # Running
//!
//! ```sh
//! cargo run -p scrollwin-harness -- sample --items 5000 --out session.jsonl
//! cargo run -p scrollwin-harness -- replay session.jsonl --check
//! ```

pub mod cli;
pub mod error;
pub mod replay;
pub mod trace;

pub use cli::run_from_env;
pub use error::{HarnessError, Result};
pub use replay::{
    FrameRecord, MAX_TRACE_ITEMS, ReplayOptions, ReplaySummary, replay, replay_records,
};
pub use trace::{TraceLine, TraceRecord, read_trace, write_trace};
