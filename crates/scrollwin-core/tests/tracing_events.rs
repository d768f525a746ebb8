#![cfg(feature = "tracing")]

//! Log events emitted by the window when the `tracing` feature is on.
//!
//! Run:
//!   cargo test -p scrollwin-core --features tracing --test tracing_events

use scrollwin_core::{RecordingHost, ScrollWindow, WindowConfig};
use tracing_test::traced_test;

fn window(follow_tail: bool) -> ScrollWindow<RecordingHost> {
    let config = WindowConfig::new(80)
        .with_viewport_height(400)
        .with_follow_tail(follow_tail);
    ScrollWindow::with_host(config, RecordingHost::new()).unwrap()
}

#[traced_test]
#[test]
fn contract_violation_is_logged() {
    let mut w = window(false);
    w.set_item_count(4);
    let rows = [1, 2, 3];
    assert!(w.materialize_visible(&rows).is_err());
    assert!(logs_contain("row slice length disagrees with item count"));
}

#[traced_test]
#[test]
fn navigation_is_logged() {
    let mut w = window(false);
    w.set_item_count(100);
    w.scroll_to_index(42);
    w.scroll_to_end();
    assert!(logs_contain("scroll to index"));
    assert!(logs_contain("scroll to end"));
}

#[traced_test]
#[test]
fn follow_tail_snap_is_logged() {
    let mut w = window(true);
    w.set_item_count(20);
    assert!(logs_contain("follow tail: snapping to end"));
}

#[traced_test]
#[test]
fn range_computation_is_traced() {
    let mut w = window(false);
    w.set_item_count(1000);
    w.report_scroll(8000);
    let _ = w.compute_visible_range();
    assert!(logs_contain("visible range"));
    assert!(logs_contain("start=98"));
}
