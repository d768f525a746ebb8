#![forbid(unsafe_code)]

//! Replay of randomized host-event traces with invariant checking on.
//!
//! Any interleaving of scrolls, resizes, appends, and navigation must replay
//! without a single invariant violation.
//!
//! Run:
//!   cargo test -p scrollwin-harness --test trace_replay

use proptest::prelude::*;
use scrollwin_core::{Align, WindowConfig};
use scrollwin_harness::{ReplayOptions, TraceLine, TraceRecord, replay, replay_records};

fn align_strategy() -> impl Strategy<Value = Align> {
    prop_oneof![Just(Align::Start), Just(Align::Center), Just(Align::End)]
}

fn event_strategy() -> impl Strategy<Value = TraceRecord> {
    prop_oneof![
        (-5_000i64..200_000).prop_map(|offset| TraceRecord::Scroll { offset }),
        (-50i64..3_000).prop_map(|viewport_height| TraceRecord::Resize { viewport_height }),
        (0usize..2_000).prop_map(|count| TraceRecord::Items { count }),
        (0usize..20).prop_map(|count| TraceRecord::Append { count }),
        (-100i64..3_000, align_strategy())
            .prop_map(|(index, align)| TraceRecord::ScrollToIndex { index, align }),
        Just(TraceRecord::ScrollToEnd),
        (-50i64..50).prop_map(|delta| TraceRecord::ScrollRows { delta }),
        Just(TraceRecord::PageUp),
        Just(TraceRecord::PageDown),
        Just(TraceRecord::Frame),
    ]
}

fn numbered(config: WindowConfig, events: Vec<TraceRecord>) -> Vec<TraceLine> {
    std::iter::once(TraceRecord::Config(config))
        .chain(events)
        .chain(std::iter::once(TraceRecord::Frame))
        .enumerate()
        .map(|(i, record)| TraceLine {
            line: i + 1,
            record,
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn random_sessions_hold_invariants(
        row_height in 1i64..=120,
        buffer_size in 0usize..6,
        follow_tail in any::<bool>(),
        events in proptest::collection::vec(event_strategy(), 1..80),
    ) {
        let config = WindowConfig::new(row_height)
            .with_viewport_height(400)
            .with_buffer_size(buffer_size)
            .with_follow_tail(follow_tail);
        let lines = numbered(config, events);
        let mut out = Vec::new();
        let summary = replay_records(
            &lines,
            &mut out,
            ReplayOptions { check_invariants: true },
        );
        prop_assert!(summary.is_ok(), "{:?}", summary.as_ref().err());
        let frames = String::from_utf8(out).unwrap();
        prop_assert_eq!(frames.lines().count() as u64, summary.unwrap().frames);
    }
}

#[test]
fn journal_session_from_text() {
    let trace = "\
# scrollwin-trace-v1
{\"event\":\"config\",\"row_height\":80,\"viewport_height\":400,\"buffer_size\":2}
{\"event\":\"items\",\"count\":1000}
{\"event\":\"scroll\",\"offset\":8000}
{\"event\":\"frame\"}
{\"event\":\"scroll_to_index\",\"index\":-5}
{\"event\":\"frame\"}
{\"event\":\"scroll_to_end\"}
{\"event\":\"frame\"}
";
    let mut out = Vec::new();
    let summary = replay(
        trace.as_bytes(),
        &mut out,
        ReplayOptions {
            check_invariants: true,
        },
    )
    .unwrap();
    assert_eq!(summary.frames, 3);

    let frames: Vec<serde_json::Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(frames[0]["start_index"], 98);
    assert_eq!(frames[0]["end_index"], 108);
    assert_eq!(frames[1]["scroll_offset"], 0);
    assert_eq!(frames[1]["start_index"], 0);
    assert_eq!(frames[2]["end_index"], 1000);
    assert_eq!(frames[2]["scroll_offset"], 79_600);
}
