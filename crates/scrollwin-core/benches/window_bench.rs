//! Benchmark: range computation and materialization on long lists.
//!
//! Run with: `cargo bench -p scrollwin-core --bench window_bench`
//!
//! Every scroll event recomputes the range, so its cost must not depend on
//! the list length; materialization should scale with the window only.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use scrollwin_core::{ScrollWindow, WindowConfig};

fn chat_window(item_count: usize) -> ScrollWindow {
    let mut window = ScrollWindow::new(WindowConfig::new(80).with_viewport_height(900))
        .expect("valid config");
    window.set_item_count(item_count);
    window
}

fn bench_compute_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_visible_range");
    for &count in &[1_000usize, 100_000, 10_000_000] {
        let mut window = chat_window(count);
        let max = window.max_scroll_offset();
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            let mut offset = 0i64;
            b.iter(|| {
                offset = (offset + 97) % (max + 1);
                window.report_scroll(black_box(offset));
                black_box(window.compute_visible_range())
            });
        });
    }
    group.finish();
}

fn bench_materialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize_visible");
    let rows: Vec<u64> = (0..100_000).collect();
    let mut window = chat_window(rows.len());
    window.scroll_to_index(50_000);

    group.bench_function("100k/mid", |b| {
        b.iter(|| {
            let sum: i64 = window
                .materialize_visible(black_box(&rows))
                .expect("snapshot matches")
                .map(|r| r.top)
                .sum();
            black_box(sum)
        });
    });

    group.bench_function("scroll_storm/1k_events", |b| {
        b.iter(|| {
            for step in 0..1_000i64 {
                window.report_scroll(step * 37);
                black_box(window.compute_visible_range());
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_compute_range, bench_materialize);
criterion_main!(benches);
