use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use gantt_rs::api::{RawElement, RawStage, TimelineEngine, TimelineEngineConfig, TimelineInputs};
use gantt_rs::core::{
    CapacityRecord, CompletionRecord, ItemKind, TimelineItem, TimelineWindow, Viewport,
    build_day_grid, pack_rows,
};
use std::hint::black_box;

fn year_window() -> TimelineWindow {
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date");
    let end = NaiveDate::from_ymd_opt(2026, 12, 31).expect("valid date");
    TimelineWindow::new(start, end).expect("valid window")
}

fn generated_items(count: u32, window: TimelineWindow) -> Vec<TimelineItem> {
    (0..count)
        .map(|i| {
            let start_offset = i64::from(i % 340);
            let span = i64::from(i % 14);
            let kind = match i % 6 {
                0 => ItemKind::Stage,
                1 => ItemKind::Milestone,
                2 | 3 => ItemKind::ElementTask,
                4 => ItemKind::ElementActivity,
                _ => ItemKind::ElementDeliverable,
            };
            let start_date = window.start_date() + chrono::Duration::days(start_offset);
            let end_date = start_date + chrono::Duration::days(span);
            TimelineItem::from_span(
                window,
                format!("item-{i}"),
                kind,
                start_date,
                end_date,
                "generated",
                f64::from(i % 101),
            )
            .expect("valid generated span")
        })
        .collect()
}

fn bench_day_grid_build_1k(c: &mut Criterion) {
    let window = year_window();
    let items = generated_items(1_000, window);
    let completions: Vec<CompletionRecord> = (0..500)
        .map(|i| {
            let date = window.start_date() + chrono::Duration::days(i64::from(i % 365));
            CompletionRecord::new(format!("done-{i}"), date)
        })
        .collect();
    let capacities: Vec<CapacityRecord> = (0..365)
        .map(|i| {
            let date = window.start_date() + chrono::Duration::days(i64::from(i));
            CapacityRecord::new(date, 10.0, f64::from(i % 13), f64::from(i % 7))
        })
        .collect();

    c.bench_function("day_grid_build_1k", |b| {
        b.iter(|| {
            let _ = build_day_grid(
                black_box(window),
                black_box(&items),
                black_box(&completions),
                black_box(&capacities),
            );
        })
    });
}

fn bench_row_packing_1k(c: &mut Criterion) {
    let window = year_window();
    let items = generated_items(1_000, window);

    c.bench_function("row_packing_1k", |b| {
        b.iter(|| {
            let _ = pack_rows(black_box(&items));
        })
    });
}

fn bench_engine_scroll_state_365(c: &mut Criterion) {
    let window = year_window();
    let stages: Vec<RawStage> = (0..20)
        .map(|i| {
            let start = window.start_date() + chrono::Duration::days(i64::from(i) * 18);
            RawStage {
                id: Some(format!("stage-{i}")),
                kind: Some(ItemKind::Stage),
                start_date: Some(start),
                end_date: Some(start + chrono::Duration::days(16)),
                ..RawStage::default()
            }
        })
        .collect();
    let elements: Vec<RawElement> = (0..300)
        .map(|i| {
            let start = window.start_date() + chrono::Duration::days(i64::from(i % 350));
            RawElement {
                id: Some(format!("task-{i}")),
                kind: Some(ItemKind::ElementTask),
                start_date: Some(start),
                end_date: Some(start + chrono::Duration::days(i64::from(i % 9))),
                ..RawElement::default()
            }
        })
        .collect();
    let inputs = TimelineInputs::new(window.start_date(), window.end_date())
        .with_stages(stages)
        .with_elements(elements);

    let mut engine = TimelineEngine::new(TimelineEngineConfig::default()).expect("engine init");
    engine.days(&inputs).expect("layout builds");
    let viewport = Viewport::new(1600, 900);

    c.bench_function("engine_scroll_state_365", |b| {
        b.iter(|| {
            let _ = engine
                .scroll_state(black_box(1_200.0), black_box(1_140.0), black_box(viewport))
                .expect("scroll state should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_day_grid_build_1k,
    bench_row_packing_1k,
    bench_engine_scroll_state_365
);
criterion_main!(benches);
