use chrono::NaiveDate;
use gantt_rs::core::{
    AUTO_SCROLL_LOOKAHEAD_DAYS, ItemKind, TimelineItem, TimelineWindow,
    calculate_target_vertical_offset, pack_rows, row_step, should_enable_auto_scroll,
};

fn window() -> TimelineWindow {
    let start = NaiveDate::from_ymd_opt(2026, 5, 1).expect("valid date");
    let end = NaiveDate::from_ymd_opt(2026, 6, 29).expect("valid date");
    TimelineWindow::new(start, end).expect("valid window")
}

fn item(id: &str, kind: ItemKind, start: i64, end: i64) -> TimelineItem {
    let window = window();
    let start_date = window.start_date() + chrono::Duration::days(start);
    let end_date = window.start_date() + chrono::Duration::days(end);
    TimelineItem::from_span(window, id, kind, start_date, end_date, id, 0.0)
        .expect("span inside window")
}

#[test]
fn row_step_adds_margin_on_both_sides() {
    let step = row_step(40.0, 4.0).expect("valid metrics");
    assert!((step - 48.0).abs() <= 1e-9);
}

#[test]
fn row_step_rejects_degenerate_metrics() {
    assert!(row_step(0.0, 4.0).is_err());
    assert!(row_step(40.0, -1.0).is_err());
    assert!(row_step(f64::NAN, 4.0).is_err());
}

#[test]
fn lookahead_constant_matches_the_search_window() {
    assert_eq!(AUTO_SCROLL_LOOKAHEAD_DAYS, 4);
}

#[test]
fn scrolling_left_looks_ahead_and_picks_the_topmost_row() {
    // Rows: stage [0, 30] in row 0, tasks open rows 1 and 2. Day 14 is
    // covered by all three rows.
    let rows = pack_rows(&[
        item("stage-a", ItemKind::Stage, 0, 30),
        item("task-1", ItemKind::ElementTask, 10, 16),
        item("task-2", ItemKind::ElementTask, 12, 20),
    ]);
    assert_eq!(rows.len(), 3);

    let target = calculate_target_vertical_offset(10, &rows, 40.0, 4.0, true)
        .expect("valid metrics");
    // Search index 10 + 4 = 14; topmost covering row is row 0.
    assert!((target.expect("row found") - 0.0).abs() <= 1e-9);
}

#[test]
fn scrolling_right_looks_back_and_picks_the_bottommost_row() {
    let rows = pack_rows(&[
        item("stage-a", ItemKind::Stage, 0, 30),
        item("task-1", ItemKind::ElementTask, 10, 16),
        item("task-2", ItemKind::ElementTask, 12, 20),
    ]);

    let target = calculate_target_vertical_offset(18, &rows, 40.0, 4.0, false)
        .expect("valid metrics");
    // Search index 18 - 4 = 14; bottommost covering row is row 2.
    assert!((target.expect("row found") - 96.0).abs() <= 1e-9);
}

#[test]
fn target_offset_scales_with_the_row_step() {
    let rows = pack_rows(&[
        item("task-1", ItemKind::ElementTask, 0, 5),
        item("task-2", ItemKind::ElementTask, 3, 9),
    ]);
    assert_eq!(rows.len(), 2);

    // Search index 8 - 4 = 4 hits both rows; scrolling right takes row 1.
    let target = calculate_target_vertical_offset(8, &rows, 30.0, 2.0, false)
        .expect("valid metrics");
    assert!((target.expect("row found") - 34.0).abs() <= 1e-9);
}

#[test]
fn no_row_near_the_center_yields_no_target() {
    let rows = pack_rows(&[item("task-1", ItemKind::ElementTask, 0, 2)]);

    let target = calculate_target_vertical_offset(40, &rows, 40.0, 4.0, true)
        .expect("valid metrics");
    assert_eq!(target, None);
}

#[test]
fn empty_row_set_yields_no_target() {
    let target =
        calculate_target_vertical_offset(5, &[], 40.0, 4.0, true).expect("valid metrics");
    assert_eq!(target, None);
}

#[test]
fn target_search_rejects_bad_metrics() {
    let rows = pack_rows(&[item("task-1", ItemKind::ElementTask, 0, 2)]);
    assert!(calculate_target_vertical_offset(5, &rows, -40.0, 4.0, true).is_err());
}

#[test]
fn auto_scroll_stays_off_without_a_target() {
    assert!(!should_enable_auto_scroll(None, None));
    assert!(!should_enable_auto_scroll(Some(120.0), None));
}

#[test]
fn auto_scroll_engages_when_no_user_offset_is_pinned() {
    assert!(should_enable_auto_scroll(None, Some(48.0)));
    assert!(should_enable_auto_scroll(None, Some(0.0)));
}

#[test]
fn pinned_user_offset_gates_on_strictly_greater_target() {
    assert!(should_enable_auto_scroll(Some(48.0), Some(96.0)));
    assert!(!should_enable_auto_scroll(Some(96.0), Some(96.0)));
    assert!(!should_enable_auto_scroll(Some(144.0), Some(96.0)));
}
