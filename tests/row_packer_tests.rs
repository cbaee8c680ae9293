use chrono::NaiveDate;
use gantt_rs::core::{ItemKind, TimelineItem, TimelineWindow, pack_rows};

fn window() -> TimelineWindow {
    let start = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
    let end = NaiveDate::from_ymd_opt(2026, 4, 9).expect("valid date");
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
fn empty_input_packs_to_no_rows() {
    assert!(pack_rows(&[]).is_empty());
}

#[test]
fn single_item_occupies_the_first_row() {
    let rows = pack_rows(&[item("only", ItemKind::ElementTask, 3, 7)]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].items()[0].id, "only");
}

#[test]
fn no_row_ever_holds_overlapping_items() {
    let items = vec![
        item("stage-a", ItemKind::Stage, 0, 9),
        item("stage-b", ItemKind::Stage, 5, 14),
        item("task-1", ItemKind::ElementTask, 0, 3),
        item("task-2", ItemKind::ElementTask, 2, 6),
        item("task-3", ItemKind::ElementTask, 4, 4),
        item("task-4", ItemKind::ElementTask, 7, 12),
        item("act-1", ItemKind::ElementActivity, 10, 18),
        item("del-1", ItemKind::ElementDeliverable, 15, 16),
        item("mile-1", ItemKind::Milestone, 8, 8),
    ];

    let rows = pack_rows(&items);
    let placed: usize = rows.iter().map(|row| row.len()).sum();
    assert_eq!(placed, items.len());

    for row in &rows {
        let spans = row.items();
        for left in 0..spans.len() {
            for right in (left + 1)..spans.len() {
                let a = &spans[left];
                let b = &spans[right];
                assert!(
                    a.end_index < b.start_index || b.end_index < a.start_index,
                    "row holds overlapping spans {} and {}",
                    a.id,
                    b.id
                );
            }
        }
    }
}

#[test]
fn adjacent_spans_share_a_row() {
    let rows = pack_rows(&[
        item("first", ItemKind::ElementTask, 0, 10),
        item("second", ItemKind::ElementTask, 11, 13),
    ]);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 2);
    assert_eq!(rows[0].last_end_index(), Some(13));
}

#[test]
fn touching_end_days_force_a_second_row() {
    let rows = pack_rows(&[
        item("first", ItemKind::ElementTask, 0, 10),
        item("second", ItemKind::ElementTask, 10, 13),
    ]);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].len(), 1);
    assert_eq!(rows[1].len(), 1);
}

#[test]
fn items_inside_a_row_stay_in_start_order() {
    let rows = pack_rows(&[
        item("late", ItemKind::ElementTask, 20, 25),
        item("early", ItemKind::ElementTask, 0, 4),
        item("middle", ItemKind::ElementTask, 8, 12),
    ]);

    assert_eq!(rows.len(), 1);
    let ids: Vec<&str> = rows[0].items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["early", "middle", "late"]);
}

#[test]
fn elements_never_pack_above_the_latest_stage_row() {
    // stage-a fills row 0 through day 2, stage-b overlaps it and opens
    // row 1. The element would fit row 0 from day 4 on, but the scan
    // starts at the stage-b row.
    let rows = pack_rows(&[
        item("stage-a", ItemKind::Stage, 0, 2),
        item("stage-b", ItemKind::Stage, 1, 6),
        item("task-1", ItemKind::ElementTask, 4, 5),
    ]);

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].items()[0].id, "stage-a");
    assert_eq!(rows[1].items()[0].id, "stage-b");
    assert_eq!(rows[2].items()[0].id, "task-1");
}

#[test]
fn stage_like_kinds_place_before_elements_at_equal_start() {
    let rows = pack_rows(&[
        item("task-1", ItemKind::ElementTask, 0, 5),
        item("mile-1", ItemKind::Milestone, 0, 0),
    ]);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].items()[0].id, "mile-1");
    assert_eq!(rows[1].items()[0].id, "task-1");
}

#[test]
fn equal_start_and_kind_breaks_ties_by_id() {
    let rows = pack_rows(&[
        item("beta", ItemKind::ElementTask, 0, 3),
        item("alpha", ItemKind::ElementTask, 0, 3),
    ]);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].items()[0].id, "alpha");
    assert_eq!(rows[1].items()[0].id, "beta");
}

#[test]
fn packing_is_invariant_under_input_order() {
    let forward = vec![
        item("stage-a", ItemKind::Stage, 0, 9),
        item("task-1", ItemKind::ElementTask, 0, 3),
        item("task-2", ItemKind::ElementTask, 5, 6),
        item("mile-1", ItemKind::Milestone, 4, 4),
        item("act-1", ItemKind::ElementActivity, 7, 12),
    ];
    let mut reversed = forward.clone();
    reversed.reverse();

    assert_eq!(pack_rows(&forward), pack_rows(&reversed));
}

#[test]
fn rows_report_which_days_they_span() {
    let rows = pack_rows(&[
        item("task-1", ItemKind::ElementTask, 2, 5),
        item("task-2", ItemKind::ElementTask, 9, 9),
    ]);

    assert_eq!(rows.len(), 1);
    assert!(rows[0].spans_day(2));
    assert!(rows[0].spans_day(5));
    assert!(rows[0].spans_day(9));
    assert!(!rows[0].spans_day(7));
    assert!(!rows[0].spans_day(10));
}
