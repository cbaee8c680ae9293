use serde::{Deserialize, Serialize};

use crate::core::date_index::DayIndex;
use crate::core::item::TimelineItem;

/// Horizontal lane of mutually non-overlapping items.
///
/// The packer fills rows in ascending start order, so the last item always
/// carries the row's rightmost occupied index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    items: Vec<TimelineItem>,
}

impl Row {
    #[must_use]
    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rightmost occupied day index, `None` for an empty row.
    #[must_use]
    pub fn last_end_index(&self) -> Option<DayIndex> {
        self.items.last().map(|item| item.end_index)
    }

    /// True when any item's inclusive span covers `index`.
    #[must_use]
    pub fn spans_day(&self, index: DayIndex) -> bool {
        self.items.iter().any(|item| item.span_contains(index))
    }

    /// A span starting at `start_index` fits when it begins past the last
    /// occupied index; sharing an edge (adjacent days) is allowed.
    fn accepts(&self, start_index: DayIndex) -> bool {
        self.last_end_index()
            .is_none_or(|end| end + 1 <= start_index)
    }
}

/// Packs items into rows with a first-fit scan that starts at the row of
/// the most recently placed stage-like item.
///
/// Placement order is stable by start index, stage-like kinds first, then
/// item id, so permuting the input never changes the result. Starting the
/// scan at the last stage row keeps elements grouped under the stage they
/// follow; the heuristic does not minimize total row count.
#[must_use]
pub fn pack_rows(items: &[TimelineItem]) -> Vec<Row> {
    let mut ordered: Vec<(usize, &TimelineItem)> = items.iter().enumerate().collect();
    ordered.sort_by(|(a_index, a), (b_index, b)| {
        a.start_index
            .cmp(&b.start_index)
            .then_with(|| a.kind.packing_rank().cmp(&b.kind.packing_rank()))
            .then_with(|| a.id.cmp(&b.id))
            .then_with(|| a_index.cmp(b_index))
    });

    let mut rows: Vec<Row> = Vec::new();
    let mut last_stage_row = 0usize;

    for (_, item) in ordered {
        let scan_from = last_stage_row.min(rows.len());
        let row_index = rows[scan_from..]
            .iter()
            .position(|row| row.accepts(item.start_index))
            .map(|offset| scan_from + offset);

        let row_index = match row_index {
            Some(index) => {
                rows[index].items.push(item.clone());
                index
            }
            None => {
                rows.push(Row {
                    items: vec![item.clone()],
                });
                rows.len() - 1
            }
        };

        if item.kind.is_stage_like() {
            last_stage_row = row_index;
        }
    }

    rows
}
