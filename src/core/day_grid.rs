use std::collections::HashMap;

use chrono::NaiveDate;
use smallvec::SmallVec;

use crate::core::day::{CapacityRecord, CompletionRecord, Day};
use crate::core::item::TimelineItem;
use crate::core::types::TimelineWindow;

/// Builds one [`Day`] per date of the window, oldest first, folding in the
/// elements, completion marks, and capacity figures dated on that day.
///
/// Every collection is pre-indexed into per-date buckets so the pass stays
/// `O(days + elements + completions + capacities)`. An element contributes
/// to the date it starts on; records dated outside the window hit no bucket
/// and drop out without error. When one date carries several capacity
/// records, the last one wins.
#[must_use]
pub fn build_day_grid(
    window: TimelineWindow,
    items: &[TimelineItem],
    completions: &[CompletionRecord],
    capacities: &[CapacityRecord],
) -> Vec<Day> {
    let mut element_buckets: HashMap<NaiveDate, SmallVec<[&TimelineItem; 4]>> = HashMap::new();
    for item in items.iter().filter(|item| item.kind.is_element_like()) {
        element_buckets.entry(item.start_date).or_default().push(item);
    }

    let mut completion_buckets: HashMap<NaiveDate, SmallVec<[&CompletionRecord; 4]>> =
        HashMap::new();
    for completion in completions {
        completion_buckets
            .entry(completion.date)
            .or_default()
            .push(completion);
    }

    let mut capacity_by_date: HashMap<NaiveDate, &CapacityRecord> = HashMap::new();
    for capacity in capacities {
        capacity_by_date.insert(capacity.date, capacity);
    }

    let total_days = window.total_days();
    let mut days = Vec::with_capacity(total_days as usize);
    for (offset, date) in window
        .start_date()
        .iter_days()
        .take(total_days as usize)
        .enumerate()
    {
        let mut day = Day::new(date, offset as i64);
        if let Some(bucket) = element_buckets.get(&date) {
            for item in bucket {
                day.record_element(item);
            }
        }
        if let Some(bucket) = completion_buckets.get(&date) {
            for completion in bucket {
                day.record_completion(&completion.id);
            }
        }
        if let Some(capacity) = capacity_by_date.get(&date) {
            day.apply_capacity(capacity);
        }
        days.push(day);
    }
    days
}
