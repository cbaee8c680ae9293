use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::date_index::DayIndex;
use crate::core::item::{ItemKind, TimelineItem};
use crate::core::types::AlertLevel;

/// Completion mark delivered through the separate done-elements feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub id: String,
    pub date: NaiveDate,
}

impl CompletionRecord {
    #[must_use]
    pub fn new(id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            date,
        }
    }
}

/// One day's capacity figures, already parsed and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityRecord {
    pub date: NaiveDate,
    pub capacity_effective: f64,
    pub used_effective: f64,
    pub completed_effective: f64,
}

impl CapacityRecord {
    #[must_use]
    pub fn new(
        date: NaiveDate,
        capacity_effective: f64,
        used_effective: f64,
        completed_effective: f64,
    ) -> Self {
        Self {
            date,
            capacity_effective,
            used_effective,
            completed_effective,
        }
    }
}

/// Aggregated per-date cell of the day grid.
///
/// Counters are folded in by the grid builder; the id sets make the fold
/// idempotent when a feed repeats a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    pub date: NaiveDate,
    pub day_index: DayIndex,
    pub activity_total: u32,
    pub activity_completed: u32,
    pub deliverable_total: u32,
    pub deliverable_completed: u32,
    pub task_total: u32,
    pub task_completed: u32,
    pub element_completed: u32,
    pub element_pending: u32,
    pub counted_ids: IndexSet<String>,
    pub completed_ids: IndexSet<String>,
    pub capacity_effective: f64,
    pub used_effective: f64,
    pub completed_effective: f64,
    pub alert_level: AlertLevel,
}

impl Day {
    #[must_use]
    pub fn new(date: NaiveDate, day_index: DayIndex) -> Self {
        Self {
            date,
            day_index,
            activity_total: 0,
            activity_completed: 0,
            deliverable_total: 0,
            deliverable_completed: 0,
            task_total: 0,
            task_completed: 0,
            element_completed: 0,
            element_pending: 0,
            counted_ids: IndexSet::new(),
            completed_ids: IndexSet::new(),
            capacity_effective: 0.0,
            used_effective: 0.0,
            completed_effective: 0.0,
            alert_level: AlertLevel::Normal,
        }
    }

    /// Folds one element-like item into the per-kind counters.
    ///
    /// Stage-like items and ids already counted on this day are ignored;
    /// returns whether the item was actually counted.
    pub fn record_element(&mut self, item: &TimelineItem) -> bool {
        if item.kind.is_stage_like() {
            return false;
        }
        if !self.counted_ids.insert(item.id.clone()) {
            return false;
        }

        let complete = item.is_complete();
        match item.kind {
            ItemKind::ElementActivity => {
                self.activity_total += 1;
                if complete {
                    self.activity_completed += 1;
                }
            }
            ItemKind::ElementDeliverable => {
                self.deliverable_total += 1;
                if complete {
                    self.deliverable_completed += 1;
                }
            }
            ItemKind::ElementTask => {
                self.task_total += 1;
                if complete {
                    self.task_completed += 1;
                }
            }
            _ => {}
        }
        if !complete {
            self.element_pending += 1;
        }
        true
    }

    /// Folds one completion mark in; repeated ids count once per day.
    pub fn record_completion(&mut self, id: &str) -> bool {
        if !self.completed_ids.insert(id.to_owned()) {
            return false;
        }
        self.element_completed += 1;
        true
    }

    /// Overwrites the day's capacity figures and re-derives its alert level.
    pub fn apply_capacity(&mut self, record: &CapacityRecord) {
        self.capacity_effective = record.capacity_effective;
        self.used_effective = record.used_effective;
        self.completed_effective = record.completed_effective;
        self.alert_level =
            AlertLevel::from_utilization(self.used_effective, self.capacity_effective);
    }

    /// Combined element count across the three element kinds.
    #[must_use]
    pub fn element_total(&self) -> u32 {
        self.activity_total + self.deliverable_total + self.task_total
    }
}
