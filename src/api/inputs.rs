use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::core::day::{CapacityRecord, CompletionRecord};
use crate::core::item::{ItemKind, TimelineItem};
use crate::core::primitives::decimal_to_f64;
use crate::core::types::TimelineWindow;
use crate::error::GanttResult;

/// Raw schedule data handed over by the host's data-supply layer.
///
/// Loading and IO happen upstream; the engine only shapes what it gets.
/// Record fields are optional on purpose: real feeds drop ids and dates,
/// and derivation skips such records instead of failing the whole build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineInputs {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub stages: Vec<RawStage>,
    #[serde(default)]
    pub elements: Vec<RawElement>,
    #[serde(default)]
    pub elements_done: Vec<RawCompletion>,
    #[serde(default)]
    pub capacities: Vec<RawCapacity>,
    /// Configured ceiling for capacity bars; zero or negative means derive
    /// the ceiling from the data instead.
    #[serde(default)]
    pub max_capacity: f64,
}

impl TimelineInputs {
    #[must_use]
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            stages: Vec::new(),
            elements: Vec::new(),
            elements_done: Vec::new(),
            capacities: Vec::new(),
            max_capacity: 0.0,
        }
    }

    #[must_use]
    pub fn with_stages(mut self, stages: Vec<RawStage>) -> Self {
        self.stages = stages;
        self
    }

    #[must_use]
    pub fn with_elements(mut self, elements: Vec<RawElement>) -> Self {
        self.elements = elements;
        self
    }

    #[must_use]
    pub fn with_elements_done(mut self, elements_done: Vec<RawCompletion>) -> Self {
        self.elements_done = elements_done;
        self
    }

    #[must_use]
    pub fn with_capacities(mut self, capacities: Vec<RawCapacity>) -> Self {
        self.capacities = capacities;
        self
    }

    #[must_use]
    pub fn with_max_capacity(mut self, max_capacity: f64) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Validated calendar window spanned by these inputs.
    pub fn window(&self) -> GanttResult<TimelineWindow> {
        TimelineWindow::new(self.start_date, self.end_date)
    }
}

/// Raw stage-like record (milestone, cycle, sequence, or stage).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawStage {
    pub id: Option<String>,
    pub kind: Option<ItemKind>,
    #[serde(deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
    pub label: Option<String>,
    pub progress: Option<f64>,
    /// Ids of elements the feed nests under this stage; used to fill in a
    /// missing `parent_stage_id` on those elements.
    pub child_element_ids: Vec<String>,
}

/// Raw element-like record (activity, deliverable, or task).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawElement {
    pub id: Option<String>,
    pub kind: Option<ItemKind>,
    #[serde(deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
    pub label: Option<String>,
    pub progress: Option<f64>,
    pub owner_project_id: Option<String>,
    pub parent_stage_id: Option<String>,
}

/// Raw completion mark from the done-elements feed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCompletion {
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
}

/// Raw per-date capacity figures.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCapacity {
    #[serde(deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    pub capacity_effective: Option<f64>,
    pub used_effective: Option<f64>,
    pub completed_effective: Option<f64>,
}

impl RawCapacity {
    /// Bridges fixed-point planning figures into the engine's float domain.
    ///
    /// Planning backends ship capacity as exact decimals; the engine works
    /// in `f64` throughout, so the conversion happens once at this boundary.
    pub fn from_decimal(
        date: NaiveDate,
        capacity: Decimal,
        used: Decimal,
        completed: Decimal,
    ) -> GanttResult<Self> {
        Ok(Self {
            date: Some(date),
            capacity_effective: Some(decimal_to_f64(capacity, "capacity_effective")?),
            used_effective: Some(decimal_to_f64(used, "used_effective")?),
            completed_effective: Some(decimal_to_f64(completed, "completed_effective")?),
        })
    }
}

/// Typed collections ready for grid building and packing.
#[derive(Debug, Clone)]
pub(crate) struct DerivedInputs {
    pub(crate) items: Vec<TimelineItem>,
    pub(crate) completions: Vec<CompletionRecord>,
    pub(crate) capacities: Vec<CapacityRecord>,
}

/// Shapes raw records into typed, window-clamped collections.
///
/// Skip-and-continue per record: malformed records and spans outside the
/// window are dropped with a warning count, never failing the build.
pub(crate) fn derive_inputs(inputs: &TimelineInputs, window: TimelineWindow) -> DerivedInputs {
    let parent_by_element = parent_stage_index(&inputs.stages);

    let mut items = Vec::with_capacity(inputs.stages.len() + inputs.elements.len());
    derive_stage_items(&inputs.stages, window, &mut items);
    derive_element_items(&inputs.elements, &parent_by_element, window, &mut items);

    let derived = DerivedInputs {
        items,
        completions: derive_completions(&inputs.elements_done),
        capacities: derive_capacities(&inputs.capacities),
    };
    debug!(
        item_count = derived.items.len(),
        completion_count = derived.completions.len(),
        capacity_count = derived.capacities.len(),
        "derived timeline inputs"
    );
    derived
}

/// Maps element id to owning stage id from the stages' child lists; the
/// first stage claiming an element wins.
fn parent_stage_index(stages: &[RawStage]) -> HashMap<String, String> {
    let mut parent_by_element = HashMap::new();
    for stage in stages {
        let Some(stage_id) = stage.id.as_ref() else {
            continue;
        };
        for child_id in &stage.child_element_ids {
            parent_by_element
                .entry(child_id.clone())
                .or_insert_with(|| stage_id.clone());
        }
    }
    parent_by_element
}

fn derive_stage_items(stages: &[RawStage], window: TimelineWindow, items: &mut Vec<TimelineItem>) {
    let mut malformed_count = 0_usize;
    let mut out_of_window_count = 0_usize;

    for stage in stages {
        let (Some(id), Some(kind), Some(start_date), Some(end_date)) = (
            stage.id.as_deref(),
            stage.kind,
            stage.start_date,
            stage.end_date,
        ) else {
            malformed_count += 1;
            continue;
        };
        if !kind.is_stage_like() || end_date < start_date {
            malformed_count += 1;
            continue;
        }

        let label = stage.label.clone().unwrap_or_default();
        let progress = stage.progress.unwrap_or(0.0);
        match TimelineItem::from_span(window, id, kind, start_date, end_date, label, progress) {
            Some(item) => items.push(item),
            None => out_of_window_count += 1,
        }
    }

    if malformed_count > 0 || out_of_window_count > 0 {
        warn!(
            malformed_count,
            out_of_window_count, "skipped stage records on derive"
        );
    }
}

fn derive_element_items(
    elements: &[RawElement],
    parent_by_element: &HashMap<String, String>,
    window: TimelineWindow,
    items: &mut Vec<TimelineItem>,
) {
    let mut malformed_count = 0_usize;
    let mut out_of_window_count = 0_usize;

    for element in elements {
        let (Some(id), Some(kind), Some(start_date), Some(end_date)) = (
            element.id.as_deref(),
            element.kind,
            element.start_date,
            element.end_date,
        ) else {
            malformed_count += 1;
            continue;
        };
        if !kind.is_element_like() || end_date < start_date {
            malformed_count += 1;
            continue;
        }

        let label = element.label.clone().unwrap_or_default();
        let progress = element.progress.unwrap_or(0.0);
        match TimelineItem::from_span(window, id, kind, start_date, end_date, label, progress) {
            Some(mut item) => {
                if let Some(owner) = element.owner_project_id.clone() {
                    item = item.with_owner_project(owner);
                }
                let parent = element
                    .parent_stage_id
                    .clone()
                    .or_else(|| parent_by_element.get(id).cloned());
                if let Some(parent) = parent {
                    item = item.with_parent_stage(parent);
                }
                items.push(item);
            }
            None => out_of_window_count += 1,
        }
    }

    if malformed_count > 0 || out_of_window_count > 0 {
        warn!(
            malformed_count,
            out_of_window_count, "skipped element records on derive"
        );
    }
}

fn derive_completions(records: &[RawCompletion]) -> Vec<CompletionRecord> {
    let mut malformed_count = 0_usize;
    let mut completions = Vec::with_capacity(records.len());

    for record in records {
        let (Some(id), Some(date)) = (record.id.clone(), record.date) else {
            malformed_count += 1;
            continue;
        };
        completions.push(CompletionRecord::new(id, date));
    }

    if malformed_count > 0 {
        warn!(malformed_count, "skipped completion records on derive");
    }
    completions
}

fn derive_capacities(records: &[RawCapacity]) -> Vec<CapacityRecord> {
    let mut malformed_count = 0_usize;
    let mut capacities = Vec::with_capacity(records.len());

    for record in records {
        let (Some(date), Some(capacity_effective), Some(used_effective)) =
            (record.date, record.capacity_effective, record.used_effective)
        else {
            malformed_count += 1;
            continue;
        };
        let completed_effective = record.completed_effective.unwrap_or(0.0);
        if !capacity_effective.is_finite()
            || !used_effective.is_finite()
            || !completed_effective.is_finite()
        {
            malformed_count += 1;
            continue;
        }
        capacities.push(CapacityRecord::new(
            date,
            capacity_effective,
            used_effective,
            completed_effective,
        ));
    }

    if malformed_count > 0 {
        warn!(malformed_count, "skipped capacity records on derive");
    }
    capacities
}

/// Accepts ISO `YYYY-MM-DD` strings; any other value, an unparseable
/// string or a non-string like a numeric timestamp, becomes `None` and the
/// owning record is skipped later instead of failing the parse.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.as_str().and_then(|text| text.parse::<NaiveDate>().ok())))
}
