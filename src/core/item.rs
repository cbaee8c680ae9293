use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::date_index::{DayIndex, day_index_for_date};
use crate::core::types::TimelineWindow;

/// Schedulable span categories.
///
/// The first four kinds are stage-like: they occupy structural lanes and
/// steer where element-like kinds are packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    Milestone,
    Cycle,
    Sequence,
    Stage,
    ElementActivity,
    ElementDeliverable,
    ElementTask,
}

impl ItemKind {
    #[must_use]
    pub fn is_stage_like(self) -> bool {
        matches!(
            self,
            Self::Milestone | Self::Cycle | Self::Sequence | Self::Stage
        )
    }

    #[must_use]
    pub fn is_element_like(self) -> bool {
        !self.is_stage_like()
    }

    /// Sort rank used to break packing ties: stage-like kinds go first.
    #[must_use]
    pub(crate) fn packing_rank(self) -> u8 {
        match self {
            Self::Milestone => 0,
            Self::Cycle => 1,
            Self::Sequence => 2,
            Self::Stage => 3,
            Self::ElementActivity => 4,
            Self::ElementDeliverable => 5,
            Self::ElementTask => 6,
        }
    }
}

/// One schedulable span, with grid indices already clamped into the
/// timeline window.
///
/// `start_date`/`end_date` keep the span's real calendar extent;
/// `start_index`/`end_index` are the inclusive grid positions after
/// clamping and are what packing and scrolling work with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: String,
    pub kind: ItemKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_index: DayIndex,
    pub end_index: DayIndex,
    pub label: String,
    pub progress_percent: f64,
    pub owner_project_id: Option<String>,
    pub parent_stage_id: Option<String>,
}

impl TimelineItem {
    /// Derives the window-clamped item for a parsed span.
    ///
    /// Returns `None` when the span is inverted or lies entirely outside
    /// the window; both count as data-quality drops, not errors. Progress
    /// is clamped into `[0, 100]` and non-finite values fall back to zero.
    #[must_use]
    pub fn from_span(
        window: TimelineWindow,
        id: impl Into<String>,
        kind: ItemKind,
        start_date: NaiveDate,
        end_date: NaiveDate,
        label: impl Into<String>,
        progress_percent: f64,
    ) -> Option<Self> {
        if end_date < start_date {
            return None;
        }

        let last_index = window.total_days() - 1;
        let raw_start = day_index_for_date(start_date, window.start_date());
        let raw_end = day_index_for_date(end_date, window.start_date());
        if raw_end < 0 || raw_start > last_index {
            return None;
        }

        let progress = if progress_percent.is_finite() {
            progress_percent.clamp(0.0, 100.0)
        } else {
            0.0
        };

        Some(Self {
            id: id.into(),
            kind,
            start_date,
            end_date,
            start_index: raw_start.clamp(0, last_index),
            end_index: raw_end.clamp(0, last_index),
            label: label.into(),
            progress_percent: progress,
            owner_project_id: None,
            parent_stage_id: None,
        })
    }

    #[must_use]
    pub fn with_owner_project(mut self, owner_project_id: impl Into<String>) -> Self {
        self.owner_project_id = Some(owner_project_id.into());
        self
    }

    #[must_use]
    pub fn with_parent_stage(mut self, parent_stage_id: impl Into<String>) -> Self {
        self.parent_stage_id = Some(parent_stage_id.into());
        self
    }

    /// An item counts as complete once its progress reaches 100 percent.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress_percent >= 100.0
    }

    /// True when the inclusive clamped span covers `index`.
    #[must_use]
    pub fn span_contains(&self, index: DayIndex) -> bool {
        self.start_index <= index && index <= self.end_index
    }

    /// Inclusive number of grid days the clamped span covers.
    #[must_use]
    pub fn span_days(&self) -> i64 {
        self.end_index - self.start_index + 1
    }
}
