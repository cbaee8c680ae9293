use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::date_index::DayIndex;
use crate::error::{GanttError, GanttResult};

/// Pixel dimensions of the widget area the host hands to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Inclusive calendar extent `[start_date, end_date]` of one timeline.
///
/// Constructed through [`TimelineWindow::new`], which rejects inverted
/// bounds, so holders never re-check the ordering. Deserialization routes
/// through the same check and fails on inverted bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct TimelineWindow {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

/// Unvalidated field mirror used as the serde entry point for
/// [`TimelineWindow`].
#[derive(Deserialize)]
struct WindowBounds {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TryFrom<WindowBounds> for TimelineWindow {
    type Error = GanttError;

    fn try_from(bounds: WindowBounds) -> GanttResult<Self> {
        Self::new(bounds.start_date, bounds.end_date)
    }
}

impl TimelineWindow {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> GanttResult<Self> {
        if end_date < start_date {
            return Err(GanttError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    #[must_use]
    pub fn start_date(self) -> NaiveDate {
        self.start_date
    }

    #[must_use]
    pub fn end_date(self) -> NaiveDate {
        self.end_date
    }

    /// Inclusive day count; a single-date window has one day.
    #[must_use]
    pub fn total_days(self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    #[must_use]
    pub fn contains_date(self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Three-tier classification of a day's capacity utilization.
///
/// Ordering follows severity: `Over > Warning > Normal`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum AlertLevel {
    #[default]
    Normal,
    Warning,
    Over,
}

impl AlertLevel {
    /// Classifies `used / capacity`: above 1.0 is `Over`, above 0.8 is
    /// `Warning`. A day without a positive finite capacity never alerts.
    #[must_use]
    pub fn from_utilization(used_effective: f64, capacity_effective: f64) -> Self {
        if !capacity_effective.is_finite() || capacity_effective <= 0.0 {
            return Self::Normal;
        }

        let ratio = used_effective / capacity_effective;
        if ratio > 1.0 {
            Self::Over
        } else if ratio > 0.8 {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

/// Inclusive index interval selected for rendering.
///
/// Selection keeps `start <= end` with both ends inside the grid, so a
/// produced range is never empty; absence is signalled out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisibleRange {
    start: DayIndex,
    end: DayIndex,
}

impl VisibleRange {
    #[must_use]
    pub fn new(start: DayIndex, end: DayIndex) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn start(self) -> DayIndex {
        self.start
    }

    #[must_use]
    pub fn end(self) -> DayIndex {
        self.end
    }

    #[must_use]
    pub fn len(self) -> i64 {
        self.end - self.start + 1
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.end < self.start
    }

    #[must_use]
    pub fn contains(self, index: DayIndex) -> bool {
        self.start <= index && index <= self.end
    }

    /// True when the two inclusive ranges share at least one index.
    #[must_use]
    pub fn overlaps(self, other: VisibleRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Intersection with a `len`-element slice as inclusive bounds, or
    /// `None` when the range misses the slice entirely.
    #[must_use]
    pub fn slice_bounds(self, len: usize) -> Option<(usize, usize)> {
        if len == 0 || self.end < 0 {
            return None;
        }
        let start = usize::try_from(self.start.max(0)).ok()?;
        if start >= len {
            return None;
        }
        let end = usize::try_from(self.end).unwrap_or(usize::MAX).min(len - 1);
        if end < start {
            return None;
        }
        Some((start, end))
    }
}
