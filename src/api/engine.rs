use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::date_index::{self, DayIndex};
use crate::core::day::Day;
use crate::core::row_packer::Row;
use crate::core::scroll::{ScrollState, calculate_target_vertical_offset, should_enable_auto_scroll};
use crate::core::types::{Viewport, VisibleRange};
use crate::core::viewport_select;
use crate::error::{GanttError, GanttResult};
use crate::extensions::{TimelineContext, TimelineEvent, TimelineObserver};
use crate::interaction::AutoScrollState;

use super::{DataCache, DataCacheStats, TimelineEngineConfig, TimelineInputs};

/// Main orchestration facade consumed by host widgets.
///
/// `TimelineEngine` owns the layout cache and the auto-scroll state and
/// wires the pure layout routines together; rendering, animation, and data
/// loading stay in the host. Single-threaded by design: hosts drive it from
/// their UI thread and it hands back plain values.
pub struct TimelineEngine {
    config: TimelineEngineConfig,
    cache: DataCache,
    auto_scroll: AutoScrollState,
    observers: Vec<Box<dyn TimelineObserver>>,
}

/// Serializable diagnostics snapshot of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub config: TimelineEngineConfig,
    pub total_days: i64,
    pub day_count: usize,
    pub row_count: usize,
    pub auto_scroll_enabled: bool,
    pub cache: DataCacheStats,
}

impl TimelineEngine {
    pub fn new(config: TimelineEngineConfig) -> GanttResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            config,
            cache: DataCache::default(),
            auto_scroll: AutoScrollState::default(),
            observers: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> TimelineEngineConfig {
        self.config
    }

    /// Replaces the geometry configuration after validating it.
    ///
    /// The cached layout stores grid indices, not pixels, so it stays valid
    /// across geometry changes.
    pub fn set_config(&mut self, config: TimelineEngineConfig) -> GanttResult<()> {
        self.config = config.validate()?;
        Ok(())
    }

    /// Day grid for `inputs`, rebuilding only when the input shape changed.
    pub fn days(&mut self, inputs: &TimelineInputs) -> GanttResult<&[Day]> {
        self.ensure_layout(inputs)?;
        Ok(self.cache.days())
    }

    /// Packed rows for `inputs`, rebuilding only when the input shape
    /// changed. Days and rows are built together, so interleaving the two
    /// accessors never causes extra rebuilds.
    pub fn rows(&mut self, inputs: &TimelineInputs) -> GanttResult<&[Row]> {
        self.ensure_layout(inputs)?;
        Ok(self.cache.rows())
    }

    fn ensure_layout(&mut self, inputs: &TimelineInputs) -> GanttResult<()> {
        if self.cache.ensure_current(inputs)? {
            self.emit(TimelineEvent::LayoutRebuilt {
                day_count: self.cache.days().len(),
                row_count: self.cache.rows().len(),
            });
        }
        Ok(())
    }

    /// Day index at the horizontal center of the viewport.
    pub fn center_date_index(
        &self,
        scroll_offset: f64,
        viewport: Viewport,
    ) -> GanttResult<DayIndex> {
        let total_days = self.built_total_days()?;
        Self::check_viewport(viewport)?;
        date_index::center_date_index(
            scroll_offset,
            f64::from(viewport.width),
            self.config.day_width,
            self.config.day_margin,
            total_days,
        )
    }

    /// Buffered day indices worth rendering at this scroll position.
    pub fn visible_day_range(
        &self,
        scroll_offset: f64,
        viewport: Viewport,
    ) -> GanttResult<VisibleRange> {
        let total_days = self.built_total_days()?;
        Self::check_viewport(viewport)?;
        let center = date_index::center_date_index(
            scroll_offset,
            f64::from(viewport.width),
            self.config.day_width,
            self.config.day_margin,
            total_days,
        )?;
        viewport_select::visible_day_range(
            center,
            f64::from(viewport.width),
            self.config.day_width,
            self.config.day_margin,
            self.config.buffer_days,
            total_days,
        )
    }

    /// Buffered row indices worth rendering at this vertical offset.
    pub fn visible_row_range(
        &self,
        vertical_offset: f64,
        viewport: Viewport,
    ) -> GanttResult<VisibleRange> {
        Self::check_viewport(viewport)?;
        let total_rows = self.cache.rows().len();
        if total_rows == 0 {
            return Err(GanttError::EmptyTimeline);
        }
        viewport_select::visible_row_range(
            vertical_offset,
            f64::from(viewport.height),
            self.config.row_height,
            self.config.row_margin,
            self.config.buffer_days,
            total_rows as i64,
        )
    }

    /// Cached day slice for a computed range; a range that misses the grid
    /// yields an empty slice instead of panicking.
    #[must_use]
    pub fn visible_days(&self, range: VisibleRange) -> &[Day] {
        match range.slice_bounds(self.cache.days().len()) {
            Some((start, end)) => &self.cache.days()[start..=end],
            None => &[],
        }
    }

    /// Cached row slice for a computed range.
    #[must_use]
    pub fn visible_rows(&self, range: VisibleRange) -> &[Row] {
        match range.slice_bounds(self.cache.rows().len()) {
            Some((start, end)) => &self.cache.rows()[start..=end],
            None => &[],
        }
    }

    /// Derives the per-frame scroll state for the host's animation layer.
    ///
    /// `previous_scroll_offset` is the horizontal offset of the preceding
    /// frame; the comparison yields the direction hint. Re-enables
    /// auto-scroll (with an [`TimelineEvent::AutoScrollChanged`] emission)
    /// when the computed target catches up with a pinned manual offset.
    pub fn scroll_state(
        &mut self,
        scroll_offset: f64,
        previous_scroll_offset: f64,
        viewport: Viewport,
    ) -> GanttResult<ScrollState> {
        let total_days = self.built_total_days()?;
        Self::check_viewport(viewport)?;

        let scrolling_left = scroll_offset < previous_scroll_offset;
        let center = date_index::center_date_index(
            scroll_offset,
            f64::from(viewport.width),
            self.config.day_width,
            self.config.day_margin,
            total_days,
        )?;
        let target = calculate_target_vertical_offset(
            center,
            self.cache.rows(),
            self.config.row_height,
            self.config.row_margin,
            scrolling_left,
        )?;
        let enable = should_enable_auto_scroll(self.auto_scroll.user_vertical_offset(), target);

        if enable && !self.auto_scroll.is_following() {
            self.auto_scroll.on_target_caught_up();
            self.emit(TimelineEvent::AutoScrollChanged { enabled: true });
        }

        trace!(
            center_date_index = center,
            target_vertical_offset = ?target,
            enable_auto_scroll = enable,
            scrolling_left,
            "derived scroll state"
        );
        Ok(ScrollState {
            center_date_index: center,
            target_vertical_offset: target,
            enable_auto_scroll: enable,
            scrolling_left,
        })
    }

    /// Records a manual vertical scroll, suspending auto-scroll until the
    /// target catches up with the offset the user chose.
    pub fn on_manual_vertical_scroll(&mut self, vertical_offset: f64) {
        let was_following = self.auto_scroll.is_following();
        self.auto_scroll.on_manual_scroll(vertical_offset);
        if was_following {
            self.emit(TimelineEvent::AutoScrollChanged { enabled: false });
        }
    }

    #[must_use]
    pub fn auto_scroll_enabled(&self) -> bool {
        self.auto_scroll.is_following()
    }

    #[must_use]
    pub fn auto_scroll_state(&self) -> AutoScrollState {
        self.auto_scroll
    }

    /// Scroll offset that puts `index` at the viewport's left edge.
    pub fn scroll_offset_for_date_index(&self, index: DayIndex) -> GanttResult<f64> {
        date_index::scroll_offset_for_day_index(
            index,
            self.config.day_width,
            self.config.day_margin,
        )
    }

    /// Jump-to-date mapping; dates outside the built window clamp to its
    /// nearest edge.
    pub fn scroll_offset_for_date(&self, date: NaiveDate) -> GanttResult<f64> {
        let window = self.cache.window().ok_or(GanttError::EmptyTimeline)?;
        let index = date_index::day_index_for_date(date, window.start_date())
            .clamp(0, window.total_days() - 1);
        self.scroll_offset_for_date_index(index)
    }

    /// Drops the cached layout; the next `days`/`rows` call rebuilds even
    /// for an identical input shape.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.emit(TimelineEvent::CacheCleared);
    }

    #[must_use]
    pub fn cache_stats(&self) -> DataCacheStats {
        self.cache.stats()
    }

    /// Vertical ceiling for capacity bars: the configured `max_capacity`
    /// when positive, otherwise the tallest built day. `None` before the
    /// first build or when the grid is empty.
    #[must_use]
    pub fn capacity_axis_max(&self) -> Option<f64> {
        self.cache.window()?;
        let configured = self.cache.max_capacity();
        if configured > 0.0 {
            return Some(configured);
        }
        self.cache
            .days()
            .iter()
            .map(|day| OrderedFloat(day.capacity_effective.max(day.used_effective)))
            .max()
            .map(OrderedFloat::into_inner)
    }

    pub fn add_observer(&mut self, observer: Box<dyn TimelineObserver>) {
        self.observers.push(observer);
    }

    /// Removes the observer with `id`; returns whether one was registered.
    pub fn remove_observer(&mut self, id: &str) -> bool {
        let before = self.observers.len();
        self.observers.retain(|observer| observer.id() != id);
        self.observers.len() != before
    }

    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            config: self.config,
            total_days: self.cache.total_days(),
            day_count: self.cache.days().len(),
            row_count: self.cache.rows().len(),
            auto_scroll_enabled: self.auto_scroll.is_following(),
            cache: self.cache.stats(),
        }
    }

    /// Serializes the snapshot to pretty JSON for debug dumps.
    pub fn snapshot_json_pretty(&self) -> GanttResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| GanttError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    fn context(&self) -> TimelineContext {
        TimelineContext {
            total_days: self.cache.total_days(),
            day_count: self.cache.days().len(),
            row_count: self.cache.rows().len(),
            auto_scroll_mode: self.auto_scroll.mode(),
            cache: self.cache.stats(),
        }
    }

    fn emit(&mut self, event: TimelineEvent) {
        let context = self.context();
        for observer in &mut self.observers {
            observer.on_event(event, context);
        }
    }

    fn built_total_days(&self) -> GanttResult<i64> {
        let total_days = self.cache.total_days();
        if total_days == 0 {
            return Err(GanttError::EmptyTimeline);
        }
        Ok(total_days)
    }

    fn check_viewport(viewport: Viewport) -> GanttResult<()> {
        if !viewport.is_valid() {
            return Err(GanttError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(())
    }
}
