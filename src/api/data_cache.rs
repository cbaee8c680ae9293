use std::hash::{DefaultHasher, Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::api::inputs::{TimelineInputs, derive_inputs};
use crate::core::day::Day;
use crate::core::day_grid::build_day_grid;
use crate::core::row_packer::{Row, pack_rows};
use crate::core::types::TimelineWindow;
use crate::error::GanttResult;

/// Runtime metrics exposed by the layout cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub builds: u64,
}

/// Shape signature of an input set.
///
/// Hashes the date bounds, the length of each collection, and the capacity
/// ceiling, not record content. Two datasets with identical shape therefore
/// share a cache hit; mutations that keep every length the same must go
/// through [`DataCache::clear`].
#[must_use]
pub fn input_signature(inputs: &TimelineInputs) -> u64 {
    let mut hasher = DefaultHasher::new();
    inputs.start_date.hash(&mut hasher);
    inputs.end_date.hash(&mut hasher);
    inputs.stages.len().hash(&mut hasher);
    inputs.elements.len().hash(&mut hasher);
    inputs.elements_done.len().hash(&mut hasher);
    inputs.capacities.len().hash(&mut hasher);
    inputs.max_capacity.to_bits().hash(&mut hasher);
    hasher.finish()
}

/// Memoized day grid and packed rows keyed by input shape.
///
/// Both layout products are built in one pass, so a hit on either accessor
/// means both are current.
#[derive(Debug, Default)]
pub struct DataCache {
    signature: Option<u64>,
    window: Option<TimelineWindow>,
    max_capacity: f64,
    days: Vec<Day>,
    rows: Vec<Row>,
    stats: DataCacheStats,
}

impl DataCache {
    /// Rebuilds the layout when the input signature changed; returns whether
    /// a rebuild happened.
    ///
    /// The only error is an inverted date window, surfaced before anything
    /// is built; the previously cached layout stays intact in that case.
    pub fn ensure_current(&mut self, inputs: &TimelineInputs) -> GanttResult<bool> {
        let signature = input_signature(inputs);
        if self.signature == Some(signature) {
            self.stats.hits = self.stats.hits.saturating_add(1);
            trace!(signature, "layout cache hit");
            return Ok(false);
        }
        self.stats.misses = self.stats.misses.saturating_add(1);

        let window = inputs.window()?;
        let derived = derive_inputs(inputs, window);
        let days = build_day_grid(window, &derived.items, &derived.completions, &derived.capacities);
        let rows = pack_rows(&derived.items);
        debug!(
            signature,
            day_count = days.len(),
            row_count = rows.len(),
            "layout cache rebuilt"
        );

        self.signature = Some(signature);
        self.window = Some(window);
        self.max_capacity = inputs.max_capacity;
        self.days = days;
        self.rows = rows;
        self.stats.builds = self.stats.builds.saturating_add(1);
        Ok(true)
    }

    #[must_use]
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Window of the last successful build, `None` before the first one.
    #[must_use]
    pub fn window(&self) -> Option<TimelineWindow> {
        self.window
    }

    /// Day count of the cached window; zero before the first build.
    #[must_use]
    pub fn total_days(&self) -> i64 {
        self.window.map_or(0, TimelineWindow::total_days)
    }

    /// Capacity ceiling carried by the last built inputs.
    #[must_use]
    pub fn max_capacity(&self) -> f64 {
        self.max_capacity
    }

    /// Drops the cached layout so the next access rebuilds; counters are
    /// kept so instrumentation sees totals across clears.
    pub fn clear(&mut self) {
        debug!("layout cache cleared");
        self.signature = None;
        self.window = None;
        self.max_capacity = 0.0;
        self.days.clear();
        self.rows.clear();
    }

    #[must_use]
    pub fn stats(&self) -> DataCacheStats {
        self.stats
    }
}
