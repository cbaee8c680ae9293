use serde::{Deserialize, Serialize};

use crate::api::DataCacheStats;
use crate::interaction::AutoScrollMode;

/// Read-only engine snapshot passed alongside every observer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineContext {
    pub total_days: i64,
    pub day_count: usize,
    pub row_count: usize,
    pub auto_scroll_mode: AutoScrollMode,
    pub cache: DataCacheStats,
}

/// Event stream exposed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineEvent {
    LayoutRebuilt { day_count: usize, row_count: usize },
    CacheCleared,
    AutoScrollChanged { enabled: bool },
}

/// Extension hook interface for bounded host logic.
///
/// Observers see engine events and a read-only context; they cannot mutate
/// layout state directly.
pub trait TimelineObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: TimelineEvent, context: TimelineContext);
}
