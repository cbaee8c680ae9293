pub mod date_index;
pub mod day;
pub mod day_grid;
pub mod item;
pub mod primitives;
pub mod row_packer;
pub mod scroll;
pub mod types;
pub mod viewport_select;

pub use date_index::{
    DayIndex, center_date_index, date_for_day_index, day_index_for_date, day_step,
    scroll_offset_for_day_index,
};
pub use day::{CapacityRecord, CompletionRecord, Day};
pub use day_grid::build_day_grid;
pub use item::{ItemKind, TimelineItem};
pub use row_packer::{Row, pack_rows};
pub use scroll::{
    AUTO_SCROLL_LOOKAHEAD_DAYS, ScrollState, calculate_target_vertical_offset, row_step,
    should_enable_auto_scroll,
};
pub use types::{AlertLevel, TimelineWindow, Viewport, VisibleRange};
pub use viewport_select::{visible_day_count, visible_day_range, visible_row_range};
