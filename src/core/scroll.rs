use serde::{Deserialize, Serialize};

use crate::core::date_index::DayIndex;
use crate::core::row_packer::Row;
use crate::error::{GanttError, GanttResult};

/// How many days ahead of the viewport center the auto-scroll target row is
/// searched for, in the direction of travel.
pub const AUTO_SCROLL_LOOKAHEAD_DAYS: i64 = 4;

/// Per-frame scroll derivation handed to the host's animation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    /// Day index currently at the horizontal center of the viewport.
    pub center_date_index: DayIndex,
    /// Vertical offset of the row the view should glide to, `None` when no
    /// row is active near the center.
    pub target_vertical_offset: Option<f64>,
    /// Gate result: whether vertical auto-scroll may move the view now.
    pub enable_auto_scroll: bool,
    /// Direction hint derived from the previous horizontal offset.
    pub scrolling_left: bool,
}

/// Vertical extent one row occupies: `row_height + 2 * row_margin`.
///
/// Errors when the metrics are non-finite, the height is not positive, or
/// the margin is negative.
pub fn row_step(row_height: f64, row_margin: f64) -> GanttResult<f64> {
    if !row_height.is_finite() || !row_margin.is_finite() {
        return Err(GanttError::InvalidData(
            "row height and row margin must be finite".to_owned(),
        ));
    }
    if row_height <= 0.0 || row_margin < 0.0 {
        return Err(GanttError::InvalidData(
            "row height must be > 0 and row margin >= 0".to_owned(),
        ));
    }
    Ok(row_height + 2.0 * row_margin)
}

/// Vertical offset of the row auto-scroll should glide to.
///
/// Looks [`AUTO_SCROLL_LOOKAHEAD_DAYS`] ahead of `center_date_index` in the
/// direction of travel and picks the row whose span covers that day. When
/// several rows qualify, scrolling left picks the topmost and scrolling
/// right the bottommost. `Ok(None)` means no row is active there and the
/// view stays put.
pub fn calculate_target_vertical_offset(
    center_date_index: DayIndex,
    rows: &[Row],
    row_height: f64,
    row_margin: f64,
    scrolling_left: bool,
) -> GanttResult<Option<f64>> {
    let step = row_step(row_height, row_margin)?;

    let search_index = if scrolling_left {
        center_date_index + AUTO_SCROLL_LOOKAHEAD_DAYS
    } else {
        center_date_index - AUTO_SCROLL_LOOKAHEAD_DAYS
    };

    let row_index = if scrolling_left {
        rows.iter().position(|row| row.spans_day(search_index))
    } else {
        rows.iter().rposition(|row| row.spans_day(search_index))
    };

    Ok(row_index.map(|index| index as f64 * step))
}

/// Gate deciding whether vertical auto-scroll may move the view.
///
/// No target row disables it outright. Without a pinned user offset the
/// target wins; with one, auto-scroll stays off until the target lies
/// strictly past the user's position. The view catches up, it never snaps
/// backward.
#[must_use]
pub fn should_enable_auto_scroll(
    user_vertical_offset: Option<f64>,
    target_vertical_offset: Option<f64>,
) -> bool {
    match (user_vertical_offset, target_vertical_offset) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(user), Some(target)) => user < target,
    }
}
