use crate::core::date_index::{DayIndex, day_step};
use crate::core::scroll::row_step;
use crate::core::types::VisibleRange;
use crate::error::{GanttError, GanttResult};

/// Number of whole days needed to cover `viewport_width` pixels.
///
/// `ceil(viewport_width / step)`; a partially visible day at either edge
/// counts as visible, so the result is always at least 1.
pub fn visible_day_count(
    viewport_width: f64,
    day_width: f64,
    day_margin: f64,
) -> GanttResult<i64> {
    let step = day_step(day_width, day_margin)?;
    if !viewport_width.is_finite() || viewport_width <= 0.0 {
        return Err(GanttError::InvalidData(
            "viewport width must be finite and > 0".to_owned(),
        ));
    }
    Ok((viewport_width / step).ceil() as i64)
}

/// Day indices worth rendering for the current scroll position.
///
/// Centers the visible span on `center_date_index`, widens it by
/// `buffer_days` on both sides for pre-render, and clamps both ends into
/// `[0, total_days - 1]`. Before clamping the range always spans
/// `visible + 2 * buffer_days` days.
pub fn visible_day_range(
    center_date_index: DayIndex,
    viewport_width: f64,
    day_width: f64,
    day_margin: f64,
    buffer_days: i64,
    total_days: i64,
) -> GanttResult<VisibleRange> {
    let visible = visible_day_count(viewport_width, day_width, day_margin)?;
    if total_days <= 0 {
        return Err(GanttError::InvalidData(
            "total days must be > 0".to_owned(),
        ));
    }
    if buffer_days < 0 {
        return Err(GanttError::InvalidData(
            "buffer days must be >= 0".to_owned(),
        ));
    }

    let start_unclamped = center_date_index - visible / 2 - buffer_days;
    let end_unclamped = start_unclamped + visible + 2 * buffer_days - 1;

    let start = start_unclamped.clamp(0, total_days - 1);
    let end = end_unclamped.clamp(0, total_days - 1);
    Ok(VisibleRange::new(start, end))
}

/// Row indices worth rendering for the current vertical offset.
///
/// Same clamp-with-buffer selection one dimension down: first row by
/// `floor(offset / row_step)`, last by ceiling over the viewport height,
/// widened by `buffer_rows` and clamped into `[0, total_rows - 1]`.
/// Negative offsets clamp to the top.
pub fn visible_row_range(
    vertical_offset: f64,
    viewport_height: f64,
    row_height: f64,
    row_margin: f64,
    buffer_rows: i64,
    total_rows: i64,
) -> GanttResult<VisibleRange> {
    let step = row_step(row_height, row_margin)?;
    if !viewport_height.is_finite() || viewport_height <= 0.0 {
        return Err(GanttError::InvalidData(
            "viewport height must be finite and > 0".to_owned(),
        ));
    }
    if total_rows <= 0 {
        return Err(GanttError::InvalidData(
            "total rows must be > 0".to_owned(),
        ));
    }
    if buffer_rows < 0 {
        return Err(GanttError::InvalidData(
            "buffer rows must be >= 0".to_owned(),
        ));
    }
    if !vertical_offset.is_finite() {
        return Err(GanttError::InvalidData(
            "vertical offset must be finite".to_owned(),
        ));
    }

    let first = (vertical_offset.max(0.0) / step).floor() as i64;
    let last = first + (viewport_height / step).ceil() as i64;

    let start = (first - buffer_rows).clamp(0, total_rows - 1);
    let end = (last + buffer_rows).clamp(0, total_rows - 1);
    Ok(VisibleRange::new(start, end))
}
