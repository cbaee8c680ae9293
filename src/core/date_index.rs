use chrono::{Duration, NaiveDate};

use crate::error::{GanttError, GanttResult};

/// Whole-day offset of a calendar date from the timeline start date.
pub type DayIndex = i64;

/// Returns the signed whole-day offset of `date` from `start_date`.
///
/// Negative when `date` precedes the timeline start.
#[must_use]
pub fn day_index_for_date(date: NaiveDate, start_date: NaiveDate) -> DayIndex {
    (date - start_date).num_days()
}

/// Inverse of [`day_index_for_date`].
///
/// Returns `None` on calendar overflow instead of panicking.
#[must_use]
pub fn date_for_day_index(start_date: NaiveDate, index: DayIndex) -> Option<NaiveDate> {
    start_date.checked_add_signed(Duration::days(index))
}

/// Horizontal extent one day occupies: `day_width - day_margin`.
///
/// Every horizontal formula in the crate shares this step. Errors when
/// either metric is non-finite or the width does not exceed the margin.
pub fn day_step(day_width: f64, day_margin: f64) -> GanttResult<f64> {
    if !day_width.is_finite() || !day_margin.is_finite() {
        return Err(GanttError::InvalidData(
            "day width and day margin must be finite".to_owned(),
        ));
    }

    let step = day_width - day_margin;
    if step <= 0.0 {
        return Err(GanttError::InvalidData(
            "day width must exceed day margin".to_owned(),
        ));
    }

    Ok(step)
}

/// Day index at the horizontal center of the viewport.
///
/// Computes `round((scroll_offset + viewport_width / 2) / step)` and clamps
/// the result into `[0, total_days - 1]`, so any finite scroll offset maps to
/// a valid index. Out-of-range offsets clamp; invalid metrics fail fast.
pub fn center_date_index(
    scroll_offset: f64,
    viewport_width: f64,
    day_width: f64,
    day_margin: f64,
    total_days: i64,
) -> GanttResult<DayIndex> {
    let step = day_step(day_width, day_margin)?;

    if !viewport_width.is_finite() || viewport_width <= 0.0 {
        return Err(GanttError::InvalidData(
            "viewport width must be finite and > 0".to_owned(),
        ));
    }
    if total_days <= 0 {
        return Err(GanttError::InvalidData(
            "total days must be > 0".to_owned(),
        ));
    }
    if !scroll_offset.is_finite() {
        return Err(GanttError::InvalidData(
            "scroll offset must be finite".to_owned(),
        ));
    }

    let raw = ((scroll_offset + viewport_width / 2.0) / step).round() as DayIndex;
    Ok(raw.clamp(0, total_days - 1))
}

/// Scroll offset that places `index` at the viewport's left edge.
///
/// This is the jump-to mapping without the viewport-centering term; callers
/// subtract half the viewport width themselves when the day should land in
/// the middle.
pub fn scroll_offset_for_day_index(
    index: DayIndex,
    day_width: f64,
    day_margin: f64,
) -> GanttResult<f64> {
    let step = day_step(day_width, day_margin)?;
    Ok(index as f64 * step)
}
