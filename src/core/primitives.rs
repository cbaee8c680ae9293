use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{GanttError, GanttResult};

/// Converts a fixed-point planning figure into the float domain the layout
/// math works in.
pub fn decimal_to_f64(value: Decimal, field_name: &str) -> GanttResult<f64> {
    value.to_f64().ok_or_else(|| {
        GanttError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}
