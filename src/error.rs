use chrono::NaiveDate;
use thiserror::Error;

pub type GanttResult<T> = Result<T, GanttError>;

#[derive(Debug, Error)]
pub enum GanttError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid date range: start={start}, end={end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("timeline is empty: build days/rows before viewport or scroll queries")]
    EmptyTimeline,

    #[error("invalid data: {0}")]
    InvalidData(String),
}
