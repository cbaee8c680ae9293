use serde::{Deserialize, Serialize};

use crate::error::{GanttError, GanttResult};

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load timeline
/// setup without inventing their own ad-hoc format. Values normally arrive
/// pre-clamped from the host's settings layer; [`validate`] re-checks the
/// documented ranges once at engine construction.
///
/// [`validate`]: TimelineEngineConfig::validate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    /// Width of one day column in pixels, including its margin.
    #[serde(default = "default_day_width")]
    pub day_width: f64,
    /// Horizontal margin folded into each day column, in pixels.
    #[serde(default = "default_day_margin")]
    pub day_margin: f64,
    /// Height of one packed row in pixels, excluding margins.
    #[serde(default = "default_row_height")]
    pub row_height: f64,
    /// Vertical margin applied above and below each row, in pixels.
    #[serde(default = "default_row_margin")]
    pub row_margin: f64,
    /// Extra days selected on both sides of the visible span for pre-render.
    #[serde(default = "default_buffer_days")]
    pub buffer_days: i64,
    /// Height of the capacity bar lane in pixels.
    #[serde(default = "default_bar_height")]
    pub bar_height: f64,
    /// Duration the host's scroll animations should use, in milliseconds.
    #[serde(default = "default_animation_duration_ms")]
    pub animation_duration_ms: u64,
}

impl Default for TimelineEngineConfig {
    fn default() -> Self {
        Self {
            day_width: default_day_width(),
            day_margin: default_day_margin(),
            row_height: default_row_height(),
            row_margin: default_row_margin(),
            buffer_days: default_buffer_days(),
            bar_height: default_bar_height(),
            animation_duration_ms: default_animation_duration_ms(),
        }
    }
}

impl TimelineEngineConfig {
    /// Sets the day column width in pixels.
    #[must_use]
    pub fn with_day_width(mut self, day_width: f64) -> Self {
        self.day_width = day_width;
        self
    }

    /// Sets the per-day horizontal margin in pixels.
    #[must_use]
    pub fn with_day_margin(mut self, day_margin: f64) -> Self {
        self.day_margin = day_margin;
        self
    }

    /// Sets the row height in pixels.
    #[must_use]
    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    /// Sets the per-row vertical margin in pixels.
    #[must_use]
    pub fn with_row_margin(mut self, row_margin: f64) -> Self {
        self.row_margin = row_margin;
        self
    }

    /// Sets the pre-render buffer in days (also used for buffer rows).
    #[must_use]
    pub fn with_buffer_days(mut self, buffer_days: i64) -> Self {
        self.buffer_days = buffer_days;
        self
    }

    /// Sets the capacity bar lane height in pixels.
    #[must_use]
    pub fn with_bar_height(mut self, bar_height: f64) -> Self {
        self.bar_height = bar_height;
        self
    }

    /// Sets the scroll animation duration in milliseconds.
    #[must_use]
    pub fn with_animation_duration_ms(mut self, animation_duration_ms: u64) -> Self {
        self.animation_duration_ms = animation_duration_ms;
        self
    }

    /// Checks every field against its documented range.
    ///
    /// `day_width` must also strictly exceed `day_margin`; the two together
    /// define the horizontal day step every formula divides by.
    pub fn validate(self) -> GanttResult<Self> {
        for (value, name, min, max) in [
            (self.day_width, "day_width", 20.0, 100.0),
            (self.day_margin, "day_margin", 0.0, 20.0),
            (self.row_height, "row_height", 20.0, 60.0),
            (self.row_margin, "row_margin", 0.0, 10.0),
            (self.bar_height, "bar_height", 40.0, 150.0),
        ] {
            if !value.is_finite() || value < min || value > max {
                return Err(GanttError::InvalidData(format!(
                    "config `{name}` must lie in [{min}, {max}]"
                )));
            }
        }
        if !(1..=20).contains(&self.buffer_days) {
            return Err(GanttError::InvalidData(
                "config `buffer_days` must lie in [1, 20]".to_owned(),
            ));
        }
        if self.day_width <= self.day_margin {
            return Err(GanttError::InvalidData(
                "config `day_width` must exceed `day_margin`".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> GanttResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| GanttError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> GanttResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| GanttError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_day_width() -> f64 {
    65.0
}

fn default_day_margin() -> f64 {
    5.0
}

fn default_row_height() -> f64 {
    40.0
}

fn default_row_margin() -> f64 {
    4.0
}

fn default_buffer_days() -> i64 {
    5
}

fn default_bar_height() -> f64 {
    100.0
}

fn default_animation_duration_ms() -> u64 {
    300
}
