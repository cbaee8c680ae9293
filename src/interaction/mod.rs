use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoScrollMode {
    /// Vertical auto-scroll follows the computed target row.
    Following,
    /// A manual scroll pinned the view; auto-scroll waits to catch up.
    Suspended,
}

/// Auto-scroll enablement state machine.
///
/// Starts in `Following`. A manual vertical scroll suspends it and pins the
/// offset the user chose; once the computed target passes that pin, the
/// machine re-enters `Following` and the pin is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoScrollState {
    mode: AutoScrollMode,
    user_vertical_offset: Option<f64>,
}

impl Default for AutoScrollState {
    fn default() -> Self {
        Self {
            mode: AutoScrollMode::Following,
            user_vertical_offset: None,
        }
    }
}

impl AutoScrollState {
    #[must_use]
    pub fn mode(self) -> AutoScrollMode {
        self.mode
    }

    #[must_use]
    pub fn is_following(self) -> bool {
        self.mode == AutoScrollMode::Following
    }

    /// Offset pinned by the last manual scroll, `None` while following.
    #[must_use]
    pub fn user_vertical_offset(self) -> Option<f64> {
        self.user_vertical_offset
    }

    pub fn on_manual_scroll(&mut self, vertical_offset: f64) {
        self.mode = AutoScrollMode::Suspended;
        self.user_vertical_offset = Some(vertical_offset);
    }

    pub fn on_target_caught_up(&mut self) {
        self.mode = AutoScrollMode::Following;
        self.user_vertical_offset = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
