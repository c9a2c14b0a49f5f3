use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Mutually exclusive top-level UI modes. Compose and Search can never be
/// open at the same time; entering one forcibly exits the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    List,
    Compose,
    Search,
}

/// Current view mode. Not persisted: every launch starts at the list.
pub struct ViewState {
    mode: Mutex<ViewMode>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            mode: Mutex::new(ViewMode::List),
        }
    }

    pub fn mode(&self) -> ViewMode {
        *self.mode.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Switch modes, returning `(previous, current)` so the caller can run
    /// the teardown that leaving a mode requires (draft discard, recorder
    /// stop, search-result clear).
    pub fn enter(&self, target: ViewMode) -> (ViewMode, ViewMode) {
        let mut mode = self.mode.lock().unwrap_or_else(|e| e.into_inner());
        let previous = *mode;
        *mode = target;
        (previous, target)
    }

    /// Toggle behavior of the nav buttons: pressing the active mode's
    /// button returns to the list.
    pub fn toggle(&self, target: ViewMode) -> (ViewMode, ViewMode) {
        let mut mode = self.mode.lock().unwrap_or_else(|e| e.into_inner());
        let previous = *mode;
        *mode = if previous == target {
            ViewMode::List
        } else {
            target
        };
        (previous, *mode)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
