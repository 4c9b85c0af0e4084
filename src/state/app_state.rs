//! Application state definitions

use super::forms::{AlertsForm, ChannelKind};
use super::payload::SubmissionState;
use super::route::View;
use chrono::{DateTime, Local};

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Channel listing
    pub selected_index: usize,

    // Form state, present only while a form view is mounted
    pub form: Option<AlertsForm>,

    // Last observed submission state
    pub submission: SubmissionState,
    pub last_saved_at: Option<DateTime<Local>>,

    // UI state
    pub status_message: Option<String>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Channel highlighted on the listing screen
    pub fn selected_channel(&self) -> Option<ChannelKind> {
        ChannelKind::CONFIGURABLE.get(self.selected_index).cloned()
    }

    /// Whether the Save button should render as loading
    pub fn is_saving(&self) -> bool {
        self.submission.loading
    }

    /// Drop the form, discarding all field values and error flags
    pub fn clear_form(&mut self) {
        self.form = None;
    }
}
