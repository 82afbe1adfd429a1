//! Client state
//!
//! Plain data; all transitions go through the reducer (see `reducer.rs`).

use libportal::types::CalendarEvent;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub should_quit: bool,

    /// No more input will arrive
    pub input_closed: bool,

    /// Inline error for the last rejected form
    pub form_error: Option<String>,

    pub status: StatusBarState,

    /// Typing indicator for the active contact
    pub typing: bool,

    /// Last deleted calendar event, restorable once
    pub undo: Option<CalendarEvent>,

    pub unread_notifications: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusBarState {
    pub message: Option<String>,
}

impl AppState {
    pub fn new(unread_notifications: usize) -> Self {
        Self {
            unread_notifications,
            ..Self::default()
        }
    }

    /// Anything to show the user before the next prompt
    pub fn has_feedback(&self) -> bool {
        self.form_error.is_some() || self.status.message.is_some()
    }
}
