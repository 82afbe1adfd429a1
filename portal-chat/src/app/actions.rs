//! Actions for the reducer pattern
//!
//! Every state transition is triggered by an action. Service calls happen
//! outside the reducer; their outcomes come back in as actions.

use libportal::types::CalendarEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Stop reading input and tear the session down
    Quit,

    /// Input reached EOF; finish pending replies, then exit
    InputClosed,

    // === Forms ===
    /// A form was rejected; shown inline, nothing was changed
    FormError(String),

    // === Status line ===
    SetStatus(String),

    /// Feedback was shown; drop it
    ClearFeedback,

    // === Messaging ===
    /// The active contact started or stopped "typing"
    TypingChanged(bool),

    // === Calendar ===
    /// An event was deleted and can be restored with undo
    EventDeleted(CalendarEvent),

    /// The undo slot was used
    EventRestored,

    // === Notifications ===
    UnreadNotifications(usize),
}
