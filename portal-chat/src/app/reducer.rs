//! Pure reducer function for state transitions
//!
//! `(State, Action) -> State`, with no I/O and no service calls.

use super::actions::Action;
use super::state::{AppState, StatusBarState};

pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        Action::Quit => AppState {
            should_quit: true,
            typing: false,
            ..state
        },

        Action::InputClosed => AppState {
            input_closed: true,
            ..state
        },

        Action::FormError(error) => AppState {
            form_error: Some(error),
            ..state
        },

        Action::SetStatus(message) => AppState {
            status: StatusBarState {
                message: Some(message),
            },
            ..state
        },

        Action::ClearFeedback => AppState {
            form_error: None,
            status: StatusBarState::default(),
            ..state
        },

        Action::TypingChanged(typing) => AppState { typing, ..state },

        Action::EventDeleted(event) => AppState {
            status: StatusBarState {
                message: Some(format!("Event \"{}\" deleted (/undo to restore)", event.title)),
            },
            undo: Some(event),
            ..state
        },

        Action::EventRestored => {
            let message = state
                .undo
                .as_ref()
                .map(|event| format!("Event \"{}\" restored", event.title));
            AppState {
                status: StatusBarState { message },
                undo: None,
                ..state
            }
        }

        Action::UnreadNotifications(unread_notifications) => AppState {
            unread_notifications,
            ..state
        },
    }
}
