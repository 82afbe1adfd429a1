//! Plain-text rendering of portal data
//!
//! Every function returns lines; the caller decides where they go.

use libportal::messaging::ConversationStore;
use libportal::types::{CalendarEvent, Notification, Resource};
use libportal::{Contact, Message};

use crate::app::AppState;

pub const HELP: &str = "\
Commands:
  /contacts                              list conversations
  /add NAME [| ROLE]                     start a conversation
  /select ID                             switch conversation
  /thread                                show the active conversation
  /events YYYY-MM-DD                     events on a day
  /book TEACHER | DATE | TIME | REASON   book an appointment
  /unbook ID                             delete an event
  /undo                                  restore the last deleted event
  /notifications [all|unread|KIND]       list notifications
  /read ID   /read-all   /dismiss ID     manage notifications
  /resources [QUERY] [--kind KIND]       search resources
  /feedback [--anonymous] SUBJECT | MESSAGE [| TYPE]
                                         send feedback (general, suggestion, issue, teacher)
  /password CURRENT | NEW | CONFIRM      change your password
  /quit                                  leave (pending replies are dropped)
Anything else is sent to the active contact.";

pub fn message(message: &Message) -> String {
    format!("[{}] {}: {}", message.time, message.sender, message.content)
}

fn contact_line(contact: &Contact, active: bool) -> String {
    format!(
        "{} [{}] {} ({}) - {} | {} | {}{}",
        if active { "*" } else { " " },
        contact.id,
        contact.name,
        contact.initials,
        contact.role,
        contact.last_message,
        contact.time,
        if contact.unread { " (unread)" } else { "" },
    )
}

pub fn contacts(store: &ConversationStore) -> Vec<String> {
    store
        .contacts()
        .iter()
        .map(|c| contact_line(c, c.id == store.active_id()))
        .collect()
}

pub fn thread(store: &ConversationStore) -> Vec<String> {
    let contact = store.active_contact();
    let mut lines = vec![format!("Conversation with {} ({})", contact.name, contact.role)];
    let messages = store.active_thread();
    if messages.is_empty() {
        lines.push("No messages yet".to_string());
    }
    lines.extend(messages.iter().map(message));
    lines
}

pub fn events(events: &[&CalendarEvent]) -> Vec<String> {
    if events.is_empty() {
        return vec!["No events scheduled for this day.".to_string()];
    }
    events
        .iter()
        .map(|e| {
            format!(
                "[{}] {} {} @ {} - {}",
                e.id, e.title, e.time, e.location, e.description
            )
        })
        .collect()
}

pub fn notifications(items: &[&Notification]) -> Vec<String> {
    if items.is_empty() {
        return vec!["No notifications".to_string()];
    }
    items
        .iter()
        .map(|n| {
            format!(
                "{} [{}] ({}) {} - {} | {}",
                if n.read { " " } else { "!" },
                n.id,
                n.kind,
                n.title,
                n.description,
                n.date.format("%b %-d, %Y %-I:%M %p"),
            )
        })
        .collect()
}

pub fn resources(items: &[&Resource]) -> Vec<String> {
    if items.is_empty() {
        return vec!["No resources found".to_string()];
    }
    items
        .iter()
        .map(|r| {
            format!(
                "[{}] {} ({}, {}, {}) - {}",
                r.id, r.title, r.kind, r.subject, r.grade, r.description
            )
        })
        .collect()
}

/// Inline error and status line, if any
pub fn feedback(state: &AppState) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(error) = &state.form_error {
        lines.push(format!("Error: {}", error));
    }
    if let Some(status) = &state.status.message {
        lines.push(status.clone());
    }
    lines
}
