//! Event system for portal activity
//!
//! An in-process event bus built on `tokio::sync::broadcast`. Services emit
//! events as they mutate state; front ends subscribe to drive things like a
//! typing indicator or a status line without polling the stores.
//!
//! Emitting never blocks: with no subscribers the event is dropped, and a
//! lagging subscriber misses the oldest events instead of slowing emitters.
//!
//! # Example
//!
//! ```no_run
//! use libportal::service::events::{Event, EventBus};
//! use libportal::ContactId;
//!
//! # async fn example() {
//! let event_bus = EventBus::new(100);
//! let mut receiver = event_bus.subscribe();
//!
//! event_bus.emit(Event::TypingStarted { contact_id: ContactId(1) });
//!
//! if let Ok(event) = receiver.recv().await {
//!     println!("Received: {:?}", event);
//! }
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::ContactId;

/// Event receiver type alias
pub type EventReceiver = broadcast::Receiver<Event>;

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus buffering `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to all events emitted from now on
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers
    pub fn emit(&self, event: Event) {
        // send() only fails when nobody is listening
        let _ = self.sender.send(event);
    }

    /// Number of active subscribers; for diagnostics only
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Events emitted by portal services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    ContactAdded {
        contact_id: ContactId,
        name: String,
    },

    ContactSelected {
        contact_id: ContactId,
    },

    MessageSent {
        contact_id: ContactId,
        message_id: u32,
    },

    /// A reply is pending for this thread
    TypingStarted {
        contact_id: ContactId,
    },

    ReplyDelivered {
        contact_id: ContactId,
        message_id: u32,
    },

    /// A pending reply was dropped on teardown
    ReplyCancelled {
        contact_id: ContactId,
    },

    AppointmentScheduled {
        event_id: u32,
    },

    EventDeleted {
        event_id: u32,
    },

    NotificationsChanged {
        unread: usize,
    },

    FeedbackSubmitted {
        feedback_id: u32,
    },

    PasswordChanged,
}
