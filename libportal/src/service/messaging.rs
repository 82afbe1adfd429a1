//! Messaging service
//!
//! Wires the conversation store to delayed reply delivery: a send appends
//! the user's message, schedules the canned reply, and the reply is appended
//! once it arrives. All mutation goes through `&mut self`, so the store has
//! a single owner and replies are applied on the owner's task.

use std::time::Duration;

use crate::config::MessagingConfig;
use crate::error::Result;
use crate::messaging::delivery::ReplyReceiver;
use crate::messaging::{ConversationStore, ReplyEngine, ReplyHandle, ReplyScheduler, ScheduledReply};
use crate::service::events::{Event, EventBus};
use crate::types::{Contact, ContactId, Message};

pub struct MessagingService {
    store: ConversationStore,
    scheduler: ReplyScheduler,
    inbox: ReplyReceiver,
    events: EventBus,
}

impl MessagingService {
    /// Create the service over the sample conversations
    ///
    /// # Errors
    ///
    /// Returns an error if `config.reply_delay` is not a valid duration.
    pub fn new(config: &MessagingConfig, events: EventBus) -> Result<Self> {
        let delay = config.reply_delay()?;
        let store = ConversationStore::with_sample_data(config);
        Ok(Self::from_parts(store, ReplyEngine::new(), delay, events))
    }

    pub fn from_parts(
        store: ConversationStore,
        engine: ReplyEngine,
        delay: Duration,
        events: EventBus,
    ) -> Self {
        let (scheduler, inbox) = ReplyScheduler::new(engine, delay);
        Self {
            store,
            scheduler,
            inbox,
            events,
        }
    }

    /// Read access for rendering
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn add_contact(&mut self, name: &str, role: &str) -> Result<Contact> {
        let contact = self.store.add_contact(name, role)?;
        self.events.emit(Event::ContactAdded {
            contact_id: contact.id,
            name: contact.name.clone(),
        });
        Ok(contact)
    }

    /// Switch threads; unknown ids are ignored
    pub fn select_contact(&mut self, id: ContactId) -> bool {
        let changed = self.store.select_contact(id);
        if changed {
            self.events.emit(Event::ContactSelected { contact_id: id });
        }
        changed
    }

    /// Send to the active contact and schedule the counterpart's reply
    ///
    /// Must run inside a Tokio runtime. A reply still pending for the same
    /// thread is superseded by this one. The returned handle can cancel the
    /// new reply before it arrives.
    ///
    /// # Errors
    ///
    /// - `PortalError::Validation` for a blank or oversized body (nothing
    ///   is appended and nothing is scheduled)
    /// - `PortalError::Runtime` outside a Tokio runtime (the message is
    ///   appended but no reply is scheduled)
    pub fn send_message(&mut self, body: &str) -> Result<(Message, ReplyHandle)> {
        let contact_id = self.store.active_id();
        let message = self.store.send_message(body)?;
        self.events.emit(Event::MessageSent {
            contact_id,
            message_id: message.id,
        });

        let reply = self.scheduler.schedule(contact_id, &message.content)?;
        self.events.emit(Event::TypingStarted { contact_id });
        Ok((message, reply))
    }

    /// Wait for the next reply and append it to its thread
    ///
    /// Returns `None` immediately when no reply is pending. Cancel-safe, so
    /// it can sit in a `tokio::select!` next to user input.
    pub async fn next_reply(&mut self) -> Option<(ContactId, Message)> {
        loop {
            if !self.scheduler.has_pending() {
                return None;
            }
            let reply = self.inbox.recv().await?;
            if let Some(delivered) = self.deliver(reply) {
                return Some(delivered);
            }
        }
    }

    /// Append every reply that has already arrived, without waiting
    pub fn poll_replies(&mut self) -> Vec<(ContactId, Message)> {
        let mut delivered = Vec::new();
        while let Ok(reply) = self.inbox.try_recv() {
            delivered.extend(self.deliver(reply));
        }
        delivered
    }

    fn deliver(&mut self, reply: ScheduledReply) -> Option<(ContactId, Message)> {
        if !self.scheduler.complete(&reply) {
            return None;
        }
        let message = self.store.append_reply_to(reply.contact_id, &reply.body)?;
        self.events.emit(Event::ReplyDelivered {
            contact_id: reply.contact_id,
            message_id: message.id,
        });
        Some((reply.contact_id, message))
    }

    /// Whether the active contact is "typing"
    pub fn is_typing(&self) -> bool {
        self.scheduler.is_pending(self.store.active_id())
    }

    pub fn is_typing_for(&self, id: ContactId) -> bool {
        self.scheduler.is_pending(id)
    }

    /// Any thread still waiting on a reply
    pub fn has_pending_replies(&self) -> bool {
        self.scheduler.has_pending()
    }

    /// Cancel one reply returned by `send_message`
    ///
    /// Returns false if it was already delivered or superseded.
    pub fn cancel_reply(&mut self, reply: &ReplyHandle) -> bool {
        let cancelled = self.scheduler.cancel_reply(reply);
        if cancelled {
            tracing::debug!(contact_id = %reply.contact_id(), ticket = reply.ticket(), "Reply cancelled");
            self.events.emit(Event::ReplyCancelled {
                contact_id: reply.contact_id(),
            });
        }
        cancelled
    }

    /// Cancel every pending reply. Call before tearing the view down.
    pub fn shutdown(&mut self) {
        for contact_id in self.scheduler.cancel_all() {
            tracing::debug!(contact_id = %contact_id, "Reply cancelled on shutdown");
            self.events.emit(Event::ReplyCancelled { contact_id });
        }
    }
}
