//! Conversation state
//!
//! `ConversationStore` exclusively owns the contact list and one message
//! thread per contact. The presentation layer reads through accessors and
//! mutates only through the operations below, which keep two invariants:
//!
//! - exactly one contact is active, and it exists in the contact list
//! - message ids within a thread are sequential, starting at 1

use std::collections::HashMap;

use chrono::{Local, Utc};

use crate::config::MessagingConfig;
use crate::error::ValidationError;
use crate::sample;
use crate::types::{Contact, ContactId, Message, PLACEHOLDER_AVATAR};

/// Preview shown for a contact that has no messages yet
pub const NO_MESSAGES_PREVIEW: &str = "No messages yet";

/// Activity label for anything that just happened
pub const JUST_NOW: &str = "Just now";

#[derive(Debug, Clone)]
pub struct ConversationStore {
    /// Most recent first
    contacts: Vec<Contact>,
    threads: HashMap<ContactId, Vec<Message>>,
    active: ContactId,
    user_label: String,
    default_role: String,
    max_message_chars: usize,
}

impl ConversationStore {
    /// Store seeded with the sample conversations; the first contact is active.
    pub fn with_sample_data(config: &MessagingConfig) -> Self {
        let contacts = sample::contacts();
        let threads = contacts
            .iter()
            .map(|c| (c.id, sample::thread_for(c.id)))
            .collect();
        let active = contacts[0].id;
        Self {
            contacts,
            threads,
            active,
            user_label: config.user_label.clone(),
            default_role: config.default_role.clone(),
            max_message_chars: config.max_message_chars,
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn contact(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn active_id(&self) -> ContactId {
        self.active
    }

    pub fn active_contact(&self) -> &Contact {
        // The active id always refers to a listed contact
        self.contacts
            .iter()
            .find(|c| c.id == self.active)
            .unwrap_or(&self.contacts[0])
    }

    pub fn active_thread(&self) -> &[Message] {
        self.thread(self.active)
    }

    pub fn thread(&self, id: ContactId) -> &[Message] {
        self.threads.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Add a contact, make it active, and start an empty thread for it
    ///
    /// An empty `role` falls back to the configured default role.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` if `name` is blank; the store is
    /// left unchanged.
    pub fn add_contact(&mut self, name: &str, role: &str) -> Result<Contact, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let role = match role.trim() {
            "" => self.default_role.clone(),
            role => role.to_string(),
        };

        let contact = Contact {
            id: self.next_contact_id(),
            name: name.to_string(),
            role,
            avatar: PLACEHOLDER_AVATAR.to_string(),
            initials: Contact::initials_for(name),
            last_message: NO_MESSAGES_PREVIEW.to_string(),
            time: JUST_NOW.to_string(),
            unread: false,
        };

        tracing::info!(contact_id = %contact.id, name = %contact.name, "Contact added");
        self.contacts.insert(0, contact.clone());
        self.threads.insert(contact.id, Vec::new());
        self.active = contact.id;
        Ok(contact)
    }

    /// Make `id` the active contact and clear its unread flag
    ///
    /// Unknown ids are ignored. Returns whether the selection changed anything.
    pub fn select_contact(&mut self, id: ContactId) -> bool {
        let Some(contact) = self.contacts.iter_mut().find(|c| c.id == id) else {
            tracing::debug!(contact_id = %id, "Ignoring selection of unknown contact");
            return false;
        };
        contact.unread = false;
        self.active = id;
        tracing::debug!(contact_id = %id, "Contact selected");
        true
    }

    /// Append the user's message to the active thread
    ///
    /// Also updates the active contact's preview and activity label.
    ///
    /// # Errors
    ///
    /// - `ValidationError::EmptyMessage` if `body` is blank after trimming
    /// - `ValidationError::MessageTooLong` if it exceeds the configured limit
    pub fn send_message(&mut self, body: &str) -> Result<Message, ValidationError> {
        if body.trim().is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        let len = body.chars().count();
        if len > self.max_message_chars {
            return Err(ValidationError::MessageTooLong {
                len,
                max: self.max_message_chars,
            });
        }

        let sender = self.user_label.clone();
        let message = self.push_message(self.active, sender, body.to_string(), true);

        if let Some(contact) = self.contacts.iter_mut().find(|c| c.id == self.active) {
            contact.last_message = body.to_string();
            contact.time = JUST_NOW.to_string();
        }
        tracing::debug!(contact_id = %self.active, message_id = message.id, "Message sent");
        Ok(message)
    }

    /// Append the counterpart's reply to the active thread
    pub fn append_reply(&mut self, body: &str) -> Message {
        let sender = self.active_contact().name.clone();
        self.push_message(self.active, sender, body.to_string(), false)
    }

    /// Append the counterpart's reply to a specific thread
    ///
    /// Replies that land in an inactive thread mark the contact unread.
    /// Returns `None` if the contact does not exist.
    pub fn append_reply_to(&mut self, id: ContactId, body: &str) -> Option<Message> {
        let active = self.active;
        let contact = self.contacts.iter_mut().find(|c| c.id == id)?;
        if id != active {
            contact.unread = true;
        }
        let sender = contact.name.clone();
        Some(self.push_message(id, sender, body.to_string(), false))
    }

    fn push_message(&mut self, id: ContactId, sender: String, content: String, is_self: bool) -> Message {
        let thread = self.threads.entry(id).or_default();
        let message = Message {
            id: thread.len() as u32 + 1,
            sender,
            content,
            time: time_label(),
            is_self,
        };
        thread.push(message.clone());
        message
    }

    /// Time-based id, bumped past every existing id so it never collides
    fn next_contact_id(&self) -> ContactId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let max = self.contacts.iter().map(|c| c.id.0).max().unwrap_or(0);
        ContactId(now.max(max + 1))
    }
}

/// Wall-clock label in the "10:30 AM" form used throughout the inbox
fn time_label() -> String {
    Local::now().format("%I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ConversationStore {
        ConversationStore::with_sample_data(&MessagingConfig::default())
    }

    #[test]
    fn test_sample_store_starts_on_first_contact() {
        let store = store();
        assert_eq!(store.contacts().len(), 3);
        assert_eq!(store.active_contact().name, "Ms. Johnson");
        assert_eq!(store.active_thread().len(), 3);
    }

    #[test]
    fn test_add_contact_rejects_blank_names() {
        let mut store = store();
        assert_eq!(store.add_contact("", "Principal"), Err(ValidationError::EmptyName));
        assert_eq!(store.add_contact("   ", "Principal"), Err(ValidationError::EmptyName));
        assert_eq!(store.contacts().len(), 3);
        assert_eq!(store.active_contact().name, "Ms. Johnson");
    }

    #[test]
    fn test_add_contact_goes_first_and_becomes_active() {
        let mut store = store();
        let contact = store.add_contact("Jane Doe", "Principal").unwrap();

        assert_eq!(contact.initials, "JD");
        assert_eq!(contact.role, "Principal");
        assert_eq!(contact.last_message, NO_MESSAGES_PREVIEW);
        assert_eq!(contact.time, JUST_NOW);
        assert!(!contact.unread);
        assert_eq!(store.contacts()[0], contact);
        assert_eq!(store.active_id(), contact.id);
        assert!(store.active_thread().is_empty());
    }

    #[test]
    fn test_add_contact_defaults_role() {
        let mut store = store();
        let contact = store.add_contact("Coach Carter", "  ").unwrap();
        assert_eq!(contact.role, "Staff");
    }

    #[test]
    fn test_added_contact_ids_are_unique() {
        let mut store = store();
        let a = store.add_contact("A One", "").unwrap();
        let b = store.add_contact("B Two", "").unwrap();
        assert_ne!(a.id, b.id);
        assert!(b.id > a.id);
    }

    #[test]
    fn test_select_unknown_contact_is_noop() {
        let mut store = store();
        assert!(!store.select_contact(ContactId(999)));
        assert_eq!(store.active_id(), ContactId(1));
    }

    #[test]
    fn test_select_clears_unread() {
        let mut store = store();
        assert!(store.contact(ContactId(1)).unwrap().unread);
        store.select_contact(ContactId(2));
        store.select_contact(ContactId(1));
        assert!(!store.contact(ContactId(1)).unwrap().unread);
    }

    #[test]
    fn test_send_message_rejects_blank_body() {
        let mut store = store();
        assert_eq!(store.send_message(""), Err(ValidationError::EmptyMessage));
        assert_eq!(store.send_message(" \n\t"), Err(ValidationError::EmptyMessage));
        assert_eq!(store.active_thread().len(), 3);
    }

    #[test]
    fn test_send_message_rejects_oversized_body() {
        let config = MessagingConfig {
            max_message_chars: 5,
            ..MessagingConfig::default()
        };
        let mut store = ConversationStore::with_sample_data(&config);
        assert_eq!(
            store.send_message("héllo!"),
            Err(ValidationError::MessageTooLong { len: 6, max: 5 })
        );
        assert!(store.send_message("héllo").is_ok());
    }

    #[test]
    fn test_send_message_appends_and_updates_preview() {
        let mut store = store();
        let message = store.send_message("hello").unwrap();

        assert_eq!(message.id, 4);
        assert!(message.is_self);
        assert_eq!(message.sender, "You");
        assert_eq!(store.active_thread().len(), 4);
        assert_eq!(store.active_contact().last_message, "hello");
        assert_eq!(store.active_contact().time, JUST_NOW);
    }

    #[test]
    fn test_append_reply_uses_contact_name() {
        let mut store = store();
        store.add_contact("Jane Doe", "Principal").unwrap();
        store.send_message("Hi").unwrap();
        let reply = store.append_reply("Hello!");

        assert_eq!(reply.id, 2);
        assert!(!reply.is_self);
        assert_eq!(reply.sender, "Jane Doe");
        // Replies do not change the preview
        assert_eq!(store.active_contact().last_message, "Hi");
    }

    #[test]
    fn test_threads_are_kept_per_contact() {
        let mut store = store();
        let jane = store.add_contact("Jane Doe", "Principal").unwrap();
        store.send_message("Hi Jane").unwrap();

        store.select_contact(ContactId(1));
        assert_eq!(store.active_thread().len(), 3);

        store.select_contact(jane.id);
        assert_eq!(store.active_thread().len(), 1);
        assert_eq!(store.active_thread()[0].content, "Hi Jane");
    }

    #[test]
    fn test_reply_to_inactive_thread_marks_unread() {
        let mut store = store();
        let reply = store.append_reply_to(ContactId(2), "See you Tuesday").unwrap();

        assert_eq!(reply.id, 1);
        assert_eq!(reply.sender, "Mr. Smith");
        assert!(store.contact(ContactId(2)).unwrap().unread);
        assert_eq!(store.active_id(), ContactId(1));
        assert!(store.append_reply_to(ContactId(42), "nobody").is_none());
    }
}
