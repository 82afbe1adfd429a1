//! Notification center

use crate::sample;
use crate::service::events::{Event, EventBus};
use crate::types::{Notification, NotificationKind};

/// Tabs of the notification center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationFilter {
    #[default]
    All,
    Unread,
    Kind(NotificationKind),
}

impl std::str::FromStr for NotificationFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "unread" => Ok(Self::Unread),
            other => other.parse().map(Self::Kind),
        }
    }
}

pub struct NotificationCenter {
    items: Vec<Notification>,
    bus: EventBus,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(sample::notifications())
    }
}

impl NotificationCenter {
    pub fn new(items: Vec<Notification>) -> Self {
        Self {
            items,
            bus: EventBus::default(),
        }
    }

    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.bus = bus;
        self
    }

    fn publish(&self) {
        self.bus.emit(Event::NotificationsChanged {
            unread: self.unread_count(),
        });
    }

    pub fn all(&self) -> &[Notification] {
        &self.items
    }

    pub fn filter(&self, filter: NotificationFilter) -> Vec<&Notification> {
        self.items
            .iter()
            .filter(|n| match filter {
                NotificationFilter::All => true,
                NotificationFilter::Unread => !n.read,
                NotificationFilter::Kind(kind) => n.kind == kind,
            })
            .collect()
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    /// Returns false if `id` is unknown
    pub fn mark_read(&mut self, id: u32) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                self.publish();
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.items {
            notification.read = true;
        }
        self.publish();
    }

    /// Returns false if `id` is unknown
    pub fn delete(&mut self, id: u32) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.publish();
        }
        removed
    }
}
