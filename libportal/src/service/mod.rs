//! Service layer for the portal
//!
//! Front ends talk to `PortalService`, a facade over the specialized
//! sub-services:
//!
//! - `MessagingService`: conversations and delayed replies
//! - `CalendarService`: events and appointment booking
//! - `NotificationCenter`: read state and filtering
//! - `ResourceLibrary`: search over shared resources
//! - `SettingsService`: feedback and password forms
//! - `EventBus`: change events for anything that wants to react
//!
//! # Example
//!
//! ```no_run
//! use libportal::service::PortalService;
//!
//! # async fn example() -> libportal::Result<()> {
//! let mut service = PortalService::new()?;
//! service.messaging_mut().send_message("Hi")?;
//!
//! if let Some((contact_id, reply)) = service.messaging_mut().next_reply().await {
//!     println!("{}: {}", contact_id, reply.content);
//! }
//! # Ok(())
//! # }
//! ```

pub mod calendar;
pub mod events;
pub mod messaging;
pub mod notifications;
pub mod resources;
pub mod settings;

use self::calendar::CalendarService;
use self::events::EventBus;
use self::messaging::MessagingService;
use self::notifications::NotificationCenter;
use self::resources::ResourceLibrary;
use self::settings::SettingsService;
use crate::{Config, Result};

/// Main service facade, seeded with the sample data
///
/// All sub-services publish on the same event bus.
pub struct PortalService {
    messaging: MessagingService,
    calendar: CalendarService,
    notifications: NotificationCenter,
    resources: ResourceLibrary,
    settings: SettingsService,
    event_bus: EventBus,
}

impl PortalService {
    /// Create a service from the default configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read or is invalid.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::from_config(config)
    }

    /// Create a service with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured reply delay is invalid.
    pub fn from_config(config: Config) -> Result<Self> {
        let event_bus = EventBus::new(100);

        let messaging = MessagingService::new(&config.messaging, event_bus.clone())?;
        let calendar = CalendarService::default().with_event_bus(event_bus.clone());
        let notifications = NotificationCenter::default().with_event_bus(event_bus.clone());
        let settings = SettingsService::new().with_event_bus(event_bus.clone());

        Ok(Self {
            messaging,
            calendar,
            notifications,
            resources: ResourceLibrary::default(),
            settings,
            event_bus,
        })
    }

    pub fn messaging(&self) -> &MessagingService {
        &self.messaging
    }

    pub fn messaging_mut(&mut self) -> &mut MessagingService {
        &mut self.messaging
    }

    pub fn calendar(&self) -> &CalendarService {
        &self.calendar
    }

    pub fn calendar_mut(&mut self) -> &mut CalendarService {
        &mut self.calendar
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    pub fn resources(&self) -> &ResourceLibrary {
        &self.resources
    }

    pub fn settings(&self) -> &SettingsService {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingsService {
        &mut self.settings
    }

    /// Subscribe to service events
    ///
    /// Multiple subscribers are supported; each sees every event emitted
    /// after it subscribed.
    pub fn subscribe(&self) -> events::EventReceiver {
        self.event_bus.subscribe()
    }

    /// Cancel pending replies before the service goes away
    pub fn shutdown(&mut self) {
        self.messaging.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MessagingConfig;
    use crate::service::events::Event;

    #[test]
    fn test_from_config_seeds_sample_data() {
        let service = PortalService::from_config(Config::default()).unwrap();
        assert_eq!(service.messaging().store().contacts().len(), 3);
        assert_eq!(service.calendar().events().len(), 3);
        assert_eq!(service.notifications().unread_count(), 2);
        assert_eq!(service.resources().all().len(), 5);
        assert!(service.settings().feedback().is_empty());
    }

    #[test]
    fn test_from_config_rejects_bad_delay() {
        let config = Config {
            messaging: MessagingConfig {
                reply_delay: "soon".to_string(),
                ..MessagingConfig::default()
            },
            ..Config::default()
        };
        assert!(PortalService::from_config(config).is_err());
    }

    #[tokio::test]
    async fn test_sub_services_share_the_bus() {
        let mut service = PortalService::from_config(Config::default()).unwrap();
        let mut events = service.subscribe();

        service.notifications_mut().mark_all_read();
        service.calendar_mut().delete_event(3);

        assert_eq!(
            events.recv().await.unwrap(),
            Event::NotificationsChanged { unread: 0 }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            Event::EventDeleted { event_id: 3 }
        );
    }
}
