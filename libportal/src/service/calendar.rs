//! Calendar and appointment booking

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::sample;
use crate::service::events::{Event, EventBus};
use crate::types::CalendarEvent;

/// Location given to appointments booked through the portal
pub const APPOINTMENT_LOCATION: &str = "School";

/// Appointment form contents; every field is required
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentRequest {
    pub teacher: String,
    pub date: Option<NaiveDate>,
    pub time: String,
    pub reason: String,
}

pub struct CalendarService {
    events: Vec<CalendarEvent>,
    bus: EventBus,
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new(sample::calendar_events())
    }
}

impl CalendarService {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self {
            events,
            bus: EventBus::default(),
        }
    }

    /// Publish changes on a shared bus instead of a private one
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.bus = bus;
        self
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// Events falling on `date`, in list order
    pub fn events_on(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    /// Only today and later can be booked
    pub fn is_bookable(date: NaiveDate, today: NaiveDate) -> bool {
        date >= today
    }

    /// Book an appointment; it goes to the front of the list
    ///
    /// # Errors
    ///
    /// `ValidationError::MissingField` for the first empty field, checked
    /// in form order: teacher, date, time, reason.
    pub fn schedule_appointment(
        &mut self,
        request: AppointmentRequest,
    ) -> Result<CalendarEvent, ValidationError> {
        let teacher = request.teacher.trim();
        if teacher.is_empty() {
            return Err(ValidationError::MissingField("teacher name"));
        }
        let date = request.date.ok_or(ValidationError::MissingField("date"))?;
        let time = request.time.trim();
        if time.is_empty() {
            return Err(ValidationError::MissingField("time"));
        }
        let reason = request.reason.trim();
        if reason.is_empty() {
            return Err(ValidationError::MissingField("reason for the appointment"));
        }

        let event = CalendarEvent {
            id: self.events.iter().map(|e| e.id).max().map_or(1, |max| max + 1),
            title: format!("Meeting with {}", teacher),
            date,
            time: time.to_string(),
            location: APPOINTMENT_LOCATION.to_string(),
            description: reason.to_string(),
        };
        tracing::info!(event_id = event.id, date = %event.date, "Appointment scheduled");
        self.events.insert(0, event.clone());
        self.bus.emit(Event::AppointmentScheduled { event_id: event.id });
        Ok(event)
    }

    /// Remove an event, handing it back so the caller can offer undo
    pub fn delete_event(&mut self, id: u32) -> Option<CalendarEvent> {
        let index = self.events.iter().position(|e| e.id == id)?;
        let event = self.events.remove(index);
        tracing::debug!(event_id = id, "Event deleted");
        self.bus.emit(Event::EventDeleted { event_id: id });
        Some(event)
    }

    /// Put a deleted event back at the end of the list
    pub fn restore_event(&mut self, event: CalendarEvent) {
        if self.events.iter().any(|e| e.id == event.id) {
            tracing::warn!(event_id = event.id, "Event already present, not restoring");
            return;
        }
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request() -> AppointmentRequest {
        AppointmentRequest {
            teacher: "Ms. Johnson".to_string(),
            date: Some(day(2024, 3, 15)),
            time: "16:30".to_string(),
            reason: "Science project".to_string(),
        }
    }

    #[test]
    fn test_events_on_filters_by_date() {
        let calendar = CalendarService::default();
        let events = calendar.events_on(day(2024, 3, 15));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Parent-Teacher Conference");
        assert!(calendar.events_on(day(2024, 3, 16)).is_empty());
    }

    #[test]
    fn test_schedule_appointment() {
        let mut calendar = CalendarService::default();
        let event = calendar.schedule_appointment(request()).unwrap();

        assert_eq!(event.id, 4);
        assert_eq!(event.title, "Meeting with Ms. Johnson");
        assert_eq!(event.location, APPOINTMENT_LOCATION);
        assert_eq!(event.description, "Science project");
        assert_eq!(calendar.events()[0], event);
        assert_eq!(calendar.events_on(day(2024, 3, 15)).len(), 2);
    }

    #[test]
    fn test_schedule_appointment_validates_in_form_order() {
        let mut calendar = CalendarService::default();

        let empty = AppointmentRequest::default();
        assert_eq!(
            calendar.schedule_appointment(empty),
            Err(ValidationError::MissingField("teacher name"))
        );

        let no_date = AppointmentRequest { date: None, ..request() };
        assert_eq!(
            calendar.schedule_appointment(no_date),
            Err(ValidationError::MissingField("date"))
        );

        let no_time = AppointmentRequest { time: " ".to_string(), ..request() };
        assert_eq!(
            calendar.schedule_appointment(no_time),
            Err(ValidationError::MissingField("time"))
        );

        let no_reason = AppointmentRequest { reason: String::new(), ..request() };
        assert_eq!(
            calendar.schedule_appointment(no_reason),
            Err(ValidationError::MissingField("reason for the appointment"))
        );

        assert_eq!(calendar.events().len(), 3);
    }

    #[test]
    fn test_first_appointment_in_empty_calendar_gets_id_one() {
        let mut calendar = CalendarService::new(Vec::new());
        assert_eq!(calendar.schedule_appointment(request()).unwrap().id, 1);
    }

    #[test]
    fn test_delete_and_undo() {
        let mut calendar = CalendarService::default();
        let deleted = calendar.delete_event(2).unwrap();
        assert_eq!(deleted.title, "Science Fair");
        assert_eq!(calendar.events().len(), 2);
        assert!(calendar.delete_event(2).is_none());

        calendar.restore_event(deleted.clone());
        assert_eq!(calendar.events().len(), 3);
        assert_eq!(calendar.events()[2], deleted);

        // Restoring twice does not duplicate
        calendar.restore_event(deleted);
        assert_eq!(calendar.events().len(), 3);
    }

    #[tokio::test]
    async fn test_changes_are_published() {
        let bus = EventBus::new(10);
        let mut rx = bus.subscribe();
        let mut calendar = CalendarService::default().with_event_bus(bus);

        let event = calendar.schedule_appointment(request()).unwrap();
        calendar.delete_event(1);

        assert_eq!(
            rx.recv().await.unwrap(),
            Event::AppointmentScheduled { event_id: event.id }
        );
        assert_eq!(rx.recv().await.unwrap(), Event::EventDeleted { event_id: 1 });
    }

    #[test]
    fn test_is_bookable() {
        let today = day(2024, 3, 10);
        assert!(CalendarService::is_bookable(today, today));
        assert!(CalendarService::is_bookable(day(2024, 3, 11), today));
        assert!(!CalendarService::is_bookable(day(2024, 3, 9), today));
    }
}
