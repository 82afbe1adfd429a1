//! Interactive session
//!
//! Bridges parsed commands to the portal services and feeds the outcomes
//! back through the reducer. Every entry point returns the lines to print,
//! so the session itself never writes to the terminal.

use chrono::NaiveDate;
use libportal::service::calendar::CalendarService;
use libportal::service::PortalService;
use libportal::{ContactId, Message, PortalError};

use crate::app::{reduce, Action, AppState};
use crate::command::{self, Command};
use crate::render;

pub struct Session {
    service: PortalService,
    state: AppState,
    today: NaiveDate,
}

impl Session {
    /// `today` bounds appointment booking: earlier dates are refused
    pub fn new(service: PortalService, today: NaiveDate) -> Self {
        let state = AppState::new(service.notifications().unread_count());
        Self {
            service,
            state,
            today,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn service(&self) -> &PortalService {
        &self.service
    }

    fn dispatch(&mut self, action: Action) {
        self.state = reduce(std::mem::take(&mut self.state), action);
    }

    pub fn greeting(&self) -> Vec<String> {
        let contact = self.service.messaging().store().active_contact();
        vec![
            "Parent-Teacher Portal. Type /help for commands.".to_string(),
            format!("Talking to {} ({})", contact.name, contact.role),
            format!("{} unread notifications", self.state.unread_notifications),
        ]
    }

    /// Handle one line of input
    pub fn handle_line(&mut self, line: &str) -> Vec<String> {
        let mut out = match command::parse(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Vec::new(),
            Err(e) => {
                self.dispatch(Action::FormError(e.to_string()));
                Vec::new()
            }
        };
        self.finish(&mut out);
        out
    }

    /// Wait for the next delayed reply and render it
    ///
    /// Returns `None` when nothing is pending. Cancel-safe.
    pub async fn next_reply(&mut self) -> Option<Vec<String>> {
        let (contact_id, message) = self.service.messaging_mut().next_reply().await?;
        let mut out = self.render_reply(contact_id, &message);
        self.finish(&mut out);
        Some(out)
    }

    /// Whether a reply is still on its way
    pub fn is_waiting(&self) -> bool {
        self.service.messaging().has_pending_replies()
    }

    /// Input hit EOF; keep running until pending replies land
    pub fn close_input(&mut self) {
        self.dispatch(Action::InputClosed);
    }

    pub fn should_exit(&self) -> bool {
        self.state.should_quit || (self.state.input_closed && !self.is_waiting())
    }

    /// Cancel anything pending. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.service.shutdown();
    }

    fn execute(&mut self, command: Command) -> Vec<String> {
        match command {
            Command::Help => render::HELP.lines().map(String::from).collect(),
            Command::Contacts => render::contacts(self.service.messaging().store()),
            Command::Add { name, role } => {
                match self.service.messaging_mut().add_contact(&name, &role) {
                    Ok(contact) => self.dispatch(Action::SetStatus(format!(
                        "Started a conversation with {} ({})",
                        contact.name, contact.role
                    ))),
                    Err(e) => self.fail(e),
                }
                Vec::new()
            }
            Command::Select(id) => {
                if self.service.messaging_mut().select_contact(id) {
                    render::thread(self.service.messaging().store())
                } else {
                    self.dispatch(Action::FormError(format!("No contact with id {}", id)));
                    Vec::new()
                }
            }
            Command::Thread => render::thread(self.service.messaging().store()),
            Command::Events(date) => {
                let mut out = vec![format!("Events on {}", date.format("%B %-d, %Y"))];
                out.extend(render::events(&self.service.calendar().events_on(date)));
                out
            }
            Command::Book(request) => {
                if let Some(date) = request.date {
                    if !CalendarService::is_bookable(date, self.today) {
                        self.dispatch(Action::FormError(
                            "Appointments cannot be booked in the past".to_string(),
                        ));
                        return Vec::new();
                    }
                }
                match self.service.calendar_mut().schedule_appointment(request) {
                    Ok(event) => self.dispatch(Action::SetStatus(format!(
                        "Appointment scheduled: {} on {} at {}",
                        event.title, event.date, event.time
                    ))),
                    Err(e) => self.fail(e.into()),
                }
                Vec::new()
            }
            Command::Unbook(id) => {
                match self.service.calendar_mut().delete_event(id) {
                    Some(event) => self.dispatch(Action::EventDeleted(event)),
                    None => self.dispatch(Action::FormError(format!("No event with id {}", id))),
                }
                Vec::new()
            }
            Command::Undo => {
                match self.state.undo.clone() {
                    Some(event) => {
                        self.service.calendar_mut().restore_event(event);
                        self.dispatch(Action::EventRestored);
                    }
                    None => self.dispatch(Action::FormError("Nothing to undo".to_string())),
                }
                Vec::new()
            }
            Command::Notifications(filter) => {
                let center = self.service.notifications();
                let mut out = render::notifications(&center.filter(filter));
                out.push(format!("{} unread", center.unread_count()));
                out
            }
            Command::Read(id) => {
                if self.service.notifications_mut().mark_read(id) {
                    self.dispatch(Action::SetStatus(format!("Notification {} marked as read", id)));
                } else {
                    self.dispatch(Action::FormError(format!("No notification with id {}", id)));
                }
                self.sync_unread();
                Vec::new()
            }
            Command::ReadAll => {
                self.service.notifications_mut().mark_all_read();
                self.dispatch(Action::SetStatus("All notifications marked as read".to_string()));
                self.sync_unread();
                Vec::new()
            }
            Command::Dismiss(id) => {
                if self.service.notifications_mut().delete(id) {
                    self.dispatch(Action::SetStatus(format!("Notification {} deleted", id)));
                } else {
                    self.dispatch(Action::FormError(format!("No notification with id {}", id)));
                }
                self.sync_unread();
                Vec::new()
            }
            Command::Resources { query, kind } => {
                render::resources(&self.service.resources().search(&query, kind))
            }
            Command::Feedback(form) => {
                match self.service.settings_mut().submit_feedback(form) {
                    Ok(_) => self.dispatch(Action::SetStatus(
                        "Thank you for your feedback! We appreciate your input.".to_string(),
                    )),
                    Err(e) => self.fail(e.into()),
                }
                Vec::new()
            }
            Command::Password(form) => {
                match self.service.settings_mut().change_password(form) {
                    Ok(()) => self.dispatch(Action::SetStatus(
                        "Password updated successfully!".to_string(),
                    )),
                    Err(e) => self.fail(e.into()),
                }
                Vec::new()
            }
            Command::Quit => {
                if self.is_waiting() {
                    self.dispatch(Action::SetStatus("Pending replies cancelled".to_string()));
                }
                self.shutdown();
                self.dispatch(Action::Quit);
                Vec::new()
            }
            Command::Send(body) => match self.service.messaging_mut().send_message(&body) {
                // Every send restarts the typing indicator, even if one was showing
                Ok((message, _reply)) => {
                    self.dispatch(Action::TypingChanged(true));
                    vec![render::message(&message), self.typing_line()]
                }
                Err(e) => {
                    self.fail(e);
                    Vec::new()
                }
            },
        }
    }

    fn render_reply(&mut self, contact_id: ContactId, message: &Message) -> Vec<String> {
        if contact_id == self.service.messaging().store().active_id() {
            return vec![render::message(message)];
        }
        self.dispatch(Action::SetStatus(format!("New message from {}", message.sender)));
        Vec::new()
    }

    fn fail(&mut self, error: PortalError) {
        let message = match error {
            PortalError::Validation(e) => e.to_string(),
            other => other.to_string(),
        };
        self.dispatch(Action::FormError(message));
    }

    fn sync_unread(&mut self) {
        let unread = self.service.notifications().unread_count();
        self.dispatch(Action::UnreadNotifications(unread));
    }

    fn typing_line(&self) -> String {
        let name = &self.service.messaging().store().active_contact().name;
        format!("{} is typing...", name)
    }

    // Typing indicator and feedback go after the command's own output
    fn finish(&mut self, out: &mut Vec<String>) {
        let typing = !self.state.should_quit && self.service.messaging().is_typing();
        if typing != self.state.typing {
            self.dispatch(Action::TypingChanged(typing));
            if typing {
                out.push(self.typing_line());
            }
        }
        if self.state.has_feedback() {
            out.extend(render::feedback(&self.state));
            self.dispatch(Action::ClearFeedback);
        }
    }
}
