//! Account settings forms
//!
//! Feedback and password changes are validated field by field in form
//! order; the first failing field is reported. There is no account backend,
//! so a valid password change only records that it happened.

use std::fmt;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::service::events::{Event, EventBus};

/// Shortest feedback message accepted, after trimming
pub const MIN_FEEDBACK_CHARS: usize = 10;

pub const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    #[default]
    General,
    Suggestion,
    Issue,
    Teacher,
}

impl FeedbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Suggestion => "suggestion",
            Self::Issue => "issue",
            Self::Teacher => "teacher",
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FeedbackKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "general" => Ok(Self::General),
            "suggestion" => Ok(Self::Suggestion),
            "issue" => Ok(Self::Issue),
            "teacher" => Ok(Self::Teacher),
            _ => Err(format!("Unknown feedback type: '{}'", s.trim())),
        }
    }
}

/// Feedback form contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackForm {
    pub kind: FeedbackKind,
    pub subject: String,
    pub message: String,
    pub anonymous: bool,
}

/// Accepted feedback, trimmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: u32,
    pub kind: FeedbackKind,
    pub subject: String,
    pub message: String,
    pub anonymous: bool,
}

/// Password change form. Values are compared as typed, without trimming.
///
/// Fields are `SecretString`s: `Debug` shows them redacted and the memory
/// is zeroed on drop.
#[derive(Debug, Clone)]
pub struct PasswordForm {
    pub current: SecretString,
    pub new: SecretString,
    pub confirm: SecretString,
}

impl PasswordForm {
    pub fn new(current: impl Into<String>, new: impl Into<String>, confirm: impl Into<String>) -> Self {
        Self {
            current: SecretString::from(current.into()),
            new: SecretString::from(new.into()),
            confirm: SecretString::from(confirm.into()),
        }
    }
}

impl PartialEq for PasswordForm {
    fn eq(&self, other: &Self) -> bool {
        self.current.expose_secret() == other.current.expose_secret()
            && self.new.expose_secret() == other.new.expose_secret()
            && self.confirm.expose_secret() == other.confirm.expose_secret()
    }
}

impl Eq for PasswordForm {}

pub struct SettingsService {
    feedback: Vec<Feedback>,
    bus: EventBus,
}

impl Default for SettingsService {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsService {
    pub fn new() -> Self {
        Self {
            feedback: Vec::new(),
            bus: EventBus::default(),
        }
    }

    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.bus = bus;
        self
    }

    /// Feedback submitted so far, oldest first
    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    /// Validate and record a feedback submission
    ///
    /// # Errors
    ///
    /// Checks the subject, then the message:
    /// - `Required("Subject")` for a blank subject
    /// - `Required("Message")` for a blank message
    /// - `TooShort` when the trimmed message is under `MIN_FEEDBACK_CHARS`
    pub fn submit_feedback(&mut self, form: FeedbackForm) -> Result<Feedback, ValidationError> {
        let subject = form.subject.trim();
        if subject.is_empty() {
            return Err(ValidationError::Required("Subject"));
        }

        let message = form.message.trim();
        if message.is_empty() {
            return Err(ValidationError::Required("Message"));
        }
        if message.chars().count() < MIN_FEEDBACK_CHARS {
            return Err(ValidationError::TooShort {
                field: "Message",
                min: MIN_FEEDBACK_CHARS,
            });
        }

        let feedback = Feedback {
            id: self.feedback.len() as u32 + 1,
            kind: form.kind,
            subject: subject.to_string(),
            message: message.to_string(),
            anonymous: form.anonymous,
        };
        tracing::info!(feedback_id = feedback.id, kind = %feedback.kind, anonymous = feedback.anonymous, "Feedback submitted");
        self.feedback.push(feedback.clone());
        self.bus.emit(Event::FeedbackSubmitted {
            feedback_id: feedback.id,
        });
        Ok(feedback)
    }

    /// Validate a password change
    ///
    /// # Errors
    ///
    /// Checks the current, new and confirmation fields in that order:
    /// - `Required("Current password")`, `Required("New password")`
    /// - `TooShort` when the new password is under `MIN_PASSWORD_CHARS`
    /// - `MissingConfirmation`, then `PasswordMismatch`
    pub fn change_password(&mut self, form: PasswordForm) -> Result<(), ValidationError> {
        let current = form.current.expose_secret();
        let new = form.new.expose_secret();
        let confirm = form.confirm.expose_secret();

        if current.is_empty() {
            return Err(ValidationError::Required("Current password"));
        }

        if new.is_empty() {
            return Err(ValidationError::Required("New password"));
        }
        if new.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ValidationError::TooShort {
                field: "Password",
                min: MIN_PASSWORD_CHARS,
            });
        }

        if confirm.is_empty() {
            return Err(ValidationError::MissingConfirmation);
        }
        if confirm != new {
            return Err(ValidationError::PasswordMismatch);
        }

        tracing::info!("Password changed");
        self.bus.emit(Event::PasswordChanged);
        Ok(())
    }
}
