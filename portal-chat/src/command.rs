//! Line command parser
//!
//! Lines starting with `/` are commands; anything else is a message to the
//! active contact. Parsing is pure: it never touches the service.

use chrono::NaiveDate;
use libportal::service::calendar::AppointmentRequest;
use libportal::service::notifications::NotificationFilter;
use libportal::service::settings::{FeedbackForm, PasswordForm};
use libportal::types::ResourceKind;
use libportal::ContactId;

use crate::error::{ChatError, Result};

/// Date format accepted by `/events` and `/book`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Contacts,
    Add { name: String, role: String },
    Select(ContactId),
    Thread,
    Events(NaiveDate),
    Book(AppointmentRequest),
    Unbook(u32),
    Undo,
    Notifications(NotificationFilter),
    Read(u32),
    ReadAll,
    Dismiss(u32),
    Resources {
        query: String,
        kind: Option<ResourceKind>,
    },
    Feedback(FeedbackForm),
    Password(PasswordForm),
    Quit,
    /// Plain text for the active contact
    Send(String),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let Some(rest) = line.trim_start().strip_prefix('/') else {
        return Ok(Some(Command::Send(line.to_string())));
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    let command = match name {
        "help" | "?" => Command::Help,
        "contacts" => Command::Contacts,
        "add" => {
            let mut parts = args.splitn(2, '|').map(str::trim);
            Command::Add {
                name: parts.next().unwrap_or_default().to_string(),
                role: parts.next().unwrap_or_default().to_string(),
            }
        }
        "select" => Command::Select(ContactId(parse_id(args, "/select ID")?)),
        "thread" => Command::Thread,
        "events" => Command::Events(parse_date(args)?),
        "book" => Command::Book(parse_appointment(args)?),
        "unbook" => Command::Unbook(parse_id(args, "/unbook ID")?),
        "undo" => Command::Undo,
        "notifications" => Command::Notifications(
            args.parse()
                .map_err(|_| ChatError::Command(format!("Unknown notification filter: {}", args)))?,
        ),
        "read" => Command::Read(parse_id(args, "/read ID")?),
        "read-all" => Command::ReadAll,
        "dismiss" => Command::Dismiss(parse_id(args, "/dismiss ID")?),
        "resources" => parse_resources(args)?,
        "feedback" => Command::Feedback(parse_feedback(args)?),
        "password" => {
            let parts: Vec<&str> = args.split('|').map(str::trim).collect();
            let part = |i: usize| parts.get(i).copied().unwrap_or_default();
            Command::Password(PasswordForm::new(part(0), part(1), part(2)))
        }
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(ChatError::Command(format!(
                "Unknown command: /{} (try /help)",
                other
            )))
        }
    };
    Ok(Some(command))
}

fn parse_id<T: std::str::FromStr>(args: &str, usage: &str) -> Result<T> {
    args.parse()
        .map_err(|_| ChatError::Command(format!("Usage: {}", usage)))
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ChatError::Command(format!(
            "Invalid date '{}', expected YYYY-MM-DD",
            value.trim()
        ))
    })
}

// TEACHER | DATE | TIME | REASON; missing parts stay empty so the calendar
// reports which field is required.
fn parse_appointment(args: &str) -> Result<AppointmentRequest> {
    let parts: Vec<&str> = args.split('|').map(str::trim).collect();
    let part = |i: usize| parts.get(i).copied().unwrap_or_default();

    let date = match part(1) {
        "" => None,
        value => Some(parse_date(value)?),
    };

    Ok(AppointmentRequest {
        teacher: part(0).to_string(),
        date,
        time: part(2).to_string(),
        reason: part(3).to_string(),
    })
}

// [--anonymous] SUBJECT | MESSAGE [| TYPE]
fn parse_feedback(args: &str) -> Result<FeedbackForm> {
    let (anonymous, args) = match args.strip_prefix("--anonymous") {
        Some(rest) => (true, rest.trim_start()),
        None => (false, args),
    };
    let mut parts = args.splitn(3, '|').map(str::trim);
    let subject = parts.next().unwrap_or_default().to_string();
    let message = parts.next().unwrap_or_default().to_string();
    let kind = parts
        .next()
        .unwrap_or_default()
        .parse()
        .map_err(ChatError::Command)?;

    Ok(FeedbackForm {
        kind,
        subject,
        message,
        anonymous,
    })
}

fn parse_resources(args: &str) -> Result<Command> {
    let (query, kind) = match args.split_once("--kind") {
        Some((query, kind)) => {
            let kind = kind
                .trim()
                .parse()
                .map_err(|_| ChatError::Command(format!("Unknown resource kind: {}", kind.trim())))?;
            (query.trim(), Some(kind))
        }
        None => (args, None),
    };
    Ok(Command::Resources {
        query: query.to_string(),
        kind,
    })
}
