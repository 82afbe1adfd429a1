//! Core types for the portal

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Avatar used for every contact until real pictures exist
pub const PLACEHOLDER_AVATAR: &str = "/placeholder.svg?height=40&width=40";

// ============================================================================
// Messaging Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub u64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContactId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ContactId)
    }
}

/// A person the user can message; backs one conversation thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub role: String,
    pub avatar: String,
    pub initials: String,
    /// Preview of the most recent message sent in this thread
    pub last_message: String,
    /// Human label for the last activity ("10:30 AM", "Yesterday", ...)
    pub time: String,
    pub unread: bool,
}

impl Contact {
    /// Upper-cased first letter of each whitespace-separated token, at most two.
    ///
    /// ```
    /// use libportal::Contact;
    ///
    /// assert_eq!(Contact::initials_for("Jane Doe"), "JD");
    /// assert_eq!(Contact::initials_for("mary ann van dyke"), "MA");
    /// ```
    pub fn initials_for(name: &str) -> String {
        name.split_whitespace()
            .filter_map(|token| token.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Sequential within its thread, starting at 1
    pub id: u32,
    pub sender: String,
    pub content: String,
    pub time: String,
    /// True for the portal user's own messages
    pub is_self: bool,
}

// ============================================================================
// Calendar Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: u32,
    pub title: String,
    pub date: NaiveDate,
    /// Free-form time slot, e.g. "3:30 PM - 4:00 PM"
    pub time: String,
    pub location: String,
    pub description: String,
}

// ============================================================================
// Notification Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Message,
    Grade,
    Event,
    Resource,
    Attendance,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Grade => "grade",
            Self::Event => "event",
            Self::Resource => "resource",
            Self::Attendance => "attendance",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = String;

    /// Accepts both singular and the plural tab names ("messages", "grades").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().trim_end_matches('s') {
            "message" => Ok(Self::Message),
            "grade" => Ok(Self::Grade),
            "event" => Ok(Self::Event),
            "resource" => Ok(Self::Resource),
            "attendance" => Ok(Self::Attendance),
            _ => Err(format!("Unknown notification kind: '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub kind: NotificationKind,
    pub date: NaiveDateTime,
    pub read: bool,
}

// ============================================================================
// Resource Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Document,
    Video,
    Interactive,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Video => "video",
            Self::Interactive => "interactive",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().trim_end_matches('s') {
            "document" => Ok(Self::Document),
            "video" => Ok(Self::Video),
            "interactive" => Ok(Self::Interactive),
            _ => Err(format!("Unknown resource kind: '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: u32,
    pub title: String,
    pub kind: ResourceKind,
    pub subject: String,
    pub grade: String,
    pub date: NaiveDate,
    pub description: String,
}
