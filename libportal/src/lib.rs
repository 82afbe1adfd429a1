//! Portal - in-memory core of a parent-teacher portal
//!
//! This library owns all portal state (conversations, calendar,
//! notifications, resources) and exposes typed operations that a
//! presentation layer can drive without touching the state directly.

pub mod config;
pub mod error;
pub mod logging;
pub mod messaging;
pub mod sample;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{PortalError, Result, ValidationError};
pub use messaging::{ConversationStore, ReplyEngine, ReplyScheduler};
pub use service::PortalService;
pub use types::{Contact, ContactId, Message};
