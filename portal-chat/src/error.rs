//! Error types for portal-chat
//!
//! Wraps service layer errors and terminal IO errors, plus the client's own
//! command parsing failures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    /// Service layer error
    #[error("{0}")]
    Service(#[from] libportal::PortalError),

    /// Terminal/IO error
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// A line that looked like a command but could not be parsed
    #[error("{0}")]
    Command(String),
}

impl ChatError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ChatError::Service(e) => e.exit_code(),
            ChatError::Terminal(_) => 1,
            ChatError::Command(_) => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
