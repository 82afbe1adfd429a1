//! portal-chat library
//!
//! Exports the client's building blocks for testing.

pub mod app;
pub mod command;
pub mod error;
pub mod input;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use app::{reduce, Action, AppState};
pub use error::{ChatError, Result};
pub use session::Session;
