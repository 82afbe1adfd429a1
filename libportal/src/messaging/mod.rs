//! Messaging inbox
//!
//! - `store`: contacts, the active conversation and per-contact threads
//! - `reply`: keyword-matched canned replies
//! - `delivery`: cancellable delayed delivery of those replies
//!
//! The store is the only owner of conversation state. Delayed replies
//! never touch it directly: they arrive as `ScheduledReply` values that
//! the owner applies (see `service::messaging::MessagingService`).

pub mod delivery;
pub mod reply;
pub mod store;

pub use delivery::{ReplyHandle, ReplyScheduler, ScheduledReply};
pub use reply::{ReplyEngine, ReplyRule};
pub use store::ConversationStore;
