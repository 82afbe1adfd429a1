//! Delayed reply delivery
//!
//! Simulates the counterpart typing: a reply is chosen immediately but only
//! delivered after a fixed delay. Each pending reply is a Tokio task that
//! sleeps, then sends a `ScheduledReply` over a channel. The task never
//! touches conversation state; whoever owns the store applies the reply.
//!
//! # Rules
//!
//! - At most one reply is pending per thread. Scheduling again for the same
//!   contact aborts the pending task and replaces it.
//! - Every scheduled reply carries a ticket. `complete` only accepts the
//!   ticket that is still pending, so a reply that was already in flight
//!   when it got superseded or cancelled is dropped.
//! - Dropping the scheduler aborts every pending task.

use std::collections::HashMap;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::error::{PortalError, Result};
use crate::messaging::reply::ReplyEngine;
use crate::types::ContactId;

/// Receiving side of the delivery channel
pub type ReplyReceiver = mpsc::UnboundedReceiver<ScheduledReply>;

/// A reply whose delay has elapsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledReply {
    pub contact_id: ContactId,
    pub ticket: u64,
    pub body: String,
}

/// Handle to one pending reply
#[derive(Debug, Clone)]
pub struct ReplyHandle {
    contact_id: ContactId,
    ticket: u64,
    abort: AbortHandle,
}

impl ReplyHandle {
    pub fn contact_id(&self) -> ContactId {
        self.contact_id
    }

    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    // Callers cancel through the scheduler so its pending map stays in sync
    fn abort(&self) {
        self.abort.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}

pub struct ReplyScheduler {
    engine: ReplyEngine,
    delay: Duration,
    next_ticket: u64,
    pending: HashMap<ContactId, ReplyHandle>,
    tx: mpsc::UnboundedSender<ScheduledReply>,
}

impl ReplyScheduler {
    /// Create a scheduler and the receiver its replies arrive on
    pub fn new(engine: ReplyEngine, delay: Duration) -> (Self, ReplyReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            engine,
            delay,
            next_ticket: 0,
            pending: HashMap::new(),
            tx,
        };
        (scheduler, rx)
    }

    /// Schedule the reply to `body` for the thread of `contact_id`
    ///
    /// Supersedes any reply still pending for that thread.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Runtime` when called outside a Tokio runtime.
    pub fn schedule(&mut self, contact_id: ContactId, body: &str) -> Result<ReplyHandle> {
        let runtime = Handle::try_current().map_err(|e| PortalError::Runtime(e.to_string()))?;

        if let Some(previous) = self.pending.remove(&contact_id) {
            previous.abort();
            tracing::debug!(contact_id = %contact_id, ticket = previous.ticket, "Superseded pending reply");
        }

        self.next_ticket += 1;
        let reply = ScheduledReply {
            contact_id,
            ticket: self.next_ticket,
            body: self.engine.generate_reply(body).to_string(),
        };

        let tx = self.tx.clone();
        let delay = self.delay;
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(reply).is_err() {
                // Receiver gone: the view was torn down
                tracing::trace!("Reply receiver dropped, discarding reply");
            }
        });

        let handle = ReplyHandle {
            contact_id,
            ticket: self.next_ticket,
            abort: task.abort_handle(),
        };
        self.pending.insert(contact_id, handle.clone());
        tracing::debug!(contact_id = %contact_id, ticket = handle.ticket, delay_ms = delay.as_millis() as u64, "Reply scheduled");
        Ok(handle)
    }

    /// Accept a delivered reply if it is still the pending one for its thread
    pub fn complete(&mut self, reply: &ScheduledReply) -> bool {
        match self.pending.get(&reply.contact_id) {
            Some(handle) if handle.ticket == reply.ticket => {
                self.pending.remove(&reply.contact_id);
                true
            }
            _ => {
                tracing::debug!(contact_id = %reply.contact_id, ticket = reply.ticket, "Dropping stale reply");
                false
            }
        }
    }

    /// Cancel the pending reply for one thread. Returns whether one existed.
    pub fn cancel(&mut self, contact_id: ContactId) -> bool {
        match self.pending.remove(&contact_id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Cancel the reply behind `handle` if it is still pending
    ///
    /// A handle that was superseded or already delivered is left alone, so
    /// a newer reply on the same thread survives.
    pub fn cancel_reply(&mut self, handle: &ReplyHandle) -> bool {
        let current = self
            .pending
            .get(&handle.contact_id)
            .is_some_and(|pending| pending.ticket == handle.ticket);
        current && self.cancel(handle.contact_id)
    }

    /// Cancel everything; returns the threads that had a reply pending
    pub fn cancel_all(&mut self) -> Vec<ContactId> {
        let mut cancelled: Vec<ContactId> = self
            .pending
            .drain()
            .map(|(id, handle)| {
                handle.abort();
                id
            })
            .collect();
        cancelled.sort();
        cancelled
    }

    pub fn is_pending(&self, contact_id: ContactId) -> bool {
        self.pending.contains_key(&contact_id)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl Drop for ReplyScheduler {
    fn drop(&mut self) {
        let cancelled = self.cancel_all();
        if !cancelled.is_empty() {
            tracing::debug!(count = cancelled.len(), "Cancelled pending replies on teardown");
        }
    }
}
