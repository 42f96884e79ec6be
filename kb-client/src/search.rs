//! Sequenced search
//!
//! Each keystroke-triggered query takes a ticket. Only the response of the
//! newest ticket is applied; a slower earlier response arriving later is
//! dropped.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Delay between the last keystroke and the user search request
pub const USER_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Sequence number of an issued query
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Hands out tickets and remembers the newest
#[derive(Debug, Clone, Default)]
pub struct SearchSequencer {
    latest: Arc<AtomicU64>,
}

impl SearchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// `Some(response)` if `ticket` is still the newest, `None` otherwise
    pub fn accept<T>(&self, ticket: Ticket, response: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(response)
        } else {
            tracing::warn!(ticket = ticket.0, "Discarding stale search response");
            None
        }
    }

    /// Issue a ticket, run the query and keep its result only if still newest
    pub async fn run<T, F>(&self, query: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let ticket = self.issue();
        let response = query.await;
        self.accept(ticket, response)
    }

    /// Wait `delay`, then run the query unless a newer one was issued meanwhile
    pub async fn debounced<T, F>(&self, delay: Duration, query: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let ticket = self.issue();
        tokio::time::sleep(delay).await;
        if !self.is_current(ticket) {
            tracing::debug!(ticket = ticket.0, "Search superseded during debounce");
            return None;
        }
        let response = query.await;
        self.accept(ticket, response)
    }
}
