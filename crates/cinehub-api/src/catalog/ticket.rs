//! Request tickets for discarding stale asynchronous results.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of process-unique counter identities.
static NEXT_COUNTER_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque token handed out when a fetch starts.
///
/// A result is applied only when its ticket is still the latest one
/// issued by the same [`TicketCounter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    counter: u64,
    serial: u64,
}

/// Issues monotonically increasing tickets.
///
/// Each counter carries its own identity, so tickets from another
/// counter are never accepted even when their serials coincide.
#[derive(Debug)]
pub struct TicketCounter {
    id: u64,
    latest: u64,
}

impl TicketCounter {
    /// Creates a counter that has issued nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_COUNTER_ID.fetch_add(1, Ordering::Relaxed),
            latest: 0,
        }
    }

    /// Issues a new ticket, invalidating every earlier one.
    pub const fn issue(&mut self) -> Ticket {
        self.latest = self.latest.wrapping_add(1);
        Ticket {
            counter: self.id,
            serial: self.latest,
        }
    }

    /// Whether `ticket` is the most recently issued one of this counter.
    #[must_use]
    pub const fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest != 0 && ticket.counter == self.id && ticket.serial == self.latest
    }
}

impl Default for TicketCounter {
    fn default() -> Self {
        Self::new()
    }
}
