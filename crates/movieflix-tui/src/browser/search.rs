//! Search sequencing: debounce bookkeeping and stale-response filtering.

use std::time::Duration;

use super::debounce::Debouncer;

/// Where the search for the current query stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Query is blank; results are empty.
    Idle,
    /// Query changed and the debounce timer is running; previous results remain.
    Pending,
    /// Timer elapsed and the search fetch is in flight.
    Loading,
    /// The latest dispatched search has resolved.
    Settled,
}

/// Tracks input and dispatch sequence numbers for the search query.
///
/// Every query edit gets a new input number. A timer only dispatches if its
/// input number is still the latest, and a response is only applied if it
/// belongs to the latest dispatched search.
#[derive(Debug)]
pub struct SearchTracker {
    debouncer: Debouncer,
    /// Sequence number of the most recent query edit.
    latest_input: u64,
    /// Input waiting for its debounce timer, if any.
    pending_input: Option<u64>,
    /// Input whose fetch was dispatched most recently.
    latest_dispatched: Option<u64>,
}

impl SearchTracker {
    /// Creates a tracker with the given debounce delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(delay),
            latest_input: 0,
            pending_input: None,
            latest_dispatched: None,
        }
    }

    /// Registers a query edit and returns its sequence number.
    pub const fn next_input(&mut self) -> u64 {
        self.latest_input = self.latest_input.wrapping_add(1);
        self.pending_input = Some(self.latest_input);
        self.latest_input
    }

    /// Gives access to the debounce timer.
    pub const fn debouncer(&mut self) -> &mut Debouncer {
        &mut self.debouncer
    }

    /// Whether `seq` is the latest query edit and still waiting for dispatch.
    #[must_use]
    pub fn is_due(&self, seq: u64) -> bool {
        self.pending_input == Some(seq)
    }

    /// Records that the fetch for `seq` was dispatched.
    pub const fn mark_dispatched(&mut self, seq: u64) {
        self.pending_input = None;
        self.latest_dispatched = Some(seq);
    }

    /// Whether a response for `seq` should replace the results.
    #[must_use]
    pub fn accepts(&self, seq: u64) -> bool {
        self.latest_dispatched == Some(seq)
    }

    /// Marks the latest dispatched search as applied.
    pub const fn settle(&mut self) {
        self.latest_dispatched = None;
    }

    /// Whether a debounce timer is waiting.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending_input.is_some()
    }

    /// Cancels the timer and invalidates every outstanding search.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
        self.latest_input = self.latest_input.wrapping_add(1);
        self.pending_input = None;
        self.latest_dispatched = None;
    }
}
