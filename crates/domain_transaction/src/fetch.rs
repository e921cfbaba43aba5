//! Stale fetch detection
//!
//! Every fetch is stamped with a ticket. Completing a fetch with a ticket
//! that is no longer current is a no-op, so a late response never
//! overwrites state that a newer fetch (or a reset) owns.

/// Identifies one fetch issued by a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Per-component fetch counter
#[derive(Debug, Default)]
pub struct FetchGeneration {
    current: u64,
}

impl FetchGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new fetch, superseding any outstanding one
    pub fn begin(&mut self) -> FetchTicket {
        self.current += 1;
        FetchTicket(self.current)
    }

    /// Whether a completing fetch is still the latest one
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.current
    }

    /// Drops every outstanding fetch
    pub fn invalidate(&mut self) {
        self.current += 1;
    }
}
