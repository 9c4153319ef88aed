//! At-most-one-in-flight guard for the wizard's async operations.
//!
//! Every request is issued with a [`Ticket`]. A resolution is applied only if
//! its ticket still matches the gate's current generation; invalidating the
//! gate (source fields edited, wizard cancelled, view closed) makes any
//! outstanding ticket stale so its result is dropped.

/// Proof that a request was started through a [`RequestGate`]. Not `Clone`: a
/// request resolves at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestGate {
    generation: u64,
    in_flight: bool,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Start a request, or `None` if one is already pending
    pub fn try_begin(&mut self) -> Option<Ticket> {
        if self.in_flight {
            return None;
        }
        self.generation += 1;
        self.in_flight = true;
        Some(Ticket {
            generation: self.generation,
        })
    }

    /// Close the request identified by `ticket`. Returns `false` for stale tickets,
    /// in which case the caller must drop the result.
    pub fn finish(&mut self, ticket: Ticket) -> bool {
        if self.in_flight && ticket.generation == self.generation {
            self.in_flight = false;
            true
        } else {
            false
        }
    }

    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.in_flight = false;
    }

    /// Fresh idle gate that will never accept a ticket issued by `self`
    pub fn successor(&self) -> Self {
        Self {
            generation: self.generation + 1,
            in_flight: false,
        }
    }
}
