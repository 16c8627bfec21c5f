//! Collaborator traits the core prices and allocates against.

use thiserror::Error;

use crate::{
    spot::ParkingSpot,
    ticket::{Ticket, TicketDraft},
    types::{SpotId, TicketId, VehicleType},
};

/// In-memory implementations of the collaborator traits.
pub mod memory;

/// Collaborator failure surfaced to the core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No spot with this number is registered.
    #[error("parking spot {0} not found")]
    MissingSpot(SpotId),
    /// No ticket with this id was saved.
    #[error("ticket {0} not found")]
    MissingTicket(TicketId),
    /// A record with this key is already present.
    #[error("record {0} already exists")]
    AlreadyExists(u64),
    /// Backend-specific failure.
    #[error("{0}")]
    Message(String),
}

/// Result alias for collaborator calls.
pub type StoreResult<T> = Result<T, StoreError>;

/// Source of truth for spot availability.
pub trait SpotRegistry {
    /// Lowest-numbered free spot of `vehicle_type`, or `None` when full.
    fn next_available_slot(&self, vehicle_type: VehicleType) -> StoreResult<Option<SpotId>>;

    /// Persists the availability flag of `spot`.
    fn update_spot(&mut self, spot: &ParkingSpot) -> StoreResult<()>;
}

/// Ticket history used for discounts and the entry/exit workflow.
pub trait SessionStore {
    /// Number of completed sessions recorded for `reg_number`.
    fn count_prior_sessions(&self, reg_number: &str) -> StoreResult<u32>;

    /// Stores a new open ticket and returns it with its assigned id.
    fn save_ticket(&mut self, draft: TicketDraft) -> StoreResult<Ticket>;

    /// Latest ticket for `reg_number` that has no exit time.
    fn open_ticket(&self, reg_number: &str) -> StoreResult<Option<Ticket>>;

    /// Replaces the stored ticket with the same id.
    fn update_ticket(&mut self, ticket: &Ticket) -> StoreResult<()>;
}
