//! Parking session record, draft, and lifecycle state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    spot::ParkingSpot,
    types::{TicketId, VehicleType},
};

/// Where a ticket sits in its one-way lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketState {
    /// Spot assigned, vehicle still parked.
    Open,
    /// Exit time recorded, not priced yet.
    Closed,
    /// Price computed; the ticket no longer changes.
    Priced,
}

/// One vehicle's stay from entry to exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Stable ticket identifier.
    pub id: TicketId,
    /// Vehicle registration number.
    pub vehicle_reg_number: String,
    /// Spot held for the duration of the stay.
    pub parking_spot: ParkingSpot,
    /// Entry timestamp.
    pub in_time: DateTime<Utc>,
    /// Exit timestamp, unset while the vehicle is parked.
    pub out_time: Option<DateTime<Utc>>,
    /// Fare, unset until priced.
    pub price: Option<f64>,
}

impl Ticket {
    /// Current lifecycle state, derived from which fields are set.
    pub fn state(&self) -> TicketState {
        match (self.out_time, self.price) {
            (_, Some(_)) => TicketState::Priced,
            (Some(_), None) => TicketState::Closed,
            (None, None) => TicketState::Open,
        }
    }

    /// Category of the assigned spot.
    pub fn vehicle_type(&self) -> VehicleType {
        self.parking_spot.vehicle_type
    }
}

/// Insert payload used to open a new [`Ticket`].
#[derive(Debug, Clone, PartialEq)]
pub struct TicketDraft {
    /// Vehicle registration number.
    pub vehicle_reg_number: String,
    /// Spot assigned at entry.
    pub parking_spot: ParkingSpot,
    /// Entry timestamp.
    pub in_time: DateTime<Utc>,
}

impl TicketDraft {
    /// Materializes the draft under `id` with exit time and price unset.
    pub fn into_ticket(self, id: TicketId) -> Ticket {
        Ticket {
            id,
            vehicle_reg_number: self.vehicle_reg_number,
            parking_spot: self.parking_spot,
            in_time: self.in_time,
            out_time: None,
            price: None,
        }
    }
}
