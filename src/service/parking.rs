//! Entry and exit workflow over injected collaborators.

use std::io;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
    error::FareError,
    registry::{SessionStore, SpotRegistry, StoreError},
    spot::ParkingSpot,
    ticket::{Ticket, TicketDraft},
};

use super::{
    allocator::next_available_spot_for_selection,
    fare::FareCalculator,
    input::InputReader,
};

/// Failure of one entry or exit.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Facility full, or the vehicle type selection was unusable.
    #[error("no parking spot available")]
    NoSpotAvailable,

    /// Registration number blank after trimming.
    #[error("invalid vehicle registration number: {0:?}")]
    InvalidRegistration(String),

    /// Exiting vehicle has no ticket without an exit time.
    #[error("no open ticket for vehicle {0}")]
    NoOpenTicket(String),

    /// Operator input channel failed.
    #[error("input error: {0}")]
    Input(#[from] io::Error),

    /// Pricing failed; the ticket stays open.
    #[error(transparent)]
    Fare(#[from] FareError),

    /// Collaborator call failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Entry/exit workflow over injected collaborators.
pub struct ParkingService<R, S, I>
where
    R: SpotRegistry,
    S: SessionStore,
    I: InputReader,
{
    registry: R,
    sessions: S,
    input: I,
    fares: FareCalculator,
}

impl<R, S, I> ParkingService<R, S, I>
where
    R: SpotRegistry,
    S: SessionStore,
    I: InputReader,
{
    /// Builds a service pricing with the default rate table.
    pub fn new(registry: R, sessions: S, input: I) -> Self {
        Self::with_calculator(registry, sessions, input, FareCalculator::default())
    }

    /// Builds a service pricing with `fares`.
    pub fn with_calculator(registry: R, sessions: S, input: I, fares: FareCalculator) -> Self {
        Self {
            registry,
            sessions,
            input,
            fares,
        }
    }

    /// Spot registry in use.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Session store in use.
    pub fn sessions(&self) -> &S {
        &self.sessions
    }

    /// Calculator pricing exits.
    pub fn fares(&self) -> &FareCalculator {
        &self.fares
    }

    /// Releases the collaborators.
    pub fn into_parts(self) -> (R, S, I) {
        (self.registry, self.sessions, self.input)
    }

    /// [`Self::process_incoming_vehicle_at`] stamped with the current time.
    pub fn process_incoming_vehicle(&mut self) -> Result<Ticket, ServiceError> {
        self.process_incoming_vehicle_at(Utc::now())
    }

    /// Assigns a spot and opens a ticket stamped `now`.
    ///
    /// If the ticket cannot be saved the spot is handed back to the registry.
    pub fn process_incoming_vehicle_at(&mut self, now: DateTime<Utc>) -> Result<Ticket, ServiceError> {
        let selection = match self.input.read_selection() {
            Ok(selection) => selection,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read vehicle type selection");
                return Err(ServiceError::NoSpotAvailable);
            }
        };

        let Some(mut spot) = next_available_spot_for_selection(&self.registry, selection) else {
            tracing::warn!(selection, "Entry denied, no parking spot available");
            return Err(ServiceError::NoSpotAvailable);
        };

        let reg_number = self.read_registration()?;

        match self.sessions.count_prior_sessions(&reg_number) {
            Ok(0) => {}
            Ok(prior) => tracing::info!(
                reg_number = %reg_number,
                prior_sessions = prior,
                "Returning customer, loyalty discount applies"
            ),
            Err(e) => tracing::warn!(
                reg_number = %reg_number,
                error = %e,
                "Unable to look up prior sessions"
            ),
        }

        spot.is_available = false;
        self.registry.update_spot(&spot)?;

        let ticket = match self.sessions.save_ticket(TicketDraft {
            vehicle_reg_number: reg_number,
            parking_spot: spot.clone(),
            in_time: now,
        }) {
            Ok(ticket) => ticket,
            Err(e) => {
                tracing::error!(spot_id = spot.id, error = %e, "Unable to save ticket");
                self.release_spot(spot);
                return Err(e.into());
            }
        };

        tracing::info!(
            ticket_id = ticket.id,
            spot_id = ticket.parking_spot.id,
            vehicle_type = %ticket.vehicle_type(),
            reg_number = %ticket.vehicle_reg_number,
            in_time = %ticket.in_time,
            "Vehicle parked"
        );
        Ok(ticket)
    }

    /// [`Self::process_exiting_vehicle_at`] stamped with the current time.
    pub fn process_exiting_vehicle(&mut self) -> Result<Ticket, ServiceError> {
        self.process_exiting_vehicle_at(Utc::now())
    }

    /// Closes and prices the open ticket of the vehicle, then frees its spot.
    ///
    /// The spot stays occupied if the priced ticket cannot be stored. Once the
    /// ticket is stored the priced ticket is returned even if freeing the spot
    /// fails.
    pub fn process_exiting_vehicle_at(&mut self, now: DateTime<Utc>) -> Result<Ticket, ServiceError> {
        let reg_number = self.read_registration()?;
        let mut ticket = self
            .sessions
            .open_ticket(&reg_number)?
            .ok_or_else(|| ServiceError::NoOpenTicket(reg_number.clone()))?;

        ticket.out_time = Some(now);
        self.fares.calculate_fare(&mut ticket, &self.sessions)?;

        if let Err(e) = self.sessions.update_ticket(&ticket) {
            tracing::error!(
                ticket_id = ticket.id,
                error = %e,
                "Unable to update ticket information"
            );
            return Err(e.into());
        }

        ticket.parking_spot.is_available = true;
        self.release_spot(ticket.parking_spot.clone());

        tracing::info!(
            ticket_id = ticket.id,
            spot_id = ticket.parking_spot.id,
            reg_number = %ticket.vehicle_reg_number,
            price = ticket.price.unwrap_or_default(),
            "Vehicle exited"
        );
        Ok(ticket)
    }

    fn release_spot(&mut self, mut spot: ParkingSpot) {
        spot.is_available = true;
        if let Err(e) = self.registry.update_spot(&spot) {
            tracing::error!(spot_id = spot.id, error = %e, "Unable to release parking spot");
        }
    }

    fn read_registration(&mut self) -> Result<String, ServiceError> {
        let raw = self.input.read_vehicle_registration_number()?;
        let reg_number = raw.trim();
        if reg_number.is_empty() {
            tracing::warn!("Empty vehicle registration number");
            return Err(ServiceError::InvalidRegistration(raw));
        }
        Ok(reg_number.to_string())
    }
}
