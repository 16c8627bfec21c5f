//! Hash-indexed in-memory spot table and ticket ledger.

use std::collections::BTreeSet;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{
    spot::ParkingSpot,
    ticket::{Ticket, TicketDraft},
    types::{SpotId, TicketId, VehicleType},
};

use super::{SessionStore, SpotRegistry, StoreError, StoreResult};

/// Spot registry keeping a sorted free list per vehicle type.
#[derive(Debug, Default)]
pub struct SpotTable {
    spots: HashMap<SpotId, ParkingSpot>,
    free: HashMap<VehicleType, BTreeSet<SpotId>>,
}

impl SpotTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table of free spots from `(id, type)` pairs.
    pub fn with_spots(spots: impl IntoIterator<Item = (SpotId, VehicleType)>) -> StoreResult<Self> {
        let mut table = Self::new();
        for (id, vehicle_type) in spots {
            table.add_spot(ParkingSpot::new(id, vehicle_type, true))?;
        }
        Ok(table)
    }

    /// Registers a spot; numbers must be unique.
    pub fn add_spot(&mut self, spot: ParkingSpot) -> StoreResult<()> {
        if self.spots.contains_key(&spot.id) {
            return Err(StoreError::AlreadyExists(u64::from(spot.id)));
        }
        if spot.is_available {
            self.free.entry(spot.vehicle_type).or_default().insert(spot.id);
        }
        self.spots.insert(spot.id, spot);
        Ok(())
    }

    /// Current state of spot `id`.
    pub fn get(&self, id: SpotId) -> Option<&ParkingSpot> {
        self.spots.get(&id)
    }

    /// Number of free spots of `vehicle_type`.
    pub fn available_count(&self, vehicle_type: VehicleType) -> usize {
        self.free.get(&vehicle_type).map_or(0, BTreeSet::len)
    }

    /// Total number of registered spots.
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// True when no spot is registered.
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }
}

impl SpotRegistry for SpotTable {
    fn next_available_slot(&self, vehicle_type: VehicleType) -> StoreResult<Option<SpotId>> {
        Ok(self
            .free
            .get(&vehicle_type)
            .and_then(|ids| ids.first().copied()))
    }

    fn update_spot(&mut self, spot: &ParkingSpot) -> StoreResult<()> {
        let stored = self
            .spots
            .get_mut(&spot.id)
            .ok_or(StoreError::MissingSpot(spot.id))?;
        stored.is_available = spot.is_available;

        let free = self.free.entry(stored.vehicle_type).or_default();
        if stored.is_available {
            free.insert(stored.id);
        } else {
            free.remove(&stored.id);
        }
        Ok(())
    }
}

/// Serializable image of a [`TicketLedger`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshotV1 {
    /// Id the next saved ticket receives.
    pub next_ticket_id: TicketId,
    /// Tickets in save order.
    pub tickets: Vec<Ticket>,
}

/// Ticket history with a registration index.
#[derive(Debug, Default)]
pub struct TicketLedger {
    tickets: HashMap<TicketId, Ticket>,
    order: Vec<TicketId>,
    by_reg: HashMap<String, Vec<TicketId>>,
    next_ticket_id: TicketId,
}

impl TicketLedger {
    /// Creates an empty ledger; ids start at 1.
    pub fn new() -> Self {
        Self {
            next_ticket_id: 1,
            ..Self::default()
        }
    }

    /// Rebuilds a ledger and its index from `snapshot`.
    pub fn from_snapshot(snapshot: LedgerSnapshotV1) -> StoreResult<Self> {
        let mut ledger = Self::new();
        for ticket in snapshot.tickets {
            ledger.insert(ticket)?;
        }
        ledger.next_ticket_id = ledger.next_ticket_id.max(snapshot.next_ticket_id);
        Ok(ledger)
    }

    /// Exports all tickets in save order.
    pub fn export_snapshot(&self) -> LedgerSnapshotV1 {
        LedgerSnapshotV1 {
            next_ticket_id: self.next_ticket_id,
            tickets: self
                .order
                .iter()
                .filter_map(|id| self.tickets.get(id).cloned())
                .collect(),
        }
    }

    /// Ticket `id`, if saved.
    pub fn get(&self, id: TicketId) -> Option<&Ticket> {
        self.tickets.get(&id)
    }

    /// All tickets for `reg_number`, oldest first.
    pub fn by_reg(&self, reg_number: &str) -> Vec<&Ticket> {
        self.by_reg
            .get(reg_number)
            .into_iter()
            .flat_map(|ids| ids.iter())
            .filter_map(|id| self.tickets.get(id))
            .collect()
    }

    /// Ticket ids in save order.
    pub fn ordered_ids(&self) -> &[TicketId] {
        &self.order
    }

    /// Number of saved tickets.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when nothing was saved.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn insert(&mut self, ticket: Ticket) -> StoreResult<()> {
        if self.tickets.contains_key(&ticket.id) {
            return Err(StoreError::AlreadyExists(ticket.id));
        }
        let id = ticket.id;
        self.next_ticket_id = self.next_ticket_id.max(id.saturating_add(1));
        self.by_reg
            .entry(ticket.vehicle_reg_number.clone())
            .or_default()
            .push(id);
        self.order.push(id);
        self.tickets.insert(id, ticket);
        Ok(())
    }
}

impl SessionStore for TicketLedger {
    fn count_prior_sessions(&self, reg_number: &str) -> StoreResult<u32> {
        let count = self
            .by_reg(reg_number)
            .into_iter()
            .filter(|t| t.out_time.is_some())
            .count();
        u32::try_from(count)
            .map_err(|_| StoreError::Message(format!("session count overflow for {reg_number}")))
    }

    fn save_ticket(&mut self, draft: TicketDraft) -> StoreResult<Ticket> {
        let ticket = draft.into_ticket(self.next_ticket_id);
        self.insert(ticket.clone())?;
        Ok(ticket)
    }

    fn open_ticket(&self, reg_number: &str) -> StoreResult<Option<Ticket>> {
        Ok(self
            .by_reg(reg_number)
            .into_iter()
            .rev()
            .find(|t| t.out_time.is_none())
            .cloned())
    }

    fn update_ticket(&mut self, ticket: &Ticket) -> StoreResult<()> {
        let stored = self
            .tickets
            .get_mut(&ticket.id)
            .ok_or(StoreError::MissingTicket(ticket.id))?;

        if stored.vehicle_reg_number != ticket.vehicle_reg_number {
            remove_from_vec_index(
                self.by_reg.entry(stored.vehicle_reg_number.clone()).or_default(),
                ticket.id,
            );
            self.by_reg
                .entry(ticket.vehicle_reg_number.clone())
                .or_default()
                .push(ticket.id);
        }
        *stored = ticket.clone();
        Ok(())
    }
}

fn remove_from_vec_index(v: &mut Vec<TicketId>, id: TicketId) {
    if let Some(pos) = v.iter().position(|x| *x == id) {
        v.remove(pos);
    }
}
