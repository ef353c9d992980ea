//! Tickets and the store that issues them

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use super::error::LotError;
use super::types::{SpotId, TicketId, TicketStatus, Vehicle, VehicleSize};

/// Record of one parking session
#[derive(Debug, Clone)]
pub struct Ticket {
    pub id: TicketId,
    pub spot_id: SpotId,
    pub plate: String,
    pub vehicle_size: VehicleSize,
    pub entry_time: DateTime<Utc>,
    /// Set at checkout
    pub exit_time: Option<DateTime<Utc>>,
    /// Set at checkout
    pub fee: Option<u64>,
    pub status: TicketStatus,
}

impl Ticket {
    fn new(id: TicketId, spot_id: SpotId, vehicle: &Vehicle, entry_time: DateTime<Utc>) -> Self {
        Self {
            id,
            spot_id,
            plate: vehicle.plate().to_string(),
            vehicle_size: vehicle.size(),
            entry_time,
            exit_time: None,
            fee: None,
            status: TicketStatus::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == TicketStatus::Open
    }
}

/// Issues sequential ticket ids and keeps every ticket for history
#[derive(Debug)]
pub struct TicketStore {
    tickets: BTreeMap<TicketId, Ticket>,
    next_id: u64,
}

impl Default for TicketStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketStore {
    pub fn new() -> Self {
        Self {
            tickets: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Open a ticket for `vehicle` parked at `spot_id`
    pub fn create(
        &mut self,
        spot_id: SpotId,
        vehicle: &Vehicle,
        entry_time: DateTime<Utc>,
    ) -> TicketId {
        let id = TicketId(self.next_id);
        self.next_id += 1;
        self.tickets
            .insert(id, Ticket::new(id, spot_id, vehicle, entry_time));
        id
    }

    pub fn get(&self, id: TicketId) -> Result<&Ticket, LotError> {
        self.tickets.get(&id).ok_or(LotError::TicketNotFound(id))
    }

    /// Close an open ticket. Closed tickets are never modified again.
    pub(crate) fn close(
        &mut self,
        id: TicketId,
        exit_time: DateTime<Utc>,
        fee: u64,
    ) -> Result<&Ticket, LotError> {
        let ticket = self
            .tickets
            .get_mut(&id)
            .ok_or(LotError::TicketNotFound(id))?;
        if !ticket.is_open() {
            return Err(LotError::TicketAlreadyClosed(id));
        }
        ticket.exit_time = Some(exit_time);
        ticket.fee = Some(fee);
        ticket.status = TicketStatus::Closed;
        Ok(ticket)
    }

    /// All tickets in issue order
    pub fn iter(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.values()
    }

    pub fn open_count(&self) -> usize {
        self.tickets.values().filter(|t| t.is_open()).count()
    }

    /// Sum of fees collected on closed tickets, saturating at `u64::MAX`
    pub fn total_revenue(&self) -> u64 {
        self.tickets
            .values()
            .filter_map(|t| t.fee)
            .fold(0, u64::saturating_add)
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}
