//! Thread-safe handle to a parking lot

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use super::error::LotError;
use super::manager::ParkingLot;
use super::registry::Availability;
use super::ticket::Ticket;
use super::types::{TicketId, Vehicle};

/// Cloneable handle that serializes every lot operation behind one lock,
/// so a spot is never handed out twice and ticket ids stay unique.
#[derive(Clone)]
pub struct SharedLot {
    inner: Arc<Mutex<ParkingLot>>,
}

impl SharedLot {
    pub fn new(lot: ParkingLot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(lot)),
        }
    }

    // Lot state is consistent between operations, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, ParkingLot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn check_in(&self, vehicle: &Vehicle) -> Result<TicketId, LotError> {
        self.lock().check_in(vehicle)
    }

    pub fn check_in_at(
        &self,
        vehicle: &Vehicle,
        entry_time: DateTime<Utc>,
    ) -> Result<TicketId, LotError> {
        self.lock().check_in_at(vehicle, entry_time)
    }

    pub fn check_out(&self, ticket_id: TicketId) -> Result<u64, LotError> {
        self.lock().check_out(ticket_id)
    }

    pub fn check_out_at(
        &self,
        ticket_id: TicketId,
        exit_time: DateTime<Utc>,
    ) -> Result<u64, LotError> {
        self.lock().check_out_at(ticket_id, exit_time)
    }

    pub fn availability(&self) -> Availability {
        self.lock().availability()
    }

    /// Snapshot of a ticket
    pub fn ticket(&self, ticket_id: TicketId) -> Result<Ticket, LotError> {
        self.lock().ticket(ticket_id).cloned()
    }

    /// Run `f` with exclusive access to the lot
    pub fn with_lot<R>(&self, f: impl FnOnce(&mut ParkingLot) -> R) -> R {
        f(&mut self.lock())
    }
}
