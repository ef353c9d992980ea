//! The parking lot facade
//!
//! Ties the spot registry, the ticket store and the rate table together and
//! notifies observers whenever a vehicle enters or leaves.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::fmt;

use super::error::LotError;
use super::fee::{billable_hours, RateTable};
use super::registry::{Availability, SpotRegistry};
use super::spot::ParkingSpot;
use super::ticket::{Ticket, TicketStore};
use super::types::{SpotId, SpotSize, TicketId, Vehicle};

/// State change reported to observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LotEvent {
    CheckedIn {
        ticket_id: TicketId,
        spot_id: SpotId,
        plate: String,
    },
    CheckedOut {
        ticket_id: TicketId,
        spot_id: SpotId,
        plate: String,
        fee: u64,
    },
}

impl fmt::Display for LotEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LotEvent::CheckedIn {
                ticket_id,
                spot_id,
                plate,
            } => write!(f, "{} checked in at {} ({})", plate, spot_id, ticket_id),
            LotEvent::CheckedOut {
                ticket_id,
                spot_id,
                plate,
                fee,
            } => write!(f, "{} left {} ({}, fee {})", plate, spot_id, ticket_id, fee),
        }
    }
}

/// Callback invoked after every check-in and check-out
pub type Observer = Box<dyn FnMut(&LotEvent) + Send>;

/// The main parking lot
pub struct ParkingLot {
    registry: SpotRegistry,
    tickets: TicketStore,
    rates: RateTable,
    observers: Vec<Observer>,
}

impl Default for ParkingLot {
    fn default() -> Self {
        Self::new()
    }
}

impl ParkingLot {
    pub fn new() -> Self {
        Self::with_rates(RateTable::default())
    }

    pub fn with_rates(rates: RateTable) -> Self {
        Self {
            registry: SpotRegistry::new(),
            tickets: TicketStore::new(),
            rates,
            observers: Vec::new(),
        }
    }

    /// Add an unoccupied spot to the lot
    pub fn add_spot(&mut self, id: impl Into<String>, size: SpotSize) -> Result<SpotId, LotError> {
        let id = SpotId::new(id);
        self.registry
            .add_spot(ParkingSpot::new(id.clone(), size))?;
        Ok(id)
    }

    /// Observers run in registration order
    pub fn register_observer(&mut self, observer: impl FnMut(&LotEvent) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, event: &LotEvent) {
        for observer in &mut self.observers {
            observer(event);
        }
    }

    /// Park a vehicle now
    pub fn check_in(&mut self, vehicle: &Vehicle) -> Result<TicketId, LotError> {
        self.check_in_at(vehicle, Utc::now())
    }

    /// Park a vehicle with an explicit entry time
    pub fn check_in_at(
        &mut self,
        vehicle: &Vehicle,
        entry_time: DateTime<Utc>,
    ) -> Result<TicketId, LotError> {
        let Some(spot_id) = self.registry.allocate(vehicle.size(), vehicle.plate()) else {
            warn!("No spot for {} {}", vehicle.size(), vehicle.plate());
            return Err(LotError::NoSpotAvailable(vehicle.size()));
        };

        let ticket_id = self
            .tickets
            .create(spot_id.clone(), vehicle, entry_time);
        debug!("Vehicle {} parked at {} (Ticket {})", vehicle.plate(), spot_id, ticket_id);

        self.notify(&LotEvent::CheckedIn {
            ticket_id,
            spot_id,
            plate: vehicle.plate().to_string(),
        });
        Ok(ticket_id)
    }

    /// Close a ticket now and return the fee
    pub fn check_out(&mut self, ticket_id: TicketId) -> Result<u64, LotError> {
        self.check_out_at(ticket_id, Utc::now())
    }

    /// Close a ticket with an explicit exit time and return the fee.
    /// Fails without touching any state if the ticket is unknown or closed.
    pub fn check_out_at(
        &mut self,
        ticket_id: TicketId,
        exit_time: DateTime<Utc>,
    ) -> Result<u64, LotError> {
        let ticket = self.tickets.get(ticket_id)?;
        if !ticket.is_open() {
            return Err(LotError::TicketAlreadyClosed(ticket_id));
        }
        let hours = billable_hours(ticket.entry_time, exit_time)
            .ok_or(LotError::ExitBeforeEntry(ticket_id))?;
        let fee = self
            .rates
            .fee(ticket.vehicle_size, hours)
            .ok_or(LotError::FeeOverflow(ticket_id))?;
        let spot_id = ticket.spot_id.clone();

        self.registry.free(&spot_id)?;
        let ticket = self.tickets.close(ticket_id, exit_time, fee)?;
        debug!("Vehicle {} exited. Fee: ${}", ticket.plate, fee);

        let event = LotEvent::CheckedOut {
            ticket_id,
            spot_id,
            plate: ticket.plate.clone(),
            fee,
        };
        self.notify(&event);
        Ok(fee)
    }

    pub fn availability(&self) -> Availability {
        self.registry.availability_counts()
    }

    pub fn ticket(&self, ticket_id: TicketId) -> Result<&Ticket, LotError> {
        self.tickets.get(ticket_id)
    }

    /// Every ticket ever issued, oldest first
    pub fn tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter()
    }

    pub fn open_tickets(&self) -> usize {
        self.tickets.open_count()
    }

    /// Total fees collected so far
    pub fn revenue(&self) -> u64 {
        self.tickets.total_revenue()
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn spots(&self) -> &SpotRegistry {
        &self.registry
    }

    /// Print the free spot count per size class
    pub fn print_availability(&self) {
        println!("Availability: {}", self.availability());
    }
}
