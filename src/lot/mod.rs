//! Parking lot core
//!
//! Spot allocation, ticketing and fee calculation. Everything here runs
//! in memory and can be driven from tests, the scripted demo or the
//! headless simulation.

mod error;
mod fee;
mod manager;
mod registry;
mod shared;
mod simulation;
mod spot;
mod ticket;
mod types;

pub use error::LotError;
pub use fee::{after_minutes, billable_hours, RateTable, RATE_BUS, RATE_CAR, RATE_MOTORCYCLE};
pub use manager::{LotEvent, Observer, ParkingLot};
pub use registry::{Availability, SpotRegistry};
pub use shared::SharedLot;
pub use simulation::{LotSimulation, SimulationConfig, SimulationStats};
pub use spot::ParkingSpot;
pub use ticket::{Ticket, TicketStore};
pub use types::{SpotId, SpotSize, TicketId, TicketStatus, Vehicle, VehicleSize};
