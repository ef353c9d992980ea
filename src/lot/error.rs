//! Error types for lot operations

use thiserror::Error;

use super::types::{SpotId, TicketId, VehicleSize};

/// Every failure a lot operation can report. None of them leave the lot
/// in a partially updated state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LotError {
    #[error("Spot already exists: {0}")]
    DuplicateSpot(SpotId),

    #[error("Spot not found: {0}")]
    SpotNotFound(SpotId),

    #[error("No spot available for {0}")]
    NoSpotAvailable(VehicleSize),

    #[error("Ticket not found: {0}")]
    TicketNotFound(TicketId),

    #[error("Ticket already closed: {0}")]
    TicketAlreadyClosed(TicketId),

    #[error("Exit time precedes entry time for ticket {0}")]
    ExitBeforeEntry(TicketId),

    #[error("Fee for ticket {0} exceeds the representable amount")]
    FeeOverflow(TicketId),

    #[error("Time out of range: {0}")]
    TimeOutOfRange(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown vehicle kind: {0}")]
    UnknownVehicleKind(String),
}
