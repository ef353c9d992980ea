//! Core types for the parking lot
//!
//! Sizes, identifiers and the vehicle record shared by every other module.

use std::fmt;
use std::str::FromStr;

use super::error::LotError;

/// Size class of a vehicle. Determines the spot class it needs and its rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VehicleSize {
    Motorcycle,
    Car,
    Bus,
}

impl VehicleSize {
    pub const ALL: [VehicleSize; 3] = [
        VehicleSize::Motorcycle,
        VehicleSize::Car,
        VehicleSize::Bus,
    ];

    /// Smallest spot class that can host this vehicle
    pub fn required_spot(self) -> SpotSize {
        match self {
            VehicleSize::Motorcycle => SpotSize::Small,
            VehicleSize::Car => SpotSize::Medium,
            VehicleSize::Bus => SpotSize::Large,
        }
    }
}

impl fmt::Display for VehicleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VehicleSize::Motorcycle => "Motorcycle",
            VehicleSize::Car => "Car",
            VehicleSize::Bus => "Bus",
        };
        f.write_str(name)
    }
}

impl FromStr for VehicleSize {
    type Err = LotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "motorcycle" | "bike" => Ok(VehicleSize::Motorcycle),
            "car" => Ok(VehicleSize::Car),
            "bus" => Ok(VehicleSize::Bus),
            _ => Err(LotError::UnknownVehicleKind(s.to_string())),
        }
    }
}

/// Size class of a parking spot, ordered from smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpotSize {
    Small,
    Medium,
    Large,
}

impl SpotSize {
    /// All classes in ascending order, the order allocation searches them
    pub const ALL: [SpotSize; 3] = [SpotSize::Small, SpotSize::Medium, SpotSize::Large];

    /// Whether a spot of this class can host the given vehicle
    pub fn fits(self, vehicle: VehicleSize) -> bool {
        self >= vehicle.required_spot()
    }
}

impl fmt::Display for SpotSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpotSize::Small => "Small",
            SpotSize::Medium => "Medium",
            SpotSize::Large => "Large",
        };
        f.write_str(name)
    }
}

/// Lifecycle state of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Open,
    Closed,
}

/// Label of a parking spot, e.g. `M1`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpotId(pub String);

impl SpotId {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }
}

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ticket identifier, rendered as `T<n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TicketId(pub u64);

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// A vehicle arriving at the lot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    plate: String,
    size: VehicleSize,
}

impl Vehicle {
    pub fn new(plate: impl Into<String>, size: VehicleSize) -> Self {
        Self {
            plate: plate.into(),
            size,
        }
    }

    /// Build a vehicle from a textual kind (`car`, `bus`, `motorcycle`/`bike`)
    pub fn from_kind(kind: &str, plate: impl Into<String>) -> Result<Self, LotError> {
        Ok(Self::new(plate, kind.parse()?))
    }

    pub fn plate(&self) -> &str {
        &self.plate
    }

    pub fn size(&self) -> VehicleSize {
        self.size
    }
}
