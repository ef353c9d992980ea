//! Parking spot record

use super::types::{SpotId, SpotSize};

/// A single labeled spot in the lot
#[derive(Debug, Clone)]
pub struct ParkingSpot {
    pub id: SpotId,
    pub size: SpotSize,
    /// Plate of the vehicle currently parked here (if any)
    occupied_by: Option<String>,
}

impl ParkingSpot {
    pub fn new(id: SpotId, size: SpotSize) -> Self {
        Self {
            id,
            size,
            occupied_by: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.occupied_by.is_none()
    }

    /// Plate of the occupying vehicle, only set while occupied
    pub fn plate(&self) -> Option<&str> {
        self.occupied_by.as_deref()
    }

    pub fn occupy(&mut self, plate: &str) {
        self.occupied_by = Some(plate.to_string());
    }

    pub fn release(&mut self) {
        self.occupied_by = None;
    }
}
