//! Spot registry: every spot in the lot plus the free set of each size class

use log::debug;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use super::error::LotError;
use super::spot::ParkingSpot;
use super::types::{SpotId, SpotSize, VehicleSize};

/// Holds all spots and, per size class, the identifiers currently free.
///
/// A spot id is in exactly one free set while unoccupied and in none while
/// occupied. Free sets are ordered, so allocation within a class always
/// hands out the lowest id first.
#[derive(Debug, Default)]
pub struct SpotRegistry {
    spots: HashMap<SpotId, ParkingSpot>,
    free: BTreeMap<SpotSize, BTreeSet<SpotId>>,
}

impl SpotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new, unoccupied spot
    pub fn add_spot(&mut self, spot: ParkingSpot) -> Result<(), LotError> {
        if self.spots.contains_key(&spot.id) {
            return Err(LotError::DuplicateSpot(spot.id));
        }
        self.free
            .entry(spot.size)
            .or_default()
            .insert(spot.id.clone());
        self.spots.insert(spot.id.clone(), spot);
        Ok(())
    }

    /// Best-fit allocation: the smallest non-empty class that can host the
    /// vehicle. Marks the chosen spot occupied by `plate`.
    pub fn allocate(&mut self, size: VehicleSize, plate: &str) -> Option<SpotId> {
        let class = SpotSize::ALL
            .into_iter()
            .filter(|class| class.fits(size))
            .find(|class| self.free.get(class).is_some_and(|ids| !ids.is_empty()))?;

        let spot_id = self.free.get_mut(&class)?.pop_first()?;
        if let Some(spot) = self.spots.get_mut(&spot_id) {
            spot.occupy(plate);
        }
        debug!("Allocated {} spot {} to {} ({})", class, spot_id, plate, size);
        Some(spot_id)
    }

    /// Return a spot to its free set. Freeing an already free spot is a no-op.
    pub fn free(&mut self, spot_id: &SpotId) -> Result<(), LotError> {
        let spot = self
            .spots
            .get_mut(spot_id)
            .ok_or_else(|| LotError::SpotNotFound(spot_id.clone()))?;
        spot.release();
        self.free
            .entry(spot.size)
            .or_default()
            .insert(spot_id.clone());
        Ok(())
    }

    /// Free spot count per size class; every class is present
    pub fn availability_counts(&self) -> Availability {
        let counts = SpotSize::ALL
            .into_iter()
            .map(|size| (size, self.free.get(&size).map_or(0, BTreeSet::len)))
            .collect();
        Availability { counts }
    }

    pub fn spot(&self, spot_id: &SpotId) -> Option<&ParkingSpot> {
        self.spots.get(spot_id)
    }

    /// Total number of spots of a size class, free or not
    pub fn capacity(&self, size: SpotSize) -> usize {
        self.spots.values().filter(|s| s.size == size).count()
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }
}

/// Snapshot of free spots per size class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    counts: BTreeMap<SpotSize, usize>,
}

impl Availability {
    pub fn get(&self, size: SpotSize) -> usize {
        self.counts.get(&size).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpotSize, usize)> + '_ {
        self.counts.iter().map(|(size, count)| (*size, *count))
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(size, count)| format!("{}={}", size, count))
            .collect();
        f.write_str(&parts.join(" "))
    }
}
