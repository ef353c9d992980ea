//! Headless traffic simulation over a parking lot
//!
//! Vehicles arrive at random, stay a random number of minutes and leave.
//! A seeded RNG makes runs reproducible.

use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use rand::SeedableRng;
use std::ops::RangeInclusive;

use super::error::LotError;
use super::fee::{after_minutes, RateTable};
use super::manager::ParkingLot;
use super::types::{SpotSize, TicketId, Vehicle, VehicleSize};

/// Shape of a simulated lot and its traffic
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub small_spots: usize,
    pub medium_spots: usize,
    pub large_spots: usize,
    /// Probability that a vehicle arrives during one tick
    pub arrival_chance: f64,
    pub min_stay_minutes: i64,
    pub max_stay_minutes: i64,
    pub rates: RateTable,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            small_spots: 4,
            medium_spots: 6,
            large_spots: 2,
            arrival_chance: 0.6,
            min_stay_minutes: 15,
            max_stay_minutes: 300,
            rates: RateTable::default(),
        }
    }
}

impl SimulationConfig {
    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), LotError> {
        if !(0.0..=1.0).contains(&self.arrival_chance) {
            return Err(LotError::InvalidConfig(format!(
                "arrival chance {} is not within [0, 1]",
                self.arrival_chance
            )));
        }
        if self.min_stay_minutes < 0 {
            return Err(LotError::InvalidConfig(format!(
                "minimum stay {} min is negative",
                self.min_stay_minutes
            )));
        }
        Ok(())
    }
}

/// Running totals for a simulation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub arrivals: u32,
    pub parked: u32,
    pub rejected: u32,
    pub departures: u32,
    pub revenue: u64,
    pub elapsed_minutes: i64,
}

impl SimulationStats {
    /// Share of arrivals that found a spot, in percent
    pub fn success_rate(&self) -> f32 {
        if self.arrivals > 0 {
            self.parked as f32 / self.arrivals as f32 * 100.0
        } else {
            0.0
        }
    }

    pub fn log_summary(&self) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Elapsed minutes: {}", self.elapsed_minutes);
        info!("Total arrivals: {}", self.arrivals);
        info!("Total parked: {}", self.parked);
        info!("Total rejected: {}", self.rejected);
        info!("Total departures: {}", self.departures);
        info!("Revenue: {}", self.revenue);
        info!("Success rate: {:.1}%", self.success_rate());
    }
}

/// A parking lot driven by simulated arrivals and departures
pub struct LotSimulation {
    pub lot: ParkingLot,

    /// Simulated wall clock
    pub clock: DateTime<Utc>,

    pub stats: SimulationStats,

    /// Vehicles currently parked with their planned departure
    parked: Vec<(TicketId, DateTime<Utc>)>,

    config: SimulationConfig,

    next_plate: usize,

    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,
}

impl LotSimulation {
    fn new_internal(config: SimulationConfig, rng: Option<StdRng>) -> Result<Self, LotError> {
        config.validate()?;
        let mut lot = ParkingLot::with_rates(config.rates);
        let layout = [
            ("S", SpotSize::Small, config.small_spots),
            ("M", SpotSize::Medium, config.medium_spots),
            ("L", SpotSize::Large, config.large_spots),
        ];
        for (prefix, size, count) in layout {
            for n in 1..=count {
                lot.add_spot(format!("{}{}", prefix, n), size)?;
            }
        }

        Ok(Self {
            lot,
            clock: Utc::now(),
            stats: SimulationStats::default(),
            parked: Vec::new(),
            config,
            next_plate: 1,
            rng,
        })
    }

    pub fn new(config: SimulationConfig) -> Result<Self, LotError> {
        Self::new_internal(config, None)
    }

    /// Create a simulation with a seeded RNG for reproducible runs
    pub fn new_with_seed(config: SimulationConfig, seed: u64) -> Result<Self, LotError> {
        Self::new_internal(config, Some(StdRng::seed_from_u64(seed)))
    }

    fn random_bool(&mut self, chance: f64) -> bool {
        match &mut self.rng {
            Some(rng) => rng.random_bool(chance),
            None => rand::rng().random_bool(chance),
        }
    }

    fn random_range(&mut self, range: RangeInclusive<i64>) -> i64 {
        match &mut self.rng {
            Some(rng) => rng.random_range(range),
            None => rand::rng().random_range(range),
        }
    }

    fn choose_random<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        match &mut self.rng {
            Some(rng) => slice.choose(rng),
            None => slice.choose(&mut rand::rng()),
        }
    }

    /// Number of vehicles currently parked
    pub fn parked_count(&self) -> usize {
        self.parked.len()
    }

    /// Advance the clock, let due vehicles leave, then maybe admit one arrival
    pub fn tick(&mut self, minutes: i64) -> Result<(), LotError> {
        let clock = after_minutes(self.clock, minutes)?;
        let elapsed = self
            .stats
            .elapsed_minutes
            .checked_add(minutes)
            .ok_or_else(|| LotError::TimeOutOfRange("elapsed minutes overflow".to_string()))?;
        self.clock = clock;
        self.stats.elapsed_minutes = elapsed;

        self.process_departures()?;

        if self.random_bool(self.config.arrival_chance) {
            self.process_arrival()?;
        }
        Ok(())
    }

    fn process_departures(&mut self) -> Result<(), LotError> {
        let now = self.clock;
        let (due, staying): (Vec<_>, Vec<_>) = self
            .parked
            .drain(..)
            .partition(|(_, departure)| *departure <= now);
        self.parked = staying;

        for (ticket_id, departure) in due {
            let fee = self.lot.check_out_at(ticket_id, departure)?;
            self.stats.departures += 1;
            self.stats.revenue = self.stats.revenue.saturating_add(fee);
        }
        Ok(())
    }

    fn process_arrival(&mut self) -> Result<(), LotError> {
        let size = self
            .choose_random(&VehicleSize::ALL)
            .copied()
            .unwrap_or(VehicleSize::Car);
        let plate = format!("SIM{:04}", self.next_plate);
        self.next_plate += 1;
        let min_stay = self.config.min_stay_minutes;
        let max_stay = self.config.max_stay_minutes.max(min_stay);
        let stay = self.random_range(min_stay..=max_stay);
        let departure = after_minutes(self.clock, stay)?;

        self.stats.arrivals += 1;
        let vehicle = Vehicle::new(plate, size);
        match self.lot.check_in_at(&vehicle, self.clock) {
            Ok(ticket_id) => {
                self.stats.parked += 1;
                self.parked.push((ticket_id, departure));
            }
            Err(LotError::NoSpotAvailable(_)) => {
                debug!("Turned away {} {}", size, vehicle.plate());
                self.stats.rejected += 1;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Print a summary of the lot state
    pub fn print_summary(&self) {
        println!("=== Parking Lot Summary ===");
        println!("Elapsed: {} min", self.stats.elapsed_minutes);
        println!("Availability: {}", self.lot.availability());
        println!("Parked: {}", self.parked.len());
        println!(
            "Arrivals: {}, Rejected: {}, Departures: {}",
            self.stats.arrivals, self.stats.rejected, self.stats.departures
        );
        println!("Revenue: ${}", self.stats.revenue);
    }
}
