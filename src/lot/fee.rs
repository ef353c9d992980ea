//! Hourly fee calculation

use chrono::{DateTime, TimeDelta, Utc};

use super::error::LotError;
use super::types::VehicleSize;

/// Default hourly rates, in abstract currency units
pub const RATE_MOTORCYCLE: u64 = 10;
pub const RATE_CAR: u64 = 20;
pub const RATE_BUS: u64 = 50;

/// Hourly rate per vehicle size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateTable {
    pub motorcycle: u64,
    pub car: u64,
    pub bus: u64,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            motorcycle: RATE_MOTORCYCLE,
            car: RATE_CAR,
            bus: RATE_BUS,
        }
    }
}

impl RateTable {
    pub fn rate(&self, size: VehicleSize) -> u64 {
        match size {
            VehicleSize::Motorcycle => self.motorcycle,
            VehicleSize::Car => self.car,
            VehicleSize::Bus => self.bus,
        }
    }

    /// Rate times billable hours. None when the fee does not fit in a `u64`.
    pub fn fee(&self, size: VehicleSize, hours: u64) -> Option<u64> {
        self.rate(size).checked_mul(hours)
    }
}

/// Elapsed time truncated to whole minutes, then rounded up to whole hours.
/// Returns None when `exit` precedes `entry`, even by less than a minute.
pub fn billable_hours(entry: DateTime<Utc>, exit: DateTime<Utc>) -> Option<u64> {
    if exit < entry {
        return None;
    }
    let minutes = u64::try_from((exit - entry).num_minutes()).ok()?;
    Some(minutes.div_ceil(60))
}

/// `at` shifted by a number of minutes, or an error when the result leaves
/// the range chrono can represent
pub fn after_minutes(at: DateTime<Utc>, minutes: i64) -> Result<DateTime<Utc>, LotError> {
    TimeDelta::try_minutes(minutes)
        .and_then(|delta| at.checked_add_signed(delta))
        .ok_or_else(|| LotError::TimeOutOfRange(format!("{} + {} min", at, minutes)))
}
