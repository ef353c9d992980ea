//! Smart Parking Library
//!
//! A small parking lot model: best-fit spot allocation, ticketing and
//! hourly fees, usable as a library or through the demo binary.

pub mod lot;
