//! Per-approach arrival generation
//!
//! Each approach produces vehicles at a steady pace set by its daily base
//! volume and the share of daily traffic for the current hour.

use log::debug;

use super::approach::SimVehicle;
use super::profile::HourlyProfile;
use super::types::{Direction, SimTime, VehicleId, SECONDS_PER_HOUR};

/// Shortest gap between two arrivals on one approach
pub const MIN_ARRIVAL_GAP: SimTime = 1;

#[derive(Debug, Clone)]
pub struct ArrivalGenerator {
    pub direction: Direction,
    /// Vehicles per day on this approach
    pub base_volume: f64,
}

impl ArrivalGenerator {
    pub fn new(direction: Direction, base_volume: f64) -> Self {
        Self {
            direction,
            base_volume,
        }
    }

    /// Stamp a freshly numbered vehicle as arriving now
    pub fn arrive(&self, id: VehicleId, now: SimTime) -> SimVehicle {
        SimVehicle {
            id,
            arrival_time: now,
            direction: self.direction,
        }
    }

    /// Seconds until the next arrival, given the hour `now` falls in
    ///
    /// `round(3600 / (base_volume * rate))`, rounding halves up. Gaps that
    /// would round to zero are stretched to [`MIN_ARRIVAL_GAP`].
    pub fn next_delay(&self, now: SimTime, profile: &HourlyProfile) -> SimTime {
        let per_hour = self.base_volume * profile.rate_at(now);
        let gap = (SECONDS_PER_HOUR as f64 / per_hour + 0.5).floor();

        if gap < MIN_ARRIVAL_GAP as f64 {
            debug!(
                "Approach {} produces {:.1} vehicles/hour; clamping arrival gap to {}s",
                self.direction, per_hour, MIN_ARRIVAL_GAP
            );
            return MIN_ARRIVAL_GAP;
        }
        gap as SimTime
    }

    /// Hours of the day in which this approach arrives faster than
    /// [`MIN_ARRIVAL_GAP`] allows
    pub fn clamped_hours(&self, profile: &HourlyProfile) -> Vec<usize> {
        (0..24)
            .filter(|&hour| {
                let per_hour = self.base_volume * profile.rate_at(hour * SECONDS_PER_HOUR);
                (SECONDS_PER_HOUR as f64 / per_hour + 0.5).floor() < MIN_ARRIVAL_GAP as f64
            })
            .map(|hour| hour as usize)
            .collect()
    }
}
