//! Time-of-day traffic intensity
//!
//! Share of a day's traffic that passes in each hour, starting with the
//! midnight to 1:00 AM hour.

use super::error::SimulationError;
use super::types::{SimTime, SECONDS_PER_HOUR};

/// Hourly shares of daily car traffic from national travel models
pub const NATIONAL_HOURLY_RATES: [f64; 24] = [
    0.0081, 0.0052, 0.0047, 0.0057, 0.0099, 0.0230, 0.0489, 0.0679, 0.0629, 0.0531, 0.0509,
    0.0538, 0.0560, 0.0574, 0.0635, 0.0733, 0.0804, 0.0775, 0.0579, 0.0437, 0.0338, 0.0280,
    0.0205, 0.0138,
];

/// 24 traffic-intensity fractions used to scale arrival frequency
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyProfile {
    rates: [f64; 24],
}

impl Default for HourlyProfile {
    fn default() -> Self {
        Self::national()
    }
}

impl HourlyProfile {
    pub fn new(rates: [f64; 24]) -> Self {
        Self { rates }
    }

    pub fn national() -> Self {
        Self::new(NATIONAL_HOURLY_RATES)
    }

    /// The same intensity for every hour
    pub fn flat(rate: f64) -> Self {
        Self::new([rate; 24])
    }

    /// Hour of day for a simulated instant, wrapping after 24 hours
    pub fn hour_of(now: SimTime) -> usize {
        ((now / SECONDS_PER_HOUR) % 24) as usize
    }

    /// Intensity fraction in effect at `now`
    pub fn rate_at(&self, now: SimTime) -> f64 {
        self.rates[Self::hour_of(now)]
    }

    /// Every hour must carry a positive, finite rate or the inter-arrival
    /// delay for that hour is undefined
    pub fn validate(&self) -> Result<(), SimulationError> {
        match self
            .rates
            .iter()
            .enumerate()
            .find(|(_, rate)| !(rate.is_finite() && **rate > 0.0))
        {
            Some((hour, rate)) => Err(SimulationError::InvalidHourlyRate { hour, rate: *rate }),
            None => Ok(()),
        }
    }
}
