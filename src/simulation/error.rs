//! Error taxonomy for the intersection simulation
//!
//! Configuration errors are raised before any simulated time advances.
//! Invariant violations halt a run in progress, e.g. a stop sign turn
//! handed to an approach whose queue is empty.

use thiserror::Error;

use super::types::{Axis, Direction, SimTime};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    #[error("hourly rate for hour {hour} must be positive and finite, got {rate}")]
    InvalidHourlyRate { hour: usize, rate: f64 },

    #[error("base volume for approach {direction} must be non-negative and finite, got {volume}")]
    InvalidBaseVolume { direction: Direction, volume: f64 },

    #[error("{field} must be at least one second")]
    ZeroDuration { field: &'static str },

    #[error("{policy} cannot control {lanes} lanes on the {axis} axis")]
    UnsupportedLanes {
        policy: &'static str,
        axis: Axis,
        lanes: u32,
    },

    #[error("unknown control policy '{0}' (expected light, sign or roundabout)")]
    UnknownPolicy(String),

    #[error(
        "approach {direction} was due for service at t={now}s but its queue is empty \
         (service order: {service_order:?})"
    )]
    EmptyApproach {
        direction: Direction,
        now: SimTime,
        service_order: Vec<Direction>,
    },

    #[error("process {process} asked to resume at t={now}s without advancing time")]
    NonPositiveDelay { process: usize, now: SimTime },
}

impl SimulationError {
    /// Whether this error was raised while validating configuration
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            SimulationError::EmptyApproach { .. } | SimulationError::NonPositiveDelay { .. }
        )
    }
}
