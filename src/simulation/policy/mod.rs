//! Control policies
//!
//! Exactly one policy governs the intersection for a run. Each one owns its
//! phase or lock state and contributes one or more perpetual processes that
//! decide which queued vehicles depart, and when.

mod roundabout;
mod signal;
mod stop_sign;

pub use roundabout::{EntryState, Roundabout, ENTRY_POLL_INTERVAL};
pub use signal::{Phase, TimedSignal};
pub use stop_sign::StopSign;

use anyhow::{bail, Result};
use std::fmt;

use super::approach::Approaches;
use super::config::{IntersectionConfig, PolicyKind};
use super::event_log::EventLogEntry;
use super::types::{Direction, SimTime};

/// A perpetual process contributed by the active policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyProcess {
    /// Switches the green between axes
    PhaseToggle,
    /// Releases vehicles on the green axis every headway
    SignalDeparture,
    /// Serves the next approach in turn every headway
    SignDeparture,
    /// Yield-and-enter loop for one roundabout approach
    RoundaboutEntry(Direction),
}

/// Outcome of one policy activation
#[derive(Debug, Clone, Default)]
pub struct Activation {
    /// Vehicles let through at this instant, in departure order
    pub departures: Vec<EventLogEntry>,
    /// Seconds until the process wants to run again
    pub resume_in: SimTime,
}

impl Activation {
    fn new(departures: Vec<EventLogEntry>, resume_in: SimTime) -> Self {
        Self {
            departures,
            resume_in,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ControlPolicy {
    TimedSignal(TimedSignal),
    StopSign(StopSign),
    Roundabout(Roundabout),
}

impl ControlPolicy {
    pub fn from_config(config: &IntersectionConfig) -> Self {
        match config.policy {
            PolicyKind::TimedSignal => ControlPolicy::TimedSignal(TimedSignal::new(config)),
            PolicyKind::StopSign => ControlPolicy::StopSign(StopSign::new(config.depart_rate)),
            PolicyKind::Roundabout => ControlPolicy::Roundabout(Roundabout::new(config.depart_rate)),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            ControlPolicy::TimedSignal(_) => PolicyKind::TimedSignal,
            ControlPolicy::StopSign(_) => PolicyKind::StopSign,
            ControlPolicy::Roundabout(_) => PolicyKind::Roundabout,
        }
    }

    /// Processes to start, in start order
    pub fn processes(&self) -> Vec<PolicyProcess> {
        match self {
            ControlPolicy::TimedSignal(_) => {
                vec![PolicyProcess::PhaseToggle, PolicyProcess::SignalDeparture]
            }
            ControlPolicy::StopSign(_) => vec![PolicyProcess::SignDeparture],
            ControlPolicy::Roundabout(_) => Direction::ALL
                .into_iter()
                .map(PolicyProcess::RoundaboutEntry)
                .collect(),
        }
    }

    /// Hook run by every arrival before the vehicle is queued
    pub fn on_arrival(&mut self, direction: Direction) {
        if let ControlPolicy::StopSign(sign) = self {
            sign.register(direction);
        }
    }

    /// Run one activation of `process` at `now`
    pub fn activate(
        &mut self,
        process: PolicyProcess,
        approaches: &mut Approaches,
        now: SimTime,
    ) -> Result<Activation> {
        let activation = match (self, process) {
            (ControlPolicy::TimedSignal(signal), PolicyProcess::PhaseToggle) => {
                Activation::new(Vec::new(), signal.toggle(now))
            }
            (ControlPolicy::TimedSignal(signal), PolicyProcess::SignalDeparture) => {
                let departures = signal.depart(approaches, now);
                Activation::new(departures, signal.depart_rate())
            }
            (ControlPolicy::StopSign(sign), PolicyProcess::SignDeparture) => {
                let departures = sign.depart(approaches, now)?.into_iter().collect();
                Activation::new(departures, sign.depart_rate())
            }
            (ControlPolicy::Roundabout(roundabout), PolicyProcess::RoundaboutEntry(direction)) => {
                let (departure, resume_in) = roundabout.enter(direction, approaches, now);
                Activation::new(departure.into_iter().collect(), resume_in)
            }
            (policy, process) => bail!("{} has no {:?} process", policy.kind(), process),
        };
        Ok(activation)
    }
}

impl fmt::Display for ControlPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlPolicy::TimedSignal(signal) => {
                write!(f, "timed signal ({} green)", signal.phase().axis())
            }
            ControlPolicy::StopSign(sign) => {
                let order: Vec<String> = sign.service_order().map(|d| d.to_string()).collect();
                write!(f, "stop sign (service order [{}])", order.join(", "))
            }
            ControlPolicy::Roundabout(roundabout) => {
                write!(f, "roundabout (blocked")?;
                for direction in Direction::ALL {
                    write!(f, " {}={}", direction, roundabout.blocked(direction).len())?;
                }
                write!(f, ")")
            }
        }
    }
}
