//! Fixed-time traffic signal
//!
//! Green alternates between the east/west and north/south axes. Yellow and
//! all-red clearance are not modelled.

use log::debug;

use crate::simulation::approach::Approaches;
use crate::simulation::config::IntersectionConfig;
use crate::simulation::event_log::EventLogEntry;
use crate::simulation::types::{Axis, SimTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    EwGreen,
    NsGreen,
}

impl Phase {
    /// Axis that has the green
    pub fn axis(self) -> Axis {
        match self {
            Phase::EwGreen => Axis::EastWest,
            Phase::NsGreen => Axis::NorthSouth,
        }
    }

    pub fn next(self) -> Phase {
        match self {
            Phase::EwGreen => Phase::NsGreen,
            Phase::NsGreen => Phase::EwGreen,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TimedSignal {
    phase: Phase,
    cycle_started: bool,
    ew_green: SimTime,
    ns_green: SimTime,
    ew_lanes: u32,
    ns_lanes: u32,
    depart_rate: SimTime,
}

impl TimedSignal {
    pub fn new(config: &IntersectionConfig) -> Self {
        Self {
            phase: Phase::EwGreen,
            cycle_started: false,
            ew_green: config.ew_green,
            ns_green: config.ns_green,
            ew_lanes: config.ew_lanes,
            ns_lanes: config.ns_lanes,
            depart_rate: config.depart_rate,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Length of one full EW + NS cycle
    pub fn cycle_length(&self) -> SimTime {
        self.ew_green.saturating_add(self.ns_green)
    }

    /// Phase the signal shows at `t` when the cycle starts at t=0
    pub fn phase_at(&self, t: SimTime) -> Phase {
        if t % self.cycle_length() < self.ew_green {
            Phase::EwGreen
        } else {
            Phase::NsGreen
        }
    }

    fn green(&self, phase: Phase) -> SimTime {
        match phase {
            Phase::EwGreen => self.ew_green,
            Phase::NsGreen => self.ns_green,
        }
    }

    /// Lane slots served per departure tick on `axis`
    fn lane_slots(&self, axis: Axis) -> u32 {
        match axis {
            Axis::EastWest => self.ew_lanes / 2,
            Axis::NorthSouth => self.ns_lanes / 2,
        }
    }

    /// Phase-toggle activation
    ///
    /// The first activation opens the cycle on east/west green; every later
    /// one flips to the other axis. Returns how long the new phase lasts.
    pub fn toggle(&mut self, now: SimTime) -> SimTime {
        if self.cycle_started {
            self.phase = self.phase.next();
        } else {
            self.cycle_started = true;
        }
        debug!("t={}s: {} green", now, self.phase.axis());
        self.green(self.phase)
    }

    /// Departure activation
    ///
    /// For each lane slot of the green axis, release the head vehicle of
    /// both opposing approaches. Empty approaches are skipped.
    pub fn depart(&mut self, approaches: &mut Approaches, now: SimTime) -> Vec<EventLogEntry> {
        let axis = self.phase.axis();
        let mut departures = Vec::new();

        for _ in 0..self.lane_slots(axis) {
            for direction in axis.directions() {
                if let Some(vehicle) = approaches[direction].pop() {
                    departures.push(EventLogEntry::depart(vehicle, now));
                }
            }
        }

        departures
    }

    pub fn depart_rate(&self) -> SimTime {
        self.depart_rate
    }
}
