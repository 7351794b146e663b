//! Intersection configuration
//!
//! Everything the engine needs to run one simulated day. Values are supplied
//! by the caller; [`IntersectionConfig::default`] describes the study
//! intersection the model was calibrated against.

use std::fmt;
use std::str::FromStr;

use super::error::SimulationError;
use super::profile::HourlyProfile;
use super::types::{Axis, Direction, PerDirection, SimTime, SECONDS_PER_DAY};

/// Daily vehicle counts at 50th & Underwood Ave, Omaha (N, S, E, W)
///
/// A vehicle driving straight through is counted at both approaches it
/// touches, so the arrivals attributable to one approach are half its count.
pub const STUDY_APPROACH_COUNTS: [u32; 4] = [4856, 4432, 7270, 9074];

/// Which control device governs the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    TimedSignal,
    StopSign,
    Roundabout,
}

impl PolicyKind {
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::TimedSignal => "timed signal",
            PolicyKind::StopSign => "stop sign",
            PolicyKind::Roundabout => "roundabout",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" | "signal" => Ok(PolicyKind::TimedSignal),
            "sign" | "stop" => Ok(PolicyKind::StopSign),
            "roundabout" => Ok(PolicyKind::Roundabout),
            _ => Err(SimulationError::UnknownPolicy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionConfig {
    /// Vehicles per day arriving on each approach. Zero disables the approach.
    pub base_volumes: PerDirection<f64>,
    pub ew_lanes: u32,
    pub ns_lanes: u32,
    /// Seconds of green for east/west traffic per signal cycle
    pub ew_green: SimTime,
    /// Seconds of green for north/south traffic per signal cycle
    pub ns_green: SimTime,
    /// Seconds between departure opportunities
    pub depart_rate: SimTime,
    /// Simulated seconds to run
    pub horizon: SimTime,
    pub profile: HourlyProfile,
    pub policy: PolicyKind,
}

impl Default for IntersectionConfig {
    fn default() -> Self {
        let [north, south, east, west] = STUDY_APPROACH_COUNTS;
        Self {
            base_volumes: Self::volumes_from_counts(north, south, east, west),
            ew_lanes: 2,
            ns_lanes: 2,
            ew_green: 60,
            ns_green: 45,
            depart_rate: 2,
            horizon: SECONDS_PER_DAY,
            profile: HourlyProfile::national(),
            policy: PolicyKind::TimedSignal,
        }
    }
}

impl IntersectionConfig {
    /// Default study intersection controlled by `policy`
    pub fn with_policy(policy: PolicyKind) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Per-approach base volumes from raw daily approach counts
    pub fn volumes_from_counts(north: u32, south: u32, east: u32, west: u32) -> PerDirection<f64> {
        PerDirection::new(north, south, east, west).map_values(|count| f64::from(count) / 2.0)
    }

    pub fn lanes(&self, axis: Axis) -> u32 {
        match axis {
            Axis::EastWest => self.ew_lanes,
            Axis::NorthSouth => self.ns_lanes,
        }
    }

    /// Approaches with a non-zero base volume
    pub fn active_directions(&self) -> Vec<Direction> {
        self.base_volumes
            .iter()
            .filter(|(_, volume)| **volume > 0.0)
            .map(|(direction, _)| direction)
            .collect()
    }

    /// Check every precondition the engine relies on
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.profile.validate()?;

        for (direction, volume) in self.base_volumes.iter() {
            if !volume.is_finite() || *volume < 0.0 {
                return Err(SimulationError::InvalidBaseVolume {
                    direction,
                    volume: *volume,
                });
            }
        }

        if self.depart_rate == 0 {
            return Err(SimulationError::ZeroDuration {
                field: "departure rate",
            });
        }

        match self.policy {
            PolicyKind::TimedSignal => {
                if self.ew_green == 0 {
                    return Err(SimulationError::ZeroDuration {
                        field: "east/west green",
                    });
                }
                if self.ns_green == 0 {
                    return Err(SimulationError::ZeroDuration {
                        field: "north/south green",
                    });
                }
                // floor(lanes / 2) lane slots per side; fewer than two lanes
                // would leave the axis without any
                self.check_lanes(|lanes| lanes >= 2)?;
            }
            PolicyKind::StopSign => {
                self.check_lanes(|lanes| (1..=2).contains(&lanes))?;
            }
            PolicyKind::Roundabout => {}
        }

        Ok(())
    }

    fn check_lanes(&self, allowed: impl Fn(u32) -> bool) -> Result<(), SimulationError> {
        for axis in [Axis::EastWest, Axis::NorthSouth] {
            let lanes = self.lanes(axis);
            if !allowed(lanes) {
                return Err(SimulationError::UnsupportedLanes {
                    policy: self.policy.name(),
                    axis,
                    lanes,
                });
            }
        }
        Ok(())
    }
}
