//! Approach queues
//!
//! Vehicles that have arrived at an approach and are waiting for the
//! control policy to let them through, in arrival order.

use std::collections::VecDeque;

use super::types::{Direction, PerDirection, SimTime, VehicleId};

/// A vehicle waiting at the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimVehicle {
    pub id: VehicleId,
    pub arrival_time: SimTime,
    pub direction: Direction,
}

/// Strict FIFO of vehicles for one approach
#[derive(Debug, Clone, Default)]
pub struct ApproachQueue {
    vehicles: VecDeque<SimVehicle>,
}

impl ApproachQueue {
    pub fn push(&mut self, vehicle: SimVehicle) {
        self.vehicles.push_back(vehicle);
    }

    /// Remove the vehicle that has waited longest
    pub fn pop(&mut self) -> Option<SimVehicle> {
        self.vehicles.pop_front()
    }

    pub fn front(&self) -> Option<&SimVehicle> {
        self.vehicles.front()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimVehicle> {
        self.vehicles.iter()
    }
}

/// The four approach queues of the intersection
pub type Approaches = PerDirection<ApproachQueue>;

impl Approaches {
    /// Vehicles still waiting across all approaches
    pub fn total_waiting(&self) -> usize {
        self.iter().map(|(_, queue)| queue.len()).sum()
    }
}
