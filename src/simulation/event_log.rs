//! Append-only record of completed trips through the intersection

use super::approach::SimVehicle;
use super::types::{Direction, SimTime, VehicleId};

/// One vehicle's passage: when it arrived and when it was let through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventLogEntry {
    pub vehicle_id: VehicleId,
    pub arrival_time: SimTime,
    pub departure_time: SimTime,
    pub direction: Direction,
}

impl EventLogEntry {
    /// Record `vehicle` as departing at `now`
    pub fn depart(vehicle: SimVehicle, now: SimTime) -> Self {
        debug_assert!(now >= vehicle.arrival_time);
        Self {
            vehicle_id: vehicle.id,
            arrival_time: vehicle.arrival_time,
            departure_time: now,
            direction: vehicle.direction,
        }
    }

    /// Seconds spent waiting at the approach
    pub fn wait(&self) -> SimTime {
        self.departure_time - self.arrival_time
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<EventLogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: EventLogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[EventLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventLogEntry> {
        self.entries.iter()
    }

    /// Mean wait in seconds over all logged trips
    pub fn mean_wait(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let total: SimTime = self.entries.iter().map(EventLogEntry::wait).sum();
        total as f64 / self.entries.len() as f64
    }
}
