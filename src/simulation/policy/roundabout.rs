//! Roundabout with yield-on-entry
//!
//! A vehicle entering from one approach occupies the circulating segment in
//! front of the next approach round the ring, which must yield until the
//! segment clears.

use std::collections::BTreeSet;

use crate::simulation::approach::Approaches;
use crate::simulation::event_log::EventLogEntry;
use crate::simulation::types::{Direction, PerDirection, SimTime, VehicleId};

/// Seconds between checks of a blocked or empty entry
pub const ENTRY_POLL_INTERVAL: SimTime = 1;

/// What an approach's entry process is doing between activations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryState {
    #[default]
    Waiting,
    /// A vehicle from this approach is on the downstream segment
    Occupying(VehicleId),
}

#[derive(Debug, Clone)]
pub struct Roundabout {
    /// Vehicles on the segment in front of each approach's entry
    blocked: PerDirection<BTreeSet<VehicleId>>,
    entries: PerDirection<EntryState>,
    depart_rate: SimTime,
}

impl Roundabout {
    pub fn new(depart_rate: SimTime) -> Self {
        Self {
            blocked: PerDirection::default(),
            entries: PerDirection::default(),
            depart_rate,
        }
    }

    /// Vehicles currently blocking entry from `direction`
    pub fn blocked(&self, direction: Direction) -> &BTreeSet<VehicleId> {
        &self.blocked[direction]
    }

    pub fn entry_state(&self, direction: Direction) -> EntryState {
        self.entries[direction]
    }

    /// Entry activation for `direction`
    ///
    /// Clears the segment this approach's last vehicle was occupying, then
    /// lets the next vehicle in if the entry is unblocked. Returns the
    /// logged entry, if any, and the delay until the next activation.
    pub fn enter(
        &mut self,
        direction: Direction,
        approaches: &mut Approaches,
        now: SimTime,
    ) -> (Option<EventLogEntry>, SimTime) {
        if let EntryState::Occupying(vehicle_id) = self.entries[direction] {
            self.blocked[direction.downstream()].remove(&vehicle_id);
            self.entries[direction] = EntryState::Waiting;
        }

        if !self.blocked[direction].is_empty() {
            return (None, ENTRY_POLL_INTERVAL);
        }

        match approaches[direction].pop() {
            Some(vehicle) => {
                self.blocked[direction.downstream()].insert(vehicle.id);
                self.entries[direction] = EntryState::Occupying(vehicle.id);
                (Some(EventLogEntry::depart(vehicle, now)), self.depart_rate)
            }
            None => (None, ENTRY_POLL_INTERVAL),
        }
    }
}
