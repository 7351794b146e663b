//! All-way stop: approaches take turns in the order they started waiting

use anyhow::Result;
use std::collections::VecDeque;

use crate::simulation::approach::Approaches;
use crate::simulation::error::SimulationError;
use crate::simulation::event_log::EventLogEntry;
use crate::simulation::types::{Direction, SimTime};

#[derive(Debug, Clone)]
pub struct StopSign {
    /// Approaches waiting for their turn, at most one entry each
    service_order: VecDeque<Direction>,
    depart_rate: SimTime,
}

impl StopSign {
    pub fn new(depart_rate: SimTime) -> Self {
        Self {
            service_order: VecDeque::with_capacity(4),
            depart_rate,
        }
    }

    pub fn service_order(&self) -> impl Iterator<Item = Direction> + '_ {
        self.service_order.iter().copied()
    }

    pub fn is_registered(&self, direction: Direction) -> bool {
        self.service_order.contains(&direction)
    }

    /// Note that `direction` wants a turn
    ///
    /// Called on every arrival, before the vehicle joins its queue.
    pub fn register(&mut self, direction: Direction) {
        if self.service_order.len() < 4 && !self.is_registered(direction) {
            self.service_order.push_back(direction);
        }
    }

    /// Departure activation
    ///
    /// Serves one vehicle from the approach at the head of the service
    /// order; the approach goes to the back of the line if it still has
    /// vehicles waiting. An approach whose turn comes up with an empty queue
    /// means the bookkeeping is broken and halts the run.
    pub fn depart(&mut self, approaches: &mut Approaches, now: SimTime) -> Result<Option<EventLogEntry>> {
        let Some(direction) = self.service_order.pop_front() else {
            return Ok(None);
        };

        let Some(vehicle) = approaches[direction].pop() else {
            let service_order = std::iter::once(direction)
                .chain(self.service_order.iter().copied())
                .collect();
            return Err(SimulationError::EmptyApproach {
                direction,
                now,
                service_order,
            }
            .into());
        };

        if !approaches[direction].is_empty() {
            self.service_order.push_back(direction);
        }

        Ok(Some(EventLogEntry::depart(vehicle, now)))
    }

    pub fn depart_rate(&self) -> SimTime {
        self.depart_rate
    }
}
