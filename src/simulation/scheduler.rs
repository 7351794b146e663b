//! Virtual clock and wakeup queue
//!
//! Every perpetual process in the simulation suspends by asking to be
//! resumed some whole number of seconds in the future. The scheduler keeps
//! those requests ordered by resume time and, for equal times, by the order
//! they were made, so a run is fully reproducible.

use anyhow::Result;
use sorted_vec::SortedVec;
use std::cmp::Reverse;

use super::error::SimulationError;
use super::types::SimTime;

/// Handle of a process registered with the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessId(pub usize);

/// A pending resumption. Ordering is (time, insertion sequence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Wakeup {
    at: SimTime,
    seq: u64,
    process: ProcessId,
}

pub struct Scheduler {
    now: SimTime,
    next_seq: u64,
    /// Reversed so the earliest wakeup sits at the end and pops in O(1)
    pending: SortedVec<Reverse<Wakeup>>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            pending: SortedVec::new(),
        }
    }

    /// Current simulated time
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Number of processes waiting to be resumed
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Register a process to start at the current instant
    ///
    /// Used only when the engine starts its processes; all later
    /// suspensions go through [`Scheduler::schedule_in`].
    pub fn start(&mut self, process: ProcessId) {
        self.push(self.now, process);
    }

    /// Resume `process` after `delay` seconds
    ///
    /// A zero delay would let a process spin at one instant forever, so it
    /// is rejected. Delays running past the end of representable time park
    /// the process at `SimTime::MAX`, beyond any horizon.
    pub fn schedule_in(&mut self, delay: SimTime, process: ProcessId) -> Result<()> {
        if delay == 0 {
            return Err(SimulationError::NonPositiveDelay {
                process: process.0,
                now: self.now,
            }
            .into());
        }
        self.push(self.now.saturating_add(delay), process);
        Ok(())
    }

    /// Time of the earliest pending wakeup
    pub fn peek_time(&self) -> Option<SimTime> {
        self.pending.last().map(|Reverse(wakeup)| wakeup.at)
    }

    /// Advance the clock to the next wakeup strictly before `horizon`
    ///
    /// Returns every process due at that instant, in the order they were
    /// scheduled. Returns `None` once nothing remains before the horizon;
    /// the clock then rests at the horizon and later wakeups are abandoned.
    pub fn advance(&mut self, horizon: SimTime) -> Option<Vec<ProcessId>> {
        let at = match self.peek_time() {
            Some(at) if at < horizon => at,
            _ => {
                self.now = self.now.max(horizon);
                return None;
            }
        };

        self.now = at;
        let mut due = Vec::new();
        while self.peek_time() == Some(at) {
            if let Some(Reverse(wakeup)) = self.pending.pop() {
                due.push(wakeup.process);
            }
        }
        Some(due)
    }

    fn push(&mut self, at: SimTime, process: ProcessId) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert(Reverse(Wakeup { at, seq, process }));
    }
}
