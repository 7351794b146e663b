//! Discrete-event simulation of a single four-way intersection
//!
//! Vehicles arrive on four approaches at a time-of-day dependent pace, wait
//! in per-approach queues and are let through by one control policy: a
//! timed signal, an all-way stop or a roundabout. The engine interleaves all
//! of these as processes on a virtual clock and records every completed trip
//! in an event log.

mod approach;
mod arrival;
mod config;
mod engine;
mod error;
mod event_log;
mod policy;
mod profile;
mod scheduler;
mod types;

pub use approach::{ApproachQueue, Approaches, SimVehicle};
pub use arrival::{ArrivalGenerator, MIN_ARRIVAL_GAP};
pub use config::{IntersectionConfig, PolicyKind, STUDY_APPROACH_COUNTS};
pub use engine::{simulate, SimEngine};
pub use error::SimulationError;
pub use event_log::{EventLog, EventLogEntry};
pub use policy::{
    Activation, ControlPolicy, EntryState, Phase, PolicyProcess, Roundabout, StopSign,
    TimedSignal, ENTRY_POLL_INTERVAL,
};
pub use profile::{HourlyProfile, NATIONAL_HOURLY_RATES};
pub use scheduler::{ProcessId, Scheduler};
pub use types::{
    Axis, Direction, PerDirection, SimTime, VehicleId, SECONDS_PER_DAY, SECONDS_PER_HOUR,
};
