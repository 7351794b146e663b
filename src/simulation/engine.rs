//! Simulation engine that ties everything together
//!
//! Owns all state for one simulated run: the clock, the four approach
//! queues, the active control policy and the event log. Processes only touch
//! that state while the engine is running them, one at a time, so no locking
//! is needed.

use anyhow::{Context, Result};
use log::{debug, info, warn};

use super::approach::Approaches;
use super::arrival::{ArrivalGenerator, MIN_ARRIVAL_GAP};
use super::config::IntersectionConfig;
use super::event_log::EventLog;
use super::policy::{ControlPolicy, PolicyProcess};
use super::scheduler::{ProcessId, Scheduler};
use super::types::{SimTime, VehicleId};

/// A perpetual process driven by the scheduler
#[derive(Debug, Clone)]
enum Process {
    Arrival(ArrivalGenerator),
    Control(PolicyProcess),
}

pub struct SimEngine {
    config: IntersectionConfig,
    scheduler: Scheduler,
    processes: Vec<Process>,
    approaches: Approaches,
    policy: ControlPolicy,
    log: EventLog,
    /// Last vehicle number handed out
    last_vehicle_id: u64,
}

impl SimEngine {
    /// Validate `config` and start every process at t=0
    ///
    /// Arrival generators start first (N, S, E, W, skipping disabled
    /// approaches), followed by the policy's processes.
    pub fn new(config: IntersectionConfig) -> Result<Self> {
        config
            .validate()
            .context("Invalid intersection configuration")?;

        let policy = ControlPolicy::from_config(&config);

        let mut processes: Vec<Process> = config
            .active_directions()
            .into_iter()
            .map(|direction| {
                Process::Arrival(ArrivalGenerator::new(direction, config.base_volumes[direction]))
            })
            .collect();
        for process in &processes {
            if let Process::Arrival(generator) = process {
                let clamped = generator.clamped_hours(&config.profile);
                if !clamped.is_empty() {
                    warn!(
                        "Approach {} outpaces one arrival per {}s in hours {:?}; arrival gaps will be clamped",
                        generator.direction, MIN_ARRIVAL_GAP, clamped
                    );
                }
            }
        }
        processes.extend(policy.processes().into_iter().map(Process::Control));

        let mut scheduler = Scheduler::new();
        for index in 0..processes.len() {
            scheduler.start(ProcessId(index));
        }

        Ok(Self {
            config,
            scheduler,
            processes,
            approaches: Approaches::default(),
            policy,
            log: EventLog::new(),
            last_vehicle_id: 0,
        })
    }

    pub fn now(&self) -> SimTime {
        self.scheduler.now()
    }

    pub fn config(&self) -> &IntersectionConfig {
        &self.config
    }

    pub fn approaches(&self) -> &Approaches {
        &self.approaches
    }

    pub fn policy(&self) -> &ControlPolicy {
        &self.policy
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn into_log(self) -> EventLog {
        self.log
    }

    /// Vehicles created so far across all approaches
    pub fn vehicles_created(&self) -> u64 {
        self.last_vehicle_id
    }

    /// Whether the clock has reached the horizon
    pub fn is_finished(&self) -> bool {
        self.scheduler
            .peek_time()
            .map_or(true, |at| at >= self.config.horizon)
    }

    /// Advance to the next instant with work and run every process due then
    ///
    /// Returns `false` once nothing is left before the horizon.
    pub fn step(&mut self) -> Result<bool> {
        let Some(due) = self.scheduler.advance(self.config.horizon) else {
            return Ok(false);
        };

        for process in due {
            self.activate(process)?;
        }
        Ok(true)
    }

    /// Run until the horizon
    ///
    /// Vehicles still queued when time runs out never reach the log.
    pub fn run(&mut self) -> Result<&EventLog> {
        info!(
            "Simulating {} for {}s with {} processes",
            self.policy.kind(),
            self.config.horizon,
            self.processes.len()
        );

        while self.step()? {}

        info!(
            "Simulation complete: {} vehicles created, {} departed, {} still queued",
            self.vehicles_created(),
            self.log.len(),
            self.approaches.total_waiting()
        );
        Ok(&self.log)
    }

    fn activate(&mut self, id: ProcessId) -> Result<()> {
        let now = self.scheduler.now();
        let process = self
            .processes
            .get(id.0)
            .cloned()
            .with_context(|| format!("Unknown process {:?}", id))?;

        let resume_in = match process {
            Process::Arrival(generator) => {
                self.last_vehicle_id += 1;
                let vehicle = generator.arrive(VehicleId(self.last_vehicle_id), now);
                self.policy.on_arrival(vehicle.direction);
                self.approaches[vehicle.direction].push(vehicle);
                generator.next_delay(now, &self.config.profile)
            }
            Process::Control(control) => {
                let activation = self
                    .policy
                    .activate(control, &mut self.approaches, now)
                    .with_context(|| format!("{} halted at t={}s", self.policy, now))?;

                for entry in activation.departures {
                    debug!(
                        "t={}s: vehicle {} departs {} after {}s",
                        now,
                        entry.vehicle_id,
                        entry.direction,
                        entry.wait()
                    );
                    self.log.append(entry);
                }
                activation.resume_in
            }
        };

        self.scheduler.schedule_in(resume_in, id)
    }

    /// Print a summary of the engine state
    pub fn print_summary(&self) {
        println!("=== Intersection Simulation Summary ===");
        println!("Time: {}s of {}s", self.now(), self.config.horizon);
        println!("Policy: {}", self.policy);
        println!("Vehicles created: {}", self.vehicles_created());
        println!("Vehicles departed: {}", self.log.len());
        println!("Mean wait: {:.1}s", self.log.mean_wait());
        println!();

        println!("--- Approaches ---");
        for (direction, queue) in self.approaches.iter() {
            let oldest = queue
                .front()
                .map(|vehicle| format!("since t={}s", vehicle.arrival_time))
                .unwrap_or_else(|| "empty".to_string());
            println!("  {}: {} waiting ({})", direction, queue.len(), oldest);
        }
    }
}

/// Build an engine for `config`, run it to the horizon and return the log
pub fn simulate(config: IntersectionConfig) -> Result<EventLog> {
    let mut engine = SimEngine::new(config)?;
    engine.run()?;
    Ok(engine.into_log())
}
