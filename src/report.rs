//! Trip file output and hourly wait analysis
//!
//! The event log is written as one CSV row per trip with the header
//! `Car_Number,Arrive,Depart,Wait,Direction`. The same file can be read back
//! and summarised as the mean wait per hour of arrival.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::simulation::{Direction, EventLog, EventLogEntry, SimTime, VehicleId, SECONDS_PER_HOUR};

/// Width of the longest bar in the hourly chart
const CHART_WIDTH: f64 = 50.0;

/// One row of the trip file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRecord {
    #[serde(rename = "Car_Number")]
    pub car_number: u64,
    #[serde(rename = "Arrive")]
    pub arrive: SimTime,
    #[serde(rename = "Depart")]
    pub depart: SimTime,
    #[serde(rename = "Wait")]
    pub wait: SimTime,
    #[serde(rename = "Direction")]
    pub direction: char,
}

impl TripRecord {
    pub fn from_entry(entry: &EventLogEntry) -> Self {
        Self {
            car_number: entry.vehicle_id.0,
            arrive: entry.arrival_time,
            depart: entry.departure_time,
            wait: entry.wait(),
            direction: entry.direction.letter(),
        }
    }

    /// Convert back into a log entry, rejecting rows that could not have
    /// come from a simulation
    pub fn to_entry(&self) -> Result<EventLogEntry> {
        let direction = Direction::from_letter(self.direction)
            .with_context(|| format!("Car {} has unknown direction '{}'", self.car_number, self.direction))?;
        if self.depart < self.arrive {
            bail!(
                "Car {} departs at {} before arriving at {}",
                self.car_number,
                self.depart,
                self.arrive
            );
        }
        if self.depart - self.arrive != self.wait {
            bail!("Car {} has inconsistent wait {}", self.car_number, self.wait);
        }
        Ok(EventLogEntry {
            vehicle_id: VehicleId(self.car_number),
            arrival_time: self.arrive,
            departure_time: self.depart,
            direction,
        })
    }

    /// Hour of day the car arrived in
    pub fn arrival_hour(&self) -> u64 {
        self.arrive / SECONDS_PER_HOUR
    }
}

/// Column names of the trip file, in column order
pub const TRIP_HEADER: [&str; 5] = ["Car_Number", "Arrive", "Depart", "Wait", "Direction"];

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer)
}

/// Write trip records, header first
///
/// The header is written even when there are no records.
pub fn write_records<W: Write>(writer: W, records: &[TripRecord]) -> Result<()> {
    let mut wtr = csv_writer(writer);
    wtr.write_record(TRIP_HEADER)
        .context("Failed to write trip file header")?;
    for record in records {
        wtr.serialize(record).context("Failed to encode trip record")?;
    }
    wtr.flush().context("Failed to flush trip records")?;
    Ok(())
}

/// Write log entries in log order
pub fn write_csv<W: Write>(writer: W, entries: &[EventLogEntry]) -> Result<()> {
    let records: Vec<TripRecord> = entries.iter().map(TripRecord::from_entry).collect();
    write_records(writer, &records)
}

pub fn write_csv_file(path: impl AsRef<Path>, log: &EventLog) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create trip file {}", path.display()))?;
    write_csv(file, log.entries())
        .with_context(|| format!("Failed to write trip file {}", path.display()))
}

pub fn read_csv<R: Read>(reader: R) -> Result<Vec<TripRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for (row, result) in rdr.deserialize().enumerate() {
        let record: TripRecord = result.with_context(|| format!("Bad trip record on row {}", row + 1))?;
        records.push(record);
    }
    Ok(records)
}

pub fn read_csv_file(path: impl AsRef<Path>) -> Result<Vec<TripRecord>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open trip file {}", path.display()))?;
    read_csv(file).with_context(|| format!("Failed to read trip file {}", path.display()))
}

/// Mean wait in seconds for each hour of arrival that has trips
pub fn hourly_mean_wait(records: &[TripRecord]) -> BTreeMap<u64, f64> {
    let mut totals: BTreeMap<u64, (u64, u64)> = BTreeMap::new();
    for record in records {
        let (wait, count) = totals.entry(record.arrival_hour()).or_default();
        *wait += record.wait;
        *count += 1;
    }

    totals
        .into_iter()
        .map(|(hour, (wait, count))| (hour, wait as f64 / count as f64))
        .collect()
}

/// Print the hourly mean waits as a bar chart in the terminal
pub fn print_hourly_waits(waits: &BTreeMap<u64, f64>) {
    println!("=== Mean Wait by Hour of Arrival ===");
    if waits.is_empty() {
        println!("(no trips)");
        return;
    }

    let longest = waits.values().copied().fold(0.0_f64, f64::max);
    for (hour, wait) in waits {
        let bar = if longest > 0.0 {
            (wait / longest * CHART_WIDTH).round() as usize
        } else {
            0
        };
        println!("{:>2}:00 {:>8.1}s {}", hour, wait, "#".repeat(bar));
    }
    println!();
}
