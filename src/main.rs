use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use intersection_sim::report;
use intersection_sim::simulation::{
    IntersectionConfig, PolicyKind, SimEngine, SimTime, SECONDS_PER_DAY, STUDY_APPROACH_COUNTS,
};

#[derive(Parser)]
#[command(name = "intersection_sim")]
#[command(about = "Simulate a day of traffic through a four-way intersection")]
struct Cli {
    /// Control device: light, sign or roundabout
    #[arg(long, default_value = "light")]
    policy: PolicyKind,

    /// Simulated seconds to run
    #[arg(long, default_value_t = SECONDS_PER_DAY)]
    horizon: SimTime,

    /// Seconds between departures once it is an approach's turn
    #[arg(long, default_value_t = 2)]
    depart_rate: SimTime,

    /// East/west green time in seconds
    #[arg(long, default_value_t = 60)]
    ew_green: SimTime,

    /// North/south green time in seconds
    #[arg(long, default_value_t = 45)]
    ns_green: SimTime,

    /// Lanes on the east/west road
    #[arg(long, default_value_t = 2)]
    ew_lanes: u32,

    /// Lanes on the north/south road
    #[arg(long, default_value_t = 2)]
    ns_lanes: u32,

    /// Daily traffic count on the north approach
    #[arg(long, default_value_t = STUDY_APPROACH_COUNTS[0])]
    north: u32,

    /// Daily traffic count on the south approach
    #[arg(long, default_value_t = STUDY_APPROACH_COUNTS[1])]
    south: u32,

    /// Daily traffic count on the east approach
    #[arg(long, default_value_t = STUDY_APPROACH_COUNTS[2])]
    east: u32,

    /// Daily traffic count on the west approach
    #[arg(long, default_value_t = STUDY_APPROACH_COUNTS[3])]
    west: u32,

    /// Where to write the trip file
    #[arg(long, default_value = "output.csv")]
    output: PathBuf,

    /// Print the engine state and hourly waits after the run
    #[arg(long)]
    summary: bool,

    /// Skip simulating and summarise an existing trip file instead
    #[arg(long, value_name = "CSV")]
    analyze: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> IntersectionConfig {
        IntersectionConfig {
            base_volumes: IntersectionConfig::volumes_from_counts(
                self.north, self.south, self.east, self.west,
            ),
            ew_lanes: self.ew_lanes,
            ns_lanes: self.ns_lanes,
            ew_green: self.ew_green,
            ns_green: self.ns_green,
            depart_rate: self.depart_rate,
            horizon: self.horizon,
            policy: self.policy,
            ..IntersectionConfig::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Some(path) = &cli.analyze {
        let records = report::read_csv_file(path)?;
        info!("Read {} trips from {}", records.len(), path.display());
        report::print_hourly_waits(&report::hourly_mean_wait(&records));
        return Ok(());
    }

    let mut engine = SimEngine::new(cli.config())?;
    engine.run()?;

    report::write_csv_file(&cli.output, engine.log())?;
    info!(
        "Wrote {} trips to {}",
        engine.log().len(),
        cli.output.display()
    );

    if cli.summary {
        engine.print_summary();
        println!();
        let records: Vec<report::TripRecord> = engine
            .log()
            .iter()
            .map(report::TripRecord::from_entry)
            .collect();
        report::print_hourly_waits(&report::hourly_mean_wait(&records));
    }

    Ok(())
}
