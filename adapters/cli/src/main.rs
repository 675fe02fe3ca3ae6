#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays scripted Hex City sessions headlessly.

mod report;
mod scenario;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hex_city_core::AccrualMode;

use crate::scenario::{PlannedPlacement, Scenario};

/// How income scales with the length of a tick.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Accrual {
    /// Income proportional to elapsed minutes.
    Linear,
    /// Income scaled by elapsed minutes twice.
    Quadratic,
}

impl From<Accrual> for AccrualMode {
    fn from(value: Accrual) -> Self {
        match value {
            Accrual::Linear => Self::Linear,
            Accrual::Quadratic => Self::Quadratic,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Headless Hex City session runner")]
struct Cli {
    /// Path to a TOML scenario file
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Seed for the offer sampler
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated session length in minutes
    #[arg(long)]
    minutes: Option<u64>,

    /// Simulated seconds advanced per tick
    #[arg(long)]
    tick_seconds: Option<u64>,

    /// Income accrual mode
    #[arg(long, value_enum)]
    accrual: Option<Accrual>,

    /// Building to place, as KIND@Q,R or KIND@Q,R@MINUTE
    #[arg(long = "place", value_name = "KIND@Q,R[@MINUTE]")]
    placements: Vec<PlannedPlacement>,

    /// Print every world event to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_scenario(self) -> Result<Scenario> {
        let mut scenario = match &self.scenario {
            Some(path) => Scenario::load(path)?,
            None => Scenario::default(),
        };

        if let Some(seed) = self.seed {
            scenario.seed = seed;
        }
        if let Some(minutes) = self.minutes {
            scenario.duration_minutes = minutes;
        }
        if let Some(tick_seconds) = self.tick_seconds {
            scenario.tick_seconds = tick_seconds;
        }
        if let Some(accrual) = self.accrual {
            scenario.accrual = accrual.into();
        }
        scenario.placements.extend(self.placements);

        scenario
            .validate()
            .context("invalid command-line overrides")?;
        Ok(scenario)
    }
}

/// Entry point for the Hex City command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    let scenario = cli.into_scenario()?;

    let finished = session::run(&scenario, |event| {
        if verbose {
            eprintln!("{}", report::describe(event));
        }
    });
    print!("{}", report::summary(&finished));
    Ok(())
}
