//! spspace - pressure response at an observation point from several wells
//!
//! Evaluates the superposed line-source solution over a time grid and writes
//! `time_hr,pressure_psia` CSV.
//!
//! # Usage
//!
//! ```bash
//! # Two wells at 500 ft producing 500 STB/d each (the default scenario)
//! spspace
//!
//! # Explicit wells as DISTANCE,RATE pairs; negative rate for injection
//! spspace --well 300,1200 --well 800,-400 --output response.csv
//!
//! # Scenario file, rejecting singular inputs instead of emitting inf/nan
//! spspace --config scenario.toml --strict
//! ```
//!
//! # Environment Variables
//!
//! - `SUPERPOSITION_CONFIG`: scenario file used when `--config` is absent; a
//!   missing or malformed file is an error
//! - `RUST_LOG`: logging level (default: info)

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use superposition::{
    evaluate_strict, first_non_finite, sp_space_inf_acting, ScenarioConfig, Well, WellSet,
};

/// Pressure window of the semilog display, psia.
const DISPLAY_PRESSURE_RANGE: (f64, f64) = (4000.0, 8000.0);

#[derive(Parser, Debug)]
#[command(name = "spspace")]
#[command(about = "Superposition in space for infinite-acting radial flow")]
#[command(version)]
struct CliArgs {
    /// Scenario TOML file
    #[arg(short, long, value_name = "PATH", env = "SUPERPOSITION_CONFIG")]
    config: Option<PathBuf>,

    /// Well as DISTANCE_FT,RATE_STB_D; repeat for more wells, replaces the scenario wells
    #[arg(short, long = "well", value_name = "R,Q", value_parser = parse_well)]
    wells: Vec<Well>,

    /// Initial reservoir pressure, psia
    #[arg(long = "p-i", value_name = "PSIA", allow_negative_numbers = true)]
    initial_pressure: Option<f64>,

    /// Reject zero distances, zero times and non-positive properties
    #[arg(long)]
    strict: bool,

    /// Write CSV here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print the effective scenario as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn parse_well(s: &str) -> Result<Well, String> {
    let (distance, rate) = s
        .split_once(',')
        .ok_or_else(|| format!("expected DISTANCE,RATE but got `{}`", s))?;
    let distance: f64 = distance
        .trim()
        .parse()
        .map_err(|e| format!("bad distance `{}`: {}", distance, e))?;
    let rate: f64 = rate
        .trim()
        .parse()
        .map_err(|e| format!("bad rate `{}`: {}", rate, e))?;
    Ok(Well::new(distance, rate))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();

    let mut scenario = match &args.config {
        Some(path) => ScenarioConfig::load_from_file(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => ScenarioConfig::load(),
    };
    if !args.wells.is_empty() {
        scenario.wells = WellSet::from(args.wells.clone());
    }
    if let Some(p_i) = args.initial_pressure {
        scenario.initial_pressure = p_i;
    }

    if args.print_config {
        print!("{}", scenario.to_toml()?);
        return Ok(());
    }

    let time = scenario.time.samples()?;
    info!(
        wells = scenario.wells.len(),
        samples = time.len(),
        strict = args.strict,
        "Evaluating pressure response"
    );

    let pressure = if args.strict {
        evaluate_strict(
            &scenario.wells,
            time.view(),
            scenario.initial_pressure,
            &scenario.reservoir,
        )?
    } else {
        sp_space_inf_acting(
            scenario.wells.len(),
            scenario.wells.distances().view(),
            time.view(),
            scenario.initial_pressure,
            scenario.wells.rates().view(),
            &scenario.reservoir,
        )?
    };

    if let Some(i) = first_non_finite(pressure.view()) {
        warn!(
            time_hr = time[i],
            pressure = pressure[i],
            "Non-finite pressure; check for zero distance, zero time or non-positive properties"
        );
    }
    let (low, high) = DISPLAY_PRESSURE_RANGE;
    let outside = pressure
        .iter()
        .filter(|p| p.is_finite() && (**p < low || **p > high))
        .count();
    if outside > 0 {
        warn!(outside, low, high, "Samples fall outside the display window");
    }

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut out = BufWriter::new(sink);
    writeln!(out, "time_hr,pressure_psia")?;
    for (t, p) in time.iter().zip(pressure.iter()) {
        writeln!(out, "{},{}", t, p)?;
    }
    out.flush()?;

    if let Some(path) = &args.output {
        info!(path = %path.display(), rows = time.len(), "Wrote pressure response");
    }
    Ok(())
}
