use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use leg_export::report::{LegReport, state_mismatch_norm, write_report};
use leg_export::states::write_nodes;
use leg_export::writer_for_path;
use lowthrust_leg::scenario::{find_scenario, leg_from_config, load_scenarios};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const MISMATCH_LABELS: [&str; 8] = ["x", "y", "z", "vx", "vy", "vz", "mass", "time"];

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Evaluate the mismatch and throttle constraints of a low-thrust leg"
)]
struct Cli {
    /// Scenario manifest: YAML list, TOML file, or directory of TOML files
    #[arg(long, default_value = "data/scenarios/legs.yaml")]
    scenario: PathBuf,

    /// Scenario name (case-insensitive, defaults to the first one)
    #[arg(long)]
    name: Option<String>,

    /// Write the node history as CSV (`-` for stdout)
    #[arg(long)]
    states: Option<PathBuf>,

    /// Write a JSON report with constraints, throttle windows and nodes
    #[arg(long)]
    json: Option<PathBuf>,

    /// Tolerance on the mismatch used to flag the leg as feasible
    #[arg(long, default_value_t = 1e-6)]
    feasibility_tol: f64,

    /// Log filter such as `debug` or `leg_lowthrust=trace` (overrides RUST_LOG)
    #[arg(long)]
    log: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref())?;

    let scenarios = load_scenarios(&cli.scenario)
        .with_context(|| format!("loading scenarios from {}", cli.scenario.display()))?;
    let config = find_scenario(&scenarios, cli.name.as_deref())?;
    let mut leg = leg_from_config(config)?;
    info!(scenario = %config.name, n_seg = leg.n_seg(), "evaluating leg");

    let mismatch = leg
        .compute_mismatch_con()
        .context("propagating the leg halves")?;
    let throttles_con = leg.compute_throttles_con()?;

    let states_to_stdout = cli.states.as_deref() == Some(Path::new("-"));
    if !states_to_stdout {
        println!("=== Leg '{}' ===", config.name);
        print!("{leg}");
        println!("Mismatch constraints:");
        for (label, value) in MISMATCH_LABELS.iter().zip(mismatch) {
            println!("  {label:<5} {value:>16.6e}");
        }
        println!("Throttle constraints:");
        for (segment, value) in throttles_con.iter().enumerate() {
            println!("  {segment:<5} {value:>16.6e}");
        }
        println!(
            "State mismatch norm: {:.6e}",
            state_mismatch_norm(&mismatch)
        );
    }

    if cli.states.is_none() && cli.json.is_none() {
        return Ok(());
    }

    let nodes = leg.compute_states()?;
    if let Some(path) = &cli.states {
        let mut writer = writer_for_path(path)
            .with_context(|| format!("opening {}", path.display()))?;
        write_nodes(&mut writer, &nodes)?;
        info!(path = %path.display(), nodes = nodes.len(), "wrote node history");
    }

    if let Some(path) = &cli.json {
        let throttles = leg.schedule_throttles(&nodes)?.to_vec();
        let report = LegReport {
            name: &config.name,
            departure_mjd2000: leg.ti().mjd2000(),
            arrival_mjd2000: leg.tf().mjd2000(),
            n_seg: leg.n_seg(),
            mismatch,
            mismatch_norm: state_mismatch_norm(&mismatch),
            throttles_con: &throttles_con,
            throttles: &throttles,
            nodes: &nodes,
        };
        write_report(path, &report).with_context(|| format!("writing {}", path.display()))?;
        info!(
            path = %path.display(),
            feasible = report.feasible(cli.feasibility_tol),
            "wrote leg report"
        );
    }

    Ok(())
}

/// Logs go to stderr so CSV on stdout stays clean.
fn init_logging(filter: Option<&str>) -> anyhow::Result<()> {
    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid log filter '{directives}'"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}
