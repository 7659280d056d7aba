//! Headless airspace simulation runner.
//!
//! Drives a `Simulation` at the configured tick rate, logs alerts, and
//! auto-issues return-to-base to UAVs whose battery runs low.

use airspace_cli::sim::{
    create_converging_scenario, create_crossing_scenario, create_head_on_scenario,
    create_parallel_scenario,
};
use airspace_cli::Config;
use airspace_core::{
    Alert, AlertKind, Simulation, SimulationSettings, Vector3, World, MAX_TICK_SECS,
};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Landing pads sit this fraction of the half extent out from the origin.
const HOME_INSET: f64 = 0.9;

/// Available starting populations
#[derive(Debug, Clone, ValueEnum)]
enum ScenarioType {
    /// Randomly generated population
    Random,
    /// Two UAVs crossing at the origin
    Crossing,
    /// Two UAVs flying parallel paths
    Parallel,
    /// Four UAVs converging on the origin
    Converging,
    /// Two UAVs closing head-on
    HeadOn,
}

/// Fixed-tick UAV airspace simulator
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Starting population
    #[arg(long, value_enum, default_value = "random")]
    scenario: ScenarioType,

    /// Population size for the random scenario
    #[arg(long)]
    uavs: Option<usize>,

    /// Simulated duration in seconds
    #[arg(long, default_value_t = 30.0)]
    duration: f64,

    /// Tick rate in Hz (overrides the settings file time step)
    #[arg(long)]
    rate: Option<f64>,

    /// Run ticks back-to-back instead of in real time
    #[arg(long)]
    fast: bool,

    /// Battery percent below which a UAV is sent home (0 disables)
    #[arg(long, default_value_t = 20.0)]
    auto_rtb: f64,

    /// Population seed
    #[arg(long)]
    seed: Option<u64>,

    /// World layout JSON
    #[arg(long)]
    world: Option<PathBuf>,

    /// Settings JSON
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write a final JSON snapshot here
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

/// Running alert totals for the summary lines.
#[derive(Debug, Default)]
struct AlertCounts {
    collision_risks: usize,
    violations: usize,
    reroutes: usize,
}

impl AlertCounts {
    fn record(&mut self, alerts: &[Alert]) {
        for alert in alerts {
            match alert.kind {
                AlertKind::CollisionRisk { .. } => self.collision_risks += 1,
                AlertKind::Violation { .. } => self.violations += 1,
                AlertKind::Reroute { .. } => self.reroutes += 1,
            }
            warn!("{}", alert.message);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("airspace_sim=info,airspace_core=info")
            }),
        )
        .init();

    let args = Args::parse();

    let mut config = Config::from_env();
    config.world_path = args.world.clone().or(config.world_path);
    config.settings_path = args.settings.clone().or(config.settings_path);
    config.seed = args.seed.or(config.seed);
    config.snapshot_path = args.snapshot.clone().or(config.snapshot_path);

    let world = config.load_world()?;
    let mut settings = config.load_settings()?;
    if let Some(n) = args.uavs {
        settings.num_uavs = n;
    }
    if let Some(rate) = args.rate {
        anyhow::ensure!(rate > 0.0, "--rate must be positive");
        settings.time_step_ms = (1000.0 / rate).round().max(1.0) as u64;
    }

    anyhow::ensure!(settings.time_step_ms > 0, "time step must be at least 1ms");

    let errors = world.validate();
    anyhow::ensure!(errors.is_empty(), "invalid world: {}", errors.join("; "));

    let mut sim = match config.seed {
        Some(seed) => Simulation::with_seed(settings, world, seed),
        None => Simulation::new(settings, world),
    };

    let scenario = match args.scenario {
        ScenarioType::Random => None,
        ScenarioType::Crossing => Some(create_crossing_scenario(Vector3::ZERO)),
        ScenarioType::Parallel => Some(create_parallel_scenario(Vector3::ZERO)),
        ScenarioType::Converging => Some(create_converging_scenario(Vector3::ZERO)),
        ScenarioType::HeadOn => Some(create_head_on_scenario(Vector3::ZERO)),
    };
    if let Some(scenario) = scenario {
        info!("Scenario: {}", scenario.name);
        sim.load_uavs(scenario.uavs);
    }

    sim.start();

    let step = sim.settings().tick_duration();
    let simulated = simulated_step(sim.settings());
    if simulated < step {
        warn!(
            "{}ms/tick exceeds the {:.0}ms tick cap; each tick advances {:.2}s",
            sim.settings().time_step_ms,
            MAX_TICK_SECS * 1000.0,
            simulated
        );
    }

    let home = home_pad(sim.world());
    match home {
        Some(pad) => info!("Return-to-base pad at ({:.0}, {:.0})", pad.x, pad.y),
        None => warn!("Every corner pad is inside a restricted zone; returning to the origin"),
    }
    info!(
        "Running {} UAV(s) for {:.1}s at {}ms/tick ({})",
        sim.uavs().len(),
        args.duration,
        sim.settings().time_step_ms,
        if args.fast { "fast" } else { "real time" }
    );

    let mut counts = AlertCounts::default();
    let mut returning: HashSet<String> = HashSet::new();
    let mut interval = time::interval(Duration::from_secs_f64(step));
    let ticks = tick_count(args.duration, simulated);
    let mut next_report = 1.0;

    for n in 1..=ticks {
        let alerts = if args.fast {
            sim.tick(step)
        } else {
            let now = interval.tick().await;
            sim.tick_at(now.into_std())
        };
        let elapsed = n as f64 * simulated;
        counts.record(&alerts);

        if args.auto_rtb > 0.0 {
            issue_return_to_base(&mut sim, args.auto_rtb, home, &mut returning);
        }

        if elapsed >= next_report {
            next_report += 1.0;
            report(&sim, elapsed, &counts);
        }
    }

    sim.stop();
    info!(
        "Simulation complete: {} collision risk(s), {} violation(s), {} reroute(s)",
        counts.collision_risks, counts.violations, counts.reroutes
    );

    if let Some(path) = &config.snapshot_path {
        fs::write(path, sim.snapshot().to_json()?)?;
        info!("Wrote snapshot to {}", path.display());
    }

    Ok(())
}

/// Simulated seconds one fixed tick actually advances once the core caps it.
fn simulated_step(settings: &SimulationSettings) -> f64 {
    settings.tick_duration().min(MAX_TICK_SECS)
}

/// Ticks needed to cover `duration` simulated seconds.
fn tick_count(duration: f64, simulated: f64) -> u64 {
    if simulated <= 0.0 {
        return 0;
    }
    (duration.max(0.0) / simulated).round() as u64
}

/// First box corner (inset) that is clear of every restricted zone.
fn home_pad(world: &World) -> Option<Vector3> {
    let inset = world.half_extent() * HOME_INSET;
    [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
        .into_iter()
        .map(|(sx, sy)| Vector3::new(sx * inset, sy * inset, 0.0))
        .find(|pad| !world.restricted_zones.iter().any(|z| z.contains(*pad)))
}

/// Send low-battery UAVs home once each, holding their current altitude.
fn issue_return_to_base(
    sim: &mut Simulation,
    threshold: f64,
    home: Option<Vector3>,
    returning: &mut HashSet<String>,
) {
    let low: Vec<(String, f64)> = sim
        .uavs()
        .iter()
        .filter(|u| u.battery < threshold && !u.is_grounded() && !returning.contains(&u.id))
        .map(|u| (u.id.clone(), u.position.z))
        .collect();

    for (uav_id, altitude) in low {
        let target = home.map(|pad| Vector3::new(pad.x, pad.y, altitude));
        match sim.return_uav(&uav_id, target) {
            Ok(()) => {
                info!("Auto-issued return-to-base to {} (low battery)", uav_id);
                returning.insert(uav_id);
            }
            Err(e) => warn!("Failed to issue return-to-base: {}", e),
        }
    }
}

fn report(sim: &Simulation, elapsed: f64, counts: &AlertCounts) {
    let uavs = sim.uavs();
    let mean_battery = if uavs.is_empty() {
        0.0
    } else {
        uavs.iter().map(|u| u.battery).sum::<f64>() / uavs.len() as f64
    };
    let grounded = uavs.iter().filter(|u| u.is_grounded()).count();

    if counts.collision_risks > 0 || counts.violations > 0 {
        warn!(
            "t={:.1}s | {} UAV(s), {} grounded, battery {:.1}% | risks {} violations {} reroutes {}",
            elapsed,
            uavs.len(),
            grounded,
            mean_battery,
            counts.collision_risks,
            counts.violations,
            counts.reroutes
        );
    } else {
        info!(
            "t={:.1}s | {} UAV(s), {} grounded, battery {:.1}%",
            elapsed,
            uavs.len(),
            grounded,
            mean_battery
        );
    }
}
