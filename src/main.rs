use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use lander_sim::config::{load_scenario, EngineNoiseConfig, Scenario};
use lander_sim::io::{self, FlightSummary};
use lander_sim::physics::RcsMode;
use lander_sim::sim::event::{AltitudeCallout, EventKind};
use lander_sim::sim::{ControllerKind, Outcome, Run};

#[derive(Parser)]
#[command(author, version, about = "Planar powered-descent lander simulator")]
struct Cli {
    /// Scenario TOML file (defaults to the built-in reference descent)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Guidance strategy
    #[arg(long, value_enum, default_value_t = ControllerArg::BangBang)]
    controller: ControllerArg,

    /// RCS thruster flavour (overrides the scenario)
    #[arg(long, value_enum)]
    rcs: Option<RcsArg>,

    /// Tick length in milliseconds (overrides the scenario)
    #[arg(long)]
    dt_ms: Option<f64>,

    /// Engine thrust noise standard deviation, as a fraction of thrust
    #[arg(long)]
    noise: Option<f64>,

    /// Seed for engine noise
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Report when the vehicle descends through this altitude (m); repeatable
    #[arg(long, value_name = "ALT")]
    callout: Vec<f64>,

    /// Write per-tick telemetry CSV here
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the flight summary JSON here
    #[arg(long)]
    json: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum ControllerArg {
    BangBang,
    Pid,
    Idle,
}

impl From<ControllerArg> for ControllerKind {
    fn from(arg: ControllerArg) -> Self {
        match arg {
            ControllerArg::BangBang => ControllerKind::BangBang,
            ControllerArg::Pid => ControllerKind::Pid,
            ControllerArg::Idle => ControllerKind::Idle,
        }
    }
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum RcsArg {
    Digital,
    Proportional,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .parse_default_env()
        .init();

    let mut scenario = match &cli.scenario {
        Some(path) => load_scenario(path)?,
        None => Scenario::default(),
    };
    if let Some(rcs) = cli.rcs {
        scenario.sim.rcs_mode = match rcs {
            RcsArg::Digital => RcsMode::Digital,
            RcsArg::Proportional => RcsMode::Proportional,
        };
    }
    if let Some(dt_ms) = cli.dt_ms {
        scenario.sim.dt_ms = dt_ms;
    }
    if let Some(std_dev) = cli.noise {
        scenario.sim.engine_noise = Some(EngineNoiseConfig { std_dev, seed: cli.seed });
    }

    let controller = ControllerKind::from(cli.controller).build(&scenario);
    let mut run = Run::from_scenario(&scenario, controller)?;
    for &altitude in &cli.callout {
        run.add_detector(Box::new(AltitudeCallout::new(altitude)));
    }
    run.run_to_completion();

    let summary = FlightSummary::from_run(&run);
    print_report(&run, &summary);

    if let Some(path) = &cli.csv {
        io::write_telemetry_file(path, run.telemetry())?;
        log::info!("telemetry written to {}", path.display());
    }
    if let Some(path) = &cli.json {
        io::write_summary_file(path, &scenario.name, &scenario.vehicle, &summary)?;
        log::info!("summary written to {}", path.display());
    }
    Ok(())
}

fn print_report(run: &Run, summary: &FlightSummary) {
    let scenario = run.scenario();
    let vehicle = &scenario.vehicle;

    println!();
    println!("====================================================================");
    println!("  POWERED DESCENT — {} ({})", scenario.name, vehicle.name);
    println!("====================================================================");
    println!();
    println!("  Vehicle Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Mass:          {:>8.0} kg    Max thrust:   {:>8.0} N",
        vehicle.mass, vehicle.max_thrust
    );
    println!(
        "  Max accel:     {:>8.2} m/s^2 TWR:          {:>8.2}",
        vehicle.max_accel(),
        vehicle.twr(scenario.environment.gravity)
    );
    println!(
        "  Min throttle:  {:>8.2}       RCS accel:    {:>8.4} rad/s^2",
        vehicle.min_throttle,
        vehicle.rcs_angular_accel()
    );
    println!(
        "  Controller:    {:>8}       Tick:         {:>8.1} ms",
        run.controller_name(),
        scenario.sim.dt_ms
    );
    println!();

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for event in run.events() {
        let label = match &event.kind {
            EventKind::Ignition => "IGNITION".to_string(),
            EventKind::Cutoff => "CUTOFF".to_string(),
            EventKind::Touchdown => "TOUCHDOWN".to_string(),
            EventKind::Landed => "LANDED".to_string(),
            EventKind::Crashed => "CRASHED".to_string(),
            EventKind::Custom(s) => s.clone(),
        };
        println!(
            "  {:<10} t={:>6.2}s   alt={:>8.2}m   vy={:>8.2}m/s   th={:>7.4}rad",
            label, event.time, event.state.pos.y, event.state.vel.y, event.state.th
        );
    }
    println!();

    println!("  Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    let verdict = match summary.outcome {
        Outcome::Landed => "LANDED",
        Outcome::Crashed => "CRASHED",
        Outcome::InFlight => "IN FLIGHT (time limit)",
    };
    println!("  Outcome:       {verdict}");
    println!("  Touchdown vy:  {:>8.2} m/s", summary.touchdown_speed_ms);
    println!("  Peak ay:       {:>8.2} m/s^2", summary.max_vertical_accel_ms2);
    println!("  Downrange:     {:>8.1} m", summary.downrange_m);
    println!("  Final th:      {:>8.4} rad", summary.final_attitude_rad);
    println!("  Flight time:   {:>8.2} s", summary.flight_time_s);
    println!();

    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>9}  {:>9}  {:>8}  {:>8}  {:>5}",
        "t (s)", "alt (m)", "vy (m/s)", "th(rad)", "throttle", "rcs"
    );
    println!("  {}", "─".repeat(60));

    let frames = run.telemetry().frames();
    let sample_interval = (frames.len() / 30).max(1);
    for (i, f) in frames.iter().enumerate() {
        if i % sample_interval != 0 && i != frames.len() - 1 {
            continue;
        }
        let s = &f.state;
        println!(
            "  {:>7.2}  {:>9.2}  {:>9.2}  {:>8.4}  {:>8.3}  {:>5.1}",
            f.elapsed_s, s.pos.y, s.vel.y, s.th, s.throttle, s.rcs_command
        );
    }

    println!();
    println!("  Simulation: {} ticks", frames.len());
    println!("====================================================================");
    println!();
}
