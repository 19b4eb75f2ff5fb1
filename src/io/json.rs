use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::sim::{Outcome, Run, TelemetryLog};
use crate::vehicle::Lander;
use super::ExportError;

/// Summary statistics computed from a run's telemetry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightSummary {
    pub outcome: Outcome,
    pub controller: String,
    pub ticks: usize,
    pub flight_time_s: f64,
    /// Vertical speed at the last tick before the run ended (pre-impact for a crash).
    pub touchdown_speed_ms: f64,
    pub max_vertical_accel_ms2: f64,
    pub max_throttle: f64,
    pub ignition_time_s: Option<f64>,
    pub ignition_altitude_m: Option<f64>,
    pub downrange_m: f64,
    pub final_attitude_rad: f64,
}

impl FlightSummary {
    pub fn from_run(run: &Run) -> Self {
        Self::from_telemetry(run.telemetry(), run.outcome(), run.controller_name())
    }

    /// Compute summary from telemetry data.
    pub fn from_telemetry(log: &TelemetryLog, outcome: Outcome, controller: &str) -> Self {
        let last = log.last().map(|f| f.state);

        let touchdown_speed_ms = log
            .states()
            .filter(|s| !s.exploded)
            .last()
            .map_or(0.0, |s| s.vel.y.abs());

        let max_vertical_accel_ms2 = log
            .states()
            .map(|s| s.accel.y)
            .fold(f64::NEG_INFINITY, f64::max);

        let max_throttle = log.states().map(|s| s.throttle).fold(0.0_f64, f64::max);

        let ignition = log.iter().find(|f| f.state.firing);

        FlightSummary {
            outcome,
            controller: controller.to_string(),
            ticks: log.len(),
            flight_time_s: last.map_or(0.0, |s| s.time),
            touchdown_speed_ms,
            max_vertical_accel_ms2: if log.is_empty() { 0.0 } else { max_vertical_accel_ms2 },
            max_throttle,
            ignition_time_s: ignition.map(|f| f.elapsed_s),
            ignition_altitude_m: ignition.map(|f| f.state.pos.y),
            downrange_m: last.map_or(0.0, |s| s.pos.x),
            final_attitude_rad: last.map_or(0.0, |s| s.th),
        }
    }
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    scenario: ScenarioInfo<'a>,
    performance: &'a FlightSummary,
}

#[derive(Serialize)]
struct ScenarioInfo<'a> {
    name: &'a str,
    vehicle: &'a str,
    mass_kg: f64,
    max_thrust_n: f64,
}

/// Write flight summary as JSON to a writer.
pub fn write_summary<W: Write>(
    writer: W,
    scenario_name: &str,
    vehicle: &Lander,
    summary: &FlightSummary,
) -> Result<(), ExportError> {
    let doc = SummaryDocument {
        scenario: ScenarioInfo {
            name: scenario_name,
            vehicle: &vehicle.name,
            mass_kg: vehicle.mass,
            max_thrust_n: vehicle.max_thrust,
        },
        performance: summary,
    };
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(())
}

/// Write flight summary JSON to a file.
pub fn write_summary_file<P: AsRef<Path>>(
    path: P,
    scenario_name: &str,
    vehicle: &Lander,
    summary: &FlightSummary,
) -> Result<(), ExportError> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_summary(&mut file, scenario_name, vehicle, summary)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Scenario;
    use crate::sim::{simulate, simulate_with, ControllerKind};

    #[test]
    fn summary_of_landing() {
        let run = simulate(&Scenario::default()).unwrap();
        let s = FlightSummary::from_run(&run);
        assert_eq!(s.outcome, Outcome::Landed);
        assert_eq!(s.ticks, run.telemetry().len());
        assert!(s.touchdown_speed_ms < 3.0);
        assert!(s.ignition_time_s.is_some());
        assert!(s.max_throttle <= 1.0 && s.max_throttle >= 0.6);
    }

    #[test]
    fn crash_reports_pre_impact_speed() {
        let scenario = Scenario::default();
        let run = simulate_with(&scenario, ControllerKind::Idle.build(&scenario)).unwrap();
        let s = FlightSummary::from_run(&run);
        assert_eq!(s.outcome, Outcome::Crashed);
        assert!(s.touchdown_speed_ms > 150.0);
        assert!(s.max_vertical_accel_ms2 > 100.0);
        assert_eq!(s.ignition_time_s, None);
    }

    #[test]
    fn json_output_is_valid() {
        let run = simulate(&Scenario::default()).unwrap();
        let summary = FlightSummary::from_run(&run);

        let mut buf = Vec::new();
        write_summary(&mut buf, "Test", &run.scenario().vehicle, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["scenario"]["name"], "Test");
        assert_eq!(value["performance"]["outcome"], "landed");
        assert!(value["performance"]["flight_time_s"].as_f64().unwrap() > 0.0);
    }
}
