use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::sim::{TelemetryFrame, TelemetryLog};
use super::ExportError;

/// One CSV row per telemetry frame; the header comes from the field names.
#[derive(Debug, Serialize)]
struct TelemetryRecord {
    tick: usize,
    time: f64,
    x: f64,
    y: f64,
    th: f64,
    vx: f64,
    vy: f64,
    vth: f64,
    ax: f64,
    ay: f64,
    ath: f64,
    throttle: f64,
    requested_throttle: f64,
    rcs_command: f64,
    requested_rcs_throttle: f64,
    firing: bool,
    exploded: bool,
    stop_simulating: bool,
    timestep_ms: f64,
    accel_to_stop: Option<f64>,
    rot_accel_to_stop: Option<f64>,
}

impl From<&TelemetryFrame> for TelemetryRecord {
    fn from(f: &TelemetryFrame) -> Self {
        let s = &f.state;
        Self {
            tick: f.tick,
            time: f.elapsed_s,
            x: s.pos.x,
            y: s.pos.y,
            th: s.th,
            vx: s.vel.x,
            vy: s.vel.y,
            vth: s.vth,
            ax: s.accel.x,
            ay: s.accel.y,
            ath: s.ath,
            throttle: s.throttle,
            requested_throttle: s.requested_throttle,
            rcs_command: s.rcs_command,
            requested_rcs_throttle: s.requested_rcs_throttle,
            firing: s.firing,
            exploded: s.exploded,
            stop_simulating: s.stop_simulating,
            timestep_ms: s.timestep_ms,
            accel_to_stop: f.command.accel_to_stop,
            rot_accel_to_stop: f.command.rot_accel_to_stop,
        }
    }
}

/// Write telemetry in CSV format.
pub fn write_telemetry<W: Write>(writer: W, log: &TelemetryLog) -> Result<(), ExportError> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    for frame in log {
        wtr.serialize(TelemetryRecord::from(frame))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write telemetry to a CSV file at the given path.
pub fn write_telemetry_file<P: AsRef<Path>>(path: P, log: &TelemetryLog) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_telemetry(std::io::BufWriter::new(file), log)
}
