//! Run configuration: environment constants, guidance tuning, tick settings,
//! and TOML scenario loading.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::dynamics::state::InitialConditions;
use crate::physics::{GroundModel, RcsMode, ThrustNoise};
use crate::vehicle::Lander;

/// Errors raised while loading or validating a scenario.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.into() }
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Landing is declared when all three hold on the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LandingTolerance {
    pub max_accel: f64,     // |ay|, m/s^2
    pub max_altitude: f64,  // y, m
    pub max_speed: f64,     // |vy|, m/s
}

impl Default for LandingTolerance {
    fn default() -> Self {
        Self { max_accel: 0.01, max_altitude: 0.01, max_speed: 3.0 }
    }
}

impl LandingTolerance {
    pub fn is_met(&self, ay: f64, y: f64, vy: f64) -> bool {
        ay.abs() < self.max_accel && y < self.max_altitude && vy.abs() < self.max_speed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Gravity magnitude, acting along -y.
    pub gravity: f64,
    /// Upward acceleration beyond which contact counts as a crash.
    pub crash_threshold: f64,
    pub ground: GroundModel,
    pub landing: LandingTolerance,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            crash_threshold: 100.0,
            ground: GroundModel::default(),
            landing: LandingTolerance::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Guidance tuning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    /// Fraction of max deceleration the braking burn is planned around.
    pub arming_margin: f64,
    /// Altitude at which the braking burn aims to reach zero vertical speed.
    pub altitude_offset: f64,
    /// Engine is suppressed above this climb rate.
    pub climb_cutoff: f64,
    /// Engine is suppressed below this altitude.
    pub ground_cutoff: f64,
    pub deadband_angle: f64,  // rad
    pub deadband_rate: f64,   // rad/s
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            arming_margin: 0.9,
            altitude_offset: 0.1,
            climb_cutoff: 0.01,
            ground_cutoff: 0.01,
            deadband_angle: 0.01,
            deadband_rate: 0.01,
        }
    }
}

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EngineNoiseConfig {
    pub std_dev: f64,
    #[serde(default)]
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub dt_ms: f64,
    pub max_time_s: f64,
    pub rcs_mode: RcsMode,
    pub engine_noise: Option<EngineNoiseConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt_ms: 33.0,        // ~30 Hz
            max_time_s: 120.0,
            rcs_mode: RcsMode::Digital,
            engine_noise: None,
        }
    }
}

impl SimConfig {
    /// Build the configured noise source, if any.
    pub fn thrust_noise(&self) -> Result<Option<ThrustNoise>, ConfigError> {
        self.engine_noise
            .map(|n| {
                ThrustNoise::new(n.std_dev, n.seed)
                    .map_err(|e| invalid("sim.engine_noise.std_dev", e.to_string()))
            })
            .transpose()
    }
}

// ---------------------------------------------------------------------------
// Scenario: everything a run needs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    pub vehicle: Lander,
    pub environment: Environment,
    pub guidance: GuidanceConfig,
    pub sim: SimConfig,
    pub initial: InitialConditions,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "Reference descent".into(),
            vehicle: Lander::default(),
            environment: Environment::default(),
            guidance: GuidanceConfig::default(),
            sim: SimConfig::default(),
            initial: InitialConditions::default(),
        }
    }
}

impl Scenario {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let scenario: Scenario = toml::from_str(contents)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let v = &self.vehicle;
        positive("vehicle.mass", v.mass)?;
        positive("vehicle.max_thrust", v.max_thrust)?;
        positive("vehicle.height", v.height)?;
        non_negative("vehicle.rcs_thrust", v.rcs_thrust)?;
        non_negative("vehicle.radius", v.radius)?;
        if !(0.0..=1.0).contains(&v.min_throttle) {
            return Err(invalid("vehicle.min_throttle", format!("{} is outside [0, 1]", v.min_throttle)));
        }

        let env = &self.environment;
        non_negative("environment.gravity", env.gravity)?;
        positive("environment.crash_threshold", env.crash_threshold)?;
        non_negative("environment.ground.stiffness", env.ground.stiffness)?;
        non_negative("environment.ground.damping", env.ground.damping)?;

        let g = &self.guidance;
        if !(g.arming_margin > 0.0 && g.arming_margin <= 1.0) {
            return Err(invalid("guidance.arming_margin", format!("{} is outside (0, 1]", g.arming_margin)));
        }
        non_negative("guidance.deadband_angle", g.deadband_angle)?;
        non_negative("guidance.deadband_rate", g.deadband_rate)?;

        positive("sim.dt_ms", self.sim.dt_ms)?;
        positive("sim.max_time_s", self.sim.max_time_s)?;
        if let Some(noise) = self.sim.engine_noise {
            non_negative("sim.engine_noise.std_dev", noise.std_dev)?;
        }

        if !self.initial.is_finite() {
            return Err(invalid("initial", "initial conditions must be finite"));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be a positive number")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be a non-negative number")))
    }
}

/// Load and validate a scenario from a TOML file.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Scenario::from_toml_str(&contents)
}
