use nalgebra::Vector2;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Initial conditions
// ---------------------------------------------------------------------------

/// Where and how fast the lander is when a run starts.
/// Frame: x downrange, y up, th measured from vertical (positive tips thrust toward +x).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct InitialConditions {
    pub x: f64,    // m
    pub y: f64,    // m
    pub th: f64,   // rad
    pub vx: f64,   // m/s
    pub vy: f64,   // m/s
    pub vth: f64,  // rad/s
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 1000.0,
            th: 1.0,
            vx: 0.0,
            vy: -150.0,
            vth: 0.0,
        }
    }
}

impl InitialConditions {
    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.th, self.vx, self.vy, self.vth]
            .iter()
            .all(|v| v.is_finite())
    }
}

// ---------------------------------------------------------------------------
// Lander state vector
// ---------------------------------------------------------------------------

/// Physical and control state carried from one tick to the next.
///
/// Accelerations are recomputed every tick and are not integrated state.
/// Once `stop_simulating` is set the integrator leaves the whole struct alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanderState {
    pub time: f64,              // s since run start
    pub pos: Vector2<f64>,      // m   [x, y]
    pub th: f64,                // rad
    pub vel: Vector2<f64>,      // m/s
    pub vth: f64,               // rad/s
    pub accel: Vector2<f64>,    // m/s^2
    pub ath: f64,               // rad/s^2

    /// Effective throttle: 0 or within [MIN_THROTTLE, 1].
    pub throttle: f64,
    /// Raw controller request, unclamped.
    pub requested_throttle: f64,
    /// RCS command as applied (-1..=1, or exactly -1/0/1 with digital thrusters).
    pub rcs_command: f64,
    /// Raw controller RCS request, unclamped.
    pub requested_rcs_throttle: f64,

    pub firing: bool,
    pub exploded: bool,
    pub stop_simulating: bool,

    /// Length of the tick that produced this state, ms.
    pub timestep_ms: f64,
}

impl LanderState {
    pub fn new(initial: &InitialConditions) -> Self {
        Self {
            time: 0.0,
            pos: Vector2::new(initial.x, initial.y),
            th: initial.th,
            vel: Vector2::new(initial.vx, initial.vy),
            vth: initial.vth,
            accel: Vector2::zeros(),
            ath: 0.0,
            throttle: 0.0,
            requested_throttle: 0.0,
            rcs_command: 0.0,
            requested_rcs_throttle: 0.0,
            firing: false,
            exploded: false,
            stop_simulating: false,
            timestep_ms: 0.0,
        }
    }

    /// Altitude above the ground plane.
    pub fn altitude(&self) -> f64 {
        self.pos.y
    }

    /// Vertical velocity (positive up).
    pub fn vertical_speed(&self) -> f64 {
        self.vel.y
    }

    pub fn is_terminal(&self) -> bool {
        self.stop_simulating
    }

    pub fn has_landed(&self) -> bool {
        self.stop_simulating && !self.exploded
    }
}

impl Default for LanderState {
    fn default() -> Self {
        Self::new(&InitialConditions::default())
    }
}
