use crate::config::GuidanceConfig;
use crate::dynamics::state::LanderState;
use crate::vehicle::Lander;
use super::controller::{Controller, RotationDecision, ThrottleDecision};
use super::pid::Pid;

// ---------------------------------------------------------------------------
// PID landing controller: descent-rate tracking + attitude hold
// ---------------------------------------------------------------------------

/// Tracks a square-root descent profile with a velocity PID and holds the
/// vehicle upright with a PD loop on attitude.
#[derive(Debug, Clone)]
pub struct PidLander {
    pub velocity_pid: Pid,
    pub attitude_pid: Pid,
    /// Deceleration the reference descent profile is built around, m/s^2.
    pub profile_accel: f64,
    /// Slowest commanded descent rate near the ground, m/s.
    pub min_descent_rate: f64,
    max_accel: f64,
    gravity: f64,
    nominal_dt: f64,
    tuning: GuidanceConfig,
}

impl PidLander {
    pub fn new(lander: &Lander, gravity: f64, tuning: GuidanceConfig, nominal_dt: f64) -> Self {
        Self {
            // Tuned for the reference booster at ~30 Hz
            velocity_pid: Pid::new(1.0, 0.05, 0.0),
            attitude_pid: Pid::new(4.0, 0.0, 8.0),
            profile_accel: 5.0,
            min_descent_rate: 1.0,
            max_accel: lander.max_accel(),
            gravity,
            nominal_dt,
            tuning,
        }
    }

    /// Reference vertical speed (negative, downward) at altitude `y`.
    pub fn target_descent_rate(&self, y: f64) -> f64 {
        let height = (y - self.tuning.altitude_offset).max(0.0);
        -(2.0 * self.profile_accel * height).sqrt().max(self.min_descent_rate)
    }

    fn step_dt(&self, state: &LanderState) -> f64 {
        if state.timestep_ms > 0.0 {
            state.timestep_ms / 1000.0
        } else {
            self.nominal_dt
        }
    }
}

impl Controller for PidLander {
    fn decide_throttle(&mut self, state: &LanderState) -> ThrottleDecision {
        if state.vel.y > self.tuning.climb_cutoff || state.pos.y < self.tuning.ground_cutoff {
            return ThrottleDecision { request: 0.0, firing: Some(false), accel_to_stop: None };
        }

        let dt = self.step_dt(state);
        let error = self.target_descent_rate(state.pos.y) - state.vel.y;
        let correction = self.velocity_pid.update(error, dt);
        // Hover thrust plus correction, projected onto the tilted thrust axis.
        let tilt = state.th.cos().max(0.2);
        let request = (self.gravity + correction * self.max_accel) / self.max_accel / tilt;

        ThrottleDecision { request, firing: Some(true), accel_to_stop: None }
    }

    fn decide_rotation(&mut self, state: &LanderState) -> RotationDecision {
        if state.th.abs() < self.tuning.deadband_angle && state.vth.abs() < self.tuning.deadband_rate {
            return RotationDecision { request: 0.0, accel_to_stop: None };
        }
        let dt = self.step_dt(state);
        let request = (-self.attitude_pid.update(state.th, dt)).clamp(-1.0, 1.0);
        RotationDecision { request, accel_to_stop: None }
    }

    fn reset(&mut self) {
        self.velocity_pid.reset();
        self.attitude_pid.reset();
    }

    fn name(&self) -> &str {
        "Pid"
    }
}
