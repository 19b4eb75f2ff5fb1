use nalgebra::Vector2;

use crate::config::{Environment, GuidanceConfig};
use crate::dynamics;
use crate::dynamics::state::LanderState;
use crate::gnc::{ControlCommand, Controller};
use crate::physics::Propulsion;

// ---------------------------------------------------------------------------
// Semi-implicit Euler integrator with terminal-condition checks
// ---------------------------------------------------------------------------

/// Advances a lander state one tick at a time.
#[derive(Debug, Clone)]
pub struct Integrator {
    propulsion: Propulsion,
    env: Environment,
    climb_cutoff: f64,   // m/s
    ground_cutoff: f64,  // m
}

impl Integrator {
    pub fn new(propulsion: Propulsion, env: Environment) -> Self {
        let defaults = GuidanceConfig::default();
        Self {
            propulsion,
            env,
            climb_cutoff: defaults.climb_cutoff,
            ground_cutoff: defaults.ground_cutoff,
        }
    }

    /// Latch suppression thresholds: the engine latch is held off while
    /// climbing faster than `climb` or below `ground`, whatever the controller asks.
    pub fn with_engine_cutoff(mut self, climb: f64, ground: f64) -> Self {
        self.climb_cutoff = climb;
        self.ground_cutoff = ground;
        self
    }

    pub fn propulsion(&self) -> &Propulsion {
        &self.propulsion
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Rewind per-run resources (engine noise) for a fresh run.
    pub fn reset(&mut self) {
        self.propulsion.reset();
    }

    /// Advance `state` by `elapsed_ms`.
    ///
    /// The controller sees the state as it was before the tick. Velocities are
    /// updated before positions; the stiff ground spring needs that ordering.
    /// Returns the command applied, or `None` when the state is already
    /// terminal and nothing was touched. A negative or non-finite
    /// `elapsed_ms` is treated as a zero-length tick.
    pub fn advance(
        &mut self,
        state: &mut LanderState,
        controller: &mut dyn Controller,
        elapsed_ms: f64,
    ) -> Option<ControlCommand> {
        if state.stop_simulating {
            return None;
        }

        let elapsed_ms = if elapsed_ms.is_finite() && elapsed_ms >= 0.0 {
            elapsed_ms
        } else {
            log::warn!("ignoring invalid tick length {elapsed_ms} ms at t={:.3}s", state.time);
            0.0
        };

        let cmd = controller.command(state);
        let suppressed = state.vel.y > self.climb_cutoff || state.pos.y < self.ground_cutoff;
        if let Some(requested) = cmd.firing {
            let firing = requested && !suppressed;
            if firing != state.firing {
                log::debug!(
                    "engine {} at t={:.3}s y={:.2}m vy={:.2}m/s",
                    if firing { "armed" } else { "cut off" },
                    state.time,
                    state.pos.y,
                    state.vel.y,
                );
            }
            state.firing = firing;
        } else if suppressed {
            state.firing = false;
        }

        state.requested_throttle = cmd.throttle_request;
        state.throttle = self.propulsion.effective_throttle(cmd.throttle_request);
        state.requested_rcs_throttle = cmd.rcs_request;
        state.rcs_command = self.propulsion.rcs_command(cmd.rcs_request);

        let accel = dynamics::accelerations(
            state,
            state.throttle,
            state.rcs_command,
            &mut self.propulsion,
            &self.env,
        );
        state.accel = accel.linear;
        state.ath = accel.angular;
        state.timestep_ms = elapsed_ms;

        let dt = elapsed_ms / 1000.0;
        state.time += dt;

        if state.exploded || accel.linear.y > self.env.crash_threshold {
            log::info!(
                "crashed at t={:.3}s: impact vy={:.2}m/s, ay={:.1}m/s^2",
                state.time,
                state.vel.y,
                accel.linear.y,
            );
            state.exploded = true;
            state.stop_simulating = true;
            state.vel = Vector2::zeros();
            state.vth = 0.0;
            return Some(cmd);
        }

        state.vel += accel.linear * dt;
        state.vth += accel.angular * dt;
        state.pos += state.vel * dt;
        state.th += state.vth * dt;

        if self.env.landing.is_met(accel.linear.y, state.pos.y, state.vel.y) {
            log::info!(
                "landed at t={:.3}s: vy={:.3}m/s, x={:.1}m, th={:.4}rad",
                state.time,
                state.vel.y,
                state.pos.x,
                state.th,
            );
            state.stop_simulating = true;
        }

        log::trace!(
            "t={:.3} y={:.3} vy={:.3} th={:.4} throttle={:.3} rcs={}",
            state.time,
            state.pos.y,
            state.vel.y,
            state.th,
            state.throttle,
            state.rcs_command,
        );
        Some(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::InitialConditions;
    use crate::gnc::ScriptedController;
    use crate::physics::RcsMode;
    use crate::vehicle::presets;

    fn integrator() -> Integrator {
        let propulsion = Propulsion::new(presets::reference_lander(), RcsMode::Digital, None);
        Integrator::new(propulsion, Environment::default())
    }

    fn state(y: f64, vy: f64) -> LanderState {
        LanderState::new(&InitialConditions { x: 0.0, y, th: 0.0, vx: 0.0, vy, vth: 0.0 })
    }

    #[test]
    fn velocity_updates_before_position() {
        let mut integ = integrator();
        let mut s = state(100.0, 0.0);
        integ.advance(&mut s, &mut ScriptedController::idle(), 1000.0);
        assert!((s.vel.y + 9.8).abs() < 1e-12);
        // Position uses the updated velocity.
        assert!((s.pos.y - 90.2).abs() < 1e-9);
        assert!((s.time - 1.0).abs() < 1e-12);
        assert_eq!(s.timestep_ms, 1000.0);
    }

    #[test]
    fn hard_impact_explodes_and_freezes() {
        let mut integ = integrator();
        let mut s = state(0.05, -10.0);
        let cmd = integ.advance(&mut s, &mut ScriptedController::idle(), 33.0);
        assert!(cmd.is_some());
        assert!(s.exploded && s.stop_simulating);
        assert_eq!(s.vel, Vector2::zeros());
        assert!(s.accel.y > 100.0);

        let frozen = s;
        assert!(integ.advance(&mut s, &mut ScriptedController::idle(), 33.0).is_none());
        assert_eq!(s, frozen);
    }

    #[test]
    fn resting_on_ground_lands() {
        let mut integ = integrator();
        let mut s = state(0.0, 0.0);
        integ.advance(&mut s, &mut ScriptedController::idle(), 33.0);
        assert!(s.stop_simulating);
        assert!(!s.exploded);
    }

    #[test]
    fn controller_latch_is_applied() {
        let mut integ = integrator();
        let mut s = state(100.0, -1.0);
        s.firing = true;
        integ.advance(&mut s, &mut ScriptedController::idle(), 33.0);
        assert!(!s.firing);
    }

    #[test]
    fn latch_held_off_while_climbing() {
        use crate::gnc::ScriptStep;
        let mut integ = integrator();
        let mut s = state(100.0, 5.0);
        let mut c = ScriptedController::new(vec![ScriptStep { until_s: 10.0, throttle: 1.0, rcs: 0.0 }]);
        integ.advance(&mut s, &mut c, 33.0);
        assert!(!s.firing);
        // The burn itself is still flown.
        assert_eq!(s.throttle, 1.0);
    }

    #[test]
    fn latch_held_off_near_ground() {
        use crate::gnc::ScriptStep;
        let mut integ = integrator().with_engine_cutoff(0.01, 0.5);
        let mut s = state(0.3, -0.5);
        let mut c = ScriptedController::new(vec![ScriptStep { until_s: 10.0, throttle: 0.8, rcs: 0.0 }]);
        integ.advance(&mut s, &mut c, 33.0);
        assert!(!s.firing);
    }

    #[test]
    fn invalid_tick_lengths_count_as_zero() {
        let mut integ = integrator();
        let mut s = state(1000.0, -150.0);
        for bad in [-33.0, f64::NAN, f64::INFINITY] {
            integ.advance(&mut s, &mut ScriptedController::idle(), bad);
            assert_eq!(s.time, 0.0);
            assert_eq!(s.timestep_ms, 0.0);
            assert_eq!(s.pos.y, 1000.0);
            assert_eq!(s.vel.y, -150.0);
        }
        integ.advance(&mut s, &mut ScriptedController::idle(), 33.0);
        assert!(s.pos.y.is_finite() && s.pos.y < 1000.0);
        assert!((s.time - 0.033).abs() < 1e-12);
    }

    #[test]
    fn requests_are_recorded_raw_and_effective() {
        use crate::gnc::ScriptStep;
        let mut integ = integrator();
        let mut s = state(500.0, -10.0);
        let mut c = ScriptedController::new(vec![ScriptStep { until_s: 10.0, throttle: 0.2, rcs: 0.4 }]);
        integ.advance(&mut s, &mut c, 33.0);
        assert_eq!(s.requested_throttle, 0.2);
        assert_eq!(s.throttle, 0.6);
        assert_eq!(s.requested_rcs_throttle, 0.4);
        assert_eq!(s.rcs_command, 1.0);
        assert!(s.firing);
    }
}
