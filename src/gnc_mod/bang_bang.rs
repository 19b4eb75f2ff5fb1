use crate::config::GuidanceConfig;
use crate::dynamics::state::LanderState;
use crate::vehicle::Lander;
use super::controller::{Controller, RotationDecision, ThrottleDecision};
use super::guidance::{braking_accel, rotational_braking_accel};

// ---------------------------------------------------------------------------
// Hysteretic bang-bang landing controller
// ---------------------------------------------------------------------------

/// Suicide-burn style lander.
///
/// Throttle: stays off until the braking burn needed to stop at the offset
/// altitude reaches the arming margin of the engine's capability, then latches
/// on and reflects the planned acceleration about that ideal operating point:
///
/// ```text
/// planned  = braking + g
/// ideal    = margin * max_accel
/// adjusted = planned - (ideal - planned)
/// request  = adjusted / max_accel
/// ```
///
/// Rotation: full RCS toward upright while the stop is within RCS authority,
/// otherwise full RCS against the current spin.
#[derive(Debug, Clone)]
pub struct BangBangLander {
    max_accel: f64,
    gravity: f64,
    inertia: f64,
    lever_arm: f64,
    rcs_thrust: f64,
    tuning: GuidanceConfig,
}

impl BangBangLander {
    pub fn new(lander: &Lander, gravity: f64, tuning: GuidanceConfig) -> Self {
        Self {
            max_accel: lander.max_accel(),
            gravity,
            inertia: lander.inertia(),
            lever_arm: lander.rcs_lever_arm(),
            rcs_thrust: lander.rcs_thrust,
            tuning,
        }
    }

    fn ideal_accel(&self) -> f64 {
        self.tuning.arming_margin * self.max_accel
    }

    /// Reflected throttle request for an armed engine.
    fn adjusted_throttle(&self, braking: f64) -> f64 {
        let planned = braking + self.gravity;
        let trim = self.ideal_accel() - planned;
        let adjusted = planned - trim;
        adjusted / self.max_accel
    }
}

impl Controller for BangBangLander {
    fn decide_throttle(&mut self, state: &LanderState) -> ThrottleDecision {
        let braking = braking_accel(state.vel.y, state.pos.y, self.tuning.altitude_offset);
        let off = ThrottleDecision {
            request: 0.0,
            firing: Some(false),
            accel_to_stop: Some(braking),
        };

        if state.vel.y > self.tuning.climb_cutoff || state.pos.y < self.tuning.ground_cutoff {
            return off;
        }
        let should_arm = braking + self.gravity > self.ideal_accel();
        if !(state.firing || should_arm) {
            return off;
        }

        ThrottleDecision {
            request: self.adjusted_throttle(braking),
            firing: Some(true),
            accel_to_stop: Some(braking),
        }
    }

    fn decide_rotation(&mut self, state: &LanderState) -> RotationDecision {
        if state.th.abs() < self.tuning.deadband_angle && state.vth.abs() < self.tuning.deadband_rate {
            return RotationDecision { request: 0.0, accel_to_stop: None };
        }

        let rot_braking = rotational_braking_accel(state.vth, state.th);
        let force_to_stop = rot_braking * self.inertia / self.lever_arm;

        let request = if force_to_stop.abs() < self.rcs_thrust {
            if state.th > 0.0 { -1.0 } else { 1.0 }
        } else if state.vth < 0.0 {
            1.0
        } else {
            -1.0
        };

        RotationDecision { request, accel_to_stop: Some(rot_braking) }
    }

    fn name(&self) -> &str {
        "BangBang"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::InitialConditions;
    use crate::vehicle::presets;

    fn controller() -> BangBangLander {
        BangBangLander::new(&presets::reference_lander(), 9.8, GuidanceConfig::default())
    }

    fn state(y: f64, vy: f64, th: f64, vth: f64) -> LanderState {
        LanderState::new(&InitialConditions { x: 0.0, y, th, vx: 0.0, vy, vth })
    }

    #[test]
    fn climbing_suppresses_engine() {
        let mut c = controller();
        let mut s = state(500.0, 1.0, 0.0, 0.0);
        s.firing = true;
        let d = c.decide_throttle(&s);
        assert_eq!(d.request, 0.0);
        assert_eq!(d.firing, Some(false));
    }

    #[test]
    fn on_ground_suppresses_engine() {
        let mut c = controller();
        let mut s = state(0.005, -50.0, 0.0, 0.0);
        s.firing = true;
        let d = c.decide_throttle(&s);
        assert_eq!(d.request, 0.0);
        assert_eq!(d.firing, Some(false));
    }

    #[test]
    fn stays_off_while_braking_is_easy() {
        let mut c = controller();
        // 10 m/s over ~1 km: braking ~0.05 m/s^2
        let d = c.decide_throttle(&state(1000.0, -10.0, 0.0, 0.0));
        assert_eq!(d.request, 0.0);
        assert_eq!(d.firing, Some(false));
    }

    #[test]
    fn arms_past_margin_and_reflects_about_ideal() {
        let mut c = controller();
        let s = state(400.1, -150.0, 0.0, 0.0);
        let d = c.decide_throttle(&s);
        let braking = 150.0 * 150.0 / (2.0 * 400.0);
        let planned = braking + 9.8;
        assert!(planned > 27.0);
        let expected = (2.0 * planned - 27.0) / 30.0;
        assert_eq!(d.firing, Some(true));
        assert!((d.request - expected).abs() < 1e-9);
    }

    #[test]
    fn latched_engine_keeps_firing_below_margin() {
        let mut c = controller();
        let mut s = state(1000.0, -10.0, 0.0, 0.0);
        s.firing = true;
        let d = c.decide_throttle(&s);
        assert_eq!(d.firing, Some(true));
        // Reflected below ideal: request is negative, engine effectively off.
        assert!(d.request < 0.0);
    }

    #[test]
    fn divergent_braking_stays_finite() {
        let mut c = controller();
        let mut s = state(0.1, -5.0, 0.0, 0.0);
        s.firing = true;
        let d = c.decide_throttle(&s);
        assert!(d.request.is_finite());
        assert!(d.request > 1.0);
    }

    #[test]
    fn deadband_commands_nothing() {
        let mut c = controller();
        for (th, vth) in [(0.0, 0.0), (0.009, -0.009), (-0.005, 0.001)] {
            let d = c.decide_rotation(&state(123.0, -40.0, th, vth));
            assert_eq!(d.request, 0.0);
        }
    }

    #[test]
    fn rotates_toward_upright_when_stoppable() {
        let mut c = controller();
        assert_eq!(c.decide_rotation(&state(500.0, 0.0, 0.5, 0.0)).request, -1.0);
        assert_eq!(c.decide_rotation(&state(500.0, 0.0, -0.5, 0.0)).request, 1.0);
    }

    #[test]
    fn counters_spin_when_overshoot_looms() {
        let mut c = controller();
        // Needs ~4 rad/s^2, far beyond RCS authority.
        assert_eq!(c.decide_rotation(&state(500.0, 0.0, 0.5, -2.0)).request, 1.0);
        assert_eq!(c.decide_rotation(&state(500.0, 0.0, -0.5, 2.0)).request, -1.0);
    }

    #[test]
    fn spin_through_upright_is_countered() {
        let mut c = controller();
        let d = c.decide_rotation(&state(500.0, 0.0, 0.0, 0.5));
        assert_eq!(d.request, -1.0);
        assert!(d.accel_to_stop.unwrap().is_finite());
    }
}
