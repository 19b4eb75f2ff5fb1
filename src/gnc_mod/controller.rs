use crate::dynamics::state::LanderState;

// ---------------------------------------------------------------------------
// Controller outputs
// ---------------------------------------------------------------------------

/// Main engine decision for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThrottleDecision {
    /// Requested throttle; zero or negative means engine off.
    pub request: f64,
    /// New value for the engine-armed latch, `None` to leave it alone.
    pub firing: Option<bool>,
    /// Vertical braking acceleration the decision was based on.
    pub accel_to_stop: Option<f64>,
}

/// Attitude decision for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationDecision {
    /// Signed RCS request.
    pub request: f64,
    /// Angular braking acceleration the decision was based on.
    pub accel_to_stop: Option<f64>,
}

/// Everything a controller asks of the vehicle on one tick.
/// The integrator applies the latch update; controllers never touch the state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlCommand {
    pub throttle_request: f64,
    pub rcs_request: f64,
    pub firing: Option<bool>,
    pub accel_to_stop: Option<f64>,
    pub rot_accel_to_stop: Option<f64>,
}

impl ControlCommand {
    pub fn from_decisions(throttle: ThrottleDecision, rotation: RotationDecision) -> Self {
        Self {
            throttle_request: throttle.request,
            rcs_request: rotation.request,
            firing: throttle.firing,
            accel_to_stop: throttle.accel_to_stop,
            rot_accel_to_stop: rotation.accel_to_stop,
        }
    }
}

/// Trait for landing controllers.
///
/// Implement this to plug a guidance strategy into the simulation loop.
/// Both decisions see the state as it was before the tick.
pub trait Controller {
    /// Decide main engine throttle.
    fn decide_throttle(&mut self, state: &LanderState) -> ThrottleDecision;

    /// Decide RCS torque.
    fn decide_rotation(&mut self, state: &LanderState) -> RotationDecision;

    /// Combined command for one tick.
    fn command(&mut self, state: &LanderState) -> ControlCommand {
        let throttle = self.decide_throttle(state);
        let rotation = self.decide_rotation(state);
        ControlCommand::from_decisions(throttle, rotation)
    }

    /// Reset controller internal state (e.g., PID integrators).
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}
