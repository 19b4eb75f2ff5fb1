pub mod state;

use nalgebra::Vector2;

use crate::config::Environment;
use crate::physics::Propulsion;
pub use state::{InitialConditions, LanderState};

// ---------------------------------------------------------------------------
// Planar equations of motion
// ---------------------------------------------------------------------------

/// Translational and angular acceleration for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accel {
    pub linear: Vector2<f64>,  // m/s^2 [x, y]
    pub angular: f64,          // rad/s^2
}

/// Sum the forces acting on the lander for the given actuator settings.
///
/// Terms modeled:
///   1. Gravity         - constant, along -y
///   2. Ground reaction - spring-damper below the zero-altitude plane
///   3. Main engine     - fixed direction in body frame, rotated by attitude
///   4. RCS             - pure torque
pub fn accelerations(
    state: &LanderState,
    throttle: f64,
    rcs_command: f64,
    propulsion: &mut Propulsion,
    env: &Environment,
) -> Accel {
    let gravity = Vector2::new(0.0, -env.gravity);
    let ground = Vector2::new(0.0, env.ground.reaction(state.pos.y, state.vel.y));
    let engine = propulsion.engine_accel(throttle, state.th);

    Accel {
        linear: gravity + ground + engine,
        angular: propulsion.rcs_accel(rcs_command),
    }
}
