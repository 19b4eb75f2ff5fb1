use serde::Deserialize;

// ---------------------------------------------------------------------------
// Ground contact: spring-damper below the zero-altitude plane
// ---------------------------------------------------------------------------

/// Contact model pushing the lander back up as it sinks into the ground.
///
/// The spring is preloaded with `gravity_compensation` so a lander resting at
/// y = 0 feels exactly enough support to cancel gravity. A fast impact produces
/// a large upward spike, which the integrator reads as a crash.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GroundModel {
    pub stiffness: f64,             // K, 1/s^2
    pub damping: f64,               // D, 1/s
    pub gravity_compensation: f64,  // m/s^2
}

impl Default for GroundModel {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 20.0,
            gravity_compensation: 9.8,
        }
    }
}

impl GroundModel {
    /// Upward acceleration from ground contact at altitude `y` and vertical speed `vy`.
    pub fn reaction(&self, y: f64, vy: f64) -> f64 {
        let spring = -self.stiffness * y + self.gravity_compensation;
        if spring > 0.0 {
            (spring - self.damping * vy).max(0.0)
        } else {
            0.0
        }
    }
}
