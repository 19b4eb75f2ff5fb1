use serde::Deserialize;

// ---------------------------------------------------------------------------
// Lander definition (rigid cylinder with one main engine and RCS pods)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Lander {
    pub name: String,
    pub mass: f64,          // kg (constant, no propellant depletion)
    pub max_thrust: f64,    // N
    pub min_throttle: f64,  // fraction of max_thrust the engine cannot go below while lit
    pub rcs_thrust: f64,    // N per RCS pod
    pub height: f64,        // m
    pub radius: f64,        // m
}

impl Lander {
    /// Main engine acceleration at full throttle.
    pub fn max_accel(&self) -> f64 {
        self.max_thrust / self.mass
    }

    /// Moment of inertia about the pitch axis, solid cylinder approximation.
    pub fn inertia(&self) -> f64 {
        self.mass / 12.0 * (3.0 * self.radius.powi(2) + self.height.powi(2))
    }

    /// RCS pods sit at the ends of the hull.
    pub fn rcs_lever_arm(&self) -> f64 {
        self.height / 2.0
    }

    /// Angular acceleration from one full RCS burn.
    pub fn rcs_angular_accel(&self) -> f64 {
        self.rcs_thrust * self.rcs_lever_arm() / self.inertia()
    }

    /// Thrust-to-weight ratio at full throttle for a given gravity.
    pub fn twr(&self, gravity: f64) -> f64 {
        self.max_accel() / gravity
    }
}

impl Default for Lander {
    fn default() -> Self {
        presets::reference_lander()
    }
}

// ---------------------------------------------------------------------------
// Lander builder
// ---------------------------------------------------------------------------

pub struct LanderBuilder {
    name: String,
    mass: f64,
    max_thrust: f64,
    min_throttle: f64,
    rcs_thrust: f64,
    height: f64,
    radius: f64,
}

impl LanderBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mass: 25_000.0,
            max_thrust: 750_000.0,
            min_throttle: 0.6,
            rcs_thrust: 75_000.0,
            height: 70.0,
            radius: 1.85,
        }
    }

    pub fn mass(mut self, v: f64) -> Self { self.mass = v; self }
    pub fn max_thrust(mut self, v: f64) -> Self { self.max_thrust = v; self }
    pub fn min_throttle(mut self, v: f64) -> Self { self.min_throttle = v; self }
    pub fn rcs_thrust(mut self, v: f64) -> Self { self.rcs_thrust = v; self }
    pub fn height(mut self, v: f64) -> Self { self.height = v; self }
    pub fn radius(mut self, v: f64) -> Self { self.radius = v; self }

    pub fn build(self) -> Lander {
        Lander {
            name: self.name,
            mass: self.mass,
            max_thrust: self.max_thrust,
            min_throttle: self.min_throttle,
            rcs_thrust: self.rcs_thrust,
            height: self.height,
            radius: self.radius,
        }
    }
}

// ---------------------------------------------------------------------------
// Preset landers
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// Booster-sized lander: 25 t, 750 kN, 70 m tall.
    pub fn reference_lander() -> Lander {
        LanderBuilder::new("Reference Booster").build()
    }

    /// Smaller hopper with a deep-throttling engine and weak RCS.
    pub fn hopper() -> Lander {
        LanderBuilder::new("Hopper")
            .mass(2_000.0)
            .max_thrust(50_000.0)
            .min_throttle(0.3)
            .rcs_thrust(1_500.0)
            .height(8.0)
            .radius(1.2)
            .build()
    }
}
