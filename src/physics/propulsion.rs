use nalgebra::Vector2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, NormalError};
use serde::Deserialize;

use crate::vehicle::Lander;

// ---------------------------------------------------------------------------
// RCS thruster flavour
// ---------------------------------------------------------------------------

/// How RCS requests are turned into torque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RcsMode {
    /// On/off pods: the request is reduced to its sign.
    #[default]
    Digital,
    /// Throttleable pods: the request is clamped to [-1, 1].
    Proportional,
}

// ---------------------------------------------------------------------------
// Engine noise
// ---------------------------------------------------------------------------

/// Seedable multiplicative noise on main engine thrust.
#[derive(Debug, Clone)]
pub struct ThrustNoise {
    seed: u64,
    dist: Normal<f64>,
    rng: SmallRng,
}

impl ThrustNoise {
    pub fn new(std_dev: f64, seed: u64) -> Result<Self, NormalError> {
        Ok(Self {
            seed,
            dist: Normal::new(0.0, std_dev)?,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Rewind the generator so a restarted run sees the same noise sequence.
    pub fn reseed(&mut self) {
        self.rng = SmallRng::seed_from_u64(self.seed);
    }

    /// Thrust scale factor for one tick, never negative.
    pub fn sample_factor(&mut self) -> f64 {
        (1.0 + self.dist.sample(&mut self.rng)).max(0.0)
    }
}

// ---------------------------------------------------------------------------
// Propulsion model
// ---------------------------------------------------------------------------

/// Resolves controller requests into actuator settings and accelerations.
#[derive(Debug, Clone)]
pub struct Propulsion {
    lander: Lander,
    rcs_mode: RcsMode,
    noise: Option<ThrustNoise>,
}

impl Propulsion {
    pub fn new(lander: Lander, rcs_mode: RcsMode, noise: Option<ThrustNoise>) -> Self {
        Self { lander, rcs_mode, noise }
    }

    pub fn lander(&self) -> &Lander {
        &self.lander
    }

    pub fn rcs_mode(&self) -> RcsMode {
        self.rcs_mode
    }

    pub fn reset(&mut self) {
        if let Some(noise) = self.noise.as_mut() {
            noise.reseed();
        }
    }

    /// Engine is either off or between minimum throttle and full.
    pub fn effective_throttle(&self, request: f64) -> f64 {
        if request > 0.0 {
            request.clamp(self.lander.min_throttle, 1.0)
        } else {
            0.0
        }
    }

    pub fn rcs_command(&self, request: f64) -> f64 {
        if request.is_nan() {
            return 0.0;
        }
        match self.rcs_mode {
            RcsMode::Digital if request == 0.0 => 0.0,
            RcsMode::Digital => request.signum(),
            RcsMode::Proportional => request.clamp(-1.0, 1.0),
        }
    }

    /// Main engine acceleration [x, y]. Thrust points along the body axis,
    /// tipped `th` from vertical.
    pub fn engine_accel(&mut self, throttle: f64, th: f64) -> Vector2<f64> {
        if throttle <= 0.0 {
            return Vector2::zeros();
        }
        let scale = match self.noise.as_mut() {
            Some(noise) => noise.sample_factor(),
            None => 1.0,
        };
        Vector2::new(th.sin(), th.cos()) * (throttle * self.lander.max_accel() * scale)
    }

    pub fn rcs_accel(&self, command: f64) -> f64 {
        command * self.lander.rcs_angular_accel()
    }
}
