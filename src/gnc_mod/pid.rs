// ---------------------------------------------------------------------------
// Single-axis PID loop
// ---------------------------------------------------------------------------

/// Discrete PID on a scalar error signal, with a clamped integrator.
///
/// The derivative term is skipped on the first sample after construction or
/// `reset`, so a large initial error does not produce a derivative kick.
#[derive(Debug, Clone)]
pub struct Pid {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    /// Anti-windup bound on the accumulated integral.
    pub integral_limit: f64,
    integral: f64,
    last_error: Option<f64>,
}

impl Pid {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd, integral_limit: 1.0, integral: 0.0, last_error: None }
    }

    pub fn with_integral_limit(mut self, limit: f64) -> Self {
        self.integral_limit = limit.abs();
        self
    }

    /// Feed one error sample taken `dt` seconds after the previous one.
    pub fn update(&mut self, error: f64, dt: f64) -> f64 {
        let limit = self.integral_limit;
        self.integral = (self.integral + error * dt).clamp(-limit, limit);

        let rate = match self.last_error {
            Some(prev) if dt > 0.0 => (error - prev) / dt,
            _ => 0.0,
        };
        self.last_error = Some(error);

        self.kp * error + self.ki * self.integral + self.kd * rate
    }

    pub fn integral(&self) -> f64 {
        self.integral
    }

    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportional_only() {
        let mut pid = Pid::new(2.0, 0.0, 0.0);
        assert!((pid.update(0.25, 0.033) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn integral_sums_error_over_time() {
        let mut pid = Pid::new(0.0, 1.0, 0.0);
        pid.update(1.0, 0.1);
        assert!((pid.update(1.0, 0.1) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn integral_is_clamped() {
        let mut pid = Pid::new(0.0, 1.0, 0.0).with_integral_limit(-0.5);
        for _ in 0..100 {
            pid.update(10.0, 0.1);
        }
        assert_eq!(pid.integral(), 0.5);
        for _ in 0..100 {
            pid.update(-10.0, 0.1);
        }
        assert_eq!(pid.integral(), -0.5);
    }

    #[test]
    fn no_derivative_kick_on_first_sample() {
        let mut pid = Pid::new(0.0, 0.0, 5.0);
        assert_eq!(pid.update(3.0, 0.1), 0.0);
        // error fell by 1 over 0.1 s
        assert!((pid.update(2.0, 0.1) + 50.0).abs() < 1e-9);
    }

    #[test]
    fn zero_dt_skips_derivative() {
        let mut pid = Pid::new(0.0, 0.0, 5.0);
        pid.update(1.0, 0.1);
        assert_eq!(pid.update(3.0, 0.0), 0.0);
    }

    #[test]
    fn reset_forgets_history() {
        let mut pid = Pid::new(0.0, 1.0, 1.0);
        pid.update(1.0, 0.1);
        pid.reset();
        assert_eq!(pid.integral(), 0.0);
        assert_eq!(pid.update(0.0, 0.1), 0.0);
    }
}
