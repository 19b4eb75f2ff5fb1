// ---------------------------------------------------------------------------
// Braking estimators: constant deceleration needed to stop over a distance
// ---------------------------------------------------------------------------

/// Stand-in for "infinitely hard braking" when an estimate diverges.
pub const MAX_DEMAND: f64 = 1.0e9;

/// Replace non-finite or absurd estimates with a finite maximum demand.
/// NaN is read as maximum demand too.
pub fn saturate(value: f64) -> f64 {
    if value.is_nan() || value == f64::INFINITY {
        MAX_DEMAND
    } else if value == f64::NEG_INFINITY {
        -MAX_DEMAND
    } else {
        value.clamp(-MAX_DEMAND, MAX_DEMAND)
    }
}

/// Deceleration that brings `vy` to zero exactly at altitude `offset`.
/// Negative below the offset; diverges as `y` approaches it.
pub fn braking_accel(vy: f64, y: f64, offset: f64) -> f64 {
    let raw = vy * vy / (2.0 * (y - offset));
    let accel = saturate(raw);
    if !raw.is_finite() {
        log::debug!("braking estimate diverged at y={y:.4}, vy={vy:.4}; saturating");
    }
    accel
}

/// Angular deceleration that brings `vth` to zero exactly at `th = 0`.
/// Signed like `th`; diverges as `th` approaches zero.
pub fn rotational_braking_accel(vth: f64, th: f64) -> f64 {
    saturate(vth * vth / (2.0 * th))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn braking_matches_kinematics() {
        // 20 m/s over 100 m -> 2 m/s^2
        assert!((braking_accel(-20.0, 100.1, 0.1) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn braking_saturates_at_offset() {
        let a = braking_accel(-5.0, 0.1, 0.1);
        assert_eq!(a, MAX_DEMAND);
        // 0 / 0
        assert_eq!(braking_accel(0.0, 0.1, 0.1), MAX_DEMAND);
    }

    #[test]
    fn braking_negative_below_offset() {
        assert!(braking_accel(-1.0, 0.05, 0.1) < 0.0);
    }

    #[test]
    fn rotational_braking_signed_by_angle() {
        assert!((rotational_braking_accel(1.0, 0.5) - 1.0).abs() < 1e-12);
        assert!((rotational_braking_accel(1.0, -0.5) + 1.0).abs() < 1e-12);
        assert_eq!(rotational_braking_accel(0.3, 0.0), MAX_DEMAND);
        assert_eq!(rotational_braking_accel(0.3, -0.0), -MAX_DEMAND);
    }

    #[test]
    fn saturate_is_always_finite() {
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e300, -1e300, 3.0] {
            assert!(saturate(v).is_finite());
        }
        assert_eq!(saturate(3.0), 3.0);
    }
}
