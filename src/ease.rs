//! Timing curves that reshape linear clip progress.

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanMethod {
    /// Progress is pinned to 0; an external controller is expected to drive
    /// the crop/camera parameters directly every frame.
    External,
    Linear,
    /// Symmetric ease-in/ease-out power curve; `accel` controls sharpness.
    Power,
    /// Velocity ramps linearly up over the first `accel/2` of the clip,
    /// holds, and ramps down symmetrically at the end.
    VelocityRamp,
}

impl PanMethod {
    /// Maps raw progress `t` in [0,1] to eased progress in [0,1].
    pub fn apply(self, t: f64, accel: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let eased = match self {
            Self::External => 0.0,
            Self::Linear => t,
            Self::Power => {
                let p = 1.0 / (1.0 - accel / 2.0);
                if t < 0.5 {
                    (2.0 * t).powf(p) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powf(p) / 2.0
                }
            }
            Self::VelocityRamp => {
                let p = accel / 2.0;
                if p == 0.0 {
                    // Degenerate ramp is plain linear motion.
                    t
                } else {
                    // Plateau velocity chosen so total distance is 1.
                    let v = 1.0 / (1.0 - p);
                    if t < p {
                        v * t * t / (2.0 * p)
                    } else if t < 1.0 - p {
                        v * (t - p / 2.0)
                    } else {
                        1.0 - v * (1.0 - t) * (1.0 - t) / (2.0 * p)
                    }
                }
            }
        };
        eased.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METHODS: [PanMethod; 4] = [
        PanMethod::External,
        PanMethod::Linear,
        PanMethod::Power,
        PanMethod::VelocityRamp,
    ];

    #[test]
    fn endpoints_are_stable() {
        for m in METHODS {
            for accel in [0.0, 0.3, 0.7, 1.0] {
                assert_eq!(m.apply(0.0, accel), 0.0, "{m:?} accel={accel}");
                if m == PanMethod::External {
                    assert_eq!(m.apply(1.0, accel), 0.0);
                } else {
                    assert_eq!(m.apply(1.0, accel), 1.0, "{m:?} accel={accel}");
                }
            }
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for m in [PanMethod::Linear, PanMethod::Power, PanMethod::VelocityRamp] {
            for accel in [0.0, 0.25, 0.5, 0.9, 1.0] {
                let mut last = 0.0;
                for i in 0..=1000 {
                    let t = i as f64 / 1000.0;
                    let v = m.apply(t, accel);
                    assert!(
                        v >= last,
                        "{m:?} accel={accel} not monotone at t={t}: {v} < {last}"
                    );
                    last = v;
                }
            }
        }
    }

    #[test]
    fn velocity_ramp_accel_0_is_linear() {
        for i in 0..=100 {
            let t = i as f64 / 100.0;
            assert_eq!(
                PanMethod::VelocityRamp.apply(t, 0.0),
                PanMethod::Linear.apply(t, 0.0)
            );
        }
    }

    #[test]
    fn velocity_ramp_is_continuous_at_breakpoints() {
        let accel = 0.6;
        let p = accel / 2.0;
        for bp in [p, 1.0 - p] {
            let before = PanMethod::VelocityRamp.apply(bp - 1e-9, accel);
            let at = PanMethod::VelocityRamp.apply(bp, accel);
            assert!((at - before).abs() < 1e-8, "jump at t={bp}");
        }
    }

    #[test]
    fn velocity_ramp_full_accel_is_symmetric_quadratic() {
        // accel=1 leaves no plateau; halfway lands exactly at 0.5.
        assert!((PanMethod::VelocityRamp.apply(0.5, 1.0) - 0.5).abs() < 1e-12);
        assert!((PanMethod::VelocityRamp.apply(0.25, 1.0) - 0.125).abs() < 1e-12);
    }

    #[test]
    fn power_is_symmetric_about_midpoint() {
        for accel in [0.0, 0.4, 1.0] {
            for i in 0..=50 {
                let t = i as f64 / 100.0;
                let a = PanMethod::Power.apply(t, accel);
                let b = PanMethod::Power.apply(1.0 - t, accel);
                assert!((a - (1.0 - b)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn external_is_pinned_to_zero() {
        for i in 0..=10 {
            assert_eq!(PanMethod::External.apply(i as f64 / 10.0, 0.5), 0.0);
        }
    }
}
