/// One step of a second-order ODE r'' = a(r).
///
/// The acceleration is injected as a plain closure so the metric formulas
/// know nothing about the scheme that advances them.
pub trait SecondOrderIntegrator {
    /// Advance (t0, r0, u0 = dr/dt) by `dt`, returning (t1, r1, u1).
    fn integrate_order2(
        &self,
        dt: f64,
        t0: f64,
        r0: f64,
        u0: f64,
        acceleration: &dyn Fn(f64) -> f64,
    ) -> (f64, f64, f64);
}

/// Second-order Runge-Kutta, midpoint rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct MidpointRk2;

impl SecondOrderIntegrator for MidpointRk2 {
    fn integrate_order2(
        &self,
        dt: f64,
        t0: f64,
        r0: f64,
        u0: f64,
        acceleration: &dyn Fn(f64) -> f64,
    ) -> (f64, f64, f64) {
        let half = 0.5 * dt;
        let r_mid = r0 + half * u0;
        let u_mid = u0 + half * acceleration(r0);

        let r1 = r0 + dt * u_mid;
        let u1 = u0 + dt * acceleration(r_mid);
        (t0 + dt, r1, u1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::TAU;

    fn oscillate(steps: usize) -> (f64, f64, f64) {
        let dt = TAU / steps as f64;
        let (mut t, mut r, mut u) = (0.0, 1.0, 0.0);
        for _ in 0..steps {
            (t, r, u) = MidpointRk2.integrate_order2(dt, t, r, u, &|x| -x);
        }
        (t, r, u)
    }

    #[test]
    fn harmonic_oscillator_returns_after_one_period() {
        let (t, r, u) = oscillate(1000);
        assert_abs_diff_eq!(t, TAU, epsilon = 1e-12);
        assert_abs_diff_eq!(r, 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(u, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn error_shrinks_quadratically() {
        let coarse = (oscillate(200).1 - 1.0).abs() + oscillate(200).2.abs();
        let fine = (oscillate(400).1 - 1.0).abs() + oscillate(400).2.abs();
        let ratio = coarse / fine;
        assert!(ratio > 3.0 && ratio < 5.0, "convergence ratio {ratio}");
    }

    #[test]
    fn free_motion_is_exact() {
        let (t, r, u) = MidpointRk2.integrate_order2(0.5, 2.0, 3.0, 4.0, &|_| 0.0);
        assert_eq!((t, r, u), (2.5, 5.0, 4.0));
    }
}
