//! Closed-form geodesic formulas for the vacuum (exterior) metric.
//!
//! With f = 1 - rs/r and the angular term w = 1 + L²/r² (massive) or
//! w = L²/r² (photon):
//!
//! - astronaut frame: (dr/dτ / c)² = E² - V_A, V_A = f·w
//! - distant observer: (dr/dt / c)² = E² - V_DO, V_DO = E² - f²(E² - V_A)/E²
//!
//! Accelerations are -c²/2 · dV/dr of the matching potential.

use crate::metrics::schwarzschild::CentralBody;
use crate::mobile::Mobile;

/// Angular term of the potential and its radial derivative.
fn angular_term(l: f64, r: f64, rest_mass: bool) -> (f64, f64) {
    let l2_r2 = l * l / (r * r);
    let w = if rest_mass { 1.0 + l2_r2 } else { l2_r2 };
    (w, -2.0 * l2_r2 / r)
}

fn astronaut_potential(body: &CentralBody, l: f64, r: f64, rest_mass: bool) -> (f64, f64) {
    let (w, dw) = angular_term(l, r, rest_mass);
    let f = body.lapse(r);
    let df = body.schwarzschild_radius() / (r * r);
    (f * w, df * w + f * dw)
}

fn observer_potential(body: &CentralBody, l: f64, e: f64, r: f64, rest_mass: bool) -> (f64, f64) {
    let (v, dv) = astronaut_potential(body, l, r, rest_mass);
    let f = body.lapse(r);
    let df = body.schwarzschild_radius() / (r * r);
    let e2 = e * e;
    let value = e2 - f * f * (e2 - v) / e2;
    let slope = -(2.0 * f * df * (e2 - v) - f * f * dv) / e2;
    (value, slope)
}

fn integration_constants(mobile: &Mobile, body: &CentralBody, rest_mass: bool) -> (f64, f64) {
    let c = body.c();
    let r = mobile.r;
    let l = mobile.u_phi * r / c;
    let tangential = (mobile.u_phi / c).powi(2);
    let angular = if rest_mass { 1.0 + tangential } else { tangential };
    let e = ((mobile.u_r / c).powi(2) + body.lapse(r) * angular).sqrt();
    (l, e)
}

/// (L, E) for a massive particle: E² = (U_r/c)² + f·(1 + (U_phi/c)²).
pub fn integration_constants_massive(mobile: &Mobile, body: &CentralBody) -> (f64, f64) {
    integration_constants(mobile, body, true)
}

/// (L, E) for a photon: E² = (U_r/c)² + f·(U_phi/c)².
pub fn integration_constants_photon(mobile: &Mobile, body: &CentralBody) -> (f64, f64) {
    integration_constants(mobile, body, false)
}

pub fn potential_massive(mobile: &Mobile, body: &CentralBody, r: f64) -> f64 {
    astronaut_potential(body, mobile.l, r, true).0
}

pub fn potential_photon(mobile: &Mobile, body: &CentralBody, r: f64) -> f64 {
    astronaut_potential(body, mobile.l, r, false).0
}

pub fn potential_observer_massive(mobile: &Mobile, body: &CentralBody, r: f64) -> f64 {
    observer_potential(body, mobile.l, mobile.e, r, true).0
}

pub fn potential_observer_photon(mobile: &Mobile, body: &CentralBody, r: f64) -> f64 {
    observer_potential(body, mobile.l, mobile.e, r, false).0
}

/// d²r/dτ² = -c²rs/(2r²)·(1 + L²/r²) + c²(1 - rs/r)·L²/r³
pub fn acceleration_massive(mobile: &Mobile, body: &CentralBody, r: f64) -> f64 {
    let c = body.c();
    -0.5 * c * c * astronaut_potential(body, mobile.l, r, true).1
}

/// d²r/dλ² = c²L²/r³ - 3c²rs·L²/(2r⁴)
pub fn acceleration_photon(mobile: &Mobile, body: &CentralBody, r: f64) -> f64 {
    let c = body.c();
    -0.5 * c * c * astronaut_potential(body, mobile.l, r, false).1
}

/// d²r/dt² for a massive particle, in coordinate time.
pub fn acceleration_observer_massive(mobile: &Mobile, body: &CentralBody, r: f64) -> f64 {
    let c = body.c();
    -0.5 * c * c * observer_potential(body, mobile.l, mobile.e, r, true).1
}

/// d²r/dt² for a photon, in coordinate time.
pub fn acceleration_observer_photon(mobile: &Mobile, body: &CentralBody, r: f64) -> f64 {
    let c = body.c();
    -0.5 * c * c * observer_potential(body, mobile.l, mobile.e, r, false).1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PhysicalConstants;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::FRAC_PI_2;

    fn point_mass() -> CentralBody {
        CentralBody::from_schwarzschild_radius(2.0, 0.0, PhysicalConstants::GEOMETRIZED)
    }

    fn slope(v: impl Fn(f64) -> f64, r: f64) -> f64 {
        let h = 1e-5 * r;
        (v(r + h) - v(r - h)) / (2.0 * h)
    }

    #[test]
    fn massive_energy_satisfies_the_normalisation() {
        let body = point_mass();
        let mut mobile = Mobile::massive(12.0, 0.0, 0.4, 0.7);
        mobile.initialize(&body);

        let c = body.c();
        let expected = (mobile.u_r / c).powi(2)
            + body.lapse(mobile.r) * (1.0 + (mobile.u_phi / c).powi(2));
        assert_relative_eq!(mobile.e * mobile.e, expected, max_relative = 1e-14);
    }

    #[test]
    fn photon_energy_drops_the_rest_mass_term() {
        let body = point_mass();
        let mut photon = Mobile::photon(20.0, 0.0, 1.1);
        photon.initialize(&body);
        // Affine normalisation puts every photon at E² = 1 - rs/r initially.
        assert_relative_eq!(photon.e * photon.e, body.lapse(20.0), max_relative = 1e-14);
    }

    #[test]
    fn circular_orbit_has_no_radial_acceleration() {
        let body = point_mass();
        let r = 10.0;
        let mut mobile = Mobile::massive(r, 0.0, body.circular_orbit_speed(r), FRAC_PI_2);
        mobile.initialize(&body);

        assert_abs_diff_eq!(acceleration_massive(&mobile, &body, r), 0.0, epsilon = 1e-14);
        assert_abs_diff_eq!(acceleration_observer_massive(&mobile, &body, r), 0.0, epsilon = 1e-14);
    }

    #[test]
    fn photon_sphere_is_an_equilibrium() {
        let body = point_mass();
        let mut photon = Mobile::photon(3.0, 0.0, FRAC_PI_2);
        photon.initialize(&body);
        assert_abs_diff_eq!(acceleration_photon(&photon, &body, 3.0), 0.0, epsilon = 1e-14);
    }

    #[test]
    fn accelerations_are_potential_gradients() {
        let body = point_mass();
        let mut mobile = Mobile::massive(15.0, 0.0, 0.35, 1.2);
        mobile.initialize(&body);
        let mut photon = Mobile::photon(15.0, 0.0, 1.2);
        photon.initialize(&body);

        for r in [4.0, 7.5, 15.0, 40.0] {
            assert_relative_eq!(
                acceleration_massive(&mobile, &body, r),
                -0.5 * slope(|x| potential_massive(&mobile, &body, x), r),
                epsilon = 1e-9,
                max_relative = 1e-6
            );
            assert_relative_eq!(
                acceleration_observer_massive(&mobile, &body, r),
                -0.5 * slope(|x| potential_observer_massive(&mobile, &body, x), r),
                epsilon = 1e-9,
                max_relative = 1e-6
            );
            assert_relative_eq!(
                acceleration_photon(&photon, &body, r),
                -0.5 * slope(|x| potential_photon(&photon, &body, x), r),
                epsilon = 1e-9,
                max_relative = 1e-6
            );
            assert_relative_eq!(
                acceleration_observer_photon(&photon, &body, r),
                -0.5 * slope(|x| potential_observer_photon(&photon, &body, x), r),
                epsilon = 1e-9,
                max_relative = 1e-6
            );
        }
    }

    #[test]
    fn observer_potential_measures_coordinate_speed() {
        let body = point_mass();
        let mut mobile = Mobile::massive(9.0, 0.0, 0.5, 0.4);
        mobile.initialize(&body);

        let c = body.c();
        let dr_dt = mobile.u_r * body.lapse(9.0) / mobile.e;
        let v_do = potential_observer_massive(&mobile, &body, 9.0);
        assert_relative_eq!((dr_dt / c).powi(2), mobile.e.powi(2) - v_do, max_relative = 1e-12);
    }
}
