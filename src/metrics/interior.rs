//! Geodesic formulas inside a uniform-density body.
//!
//! The exterior lapse 1 - rs/r is replaced by α(r) in the radial part and by
//! β(r)² in the temporal part of the metric, giving
//!
//! (dr/dτ / c)² = α·(E²/β² - w) = E² - V_A, V_A = E²(1 - α/β²) + α·w
//!
//! which joins the exterior potential continuously at the surface. No
//! distant-observer counterpart exists for this regime.

use crate::metrics::schwarzschild::CentralBody;
use crate::mobile::Mobile;

/// α, β and their radial derivatives at r.
fn structure(body: &CentralBody, r: f64) -> (f64, f64, f64, f64) {
    let alpha = body.alpha(r);
    let beta = body.beta(r);
    let d_alpha = -2.0 * body.schwarzschild_radius() * r / body.radius().powi(3);
    let d_beta = -d_alpha / (4.0 * alpha.sqrt());
    (alpha, beta, d_alpha, d_beta)
}

fn astronaut_potential(body: &CentralBody, l: f64, e: f64, r: f64, rest_mass: bool) -> (f64, f64) {
    let (alpha, beta, d_alpha, d_beta) = structure(body, r);
    let l2_r2 = l * l / (r * r);
    let w = if rest_mass { 1.0 + l2_r2 } else { l2_r2 };
    let dw = -2.0 * l2_r2 / r;
    let e2 = e * e;
    let beta2 = beta * beta;

    let value = e2 * (1.0 - alpha / beta2) + alpha * w;
    let slope = e2 * (-d_alpha / beta2 + 2.0 * alpha * d_beta / (beta2 * beta)) + d_alpha * w + alpha * dw;
    (value, slope)
}

fn integration_constants(mobile: &Mobile, body: &CentralBody, rest_mass: bool) -> (f64, f64) {
    let c = body.c();
    let r = mobile.r;
    let l = mobile.u_phi * r / c;
    let tangential = (mobile.u_phi / c).powi(2);
    let angular = if rest_mass { 1.0 + tangential } else { tangential };
    let radial = (mobile.u_r / c).powi(2) / body.alpha(r);
    let e = body.beta(r) * (radial + angular).sqrt();
    (l, e)
}

/// (L, E) for a massive particle: E² = β²·((U_r/c)²/α + 1 + (U_phi/c)²).
pub fn integration_constants_massive(mobile: &Mobile, body: &CentralBody) -> (f64, f64) {
    integration_constants(mobile, body, true)
}

/// (L, E) for a photon: E² = β²·((U_r/c)²/α + (U_phi/c)²).
pub fn integration_constants_photon(mobile: &Mobile, body: &CentralBody) -> (f64, f64) {
    integration_constants(mobile, body, false)
}

pub fn potential_massive(mobile: &Mobile, body: &CentralBody, r: f64) -> f64 {
    astronaut_potential(body, mobile.l, mobile.e, r, true).0
}

pub fn potential_photon(mobile: &Mobile, body: &CentralBody, r: f64) -> f64 {
    astronaut_potential(body, mobile.l, mobile.e, r, false).0
}

pub fn acceleration_massive(mobile: &Mobile, body: &CentralBody, r: f64) -> f64 {
    let c = body.c();
    -0.5 * c * c * astronaut_potential(body, mobile.l, mobile.e, r, true).1
}

pub fn acceleration_photon(mobile: &Mobile, body: &CentralBody, r: f64) -> f64 {
    let c = body.c();
    -0.5 * c * c * astronaut_potential(body, mobile.l, mobile.e, r, false).1
}
