use std::f64::consts::PI;

use crate::metrics::schwarzschild::CentralBody;
use crate::metrics::{Frame, ParticleKind, Regime};
use crate::mobile::Mobile;

// Empirically tuned step controls. The epsilons only keep the division
// finite at turning points (U_r ≈ U_phi ≈ 0); keep them bit-for-bit so runs
// stay reproducible.
const MASSIVE_EXTERNAL_EPSILON: f64 = 1e-10;
const MASSIVE_INTERNAL_EPSILON: f64 = 1e-20;
const PHOTON_EPSILON: f64 = 1.0;
/// Target of roughly a thousand steps per r / |U|.
const STEP_SCALE: f64 = 1000.0;
/// Prefactor on r for photons stepped in the astronaut frame.
const PHOTON_ASTRONAUT_PREFACTOR: f64 = 1e-3;
/// The step never exceeds this fraction of the free-fall time.
const FREE_FALL_DIVISOR: f64 = 500.0;

/// Characteristic infall timescale at radius r.
pub fn free_fall_time(r: f64, body: &CentralBody) -> f64 {
    PI * r * (r / (2.0 * body.g() * body.mass())).sqrt().sqrt() / 2.0
}

/// Upper bound on the step length at radius r.
pub fn max_step(r: f64, body: &CentralBody) -> f64 {
    free_fall_time(r, body) / FREE_FALL_DIVISOR
}

/// Length of the next step (dτ, dλ or dt depending on `frame`).
pub fn next_step(mobile: &Mobile, body: &CentralBody, frame: Frame) -> f64 {
    let r = mobile.r;
    let norm = (mobile.u_r * mobile.u_r + mobile.u_phi * mobile.u_phi).sqrt();

    let candidate = match (mobile.kind(), mobile.regime(body), frame) {
        (ParticleKind::Massive, Regime::External, _) => {
            r / (norm + MASSIVE_EXTERNAL_EPSILON) / STEP_SCALE
        }
        (ParticleKind::Massive, Regime::Internal, _) => {
            r / (norm + MASSIVE_INTERNAL_EPSILON) / STEP_SCALE
        }
        (ParticleKind::Photon, Regime::External, Frame::Astronaut) => {
            PHOTON_ASTRONAUT_PREFACTOR * r / (mobile.u_r.abs() + mobile.u_phi.abs() + PHOTON_EPSILON)
        }
        (ParticleKind::Photon, _, _) => r / (norm + PHOTON_EPSILON) / STEP_SCALE,
    };

    let limit = max_step(r, body);
    if candidate > limit {
        limit
    } else {
        candidate
    }
}
