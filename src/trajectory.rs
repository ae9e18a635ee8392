//! Per-mobile update pipeline: step size, radial integration with the
//! analytic angle update, velocity recovery, then the two clocks.
//!
//! Ill-posed states (r at or inside the horizon, superluminal starts) are not
//! rejected; they surface as NaN or infinite fields.

use crate::dispatch;
use crate::error::{Error, Result};
use crate::integrator::SecondOrderIntegrator;
use crate::metrics::schwarzschild::CentralBody;
use crate::metrics::{Frame, Regime};
use crate::mobile::Mobile;
use crate::step_size;

/// dr/d(frame parameter) per unit of the stored dr/dτ.
fn radial_rate(mobile: &Mobile, body: &CentralBody, frame: Frame, r: f64) -> f64 {
    match frame {
        Frame::Astronaut => 1.0,
        Frame::DistantObserver => body.lapse(r) / mobile.e,
    }
}

/// Advance the mobile by its current `dtau` in `frame`.
///
/// Fails without touching the mobile when the formula table has no
/// acceleration for its current regime in `frame`.
pub fn advance(
    mobile: &mut Mobile,
    body: &CentralBody,
    frame: Frame,
    integrator: &impl SecondOrderIntegrator,
) -> Result<()> {
    let acceleration = dispatch::select_acceleration(mobile, body, frame)?;
    let dtau = mobile.dtau;
    let t0 = match frame {
        Frame::Astronaut => mobile.clock_astronaut,
        Frame::DistantObserver => mobile.clock_distant_observer,
    };
    let u0 = mobile.u_r * radial_rate(mobile, body, frame, mobile.r);

    let (_, r1, u1) = {
        let state: &Mobile = mobile;
        integrator.integrate_order2(dtau, t0, state.r, u0, &|r| acceleration(state, body, r))
    };

    mobile.r = r1;
    mobile.u_r = u1 / radial_rate(mobile, body, frame, r1);

    let c = body.c();
    let r2 = r1 * r1;
    mobile.phi += match frame {
        Frame::Astronaut => c * mobile.l * dtau / r2,
        Frame::DistantObserver => c * mobile.l * dtau * body.lapse(r1) / (r2 * mobile.e),
    };
    mobile.u_phi = c * mobile.l / r1;
    Ok(())
}

/// Constraint bracket, read as zero when round-off pushes it just below.
/// NaN passes through.
fn non_negative(bracket: f64) -> f64 {
    if bracket < 0.0 {
        0.0
    } else {
        bracket
    }
}

/// Rebuild the locally measured velocity from (r, L, E).
pub fn recover_velocity(mobile: &mut Mobile, body: &CentralBody) {
    let c = body.c();
    let r = mobile.r;
    let (l, e) = (mobile.l, mobile.e);
    let l2_r2 = l * l / (r * r);
    let angular = if mobile.is_photon() { l2_r2 } else { 1.0 + l2_r2 };
    let direction = mobile.u_r.signum();

    match mobile.regime(body) {
        Regime::External => {
            let f = body.lapse(r);
            let dphi = c * l / (r * r);
            let dt = e / f;
            mobile.v_phi = r * (dphi / dt) / f.sqrt();
            let bracket = non_negative(e * e - f * angular);
            mobile.v_r = direction * c * bracket.sqrt() / e;
        }
        Regime::Internal => {
            let alpha = body.alpha(r);
            let beta = body.beta(r);
            mobile.v_phi = c * l * beta / (r * e);
            let bracket = non_negative(alpha * (e * e / (beta * beta) - angular));
            mobile.v_r = direction * c * bracket.sqrt() * beta / (alpha.sqrt() * e);
        }
    }
    mobile.v_norm = (mobile.v_r * mobile.v_r + mobile.v_phi * mobile.v_phi).sqrt();
}

/// Accumulate proper time and distant-observer time over the last step.
pub fn advance_clocks(mobile: &mut Mobile, body: &CentralBody, frame: Frame) -> Result<()> {
    let regime = mobile.regime(body);
    let step = mobile.dtau;
    let r = mobile.r;
    let rs = body.schwarzschild_radius();
    let massive = !mobile.is_photon();

    match (regime, frame) {
        (Regime::External, Frame::Astronaut) => {
            if massive {
                mobile.clock_astronaut += step;
            }
            if r > rs {
                mobile.clock_distant_observer += mobile.e / body.lapse(r) * step;
            } else {
                mobile.clock_distant_observer = f64::INFINITY;
            }
        }
        (Regime::External, Frame::DistantObserver) => {
            mobile.clock_distant_observer += step;
            if massive && r > rs {
                mobile.clock_astronaut += body.lapse(r) / mobile.e * step;
            }
        }
        (Regime::Internal, Frame::Astronaut) => {
            if massive {
                mobile.clock_astronaut += step;
            }
            let beta = body.beta(r);
            mobile.clock_distant_observer += mobile.e / (beta * beta) * step;
        }
        (Regime::Internal, Frame::DistantObserver) => {
            return Err(Error::UnsupportedCombination {
                regime,
                kind: mobile.kind(),
                frame,
            });
        }
    }
    Ok(())
}

/// Run one full update of a single mobile.
///
/// The pipeline runs on a copy that is written back only once every stage
/// succeeds, so a step that ends in a regime `frame` cannot describe (a fall
/// through the surface in the distant-observer frame) leaves the mobile at
/// its last valid state.
pub fn tick(
    mobile: &mut Mobile,
    body: &CentralBody,
    frame: Frame,
    integrator: &impl SecondOrderIntegrator,
) -> Result<()> {
    let mut next = mobile.clone();
    next.dtau = step_size::next_step(&next, body, frame);
    advance(&mut next, body, frame, integrator)?;
    recover_velocity(&mut next, body);
    advance_clocks(&mut next, body, frame)?;

    let regime_before = mobile.regime(body);
    let regime_after = next.regime(body);
    if regime_after != regime_before {
        log::debug!(
            "mobile crossed the body surface at r = {:.6}: {regime_before} -> {regime_after}",
            next.r
        );
    }
    if mobile.clock_distant_observer.is_finite() && next.clock_distant_observer.is_infinite() {
        log::debug!(
            "mobile reached the horizon at r = {:.6} after proper time {:.6}",
            next.r,
            next.clock_astronaut
        );
    }

    *mobile = next;
    Ok(())
}
