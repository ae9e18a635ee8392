//! Formula lookup keyed by (regime, particle kind, frame).
//!
//! The table is a static, so the missing interior / distant-observer entry is
//! a `None` the caller has to handle instead of a fallthrough branch.

use crate::error::{Error, Result};
use crate::metrics::schwarzschild::CentralBody;
use crate::metrics::{exterior, interior, Frame, ParticleKind, Regime};
use crate::mobile::Mobile;

pub type IntegrationConstantsFn = fn(&Mobile, &CentralBody) -> (f64, f64);
/// Potential sampled at an arbitrary radius for the mobile's L and E.
pub type PotentialFn = fn(&Mobile, &CentralBody, f64) -> f64;
/// Right-hand side d²r/dτ² (or d²r/dt²) handed to the integrator.
pub type AccelerationFn = fn(&Mobile, &CentralBody, f64) -> f64;

#[derive(Clone, Copy)]
pub struct FormulaSet {
    pub integration_constants: IntegrationConstantsFn,
    potentials: [Option<PotentialFn>; 2],
    accelerations: [Option<AccelerationFn>; 2],
}

impl FormulaSet {
    pub fn potential(&self, frame: Frame) -> Option<PotentialFn> {
        self.potentials[frame_index(frame)]
    }

    pub fn acceleration(&self, frame: Frame) -> Option<AccelerationFn> {
        self.accelerations[frame_index(frame)]
    }
}

fn frame_index(frame: Frame) -> usize {
    match frame {
        Frame::Astronaut => 0,
        Frame::DistantObserver => 1,
    }
}

static FORMULAS: [FormulaSet; 4] = [
    // External, massive
    FormulaSet {
        integration_constants: exterior::integration_constants_massive,
        potentials: [
            Some(exterior::potential_massive),
            Some(exterior::potential_observer_massive),
        ],
        accelerations: [
            Some(exterior::acceleration_massive),
            Some(exterior::acceleration_observer_massive),
        ],
    },
    // External, photon
    FormulaSet {
        integration_constants: exterior::integration_constants_photon,
        potentials: [
            Some(exterior::potential_photon),
            Some(exterior::potential_observer_photon),
        ],
        accelerations: [
            Some(exterior::acceleration_photon),
            Some(exterior::acceleration_observer_photon),
        ],
    },
    // Internal, massive
    FormulaSet {
        integration_constants: interior::integration_constants_massive,
        potentials: [Some(interior::potential_massive), None],
        accelerations: [Some(interior::acceleration_massive), None],
    },
    // Internal, photon
    FormulaSet {
        integration_constants: interior::integration_constants_photon,
        potentials: [Some(interior::potential_photon), None],
        accelerations: [Some(interior::acceleration_photon), None],
    },
];

pub fn formulas(regime: Regime, kind: ParticleKind) -> &'static FormulaSet {
    let row = match (regime, kind) {
        (Regime::External, ParticleKind::Massive) => 0,
        (Regime::External, ParticleKind::Photon) => 1,
        (Regime::Internal, ParticleKind::Massive) => 2,
        (Regime::Internal, ParticleKind::Photon) => 3,
    };
    &FORMULAS[row]
}

pub fn supports(regime: Regime, kind: ParticleKind, frame: Frame) -> bool {
    formulas(regime, kind).acceleration(frame).is_some()
}

fn unsupported(regime: Regime, kind: ParticleKind, frame: Frame) -> Error {
    Error::UnsupportedCombination {
        regime,
        kind,
        frame,
    }
}

/// Acceleration for the mobile's current regime and kind in `frame`.
pub fn select_acceleration(mobile: &Mobile, body: &CentralBody, frame: Frame) -> Result<AccelerationFn> {
    let regime = mobile.regime(body);
    let kind = mobile.kind();
    formulas(regime, kind)
        .acceleration(frame)
        .ok_or_else(|| unsupported(regime, kind, frame))
}

/// Effective potential at the mobile's current radius. Diagnostic only.
pub fn potential(mobile: &Mobile, body: &CentralBody, frame: Frame) -> Result<f64> {
    let regime = mobile.regime(body);
    let kind = mobile.kind();
    let potential = formulas(regime, kind)
        .potential(frame)
        .ok_or_else(|| unsupported(regime, kind, frame))?;
    Ok(potential(mobile, body, mobile.r))
}
