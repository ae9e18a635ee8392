use bytemuck::{Pod, Zeroable};
use glam::DVec2;

use crate::dispatch;
use crate::metrics::schwarzschild::CentralBody;
use crate::metrics::{ParticleKind, Regime};

/// A test particle or photon moving in the equatorial plane of the body.
///
/// `u_r` is always dr/dτ (dr/dλ for photons), whatever frame the caller
/// steps in; `u_phi` is r·dφ/dτ.
#[derive(Debug, Clone, PartialEq)]
pub struct Mobile {
    pub r: f64,
    pub phi: f64,
    pub u_r: f64,
    pub u_phi: f64,
    /// Locally measured radial velocity (static observer).
    pub v_r: f64,
    /// Locally measured tangential velocity (static observer).
    pub v_phi: f64,
    pub v_norm: f64,
    /// Initial velocity direction, measured from the outward radial direction.
    pub v_alpha: f64,
    /// Specific angular momentum (length units).
    pub l: f64,
    /// Specific energy (dimensionless).
    pub e: f64,
    pub dtau: f64,
    pub clock_astronaut: f64,
    pub clock_distant_observer: f64,
    kind: ParticleKind,
}

impl Mobile {
    /// A massive particle with local speed `speed` at angle `v_alpha` from
    /// the radial direction. Call [`Mobile::initialize`] before stepping.
    pub fn massive(r: f64, phi: f64, speed: f64, v_alpha: f64) -> Self {
        Self::with_kind(ParticleKind::Massive, r, phi, speed, v_alpha)
    }

    /// A photon; its speed is set to c on initialisation.
    pub fn photon(r: f64, phi: f64, v_alpha: f64) -> Self {
        Self::with_kind(ParticleKind::Photon, r, phi, f64::NAN, v_alpha)
    }

    fn with_kind(kind: ParticleKind, r: f64, phi: f64, speed: f64, v_alpha: f64) -> Self {
        Self {
            r,
            phi,
            u_r: 0.0,
            u_phi: 0.0,
            v_r: 0.0,
            v_phi: 0.0,
            v_norm: speed,
            v_alpha,
            l: 0.0,
            e: 0.0,
            dtau: 0.0,
            clock_astronaut: 0.0,
            clock_distant_observer: 0.0,
            kind,
        }
    }

    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    pub fn is_photon(&self) -> bool {
        self.kind == ParticleKind::Photon
    }

    pub fn regime(&self, body: &CentralBody) -> Regime {
        body.regime(self.r)
    }

    /// Derive U_r, U_phi and the conserved L, E from the initial local
    /// velocity. Admissibility of the initial state is not checked.
    pub fn initialize(&mut self, body: &CentralBody) {
        let c = body.c();
        let regime = self.regime(body);

        // Proper-velocity magnitude; photons use the affine normalisation |U| = c.
        let proper_speed = match self.kind {
            ParticleKind::Photon => {
                self.v_norm = c;
                c
            }
            ParticleKind::Massive => {
                if !(self.v_norm < c) {
                    log::warn!(
                        "massive mobile at r = {} starts at {} >= c; state will not be finite",
                        self.r,
                        self.v_norm
                    );
                }
                let gamma = 1.0 / (1.0 - (self.v_norm / c).powi(2)).sqrt();
                gamma * self.v_norm
            }
        };

        self.v_r = self.v_norm * self.v_alpha.cos();
        self.v_phi = self.v_norm * self.v_alpha.sin();

        let radial_scale = match regime {
            Regime::External => body.lapse(self.r).sqrt(),
            Regime::Internal => body.alpha(self.r).sqrt(),
        };
        self.u_r = radial_scale * proper_speed * self.v_alpha.cos();
        self.u_phi = proper_speed * self.v_alpha.sin();

        let formulas = dispatch::formulas(regime, self.kind);
        let (l, e) = (formulas.integration_constants)(self, body);
        self.l = l;
        self.e = e;

        self.dtau = 0.0;
        self.clock_astronaut = 0.0;
        self.clock_distant_observer = 0.0;
    }

    /// Cartesian position in the orbital plane.
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.r * self.phi.cos(), self.r * self.phi.sin())
    }

    pub fn gpu(&self) -> GpuMobile {
        let position = self.position();
        GpuMobile {
            position: [position.x as f32, position.y as f32],
            velocity: [self.v_r as f32, self.v_phi as f32],
            clock_astronaut: self.clock_astronaut as f32,
            clock_distant_observer: self.clock_distant_observer as f32,
            is_photon: self.is_photon() as u32,
            _padding: 0.0,
        }
    }
}

/// Per-mobile record uploaded to a renderer each frame.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Pod, Zeroable)]
pub struct GpuMobile {
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub clock_astronaut: f32,
    pub clock_distant_observer: f32,
    pub is_photon: u32,
    pub _padding: f32,
}
