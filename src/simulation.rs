use std::f64::consts::{FRAC_PI_2, PI};

use bytemuck::Zeroable;
use rayon::prelude::*;

use crate::constants::PhysicalConstants;
use crate::error::Error;
use crate::integrator::MidpointRk2;
use crate::metrics::schwarzschild::CentralBody;
use crate::metrics::Frame;
use crate::mobile::{GpuMobile, Mobile};
use crate::trajectory;

pub const MAX_MOBILES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    CircularOrbit,
    RadialInfall,
    PhotonSphere,
    StarInterior,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::CircularOrbit,
        Preset::RadialInfall,
        Preset::PhotonSphere,
        Preset::StarInterior,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::CircularOrbit => "circular",
            Preset::RadialInfall => "infall",
            Preset::PhotonSphere => "photon-sphere",
            Preset::StarInterior => "star-interior",
        }
    }

    pub fn from_name(name: &str) -> Option<Preset> {
        Preset::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// Launch angle (from the outward radial) that sends an inbound photon
/// from r with impact parameter b = L/E.
fn inbound_photon_angle(body: &CentralBody, r: f64, b: f64) -> f64 {
    PI - (b * body.lapse(r).sqrt() / r).asin()
}

/// Insertion-ordered catalog of mobiles around one central body.
pub struct Simulation {
    pub body: CentralBody,
    pub mobiles: Vec<Mobile>,
    pub frame: Frame,
    pub ticks: u64,
    pub paused: bool,
    /// Step mobiles on the rayon pool. Results are identical either way.
    pub parallel: bool,
    pub preset: Option<Preset>,
    integrator: MidpointRk2,
    /// Why each mobile stopped, if it did; indexed like `mobiles`.
    halted: Vec<Option<Error>>,
}

impl Simulation {
    pub fn new(preset: Preset) -> Self {
        let body = CentralBody::from_schwarzschild_radius(2.0, 0.0, PhysicalConstants::GEOMETRIZED);
        let mut sim = Self::with_body(body, Frame::Astronaut);
        sim.load_preset(preset);
        sim
    }

    pub fn with_body(body: CentralBody, frame: Frame) -> Self {
        Self {
            body,
            mobiles: Vec::new(),
            frame,
            ticks: 0,
            paused: false,
            parallel: false,
            preset: None,
            integrator: MidpointRk2,
            halted: Vec::new(),
        }
    }

    /// Initialise a mobile against the body and append it; returns its index.
    pub fn add_mobile(&mut self, mut mobile: Mobile) -> usize {
        mobile.initialize(&self.body);
        log::debug!(
            "added {} at r = {}, L = {:.6}, E = {:.6}",
            mobile.kind(),
            mobile.r,
            mobile.l,
            mobile.e
        );
        self.mobiles.push(mobile);
        self.halted.resize_with(self.mobiles.len(), || None);
        self.mobiles.len() - 1
    }

    pub fn load_preset(&mut self, preset: Preset) {
        self.preset = Some(preset);
        self.ticks = 0;
        self.mobiles.clear();
        self.halted.clear();
        let constants = self.body.constants();

        match preset {
            Preset::CircularOrbit => {
                self.body = CentralBody::from_schwarzschild_radius(2.0, 0.0, constants);
                for r in [10.0, 20.0] {
                    let speed = self.body.circular_orbit_speed(r);
                    self.add_mobile(Mobile::massive(r, 0.0, speed, FRAC_PI_2));
                }
            }
            Preset::RadialInfall => {
                self.body = CentralBody::from_schwarzschild_radius(2.0, 0.0, constants);
                self.add_mobile(Mobile::massive(10.0, 0.0, 0.0, 0.0));
            }
            Preset::PhotonSphere => {
                self.body = CentralBody::from_schwarzschild_radius(2.0, 0.0, constants);
                let b = self.body.critical_impact_parameter();
                // Just inside, on, and just outside the capture cross-section.
                for factor in [0.98, 1.0, 1.05] {
                    let alpha = inbound_photon_angle(&self.body, 20.0, factor * b);
                    self.add_mobile(Mobile::photon(20.0, 0.0, alpha));
                }
            }
            Preset::StarInterior => {
                self.body = CentralBody::from_schwarzschild_radius(2.0, 10.0, constants);
                self.add_mobile(Mobile::massive(15.0, 0.0, 0.0, 0.0));
                self.add_mobile(Mobile::massive(5.0, 0.0, 0.2, FRAC_PI_2));
            }
        }

        log::info!(
            "loaded preset {} with {} mobile(s), rs = {}",
            preset.name(),
            self.mobiles.len(),
            self.body.schwarzschild_radius()
        );
    }

    /// One tick: every mobile runs the full update pipeline once.
    ///
    /// A mobile whose update fails keeps its last valid state and is skipped
    /// from then on; the others carry on.
    pub fn step(&mut self) {
        if self.paused {
            return;
        }

        let body = self.body;
        let frame = self.frame;
        let integrator = self.integrator;
        self.halted.resize_with(self.mobiles.len(), || None);

        let update = |(index, (mobile, halted)): (usize, (&mut Mobile, &mut Option<Error>))| {
            if halted.is_some() {
                return;
            }
            if let Err(err) = trajectory::tick(mobile, &body, frame, &integrator) {
                log::warn!("mobile {index} halted at r = {:.6}: {err}", mobile.r);
                *halted = Some(err);
            }
        };
        if self.parallel {
            self.mobiles
                .par_iter_mut()
                .zip(self.halted.par_iter_mut())
                .enumerate()
                .for_each(update);
        } else {
            self.mobiles
                .iter_mut()
                .zip(self.halted.iter_mut())
                .enumerate()
                .for_each(update);
        }

        self.ticks += 1;
    }

    /// The error that stopped mobile `index`, if any.
    pub fn halted(&self, index: usize) -> Option<&Error> {
        self.halted.get(index).and_then(Option::as_ref)
    }

    pub fn halted_count(&self) -> usize {
        self.halted.iter().filter(|h| h.is_some()).count()
    }

    pub fn gpu_mobiles(&self) -> [GpuMobile; MAX_MOBILES] {
        if self.mobiles.len() > MAX_MOBILES {
            log::warn!(
                "{} mobiles but the GPU buffer holds {MAX_MOBILES}; the rest are not uploaded",
                self.mobiles.len()
            );
        }
        let mut result = [GpuMobile::zeroed(); MAX_MOBILES];
        for (slot, mobile) in result.iter_mut().zip(&self.mobiles) {
            *slot = mobile.gpu();
        }
        result
    }
}
