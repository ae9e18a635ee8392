//! Scenario files: a central body, a frame and a list of mobiles.
//!
//! ```yaml
//! units: geometrized        # or "si"; overridden by explicit c / g
//! frame: astronaut          # or distant_observer
//! body:
//!   schwarzschild_radius: 2.0   # or mass
//!   radius: 0.0                 # 0 is a point mass
//! mobiles:
//!   - r: 10.0
//!     speed: 0.35
//!     alpha: 1.5707963
//!   - r: 50.0
//!     alpha: 3.0
//!     photon: true
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::constants::PhysicalConstants;
use crate::dispatch;
use crate::error::{Error, Result};
use crate::metrics::schwarzschild::CentralBody;
use crate::metrics::Frame;
use crate::mobile::Mobile;
use crate::simulation::Simulation;

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Units {
    #[default]
    Geometrized,
    Si,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
    pub mass: Option<f64>,
    pub schwarzschild_radius: Option<f64>,
    #[serde(default)]
    pub radius: f64,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct MobileConfig {
    pub r: f64,
    #[serde(default)]
    pub phi: f64,
    /// Local speed; ignored for photons.
    #[serde(default)]
    pub speed: f64,
    /// Direction from the outward radial, radians.
    #[serde(default)]
    pub alpha: f64,
    #[serde(default)]
    pub photon: bool,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub units: Units,
    pub c: Option<f64>,
    pub g: Option<f64>,
    #[serde(default)]
    pub frame: Frame,
    pub body: BodyConfig,
    #[serde(default)]
    pub mobiles: Vec<MobileConfig>,
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidScenario {
        message: message.into(),
    }
}

impl ScenarioConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("loading scenario {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn constants(&self) -> PhysicalConstants {
        let base = match self.units {
            Units::Geometrized => PhysicalConstants::GEOMETRIZED,
            Units::Si => PhysicalConstants::SI,
        };
        PhysicalConstants {
            c: self.c.unwrap_or(base.c),
            g: self.g.unwrap_or(base.g),
        }
    }

    pub fn central_body(&self) -> Result<CentralBody> {
        let constants = self.constants();
        if !(constants.c > 0.0 && constants.g > 0.0) {
            return Err(invalid("c and g must be positive"));
        }
        if !(self.body.radius >= 0.0) {
            return Err(invalid("body radius must be non-negative"));
        }
        match (self.body.mass, self.body.schwarzschild_radius) {
            (Some(mass), None) => Ok(CentralBody::new(mass, self.body.radius, constants)),
            (None, Some(rs)) => Ok(CentralBody::from_schwarzschild_radius(rs, self.body.radius, constants)),
            (Some(_), Some(_)) => Err(invalid("give either body.mass or body.schwarzschild_radius, not both")),
            (None, None) => Err(invalid("body needs a mass or a schwarzschild_radius")),
        }
    }

    /// Build the simulation; every mobile must start where `frame` is defined.
    pub fn build(&self) -> Result<Simulation> {
        let body = self.central_body()?;
        let mut sim = Simulation::with_body(body, self.frame);

        for (index, config) in self.mobiles.iter().enumerate() {
            let mobile = if config.photon {
                Mobile::photon(config.r, config.phi, config.alpha)
            } else {
                Mobile::massive(config.r, config.phi, config.speed, config.alpha)
            };
            let regime = mobile.regime(&body);
            if !dispatch::supports(regime, mobile.kind(), self.frame) {
                return Err(invalid(format!(
                    "mobile {index} starts in the {regime} regime, which has no {} formulas",
                    self.frame
                )));
            }
            sim.add_mobile(mobile);
        }

        log::info!(
            "scenario has {} mobile(s) around rs = {} in the {} frame",
            sim.mobiles.len(),
            body.schwarzschild_radius(),
            self.frame
        );
        Ok(sim)
    }
}
