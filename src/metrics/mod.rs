pub mod exterior;
pub mod interior;
pub mod schwarzschild;

use std::fmt;

use serde::Deserialize;

/// Which form of the metric applies at the mobile's current radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    /// Vacuum solution, r >= body radius (or a point mass).
    External,
    /// Uniform-density interior, r < body radius.
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Massive,
    Photon,
}

/// Clock that parametrises the motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frame {
    /// Proper time of the comoving observer (affine parameter for photons).
    #[default]
    Astronaut,
    /// Coordinate time of an observer at spatial infinity.
    DistantObserver,
}

impl Frame {
    pub const ALL: [Frame; 2] = [Frame::Astronaut, Frame::DistantObserver];

    pub fn name(self) -> &'static str {
        match self {
            Frame::Astronaut => "astronaut",
            Frame::DistantObserver => "distant-observer",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Regime::External => "external",
            Regime::Internal => "internal",
        })
    }
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParticleKind::Massive => "massive particle",
            ParticleKind::Photon => "photon",
        })
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
