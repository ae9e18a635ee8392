//! Test-particle and photon trajectories around a spherical, non-rotating
//! mass, integrated under the exterior and interior Schwarzschild metrics.

pub mod constants;
pub mod dispatch;
pub mod error;
pub mod integrator;
pub mod metrics;
pub mod mobile;
pub mod scenario;
pub mod simulation;
pub mod step_size;
pub mod trajectory;

pub use constants::PhysicalConstants;
pub use error::{Error, Result};
pub use integrator::{MidpointRk2, SecondOrderIntegrator};
pub use metrics::schwarzschild::CentralBody;
pub use metrics::{Frame, ParticleKind, Regime};
pub use mobile::{GpuMobile, Mobile};
pub use simulation::{Preset, Simulation};
