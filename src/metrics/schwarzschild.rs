use crate::constants::PhysicalConstants;
use crate::metrics::Regime;

/// Spherical, non-rotating central mass.
///
/// Outside the surface:
/// ds² = -(1 - rs/r)c²dt² + (1 - rs/r)⁻¹dr² + r²dφ²
///
/// Inside a uniform-density body of radius R:
/// ds² = -β(r)²c²dt² + α(r)⁻¹dr² + r²dφ²
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralBody {
    mass: f64,
    /// Physical radius; 0 is a point mass (always external).
    radius: f64,
    /// rs = 2GM/c²
    rs: f64,
    constants: PhysicalConstants,
}

impl CentralBody {
    pub fn new(mass: f64, radius: f64, constants: PhysicalConstants) -> Self {
        let rs = 2.0 * constants.g * mass / (constants.c * constants.c);
        Self {
            mass,
            radius,
            rs,
            constants,
        }
    }

    pub fn from_schwarzschild_radius(rs: f64, radius: f64, constants: PhysicalConstants) -> Self {
        let mass = rs * constants.c * constants.c / (2.0 * constants.g);
        Self {
            mass,
            radius,
            rs,
            constants,
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn schwarzschild_radius(&self) -> f64 {
        self.rs
    }

    pub fn constants(&self) -> PhysicalConstants {
        self.constants
    }

    pub fn c(&self) -> f64 {
        self.constants.c
    }

    pub fn g(&self) -> f64 {
        self.constants.g
    }

    pub fn regime(&self, r: f64) -> Regime {
        if self.radius == 0.0 || r >= self.radius {
            Regime::External
        } else {
            Regime::Internal
        }
    }

    /// Exterior lapse factor 1 - rs/r.
    pub fn lapse(&self, r: f64) -> f64 {
        1.0 - self.rs / r
    }

    /// Interior radial factor α(r) = 1 - r²rs/R³.
    pub fn alpha(&self, r: f64) -> f64 {
        1.0 - r * r * self.rs / self.radius.powi(3)
    }

    /// Interior lapse β(r) = 3/2·√(1 - rs/R) - 1/2·√α(r).
    pub fn beta(&self, r: f64) -> f64 {
        1.5 * (1.0 - self.rs / self.radius).sqrt() - 0.5 * self.alpha(r).sqrt()
    }

    /// Critical impact parameter for the photon sphere: b_crit = 3√3/2 * rs
    pub fn critical_impact_parameter(&self) -> f64 {
        3.0 * 3.0_f64.sqrt() / 2.0 * self.rs
    }

    /// Photon sphere radius: r = 3/2 * rs
    pub fn photon_sphere_radius(&self) -> f64 {
        1.5 * self.rs
    }

    /// Locally measured speed of a circular geodesic at radius r.
    ///
    /// Only meaningful outside the photon sphere; reaches c at r = 3/2 rs.
    pub fn circular_orbit_speed(&self, r: f64) -> f64 {
        self.c() * (self.rs / (2.0 * (r - self.rs))).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sun_schwarzschild_radius_is_about_three_kilometres() {
        let sun = CentralBody::new(1.989e30, 6.957e8, PhysicalConstants::SI);
        assert_relative_eq!(sun.schwarzschild_radius(), 2953.0, max_relative = 1e-3);
    }

    #[test]
    fn mass_and_radius_constructors_agree() {
        let body = CentralBody::from_schwarzschild_radius(2.0, 0.0, PhysicalConstants::GEOMETRIZED);
        assert_relative_eq!(body.mass(), 1.0);
        let again = CentralBody::new(body.mass(), 0.0, PhysicalConstants::GEOMETRIZED);
        assert_relative_eq!(again.schwarzschild_radius(), 2.0);
    }

    #[test]
    fn point_mass_is_always_external() {
        let body = CentralBody::from_schwarzschild_radius(2.0, 0.0, PhysicalConstants::GEOMETRIZED);
        assert_eq!(body.regime(0.5), Regime::External);
        assert_eq!(body.regime(1e6), Regime::External);
    }

    #[test]
    fn surface_belongs_to_the_exterior() {
        let body = CentralBody::from_schwarzschild_radius(2.0, 10.0, PhysicalConstants::GEOMETRIZED);
        assert_eq!(body.regime(10.0), Regime::External);
        assert_eq!(body.regime(9.999), Regime::Internal);
    }

    #[test]
    fn interior_factors_match_the_exterior_lapse_at_the_surface() {
        let body = CentralBody::from_schwarzschild_radius(2.0, 10.0, PhysicalConstants::GEOMETRIZED);
        assert_relative_eq!(body.alpha(10.0), body.lapse(10.0), epsilon = 1e-12);
        assert_relative_eq!(body.beta(10.0).powi(2), body.lapse(10.0), epsilon = 1e-12);
        assert_relative_eq!(body.alpha(0.0), 1.0);
    }

    #[test]
    fn photon_sphere_and_critical_impact_parameter() {
        let body = CentralBody::from_schwarzschild_radius(2.0, 0.0, PhysicalConstants::GEOMETRIZED);
        assert_relative_eq!(body.photon_sphere_radius(), 3.0);
        assert_relative_eq!(body.critical_impact_parameter(), 3.0 * 3.0_f64.sqrt());
        assert_relative_eq!(body.circular_orbit_speed(3.0), 1.0);
    }
}
