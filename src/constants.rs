/// Physical constants handed to the central body.
///
/// Nothing in the crate reads a global `c` or `G`; every formula gets them
/// through [`crate::CentralBody`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    /// Speed of light
    pub c: f64,
    /// Gravitational constant
    pub g: f64,
}

impl PhysicalConstants {
    /// SI units (m, kg, s).
    pub const SI: Self = Self {
        c: 299_792_458.0,
        g: 6.674_30e-11,
    };

    /// Geometrized units, c = G = 1. A unit mass has R_s = 2.
    pub const GEOMETRIZED: Self = Self { c: 1.0, g: 1.0 };
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::SI
    }
}
