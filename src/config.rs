//! Tunable simulation parameters.

use crate::error::ClothError;
use crate::float::Float;
use crate::spring::SpringKind;
use crate::vec::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Global oscillating wind.
///
/// The force on each unpinned particle is
/// `direction * strength * sin(2 * elapsed) * mass`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Wind<F: Float> {
    pub enabled: bool,
    pub strength: F,
    pub direction: Vec3<F>,
}

impl<F: Float> Default for Wind<F> {
    fn default() -> Self {
        Wind {
            enabled: false,
            strength: F::from_f32(5.0),
            direction: Vec3::new(F::zero(), F::zero(), F::one()),
        }
    }
}

/// Configuration for the cloth simulation.
///
/// All fields may be changed between steps through
/// [`Cloth::set_config`](crate::Cloth::set_config). `particle_mass` only takes
/// effect on the next construction or reset.
///
/// # Builder Pattern
/// ```
/// use drape::{ClothConfig, Vec3};
///
/// let config: ClothConfig<f32> = ClothConfig::new()
///     .with_iterations(8)
///     .with_gravity(Vec3::new(0.0, -9.81, 0.0))
///     .with_stiffness(800.0)
///     .with_stretch_band(0.95, 1.05);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClothConfig<F: Float> {
    /// Gravity acceleration vector. Default: (0, -9.8, 0).
    pub gravity: Vec3<F>,
    /// Linear air drag coefficient. Default: 0.01.
    pub drag: F,
    /// Stiffness of structural and shear springs. Default: 500.
    pub stiffness: F,
    /// Stiffness of bending springs. Default: 50.
    pub bend_stiffness: F,
    /// Axial damping coefficient shared by every spring. Default: 0.1.
    pub spring_damping: F,
    /// Upper bound of the length band, as a factor of rest length. Default: 1.10.
    pub max_stretch: F,
    /// Lower bound of the length band, as a factor of rest length. Default: 0.90.
    pub min_compress: F,
    /// Constraint solver passes per step. Default: 15.
    pub iterations: usize,
    /// Mass given to every particle at build time. Default: 1.
    pub particle_mass: F,
    pub wind: Wind<F>,
}

impl<F: Float> ClothConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        ClothConfig {
            gravity: Vec3::new(F::zero(), F::from_f32(-9.8), F::zero()),
            drag: F::from_f32(0.01),
            stiffness: F::from_f32(500.0),
            bend_stiffness: F::from_f32(50.0),
            spring_damping: F::from_f32(0.1),
            max_stretch: F::from_f32(1.10),
            min_compress: F::from_f32(0.90),
            iterations: 15,
            particle_mass: F::one(),
            wind: Wind::default(),
        }
    }

    pub fn with_gravity(mut self, gravity: Vec3<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_drag(mut self, drag: F) -> Self {
        self.drag = drag;
        self
    }

    /// Set the structural and shear stiffness.
    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_bend_stiffness(mut self, bend_stiffness: F) -> Self {
        self.bend_stiffness = bend_stiffness;
        self
    }

    pub fn with_spring_damping(mut self, damping: F) -> Self {
        self.spring_damping = damping;
        self
    }

    /// Set the allowed length band `[min_compress, max_stretch]` relative to
    /// rest length.
    pub fn with_stretch_band(mut self, min_compress: F, max_stretch: F) -> Self {
        self.min_compress = min_compress;
        self.max_stretch = max_stretch;
        self
    }

    /// Set the number of constraint iterations. Zero disables the solver.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_particle_mass(mut self, mass: F) -> Self {
        self.particle_mass = mass;
        self
    }

    /// Enable wind with the given direction and strength.
    pub fn with_wind(mut self, direction: Vec3<F>, strength: F) -> Self {
        self.wind = Wind { enabled: true, strength, direction };
        self
    }

    /// Stiffness and damping a spring of `kind` should carry under this config.
    pub fn spring_params(&self, kind: SpringKind) -> (F, F) {
        let stiffness = match kind {
            SpringKind::Structural | SpringKind::Shear => self.stiffness,
            SpringKind::Bending => self.bend_stiffness,
        };
        (stiffness, self.spring_damping)
    }

    /// Reject values that would push NaN or infinity through the particle store.
    pub fn validate(&self) -> Result<(), ClothError> {
        if !self.gravity.is_finite() {
            return Err(ClothError::InvalidParameter("gravity"));
        }
        non_negative(self.drag, "drag")?;
        non_negative(self.stiffness, "stiffness")?;
        non_negative(self.bend_stiffness, "bend_stiffness")?;
        non_negative(self.spring_damping, "spring_damping")?;
        non_negative(self.wind.strength, "wind.strength")?;
        if !self.wind.direction.is_finite() {
            return Err(ClothError::InvalidParameter("wind.direction"));
        }
        if !(self.particle_mass > F::zero()) || !self.particle_mass.is_finite() {
            return Err(ClothError::InvalidMass);
        }
        if !self.max_stretch.is_finite()
            || !self.min_compress.is_finite()
            || !(self.min_compress > F::zero())
            || self.min_compress > self.max_stretch
        {
            return Err(ClothError::InvalidStretchBand);
        }
        Ok(())
    }
}

fn non_negative<F: Float>(value: F, name: &'static str) -> Result<(), ClothError> {
    if value.is_finite() && value >= F::zero() {
        Ok(())
    } else {
        Err(ClothError::InvalidParameter(name))
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ClothConfig::<f32>::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.iterations, 15);
        assert!(!config.wind.enabled);
    }

    #[test]
    fn inverted_band_is_rejected() {
        let config = ClothConfig::<f32>::new().with_stretch_band(1.2, 1.1);
        assert_eq!(config.validate(), Err(ClothError::InvalidStretchBand));
        let config = ClothConfig::<f32>::new().with_stretch_band(0.0, 1.1);
        assert_eq!(config.validate(), Err(ClothError::InvalidStretchBand));
    }

    #[test]
    fn negative_drag_is_rejected() {
        let config = ClothConfig::<f64>::new().with_drag(-0.5);
        assert_eq!(config.validate(), Err(ClothError::InvalidParameter("drag")));
    }

    #[test]
    fn zero_mass_is_rejected() {
        let config = ClothConfig::<f32>::new().with_particle_mass(0.0);
        assert_eq!(config.validate(), Err(ClothError::InvalidMass));
    }

    #[test]
    fn bending_springs_use_bend_stiffness() {
        let config = ClothConfig::<f32>::new().with_stiffness(300.0).with_bend_stiffness(30.0);
        assert_eq!(config.spring_params(SpringKind::Shear).0, 300.0);
        assert_eq!(config.spring_params(SpringKind::Bending).0, 30.0);
    }
}
