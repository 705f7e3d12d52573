//! Cloth particles: point masses with position history.

use crate::error::ClothError;
use crate::float::Float;
use crate::vec::Vec3;

/// A point mass in the cloth grid.
///
/// Motion is carried by `position` and `prev_position`; `velocity` is only a
/// cache recovered by the integrator and read by the next step's damping
/// terms.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle<F: Float> {
    pub position: Vec3<F>,
    pub prev_position: Vec3<F>,
    pub velocity: Vec3<F>,
    pub force: Vec3<F>,
    mass: F,
    pub pinned: bool,
}

impl<F: Float> Particle<F> {
    /// Create a particle at rest. Rejects non-positive or non-finite mass.
    pub fn new(position: Vec3<F>, mass: F) -> Result<Self, ClothError> {
        if !(mass > F::zero()) || !mass.is_finite() {
            return Err(ClothError::InvalidMass);
        }
        Ok(Particle {
            position,
            prev_position: position,
            velocity: Vec3::zero(),
            force: Vec3::zero(),
            mass,
            pinned: false,
        })
    }

    pub fn mass(&self) -> F {
        self.mass
    }

    /// Add to the force accumulator. Pinned particles ignore forces.
    pub fn add_force(&mut self, force: Vec3<F>) {
        if !self.pinned {
            self.force = self.force + force;
        }
    }

    /// Move by `delta` unless pinned.
    pub fn displace(&mut self, delta: Vec3<F>) {
        if !self.pinned {
            self.position = self.position + delta;
        }
    }

    pub fn pin(&mut self) {
        self.pinned = true;
    }

    pub fn unpin(&mut self) {
        self.pinned = false;
    }
}
