//! Pairwise springs between particles.

use crate::float::Float;
use crate::particle::Particle;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which deformation mode a spring resists.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpringKind {
    /// Immediate neighbors, right and below. Resists stretch.
    Structural,
    /// Diagonal neighbors. Resists shear.
    Shear,
    /// Neighbors two cells away. Resists bending.
    Bending,
}

/// A Hookean spring with axial damping between particles `a` and `b`.
///
/// `rest_length` is measured once from the initial configuration and never
/// changes afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
    pub stiffness: F,
    pub damping: F,
    pub kind: SpringKind,
}

impl<F: Float> Spring<F> {
    /// Create a spring whose rest length is the current distance between the
    /// two particles.
    pub fn between(
        a: usize,
        b: usize,
        particles: &[Particle<F>],
        stiffness: F,
        damping: F,
        kind: SpringKind,
    ) -> Self {
        debug_assert!(a != b, "spring endpoints must differ");
        let rest_length = particles[a].position.distance(particles[b].position);
        Spring { a, b, rest_length, stiffness, damping, kind }
    }

    /// Current length of the spring.
    pub fn length(&self, particles: &[Particle<F>]) -> F {
        particles[self.a].position.distance(particles[self.b].position)
    }
}
