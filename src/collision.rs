//! Collision response against a static sphere and between cloth particles.

use crate::error::ClothError;
use crate::float::Float;
use crate::forces::MIN_DISTANCE;
use crate::particle::Particle;
use crate::vec::Vec3;

/// Outward offset added when projecting onto a sphere surface.
pub const SURFACE_EPSILON: f32 = 1e-3;

/// Relative slack on the self-collision clearance. Grid neighbors at rest
/// sit at `spacing` up to rounding and must not register as contacts.
pub const CONTACT_SLACK: f32 = 1e-4;

/// A static, infinite-mass sphere collider.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere<F: Float> {
    pub center: Vec3<F>,
    pub radius: F,
}

impl<F: Float> Sphere<F> {
    /// Rejects a non-finite center or a negative or non-finite radius.
    pub fn new(center: Vec3<F>, radius: F) -> Result<Self, ClothError> {
        if !center.is_finite() {
            return Err(ClothError::InvalidParameter("sphere.center"));
        }
        if !radius.is_finite() || radius < F::zero() {
            return Err(ClothError::InvalidParameter("sphere.radius"));
        }
        Ok(Sphere { center, radius })
    }

    /// Push every unpinned particle inside the sphere onto its surface plus
    /// [`SURFACE_EPSILON`]. Only `position` is moved, so the push feeds into
    /// the next step's Verlet velocity.
    ///
    /// A particle sitting exactly on the center is pushed along +Y.
    /// Returns the number of particles moved.
    pub fn resolve(&self, particles: &mut [Particle<F>]) -> usize {
        let surface = self.radius + F::from_f32(SURFACE_EPSILON);
        let mut moved = 0;
        for p in particles.iter_mut() {
            if p.pinned {
                continue;
            }
            let offset = p.position - self.center;
            let dist = offset.length();
            if dist < self.radius {
                let normal = if dist < F::from_f32(MIN_DISTANCE) {
                    Vec3::unit_y()
                } else {
                    offset.normalize()
                };
                p.position = self.center + normal.scale(surface);
                moved += 1;
            }
        }
        moved
    }
}

/// Separate particles closer than `min_distance`, treating each one as a
/// marble of radius `min_distance / 2`.
///
/// A pair only counts as touching when it is closer than `min_distance`
/// shrunk by [`CONTACT_SLACK`]; touching pairs are pushed out to the full
/// `min_distance`.
///
/// Every unordered pair is tested, so the cost is quadratic in particle
/// count. Two free particles each move half the overlap; if one is pinned the
/// other moves the whole overlap. Both particles of a colliding pair lose
/// their recovered velocity. Returns the number of pairs resolved.
pub fn resolve_self<F: Float>(particles: &mut [Particle<F>], min_distance: F) -> usize {
    let floor = F::from_f32(MIN_DISTANCE);
    let contact = min_distance * (F::one() - F::from_f32(CONTACT_SLACK));
    let mut resolved = 0;

    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            let delta = particles[j].position - particles[i].position;
            let dist = delta.length();
            if !(dist < contact && dist > floor) {
                continue;
            }

            let correction = delta.scale((dist - min_distance) / dist);
            match (particles[i].pinned, particles[j].pinned) {
                (false, false) => {
                    let half = correction.scale(F::half());
                    particles[i].displace(half);
                    particles[j].displace(-half);
                }
                (false, true) => particles[i].displace(correction),
                (true, false) => particles[j].displace(-correction),
                (true, true) => {}
            }
            particles[i].velocity = Vec3::zero();
            particles[j].velocity = Vec3::zero();
            resolved += 1;
        }
    }

    resolved
}
