//! Position Verlet integration with recovered velocity.

use crate::float::Float;
use crate::particle::Particle;

/// Advance every unpinned particle by one step of `dt`.
///
/// `x' = 2x - x_prev + (F/m) dt²`. The central-difference velocity
/// `(x' - x_prev) / 2dt` is cached for the next step's damping terms.
pub fn integrate<F: Float>(particles: &mut [Particle<F>], dt: F) {
    let dt_sq = dt * dt;
    let inv_two_dt = F::one() / (F::two() * dt);

    for p in particles.iter_mut() {
        if p.pinned {
            continue;
        }
        let accel = p.force.scale(F::one() / p.mass());
        let new_pos = p.position.scale(F::two()) - p.prev_position + accel.scale(dt_sq);

        p.velocity = (new_pos - p.prev_position).scale(inv_two_dt);
        p.prev_position = p.position;
        p.position = new_pos;
    }
}
