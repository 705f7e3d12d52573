//! Per-step force accumulation: gravity, drag, wind, and spring forces.

use crate::config::ClothConfig;
use crate::float::Float;
use crate::particle::Particle;
use crate::spring::Spring;
use crate::vec::Vec3;

/// Distances below this are treated as degenerate and skipped.
pub const MIN_DISTANCE: f32 = 1e-6;

/// Rebuild every particle's force accumulator for this step.
///
/// `elapsed` drives the wind oscillator. Writes are additive into
/// per-particle accumulators, so the ordering below only fixes the floating
/// point summation order.
pub fn accumulate<F: Float>(
    particles: &mut [Particle<F>],
    springs: &[Spring<F>],
    config: &ClothConfig<F>,
    elapsed: F,
) {
    for p in particles.iter_mut() {
        p.force = Vec3::zero();
    }

    let wind = if config.wind.enabled {
        let gust = config.wind.strength * (F::two() * elapsed).sin();
        Some(config.wind.direction.scale(gust))
    } else {
        None
    };

    for p in particles.iter_mut() {
        if p.pinned {
            continue;
        }
        let mut force = config.gravity.scale(p.mass()) - p.velocity.scale(config.drag);
        if let Some(wind) = wind {
            force = force + wind.scale(p.mass());
        }
        p.add_force(force);
    }

    for s in springs {
        if let Some(force) = spring_force(s, particles) {
            particles[s.a].add_force(force);
            particles[s.b].add_force(-force);
        }
    }
}

/// Force a spring exerts on its `a` endpoint (the `b` endpoint receives the
/// negation). `None` if the endpoints are closer than [`MIN_DISTANCE`].
///
/// Damping acts along the spring axis only and uses the velocities the
/// integrator recovered on the previous step.
pub fn spring_force<F: Float>(s: &Spring<F>, particles: &[Particle<F>]) -> Option<Vec3<F>> {
    let pa = &particles[s.a];
    let pb = &particles[s.b];

    let delta = pb.position - pa.position;
    let dist = delta.length();
    if dist < F::from_f32(MIN_DISTANCE) {
        return None;
    }

    let dir = delta.scale(F::one() / dist);
    let stretch = dist - s.rest_length;
    let hooke = dir.scale(s.stiffness * stretch);

    let rel_vel = pb.velocity - pa.velocity;
    let damping = dir.scale(s.damping * rel_vel.dot(dir));

    Some(hooke + damping)
}
