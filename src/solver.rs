//! Iterative length-band constraint solver.

use crate::config::ClothConfig;
use crate::float::Float;
use crate::forces::MIN_DISTANCE;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::spring::Spring;

/// Run `config.iterations` relaxation passes over every spring.
///
/// Each pass clamps spring lengths into
/// `[rest * min_compress, rest * max_stretch]`. Corrections on one spring can
/// disturb its neighbors, so convergence improves with iteration count but is
/// never exact.
pub fn solve<F: Float, O: StepObserver>(
    particles: &mut [Particle<F>],
    springs: &[Spring<F>],
    config: &ClothConfig<F>,
    observer: &mut O,
) {
    for i in 0..config.iterations {
        for s in springs {
            clamp_length(s, particles, config.min_compress, config.max_stretch);
        }
        observer.on_constraint_iteration(i);
    }
}

/// Clamp one spring into its length band.
///
/// Two free endpoints split the correction evenly, so their midpoint stays
/// put. One pinned endpoint leaves the other to absorb all of it. Two pinned
/// endpoints are left violated. Returns whether anything moved.
pub fn clamp_length<F: Float>(
    s: &Spring<F>,
    particles: &mut [Particle<F>],
    min_compress: F,
    max_stretch: F,
) -> bool {
    let a_pinned = particles[s.a].pinned;
    let b_pinned = particles[s.b].pinned;
    if a_pinned && b_pinned {
        return false;
    }

    let delta = particles[s.b].position - particles[s.a].position;
    let dist = delta.length();
    if dist < F::from_f32(MIN_DISTANCE) {
        return false;
    }

    let min_len = s.rest_length * min_compress;
    let max_len = s.rest_length * max_stretch;
    if dist >= min_len && dist <= max_len {
        return false;
    }

    let target = dist.clamp(min_len, max_len);
    let correction = delta.scale((dist - target) / dist);

    if !a_pinned && !b_pinned {
        let half = correction.scale(F::half());
        particles[s.a].displace(half);
        particles[s.b].displace(-half);
    } else if !a_pinned {
        particles[s.a].displace(correction);
    } else {
        particles[s.b].displace(-correction);
    }
    true
}
