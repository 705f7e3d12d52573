//! The cloth simulation: grid topology, configuration, and the step pipeline.

use crate::collision::{self, Sphere};
use crate::config::ClothConfig;
use crate::error::ClothError;
use crate::float::Float;
use crate::forces;
use crate::grid::GridLayout;
use crate::integrator;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::particle::Particle;
use crate::solver;
use crate::spring::{Spring, SpringKind};
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;
use log::{debug, trace, warn};

/// A mass-spring cloth hanging from its top corners.
///
/// Particles are stored row-major, index `row * cols + col`. Each
/// [`step`](Self::step) runs force accumulation, Verlet integration, and
/// constraint relaxation in that order. Collisions are separate passes the
/// host schedules itself.
///
/// ```
/// use drape::{Cloth, Vec3};
///
/// let mut cloth: Cloth<f32> = Cloth::new(10, 10, 0.1).unwrap();
/// for _ in 0..60 {
///     cloth.step(1.0 / 60.0).unwrap();
///     cloth.resolve_sphere_collision(Vec3::new(0.0, 0.2, 0.3), 0.25).unwrap();
/// }
/// assert_eq!(cloth.positions().len(), 100);
/// ```
#[derive(Clone, Debug)]
pub struct Cloth<F: Float> {
    layout: GridLayout<F>,
    particles: AllocVec<Particle<F>>,
    springs: AllocVec<Spring<F>>,
    config: ClothConfig<F>,
    elapsed: F,
}

impl<F: Float> Cloth<F> {
    /// Build a cloth with the default configuration.
    pub fn new(rows: usize, cols: usize, spacing: F) -> Result<Self, ClothError> {
        Self::with_config(rows, cols, spacing, ClothConfig::new())
    }

    /// Build a cloth with an explicit configuration.
    pub fn with_config(
        rows: usize,
        cols: usize,
        spacing: F,
        config: ClothConfig<F>,
    ) -> Result<Self, ClothError> {
        let layout = GridLayout::new(rows, cols, spacing)?;
        config.validate()?;
        let mut cloth = Cloth {
            layout,
            particles: AllocVec::new(),
            springs: AllocVec::new(),
            config,
            elapsed: F::zero(),
        };
        cloth.rebuild()?;
        Ok(cloth)
    }

    /// Discard all particles and springs and rebuild them from the same
    /// dimensions with the default pins. Configuration and the wind clock are
    /// kept.
    pub fn reset(&mut self) -> Result<(), ClothError> {
        self.rebuild()
    }

    fn rebuild(&mut self) -> Result<(), ClothError> {
        self.particles = self.layout.build_particles(self.config.particle_mass)?;
        self.springs = self.layout.build_springs(&self.particles, &self.config);
        debug!(
            "built {}x{} cloth: {} particles, {} springs",
            self.layout.rows,
            self.layout.cols,
            self.particles.len(),
            self.springs.len()
        );
        Ok(())
    }

    /// Advance the simulation by `dt`.
    pub fn step(&mut self, dt: F) -> Result<(), ClothError> {
        self.step_observed(dt, &mut NoOpStepObserver)
    }

    /// Advance the simulation by `dt`, reporting each phase to `observer`.
    ///
    /// Non-positive or non-finite `dt` is rejected before anything is
    /// touched.
    pub fn step_observed<O: StepObserver>(&mut self, dt: F, observer: &mut O) -> Result<(), ClothError> {
        if !(dt > F::zero()) || !dt.is_finite() {
            warn!("rejected step with dt = {:?}", dt);
            return Err(ClothError::InvalidTimeStep);
        }

        forces::accumulate(&mut self.particles, &self.springs, &self.config, self.elapsed);
        observer.on_forces();

        integrator::integrate(&mut self.particles, dt);
        observer.on_integrate();

        solver::solve(&mut self.particles, &self.springs, &self.config, observer);

        if self.config.wind.enabled {
            self.elapsed = self.elapsed + dt;
        }
        observer.on_step_complete();
        Ok(())
    }

    /// Project particles out of a static sphere and return how many moved.
    ///
    /// Pinned particles are never moved, so containment holds for unpinned
    /// particles only. A non-finite center or a negative or non-finite
    /// radius is rejected before any particle is touched.
    pub fn resolve_sphere_collision(&mut self, center: Vec3<F>, radius: F) -> Result<usize, ClothError> {
        let moved = Sphere::new(center, radius)?.resolve(&mut self.particles);
        trace!("sphere collision moved {} particles", moved);
        Ok(moved)
    }

    /// Separate particles closer than one grid spacing. Quadratic in the
    /// particle count.
    pub fn resolve_self_collisions(&mut self) -> usize {
        let resolved = collision::resolve_self(&mut self.particles, self.layout.spacing);
        trace!("self collision resolved {} pairs", resolved);
        resolved
    }

    pub fn pin(&mut self, row: usize, col: usize) -> Result<(), ClothError> {
        let idx = self.layout.checked_index(row, col)?;
        self.particles[idx].pin();
        trace!("pinned ({}, {})", row, col);
        Ok(())
    }

    pub fn unpin(&mut self, row: usize, col: usize) -> Result<(), ClothError> {
        let idx = self.layout.checked_index(row, col)?;
        self.particles[idx].unpin();
        trace!("unpinned ({}, {})", row, col);
        Ok(())
    }

    pub fn unpin_all(&mut self) {
        for p in self.particles.iter_mut() {
            p.unpin();
        }
        trace!("unpinned all particles");
    }

    pub fn is_pinned(&self, row: usize, col: usize) -> Result<bool, ClothError> {
        let idx = self.layout.checked_index(row, col)?;
        Ok(self.particles[idx].pinned)
    }

    /// Replace the configuration.
    ///
    /// Existing springs pick up the new stiffness and damping for their kind;
    /// rest lengths are untouched. A new `particle_mass` applies from the
    /// next [`reset`](Self::reset).
    pub fn set_config(&mut self, config: ClothConfig<F>) -> Result<(), ClothError> {
        config.validate()?;
        for s in self.springs.iter_mut() {
            let (stiffness, damping) = config.spring_params(s.kind);
            s.stiffness = stiffness;
            s.damping = damping;
        }
        self.config = config;
        trace!("configuration updated");
        Ok(())
    }

    pub fn config(&self) -> &ClothConfig<F> {
        &self.config
    }

    /// Wind clock, advanced by `dt` on every step while wind is enabled.
    pub fn elapsed(&self) -> F {
        self.elapsed
    }

    pub fn set_elapsed(&mut self, elapsed: F) -> Result<(), ClothError> {
        if !elapsed.is_finite() {
            return Err(ClothError::InvalidParameter("elapsed"));
        }
        self.elapsed = elapsed;
        Ok(())
    }

    /// Sanity check: the first particle that is non-finite or farther than
    /// `limit` from the origin.
    pub fn check_bounds(&self, limit: F) -> Result<(), ClothError> {
        let limit_sq = limit * limit;
        match self
            .particles
            .iter()
            .position(|p| !p.position.is_finite() || p.position.length_sq() > limit_sq)
        {
            Some(index) => Err(ClothError::Diverged { index }),
            None => Ok(()),
        }
    }

    pub fn particles(&self) -> &[Particle<F>] {
        &self.particles
    }

    pub fn springs(&self) -> &[Spring<F>] {
        &self.springs
    }

    pub fn springs_of_kind(&self, kind: SpringKind) -> impl Iterator<Item = &Spring<F>> + '_ {
        self.springs.iter().filter(move |s| s.kind == kind)
    }

    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// Positions of the pinned particles only, in index order.
    pub fn pinned_positions(&self) -> AllocVec<Vec3<F>> {
        self.particles.iter().filter(|p| p.pinned).map(|p| p.position).collect()
    }

    pub fn position_at(&self, row: usize, col: usize) -> Result<Vec3<F>, ClothError> {
        let idx = self.layout.checked_index(row, col)?;
        Ok(self.particles[idx].position)
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        self.layout.index(row, col)
    }

    pub fn rows(&self) -> usize { self.layout.rows }
    pub fn cols(&self) -> usize { self.layout.cols }
    pub fn spacing(&self) -> F { self.layout.spacing }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn spring_count(&self) -> usize { self.springs.len() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_construction() {
        assert_eq!(
            Cloth::<f32>::new(0, 4, 1.0).unwrap_err(),
            ClothError::InvalidDimensions { rows: 0, cols: 4 }
        );
        assert_eq!(Cloth::<f32>::new(4, 4, 0.0).unwrap_err(), ClothError::InvalidSpacing);
        let heavy = ClothConfig::new().with_particle_mass(-1.0);
        assert_eq!(Cloth::<f32>::with_config(4, 4, 1.0, heavy).unwrap_err(), ClothError::InvalidMass);
    }

    #[test]
    fn rejects_bad_time_step_without_mutation() {
        let mut cloth = Cloth::<f32>::new(3, 3, 1.0).unwrap();
        let before = cloth.particles().to_vec();
        assert_eq!(cloth.step(0.0), Err(ClothError::InvalidTimeStep));
        assert_eq!(cloth.step(-0.01), Err(ClothError::InvalidTimeStep));
        assert_eq!(cloth.step(f32::NAN), Err(ClothError::InvalidTimeStep));
        assert_eq!(cloth.particles(), &before[..]);
    }

    #[test]
    fn pin_is_bounds_checked() {
        let mut cloth = Cloth::<f32>::new(3, 4, 1.0).unwrap();
        assert_eq!(
            cloth.pin(3, 0),
            Err(ClothError::OutOfBounds { row: 3, col: 0, rows: 3, cols: 4 })
        );
        assert!(cloth.pin(2, 3).is_ok());
        assert_eq!(cloth.is_pinned(2, 3), Ok(true));
        cloth.unpin_all();
        assert!(cloth.pinned_positions().is_empty());
    }

    #[test]
    fn set_config_retunes_springs_but_keeps_rest_lengths() {
        let mut cloth = Cloth::<f32>::new(4, 4, 1.0).unwrap();
        let rest: AllocVec<f32> = cloth.springs().iter().map(|s| s.rest_length).collect();
        let config = ClothConfig::new().with_stiffness(42.0).with_bend_stiffness(7.0);
        cloth.set_config(config).unwrap();
        assert!(cloth.springs_of_kind(SpringKind::Structural).all(|s| s.stiffness == 42.0));
        assert!(cloth.springs_of_kind(SpringKind::Bending).all(|s| s.stiffness == 7.0));
        let after: AllocVec<f32> = cloth.springs().iter().map(|s| s.rest_length).collect();
        assert_eq!(rest, after);
    }

    #[test]
    fn invalid_config_is_not_applied() {
        let mut cloth = Cloth::<f32>::new(2, 2, 1.0).unwrap();
        let bad = ClothConfig::new().with_stiffness(f32::INFINITY);
        assert!(cloth.set_config(bad).is_err());
        assert_eq!(cloth.config(), &ClothConfig::new());
    }

    #[test]
    fn wind_clock_only_runs_with_wind() {
        let mut cloth = Cloth::<f64>::new(3, 3, 1.0).unwrap();
        cloth.step(0.01).unwrap();
        assert_eq!(cloth.elapsed(), 0.0);

        let windy = ClothConfig::new().with_wind(Vec3::new(0.0, 0.0, 1.0), 2.0);
        cloth.set_config(windy).unwrap();
        cloth.step(0.01).unwrap();
        cloth.step(0.01).unwrap();
        assert!((cloth.elapsed() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn non_finite_wind_clock_is_rejected() {
        let windy = ClothConfig::new().with_wind(Vec3::new(0.0, 0.0, 1.0), 2.0);
        let mut cloth = Cloth::<f32>::with_config(5, 5, 0.2, windy).unwrap();
        assert_eq!(cloth.set_elapsed(f32::NAN), Err(ClothError::InvalidParameter("elapsed")));
        assert_eq!(cloth.set_elapsed(f32::INFINITY), Err(ClothError::InvalidParameter("elapsed")));
        assert_eq!(cloth.elapsed(), 0.0);

        cloth.step(1.0 / 60.0).unwrap();
        assert!(cloth.position_at(3, 3).unwrap().is_finite());
        assert!(cloth.set_elapsed(1.5).is_ok());
        assert_eq!(cloth.elapsed(), 1.5);
    }

    #[test]
    fn bad_sphere_leaves_particles_untouched() {
        let mut cloth = Cloth::<f32>::new(4, 4, 0.5).unwrap();
        let before = cloth.positions();
        assert_eq!(
            cloth.resolve_sphere_collision(Vec3::zero(), f32::INFINITY),
            Err(ClothError::InvalidParameter("sphere.radius"))
        );
        assert_eq!(
            cloth.resolve_sphere_collision(Vec3::zero(), -0.5),
            Err(ClothError::InvalidParameter("sphere.radius"))
        );
        assert_eq!(
            cloth.resolve_sphere_collision(Vec3::new(0.0, f32::INFINITY, 0.0), 1.0),
            Err(ClothError::InvalidParameter("sphere.center"))
        );
        assert_eq!(cloth.positions(), before);
        assert!(cloth.check_bounds(100.0).is_ok());
    }

    #[test]
    fn untouched_grid_has_no_self_contacts() {
        let mut cloth = Cloth::<f32>::new(10, 10, 0.1).unwrap();
        assert_eq!(cloth.resolve_self_collisions(), 0);
    }

    #[test]
    fn check_bounds_flags_runaway_particle() {
        let cloth = Cloth::<f32>::new(3, 3, 1.0).unwrap();
        assert!(cloth.check_bounds(100.0).is_ok());
        // Top row sits at y = 2, corners at x = ±1.
        assert_eq!(cloth.check_bounds(1.0), Err(ClothError::Diverged { index: 0 }));
    }
}
