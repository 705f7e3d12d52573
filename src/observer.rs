//! Hooks into the phases of a cloth step.

/// Receives a callback as each phase of [`Cloth::step_observed`] finishes.
///
/// Useful for profiling individual phases or capturing intermediate state
/// for debug drawing. Every hook defaults to doing nothing.
///
/// [`Cloth::step_observed`]: crate::Cloth::step_observed
pub trait StepObserver {
    /// Forces have been rebuilt for every particle.
    fn on_forces(&mut self) {}

    /// Unpinned particles have been advanced.
    fn on_integrate(&mut self) {}

    /// Constraint pass `iteration` (zero-based) has run over every spring.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// The step is done.
    fn on_step_complete(&mut self) {}
}

/// Observer used by [`Cloth::step`](crate::Cloth::step).
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
