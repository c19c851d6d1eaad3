//! Step observer trait for monitoring the simulation and receiving events.
//!
//! This is the only way the core talks outward: renderers, effect spawners
//! and UI hook in here instead of the engine depending on them.

use crate::body::BodyId;
use crate::constraint::Constraint;
use crate::float::Float;
use crate::vec::Vec2;

/// Trait for observing physics simulation steps.
///
/// All methods have default no-op implementations.
pub trait StepObserver<F: Float> {
    /// Called after velocities have been integrated.
    fn on_integrate(&mut self) {}

    /// Called after each velocity iteration.
    fn on_velocity_iteration(&mut self, _iteration: usize) {}

    /// Called after each position iteration, with the contact solver's
    /// convergence flag.
    fn on_position_iteration(&mut self, _iteration: usize, _solved: bool) {}

    /// A constraint broke under stress at `_at` (midpoint of its bodies).
    fn on_constraint_torn(&mut self, _constraint: &Constraint<F>, _at: Vec2<F>) {}

    /// `_original` was cut into the two `_pieces`.
    fn on_body_sliced(&mut self, _original: BodyId, _pieces: [BodyId; 2]) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl<F: Float> StepObserver<F> for NoOpStepObserver {}
