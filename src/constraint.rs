//! Pairwise constraints between bodies: distance (impulse based, tearable)
//! and spring (force based).

use crate::body::{Body, BodyId};
use crate::float::Float;
use crate::vec::{Vec, Vec2};

/// Identifier assigned by [`World::add_constraint`](crate::World::add_constraint).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstraintId(pub u32);

/// Length error is reported as stress scaled by this factor.
pub const STRESS_PER_UNIT_ERROR: f32 = 1000.0;

/// Length error below which the position pass leaves a distance constraint
/// alone.
pub const DISTANCE_TOLERANCE: f32 = 0.05;

/// Keeps two body centres `rest_length` apart. Can push and pull.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceConstraint<F: Float> {
    pub rest_length: F,
    /// In [0, 1]; scales both the velocity bias and the position correction.
    pub stiffness: F,
    /// Accumulated impulse, re-applied at the start of every step.
    pub impulse: F,
    normal: Vec2<F>,
    effective_mass: F,
    bias: F,
}

impl<F: Float> DistanceConstraint<F> {
    pub fn new(rest_length: F, stiffness: F) -> Self {
        DistanceConstraint {
            rest_length,
            stiffness,
            impulse: F::zero(),
            normal: Vec2::zero(),
            effective_mass: F::zero(),
            bias: F::zero(),
        }
    }

    /// Prepare for the velocity iterations and re-apply the accumulated
    /// impulse. Returns the stress (`|length error| * 1000`).
    pub fn pre_step(&mut self, a: &mut Body<F>, b: &mut Body<F>, dt: F, baumgarte: F) -> F {
        let delta = b.position() - a.position();
        let length = delta.length();
        self.normal = delta.normalize();

        let inv_mass_sum = a.mass_data().inv_mass + b.mass_data().inv_mass;
        self.effective_mass = if inv_mass_sum > F::zero() { F::one() / inv_mass_sum } else { F::zero() };

        let error = length - self.rest_length;
        self.bias = if dt > F::zero() { self.stiffness * baumgarte * error / dt } else { F::zero() };

        let p = self.normal.scale(self.impulse);
        a.apply_impulse_at_offset(-p, Vec2::zero());
        b.apply_impulse_at_offset(p, Vec2::zero());

        error.abs() * F::from_f32(STRESS_PER_UNIT_ERROR)
    }

    pub fn solve_velocity(&mut self, a: &mut Body<F>, b: &mut Body<F>) {
        let cdot = self.normal.dot(b.velocity - a.velocity);
        let lambda = -self.effective_mass * (cdot + self.bias);
        self.impulse = self.impulse + lambda;

        let p = self.normal.scale(lambda);
        a.apply_impulse_at_offset(-p, Vec2::zero());
        b.apply_impulse_at_offset(p, Vec2::zero());
    }

    /// Move the bodies towards the rest length. Returns true if the length
    /// was already within tolerance.
    pub fn solve_position(&self, a: &mut Body<F>, b: &mut Body<F>) -> bool {
        let delta = b.position() - a.position();
        let dist = delta.length();
        let error = dist - self.rest_length;
        let satisfied = error.abs() <= F::from_f32(DISTANCE_TOLERANCE);

        let a_inv = a.mass_data().inv_mass;
        let b_inv = b.mass_data().inv_mass;
        let w_total = a_inv + b_inv;
        if satisfied || w_total.is_near_zero(F::from_f32(1e-10)) || dist.is_near_zero(F::from_f32(1e-10)) {
            return satisfied;
        }

        let correction = delta.scale(error * F::half() * self.stiffness / dist);
        a.displace(correction.scale(a_inv / w_total), F::zero());
        b.displace(-correction.scale(b_inv / w_total), F::zero());
        false
    }
}

/// Damped Hooke spring acting through the force accumulators.
#[derive(Clone, Debug, PartialEq)]
pub struct SpringConstraint<F: Float> {
    pub rest_length: F,
    pub k: F,
    pub damping: F,
}

impl<F: Float> SpringConstraint<F> {
    pub fn new(rest_length: F, k: F, damping: F) -> Self {
        SpringConstraint { rest_length, k, damping }
    }

    /// Add the spring force to both bodies. Returns its magnitude.
    pub fn apply_force(&self, a: &mut Body<F>, b: &mut Body<F>) -> F {
        let delta = b.position() - a.position();
        let normal = delta.normalize();
        let stretch = delta.length() - self.rest_length;
        let closing = normal.dot(b.velocity - a.velocity);
        let magnitude = self.k * stretch + self.damping * closing;

        let force = normal.scale(magnitude);
        a.apply_force(force, None);
        b.apply_force(-force, None);
        magnitude.abs()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConstraintKind<F: Float> {
    Distance(DistanceConstraint<F>),
    Spring(SpringConstraint<F>),
}

/// A constraint between two bodies owned by the same world.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint<F: Float> {
    pub(crate) id: ConstraintId,
    pub body_a: BodyId,
    pub body_b: BodyId,
    tearable: bool,
    /// Stress measured during the last step; compared against the tear
    /// threshold.
    pub current_force: F,
    pub kind: ConstraintKind<F>,
}

impl<F: Float> Constraint<F> {
    fn with_kind(body_a: BodyId, body_b: BodyId, kind: ConstraintKind<F>) -> Self {
        Constraint {
            id: ConstraintId::default(),
            body_a,
            body_b,
            tearable: false,
            current_force: F::zero(),
            kind,
        }
    }

    pub fn distance(body_a: BodyId, body_b: BodyId, rest_length: F, stiffness: F) -> Self {
        Self::with_kind(body_a, body_b, ConstraintKind::Distance(DistanceConstraint::new(rest_length, stiffness)))
    }

    /// Distance constraint whose rest length is the bodies' current distance.
    pub fn distance_between(a: &Body<F>, b: &Body<F>, stiffness: F) -> Self {
        let rest_length = a.position().distance(b.position());
        Self::distance(a.id(), b.id(), rest_length, stiffness)
    }

    pub fn spring(body_a: BodyId, body_b: BodyId, rest_length: F, k: F, damping: F) -> Self {
        Self::with_kind(body_a, body_b, ConstraintKind::Spring(SpringConstraint::new(rest_length, k, damping)))
    }

    /// Mark as tearable. Springs never tear, so this is ignored for them.
    pub fn with_tearable(mut self, tearable: bool) -> Self {
        self.tearable = tearable && matches!(self.kind, ConstraintKind::Distance(_));
        self
    }

    pub fn id(&self) -> ConstraintId { self.id }
    pub fn is_tearable(&self) -> bool { self.tearable }

    pub fn involves(&self, body: BodyId) -> bool {
        self.body_a == body || self.body_b == body
    }

    /// Spring forces go in before velocity integration.
    pub(crate) fn apply_forces(&mut self, a: &mut Body<F>, b: &mut Body<F>) {
        if let ConstraintKind::Spring(s) = &self.kind {
            self.current_force = s.apply_force(a, b);
        }
    }

    pub(crate) fn pre_step(&mut self, a: &mut Body<F>, b: &mut Body<F>, dt: F, baumgarte: F) {
        if let ConstraintKind::Distance(d) = &mut self.kind {
            self.current_force = d.pre_step(a, b, dt, baumgarte);
        }
    }

    pub(crate) fn solve_velocity(&mut self, a: &mut Body<F>, b: &mut Body<F>) {
        if let ConstraintKind::Distance(d) = &mut self.kind {
            d.solve_velocity(a, b);
        }
    }

    pub(crate) fn solve_position(&self, a: &mut Body<F>, b: &mut Body<F>) -> bool {
        match &self.kind {
            ConstraintKind::Distance(d) => d.solve_position(a, b),
            ConstraintKind::Spring(_) => true,
        }
    }
}
