//! Contacts produced by the narrowphase.
//!
//! Contacts live for exactly one step. The contact solver fills the
//! per-point `r_a`, `r_b`, masses and bias, and the position solver reads
//! them later in the same step; nothing carries over to the next step.

use alloc::vec::Vec as AllocVec;

use crate::body::BodyId;
use crate::float::Float;
use crate::vec::{Vec, Vec2};

/// One point of a contact manifold plus the solver's scratch data.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ContactPoint<F: Float> {
    /// World-space contact location.
    pub position: Vec2<F>,
    pub normal_impulse: F,
    pub tangent_impulse: F,
    /// Offset from body A's centre of mass.
    pub r_a: Vec2<F>,
    /// Offset from body B's centre of mass.
    pub r_b: Vec2<F>,
    pub normal_mass: F,
    pub tangent_mass: F,
    pub velocity_bias: F,
}

impl<F: Float> ContactPoint<F> {
    pub fn new(position: Vec2<F>) -> Self {
        ContactPoint {
            position,
            normal_impulse: F::zero(),
            tangent_impulse: F::zero(),
            r_a: Vec2::zero(),
            r_b: Vec2::zero(),
            normal_mass: F::zero(),
            tangent_mass: F::zero(),
            velocity_bias: F::zero(),
        }
    }
}

/// Touching pair of bodies.
#[derive(Clone, Debug, PartialEq)]
pub struct Contact<F: Float> {
    pub body_a: BodyId,
    pub body_b: BodyId,
    /// Indices into the world's body list, valid for the step that built
    /// the contact.
    pub(crate) index_a: usize,
    pub(crate) index_b: usize,
    /// Unit normal pointing from A towards B.
    pub normal: Vec2<F>,
    /// Overlap depth, non-negative.
    pub penetration: F,
    /// Currently always a single point.
    pub points: AllocVec<ContactPoint<F>>,
    pub friction: F,
    pub restitution: F,
}

/// Friction mixing: geometric mean.
pub fn mix_friction<F: Float>(a: F, b: F) -> F {
    (a * b).sqrt()
}

/// Restitution mixing: the bouncier surface wins.
pub fn mix_restitution<F: Float>(a: F, b: F) -> F {
    a.max(b)
}
