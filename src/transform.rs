//! Rotation matrices and rigid transforms.

use crate::float::Float;
use crate::vec::Vec2;

/// 2x2 rotation matrix, stored column-major.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mat2<F: Float> {
    pub m00: F,
    pub m01: F,
    pub m10: F,
    pub m11: F,
}

impl<F: Float> Mat2<F> {
    pub fn identity() -> Self {
        Mat2 { m00: F::one(), m01: F::zero(), m10: F::zero(), m11: F::one() }
    }

    /// Counter-clockwise rotation by `angle` radians.
    pub fn from_angle(angle: F) -> Self {
        let (s, c) = (angle.sin(), angle.cos());
        Mat2 { m00: c, m01: -s, m10: s, m11: c }
    }

    pub fn mul_vec(&self, v: Vec2<F>) -> Vec2<F> {
        Vec2::new(self.m00 * v.x + self.m01 * v.y, self.m10 * v.x + self.m11 * v.y)
    }

    /// Multiply by the transpose, which for a rotation is the inverse.
    pub fn mul_vec_transpose(&self, v: Vec2<F>) -> Vec2<F> {
        Vec2::new(self.m00 * v.x + self.m10 * v.y, self.m01 * v.x + self.m11 * v.y)
    }
}

impl<F: Float> Default for Mat2<F> {
    fn default() -> Self {
        Self::identity()
    }
}

/// Position plus orientation of a body.
///
/// `rotation` is always derived from `angle`; mutate the angle through
/// [`Transform::set_angle`] so the two never disagree.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform<F: Float> {
    pub position: Vec2<F>,
    angle: F,
    rotation: Mat2<F>,
}

impl<F: Float> Transform<F> {
    pub fn new(position: Vec2<F>, angle: F) -> Self {
        Transform { position, angle, rotation: Mat2::from_angle(angle) }
    }

    pub fn identity() -> Self {
        Transform { position: Vec2::new(F::zero(), F::zero()), angle: F::zero(), rotation: Mat2::identity() }
    }

    pub fn angle(&self) -> F { self.angle }
    pub fn rotation(&self) -> &Mat2<F> { &self.rotation }

    pub fn set_angle(&mut self, angle: F) {
        self.angle = angle;
        self.rotation = Mat2::from_angle(angle);
    }

    /// Local point to world space.
    pub fn apply(&self, local: Vec2<F>) -> Vec2<F> {
        self.rotation.mul_vec(local) + self.position
    }

    /// World point to local space.
    pub fn apply_inverse(&self, world: Vec2<F>) -> Vec2<F> {
        self.rotation.mul_vec_transpose(world - self.position)
    }

    /// Rotate a local direction into world space (no translation).
    pub fn rotate(&self, dir: Vec2<F>) -> Vec2<F> {
        self.rotation.mul_vec(dir)
    }

    /// Rotate a world direction into local space (no translation).
    pub fn unrotate(&self, dir: Vec2<F>) -> Vec2<F> {
        self.rotation.mul_vec_transpose(dir)
    }
}

impl<F: Float> Default for Transform<F> {
    fn default() -> Self {
        Self::identity()
    }
}
