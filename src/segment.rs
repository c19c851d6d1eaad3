//! Line segments and segment/segment intersection.

use crate::aabb::Aabb;
use crate::float::Float;
use crate::vec::{Vec, Vec2};

/// A finite line segment from `a` to `b`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment<F: Float> {
    pub a: Vec2<F>,
    pub b: Vec2<F>,
}

/// Where two segments cross.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SegmentHit<F: Float> {
    pub point: Vec2<F>,
    /// Parameter along the first segment, in [0, 1].
    pub t: F,
    /// Parameter along the second segment, in [0, 1].
    pub u: F,
}

impl<F: Float> Segment<F> {
    pub fn new(a: Vec2<F>, b: Vec2<F>) -> Self {
        Segment { a, b }
    }

    pub fn direction(&self) -> Vec2<F> {
        self.b - self.a
    }

    pub fn length(&self) -> F {
        self.direction().length()
    }

    pub fn aabb(&self) -> Aabb<F> {
        Aabb::from_points(self.a, self.b)
    }

    /// Intersection with `other`, or `None` for parallel, degenerate or
    /// non-overlapping segments.
    pub fn intersect(&self, other: &Segment<F>) -> Option<SegmentHit<F>> {
        let r = self.direction();
        let s = other.direction();
        let denom = r.cross(s);
        if denom.is_near_zero(F::from_f32(1e-10)) {
            return None;
        }

        let qp = other.a - self.a;
        let t = qp.cross(s) / denom;
        let u = qp.cross(r) / denom;
        let (zero, one) = (F::zero(), F::one());
        if t < zero || t > one || u < zero || u > one {
            return None;
        }

        Some(SegmentHit { point: self.a + r.scale(t), t, u })
    }
}
