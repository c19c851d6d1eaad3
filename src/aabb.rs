//! Axis-aligned bounding boxes.

use crate::float::Float;
use crate::vec::{Vec, Vec2};

/// Axis-aligned bounding box given by its `min` and `max` corners.
///
/// A box can be deliberately invalid (NaN corners, see [`Aabb::invalid`]);
/// check [`Aabb::is_valid`] before relying on one that came from an
/// untrusted source.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb<F: Float> {
    pub min: Vec2<F>,
    pub max: Vec2<F>,
}

impl<F: Float> Aabb<F> {
    pub fn new(min: Vec2<F>, max: Vec2<F>) -> Self {
        Aabb { min, max }
    }

    /// Box spanning two arbitrary corners.
    pub fn from_points(a: Vec2<F>, b: Vec2<F>) -> Self {
        Aabb { min: a.min(b), max: a.max(b) }
    }

    pub fn invalid() -> Self {
        let nan = Vec2::new(F::nan(), F::nan());
        Aabb { min: nan, max: nan }
    }

    pub fn is_valid(&self) -> bool {
        let not_nan = !(self.min.x.is_nan() || self.min.y.is_nan() || self.max.x.is_nan() || self.max.y.is_nan());
        not_nan && self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    pub fn union(&self, other: &Self) -> Self {
        Aabb { min: self.min.min(other.min), max: self.max.max(other.max) }
    }

    /// True if `other` lies entirely inside this box.
    pub fn contains(&self, other: &Self) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }

    pub fn contains_point(&self, p: Vec2<F>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        !(other.min.x > self.max.x
            || other.max.x < self.min.x
            || other.min.y > self.max.y
            || other.max.y < self.min.y)
    }

    /// Grow by `margin` on every side.
    pub fn expand(&self, margin: F) -> Self {
        let m = Vec2::splat(margin);
        Aabb { min: self.min - m, max: self.max + m }
    }

    pub fn perimeter(&self) -> F {
        let w = self.max.x - self.min.x;
        let h = self.max.y - self.min.y;
        F::two() * (w + h)
    }

    pub fn center(&self) -> Vec2<F> {
        (self.min + self.max).scale(F::half())
    }
}
