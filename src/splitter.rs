//! Turning a [`SliceResult`] into two new bodies.

use alloc::vec::Vec as AllocVec;

use crate::body::{Body, BodyType};
use crate::broadphase::Broadphase;
use crate::config::WorldConfig;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::segment::Segment;
use crate::shape::{centroid_and_area, Shape};
use crate::slicing::SliceResult;
use crate::vec::{Vec, Vec2};
use crate::world::World;

/// Sine of the turn angle below which a vertex counts as collinear.
const COLLINEAR_TOLERANCE: f32 = 1e-4;

/// Replaces a sliced body with its two halves.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonSplitter<F: Float> {
    /// Pieces with less area than this are rejected, along with the cut.
    pub min_area: F,
    /// Consecutive vertices closer than this (squared) are merged.
    pub merge_distance_sq: F,
    /// Speed at which the halves are pushed away from the cut line.
    pub separation_speed: F,
}

impl<F: Float> PolygonSplitter<F> {
    pub fn new(min_area: F, merge_distance_sq: F, separation_speed: F) -> Self {
        PolygonSplitter { min_area, merge_distance_sq, separation_speed }
    }

    pub fn from_config(config: &WorldConfig<F>) -> Self {
        Self::new(config.min_fragment_area, config.merge_distance_sq, config.separation_speed)
    }

    /// Split the sliced body in `world`. Returns false, leaving the world
    /// untouched, if either half would be degenerate or too small.
    pub fn split<B, O>(&self, result: &SliceResult<F>, world: &mut World<F, B>, observer: &mut O) -> bool
    where
        B: Broadphase<F>,
        O: StepObserver<F>,
    {
        let Some(original) = world.body(result.body) else {
            return false;
        };
        let [entry, exit] = result.intersections;
        let (e1, e2) = (entry.edge, exit.edge);
        let v = &result.vertices;
        if e1 >= e2 || e2 >= v.len() {
            return false;
        }

        let mut outline_a = AllocVec::with_capacity(v.len() + 2);
        outline_a.extend_from_slice(&v[..=e1]);
        outline_a.push(entry.point);
        outline_a.push(exit.point);
        outline_a.extend_from_slice(&v[e2 + 1..]);

        let mut outline_b = AllocVec::with_capacity(e2 - e1 + 2);
        outline_b.push(entry.point);
        outline_b.extend_from_slice(&v[e1 + 1..=e2]);
        outline_b.push(exit.point);

        let (Some(piece_a), Some(piece_b)) = (
            self.build_piece(original, &outline_a, &result.segment),
            self.build_piece(original, &outline_b, &result.segment),
        ) else {
            log::trace!("slice of body {:?} rejected: fragment too small", result.body);
            return false;
        };

        if world.remove_body(result.body).is_err() {
            return false;
        }
        let pieces = [world.add_body(piece_a), world.add_body(piece_b)];
        log::debug!("body {:?} sliced into {:?} and {:?}", result.body, pieces[0], pieces[1]);
        observer.on_body_sliced(result.body, pieces);
        true
    }

    fn build_piece(&self, original: &Body<F>, outline: &[Vec2<F>], cut: &Segment<F>) -> Option<Body<F>> {
        let outline = clean_outline(outline, self.merge_distance_sq);
        if outline.len() < 3 {
            return None;
        }
        let (centroid, signed_area) = centroid_and_area(&outline)?;
        if signed_area.abs() < self.min_area {
            return None;
        }

        let local: AllocVec<Vec2<F>> = outline.iter().map(|&p| p - centroid).collect();
        let shape = Shape::polygon(&local, original.shape.material).ok()?;
        let body_type = original.body_type();
        let mut piece = Body::new(shape, centroid, body_type)
            .with_slicable(original.slicable)
            .with_color(original.color);
        piece.friction = original.friction;
        piece.restitution = original.restitution;

        // Static halves stay at rest; kinematic ones keep moving but get no
        // separation push.
        if body_type != BodyType::Static {
            piece.velocity = original.velocity_at_point(centroid);
            piece.angular_velocity = original.angular_velocity;
        }
        // The kick is a velocity change, independent of the piece's mass.
        if piece.is_simulated() {
            let direction = cut.direction();
            let side = direction.cross(centroid - cut.a);
            let speed = if side >= F::zero() { self.separation_speed } else { -self.separation_speed };
            piece.velocity = piece.velocity + direction.perp().normalize().scale(speed);
        }
        Some(piece)
    }
}

impl<F: Float> Default for PolygonSplitter<F> {
    fn default() -> Self {
        Self::from_config(&WorldConfig::default())
    }
}

/// Merge near-duplicate neighbours (including across the wrap) and drop
/// collinear vertices.
fn clean_outline<F: Float>(points: &[Vec2<F>], merge_distance_sq: F) -> AllocVec<Vec2<F>> {
    let mut out: AllocVec<Vec2<F>> = AllocVec::with_capacity(points.len());
    for &p in points {
        if out.last().map_or(true, |&q| q.distance_sq(p) >= merge_distance_sq) {
            out.push(p);
        }
    }
    while out.len() > 1 && out[0].distance_sq(out[out.len() - 1]) < merge_distance_sq {
        out.pop();
    }

    let tolerance = F::from_f32(COLLINEAR_TOLERANCE);
    let mut i = 0;
    while out.len() >= 3 && i < out.len() {
        let n = out.len();
        let prev = out[(i + n - 1) % n];
        let next = out[(i + 1) % n];
        let a = out[i] - prev;
        let b = next - out[i];
        if a.cross(b).abs() <= tolerance * a.length() * b.length() {
            out.remove(i);
            // The previous vertex may have become collinear.
            i = i.saturating_sub(1);
        } else {
            i += 1;
        }
    }
    out
}
