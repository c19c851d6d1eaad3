//! Separating axis test and single-point manifold generation for convex
//! polygons.
//!
//! The manifold keeps only the deepest incident vertex; there is no
//! two-point clip against the reference face side planes. Boxes resting on
//! a face therefore rock slightly under uneven load.

use alloc::vec;
use alloc::vec::Vec as AllocVec;

use crate::float::Float;
use crate::shape::Polygon;
use crate::transform::Transform;
use crate::vec::{Vec, Vec2};

/// Reference face selection prefers the first polygon unless the second one
/// separates by more than this.
pub const REFERENCE_FACE_TOLERANCE: f32 = 0.01;

/// Best separating face of one polygon against another.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FaceQuery<F: Float> {
    pub separation: F,
    pub face: usize,
}

/// Overlap between two polygons, normal pointing from the first to the
/// second.
#[derive(Clone, Debug, PartialEq)]
pub struct Manifold<F: Float> {
    pub normal: Vec2<F>,
    pub penetration: F,
    pub points: AllocVec<Vec2<F>>,
}

/// Over the edge normals of `a`, the largest distance from that face to the
/// support point of `b` in the opposite direction.
pub fn max_separation<F: Float>(
    a: &Polygon<F>,
    xf_a: &Transform<F>,
    b: &Polygon<F>,
    xf_b: &Transform<F>,
) -> FaceQuery<F> {
    let mut best = FaceQuery { separation: -F::infinity(), face: 0 };
    for (i, (&v, &n)) in a.vertices().iter().zip(a.normals()).enumerate() {
        let normal = xf_a.rotate(n);
        let vertex = xf_a.apply(v);
        let support = xf_b.apply(b.support(xf_b.unrotate(-normal)));
        let separation = normal.dot(support - vertex);
        if separation > best.separation {
            best = FaceQuery { separation, face: i };
        }
    }
    best
}

/// Face of `poly` whose world normal is most anti-parallel to `normal`.
fn incident_face<F: Float>(poly: &Polygon<F>, xf: &Transform<F>, normal: Vec2<F>) -> usize {
    let mut face = 0;
    let mut min_dot = F::infinity();
    for (i, &n) in poly.normals().iter().enumerate() {
        let d = xf.rotate(n).dot(normal);
        if d < min_dot {
            min_dot = d;
            face = i;
        }
    }
    face
}

/// Collide two convex polygons. `None` when any face separates them.
pub fn polygon_vs_polygon<F: Float>(
    a: &Polygon<F>,
    xf_a: &Transform<F>,
    b: &Polygon<F>,
    xf_b: &Transform<F>,
) -> Option<Manifold<F>> {
    let query_a = max_separation(a, xf_a, b, xf_b);
    if query_a.separation >= F::zero() {
        return None;
    }
    let query_b = max_separation(b, xf_b, a, xf_a);
    if query_b.separation >= F::zero() {
        return None;
    }

    let flip = query_b.separation > query_a.separation + F::from_f32(REFERENCE_FACE_TOLERANCE);
    let (reference, xf_ref, incident, xf_inc, face) = if flip {
        (b, xf_b, a, xf_a, query_b.face)
    } else {
        (a, xf_a, b, xf_b, query_a.face)
    };

    let ref_normal = xf_ref.rotate(reference.normals()[face]);
    let ref_vertex = xf_ref.apply(reference.vertices()[face]);

    let i1 = incident_face(incident, xf_inc, ref_normal);
    let i2 = (i1 + 1) % incident.len();
    let v1 = xf_inc.apply(incident.vertices()[i1]);
    let v2 = xf_inc.apply(incident.vertices()[i2]);
    let d1 = ref_normal.dot(v1 - ref_vertex);
    let d2 = ref_normal.dot(v2 - ref_vertex);
    let (point, depth) = if d2 < d1 { (v2, d2) } else { (v1, d1) };

    Some(Manifold {
        normal: if flip { -ref_normal } else { ref_normal },
        penetration: (-depth).max(F::zero()),
        points: vec![point],
    })
}
