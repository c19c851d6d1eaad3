//! Finding where a cut segment crosses a convex polygon body.

use alloc::vec::Vec as AllocVec;

use crate::body::{Body, BodyId};
use crate::float::Float;
use crate::segment::Segment;
use crate::vec::{Vec, Vec2};

/// Squared distance under which two edge hits count as one (the cut passed
/// through a shared vertex).
const DUPLICATE_HIT_DISTANCE_SQ: f32 = 1e-6;

/// The cut crossing polygon edge `edge` (from vertex `edge` to `edge + 1`).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SliceIntersection<F: Float> {
    pub edge: usize,
    pub point: Vec2<F>,
}

/// A successful cut, ready for [`PolygonSplitter`](crate::splitter::PolygonSplitter).
#[derive(Clone, Debug, PartialEq)]
pub struct SliceResult<F: Float> {
    pub body: BodyId,
    /// World-space vertices of the body at the time of the cut.
    pub vertices: AllocVec<Vec2<F>>,
    /// Entry and exit, sorted by edge index.
    pub intersections: [SliceIntersection<F>; 2],
    pub segment: Segment<F>,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct SlicingAlgorithm;

impl SlicingAlgorithm {
    /// Intersect `segment` with `body`. Needs a slicable, non-blade polygon
    /// crossed on exactly two edges; anything else is `None`.
    pub fn slice_body<F: Float>(body: &Body<F>, segment: &Segment<F>) -> Option<SliceResult<F>> {
        if !body.slicable || body.is_blade {
            return None;
        }
        let vertices = body.world_vertices()?;
        let n = vertices.len();

        let mut hits: AllocVec<SliceIntersection<F>> = AllocVec::with_capacity(2);
        for edge in 0..n {
            let side = Segment::new(vertices[edge], vertices[(edge + 1) % n]);
            let Some(hit) = segment.intersect(&side) else {
                continue;
            };
            let duplicate = hits
                .iter()
                .any(|h| h.point.distance_sq(hit.point) < F::from_f32(DUPLICATE_HIT_DISTANCE_SQ));
            if !duplicate {
                hits.push(SliceIntersection { edge, point: hit.point });
            }
        }

        if hits.len() != 2 {
            log::trace!("segment crosses body {:?} {} times, not slicing", body.id(), hits.len());
            return None;
        }
        let intersections = [hits[0], hits[1]];

        Some(SliceResult { body: body.id(), vertices, intersections, segment: *segment })
    }
}
