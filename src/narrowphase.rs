//! Narrowphase: turn broadphase candidates into contacts.

use alloc::vec::Vec as AllocVec;

use crate::body::{Body, BodyType};
use crate::contact::{mix_friction, mix_restitution, Contact, ContactPoint};
use crate::float::Float;
use crate::sat;
use crate::shape::ShapeKind;

/// Exact collision tests for candidate pairs.
///
/// Only polygon/polygon pairs generate contacts. Circles (cloth particles)
/// are skipped, as are static/static pairs.
#[derive(Copy, Clone, Debug, Default)]
pub struct CollisionDetector;

impl CollisionDetector {
    pub fn new() -> Self {
        CollisionDetector
    }

    /// Build contacts for `pairs` of indices into `bodies`.
    pub fn evaluate<F: Float>(&self, bodies: &[Body<F>], pairs: &[(usize, usize)]) -> AllocVec<Contact<F>> {
        let mut contacts = AllocVec::new();
        for &(index_a, index_b) in pairs {
            let (a, b) = (&bodies[index_a], &bodies[index_b]);
            if a.body_type() == BodyType::Static && b.body_type() == BodyType::Static {
                continue;
            }
            let (ShapeKind::Polygon(poly_a), ShapeKind::Polygon(poly_b)) = (&a.shape.kind, &b.shape.kind) else {
                continue;
            };
            let Some(manifold) = sat::polygon_vs_polygon(poly_a, &a.transform, poly_b, &b.transform) else {
                continue;
            };
            contacts.push(Contact {
                body_a: a.id,
                body_b: b.id,
                index_a,
                index_b,
                normal: manifold.normal,
                penetration: manifold.penetration,
                points: manifold.points.into_iter().map(ContactPoint::new).collect(),
                friction: mix_friction(a.friction, b.friction),
                restitution: mix_restitution(a.restitution, b.restitution),
            });
        }
        contacts
    }
}
