//! Baumgarte-style positional correction for contacts.

use crate::body::{pair_mut, Body};
use crate::contact::Contact;
use crate::float::Float;
use crate::vec::{Vec, Vec2};

/// Pushes overlapping bodies apart by displacing them directly.
///
/// Reads the lever arms and normal masses the contact solver wrote earlier
/// in the same step, so it must run after
/// [`ContactSolver::init_velocity_constraints`](crate::solver::ContactSolver::init_velocity_constraints).
#[derive(Clone, Debug, PartialEq)]
pub struct PositionSolver<F: Float> {
    /// Penetration tolerated without correction.
    pub slop: F,
    /// Fraction of the penetration corrected per pass.
    pub baumgarte: F,
}

impl<F: Float> PositionSolver<F> {
    pub fn new(slop: F, baumgarte: F) -> Self {
        PositionSolver { slop, baumgarte }
    }

    /// One correction pass against the narrowphase penetration, which is left
    /// as found. Returns true when the deepest overlap is within `1.5 * slop`.
    pub fn solve(&self, contacts: &[Contact<F>], bodies: &mut [Body<F>]) -> bool {
        let mut min_separation = F::zero();

        for contact in contacts.iter() {
            min_separation = min_separation.min(-contact.penetration);
            if contact.index_a == contact.index_b || contact.points.is_empty() {
                continue;
            }
            let (a, b) = pair_mut(bodies, contact.index_a, contact.index_b);
            let error = (contact.penetration - self.slop).max(F::zero());
            if error == F::zero() {
                continue;
            }

            let point_count = F::from_f32(contact.points.len() as f32);
            let normal = contact.normal;
            for point in contact.points.iter() {
                if point.normal_mass <= F::zero() {
                    continue;
                }
                let magnitude = error * self.baumgarte * point.normal_mass / point_count;
                let impulse: Vec2<F> = normal.scale(magnitude);

                let ma = *a.mass_data();
                let mb = *b.mass_data();
                a.displace(-impulse.scale(ma.inv_mass), -ma.inv_inertia * point.r_a.cross(impulse));
                b.displace(impulse.scale(mb.inv_mass), mb.inv_inertia * point.r_b.cross(impulse));
            }
        }

        min_separation >= -F::from_f32(1.5) * self.slop
    }
}

impl<F: Float> Default for PositionSolver<F> {
    fn default() -> Self {
        Self::new(F::from_f32(0.01), F::from_f32(0.2))
    }
}
