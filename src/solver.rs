//! Sequential impulse contact solver.

use crate::body::{pair_mut, Body};
use crate::contact::Contact;
use crate::float::Float;
use crate::vec::{Vec, Vec2};

/// Solves contact velocities one point at a time, accumulating and clamping
/// impulses within the step. Accumulators are rebuilt from zero every step.
#[derive(Clone, Debug, PartialEq)]
pub struct ContactSolver<F: Float> {
    /// Closing speed below which restitution is ignored.
    pub restitution_threshold: F,
}

fn effective_mass<F: Float>(a: &Body<F>, b: &Body<F>, r_a: Vec2<F>, r_b: Vec2<F>, axis: Vec2<F>) -> F {
    let ra_x = r_a.cross(axis);
    let rb_x = r_b.cross(axis);
    let ma = a.mass_data();
    let mb = b.mass_data();
    let k = ma.inv_mass + mb.inv_mass + ma.inv_inertia * ra_x * ra_x + mb.inv_inertia * rb_x * rb_x;
    if k > F::zero() { F::one() / k } else { F::zero() }
}

fn apply_pair<F: Float>(a: &mut Body<F>, b: &mut Body<F>, impulse: Vec2<F>, r_a: Vec2<F>, r_b: Vec2<F>) {
    a.apply_impulse_at_offset(-impulse, r_a);
    b.apply_impulse_at_offset(impulse, r_b);
}

fn relative_velocity<F: Float>(a: &Body<F>, b: &Body<F>, r_a: Vec2<F>, r_b: Vec2<F>) -> Vec2<F> {
    let va = a.velocity + r_a.cross_scalar(a.angular_velocity);
    let vb = b.velocity + r_b.cross_scalar(b.angular_velocity);
    vb - va
}

impl<F: Float> ContactSolver<F> {
    pub fn new(restitution_threshold: F) -> Self {
        ContactSolver { restitution_threshold }
    }

    /// Fill per-point lever arms, effective masses and restitution bias.
    pub fn init_velocity_constraints(&self, contacts: &mut [Contact<F>], bodies: &[Body<F>]) {
        for contact in contacts.iter_mut() {
            let a = &bodies[contact.index_a];
            let b = &bodies[contact.index_b];
            let normal = contact.normal;
            let tangent = normal.perp();

            for point in contact.points.iter_mut() {
                point.r_a = point.position - a.position();
                point.r_b = point.position - b.position();
                point.normal_mass = effective_mass(a, b, point.r_a, point.r_b, normal);
                point.tangent_mass = effective_mass(a, b, point.r_a, point.r_b, tangent);
                point.normal_impulse = F::zero();
                point.tangent_impulse = F::zero();

                let vn = relative_velocity(a, b, point.r_a, point.r_b).dot(normal);
                point.velocity_bias = if vn < -self.restitution_threshold {
                    -contact.restitution * vn
                } else {
                    F::zero()
                };
            }
        }
    }

    /// One pass over all contacts: normal impulse first, then friction.
    pub fn solve_velocity_constraints(&self, contacts: &mut [Contact<F>], bodies: &mut [Body<F>]) {
        for contact in contacts.iter_mut() {
            if contact.index_a == contact.index_b {
                continue;
            }
            let (a, b) = pair_mut(bodies, contact.index_a, contact.index_b);
            if !a.is_simulated() && !b.is_simulated() {
                continue;
            }
            let normal = contact.normal;
            let tangent = normal.perp();

            for point in contact.points.iter_mut() {
                let vn = relative_velocity(a, b, point.r_a, point.r_b).dot(normal);
                let lambda = point.normal_mass * (-vn + point.velocity_bias);
                let accumulated = (point.normal_impulse + lambda).max(F::zero());
                let delta = accumulated - point.normal_impulse;
                point.normal_impulse = accumulated;
                apply_pair(a, b, normal.scale(delta), point.r_a, point.r_b);

                let vt = relative_velocity(a, b, point.r_a, point.r_b).dot(tangent);
                let max_friction = contact.friction * point.normal_impulse;
                let lambda = -point.tangent_mass * vt;
                let accumulated = (point.tangent_impulse + lambda).clamp(-max_friction, max_friction);
                let delta = accumulated - point.tangent_impulse;
                point.tangent_impulse = accumulated;
                apply_pair(a, b, tangent.scale(delta), point.r_a, point.r_b);
            }
        }
    }
}

impl<F: Float> Default for ContactSolver<F> {
    fn default() -> Self {
        Self::new(F::one())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyType;
    use crate::contact::ContactPoint;
    use crate::shape::{Material, Shape};
    use alloc::vec;

    fn block(y: f32, body_type: BodyType, restitution: f32) -> Body<f32> {
        let shape = Shape::rect(2.0, 2.0, Material::new(1.0, 0.0, restitution)).unwrap();
        Body::new(shape, Vec2::new(0.0, y), body_type)
    }

    fn contact(penetration: f32) -> Contact<f32> {
        Contact {
            body_a: Default::default(),
            body_b: Default::default(),
            index_a: 0,
            index_b: 1,
            normal: Vec2::new(0.0, 1.0),
            penetration,
            points: vec![ContactPoint::new(Vec2::new(0.0, 1.0))],
            friction: 0.0,
            restitution: 0.0,
        }
    }

    #[test]
    fn stops_approach_against_static() {
        let mut falling = block(0.0, BodyType::Dynamic, 0.0);
        falling.velocity = Vec2::new(0.0, 10.0);
        let floor = block(2.0, BodyType::Static, 0.0);
        let mut bodies = [falling, floor];
        let mut contacts = [contact(0.0)];

        let solver = ContactSolver::new(1.0);
        solver.init_velocity_constraints(&mut contacts, &bodies);
        solver.solve_velocity_constraints(&mut contacts, &mut bodies);

        assert!(bodies[0].velocity.y.abs() < 1e-4);
        assert_eq!(bodies[1].velocity, Vec2::zero());
        assert!(contacts[0].points[0].normal_impulse > 0.0);
    }

    #[test]
    fn separating_bodies_get_no_impulse() {
        let mut rising = block(0.0, BodyType::Dynamic, 0.0);
        rising.velocity = Vec2::new(0.0, -5.0);
        let floor = block(2.0, BodyType::Static, 0.0);
        let mut bodies = [rising, floor];
        let mut contacts = [contact(0.0)];

        let solver = ContactSolver::new(1.0);
        solver.init_velocity_constraints(&mut contacts, &bodies);
        solver.solve_velocity_constraints(&mut contacts, &mut bodies);

        assert_eq!(contacts[0].points[0].normal_impulse, 0.0);
        assert_eq!(bodies[0].velocity, Vec2::new(0.0, -5.0));
    }

    #[test]
    fn restitution_bounces_fast_impacts() {
        let mut falling = block(0.0, BodyType::Dynamic, 1.0);
        falling.velocity = Vec2::new(0.0, 10.0);
        let floor = block(2.0, BodyType::Static, 1.0);
        let mut bodies = [falling, floor];
        let mut contacts = [contact(0.0)];
        contacts[0].restitution = 1.0;

        let solver = ContactSolver::new(1.0);
        solver.init_velocity_constraints(&mut contacts, &bodies);
        solver.solve_velocity_constraints(&mut contacts, &mut bodies);

        assert!((bodies[0].velocity.y + 10.0).abs() < 1e-3);
    }
}
