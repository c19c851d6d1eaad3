//! Semi-implicit Euler integration, split into a velocity pass and a
//! position pass so contact and constraint impulses can be solved in
//! between.

use crate::body::{Body, BodyType};
use crate::float::Float;
use crate::vec::{Vec, Vec2};

#[derive(Clone, Debug, PartialEq)]
pub struct Integrator<F: Float> {
    /// Linear velocity multiplier applied once per step.
    pub linear_damping: F,
    /// Angular velocity multiplier applied once per step.
    pub angular_damping: F,
}

impl<F: Float> Integrator<F> {
    pub fn new(linear_damping: F, angular_damping: F) -> Self {
        Integrator { linear_damping, angular_damping }
    }

    /// Apply gravity and accumulated forces to velocities, then damp them.
    /// Force and torque accumulators are cleared on every body.
    pub fn integrate_velocities(&self, bodies: &mut [Body<F>], gravity: Vec2<F>, dt: F) {
        for body in bodies.iter_mut() {
            if body.is_simulated() {
                let md = *body.mass_data();
                let total_force = gravity.scale(md.mass) + body.force;
                body.velocity = (body.velocity + total_force.scale(md.inv_mass * dt)).scale(self.linear_damping);
                body.angular_velocity =
                    (body.angular_velocity + body.torque * md.inv_inertia * dt) * self.angular_damping;
            }
            body.force = Vec2::zero();
            body.torque = F::zero();
        }
    }

    /// Advance positions and angles. Kinematic bodies only move when they
    /// have some velocity; static bodies never move.
    pub fn integrate_positions(&self, bodies: &mut [Body<F>], dt: F) {
        for body in bodies.iter_mut() {
            let moves = match body.body_type() {
                BodyType::Static => false,
                BodyType::Kinematic => body.velocity != Vec2::zero() || body.angular_velocity != F::zero(),
                BodyType::Dynamic | BodyType::Soft => true,
            };
            if !moves {
                continue;
            }
            body.transform.position = body.transform.position + body.velocity.scale(dt);
            if body.angular_velocity != F::zero() {
                let angle = body.transform.angle() + body.angular_velocity * dt;
                body.transform.set_angle(angle);
            }
        }
    }
}

impl<F: Float> Default for Integrator<F> {
    fn default() -> Self {
        Self::new(F::from_f32(0.999), F::from_f32(0.995))
    }
}
