//! Bodies: a shape placed in the world with velocity and mass.

use alloc::vec::Vec as AllocVec;

use crate::aabb::Aabb;
use crate::broadphase::ProxyId;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::shape::{MassData, Material, Shape};
use crate::transform::Transform;
use crate::vec::{Vec, Vec2};

/// Identifier assigned by [`World::add_body`](crate::World::add_body).
///
/// Ids grow monotonically and are never reused by the same world, so they
/// double as a stable ordering key.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u32);

/// How a body takes part in the simulation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BodyType {
    /// Never moves.
    Static,
    /// Moves with its own velocity; ignores forces and impulses.
    Kinematic,
    /// Fully simulated rigid body.
    Dynamic,
    /// Simulated cloth particle.
    Soft,
}

impl BodyType {
    /// True for the types that respond to forces and impulses.
    pub fn is_simulated(self) -> bool {
        matches!(self, BodyType::Dynamic | BodyType::Soft)
    }
}

/// A rigid, kinematic, static or soft body.
#[derive(Clone, Debug)]
pub struct Body<F: Float> {
    pub(crate) id: BodyId,
    pub shape: Shape<F>,
    body_type: BodyType,
    pub(crate) transform: Transform<F>,
    pub velocity: Vec2<F>,
    pub angular_velocity: F,
    pub force: Vec2<F>,
    pub torque: F,
    mass_data: MassData<F>,
    pub friction: F,
    pub restitution: F,
    /// Can be cut by [`SlicingAlgorithm`](crate::SlicingAlgorithm).
    pub slicable: bool,
    /// Acts as a cutting edge; blades are never sliced themselves.
    pub is_blade: bool,
    /// Opaque render tag, carried over to slice fragments.
    pub color: u32,
    aabb: Aabb<F>,
    pub(crate) proxy: Option<ProxyId>,
}

impl<F: Float> Body<F> {
    /// Create a body. Its id stays `BodyId(0)` until the world admits it.
    pub fn new(shape: Shape<F>, position: Vec2<F>, body_type: BodyType) -> Self {
        let transform = Transform::new(position, F::zero());
        let aabb = shape.compute_aabb(&transform);
        let mut body = Body {
            id: BodyId::default(),
            friction: shape.material.friction,
            restitution: shape.material.restitution,
            shape,
            body_type,
            transform,
            velocity: Vec2::zero(),
            angular_velocity: F::zero(),
            force: Vec2::zero(),
            torque: F::zero(),
            mass_data: MassData::immovable(),
            slicable: false,
            is_blade: false,
            color: 0xFFFF_FFFF,
            aabb,
            proxy: None,
        };
        body.update_mass();
        body
    }

    /// Static box, typically used as a floor or wall.
    pub fn wall(center: Vec2<F>, width: F, height: F) -> Result<Self, PhysicsError> {
        let material = Material::new(F::zero(), F::from_f32(0.6), F::zero());
        let shape = Shape::rect(width, height, material)?;
        Ok(Body::new(shape, center, BodyType::Static))
    }

    /// Kinematic cutting edge driven purely by its velocity.
    pub fn blade(center: Vec2<F>, length: F, thickness: F) -> Result<Self, PhysicsError> {
        let shape = Shape::rect(length, thickness, Material::default())?;
        let mut body = Body::new(shape, center, BodyType::Kinematic);
        body.is_blade = true;
        Ok(body)
    }

    /// A cloth particle. Pinned particles are static.
    pub fn cloth_particle(position: Vec2<F>, radius: F, density: F, pinned: bool) -> Result<Self, PhysicsError> {
        let shape = Shape::circle(radius, Material::default().with_density(density))?;
        let body_type = if pinned { BodyType::Static } else { BodyType::Soft };
        Ok(Body::new(shape, position, body_type))
    }

    pub fn with_slicable(mut self, slicable: bool) -> Self {
        self.slicable = slicable;
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2<F>, angular_velocity: F) -> Self {
        self.velocity = velocity;
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn id(&self) -> BodyId { self.id }
    pub fn body_type(&self) -> BodyType { self.body_type }
    pub fn mass_data(&self) -> &MassData<F> { &self.mass_data }
    pub fn transform(&self) -> &Transform<F> { &self.transform }
    pub fn position(&self) -> Vec2<F> { self.transform.position }
    pub fn angle(&self) -> F { self.transform.angle() }
    pub fn is_simulated(&self) -> bool { self.body_type.is_simulated() }

    /// Change the body type and recompute mass so the static/kinematic
    /// zero-inverse invariant holds.
    pub fn set_body_type(&mut self, body_type: BodyType) {
        self.body_type = body_type;
        if body_type == BodyType::Static {
            self.velocity = Vec2::zero();
            self.angular_velocity = F::zero();
        }
        self.update_mass();
    }

    /// Recompute mass data from the shape. Static and kinematic bodies get
    /// zero mass and zero inverses.
    pub fn update_mass(&mut self) {
        self.mass_data = if self.body_type.is_simulated() {
            self.shape.compute_mass()
        } else {
            MassData::immovable()
        };
    }

    pub fn set_position(&mut self, position: Vec2<F>) {
        self.transform.position = position;
        self.synchronize();
    }

    pub fn set_angle(&mut self, angle: F) {
        self.transform.set_angle(angle);
        self.synchronize();
    }

    /// Accumulate a force, optionally off-centre (adds torque). Ignored by
    /// static and kinematic bodies.
    pub fn apply_force(&mut self, force: Vec2<F>, point: Option<Vec2<F>>) {
        if !self.is_simulated() {
            return;
        }
        self.force = self.force + force;
        if let Some(point) = point {
            self.torque = self.torque + (point - self.transform.position).cross(force);
        }
    }

    /// Instantly change velocity by `impulse` applied at the world `point`.
    pub fn apply_impulse(&mut self, impulse: Vec2<F>, point: Vec2<F>) {
        let r = point - self.transform.position;
        self.apply_impulse_at_offset(impulse, r);
    }

    pub(crate) fn apply_impulse_at_offset(&mut self, impulse: Vec2<F>, r: Vec2<F>) {
        if !self.is_simulated() {
            return;
        }
        self.velocity = self.velocity + impulse.scale(self.mass_data.inv_mass);
        self.angular_velocity = self.angular_velocity + self.mass_data.inv_inertia * r.cross(impulse);
    }

    /// Shift position and angle directly, bypassing velocity. Used by the
    /// position solvers; the AABB is refreshed at the end of the step.
    pub(crate) fn displace(&mut self, delta: Vec2<F>, delta_angle: F) {
        if !self.is_simulated() {
            return;
        }
        self.transform.position = self.transform.position + delta;
        if delta_angle != F::zero() {
            self.transform.set_angle(self.transform.angle() + delta_angle);
        }
    }

    /// Velocity of the material point at world `point`: `v + w × r`.
    pub fn velocity_at_point(&self, point: Vec2<F>) -> Vec2<F> {
        self.velocity + (point - self.transform.position).cross_scalar(self.angular_velocity)
    }

    /// Cached world-space bounds, as of the last [`Body::synchronize`].
    pub fn aabb(&self) -> Aabb<F> {
        self.aabb
    }

    /// Recompute the cached AABB from the current transform.
    pub fn synchronize(&mut self) {
        self.aabb = self.shape.compute_aabb(&self.transform);
    }

    /// Polygon vertices in world space, `None` for circles.
    pub fn world_vertices(&self) -> Option<AllocVec<Vec2<F>>> {
        let poly = self.shape.as_polygon()?;
        Some(poly.vertices().iter().map(|&v| self.transform.apply(v)).collect())
    }

    pub fn contains_point(&self, point: Vec2<F>) -> bool {
        self.shape.contains_local_point(self.transform.apply_inverse(point))
    }
}

/// Mutable access to two distinct elements of a slice.
pub(crate) fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert!(a != b, "pair_mut needs two distinct indices");
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
