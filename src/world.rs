//! The world: owns bodies and constraints and runs the fixed-step pipeline.

use alloc::vec::Vec as AllocVec;

use crate::aabb::Aabb;
use crate::body::{pair_mut, Body, BodyId};
use crate::broadphase::{AabbTree, Broadphase};
use crate::config::WorldConfig;
use crate::constraint::{Constraint, ConstraintId};
use crate::contact::Contact;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::integrator::Integrator;
use crate::narrowphase::CollisionDetector;
use crate::observer::StepObserver;
use crate::position_solver::PositionSolver;
use crate::segment::Segment;
use crate::slicing::SlicingAlgorithm;
use crate::solver::ContactSolver;
use crate::splitter::PolygonSplitter;
use crate::tearing::TearingLogic;
use crate::vec::Vec2;

/// Owns every body and constraint and advances them with
/// [`World::update_fixed`].
///
/// Bodies are kept sorted by id (ids only grow), so lookups are binary
/// searches and iteration order is stable between runs.
pub struct World<F: Float, B: Broadphase<F> = AabbTree<F>> {
    bodies: AllocVec<Body<F>>,
    constraints: AllocVec<Constraint<F>>,
    contacts: AllocVec<Contact<F>>,
    config: WorldConfig<F>,
    broadphase: B,
    detector: CollisionDetector,
    solver: ContactSolver<F>,
    integrator: Integrator<F>,
    position_solver: PositionSolver<F>,
    tearing: TearingLogic<F>,
    splitter: PolygonSplitter<F>,
    next_body_id: u32,
    next_constraint_id: u32,
}

impl<F: Float> World<F, AabbTree<F>> {
    /// Create an empty world indexed by an [`AabbTree`].
    pub fn new(config: WorldConfig<F>) -> Self {
        let tree = AabbTree::new(config.aabb_margin);
        Self::with_broadphase(config, tree)
    }
}

impl<F: Float> Default for World<F, AabbTree<F>> {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

fn index_in<F: Float>(bodies: &[Body<F>], id: BodyId) -> Option<usize> {
    bodies.binary_search_by_key(&id, |b| b.id).ok()
}

fn constraint_indices<F: Float>(bodies: &[Body<F>], c: &Constraint<F>) -> Option<(usize, usize)> {
    let a = index_in(bodies, c.body_a)?;
    let b = index_in(bodies, c.body_b)?;
    (a != b).then_some((a, b))
}

impl<F: Float, B: Broadphase<F>> World<F, B> {
    /// Create an empty world using a caller-supplied broadphase.
    pub fn with_broadphase(config: WorldConfig<F>, broadphase: B) -> Self {
        World {
            bodies: AllocVec::new(),
            constraints: AllocVec::new(),
            contacts: AllocVec::new(),
            detector: CollisionDetector::new(),
            solver: ContactSolver::new(config.restitution_threshold),
            integrator: Integrator::new(config.linear_damping, config.angular_damping),
            position_solver: PositionSolver::new(config.slop, config.baumgarte),
            tearing: TearingLogic::new(config.tear_threshold),
            splitter: PolygonSplitter::from_config(&config),
            config,
            broadphase,
            next_body_id: 0,
            next_constraint_id: 0,
        }
    }

    /// Take ownership of `body`, index it and return its new id.
    pub fn add_body(&mut self, mut body: Body<F>) -> BodyId {
        let id = BodyId(self.next_body_id);
        self.next_body_id += 1;

        body.id = id;
        body.update_mass();
        body.synchronize();
        body.proxy = Some(self.broadphase.insert(id, body.aabb()));
        log::debug!("added body {:?} ({:?}) at {:?}", id, body.body_type(), body.position());
        self.bodies.push(body);
        id
    }

    /// Remove a body together with its constraints and contacts.
    pub fn remove_body(&mut self, id: BodyId) -> Result<Body<F>, PhysicsError> {
        let index = self.index_of(id).ok_or(PhysicsError::BodyNotFound(id))?;
        let mut body = self.bodies.remove(index);
        if let Some(proxy) = body.proxy.take() {
            self.broadphase.remove(proxy);
        }

        let before = self.constraints.len();
        self.constraints.retain(|c| !c.involves(id));
        let dropped = before - self.constraints.len();

        self.contacts.retain(|c| c.body_a != id && c.body_b != id);
        for contact in self.contacts.iter_mut() {
            if contact.index_a > index {
                contact.index_a -= 1;
            }
            if contact.index_b > index {
                contact.index_b -= 1;
            }
        }

        log::debug!("removed body {:?} and {} constraints", id, dropped);
        Ok(body)
    }

    /// Add a constraint between two bodies already in the world.
    pub fn add_constraint(&mut self, mut constraint: Constraint<F>) -> Result<ConstraintId, PhysicsError> {
        for body in [constraint.body_a, constraint.body_b] {
            if self.index_of(body).is_none() {
                return Err(PhysicsError::BodyNotFound(body));
            }
        }
        if constraint.body_a == constraint.body_b {
            return Err(PhysicsError::SelfConstraint(constraint.body_a));
        }

        let id = ConstraintId(self.next_constraint_id);
        self.next_constraint_id += 1;
        constraint.id = id;
        self.constraints.push(constraint);
        Ok(id)
    }

    pub fn remove_constraint(&mut self, id: ConstraintId) -> Result<Constraint<F>, PhysicsError> {
        let index = self
            .constraints
            .iter()
            .position(|c| c.id == id)
            .ok_or(PhysicsError::ConstraintNotFound(id))?;
        Ok(self.constraints.remove(index))
    }

    /// Drop every body, constraint and contact. Ids keep counting up.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.constraints.clear();
        self.contacts.clear();
        self.broadphase.clear();
        log::debug!("world cleared");
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        index_in(&self.bodies, id)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body<F>> {
        self.index_of(id).map(|i| &self.bodies[i])
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body<F>> {
        let index = self.index_of(id)?;
        self.bodies.get_mut(index)
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint<F>> {
        self.constraints.iter().find(|c| c.id == id)
    }

    /// All bodies, sorted by id.
    pub fn bodies(&self) -> &[Body<F>] { &self.bodies }
    pub fn constraints(&self) -> &[Constraint<F>] { &self.constraints }
    /// Contacts found by the last step.
    pub fn contacts(&self) -> &[Contact<F>] { &self.contacts }
    pub fn config(&self) -> &WorldConfig<F> { &self.config }
    pub fn broadphase(&self) -> &B { &self.broadphase }
    pub fn body_count(&self) -> usize { self.bodies.len() }
    pub fn constraint_count(&self) -> usize { self.constraints.len() }

    pub fn set_gravity(&mut self, gravity: Vec2<F>) {
        self.config.gravity = gravity;
    }

    /// Bodies whose shape contains `point`, in id order.
    pub fn query_point(&self, point: Vec2<F>) -> AllocVec<BodyId> {
        let mut hits: AllocVec<BodyId> = self
            .broadphase
            .query_point(point)
            .into_iter()
            .filter(|&id| self.body(id).is_some_and(|b| b.contains_point(point)))
            .collect();
        hits.sort_unstable();
        hits
    }

    /// Bodies whose current bounds overlap `aabb`, in id order.
    pub fn query_aabb(&self, aabb: &Aabb<F>) -> AllocVec<BodyId> {
        let mut hits: AllocVec<BodyId> = self
            .broadphase
            .query_aabb(aabb)
            .into_iter()
            .filter(|&id| self.body(id).is_some_and(|b| b.aabb().overlaps(aabb)))
            .collect();
        hits.sort_unstable();
        hits
    }

    /// Cut every slicable body crossed by `segment` in two. Returns the
    /// number of bodies sliced.
    pub fn slice<O: StepObserver<F>>(&mut self, segment: &Segment<F>, observer: &mut O) -> usize {
        // Snapshot first: splitting removes and adds bodies.
        let candidates = self.query_aabb(&segment.aabb());
        let splitter = self.splitter.clone();

        let mut sliced = 0;
        for id in candidates {
            let Some(result) = self.body(id).and_then(|b| SlicingAlgorithm::slice_body(b, segment)) else {
                continue;
            };
            if splitter.split(&result, self, observer) {
                sliced += 1;
            }
        }
        sliced
    }

    /// Advance the simulation by one fixed step of `dt` seconds.
    pub fn update_fixed<O: StepObserver<F>>(&mut self, dt: F, observer: &mut O) {
        if !(dt > F::zero()) {
            log::warn!("update_fixed called with non-positive dt, skipping step");
            return;
        }

        // 1. Spring forces, then velocities.
        for c in self.constraints.iter_mut() {
            if let Some((a, b)) = constraint_indices(&self.bodies, c) {
                let (body_a, body_b) = pair_mut(&mut self.bodies, a, b);
                c.apply_forces(body_a, body_b);
            }
        }
        self.integrator.integrate_velocities(&mut self.bodies, self.config.gravity, dt);
        observer.on_integrate();

        // 2. Broadphase.
        self.broadphase.update(&self.bodies);
        let bodies = &self.bodies;
        let mut pairs: AllocVec<(usize, usize)> = self
            .broadphase
            .pairs()
            .into_iter()
            .filter_map(|(a, b)| Some((index_in(bodies, a)?, index_in(bodies, b)?)))
            .collect();
        pairs.sort_unstable();

        // 3. Narrowphase.
        self.contacts = self.detector.evaluate(&self.bodies, &pairs);

        // 4. Velocity constraints.
        self.solver.init_velocity_constraints(&mut self.contacts, &self.bodies);
        for c in self.constraints.iter_mut() {
            if let Some((a, b)) = constraint_indices(&self.bodies, c) {
                let (body_a, body_b) = pair_mut(&mut self.bodies, a, b);
                c.pre_step(body_a, body_b, dt, self.config.baumgarte);
            }
        }
        for i in 0..self.config.velocity_iterations {
            self.solver.solve_velocity_constraints(&mut self.contacts, &mut self.bodies);
            for c in self.constraints.iter_mut() {
                if let Some((a, b)) = constraint_indices(&self.bodies, c) {
                    let (body_a, body_b) = pair_mut(&mut self.bodies, a, b);
                    c.solve_velocity(body_a, body_b);
                }
            }
            observer.on_velocity_iteration(i);
        }

        // 5. Positions.
        self.integrator.integrate_positions(&mut self.bodies, dt);

        // 6. Position correction.
        let mut solved = true;
        for i in 0..self.config.position_iterations {
            let contacts_solved = self.position_solver.solve(&self.contacts, &mut self.bodies);
            let mut constraints_solved = true;
            for c in self.constraints.iter() {
                if let Some((a, b)) = constraint_indices(&self.bodies, c) {
                    let (body_a, body_b) = pair_mut(&mut self.bodies, a, b);
                    constraints_solved &= c.solve_position(body_a, body_b);
                }
            }
            solved = contacts_solved && constraints_solved;
            observer.on_position_iteration(i, solved);
        }

        // 7. Tearing.
        let torn = self.tearing.update(&mut self.constraints, &self.bodies, observer);

        // 8. Bounds.
        for body in self.bodies.iter_mut() {
            body.synchronize();
        }
        self.broadphase.update(&self.bodies);

        log::trace!(
            "step: {} bodies, {} pairs, {} contacts, solved {}, {} torn",
            self.bodies.len(),
            pairs.len(),
            self.contacts.len(),
            solved,
            torn
        );
        observer.on_step_complete();
    }
}
