//! Deterministic fixed-timestep 2D physics for games.
//!
//! `scission` simulates rigid convex polygons, tearable cloth made of soft
//! particles, and lets the game cut bodies in two at runtime.
//!
//! # Features
//!
//! - **Rigid bodies**: Static, kinematic and dynamic convex polygons
//! - **Collision**: Dynamic AABB tree broadphase, SAT narrowphase
//! - **Solver**: Sequential impulses with friction and restitution,
//!   Baumgarte position correction
//! - **Cloth**: `Fabric` grids of distance constraints that tear under stress
//! - **Slicing**: Cut convex polygons along a segment into two new bodies
//! - **Observable**: Tear and slice events via the `StepObserver` trait
//! - **`no_std` compatible**: Only needs `alloc`
//!
//! # Example
//!
//! ```
//! use scission::{Body, BodyType, Material, NoOpStepObserver, Segment, Shape, Vec2, World, WorldConfig};
//!
//! let mut world: World<f32> = World::new(WorldConfig::default());
//! world.add_body(Body::wall(Vec2::new(0.0, 300.0), 800.0, 20.0).unwrap());
//! let shape = Shape::rect(200.0, 40.0, Material::default()).unwrap();
//! let plank = Body::new(shape, Vec2::new(0.0, 0.0), BodyType::Dynamic).with_slicable(true);
//! world.add_body(plank);
//!
//! let cut = Segment::new(Vec2::new(0.0, -100.0), Vec2::new(0.0, 100.0));
//! assert_eq!(world.slice(&cut, &mut NoOpStepObserver), 1);
//!
//! for _ in 0..60 {
//!     world.update_fixed(1.0 / 60.0, &mut NoOpStepObserver);
//! }
//! assert_eq!(world.body_count(), 3);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod transform;
pub mod aabb;
pub mod segment;
pub mod shape;
pub mod body;
pub mod broadphase;
pub mod contact;
pub mod sat;
pub mod narrowphase;
pub mod solver;
pub mod integrator;
pub mod position_solver;
pub mod constraint;
pub mod fabric;
pub mod tearing;
pub mod slicing;
pub mod splitter;
pub mod world;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec2};
pub use transform::{Mat2, Transform};
pub use aabb::Aabb;
pub use segment::{Segment, SegmentHit};
pub use shape::{MassData, Material, Polygon, Shape, ShapeKind};
pub use body::{Body, BodyId, BodyType};
pub use broadphase::{AabbTree, Broadphase, ProxyId};
pub use contact::{Contact, ContactPoint};
pub use narrowphase::CollisionDetector;
pub use solver::ContactSolver;
pub use integrator::Integrator;
pub use position_solver::PositionSolver;
pub use constraint::{Constraint, ConstraintId, ConstraintKind, DistanceConstraint, SpringConstraint};
pub use fabric::{Fabric, FabricConfig};
pub use tearing::TearingLogic;
pub use slicing::{SliceIntersection, SliceResult, SlicingAlgorithm};
pub use splitter::PolygonSplitter;
pub use world::World;
pub use config::WorldConfig;
pub use observer::{NoOpStepObserver, StepObserver};
pub use error::PhysicsError;
