//! Error types for physics operations.
//!
//! Only construction and API misuse surface as errors. Degenerate geometry
//! met during a step (zero-length normals, parallel cuts, rejected slices)
//! is handled with sentinel values instead.

use core::fmt;

use crate::body::BodyId;
use crate::constraint::ConstraintId;

/// Errors that can occur during physics operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Density must be non-negative and finite.
    InvalidDensity,
    /// Circle radius must be positive.
    InvalidRadius,
    /// A polygon needs at least three vertices.
    InsufficientVertices { count: usize },
    /// Polygon vertices enclose (almost) no area.
    DegeneratePolygon,
    /// Fabric dimensions must be at least 2x2.
    InvalidGridDimensions,
    /// Fabric spacing must be positive.
    InvalidSpacing,
    /// No body with this id is owned by the world.
    BodyNotFound(BodyId),
    /// No constraint with this id is owned by the world.
    ConstraintNotFound(ConstraintId),
    /// A constraint must join two different bodies.
    SelfConstraint(BodyId),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InvalidDensity => write!(f, "density must be non-negative and finite"),
            PhysicsError::InvalidRadius => write!(f, "radius must be positive"),
            PhysicsError::InsufficientVertices { count } => {
                write!(f, "polygon needs at least 3 vertices (got {})", count)
            }
            PhysicsError::DegeneratePolygon => write!(f, "polygon has zero area"),
            PhysicsError::InvalidGridDimensions => write!(f, "fabric must be at least 2x2"),
            PhysicsError::InvalidSpacing => write!(f, "fabric spacing must be positive"),
            PhysicsError::BodyNotFound(id) => write!(f, "body {} not found", id.0),
            PhysicsError::ConstraintNotFound(id) => write!(f, "constraint {} not found", id.0),
            PhysicsError::SelfConstraint(id) => write!(f, "body {} cannot be constrained to itself", id.0),
        }
    }
}

impl core::error::Error for PhysicsError {}
